use anyhow::{bail, Context, Result};
use image::{Rgba, RgbaImage};

use ufx_gl::debug::dump_texture;
use ufx_gl::logging::{init_logging, LoggingConfig};
use ufx_gl::texture::TextureFilter;
use ufx_gl::uniform::Scalar;
use ufx_gl::{
    BuildOptions, DirectorySources, HeadlessContext, Program, Programs, Texture, TextureOptions,
    TextureSource, UniformValue,
};

type Gl = HeadlessContext;

struct Lesson {
    name: &'static str,
    vertex: &'static str,
    fragment: &'static str,
    run: fn(&mut Gl, &Program<Gl>) -> Result<()>,
}

const LESSONS: &[Lesson] = &[
    Lesson { name: "gradient", vertex: "quad.vert", fragment: "gradient.frag", run: gradient },
    Lesson { name: "lights", vertex: "quad.vert", fragment: "lights.frag", run: lights },
    Lesson { name: "checker", vertex: "quad.vert", fragment: "checker.frag", run: checker },
];

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    args.retain(|a| !a.starts_with('-'));
    init_logging(if verbose { LoggingConfig::verbose() } else { LoggingConfig::default() });

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          UFX GL LESSONS  v0.1          ║");
    println!("  ║   headless context  ·  uniform tree    ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let filter = args.into_iter().next();
    let selected: Vec<&Lesson> = LESSONS
        .iter()
        .filter(|l| filter.as_deref().is_none_or(|f| f == l.name))
        .collect();
    if selected.is_empty() {
        let names: Vec<&str> = LESSONS.iter().map(|l| l.name).collect();
        bail!("unknown lesson {:?} (available: {})", filter.unwrap_or_default(), names.join(", "));
    }

    let sources = DirectorySources::new(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"));
    let mut gl = HeadlessContext::new();
    let mut programs = Programs::new();

    for lesson in selected {
        println!("  ── {} ──", lesson.name);
        let program = programs
            .build(&mut gl, &sources, lesson.name, lesson.vertex, lesson.fragment, BuildOptions::default())
            .with_context(|| format!("building lesson `{}`", lesson.name))?;

        program
            .set(&mut gl, [("u_transform", UniformValue::from(IDENTITY)), ("u_offset", [0.0f32, 0.0].into())])
            .context("setting quad transform")?;
        (lesson.run)(&mut gl, program).with_context(|| format!("running lesson `{}`", lesson.name))?;

        print_table(program);
        println!();
    }

    if !gl.errors().is_empty() {
        bail!("context reported errors:\n  {}", gl.errors().join("\n  "));
    }
    log::info!(
        "{} lesson(s) done, {} context calls recorded",
        programs.len(),
        gl.calls().len()
    );
    Ok(())
}

fn print_table(program: &Program<Gl>) {
    for setter in program.table().setters() {
        println!(
            "    {:<22} {:<12} x{:<2} {}",
            setter.name(),
            setter.ty().name(),
            setter.array_len(),
            setter.default_form()
        );
    }
}

// ── lessons ───────────────────────────────────────────────────────────────────

fn gradient(gl: &mut Gl, program: &Program<Gl>) -> Result<()> {
    program.set(gl, [("u_top", [1.0f32, 0.6, 0.2]), ("u_bottom", [0.1, 0.1, 0.4])])?;
    Ok(())
}

fn lights(gl: &mut Gl, program: &Program<Gl>) -> Result<()> {
    let lights = program.table().field("lights").context("program has no `lights` uniform")?;
    let params = [([1.0f32, 0.9, 0.8], 0.7f32), ([0.2, 0.3, 1.0], 0.4)];

    for (i, (color, power)) in params.into_iter().enumerate() {
        let light = lights.index(i).with_context(|| format!("lights[{}] missing", i))?;
        light
            .field("color")
            .and_then(|n| n.setter())
            .with_context(|| format!("lights[{}].color missing", i))?
            .set_vector(gl, &color.map(Scalar::from))?;
        light
            .get("power")
            .with_context(|| format!("lights[{}].power missing", i))?
            .set_components(gl, &[Scalar::Float(power)])?;
    }

    program.set(gl, [("u_ambient", [0.05f32, 0.05, 0.05])])?;
    Ok(())
}

fn checker(gl: &mut Gl, program: &Program<Gl>) -> Result<()> {
    let image = RgbaImage::from_fn(8, 8, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([30, 30, 30, 255])
        }
    });
    let options = TextureOptions {
        mipmap: true,
        mag_filter: Some(TextureFilter::Nearest),
        ..TextureOptions::new(TextureSource::Image(&image))
    };
    let texture = Texture::build(gl, &options).context("building checker texture")?;
    log::debug!("checker sampler params: {:?}", texture.params());

    texture.bind(gl, 0);
    program.set(
        gl,
        [
            ("u_texture", UniformValue::from(0)),
            ("u_weights", UniformValue::from([0.25f32, 0.5, 0.25])),
            ("u_invert", UniformValue::from(false)),
        ],
    )?;

    let (width, height) = texture.size();
    dump_texture(gl, texture.handle(), width * 8, height * 8).context("dumping checker texture")?;

    // The dump leaves no program current.
    program.use_program(gl);
    texture.delete(gl);
    Ok(())
}
