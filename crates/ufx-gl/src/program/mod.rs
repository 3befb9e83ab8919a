//! Shader program build/link and the program wrapper.
//!
//! [`Program::build`] compiles both stages, links, validates, reflects active
//! uniforms into a [`UniformTable`], and activates the program. Intermediate
//! shader objects are deleted whether or not the build succeeds; a failed
//! build also deletes the program object.

mod registry;
mod source;

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::context::{ActiveUniform, GlContext, ShaderStage};
use crate::error::GlError;
use crate::uniform::{Setter, UniformTable, UniformValue};

pub use registry::Programs;
pub use source::{DirectorySources, SourceLookup};

/// Program build options.
#[derive(Debug, Copy, Clone)]
pub struct BuildOptions {
    /// Run `validateProgram` after linking and fail on a bad status.
    pub validate: bool,

    /// Make the program current once built.
    ///
    /// Uniform writes go to the current program, so this is what makes the
    /// setters usable straight away.
    pub activate: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            validate: true,
            activate: true,
        }
    }
}

/// Linked program with its uniform setter table.
pub struct Program<C: GlContext> {
    handle: C::Program,
    table: UniformTable<C::UniformLocation>,
}

impl<C: GlContext> Program<C> {
    /// Builds from literal vertex and fragment source with default options.
    pub fn build(gl: &mut C, vertex: &str, fragment: &str) -> Result<Self, GlError> {
        Self::build_with(gl, &(), vertex, fragment, BuildOptions::default())
    }

    /// Builds from sources resolved through `sources`.
    pub fn build_with<S>(
        gl: &mut C,
        sources: &S,
        vertex: &str,
        fragment: &str,
        options: BuildOptions,
    ) -> Result<Self, GlError>
    where
        S: SourceLookup + ?Sized,
    {
        let vertex = sources.resolve(vertex);
        let fragment = sources.resolve(fragment);

        let handle = gl.create_program().map_err(GlError::Resource)?;

        if let Err(err) = link(gl, handle, &vertex, &fragment, options.validate) {
            gl.delete_program(handle);
            return Err(err);
        }

        let table = match reflect(gl, handle) {
            Ok(table) => table,
            Err(err) => {
                gl.delete_program(handle);
                return Err(err);
            }
        };

        log::debug!(
            "program {:?} linked with {} addressable uniforms",
            handle,
            table.len()
        );

        let program = Program { handle, table };
        if options.activate {
            program.use_program(gl);
        }
        Ok(program)
    }

    #[inline]
    pub fn handle(&self) -> C::Program {
        self.handle
    }

    #[inline]
    pub fn table(&self) -> &UniformTable<C::UniformLocation> {
        &self.table
    }

    /// Makes this program current.
    pub fn use_program(&self, gl: &mut C) {
        gl.use_program(Some(self.handle));
    }

    /// Setter for an addressable uniform path. Unknown names are `None`.
    #[inline]
    pub fn setter(&self, path: &str) -> Option<&Rc<Setter<C::UniformLocation>>> {
        self.table.get(path)
    }

    #[inline]
    pub fn location(&self, path: &str) -> Option<&C::UniformLocation> {
        self.setter(path).map(|s| s.location())
    }

    /// Addressable name → location for every uniform.
    pub fn uniforms(&self) -> BTreeMap<&str, &C::UniformLocation> {
        self.table
            .setters()
            .map(|s| (s.name(), s.location()))
            .collect()
    }

    /// Writes several uniforms through their default setters.
    ///
    /// Stops at the first failure; earlier writes stay applied. Names the
    /// program does not have fail with [`GlError::UnknownUniform`].
    pub fn set<I, K, V>(&self, gl: &mut C, vars: I) -> Result<(), GlError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<UniformValue>,
    {
        for (name, value) in vars {
            let name = name.as_ref();
            let setter = self
                .setter(name)
                .ok_or_else(|| GlError::UnknownUniform(name.to_string()))?;
            setter.set_value(gl, &value.into())?;
        }
        Ok(())
    }

    /// Deletes the native program. Setters die with it.
    pub fn delete(self, gl: &mut C) {
        gl.delete_program(self.handle);
    }
}

impl<C: GlContext> fmt::Debug for Program<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("handle", &self.handle)
            .field("uniforms", &self.table.names().collect::<Vec<_>>())
            .finish()
    }
}

fn compile<C: GlContext>(gl: &mut C, stage: ShaderStage, source: &str) -> Result<C::Shader, GlError> {
    let shader = gl.create_shader(stage).map_err(GlError::Resource)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(GlError::Compile { stage, log });
    }
    Ok(shader)
}

fn link<C: GlContext>(
    gl: &mut C,
    program: C::Program,
    vertex: &str,
    fragment: &str,
    validate: bool,
) -> Result<(), GlError> {
    let vshader = compile(gl, ShaderStage::Vertex, vertex)?;
    gl.attach_shader(program, vshader);

    let fshader = match compile(gl, ShaderStage::Fragment, fragment) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(vshader);
            return Err(err);
        }
    };
    gl.attach_shader(program, fshader);

    gl.link_program(program);
    let status = check_program(gl, program, validate);

    gl.delete_shader(vshader);
    gl.delete_shader(fshader);
    status
}

fn check_program<C: GlContext>(gl: &mut C, program: C::Program, validate: bool) -> Result<(), GlError> {
    if !gl.program_link_status(program) {
        return Err(GlError::Link { log: gl.program_info_log(program) });
    }
    if validate {
        gl.validate_program(program);
        if !gl.program_validate_status(program) {
            return Err(GlError::Validate { log: gl.program_info_log(program) });
        }
    }
    Ok(())
}

fn reflect<C: GlContext>(
    gl: &C,
    program: C::Program,
) -> Result<UniformTable<C::UniformLocation>, GlError> {
    let count = gl.active_uniform_count(program);
    let uniforms: Vec<ActiveUniform> = (0..count)
        .filter_map(|i| gl.active_uniform(program, i))
        .collect();
    UniformTable::build(&uniforms, |name| gl.uniform_location(program, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{HeadlessContext, UniformData};
    use crate::uniform::Scalar;

    const VS: &str = "
        attribute vec2 a_pos;
        uniform mat4 u_transform;
        uniform vec2 u_offset;
        void main() { gl_Position = u_transform * vec4(a_pos + u_offset, 0.0, 1.0); }
    ";
    const FS: &str = "
        precision mediump float;
        uniform vec3 u_color;
        uniform float u_alpha;
        uniform sampler2D u_texture;
        void main() { gl_FragColor = vec4(u_color, u_alpha); }
    ";

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn build_reflects_both_stages_and_activates() {
        let mut gl = HeadlessContext::new();
        let prog = Program::build(&mut gl, VS, FS).unwrap();

        let mut names: Vec<_> = prog.uniforms().into_keys().collect();
        names.sort();
        assert_eq!(names, ["u_alpha", "u_color", "u_offset", "u_texture", "u_transform"]);
        assert_eq!(gl.current_program(), Some(prog.handle()));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 1);
    }

    #[test]
    fn build_without_activation() {
        let mut gl = HeadlessContext::new();
        let options = BuildOptions { activate: false, ..BuildOptions::default() };
        let prog = Program::build_with(&mut gl, &(), VS, FS, options).unwrap();
        assert_eq!(gl.current_program(), None);
        prog.use_program(&mut gl);
        assert_eq!(gl.current_program(), Some(prog.handle()));
    }

    #[test]
    fn build_resolves_sources_through_lookup() {
        let mut sources = std::collections::HashMap::new();
        sources.insert("vs".to_string(), VS.to_string());
        sources.insert("fs".to_string(), FS.to_string());

        let mut gl = HeadlessContext::new();
        let prog = Program::build_with(&mut gl, &sources, "vs", "fs", BuildOptions::default()).unwrap();
        assert!(prog.setter("u_color").is_some());
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn vertex_syntax_error_fails_without_leaks() {
        let mut gl = HeadlessContext::new();
        let err = Program::build(&mut gl, "void main() { gl_Position = vec4(0.0);", FS).unwrap_err();
        assert!(matches!(err, GlError::Compile { stage: ShaderStage::Vertex, .. }));
        assert!(err.to_string().starts_with("Error compiling vertex shader:\n"));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn fragment_failure_after_vertex_success_cleans_up() {
        let mut gl = HeadlessContext::new();
        let err = Program::build(&mut gl, VS, "void notmain() { }").unwrap_err();
        assert!(matches!(err, GlError::Compile { stage: ShaderStage::Fragment, .. }));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn link_failure_embeds_log() {
        let mut gl = HeadlessContext::new();
        let fs = "uniform float u_offset; void main() { gl_FragColor = vec4(u_offset); }";
        let err = Program::build(&mut gl, VS, fs).unwrap_err();
        match err {
            GlError::Link { log } => assert!(log.contains("u_offset")),
            other => panic!("expected link error, got {other:?}"),
        }
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn validation_failure_is_reported_and_optional() {
        let mut gl = HeadlessContext::new();
        gl.set_validation_failure(Some("sampler units overlap"));
        let err = Program::build(&mut gl, VS, FS).unwrap_err();
        assert_eq!(err, GlError::Validate { log: "sampler units overlap".into() });
        assert_eq!(gl.live_programs(), 0);

        let options = BuildOptions { validate: false, ..BuildOptions::default() };
        assert!(Program::build_with(&mut gl, &(), VS, FS, options).is_ok());
    }

    // ── bulk set ──────────────────────────────────────────────────────────

    #[test]
    fn bulk_set_matches_direct_setters() {
        let mut direct = HeadlessContext::new();
        let a = Program::build(&mut direct, VS, FS).unwrap();
        a.setter("u_alpha").unwrap().set_components(&mut direct, &[Scalar::Float(0.5)]).unwrap();
        a.setter("u_color")
            .unwrap()
            .set_vector(&mut direct, &[0.1f32, 0.2, 0.3].map(Scalar::from))
            .unwrap();

        let mut bulk = HeadlessContext::new();
        let b = Program::build(&mut bulk, VS, FS).unwrap();
        b.set(&mut bulk, [("u_alpha", UniformValue::from(0.5f32))]).unwrap();
        b.set(&mut bulk, [("u_color", [0.1f32, 0.2, 0.3])]).unwrap();

        for name in ["u_alpha", "u_color"] {
            assert_eq!(
                direct.uniform_value(a.handle(), name),
                bulk.uniform_value(b.handle(), name),
                "{name}"
            );
        }
        assert_eq!(
            bulk.uniform_value(b.handle(), "u_color"),
            Some(UniformData::Float(vec![0.1, 0.2, 0.3]))
        );
    }

    #[test]
    fn bulk_set_unknown_name_fails_loudly() {
        let mut gl = HeadlessContext::new();
        let prog = Program::build(&mut gl, VS, FS).unwrap();
        let err = prog.set(&mut gl, [("u_colour", [1.0f32, 0.0, 0.0])]).unwrap_err();
        assert_eq!(err, GlError::UnknownUniform("u_colour".into()));
        assert!(prog.setter("u_colour").is_none());
    }

    #[test]
    fn bulk_set_sampler_and_matrix() {
        let mut gl = HeadlessContext::new();
        let prog = Program::build(&mut gl, VS, FS).unwrap();
        let identity = [
            1.0f32, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        prog.set(&mut gl, [("u_transform", UniformValue::from(identity))]).unwrap();
        prog.set(&mut gl, [("u_texture", 0)]).unwrap();
        assert_eq!(
            gl.uniform_value(prog.handle(), "u_transform"),
            Some(UniformData::Float(identity.to_vec()))
        );
        assert_eq!(gl.uniform_value(prog.handle(), "u_texture"), Some(UniformData::Int(vec![0])));
    }

    #[test]
    fn delete_releases_program() {
        let mut gl = HeadlessContext::new();
        let prog = Program::build(&mut gl, VS, FS).unwrap();
        prog.delete(&mut gl);
        assert_eq!(gl.live_programs(), 0);
    }
}
