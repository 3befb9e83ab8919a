//! Development-only helpers. Not meant for production rendering.

use bytemuck::{Pod, Zeroable};

use crate::buffer::{make_float_buffer, BufferUsage};
use crate::context::{consts, GlContext};
use crate::error::GlError;
use crate::program::Program;

const DUMP_VERTEX: &str = "
attribute vec2 a_pos;
varying vec2 v_uv;
void main() {
    v_uv = a_pos;
    gl_Position = vec4(a_pos * 2.0 - 1.0, 0.0, 1.0);
}";

const DUMP_FRAGMENT: &str = "
precision mediump float;
uniform sampler2D u_texture;
varying vec2 v_uv;
void main() {
    gl_FragColor = texture2D(u_texture, v_uv);
}";

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2], // 0..1
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [0.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0] },
];

/// Draws `texture` over a `width`x`height` viewport for visual inspection.
///
/// Builds a throwaway program and quad buffer, draws, and deletes both. Leaves
/// no program current afterwards.
pub fn dump_texture<C: GlContext>(
    gl: &mut C,
    texture: C::Texture,
    width: u32,
    height: u32,
) -> Result<(), GlError> {
    let program = Program::build(gl, DUMP_VERTEX, DUMP_FRAGMENT)?;
    let buffer = match make_float_buffer(gl, bytemuck::cast_slice(&QUAD_VERTICES), BufferUsage::StreamDraw) {
        Ok(buffer) => buffer,
        Err(err) => {
            program.delete(gl);
            return Err(err);
        }
    };

    let drawn = draw_quad(gl, &program, texture, width, height);

    gl.bind_buffer(consts::ARRAY_BUFFER, None);
    gl.delete_buffer(buffer);
    gl.use_program(None);
    program.delete(gl);
    drawn
}

fn draw_quad<C: GlContext>(
    gl: &mut C,
    program: &Program<C>,
    texture: C::Texture,
    width: u32,
    height: u32,
) -> Result<(), GlError> {
    let a_pos = gl
        .attrib_location(program.handle(), "a_pos")
        .ok_or_else(|| GlError::MissingLocation("a_pos".into()))?;
    gl.enable_vertex_attrib_array(a_pos);
    gl.vertex_attrib_pointer_f32(a_pos, 2, std::mem::size_of::<QuadVertex>() as i32, 0);

    gl.active_texture(consts::TEXTURE0);
    gl.bind_texture(consts::TEXTURE_2D, Some(texture));
    program.set(gl, [("u_texture", 0)])?;

    gl.viewport(0, 0, width as i32, height as i32);
    gl.draw_arrays(consts::TRIANGLE_STRIP, 0, QUAD_VERTICES.len() as i32);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{HeadlessCall, HeadlessContext};
    use crate::texture::{Texture, TextureOptions, TextureSource};

    #[test]
    fn draws_and_cleans_up() {
        let mut gl = HeadlessContext::new();
        let tex = Texture::build(
            &mut gl,
            &TextureOptions::new(TextureSource::Empty { width: 4, height: 4 }),
        )
        .unwrap();

        dump_texture(&mut gl, tex.handle(), 320, 240).unwrap();

        let calls = gl.calls();
        assert!(calls.contains(&HeadlessCall::Viewport { x: 0, y: 0, width: 320, height: 240 }));
        assert!(calls.contains(&HeadlessCall::DrawArrays {
            mode: consts::TRIANGLE_STRIP,
            first: 0,
            count: 4,
        }));
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.live_buffers(), 0);
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.current_program(), None);
        assert_eq!(gl.live_textures(), 1);
    }
}
