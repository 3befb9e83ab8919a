//! Graphics-context capability.
//!
//! Everything in this crate talks to the GPU through [`GlContext`], a thin
//! trait over the GL/WebGL primitives the helpers need:
//! - shader + program objects (create, compile, link, validate, delete)
//! - active-uniform reflection and uniform locations
//! - typed uniform writes (`uniform{N}{f,i}`, `uniform{N}{f,i}v`, `uniformMatrix{N}fv`)
//! - 2D textures, array buffers, and a single draw call for debug output
//!
//! Backends live in [`crate::backend`].

use std::fmt;

pub mod consts;

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    #[inline]
    pub const fn raw(self) -> u32 {
        match self {
            ShaderStage::Vertex => consts::VERTEX_SHADER,
            ShaderStage::Fragment => consts::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// One entry of a linked program's active-uniform list.
///
/// `size` is the declared array length (1 for non-arrays). Array uniforms are
/// reported under their first element name, e.g. `lights[0]`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ActiveUniform {
    pub name: String,
    pub raw_type: u32,
    pub size: usize,
}

impl ActiveUniform {
    pub fn new(name: impl Into<String>, raw_type: u32, size: usize) -> Self {
        Self { name: name.into(), raw_type, size }
    }
}

/// GL-style context used by the program, uniform, and texture helpers.
///
/// Object creation returns `Err(String)` with the backend's reason when the
/// driver refuses. Query methods take `&self`; anything that changes GL state
/// takes `&mut self`.
pub trait GlContext {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type Texture: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&mut self, shader: Self::Shader, source: &str);
    fn compile_shader(&mut self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&mut self, shader: Self::Shader);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&mut self) -> Result<Self::Program, String>;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn link_program(&mut self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn validate_program(&mut self, program: Self::Program);
    fn program_validate_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&mut self, program: Option<Self::Program>);
    fn delete_program(&mut self, program: Self::Program);

    // ── reflection ────────────────────────────────────────────────────────

    fn active_uniform_count(&self, program: Self::Program) -> u32;
    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveUniform>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    // ── uniform writes (apply to the program in use) ──────────────────────

    /// `uniform{N}f`: `values.len()` is the component count (1..=4).
    fn uniform_f32(&mut self, location: &Self::UniformLocation, values: &[f32]);
    /// `uniform{N}i`: `values.len()` is the component count (1..=4).
    fn uniform_i32(&mut self, location: &Self::UniformLocation, values: &[i32]);
    /// `uniform{width}fv`.
    fn uniform_f32_slice(&mut self, location: &Self::UniformLocation, width: usize, values: &[f32]);
    /// `uniform{width}iv`.
    fn uniform_i32_slice(&mut self, location: &Self::UniformLocation, width: usize, values: &[i32]);
    /// `uniformMatrix{dim}fv`.
    fn uniform_matrix_f32_slice(
        &mut self,
        location: &Self::UniformLocation,
        dim: usize,
        transpose: bool,
        values: &[f32],
    );

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&mut self) -> Result<Self::Texture, String>;
    fn active_texture(&mut self, unit: u32);
    fn bind_texture(&mut self, target: u32, texture: Option<Self::Texture>);
    /// Uploads level `level` as `format`/`UNSIGNED_BYTE`. `None` allocates storage only.
    fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        format: u32,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    );
    fn tex_parameter_i32(&mut self, target: u32, pname: u32, value: i32);
    fn generate_mipmap(&mut self, target: u32);
    fn delete_texture(&mut self, texture: Self::Texture);

    // ── buffers + draw ────────────────────────────────────────────────────

    fn create_buffer(&mut self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&mut self, target: u32, buffer: Option<Self::Buffer>);
    fn buffer_data(&mut self, target: u32, data: &[u8], usage: u32);
    fn delete_buffer(&mut self, buffer: Self::Buffer);
    fn enable_vertex_attrib_array(&mut self, index: u32);
    /// Float attribute pointer into the bound `ARRAY_BUFFER` (stride/offset in bytes).
    fn vertex_attrib_pointer_f32(&mut self, index: u32, size: i32, stride: i32, offset: i32);
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32);
}
