use glow::HasContext;

use crate::context::{ActiveUniform, GlContext, ShaderStage};

type Native = glow::Context;

// SAFETY (all blocks below): the caller owns a current GL context for the
// lifetime of `glow::Context`, and every handle passed in was created by it.
impl GlContext for glow::Context {
    type Shader = <Native as HasContext>::Shader;
    type Program = <Native as HasContext>::Program;
    type Texture = <Native as HasContext>::Texture;
    type Buffer = <Native as HasContext>::Buffer;
    type UniformLocation = <Native as HasContext>::UniformLocation;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { <Native as HasContext>::create_shader(self, stage.raw()) }
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        unsafe { <Native as HasContext>::shader_source(self, shader, source) }
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        unsafe { <Native as HasContext>::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        unsafe { <Native as HasContext>::delete_shader(self, shader) }
    }

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&mut self) -> Result<Self::Program, String> {
        unsafe { <Native as HasContext>::create_program(self) }
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe { <Native as HasContext>::attach_shader(self, program, shader) }
    }

    fn link_program(&mut self, program: Self::Program) {
        unsafe { <Native as HasContext>::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    // glow exposes no validateProgram; a linked program counts as valid.
    fn validate_program(&mut self, _program: Self::Program) {}

    fn program_validate_status(&self, program: Self::Program) -> bool {
        self.program_link_status(program)
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        unsafe { <Native as HasContext>::use_program(self, program) }
    }

    fn delete_program(&mut self, program: Self::Program) {
        unsafe { <Native as HasContext>::delete_program(self, program) }
    }

    // ── reflection ────────────────────────────────────────────────────────

    fn active_uniform_count(&self, program: Self::Program) -> u32 {
        unsafe { self.get_active_uniforms(program) }
    }

    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveUniform> {
        let u = unsafe { self.get_active_uniform(program, index) }?;
        Some(ActiveUniform::new(u.name, u.utype, u.size.max(0) as usize))
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    // ── uniform writes ────────────────────────────────────────────────────

    fn uniform_f32(&mut self, location: &Self::UniformLocation, values: &[f32]) {
        let loc = Some(location);
        unsafe {
            match *values {
                [x] => self.uniform_1_f32(loc, x),
                [x, y] => self.uniform_2_f32(loc, x, y),
                [x, y, z] => self.uniform_3_f32(loc, x, y, z),
                [x, y, z, w] => self.uniform_4_f32(loc, x, y, z, w),
                _ => log::warn!("uniform_f32: unsupported component count {}", values.len()),
            }
        }
    }

    fn uniform_i32(&mut self, location: &Self::UniformLocation, values: &[i32]) {
        let loc = Some(location);
        unsafe {
            match *values {
                [x] => self.uniform_1_i32(loc, x),
                [x, y] => self.uniform_2_i32(loc, x, y),
                [x, y, z] => self.uniform_3_i32(loc, x, y, z),
                [x, y, z, w] => self.uniform_4_i32(loc, x, y, z, w),
                _ => log::warn!("uniform_i32: unsupported component count {}", values.len()),
            }
        }
    }

    fn uniform_f32_slice(&mut self, location: &Self::UniformLocation, width: usize, values: &[f32]) {
        let loc = Some(location);
        unsafe {
            match width {
                1 => self.uniform_1_f32_slice(loc, values),
                2 => self.uniform_2_f32_slice(loc, values),
                3 => self.uniform_3_f32_slice(loc, values),
                4 => self.uniform_4_f32_slice(loc, values),
                _ => log::warn!("uniform_f32_slice: unsupported width {}", width),
            }
        }
    }

    fn uniform_i32_slice(&mut self, location: &Self::UniformLocation, width: usize, values: &[i32]) {
        let loc = Some(location);
        unsafe {
            match width {
                1 => self.uniform_1_i32_slice(loc, values),
                2 => self.uniform_2_i32_slice(loc, values),
                3 => self.uniform_3_i32_slice(loc, values),
                4 => self.uniform_4_i32_slice(loc, values),
                _ => log::warn!("uniform_i32_slice: unsupported width {}", width),
            }
        }
    }

    fn uniform_matrix_f32_slice(
        &mut self,
        location: &Self::UniformLocation,
        dim: usize,
        transpose: bool,
        values: &[f32],
    ) {
        let loc = Some(location);
        unsafe {
            match dim {
                2 => self.uniform_matrix_2_f32_slice(loc, transpose, values),
                3 => self.uniform_matrix_3_f32_slice(loc, transpose, values),
                4 => self.uniform_matrix_4_f32_slice(loc, transpose, values),
                _ => log::warn!("uniform_matrix_f32_slice: unsupported dimension {}", dim),
            }
        }
    }

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&mut self) -> Result<Self::Texture, String> {
        unsafe { <Native as HasContext>::create_texture(self) }
    }

    fn active_texture(&mut self, unit: u32) {
        unsafe { <Native as HasContext>::active_texture(self, unit) }
    }

    fn bind_texture(&mut self, target: u32, texture: Option<Self::Texture>) {
        unsafe { <Native as HasContext>::bind_texture(self, target, texture) }
    }

    fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        format: u32,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    ) {
        unsafe {
            <Native as HasContext>::tex_image_2d(
                self,
                target,
                level,
                format as i32,
                width as i32,
                height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                pixels,
            )
        }
    }

    fn tex_parameter_i32(&mut self, target: u32, pname: u32, value: i32) {
        unsafe { <Native as HasContext>::tex_parameter_i32(self, target, pname, value) }
    }

    fn generate_mipmap(&mut self, target: u32) {
        unsafe { <Native as HasContext>::generate_mipmap(self, target) }
    }

    fn delete_texture(&mut self, texture: Self::Texture) {
        unsafe { <Native as HasContext>::delete_texture(self, texture) }
    }

    // ── buffers + draw ────────────────────────────────────────────────────

    fn create_buffer(&mut self) -> Result<Self::Buffer, String> {
        unsafe { <Native as HasContext>::create_buffer(self) }
    }

    fn bind_buffer(&mut self, target: u32, buffer: Option<Self::Buffer>) {
        unsafe { <Native as HasContext>::bind_buffer(self, target, buffer) }
    }

    fn buffer_data(&mut self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.buffer_data_u8_slice(target, data, usage) }
    }

    fn delete_buffer(&mut self, buffer: Self::Buffer) {
        unsafe { <Native as HasContext>::delete_buffer(self, buffer) }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { <Native as HasContext>::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer_f32(&mut self, index: u32, size: i32, stride: i32, offset: i32) {
        unsafe { <Native as HasContext>::vertex_attrib_pointer_f32(self, index, size, glow::FLOAT, false, stride, offset) }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { <Native as HasContext>::viewport(self, x, y, width, height) }
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        unsafe { <Native as HasContext>::draw_arrays(self, mode, first, count) }
    }
}
