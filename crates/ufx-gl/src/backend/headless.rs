use std::collections::BTreeMap;

use crate::context::{ActiveUniform, GlContext, ShaderStage};
use crate::uniform::split_array_suffix;

use super::glsl::{self, Declarations};

/// Handle type for every headless object kind.
pub type HeadlessHandle = u32;

/// Uniform location: program handle plus a per-program slot.
///
/// A whole-array base name and its `[0]` element share a slot, as in GL.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct HeadlessLocation {
    pub program: HeadlessHandle,
    pub slot: u32,
}

/// Values written to a uniform. Reads of a whole array concatenate its elements.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformData {
    Float(Vec<f32>),
    Int(Vec<i32>),
}

impl UniformData {
    /// Splits into per-element values of `width` scalars each.
    fn chunks(&self, width: usize) -> Vec<UniformData> {
        let width = width.max(1);
        match self {
            UniformData::Float(v) => v.chunks(width).map(|c| UniformData::Float(c.to_vec())).collect(),
            UniformData::Int(v) => v.chunks(width).map(|c| UniformData::Int(c.to_vec())).collect(),
        }
    }

    fn append(self, next: &UniformData) -> Option<UniformData> {
        match (self, next) {
            (UniformData::Float(mut a), UniformData::Float(b)) => {
                a.extend_from_slice(b);
                Some(UniformData::Float(a))
            }
            (UniformData::Int(mut a), UniformData::Int(b)) => {
                a.extend_from_slice(b);
                Some(UniformData::Int(a))
            }
            _ => None,
        }
    }
}

/// State-changing calls, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessCall {
    UseProgram(Option<HeadlessHandle>),
    Uniform { location: HeadlessLocation, entry: String, data: UniformData },
    ActiveTexture(u32),
    BindTexture { target: u32, texture: Option<HeadlessHandle> },
    TexImage2d { target: u32, format: u32, width: u32, height: u32, bytes: Option<usize> },
    TexParameter { target: u32, pname: u32, value: i32 },
    GenerateMipmap(u32),
    BindBuffer { target: u32, buffer: Option<HeadlessHandle> },
    BufferData { target: u32, bytes: usize, usage: u32 },
    EnableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, size: i32, stride: i32, offset: i32 },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    DrawArrays { mode: u32, first: i32, count: i32 },
}

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
    decls: Declarations,
}

/// Consecutive element slots a uniform name covers.
#[derive(Debug, Copy, Clone)]
struct SlotRange {
    first: u32,
    len: u32,
}

#[derive(Debug, Default)]
struct ProgramObject {
    attached: Vec<HeadlessHandle>,
    linked: bool,
    validated: bool,
    log: String,
    uniforms: Vec<ActiveUniform>,
    slots: BTreeMap<String, SlotRange>,
    /// Element slot -> one past the last slot of its array.
    array_ends: BTreeMap<u32, u32>,
    attributes: Vec<String>,
}

#[derive(Debug)]
struct TextureObject {
    pixels: Option<Vec<u8>>,
}

/// In-memory [`GlContext`] with no GPU behind it.
///
/// Stands in for a driver in tests and in the lesson runner:
/// - "compiles" by checking bracket balance and a `void main` definition
/// - reflects `uniform` / `attribute` declarations (structs and arrays included)
/// - fails linking when both stages declare a uniform with different types
/// - records uniform writes per program slot and every state-changing call
///
/// GL usage errors (writing a uniform of another program, using an unlinked
/// program) are collected in [`HeadlessContext::errors`] instead of panicking.
#[derive(Debug, Default)]
pub struct HeadlessContext {
    next_handle: HeadlessHandle,
    shaders: BTreeMap<HeadlessHandle, ShaderObject>,
    programs: BTreeMap<HeadlessHandle, ProgramObject>,
    textures: BTreeMap<HeadlessHandle, TextureObject>,
    buffers: BTreeMap<HeadlessHandle, Vec<u8>>,
    current_program: Option<HeadlessHandle>,
    bound_texture: Option<HeadlessHandle>,
    bound_buffer: Option<HeadlessHandle>,
    uniform_values: BTreeMap<HeadlessLocation, UniformData>,
    calls: Vec<HeadlessCall>,
    errors: Vec<String>,
    validation_failure: Option<String>,
}

impl HeadlessContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `validateProgram` fail with `log`.
    pub fn set_validation_failure(&mut self, log: Option<&str>) {
        self.validation_failure = log.map(str::to_string);
    }

    pub fn calls(&self) -> &[HeadlessCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn current_program(&self) -> Option<HeadlessHandle> {
        self.current_program
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Active uniforms of a linked program, as reflected from its sources.
    pub fn reflected_uniforms(&self, program: HeadlessHandle) -> &[ActiveUniform] {
        self.programs
            .get(&program)
            .map(|p| p.uniforms.as_slice())
            .unwrap_or_default()
    }

    /// Current value of `name` in `program`.
    ///
    /// A whole-array name reads every element in order. `None` until each
    /// covered element has been written.
    pub fn uniform_value(&self, program: HeadlessHandle, name: &str) -> Option<UniformData> {
        let range = *self.programs.get(&program)?.slots.get(name)?;
        let mut out: Option<UniformData> = None;
        for slot in range.first..range.first + range.len {
            let part = self.uniform_values.get(&HeadlessLocation { program, slot })?;
            out = match out {
                None => Some(part.clone()),
                Some(acc) => Some(acc.append(part)?),
            };
        }
        out
    }

    pub fn texture_pixels(&self, texture: HeadlessHandle) -> Option<&[u8]> {
        self.textures.get(&texture)?.pixels.as_deref()
    }

    pub fn buffer_len(&self, buffer: HeadlessHandle) -> Option<usize> {
        self.buffers.get(&buffer).map(Vec::len)
    }

    fn allocate(&mut self) -> HeadlessHandle {
        self.next_handle += 1;
        self.next_handle
    }

    /// Stores `data` as `width`-sized elements in consecutive slots from
    /// `location`. Elements past the end of the array are dropped, as in GL.
    fn write_uniform(&mut self, location: &HeadlessLocation, entry: String, width: usize, data: UniformData) {
        if self.current_program != Some(location.program) {
            self.errors.push(format!(
                "INVALID_OPERATION: {} to location of program {} while program {:?} is current",
                entry, location.program, self.current_program
            ));
            return;
        }
        let Some(end) = self
            .programs
            .get(&location.program)
            .and_then(|p| p.array_ends.get(&location.slot))
            .copied()
        else {
            self.errors.push(format!("INVALID_OPERATION: {} to unknown location {:?}", entry, location));
            return;
        };
        for (slot, element) in (location.slot..end).zip(data.chunks(width)) {
            self.uniform_values
                .insert(HeadlessLocation { program: location.program, slot }, element);
        }
        self.calls.push(HeadlessCall::Uniform { location: *location, entry, data });
    }

    fn link(&self, program: &ProgramObject) -> Result<(Vec<ActiveUniform>, Vec<String>), String> {
        let compiled = |stage: ShaderStage| {
            program
                .attached
                .iter()
                .filter_map(|h| self.shaders.get(h))
                .find(|s| s.stage == stage && s.compiled)
        };
        let (Some(vertex), Some(fragment)) = (compiled(ShaderStage::Vertex), compiled(ShaderStage::Fragment)) else {
            return Err("ERROR: program needs one compiled vertex and one compiled fragment shader".into());
        };

        let mut uniforms: Vec<ActiveUniform> = vertex.decls.uniforms.clone();
        for u in &fragment.decls.uniforms {
            match uniforms.iter().find(|v| v.name == u.name) {
                Some(v) if v.raw_type != u.raw_type || v.size != u.size => {
                    return Err(format!(
                        "ERROR: uniform '{}' declared with different types in vertex and fragment shaders",
                        u.name
                    ));
                }
                Some(_) => {}
                None => uniforms.push(u.clone()),
            }
        }
        Ok((uniforms, vertex.decls.attributes.clone()))
    }
}

/// Slot table. Every array element gets its own slot; the base name covers
/// all of them and starts at `[0]`.
fn assign_slots(uniforms: &[ActiveUniform]) -> (BTreeMap<String, SlotRange>, BTreeMap<u32, u32>) {
    let mut slots = BTreeMap::new();
    let mut array_ends = BTreeMap::new();
    let mut next = 0u32;
    for u in uniforms {
        match split_array_suffix(&u.name) {
            Some((base, _)) => {
                let len = u.size.max(1) as u32;
                slots.insert(base.to_string(), SlotRange { first: next, len });
                for i in 0..len {
                    slots.insert(format!("{}[{}]", base, i), SlotRange { first: next + i, len: 1 });
                    array_ends.insert(next + i, next + len);
                }
                next += len;
            }
            None => {
                slots.insert(u.name.clone(), SlotRange { first: next, len: 1 });
                array_ends.insert(next, next + 1);
                next += 1;
            }
        }
    }
    (slots, array_ends)
}

impl GlContext for HeadlessContext {
    type Shader = HeadlessHandle;
    type Program = HeadlessHandle;
    type Texture = HeadlessHandle;
    type Buffer = HeadlessHandle;
    type UniformLocation = HeadlessLocation;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&mut self, stage: ShaderStage) -> Result<HeadlessHandle, String> {
        let handle = self.allocate();
        self.shaders.insert(
            handle,
            ShaderObject {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
                decls: Declarations::default(),
            },
        );
        Ok(handle)
    }

    fn shader_source(&mut self, shader: HeadlessHandle, source: &str) {
        if let Some(s) = self.shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&mut self, shader: HeadlessHandle) {
        let Some(s) = self.shaders.get_mut(&shader) else { return };
        match glsl::scan(&s.source) {
            Ok(decls) => {
                s.compiled = true;
                s.log.clear();
                s.decls = decls;
            }
            Err(log) => {
                s.compiled = false;
                s.log = log;
            }
        }
    }

    fn shader_compile_status(&self, shader: HeadlessHandle) -> bool {
        self.shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: HeadlessHandle) -> String {
        self.shaders.get(&shader).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: HeadlessHandle) {
        self.shaders.remove(&shader);
    }

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&mut self) -> Result<HeadlessHandle, String> {
        let handle = self.allocate();
        self.programs.insert(handle, ProgramObject::default());
        Ok(handle)
    }

    fn attach_shader(&mut self, program: HeadlessHandle, shader: HeadlessHandle) {
        if let Some(p) = self.programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn link_program(&mut self, program: HeadlessHandle) {
        let Some(p) = self.programs.get(&program) else { return };
        let result = self.link(p);
        let Some(p) = self.programs.get_mut(&program) else { return };
        match result {
            Ok((uniforms, attributes)) => {
                (p.slots, p.array_ends) = assign_slots(&uniforms);
                p.uniforms = uniforms;
                p.attributes = attributes;
                p.linked = true;
                p.log.clear();
            }
            Err(log) => {
                p.linked = false;
                p.log = log;
            }
        }
    }

    fn program_link_status(&self, program: HeadlessHandle) -> bool {
        self.programs.get(&program).is_some_and(|p| p.linked)
    }

    fn validate_program(&mut self, program: HeadlessHandle) {
        let failure = self.validation_failure.clone();
        if let Some(p) = self.programs.get_mut(&program) {
            p.validated = p.linked && failure.is_none();
            if let Some(log) = failure {
                p.log = log;
            }
        }
    }

    fn program_validate_status(&self, program: HeadlessHandle) -> bool {
        self.programs.get(&program).is_some_and(|p| p.validated)
    }

    fn program_info_log(&self, program: HeadlessHandle) -> String {
        self.programs.get(&program).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&mut self, program: Option<HeadlessHandle>) {
        if let Some(handle) = program {
            if !self.program_link_status(handle) {
                self.errors.push(format!("INVALID_OPERATION: useProgram({}) on unlinked program", handle));
                return;
            }
        }
        self.current_program = program;
        self.calls.push(HeadlessCall::UseProgram(program));
    }

    fn delete_program(&mut self, program: HeadlessHandle) {
        self.programs.remove(&program);
        self.uniform_values.retain(|loc, _| loc.program != program);
        if self.current_program == Some(program) {
            self.current_program = None;
        }
    }

    // ── reflection ────────────────────────────────────────────────────────

    fn active_uniform_count(&self, program: HeadlessHandle) -> u32 {
        self.reflected_uniforms(program).len() as u32
    }

    fn active_uniform(&self, program: HeadlessHandle, index: u32) -> Option<ActiveUniform> {
        self.reflected_uniforms(program).get(index as usize).cloned()
    }

    fn uniform_location(&self, program: HeadlessHandle, name: &str) -> Option<HeadlessLocation> {
        let range = self.programs.get(&program)?.slots.get(name)?;
        Some(HeadlessLocation { program, slot: range.first })
    }

    fn attrib_location(&self, program: HeadlessHandle, name: &str) -> Option<u32> {
        self.programs
            .get(&program)?
            .attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    // ── uniform writes ────────────────────────────────────────────────────

    fn uniform_f32(&mut self, location: &HeadlessLocation, values: &[f32]) {
        let entry = format!("uniform{}f", values.len());
        self.write_uniform(location, entry, values.len(), UniformData::Float(values.to_vec()));
    }

    fn uniform_i32(&mut self, location: &HeadlessLocation, values: &[i32]) {
        let entry = format!("uniform{}i", values.len());
        self.write_uniform(location, entry, values.len(), UniformData::Int(values.to_vec()));
    }

    fn uniform_f32_slice(&mut self, location: &HeadlessLocation, width: usize, values: &[f32]) {
        let entry = format!("uniform{}fv", width);
        self.write_uniform(location, entry, width, UniformData::Float(values.to_vec()));
    }

    fn uniform_i32_slice(&mut self, location: &HeadlessLocation, width: usize, values: &[i32]) {
        let entry = format!("uniform{}iv", width);
        self.write_uniform(location, entry, width, UniformData::Int(values.to_vec()));
    }

    fn uniform_matrix_f32_slice(
        &mut self,
        location: &HeadlessLocation,
        dim: usize,
        transpose: bool,
        values: &[f32],
    ) {
        if transpose {
            self.errors.push("INVALID_VALUE: uniformMatrix transpose must be false".into());
            return;
        }
        let entry = format!("uniformMatrix{}fv", dim);
        self.write_uniform(location, entry, dim * dim, UniformData::Float(values.to_vec()));
    }

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&mut self) -> Result<HeadlessHandle, String> {
        let handle = self.allocate();
        self.textures.insert(handle, TextureObject { pixels: None });
        Ok(handle)
    }

    fn active_texture(&mut self, unit: u32) {
        self.calls.push(HeadlessCall::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, target: u32, texture: Option<HeadlessHandle>) {
        self.bound_texture = texture;
        self.calls.push(HeadlessCall::BindTexture { target, texture });
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
        if level == 0 {
            if let Some(tex) = self.bound_texture.and_then(|h| self.textures.get_mut(&h)) {
                tex.pixels = pixels.map(<[u8]>::to_vec);
            }
        }
        self.calls.push(HeadlessCall::TexImage2d {
            target,
            format,
            width,
            height,
            bytes: pixels.map(<[u8]>::len),
        });
    }

    fn tex_parameter_i32(&mut self, target: u32, pname: u32, value: i32) {
        self.calls.push(HeadlessCall::TexParameter { target, pname, value });
    }

    fn generate_mipmap(&mut self, target: u32) {
        self.calls.push(HeadlessCall::GenerateMipmap(target));
    }

    fn delete_texture(&mut self, texture: HeadlessHandle) {
        self.textures.remove(&texture);
        if self.bound_texture == Some(texture) {
            self.bound_texture = None;
        }
    }

    // ── buffers + draw ────────────────────────────────────────────────────

    fn create_buffer(&mut self) -> Result<HeadlessHandle, String> {
        let handle = self.allocate();
        self.buffers.insert(handle, Vec::new());
        Ok(handle)
    }

    fn bind_buffer(&mut self, target: u32, buffer: Option<HeadlessHandle>) {
        self.bound_buffer = buffer;
        self.calls.push(HeadlessCall::BindBuffer { target, buffer });
    }

    fn buffer_data(&mut self, target: u32, data: &[u8], usage: u32) {
        match self.bound_buffer.and_then(|h| self.buffers.get_mut(&h)) {
            Some(contents) => *contents = data.to_vec(),
            None => self.errors.push("INVALID_OPERATION: bufferData with no buffer bound".into()),
        }
        self.calls.push(HeadlessCall::BufferData { target, bytes: data.len(), usage });
    }

    fn delete_buffer(&mut self, buffer: HeadlessHandle) {
        self.buffers.remove(&buffer);
        if self.bound_buffer == Some(buffer) {
            self.bound_buffer = None;
        }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.calls.push(HeadlessCall::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(&mut self, index: u32, size: i32, stride: i32, offset: i32) {
        self.calls.push(HeadlessCall::VertexAttribPointer { index, size, stride, offset });
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(HeadlessCall::Viewport { x, y, width, height });
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        if self.current_program.is_none() {
            self.errors.push("INVALID_OPERATION: drawArrays with no program in use".into());
        }
        self.calls.push(HeadlessCall::DrawArrays { mode, first, count });
    }
}
