use crate::context::{consts, GlContext};
use crate::error::GlError;

/// Buffer usage hint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BufferUsage {
    #[default]
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

impl BufferUsage {
    pub const fn raw(self) -> u32 {
        match self {
            BufferUsage::StaticDraw => consts::STATIC_DRAW,
            BufferUsage::DynamicDraw => consts::DYNAMIC_DRAW,
            BufferUsage::StreamDraw => consts::STREAM_DRAW,
        }
    }
}

/// Creates an `ARRAY_BUFFER` holding `data` and leaves it bound.
pub fn make_float_buffer<C: GlContext>(
    gl: &mut C,
    data: &[f32],
    usage: BufferUsage,
) -> Result<C::Buffer, GlError> {
    let buffer = gl.create_buffer().map_err(GlError::Resource)?;
    gl.bind_buffer(consts::ARRAY_BUFFER, Some(buffer));
    gl.buffer_data(consts::ARRAY_BUFFER, bytemuck::cast_slice(data), usage.raw());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{HeadlessCall, HeadlessContext};

    #[test]
    fn uploads_float_bytes() {
        let mut gl = HeadlessContext::new();
        let buffer = make_float_buffer(&mut gl, &[0.0, 1.0, 0.5], BufferUsage::default()).unwrap();
        assert_eq!(gl.buffer_len(buffer), Some(12));
        assert!(gl.calls().contains(&HeadlessCall::BufferData {
            target: consts::ARRAY_BUFFER,
            bytes: 12,
            usage: consts::STATIC_DRAW,
        }));
    }

    #[test]
    fn usage_hint_is_forwarded() {
        let mut gl = HeadlessContext::new();
        make_float_buffer(&mut gl, &[1.0], BufferUsage::StreamDraw).unwrap();
        assert!(gl.calls().iter().any(|c| matches!(
            c,
            HeadlessCall::BufferData { usage, .. } if *usage == consts::STREAM_DRAW
        )));
    }
}
