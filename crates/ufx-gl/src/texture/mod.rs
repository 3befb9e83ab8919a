//! 2D texture creation with size-dependent parameter defaults.

mod options;

use std::fmt;

use crate::context::{consts, GlContext};
use crate::error::GlError;

pub use options::{PixelFormat, SamplerParams, TextureFilter, TextureOptions, TextureSource, TextureWrap};

/// A created 2D texture and the parameters it was configured with.
pub struct Texture<C: GlContext> {
    handle: C::Texture,
    width: u32,
    height: u32,
    format: PixelFormat,
    params: SamplerParams,
}

impl<C: GlContext> Texture<C> {
    /// Creates, uploads, and configures a texture.
    ///
    /// Target and pixel-length checks run before any context call, so a
    /// rejected request leaves the context untouched. The texture stays bound
    /// to `TEXTURE_2D` on the active unit.
    pub fn build(gl: &mut C, options: &TextureOptions<'_>) -> Result<Self, GlError> {
        if options.target != consts::TEXTURE_2D {
            return Err(GlError::UnsupportedTarget(options.target));
        }

        let (width, height) = options.source.size();
        let format = options.effective_format();
        let pixels: Option<&[u8]> = match options.source {
            #[cfg(feature = "image")]
            TextureSource::Image(image) => Some(image.as_raw().as_slice()),
            TextureSource::Pixels { data, .. } => Some(data),
            TextureSource::Empty { .. } => None,
        };
        if let Some(data) = pixels {
            let expected = width as usize * height as usize * format.bytes_per_pixel();
            if data.len() != expected {
                return Err(GlError::PixelData { expected, actual: data.len() });
            }
        }

        let params = SamplerParams::resolve(options, width, height);

        let handle = gl.create_texture().map_err(GlError::Resource)?;
        let target = consts::TEXTURE_2D;
        gl.bind_texture(target, Some(handle));
        gl.tex_image_2d(target, 0, format.raw(), width, height, pixels);
        gl.tex_parameter_i32(target, consts::TEXTURE_MIN_FILTER, params.min_filter.raw() as i32);
        gl.tex_parameter_i32(target, consts::TEXTURE_MAG_FILTER, params.mag_filter.raw() as i32);
        gl.tex_parameter_i32(target, consts::TEXTURE_WRAP_S, params.wrap_s.raw() as i32);
        gl.tex_parameter_i32(target, consts::TEXTURE_WRAP_T, params.wrap_t.raw() as i32);
        if params.mipmap {
            gl.generate_mipmap(target);
        }

        log::debug!("texture {:?} {}x{} {:?} {:?}", handle, width, height, format, params);

        Ok(Self { handle, width, height, format, params })
    }

    #[inline]
    pub fn handle(&self) -> C::Texture {
        self.handle
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn params(&self) -> SamplerParams {
        self.params
    }

    /// Binds to texture unit `unit` (0-based).
    pub fn bind(&self, gl: &mut C, unit: u32) {
        gl.active_texture(consts::TEXTURE0 + unit);
        gl.bind_texture(consts::TEXTURE_2D, Some(self.handle));
    }

    pub fn delete(self, gl: &mut C) {
        gl.delete_texture(self.handle);
    }
}

impl<C: GlContext> fmt::Debug for Texture<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("handle", &self.handle)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("params", &self.params)
            .finish()
    }
}
