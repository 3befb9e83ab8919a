use crate::context::consts;

/// Pixel layout of uploaded texture data (always `UNSIGNED_BYTE` components).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PixelFormat {
    #[default]
    Rgba,
    Rgb,
    Alpha,
    Luminance,
    LuminanceAlpha,
}

impl PixelFormat {
    pub const fn raw(self) -> u32 {
        match self {
            PixelFormat::Rgba => consts::RGBA,
            PixelFormat::Rgb => consts::RGB,
            PixelFormat::Alpha => consts::ALPHA,
            PixelFormat::Luminance => consts::LUMINANCE,
            PixelFormat::LuminanceAlpha => consts::LUMINANCE_ALPHA,
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::Rgb => 3,
            PixelFormat::LuminanceAlpha => 2,
            PixelFormat::Alpha | PixelFormat::Luminance => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl TextureFilter {
    pub const fn raw(self) -> u32 {
        match self {
            TextureFilter::Nearest => consts::NEAREST,
            TextureFilter::Linear => consts::LINEAR,
            TextureFilter::NearestMipmapNearest => consts::NEAREST_MIPMAP_NEAREST,
            TextureFilter::LinearMipmapNearest => consts::LINEAR_MIPMAP_NEAREST,
            TextureFilter::NearestMipmapLinear => consts::NEAREST_MIPMAP_LINEAR,
            TextureFilter::LinearMipmapLinear => consts::LINEAR_MIPMAP_LINEAR,
        }
    }

    /// Whether sampling with this filter reads mip levels.
    pub const fn uses_mipmaps(self) -> bool {
        !matches!(self, TextureFilter::Nearest | TextureFilter::Linear)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

impl TextureWrap {
    pub const fn raw(self) -> u32 {
        match self {
            TextureWrap::Repeat => consts::REPEAT,
            TextureWrap::ClampToEdge => consts::CLAMP_TO_EDGE,
            TextureWrap::MirroredRepeat => consts::MIRRORED_REPEAT,
        }
    }
}

/// Where texel data comes from.
#[derive(Debug, Copy, Clone)]
pub enum TextureSource<'a> {
    /// Decoded RGBA8 image. Always uploaded as [`PixelFormat::Rgba`].
    #[cfg(feature = "image")]
    Image(&'a image::RgbaImage),
    /// Tightly packed rows of `width * bytes_per_pixel` bytes.
    Pixels { width: u32, height: u32, data: &'a [u8] },
    /// Storage only; contents undefined until written.
    Empty { width: u32, height: u32 },
}

impl TextureSource<'_> {
    pub fn size(&self) -> (u32, u32) {
        match *self {
            #[cfg(feature = "image")]
            TextureSource::Image(image) => image.dimensions(),
            TextureSource::Pixels { width, height, .. } => (width, height),
            TextureSource::Empty { width, height } => (width, height),
        }
    }
}

/// Texture creation options.
///
/// Unset filter/wrap fields are defaulted from the texture size (see
/// [`SamplerParams::resolve`]):
///
/// | size | min | mag | wrap |
/// |------|-----|-----|------|
/// | power of two | `LINEAR` (`LINEAR_MIPMAP_LINEAR` with `mipmap`) | `LINEAR` | `REPEAT` |
/// | otherwise | `NEAREST` | `NEAREST` | `CLAMP_TO_EDGE` |
#[derive(Debug, Clone)]
pub struct TextureOptions<'a> {
    /// Raw bind target. Only `TEXTURE_2D` is supported.
    pub target: u32,
    pub source: TextureSource<'a>,
    /// Ignored for image sources.
    pub format: PixelFormat,
    pub min_filter: Option<TextureFilter>,
    pub mag_filter: Option<TextureFilter>,
    pub wrap_s: Option<TextureWrap>,
    pub wrap_t: Option<TextureWrap>,
    /// Generate mipmaps after upload. Skipped for non-power-of-two sizes.
    pub mipmap: bool,
}

impl<'a> TextureOptions<'a> {
    pub fn new(source: TextureSource<'a>) -> Self {
        Self {
            target: consts::TEXTURE_2D,
            source,
            format: PixelFormat::default(),
            min_filter: None,
            mag_filter: None,
            wrap_s: None,
            wrap_t: None,
            mipmap: false,
        }
    }

    /// Upload format after applying source overrides.
    pub fn effective_format(&self) -> PixelFormat {
        match self.source {
            #[cfg(feature = "image")]
            TextureSource::Image(_) => PixelFormat::Rgba,
            _ => self.format,
        }
    }
}

/// Filter/wrap/mipmap settings actually applied to a texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SamplerParams {
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub mipmap: bool,
}

impl SamplerParams {
    /// Fills unset options from the texture size. Explicit options always win.
    pub fn resolve(options: &TextureOptions<'_>, width: u32, height: u32) -> Self {
        let pot = width.is_power_of_two() && height.is_power_of_two();

        let mipmap = if options.mipmap && !pot {
            log::warn!(
                "mipmaps skipped for non-power-of-two texture {}x{}",
                width,
                height
            );
            false
        } else {
            options.mipmap
        };

        let (min_default, mag_default, wrap_default) = if pot {
            let min = if mipmap { TextureFilter::LinearMipmapLinear } else { TextureFilter::Linear };
            (min, TextureFilter::Linear, TextureWrap::Repeat)
        } else {
            (TextureFilter::Nearest, TextureFilter::Nearest, TextureWrap::ClampToEdge)
        };

        let params = Self {
            min_filter: options.min_filter.unwrap_or(min_default),
            mag_filter: options.mag_filter.unwrap_or(mag_default),
            wrap_s: options.wrap_s.unwrap_or(wrap_default),
            wrap_t: options.wrap_t.unwrap_or(wrap_default),
            mipmap,
        };

        if params.min_filter.uses_mipmaps() && !params.mipmap {
            log::warn!(
                "min filter {:?} samples mip levels but none are generated",
                params.min_filter
            );
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(width: u32, height: u32) -> TextureOptions<'static> {
        TextureOptions::new(TextureSource::Empty { width, height })
    }

    #[test]
    fn power_of_two_defaults() {
        let p = SamplerParams::resolve(&empty(64, 32), 64, 32);
        assert_eq!(p.min_filter, TextureFilter::Linear);
        assert_eq!(p.mag_filter, TextureFilter::Linear);
        assert_eq!(p.wrap_s, TextureWrap::Repeat);
        assert_eq!(p.wrap_t, TextureWrap::Repeat);
        assert!(!p.mipmap);
    }

    #[test]
    fn power_of_two_with_mipmaps() {
        let options = TextureOptions { mipmap: true, ..empty(16, 16) };
        let p = SamplerParams::resolve(&options, 16, 16);
        assert_eq!(p.min_filter, TextureFilter::LinearMipmapLinear);
        assert!(p.mipmap);
    }

    #[test]
    fn npot_falls_back_to_nearest_clamp() {
        let options = TextureOptions { mipmap: true, ..empty(100, 64) };
        let p = SamplerParams::resolve(&options, 100, 64);
        assert_eq!(p.min_filter, TextureFilter::Nearest);
        assert_eq!(p.mag_filter, TextureFilter::Nearest);
        assert_eq!(p.wrap_s, TextureWrap::ClampToEdge);
        assert_eq!(p.wrap_t, TextureWrap::ClampToEdge);
        assert!(!p.mipmap);
    }

    #[test]
    fn explicit_options_win() {
        let options = TextureOptions {
            mag_filter: Some(TextureFilter::Linear),
            wrap_t: Some(TextureWrap::MirroredRepeat),
            ..empty(3, 5)
        };
        let p = SamplerParams::resolve(&options, 3, 5);
        assert_eq!(p.mag_filter, TextureFilter::Linear);
        assert_eq!(p.wrap_t, TextureWrap::MirroredRepeat);
        assert_eq!(p.wrap_s, TextureWrap::ClampToEdge);
    }

    #[test]
    fn zero_size_is_not_power_of_two() {
        let p = SamplerParams::resolve(&empty(0, 0), 0, 0);
        assert_eq!(p.wrap_s, TextureWrap::ClampToEdge);
    }

    #[test]
    fn bytes_per_pixel() {
        assert_eq!(PixelFormat::Rgba.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::Rgb.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::LuminanceAlpha.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Alpha.bytes_per_pixel(), 1);
    }
}
