//! GL enum values used by this crate.
//!
//! Values match the OpenGL ES 2.0 / WebGL 1 headers so the same numbers can be
//! handed to any backend.

// ── uniform types ─────────────────────────────────────────────────────────

pub const FLOAT: u32 = 0x1406;
pub const FLOAT_VEC2: u32 = 0x8B50;
pub const FLOAT_VEC3: u32 = 0x8B51;
pub const FLOAT_VEC4: u32 = 0x8B52;
pub const INT: u32 = 0x1404;
pub const INT_VEC2: u32 = 0x8B53;
pub const INT_VEC3: u32 = 0x8B54;
pub const INT_VEC4: u32 = 0x8B55;
pub const BOOL: u32 = 0x8B56;
pub const BOOL_VEC2: u32 = 0x8B57;
pub const BOOL_VEC3: u32 = 0x8B58;
pub const BOOL_VEC4: u32 = 0x8B59;
pub const FLOAT_MAT2: u32 = 0x8B5A;
pub const FLOAT_MAT3: u32 = 0x8B5B;
pub const FLOAT_MAT4: u32 = 0x8B5C;
pub const SAMPLER_2D: u32 = 0x8B5E;
pub const SAMPLER_CUBE: u32 = 0x8B60;

// ── shaders ───────────────────────────────────────────────────────────────

pub const FRAGMENT_SHADER: u32 = 0x8B30;
pub const VERTEX_SHADER: u32 = 0x8B31;

// ── textures ──────────────────────────────────────────────────────────────

pub const TEXTURE_2D: u32 = 0x0DE1;
pub const TEXTURE_CUBE_MAP: u32 = 0x8513;
pub const TEXTURE0: u32 = 0x84C0;

pub const TEXTURE_MAG_FILTER: u32 = 0x2800;
pub const TEXTURE_MIN_FILTER: u32 = 0x2801;
pub const TEXTURE_WRAP_S: u32 = 0x2802;
pub const TEXTURE_WRAP_T: u32 = 0x2803;

pub const NEAREST: u32 = 0x2600;
pub const LINEAR: u32 = 0x2601;
pub const NEAREST_MIPMAP_NEAREST: u32 = 0x2700;
pub const LINEAR_MIPMAP_NEAREST: u32 = 0x2701;
pub const NEAREST_MIPMAP_LINEAR: u32 = 0x2702;
pub const LINEAR_MIPMAP_LINEAR: u32 = 0x2703;

pub const REPEAT: u32 = 0x2901;
pub const CLAMP_TO_EDGE: u32 = 0x812F;
pub const MIRRORED_REPEAT: u32 = 0x8370;

pub const ALPHA: u32 = 0x1906;
pub const RGB: u32 = 0x1907;
pub const RGBA: u32 = 0x1908;
pub const LUMINANCE: u32 = 0x1909;
pub const LUMINANCE_ALPHA: u32 = 0x190A;

pub const UNSIGNED_BYTE: u32 = 0x1401;

// ── buffers + draw ────────────────────────────────────────────────────────

pub const ARRAY_BUFFER: u32 = 0x8892;
pub const STREAM_DRAW: u32 = 0x88E0;
pub const STATIC_DRAW: u32 = 0x88E4;
pub const DYNAMIC_DRAW: u32 = 0x88E8;

pub const TRIANGLES: u32 = 0x0004;
pub const TRIANGLE_STRIP: u32 = 0x0005;

const NAMES: &[(u32, &str)] = &[
    (FLOAT, "FLOAT"),
    (FLOAT_VEC2, "FLOAT_VEC2"),
    (FLOAT_VEC3, "FLOAT_VEC3"),
    (FLOAT_VEC4, "FLOAT_VEC4"),
    (INT, "INT"),
    (INT_VEC2, "INT_VEC2"),
    (INT_VEC3, "INT_VEC3"),
    (INT_VEC4, "INT_VEC4"),
    (BOOL, "BOOL"),
    (BOOL_VEC2, "BOOL_VEC2"),
    (BOOL_VEC3, "BOOL_VEC3"),
    (BOOL_VEC4, "BOOL_VEC4"),
    (FLOAT_MAT2, "FLOAT_MAT2"),
    (FLOAT_MAT3, "FLOAT_MAT3"),
    (FLOAT_MAT4, "FLOAT_MAT4"),
    (SAMPLER_2D, "SAMPLER_2D"),
    (SAMPLER_CUBE, "SAMPLER_CUBE"),
    (FRAGMENT_SHADER, "FRAGMENT_SHADER"),
    (VERTEX_SHADER, "VERTEX_SHADER"),
    (TEXTURE_2D, "TEXTURE_2D"),
    (TEXTURE_CUBE_MAP, "TEXTURE_CUBE_MAP"),
    (NEAREST, "NEAREST"),
    (LINEAR, "LINEAR"),
    (NEAREST_MIPMAP_NEAREST, "NEAREST_MIPMAP_NEAREST"),
    (LINEAR_MIPMAP_NEAREST, "LINEAR_MIPMAP_NEAREST"),
    (NEAREST_MIPMAP_LINEAR, "NEAREST_MIPMAP_LINEAR"),
    (LINEAR_MIPMAP_LINEAR, "LINEAR_MIPMAP_LINEAR"),
    (REPEAT, "REPEAT"),
    (CLAMP_TO_EDGE, "CLAMP_TO_EDGE"),
    (MIRRORED_REPEAT, "MIRRORED_REPEAT"),
    (RGBA, "RGBA"),
    (RGB, "RGB"),
    (ALPHA, "ALPHA"),
    (LUMINANCE, "LUMINANCE"),
    (LUMINANCE_ALPHA, "LUMINANCE_ALPHA"),
];

/// Returns the symbolic name of a GL enum value, or `UNKNOWN_ENUM:<value>`.
pub fn enum_name(value: u32) -> String {
    NAMES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("UNKNOWN_ENUM:{}", value))
}
