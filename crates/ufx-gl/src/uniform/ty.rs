use crate::context::consts;
use crate::error::GlError;

/// Component type a uniform is written with: `uniform*f` or `uniform*i`.
///
/// Bools and samplers are written through the integer entry points.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ComponentKind {
    Float,
    Int,
}

/// Closed set of uniform types this crate can dispatch setters for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformType {
    Float,
    FloatVec2,
    FloatVec3,
    FloatVec4,
    Int,
    IntVec2,
    IntVec3,
    IntVec4,
    Bool,
    BoolVec2,
    BoolVec3,
    BoolVec4,
    FloatMat2,
    FloatMat3,
    FloatMat4,
    Sampler2d,
    SamplerCube,
}

impl UniformType {
    pub const ALL: [UniformType; 17] = [
        UniformType::Float,
        UniformType::FloatVec2,
        UniformType::FloatVec3,
        UniformType::FloatVec4,
        UniformType::Int,
        UniformType::IntVec2,
        UniformType::IntVec3,
        UniformType::IntVec4,
        UniformType::Bool,
        UniformType::BoolVec2,
        UniformType::BoolVec3,
        UniformType::BoolVec4,
        UniformType::FloatMat2,
        UniformType::FloatMat3,
        UniformType::FloatMat4,
        UniformType::Sampler2d,
        UniformType::SamplerCube,
    ];

    /// Classifies a raw GL type enum.
    pub fn from_raw(raw: u32) -> Result<Self, GlError> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.raw() == raw)
            .ok_or(GlError::UnrecognizedType(raw))
    }

    pub const fn raw(self) -> u32 {
        match self {
            UniformType::Float => consts::FLOAT,
            UniformType::FloatVec2 => consts::FLOAT_VEC2,
            UniformType::FloatVec3 => consts::FLOAT_VEC3,
            UniformType::FloatVec4 => consts::FLOAT_VEC4,
            UniformType::Int => consts::INT,
            UniformType::IntVec2 => consts::INT_VEC2,
            UniformType::IntVec3 => consts::INT_VEC3,
            UniformType::IntVec4 => consts::INT_VEC4,
            UniformType::Bool => consts::BOOL,
            UniformType::BoolVec2 => consts::BOOL_VEC2,
            UniformType::BoolVec3 => consts::BOOL_VEC3,
            UniformType::BoolVec4 => consts::BOOL_VEC4,
            UniformType::FloatMat2 => consts::FLOAT_MAT2,
            UniformType::FloatMat3 => consts::FLOAT_MAT3,
            UniformType::FloatMat4 => consts::FLOAT_MAT4,
            UniformType::Sampler2d => consts::SAMPLER_2D,
            UniformType::SamplerCube => consts::SAMPLER_CUBE,
        }
    }

    /// GL enum name, e.g. `FLOAT_VEC3`.
    pub const fn name(self) -> &'static str {
        match self {
            UniformType::Float => "FLOAT",
            UniformType::FloatVec2 => "FLOAT_VEC2",
            UniformType::FloatVec3 => "FLOAT_VEC3",
            UniformType::FloatVec4 => "FLOAT_VEC4",
            UniformType::Int => "INT",
            UniformType::IntVec2 => "INT_VEC2",
            UniformType::IntVec3 => "INT_VEC3",
            UniformType::IntVec4 => "INT_VEC4",
            UniformType::Bool => "BOOL",
            UniformType::BoolVec2 => "BOOL_VEC2",
            UniformType::BoolVec3 => "BOOL_VEC3",
            UniformType::BoolVec4 => "BOOL_VEC4",
            UniformType::FloatMat2 => "FLOAT_MAT2",
            UniformType::FloatMat3 => "FLOAT_MAT3",
            UniformType::FloatMat4 => "FLOAT_MAT4",
            UniformType::Sampler2d => "SAMPLER_2D",
            UniformType::SamplerCube => "SAMPLER_CUBE",
        }
    }

    pub const fn kind(self) -> ComponentKind {
        match self {
            UniformType::Float
            | UniformType::FloatVec2
            | UniformType::FloatVec3
            | UniformType::FloatVec4
            | UniformType::FloatMat2
            | UniformType::FloatMat3
            | UniformType::FloatMat4 => ComponentKind::Float,
            _ => ComponentKind::Int,
        }
    }

    /// Vector width, or matrix dimension for matrix types (1..=4).
    pub const fn size(self) -> usize {
        match self {
            UniformType::Float
            | UniformType::Int
            | UniformType::Bool
            | UniformType::Sampler2d
            | UniformType::SamplerCube => 1,
            UniformType::FloatVec2
            | UniformType::IntVec2
            | UniformType::BoolVec2
            | UniformType::FloatMat2 => 2,
            UniformType::FloatVec3
            | UniformType::IntVec3
            | UniformType::BoolVec3
            | UniformType::FloatMat3 => 3,
            UniformType::FloatVec4
            | UniformType::IntVec4
            | UniformType::BoolVec4
            | UniformType::FloatMat4 => 4,
        }
    }

    pub const fn is_matrix(self) -> bool {
        matches!(
            self,
            UniformType::FloatMat2 | UniformType::FloatMat3 | UniformType::FloatMat4
        )
    }

    /// Number of scalars in one element: `size` for vectors, `size²` for matrices.
    pub const fn components(self) -> usize {
        if self.is_matrix() {
            self.size() * self.size()
        } else {
            self.size()
        }
    }
}
