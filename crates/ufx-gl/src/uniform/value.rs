/// A single numeric or boolean uniform argument.
///
/// Conversion to the uniform's component kind happens at the setter:
/// ints widen to floats, floats truncate toward zero for integer uniforms, and
/// bools become 0 / 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Scalar {
    Float(f32),
    Int(i32),
    Bool(bool),
}

impl Scalar {
    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            Scalar::Float(v) => v,
            Scalar::Int(v) => v as f32,
            Scalar::Bool(v) => {
                if v { 1.0 } else { 0.0 }
            }
        }
    }

    #[inline]
    pub fn as_i32(self) -> i32 {
        match self {
            Scalar::Float(v) => v as i32,
            Scalar::Int(v) => v,
            Scalar::Bool(v) => v as i32,
        }
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self { Scalar::Float(v) }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self { Scalar::Int(v) }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self { Scalar::Bool(v) }
}

/// Value handed to a program's bulk `set`.
///
/// A lone `Scalar` is only accepted by single non-array scalar uniforms;
/// everything else needs a `Sequence` of exactly the expected length.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl UniformValue {
    /// Scalars in the value, a lone scalar counting as one.
    pub fn as_slice(&self) -> &[Scalar] {
        match self {
            UniformValue::Scalar(s) => std::slice::from_ref(s),
            UniformValue::Sequence(v) => v,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for UniformValue {
            fn from(v: $t) -> Self {
                UniformValue::Scalar(v.into())
            }
        })*
    };
}

impl_from_scalar!(Scalar, f32, i32, bool);

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for UniformValue {
    fn from(v: [T; N]) -> Self {
        UniformValue::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for UniformValue {
    fn from(v: Vec<T>) -> Self {
        UniformValue::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar> + Copy> From<&[T]> for UniformValue {
    fn from(v: &[T]) -> Self {
        UniformValue::Sequence(v.iter().map(|&s| s.into()).collect())
    }
}

/// Builds a `Vec<Scalar>` from mixed literals: `scalars![1.0, 2, true]`.
#[macro_export]
macro_rules! scalars {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::uniform::Scalar::from($v)),*]
    };
}
