use std::fmt;

use crate::context::ShaderStage;
use crate::uniform::SetterForm;

/// Errors produced while building programs, setting uniforms, or creating textures.
///
/// Every failure is terminal for the operation that produced it; nothing is
/// retried or partially applied.
#[derive(Debug, Clone, PartialEq)]
pub enum GlError {
    /// A shader stage failed to compile. `log` is the native info log.
    Compile { stage: ShaderStage, log: String },
    /// The program failed to link. `log` is the native info log.
    Link { log: String },
    /// The program linked but failed validation.
    Validate { log: String },
    /// The context refused to create a shader/program/texture/buffer object.
    Resource(String),
    /// A raw type enum that is not one of the known uniform types.
    UnrecognizedType(u32),
    /// A uniform name that cannot be decomposed into path segments.
    MalformedName { name: String, reason: &'static str },
    /// An active uniform whose location could not be queried.
    MissingLocation(String),
    /// A setter form that does not exist for the uniform's type
    /// (component/vector forms on a matrix, matrix form on a non-matrix).
    SetterUnavailable {
        name: String,
        type_name: &'static str,
        form: SetterForm,
    },
    /// Wrong number of values handed to a setter.
    Arity {
        name: String,
        type_name: &'static str,
        form: SetterForm,
        expected: usize,
        actual: usize,
    },
    /// A single value handed to a setter that requires a sequence.
    NotASequence {
        name: String,
        type_name: &'static str,
        expected: usize,
    },
    /// Bulk set named a uniform the program does not have.
    UnknownUniform(String),
    /// Registry lookup of a program name that was never added.
    UnknownProgram(String),
    /// Texture target other than `TEXTURE_2D`.
    UnsupportedTarget(u32),
    /// Raw pixel data whose length does not match `width * height * bpp`.
    PixelData { expected: usize, actual: usize },
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlError::Compile { stage, log } => {
                write!(f, "Error compiling {} shader:\n{}", stage, log)
            }
            GlError::Link { log } => write!(f, "Error linking program:\n{}", log),
            GlError::Validate { log } => write!(f, "Error validating program:\n{}", log),
            GlError::Resource(msg) => write!(f, "unable to create GL object: {}", msg),
            GlError::UnrecognizedType(raw) => write!(f, "unrecognized type {:#06x}", raw),
            GlError::MalformedName { name, reason } => {
                write!(f, "malformed uniform name {:?}: {}", name, reason)
            }
            GlError::MissingLocation(name) => {
                write!(f, "no location for active uniform {:?}", name)
            }
            GlError::SetterUnavailable { name, type_name, form } => write!(
                f,
                "uniform {:?} of type {} has no {} setter",
                name, type_name, form
            ),
            GlError::Arity { name, type_name, form, expected, actual } => write!(
                f,
                "uniform {:?} of type {}: {} setter expects {} values, got {}",
                name, type_name, form, expected, actual
            ),
            GlError::NotASequence { name, type_name, expected } => write!(
                f,
                "uniform {:?} of type {}: expected a sequence of {} values, got a single value",
                name, type_name, expected
            ),
            GlError::UnknownUniform(name) => write!(f, "program has no uniform {:?}", name),
            GlError::UnknownProgram(name) => write!(f, "no program registered as {:?}", name),
            GlError::UnsupportedTarget(target) => {
                write!(f, "unsupported texture target {:#06x}", target)
            }
            GlError::PixelData { expected, actual } => write!(
                f,
                "pixel data holds {} bytes, texture needs {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for GlError {}
