//! Shader program, uniform, and texture helpers over a GL-style context.
//!
//! - [`Program`] compiles + links a vertex/fragment pair and reflects its
//!   active uniforms into a [`UniformTable`] of typed setters
//! - [`Texture`] creates a 2D texture with size-dependent sampler defaults
//! - [`Programs`] keeps named programs and tracks the current one
//!
//! All GPU access goes through the [`GlContext`] trait. [`HeadlessContext`]
//! implements it in memory; the `glow` feature implements it for
//! `glow::Context`.

pub mod backend;
pub mod buffer;
pub mod context;
pub mod debug;
pub mod error;
pub mod logging;
pub mod program;
pub mod texture;
pub mod uniform;

pub use backend::headless::HeadlessContext;
pub use context::{ActiveUniform, GlContext, ShaderStage};
pub use error::GlError;
pub use program::{BuildOptions, DirectorySources, Program, Programs, SourceLookup};
pub use texture::{Texture, TextureOptions, TextureSource};
pub use uniform::{Scalar, Setter, SetterForm, UniformTable, UniformType, UniformValue};
