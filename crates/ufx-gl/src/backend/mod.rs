//! [`GlContext`](crate::context::GlContext) implementations.
//!
//! - [`headless`]: in-memory context for tests and windowless runs
//! - `glow` (feature `glow`): native GL / WebGL through [`glow::Context`]

#[cfg(feature = "glow")]
mod glow;
mod glsl;
pub mod headless;
