//! Uniform reflection and setter dispatch.
//!
//! A linked program's active uniforms become a [`UniformTable`]: a tree keyed
//! by path segments whose leaves hold validated [`Setter`]s. Setters pick the
//! GL entry point from the reflected [`UniformType`] and refuse values of the
//! wrong shape.

mod path;
mod setter;
mod table;
mod ty;
mod value;

pub use path::{parse_path, render_path, split_array_suffix, Segment};
pub use setter::{Setter, SetterForm};
pub use table::{UniformNode, UniformTable};
pub use ty::{ComponentKind, UniformType};
pub use value::{Scalar, UniformValue};
