//! Logger setup for binaries built on this crate.
//!
//! The library only emits through the `log` facade. Program builds report
//! their uniform count at `debug`, reflection notes skipped `gl_` names, and
//! the texture builder warns when a non-power-of-two size drops mipmaps.
//! Binaries call [`init_logging`] once; [`LoggingConfig::verbose`] turns on
//! this crate's `debug` records without touching other targets.

mod init;

pub use init::{init_logging, LoggingConfig};
