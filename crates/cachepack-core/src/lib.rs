//! cachepack core
//!
//! Error handling, environment access and platform detection shared by the
//! cachepack crates. This crate has minimal dependencies.

pub mod env;
pub mod error;
pub mod platform;

pub use env::{EnvSource, ProcessEnv, StaticEnv};
pub use error::{Error, Result, assert_defined};
pub use platform::Platform;
