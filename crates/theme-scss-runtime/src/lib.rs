//! Runtime abstraction layer for theme-scss system operations.
//!
//! The resolver, compiler adapter and publisher never touch `std::fs` or
//! `std::env` directly; they take a `&dyn SystemRuntime`. [`NativeRuntime`]
//! is the only production implementation.

mod native;
pub mod sass_native;
mod traits;

pub use traits::{PathKind, RuntimeError, RuntimeResult, SystemRuntime};

pub use native::NativeRuntime;

/// Create a default runtime for the current platform.
pub fn default_runtime() -> NativeRuntime {
    NativeRuntime::new()
}
