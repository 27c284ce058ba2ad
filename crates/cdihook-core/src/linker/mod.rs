//! Dynamic linker configuration inside the container root.
//!
//! Provides the append-only search path merge and the host-side cache
//! rebuild that must follow it.

pub mod cache;
pub mod conf;
