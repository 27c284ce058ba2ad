//! # cdihook-core
//!
//! Applies device-passthrough hook plans to a container's root filesystem
//! from the host side.
//!
//! The pipeline, in order:
//! - **Plan loading**: decode the JSON or YAML hook plan.
//! - **Symlinks**: expose host resources through link-relative symlinks.
//! - **Linker config**: append library directories to a dedicated
//!   `ld.so.conf.d` fragment.
//! - **Linker cache**: rebuild `ld.so.cache` with the host `ldconfig`.
//!
//! Every stage tolerates already-applied state, so the same plan can be
//! re-applied on device hot-plug.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod apply;
pub mod exec;
pub mod filesystem;
pub mod linker;
pub mod plan;
pub mod resolve;

pub use apply::{ApplyReport, HookApplier, apply_hooks_to_container};
