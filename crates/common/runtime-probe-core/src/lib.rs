//! Core types and logic for identifying the runtime environment executing
//! the current process.
//!
//! This crate provides:
//! - The [`Runtime`] identity value reported to diagnostics/telemetry
//! - [`parse`], the descriptor grammar turning a free-form runtime
//!   description into a structured (name, version) pair
//! - [`resolve`], the platform override pass that replaces under-reported
//!   versions with values from authoritative host sources
//!
//! Everything in this crate is a pure computation over in-memory strings.
//! The two host-facing lookups an override may need, the installed-release
//! registry and the origin path of a loaded library, are abstracted behind
//! the [`InstalledReleases`] and [`LibraryOrigin`] traits so the core stays
//! testable without a real host environment. The `runtime-probe` crate
//! supplies the platform implementations.

mod error;
mod installation;
mod parser;
mod resolver;
mod runtime;

pub use error::{ProbeError, ProbeResult};
pub use installation::FrameworkInstallation;
pub use parser::parse;
pub use resolver::{
    CORE_STORE_MARKER, HostCapabilities, InstalledReleases, LibraryOrigin, resolve,
    version_from_store_path,
};
pub use runtime::{Runtime, RuntimeFamily};
