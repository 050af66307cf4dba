//! Detects the runtime environment executing the current process.
//!
//! The heavy lifting (descriptor parsing and override resolution) lives in
//! `runtime-probe-core`; this crate wires it to the host: a default
//! introspection source plus per-platform implementations of the core's
//! collaborator traits.
//!
//! ```
//! if let Some(runtime) = runtime_probe::current_runtime() {
//!     println!("running on {runtime}");
//! }
//! ```
//!
//! Embedders whose process is hosted by a managed runtime inject their own
//! descriptor source through [`Detector`].

pub use runtime_probe_core::*;

mod detector;

pub use detector::*;

#[cfg(target_os = "linux")]
#[path = "linux/mod.rs"]
mod platform;

#[cfg(target_os = "macos")]
#[path = "macos/mod.rs"]
mod platform;

#[cfg(target_os = "windows")]
#[path = "windows/mod.rs"]
mod platform;

// Platform-specific collaborator implementations, for embedders composing
// their own `Detector`.
pub use platform::*;

/// Identity of the runtime hosting the current process, resolved with this
/// platform's capabilities. `None` only when nothing identifying could be
/// derived at all.
#[must_use]
pub fn current_runtime() -> Option<Runtime> {
    platform::detector().detect()
}
