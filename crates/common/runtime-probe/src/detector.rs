use runtime_probe_core::{HostCapabilities, InstalledReleases, LibraryOrigin, Runtime, parse, resolve};
use tracing::debug;

/// Source of the host's raw runtime descriptor.
///
/// The default [`NativeIntrospection`] covers plain Rust processes; embedders
/// running inside a managed host (and able to ask it directly) supply their
/// own.
pub trait Introspection {
    /// The free-form descriptor the host reports for itself, if any.
    fn runtime_description(&self) -> Option<String>;
}

/// Describes a native process through the toolchain that built it,
/// e.g. `"Rust 1.84.0"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeIntrospection;

impl Introspection for NativeIntrospection {
    fn runtime_description(&self) -> Option<String> {
        Some(format!("Rust {}", rustc_version_runtime::version()))
    }
}

/// Orchestrates a detection run: descriptor in, parsed identity, override
/// pass, identity out. Stateless per call; collaborators are injectable so
/// detection is testable without a real host.
pub struct Detector {
    introspection: Box<dyn Introspection>,
    releases: Option<Box<dyn InstalledReleases>>,
    library_origin: Option<Box<dyn LibraryOrigin>>,
}

impl Detector {
    #[must_use]
    pub fn new(introspection: impl Introspection + 'static) -> Self {
        Self {
            introspection: Box::new(introspection),
            releases: None,
            library_origin: None,
        }
    }

    /// Installation registry consulted for legacy-framework hosts.
    #[must_use]
    pub fn with_releases(mut self, releases: impl InstalledReleases + 'static) -> Self {
        self.releases = Some(Box::new(releases));
        self
    }

    /// Loaded-library origin lookup consulted for shared-store hosts.
    #[must_use]
    pub fn with_library_origin(mut self, origin: impl LibraryOrigin + 'static) -> Self {
        self.library_origin = Some(Box::new(origin));
        self
    }

    /// Runs one detection pass. Never fails: missing information shows up as
    /// absent fields, and an absent descriptor yields `None`.
    #[must_use]
    pub fn detect(&self) -> Option<Runtime> {
        let raw = self.introspection.runtime_description();
        let mut runtime = parse(raw.as_deref(), None)?;

        let host = HostCapabilities {
            runtime_major: None,
            releases: self.releases.as_deref(),
            library_origin: self.library_origin.as_deref(),
        };
        resolve(&mut runtime, &host);

        debug!(runtime = %runtime, "detected host runtime");
        Some(runtime)
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("releases", &self.releases.is_some())
            .field("library_origin", &self.library_origin.is_some())
            .finish_non_exhaustive()
    }
}
