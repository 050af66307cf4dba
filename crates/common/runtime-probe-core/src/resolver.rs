use tracing::debug;

use crate::installation::FrameworkInstallation;
use crate::runtime::{Runtime, RuntimeFamily};

/// Marker path segment locating the shared runtime store in a loaded
/// library's origin path.
pub const CORE_STORE_MARKER: &str = "Microsoft.NETCore.App";

/// Installed-release registry of the legacy framework. Implemented by the
/// host crate; injected here so override logic stays testable.
pub trait InstalledReleases {
    /// Most specific locally installed release matching `major`, if any.
    fn latest(&self, major: u64) -> Option<FrameworkInstallation>;
}

/// Origin-path lookup for a library loaded into the current process.
pub trait LibraryOrigin {
    /// Filesystem-style location the named component was loaded from.
    fn origin_path(&self, component: &str) -> Option<String>;
}

/// What the host can answer during the override pass. An empty set of
/// capabilities makes [`resolve`] a no-op.
#[derive(Default, Clone, Copy)]
pub struct HostCapabilities<'a> {
    /// Major version of the hosting runtime build, when the embedder knows
    /// it. Falls back to the major digit group of the parsed version.
    pub runtime_major: Option<u64>,
    pub releases: Option<&'a dyn InstalledReleases>,
    pub library_origin: Option<&'a dyn LibraryOrigin>,
}

impl std::fmt::Debug for HostCapabilities<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("runtime_major", &self.runtime_major)
            .field("releases", &self.releases.is_some())
            .field("library_origin", &self.library_origin.is_some())
            .finish()
    }
}

/// Replaces the parsed version with a platform-authoritative one where the
/// runtime family and the host's capabilities allow it. Every failure mode
/// keeps the parsed value and is not an error.
pub fn resolve(runtime: &mut Runtime, host: &HostCapabilities<'_>) {
    match runtime.family() {
        RuntimeFamily::NetFramework => apply_installed_release(runtime, host),
        RuntimeFamily::NetCore => apply_shared_store_version(runtime, host),
        _ => {}
    }
}

/// Legacy single-host-install override: look the release up in the host's
/// installation registry and reformat it the way users know it.
fn apply_installed_release(runtime: &mut Runtime, host: &HostCapabilities<'_>) {
    let Some(releases) = host.releases else {
        return;
    };
    let Some(major) = host
        .runtime_major
        .or_else(|| leading_major(runtime.version.as_deref()))
    else {
        return;
    };
    let Some(installed) = releases.latest(major) else {
        debug!(major, "no installed framework release found");
        return;
    };

    runtime.version = Some(format_installed_version(&installed));
    runtime.installation = Some(installed);
}

fn format_installed_version(installed: &FrameworkInstallation) -> String {
    if installed.version.major < 4 {
        // Pre-4.0 releases are known by two-digit versions (1.0, 1.1, 2.0,
        // 3.0, 3.5), optionally with a service pack.
        match &installed.service_pack {
            Some(sp) => format!(
                "{}.{} SP {sp}",
                installed.version.major, installed.version.minor
            ),
            None => format!("{}.{}", installed.version.major, installed.version.minor),
        }
    } else {
        installed.version.to_string()
    }
}

/// Modern multi-host-install override: the shared store lays runtimes out as
/// `.../<marker>/<version>/<library>`, so the segment after the marker in a
/// loaded library's origin path is the precise runtime version. Best-effort
/// by nature; when the layout convention does not hold, the parsed version
/// stands.
fn apply_shared_store_version(runtime: &mut Runtime, host: &HostCapabilities<'_>) {
    let Some(origin) = host.library_origin else {
        return;
    };
    let Some(path) = origin.origin_path(CORE_STORE_MARKER) else {
        return;
    };
    match version_from_store_path(&path, CORE_STORE_MARKER) {
        Some(version) => runtime.version = Some(version),
        None => debug!(
            path = %path,
            "store marker missing or too close to the end of the origin path"
        ),
    }
}

/// Extracts the version segment following `marker` in a `/`- or
/// `\`-separated path. The marker must leave at least two trailing segments
/// (the version directory and the library file itself), otherwise the path
/// does not follow the store layout and `None` is returned.
#[must_use]
pub fn version_from_store_path(path: &str, marker: &str) -> Option<String> {
    let segments: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();
    let index = segments.iter().position(|segment| *segment == marker)?;
    if index + 2 < segments.len() {
        Some(segments[index + 1].to_owned())
    } else {
        None
    }
}

fn leading_major(version: Option<&str>) -> Option<u64> {
    let digits: String = version?.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
