use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

/// A locally installed release of the legacy framework, as reported by an
/// installation registry (see [`InstalledReleases`](crate::InstalledReleases)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkInstallation {
    pub version: Version,
    /// Service pack identifier, only meaningful for pre-4.0 releases.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub service_pack: Option<String>,
    /// Raw release number from the registry, when the registry exposes one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub release: Option<u32>,
}

impl FrameworkInstallation {
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            service_pack: None,
            release: None,
        }
    }

    /// Parses a dotted framework version such as `"3.5.30729.4926"`, keeping
    /// the first three numeric components. Registry values regularly carry a
    /// fourth component that a semantic version cannot hold.
    #[must_use]
    pub fn parse_version(text: &str) -> Option<Version> {
        let mut parts = text.trim().split('.').map(|part| part.parse::<u64>());
        let major = parts.next()?.ok()?;
        let minor = parts.next().transpose().ok()??;
        let patch = match parts.next() {
            Some(part) => part.ok()?,
            None => 0,
        };
        Some(Version::new(major, minor, patch))
    }
}

impl fmt::Display for FrameworkInstallation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.service_pack {
            Some(sp) => write!(f, "{} SP {sp}", self.version),
            None => write!(f, "{}", self.version),
        }
    }
}
