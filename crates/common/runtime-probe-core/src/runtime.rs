use std::fmt;

use serde::{Deserialize, Serialize};

use crate::installation::FrameworkInstallation;

/// Identity of the runtime environment executing the current process.
///
/// Built in two passes: [`parse`](crate::parse) fills `name`/`version` from
/// the raw descriptor, then [`resolve`](crate::resolve) may replace `version`
/// with a value from an authoritative host source. The original descriptor is
/// kept untouched in `raw` for diagnostics either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    /// Human-readable runtime family name, e.g. ".NET Framework".
    pub name: Option<String>,
    /// Free-form version text; an override strategy may replace it.
    pub version: Option<String>,
    /// Details of the local installation, when an override found one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub installation: Option<FrameworkInstallation>,
    raw: Option<String>,
}

impl Runtime {
    #[must_use]
    pub fn new(name: Option<String>, version: Option<String>, raw: Option<String>) -> Self {
        Self {
            name,
            version,
            installation: None,
            raw,
        }
    }

    /// An identity known only by name, with no descriptor behind it.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()), None, None)
    }

    /// The original, unmodified descriptor string, if one was available.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Classifies this identity into a [`RuntimeFamily`], matching the name
    /// (or, failing that, the raw descriptor) against known alias prefixes.
    #[must_use]
    pub fn family(&self) -> RuntimeFamily {
        let label = self.name.as_deref().or(self.raw.as_deref()).unwrap_or("");
        RuntimeFamily::classify(label)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name.as_deref(), self.version.as_deref()) {
            (Some(name), Some(version)) => write!(f, "{name} {version}"),
            (Some(name), None) => f.write_str(name),
            (None, Some(version)) => f.write_str(version),
            (None, None) => f.write_str(self.raw.as_deref().unwrap_or("unknown")),
        }
    }
}

/// Runtime family, driving which override strategy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuntimeFamily {
    /// Legacy single-host-install framework (".NET Framework").
    NetFramework,
    /// Modern multi-host-install runtime (".NET Core", ".NET 5+").
    NetCore,
    Mono,
    Rust,
    Other,
}

impl RuntimeFamily {
    pub(crate) fn classify(label: &str) -> Self {
        let label = label.trim();
        if has_prefix(label, ".NET Framework") {
            Self::NetFramework
        } else if has_prefix(label, ".NET Core") || label.eq_ignore_ascii_case(".NET") {
            Self::NetCore
        } else if has_prefix(label, "Mono") {
            Self::Mono
        } else if has_prefix(label, "Rust") || has_prefix(label, "rustc") {
            Self::Rust
        } else {
            Self::Other
        }
    }
}

fn has_prefix(label: &str, prefix: &str) -> bool {
    label
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
