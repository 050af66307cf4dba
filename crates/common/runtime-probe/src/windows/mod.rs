mod registry;

pub use registry::RegistryReleases;

use crate::detector::{Detector, NativeIntrospection};

/// Legacy framework hosts on Windows record their installed releases in the
/// registry; that is the authoritative version source here.
pub(crate) fn detector() -> Detector {
    Detector::new(NativeIntrospection).with_releases(RegistryReleases)
}
