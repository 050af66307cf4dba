mod maps;

pub use maps::MappedLibraryOrigin;

use crate::detector::{Detector, NativeIntrospection};

/// Shared-store runtimes on Linux expose their version through the origin
/// path of the libraries they map into the process.
pub(crate) fn detector() -> Detector {
    Detector::new(NativeIntrospection).with_library_origin(MappedLibraryOrigin::default())
}
