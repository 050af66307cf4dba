use crate::detector::{Detector, NativeIntrospection};

/// No authoritative installation source exists on this platform; detection
/// stands on the parsed descriptor alone.
pub(crate) fn detector() -> Detector {
    Detector::new(NativeIntrospection)
}
