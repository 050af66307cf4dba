use std::fs;

use runtime_probe_core::{LibraryOrigin, ProbeResult};
use tracing::debug;

/// Resolves the origin path of a loaded library by scanning the process's
/// memory mappings for a file-backed mapping whose path contains the
/// component name as a segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappedLibraryOrigin;

impl MappedLibraryOrigin {
    fn scan(&self, component: &str) -> ProbeResult<Option<String>> {
        let maps = fs::read_to_string("/proc/self/maps")?;
        Ok(mapping_for_component(&maps, component))
    }
}

impl LibraryOrigin for MappedLibraryOrigin {
    fn origin_path(&self, component: &str) -> Option<String> {
        match self.scan(component) {
            Ok(path) => path,
            Err(error) => {
                debug!(error = %error, "could not read process memory mappings");
                None
            }
        }
    }
}

/// Picks the first file-backed mapping whose path has `component` as a
/// segment. The pathname starts at the first `/` of a maps line; anonymous
/// and pseudo mappings (`[heap]`, `[stack]`) carry none.
fn mapping_for_component(maps: &str, component: &str) -> Option<String> {
    maps.lines()
        .filter_map(|line| line.find('/').map(|start| &line[start..]))
        .find(|path| path.split('/').any(|segment| segment == component))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPS: &str = "\
00400000-00452000 r-xp 00000000 08:02 173521 /usr/bin/dotnet
7f3a00000000-7f3a00021000 rw-p 00000000 00:00 0
7f3a12000000-7f3a12452000 r-xp 00000000 08:02 995432 /usr/share/dotnet/shared/Microsoft.NETCore.App/8.0.1/System.Private.CoreLib.dll
7ffc7d9e2000-7ffc7da03000 rw-p 00000000 00:00 0 [stack]
";

    #[test]
    fn finds_mapping_containing_component_segment() {
        assert_eq!(
            mapping_for_component(MAPS, "Microsoft.NETCore.App").as_deref(),
            Some("/usr/share/dotnet/shared/Microsoft.NETCore.App/8.0.1/System.Private.CoreLib.dll")
        );
    }

    #[test]
    fn component_must_match_a_whole_segment() {
        assert_eq!(mapping_for_component(MAPS, "Microsoft.NETCore"), None);
        assert_eq!(mapping_for_component(MAPS, "dotnet"), Some("/usr/bin/dotnet".into()));
    }

    #[test]
    fn ignores_anonymous_and_pseudo_mappings() {
        assert_eq!(mapping_for_component(MAPS, "stack"), None);
    }

    #[test]
    fn missing_component_is_none() {
        assert_eq!(mapping_for_component(MAPS, "Microsoft.AspNetCore.App"), None);
    }
}
