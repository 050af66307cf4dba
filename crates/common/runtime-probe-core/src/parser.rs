use std::sync::LazyLock;

use regex::Regex;

use crate::runtime::Runtime;

/// Descriptor grammar, anchored at the start of the string: a name segment
/// (longest digit-free run) immediately followed by a version segment (one or
/// more dot-separated digit groups plus any trailing non-whitespace, so
/// qualifiers like `-preview.3` stay attached to the version).
static DESCRIPTOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\d]*)(?P<version>(\d+\.)+\S+)").expect("descriptor pattern is valid")
});

/// Parses a raw runtime descriptor into a structured identity.
///
/// A forced `known_name` always wins over whatever name the grammar would
/// extract. Returns `None` only when there is nothing to identify at all:
/// no descriptor and no forced name.
#[must_use]
pub fn parse(raw: Option<&str>, known_name: Option<&str>) -> Option<Runtime> {
    let Some(raw) = raw else {
        return known_name.map(Runtime::with_name);
    };

    if let Some(captures) = DESCRIPTOR_PATTERN.captures(raw) {
        let name = known_name.map(str::to_owned).or_else(|| {
            let name = captures["name"].trim();
            (!name.is_empty()).then(|| name.to_owned())
        });
        let version = captures["version"].to_owned();
        return Some(Runtime::new(name, Some(version), Some(raw.to_owned())));
    }

    // No digit-led version token anywhere: the whole descriptor is the name.
    let name = known_name.or_else(|| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    });
    Some(Runtime::new(
        name.map(str::to_owned),
        None,
        Some(raw.to_owned()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_framework_descriptor() {
        let runtime = parse(Some(".NET Framework 4.7.2633.0"), None).unwrap();
        assert_eq!(runtime.name.as_deref(), Some(".NET Framework"));
        assert_eq!(runtime.version.as_deref(), Some("4.7.2633.0"));
        assert_eq!(runtime.raw(), Some(".NET Framework 4.7.2633.0"));
    }

    #[test]
    fn parses_mono_descriptor_with_build_metadata() {
        let raw = "Mono 5.10.1.47 (2017-12/8eb8f7d5e74 Fri Apr 13 20:18:12 EDT 2018)";
        let runtime = parse(Some(raw), None).unwrap();
        assert_eq!(runtime.name.as_deref(), Some("Mono"));
        assert_eq!(runtime.version.as_deref(), Some("5.10.1.47"));
        assert_eq!(runtime.raw(), Some(raw));
    }

    #[test]
    fn qualifier_attaches_to_version_not_name() {
        let runtime = parse(Some(".NET 8.0.0-preview.3"), None).unwrap();
        assert_eq!(runtime.name.as_deref(), Some(".NET"));
        assert_eq!(runtime.version.as_deref(), Some("8.0.0-preview.3"));
    }

    #[test]
    fn descriptor_without_version_keeps_full_name() {
        let runtime = parse(Some(".NET Native"), None).unwrap();
        assert_eq!(runtime.name.as_deref(), Some(".NET Native"));
        assert_eq!(runtime.version, None);
        assert_eq!(runtime.raw(), Some(".NET Native"));

        let runtime = parse(Some("WebAssembly"), None).unwrap();
        assert_eq!(runtime.name.as_deref(), Some("WebAssembly"));
        assert_eq!(runtime.version, None);
    }

    #[test]
    fn version_only_descriptor_has_no_name() {
        let runtime = parse(Some("5.0.1"), None).unwrap();
        assert_eq!(runtime.name, None);
        assert_eq!(runtime.version.as_deref(), Some("5.0.1"));
    }

    #[test]
    fn single_digit_group_is_not_a_version() {
        // The grammar needs at least one digit group followed by a dot.
        let runtime = parse(Some("Mono 4"), None).unwrap();
        assert_eq!(runtime.version, None);
        assert_eq!(runtime.name.as_deref(), Some("Mono 4"));
    }

    #[test]
    fn forced_name_wins_over_extracted_name() {
        let runtime = parse(Some("Mono 5.10.0"), Some("Custom Runtime")).unwrap();
        assert_eq!(runtime.name.as_deref(), Some("Custom Runtime"));
        assert_eq!(runtime.version.as_deref(), Some("5.10.0"));

        let runtime = parse(Some("No Version Here"), Some("Custom Runtime")).unwrap();
        assert_eq!(runtime.name.as_deref(), Some("Custom Runtime"));
        assert_eq!(runtime.version, None);
    }

    #[test]
    fn absent_descriptor_with_forced_name() {
        let runtime = parse(None, Some("Mono")).unwrap();
        assert_eq!(runtime.name.as_deref(), Some("Mono"));
        assert_eq!(runtime.version, None);
        assert_eq!(runtime.raw(), None);
    }

    #[test]
    fn absent_descriptor_without_name_is_no_identity() {
        assert_eq!(parse(None, None), None);
    }

    #[test]
    fn extracted_name_is_trimmed() {
        let runtime = parse(Some("  .NET Core  3.1.6"), None).unwrap();
        assert_eq!(runtime.name.as_deref(), Some(".NET Core"));
        assert_eq!(runtime.version.as_deref(), Some("3.1.6"));
        // Raw keeps the descriptor untouched.
        assert_eq!(runtime.raw(), Some("  .NET Core  3.1.6"));
    }

    #[test]
    fn whitespace_only_descriptor_has_no_name() {
        let runtime = parse(Some("   "), None).unwrap();
        assert_eq!(runtime.name, None);
        assert_eq!(runtime.version, None);
        assert_eq!(runtime.raw(), Some("   "));
    }
}
