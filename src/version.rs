/// Source root used by releases from 1.4 onwards
pub const SOURCE_ROOT: &str = "go/src";

/// Source root used by releases before 1.4 (packages nested under `pkg`)
pub const LEGACY_SOURCE_ROOT: &str = "go/src/pkg";

/// Parse a release identifier into its `(major, minor)` pair.
///
/// Only the digits leading each component count, so pre-release suffixes
/// (`1.4rc1`, `1.21beta2`) and patch levels (`1.3.3`) are ignored. A component
/// that has no leading digits, or is missing entirely, degrades to `0`.
pub fn maj_min(version: &str) -> (u32, u32) {
    let (major, minor) = version.split_once('.').unwrap_or((version, ""));
    (leading_number(major), leading_number(minor))
}

/// Archive directory holding the standard library sources for `version`
pub fn source_root(version: &str) -> &'static str {
    let (major, minor) = maj_min(version);
    if major <= 1 && minor < 4 {
        LEGACY_SOURCE_ROOT
    } else {
        SOURCE_ROOT
    }
}

#[inline]
fn leading_number(component: &str) -> u32 {
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.4rc1", (1, 4))]
    #[case("1.3.3", (1, 3))]
    #[case("1.18", (1, 18))]
    #[case("1.21beta2", (1, 21))]
    #[case("x.y", (0, 0))]
    #[case("1", (1, 0))]
    #[case("", (0, 0))]
    #[case("1.x", (1, 0))]
    #[case("99999999999.2", (0, 2))] // overflowing component
    fn test_maj_min(#[case] version: &str, #[case] expected: (u32, u32)) {
        assert_eq!(maj_min(version), expected);
    }

    #[rstest]
    #[case("1.2.2", LEGACY_SOURCE_ROOT)]
    #[case("1.3.3", LEGACY_SOURCE_ROOT)]
    #[case("1.4rc1", SOURCE_ROOT)]
    #[case("1.4", SOURCE_ROOT)]
    #[case("1.22.0", SOURCE_ROOT)]
    #[case("2.0", SOURCE_ROOT)]
    #[case("garbage", LEGACY_SOURCE_ROOT)] // unparsable input means oldest layout
    fn test_source_root(#[case] version: &str, #[case] expected: &str) {
        assert_eq!(source_root(version), expected);
    }
}
