//! Go version ordering
//!
//! Go release names are not semver: `1.22rc1`, `1.21` and `go1.22.5` are all
//! valid. Components are compared numerically left to right, missing trailing
//! components count as `0`, and a pre-release suffix (`alpha`, `beta`, `rc`)
//! sorts before the plain release with the same number.

use std::cmp::Ordering;

/// Pre-release stage of a single version component, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Alpha,
    Beta,
    Rc,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Component {
    number: u64,
    stage: Stage,
    pre_number: u64,
}

impl Component {
    const ZERO: Component = Component {
        number: 0,
        stage: Stage::Release,
        pre_number: 0,
    };

    fn parse(part: &str) -> Self {
        let digits = part.len() - part.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let number = leading_number(&part[..digits]);
        let suffix = &part[digits..];

        let (stage, marker) = if let Some(idx) = suffix.find("rc") {
            (Stage::Rc, idx + 2)
        } else if let Some(idx) = suffix.find("beta") {
            (Stage::Beta, idx + 4)
        } else if let Some(idx) = suffix.find("alpha") {
            (Stage::Alpha, idx + 5)
        } else {
            return Component {
                number,
                stage: Stage::Release,
                pre_number: 0,
            };
        };

        Component {
            number,
            stage,
            pre_number: leading_number(&suffix[marker..]),
        }
    }
}

fn leading_number(s: &str) -> u64 {
    s.chars()
        .take_while(|c| c.is_ascii_digit())
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c.to_digit(10).unwrap_or(0)))
        })
}

/// Strip any non-numeric prefix such as `v` or `go`.
fn strip_prefix(version: &str) -> &str {
    version
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit())
}

fn parse_components(version: &str) -> Option<Vec<Component>> {
    let stripped = strip_prefix(version);
    if stripped.is_empty() {
        // Nothing numeric at all, e.g. "unknown"
        return None;
    }
    Some(stripped.split('.').map(Component::parse).collect())
}

/// Compare two Go version strings.
///
/// Unparseable strings such as `"unknown"` sort before every real version.
///
/// Examples:
/// - `1.21.5 < 1.22beta1 < 1.22rc1 < 1.22rc2 < 1.22 == 1.22.0 < 1.22.1`
/// - `go1.22.5 == v1.22.5 == 1.22.5`
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = match (parse_components(a), parse_components(b)) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(Component::ZERO);
        let right = b.get(i).copied().unwrap_or(Component::ZERO);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Whether `current` is the same version as `required` or newer.
///
/// Build metadata after the first `-` or `+` is ignored, so `1.24.3-rc1`
/// satisfies `1.24.3`. Suffixes written without a separator (`1.25rc1`) are
/// part of the version and keep their pre-release ordering.
pub fn satisfies(current: &str, required: &str) -> bool {
    compare_versions(strip_build_metadata(current), strip_build_metadata(required))
        != Ordering::Less
}

fn strip_build_metadata(version: &str) -> &str {
    match version.find(['-', '+']) {
        Some(idx) => &version[..idx],
        None => version,
    }
}

/// Find the newest version in a list.
///
/// Entries that compare equal (`1.22` and `1.22.0`) are ordered by their raw
/// string, so the result does not depend on the input order.
pub fn find_max_version<S: AsRef<str>>(versions: &[S]) -> Option<&S> {
    versions
        .iter()
        .max_by(|a, b| compare_versions_total(a.as_ref(), b.as_ref()))
}

/// [`compare_versions`] with equal versions ordered by their raw string.
pub fn compare_versions_total(a: &str, b: &str) -> Ordering {
    compare_versions(a, b).then_with(|| a.cmp(b))
}
