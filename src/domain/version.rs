use semver::Version;

use crate::domain::Impact;

/// Version used for the very first release of a project
pub fn initial_version() -> Version {
    Version::new(1, 0, 0)
}

/// Bump version according to impact.
///
/// Pre-release and build metadata are dropped on any bump; `Impact::None`
/// returns the version unchanged.
pub fn bump(version: &Version, impact: Impact) -> Version {
    match impact {
        Impact::Major => Version::new(version.major + 1, 0, 0),
        Impact::Minor => Version::new(version.major, version.minor + 1, 0),
        Impact::Patch => Version::new(version.major, version.minor, version.patch + 1),
        Impact::None => version.clone(),
    }
}

/// Version the next release should carry, given the previous one (if any)
pub fn next_version(previous: Option<&Version>, impact: Impact) -> Version {
    match previous {
        Some(version) => bump(version, impact),
        None => initial_version(),
    }
}
