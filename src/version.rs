use crate::error::PruneError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// The four-integer pattern every kernel version must contain.
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)-(\d+)").unwrap());

/// A parsed kernel version: major.minor.patch-build.
///
/// The derived `Ord` compares fields in declaration order, which is exactly
/// the order that matters: major first, build last. `3.13.0-100` sorts above
/// `3.13.0-99` because the build fields are compared as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KernelVersion {
    major: u32,
    minor: u32,
    patch: u32,
    build: u32,
}

impl KernelVersion {
    /// Parse the first `major.minor.patch-build` substring out of `raw`.
    /// Surrounding text (a `-generic` tail, a package-name prefix) is ignored
    /// by the match. Fails when no such substring exists.
    pub fn parse(raw: &str) -> Result<Self, PruneError> {
        let caps = VERSION_RE
            .captures(raw)
            .ok_or_else(|| PruneError::InvalidFormat(raw.to_string()))?;

        let field = |i: usize| {
            caps[i]
                .parse::<u32>()
                .map_err(|_| PruneError::InvalidFormat(raw.to_string()))
        };

        Ok(Self {
            major: field(1)?,
            minor: field(2)?,
            patch: field(3)?,
            build: field(4)?,
        })
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}-{}", self.major, self.minor, self.patch, self.build)
    }
}

/// Compare two raw version strings numerically, field by field.
pub fn compare(a: &str, b: &str) -> Result<Ordering, PruneError> {
    Ok(KernelVersion::parse(a)?.cmp(&KernelVersion::parse(b)?))
}

/// Strip the flavor suffix off a running-kernel release string.
///
/// The whole string must be exactly `<major>.<minor>.<patch>-<build>-<flavor>`
/// (e.g. `5.15.0-91-generic` with flavor `generic`); anything else is an
/// error, since guessing at an unrecognized release could mis-rank retention.
pub fn strip_flavor(release: &str, flavor: &str) -> Result<String, PruneError> {
    let invalid = || PruneError::InvalidRelease {
        release: release.to_string(),
        flavor: flavor.to_string(),
    };

    let base = release
        .strip_suffix(flavor)
        .and_then(|s| s.strip_suffix('-'))
        .ok_or_else(invalid)?;

    // The remainder must be the version and nothing more.
    match VERSION_RE.find(base) {
        Some(m) if m.start() == 0 && m.end() == base.len() => Ok(base.to_string()),
        _ => Err(invalid()),
    }
}
