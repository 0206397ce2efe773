use crate::error::PruneError;
use crate::version::{self, KernelVersion};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

/// dpkg status code for a fully installed package. Lines carrying any other
/// code (`rc` removed-but-configured, `un` not installed, report headers)
/// are skipped, not errors.
const INSTALLED_MARKER: &str = "ii";

/// Kernel package names we care about: image and headers packages, with the
/// version captured and any flavor tail (e.g. `-generic`) left outside it.
static KERNEL_PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^linux-(?:image|headers)-(\d+\.\d+\.\d+-\d+)").unwrap());

/// Extract the set of unique kernel versions named by installed image and
/// headers packages in a `dpkg -l` listing.
///
/// Checked per line, as lines are processed: a version strictly newer than
/// `current` means a kernel has been installed but not booted yet, and the
/// run stops with `RebootRequired` before any retention decision exists.
pub fn installed_kernel_versions(
    lines: &[String],
    current: &str,
) -> Result<HashSet<String>, PruneError> {
    // An unparseable running version aborts before any line is considered.
    KernelVersion::parse(current)?;
    let mut versions = HashSet::new();

    for line in lines {
        let mut fields = line.split_whitespace();
        if fields.next() != Some(INSTALLED_MARKER) {
            continue;
        }
        let Some(name) = fields.next() else {
            continue;
        };
        let Some(caps) = KERNEL_PACKAGE_RE.captures(name) else {
            continue;
        };

        let version = caps[1].to_string();
        if version::compare(&version, current)? == Ordering::Greater {
            return Err(PruneError::RebootRequired {
                installed: version,
                running: current.to_string(),
            });
        }

        // Image and headers packages for the same kernel collapse here.
        versions.insert(version);
    }

    Ok(versions)
}
