use crate::error::PruneError;
use crate::version::KernelVersion;
use serde::Serialize;
use std::collections::HashSet;

/// What happens to one installed kernel version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Keep,
    Remove,
}

/// One retention decision, in ascending version order within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub version: String,
    pub action: Action,
}

/// Decide which installed kernel versions to keep and which to remove.
///
/// Versions are sorted ascending with the numeric field-wise order. The
/// `keep` newest versions are kept by rank, and the running version is kept
/// no matter where it ranks, so the running kernel can never be removed even
/// when its packages rank below the cutoff (or are absent from the set
/// entirely). With `keep` or fewer distinct versions, nothing is removed.
pub fn plan(
    versions: &HashSet<String>,
    current: &str,
    keep: usize,
) -> Result<Vec<Decision>, PruneError> {
    let mut parsed: Vec<(KernelVersion, &String)> = versions
        .iter()
        .map(|v| KernelVersion::parse(v).map(|parsed| (parsed, v)))
        .collect::<Result<_, _>>()?;
    parsed.sort_unstable();

    let cutoff = parsed.len().saturating_sub(keep);
    Ok(parsed
        .into_iter()
        .enumerate()
        .map(|(rank, (_, version))| {
            let action = if version == current || rank >= cutoff {
                Action::Keep
            } else {
                Action::Remove
            };
            Decision {
                version: version.clone(),
                action,
            }
        })
        .collect())
}

/// The three packages purged for a removed kernel version: the flavored
/// image, the flavored headers, and the plain headers. None are checked for
/// existence; purging a package that is not installed is the purge
/// collaborator's problem and is not fatal.
pub fn purge_targets(version: &str, flavor: &str) -> [String; 3] {
    [
        format!("linux-image-{version}-{flavor}"),
        format!("linux-headers-{version}-{flavor}"),
        format!("linux-headers-{version}"),
    ]
}
