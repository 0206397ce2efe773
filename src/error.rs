use thiserror::Error;

/// Errors from the version / extraction / retention core.
/// All of these are fatal to the run; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PruneError {
    /// No `major.minor.patch-build` substring in the given text.
    #[error("no kernel version of the form <major>.<minor>.<patch>-<build> in \"{0}\"")]
    InvalidFormat(String),

    /// The running kernel release did not match `<version>-<flavor>` exactly.
    #[error("running kernel release \"{release}\" is not a <version>-{flavor} release")]
    InvalidRelease { release: String, flavor: String },

    /// An installed kernel is newer than the one we are running. Pruning
    /// under a stale running version could remove the kernel the system is
    /// about to boot into, so the run must stop here.
    #[error("kernel {installed} is newer than the running kernel {running}; reboot before pruning")]
    RebootRequired { installed: String, running: String },
}
