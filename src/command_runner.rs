use anyhow::Result;

/// Trait for abstracting the system commands this tool drives.
/// This allows for both real command execution and mocked behavior for
/// testing; the version and retention logic never touches a real tool.
pub trait DebianCommandRunner {
    /// Report the running kernel release string (e.g. `3.13.0-24-generic`).
    fn kernel_release(&self) -> Result<String>;

    /// List kernel-related packages, one raw dpkg status line per entry.
    fn list_kernel_packages(&self) -> Result<Vec<String>>;

    /// Purge a single package together with its configuration files.
    fn purge_package(&self, package: &str) -> Result<()>;
}
