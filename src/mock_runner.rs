use crate::command_runner::DebianCommandRunner;
use anyhow::Result;
use std::cell::RefCell;

/// Mock implementation of DebianCommandRunner for testing
/// Simulates a Debian system without executing real commands
pub struct MockDebianRunner {
    release: String,
    listing: Vec<String>,
    purged: RefCell<Vec<String>>,
    fail_on_purge: bool,
}

impl MockDebianRunner {
    /// Create a new MockDebianRunner with the given running release and
    /// dpkg listing lines
    pub fn new(release: &str, listing: &[&str]) -> Self {
        Self {
            release: release.to_string(),
            listing: listing.iter().map(|line| line.to_string()).collect(),
            purged: RefCell::new(Vec::new()),
            fail_on_purge: false,
        }
    }

    /// Configure the mock to fail when purge_package is called
    pub fn fail_on_purge(mut self) -> Self {
        self.fail_on_purge = true;
        self
    }

    /// Get the purged package names in call order (for test verification)
    pub fn purged_packages(&self) -> Vec<String> {
        self.purged.borrow().clone()
    }

    /// Check if a package was purged
    pub fn was_purged(&self, package: &str) -> bool {
        self.purged.borrow().iter().any(|p| p == package)
    }
}

impl DebianCommandRunner for MockDebianRunner {
    fn kernel_release(&self) -> Result<String> {
        Ok(self.release.clone())
    }

    fn list_kernel_packages(&self) -> Result<Vec<String>> {
        Ok(self.listing.clone())
    }

    fn purge_package(&self, package: &str) -> Result<()> {
        if self.fail_on_purge {
            anyhow::bail!("Simulated purge failure for {}", package);
        }

        self.purged.borrow_mut().push(package.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_kernel_release() {
        let runner = MockDebianRunner::new("3.13.0-24-generic", &[]);
        assert_eq!(runner.kernel_release().unwrap(), "3.13.0-24-generic");
    }

    #[test]
    fn test_mock_listing() {
        let runner = MockDebianRunner::new(
            "3.13.0-24-generic",
            &["ii  linux-image-3.13.0-24-generic  3.13.0-24.46  amd64  Linux kernel image"],
        );
        let lines = runner.list_kernel_packages().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ii"));
    }

    #[test]
    fn test_mock_records_purges_in_order() {
        let runner = MockDebianRunner::new("3.13.0-24-generic", &[]);
        runner.purge_package("linux-image-3.2.0-23-generic").unwrap();
        runner.purge_package("linux-headers-3.2.0-23").unwrap();

        assert!(runner.was_purged("linux-image-3.2.0-23-generic"));
        assert!(!runner.was_purged("linux-image-3.13.0-24-generic"));
        assert_eq!(
            runner.purged_packages(),
            vec!["linux-image-3.2.0-23-generic", "linux-headers-3.2.0-23"]
        );
    }

    #[test]
    fn test_mock_fail_on_purge() {
        let runner = MockDebianRunner::new("3.13.0-24-generic", &[]).fail_on_purge();
        let result = runner.purge_package("linux-image-3.2.0-23-generic");
        assert!(result.is_err());
        assert!(runner.purged_packages().is_empty());
    }
}
