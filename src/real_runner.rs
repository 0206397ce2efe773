use crate::command_runner::DebianCommandRunner;
use anyhow::{Context, Result};
use std::process::Command;

const DEFAULT_UNAME: &str = "uname";
const DEFAULT_DPKG: &str = "dpkg";
const DEFAULT_APT_GET: &str = "apt-get";

/// dpkg package-name pattern the listing is filtered to.
const KERNEL_PACKAGE_GLOB: &str = "linux-*";

/// Real implementation of DebianCommandRunner that executes the actual
/// uname / dpkg / apt-get commands.
pub struct RealDebianRunner {
    uname_path: String,
    dpkg_path: String,
    apt_get_path: String,
}

impl RealDebianRunner {
    /// Create a new RealDebianRunner with the default tool paths.
    pub fn new() -> Self {
        Self {
            uname_path: DEFAULT_UNAME.to_string(),
            dpkg_path: DEFAULT_DPKG.to_string(),
            apt_get_path: DEFAULT_APT_GET.to_string(),
        }
    }

    /// Create a new RealDebianRunner with custom tool paths (useful for
    /// testing against stub executables).
    #[allow(dead_code)]
    pub fn with_tools(uname_path: String, dpkg_path: String, apt_get_path: String) -> Self {
        Self {
            uname_path,
            dpkg_path,
            apt_get_path,
        }
    }
}

impl Default for RealDebianRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl DebianCommandRunner for RealDebianRunner {
    fn kernel_release(&self) -> Result<String> {
        // Execute: uname -r
        let output = Command::new(&self.uname_path)
            .arg("-r")
            .output()
            .context("Failed to execute uname -r")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("uname -r failed: {}", stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn list_kernel_packages(&self) -> Result<Vec<String>> {
        // Execute: dpkg -l linux-*
        let output = Command::new(&self.dpkg_path)
            .arg("-l")
            .arg(KERNEL_PACKAGE_GLOB)
            .output()
            .context("Failed to execute dpkg -l")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("dpkg -l failed: {}", stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().map(|line| line.to_string()).collect())
    }

    fn purge_package(&self, package: &str) -> Result<()> {
        // Execute: apt-get -y purge <package>
        let output = Command::new(&self.apt_get_path)
            .arg("-y")
            .arg("purge")
            .arg(package)
            .output()
            .with_context(|| format!("Failed to execute apt-get purge {}", package))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("apt-get purge {} failed: {}", package, stderr);
        }

        Ok(())
    }
}
