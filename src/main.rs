mod command_runner;
mod error;
#[cfg(test)]
mod mock_runner;
mod packages;
mod real_runner;
mod retention;
mod version;

use anyhow::Result;
use clap::{Parser, Subcommand};
use command_runner::DebianCommandRunner;
use real_runner::RealDebianRunner;
use retention::{Action, Decision};

#[derive(Parser)]
#[command(name = "prune-kernels")]
#[command(about = "Remove obsolete kernel packages, keeping the running kernel and the one before it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Purge kernel packages older than the newest kept versions
    Purge {
        /// Keep this many of the newest kernel versions
        #[arg(long, default_value_t = 2)]
        keep: usize,
        /// Show what would be purged without removing anything
        #[arg(long)]
        dry_run: bool,
        /// Kernel flavor suffix expected on the running release
        #[arg(long, default_value = "generic")]
        flavor: String,
    },
    /// List installed kernel versions and what purge would decide
    List {
        /// Keep this many of the newest kernel versions
        #[arg(long, default_value_t = 2)]
        keep: usize,
        /// Kernel flavor suffix expected on the running release
        #[arg(long, default_value = "generic")]
        flavor: String,
        /// Print the decisions as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let runner = RealDebianRunner::new();

    match cli.command {
        Commands::Purge { keep, dry_run, flavor } => {
            ensure_preconditions(dry_run)?;
            purge_kernels(&runner, keep, dry_run, &flavor)
        }
        Commands::List { keep, flavor, json } => list_kernels(&runner, keep, &flavor, json),
    }
}

/// Preconditions for a run that removes packages. A dry run only reads
/// (uname, dpkg -l) and is allowed without root.
fn ensure_preconditions(dry_run: bool) -> Result<()> {
    if !cfg!(target_os = "linux") {
        anyhow::bail!("prune-kernels only runs on Linux systems");
    }

    if !dry_run && users::get_current_uid() != 0 {
        anyhow::bail!("purging kernel packages requires root; re-run with sudo or use --dry-run");
    }

    Ok(())
}

/// Query the system state and compute the retention plan: running version,
/// installed version set, then keep/remove decisions in ascending order.
fn decide(
    runner: &dyn DebianCommandRunner,
    keep: usize,
    flavor: &str,
) -> Result<(String, Vec<Decision>)> {
    let release = runner.kernel_release()?;
    let current = version::strip_flavor(&release, flavor)?;
    let listing = runner.list_kernel_packages()?;
    let versions = packages::installed_kernel_versions(&listing, &current)?;
    let decisions = retention::plan(&versions, &current, keep)?;
    Ok((current, decisions))
}

fn purge_kernels(
    runner: &dyn DebianCommandRunner,
    keep: usize,
    dry_run: bool,
    flavor: &str,
) -> Result<()> {
    let (current, decisions) = decide(runner, keep, flavor)?;

    for decision in decisions.iter().filter(|d| d.action == Action::Keep) {
        if decision.version == current {
            println!("Keeping kernel {} (running)", decision.version);
        } else {
            println!("Keeping kernel {}", decision.version);
        }
    }

    let removals: Vec<&Decision> = decisions
        .iter()
        .filter(|d| d.action == Action::Remove)
        .collect();

    if removals.is_empty() {
        println!("No kernels to remove");
        return Ok(());
    }

    for decision in removals {
        let targets = retention::purge_targets(&decision.version, flavor);

        if dry_run {
            println!(
                "[DRY RUN] Would purge kernel {}: {}",
                decision.version,
                targets.join(", ")
            );
            continue;
        }

        println!("Removing kernel {}: {}", decision.version, targets.join(", "));
        for package in &targets {
            // The decision is already made; a failed purge of one package
            // must not abort the remaining ones.
            if let Err(err) = runner.purge_package(package) {
                eprintln!("Warning: failed to purge {}: {:#}", package, err);
            }
        }
    }

    Ok(())
}

fn list_kernels(
    runner: &dyn DebianCommandRunner,
    keep: usize,
    flavor: &str,
    json: bool,
) -> Result<()> {
    let (current, decisions) = decide(runner, keep, flavor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&decisions)?);
        return Ok(());
    }

    if decisions.is_empty() {
        println!("No installed kernel packages found");
        return Ok(());
    }

    println!("Installed kernel versions (oldest first):");
    for decision in &decisions {
        let action = match decision.action {
            Action::Keep => "keep",
            Action::Remove => "remove",
        };
        if decision.version == current {
            println!("  {}  {} (running)", decision.version, action);
        } else {
            println!("  {}  {}", decision.version, action);
        }
    }

    Ok(())
}
