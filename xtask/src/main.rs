//! Build automation for ssd-loki-kube
//!
//! Usage: cargo xtask <command>
//!
//! - build: Build the binary
//! - test: Run unit and topology tests, or the cluster tests with --cluster
//! - fmt / clippy: Lints
//! - crd: Regenerate or check deploy/crd.yaml
//! - ci: fmt check, clippy, tests

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const CRD_PATH: &str = "deploy/crd.yaml";

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for ssd-loki-kube")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the binary
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only the tests that need a live cluster
        #[arg(long)]
        cluster: bool,
    },
    /// Format code
    Fmt {
        /// Fail instead of rewriting files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy with warnings denied
    Clippy,
    /// Write the SsdLoki CustomResourceDefinition YAML
    Crd {
        /// Output path, relative to the project root
        #[arg(long, default_value = CRD_PATH)]
        output: String,

        /// Fail if the file on disk differs from the generated CRD
        #[arg(long)]
        check: bool,
    },
    /// Everything CI runs
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    sh.change_dir(project_root()?);

    match cli.command {
        Task::Build { release } => build(&sh, release),
        Task::Test { cluster } => test(&sh, cluster),
        Task::Fmt { check } => fmt(&sh, check),
        Task::Clippy => clippy(&sh),
        Task::Crd { output, check } => crd(&sh, &output, check),
        Task::Ci => ci(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    let profile: &[&str] = if release { &["--release"] } else { &[] };
    cmd!(sh, "cargo build --bin ssd-loki-kube {profile...}").run()?;
    println!("✅ ssd-loki-kube built");
    Ok(())
}

fn test(sh: &Shell, cluster: bool) -> Result<()> {
    if cluster {
        cmd!(sh, "cargo test --test integration_test -- --ignored").run()?;
    } else {
        cmd!(sh, "cargo test --workspace").run()?;
    }
    println!("✅ Tests passed");
    Ok(())
}

fn fmt(sh: &Shell, check: bool) -> Result<()> {
    let flags: &[&str] = if check { &["--", "--check"] } else { &[] };
    cmd!(sh, "cargo fmt --all {flags...}").run()?;
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    Ok(())
}

fn crd(sh: &Shell, output: &str, check: bool) -> Result<()> {
    let generated = cmd!(sh, "cargo run --quiet --bin ssd-loki-kube -- crd")
        .read()
        .context("Failed to generate CRD")?;

    if check {
        let on_disk = sh
            .read_file(output)
            .with_context(|| format!("Failed to read {}", output))?;
        if on_disk.trim_end() != generated.trim_end() {
            bail!("{} is stale, run `cargo xtask crd`", output);
        }
        println!("✅ {} is up to date", output);
        return Ok(());
    }

    if let Some(parent) = Path::new(output).parent() {
        if !parent.as_os_str().is_empty() {
            sh.create_dir(parent)?;
        }
    }
    sh.write_file(output, format!("{}\n", generated.trim_end()))?;
    println!("📜 CRD written to {}", output);
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    fmt(sh, true)?;
    clippy(sh)?;
    test(sh, false)
}

fn project_root() -> Result<PathBuf> {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .map(Path::to_path_buf)
        .context("xtask must live one level below the project root")
}
