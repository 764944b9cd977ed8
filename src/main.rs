//! Command line front end finishing an existing bundler output directory.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use clap::Parser;

use bundle_finish::config::BuildConfig;
use bundle_finish::deploy::scan::scan_output_dir;
use bundle_finish::{BundleFinisher, FinishContext};

/// Shape and clean bundler output for static web deployment.
#[derive(Debug, Parser)]
#[command(name = "bundle-finish", version, about)]
struct Args {
    /// Bundler output directory to finish.
    dist_dir: PathBuf,
    /// Explicit configuration file; defaults to bundle.config.json next to
    /// the output directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Static directory mirrored verbatim into the output.
    #[arg(long)]
    public: Option<PathBuf>,
    /// Keep default entry bundles instead of pruning them.
    #[arg(long)]
    keep_default_entries: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BuildConfig::load_from_path(path)?,
        None => {
            let project_dir = args.dist_dir.parent().unwrap_or(Path::new("."));
            BuildConfig::discover(project_dir)
        }
    };

    let mut profile = config.into_profile();
    if args.keep_default_entries {
        // An empty suffix list disables the exclusion rule entirely.
        profile.exclusion.suffixes.clear();
    }

    let mut manifest = scan_output_dir(&profile, &args.dist_dir)?;
    let finisher = BundleFinisher::new(FinishContext {
        profile: &profile,
        dist_dir: &args.dist_dir,
        public_dir: args.public.as_deref(),
    });
    let outcome = finisher
        .finish(&mut manifest)
        .map_err(|err| anyhow!("failed to finish {}: {err}", args.dist_dir.display()))?;

    println!(
        "finished {}: {} file(s) written, {} dropped, {} public asset(s)",
        args.dist_dir.display(),
        outcome.written.len(),
        outcome.dropped.len(),
        outcome.public_installed.len()
    );

    Ok(())
}
