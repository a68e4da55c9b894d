// Copyright (C) 2026 by GiGa infosystems

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::Result;

use npm_distgen::Version;
use npm_distgen::platform::generate;
use npm_distgen::sync::sync_root_manifest;

/// This program generates the npm distribution metadata for one `dbtrace`
/// release: a `package.json` per supported OS/CPU target, plus a rewrite of
/// the root package's `version` & `optionalDependencies` so all packages are
/// published in lockstep.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// The version to publish every package as
    ///
    /// Accepted as an opaque token; no versioning scheme is enforced.
    version: String,
    /// The directory containing the npm package sources
    ///
    /// The root package is expected at `<npm-root>/dbtrace/package.json`.
    #[arg(long, default_value = "npm")]
    npm_root: Utf8PathBuf,
}

/// The directory (below the npm root) of the root package
const ROOT_PACKAGE_DIR: &str = "dbtrace";

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let version = Version(args.version);

    generate(&args.npm_root, &version)?;

    let root_manifest = args.npm_root.join(ROOT_PACKAGE_DIR).join("package.json");
    sync_root_manifest(&root_manifest, &version)?;

    Ok(())
}
