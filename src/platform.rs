// Copyright (C) 2026 by GiGa infosystems

//! The platform table & per-platform package generation, see [`generate`].

use crate::Version;
use crate::json_edit::to_pretty_document;
use camino::Utf8Path;
use color_eyre::{Result, eyre::WrapErr};
use serde::Serialize;
use std::fs;

/// The npm scope all platform packages are published under
pub const NPM_SCOPE: &str = "@dbtrace";

const REPOSITORY_URL: &str = "git+https://github.com/dbtrace/dbtrace.git";
const AUTHOR: &str = "dbtrace contributors";
const LICENSE: &str = "MIT";

/// One OS/CPU target `dbtrace` is distributed for, published as its own npm
/// package holding nothing but that target's binary
pub struct PlatformDescriptor {
    /// The directory (below the npm root) the package is assembled in
    pub dir: &'static str,
    /// The package name below [`NPM_SCOPE`], unique across [`PLATFORMS`]
    pub suffix: &'static str,
    /// Values of `process.platform` the package installs on
    pub os: &'static [&'static str],
    /// Values of `process.arch` the package installs on
    pub cpu: &'static [&'static str],
    /// The binary file name shipped inside the package
    pub bin: &'static str,
}

/// All targets a release is published for, in generation order
pub const PLATFORMS: [PlatformDescriptor; 5] = [
    PlatformDescriptor {
        dir: "dbtrace-linux-x64",
        suffix: "linux-x64",
        os: &["linux"],
        cpu: &["x64"],
        bin: "dbtrace",
    },
    PlatformDescriptor {
        dir: "dbtrace-linux-arm64",
        suffix: "linux-arm64",
        os: &["linux"],
        cpu: &["arm64"],
        bin: "dbtrace",
    },
    PlatformDescriptor {
        dir: "dbtrace-darwin-x64",
        suffix: "darwin-x64",
        os: &["darwin"],
        cpu: &["x64"],
        bin: "dbtrace",
    },
    PlatformDescriptor {
        dir: "dbtrace-darwin-arm64",
        suffix: "darwin-arm64",
        os: &["darwin"],
        cpu: &["arm64"],
        bin: "dbtrace",
    },
    PlatformDescriptor {
        dir: "dbtrace-win32-x64",
        suffix: "win32-x64",
        os: &["win32"],
        cpu: &["x64"],
        bin: "dbtrace.exe",
    },
];

#[derive(Serialize)]
pub struct RepositoryInfo {
    #[serde(rename = "type")]
    kind: &'static str,
    url: &'static str,
}

/// The `package.json` document of one platform package
///
/// Fully determined by a [`PlatformDescriptor`] and the release [`Version`];
/// the serialized key order is the declaration order below.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformManifest<'a> {
    name: String,
    version: &'a Version,
    description: String,
    repository: RepositoryInfo,
    author: &'static str,
    license: &'static str,
    /// Tells Yarn PnP to keep the package unpacked on disk so the binary can
    /// be executed directly
    prefer_unplugged: bool,
    os: &'static [&'static str],
    cpu: &'static [&'static str],
    files: [&'static str; 1],
}

impl PlatformDescriptor {
    /// The full npm package name, e.g. `@dbtrace/linux-x64`
    pub fn package_name(&self) -> String {
        format!("{NPM_SCOPE}/{}", self.suffix)
    }

    /// Build the `package.json` document for this target at a given version
    pub fn manifest<'a>(&self, version: &'a Version) -> PlatformManifest<'a> {
        PlatformManifest {
            name: self.package_name(),
            version,
            description: format!("dbtrace binary for {}", self.suffix),
            repository: RepositoryInfo {
                kind: "git",
                url: REPOSITORY_URL,
            },
            author: AUTHOR,
            license: LICENSE,
            prefer_unplugged: true,
            os: self.os,
            cpu: self.cpu,
            files: [self.bin],
        }
    }
}

/// Write `<npm_root>/<dir>/package.json` for every entry of [`PLATFORMS`],
/// creating missing directories and overwriting existing manifests in full.
///
/// The packages touch disjoint files and each write is fully determined by
/// its descriptor & the version, so re-running is idempotent. Any I/O error
/// aborts the run; packages already written remain on disk and a re-run after
/// fixing the cause converges to the same output.
pub fn generate(npm_root: &Utf8Path, version: &Version) -> Result<()> {
    for platform in &PLATFORMS {
        let pkg_dir = npm_root.join(platform.dir);
        fs::create_dir_all(&pkg_dir)
            .wrap_err_with(|| format!("Failed to create {pkg_dir}"))?;

        let manifest_path = pkg_dir.join("package.json");
        let document = to_pretty_document(&platform.manifest(version))?;
        fs::write(&manifest_path, document)
            .wrap_err_with(|| format!("Failed to write {manifest_path}"))?;

        println!("Generated {}/package.json", platform.dir);
    }

    Ok(())
}
