// Copyright (C) 2026 by GiGa infosystems

//! `npm-distgen` generates the npm distribution metadata for a `dbtrace` release.
//!
//! The `dbtrace` binary is published to npm as one root package plus one package
//! per supported OS/CPU target, declared as `optionalDependencies` of the root so
//! that `npm install` only fetches the package matching the installing machine.
//!
//! The order of operations is:
//! * Write a `package.json` for every entry of [`platform::PLATFORMS`] with
//!   [`platform::generate`]
//! * Rewrite the root package's `version` & `optionalDependencies` with
//!   [`sync::sync_root_manifest`]
//!
//! Both steps are driven by a single [`Version`], so every published package
//! moves in lockstep. Re-running with the same version reproduces byte-identical
//! output.

use serde::Serialize;

/// The version every package of a release is published as
///
/// This is an opaque token taken from the command line. It is never validated
/// against any versioning scheme, only copied into the generated manifests.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(transparent)]
pub struct Version(pub String);

pub mod json_edit;
pub mod platform;
pub mod sync;
