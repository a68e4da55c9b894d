// Copyright (C) 2026 by GiGa infosystems

//! Utilities for editing `package.json` manifests

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use serde::Serialize;
use serde_json::Value;
use std::fs;

/// Serialize a document into the one stable output form all manifests use:
/// 2-space-indented JSON with a trailing newline.
pub fn to_pretty_document(value: &impl Serialize) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// A mutable JSON file, parsed into a generic document so that fields this
/// tool doesn't know about survive a rewrite untouched and in their original
/// order (`serde_json` is built with `preserve_order` for this reason).
#[derive(Debug)]
pub struct MutableJsonFile {
    dirty: bool,
    path: Utf8PathBuf,
    document: Value,
}

impl MutableJsonFile {
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents =
            fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read {path}"))?;
        let document = contents
            .parse::<Value>()
            .wrap_err_with(|| format!("Invalid JSON in {path}"))?;
        Ok(MutableJsonFile {
            dirty: false,
            path,
            document,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Value {
        self.dirty = true;
        &mut self.document
    }

    /// Mutable access to the top-level object, failing if the document isn't one
    pub fn as_object_mut(&mut self) -> Result<&mut serde_json::Map<String, Value>> {
        let path = self.path.clone();
        self.document_mut()
            .as_object_mut()
            .ok_or_else(|| eyre!("Expected a JSON object at the top level of {path}"))
    }

    /// Write the JSON file back to the underlying file
    ///
    /// The replacement happens through a temporary file renamed into place, so
    /// a crash mid-write never leaves a half-written manifest behind.
    pub fn write_back(&mut self) -> Result<()> {
        if self.dirty {
            let data = to_pretty_document(&self.document)?;
            let tmp_path = self.path.with_file_name(".package.json.update");
            fs::write(&tmp_path, data)
                .wrap_err_with(|| format!("Failed to write {tmp_path}"))?;
            fs::rename(&tmp_path, &self.path)
                .wrap_err_with(|| format!("Failed to replace {}", self.path))?;
            self.dirty = false;
        }

        Ok(())
    }
}
