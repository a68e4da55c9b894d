// Copyright (C) 2026 by GiGa infosystems

//! Keep the root package in lockstep with the platform packages, see
//! [`sync_root_manifest`].

use crate::Version;
use crate::json_edit::MutableJsonFile;
use camino::Utf8Path;
use color_eyre::{Result, eyre::eyre};
use serde_json::Value;

/// Rewrite the root `package.json` at `path` so that its `version` and every
/// value of its `optionalDependencies` equal `version`.
///
/// The manifest is owned by the repository, not generated here, so it is
/// treated as a generic document: only the two known fields are mutated by
/// key, every other field (and the key order) passes through untouched. No
/// dependency keys are added or removed; a missing `optionalDependencies`
/// table is an error rather than something to default, since a root package
/// without platform packages cannot be released.
pub fn sync_root_manifest(path: &Utf8Path, version: &Version) -> Result<()> {
    let mut manifest = MutableJsonFile::open(path)?;
    let root = manifest.as_object_mut()?;

    root.insert("version".to_owned(), Value::from(version.0.as_str()));

    let dependencies = root
        .get_mut("optionalDependencies")
        .ok_or_else(|| eyre!("Missing `optionalDependencies` in {path}"))?
        .as_object_mut()
        .ok_or_else(|| eyre!("Expected a table at `optionalDependencies` in {path}"))?;

    for value in dependencies.values_mut() {
        *value = Value::from(version.0.as_str());
    }

    manifest.write_back()?;
    println!("Updated {path} to {}", version.0);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    fn root_manifest(dir: &tempfile::TempDir, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("package.json")).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn updates_version_and_every_optional_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let path = root_manifest(
            &dir,
            r#"{
  "name": "dbtrace",
  "version": "1.0.0",
  "optionalDependencies": {
    "@dbtrace/linux-x64": "1.0.0",
    "@dbtrace/darwin-x64": "1.0.0"
  }
}
"#,
        );

        sync_root_manifest(&path, &Version("2.0.0".to_owned())).unwrap();

        let parsed = fs::read_to_string(&path).unwrap().parse::<Value>().unwrap();
        assert_eq!(parsed["version"], "2.0.0");
        let dependencies = parsed["optionalDependencies"].as_object().unwrap();
        assert_eq!(dependencies.len(), 2);
        assert_eq!(dependencies["@dbtrace/linux-x64"], "2.0.0");
        assert_eq!(dependencies["@dbtrace/darwin-x64"], "2.0.0");
    }

    #[test]
    fn untouched_fields_survive_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        // Already in the stable output form, so the rewrite only changes the
        // two version strings
        let path = root_manifest(
            &dir,
            "{\n  \"name\": \"dbtrace\",\n  \"version\": \"1.0.0\",\n  \"bin\": {\n    \"dbtrace\": \"bin/dbtrace\"\n  },\n  \"optionalDependencies\": {\n    \"@dbtrace/linux-x64\": \"1.0.0\"\n  },\n  \"engines\": {\n    \"node\": \">=18\"\n  }\n}\n",
        );

        sync_root_manifest(&path, &Version("1.1.0".to_owned())).unwrap();

        let expected = "{\n  \"name\": \"dbtrace\",\n  \"version\": \"1.1.0\",\n  \"bin\": {\n    \"dbtrace\": \"bin/dbtrace\"\n  },\n  \"optionalDependencies\": {\n    \"@dbtrace/linux-x64\": \"1.1.0\"\n  },\n  \"engines\": {\n    \"node\": \">=18\"\n  }\n}\n";
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("package.json")).unwrap();
        assert!(sync_root_manifest(&path, &Version("1.0.0".to_owned())).is_err());
    }

    #[test]
    fn malformed_manifest_is_fatal_and_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = root_manifest(&dir, "{ not json");

        assert!(sync_root_manifest(&path, &Version("1.0.0".to_owned())).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn missing_optional_dependencies_is_fatal_and_leaves_the_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let contents = "{\n  \"name\": \"dbtrace\",\n  \"version\": \"1.0.0\"\n}\n";
        let path = root_manifest(&dir, contents);

        let error = sync_root_manifest(&path, &Version("2.0.0".to_owned())).unwrap_err();
        assert!(error.to_string().contains("optionalDependencies"));
        // Nothing was written back, not even the version bump
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }
}
