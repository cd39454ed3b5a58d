#![forbid(unsafe_code)]

//! Fixture files and their aliases.
//!
//! A file source is either a path or an `@alias` registered earlier with
//! [`FixtureRegistry::alias`]. Paths are tried as given first, then by file
//! name inside the fixtures directory, so `cypress/fixtures/example.json`
//! and `example.json` both find `fixtures/example.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use cactat_core::FileRef;

use crate::error::{HarnessError, HarnessResult};

/// Resolves file sources to [`FileRef`]s.
#[derive(Debug, Clone)]
pub struct FixtureRegistry {
    dir: PathBuf,
    aliases: HashMap<String, PathBuf>,
}

impl FixtureRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            aliases: HashMap::new(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Register `fixture` under `@alias`.
    ///
    /// The fixture must exist; the alias may be given with or without `@`.
    pub fn alias(&mut self, fixture: &str, alias: &str) -> HarnessResult<()> {
        let path = self.locate(fixture)?;
        let alias = alias.strip_prefix('@').unwrap_or(alias);
        tracing::debug!(alias, path = %path.display(), "fixture aliased");
        self.aliases.insert(alias.to_string(), path);
        Ok(())
    }

    /// Resolve a path or `@alias` to file metadata.
    pub fn resolve(&self, source: &str) -> HarnessResult<FileRef> {
        let path = self.path_for(source)?;
        let size = fs::metadata(&path)?.len();
        let file = FileRef::from_path(&path)
            .ok_or_else(|| HarnessError::UnknownFixture(source.to_string()))?;
        Ok(file.with_size(size))
    }

    fn path_for(&self, source: &str) -> HarnessResult<PathBuf> {
        match source.strip_prefix('@') {
            Some(alias) => self
                .aliases
                .get(alias)
                .cloned()
                .ok_or_else(|| HarnessError::UnknownFixture(source.to_string())),
            None => self.locate(source),
        }
    }

    fn locate(&self, source: &str) -> HarnessResult<PathBuf> {
        let given = Path::new(source);
        if given.is_file() {
            return Ok(given.to_path_buf());
        }
        let in_dir = self.dir.join(source);
        if in_dir.is_file() {
            return Ok(in_dir);
        }
        if let Some(name) = given.file_name() {
            let by_name = self.dir.join(name);
            if by_name.is_file() {
                return Ok(by_name);
            }
        }
        Err(HarnessError::UnknownFixture(source.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FixtureRegistry {
        FixtureRegistry::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"))
    }

    #[test]
    fn resolves_by_name_and_foreign_path() {
        let fixtures = registry();
        let direct = fixtures.resolve("example.json").unwrap();
        assert_eq!(direct.name, "example.json");
        assert_eq!(direct.mime.as_deref(), Some("application/json"));
        assert!(direct.size.is_some_and(|s| s > 0));

        let foreign = fixtures.resolve("cypress/fixtures/example.json").unwrap();
        assert_eq!(foreign, direct);
    }

    #[test]
    fn aliases_need_registration() {
        let mut fixtures = registry();
        assert!(matches!(
            fixtures.resolve("@sampleFile"),
            Err(HarnessError::UnknownFixture(_))
        ));
        fixtures.alias("example.json", "sampleFile").unwrap();
        assert_eq!(fixtures.resolve("@sampleFile").unwrap().name, "example.json");
    }

    #[test]
    fn alias_of_missing_fixture_fails() {
        let mut fixtures = registry();
        assert!(matches!(
            fixtures.alias("missing.json", "@nope"),
            Err(HarnessError::UnknownFixture(name)) if name == "missing.json"
        ));
    }

    #[test]
    fn size_matches_file_on_disk() {
        let fixtures = registry();
        let on_disk = fs::metadata(fixtures.dir().join("example.json")).unwrap().len();
        assert_eq!(fixtures.resolve("example.json").unwrap().size, Some(on_disk));
    }
}
