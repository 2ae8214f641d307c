//! Record Store: loads locally tracked advisory records from a directory
//! tree of YAML files.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::AdvisoryRecord;

/// Extensions recognized as structured record files.
const RECORD_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Errors while enumerating or parsing local records. All of them are fatal
/// to a reconciliation run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to walk record directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// One parsed record together with the file it came from, so referential
/// errors can name the offending file.
#[derive(Debug, Clone)]
pub struct LocatedRecord {
    pub path: PathBuf,
    pub record: AdvisoryRecord,
}

/// Reads every recognized record file under a root directory.
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Recursively enumerate the root and parse every record file.
    ///
    /// Traversal and parse errors abort immediately; there is no partial
    /// result.
    pub fn load(&self) -> Result<Vec<LocatedRecord>, StoreError> {
        let mut records = Vec::new();

        let walker = WalkBuilder::new(&self.root).standard_filters(false).build();
        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !is_record_file(path) {
                continue;
            }

            let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let record: AdvisoryRecord =
                serde_yaml::from_str(&content).map_err(|source| StoreError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?;

            records.push(LocatedRecord {
                path: path.to_path_buf(),
                record,
            });
        }

        Ok(records)
    }
}

fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| RECORD_EXTENSIONS.contains(&ext))
}
