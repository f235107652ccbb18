//! File loaders for materialized record collections.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::error::InputError;

/// On-disk encoding of a record collection, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A single JSON array.
    Json,
    /// One JSON object per line.
    JsonLines,
    /// A YAML sequence.
    Yaml,
}

impl RecordFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(RecordFormat::Json),
            "jsonl" | "ndjson" => Some(RecordFormat::JsonLines),
            "yaml" | "yml" => Some(RecordFormat::Yaml),
            _ => None,
        }
    }
}

/// Load every record of type `T` from `path`.
pub fn load_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, InputError> {
    let path = path.as_ref();
    let format =
        RecordFormat::from_path(path).ok_or_else(|| InputError::UnsupportedFormat(path.to_path_buf()))?;

    debug!(path = %path.display(), ?format, "Reading records");
    let content = fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;

    let records = parse_records(&content, format, path)?;
    info!(path = %path.display(), count = records.len(), "Loaded records");

    Ok(records)
}

fn parse_records<T: DeserializeOwned>(
    content: &str,
    format: RecordFormat,
    path: &Path,
) -> Result<Vec<T>, InputError> {
    match format {
        RecordFormat::Json => serde_json::from_str(content).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        }),
        RecordFormat::JsonLines => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|source| InputError::JsonLine {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    source,
                })
            })
            .collect(),
        RecordFormat::Yaml => serde_yaml::from_str(content).map_err(|source| InputError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::AssociationRow;
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(RecordFormat::from_path(Path::new("a.json")), Some(RecordFormat::Json));
        assert_eq!(RecordFormat::from_path(Path::new("a.NDJSON")), Some(RecordFormat::JsonLines));
        assert_eq!(RecordFormat::from_path(Path::new("a.yml")), Some(RecordFormat::Yaml));
        assert_eq!(RecordFormat::from_path(Path::new("a.gaf")), None);
    }

    #[test]
    fn test_json_lines_reports_line_number() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assoc.jsonl");
        fs::write(
            &path,
            "{\"productId\":\"P1\",\"nodeId\":\"GO:0000001\"}\n\nnot json\n",
        )
        .unwrap();

        let err = load_records::<AssociationRow>(&path).unwrap_err();
        match err {
            InputError::JsonLine { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_records::<AssociationRow>("associations.gaf").unwrap_err();
        assert!(matches!(err, InputError::UnsupportedFormat(_)));
    }
}
