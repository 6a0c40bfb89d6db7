//! Input manager for loading candidate records from disk or stdin

use crate::error::{Result, ResumeScorerError};
use crate::input::file_detector::FileType;
use crate::record::CandidateRecord;
use log::{debug, info, warn};
use std::io::Read;
use std::path::Path;

/// Path argument that reads a single JSON record from stdin.
pub const STDIN_PATH: &str = "-";

/// A record together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub source: String,
    pub record: CandidateRecord,
}

pub struct InputManager {
    normalize_email: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            normalize_email: false,
        }
    }

    pub fn with_normalize_email(mut self, enable: bool) -> Self {
        self.normalize_email = enable;
        self
    }

    /// Load every input, skipping the ones that fail.
    ///
    /// Fails only when nothing at all could be loaded.
    pub fn load_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<LoadedRecord>> {
        let mut records = Vec::new();
        let mut failures = Vec::new();

        for path in paths {
            let path = path.as_ref();
            match self.load(path) {
                Ok(mut loaded) => records.append(&mut loaded),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    failures.push(e);
                }
            }
        }

        if records.is_empty() {
            return Err(match failures.len() {
                1 => failures.remove(0),
                0 => ResumeScorerError::InvalidInput("No candidate records found".to_string()),
                n => ResumeScorerError::InvalidInput(format!(
                    "No candidate records could be loaded ({} inputs failed)",
                    n
                )),
            });
        }

        info!("Loaded {} candidate record(s)", records.len());
        Ok(records)
    }

    /// Load the record(s) held by one input path.
    pub fn load(&self, path: &Path) -> Result<Vec<LoadedRecord>> {
        if path == Path::new(STDIN_PATH) {
            info!("Reading candidate record from stdin");
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            return self.parse(STDIN_PATH, &text, FileType::Json);
        }

        if !path.exists() {
            return Err(ResumeScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        if file_type == FileType::Unknown {
            return Err(ResumeScorerError::UnsupportedFormat(format!(
                "Unsupported file type for: {} (expected .json, .jsonl or .ndjson)",
                path.display()
            )));
        }

        info!("Reading candidate records from: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        self.parse(&path.display().to_string(), &text, file_type)
    }

    /// Parse record text of a known type. `source` labels the results.
    pub fn parse(&self, source: &str, text: &str, file_type: FileType) -> Result<Vec<LoadedRecord>> {
        let records = match file_type {
            FileType::Json => vec![LoadedRecord {
                source: source.to_string(),
                record: CandidateRecord::from_json(text)?,
            }],
            FileType::JsonLines => text
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(idx, line)| -> Result<LoadedRecord> {
                    let record = CandidateRecord::from_json(line).map_err(|e| {
                        ResumeScorerError::InvalidInput(format!("{}:{}: {}", source, idx + 1, e))
                    })?;
                    Ok(LoadedRecord {
                        source: format!("{}:{}", source, idx + 1),
                        record,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            FileType::Unknown => {
                return Err(ResumeScorerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    source
                )));
            }
        };

        Ok(records
            .into_iter()
            .map(|mut loaded| {
                if self.normalize_email && loaded.record.normalize_email() {
                    debug!("Normalized email for {}", loaded.source);
                }
                loaded
            })
            .collect())
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
