use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::models::{VideoId, VideoRecord};

/// Represents the source type of record data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSourceType {
    Json,
    Csv,
}

/// Result of loading record data
#[derive(Debug)]
pub struct RecordLoadResult {
    pub records: Vec<VideoRecord>,
    pub source_type: RecordSourceType,
    pub num_records: usize,
}

impl RecordLoadResult {
    pub fn new(records: Vec<VideoRecord>, source_type: RecordSourceType) -> Self {
        let num_records = records.len();
        Self {
            records,
            source_type,
            num_records,
        }
    }
}

/// One row of the CSV export. Statistics hidden by the uploader are empty cells.
#[derive(Debug, Deserialize)]
struct CsvRow {
    video_id: String,
    #[serde(default)]
    title: String,
    published_at: DateTime<Utc>,
    view_count: Option<u64>,
    like_count: Option<u64>,
    comment_count: Option<u64>,
}

impl From<CsvRow> for VideoRecord {
    fn from(row: CsvRow) -> Self {
        VideoRecord {
            id: VideoId::new(row.video_id),
            title: row.title,
            published_at: row.published_at,
            view_count: row.view_count.unwrap_or(0),
            like_count: row.like_count.unwrap_or(0),
            comment_count: row.comment_count.unwrap_or(0),
        }
    }
}

/// Unified interface for loading video records from JSON or CSV
pub struct RecordLoader;

impl RecordLoader {
    /// Load records from a file (auto-detects JSON or CSV)
    pub fn load_from_file(path: &Path) -> Result<RecordLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "json" => Self::load_from_json(path),
            "csv" => Self::load_from_csv(path),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Load records from a JSON file
    pub fn load_from_json(json_path: &Path) -> Result<RecordLoadResult> {
        let mut content = String::new();
        File::open(json_path)
            .with_context(|| format!("Failed to open {}", json_path.display()))?
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to read {}", json_path.display()))?;

        Self::load_from_json_str(&content).context("Failed to parse JSON file")
    }

    /// Load records from a JSON string holding an array of video objects
    pub fn load_from_json_str(json_str: &str) -> Result<RecordLoadResult> {
        let records: Vec<VideoRecord> =
            serde_json::from_str(json_str).context("Failed to parse JSON string")?;

        Ok(RecordLoadResult::new(records, RecordSourceType::Json))
    }

    /// Load records from a CSV file
    pub fn load_from_csv(csv_path: &Path) -> Result<RecordLoadResult> {
        let file = File::open(csv_path)
            .with_context(|| format!("Failed to open {}", csv_path.display()))?;

        Self::load_from_csv_reader(file).context("Failed to parse CSV file")
    }

    /// Load records from any CSV source with a header row
    pub fn load_from_csv_reader<R: Read>(reader: R) -> Result<RecordLoadResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (line, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let row = row.with_context(|| format!("Invalid CSV record {}", line + 1))?;
            records.push(VideoRecord::from(row));
        }

        Ok(RecordLoadResult::new(records, RecordSourceType::Csv))
    }
}
