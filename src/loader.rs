use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::domain::DashError;
use crate::record::Record;

const BUNDLED_ARTICLES: &str = include_str!("../data/articles.json");

// Columns read from tabular files, in this order.
const FIELDS: [&str; 8] = [
    "id",
    "title",
    "keyword",
    "traffic",
    "words",
    "createdOn",
    "action",
    "publish",
];
const REQUIRED_FIELDS: [&str; 3] = ["id", "title", "keyword"];

#[derive(Debug, PartialEq)]
enum FileType {
    JSON,
    CSV,
    PARQUET,
    ARROW,
}

#[derive(Debug)]
struct FileInfo {
    path: PathBuf,
    file_size: u64,
    file_type: FileType,
}

/// Articles compiled into the binary.
pub fn bundled() -> Result<Vec<Record>, DashError> {
    let records = parse_json(BUNDLED_ARTICLES)?;
    info!("Using {} bundled articles", records.len());
    Ok(records)
}

pub fn load_data_file(path: PathBuf) -> Result<Vec<Record>, DashError> {
    let file_info = get_file_info(path)?;
    debug!("Loading {:?}", file_info);
    let start_time = Instant::now();

    let records = match file_info.file_type {
        FileType::JSON => parse_json(&fs::read_to_string(&file_info.path)?)?,
        FileType::CSV => records_from_frame(load_csv(&file_info.path)?)?,
        FileType::PARQUET => records_from_frame(load_parquet(&file_info.path)?)?,
        FileType::ARROW => records_from_frame(load_arrow(&file_info.path)?)?,
    };

    info!(
        "Loaded {} articles ({} bytes) in {}ms ...",
        records.len(),
        file_info.file_size,
        start_time.elapsed().as_millis()
    );
    Ok(records)
}

fn parse_json(content: &str) -> Result<Vec<Record>, DashError> {
    let records: Vec<Record> = serde_json::from_str(content)?;
    warn_duplicate_ids(&records);
    Ok(records)
}

fn warn_duplicate_ids(records: &[Record]) {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.id) {
            warn!("Duplicate article id {}, selection of these rows is shared", r.id);
        }
    }
}

fn detect_file_type(path: &Path) -> Result<FileType, DashError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("JSON") => Ok(FileType::JSON),
        Some("CSV") => Ok(FileType::CSV),
        Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
        Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
        _ => Err(DashError::UnknownFileType),
    }
}

fn get_file_info(path: PathBuf) -> Result<FileInfo, DashError> {
    let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DashError::FileNotFound,
        ErrorKind::PermissionDenied => DashError::PermissionDenied,
        _ => DashError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(DashError::LoadingFailed("Not a file!".into()));
    }

    let file_size = metadata.len();
    let file_type = detect_file_type(&path)?;

    Ok(FileInfo {
        path,
        file_size,
        file_type,
    })
}

fn load_csv(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.as_path().into()))
        .with_has_header(true)
        .finish()
}

fn load_parquet(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(
        PlPath::Local(path.as_path().into()),
        ScanArgsParquet::default(),
    )
}

fn load_arrow(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_ipc(
        PlPath::Local(path.as_path().into()),
        polars::io::ipc::IpcScanOptions,
        UnifiedScanArgs::default(),
    )
}

// Every column is cast to strings and read in its own rayon task, missing
// optional columns come back as None.
fn records_from_frame(frame: LazyFrame) -> Result<Vec<Record>, DashError> {
    let df = frame.collect()?;
    for name in REQUIRED_FIELDS {
        if df.column(name).is_err() {
            return Err(DashError::LoadingFailed(format!(
                "missing column \"{name}\""
            )));
        }
    }

    let columns: Result<Vec<Option<Vec<Option<String>>>>, PolarsError> = FIELDS
        .par_iter()
        .map(|name| match df.column(name) {
            Ok(_) => load_column(&df, name).map(Some),
            Err(_) => Ok(None),
        })
        .collect();
    let columns = columns?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let cell = |field: usize| cell_value(&columns, field, row);
        let id = cell(0)
            .and_then(parse_integer)
            .ok_or_else(|| DashError::LoadingFailed(format!("row {row} has no valid id")))?;
        records.push(Record {
            id,
            title: cell(1).unwrap_or_default().to_string(),
            keyword: cell(2).unwrap_or_default().to_string(),
            traffic: cell(3).and_then(parse_integer).unwrap_or(0),
            words: cell(4).and_then(parse_integer).unwrap_or(0),
            created_on: cell(5).and_then(parse_timestamp),
            action: cell(6).unwrap_or_default().to_string(),
            publish: cell(7).unwrap_or_default().to_string(),
        });
    }
    warn_duplicate_ids(&records);
    Ok(records)
}

fn cell_value(columns: &[Option<Vec<Option<String>>>], field: usize, row: usize) -> Option<&str> {
    columns[field]
        .as_ref()
        .and_then(|c| c.get(row))
        .and_then(|v| v.as_deref())
}

fn load_column(df: &DataFrame, col_name: &str) -> Result<Vec<Option<String>>, PolarsError> {
    let col = df.column(col_name)?.cast(&DataType::String)?;
    let series = col.str()?;
    let data = series
        .into_iter()
        .map(|value| value.map(|s| s.to_string()))
        .collect::<Vec<_>>();
    trace!("Column \"{}\" has {} values", col_name, data.len());
    Ok(data)
}

// Numeric columns may come back as "12.0" once cast to strings.
fn parse_integer(value: &str) -> Option<u64> {
    let value = value.trim();
    value
        .parse::<u64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u64))
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim().trim_end_matches(" UTC");
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    debug!("Could not parse timestamp \"{value}\"");
    None
}
