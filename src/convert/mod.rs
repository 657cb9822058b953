//! Pointing-dataset conversion.
//!
//! Converts pointing annotation records whose assistant turns carry
//! `<ref>label</ref>` and `<point>[[x, y], ...]</point>` tags into the
//! standardized conversation format consumed at training time: a two-turn
//! exchange whose assistant value is a JSON array of `{point_2d, label}`
//! objects. Records that fail extraction are dropped with a diagnostic and
//! optionally routed to a side output for inspection.
//!
//! This is a one-pass batch transform with no state across records.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VlprepError;

static REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<ref>(.*?)</ref>").expect("static regex"));
static POINT_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<point>(.*?)</point>").expect("static regex"));

/// Label used when no `<ref>` tag is present in either turn.
const DEFAULT_LABEL: &str = "object";

/// One turn of a conversation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Turn {
    pub from: String,
    pub value: String,
}

/// An input pointing record. Unknown fields are ignored; the raw JSON value
/// is kept separately for the malformed side-channel.
#[derive(Clone, Debug, Deserialize)]
pub struct PointingRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub conversations: Vec<Turn>,
}

/// A converted record in the standardized conversation format.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConvertedRecord {
    pub image: String,
    pub conversations: Vec<Turn>,
}

/// One `{point_2d, label}` entry of an assistant turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointEntry {
    pub point_2d: [i64; 2],
    pub label: String,
}

/// Conversion options.
#[derive(Clone, Copy, Debug)]
pub struct ConvertOptions {
    /// Drop records whose assistant turn indicates the object is absent.
    pub skip_absent: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { skip_absent: true }
    }
}

/// Result of a conversion pass.
#[derive(Debug, Default)]
pub struct ConvertOutcome {
    pub converted: Vec<ConvertedRecord>,
    /// Raw values of records that failed extraction, for `--save-malformed`.
    pub malformed: Vec<Value>,
    pub skipped: usize,
}

/// Converts a batch of raw records.
///
/// Each record is converted independently; failures never abort the pass.
pub fn convert_records(items: &[Value], options: &ConvertOptions) -> ConvertOutcome {
    let mut outcome = ConvertOutcome::default();

    for (index, item) in items.iter().enumerate() {
        match convert_record(item, index, options) {
            Some(converted) => outcome.converted.push(converted),
            None => {
                outcome.skipped += 1;
                outcome.malformed.push(item.clone());
            }
        }
    }

    outcome
}

/// Converts a single record, or returns `None` with a stderr diagnostic when
/// the record cannot be converted.
fn convert_record(item: &Value, index: usize, options: &ConvertOptions) -> Option<ConvertedRecord> {
    let record: PointingRecord = match serde_json::from_value(item.clone()) {
        Ok(record) => record,
        Err(err) => {
            eprintln!("Warning: skipping record {}: {err}", record_id(item, index));
            return None;
        }
    };

    if record.conversations.len() < 2 {
        eprintln!(
            "Warning: skipping record {}: incomplete conversations",
            record_id(item, index)
        );
        return None;
    }

    let user_turn = &record.conversations[0];
    let assistant_turn = &record.conversations[1];

    let label = extract_ref_label(&user_turn.value)
        .or_else(|| extract_ref_label(&assistant_turn.value))
        .unwrap_or_else(|| DEFAULT_LABEL.to_string());

    if options.skip_absent && mentions_absence(&assistant_turn.value) {
        eprintln!(
            "Info: skipping record {}: object absent",
            record_id(item, index)
        );
        return None;
    }

    let points = extract_points(&assistant_turn.value);
    if points.is_empty() {
        eprintln!(
            "Warning: skipping record {}: no points found",
            record_id(item, index)
        );
        return None;
    }

    let entries: Vec<PointEntry> = points
        .into_iter()
        .map(|point_2d| PointEntry {
            point_2d,
            label: label.clone(),
        })
        .collect();

    let user_prompt = format!(
        "<image>\nLocate all {label} in this image and return points in JSON format."
    );
    let assistant_value =
        serde_json::to_string(&entries).expect("point entries serialize to JSON");

    Some(ConvertedRecord {
        image: record.image.unwrap_or_default(),
        conversations: vec![
            Turn {
                from: "human".to_string(),
                value: user_prompt,
            },
            Turn {
                from: "gpt".to_string(),
                value: assistant_value,
            },
        ],
    })
}

/// Extracts the label from the first `<ref>...</ref>` tag, trimmed.
fn extract_ref_label(text: &str) -> Option<String> {
    REF_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|label| !label.is_empty())
}

/// Heuristic from the source data: assistant turns answering "absent" or
/// "not present" carry no usable points.
fn mentions_absence(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("absent") || lowered.contains("not")
}

/// Extracts `[x, y]` integer points from a `<point>[[..], ..]</point>` tag.
///
/// Float coordinates are rounded to the nearest integer, ties to even.
/// Entries that are not two-element numeric lists are dropped with a
/// warning. Returns an empty list when the tag is missing or its content
/// does not parse.
fn extract_points(text: &str) -> Vec<[i64; 2]> {
    let Some(caps) = POINT_TAG_RE.captures(text) else {
        return Vec::new();
    };

    let raw: String = caps[1].chars().filter(|c| !c.is_whitespace()).collect();
    let parsed: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("Warning: point list failed to parse: {err}");
            return Vec::new();
        }
    };

    let mut points = Vec::with_capacity(parsed.len());
    for entry in parsed {
        match parse_point_entry(&entry) {
            Some(point) => points.push(point),
            None => eprintln!("Warning: skipping invalid point entry: {entry}"),
        }
    }
    points
}

/// Parses one point entry: a two-element numeric list.
fn parse_point_entry(entry: &Value) -> Option<[i64; 2]> {
    let coords = entry.as_array()?;
    if coords.len() != 2 {
        return None;
    }
    let x = coords[0].as_f64()?;
    let y = coords[1].as_f64()?;
    Some([x.round_ties_even() as i64, y.round_ties_even() as i64])
}

fn record_id(item: &Value, index: usize) -> String {
    match item.get("id") {
        Some(id) => id.to_string(),
        None => format!("#{index}"),
    }
}

/// Reads raw records from a `.json` array or `.jsonl` newline-delimited file.
pub fn read_records(path: &Path) -> Result<Vec<Value>, VlprepError> {
    let file = File::open(path).map_err(VlprepError::Io)?;
    let reader = BufReader::new(file);

    let is_jsonl = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

    if is_jsonl {
        let mut items = Vec::new();
        for (line_index, line) in reader.lines().enumerate() {
            let line = line.map_err(VlprepError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            let value =
                serde_json::from_str(&line).map_err(|source| VlprepError::JsonlParse {
                    path: path.to_path_buf(),
                    line: line_index + 1,
                    source,
                })?;
            items.push(value);
        }
        Ok(items)
    } else {
        serde_json::from_reader(reader).map_err(|source| VlprepError::JsonParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Writes converted records as a pretty-printed JSON array.
pub fn write_records(path: &Path, records: &[ConvertedRecord]) -> Result<(), VlprepError> {
    let file = File::create(path).map_err(VlprepError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, records).map_err(|source| VlprepError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes raw malformed records for later inspection.
pub fn write_raw_records(path: &Path, records: &[Value]) -> Result<(), VlprepError> {
    let file = File::create(path).map_err(VlprepError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, records).map_err(|source| VlprepError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}
