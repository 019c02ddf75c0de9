//! Parse extraction replies into signals

use crate::error::ChunkError;
use crate::types::SignalCandidate;
use lighthouse_domain::Signal;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Signals parsed from one extraction reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
    /// Valid signals in reply order
    pub signals: Vec<Signal>,

    /// Records that were dropped because they failed validation
    pub rejected: usize,
}

/// The two reply shapes the extractor accepts
///
/// `Bare` is tried first since serde also reads a struct from a JSON array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReplyShape {
    /// `[...]`
    Bare(Vec<Value>),
    /// `{"extracted_signals": [...]}`
    Wrapped { extracted_signals: Vec<Value> },
}

impl ReplyShape {
    fn into_records(self) -> Vec<Value> {
        match self {
            ReplyShape::Bare(records) => records,
            ReplyShape::Wrapped { extracted_signals } => extracted_signals,
        }
    }
}

/// Parse an extraction reply into signals
///
/// Fails when the reply is not JSON or is neither an object holding an
/// `extracted_signals` list nor a bare list. Individual records that fail
/// validation are skipped and counted, they do not fail the reply.
pub fn parse_extraction_reply(response: &str) -> Result<ParsedReply, ChunkError> {
    let json_str = extract_json(response);
    let json: Value = serde_json::from_str(json_str)?;

    let description = describe(&json);
    let records = ReplyShape::deserialize(json)
        .map_err(|_| {
            ChunkError::UnexpectedShape(format!(
                "expected an object with an 'extracted_signals' list or a list, got {}",
                description
            ))
        })?
        .into_records();

    let mut parsed = ParsedReply::default();
    for (idx, record) in records.into_iter().enumerate() {
        match parse_record(record) {
            Ok(signal) => parsed.signals.push(signal),
            Err(e) => {
                warn!("Dropping signal record {}: {}", idx, e);
                parsed.rejected += 1;
            }
        }
    }

    Ok(parsed)
}

fn parse_record(record: Value) -> Result<Signal, String> {
    if !record.is_object() {
        return Err(format!("record is {}, not an object", describe(&record)));
    }
    let candidate = SignalCandidate::deserialize(record).map_err(|e| e.to_string())?;
    if candidate.has_unknown_priority() {
        warn!(
            "Signal record has priority {:?}, using Medium",
            candidate.priority_signal
        );
    }
    candidate.into_signal()
}

/// Strip a markdown code fence if the model wrapped its JSON in one
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line (```json or ```) and the closing fence
    let body = trimmed
        .split_once('\n')
        .map(|(_, rest)| rest)
        .unwrap_or("");
    body.trim_end().trim_end_matches("```").trim()
}

fn describe(json: &Value) -> String {
    match json {
        Value::Object(map) if map.contains_key("extracted_signals") => {
            "an object whose 'extracted_signals' is not a list".to_string()
        }
        Value::Object(_) => "an object without 'extracted_signals'".to_string(),
        Value::Array(_) => "a list".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Null => "null".to_string(),
    }
}
