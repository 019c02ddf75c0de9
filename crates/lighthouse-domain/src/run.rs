//! Analysis run module - the unit of work for one uploaded document

use crate::signal::Signal;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an analysis run based on UUIDv7
///
/// UUIDv7 keeps ids chronologically sortable, which makes log lines from
/// consecutive runs easy to line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(uuid::Uuid);

impl RunId {
    /// Generate a new UUIDv7-based RunId
    ///
    /// # Examples
    ///
    /// ```
    /// use lighthouse_domain::RunId;
    ///
    /// let id = RunId::new();
    /// assert_eq!(id.to_string().len(), 36);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of document the caller declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Meeting transcript; goes through chunked extraction and synthesis
    Transcript,
    /// Product manager's notes; analyzed in a single pass
    Notes,
}

impl InputKind {
    /// Get the input kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Transcript => "transcript",
            InputKind::Notes => "notes",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transcript" | "meeting" => Ok(InputKind::Transcript),
            "notes" | "pm-notes" => Ok(InputKind::Notes),
            other => Err(format!("Unknown input kind: '{}'", other)),
        }
    }
}

/// One analysis of one document
///
/// `result_document` is only set when the run produced a document: at least
/// one signal existed on the transcript path, or the single-pass call
/// succeeded on the notes path.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Run identifier
    pub id: RunId,

    /// Declared input kind
    pub input_kind: InputKind,

    /// Raw text as supplied
    pub source_text: String,

    /// Signals in arrival order (empty for notes)
    pub signals: Vec<Signal>,

    /// Number of chunks the transcript was split into (0 for notes)
    pub chunk_count: usize,

    /// Number of chunks whose extraction failed
    pub failed_chunks: usize,

    /// Signal records dropped because they failed validation
    pub rejected_records: usize,

    /// Model that served the run
    pub model_name: String,

    /// Wall-clock time of the whole run in milliseconds
    pub processing_time_ms: u64,

    /// Final Markdown document
    pub result_document: Option<String>,
}

impl AnalysisRun {
    /// Start a new, empty run
    pub fn new(input_kind: InputKind, source_text: impl Into<String>) -> Self {
        Self {
            id: RunId::new(),
            input_kind,
            source_text: source_text.into(),
            signals: Vec::new(),
            chunk_count: 0,
            failed_chunks: 0,
            rejected_records: 0,
            model_name: String::new(),
            processing_time_ms: 0,
            result_document: None,
        }
    }

    /// Whether a document was produced
    pub fn is_complete(&self) -> bool {
        self.result_document.is_some()
    }
}
