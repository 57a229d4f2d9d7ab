use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Written once at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- packlist recovery log: checklist data that could not be loaded or saved.
     Each entry keeps the raw text so nothing is lost.
     Safe to delete once reviewed. -->

---
";

/// Once the log grows past this, the oldest entries are dropped
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Separator between the timestamp and the category in an entry header
const HEADER_SEP: &str = " — ";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Why an entry was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// A share token that failed to decode
    Token,
    /// A persisted snapshot that failed to parse
    Snapshot,
    /// A snapshot that could not be written
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Token => write!(f, "token"),
            RecoveryCategory::Snapshot => write!(f, "snapshot"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "token" => Some(RecoveryCategory::Token),
            "snapshot" => Some(RecoveryCategory::Snapshot),
            "write" => Some(RecoveryCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the recovery log
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecoverySummary {
    pub entry_count: usize,
    pub oldest: Option<DateTime<Utc>>,
}

impl RecoveryEntry {
    /// New entry stamped with the current time
    pub fn now(category: RecoveryCategory, description: impl Into<String>, body: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {}{}{}: {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            HEADER_SEP,
            self.category,
            self.description,
        );
        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        if !self.body.is_empty() {
            out.push_str("\n```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push_str("\n---\n");
        out
    }
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append an entry to the log at `path`. Failures are reported through
/// `tracing` and otherwise ignored.
pub fn log_recovery(path: &Path, entry: &RecoveryEntry) {
    if let Err(e) = append_entry(path, entry) {
        tracing::warn!(path = %path.display(), error = %e, "could not write to recovery log");
    }
}

fn append_entry(path: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    append_entry_capped(path, entry, MAX_LOG_SIZE)
}

fn append_entry_capped(path: &Path, entry: &RecoveryEntry, max_size: u64) -> io::Result<()> {
    if let Ok(meta) = std::fs::metadata(path)
        && meta.is_file()
        && meta.len() > max_size
    {
        trim_log(path, max_size / 2)?;
    }

    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())
}

/// Rewrite the log keeping only the newest entries that fit in `target` bytes
fn trim_log(path: &Path, target: u64) -> io::Result<()> {
    let content = std::fs::read_to_string(path)?;
    let rendered: Vec<String> = parse_entries(&content)
        .iter()
        .map(RecoveryEntry::to_markdown)
        .collect();

    let mut size = FILE_HEADER.len() as u64;
    let mut first_kept = rendered.len();
    for (i, text) in rendered.iter().enumerate().rev() {
        size += text.len() as u64;
        if size > target {
            break;
        }
        first_kept = i;
    }

    tracing::debug!(path = %path.display(), dropped = first_kept, "trimmed recovery log");
    let mut out = String::from(FILE_HEADER);
    out.extend(rendered[first_kept..].iter().map(String::as_str));
    atomic_write(path, out.as_bytes())
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read entries, most recent first, keeping at most `limit`
pub fn read_recovery_entries(path: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut entries = parse_entries(&content);
    entries.reverse();
    if let Some(n) = limit {
        entries.truncate(n);
    }
    entries
}

pub fn recovery_summary(path: &Path) -> Option<RecoverySummary> {
    let content = std::fs::read_to_string(path).ok()?;
    let entries = parse_entries(&content);
    if entries.is_empty() {
        return None;
    }
    Some(RecoverySummary {
        entry_count: entries.len(),
        oldest: entries.first().map(|e| e.timestamp),
    })
}

fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some((timestamp, category, description)) =
            line.strip_prefix("## ").and_then(parse_entry_header)
        else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body_lines: Vec<&str> = Vec::new();
        let mut in_body = false;
        for line in lines.by_ref() {
            if in_body {
                if line == "```" {
                    in_body = false;
                } else {
                    body_lines.push(line);
                }
                continue;
            }
            if line == "---" {
                break;
            }
            if line.starts_with("```") {
                in_body = true;
            } else if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body: body_lines.join("\n"),
        });
    }
    entries
}

/// `<timestamp> — <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (stamp, rest) = header.split_once(HEADER_SEP)?;
    let timestamp = DateTime::parse_from_rfc3339(stamp).ok()?.with_timezone(&Utc);
    let (category, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category)?;
    Some((timestamp, category, description.to_string()))
}
