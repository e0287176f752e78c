//! Stepwise access into the workflow response envelope.
//!
//! The hosted flow wraps its answer as
//! `outputs[0].outputs[0].results.message.text`. Lookup walks that path one
//! segment at a time and reports the first segment that is missing or has the
//! wrong type, so callers never index blindly into the JSON.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::analysis::FALLBACK_TEXT;

/// One step into a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field
    Key(&'static str),
    /// Array element
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Location of the answer text inside the envelope.
pub const ANSWER_PATH: [PathSegment; 7] = [
    PathSegment::Key("outputs"),
    PathSegment::Index(0),
    PathSegment::Key("outputs"),
    PathSegment::Index(0),
    PathSegment::Key("results"),
    PathSegment::Key("message"),
    PathSegment::Key("text"),
];

/// Lookup stopped at `path`: the value there is absent or not the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("envelope has no value at `{path}`")]
pub struct NotFound {
    pub path: String,
}

/// Applies a single segment.
pub fn step(value: &Value, segment: PathSegment) -> Option<&Value> {
    match segment {
        PathSegment::Key(key) => value.as_object()?.get(key),
        PathSegment::Index(index) => value.as_array()?.get(index),
    }
}

/// Walks `path` from `root`.
pub fn lookup<'a>(root: &'a Value, path: &[PathSegment]) -> Result<&'a Value, NotFound> {
    let mut current = root;
    for (depth, segment) in path.iter().enumerate() {
        current = step(current, *segment).ok_or_else(|| NotFound {
            path: render_path(&path[..=depth]),
        })?;
    }
    Ok(current)
}

/// The answer text, if the envelope has the expected shape.
pub fn answer_text(envelope: &Value) -> Result<&str, NotFound> {
    lookup(envelope, &ANSWER_PATH)?
        .as_str()
        .ok_or_else(|| NotFound {
            path: render_path(&ANSWER_PATH),
        })
}

/// The answer text, or [`FALLBACK_TEXT`] when any link in the path is absent.
pub fn extract_text(envelope: &Value) -> String {
    match answer_text(envelope) {
        Ok(text) => text.to_string(),
        Err(missing) => {
            tracing::debug!(path = %missing.path, "Envelope has no answer text, using fallback");
            FALLBACK_TEXT.to_string()
        }
    }
}

fn render_path(path: &[PathSegment]) -> String {
    let rendered: String = path.iter().map(ToString::to_string).collect();
    rendered.trim_start_matches('.').to_string()
}
