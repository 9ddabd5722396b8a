//! Boundary validation for score payloads.
//!
//! Validation collects every violated constraint as an [`Issue`] instead of
//! stopping at the first one, so clients can highlight all bad fields at once.

use serde::Serialize;
use serde_json::Value;

use super::score::{NewScore, Points, ScoreName, ScorePatch};

/// Machine-readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    NotInteger,
    InvalidJson,
    Custom,
}

/// A single violated constraint, addressed by the JSON path of the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub path: Vec<String>,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    pub fn new(path: &[&str], code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|p| p.to_string()).collect(),
            code,
            message: message.into(),
        }
    }

    /// Issue attached to the payload as a whole rather than one field.
    pub fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(&[], code, message)
    }
}

/// A request field as it arrived on the wire.
///
/// `Null` is kept distinct from `Absent`: an explicit `null` is a type error,
/// never a request to leave the field untouched.
#[derive(Debug, Clone, Copy)]
pub enum RawField<'a> {
    Absent,
    Null,
    Value(&'a Value),
}

impl<'a> From<&'a Option<Option<Value>>> for RawField<'a> {
    fn from(field: &'a Option<Option<Value>>) -> Self {
        match field {
            None => RawField::Absent,
            Some(None) => RawField::Null,
            Some(Some(value)) => RawField::Value(value),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_name(field: RawField<'_>) -> Result<Option<ScoreName>, Issue> {
    match field {
        RawField::Absent => Ok(None),
        RawField::Null => Err(Issue::new(
            &["name"],
            IssueCode::InvalidType,
            "Expected string, received null",
        )),
        RawField::Value(Value::String(raw)) => ScoreName::parse(raw).map(Some),
        RawField::Value(other) => Err(Issue::new(
            &["name"],
            IssueCode::InvalidType,
            format!("Expected string, received {}", json_kind(other)),
        )),
    }
}

fn parse_points(field: RawField<'_>) -> Result<Option<Points>, Issue> {
    match field {
        RawField::Absent => Ok(None),
        RawField::Null => Err(Issue::new(
            &["score"],
            IssueCode::InvalidType,
            "Expected number, received null",
        )),
        RawField::Value(value) => Points::from_json(value).map(Some),
    }
}

fn required(path: &str) -> Issue {
    Issue::new(&[path], IssueCode::InvalidType, "Required")
}

/// Validate a create payload. Both fields are required.
pub fn validate_create(name: RawField<'_>, score: RawField<'_>) -> Result<NewScore, Vec<Issue>> {
    let mut issues = Vec::new();

    let name = match parse_name(name) {
        Ok(Some(name)) => Some(name),
        Ok(None) => {
            issues.push(required("name"));
            None
        }
        Err(issue) => {
            issues.push(issue);
            None
        }
    };

    let score = match parse_points(score) {
        Ok(Some(score)) => Some(score),
        Ok(None) => {
            issues.push(required("score"));
            None
        }
        Err(issue) => {
            issues.push(issue);
            None
        }
    };

    match (name, score) {
        (Some(name), Some(score)) if issues.is_empty() => Ok(NewScore { name, score }),
        _ => Err(issues),
    }
}

/// Validate a partial update payload. At least one field must be present.
pub fn validate_patch(name: RawField<'_>, score: RawField<'_>) -> Result<ScorePatch, Vec<Issue>> {
    let mut issues = Vec::new();

    let name = parse_name(name).unwrap_or_else(|issue| {
        issues.push(issue);
        None
    });
    let score = parse_points(score).unwrap_or_else(|issue| {
        issues.push(issue);
        None
    });

    if !issues.is_empty() {
        return Err(issues);
    }

    let patch = ScorePatch { name, score };
    if patch.is_empty() {
        return Err(vec![Issue::root(
            IssueCode::Custom,
            "At least one of name or score is required",
        )]);
    }

    Ok(patch)
}
