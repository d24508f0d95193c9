//! Record entity and related types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// Zero-based index of an item within its record
pub type Position = usize;

/// View mode used when a record does not name one
pub const DEFAULT_VIEW_MODE: &str = "default";

/// Record type identifier (the field type renderers declare support for)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordType(String);

impl RecordType {
    /// Create a new RecordType, rejecting blank identifiers
    pub fn new(record_type: impl Into<String>) -> Result<Self, DomainError> {
        let record_type = record_type.into();
        let trimmed = record_type.trim();

        if trimmed.is_empty() {
            return Err(DomainError::validation("Record type cannot be empty"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordType> for String {
    fn from(record_type: RecordType) -> Self {
        record_type.0
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field definition and display context of the record being rendered.
///
/// Applicability predicates and renderers receive this; the core never
/// interprets anything beyond `record_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordContext {
    record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_name: Option<String>,
    view_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    langcode: Option<String>,
}

impl RecordContext {
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            field_name: None,
            view_mode: DEFAULT_VIEW_MODE.to_string(),
            langcode: None,
        }
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_view_mode(mut self, view_mode: impl Into<String>) -> Self {
        self.view_mode = view_mode.into();
        self
    }

    pub fn with_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.langcode = Some(langcode.into());
        self
    }

    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    pub fn view_mode(&self) -> &str {
        &self.view_mode
    }

    pub fn langcode(&self) -> Option<&str> {
        self.langcode.as_deref()
    }
}

/// One value of a multi-value record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub position: Position,
    pub value: Value,
}

impl Item {
    pub fn new(position: Position, value: Value) -> Self {
        Self { position, value }
    }
}

/// A record: its context plus items at contiguous positions `0..len`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    context: RecordContext,
    items: Vec<Item>,
}

impl Record {
    /// Create a record, assigning positions in the order the values are given
    pub fn new(context: RecordContext, values: impl IntoIterator<Item = Value>) -> Self {
        let items = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| Item::new(position, value))
            .collect();

        Self { context, items }
    }

    pub fn context(&self) -> &RecordContext {
        &self.context
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Check that items sit at positions `0..len` in ascending order
pub fn validate_positions(items: &[Item]) -> Result<(), DomainError> {
    for (expected, item) in items.iter().enumerate() {
        if item.position != expected {
            return Err(DomainError::validation(format!(
                "Item at index {} has position {}; positions must be contiguous from 0",
                expected, item.position
            )));
        }
    }

    Ok(())
}
