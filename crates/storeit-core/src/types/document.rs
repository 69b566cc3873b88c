//! Schemaless documents exchanged with the document store.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// A stored document: provider-managed metadata plus free-form attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id.
    #[serde(rename = "$id", default)]
    pub id: String,
    /// Creation time as recorded by the provider.
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time as recorded by the provider.
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// User attributes (and any extra provider metadata).
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Document {
    /// Build a document from an id and attribute map.
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            updated_at: None,
            data,
        }
    }

    /// Look up an attribute, including the `$`-prefixed system attributes.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "$id" => Some(Value::String(self.id.clone())),
            "$createdAt" => self.created_at.map(timestamp_value),
            "$updatedAt" => self.updated_at.map(timestamp_value),
            other => self.data.get(other).cloned(),
        }
    }

    /// Deserialize the document into a typed model.
    pub fn into_model<T: DeserializeOwned>(self) -> Result<T, AppError> {
        let id = self.id.clone();
        let value = serde_json::to_value(self)?;
        serde_json::from_value(value).map_err(|e| {
            AppError::with_source(
                crate::error::ErrorKind::Serialization,
                format!("Document '{id}' does not match the expected shape: {e}"),
                e,
            )
        })
    }
}

/// A page of documents and the provider's count of all matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    /// Number of documents matching the filters, ignoring the limit.
    pub total: u64,
    /// The returned documents.
    pub documents: Vec<Document>,
}

/// Serialize a model into a document attribute map.
///
/// Fails when the model does not serialize to a JSON object.
pub fn to_attributes<T: Serialize>(model: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(model)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::internal("Document attributes must be an object")),
    }
}

fn timestamp_value(ts: DateTime<Utc>) -> Value {
    Value::String(ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}
