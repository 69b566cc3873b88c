//! Query vocabulary understood by every [`DocumentStore`](crate::traits::DocumentStore).
//!
//! The set is small: equality, containment, disjunction, ordering,
//! paging and projection. Backends translate it to their own
//! wire format; the memory backend evaluates it directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sorting::{SortDirection, SortField};

/// A single query clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Query {
    /// Attribute equals any of the values.
    Equal {
        /// Attribute name.
        attribute: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// String attribute contains any of the substrings, or array attribute
    /// contains any of the elements.
    Contains {
        /// Attribute name.
        attribute: String,
        /// Needles.
        values: Vec<Value>,
    },
    /// Any of the nested clauses matches.
    Or {
        /// Nested clauses.
        values: Vec<Query>,
    },
    /// Ascending order on an attribute.
    OrderAsc {
        /// Attribute name.
        attribute: String,
    },
    /// Descending order on an attribute.
    OrderDesc {
        /// Attribute name.
        attribute: String,
    },
    /// Maximum number of documents returned.
    Limit {
        /// Single-element list holding the limit.
        values: [u32; 1],
    },
    /// Number of matching documents skipped before the page starts.
    Offset {
        /// Single-element list holding the offset.
        values: [u32; 1],
    },
    /// Restrict the returned attributes.
    Select {
        /// Attribute names.
        values: Vec<String>,
    },
}

impl Query {
    /// `attribute == value` for any of `values`.
    pub fn equal<V: Into<Value>>(
        attribute: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::Equal {
            attribute: attribute.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Substring (string attribute) or element (array attribute) match.
    pub fn contains<V: Into<Value>>(
        attribute: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::Contains {
            attribute: attribute.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Disjunction of the given clauses.
    pub fn or(queries: impl IntoIterator<Item = Query>) -> Self {
        Self::Or {
            values: queries.into_iter().collect(),
        }
    }

    /// Ascending order.
    pub fn order_asc(attribute: impl Into<String>) -> Self {
        Self::OrderAsc {
            attribute: attribute.into(),
        }
    }

    /// Descending order.
    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Self::OrderDesc {
            attribute: attribute.into(),
        }
    }

    /// Order according to a parsed sort field.
    pub fn order(sort: &SortField) -> Self {
        match sort.direction {
            SortDirection::Asc => Self::order_asc(sort.field.clone()),
            SortDirection::Desc => Self::order_desc(sort.field.clone()),
        }
    }

    /// Result count cap.
    pub fn limit(limit: u32) -> Self {
        Self::Limit { values: [limit] }
    }

    /// Skip the first `offset` matches.
    pub fn offset(offset: u32) -> Self {
        Self::Offset { values: [offset] }
    }

    /// Attribute projection.
    pub fn select<S: Into<String>>(attributes: impl IntoIterator<Item = S>) -> Self {
        Self::Select {
            values: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this clause filters documents (as opposed to shaping the result).
    pub fn is_filter(&self) -> bool {
        matches!(self, Self::Equal { .. } | Self::Contains { .. } | Self::Or { .. })
    }
}
