//! Query evaluation for the in-memory document store.

use std::cmp::Ordering;

use serde_json::Value;

use storeit_core::types::{Document, DocumentList, Query};

/// Page size the provider applies when no limit clause is given.
pub(super) const DEFAULT_LIMIT: usize = 25;

/// Filter, order, count, page and project `docs` according to `queries`.
pub(super) fn apply(docs: Vec<Document>, queries: &[Query]) -> DocumentList {
    let mut matched: Vec<Document> = docs
        .into_iter()
        .filter(|doc| queries.iter().filter(|q| q.is_filter()).all(|q| matches(doc, q)))
        .collect();

    let orders: Vec<(&str, bool)> = queries
        .iter()
        .filter_map(|q| match q {
            Query::OrderAsc { attribute } => Some((attribute.as_str(), false)),
            Query::OrderDesc { attribute } => Some((attribute.as_str(), true)),
            _ => None,
        })
        .collect();

    if !orders.is_empty() {
        matched.sort_by(|a, b| {
            orders
                .iter()
                .map(|(attr, desc)| {
                    let ord = compare(a.attribute(attr).as_ref(), b.attribute(attr).as_ref());
                    if *desc { ord.reverse() } else { ord }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    let total = matched.len() as u64;

    let offset = queries
        .iter()
        .rev()
        .find_map(|q| match q {
            Query::Offset { values: [n] } => Some(*n as usize),
            _ => None,
        })
        .unwrap_or(0);
    matched.drain(..offset.min(matched.len()));

    let limit = queries
        .iter()
        .rev()
        .find_map(|q| match q {
            Query::Limit { values: [n] } => Some(*n as usize),
            _ => None,
        })
        .unwrap_or(DEFAULT_LIMIT);
    matched.truncate(limit);

    let selected = queries.iter().rev().find_map(|q| match q {
        Query::Select { values } => Some(values),
        _ => None,
    });
    if let Some(attributes) = selected {
        for doc in &mut matched {
            doc.data.retain(|key, _| attributes.iter().any(|a| a == key));
        }
    }

    DocumentList {
        total,
        documents: matched,
    }
}

/// Whether a single filter clause accepts the document. Non-filter clauses
/// always match.
pub(super) fn matches(doc: &Document, query: &Query) -> bool {
    match query {
        Query::Equal { attribute, values } => match doc.attribute(attribute) {
            Some(Value::Array(items)) => items.iter().any(|item| values.contains(item)),
            Some(field) => values.contains(&field),
            None => false,
        },
        Query::Contains { attribute, values } => match doc.attribute(attribute) {
            Some(Value::String(haystack)) => {
                let haystack = haystack.to_lowercase();
                values.iter().any(|needle| {
                    needle
                        .as_str()
                        .is_some_and(|n| haystack.contains(&n.to_lowercase()))
                })
            }
            Some(Value::Array(items)) => values.iter().any(|needle| items.contains(needle)),
            _ => false,
        },
        Query::Or { values } => values.iter().any(|q| matches(doc, q)),
        _ => true,
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
