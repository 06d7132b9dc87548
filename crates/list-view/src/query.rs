//! List Queries and Paged Results

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::Value;

use crate::client::{ApiError, OperationResult};

/// Backend primary key
pub type RecordId = u64;

/// Characters left alone in query values (same as URLSearchParams, minus `+` for spaces)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'*');

/// Search text, page and extra filters for one list fetch.
///
/// A new query always replaces the previous one; nothing is merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search_text: String,
    pub page_number: u32,
    pub extra_filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            page_number: 1,
            extra_filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new(search_text: impl Into<String>, page_number: u32) -> Self {
        Self {
            search_text: search_text.into(),
            page_number: page_number.max(1),
            extra_filters: BTreeMap::new(),
        }
    }

    /// Same search and filters, different page.
    pub fn at_page(&self, page_number: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            ..self.clone()
        }
    }

    /// `search=..&page=..&<filters>`; empty search text and empty filter values are skipped.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !self.search_text.is_empty() {
            params.push(("search", self.search_text.clone()));
        }
        params.push(("page", self.page_number.to_string()));
        for (key, value) in &self.extra_filters {
            if !value.is_empty() {
                params.push((key.as_str(), value.clone()));
            }
        }

        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode_query_value(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Paginated envelope returned by list endpoints
#[derive(Debug, Clone, Deserialize)]
struct PagedEnvelope {
    results: Vec<Value>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
}

/// One page of records as received; never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub has_previous: bool,
    pub page_number: u32,
}

impl PagedResult<Value> {
    /// Parse a `{results, next, previous}` envelope fetched for `page_number`.
    pub fn from_envelope(body: Value, page_number: u32) -> OperationResult<Self> {
        let envelope: PagedEnvelope = serde_json::from_value(body)
            .map_err(|e| ApiError::Parse(format!("Unexpected list response: {}", e)))?;
        Ok(Self {
            items: envelope.results,
            has_next: envelope.next.is_some(),
            has_previous: envelope.previous.is_some(),
            page_number,
        })
    }

    /// Parse a quick-filter response: a bare array, or an envelope whose links are ignored.
    pub fn unpaged(body: Value) -> OperationResult<Self> {
        let items = match body {
            Value::Array(items) => items,
            other => Self::from_envelope(other, 1)?.items,
        };
        Ok(Self {
            items,
            has_next: false,
            has_previous: false,
            page_number: 1,
        })
    }
}
