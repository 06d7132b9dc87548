//! Resource Bindings - Core Trait
//!
//! Everything the list-view controller needs to know about one backend
//! collection: endpoints, columns, form schema, detail layout and the
//! resource-specific actions and quick filters.

use serde_json::Value;

use crate::client::Method;
use crate::form::{FieldSpec, FormState};
use crate::query::{encode_query_value, ListQuery, RecordId};
use crate::surface::DetailView;
use crate::table::{Column, RowAction};

/// Dedicated unpaged sub-resource, e.g. `/invoices/unpaid/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickFilter {
    pub key: &'static str,
    pub label: &'static str,
    /// Path below the collection, e.g. `unpaid`
    pub path: &'static str,
    /// Query parameter carrying the user's value, if any
    pub param: Option<&'static str>,
}

impl QuickFilter {
    /// `None` when the filter takes a value and none was given.
    pub fn endpoint(&self, collection: &str, value: Option<&str>) -> Option<String> {
        let base = format!("/{}/{}/", collection, self.path);
        match self.param {
            None => Some(base),
            Some(param) => {
                let value = value.map(str::trim).filter(|v| !v.is_empty())?;
                Some(format!("{}?{}={}", base, param, encode_query_value(value)))
            }
        }
    }
}

/// Write action on one record, e.g. `POST /invoices/{id}/mark_paid/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraAction {
    pub key: &'static str,
    pub method: Method,
    pub path: &'static str,
    /// Prompt shown before dispatching; `None` dispatches immediately
    pub confirm: Option<&'static str>,
    pub success_message: &'static str,
}

pub trait Resource {
    /// Collection path segment, e.g. `patients`
    fn path(&self) -> &'static str;
    /// `Patient`
    fn singular(&self) -> &'static str;
    /// `patients`
    fn plural(&self) -> &'static str;

    fn columns(&self) -> &'static [Column];
    fn form_schema(&self) -> &'static [FieldSpec];
    fn create_title(&self) -> &'static str;
    fn edit_title(&self) -> &'static str;

    /// Name used in prompts ("Are you sure you want to delete ...")
    fn label(&self, record: &Value) -> String;

    fn detail(&self, record: &Value) -> DetailView;

    fn row_actions(&self, _record: &Value) -> Vec<RowAction> {
        RowAction::standard()
    }

    /// Extra list parameters accepted by the paged endpoint
    fn filter_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// (value, label) choices offered for a list filter
    fn filter_options(&self, _key: &str) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn quick_filters(&self) -> &'static [QuickFilter] {
        &[]
    }

    fn extra_action(&self, _key: &str) -> Option<ExtraAction> {
        None
    }

    /// Client-side checks before a write; the message is shown to the user.
    fn validate(&self, _form: &FormState) -> Result<(), String> {
        Ok(())
    }

    fn collection_endpoint(&self) -> String {
        format!("/{}/", self.path())
    }

    fn list_endpoint(&self, query: &ListQuery) -> String {
        format!("/{}/?{}", self.path(), query.to_query_string())
    }

    fn item_endpoint(&self, id: RecordId) -> String {
        format!("/{}/{}/", self.path(), id)
    }

    fn action_endpoint(&self, id: RecordId, action: &ExtraAction) -> String {
        format!("/{}/{}/{}/", self.path(), id, action.path)
    }

    fn quick_filter(&self, key: &str) -> Option<&'static QuickFilter> {
        self.quick_filters().iter().find(|filter| filter.key == key)
    }
}
