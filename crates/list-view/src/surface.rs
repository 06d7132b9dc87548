//! Output Surface
//!
//! The seam between the controller and whatever renders it. The controller
//! is the only writer of a surface; renderers only read the view-models.

use crate::form::{FieldValues, FormView};
use crate::table::{Cell, PaginationView, RowAction, TableView, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Transient; dismissed by the user or a host timer
    Toast,
    /// Persistent until the user dismisses it
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub tone: Tone,
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn toast(tone: Tone, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Toast, tone, title: None, message: message.into() }
    }

    pub fn alert(tone: Tone, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Alert, tone, title: Some(title.into()), message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: Cell,
}

/// Read-only record panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub fields: Vec<DetailField>,
    /// Long free text shown below the fields
    pub notes: Option<(&'static str, String)>,
    pub actions: Vec<RowAction>,
    pub record_id: u64,
}

pub trait ViewSurface {
    fn set_loading(&self, loading: bool);
    fn render_table(&self, table: TableView);
    /// `None` removes the control
    fn render_pagination(&self, pagination: Option<PaginationView>);

    fn open_form(&self, form: FormView);
    fn close_form(&self);
    /// Current values of the open form's inputs
    fn read_form(&self) -> FieldValues;
    fn set_form_disabled(&self, disabled: bool);

    fn show_detail(&self, detail: DetailView);

    fn ask_confirm(&self, prompt: ConfirmPrompt);
    fn close_confirm(&self);

    fn notify(&self, notice: Notice);
}
