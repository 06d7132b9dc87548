//! List-View Core
//!
//! Platform-independent pieces of the HMS front end:
//! - client: JSON REST client over an injected transport
//! - query: list queries and paged results
//! - format / table / form: pure presentation helpers producing view-models
//! - surface: the output seam a renderer implements
//! - controller: the per-resource list-view state machine
//! - resources: patients, staff, appointments and invoices bindings

pub mod client;
pub mod controller;
pub mod form;
pub mod format;
pub mod query;
pub mod resource;
pub mod resources;
pub mod surface;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, ApiError, ClientConfig, HttpRequest, HttpResponse, HttpTransport, Method, OperationResult};
pub use controller::{ListPhase, ListViewController};
pub use form::{FieldKind, FieldSpec, FieldValue, FieldValues, FormField, FormMode, FormState, FormView};
pub use query::{ListQuery, PagedResult, RecordId};
pub use resource::{ExtraAction, QuickFilter, Resource};
pub use surface::{ConfirmPrompt, DetailField, DetailView, Notice, NoticeKind, ViewSurface};
pub use table::{ActionKind, Cell, Column, ColumnType, PageLink, PaginationView, RowAction, RowView, TableView, Tone};
