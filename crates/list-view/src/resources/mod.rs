//! Resource Bindings
//!
//! One binding per backend collection, organized by domain.

mod appointments;
mod invoices;
mod patients;
mod staff;

pub use appointments::{Appointment, Appointments, PersonRef};
pub use invoices::{Invoice, Invoices};
pub use patients::{Patient, Patients};
pub use staff::{Staff, StaffMembers};

use serde_json::Value;

use crate::surface::DetailField;
use crate::table::{format_cell, lookup, Cell, ColumnType};

/// Detail row formatted like a table cell.
pub(crate) fn detail_field(record: &Value, key: &str, label: &'static str, kind: ColumnType) -> DetailField {
    DetailField { label, value: format_cell(lookup(record, key), kind) }
}

pub(crate) fn text_field(label: &'static str, text: impl Into<String>) -> DetailField {
    let text = text.into();
    DetailField {
        label,
        value: Cell::Text(if text.is_empty() { "-".to_string() } else { text }),
    }
}
