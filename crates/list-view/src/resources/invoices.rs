//! Invoices

use serde::Deserialize;
use serde_json::Value;

use super::{detail_field, text_field};
use crate::client::Method;
use crate::form::{FieldKind, FieldSpec, FormState};
use crate::format::{format_currency_value, parse_currency};
use crate::query::RecordId;
use crate::resource::{ExtraAction, QuickFilter, Resource};
use crate::surface::DetailView;
use crate::table::{ActionKind, Column, ColumnType, RowAction, Tone};

use super::appointments::PersonRef;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub id: RecordId,
    pub patient: Option<RecordId>,
    pub patient_detail: Option<PersonRef>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    /// Decimal; the backend sends it as a string
    pub total_amount: Value,
    pub paid: bool,
    pub insurance_claimed: bool,
    pub details: Option<String>,
}

impl Invoice {
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::deserialize(record).ok()
    }
}

const COLUMNS: &[Column] = &[
    Column::new("patient_detail.full_name", "Patient", ColumnType::Text),
    Column::new("total_amount", "Amount", ColumnType::Currency),
    Column::new("issue_date", "Issue Date", ColumnType::Date),
    Column::new("due_date", "Due Date", ColumnType::Date),
    Column::new("paid", "Status", ColumnType::Flag { yes: "Paid", no: "Unpaid" }),
    Column::new("insurance_claimed", "Insurance", ColumnType::Boolean),
];

const FORM: &[FieldSpec] = &[
    FieldSpec::required("patient", "Patient ID", FieldKind::Number),
    FieldSpec::required("issue_date", "Issue Date", FieldKind::Date),
    FieldSpec::required("due_date", "Due Date", FieldKind::Date),
    FieldSpec::required("total_amount", "Total Amount", FieldKind::Number),
    FieldSpec::optional("paid", "Paid", FieldKind::Checkbox),
    FieldSpec::optional("insurance_claimed", "Insurance Claimed", FieldKind::Checkbox),
    FieldSpec::optional("details", "Details", FieldKind::TextArea),
];

const PAYMENT_STATUSES: &[(&str, &str)] = &[("paid", "Paid"), ("unpaid", "Unpaid")];

const QUICK_FILTERS: &[QuickFilter] = &[
    QuickFilter { key: "unpaid", label: "Unpaid", path: "unpaid", param: None },
    QuickFilter { key: "overdue", label: "Overdue", path: "overdue", param: None },
];

const MARK_PAID: ExtraAction = ExtraAction {
    key: "mark_paid",
    method: Method::Post,
    path: "mark_paid",
    confirm: None,
    success_message: "Invoice marked as paid!",
};

const MARK_PAID_BUTTON: RowAction = RowAction {
    kind: ActionKind::Custom("mark_paid"),
    label: "Mark as Paid",
    tone: Tone::Success,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Invoices;

impl Resource for Invoices {
    fn path(&self) -> &'static str {
        "invoices"
    }

    fn singular(&self) -> &'static str {
        "Invoice"
    }

    fn plural(&self) -> &'static str {
        "invoices"
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn form_schema(&self) -> &'static [FieldSpec] {
        FORM
    }

    fn create_title(&self) -> &'static str {
        "Create New Invoice"
    }

    fn edit_title(&self) -> &'static str {
        "Edit Invoice"
    }

    fn label(&self, _record: &Value) -> String {
        "this invoice".to_string()
    }

    fn row_actions(&self, record: &Value) -> Vec<RowAction> {
        let paid = Invoice::from_record(record).is_some_and(|invoice| invoice.paid);
        let mut actions = vec![RowAction::VIEW, RowAction::EDIT];
        if !paid {
            actions.push(MARK_PAID_BUTTON);
        }
        actions.push(RowAction::DELETE);
        actions
    }

    fn detail(&self, record: &Value) -> DetailView {
        let invoice = Invoice::from_record(record).unwrap_or_default();
        DetailView {
            title: format!("Invoice #{}", invoice.id),
            record_id: invoice.id,
            fields: vec![
                text_field("Invoice #", invoice.id.to_string()),
                detail_field(record, "patient_detail.full_name", "Patient", ColumnType::Text),
                text_field("Total Amount", format_currency_value(Some(&invoice.total_amount))),
                detail_field(record, "issue_date", "Issue Date", ColumnType::Date),
                detail_field(record, "due_date", "Due Date", ColumnType::Date),
                detail_field(record, "paid", "Status", ColumnType::Flag { yes: "Paid", no: "Unpaid" }),
            ],
            notes: invoice.details.filter(|d| !d.is_empty()).map(|d| ("Details", d)),
            actions: if invoice.paid { Vec::new() } else { vec![MARK_PAID_BUTTON] },
        }
    }

    fn filter_keys(&self) -> &'static [&'static str] {
        &["status"]
    }

    fn filter_options(&self, key: &str) -> &'static [(&'static str, &'static str)] {
        match key {
            "status" => PAYMENT_STATUSES,
            _ => &[],
        }
    }

    fn quick_filters(&self) -> &'static [QuickFilter] {
        QUICK_FILTERS
    }

    fn extra_action(&self, key: &str) -> Option<ExtraAction> {
        (key == MARK_PAID.key).then_some(MARK_PAID)
    }

    fn validate(&self, form: &FormState) -> Result<(), String> {
        let patient = form.text("patient").map(str::trim).unwrap_or_default();
        if patient.parse::<RecordId>().is_err() {
            return Err("Patient ID must be a number".to_string());
        }
        match form.text("total_amount").and_then(parse_currency) {
            Some(amount) if amount >= 0.0 => Ok(()),
            _ => Err("Total amount must be a non-negative number".to_string()),
        }
    }
}
