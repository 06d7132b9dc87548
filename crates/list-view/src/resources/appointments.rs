//! Appointments

use serde::Deserialize;
use serde_json::Value;

use super::{detail_field, text_field};
use crate::form::{FieldKind, FieldSpec, FormState};
use crate::query::RecordId;
use crate::resource::{QuickFilter, Resource};
use crate::surface::DetailView;
use crate::table::{Column, ColumnType};

/// Nested patient / doctor summary
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersonRef {
    pub id: RecordId,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Appointment {
    pub id: RecordId,
    pub patient: Option<RecordId>,
    pub patient_detail: Option<PersonRef>,
    pub doctor: Option<RecordId>,
    pub doctor_detail: Option<PersonRef>,
    pub appointment_date: Option<String>,
    pub reason: Option<String>,
    pub status: String,
}

impl Appointment {
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::deserialize(record).ok()
    }

    pub fn patient_name(&self) -> Option<&str> {
        self.patient_detail.as_ref().map(|p| p.full_name.as_str()).filter(|n| !n.is_empty())
    }
}

pub const STATUSES: &[(&str, &str)] = &[
    ("Scheduled", "Scheduled"),
    ("Completed", "Completed"),
    ("Cancelled", "Cancelled"),
];

const COLUMNS: &[Column] = &[
    Column::new("patient_detail.full_name", "Patient", ColumnType::Text),
    Column::new("doctor_detail.full_name", "Doctor", ColumnType::Text),
    Column::new("appointment_date", "Date & Time", ColumnType::DateTime),
    Column::new("reason", "Reason", ColumnType::Text),
    Column::new("status", "Status", ColumnType::Status),
];

const FORM: &[FieldSpec] = &[
    FieldSpec::required("patient", "Patient ID", FieldKind::Number),
    FieldSpec::required("doctor", "Doctor ID", FieldKind::Number),
    FieldSpec::required("appointment_date", "Date & Time", FieldKind::DateTime),
    FieldSpec::optional("reason", "Reason", FieldKind::TextArea),
    FieldSpec::required("status", "Status", FieldKind::Select(STATUSES)),
];

const QUICK_FILTERS: &[QuickFilter] = &[
    QuickFilter { key: "scheduled", label: "Scheduled", path: "scheduled", param: None },
    QuickFilter { key: "upcoming", label: "Upcoming", path: "upcoming", param: None },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Appointments;

impl Resource for Appointments {
    fn path(&self) -> &'static str {
        "appointments"
    }

    fn singular(&self) -> &'static str {
        "Appointment"
    }

    fn plural(&self) -> &'static str {
        "appointments"
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn form_schema(&self) -> &'static [FieldSpec] {
        FORM
    }

    fn create_title(&self) -> &'static str {
        "Schedule New Appointment"
    }

    fn edit_title(&self) -> &'static str {
        "Edit Appointment"
    }

    fn label(&self, record: &Value) -> String {
        Appointment::from_record(record)
            .and_then(|a| a.patient_name().map(|name| format!("the appointment for {}", name)))
            .unwrap_or_else(|| "this appointment".to_string())
    }

    fn detail(&self, record: &Value) -> DetailView {
        let appointment = Appointment::from_record(record).unwrap_or_default();
        DetailView {
            title: format!("Appointment #{}", appointment.id),
            record_id: appointment.id,
            fields: vec![
                text_field("Patient", appointment.patient_name().unwrap_or_default()),
                detail_field(record, "doctor_detail.full_name", "Doctor", ColumnType::Text),
                detail_field(record, "appointment_date", "Date & Time", ColumnType::DateTime),
                detail_field(record, "reason", "Reason", ColumnType::Text),
                detail_field(record, "status", "Status", ColumnType::Status),
            ],
            notes: None,
            actions: Vec::new(),
        }
    }

    fn filter_keys(&self) -> &'static [&'static str] {
        &["status"]
    }

    fn filter_options(&self, key: &str) -> &'static [(&'static str, &'static str)] {
        match key {
            "status" => STATUSES,
            _ => &[],
        }
    }

    fn quick_filters(&self) -> &'static [QuickFilter] {
        QUICK_FILTERS
    }

    fn validate(&self, form: &FormState) -> Result<(), String> {
        for (field, label) in [("patient", "Patient ID"), ("doctor", "Doctor ID")] {
            let value = form.text(field).map(str::trim).unwrap_or_default();
            if value.parse::<RecordId>().is_err() {
                return Err(format!("{} must be a number", label));
            }
        }
        Ok(())
    }
}
