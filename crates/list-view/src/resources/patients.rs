//! Patients

use serde::Deserialize;
use serde_json::Value;

use super::{detail_field, text_field};
use crate::client::Method;
use crate::form::{FieldKind, FieldSpec, FormState};
use crate::format::{format_date, format_phone, is_valid_email, is_valid_phone};
use crate::query::RecordId;
use crate::resource::{ExtraAction, QuickFilter, Resource};
use crate::surface::{DetailField, DetailView};
use crate::table::{ActionKind, Cell, Column, ColumnType, RowAction, Tone};

/// Patient as serialized by the backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub id: RecordId,
    pub unique_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub age: Option<u32>,
    pub gender: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub insurance_provider: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub medical_history: Option<String>,
    pub admission_date: Option<String>,
    pub discharge_date: Option<String>,
    pub is_admitted: bool,
}

impl Patient {
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::deserialize(record).ok()
    }

    /// `full_name` when the backend sent it, else first + last
    pub fn display_name(&self) -> String {
        if !self.full_name.is_empty() {
            return self.full_name.clone();
        }
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

const GENDERS: &[(&str, &str)] = &[("Male", "Male"), ("Female", "Female"), ("Other", "Other")];

const ORDERINGS: &[(&str, &str)] = &[
    ("first_name", "First name"),
    ("last_name", "Last name"),
    ("-admission_date", "Latest admission"),
];

const COLUMNS: &[Column] = &[
    Column::new("unique_id", "Patient ID", ColumnType::Text),
    Column::new("full_name", "Name", ColumnType::Text),
    Column::new("date_of_birth", "Date of Birth", ColumnType::Date),
    Column::new("gender", "Gender", ColumnType::Text),
    Column::new("phone", "Phone", ColumnType::Phone),
    Column::new("email", "Email", ColumnType::Text),
];

const FORM: &[FieldSpec] = &[
    FieldSpec::required("unique_id", "Patient ID", FieldKind::Text),
    FieldSpec::required("first_name", "First Name", FieldKind::Text),
    FieldSpec::required("last_name", "Last Name", FieldKind::Text),
    FieldSpec::required("date_of_birth", "Date of Birth", FieldKind::Date),
    FieldSpec::required("gender", "Gender", FieldKind::Select(GENDERS)),
    FieldSpec::required("phone", "Phone", FieldKind::Phone),
    FieldSpec::optional("email", "Email", FieldKind::Email),
    FieldSpec::required("address", "Address", FieldKind::TextArea),
    FieldSpec::optional("medical_history", "Medical History", FieldKind::TextArea),
];

const QUICK_FILTERS: &[QuickFilter] = &[QuickFilter {
    key: "admitted",
    label: "Admitted",
    path: "admitted_patients",
    param: None,
}];

const DISCHARGE: ExtraAction = ExtraAction {
    key: "discharge",
    method: Method::Post,
    path: "discharge",
    confirm: Some("Are you sure you want to discharge this patient?"),
    success_message: "Patient discharged successfully!",
};

const DISCHARGE_BUTTON: RowAction = RowAction {
    kind: ActionKind::Custom("discharge"),
    label: "Discharge Patient",
    tone: Tone::Warning,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Patients;

impl Resource for Patients {
    fn path(&self) -> &'static str {
        "patients"
    }

    fn singular(&self) -> &'static str {
        "Patient"
    }

    fn plural(&self) -> &'static str {
        "patients"
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn form_schema(&self) -> &'static [FieldSpec] {
        FORM
    }

    fn create_title(&self) -> &'static str {
        "Create New Patient"
    }

    fn edit_title(&self) -> &'static str {
        "Edit Patient"
    }

    fn label(&self, record: &Value) -> String {
        Patient::from_record(record)
            .map(|p| p.display_name())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "this patient".to_string())
    }

    fn detail(&self, record: &Value) -> DetailView {
        let patient = Patient::from_record(record).unwrap_or_default();
        let status = if patient.is_admitted {
            Cell::Badge { label: "Admitted".to_string(), tone: Tone::Danger }
        } else {
            Cell::Badge { label: "Discharged".to_string(), tone: Tone::Success }
        };

        DetailView {
            title: patient.display_name(),
            record_id: patient.id,
            fields: vec![
                text_field("ID", patient.unique_id.as_str()),
                text_field("Name", patient.display_name()),
                text_field("DOB", format_date(patient.date_of_birth.as_deref())),
                text_field("Age", patient.age.map(|a| format!("{} years", a)).unwrap_or_default()),
                text_field("Gender", patient.gender.as_str()),
                text_field("Phone", format_phone(patient.phone.as_deref())),
                detail_field(record, "email", "Email", ColumnType::Text),
                detail_field(record, "insurance_provider", "Insurance", ColumnType::Text),
                DetailField { label: "Status", value: status },
            ],
            notes: Some((
                "Medical History",
                patient
                    .medical_history
                    .filter(|h| !h.is_empty())
                    .unwrap_or_else(|| "No medical history recorded".to_string()),
            )),
            actions: if patient.is_admitted { vec![DISCHARGE_BUTTON] } else { Vec::new() },
        }
    }

    fn filter_keys(&self) -> &'static [&'static str] {
        &["ordering"]
    }

    fn filter_options(&self, key: &str) -> &'static [(&'static str, &'static str)] {
        match key {
            "ordering" => ORDERINGS,
            _ => &[],
        }
    }

    fn quick_filters(&self) -> &'static [QuickFilter] {
        QUICK_FILTERS
    }

    fn extra_action(&self, key: &str) -> Option<ExtraAction> {
        (key == DISCHARGE.key).then_some(DISCHARGE)
    }

    fn validate(&self, form: &FormState) -> Result<(), String> {
        validate_contact(form)
    }
}

/// Shared by patients and staff: optional email, required phone.
pub(crate) fn validate_contact(form: &FormState) -> Result<(), String> {
    if let Some(email) = form.text("email").filter(|e| !e.trim().is_empty()) {
        if !is_valid_email(email.trim()) {
            return Err(format!("\"{}\" is not a valid email address", email));
        }
    }
    if let Some(phone) = form.text("phone").filter(|p| !p.trim().is_empty()) {
        if !is_valid_phone(phone) {
            return Err(format!("\"{}\" is not a valid phone number", phone));
        }
    }
    Ok(())
}
