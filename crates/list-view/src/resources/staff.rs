//! Staff

use serde::Deserialize;
use serde_json::Value;

use super::patients::validate_contact;
use super::{detail_field, text_field};
use crate::form::{FieldKind, FieldSpec, FormState};
use crate::format::format_phone;
use crate::query::RecordId;
use crate::resource::{QuickFilter, Resource};
use crate::surface::{DetailField, DetailView};
use crate::table::{Cell, Column, ColumnType, Tone};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Staff {
    pub id: RecordId,
    pub staff_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub schedule: Option<String>,
    pub hire_date: Option<String>,
    pub is_active: bool,
    pub is_medical_staff: bool,
}

impl Default for Staff {
    fn default() -> Self {
        Self {
            id: 0,
            staff_id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            full_name: String::new(),
            role: String::new(),
            department: None,
            phone: None,
            email: None,
            schedule: None,
            hire_date: None,
            // staff are active unless the backend says otherwise
            is_active: true,
            is_medical_staff: false,
        }
    }
}

impl Staff {
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::deserialize(record).ok()
    }

    pub fn display_name(&self) -> String {
        if !self.full_name.is_empty() {
            return self.full_name.clone();
        }
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Departments offered by the department filters
pub const DEPARTMENTS: &[(&str, &str)] = &[
    ("Cardiology", "Cardiology"),
    ("Emergency", "Emergency"),
    ("Neurology", "Neurology"),
    ("Oncology", "Oncology"),
    ("Pediatrics", "Pediatrics"),
    ("Radiology", "Radiology"),
    ("Surgery", "Surgery"),
    ("Administration", "Administration"),
];

const COLUMNS: &[Column] = &[
    Column::new("staff_id", "Staff ID", ColumnType::Text),
    Column::new("full_name", "Name", ColumnType::Text),
    Column::new("role", "Role", ColumnType::Text),
    Column::new("department", "Department", ColumnType::Text),
    Column::new("phone", "Phone", ColumnType::Phone),
    Column::new("email", "Email", ColumnType::Text),
];

const FORM: &[FieldSpec] = &[
    FieldSpec::required("staff_id", "Staff ID", FieldKind::Text),
    FieldSpec::required("first_name", "First Name", FieldKind::Text),
    FieldSpec::required("last_name", "Last Name", FieldKind::Text),
    FieldSpec::required("role", "Role", FieldKind::Text),
    FieldSpec::optional("department", "Department", FieldKind::Text),
    FieldSpec::required("phone", "Phone", FieldKind::Phone),
    FieldSpec::optional("email", "Email", FieldKind::Email),
    FieldSpec::optional("schedule", "Schedule", FieldKind::TextArea),
    FieldSpec::optional("is_active", "Active", FieldKind::Checkbox).checked_by_default(),
];

const QUICK_FILTERS: &[QuickFilter] = &[
    QuickFilter { key: "medical", label: "Medical Staff", path: "medical_staff", param: None },
    QuickFilter { key: "department", label: "By Department", path: "by_department", param: Some("department") },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StaffMembers;

impl Resource for StaffMembers {
    fn path(&self) -> &'static str {
        "staff"
    }

    fn singular(&self) -> &'static str {
        "Staff member"
    }

    fn plural(&self) -> &'static str {
        "staff"
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn form_schema(&self) -> &'static [FieldSpec] {
        FORM
    }

    fn create_title(&self) -> &'static str {
        "Add New Staff Member"
    }

    fn edit_title(&self) -> &'static str {
        "Edit Staff Member"
    }

    fn label(&self, record: &Value) -> String {
        Staff::from_record(record)
            .map(|s| s.display_name())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "this staff member".to_string())
    }

    fn detail(&self, record: &Value) -> DetailView {
        let member = Staff::from_record(record).unwrap_or_default();
        let status = if member.is_active {
            Cell::Badge { label: "Active".to_string(), tone: Tone::Success }
        } else {
            Cell::Badge { label: "Inactive".to_string(), tone: Tone::Danger }
        };

        DetailView {
            title: member.display_name(),
            record_id: member.id,
            fields: vec![
                text_field("ID", member.staff_id.as_str()),
                text_field("Name", member.display_name()),
                text_field("Role", member.role.as_str()),
                text_field("Department", member.department.clone().unwrap_or_default()),
                text_field("Phone", format_phone(member.phone.as_deref())),
                detail_field(record, "email", "Email", ColumnType::Text),
                detail_field(record, "hire_date", "Hire Date", ColumnType::Date),
                detail_field(record, "is_medical_staff", "Medical Staff", ColumnType::Boolean),
                DetailField { label: "Status", value: status },
            ],
            notes: member.schedule.filter(|s| !s.is_empty()).map(|s| ("Schedule", s)),
            actions: Vec::new(),
        }
    }

    fn filter_keys(&self) -> &'static [&'static str] {
        &["department"]
    }

    fn filter_options(&self, key: &str) -> &'static [(&'static str, &'static str)] {
        match key {
            "department" => DEPARTMENTS,
            _ => &[],
        }
    }

    fn quick_filters(&self) -> &'static [QuickFilter] {
        QUICK_FILTERS
    }

    fn validate(&self, form: &FormState) -> Result<(), String> {
        validate_contact(form)
    }
}
