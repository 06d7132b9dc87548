//! Table and Pagination View-Models
//!
//! Pure builders turning JSON records into row view-models and paged flags
//! into a three-segment pagination control. Renderers consume these; no
//! markup is produced here.

use serde_json::Value;

use crate::format::{format_currency_value, format_date, format_datetime, format_phone};
use crate::query::RecordId;

pub const NO_ITEMS_MESSAGE: &str = "No items found";

/// Badge / button colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Primary => "primary",
            Tone::Secondary => "secondary",
            Tone::Success => "success",
            Tone::Danger => "danger",
            Tone::Warning => "warning",
            Tone::Info => "info",
        }
    }
}

/// Badge colour for an appointment status.
pub fn status_tone(status: &str) -> Tone {
    match status {
        "Scheduled" => Tone::Primary,
        "Completed" => Tone::Success,
        "Cancelled" => Tone::Danger,
        _ => Tone::Secondary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Date,
    DateTime,
    Currency,
    Phone,
    /// Yes / No badge
    Boolean,
    /// Two-label badge, e.g. Paid / Unpaid
    Flag { yes: &'static str, no: &'static str },
    /// Status badge coloured by `status_tone`
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Field name; dots walk nested objects (`patient_detail.full_name`)
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ColumnType,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str, kind: ColumnType) -> Self {
        Self { key, label, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge { label: String, tone: Tone },
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Badge { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    /// Resource-specific action, looked up through `Resource::extra_action`
    Custom(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAction {
    pub kind: ActionKind,
    pub label: &'static str,
    pub tone: Tone,
}

impl RowAction {
    pub const VIEW: RowAction = RowAction { kind: ActionKind::View, label: "View", tone: Tone::Info };
    pub const EDIT: RowAction = RowAction { kind: ActionKind::Edit, label: "Edit", tone: Tone::Warning };
    pub const DELETE: RowAction = RowAction { kind: ActionKind::Delete, label: "Delete", tone: Tone::Danger };

    /// View / Edit / Delete
    pub fn standard() -> Vec<RowAction> {
        vec![Self::VIEW, Self::EDIT, Self::DELETE]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowView {
    Record {
        id: RecordId,
        /// Human label used in confirmation prompts
        label: String,
        cells: Vec<Cell>,
        actions: Vec<RowAction>,
    },
    Placeholder { message: String, colspan: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowView>,
}

/// Walk a dotted key through nested objects.
pub fn lookup<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(record, |current, part| current.get(part))
}

pub fn record_id(record: &Value) -> Option<RecordId> {
    record.get("id").and_then(Value::as_u64)
}

fn plain_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Format one field according to its column type; blanks become `-`.
pub fn format_cell(value: Option<&Value>, kind: ColumnType) -> Cell {
    let text = match kind {
        ColumnType::Text => plain_text(value),
        ColumnType::Date => Some(format_date(value.and_then(Value::as_str))),
        ColumnType::DateTime => Some(format_datetime(value.and_then(Value::as_str))),
        ColumnType::Currency => Some(format_currency_value(value)),
        ColumnType::Phone => Some(format_phone(value.and_then(Value::as_str))),
        ColumnType::Boolean => {
            return if is_truthy(value) {
                Cell::Badge { label: "Yes".to_string(), tone: Tone::Success }
            } else {
                Cell::Badge { label: "No".to_string(), tone: Tone::Danger }
            };
        }
        ColumnType::Flag { yes, no } => {
            return if is_truthy(value) {
                Cell::Badge { label: yes.to_string(), tone: Tone::Success }
            } else {
                Cell::Badge { label: no.to_string(), tone: Tone::Warning }
            };
        }
        ColumnType::Status => {
            return match plain_text(value) {
                Some(status) => Cell::Badge { tone: status_tone(&status), label: status },
                None => Cell::Text("-".to_string()),
            };
        }
    };

    match text {
        Some(t) if !t.is_empty() => Cell::Text(t),
        _ => Cell::Text("-".to_string()),
    }
}

/// Build row view-models. When no record row remains (no items, or none with a
/// numeric id) the result is one placeholder spanning every column, plus the
/// action column when `actions` is given.
pub fn build_table_rows(
    items: &[Value],
    columns: &[Column],
    label: &dyn Fn(&Value) -> String,
    actions: Option<&dyn Fn(&Value) -> Vec<RowAction>>,
) -> Vec<RowView> {
    let rows: Vec<RowView> = items
        .iter()
        .filter_map(|item| {
            let Some(id) = record_id(item) else {
                log::warn!("[TABLE] skipping record without numeric id");
                return None;
            };
            Some(RowView::Record {
                id,
                label: label(item),
                cells: columns.iter().map(|col| format_cell(lookup(item, col.key), col.kind)).collect(),
                actions: actions.map(|render| render(item)).unwrap_or_default(),
            })
        })
        .collect();

    if rows.is_empty() {
        let colspan = columns.len() + usize::from(actions.is_some());
        return vec![RowView::Placeholder { message: NO_ITEMS_MESSAGE.to_string(), colspan }];
    }
    rows
}

/// Headers plus rows for a whole table.
pub fn build_table(
    items: &[Value],
    columns: &[Column],
    label: &dyn Fn(&Value) -> String,
    actions: Option<&dyn Fn(&Value) -> Vec<RowAction>>,
) -> TableView {
    let mut headers: Vec<&'static str> = columns.iter().map(|col| col.label).collect();
    if actions.is_some() {
        headers.push("Actions");
    }
    TableView {
        headers,
        rows: build_table_rows(items, columns, label, actions),
    }
}

// ========================
// Pagination
// ========================

/// One pagination segment; `target == None` means disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub label: &'static str,
    pub target: Option<u32>,
}

impl PageLink {
    pub fn is_disabled(&self) -> bool {
        self.target.is_none()
    }
}

/// Previous / current / Next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub previous: PageLink,
    pub current: u32,
    pub next: PageLink,
}

/// `None` when there is neither a previous nor a next page.
pub fn build_pagination(has_previous: bool, has_next: bool, page: u32) -> Option<PaginationView> {
    if !has_previous && !has_next {
        return None;
    }
    Some(PaginationView {
        previous: PageLink {
            label: "Previous",
            target: (has_previous && page > 1).then(|| page - 1),
        },
        current: page,
        next: PageLink {
            label: "Next",
            target: has_next.then(|| page + 1),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLUMNS: &[Column] = &[
        Column::new("full_name", "Name", ColumnType::Text),
        Column::new("date_of_birth", "DOB", ColumnType::Date),
        Column::new("email", "Email", ColumnType::Text),
    ];

    fn name(record: &Value) -> String {
        record["full_name"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn test_empty_rows_placeholder_span() {
        let with_actions = build_table_rows(&[], COLUMNS, &name, Some(&|_: &Value| RowAction::standard()));
        assert_eq!(
            with_actions,
            vec![RowView::Placeholder { message: NO_ITEMS_MESSAGE.to_string(), colspan: 4 }]
        );

        let without_actions = build_table_rows(&[], COLUMNS, &name, None);
        assert_eq!(
            without_actions,
            vec![RowView::Placeholder { message: NO_ITEMS_MESSAGE.to_string(), colspan: 3 }]
        );
    }

    #[test]
    fn test_records_without_ids_fall_back_to_placeholder() {
        let items = vec![json!({"full_name": "No Id"}), json!({"id": "7", "full_name": "String Id"})];
        let rows = build_table_rows(&items, COLUMNS, &name, Some(&|_: &Value| RowAction::standard()));
        assert_eq!(rows, vec![RowView::Placeholder { message: NO_ITEMS_MESSAGE.to_string(), colspan: 4 }]);

        let mixed = vec![json!({"full_name": "No Id"}), json!({"id": 2, "full_name": "Bo Chen"})];
        let rows = build_table_rows(&mixed, COLUMNS, &name, None);
        assert_eq!(rows.len(), 1);
        assert!(matches!(&rows[0], RowView::Record { id: 2, .. }));
    }

    #[test]
    fn test_rows_format_cells() {
        let items = vec![json!({"id": 4, "full_name": "Ann Lee", "date_of_birth": "1990-02-03", "email": null})];
        let rows = build_table_rows(&items, COLUMNS, &name, Some(&|_: &Value| vec![RowAction::EDIT]));

        let RowView::Record { id, label, cells, actions } = &rows[0] else {
            panic!("expected a record row");
        };
        assert_eq!(*id, 4);
        assert_eq!(label, "Ann Lee");
        assert_eq!(
            cells,
            &vec![
                Cell::Text("Ann Lee".to_string()),
                Cell::Text("Feb 3, 1990".to_string()),
                Cell::Text("-".to_string()),
            ]
        );
        assert_eq!(actions, &vec![RowAction::EDIT]);
    }

    #[test]
    fn test_nested_keys_and_badges() {
        let record = json!({"id": 1, "patient_detail": {"full_name": "Bo Chen"}, "paid": false, "status": "Completed"});
        assert_eq!(format_cell(lookup(&record, "patient_detail.full_name"), ColumnType::Text).text(), "Bo Chen");
        assert_eq!(lookup(&record, "patient_detail.missing"), None);
        assert_eq!(
            format_cell(lookup(&record, "paid"), ColumnType::Flag { yes: "Paid", no: "Unpaid" }),
            Cell::Badge { label: "Unpaid".to_string(), tone: Tone::Warning }
        );
        assert_eq!(
            format_cell(lookup(&record, "status"), ColumnType::Status),
            Cell::Badge { label: "Completed".to_string(), tone: Tone::Success }
        );
        assert_eq!(status_tone("No-show"), Tone::Secondary);
    }

    #[test]
    fn test_pagination_hidden_without_neighbours() {
        assert_eq!(build_pagination(false, false, 1), None);
        assert_eq!(build_pagination(false, false, 7), None);
    }

    #[test]
    fn test_pagination_segments() {
        let first = build_pagination(false, true, 1).unwrap();
        assert!(first.previous.is_disabled());
        assert_eq!(first.current, 1);
        assert_eq!(first.next.target, Some(2));

        let last = build_pagination(true, false, 5).unwrap();
        assert_eq!(last.previous.target, Some(4));
        assert!(last.next.is_disabled());
    }
}
