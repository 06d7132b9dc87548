//! Controller scenarios against a mock backend and a recording surface.

use std::rc::Rc;

use serde_json::{json, Value};

use super::*;
use crate::client::{ClientConfig, Method};
use crate::resources::{Invoices, Patients, StaffMembers};
use crate::surface::NoticeKind;
use crate::table::{RowView, TableView};
use crate::testing::{envelope, json_response, MockTransport, RecordingSurface, Reply, SurfaceEvent};

struct Harness {
    mock: Rc<MockTransport>,
    surface: Rc<RecordingSurface>,
    controller: ListViewController,
}

fn harness(resource: Rc<dyn Resource>) -> Harness {
    let mock = Rc::new(MockTransport::new());
    let surface = Rc::new(RecordingSurface::new());
    let api = ApiClient::new(ClientConfig::default(), mock.clone(), "csrftoken=t0ken");
    let controller = ListViewController::new(api, resource, surface.clone());
    Harness { mock, surface, controller }
}

fn patient(id: u64, name: &str) -> Value {
    json!({"id": id, "unique_id": format!("P-{}", id), "full_name": name, "is_admitted": false})
}

fn labels(table: &TableView) -> Vec<String> {
    table
        .rows
        .iter()
        .filter_map(|row| match row {
            RowView::Record { label, .. } => Some(label.clone()),
            RowView::Placeholder { .. } => None,
        })
        .collect()
}

fn calls_after<'a>(calls: &'a [String], marker: &str) -> &'a [String] {
    let index = calls.iter().position(|c| c == marker).expect("marker call issued");
    &calls[index + 1..]
}

// ========================
// Loading
// ========================

#[tokio::test]
async fn test_search_resets_page_and_renders_rows() {
    let h = harness(Rc::new(Patients));
    h.mock.on(
        Method::Get,
        "/api/patients/?page=3",
        Reply::json(200, envelope(json!([patient(9, "Zed Ray")]), true, false)),
    );
    h.controller.load(3).await;
    assert_eq!(h.controller.current_page(), 3);

    h.mock.on(
        Method::Get,
        "/api/patients/?search=Smith&page=1",
        Reply::json(200, envelope(json!([patient(1, "Al Smith"), patient(2, "Bo Smith")]), false, false)),
    );
    h.controller.search("Smith").await;

    assert_eq!(h.controller.current_page(), 1);
    assert_eq!(h.controller.query().search_text, "Smith");
    assert_eq!(h.mock.calls().last().map(String::as_str), Some("GET /api/patients/?search=Smith&page=1"));

    let table = h.surface.tables().pop().expect("table rendered");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(labels(&table), vec!["Al Smith", "Bo Smith"]);
    assert_eq!(table.headers.last(), Some(&"Actions"));

    // no neighbours -> no pagination control
    assert_eq!(h.surface.paginations().last(), Some(&None));
    assert_eq!(h.controller.phase(), ListPhase::Loaded);
}

#[tokio::test]
async fn test_empty_page_renders_single_placeholder() {
    let h = harness(Rc::new(Patients));
    h.mock.on(Method::Get, "/api/patients/?page=1", Reply::json(200, envelope(json!([]), false, false)));

    h.controller.load(1).await;

    let table = h.surface.tables().pop().unwrap();
    assert_eq!(
        table.rows,
        vec![RowView::Placeholder { message: "No items found".to_string(), colspan: Patients.columns().len() + 1 }]
    );
}

#[tokio::test]
async fn test_stale_page_response_is_discarded() {
    let h = harness(Rc::new(Patients));
    let (page_one, release_one) = Reply::gated();
    let (page_two, release_two) = Reply::gated();
    h.mock.on(Method::Get, "/api/patients/?page=1", page_one);
    h.mock.on(Method::Get, "/api/patients/?page=2", page_two);

    tokio::join!(h.controller.load(1), h.controller.load(2), async {
        release_two
            .send(json_response(200, envelope(json!([patient(20, "Page Two")]), true, true)))
            .unwrap();
        tokio::task::yield_now().await;
        release_one
            .send(json_response(200, envelope(json!([patient(10, "Page One")]), false, true)))
            .unwrap();
    });

    let tables = h.surface.tables();
    assert_eq!(tables.len(), 1);
    assert_eq!(labels(&tables[0]), vec!["Page Two"]);
    assert_eq!(h.controller.current_page(), 2);

    let pagination = h.surface.paginations().pop().flatten().expect("pagination shown");
    assert_eq!(pagination.current, 2);
    assert_eq!(pagination.previous.target, Some(1));
    assert_eq!(pagination.next.target, Some(3));

    // only the winning request turns the indicator off
    assert_eq!(h.surface.count(&SurfaceEvent::Loading(false)), 1);
}

#[tokio::test]
async fn test_failed_load_keeps_rows_and_alerts() {
    let h = harness(Rc::new(Patients));
    h.mock.on(
        Method::Get,
        "/api/patients/?page=1",
        Reply::json(200, envelope(json!([patient(1, "Ann Lee")]), false, true)),
    );
    h.mock.on(Method::Get, "/api/patients/?page=2", Reply::status(500, "Internal Server Error", ""));

    h.controller.load(1).await;
    h.controller.load(2).await;

    assert_eq!(h.controller.phase(), ListPhase::LoadFailed);
    assert_eq!(h.controller.current_page(), 1);
    assert_eq!(h.surface.tables().len(), 1);

    let notice = h.surface.notices().pop().expect("alert shown");
    assert_eq!(notice.kind, NoticeKind::Alert);
    assert_eq!(notice.message, "Failed to load patients: HTTP error! status: 500 Internal Server Error");
}

#[tokio::test]
async fn test_set_filter_replaces_query() {
    let h = harness(Rc::new(Invoices));
    h.mock.on(Method::Get, "/api/invoices/?page=1&status=Paid", Reply::json(200, envelope(json!([]), false, false)));

    h.controller.set_filter("status", Some("Paid")).await;
    h.controller.set_filter("colour", Some("red")).await;

    assert_eq!(h.mock.calls(), vec!["GET /api/invoices/?page=1&status=Paid"]);
    assert_eq!(h.controller.query().extra_filters.get("status").map(String::as_str), Some("Paid"));
}

// ========================
// Quick filters
// ========================

#[tokio::test]
async fn test_quick_filter_renders_unpaged() {
    let h = harness(Rc::new(Invoices));
    h.mock.on(
        Method::Get,
        "/api/invoices/unpaid/",
        Reply::json(200, json!([{"id": 5, "paid": false}, {"id": 6, "paid": false}])),
    );

    h.controller.quick_filter("unpaid", None).await;

    assert_eq!(h.controller.active_quick_filter(), Some("unpaid"));
    assert_eq!(h.surface.tables().pop().unwrap().rows.len(), 2);
    assert_eq!(h.surface.paginations(), vec![None]);
}

#[tokio::test]
async fn test_empty_department_falls_back_to_paged_list() {
    let h = harness(Rc::new(StaffMembers));
    h.mock.on(Method::Get, "/api/staff/?page=1", Reply::json(200, envelope(json!([]), false, false)));

    h.controller.quick_filter("department", Some("")).await;

    assert_eq!(h.mock.calls(), vec!["GET /api/staff/?page=1"]);
    assert_eq!(h.controller.active_quick_filter(), None);
}

#[tokio::test]
async fn test_action_under_quick_filter_reruns_quick_filter() {
    let h = harness(Rc::new(Invoices));
    h.mock.on(Method::Get, "/api/invoices/unpaid/", Reply::json(200, json!([{"id": 5, "paid": false}])));
    h.mock.on(Method::Post, "/api/invoices/5/mark_paid/", Reply::json(200, json!({"status": "paid"})));
    h.mock.on(Method::Get, "/api/invoices/unpaid/", Reply::json(200, json!([])));

    h.controller.quick_filter("unpaid", None).await;
    h.controller.run_action("mark_paid", 5).await;

    assert_eq!(
        h.mock.calls(),
        vec![
            "GET /api/invoices/unpaid/",
            "POST /api/invoices/5/mark_paid/",
            "GET /api/invoices/unpaid/",
        ]
    );
    let mark = &h.mock.requests()[1];
    assert_eq!(mark.body.as_deref(), Some("{}"));
    assert_eq!(mark.header("X-CSRFToken"), Some("t0ken"));
    assert!(h.surface.notices().iter().any(|n| n.message == "Invoice marked as paid!"));
}

#[tokio::test]
async fn test_page_load_supersedes_pending_quick_filter() {
    let h = harness(Rc::new(Invoices));
    let (unpaid, release) = Reply::gated();
    h.mock.on(Method::Get, "/api/invoices/unpaid/", unpaid);
    h.mock.on(
        Method::Get,
        "/api/invoices/?page=1",
        Reply::json(200, envelope(json!([{"id": 9, "paid": true}]), false, false)),
    );

    tokio::join!(h.controller.quick_filter("unpaid", None), async {
        h.controller.load(1).await;
        release
            .send(json_response(200, json!([{"id": 5, "paid": false}, {"id": 6, "paid": false}])))
            .unwrap();
    });

    let tables = h.surface.tables();
    assert_eq!(tables.len(), 1);
    assert!(matches!(tables[0].rows.as_slice(), [RowView::Record { id: 9, .. }]));
    assert_eq!(h.controller.active_quick_filter(), None);
    assert_eq!(h.controller.phase(), ListPhase::Loaded);
    assert_eq!(h.surface.count(&SurfaceEvent::Loading(false)), 1);
}

// ========================
// Forms
// ========================

#[tokio::test]
async fn test_edit_submit_patches_and_reloads_once() {
    let h = harness(Rc::new(Invoices));
    h.mock.on(Method::Get, "/api/invoices/?page=1", Reply::json(200, envelope(json!([]), false, false)));
    h.controller.load(1).await;

    h.mock.on(
        Method::Get,
        "/api/invoices/42/",
        Reply::json(200, json!({
            "id": 42, "patient": 3, "issue_date": "2024-01-01", "due_date": "2024-02-01",
            "total_amount": "99.50", "paid": false, "insurance_claimed": true, "details": null
        })),
    );
    h.controller.open_edit(42).await;

    assert_eq!(h.controller.form_mode(), Some(FormMode::Edit));
    let opened = h.surface.opened_forms().pop().expect("form opened");
    assert_eq!(opened.title, "Edit Invoice");
    assert_eq!(opened.resource_id, Some(42));

    h.surface.type_into("total_amount", "120.00");
    h.mock.on(Method::Patch, "/api/invoices/42/", Reply::json(200, json!({"id": 42})));
    h.mock.on(
        Method::Get,
        "/api/invoices/?page=1",
        Reply::json(200, envelope(json!([{"id": 42, "paid": false, "total_amount": "120.00"}]), false, false)),
    );

    h.controller.submit().await;

    let calls = h.mock.calls();
    assert_eq!(h.mock.count(Method::Patch, "/api/invoices/42/"), 1);
    assert_eq!(calls_after(&calls, "PATCH /api/invoices/42/"), ["GET /api/invoices/?page=1".to_string()]);

    let patch = h.mock.requests().into_iter().find(|r| r.method == Method::Patch).unwrap();
    let body: Value = serde_json::from_str(patch.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["total_amount"], "120.00");
    assert_eq!(body["insurance_claimed"], true);
    assert_eq!(body["details"], Value::Null);

    assert!(!h.surface.is_form_open());
    assert_eq!(h.controller.form_mode(), None);
    assert!(h.surface.notices().iter().any(|n| n.message == "Invoice saved successfully!"));
}

#[tokio::test]
async fn test_failed_submit_keeps_form_for_resubmission() {
    let h = harness(Rc::new(Patients));
    h.controller.open_create();
    assert_eq!(h.controller.form_mode(), Some(FormMode::Create));
    h.surface.type_into("unique_id", "P-1");
    h.surface.type_into("first_name", "Ann");
    h.surface.type_into("phone", "5551234567");

    h.mock.on(
        Method::Post,
        "/api/patients/",
        Reply::status(400, "Bad Request", r#"{"detail":"Patient ID already exists."}"#),
    );
    h.controller.submit().await;

    assert!(h.surface.is_form_open());
    assert_eq!(h.controller.form_mode(), Some(FormMode::Create));
    let notice = h.surface.notices().pop().unwrap();
    assert_eq!(notice.kind, NoticeKind::Toast);
    assert_eq!(notice.message, "Error: Patient ID already exists.");
    assert_eq!(h.mock.count(Method::Get, "/api/patients/?page=1"), 0);

    // the form re-enables and the same submit goes through on retry
    let last_disabled = h.surface.events().into_iter().rev().find(|e| matches!(e, SurfaceEvent::FormDisabled(_)));
    assert_eq!(last_disabled, Some(SurfaceEvent::FormDisabled(false)));
    h.surface.type_into("unique_id", "P-2");
    h.mock.on(Method::Post, "/api/patients/", Reply::json(201, json!({"id": 77})));
    h.mock.on(Method::Get, "/api/patients/?page=1", Reply::json(200, envelope(json!([patient(77, "Ann")]), false, false)));
    h.controller.submit().await;

    assert!(!h.surface.is_form_open());
    assert_eq!(h.mock.count(Method::Post, "/api/patients/"), 2);
    assert_eq!(h.mock.count(Method::Get, "/api/patients/?page=1"), 1);
}

#[tokio::test]
async fn test_invalid_email_blocks_submit() {
    let h = harness(Rc::new(Patients));
    h.controller.open_create();
    h.surface.type_into("email", "nobody-at-example");

    h.controller.submit().await;

    assert!(h.mock.requests().is_empty());
    assert!(h.surface.is_form_open());
    assert!(h.surface.notices()[0].message.contains("not a valid email"));
}

#[tokio::test]
async fn test_concurrent_submit_sends_once() {
    let h = harness(Rc::new(Patients));
    h.controller.open_create();
    let (created, release) = Reply::gated();
    h.mock.on(Method::Post, "/api/patients/", created);
    h.mock.on(Method::Get, "/api/patients/?page=1", Reply::json(200, envelope(json!([]), false, false)));

    tokio::join!(h.controller.submit(), h.controller.submit(), async {
        release.send(json_response(201, json!({"id": 1}))).unwrap();
    });

    assert_eq!(h.mock.count(Method::Post, "/api/patients/"), 1);
    assert_eq!(h.mock.count(Method::Get, "/api/patients/?page=1"), 1);
}

#[tokio::test]
async fn test_finished_submit_leaves_newer_form_open() {
    let h = harness(Rc::new(Patients));
    h.controller.open_create();
    let (created, release) = Reply::gated();
    h.mock.on(Method::Post, "/api/patients/", created);
    h.mock.on(Method::Get, "/api/patients/?page=1", Reply::json(200, envelope(json!([]), false, false)));

    tokio::join!(h.controller.submit(), async {
        h.controller.close_form();
        h.controller.open_create();
        h.surface.type_into("first_name", "Cy");
        release.send(json_response(201, json!({"id": 1}))).unwrap();
    });

    // the first write still reports and reloads
    assert!(h.surface.notices().iter().any(|n| n.message == "Patient saved successfully!"));
    assert_eq!(h.mock.count(Method::Get, "/api/patients/?page=1"), 1);

    // but the form opened afterwards keeps its input
    assert!(h.surface.is_form_open());
    assert_eq!(h.controller.form_mode(), Some(FormMode::Create));
    assert_eq!(h.surface.count(&SurfaceEvent::FormClosed), 1);

    h.mock.on(Method::Post, "/api/patients/", Reply::json(201, json!({"id": 2})));
    h.mock.on(Method::Get, "/api/patients/?page=1", Reply::json(200, envelope(json!([]), false, false)));
    h.controller.submit().await;

    assert_eq!(h.mock.count(Method::Post, "/api/patients/"), 2);
    let second = h.mock.requests().into_iter().rev().find(|r| r.method == Method::Post).unwrap();
    let body: Value = serde_json::from_str(second.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["first_name"], "Cy");
    assert!(!h.surface.is_form_open());
}

#[tokio::test]
async fn test_superseded_edit_fetch_is_dropped() {
    let h = harness(Rc::new(Patients));
    let (slow, release) = Reply::gated();
    h.mock.on(Method::Get, "/api/patients/5/", slow);
    h.mock.on(Method::Get, "/api/patients/6/", Reply::json(200, patient(6, "Bo Chen")));

    tokio::join!(h.controller.open_edit(5), async {
        h.controller.open_edit(6).await;
        release.send(json_response(200, patient(5, "Ann Lee"))).unwrap();
    });

    let opened = h.surface.opened_forms();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].resource_id, Some(6));
    assert_eq!(h.controller.form_mode(), Some(FormMode::Edit));
}

#[tokio::test]
async fn test_edit_fetch_superseded_by_create_is_dropped() {
    let h = harness(Rc::new(Patients));
    let (slow, release) = Reply::gated();
    h.mock.on(Method::Get, "/api/patients/5/", slow);

    tokio::join!(h.controller.open_edit(5), async {
        h.controller.open_create();
        release.send(json_response(200, patient(5, "Ann Lee"))).unwrap();
    });

    let opened = h.surface.opened_forms();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].resource_id, None);
    assert_eq!(h.controller.form_mode(), Some(FormMode::Create));
}

#[tokio::test]
async fn test_failed_edit_fetch_does_not_open_form() {
    let h = harness(Rc::new(Patients));

    h.controller.open_edit(5).await;

    assert!(h.surface.opened_forms().is_empty());
    assert_eq!(h.controller.form_mode(), None);
    let notice = h.surface.notices().pop().unwrap();
    assert_eq!(notice.kind, NoticeKind::Alert);
    assert!(notice.message.starts_with("Failed to load patient"));
}

#[tokio::test]
async fn test_submit_without_open_form_is_ignored() {
    let h = harness(Rc::new(Patients));
    h.controller.submit().await;
    assert!(h.mock.requests().is_empty());
}

#[tokio::test]
async fn test_view_shows_detail() {
    let h = harness(Rc::new(Patients));
    h.mock.on(
        Method::Get,
        "/api/patients/3/",
        Reply::json(200, json!({"id": 3, "full_name": "Ann Lee", "phone": "5551234567", "is_admitted": true})),
    );

    h.controller.handle_action(ActionKind::View, 3, "Ann Lee").await;

    let detail = h.surface.details().pop().expect("detail shown");
    assert_eq!(detail.title, "Ann Lee");
    assert!(detail.fields.iter().any(|f| f.label == "Phone" && f.value.text() == "(555) 123-4567"));
}

// ========================
// Confirmation
// ========================

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let h = harness(Rc::new(Patients));

    h.controller.confirm().await;
    assert!(h.mock.requests().is_empty());

    h.controller.request_delete(7, "Ann Lee");
    assert!(h.mock.requests().is_empty());
    assert!(h.controller.has_pending_confirmation());
    assert!(h.surface.prompts()[0].message.contains("\"Ann Lee\""));

    h.mock.on(Method::Delete, "/api/patients/7/", Reply::status(204, "No Content", ""));
    h.mock.on(Method::Get, "/api/patients/?page=1", Reply::json(200, envelope(json!([]), false, false)));
    h.controller.confirm().await;
    h.controller.confirm().await;

    assert_eq!(h.mock.calls(), vec!["DELETE /api/patients/7/", "GET /api/patients/?page=1"]);
    assert_eq!(h.surface.count(&SurfaceEvent::ConfirmClosed), 1);
    assert!(h.surface.notices().iter().any(|n| n.message == "Patient deleted successfully!"));
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let h = harness(Rc::new(Patients));

    h.controller.handle_action(ActionKind::Delete, 7, "Ann Lee").await;
    h.controller.cancel_confirm();
    h.controller.confirm().await;

    assert!(h.mock.requests().is_empty());
    assert!(!h.controller.has_pending_confirmation());
}

#[tokio::test]
async fn test_failed_delete_leaves_list() {
    let h = harness(Rc::new(Patients));
    h.mock.on(
        Method::Get,
        "/api/patients/?page=1",
        Reply::json(200, envelope(json!([patient(7, "Ann Lee")]), false, false)),
    );
    h.controller.load(1).await;

    h.mock.on(Method::Delete, "/api/patients/7/", Reply::network("connection reset"));
    h.controller.request_delete(7, "Ann Lee");
    h.controller.confirm().await;

    assert_eq!(h.mock.count(Method::Get, "/api/patients/?page=1"), 1);
    assert_eq!(h.surface.tables().len(), 1);
    assert_eq!(h.surface.notices().pop().unwrap().message, "Error: connection reset");
}

#[tokio::test]
async fn test_discharge_waits_for_confirmation() {
    let h = harness(Rc::new(Patients));
    h.mock.on(Method::Post, "/api/patients/3/discharge/", Reply::json(200, json!({"status": "discharged"})));
    h.mock.on(Method::Get, "/api/patients/?page=1", Reply::json(200, envelope(json!([]), false, false)));

    h.controller.handle_action(ActionKind::Custom("discharge"), 3, "Ann Lee").await;
    assert!(h.mock.requests().is_empty());
    assert_eq!(h.surface.prompts()[0].message, "Are you sure you want to discharge this patient?");

    h.controller.confirm().await;
    assert_eq!(h.mock.calls(), vec!["POST /api/patients/3/discharge/", "GET /api/patients/?page=1"]);
}
