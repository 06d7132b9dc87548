//! Test doubles: a routed mock transport and a surface that records every call.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::client::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::form::{FieldValue, FieldValues, FormView};
use crate::surface::{ConfirmPrompt, DetailView, Notice, ViewSurface};
use crate::table::{PaginationView, TableView};

pub type RawReply = Result<HttpResponse, String>;

pub enum Reply {
    Ready(RawReply),
    /// Resolves when the paired sender fires
    Gated(oneshot::Receiver<RawReply>),
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Reply::Ready(json_response(status, body))
    }

    pub fn status(status: u16, status_text: &str, body: &str) -> Self {
        Reply::Ready(Ok(HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }))
    }

    pub fn network(message: &str) -> Self {
        Reply::Ready(Err(message.to_string()))
    }

    pub fn gated() -> (Self, oneshot::Sender<RawReply>) {
        let (tx, rx) = oneshot::channel();
        (Reply::Gated(rx), tx)
    }
}

pub fn json_response(status: u16, body: Value) -> RawReply {
    Ok(HttpResponse { status, status_text: String::new(), body: body.to_string() })
}

/// `{results, next, previous}` envelope
pub fn envelope(results: Value, has_previous: bool, has_next: bool) -> Value {
    serde_json::json!({
        "results": results,
        "previous": if has_previous { Value::from("prev") } else { Value::Null },
        "next": if has_next { Value::from("next") } else { Value::Null },
    })
}

#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<String, VecDeque<Reply>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

fn route_key(method: Method, url: &str) -> String {
    format!("{} {}", method.as_str(), url)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method url`; replies for one route are used in order.
    pub fn on(&self, method: Method, url: &str, reply: Reply) {
        self.routes.borrow_mut().entry(route_key(method, url)).or_default().push_back(reply);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| route_key(r.method, &r.url)).collect()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        let key = route_key(method, url);
        self.calls().iter().filter(|call| **call == key).count()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let key = route_key(request.method, &request.url);
        self.requests.borrow_mut().push(request);

        let reply = self.routes.borrow_mut().get_mut(&key).and_then(VecDeque::pop_front);
        match reply {
            Some(Reply::Ready(raw)) => raw,
            Some(Reply::Gated(rx)) => rx.await.unwrap_or_else(|_| Err("gate dropped".to_string())),
            None => Ok(HttpResponse { status: 404, status_text: "Not Found".to_string(), body: String::new() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Loading(bool),
    Table(TableView),
    Pagination(Option<PaginationView>),
    FormOpened(FormView),
    FormClosed,
    FormDisabled(bool),
    Detail(DetailView),
    Confirm(ConfirmPrompt),
    ConfirmClosed,
    Notice(Notice),
}

/// Records calls and keeps the open form so tests can type into it.
#[derive(Default)]
pub struct RecordingSurface {
    events: RefCell<Vec<SurfaceEvent>>,
    form: RefCell<Option<FormView>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    pub fn tables(&self) -> Vec<TableView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }

    pub fn paginations(&self) -> Vec<Option<PaginationView>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Pagination(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn opened_forms(&self) -> Vec<FormView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::FormOpened(form) => Some(form),
                _ => None,
            })
            .collect()
    }

    pub fn details(&self) -> Vec<DetailView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Detail(detail) => Some(detail),
                _ => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Confirm(prompt) => Some(prompt),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &SurfaceEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == wanted).count()
    }

    pub fn is_form_open(&self) -> bool {
        self.form.borrow().is_some()
    }

    /// Simulate the user typing into the open form.
    pub fn type_into(&self, name: &str, text: &str) {
        if let Some(form) = self.form.borrow_mut().as_mut() {
            assert!(form.set_value(name, FieldValue::Text(text.to_string())), "no field {}", name);
        }
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl ViewSurface for RecordingSurface {
    fn set_loading(&self, loading: bool) {
        self.record(SurfaceEvent::Loading(loading));
    }

    fn render_table(&self, table: TableView) {
        self.record(SurfaceEvent::Table(table));
    }

    fn render_pagination(&self, pagination: Option<PaginationView>) {
        self.record(SurfaceEvent::Pagination(pagination));
    }

    fn open_form(&self, form: FormView) {
        *self.form.borrow_mut() = Some(form.clone());
        self.record(SurfaceEvent::FormOpened(form));
    }

    fn close_form(&self) {
        *self.form.borrow_mut() = None;
        self.record(SurfaceEvent::FormClosed);
    }

    fn read_form(&self) -> FieldValues {
        self.form.borrow().as_ref().map(FormView::values).unwrap_or_default()
    }

    fn set_form_disabled(&self, disabled: bool) {
        if let Some(form) = self.form.borrow_mut().as_mut() {
            form.set_disabled(disabled);
        }
        self.record(SurfaceEvent::FormDisabled(disabled));
    }

    fn show_detail(&self, detail: DetailView) {
        self.record(SurfaceEvent::Detail(detail));
    }

    fn ask_confirm(&self, prompt: ConfirmPrompt) {
        self.record(SurfaceEvent::Confirm(prompt));
    }

    fn close_confirm(&self) {
        self.record(SurfaceEvent::ConfirmClosed);
    }

    fn notify(&self, notice: Notice) {
        self.record(SurfaceEvent::Notice(notice));
    }
}
