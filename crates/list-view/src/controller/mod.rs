//! List-View Controller
//!
//! Per-resource state machine coordinating paged search, quick filters, the
//! create/edit form overlay and confirmation-gated deletes and actions.
//!
//! List fetches are numbered. Only the most recently issued fetch may write
//! to the surface; older responses are dropped when they arrive. Writes are
//! never applied locally: a successful write re-runs the current list fetch.
//!
//! All state lives behind a `RefCell` that is never held across an await,
//! so one instance can serve overlapping operations from event handlers.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::client::{ApiClient, ApiError};
use crate::form::{FormMode, FormState, FormView};
use crate::query::{ListQuery, PagedResult, RecordId};
use crate::resource::{ExtraAction, Resource};
use crate::surface::{ConfirmPrompt, Notice, ViewSurface};
use crate::table::{build_pagination, build_table, ActionKind, PaginationView, Tone};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

/// Which list the surface currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
enum ActiveList {
    Paged,
    Quick { key: &'static str, value: Option<String> },
}

/// Operation waiting for the user's confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Delete(RecordId),
    Action { key: &'static str, id: RecordId },
}

#[derive(Debug)]
struct FormSession {
    resource_id: Option<RecordId>,
    /// Value of `ControllerState::opened` when this form was opened
    generation: u64,
    submitting: bool,
}

#[derive(Debug)]
struct ControllerState {
    query: ListQuery,
    current_page: u32,
    phase: ListPhase,
    active: ActiveList,
    form: Option<FormSession>,
    pending: Option<Pending>,
    /// Sequence number of the last list fetch issued
    issued: u64,
    /// Bumped by every open, close, edit or view request; a single-record
    /// response or a submit completion only applies while it is current.
    opened: u64,
}

pub struct ListViewController {
    api: ApiClient,
    resource: Rc<dyn Resource>,
    surface: Rc<dyn ViewSurface>,
    state: RefCell<ControllerState>,
}

impl ListViewController {
    pub fn new(api: ApiClient, resource: Rc<dyn Resource>, surface: Rc<dyn ViewSurface>) -> Self {
        Self {
            api,
            resource,
            surface,
            state: RefCell::new(ControllerState {
                query: ListQuery::default(),
                current_page: 1,
                phase: ListPhase::Idle,
                active: ActiveList::Paged,
                form: None,
                pending: None,
                issued: 0,
                opened: 0,
            }),
        }
    }

    pub fn resource(&self) -> &dyn Resource {
        self.resource.as_ref()
    }

    pub fn phase(&self) -> ListPhase {
        self.state.borrow().phase
    }

    pub fn current_page(&self) -> u32 {
        self.state.borrow().current_page
    }

    pub fn query(&self) -> ListQuery {
        self.state.borrow().query.clone()
    }

    pub fn form_mode(&self) -> Option<FormMode> {
        self.state.borrow().form.as_ref().map(|session| {
            if session.resource_id.is_some() {
                FormMode::Edit
            } else {
                FormMode::Create
            }
        })
    }

    pub fn active_quick_filter(&self) -> Option<&'static str> {
        match &self.state.borrow().active {
            ActiveList::Quick { key, .. } => Some(*key),
            ActiveList::Paged => None,
        }
    }

    pub fn has_pending_confirmation(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    // ========================
    // List fetching
    // ========================

    /// New search text; filters are kept, page goes back to 1.
    pub async fn search(&self, text: &str) {
        {
            let mut state = self.state.borrow_mut();
            state.query = ListQuery {
                search_text: text.to_string(),
                page_number: 1,
                extra_filters: state.query.extra_filters.clone(),
            };
        }
        self.load(1).await;
    }

    /// Set or clear (`None` / empty) one of the resource's list filters, then load page 1.
    pub async fn set_filter(&self, key: &str, value: Option<&str>) {
        if !self.resource.filter_keys().contains(&key) {
            log::warn!("[LIST] {} has no filter named {}", self.resource.plural(), key);
            return;
        }
        {
            let mut state = self.state.borrow_mut();
            let mut query = state.query.at_page(1);
            match value.filter(|v| !v.is_empty()) {
                Some(v) => query.extra_filters.insert(key.to_string(), v.to_string()),
                None => query.extra_filters.remove(key),
            };
            state.query = query;
        }
        self.load(1).await;
    }

    /// Fetch `page` of the current query and render it if still the latest request.
    pub async fn load(&self, page: u32) {
        let page = page.max(1);
        let (seq, endpoint) = {
            let mut state = self.state.borrow_mut();
            state.active = ActiveList::Paged;
            state.query = state.query.at_page(page);
            let endpoint = self.resource.list_endpoint(&state.query);
            (Self::begin_fetch(&mut state), endpoint)
        };
        self.surface.set_loading(true);

        let result = self
            .api
            .get(&endpoint)
            .await
            .and_then(|body| PagedResult::from_envelope(body, page));

        if !self.is_latest(seq) {
            log::debug!("[LIST] dropping stale {} page {} (request #{})", self.resource.plural(), page, seq);
            return;
        }

        match result {
            Ok(paged) => {
                {
                    let mut state = self.state.borrow_mut();
                    state.phase = ListPhase::Loaded;
                    state.current_page = page;
                }
                log::debug!("[LIST] {} page {}: {} rows", self.resource.plural(), page, paged.items.len());
                let pagination = build_pagination(paged.has_previous, paged.has_next, page);
                self.render_items(&paged.items, pagination);
            }
            Err(e) => self.fail_load(e),
        }
        self.surface.set_loading(false);
    }

    /// Show a dedicated unpaged sub-resource instead of the paged list.
    ///
    /// A parameterised filter with no value falls back to the paged list.
    pub async fn quick_filter(&self, key: &str, value: Option<&str>) {
        let Some(filter) = self.resource.quick_filter(key) else {
            log::warn!("[LIST] {} has no quick filter named {}", self.resource.plural(), key);
            return;
        };
        let Some(endpoint) = filter.endpoint(self.resource.path(), value) else {
            self.load(1).await;
            return;
        };

        let seq = {
            let mut state = self.state.borrow_mut();
            state.active = ActiveList::Quick {
                key: filter.key,
                value: value.map(str::to_string),
            };
            Self::begin_fetch(&mut state)
        };
        self.surface.set_loading(true);

        let result = self.api.get(&endpoint).await.and_then(PagedResult::unpaged);

        if !self.is_latest(seq) {
            log::debug!("[LIST] dropping stale {} quick filter {} (request #{})", self.resource.plural(), key, seq);
            return;
        }

        match result {
            Ok(unpaged) => {
                self.state.borrow_mut().phase = ListPhase::Loaded;
                self.render_items(&unpaged.items, None);
            }
            Err(e) => self.fail_load(e),
        }
        self.surface.set_loading(false);
    }

    pub async fn clear_quick_filter(&self) {
        self.load(1).await;
    }

    /// Re-run whatever list is showing: the current page, or the active quick filter.
    pub async fn refresh(&self) {
        let (active, page) = {
            let state = self.state.borrow();
            (state.active.clone(), state.current_page)
        };
        match active {
            ActiveList::Paged => self.load(page).await,
            ActiveList::Quick { key, value } => self.quick_filter(key, value.as_deref()).await,
        }
    }

    fn begin_fetch(state: &mut ControllerState) -> u64 {
        state.issued += 1;
        state.phase = ListPhase::Loading;
        state.issued
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.state.borrow().issued == seq
    }

    fn render_items(&self, items: &[Value], pagination: Option<PaginationView>) {
        let resource = self.resource.as_ref();
        let label = |record: &Value| resource.label(record);
        let actions = |record: &Value| resource.row_actions(record);
        self.surface.render_table(build_table(items, resource.columns(), &label, Some(&actions)));
        self.surface.render_pagination(pagination);
    }

    /// Rows already on screen stay; only an alert is added.
    fn fail_load(&self, error: ApiError) {
        self.state.borrow_mut().phase = ListPhase::LoadFailed;
        log::warn!("[LIST] loading {} failed: {}", self.resource.plural(), error);
        self.surface.notify(Notice::alert(
            Tone::Danger,
            "Error",
            format!("Failed to load {}: {}", self.resource.plural(), error),
        ));
    }

    // ========================
    // Single records
    // ========================

    pub fn open_create(&self) {
        let form = FormView::new(self.resource.create_title(), self.resource.form_schema(), None);
        {
            let mut state = self.state.borrow_mut();
            let generation = Self::begin_open(&mut state);
            state.form = Some(FormSession { resource_id: None, generation, submitting: false });
        }
        self.surface.open_form(form);
    }

    /// Fetch the record first; the form only opens with complete data.
    pub async fn open_edit(&self, id: RecordId) {
        let generation = Self::begin_open(&mut self.state.borrow_mut());
        let result = self.api.get(&self.resource.item_endpoint(id)).await;
        if !self.is_current_open(generation) {
            log::debug!("[FORM] dropping superseded {} {} (open #{})", self.resource.singular(), id, generation);
            return;
        }

        match result {
            Ok(record) => {
                let mut form = FormView::new(self.resource.edit_title(), self.resource.form_schema(), Some(id));
                form.populate(&record);
                self.state.borrow_mut().form = Some(FormSession {
                    resource_id: Some(id),
                    generation,
                    submitting: false,
                });
                self.surface.open_form(form);
            }
            Err(e) => self.record_load_failed(e),
        }
    }

    pub async fn view(&self, id: RecordId) {
        let generation = Self::begin_open(&mut self.state.borrow_mut());
        let result = self.api.get(&self.resource.item_endpoint(id)).await;
        if !self.is_current_open(generation) {
            log::debug!("[FORM] dropping superseded {} detail {}", self.resource.singular(), id);
            return;
        }

        match result {
            Ok(record) => self.surface.show_detail(self.resource.detail(&record)),
            Err(e) => self.record_load_failed(e),
        }
    }

    fn begin_open(state: &mut ControllerState) -> u64 {
        state.opened += 1;
        state.opened
    }

    fn is_current_open(&self, generation: u64) -> bool {
        self.state.borrow().opened == generation
    }

    /// True while the form opened as `generation` is still the one on screen.
    fn is_open_form(&self, generation: u64) -> bool {
        self.state.borrow().form.as_ref().is_some_and(|session| session.generation == generation)
    }

    fn record_load_failed(&self, error: ApiError) {
        log::warn!("[FORM] loading {} failed: {}", self.resource.singular(), error);
        self.surface.notify(Notice::alert(
            Tone::Danger,
            "Error",
            format!("Failed to load {}: {}", self.resource.singular().to_lowercase(), error),
        ));
    }

    pub fn close_form(&self) {
        {
            let mut state = self.state.borrow_mut();
            Self::begin_open(&mut state);
            state.form = None;
        }
        self.surface.close_form();
    }

    /// Read the form, create or update, and reload on success. On failure the
    /// form stays open with its values so the user can correct and resubmit.
    ///
    /// A form closed or replaced while its write is in flight is left alone:
    /// the write still reports and reloads, but only its own form is closed.
    pub async fn submit(&self) {
        let (resource_id, generation) = {
            let mut state = self.state.borrow_mut();
            match state.form.as_mut() {
                None => {
                    log::warn!("[FORM] submit ignored, no {} form is open", self.resource.singular());
                    return;
                }
                Some(session) if session.submitting => {
                    log::debug!("[FORM] submit ignored, previous submit still in flight");
                    return;
                }
                Some(session) => {
                    session.submitting = true;
                    (session.resource_id, session.generation)
                }
            }
        };

        let form = FormState { resource_id, fields: self.surface.read_form() };
        if let Err(message) = self.resource.validate(&form) {
            self.end_submit(generation);
            self.surface.notify(Notice::toast(Tone::Danger, format!("Error: {}", message)));
            return;
        }

        self.surface.set_form_disabled(true);
        let body = form.to_json();
        let result = match form.resource_id {
            Some(id) => self.api.patch(&self.resource.item_endpoint(id), &body).await,
            None => self.api.post(&self.resource.collection_endpoint(), &body).await,
        };
        let still_open = self.is_open_form(generation);
        if still_open {
            self.surface.set_form_disabled(false);
        }

        match result {
            Ok(_) => {
                if still_open {
                    self.state.borrow_mut().form = None;
                    self.surface.close_form();
                }
                log::info!("[FORM] {} saved", self.resource.singular());
                self.surface
                    .notify(Notice::toast(Tone::Success, format!("{} saved successfully!", self.resource.singular())));
                self.refresh().await;
            }
            Err(e) => {
                self.end_submit(generation);
                self.surface.notify(Notice::toast(Tone::Danger, format!("Error: {}", e)));
            }
        }
    }

    fn end_submit(&self, generation: u64) {
        if let Some(session) = self.state.borrow_mut().form.as_mut().filter(|s| s.generation == generation) {
            session.submitting = false;
        }
    }

    // ========================
    // Confirmed operations
    // ========================

    /// Ask before deleting; nothing is sent until `confirm`.
    pub fn request_delete(&self, id: RecordId, label: &str) {
        self.state.borrow_mut().pending = Some(Pending::Delete(id));
        self.surface.ask_confirm(ConfirmPrompt {
            title: "Confirm Delete".to_string(),
            message: format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", label),
            confirm_label: "Delete",
        });
    }

    /// Run a resource action, asking first when the action requires it.
    pub async fn run_action(&self, key: &str, id: RecordId) {
        let Some(action) = self.resource.extra_action(key) else {
            log::warn!("[ACTION] {} has no action named {}", self.resource.plural(), key);
            return;
        };
        match action.confirm {
            Some(message) => {
                self.state.borrow_mut().pending = Some(Pending::Action { key: action.key, id });
                self.surface.ask_confirm(ConfirmPrompt {
                    title: "Please Confirm".to_string(),
                    message: message.to_string(),
                    confirm_label: "Confirm",
                });
            }
            None => self.dispatch_action(action, id).await,
        }
    }

    /// Dispatch the pending operation exactly once.
    pub async fn confirm(&self) {
        let pending = self.state.borrow_mut().pending.take();
        let Some(pending) = pending else {
            log::debug!("[ACTION] confirm with nothing pending");
            return;
        };
        self.surface.close_confirm();

        match pending {
            Pending::Delete(id) => self.dispatch_delete(id).await,
            Pending::Action { key, id } => match self.resource.extra_action(key) {
                Some(action) => self.dispatch_action(action, id).await,
                None => log::warn!("[ACTION] pending action {} disappeared", key),
            },
        }
    }

    pub fn cancel_confirm(&self) {
        self.state.borrow_mut().pending = None;
        self.surface.close_confirm();
    }

    async fn dispatch_delete(&self, id: RecordId) {
        match self.api.delete(&self.resource.item_endpoint(id)).await {
            Ok(_) => {
                log::info!("[ACTION] {} {} deleted", self.resource.singular(), id);
                self.surface
                    .notify(Notice::toast(Tone::Success, format!("{} deleted successfully!", self.resource.singular())));
                self.refresh().await;
            }
            Err(e) => self.surface.notify(Notice::toast(Tone::Danger, format!("Error: {}", e))),
        }
    }

    async fn dispatch_action(&self, action: ExtraAction, id: RecordId) {
        let endpoint = self.resource.action_endpoint(id, &action);
        match self.api.request(&endpoint, action.method, Some(&Value::Object(Default::default()))).await {
            Ok(_) => {
                log::info!("[ACTION] {} on {} {}", action.key, self.resource.singular(), id);
                self.surface.notify(Notice::toast(Tone::Success, action.success_message));
                self.refresh().await;
            }
            Err(e) => self.surface.notify(Notice::toast(Tone::Danger, format!("Error: {}", e))),
        }
    }

    /// Route a row or detail button to the matching operation.
    pub async fn handle_action(&self, kind: ActionKind, id: RecordId, label: &str) {
        match kind {
            ActionKind::View => self.view(id).await,
            ActionKind::Edit => self.open_edit(id).await,
            ActionKind::Delete => self.request_delete(id, label),
            ActionKind::Custom(key) => self.run_action(key, id).await,
        }
    }
}
