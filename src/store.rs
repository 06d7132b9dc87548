//! Page View Store
//!
//! Each resource page keeps what it renders in a reactive_stores `Store`.
//! `StoreSurface` is the controller's `ViewSurface` over that store, so
//! components only ever read fields and the controller only ever writes them.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;

use list_view::{
    ConfirmPrompt, DetailView, FieldValue, FieldValues, FormView, Notice, NoticeKind, PaginationView, TableView,
    ViewSurface,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ShownNotice {
    pub id: u32,
    pub notice: Notice,
}

/// Rendered state of one resource page with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ViewState {
    pub loading: bool,
    /// None until the first list fetch lands
    pub table: Option<TableView>,
    pub pagination: Option<PaginationView>,
    pub form: Option<FormView>,
    pub detail: Option<DetailView>,
    pub confirm: Option<ConfirmPrompt>,
    pub notices: Vec<ShownNotice>,
    pub next_notice_id: u32,
}

pub type ViewStore = Store<ViewState>;

// ========================
// Store Helper Functions
// ========================

/// Drop a notice; also called by the toast timer, possibly after the page is gone.
pub fn store_dismiss_notice(store: &ViewStore, id: u32) {
    store.notices().try_update(|notices| notices.retain(|shown| shown.id != id));
}

/// Apply a user edit to the open form.
pub fn store_set_field(store: &ViewStore, name: &str, value: FieldValue) {
    store.form().update(|form| {
        if let Some(form) = form {
            form.set_value(name, value);
        }
    });
}

pub fn store_close_detail(store: &ViewStore) {
    store.detail().set(None);
}

// ========================
// Surface
// ========================

/// Writes are `try_*`: a controller future may outlive its page.
pub struct StoreSurface {
    store: ViewStore,
    toast_dismiss_ms: u32,
}

impl StoreSurface {
    pub fn new(store: ViewStore, toast_dismiss_ms: u32) -> Self {
        Self { store, toast_dismiss_ms }
    }
}

impl ViewSurface for StoreSurface {
    fn set_loading(&self, loading: bool) {
        self.store.loading().try_set(loading);
    }

    fn render_table(&self, table: TableView) {
        self.store.table().try_set(Some(table));
    }

    fn render_pagination(&self, pagination: Option<PaginationView>) {
        self.store.pagination().try_set(pagination);
    }

    fn open_form(&self, form: FormView) {
        self.store.form().try_set(Some(form));
    }

    fn close_form(&self) {
        self.store.form().try_set(None);
    }

    fn read_form(&self) -> FieldValues {
        self.store
            .form()
            .try_with_untracked(|form| form.as_ref().map(FormView::values).unwrap_or_default())
            .unwrap_or_default()
    }

    fn set_form_disabled(&self, disabled: bool) {
        self.store.form().try_update(|form| {
            if let Some(form) = form {
                form.set_disabled(disabled);
            }
        });
    }

    fn show_detail(&self, detail: DetailView) {
        self.store.detail().try_set(Some(detail));
    }

    fn ask_confirm(&self, prompt: ConfirmPrompt) {
        self.store.confirm().try_set(Some(prompt));
    }

    fn close_confirm(&self) {
        self.store.confirm().try_set(None);
    }

    fn notify(&self, notice: Notice) {
        let store = self.store;
        let Some(id) = store.next_notice_id().try_update(|next| {
            *next += 1;
            *next
        }) else {
            return;
        };

        let is_toast = notice.kind == NoticeKind::Toast;
        store.notices().try_update(|notices| notices.push(ShownNotice { id, notice }));

        // alerts stay until dismissed
        if is_toast {
            Timeout::new(self.toast_dismiss_ms, move || store_dismiss_notice(&store, id)).forget();
        }
    }
}
