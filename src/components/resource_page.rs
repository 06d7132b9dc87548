//! Resource Page Component
//!
//! One tab of the app: a list view bound to its own controller and store.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use list_view::{ListViewController, Resource};

use super::{ConfirmModal, DetailModal, FormModal, ListTable, NoticeStack, PaginationBar, SearchBar};
use crate::context::use_app_context;
use crate::store::{StoreSurface, ViewState, ViewStateStoreFields, ViewStore};

/// Copyable handle to a page's controller for use inside view closures
pub type ControllerHandle = StoredValue<Rc<ListViewController>, LocalStorage>;

/// Run a controller operation from an event handler.
pub fn run<F, Fut>(controller: ControllerHandle, op: F)
where
    F: FnOnce(Rc<ListViewController>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(op(controller.get_value()));
}

/// List page for `resource`; loads page 1 on mount
#[component]
pub fn ResourcePage(resource: Rc<dyn Resource>) -> impl IntoView {
    let ctx = use_app_context();
    let store: ViewStore = Store::new(ViewState::default());

    let heading = page_heading(resource.plural());
    let add_label = format!("Add {}", resource.singular());
    let quick_filters = resource.quick_filters();
    let filters: Vec<(&'static str, &'static [(&'static str, &'static str)])> = resource
        .filter_keys()
        .iter()
        .map(|key| (*key, resource.filter_options(key)))
        .collect();

    let surface = Rc::new(StoreSurface::new(store, ctx.toast_dismiss_ms));
    let controller: ControllerHandle =
        StoredValue::new_local(Rc::new(ListViewController::new(ctx.api(), resource, surface)));

    run(controller, |c| async move { c.load(1).await });

    view! {
        <section class="resource-page">
            <header class="page-header">
                <h2>{heading}</h2>
                <button class="btn btn-primary" on:click=move |_| controller.get_value().open_create()>
                    {add_label}
                </button>
            </header>

            <SearchBar controller=controller quick_filters=quick_filters filters=filters />
            <NoticeStack store=store />

            <Show when=move || store.loading().get()>
                <div class="loading-indicator">"Loading..."</div>
            </Show>

            <ListTable store=store controller=controller />
            <PaginationBar store=store controller=controller />

            <FormModal store=store controller=controller />
            <DetailModal store=store controller=controller />
            <ConfirmModal store=store controller=controller />
        </section>
    }
}

/// "patients" -> "Patients"
fn page_heading(plural: &str) -> String {
    let mut chars = plural.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
