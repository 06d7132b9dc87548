//! Pagination Bar Component
//!
//! Previous / current / next control; hidden when the list has a single page.

use leptos::prelude::*;

use list_view::{PageLink, PaginationView};

use super::{run, ControllerHandle};
use crate::store::{ViewStateStoreFields, ViewStore};

#[component]
pub fn PaginationBar(store: ViewStore, controller: ControllerHandle) -> impl IntoView {
    move || {
        store.pagination().get().map(|PaginationView { previous, current, next }| {
            view! {
                <nav class="pagination-bar">
                    <ul class="pagination">
                        <PageButton link=previous controller=controller />
                        <li class="page-item active">
                            <span class="page-link">{format!("Page {}", current)}</span>
                        </li>
                        <PageButton link=next controller=controller />
                    </ul>
                </nav>
            }
        })
    }
}

#[component]
fn PageButton(link: PageLink, controller: ControllerHandle) -> impl IntoView {
    let class = if link.is_disabled() { "page-item disabled" } else { "page-item" };
    view! {
        <li class=class>
            <button
                class="page-link"
                disabled=link.is_disabled()
                on:click=move |_| {
                    if let Some(page) = link.target {
                        run(controller, move |c| async move { c.load(page).await });
                    }
                }
            >
                {link.label}
            </button>
        </li>
    }
}
