//! Notice Stack Component
//!
//! Toasts (auto-dismissed by the store timer) and alerts (dismissed by the user).

use leptos::prelude::*;

use list_view::NoticeKind;

use crate::store::{store_dismiss_notice, ShownNotice, ViewStateStoreFields, ViewStore};

#[component]
pub fn NoticeStack(store: ViewStore) -> impl IntoView {
    view! {
        <div class="notice-stack">
            <For
                each=move || store.notices().get()
                key=|shown| shown.id
                children=move |ShownNotice { id, notice }| {
                    let class = match notice.kind {
                        NoticeKind::Toast => format!("toast show text-bg-{}", notice.tone.as_str()),
                        NoticeKind::Alert => format!("alert alert-{} alert-dismissible", notice.tone.as_str()),
                    };
                    view! {
                        <div class=class role="alert">
                            {notice.title.map(|title| view! { <strong>{title}</strong>" " })}
                            <span>{notice.message}</span>
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| store_dismiss_notice(&store, id)
                            ></button>
                        </div>
                    }
                }
            />
        </div>
    }
}
