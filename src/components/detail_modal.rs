//! Detail Modal Component
//!
//! Read-only record panel with the resource's detail actions.

use leptos::prelude::*;

use list_view::{DetailField, DetailView};

use super::{ActionButton, CellView, ControllerHandle};
use crate::store::{store_close_detail, ViewStateStoreFields, ViewStore};

#[component]
pub fn DetailModal(store: ViewStore, controller: ControllerHandle) -> impl IntoView {
    let close = move |_: leptos::ev::MouseEvent| store_close_detail(&store);

    move || {
        store.detail().get().map(|DetailView { title, fields, notes, actions, record_id }| {
            let label = title.clone();
            view! {
                <div class="modal-backdrop show"></div>
                <div class="modal show d-block" tabindex="-1">
                    <div class="modal-dialog">
                        <div class="modal-content">
                            <div class="modal-header">
                                <h5 class="modal-title">{title}</h5>
                                <button type="button" class="btn-close" aria-label="Close" on:click=close></button>
                            </div>
                            <div class="modal-body">
                                <dl class="row">
                                    {fields.into_iter().map(|DetailField { label, value }| view! {
                                        <dt class="col-sm-4">{label}</dt>
                                        <dd class="col-sm-8"><CellView cell=value /></dd>
                                    }).collect_view()}
                                </dl>
                                {notes.map(|(heading, text)| view! {
                                    <h6>{heading}</h6>
                                    <p class="detail-notes">{text}</p>
                                })}
                            </div>
                            // any footer button, action or close, dismisses the panel
                            <div class="modal-footer" on:click=close>
                                {actions.into_iter().map(|action| view! {
                                    <ActionButton action=action id=record_id label=label.clone() controller=controller />
                                }).collect_view()}
                                <button type="button" class="btn btn-secondary">"Close"</button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
