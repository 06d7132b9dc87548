//! Confirm Modal Component
//!
//! Shows the controller's pending confirmation prompt. Confirm dispatches the
//! pending delete or action; Cancel drops it without a request.

use leptos::prelude::*;

use list_view::ConfirmPrompt;

use super::{run, ControllerHandle};
use crate::store::{ViewStateStoreFields, ViewStore};

#[component]
pub fn ConfirmModal(store: ViewStore, controller: ControllerHandle) -> impl IntoView {
    let cancel = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        controller.get_value().cancel_confirm();
    };

    move || {
        store.confirm().get().map(|ConfirmPrompt { title, message, confirm_label }| {
            view! {
                <div class="modal-backdrop show"></div>
                <div class="modal show d-block confirm-modal" tabindex="-1">
                    <div class="modal-dialog modal-sm">
                        <div class="modal-content">
                            <div class="modal-header">
                                <h5 class="modal-title">{title}</h5>
                            </div>
                            <div class="modal-body">
                                <p>{message}</p>
                            </div>
                            <div class="modal-footer">
                                <button type="button" class="btn btn-secondary" on:click=cancel>"Cancel"</button>
                                <button
                                    type="button"
                                    class="btn btn-danger"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        run(controller, |c| async move { c.confirm().await });
                                    }
                                >
                                    {confirm_label}
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
