//! List Table Component
//!
//! Renders the controller's table view-model with per-row action buttons.

use leptos::prelude::*;

use list_view::{RowAction, RowView, TableView};

use super::{run, CellView, ControllerHandle};
use crate::store::{ViewStateStoreFields, ViewStore};

#[component]
pub fn ListTable(store: ViewStore, controller: ControllerHandle) -> impl IntoView {
    move || {
        store.table().get().map(|TableView { headers, rows }| {
            view! {
                <table class="table table-hover">
                    <thead>
                        <tr>{headers.into_iter().map(|header| view! { <th>{header}</th> }).collect_view()}</tr>
                    </thead>
                    <tbody>
                        {rows.into_iter().map(|row| view! { <TableRow row=row controller=controller /> }).collect_view()}
                    </tbody>
                </table>
            }
        })
    }
}

#[component]
fn TableRow(row: RowView, controller: ControllerHandle) -> impl IntoView {
    match row {
        RowView::Placeholder { message, colspan } => view! {
            <tr>
                <td colspan=colspan.to_string() class="text-center text-muted">{message}</td>
            </tr>
        }
        .into_any(),
        RowView::Record { id, label, cells, actions } => view! {
            <tr>
                {cells.into_iter().map(|cell| view! { <td><CellView cell=cell /></td> }).collect_view()}
                <td class="row-actions">
                    {actions.into_iter().map(|action| view! {
                        <ActionButton action=action id=id label=label.clone() controller=controller />
                    }).collect_view()}
                </td>
            </tr>
        }
        .into_any(),
    }
}

/// Button for one row or detail action; `label` names the record in prompts
#[component]
pub fn ActionButton(
    action: RowAction,
    id: u64,
    #[prop(into)] label: String,
    controller: ControllerHandle,
) -> impl IntoView {
    view! {
        <button
            class=format!("btn btn-sm btn-{}", action.tone.as_str())
            on:click=move |_| {
                let label = label.clone();
                run(controller, move |c| async move { c.handle_action(action.kind, id, &label).await });
            }
        >
            {action.label}
        </button>
    }
}
