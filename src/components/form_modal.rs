//! Form Modal Component
//!
//! Create / edit overlay generated from the resource's form schema.
//! The layout only re-renders when a different form is opened; field
//! values and the disabled flag are read per input so typing keeps focus.

use leptos::prelude::*;

use list_view::{FieldKind, FieldSpec, FieldValue, RecordId};

use super::{run, ControllerHandle};
use crate::store::{store_set_field, ViewStateStoreFields, ViewStore};

#[derive(Clone, Debug, PartialEq)]
struct FormShape {
    title: String,
    resource_id: Option<RecordId>,
    specs: Vec<FieldSpec>,
}

#[component]
pub fn FormModal(store: ViewStore, controller: ControllerHandle) -> impl IntoView {
    let shape = Memo::new(move |_| {
        store.form().with(|form| {
            form.as_ref().map(|form| FormShape {
                title: form.title.clone(),
                resource_id: form.resource_id,
                specs: form.fields.iter().map(|field| field.spec).collect(),
            })
        })
    });
    let submitting = move || {
        store
            .form()
            .with(|form| form.as_ref().is_some_and(|form| form.fields.iter().any(|field| field.disabled)))
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        run(controller, |c| async move { c.submit().await });
    };
    let close = move |_: leptos::ev::MouseEvent| controller.get_value().close_form();

    move || {
        shape.get().map(|FormShape { title, specs, .. }| {
            view! {
                <div class="modal-backdrop show"></div>
                <div class="modal show d-block" tabindex="-1">
                    <div class="modal-dialog modal-lg">
                        <form class="modal-content" on:submit=on_submit>
                            <div class="modal-header">
                                <h5 class="modal-title">{title}</h5>
                                <button type="button" class="btn-close" aria-label="Close" on:click=close></button>
                            </div>
                            <div class="modal-body">
                                {specs.into_iter().map(|spec| view! { <FieldInput spec=spec store=store /> }).collect_view()}
                            </div>
                            <div class="modal-footer">
                                <button type="button" class="btn btn-secondary" on:click=close>"Cancel"</button>
                                <button type="submit" class="btn btn-primary" disabled=submitting>
                                    {move || if submitting() { "Saving..." } else { "Save" }}
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            }
        })
    }
}

fn field_value(store: ViewStore, name: &str) -> Option<FieldValue> {
    store.form().with(|form| {
        form.as_ref()?
            .fields
            .iter()
            .find(|field| field.spec.name == name)
            .map(|field| field.value.clone())
    })
}

fn field_text(store: ViewStore, name: &str) -> String {
    field_value(store, name)
        .and_then(|value| value.as_text().map(str::to_string))
        .unwrap_or_default()
}

fn field_disabled(store: ViewStore, name: &str) -> bool {
    store.form().with(|form| {
        form.as_ref()
            .and_then(|form| form.fields.iter().find(|field| field.spec.name == name))
            .is_some_and(|field| field.disabled)
    })
}

#[component]
fn FieldInput(spec: FieldSpec, store: ViewStore) -> impl IntoView {
    let name = spec.name;
    let id = format!("field-{}", name);
    let disabled = move || field_disabled(store, name);
    let set_text = move |ev: leptos::ev::Event| store_set_field(&store, name, FieldValue::Text(event_target_value(&ev)));

    let input = match spec.kind {
        FieldKind::Checkbox => {
            return view! {
                <div class="form-check mb-3">
                    <input
                        type="checkbox"
                        class="form-check-input"
                        id=id.clone()
                        name=name
                        prop:checked=move || matches!(field_value(store, name), Some(FieldValue::Checked(true)))
                        prop:disabled=disabled
                        on:change=move |ev| store_set_field(&store, name, FieldValue::Checked(event_target_checked(&ev)))
                    />
                    <label class="form-check-label" for=id>{spec.label}</label>
                </div>
            }
            .into_any();
        }
        FieldKind::TextArea => view! {
            <textarea
                class="form-control"
                id=id.clone()
                name=name
                rows="3"
                required=spec.required
                prop:value=move || field_text(store, name)
                prop:disabled=disabled
                on:input=set_text
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select
                class="form-select"
                id=id.clone()
                name=name
                required=spec.required
                prop:disabled=disabled
                on:change=set_text
            >
                {options.iter().map(|(value, label)| {
                    let value = *value;
                    view! {
                        <option value=value selected=move || field_text(store, name) == value>{*label}</option>
                    }
                }).collect_view()}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                type=kind.input_type()
                class="form-control"
                id=id.clone()
                name=name
                required=spec.required
                step=(kind == FieldKind::Number).then_some("any")
                prop:value=move || field_text(store, name)
                prop:disabled=disabled
                on:input=set_text
            />
        }
        .into_any(),
    };

    view! {
        <div class="mb-3">
            <label class="form-label" for=id>{spec.label}</label>
            {input}
        </div>
    }
    .into_any()
}
