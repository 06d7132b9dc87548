//! Search Bar Component
//!
//! Search box, list filter selects and the quick filter picker.

use leptos::prelude::*;

use list_view::QuickFilter;

use super::{run, ControllerHandle};

type FilterOptions = &'static [(&'static str, &'static str)];

#[component]
pub fn SearchBar(
    controller: ControllerHandle,
    quick_filters: &'static [QuickFilter],
    /// (filter key, choices) for each list filter
    filters: Vec<(&'static str, FilterOptions)>,
) -> impl IntoView {
    let (text, set_text) = signal(String::new());
    let (quick_key, set_quick_key) = signal(String::new());
    let (quick_value, set_quick_value) = signal(String::new());

    // choices for a parameterised quick filter come from the list filter of the same name
    let param_options = {
        let filters = filters.clone();
        move |param: &str| filters.iter().find(|(key, _)| *key == param).map(|(_, options)| *options)
    };

    let apply_quick = move |key: String, value: String| {
        if key.is_empty() {
            run(controller, |c| async move { c.clear_quick_filter().await });
            return;
        }
        let value = (!value.is_empty()).then_some(value);
        run(controller, move |c| async move { c.quick_filter(&key, value.as_deref()).await });
    };

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = text.get_untracked();
        set_quick_key.set(String::new());
        run(controller, move |c| async move { c.search(&text).await });
    };

    view! {
        <form class="search-bar" on:submit=on_search>
            <input
                type="search"
                placeholder="Search..."
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-outline-primary">"Search"</button>

            {filters.iter().map(|(key, options)| {
                let key = *key;
                view! {
                    <select
                        class="form-select filter-select"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_quick_key.set(String::new());
                            run(controller, move |c| async move { c.set_filter(key, Some(&value)).await });
                        }
                    >
                        <option value="">{any_label(key)}</option>
                        {options.iter().map(|(value, label)| view! {
                            <option value=*value>{*label}</option>
                        }).collect_view()}
                    </select>
                }
            }).collect_view()}

            <Show when=move || !quick_filters.is_empty()>
                <select
                    class="form-select quick-filter-select"
                    prop:value=move || quick_key.get()
                    on:change=move |ev| {
                        let key = event_target_value(&ev);
                        set_quick_key.set(key.clone());
                        set_quick_value.set(String::new());
                        apply_quick(key, String::new());
                    }
                >
                    <option value="">"All"</option>
                    {quick_filters.iter().map(|filter| view! {
                        <option value=filter.key>{filter.label}</option>
                    }).collect_view()}
                </select>
            </Show>

            {
                let param_options = param_options.clone();
                move || {
                    let key = quick_key.get();
                    let filter = quick_filters.iter().find(|f| f.key == key)?;
                    let param = filter.param?;
                    let options = param_options(param).unwrap_or(&[]);
                    Some(view! {
                        <select
                            class="form-select quick-filter-value"
                            prop:value=move || quick_value.get()
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                set_quick_value.set(value.clone());
                                apply_quick(quick_key.get_untracked(), value);
                            }
                        >
                            <option value="">{format!("Choose {}", param)}</option>
                            {options.iter().map(|(value, label)| view! {
                                <option value=*value>{*label}</option>
                            }).collect_view()}
                        </select>
                    })
                }
            }
        </form>
    }
}

fn any_label(key: &str) -> String {
    match key {
        "ordering" => "Default order".to_string(),
        _ => format!("Any {}", key),
    }
}
