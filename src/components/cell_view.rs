//! Cell View Component
//!
//! Renders a formatted table or detail cell: plain text or a badge.

use leptos::prelude::*;

use list_view::Cell;

#[component]
pub fn CellView(cell: Cell) -> impl IntoView {
    match cell {
        Cell::Text(text) => view! { <span>{text}</span> }.into_any(),
        Cell::Badge { label, tone } => view! {
            <span class=format!("badge bg-{}", tone.as_str())>{label}</span>
        }
        .into_any(),
    }
}
