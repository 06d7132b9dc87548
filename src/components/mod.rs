//! UI Components
//!
//! Leptos components for one resource page and its overlays.

mod resource_page;
mod search_bar;
mod list_table;
mod cell_view;
mod pagination_bar;
mod form_modal;
mod detail_modal;
mod confirm_modal;
mod notice_stack;

pub use resource_page::{ResourcePage, ControllerHandle, run};
pub use search_bar::SearchBar;
pub use list_table::{ActionButton, ListTable};
pub use cell_view::CellView;
pub use pagination_bar::PaginationBar;
pub use form_modal::FormModal;
pub use detail_modal::DetailModal;
pub use confirm_modal::ConfirmModal;
pub use notice_stack::NoticeStack;
