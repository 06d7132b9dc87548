//! Application Context
//!
//! Shared API client and UI settings provided via Leptos Context API.

use leptos::prelude::*;
use list_view::ApiClient;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// One client for every page; holds the CSRF token read at startup
    api: StoredValue<ApiClient, LocalStorage>,
    pub toast_dismiss_ms: u32,
}

impl AppContext {
    pub fn new(api: ApiClient, toast_dismiss_ms: u32) -> Self {
        Self {
            api: StoredValue::new_local(api),
            toast_dismiss_ms,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
