//! Hospital Management Frontend App
//!
//! Tab bar over the four resource pages. Switching tabs mounts a fresh page,
//! which builds its own controller and loads page 1.

use std::rc::Rc;

use leptos::prelude::*;

use list_view::resources::{Appointments, Invoices, Patients, StaffMembers};
use list_view::{ApiClient, Resource};

use crate::components::ResourcePage;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::transport::{document_cookies, FetchTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Patients,
    Staff,
    Appointments,
    Invoices,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Patients, Tab::Staff, Tab::Appointments, Tab::Invoices];

    fn label(&self) -> &'static str {
        match self {
            Tab::Patients => "Patients",
            Tab::Staff => "Staff",
            Tab::Appointments => "Appointments",
            Tab::Invoices => "Billing",
        }
    }

    fn resource(&self) -> Rc<dyn Resource> {
        match self {
            Tab::Patients => Rc::new(Patients),
            Tab::Staff => Rc::new(StaffMembers),
            Tab::Appointments => Rc::new(Appointments),
            Tab::Invoices => Rc::new(Invoices),
        }
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let api = ApiClient::new(config.client.clone(), Rc::new(FetchTransport), &document_cookies());
    provide_context(AppContext::new(api, config.toast_dismiss_ms));

    let (current_tab, set_current_tab) = signal(Tab::Patients);

    view! {
        <div class="app-layout">
            <nav class="navbar navbar-dark bg-primary">
                <span class="navbar-brand">"Hospital Management"</span>
            </nav>

            <ul class="nav nav-tabs">
                {Tab::ALL.into_iter().map(|tab| view! {
                    <li class="nav-item">
                        <button
                            class=move || if current_tab.get() == tab { "nav-link active" } else { "nav-link" }
                            on:click=move |_| set_current_tab.set(tab)
                        >
                            {tab.label()}
                        </button>
                    </li>
                }).collect_view()}
            </ul>

            <main class="main-content container-fluid">
                {move || view! { <ResourcePage resource=current_tab.get().resource() /> }}
            </main>
        </div>
    }
}
