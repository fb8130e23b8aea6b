//! Role workspace pages
//!
//! Dashboards, triage, tasks, notifications and profile share one shell.
//! Their content comes from the REST backend and is rendered by the
//! backend-facing views; this page frames it for the signed-in identity.

use leptos::prelude::*;
use leptos_meta::Title;

use super::layout::PageShell;
use crate::core::AppRoute;
use crate::ui::auth::use_auth_context;

/// Workspace page for a non-public route
#[component]
pub fn WorkspacePage(route: AppRoute) -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <Title text=format!("{} | Civic Console", route.title())/>
        <PageShell>
            <div class="max-w-7xl mx-auto">
                <h1 class="text-2xl font-bold text-theme-primary mb-2">{route.title()}</h1>
                {move || {
                    auth.identity().map(|identity| {
                        let department = identity
                            .department_id
                            .clone()
                            .map(|d| format!(" · department {}", d))
                            .unwrap_or_default();
                        view! {
                            <p class="text-sm text-theme-secondary">
                                {format!("Signed in as {} ({}){}", identity.email, identity.role.display_name(), department)}
                            </p>
                        }
                    })
                }}
            </div>
        </PageShell>
    }
}
