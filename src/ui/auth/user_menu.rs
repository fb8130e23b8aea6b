//! Signed-in user badge with sign-out action

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::context::use_auth_context;
use crate::core::AppRoute;

/// User menu component
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    let handle_logout = move |_| {
        if auth.logout().is_ok() {
            navigate(AppRoute::ENTRY.path(), Default::default());
        }
    };

    view! {
        {move || {
            auth.identity().map(|identity| {
                let initial = identity
                    .name
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().to_string())
                    .unwrap_or_default();
                view! {
                    <div class="flex items-center gap-3">
                        <div class="w-8 h-8 rounded-full bg-accent-primary text-white flex items-center justify-center font-medium">
                            {initial}
                        </div>
                        <div class="text-sm">
                            <p class="font-medium text-theme-primary">{identity.name.clone()}</p>
                            <p class="text-theme-tertiary">{identity.role.display_name()}</p>
                        </div>
                    </div>
                }
            })
        }}
        <button
            type="button"
            class="px-3 py-1.5 text-sm border border-theme rounded-lg hover:bg-theme-secondary disabled:opacity-50"
            disabled=move || auth.loading.get()
            on:click=handle_logout
        >
            "Sign out"
        </button>
    }
}
