//! Shared page chrome: header with brand, navigation and user menu

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::{AppRoute, RouteAccess};
use crate::ui::auth::{UserMenu, use_auth_context};

/// Routes shown in the navigation bar for the signed-in role
fn nav_routes() -> impl Iterator<Item = AppRoute> {
    AppRoute::ALL
        .into_iter()
        .filter(|route| route.access() != RouteAccess::Public)
}

/// Page shell with header and footer
#[component]
pub fn PageShell(children: Children) -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            // Header
            <header class="border-b border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex items-center justify-between h-16 gap-6">
                        <A href="/" attr:class="text-xl font-bold text-theme-primary hover:opacity-80">
                            "Civic Console"
                        </A>

                        // Role-aware navigation
                        <nav class="flex-1 flex items-center gap-4 text-sm">
                            {move || {
                                auth.identity().map(|identity| {
                                    nav_routes()
                                        .filter(|route| route.admits(identity.role))
                                        .map(|route| {
                                            view! {
                                                <A href=route.path() attr:class="text-theme-secondary hover:text-theme-primary">
                                                    {route.title()}
                                                </A>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </nav>

                        <div class="flex items-center gap-3">
                            <Show
                                when=move || auth.is_authenticated()
                                fallback=|| view! {
                                    <A href=AppRoute::Login.path() attr:class="text-sm text-accent-primary font-medium">
                                        "Sign in"
                                    </A>
                                }
                            >
                                <UserMenu/>
                            </Show>
                        </div>
                    </div>
                </div>
            </header>

            // Main content
            <main class="flex-1 p-4">{children()}</main>

            // Footer
            <footer class="py-4 border-t border-theme">
                <p class="text-center text-sm text-theme-tertiary">
                    "Civic Console: citizen issue reporting and resolution"
                </p>
            </footer>
        </div>
    }
}
