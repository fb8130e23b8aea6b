//! Landing page component
//!
//! Public entry with calls to action. Signed-in visitors get a link to
//! their own dashboard instead.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use super::layout::PageShell;
use crate::core::{AppRoute, landing_route};
use crate::ui::auth::use_auth_context;

/// Landing page component
#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <Title text="Civic Console"/>
        <PageShell>
            <section class="max-w-3xl mx-auto text-center py-16">
                <h1 class="text-4xl font-bold text-theme-primary mb-4">
                    "Report it. Route it. Resolve it."
                </h1>
                <p class="text-lg text-theme-secondary mb-10">
                    "Citizens report problems in their area. Collectors triage them, departments fix them."
                </p>

                {move || match auth.identity() {
                    Some(identity) => {
                        let home = landing_route(Some(&identity));
                        view! {
                            <A href=home.path() attr:class="px-6 py-3 bg-accent-primary text-white font-medium rounded-lg">
                                {format!("Go to {}", home.title())}
                            </A>
                        }
                        .into_any()
                    }
                    None => view! {
                        <div class="flex items-center justify-center gap-4">
                            <A href=AppRoute::Login.path() attr:class="px-6 py-3 bg-accent-primary text-white font-medium rounded-lg">
                                "Sign In"
                            </A>
                            <A href=AppRoute::Register.path() attr:class="px-6 py-3 border border-theme text-theme-primary font-medium rounded-lg">
                                "Create Account"
                            </A>
                        </div>
                    }
                    .into_any(),
                }}
            </section>
        </PageShell>
    }
}
