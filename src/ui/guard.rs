//! Route guard components
//!
//! `RouteGuard` wraps the view of a non-public route. It re-reads the
//! session on every change: while the session is initializing nothing of
//! the route is shown, afterwards the view either renders or is replaced
//! by a redirect.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::core::{AppRoute, GuardDecision, decide_route, landing_route};
use crate::ui::auth::use_auth_context;

/// Placeholder shown while the stored session is being read
#[component]
pub fn SessionPending() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-theme-primary" aria-busy="true">
            <p class="text-theme-tertiary">"Loading session..."</p>
        </div>
    }
}

/// Gate `children` behind the access rule of `route`
#[component]
pub fn RouteGuard(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();

    move || {
        let state = auth.state();
        if state.is_initializing() {
            return view! { <SessionPending/> }.into_any();
        }

        match decide_route(route, &state) {
            GuardDecision::Render => children().into_any(),
            GuardDecision::Redirect(target) => {
                leptos::logging::log!("Access to {} denied, redirecting to {}", route, target);
                view! { <Redirect path=target.path()/> }.into_any()
            }
        }
    }
}

/// Fallback for unknown paths: the current identity's landing route
#[component]
pub fn LandingRedirect() -> impl IntoView {
    let auth = use_auth_context();

    move || {
        let state = auth.state();
        if state.is_initializing() {
            return view! { <SessionPending/> }.into_any();
        }

        let target: AppRoute = landing_route(state.identity());
        view! { <Redirect path=target.path()/> }.into_any()
    }
}
