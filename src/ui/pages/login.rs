//! Login page component
//!
//! A standalone page for user login. Visitors who already have a session
//! are sent to their landing route.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::layout::PageShell;
use crate::core::AppRoute;
use crate::ui::auth::{LoginForm, use_redirect_when_signed_in};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    use_redirect_when_signed_in();

    // Switch to register page
    let on_register_click = move |_| {
        let navigate = use_navigate();
        navigate(AppRoute::Register.path(), Default::default());
    };

    view! {
        <PageShell>
            <div class="flex items-center justify-center py-12">
                <LoginForm on_register_click=Callback::new(on_register_click) />
            </div>
        </PageShell>
    }
}
