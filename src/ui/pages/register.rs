//! Register page component

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::layout::PageShell;
use crate::core::AppRoute;
use crate::ui::auth::{RegisterForm, use_redirect_when_signed_in};

/// Register page component
#[component]
pub fn RegisterPage() -> impl IntoView {
    use_redirect_when_signed_in();

    let on_login_click = move |_| {
        let navigate = use_navigate();
        navigate(AppRoute::Login.path(), Default::default());
    };

    view! {
        <PageShell>
            <div class="flex items-center justify-center py-12">
                <RegisterForm on_login_click=Callback::new(on_login_click) />
            </div>
        </PageShell>
    }
}
