//! Login form component
//!
//! Email and password sign-in. On success the user is sent to their role's
//! landing route, unless they navigated away while the request was pending.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use super::context::use_auth_context;
use crate::core::PostAuthRedirect;
use crate::core::validation::{FIELD_EMAIL, FIELD_PASSWORD, validate_email};

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback to switch to register form
    #[prop(optional, into)]
    on_register_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();
    let location = use_location();
    let navigate = use_navigate();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Form validation
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let check_email = move || match validate_email(&email.get()) {
        Ok(()) => {
            email_error.set(None);
            true
        }
        Err(e) => {
            email_error.set(Some(e.message));
            false
        }
    };

    let check_password = move || {
        if password.get().is_empty() {
            password_error.set(Some("Password is required".to_string()));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    // Handle form submission
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        // Clear previous errors
        auth.clear_error();

        let email_valid = check_email();
        let password_valid = check_password();
        if !email_valid || !password_valid {
            return;
        }

        let email_val = email.get();
        let password_val = password.get();
        let redirect = PostAuthRedirect::from_path(location.pathname.get_untracked());
        let navigate = navigate.clone();

        spawn_local(async move {
            match auth.login(email_val, password_val).await {
                Ok(identity) => {
                    let target = location
                        .pathname
                        .try_get_untracked()
                        .and_then(|path| redirect.destination(&path, &identity));
                    if let Some(target) = target {
                        navigate(target.path(), Default::default());
                    }
                }
                Err(e) => match e.field() {
                    Some(FIELD_EMAIL) => email_error.set(Some(e.to_string())),
                    Some(FIELD_PASSWORD) => password_error.set(Some(e.to_string())),
                    // Everything else is already set in auth context
                    _ => {}
                },
            }
        });
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-6">
                // Header
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">"Welcome Back"</h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "Sign in to manage reports and tasks"
                    </p>
                </div>

                // Global error message
                {move || {
                    auth.error.get().map(|notice| {
                        let retryable = notice.retryable;
                        view! {
                            <div class="p-3 bg-red-100 border border-red-300 rounded-lg flex items-center justify-between gap-3" role="alert">
                                <p class="text-sm text-red-700">{notice.message}</p>
                                <Show when=move || retryable>
                                    <button
                                        type="submit"
                                        class="text-sm font-medium text-red-700 underline disabled:opacity-50"
                                        disabled=move || auth.loading.get()
                                    >
                                        "Try again"
                                    </button>
                                </Show>
                            </div>
                        }
                    })
                }}

                // Email field
                <div>
                    <label for="email" class="block text-sm font-medium text-theme-primary mb-1">
                        "Email"
                    </label>
                    <input
                        type="email"
                        id="email"
                        name="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg"
                        class:border-red-500=move || email_error.get().is_some()
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            email.set(event_target_value(&ev));
                            email_error.set(None);
                        }
                        on:blur=move |_| { check_email(); }
                    />
                    {move || {
                        email_error.get().map(|error| {
                            view! { <p class="mt-1 text-sm text-red-500">{error}</p> }
                        })
                    }}
                </div>

                // Password field
                <div>
                    <label for="password" class="block text-sm font-medium text-theme-primary mb-1">
                        "Password"
                    </label>
                    <div class="relative">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            placeholder="Enter your password"
                            class="w-full px-3 py-2 pr-16 bg-theme-secondary border border-theme rounded-lg"
                            class:border-red-500=move || password_error.get().is_some()
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                password_error.set(None);
                            }
                        />
                        <button
                            type="button"
                            class="absolute inset-y-0 right-0 pr-3 text-sm text-theme-tertiary"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </div>
                    {move || {
                        password_error.get().map(|error| {
                            view! { <p class="mt-1 text-sm text-red-500">{error}</p> }
                        })
                    }}
                </div>

                // Submit button
                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary text-white font-medium rounded-lg disabled:opacity-50"
                    disabled=move || auth.loading.get()
                >
                    {move || if auth.loading.get() { "Signing in..." } else { "Sign In" }}
                </button>

                // Register link
                <div class="text-center text-sm text-theme-secondary">
                    "Don't have an account? "
                    <button
                        type="button"
                        class="text-accent-primary font-medium"
                        on:click=move |_| {
                            if let Some(callback) = on_register_click.as_ref() {
                                callback.run(());
                            }
                        }
                    >
                        "Sign up"
                    </button>
                </div>
            </form>
        </div>
    }
}
