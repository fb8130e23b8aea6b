//! Register form component
//!
//! Account creation with role-dependent department fields. All checks run
//! locally before the backend is contacted.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use super::context::use_auth_context;
use crate::core::validation::{
    FIELD_CONFIRM_PASSWORD, FIELD_DEPARTMENT, FIELD_EMAIL, FIELD_MANAGES_DEPARTMENT, FIELD_NAME,
    FIELD_PASSWORD, FIELD_PHONE, FieldError, RegistrationForm, registration_errors,
};
use crate::core::{PostAuthRedirect, Role};

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback to switch to login form
    #[prop(optional, into)]
    on_login_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();
    let location = use_location();
    let navigate = use_navigate();

    // Form state
    let email = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Public);
    let department = RwSignal::new(String::new());
    let manages_department = RwSignal::new(String::new());

    // Per-field errors
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let backend_field_error = RwSignal::new(None::<(String, String)>);

    let error_for = move |field: &'static str| {
        move || {
            errors
                .get()
                .into_iter()
                .find(|e| e.field == field)
                .map(|e| e.message)
                .or_else(|| {
                    backend_field_error
                        .get()
                        .filter(|(f, _)| f == field)
                        .map(|(_, message)| message)
                })
        }
    };

    let collect_form = move || RegistrationForm {
        email: email.get().trim().to_string(),
        password: password.get(),
        confirm_password: confirm_password.get(),
        name: optional(name.get()),
        phone_number: optional(phone.get()),
        role: role.get(),
        department_id: optional(department.get()),
        manages_department: optional(manages_department.get()),
    };

    // Handle form submission
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        // Clear previous errors
        auth.clear_error();
        backend_field_error.set(None);

        let form = collect_form();
        let found = registration_errors(&form);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let redirect = PostAuthRedirect::from_path(location.pathname.get_untracked());
        let navigate = navigate.clone();

        spawn_local(async move {
            match auth.register(form).await {
                Ok(identity) => {
                    let target = location
                        .pathname
                        .try_get_untracked()
                        .and_then(|path| redirect.destination(&path, &identity));
                    if let Some(target) = target {
                        navigate(target.path(), Default::default());
                    }
                }
                Err(e) => {
                    if let Some(field) = e.field() {
                        backend_field_error.set(Some((field.to_string(), e.to_string())));
                    }
                }
            }
        });
    };

    let text_field = move |id: &'static str,
                           label: &'static str,
                           input_type: &'static str,
                           value: RwSignal<String>| {
        let error = error_for(id);
        view! {
            <div>
                <label for=id class="block text-sm font-medium text-theme-primary mb-1">
                    {label}
                </label>
                <input
                    type=input_type
                    id=id
                    name=id
                    class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
                {move || {
                    error().map(|message| {
                        view! { <p class="mt-1 text-sm text-red-500">{message}</p> }
                    })
                }}
            </div>
        }
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-4">
                // Header
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">"Create Account"</h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "Report issues and follow their progress"
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

                {text_field(FIELD_EMAIL, "Email", "email", email)}
                {text_field(FIELD_NAME, "Full name", "text", name)}
                {text_field(FIELD_PHONE, "Phone number", "tel", phone)}

                // Role selection
                <div>
                    <label for="role" class="block text-sm font-medium text-theme-primary mb-1">
                        "Role"
                    </label>
                    <select
                        id="role"
                        name="role"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if let Some(selected) = Role::ALL.into_iter().find(|r| r.as_str() == value) {
                                role.set(selected);
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|r| {
                                view! {
                                    <option value=r.as_str() selected=move || role.get() == r>
                                        {r.display_name()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                // Role-dependent department fields
                <Show when=move || role.get() == Role::Staff>
                    {text_field(FIELD_DEPARTMENT, "Department", "text", department)}
                </Show>
                <Show when=move || role.get() == Role::DepartmentHead>
                    {text_field(FIELD_MANAGES_DEPARTMENT, "Department you manage", "text", manages_department)}
                </Show>

                {text_field(FIELD_PASSWORD, "Password", "password", password)}
                {text_field(FIELD_CONFIRM_PASSWORD, "Confirm password", "password", confirm_password)}

                // Submit button
                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary text-white font-medium rounded-lg disabled:opacity-50"
                    disabled=move || auth.loading.get()
                >
                    {move || if auth.loading.get() { "Creating account..." } else { "Create Account" }}
                </button>

                // Login link
                <div class="text-center text-sm text-theme-secondary">
                    "Already have an account? "
                    <button
                        type="button"
                        class="text-accent-primary font-medium"
                        on:click=move |_| {
                            if let Some(callback) = on_login_click.as_ref() {
                                callback.run(());
                            }
                        }
                    >
                        "Sign in"
                    </button>
                </div>
            </form>
        </div>
    }
}
