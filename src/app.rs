use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::AppRoute;
use crate::ui::auth::provide_auth_context;
use crate::ui::pages::{LandingPage, LoginPage, RegisterPage, WorkspacePage};
use crate::ui::{LandingRedirect, RouteGuard};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Workspace route behind its access rule
#[component]
fn Guarded(route: AppRoute) -> impl IntoView {
    view! {
        <RouteGuard route=route>
            <WorkspacePage route=route/>
        </RouteGuard>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Session state shared by every page
    provide_auth_context();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/civic-console.css"/>

        // sets the document title
        <Title text="Civic Console"/>

        <Router>
            <Routes fallback=|| view! { <LandingRedirect/> }>
                // Public routes
                <Route path=path!("/") view=LandingPage/>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/register") view=RegisterPage/>

                // Any signed-in role
                <Route path=path!("/report") view=|| view! { <Guarded route=AppRoute::ReportIssue/> }/>
                <Route path=path!("/notifications") view=|| view! { <Guarded route=AppRoute::Notifications/> }/>
                <Route path=path!("/profile") view=|| view! { <Guarded route=AppRoute::Profile/> }/>

                // Role workspaces
                <Route path=path!("/collector") view=|| view! { <Guarded route=AppRoute::CollectorDashboard/> }/>
                <Route path=path!("/collector/reports") view=|| view! { <Guarded route=AppRoute::ReportTriage/> }/>
                <Route path=path!("/department") view=|| view! { <Guarded route=AppRoute::DepartmentDashboard/> }/>
                <Route path=path!("/tasks") view=|| view! { <Guarded route=AppRoute::TaskBoard/> }/>
                <Route path=path!("/staff") view=|| view! { <Guarded route=AppRoute::StaffDashboard/> }/>
            </Routes>
        </Router>
    }
}
