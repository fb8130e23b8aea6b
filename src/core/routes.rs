//! Navigation surface and role routing
//!
//! Every path the console serves is an `AppRoute` with a declared access
//! rule. The role to home-route mapping lives here and nowhere else.

use super::identity::{Identity, Role};

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone, signed in or not
    Public,
    /// Any signed-in identity
    Authenticated,
    /// Signed-in identities holding one of these roles
    Roles(&'static [Role]),
}

/// Routes of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    Register,
    ReportIssue,
    Notifications,
    Profile,
    CollectorDashboard,
    ReportTriage,
    DepartmentDashboard,
    TaskBoard,
    StaffDashboard,
}

impl AppRoute {
    pub const ALL: [AppRoute; 11] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::ReportIssue,
        AppRoute::Notifications,
        AppRoute::Profile,
        AppRoute::CollectorDashboard,
        AppRoute::ReportTriage,
        AppRoute::DepartmentDashboard,
        AppRoute::TaskBoard,
        AppRoute::StaffDashboard,
    ];

    /// Where anonymous visitors are sent
    pub const ENTRY: AppRoute = AppRoute::Login;

    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Home => "/",
            AppRoute::Login => "/login",
            AppRoute::Register => "/register",
            AppRoute::ReportIssue => "/report",
            AppRoute::Notifications => "/notifications",
            AppRoute::Profile => "/profile",
            AppRoute::CollectorDashboard => "/collector",
            AppRoute::ReportTriage => "/collector/reports",
            AppRoute::DepartmentDashboard => "/department",
            AppRoute::TaskBoard => "/tasks",
            AppRoute::StaffDashboard => "/staff",
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            AppRoute::Home | AppRoute::Login | AppRoute::Register => RouteAccess::Public,
            AppRoute::ReportIssue | AppRoute::Notifications | AppRoute::Profile => {
                RouteAccess::Authenticated
            }
            AppRoute::CollectorDashboard | AppRoute::ReportTriage => {
                RouteAccess::Roles(&[Role::Collector])
            }
            AppRoute::DepartmentDashboard => RouteAccess::Roles(&[Role::DepartmentHead]),
            AppRoute::TaskBoard => RouteAccess::Roles(&[Role::DepartmentHead, Role::Staff]),
            AppRoute::StaffDashboard => RouteAccess::Roles(&[Role::Staff]),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppRoute::Home => "Home",
            AppRoute::Login => "Sign In",
            AppRoute::Register => "Create Account",
            AppRoute::ReportIssue => "Report an Issue",
            AppRoute::Notifications => "Notifications",
            AppRoute::Profile => "Profile",
            AppRoute::CollectorDashboard => "Collector Dashboard",
            AppRoute::ReportTriage => "Report Triage",
            AppRoute::DepartmentDashboard => "Department Dashboard",
            AppRoute::TaskBoard => "Tasks",
            AppRoute::StaffDashboard => "Staff Dashboard",
        }
    }

    /// Look up a route by path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<AppRoute> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Whether an identity with `role` may see this route
    pub fn admits(&self, role: Role) -> bool {
        match self.access() {
            RouteAccess::Public | RouteAccess::Authenticated => true,
            RouteAccess::Roles(roles) => roles.contains(&role),
        }
    }
}

impl std::fmt::Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Home route of a role
pub fn canonical_route(role: Role) -> AppRoute {
    match role {
        Role::Collector => AppRoute::CollectorDashboard,
        Role::DepartmentHead => AppRoute::DepartmentDashboard,
        Role::Staff => AppRoute::StaffDashboard,
        Role::Public => AppRoute::ReportIssue,
    }
}

/// Where to send someone with no particular destination
pub fn landing_route(identity: Option<&Identity>) -> AppRoute {
    match identity {
        Some(identity) => canonical_route(identity.role),
        None => AppRoute::ENTRY,
    }
}

/// Navigation decision for a login or registration that may finish after
/// the user has moved on.
///
/// Captures the path at submit time. When the result arrives, navigation to
/// the landing route happens only if the user is still on that path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAuthRedirect {
    origin: String,
}

impl PostAuthRedirect {
    pub fn from_path(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination once authentication succeeded, or `None` when the user
    /// navigated elsewhere in the meantime
    pub fn destination(&self, current_path: &str, identity: &Identity) -> Option<AppRoute> {
        let same_place = match (
            AppRoute::from_path(&self.origin),
            AppRoute::from_path(current_path),
        ) {
            (Some(origin), Some(current)) => origin == current,
            _ => self.origin == current_path,
        };

        same_place.then(|| canonical_route(identity.role))
    }
}
