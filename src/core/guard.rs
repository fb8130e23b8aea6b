//! Route gating decisions
//!
//! Pure function of the requested route's access rule and the current
//! session state. The UI guard calls it on every state change.

use super::provider::SessionState;
use super::routes::{AppRoute, RouteAccess, canonical_route};

/// Outcome of gating a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the requested view
    Render,
    /// Do not show the requested view; go here instead
    Redirect(AppRoute),
}

/// Decide whether `state` may see a route with `access`.
///
/// Anonymous and initializing sessions are sent to the entry route.
/// Authenticated sessions lacking the required role are sent to their own
/// canonical route, which always admits them.
pub fn decide(access: RouteAccess, state: &SessionState) -> GuardDecision {
    let identity = match (access, state) {
        (RouteAccess::Public, _) => return GuardDecision::Render,
        (_, SessionState::Initializing | SessionState::Anonymous) => {
            return GuardDecision::Redirect(AppRoute::ENTRY);
        }
        (_, SessionState::Authenticated(identity)) => identity,
    };

    match access {
        RouteAccess::Roles(roles) if !roles.contains(&identity.role) => {
            GuardDecision::Redirect(canonical_route(identity.role))
        }
        _ => GuardDecision::Render,
    }
}

/// Gate a concrete route
pub fn decide_route(route: AppRoute, state: &SessionState) -> GuardDecision {
    decide(route.access(), state)
}
