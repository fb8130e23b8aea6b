pub mod auth;
pub mod guard;
pub mod pages;

pub use guard::{LandingRedirect, RouteGuard, SessionPending};
