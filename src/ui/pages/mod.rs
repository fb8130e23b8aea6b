//! Application pages module
//!
//! This module contains all the page components for the console:
//! - Landing page (home)
//! - Login page
//! - Register page
//! - Workspace pages for the signed-in roles

mod landing;
mod layout;
mod login;
mod register;
mod workspace;

pub use landing::LandingPage;
pub use layout::PageShell;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use workspace::WorkspacePage;
