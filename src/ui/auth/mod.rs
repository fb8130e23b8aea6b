//! Authentication UI module
//!
//! This module provides authentication-related components and context
//! for the console frontend.

mod context;
mod login_form;
mod register_form;
mod user_menu;

pub use context::{
    AuthContext, ConsoleProvider, provide_auth_context, use_auth_context,
    use_redirect_when_signed_in,
};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use user_menu::UserMenu;
