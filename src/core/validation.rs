//! Client-side validation of login and registration forms
//!
//! Runs before any backend call. Every check reports the form field it
//! belongs to so the UI can show messages next to the right input.

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::identity::Role;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of digits in a contact phone number
pub const PHONE_DIGITS: usize = 10;

/// Maximum display name length
pub const MAX_NAME_LENGTH: usize = 100;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_CONFIRM_PASSWORD: &str = "confirm_password";
pub const FIELD_NAME: &str = "name";
pub const FIELD_PHONE: &str = "phone_number";
pub const FIELD_DEPARTMENT: &str = "department_id";
pub const FIELD_MANAGES_DEPARTMENT: &str = "managesDepartment";

/// Data submitted from the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub role: Role,
    /// Department a staff member belongs to
    pub department_id: Option<String>,
    /// Department a department head manages
    pub manages_department: Option<String>,
}

impl RegistrationForm {
    /// Empty form for the given role
    pub fn new(role: Role) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            name: None,
            phone_number: None,
            role,
            department_id: None,
            manages_department: None,
        }
    }

    /// Department the new identity will belong to
    pub fn department(&self) -> Option<String> {
        match self.role {
            Role::Staff => self.department_id.clone(),
            Role::DepartmentHead => self
                .manages_department
                .clone()
                .or_else(|| self.department_id.clone()),
            Role::Collector => self.department_id.clone(),
            Role::Public => None,
        }
    }
}

/// A failed check on a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<FieldError> for AuthError {
    fn from(err: FieldError) -> Self {
        AuthError::validation(err.field, err.message)
    }
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::new(FIELD_EMAIL, "Email is required"));
    }

    let invalid = || FieldError::new(FIELD_EMAIL, "Please enter a valid email");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a new password
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        Err(FieldError::new(FIELD_PASSWORD, "Password is required"))
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        Err(FieldError::new(
            FIELD_PASSWORD,
            format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        ))
    } else {
        Ok(())
    }
}

/// Validate an optional phone number. Spaces, dashes and parentheses are
/// ignored; what remains must be exactly `PHONE_DIGITS` digits.
pub fn validate_phone(phone: Option<&str>) -> Result<(), FieldError> {
    let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let mut digits = 0;
    for c in phone.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => {
                return Err(FieldError::new(
                    FIELD_PHONE,
                    "Phone number may only contain digits",
                ));
            }
        }
    }

    if digits != PHONE_DIGITS {
        return Err(FieldError::new(
            FIELD_PHONE,
            format!("Phone number must have {} digits", PHONE_DIGITS),
        ));
    }

    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Role-dependent department fields
pub fn validate_role_fields(form: &RegistrationForm) -> Result<(), FieldError> {
    match form.role {
        Role::Staff if is_blank(&form.department_id) => Err(FieldError::new(
            FIELD_DEPARTMENT,
            "Staff members must select a department",
        )),
        Role::DepartmentHead if is_blank(&form.manages_department) => Err(FieldError::new(
            FIELD_MANAGES_DEPARTMENT,
            "Department heads must select the department they manage",
        )),
        _ => Ok(()),
    }
}

/// All failed checks, in form order
pub fn registration_errors(form: &RegistrationForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_email(&form.email) {
        errors.push(e);
    }

    if let Err(e) = validate_password(&form.password) {
        errors.push(e);
    } else if form.password != form.confirm_password {
        errors.push(FieldError::new(
            FIELD_CONFIRM_PASSWORD,
            "Passwords do not match",
        ));
    }

    if let Some(name) = form.name.as_deref()
        && name.trim().chars().count() > MAX_NAME_LENGTH
    {
        errors.push(FieldError::new(
            FIELD_NAME,
            format!("Name must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }

    if let Err(e) = validate_phone(form.phone_number.as_deref()) {
        errors.push(e);
    }

    if let Err(e) = validate_role_fields(form) {
        errors.push(e);
    }

    errors
}

/// Validate a registration form, reporting the first failing field
pub fn validate_registration(form: &RegistrationForm) -> Result<(), AuthError> {
    match registration_errors(form).into_iter().next() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Validate login input. Only presence and email shape are checked here;
/// the password policy belongs to registration.
pub fn validate_login(email: &str, password: &str) -> Result<(), AuthError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(AuthError::validation(FIELD_PASSWORD, "Password is required"));
    }
    Ok(())
}
