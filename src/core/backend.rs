//! Authentication backend seam
//!
//! The console does not own credentials. It asks the backend to check a
//! password or create an account and receives a profile back. The HTTP
//! implementation talks to `POST {base}/auth/login` and
//! `POST {base}/auth/register`.

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::identity::{Identity, Role};
use super::validation::RegistrationForm;

/// API base path used by the browser build, overridable at compile time
pub const DEFAULT_API_BASE: &str = match option_env!("CIVIC_API_BASE") {
    Some(base) => base,
    None => "/api",
};

/// Error code the backend uses for accounts pending verification
const CODE_NOT_VERIFIED: &str = "ACCOUNT_NOT_VERIFIED";

/// Profile returned by the backend after a successful check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Backend role vocabulary (`department_head`, ...)
    pub role: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default, alias = "departmentId")]
    pub department_id: Option<String>,
}

impl BackendProfile {
    /// Turn the profile into an identity. Unknown roles are a backend
    /// contract violation, never guessed at.
    pub fn into_identity(self) -> Result<Identity, AuthError> {
        let role = Role::from_backend(&self.role).ok_or_else(|| {
            AuthError::BackendUnavailable(format!("unrecognized role '{}'", self.role))
        })?;

        Ok(Identity::new(
            self.id,
            self.email,
            self.name,
            role,
            self.phone_number,
            self.department_id,
        ))
    }
}

/// The authentication collaborator
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn authenticate(&self, email: &str, password: &str)
    -> Result<BackendProfile, AuthError>;

    async fn create_account(&self, form: &RegistrationForm) -> Result<BackendProfile, AuthError>;
}

/// Login request
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Register request
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    department_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manages_department: Option<&'a str>,
}

impl<'a> From<&'a RegistrationForm> for RegisterRequest<'a> {
    fn from(form: &'a RegistrationForm) -> Self {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        Self {
            email: form.email.trim(),
            password: &form.password,
            name: non_empty(&form.name),
            phone_number: non_empty(&form.phone_number),
            role: form.role.as_backend(),
            department_id: non_empty(&form.department_id),
            manages_department: non_empty(&form.manages_department),
        }
    }
}

/// Auth response, either the bare profile or `{ "user": profile }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthResponse {
    Wrapped { user: BackendProfile },
    Bare(BackendProfile),
}

impl From<AuthResponse> for BackendProfile {
    fn from(resp: AuthResponse) -> Self {
        match resp {
            AuthResponse::Wrapped { user } => user,
            AuthResponse::Bare(profile) => profile,
        }
    }
}

/// Error body returned by the backend
#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default, alias = "message")]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

/// Map a non-success HTTP status and error body to an `AuthError`
fn error_from_status(status: u16, body: &str) -> AuthError {
    let api_error: ApiError = serde_json::from_str(body).unwrap_or_default();

    match status {
        401 => AuthError::InvalidCredentials,
        403 if api_error.code.as_deref() == Some(CODE_NOT_VERIFIED) => {
            AuthError::AccountNotVerified
        }
        403 => AuthError::InvalidCredentials,
        409 => AuthError::validation(
            "email",
            api_error
                .error
                .unwrap_or_else(|| "Email is already registered".to_string()),
        ),
        400 | 422 => AuthError::validation(
            api_error.field.unwrap_or_else(|| "form".to_string()),
            api_error
                .error
                .unwrap_or_else(|| "Please check the form and try again".to_string()),
        ),
        _ => AuthError::BackendUnavailable(format!("HTTP {}", status)),
    }
}

fn parse_profile(body: &str) -> Result<BackendProfile, AuthError> {
    serde_json::from_str::<AuthResponse>(body)
        .map(BackendProfile::from)
        .map_err(|e| AuthError::BackendUnavailable(format!("unexpected response: {}", e)))
}

/// Backend reached over HTTP with `gloo-net`
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    base_url: String,
}

impl Default for HttpAuthBackend {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<BackendProfile, AuthError> {
        use gloo_net::http::Request;

        let resp = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| AuthError::BackendUnavailable(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::BackendUnavailable(e.to_string()))?;

        let text = resp
            .text()
            .await
            .map_err(|e| AuthError::BackendUnavailable(e.to_string()))?;

        if resp.ok() {
            parse_profile(&text)
        } else {
            Err(error_from_status(resp.status(), &text))
        }
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<BackendProfile, AuthError> {
        let request = LoginRequest {
            email: email.trim(),
            password,
        };
        self.post("/auth/login", &request).await
    }

    async fn create_account(&self, form: &RegistrationForm) -> Result<BackendProfile, AuthError> {
        let request = RegisterRequest::from(form);
        self.post("/auth/register", &request).await
    }
}
