//! Identity and role model
//!
//! `Role` is the one closed vocabulary for roles in the console. Its
//! serialized (persisted) form is camelCase; the backend speaks snake_case,
//! and `Role::from_backend` / `Role::as_backend` are the only place the two
//! vocabularies meet.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Citizen submitting reports
    Public,
    /// Triages incoming reports and assigns them to departments
    Collector,
    /// Manages one department and its staff
    DepartmentHead,
    /// Works tasks assigned within a department
    Staff,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Public,
        Role::Collector,
        Role::DepartmentHead,
        Role::Staff,
    ];

    /// Parse a role string as sent by the backend (`department_head`, ...)
    pub fn from_backend(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Role::Public),
            "collector" => Some(Role::Collector),
            "department_head" => Some(Role::DepartmentHead),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// Role string understood by the backend
    pub fn as_backend(&self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::Collector => "collector",
            Role::DepartmentHead => "department_head",
            Role::Staff => "staff",
        }
    }

    /// Role string used by the console itself (matches the persisted form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::Collector => "collector",
            Role::DepartmentHead => "departmentHead",
            Role::Staff => "staff",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Public => "Citizen",
            Role::Collector => "Collector",
            Role::DepartmentHead => "Department Head",
            Role::Staff => "Staff",
        }
    }

    /// Whether identities with this role belong to a department
    pub fn has_department(&self) -> bool {
        !matches!(self, Role::Public)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
}

impl Identity {
    /// Build an identity, generating an id when none is supplied and
    /// deriving the display name from the email when the name is blank.
    ///
    /// A `public` identity never carries a department.
    pub fn new(
        id: Option<String>,
        email: impl Into<String>,
        name: Option<String>,
        role: Role,
        phone_number: Option<String>,
        department_id: Option<String>,
    ) -> Self {
        let email = email.into();
        let id = id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| derive_name(&email));
        let phone_number = phone_number.filter(|p| !p.trim().is_empty());
        let department_id = if role.has_department() {
            department_id.filter(|d| !d.trim().is_empty())
        } else {
            None
        };

        Self {
            id,
            email,
            name,
            role,
            phone_number,
            department_id,
        }
    }

    /// Structural check applied to identities read back from storage
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.email.trim().is_empty()
            && (self.role.has_department() || self.department_id.is_none())
    }
}

/// Display name derived from the local part of an email address
fn derive_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let name = local
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        email.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_role_translation() {
        for role in Role::ALL {
            assert_eq!(Role::from_backend(role.as_backend()), Some(role));
        }
        assert_eq!(Role::from_backend("departmentHead"), None);
        assert_eq!(Role::from_backend("admin"), None);
    }

    #[test]
    fn test_role_serialized_form() {
        assert_eq!(
            serde_json::to_string(&Role::DepartmentHead).unwrap(),
            "\"departmentHead\""
        );
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
        assert!(serde_json::from_str::<Role>("\"department_head\"").is_err());
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_identity_persisted_layout() {
        let identity = Identity::new(
            Some("u-1".to_string()),
            "head@example.com",
            Some("Asha".to_string()),
            Role::DepartmentHead,
            Some("5551234567".to_string()),
            Some("roads".to_string()),
        );

        let value = serde_json::to_value(&identity).unwrap();
        assert_eq!(value["id"], "u-1");
        assert_eq!(value["role"], "departmentHead");
        assert_eq!(value["phoneNumber"], "5551234567");
        assert_eq!(value["departmentId"], "roads");
    }

    #[test]
    fn test_public_identity_drops_department() {
        let identity = Identity::new(
            None,
            "citizen@example.com",
            None,
            Role::Public,
            None,
            Some("roads".to_string()),
        );
        assert!(identity.department_id.is_none());
        assert!(identity.is_well_formed());
    }

    #[test]
    fn test_generated_id_and_derived_name() {
        let identity = Identity::new(
            Some("  ".to_string()),
            "jane.doe@example.com",
            Some("   ".to_string()),
            Role::Staff,
            Some(String::new()),
            Some("water".to_string()),
        );
        assert!(Uuid::parse_str(&identity.id).is_ok());
        assert_eq!(identity.name, "Jane Doe");
        assert!(identity.phone_number.is_none());
        assert_eq!(identity.department_id.as_deref(), Some("water"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Identity::new(None, "a@example.com", None, Role::Public, None, None);
        let b = Identity::new(None, "a@example.com", None, Role::Public, None, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_well_formed_rejects_public_with_department() {
        let mut identity = Identity::new(
            Some("1".to_string()),
            "x@example.com",
            None,
            Role::Public,
            None,
            None,
        );
        identity.department_id = Some("roads".to_string());
        assert!(!identity.is_well_formed());
    }
}
