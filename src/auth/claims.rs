use serde::{Deserialize, Serialize};

pub const ROLE_CLAIM: &str = "role";
pub const LEGACY_ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
pub const LEGACY_NAME_IDENTIFIER_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

/// Where a role can live in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKey {
    Short,
    Legacy,
}

impl RoleKey {
    pub fn claim_name(&self) -> &'static str {
        match self {
            RoleKey::Short => ROLE_CLAIM,
            RoleKey::Legacy => LEGACY_ROLE_CLAIM,
        }
    }
}

/// Lookup order for the effective role. First present key wins.
pub const ROLE_CLAIM_KEYS: [RoleKey; 2] = [RoleKey::Short, RoleKey::Legacy];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    Single(String),
    Many(Vec<String>),
}

impl RoleClaim {
    /// An empty string does not count as a role, so lookup falls through to the next key.
    /// An empty list still counts: it is present but resolves to no role.
    pub fn is_present(&self) -> bool {
        match self {
            RoleClaim::Single(role) => !role.is_empty(),
            RoleClaim::Many(_) => true,
        }
    }

    /// Only index 0 of a list is significant.
    pub fn primary(&self) -> Option<&str> {
        let role = match self {
            RoleClaim::Single(role) => Some(role.as_str()),
            RoleClaim::Many(roles) => roles.first().map(String::as_str),
        };
        role.filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>, // Expiration time (seconds since epoch, may be fractional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    #[serde(default, rename = "role", skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleClaim>,
    #[serde(
        default,
        rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_role: Option<RoleClaim>,
    #[serde(
        default,
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub name_identifier: Option<String>,
}

impl Claims {
    pub fn role_claim(&self, key: RoleKey) -> Option<&RoleClaim> {
        match key {
            RoleKey::Short => self.role.as_ref(),
            RoleKey::Legacy => self.legacy_role.as_ref(),
        }
    }

    pub fn effective_role(&self) -> Option<&str> {
        ROLE_CLAIM_KEYS
            .iter()
            .find_map(|key| self.role_claim(*key).filter(|claim| claim.is_present()))
            .and_then(RoleClaim::primary)
    }

    /// User id for attributing likes and comments.
    pub fn subject(&self) -> Option<&str> {
        self.sub
            .as_deref()
            .or(self.name_identifier.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn expires_at_ms(&self) -> Option<f64> {
        self.exp.map(|exp| exp * 1000.0)
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms()
            .is_some_and(|exp_ms| exp_ms < now_ms as f64)
    }

    pub fn with_role(mut self, role: RoleClaim) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_legacy_role(mut self, role: RoleClaim) -> Self {
        self.legacy_role = Some(role);
        self
    }

    pub fn expiring_at(mut self, exp: f64) -> Self {
        self.exp = Some(exp);
        self
    }
}
