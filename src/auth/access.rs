use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    navigation::{Route, ADMIN_ROLE, USER_ROLE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    Expired,
    RoleMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(DenialReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }
}

/// Lowercases both sides; no locale folding.
pub fn roles_match(actual: &str, required: &str) -> bool {
    actual.to_lowercase() == required.to_lowercase()
}

/// Expiry is checked first so an expired token is denied whatever its role.
pub fn evaluate_access(claims: &Claims, required_role: Option<&str>, now_ms: i64) -> AccessDecision {
    if claims.is_expired_at(now_ms) {
        return AccessDecision::Denied(DenialReason::Expired);
    }

    if let Some(required) = required_role {
        let matches = claims
            .effective_role()
            .is_some_and(|role| roles_match(role, required));
        if !matches {
            return AccessDecision::Denied(DenialReason::RoleMismatch);
        }
    }

    AccessDecision::Allowed
}

pub fn require_access(claims: &Claims, required_role: Option<&str>, now_ms: i64) -> AppResult<()> {
    match evaluate_access(claims, required_role, now_ms) {
        AccessDecision::Allowed => Ok(()),
        AccessDecision::Denied(DenialReason::Expired) => Err(AppError::TokenExpired),
        AccessDecision::Denied(DenialReason::RoleMismatch) => Err(AppError::RoleMismatch {
            required: required_role.unwrap_or_default().to_string(),
            actual: claims.effective_role().map(str::to_string),
        }),
    }
}

/// Dashboard a signed-in user lands on. Unknown roles have none.
pub fn landing_route(claims: &Claims) -> Option<Route> {
    let role = claims.effective_role()?.trim().to_lowercase();
    match role.as_str() {
        ADMIN_ROLE => Some(Route::AdminDashboard),
        USER_ROLE => Some(Route::UserDashboard),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::RoleClaim;

    const NOW_MS: i64 = 1_700_000_000_000;
    const NOW_S: i64 = NOW_MS / 1000;

    fn claims_with(role: Option<RoleClaim>, exp: Option<i64>) -> Claims {
        Claims {
            role,
            exp: exp.map(|seconds| seconds as f64),
            ..Claims::default()
        }
    }

    fn single(role: &str) -> Option<RoleClaim> {
        Some(RoleClaim::Single(role.to_string()))
    }

    #[test]
    fn test_expired_denied_regardless_of_role() {
        for role in ["admin", "user", ""] {
            let claims = claims_with(single(role), Some(NOW_S - 10));
            assert_eq!(
                evaluate_access(&claims, None, NOW_MS),
                AccessDecision::Denied(DenialReason::Expired)
            );
            assert_eq!(
                evaluate_access(&claims, Some("admin"), NOW_MS),
                AccessDecision::Denied(DenialReason::Expired)
            );
        }
    }

    #[test]
    fn test_missing_role_denied_when_required() {
        let claims = claims_with(None, Some(NOW_S + 3600));
        assert_eq!(
            evaluate_access(&claims, Some("admin"), NOW_MS),
            AccessDecision::Denied(DenialReason::RoleMismatch)
        );
    }

    #[test]
    fn test_missing_role_allowed_without_requirement() {
        let claims = claims_with(None, Some(NOW_S + 3600));
        assert!(evaluate_access(&claims, None, NOW_MS).is_allowed());
    }

    #[test]
    fn test_role_comparison_is_case_insensitive() {
        let claims = claims_with(single("ADMIN"), Some(NOW_S + 3600));
        assert!(evaluate_access(&claims, Some("admin"), NOW_MS).is_allowed());
        assert!(evaluate_access(&claims, Some("Admin"), NOW_MS).is_allowed());
    }

    #[test]
    fn test_only_first_listed_role_counts() {
        let claims = claims_with(
            Some(RoleClaim::Many(vec!["user".into(), "admin".into()])),
            Some(NOW_S + 3600),
        );
        assert_eq!(
            evaluate_access(&claims, Some("admin"), NOW_MS),
            AccessDecision::Denied(DenialReason::RoleMismatch)
        );
    }

    #[test]
    fn test_token_without_exp_never_expires() {
        let claims = claims_with(single("admin"), None);
        assert!(evaluate_access(&claims, Some("admin"), i64::MAX).is_allowed());
    }

    #[test]
    fn test_require_access_maps_errors() {
        let expired = claims_with(single("admin"), Some(NOW_S - 1));
        assert_eq!(require_access(&expired, None, NOW_MS), Err(AppError::TokenExpired));

        let user = claims_with(single("user"), Some(NOW_S + 60));
        assert_eq!(
            require_access(&user, Some("admin"), NOW_MS),
            Err(AppError::RoleMismatch {
                required: "admin".into(),
                actual: Some("user".into())
            })
        );
    }

    #[test]
    fn test_landing_route_by_role() {
        assert_eq!(
            landing_route(&claims_with(single(" Admin "), None)),
            Some(Route::AdminDashboard)
        );
        assert_eq!(
            landing_route(&claims_with(single("user"), None)),
            Some(Route::UserDashboard)
        );
        assert_eq!(landing_route(&claims_with(single("moderator"), None)), None);
        assert_eq!(landing_route(&claims_with(None, None)), None);
    }
}
