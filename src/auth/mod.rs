pub mod access;
pub mod claims;
pub mod guard;
pub mod jwt;

pub use access::{evaluate_access, landing_route, require_access, AccessDecision, DenialReason};
pub use claims::{Claims, RoleClaim, RoleKey, ROLE_CLAIM_KEYS};
pub use guard::{GuardDenial, GuardState, RouteGuard, View, CHECKING_PLACEHOLDER};
pub use jwt::decode_claims;
