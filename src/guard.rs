//! Route access guard.
//!
//! One pure predicate decides every navigation. It never errors: a denied
//! navigation is always a redirect.

use campus_shared::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Unauthorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(RedirectTarget),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Decides whether a session may enter a route declaring `allowed` roles.
///
/// 1. no authenticated session (or no known role) → login
/// 2. route declares no roles → unauthorized (fail closed)
/// 3. role in `allowed` → allow
/// 4. otherwise → unauthorized
pub fn check_access(authenticated: bool, role: Option<Role>, allowed: &[Role]) -> AccessDecision {
    let Some(role) = role.filter(|_| authenticated) else {
        return AccessDecision::Redirect(RedirectTarget::Login);
    };
    if allowed.is_empty() {
        return AccessDecision::Redirect(RedirectTarget::Unauthorized);
    }
    if allowed.contains(&role) {
        AccessDecision::Allow
    } else {
        AccessDecision::Redirect(RedirectTarget::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_ONLY: &[Role] = &[Role::Admin];
    const EVERYONE: &[Role] = &[Role::Admin, Role::Student];

    #[test]
    fn permits_iff_authenticated_and_role_allowed() {
        let policies: [&[Role]; 4] = [&[], ADMIN_ONLY, &[Role::Student], EVERYONE];
        for allowed in policies {
            for role in Role::ALL {
                for authenticated in [true, false] {
                    let decision = check_access(authenticated, Some(role), allowed);
                    let expected = authenticated && allowed.contains(&role);
                    assert_eq!(decision.is_allowed(), expected, "{role:?} {allowed:?} {authenticated}");
                    if !expected {
                        assert!(matches!(decision, AccessDecision::Redirect(_)));
                    }
                }
            }
        }
    }

    #[test]
    fn student_cannot_assign_rooms() {
        assert_eq!(
            check_access(true, Some(Role::Student), ADMIN_ONLY),
            AccessDecision::Redirect(RedirectTarget::Unauthorized)
        );
    }

    #[test]
    fn unauthenticated_goes_to_login_before_anything_else() {
        assert_eq!(
            check_access(false, Some(Role::Admin), &[]),
            AccessDecision::Redirect(RedirectTarget::Login)
        );
        assert_eq!(
            check_access(true, None, EVERYONE),
            AccessDecision::Redirect(RedirectTarget::Login)
        );
    }

    #[test]
    fn routes_without_roles_fail_closed() {
        assert_eq!(
            check_access(true, Some(Role::Admin), &[]),
            AccessDecision::Redirect(RedirectTarget::Unauthorized)
        );
    }
}
