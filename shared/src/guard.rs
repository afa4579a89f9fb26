//! Route gating by authentication state.

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Signed-in operators only.
    Protected,
    /// Signed-out visitors only, i.e. the login view.
    GuestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

pub fn decide(access: RouteAccess, authenticated: bool) -> GuardDecision {
    match (access, authenticated) {
        (RouteAccess::Protected, false) => GuardDecision::RedirectToLogin,
        (RouteAccess::GuestOnly, true) => GuardDecision::RedirectToHome,
        _ => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_routes_need_a_session() {
        assert_eq!(decide(RouteAccess::Protected, false), GuardDecision::RedirectToLogin);
        assert_eq!(decide(RouteAccess::Protected, true), GuardDecision::Allow);
    }

    #[test]
    fn login_view_sends_signed_in_users_home() {
        assert_eq!(decide(RouteAccess::GuestOnly, true), GuardDecision::RedirectToHome);
        assert_eq!(decide(RouteAccess::GuestOnly, false), GuardDecision::Allow);
    }

    #[test]
    fn public_routes_are_always_allowed() {
        assert_eq!(decide(RouteAccess::Public, false), GuardDecision::Allow);
        assert_eq!(decide(RouteAccess::Public, true), GuardDecision::Allow);
    }
}
