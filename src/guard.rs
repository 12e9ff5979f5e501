use crate::{
    auth::{Claims, Role, try_decode_claims},
    scope::{LOGIN_PATH, RedirectTarget, RouteScope, classify, is_dashboard_path},
    store::{TokenStore, clear_tokens, read_token},
};

/// Decision
///
/// Outcome of one guard evaluation: let the navigation through, or send the
/// browser somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    Redirect(RedirectTarget),
}

/// Verdict
///
/// A [`Decision`] plus whether the stored token must be discarded. Only an
/// undecodable or role-less token sets `clear_token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub decision: Decision,
    pub clear_token: bool,
}

impl Verdict {
    fn pass() -> Self {
        Self {
            decision: Decision::Continue,
            clear_token: false,
        }
    }

    fn redirect(target: RedirectTarget) -> Self {
        Self {
            decision: Decision::Redirect(target),
            clear_token: false,
        }
    }

    fn reject() -> Self {
        Self {
            decision: Decision::Redirect(RedirectTarget::Login),
            clear_token: true,
        }
    }
}

/// evaluate
///
/// Pure access decision for one navigation.
///
/// Token checks run before any role rule. Role rules are tried in a fixed
/// order and the first match wins:
///
/// 1. `/login` with a valid session goes to the role's home page.
/// 2. Customers are confined to `/dashboard/customer/`.
/// 3. Admins are bounced out of the customer tree and off the bare root.
/// 4. Sellers are kept out of both the customer and admin trees.
pub fn evaluate(path: &str, token: Option<&str>) -> Verdict {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        if is_dashboard_path(path) {
            return Verdict::redirect(RedirectTarget::Login);
        }
        return Verdict::pass();
    };

    let role = match try_decode_claims(token) {
        Ok(Claims {
            role: Some(role), ..
        }) => role,
        Ok(_) => {
            tracing::debug!(path, "session token carries no role");
            return Verdict::reject();
        }
        Err(err) => {
            tracing::debug!(path, error = %err, "discarding undecodable session token");
            return Verdict::reject();
        }
    };

    if path == LOGIN_PATH {
        return Verdict::redirect(RedirectTarget::home(role));
    }

    let target = match (role, classify(path)) {
        (Role::Customer, RouteScope::Customer) => None,
        (Role::Customer, _) => Some(RedirectTarget::CustomerProfile),
        (Role::Admin, RouteScope::Customer | RouteScope::DashboardRoot) => {
            Some(RedirectTarget::AdminDashboard)
        }
        (Role::Seller, RouteScope::Customer | RouteScope::Admin) => {
            Some(RedirectTarget::DashboardRoot)
        }
        _ => None,
    };

    match target {
        Some(target) => Verdict::redirect(target),
        None => Verdict::pass(),
    }
}

/// guard
///
/// Reads the session token from `store`, evaluates the navigation and clears
/// both token keys when the token turned out to be unusable.
pub fn guard<S>(path: &str, store: &mut S) -> Decision
where
    S: TokenStore + ?Sized,
{
    let token = read_token(store);
    let verdict = evaluate(path, token.as_deref());

    if verdict.clear_token {
        clear_tokens(store);
    }

    verdict.decision
}
