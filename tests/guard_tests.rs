use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use dashboard_gate::{
    Decision, MemoryTokenStore, TokenStore, Verdict, evaluate, guard,
    scope::RedirectTarget,
    store::{LEGACY_TOKEN_KEY, TOKEN_KEY},
};

// --- Helper Functions ---

fn token_for(role: &str) -> String {
    let payload = format!(r#"{{"role":"{role}","name":"Test User","email":"t@example.com"}}"#);
    format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", URL_SAFE_NO_PAD.encode(payload))
}

fn decide(path: &str, role: &str) -> Decision {
    evaluate(path, Some(&token_for(role))).decision
}

fn redirect(target: RedirectTarget) -> Decision {
    Decision::Redirect(target)
}

// --- No Token ---

#[test]
fn test_dashboard_without_token_goes_to_login() {
    for path in [
        "/dashboard",
        "/dashboard/",
        "/dashboard/x",
        "/dashboard/customer/profile",
        "/dashboard/admin/dashboard",
        "/dashboard/settings/api-keys",
    ] {
        assert_eq!(
            evaluate(path, None),
            Verdict {
                decision: redirect(RedirectTarget::Login),
                clear_token: false,
            },
            "path {path}"
        );
    }
}

#[test]
fn test_login_without_token_passes() {
    assert_eq!(evaluate("/login", None).decision, Decision::Continue);
}

#[test]
fn test_empty_token_counts_as_absent() {
    assert_eq!(
        evaluate("/dashboard/orders", Some("")).decision,
        redirect(RedirectTarget::Login)
    );
    assert_eq!(evaluate("/login", Some("")), evaluate("/login", None));
}

// --- Invalid Claims ---

#[test]
fn test_undecodable_token_is_rejected_and_cleared() {
    for path in ["/dashboard", "/dashboard/customer/profile", "/login"] {
        assert_eq!(
            evaluate(path, Some("not-a-jwt")),
            Verdict {
                decision: redirect(RedirectTarget::Login),
                clear_token: true,
            },
            "path {path}"
        );
    }
}

#[test]
fn test_token_without_role_is_rejected_and_cleared() {
    let no_role = format!("h.{}.s", URL_SAFE_NO_PAD.encode(r#"{"name":"Nobody"}"#));
    let verdict = evaluate("/dashboard/orders", Some(&no_role));

    assert_eq!(verdict.decision, redirect(RedirectTarget::Login));
    assert!(verdict.clear_token);
}

#[test]
fn test_unknown_role_is_rejected() {
    let verdict = evaluate("/dashboard", Some(&token_for("superuser")));

    assert_eq!(verdict.decision, redirect(RedirectTarget::Login));
    assert!(verdict.clear_token);
}

// --- Login Page ---

#[test]
fn test_login_sends_each_role_home() {
    assert_eq!(decide("/login", "admin"), redirect(RedirectTarget::AdminDashboard));
    assert_eq!(decide("/login", "seller"), redirect(RedirectTarget::DashboardRoot));
    assert_eq!(decide("/login", "customer"), redirect(RedirectTarget::CustomerProfile));
}

// --- Customer ---

#[test]
fn test_customer_stays_in_customer_scope() {
    assert_eq!(decide("/dashboard/customer/profile", "customer"), Decision::Continue);
    assert_eq!(decide("/dashboard/customer/orders/7", "customer"), Decision::Continue);
}

#[test]
fn test_customer_outside_scope_goes_to_profile() {
    for path in [
        "/dashboard",
        "/dashboard/",
        "/dashboard/customer",
        "/dashboard/admin/dashboard",
        "/dashboard/orders",
    ] {
        assert_eq!(
            decide(path, "customer"),
            redirect(RedirectTarget::CustomerProfile),
            "path {path}"
        );
    }
}

// --- Admin ---

#[test]
fn test_admin_blocked_from_customer_scope() {
    assert_eq!(
        decide("/dashboard/customer/profile", "admin"),
        redirect(RedirectTarget::AdminDashboard)
    );
}

#[test]
fn test_admin_bounced_off_dashboard_root() {
    assert_eq!(decide("/dashboard", "admin"), redirect(RedirectTarget::AdminDashboard));
    assert_eq!(decide("/dashboard/", "admin"), redirect(RedirectTarget::AdminDashboard));
}

#[test]
fn test_admin_passes_elsewhere() {
    for path in [
        "/dashboard/admin/dashboard",
        "/dashboard/admin/users",
        "/dashboard/settings",
        "/dashboard/products",
    ] {
        assert_eq!(decide(path, "admin"), Decision::Continue, "path {path}");
    }
}

// --- Seller ---

#[test]
fn test_seller_blocked_from_scoped_trees() {
    assert_eq!(decide("/dashboard/admin/x", "seller"), redirect(RedirectTarget::DashboardRoot));
    assert_eq!(
        decide("/dashboard/customer/profile", "seller"),
        redirect(RedirectTarget::DashboardRoot)
    );
}

#[test]
fn test_seller_passes_on_root_and_own_pages() {
    for path in ["/dashboard", "/dashboard/", "/dashboard/products", "/dashboard/admin"] {
        assert_eq!(decide(path, "seller"), Decision::Continue, "path {path}");
    }
}

// --- Store Side Effects ---

#[test]
fn test_guard_clears_both_keys_for_bad_token() {
    let mut store = MemoryTokenStore::new()
        .with_token(TOKEN_KEY, "not-a-jwt")
        .with_token(LEGACY_TOKEN_KEY, "also-not-a-jwt");

    let decision = guard("/dashboard/customer/profile", &mut store);

    assert_eq!(decision, redirect(RedirectTarget::Login));
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(LEGACY_TOKEN_KEY), None);
    assert!(store.is_empty());
}

#[test]
fn test_guard_leaves_valid_token_alone() {
    let token = token_for("customer");
    let mut store = MemoryTokenStore::new().with_token(TOKEN_KEY, &token);

    let decision = guard("/login", &mut store);

    assert_eq!(decision, redirect(RedirectTarget::CustomerProfile));
    assert_eq!(store.get(TOKEN_KEY), Some(token));
}

#[test]
fn test_guard_reads_legacy_key() {
    let mut store = MemoryTokenStore::new().with_token(LEGACY_TOKEN_KEY, &token_for("seller"));

    assert_eq!(guard("/dashboard/admin/x", &mut store), redirect(RedirectTarget::DashboardRoot));
}

#[test]
fn test_guard_prefers_current_key() {
    let mut store = MemoryTokenStore::new()
        .with_token(TOKEN_KEY, &token_for("admin"))
        .with_token(LEGACY_TOKEN_KEY, &token_for("customer"));

    assert_eq!(guard("/login", &mut store), redirect(RedirectTarget::AdminDashboard));
}

#[test]
fn test_guard_is_repeatable() {
    let token = token_for("seller");
    let first = evaluate("/dashboard/customer/a", Some(&token));
    let second = evaluate("/dashboard/customer/a", Some(&token));

    assert_eq!(first, second);
}

// --- Payload Shape ---

#[test]
fn test_array_payload_is_rejected_and_cleared() {
    for payload in [r#"["admin"]"#, r#"[]"#, r#""admin""#] {
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload));

        assert_eq!(
            evaluate("/dashboard/admin/users", Some(&token)),
            Verdict {
                decision: redirect(RedirectTarget::Login),
                clear_token: true,
            },
            "payload {payload}"
        );
    }
}

#[test]
fn test_duplicate_role_uses_last_value() {
    let token = format!(
        "h.{}.s",
        URL_SAFE_NO_PAD.encode(r#"{"role":"admin","role":"customer"}"#)
    );

    assert_eq!(
        evaluate("/dashboard/customer/profile", Some(&token)),
        Verdict {
            decision: Decision::Continue,
            clear_token: false,
        }
    );
}
