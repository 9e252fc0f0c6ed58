//! The console's route table: two disjoint tenant subtrees plus a
//! shared fallback.

use betpanel_core::tenant::Tenant;

/// Views the console can mount. Parameterized variants carry the path
/// segment they were matched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    AllUsers,
    AddUser,
    EditUser(String),
    ActiveUsers,
    DisabledUsers,
    ExpiredUsers,
    AllAdmins,
    WebsiteUsers,
    IosHomeScreen,
    MatchUploads,
    UserAddons(String),
    PasswordChangeRequests,
    DeviceRequests,
    PendingRegistrations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Render without a session check.
    Public { tenant: Tenant, view: View },
    /// Render behind that tenant's route guard.
    Protected { tenant: Tenant, view: View },
    /// Navigate elsewhere instead of rendering.
    Redirect(String),
}

/// Classify `path`. `primary_authenticated` drives the two places the
/// table consults a session: the Primary login route (which bounces an
/// already-authenticated user to the dashboard) and the wildcard
/// fallback.
///
/// The wildcard consults only the Primary session; a user signed into
/// Secondary alone still lands on `/login` from an unmatched path.
pub fn match_path(path: &str, primary_authenticated: bool) -> RouteOutcome {
    let path = normalize(path);

    if let Some(rest) = secondary_rest(path) {
        return match_secondary(rest, primary_authenticated);
    }

    let protected = |view: View| RouteOutcome::Protected {
        tenant: Tenant::Primary,
        view,
    };

    match path {
        "/login" => {
            if primary_authenticated {
                RouteOutcome::Redirect("/".to_string())
            } else {
                RouteOutcome::Public {
                    tenant: Tenant::Primary,
                    view: View::Login,
                }
            }
        }
        "/" => protected(View::Dashboard),
        "/users" => protected(View::AllUsers),
        "/addUser" => protected(View::AddUser),
        "/activeUsers" => protected(View::ActiveUsers),
        "/disableUsers" => protected(View::DisabledUsers),
        "/expiredUsers" => protected(View::ExpiredUsers),
        "/IOSHomeScreen" => protected(View::IosHomeScreen),
        "/match-uploaded" => protected(View::MatchUploads),
        "/password-change-requests" => protected(View::PasswordChangeRequests),
        "/device-requests" => protected(View::DeviceRequests),
        "/pending-registrations" => protected(View::PendingRegistrations),
        _ => {
            if let Some(user_id) = param(path, "/user-addons/") {
                return protected(View::UserAddons(user_id));
            }
            // Wildcard: Primary session only, never Secondary's.
            RouteOutcome::Redirect(if primary_authenticated { "/" } else { "/login" }.to_string())
        }
    }
}

fn match_secondary(rest: &str, primary_authenticated: bool) -> RouteOutcome {
    let protected = |view: View| RouteOutcome::Protected {
        tenant: Tenant::Secondary,
        view,
    };

    match rest {
        "/login" => RouteOutcome::Public {
            tenant: Tenant::Secondary,
            view: View::Login,
        },
        "" => protected(View::Dashboard),
        "/users" => protected(View::AllUsers),
        "/users/add" => protected(View::AddUser),
        "/users/website" => protected(View::WebsiteUsers),
        "/expired" => protected(View::ExpiredUsers),
        "/disabled" => protected(View::DisabledUsers),
        "/admins" => protected(View::AllAdmins),
        _ => {
            if let Some(id) = param(rest, "/users/edit/") {
                return protected(View::EditUser(id));
            }
            // Unmatched Secondary-prefixed paths fall through to the
            // shared wildcard, which ignores the Secondary session.
            RouteOutcome::Redirect(if primary_authenticated { "/" } else { "/login" }.to_string())
        }
    }
}

/// Trailing-slash tolerance; the root path stays `/`.
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// The rest of the path after the Secondary prefix, when the path
/// belongs to the Secondary subtree.
fn secondary_rest(path: &str) -> Option<&str> {
    match Tenant::of_path(path) {
        Tenant::Secondary => Some(path.strip_prefix(betpanel_core::SECONDARY_PREFIX)?),
        Tenant::Primary => None,
    }
}

/// Single trailing path parameter after a literal prefix.
fn param(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_login_bounces_when_authenticated() {
        assert_eq!(
            match_path("/login", true),
            RouteOutcome::Redirect("/".to_string())
        );
        assert_eq!(
            match_path("/login", false),
            RouteOutcome::Public {
                tenant: Tenant::Primary,
                view: View::Login
            }
        );
    }

    #[test]
    fn each_subtree_is_guarded_by_its_own_tenant() {
        assert_eq!(
            match_path("/users", false),
            RouteOutcome::Protected {
                tenant: Tenant::Primary,
                view: View::AllUsers
            }
        );
        assert_eq!(
            match_path("/1win/users", false),
            RouteOutcome::Protected {
                tenant: Tenant::Secondary,
                view: View::AllUsers
            }
        );
        assert_eq!(
            match_path("/1win", false),
            RouteOutcome::Protected {
                tenant: Tenant::Secondary,
                view: View::Dashboard
            }
        );
    }

    #[test]
    fn parameterized_routes_capture_their_segment() {
        assert_eq!(
            match_path("/1win/users/edit/42", false),
            RouteOutcome::Protected {
                tenant: Tenant::Secondary,
                view: View::EditUser("42".to_string())
            }
        );
        assert_eq!(
            match_path("/user-addons/u-9", false),
            RouteOutcome::Protected {
                tenant: Tenant::Primary,
                view: View::UserAddons("u-9".to_string())
            }
        );
        // Extra segments do not match the parameterized route.
        assert_eq!(
            match_path("/user-addons/u-9/extra", false),
            RouteOutcome::Redirect("/login".to_string())
        );
    }

    #[test]
    fn wildcard_considers_only_the_primary_session() {
        assert_eq!(
            match_path("/nope", false),
            RouteOutcome::Redirect("/login".to_string())
        );
        assert_eq!(
            match_path("/nope", true),
            RouteOutcome::Redirect("/".to_string())
        );
        // Even under the Secondary prefix.
        assert_eq!(
            match_path("/1win/nope", false),
            RouteOutcome::Redirect("/login".to_string())
        );
        assert_eq!(
            match_path("/1win/nope", true),
            RouteOutcome::Redirect("/".to_string())
        );
    }

    #[test]
    fn trailing_slashes_are_tolerated() {
        assert_eq!(
            match_path("/users/", false),
            RouteOutcome::Protected {
                tenant: Tenant::Primary,
                view: View::AllUsers
            }
        );
        assert_eq!(
            match_path("/1win/", false),
            RouteOutcome::Protected {
                tenant: Tenant::Secondary,
                view: View::Dashboard
            }
        );
    }
}
