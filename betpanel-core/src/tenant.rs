//! Core tenant types for betpanel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Reserved browser-path prefix for the Secondary tenant. Every other
/// path belongs to the Primary tenant.
pub const SECONDARY_PREFIX: &str = "/1win";

/// One of the two application identities served by the console.
///
/// The set is fixed at compile time: `Primary` (SportyBet, cookie
/// sessions) and `Secondary` (1Win, bearer tokens). There is no open
/// tenant registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tenant {
    Primary,
    Secondary,
}

impl Tenant {
    /// The persisted selector value (`activeApp` storage key).
    pub fn as_str(self) -> &'static str {
        match self {
            Tenant::Primary => "sportybet",
            Tenant::Secondary => "1win",
        }
    }

    /// Human-facing label used by the shell header.
    pub fn label(self) -> &'static str {
        match self {
            Tenant::Primary => "SportyBet",
            Tenant::Secondary => "1Win Control Panel",
        }
    }

    pub fn other(self) -> Tenant {
        match self {
            Tenant::Primary => Tenant::Secondary,
            Tenant::Secondary => Tenant::Primary,
        }
    }

    /// Login route for this tenant. A lost session always redirects
    /// here, never to the other tenant's login.
    pub fn login_path(self) -> &'static str {
        match self {
            Tenant::Primary => "/login",
            Tenant::Secondary => "/1win/login",
        }
    }

    /// Dashboard root for this tenant (post-login landing).
    pub fn home_path(self) -> &'static str {
        match self {
            Tenant::Primary => "/",
            Tenant::Secondary => "/1win",
        }
    }

    /// Classify a browser path: `Secondary` iff the path is `/1win`
    /// itself or sits under it. `/1winx` is Primary.
    pub fn of_path(path: &str) -> Tenant {
        let rest = match path.strip_prefix(SECONDARY_PREFIX) {
            Some(rest) => rest,
            None => return Tenant::Primary,
        };
        if rest.is_empty() || rest.starts_with('/') {
            Tenant::Secondary
        } else {
            Tenant::Primary
        }
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tenant {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sportybet" => Ok(Tenant::Primary),
            "1win" => Ok(Tenant::Secondary),
            other => Err(PanelError::invalid_tenant(other)),
        }
    }
}

impl TryFrom<String> for Tenant {
    type Error = PanelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Tenant> for String {
    fn from(t: Tenant) -> String {
        t.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_prefix_classifies_paths() {
        assert_eq!(Tenant::of_path("/1win"), Tenant::Secondary);
        assert_eq!(Tenant::of_path("/1win/login"), Tenant::Secondary);
        assert_eq!(Tenant::of_path("/1win/users/edit/42"), Tenant::Secondary);
        assert_eq!(Tenant::of_path("/"), Tenant::Primary);
        assert_eq!(Tenant::of_path("/users"), Tenant::Primary);
        assert_eq!(Tenant::of_path("/login"), Tenant::Primary);
        // Prefix match must respect the path segment boundary.
        assert_eq!(Tenant::of_path("/1winx"), Tenant::Primary);
    }

    #[test]
    fn selector_round_trip() {
        assert_eq!("sportybet".parse::<Tenant>().unwrap(), Tenant::Primary);
        assert_eq!("1win".parse::<Tenant>().unwrap(), Tenant::Secondary);
        assert!("twowin".parse::<Tenant>().is_err());
        assert!("".parse::<Tenant>().is_err());
    }

    #[test]
    fn login_paths_are_tenant_local() {
        assert_eq!(Tenant::Primary.login_path(), "/login");
        assert_eq!(Tenant::Secondary.login_path(), "/1win/login");
        assert_eq!(Tenant::Primary.other(), Tenant::Secondary);
        assert_eq!(Tenant::Secondary.other(), Tenant::Primary);
    }
}
