//! Screen states for the storefront session.

use serde::{Deserialize, Serialize};

/// The screen a session is currently on.
///
/// `Login` is the only screen reachable while logged out. `Admin` is only
/// reachable by the admin identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Login,
    Shop,
    Cart,
    Admin,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Shop => write!(f, "shop"),
            Self::Cart => write!(f, "cart"),
            Self::Admin => write!(f, "admin"),
        }
    }
}
