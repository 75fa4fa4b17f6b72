//! Role names and role-based landing areas.

use serde::{Deserialize, Serialize};

/// Role granting access to the admin area.
pub const ADMIN_ROLE: &str = "Admin";

/// Default role for self-registered and externally created accounts.
pub const USER_ROLE: &str = "User";

/// Roles created at startup.
pub const BUILTIN_ROLES: [&str; 2] = [ADMIN_ROLE, USER_ROLE];

/// Area a signed-in account lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    AdminArea,
    UserArea,
}

impl RedirectTarget {
    /// `AdminArea` iff `"Admin"` is among `roles`, regardless of order.
    pub fn for_roles<S: AsRef<str>>(roles: &[S]) -> Self {
        if roles.iter().any(|r| r.as_ref() == ADMIN_ROLE) {
            Self::AdminArea
        } else {
            Self::UserArea
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::AdminArea => "/admin/users",
            Self::UserArea => "/user",
        }
    }
}

/// Primary role of an account: the first assigned one, `"User"` when none.
pub fn primary_role<S: AsRef<str>>(roles: &[S]) -> &str {
    roles.first().map(|r| r.as_ref()).unwrap_or(USER_ROLE)
}
