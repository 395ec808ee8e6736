use serde::{Deserialize, Serialize};

use crate::user::{UserId, UserRole};

pub const SESSION_COOKIE_NAME: &str = "ridedash_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountRole {
    Admin,
    Rider,
    Driver,
}

impl AccountRole {
    /// Where a freshly signed-in account lands.
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/analytics",
            Self::Driver => "/driver/analytics",
            Self::Rider => "/rider/analytics",
        }
    }
}

impl From<UserRole> for AccountRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Rider => Self::Rider,
            UserRole::Driver => Self::Driver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
}

impl UserSession {
    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }

    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_land_on_their_analytics() {
        assert_eq!(AccountRole::Admin.home_path(), "/admin/analytics");
        assert_eq!(AccountRole::from(UserRole::Driver).home_path(), "/driver/analytics");
        assert_eq!(AccountRole::from(UserRole::Rider).home_path(), "/rider/analytics");
    }

    #[test]
    fn initial_is_uppercased() {
        let session = UserSession {
            user_id: UserId::new("usr_006"),
            name: "nusrat Jahan".to_string(),
            email: "nusrat.j@example.com".to_string(),
            role: AccountRole::Rider,
        };
        assert_eq!(session.initial(), "N");
        assert!(!session.is_admin());
    }
}
