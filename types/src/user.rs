use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::filter::{Categorical, Choice, Record, RecordFilter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Rider,
    Driver,
}

impl Categorical for UserRole {
    const VARIANTS: &'static [Self] = &[Self::Rider, Self::Driver];

    fn label(self) -> &'static str {
        match self {
            Self::Rider => "RIDER",
            Self::Driver => "DRIVER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Blocked,
    Pending,
    Suspended,
}

impl Categorical for UserStatus {
    const VARIANTS: &'static [Self] = &[Self::Active, Self::Blocked, Self::Pending, Self::Suspended];

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Blocked => "Blocked",
            Self::Pending => "Pending",
            Self::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_type: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: Date,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
}

impl User {
    /// First letter of the name, used as the avatar fallback.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

impl Record for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.email.as_str()].into_iter()
    }
}

/// Filters for the user management table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub query: String,
    pub role: Choice<UserRole>,
    pub status: Choice<UserStatus>,
}

impl UserFilter {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_role(&mut self, role: Choice<UserRole>) {
        self.role = role;
    }

    pub fn set_status(&mut self, status: Choice<UserStatus>) {
        self.status = status;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl RecordFilter<User> for UserFilter {
    fn query(&self) -> &str {
        &self.query
    }

    fn admits(&self, user: &User) -> bool {
        self.role.admits(user.role) && self.status.admits(user.status)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::users;
    use super::*;
    use crate::filter::derive_view;
    use rstest::rstest;

    fn ids<'a>(view: &[&'a User]) -> Vec<&'a str> {
        view.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn all_selections_and_empty_query_show_everything() {
        let users = users();
        let view = derive_view(&users, &UserFilter::default());
        assert_eq!(view.len(), users.len());
        assert!(view.iter().zip(&users).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[rstest]
    #[case(UserRole::Driver, &["usr_001", "usr_003", "usr_005"])]
    #[case(UserRole::Rider, &["usr_002", "usr_004"])]
    fn filters_by_role(#[case] role: UserRole, #[case] expected: &[&str]) {
        let users = users();
        let mut filter = UserFilter::default();
        filter.set_role(Choice::Only(role));
        assert_eq!(ids(&derive_view(&users, &filter)), expected);
    }

    #[test]
    fn combines_role_status_and_query() {
        let users = users();
        let mut filter = UserFilter::default();
        filter.set_role(Choice::Only(UserRole::Driver));
        filter.set_status(Choice::Only(UserStatus::Active));
        assert_eq!(ids(&derive_view(&users, &filter)), ["usr_001"]);

        filter.set_query("jamil");
        assert!(derive_view(&users, &filter).is_empty());
    }

    #[rstest]
    #[case("sad", &["usr_004"])]
    #[case("SADIA.ISLAM@", &["usr_004"])]
    #[case("example.com", &["usr_001", "usr_002", "usr_003", "usr_004", "usr_005"])]
    fn searches_name_and_email(#[case] query: &str, #[case] expected: &[&str]) {
        let users = users();
        let mut filter = UserFilter::default();
        filter.set_query(query);
        assert_eq!(ids(&derive_view(&users, &filter)), expected);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut filter = UserFilter::default();
        filter.set_query("karim");
        filter.set_status(Choice::Only(UserStatus::Pending));
        assert!(!filter.is_default());
        filter.reset();
        assert!(filter.is_default());
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::Driver).unwrap(), r#""DRIVER""#);
        assert_eq!(
            serde_json::from_str::<UserStatus>(r#""Suspended""#).unwrap(),
            UserStatus::Suspended
        );
    }
}
