//! In-memory store of users, rides and sign-in accounts.
//!
//! This is the record source for the management tables and the backend that
//! confirms or rejects status changes.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow, bail};
use hmac::{Hmac, Mac};
use jiff::Zoned;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tokio::sync::RwLock;
use types::{
    AccountRole, Ride, RideId, StatusAction, User, UserId, UserRole, UserSession, UserStatus,
    analytics::{DashboardStats, RideSummary},
    auth::{LoginError, Registration},
    status,
};

use crate::config::Config;

mod seed;

type HmacSha256 = Hmac<Sha256>;

struct Account {
    user_id: UserId,
    name: String,
    email: String,
    role: AccountRole,
    password_digest: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    rides: Vec<Ride>,
    /// Keyed by lowercased email.
    accounts: HashMap<String, Account>,
}

impl Inner {
    fn insert_account(&mut self, account: Account) -> Result<()> {
        let key = account.email.to_lowercase();
        if self.accounts.contains_key(&key) {
            bail!("an account for '{}' already exists", account.email);
        }
        self.accounts.insert(key, account);
        Ok(())
    }

    fn is_disabled(&self, id: &UserId) -> bool {
        self.users
            .iter()
            .find(|u| u.id == *id)
            .is_some_and(|u| matches!(u.status, UserStatus::Blocked | UserStatus::Suspended))
    }

    fn email_taken(&self, email: &str) -> bool {
        self.accounts.contains_key(&email.to_lowercase())
            || self.users.iter().any(|u| u.email.eq_ignore_ascii_case(email))
    }
}

pub struct Directory {
    secret: SecretString,
    inner: RwLock<Inner>,
}

impl Directory {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Build the directory described by `config`: the admin account and, if
    /// enabled, the demo users and rides.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let directory = Self::new(config.session_secret.clone());

        if let Some(password) = &config.admin_password {
            directory
                .add_account(
                    UserId::new("admin"),
                    &config.admin_name,
                    &config.admin_email,
                    AccountRole::Admin,
                    password.expose_secret(),
                )
                .await?;
        } else {
            tracing::warn!("RIDEDASH_ADMIN_PASSWORD is not set; no admin can sign in");
        }

        if config.seed_demo_data {
            directory
                .seed(seed::users(), seed::rides(), config.demo_password.as_ref())
                .await?;
        }

        Ok(directory)
    }

    pub async fn seed(
        &self,
        users: Vec<User>,
        rides: Vec<Ride>,
        password: Option<&SecretString>,
    ) -> Result<()> {
        if let Some(password) = password {
            for user in &users {
                self.add_account(
                    user.id.clone(),
                    &user.name,
                    &user.email,
                    user.role.into(),
                    password.expose_secret(),
                )
                .await?;
            }
        }

        let mut inner = self.inner.write().await;
        tracing::info!(users = users.len(), rides = rides.len(), "seeded directory");
        inner.users.extend(users);
        inner.rides.extend(rides);
        Ok(())
    }

    async fn add_account(
        &self,
        user_id: UserId,
        name: &str,
        email: &str,
        role: AccountRole,
        password: &str,
    ) -> Result<()> {
        let account = self.account(user_id, name, email, role, password)?;
        self.inner.write().await.insert_account(account)
    }

    fn account(
        &self,
        user_id: UserId,
        name: &str,
        email: &str,
        role: AccountRole,
        password: &str,
    ) -> Result<Account> {
        let password_digest = self.password_digest(&user_id, password)?;
        Ok(Account {
            user_id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            password_digest,
        })
    }

    fn password_mac(&self, user_id: &UserId, password: &str) -> Result<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .context("invalid password key")?;
        mac.update(user_id.as_str().as_bytes());
        mac.update(&[0]);
        mac.update(password.as_bytes());
        Ok(mac)
    }

    fn password_digest(&self, user_id: &UserId, password: &str) -> Result<Vec<u8>> {
        Ok(self
            .password_mac(user_id, password)?
            .finalize()
            .into_bytes()
            .to_vec())
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn list_rides(&self) -> Vec<Ride> {
        self.inner.read().await.rides.clone()
    }

    pub async fn get_ride(&self, id: &RideId) -> Result<Ride> {
        self.inner
            .read()
            .await
            .rides
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or_else(|| anyhow!("no ride with id '{}'", id))
    }

    /// Apply `action` to a user and return the updated record.
    ///
    /// Unlike the lenient client-side dispatch, unknown users and actions that
    /// are not offered for the user's current state are errors here.
    pub async fn update_user_status(&self, id: &UserId, action: StatusAction) -> Result<User> {
        let mut inner = self.inner.write().await;

        let user = inner
            .users
            .iter()
            .find(|u| u.id == *id)
            .ok_or_else(|| anyhow!("no user with id '{}'", id))?;
        if !action.applies_to(user.role, user.status) {
            bail!(
                "'{}' is not available for a {} {} user",
                action.label(),
                user.status,
                user.role
            );
        }

        status::dispatch(&mut inner.users, id, action);
        let updated = inner
            .users
            .iter()
            .find(|u| u.id == *id)
            .cloned()
            .ok_or_else(|| anyhow!("user '{}' disappeared during update", id))?;

        tracing::info!(user = %id, action = ?action, status = %updated.status, "updated user status");
        Ok(updated)
    }

    /// Create a user and its sign-in account.
    ///
    /// Drivers start out pending approval; riders are active right away.
    pub async fn register(&self, registration: Registration) -> Result<User> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&registration.email) {
            bail!("an account for '{}' already exists", registration.email);
        }

        let user = User {
            id: next_user_id(&inner.users),
            name: registration.name,
            email: registration.email,
            avatar_url: None,
            role: registration.role,
            status: match registration.role {
                UserRole::Driver => UserStatus::Pending,
                UserRole::Rider => UserStatus::Active,
            },
            created_at: Zoned::now().date(),
            vehicle: registration.vehicle,
        };

        let account = self.account(
            user.id.clone(),
            &user.name,
            &user.email,
            user.role.into(),
            &registration.password,
        )?;
        inner.insert_account(account)?;
        inner.users.push(user.clone());

        tracing::info!(user = %user.id, role = %user.role, "registered user");
        Ok(user)
    }

    /// Check credentials and describe the signed-in account.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<UserSession, LoginError> {
        let inner = self.inner.read().await;
        let account = inner
            .accounts
            .get(&email.to_lowercase())
            .ok_or(LoginError::InvalidCredentials)?;

        let mac = self
            .password_mac(&account.user_id, password)
            .map_err(|_| LoginError::InvalidCredentials)?;
        mac.verify_slice(&account.password_digest)
            .map_err(|_| LoginError::InvalidCredentials)?;

        if inner.is_disabled(&account.user_id) {
            return Err(LoginError::AccountDisabled);
        }

        Ok(UserSession {
            user_id: account.user_id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        })
    }

    /// Whether the user is blocked or suspended. Accounts without a user
    /// record, such as the admin, are never disabled.
    pub async fn is_disabled(&self, id: &UserId) -> bool {
        self.inner.read().await.is_disabled(id)
    }

    pub async fn stats(&self) -> DashboardStats {
        let inner = self.inner.read().await;
        DashboardStats::collect(&inner.users, &inner.rides)
    }

    pub async fn ride_summary(&self, session: &UserSession) -> RideSummary {
        let inner = self.inner.read().await;
        match session.role {
            AccountRole::Driver => RideSummary::for_driver(&inner.rides, &session.name),
            AccountRole::Rider => RideSummary::for_rider(&inner.rides, &session.name),
            AccountRole::Admin => RideSummary::collect(&inner.rides),
        }
    }
}

fn next_user_id(users: &[User]) -> UserId {
    let next = users
        .iter()
        .filter_map(|u| u.id.as_str().strip_prefix("usr_")?.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    UserId::new(format!("usr_{next:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use rstest::rstest;
    use types::auth::RegisterForm;

    async fn directory() -> Directory {
        Directory::from_config(&test_config()).await.unwrap()
    }

    fn driver_form(email: &str) -> RegisterForm {
        RegisterForm {
            name: "Tanvir Rahman".to_string(),
            email: email.to_string(),
            password: "drive-safe-123".to_string(),
            confirm_password: "drive-safe-123".to_string(),
            role: Some(UserRole::Driver),
            vehicle_type: "Bike".to_string(),
            model: "Honda CB".to_string(),
        }
    }

    #[tokio::test]
    async fn seeds_users_and_rides_in_order() {
        let directory = directory().await;
        let users = directory.list_users().await;
        assert_eq!(users.len(), 7);
        assert_eq!(users[0].id.as_str(), "usr_001");
        assert_eq!(directory.list_rides().await.len(), 6);
    }

    #[tokio::test]
    async fn approves_pending_driver() {
        let directory = directory().await;
        let id = UserId::new("usr_003");

        let updated = directory
            .update_user_status(&id, StatusAction::ApproveDriver)
            .await
            .unwrap();
        assert_eq!(updated.status, UserStatus::Active);

        let stored = directory.list_users().await;
        assert_eq!(stored[2], updated);
    }

    #[rstest]
    #[case("usr_999", StatusAction::BlockRider)]
    #[case("usr_001", StatusAction::ApproveDriver)]
    #[case("usr_002", StatusAction::UnblockRider)]
    #[tokio::test]
    async fn rejects_unknown_or_unavailable(#[case] id: &str, #[case] action: StatusAction) {
        let directory = directory().await;
        let before = directory.list_users().await;

        assert!(directory.update_user_status(&UserId::new(id), action).await.is_err());
        assert_eq!(directory.list_users().await, before);
    }

    #[tokio::test]
    async fn registered_driver_is_pending_and_can_sign_in() {
        let directory = directory().await;
        let registration = driver_form("tanvir@example.com").validate().unwrap();

        let user = directory.register(registration).await.unwrap();
        assert_eq!(user.id.as_str(), "usr_008");
        assert_eq!(user.status, UserStatus::Pending);

        let session = directory
            .authenticate("Tanvir@Example.com", "drive-safe-123")
            .await
            .unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.role, AccountRole::Driver);
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let directory = directory().await;
        let registration = driver_form("karim.a@example.com").validate().unwrap();
        assert!(directory.register(registration).await.is_err());
        assert_eq!(directory.list_users().await.len(), 7);
    }

    #[tokio::test]
    async fn email_of_seeded_user_without_account_is_refused() {
        let config = Config {
            demo_password: None,
            ..test_config()
        };
        let directory = Directory::from_config(&config).await.unwrap();
        let registration = driver_form("Karim.A@example.com").validate().unwrap();

        assert!(directory.register(registration).await.is_err());
        assert_eq!(directory.list_users().await.len(), 7);
    }

    #[tokio::test]
    async fn blocking_disables_the_user() {
        let directory = directory().await;
        let id = UserId::new("usr_002");
        assert!(!directory.is_disabled(&id).await);

        directory
            .update_user_status(&id, StatusAction::BlockRider)
            .await
            .unwrap();
        assert!(directory.is_disabled(&id).await);
        assert!(!directory.is_disabled(&UserId::new("admin")).await);
    }

    #[rstest]
    #[case("admin@ridedash.local", "wrong-password", LoginError::InvalidCredentials)]
    #[case("nobody@example.com", "demo-password", LoginError::InvalidCredentials)]
    #[case("sadia.i@example.com", "demo-password", LoginError::AccountDisabled)]
    #[case("jamil.c@example.com", "demo-password", LoginError::AccountDisabled)]
    #[tokio::test]
    async fn refuses_bad_sign_ins(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginError,
    ) {
        let directory = directory().await;
        assert_eq!(directory.authenticate(email, password).await, Err(expected));
    }

    #[tokio::test]
    async fn admin_signs_in() {
        let directory = directory().await;
        let session = directory
            .authenticate("admin@ridedash.local", "admin-password")
            .await
            .unwrap();
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn summaries_follow_the_session() {
        let directory = directory().await;
        let karim = directory
            .authenticate("karim.a@example.com", "demo-password")
            .await
            .unwrap();
        let summary = directory.ride_summary(&karim).await;
        assert_eq!(summary.rides, 2);
        assert_eq!(summary.fare_total, 470);

        let stats = directory.stats().await;
        assert_eq!(stats.total_users, 7);
        assert_eq!(stats.total_revenue, 820);
        assert_eq!(stats.active_drivers, 2);
    }
}
