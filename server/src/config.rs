use config::{Environment, File};
use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

/// Server settings, read from an optional `ridedash.toml` and `RIDEDASH_*`
/// environment variables (the latter win).
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Keys session token signatures and password digests.
    pub session_secret: SecretString,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
    /// Without it no admin account is created.
    #[serde(default)]
    pub admin_password: Option<SecretString>,
    /// Password given to every seeded rider and driver, so the role pages can
    /// be tried out. Seeded accounts cannot sign in when unset.
    #[serde(default)]
    pub demo_password: Option<SecretString>,
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
    #[serde(default = "default_true")]
    pub secure_cookies: bool,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        config::Config::builder()
            .add_source(File::with_name("ridedash").required(false))
            .add_source(Environment::with_prefix("RIDEDASH").try_parsing(true))
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration (is RIDEDASH_SESSION_SECRET set?)")
    }
}

fn default_admin_email() -> String {
    "admin@ridedash.local".into()
}

fn default_admin_name() -> String {
    "Administrator".into()
}

fn default_true() -> bool {
    true
}

fn default_session_ttl_hours() -> u32 {
    24
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        session_secret: "test-session-secret".to_string().into(),
        admin_email: default_admin_email(),
        admin_name: default_admin_name(),
        admin_password: Some("admin-password".to_string().into()),
        demo_password: Some("demo-password".to_string().into()),
        seed_demo_data: true,
        secure_cookies: false,
        session_ttl_hours: default_session_ttl_hours(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_fill_missing_keys() {
        let config: Config = config::Config::builder()
            .set_override("session_secret", "s3cret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.session_secret.expose_secret(), "s3cret");
        assert_eq!(config.admin_email, "admin@ridedash.local");
        assert!(config.admin_password.is_none());
        assert!(config.seed_demo_data);
        assert!(config.secure_cookies);
        assert_eq!(config.session_ttl_hours, 24);
    }
}
