//! Login and registration form values and their validation.
//!
//! The same rules run in the browser (to show field errors before submit)
//! and on the server (before anything touches the directory).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::{UserRole, Vehicle};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Role,
    VehicleType,
    Model,
}

/// Validation messages keyed by the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, field: Field, message: impl Into<String>) {
        // First message wins, matching the order rules are checked in.
        self.0.entry(field).or_insert_with(|| message.into());
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Loose address check: one `@`, a non-empty local part, a dotted domain and
/// no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email.trim()) {
        errors.add(Field::Email, "Invalid email address");
    }
}

/// Why a sign-in attempt was turned away.
///
/// Travels in the `/login?error=` query as [`LoginError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginError {
    InvalidInput,
    InvalidCredentials,
    AccountDisabled,
    SessionExpired,
}

impl LoginError {
    const ALL: [Self; 4] = [
        Self::InvalidInput,
        Self::InvalidCredentials,
        Self::AccountDisabled,
        Self::SessionExpired,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid-input",
            Self::InvalidCredentials => "invalid-credentials",
            Self::AccountDisabled => "account-disabled",
            Self::SessionExpired => "session-expired",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Enter a valid email and a password of at least 8 characters.",
            Self::InvalidCredentials => "Login failed. Please check your credentials.",
            Self::AccountDisabled => "This account is blocked or suspended.",
            Self::SessionExpired => "Your session has expired. Please sign in again.",
        }
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LoginError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(Field::Password, "Password is too short");
        }
        errors.into_result(())
    }

    /// The address used for lookups.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<UserRole>,
    pub vehicle_type: String,
    pub model: String,
}

/// A registration that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub vehicle: Option<Vehicle>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        let name_len = name.chars().count();
        if name_len < MIN_NAME_LEN {
            errors.add(Field::Name, "Name must be at least 3 characters");
        } else if name_len > MAX_NAME_LEN {
            errors.add(Field::Name, "Name must be at most 50 characters");
        }

        check_email(&mut errors, &self.email);

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(Field::Password, "Password must be at least 8 characters");
        }
        if self.confirm_password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                Field::ConfirmPassword,
                "Confirm Password must be at least 8 characters",
            );
        } else if self.password != self.confirm_password {
            errors.add(Field::ConfirmPassword, "Passwords do not match");
        }

        let vehicle = match self.role {
            None => {
                errors.add(Field::Role, "Please select a role.");
                None
            }
            Some(UserRole::Rider) => None,
            Some(UserRole::Driver) => {
                let vehicle_type = self.vehicle_type.trim();
                let model = self.model.trim();
                if vehicle_type.is_empty() {
                    errors.add(Field::VehicleType, "Vehicle type is required for drivers");
                }
                if model.is_empty() {
                    errors.add(Field::Model, "Model is required for drivers");
                }
                Some(Vehicle {
                    vehicle_type: vehicle_type.to_string(),
                    model: model.to_string(),
                })
            }
        };

        let Some(role) = self.role else {
            return Err(errors);
        };

        errors.into_result(Registration {
            name: name.to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            role,
            vehicle,
        })
    }
}
