pub mod analytics;
pub mod auth;
mod error;
pub mod filter;
pub mod ride;
mod session;
pub mod status;
pub mod user;

pub use error::Result;
pub use filter::{Categorical, Choice, Record, RecordFilter, derive_view};
pub use ride::{Ride, RideFilter, RideId, RideStatus};
pub use session::{AccountRole, SESSION_COOKIE_NAME, UserSession};
pub use status::{StatusAction, StatusTransition};
pub use user::{User, UserFilter, UserId, UserRole, UserStatus, Vehicle};

#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;
