mod components;

mod pages;
pub use pages::{About, Home};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod analytics;
pub use analytics::{AdminAnalytics, DriverAnalytics, RiderAnalytics};

mod users;
pub use users::ManageUsers;

mod rides;
pub use rides::ManageRides;
