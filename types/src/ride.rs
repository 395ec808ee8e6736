use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::filter::{Categorical, Choice, Record, RecordFilter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideId(String);

impl RideId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RideId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RideStatus {
    Completed,
    Cancelled,
    #[serde(rename = "In-Progress")]
    InProgress,
    Searching,
}

impl Categorical for RideStatus {
    const VARIANTS: &'static [Self] = &[
        Self::Completed,
        Self::Cancelled,
        Self::InProgress,
        Self::Searching,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::InProgress => "In-Progress",
            Self::Searching => "Searching",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    pub rider_name: String,
    pub driver_name: String,
    pub rider_avatar_url: Option<String>,
    pub driver_avatar_url: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Fare in BDT.
    pub fare: u32,
    pub status: RideStatus,
    pub ride_date: Date,
}

impl Record for Ride {
    type Id = RideId;

    fn id(&self) -> &RideId {
        &self.id
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.rider_name.as_str(),
            self.driver_name.as_str(),
            self.pickup_location.as_str(),
            self.dropoff_location.as_str(),
        ]
        .into_iter()
    }
}

/// Filters for the ride oversight table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideFilter {
    pub query: String,
    pub status: Choice<RideStatus>,
    /// Exact ride date. `None` places no constraint.
    pub date: Option<Date>,
}

impl RideFilter {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_status(&mut self, status: Choice<RideStatus>) {
        self.status = status;
    }

    /// Set the date from a `YYYY-MM-DD` input value.
    ///
    /// An empty or unparseable value clears the constraint, matching what a
    /// cleared date input sends.
    pub fn set_date_input(&mut self, value: &str) {
        self.date = value.trim().parse().ok();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl RecordFilter<Ride> for RideFilter {
    fn query(&self) -> &str {
        &self.query
    }

    fn admits(&self, ride: &Ride) -> bool {
        self.status.admits(ride.status) && self.date.is_none_or(|d| d == ride.ride_date)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use jiff::civil::date;

    #[allow(clippy::too_many_arguments)]
    pub fn ride(
        id: &str,
        rider: &str,
        driver: &str,
        pickup: &str,
        dropoff: &str,
        fare: u32,
        status: RideStatus,
        day: i8,
    ) -> Ride {
        Ride {
            id: RideId::new(id),
            rider_name: rider.to_string(),
            driver_name: driver.to_string(),
            rider_avatar_url: None,
            driver_avatar_url: None,
            pickup_location: pickup.to_string(),
            dropoff_location: dropoff.to_string(),
            fare,
            status,
            ride_date: date(2023, 8, day),
        }
    }

    pub fn rides() -> Vec<Ride> {
        use RideStatus::*;
        vec![
            ride("ride_001", "Rahima Begum", "Karim Ahmed", "Dhanmondi 32", "Gulshan 1", 250, Completed, 15),
            ride("ride_002", "Sadia Islam", "Asif Mahmud", "Mirpur 10", "Uttara Sector 12", 350, Completed, 15),
            ride("ride_003", "Nusrat Jahan", "Fahim Hasan", "Banani", "Mohakhali", 150, InProgress, 16),
            ride("ride_004", "Fahim Hasan", "Jamil Chowdhury", "Bashundhara R/A", "Baridhara DOHS", 180, Cancelled, 16),
        ]
    }
}
