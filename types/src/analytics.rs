use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ride::{Ride, RideStatus};
use crate::user::{User, UserRole, UserStatus};

/// Headline numbers for the admin analytics page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_rides: usize,
    /// Sum of completed fares in BDT.
    pub total_revenue: u64,
    pub active_drivers: usize,
}

impl DashboardStats {
    pub fn collect(users: &[User], rides: &[Ride]) -> Self {
        Self {
            total_users: users.len(),
            total_rides: rides.len(),
            total_revenue: rides
                .iter()
                .filter(|r| r.status == RideStatus::Completed)
                .map(|r| u64::from(r.fare))
                .sum(),
            active_drivers: users
                .iter()
                .filter(|u| u.role == UserRole::Driver && u.status == UserStatus::Active)
                .count(),
        }
    }
}

/// Ride numbers for a single rider or driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideSummary {
    pub rides: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Fares of completed rides in BDT.
    pub fare_total: u64,
}

impl RideSummary {
    pub fn collect<'a>(rides: impl IntoIterator<Item = &'a Ride>) -> Self {
        rides.into_iter().fold(Self::default(), |mut acc, ride| {
            acc.rides += 1;
            match ride.status {
                RideStatus::Completed => {
                    acc.completed += 1;
                    acc.fare_total += u64::from(ride.fare);
                }
                RideStatus::Cancelled => acc.cancelled += 1,
                RideStatus::InProgress | RideStatus::Searching => {}
            }
            acc
        })
    }

    pub fn for_rider(rides: &[Ride], name: &str) -> Self {
        Self::collect(rides.iter().filter(|r| r.rider_name == name))
    }

    pub fn for_driver(rides: &[Ride], name: &str) -> Self {
        Self::collect(rides.iter().filter(|r| r.driver_name == name))
    }
}

/// Group digits the way amounts are written in Bangladesh: the last three
/// digits, then pairs (`580500` -> `5,80,500`).
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

pub fn format_taka(amount: u64) -> String {
    format!("৳{}", group_digits(amount))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Pie,
    Bar,
    Geo,
}

impl ChartKind {
    /// Constructor name under `google.visualization`.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Line => "LineChart",
            Self::Pie => "PieChart",
            Self::Bar => "BarChart",
            Self::Geo => "GeoChart",
        }
    }
}

/// A chart ready to hand to the visualization library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// Data table rows, header first.
    pub data: Value,
    pub options: Value,
}

pub fn user_growth() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        data: json!([
            ["Month", "Riders", "Drivers"],
            ["Jan", 100, 30],
            ["Feb", 120, 45],
            ["Mar", 250, 70],
            ["Apr", 300, 85],
            ["May", 420, 110],
            ["Jun", 500, 130],
        ]),
        options: json!({
            "title": "User Growth (Riders vs Drivers)",
            "curveType": "function",
            "legend": { "position": "bottom" },
            "hAxis": { "title": "Month" },
            "vAxis": { "title": "Number of Users" },
            "colors": ["#FB404A", "#10b981"],
            "backgroundColor": "transparent",
        }),
    }
}

pub fn ride_status_distribution() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        data: json!([
            ["Status", "Count"],
            ["Completed", 1200],
            ["Cancelled", 150],
            ["In Progress", 50],
        ]),
        options: json!({
            "title": "Ride Status Distribution",
            "colors": ["#10b981", "#ef4444", "#f59e0b"],
            "backgroundColor": "transparent",
        }),
    }
}

pub fn revenue_by_vehicle() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        data: json!([
            ["Vehicle Type", "Revenue", { "role": "style" }],
            ["Car", 45000, "#FB404A"],
            ["Bike", 25000, "#f59e0b"],
            ["CNG", 15000, "#10b981"],
        ]),
        options: json!({
            "title": "Revenue by Vehicle Type",
            "legend": { "position": "none" },
            "chartArea": { "width": "70%" },
            "hAxis": { "title": "Total Revenue (BDT)", "minValue": 0 },
            "vAxis": { "title": "Vehicle Type" },
            "backgroundColor": "transparent",
        }),
    }
}

pub fn rider_hotspots() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Geo,
        data: json!([
            ["City", "Active Riders"],
            ["Dhaka", 2761477],
            ["Chattogram", 1324110],
            ["Khulna", 758652],
            ["Sylhet", 528543],
            ["Rajshahi", 401245],
            ["Barishal", 328304],
            ["Rangpur", 257790],
        ]),
        options: json!({
            "region": "BD",
            "displayMode": "markers",
            "colorAxis": { "colors": ["#fde047", "#f97316", "#ef4444"] },
            "backgroundColor": "#f1f5f9",
        }),
    }
}
