use dioxus::prelude::*;
use types::analytics::{self, DashboardStats, RideSummary, format_taka, group_digits};
use ui::{Chart, ChartCard, StatCard};

use crate::use_error;

#[component]
pub fn AdminAnalytics() -> Element {
    let mut stats = use_signal(|| None::<DashboardStats>);
    let mut error_state = use_error();

    use_effect(move || {
        spawn(async move {
            match api::dashboard_stats().await {
                Ok(s) => stats.set(Some(s)),
                Err(e) => error_state.set_server_error(&e),
            }
        });
    });

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Analytics Dashboard" }
                }
            }

            if let Some(stats) = stats() {
                div { class: "stat-grid",
                    StatCard { icon: "👥", title: "Total Users", value: group_digits(stats.total_users as u64) }
                    StatCard { icon: "🚗", title: "Total Rides", value: group_digits(stats.total_rides as u64) }
                    StatCard { icon: "৳", title: "Total Revenue", value: format_taka(stats.total_revenue) }
                    StatCard { icon: "📊", title: "Active Drivers", value: group_digits(stats.active_drivers as u64) }
                }
            } else {
                div { class: "loading", "Loading statistics..." }
            }

            div { class: "chart-grid",
                ChartCard { title: "User Growth Analysis",
                    Chart { id: "user-growth-chart", spec: analytics::user_growth() }
                }
                ChartCard { title: "Ride Status",
                    Chart { id: "ride-status-chart", spec: analytics::ride_status_distribution() }
                }
                ChartCard { title: "Revenue Breakdown",
                    Chart { id: "revenue-chart", spec: analytics::revenue_by_vehicle() }
                }
                ChartCard { title: "Rider Hotspots",
                    Chart { id: "hotspots-chart", spec: analytics::rider_hotspots() }
                }
            }
        }
    }
}

#[component]
pub fn DriverAnalytics() -> Element {
    rsx! {
        RideSummaryPage {
            title: "Driver Analytics",
            subtitle: "Trips you have driven and what they earned.",
            fare_label: "Total Earnings",
        }
    }
}

#[component]
pub fn RiderAnalytics() -> Element {
    rsx! {
        RideSummaryPage {
            title: "Rider Analytics",
            subtitle: "Trips you have taken and what they cost.",
            fare_label: "Total Spent",
        }
    }
}

#[component]
fn RideSummaryPage(title: String, subtitle: String, fare_label: String) -> Element {
    let mut summary = use_signal(|| None::<RideSummary>);
    let mut error_state = use_error();

    use_effect(move || {
        spawn(async move {
            match api::my_ride_summary().await {
                Ok(s) => summary.set(Some(s)),
                Err(e) => error_state.set_server_error(&e),
            }
        });
    });

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "{title}" }
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }

            if let Some(summary) = summary() {
                div { class: "stat-grid",
                    StatCard { icon: "🚗", title: "Rides", value: group_digits(summary.rides as u64) }
                    StatCard { icon: "✔", title: "Completed", value: group_digits(summary.completed as u64) }
                    StatCard { icon: "✖", title: "Cancelled", value: group_digits(summary.cancelled as u64) }
                    StatCard { icon: "৳", title: "{fare_label}", value: format_taka(summary.fare_total) }
                }
                if summary.rides == 0 {
                    p { class: "text-muted", "No rides yet." }
                }
            } else {
                div { class: "loading", "Loading your rides..." }
            }
        }
    }
}
