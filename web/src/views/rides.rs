use dioxus::prelude::*;
use types::{
    Ride, RideFilter, RideId, RideStatus, analytics::format_taka, derive_view,
};
use ui::{Avatar, Badge, BadgeVariant, DateInput, FilterDropdown, SearchInput};

use super::components::ResultSummary;
use crate::{Route, use_error};

fn status_variant(status: RideStatus) -> BadgeVariant {
    match status {
        RideStatus::Completed => BadgeVariant::Default,
        RideStatus::InProgress => BadgeVariant::Secondary,
        RideStatus::Searching => BadgeVariant::Outline,
        RideStatus::Cancelled => BadgeVariant::Destructive,
    }
}

fn format_date(ride: &Ride) -> String {
    ride.ride_date.strftime("%b %d, %Y").to_string()
}

#[component]
pub fn ManageRides(ride_id: ReadSignal<Option<RideId>>) -> Element {
    let mut rides = use_signal(Vec::<Ride>::new);
    let mut loading = use_signal(|| true);
    let mut error_state = use_error();
    let mut filter = use_signal(RideFilter::default);

    // Fetch rides on mount
    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match api::list_rides().await {
                Ok(r) => rides.set(r),
                Err(e) => error_state.set_server_error(&e),
            }
            loading.set(false);
        });
    });

    let visible = use_memo(move || {
        derive_view(rides.read().as_slice(), &*filter.read())
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    });

    let current = filter();
    let date_value = current.date.map(|d| d.to_string()).unwrap_or_default();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Ride Oversight" }
                    p { class: "page-subtitle", "Every trip on the platform with its fare and status." }
                }
            }

            div { class: "card toolbar",
                SearchInput {
                    value: current.query.clone(),
                    placeholder: "Search by user, location...",
                    on_input: move |q: String| filter.write().set_query(q),
                }
                div { class: "toolbar-filters",
                    DateInput {
                        id: "date-filter",
                        value: date_value,
                        on_input: move |v: String| filter.write().set_date_input(&v),
                    }
                    FilterDropdown::<RideStatus> {
                        id: "ride-status-filter",
                        label: "Status",
                        selected: current.status,
                        on_change: move |c| filter.write().set_status(c),
                    }
                    if !current.is_default() {
                        button {
                            class: "btn btn-link",
                            onclick: move |_| filter.write().reset(),
                            "Clear filters"
                        }
                    }
                }
            }

            if loading() {
                div { class: "loading", "Loading rides..." }
            } else {
                div { class: if ride_id().is_some() { "grid grid-cols-3" },
                    div { class: "card",
                        div { class: "table-container",
                            table {
                                thead {
                                    tr {
                                        th { "Rider & Driver" }
                                        th { "Trip Details" }
                                        th { "Fare" }
                                        th { "Date" }
                                        th { "Status" }
                                        th { class: "text-right", "Actions" }
                                    }
                                }
                                tbody {
                                    for ride in visible.read().iter() {
                                        {
                                            let id = ride.id.clone();
                                            let is_selected = ride_id.read().as_ref() == Some(&ride.id);
                                            rsx! {
                                                tr {
                                                    key: "{ride.id}",
                                                    class: if is_selected { "selected" },
                                                    td {
                                                        div { class: "ride-people",
                                                            Person { name: ride.rider_name.clone(), url: ride.rider_avatar_url.clone(), role: "Rider" }
                                                            Person { name: ride.driver_name.clone(), url: ride.driver_avatar_url.clone(), role: "Driver" }
                                                        }
                                                    }
                                                    td {
                                                        p { class: "trip-from", "{ride.pickup_location}" }
                                                        p { class: "trip-to text-muted", "to {ride.dropoff_location}" }
                                                    }
                                                    td { "{format_taka(ride.fare.into())}" }
                                                    td { "{format_date(ride)}" }
                                                    td {
                                                        Badge { variant: status_variant(ride.status), "{ride.status}" }
                                                    }
                                                    td { class: "text-right",
                                                        button {
                                                            class: "btn btn-ghost",
                                                            title: "View details",
                                                            onclick: move |_| {
                                                                navigator().replace(Route::ride_detail(id.clone()));
                                                            },
                                                            "View"
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                            if visible.read().is_empty() {
                                p { class: "table-empty text-muted", "No rides match these filters." }
                            }
                        }
                        ResultSummary { shown: visible.read().len(), total: rides.read().len(), noun: "rides" }
                    }
                    if let Some(id) = ride_id() {
                        RideDetailsCard { ride_id: id }
                    }
                }
            }
        }
    }
}

#[component]
fn Person(name: String, url: Option<String>, role: String) -> Element {
    rsx! {
        div { class: "user-cell",
            Avatar { name: name.clone(), url, small: true }
            div {
                p { class: "user-cell-name", "{name}" }
                p { class: "text-muted text-xs", "{role}" }
            }
        }
    }
}

#[component]
fn RideDetailsCard(ride_id: ReadSignal<RideId>) -> Element {
    let ride = use_resource(move || async move { api::get_ride(ride_id()).await });

    rsx! {
        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "Ride Details" }
                button {
                    class: "modal-close",
                    onclick: move |_| {
                        navigator().replace(Route::RideList {});
                    },
                    "×"
                }
            }
            div { class: "card-body",
                {match &*ride.read() {
                    None => rsx! {
                        div { class: "loading", "Loading ride..." }
                    },
                    Some(Err(e)) => rsx! {
                        p { class: "text-muted", "Could not load ride {ride_id()}: {e}" }
                    },
                    Some(Ok(ride)) => rsx! {
                        div { class: "form-group",
                            span { class: "form-label", "Ride" }
                            div { class: "form-value form-value-mono", "{ride.id}" }
                        }
                        div { class: "form-group",
                            span { class: "form-label", "Status" }
                            div { class: "form-value",
                                Badge { variant: status_variant(ride.status), "{ride.status}" }
                            }
                        }
                        div { class: "form-group",
                            span { class: "form-label", "Rider" }
                            Person { name: ride.rider_name.clone(), url: ride.rider_avatar_url.clone(), role: "Rider" }
                        }
                        div { class: "form-group",
                            span { class: "form-label", "Driver" }
                            Person { name: ride.driver_name.clone(), url: ride.driver_avatar_url.clone(), role: "Driver" }
                        }
                        div { class: "divider" }
                        div { class: "form-group",
                            span { class: "form-label", "Pickup" }
                            div { class: "form-value", "{ride.pickup_location}" }
                        }
                        div { class: "form-group",
                            span { class: "form-label", "Drop-off" }
                            div { class: "form-value", "{ride.dropoff_location}" }
                        }
                        div { class: "form-group",
                            span { class: "form-label", "Fare" }
                            div { class: "form-value", "{format_taka(ride.fare.into())}" }
                        }
                        div { class: "form-group",
                            span { class: "form-label", "Date" }
                            div { class: "form-value", "{format_date(ride)}" }
                        }
                    },
                }}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RideStatus::Completed, BadgeVariant::Default)]
    #[case(RideStatus::InProgress, BadgeVariant::Secondary)]
    #[case(RideStatus::Searching, BadgeVariant::Outline)]
    #[case(RideStatus::Cancelled, BadgeVariant::Destructive)]
    fn status_badges(#[case] status: RideStatus, #[case] expected: BadgeVariant) {
        assert_eq!(status_variant(status), expected);
    }
}
