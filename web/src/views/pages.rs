use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "hero",
            h1 { class: "hero-title", "Rides across Dhaka, one tap away" }
            p { class: "hero-subtitle",
                "RideDash connects riders with verified drivers and gives administrators a clear view of every trip."
            }
            div { class: "hero-actions",
                Link { to: Route::Register {}, class: "btn btn-primary", "Get started" }
                Link { to: Route::login(), class: "btn btn-secondary", "Sign in" }
            }
        }
        section { class: "feature-grid",
            div { class: "card feature-card",
                h3 { "For riders" }
                p { class: "text-muted", "Book a ride and follow its status from search to drop-off." }
            }
            div { class: "card feature-card",
                h3 { "For drivers" }
                p { class: "text-muted", "Register your vehicle and start earning once an administrator approves you." }
            }
            div { class: "card feature-card",
                h3 { "For administrators" }
                p { class: "text-muted", "Approve drivers, handle suspensions and keep an eye on revenue." }
            }
        }
    }
}

#[component]
pub fn About() -> Element {
    rsx! {
        section { class: "about",
            h1 { class: "page-title", "About RideDash" }
            p {
                "RideDash is a ride sharing dashboard. Riders and drivers sign up with an email address; drivers also register a vehicle and wait for approval before they can take trips."
            }
            p {
                "Administrators manage accounts from the dashboard: approving new drivers, suspending or reinstating them, and blocking riders who break the rules. Every ride is listed with its fare and status."
            }
        }
    }
}
