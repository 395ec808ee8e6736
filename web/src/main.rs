use dioxus::prelude::*;

mod views;

use types::{AccountRole, RideId, UserSession, auth::LoginError};
use views::{
    About, AdminAnalytics, DriverAnalytics, Home, Login, ManageRides, ManageUsers, Register,
    RiderAnalytics,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(PublicLayout)]
        #[route("/")]
        Home {},
        #[route("/about")]
        About {},
        #[route("/login?:error&:notice")]
        Login { error: Option<String>, notice: Option<String> },
        #[route("/register")]
        Register {},
    #[end_layout]
    #[layout(DashboardLayout)]
        #[redirect("/admin", || Route::AdminAnalytics {})]
        #[route("/admin/analytics")]
        AdminAnalytics {},
        #[route("/admin/users")]
        ManageUsers {},
        #[route("/admin/rides")]
        RideList {},
        #[route("/admin/rides/:ride_id")]
        RideDetail { ride_id: RideId },
        #[route("/driver/analytics")]
        DriverAnalytics {},
        #[route("/rider/analytics")]
        RiderAnalytics {},
}

impl Route {
    pub fn login() -> Self {
        Route::Login {
            error: None,
            notice: None,
        }
    }

    pub fn login_error(error: LoginError) -> Self {
        Route::Login {
            error: Some(error.code().to_string()),
            notice: None,
        }
    }

    pub fn ride_detail(ride_id: RideId) -> Self {
        Route::RideDetail { ride_id }
    }

    /// The analytics page an account lands on.
    pub fn home(role: AccountRole) -> Self {
        match role {
            AccountRole::Admin => Route::AdminAnalytics {},
            AccountRole::Driver => Route::DriverAnalytics {},
            AccountRole::Rider => Route::RiderAnalytics {},
        }
    }

    fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Route::AdminAnalytics {}
                | Route::ManageUsers {}
                | Route::RideList {}
                | Route::RideDetail { .. }
        )
    }
}

#[component]
fn RideList() -> Element {
    rsx! { ManageRides { ride_id: None } }
}

#[component]
fn RideDetail(ride_id: RideId) -> Element {
    rsx! { ManageRides { ride_id: Some(ride_id) } }
}

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init().await?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "RideDash" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = current_route == to
        || matches!(
            (&current_route, &to),
            (Route::RideDetail { .. }, Route::RideList {})
        );

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

/// Structured error information for display
#[derive(Clone, Debug, Default)]
pub struct ErrorInfo {
    pub message: String,
    pub chain: Vec<String>,
}

impl ErrorInfo {
    /// Parse a ServerFnError to extract structured error info
    pub fn from_server_error(err: &ServerFnError) -> Self {
        match err {
            ServerFnError::ServerError {
                message, details, ..
            } => {
                let chain = details
                    .as_ref()
                    .and_then(|d| d.get("chain"))
                    .and_then(|c| c.as_array())
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|v| v.as_str().map(String::from))
                            .collect()
                    })
                    .unwrap_or_else(|| error_chain(message));
                Self {
                    message: first_line(message),
                    chain,
                }
            }
            other => Self {
                message: other.to_string(),
                chain: vec![other.to_string()],
            },
        }
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).trim().to_string()
}

/// Split an anyhow error rendered with `{:?}` into its causes.
fn error_chain(message: &str) -> Vec<String> {
    let mut chain = vec![first_line(message)];
    chain.extend(
        message
            .lines()
            .map(str::trim)
            .filter_map(|line| line.split_once(": "))
            .filter(|(index, _)| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
            .map(|(_, cause)| cause.to_string()),
    );
    chain
}

/// Global error state - use `use_error()` to access
#[derive(Clone, Copy)]
pub struct ErrorState(Signal<Option<ErrorInfo>>);

impl ErrorState {
    pub fn set_server_error(&mut self, err: &ServerFnError) {
        // An expired session sends the user back to sign in
        if let ServerFnError::ServerError { code: 401, .. } = err {
            navigator().push(Route::login_error(LoginError::SessionExpired));
            return;
        }
        tracing::warn!(error = %err, "server call failed");
        self.0.set(Some(ErrorInfo::from_server_error(err)));
    }

    pub fn clear(&mut self) {
        self.0.set(None);
    }
}

/// Get the global error state for setting/clearing errors
pub fn use_error() -> ErrorState {
    use_context::<ErrorState>()
}

#[component]
fn ErrorBanner() -> Element {
    let mut error_state = use_context::<ErrorState>();
    let error = error_state.0.read();

    if let Some(err) = error.as_ref() {
        let has_chain = err.chain.len() > 1;

        rsx! {
            div { class: "error-banner",
                div { class: "error-banner-content",
                    div { class: "error-banner-header",
                        span { class: "error-banner-message", "{err.message}" }
                        div { class: "error-banner-actions",
                            button {
                                class: "error-banner-close",
                                onclick: move |_| error_state.clear(),
                                "×"
                            }
                        }
                    }
                    if has_chain {
                        div { class: "error-details",
                            div { class: "error-chain",
                                h4 { class: "error-section-title", "Caused by" }
                                ol { class: "error-chain-list",
                                    for (i, msg) in err.chain.iter().enumerate().skip(1) {
                                        li {
                                            key: "{i}",
                                            class: "error-chain-item",
                                            "{msg}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    } else {
        rsx! {}
    }
}

#[component]
fn Navbar(#[props(default)] session: Option<UserSession>) -> Element {
    rsx! {
        header { class: "navbar",
            Link { to: Route::Home {}, class: "navbar-logo", "RideDash" }
            nav { class: "navbar-links",
                Link { to: Route::Home {}, "Home" }
                Link { to: Route::About {}, "About" }
                if let Some(session) = &session {
                    Link { to: Route::home(session.role), "Dashboard" }
                } else {
                    Link { to: Route::login(), "Login" }
                    Link { to: Route::Register {}, class: "btn btn-primary btn-sm", "Register" }
                }
            }
        }
    }
}

#[component]
fn PublicLayout() -> Element {
    rsx! {
        div { class: "public-layout",
            Navbar {}
            main { class: "public-content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar(session: UserSession) -> Element {
    let role_label = match session.role {
        AccountRole::Admin => "Administrator",
        AccountRole::Driver => "Driver",
        AccountRole::Rider => "Rider",
    };

    rsx! {
        aside { class: "sidebar",
            nav { class: "sidebar-nav",
                if session.is_admin() {
                    NavLink { to: Route::AdminAnalytics {}, "Analytics" }
                    NavLink { to: Route::ManageUsers {}, "Manage Users" }
                    NavLink { to: Route::RideList {}, "Manage Rides" }
                } else {
                    NavLink { to: Route::home(session.role), "Analytics" }
                }
            }
            div { class: "sidebar-footer",
                div { class: "sidebar-user",
                    div { class: "sidebar-avatar", "{session.initial()}" }
                    div { class: "sidebar-user-info",
                        div { class: "sidebar-user-name", "{session.name}" }
                        div { class: "sidebar-user-role", "{role_label}" }
                    }
                }
                a { href: "/auth/logout", rel: "external", class: "sidebar-logout", "← Sign out" }
            }
        }
    }
}

#[component]
fn DashboardLayout() -> Element {
    use_context_provider(|| ErrorState(Signal::new(None)));
    let route: Route = use_route();
    let user = use_server_future(api::get_current_user)?;

    match &*user.read() {
        Some(Ok(Some(session))) => {
            if route.is_admin_only() && !session.is_admin() {
                navigator().replace(Route::home(session.role));
                return rsx! {
                    div { class: "loading", "Redirecting..." }
                };
            }
            let session = session.clone();

            rsx! {
                div { class: "dashboard",
                    Navbar { session: session.clone() }
                    div { class: "app-layout",
                        Sidebar { session }
                        main { class: "main-content",
                            ErrorBanner {}
                            Outlet::<Route> {}
                        }
                    }
                }
            }
        }
        Some(Ok(None)) | Some(Err(_)) => {
            navigator().push(Route::login());
            rsx! {
                div { class: "loading", "Redirecting to login..." }
            }
        }
        None => {
            rsx! {
                div { class: "loading", "Loading..." }
            }
        }
    }
}
