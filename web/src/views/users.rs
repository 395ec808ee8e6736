use std::collections::HashSet;

use dioxus::prelude::*;
use types::{
    StatusAction, StatusTransition, User, UserFilter, UserId, UserRole, UserStatus, derive_view,
};
use ui::{Avatar, Badge, BadgeVariant, FilterDropdown, SearchInput};

use super::components::ResultSummary;
use crate::{ErrorState, use_error};

fn role_variant(role: UserRole) -> BadgeVariant {
    match role {
        UserRole::Driver => BadgeVariant::Default,
        UserRole::Rider => BadgeVariant::Secondary,
    }
}

fn status_variant(status: UserStatus) -> BadgeVariant {
    match status {
        UserStatus::Active => BadgeVariant::Secondary,
        UserStatus::Pending => BadgeVariant::Outline,
        UserStatus::Blocked | UserStatus::Suspended => BadgeVariant::Destructive,
    }
}

/// Apply `action` locally, then ask the server to make it stick.
///
/// The row keeps an "updating" marker until the server answers; a rejection
/// puts the previous status back.
fn apply_action(
    mut users: Signal<Vec<User>>,
    mut pending: Signal<HashSet<UserId>>,
    mut error_state: ErrorState,
    user_id: UserId,
    action: StatusAction,
) {
    if pending.read().contains(&user_id) {
        return;
    }
    let Some(transition) = StatusTransition::begin(&mut users.write(), &user_id, action) else {
        return;
    };
    pending.write().insert(user_id.clone());

    spawn(async move {
        match api::update_user_status(user_id.clone(), action).await {
            Ok(confirmed) => {
                transition.confirm(&mut users.write(), confirmed);
            }
            Err(e) => {
                if transition.rollback(&mut users.write()) {
                    tracing::debug!(user = %user_id, ?action, "status change rolled back");
                }
                error_state.set_server_error(&e);
            }
        }
        pending.write().remove(&user_id);
    });
}

#[component]
pub fn ManageUsers() -> Element {
    let mut users = use_signal(Vec::<User>::new);
    let mut loading = use_signal(|| true);
    let mut error_state = use_error();
    let mut filter = use_signal(UserFilter::default);
    let pending = use_signal(HashSet::<UserId>::new);

    // Fetch users on mount
    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match api::list_users().await {
                Ok(u) => users.set(u),
                Err(e) => error_state.set_server_error(&e),
            }
            loading.set(false);
        });
    });

    let visible = use_memo(move || {
        derive_view(users.read().as_slice(), &*filter.read())
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    });

    let current = filter();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "User Management" }
                    p { class: "page-subtitle", "Approve drivers, suspend accounts and block riders." }
                }
            }

            div { class: "card toolbar",
                SearchInput {
                    value: current.query.clone(),
                    placeholder: "Search by name or email...",
                    on_input: move |q: String| filter.write().set_query(q),
                }
                div { class: "toolbar-filters",
                    FilterDropdown::<UserRole> {
                        id: "role-filter",
                        label: "Role",
                        selected: current.role,
                        on_change: move |c| filter.write().set_role(c),
                    }
                    FilterDropdown::<UserStatus> {
                        id: "status-filter",
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
                div { class: "loading", "Loading users..." }
            } else {
                div { class: "card",
                    div { class: "table-container",
                        table {
                            thead {
                                tr {
                                    th { "User" }
                                    th { "Role" }
                                    th { "Status" }
                                    th { "Joined On" }
                                    th { class: "text-right", "Actions" }
                                }
                            }
                            tbody {
                                for user in visible.read().iter() {
                                    {
                                        let user_id = user.id.clone();
                                        rsx! {
                                            UserRow {
                                                key: "{user.id}",
                                                user: user.clone(),
                                                updating: pending.read().contains(&user.id),
                                                on_action: move |action| {
                                                    apply_action(users, pending, error_state, user_id.clone(), action)
                                                },
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        if visible.read().is_empty() {
                            p { class: "table-empty text-muted", "No users match these filters." }
                        }
                    }
                    ResultSummary { shown: visible.read().len(), total: users.read().len(), noun: "users" }
                }
            }
        }
    }
}

#[component]
fn UserRow(user: User, updating: bool, on_action: EventHandler<StatusAction>) -> Element {
    let actions = StatusAction::available(user.role, user.status);
    let no_actions = actions.is_empty();
    let joined = user.created_at.strftime("%b %d, %Y").to_string();

    rsx! {
        tr { class: if updating { "row-updating" },
            td {
                div { class: "user-cell",
                    Avatar { name: user.name.clone(), url: user.avatar_url.clone() }
                    div {
                        p { class: "user-cell-name", "{user.name}" }
                        p { class: "user-cell-email text-muted", "{user.email}" }
                    }
                }
            }
            td {
                Badge { variant: role_variant(user.role), "{user.role}" }
            }
            td {
                Badge { variant: status_variant(user.status), "{user.status}" }
                if updating {
                    span { class: "checkbox-updating", "(updating...)" }
                }
            }
            td { "{joined}" }
            td { class: "text-right",
                details { class: "row-actions",
                    summary { class: "btn btn-ghost", "⋯" }
                    div { class: "row-actions-menu",
                        p { class: "row-actions-label", "Actions" }
                        for action in actions {
                            button {
                                key: "{action.label()}",
                                class: if action.is_restrictive() { "row-action row-action-danger" } else { "row-action" },
                                disabled: updating,
                                onclick: move |_| on_action.call(action),
                                "{action.label()}"
                            }
                        }
                        if no_actions {
                            p { class: "text-muted", "No actions available" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UserStatus::Active, BadgeVariant::Secondary)]
    #[case(UserStatus::Pending, BadgeVariant::Outline)]
    #[case(UserStatus::Blocked, BadgeVariant::Destructive)]
    #[case(UserStatus::Suspended, BadgeVariant::Destructive)]
    fn status_badges(#[case] status: UserStatus, #[case] expected: BadgeVariant) {
        assert_eq!(status_variant(status), expected);
    }

    #[test]
    fn drivers_stand_out() {
        assert_eq!(role_variant(UserRole::Driver), BadgeVariant::Default);
        assert_eq!(role_variant(UserRole::Rider), BadgeVariant::Secondary);
    }
}
