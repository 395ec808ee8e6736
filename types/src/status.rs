//! Per-row status actions on users.
//!
//! Riders toggle between `Active` and `Blocked`. Drivers are approved from
//! `Pending`, and move between `Active` and `Suspended`. Nothing else is
//! offered.

use serde::{Deserialize, Serialize};

use crate::user::{User, UserId, UserRole, UserStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusAction {
    ApproveDriver,
    SuspendDriver,
    UnsuspendDriver,
    BlockRider,
    UnblockRider,
}

impl StatusAction {
    pub const ALL: [Self; 5] = [
        Self::ApproveDriver,
        Self::SuspendDriver,
        Self::UnsuspendDriver,
        Self::BlockRider,
        Self::UnblockRider,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ApproveDriver => "Approve Driver",
            Self::SuspendDriver => "Suspend Driver",
            Self::UnsuspendDriver => "Unsuspend",
            Self::BlockRider => "Block Rider",
            Self::UnblockRider => "Unblock Rider",
        }
    }

    /// The role and status a user must have for this action to be offered.
    pub fn source(self) -> (UserRole, UserStatus) {
        match self {
            Self::ApproveDriver => (UserRole::Driver, UserStatus::Pending),
            Self::SuspendDriver => (UserRole::Driver, UserStatus::Active),
            Self::UnsuspendDriver => (UserRole::Driver, UserStatus::Suspended),
            Self::BlockRider => (UserRole::Rider, UserStatus::Active),
            Self::UnblockRider => (UserRole::Rider, UserStatus::Blocked),
        }
    }

    pub fn target(self) -> UserStatus {
        match self {
            Self::ApproveDriver | Self::UnsuspendDriver | Self::UnblockRider => UserStatus::Active,
            Self::SuspendDriver => UserStatus::Suspended,
            Self::BlockRider => UserStatus::Blocked,
        }
    }

    /// Whether the action removes access rather than granting it.
    pub fn is_restrictive(self) -> bool {
        matches!(self, Self::SuspendDriver | Self::BlockRider)
    }

    pub fn applies_to(self, role: UserRole, status: UserStatus) -> bool {
        self.source() == (role, status)
    }

    /// Actions offered for a user in the given state.
    pub fn available(role: UserRole, status: UserStatus) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|a| a.applies_to(role, status))
            .collect()
    }
}

/// Replace the status of the user with `id`.
///
/// Every other user and field is left untouched. Returns `false` when no
/// user has that id.
pub fn set_status(users: &mut [User], id: &UserId, status: UserStatus) -> bool {
    match users.iter_mut().find(|u| u.id == *id) {
        Some(user) => {
            user.status = status;
            true
        }
        None => false,
    }
}

/// Apply `action` to the user with `id` if it is offered for that user.
///
/// Returns the status the user had before. Unknown ids and actions that do
/// not apply are no-ops.
pub fn dispatch(users: &mut [User], id: &UserId, action: StatusAction) -> Option<UserStatus> {
    let user = users.iter_mut().find(|u| u.id == *id)?;
    if !action.applies_to(user.role, user.status) {
        return None;
    }

    let previous = user.status;
    user.status = action.target();
    Some(previous)
}

/// An optimistic status change awaiting confirmation from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub user_id: UserId,
    pub action: StatusAction,
    pub previous: UserStatus,
}

impl StatusTransition {
    /// Apply `action` locally and remember how to undo it.
    pub fn begin(users: &mut [User], id: &UserId, action: StatusAction) -> Option<Self> {
        let previous = dispatch(users, id, action)?;
        Some(Self {
            user_id: id.clone(),
            action,
            previous,
        })
    }

    /// Replace the local record with the one the server confirmed.
    pub fn confirm(&self, users: &mut [User], confirmed: User) -> bool {
        match users.iter_mut().find(|u| u.id == self.user_id) {
            Some(user) => {
                *user = confirmed;
                true
            }
            None => false,
        }
    }

    /// Undo the local change after the server rejected it.
    ///
    /// Only restores when the user still carries the optimistic status, so a
    /// newer change is never clobbered.
    pub fn rollback(&self, users: &mut [User]) -> bool {
        match users.iter_mut().find(|u| u.id == self.user_id) {
            Some(user) if user.status == self.action.target() => {
                user.status = self.previous;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::fixtures::{user, users};
    use rstest::rstest;

    #[rstest]
    #[case(UserRole::Driver, UserStatus::Pending, &[StatusAction::ApproveDriver])]
    #[case(UserRole::Driver, UserStatus::Active, &[StatusAction::SuspendDriver])]
    #[case(UserRole::Driver, UserStatus::Suspended, &[StatusAction::UnsuspendDriver])]
    #[case(UserRole::Driver, UserStatus::Blocked, &[])]
    #[case(UserRole::Rider, UserStatus::Active, &[StatusAction::BlockRider])]
    #[case(UserRole::Rider, UserStatus::Blocked, &[StatusAction::UnblockRider])]
    #[case(UserRole::Rider, UserStatus::Pending, &[])]
    #[case(UserRole::Rider, UserStatus::Suspended, &[])]
    fn offers_only_listed_transitions(
        #[case] role: UserRole,
        #[case] status: UserStatus,
        #[case] expected: &[StatusAction],
    ) {
        assert_eq!(StatusAction::available(role, status), expected);
    }

    #[test]
    fn rider_block_toggles_both_ways() {
        let mut users = users();
        let id = UserId::new("usr_002");

        assert_eq!(dispatch(&mut users, &id, StatusAction::BlockRider), Some(UserStatus::Active));
        assert_eq!(users[1].status, UserStatus::Blocked);
        assert_eq!(dispatch(&mut users, &id, StatusAction::UnblockRider), Some(UserStatus::Blocked));
        assert_eq!(users[1].status, UserStatus::Active);
    }

    #[test]
    fn approving_changes_only_the_target() {
        let before = users();
        let mut after = before.clone();
        let id = UserId::new("usr_003");

        assert!(dispatch(&mut after, &id, StatusAction::ApproveDriver).is_some());

        for (old, new) in before.iter().zip(&after) {
            if old.id == id {
                assert_eq!(new.status, UserStatus::Active);
                assert_eq!(User { status: old.status, ..new.clone() }, *old);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let before = users();
        let mut after = before.clone();
        let missing = UserId::new("usr_999");

        assert!(!set_status(&mut after, &missing, UserStatus::Blocked));
        assert_eq!(dispatch(&mut after, &missing, StatusAction::BlockRider), None);
        assert_eq!(before, after);
    }

    #[test]
    fn action_not_offered_is_a_no_op() {
        let before = users();
        let mut after = before.clone();

        // usr_001 is an active driver; riders actions do not apply.
        assert_eq!(
            dispatch(&mut after, &UserId::new("usr_001"), StatusAction::BlockRider),
            None
        );
        assert_eq!(before, after);
    }

    #[test]
    fn approve_end_to_end() {
        let mut users = vec![
            user("1", "Driver One", UserRole::Driver, UserStatus::Pending),
            user("2", "Rider Two", UserRole::Rider, UserStatus::Active),
        ];

        dispatch(&mut users, &UserId::new("1"), StatusAction::ApproveDriver);

        let state: Vec<_> = users.iter().map(|u| (u.id.as_str(), u.status, u.role)).collect();
        assert_eq!(
            state,
            [
                ("1", UserStatus::Active, UserRole::Driver),
                ("2", UserStatus::Active, UserRole::Rider),
            ]
        );
    }

    #[test]
    fn set_status_is_unconditional() {
        let mut users = users();
        assert!(set_status(&mut users, &UserId::new("usr_004"), UserStatus::Suspended));
        assert_eq!(users[3].status, UserStatus::Suspended);
    }

    #[test]
    fn rejected_transition_rolls_back() {
        let mut users = users();
        let id = UserId::new("usr_005");

        let transition = StatusTransition::begin(&mut users, &id, StatusAction::UnsuspendDriver)
            .expect("action applies");
        assert_eq!(users[4].status, UserStatus::Active);

        assert!(transition.rollback(&mut users));
        assert_eq!(users[4].status, UserStatus::Suspended);
    }

    #[test]
    fn rollback_leaves_newer_changes_alone() {
        let mut users = users();
        let id = UserId::new("usr_001");

        let transition = StatusTransition::begin(&mut users, &id, StatusAction::SuspendDriver)
            .expect("action applies");
        set_status(&mut users, &id, UserStatus::Pending);

        assert!(!transition.rollback(&mut users));
        assert_eq!(users[0].status, UserStatus::Pending);
    }

    #[test]
    fn confirmed_transition_adopts_server_record() {
        let mut users = users();
        let id = UserId::new("usr_003");

        let transition = StatusTransition::begin(&mut users, &id, StatusAction::ApproveDriver)
            .expect("action applies");

        let mut confirmed = users[2].clone();
        confirmed.email = "fahim@rides.example".to_string();
        assert!(transition.confirm(&mut users, confirmed.clone()));
        assert_eq!(users[2], confirmed);
    }

    #[test]
    fn begin_refuses_actions_that_do_not_apply() {
        let mut users = users();
        assert!(
            StatusTransition::begin(&mut users, &UserId::new("usr_003"), StatusAction::BlockRider)
                .is_none()
        );
    }
}
