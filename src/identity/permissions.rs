//! Role to capability table.
//!
//! Roles are independent: admin does not inherit what console or bottlecop
//! can do. A request resolves its role set into a `PermissionSet` once and
//! every handler checks the permission it needs against that.

use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::entity::roles::RoleName;
use crate::error::AuthError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewData,
    ManageUsers,
    ManageReferenceData,
    CreateCast,
    RecordCastPhases,
    DeleteCast,
    RecordSamples,
    ManageBottles,
    ManageSamplingSessions,
}

#[must_use]
pub fn permissions_for(role: RoleName) -> &'static [Permission] {
    use Permission::*;

    match role {
        RoleName::Admin => &[ViewData, ManageUsers, ManageReferenceData, DeleteCast],
        RoleName::Console => &[ViewData, CreateCast, RecordCastPhases, RecordSamples],
        RoleName::Observer => &[ViewData, CreateCast, RecordCastPhases],
        RoleName::Bottlecop => &[
            ViewData,
            ManageBottles,
            ManageSamplingSessions,
            RecordSamples,
        ],
        RoleName::Sampler | RoleName::Analyst => &[ViewData, ManageBottles],
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn from_roles<'a>(roles: impl IntoIterator<Item = &'a RoleName>) -> Self {
        Self(
            roles
                .into_iter()
                .flat_map(|role| permissions_for(*role).iter().copied())
                .collect(),
        )
    }

    #[must_use]
    pub fn allows(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), AuthError> {
        if self.allows(permission) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(permission))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

/// Dashboard shortcut.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuickAction {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const QUICK_ACTIONS: [(QuickAction, &[Permission]); 4] = [
    (
        QuickAction {
            key: "new_cast",
            title: "New CTD Cast",
            description: "Start logging a new CTD cast operation",
        },
        &[Permission::CreateCast],
    ),
    (
        QuickAction {
            key: "samples",
            title: "Sample Management",
            description: "Track and manage water samples",
        },
        &[
            Permission::RecordSamples,
            Permission::ManageBottles,
            Permission::ManageSamplingSessions,
        ],
    ),
    (
        QuickAction {
            key: "users",
            title: "User Management",
            description: "Manage team members and roles",
        },
        &[Permission::ManageUsers],
    ),
    (
        QuickAction {
            key: "settings",
            title: "System Settings",
            description: "Configure ships, stations, and equipment",
        },
        &[Permission::ManageReferenceData],
    ),
];

/// Quick actions shown to a user. Admins see every action even where the
/// underlying operation needs another role.
#[must_use]
pub fn navigation(roles: &BTreeSet<RoleName>, permissions: &PermissionSet) -> Vec<QuickAction> {
    let show_all = roles.contains(&RoleName::Admin);

    QUICK_ACTIONS
        .iter()
        .filter(|(_, needs)| show_all || needs.iter().any(|p| permissions.allows(*p)))
        .map(|(action, _)| action.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(roles: &[RoleName]) -> BTreeSet<RoleName> {
        roles.iter().copied().collect()
    }

    #[test]
    fn admin_does_not_inherit_cast_recording() {
        let perms = PermissionSet::from_roles(&[RoleName::Admin]);
        assert!(perms.allows(Permission::ManageUsers));
        assert!(!perms.allows(Permission::RecordCastPhases));
        assert_eq!(
            perms.require(Permission::CreateCast),
            Err(AuthError::Forbidden(Permission::CreateCast))
        );
    }

    #[test]
    fn permissions_union_across_roles() {
        let perms = PermissionSet::from_roles(&[RoleName::Observer, RoleName::Sampler]);
        assert!(perms.allows(Permission::RecordCastPhases));
        assert!(perms.allows(Permission::ManageBottles));
        assert!(!perms.allows(Permission::DeleteCast));
    }

    #[test]
    fn no_roles_no_permissions() {
        let perms = PermissionSet::default();
        assert_eq!(perms.iter().count(), 0);
        assert!(navigation(&BTreeSet::new(), &perms).is_empty());
    }

    #[test]
    fn admin_sees_every_quick_action() {
        let roles = set(&[RoleName::Admin]);
        let perms = PermissionSet::from_roles(&roles);
        let keys: Vec<_> = navigation(&roles, &perms).into_iter().map(|a| a.key).collect();
        assert_eq!(keys, ["new_cast", "samples", "users", "settings"]);
    }

    #[test]
    fn observer_sees_cast_action_only() {
        let roles = set(&[RoleName::Observer]);
        let perms = PermissionSet::from_roles(&roles);
        let keys: Vec<_> = navigation(&roles, &perms).into_iter().map(|a| a.key).collect();
        assert_eq!(keys, ["new_cast"]);
    }
}
