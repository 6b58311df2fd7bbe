//! Authentication, roles and sessions.

pub mod accounts;
pub mod password;
pub mod permissions;
pub mod session;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::entity::roles::{self, RoleName};
use crate::entity::{user_roles, users};
use crate::error::{AppResult, AuthError};

/// Who is making a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    pub roles: BTreeSet<RoleName>,
}

/// Why a login was refused. Only ever logged; callers see `InvalidCredentials`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoginFailure {
    UnknownUser,
    WrongPassword,
    Inactive,
}

impl LoginFailure {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownUser => "user not found",
            Self::WrongPassword => "wrong password",
            Self::Inactive => "account inactive",
        }
    }
}

/// Check a username/password pair and report the precise outcome.
///
/// An unknown username still pays one bcrypt verification at `bcrypt_cost`.
pub async fn check_credentials<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> AppResult<Result<users::Model, LoginFailure>> {
    let Some(user) = users::Entity::find()
        .filter(users::Column::Username.eq(username.trim()))
        .one(db)
        .await?
    else {
        password::burn_verification(password.to_owned(), bcrypt_cost).await?;
        return Ok(Err(LoginFailure::UnknownUser));
    };

    if !password::verify_password(password.to_owned(), user.password.clone()).await? {
        return Ok(Err(LoginFailure::WrongPassword));
    }

    if !user.active {
        return Ok(Err(LoginFailure::Inactive));
    }

    Ok(Ok(user))
}

/// Authenticate a user. Every refusal looks the same to the caller.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> AppResult<users::Model> {
    match check_credentials(db, username, password, bcrypt_cost).await? {
        Ok(user) => {
            tracing::info!(username = %user.username, user_id = user.user_id, "login_succeeded");
            Ok(user)
        }
        Err(reason) => {
            tracing::warn!(username = %username, reason = reason.as_str(), "login_failed");
            Err(AuthError::InvalidCredentials.into())
        }
    }
}

pub async fn roles_of<C: ConnectionTrait>(db: &C, user_id: i32) -> AppResult<BTreeSet<RoleName>> {
    let rows = user_roles::Entity::find()
        .filter(user_roles::Column::UserId.eq(user_id))
        .find_also_related(roles::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(_, role)| role.map(|r| r.role_name))
        .collect())
}

/// Pure membership check. No role implies another.
#[must_use]
pub fn authorize(identity: &Identity, required: RoleName) -> bool {
    identity.roles.contains(&required)
}

pub async fn load_identity<C: ConnectionTrait>(db: &C, user: &users::Model) -> AppResult<Identity> {
    Ok(Identity {
        user_id: user.user_id,
        username: user.username.clone(),
        full_name: user.full_name(),
        roles: roles_of(db, user.user_id).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_is_plain_membership() {
        let identity = Identity {
            user_id: 1,
            username: "admin".into(),
            full_name: "Ada Admin".into(),
            roles: BTreeSet::from([RoleName::Admin]),
        };
        assert!(authorize(&identity, RoleName::Admin));
        assert!(!authorize(&identity, RoleName::Console));
        assert!(!authorize(&identity, RoleName::Bottlecop));
    }
}
