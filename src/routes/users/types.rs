use serde::Deserialize;
use utoipa::ToSchema;

use crate::entity::roles::RoleName;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RolesUpdate {
    /// Replaces every role the user currently holds
    pub roles: Vec<RoleName>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActiveUpdate {
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordUpdate {
    pub password: String,
}
