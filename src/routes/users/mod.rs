mod handlers;
mod types;

pub use handlers::{change_password, create_user, delete_user, list_roles, list_users, set_active, set_roles};
pub use types::{ActiveUpdate, PasswordUpdate, RolesUpdate};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_change_password, __path_create_user, __path_delete_user, __path_list_roles, __path_list_users,
    __path_set_active, __path_set_roles,
};
