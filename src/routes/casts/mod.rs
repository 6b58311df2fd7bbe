mod handlers;
mod phases;
mod types;

pub use handlers::{attach_sensor, create_cast, delete_cast, get_cast, list_cast_sensors, list_casts};
pub use phases::{
    save_at_depth, save_beginning_position, save_bottom_depth, save_capture_start, save_ending_position,
    save_on_deck, save_post_cast, save_pre_cast,
};
pub use types::CreateCastRequest;

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_attach_sensor, __path_create_cast, __path_delete_cast, __path_get_cast,
    __path_list_cast_sensors, __path_list_casts,
};
pub use phases::{
    __path_save_at_depth, __path_save_beginning_position, __path_save_bottom_depth,
    __path_save_capture_start, __path_save_ending_position, __path_save_on_deck, __path_save_post_cast,
    __path_save_pre_cast,
};
