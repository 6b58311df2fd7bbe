mod handlers;
mod sessions;
mod types;

pub use handlers::{
    bottles_for_cast, capture_summary, create_bottle, get_bottle, list_replacements, list_samples,
    record_sample, replace_bottle, update_bottle_status,
};
pub use sessions::{close_session, list_sessions, list_timings, open_session, set_timing};
pub use types::BottleStatusUpdate;

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_bottles_for_cast, __path_capture_summary, __path_create_bottle, __path_get_bottle,
    __path_list_replacements, __path_list_samples, __path_record_sample, __path_replace_bottle,
    __path_update_bottle_status,
};
pub use sessions::{
    __path_close_session, __path_list_sessions, __path_list_timings, __path_open_session, __path_set_timing,
};
