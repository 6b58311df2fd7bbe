mod handlers;
mod types;

pub use handlers::{
    add_target_depth, create_cruise, create_niskin, create_sample_type, create_sensor, create_ship,
    create_station, get_cruise, get_niskin, get_sample_type, get_sensor, get_ship, get_station,
    list_cruises, list_niskins, list_sample_types, list_sensors, list_ships, list_stations,
    list_target_depths, search, set_active, set_niskin_status, set_sensor_status,
};
pub use types::{ActiveFlag, NiskinStatusUpdate, SensorStatusUpdate};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_add_target_depth, __path_create_cruise, __path_create_niskin, __path_create_sample_type,
    __path_create_sensor, __path_create_ship, __path_create_station, __path_get_cruise,
    __path_get_niskin, __path_get_sample_type, __path_get_sensor, __path_get_ship, __path_get_station,
    __path_list_cruises, __path_list_niskins, __path_list_sample_types, __path_list_sensors,
    __path_list_ships, __path_list_stations, __path_list_target_depths, __path_search,
    __path_set_active, __path_set_niskin_status, __path_set_sensor_status,
};
