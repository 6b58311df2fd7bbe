//! sea-orm table mappings for the cast log schema.

pub mod at_depth_position;
pub mod beginning_position;
pub mod bottle_replacements;
pub mod bottles;
pub mod bottom_depth_position;
pub mod capture_start;
pub mod cast_sensors;
pub mod cruises;
pub mod ctd_cast_log;
pub mod ending_position;
pub mod niskin_bottles;
pub mod on_deck_position;
pub mod post_cast;
pub mod pre_cast;
pub mod roles;
pub mod sample_pressure;
pub mod sample_timing;
pub mod sample_types;
pub mod sampling_session;
pub mod sensor_inventory;
pub mod ships;
pub mod station_target_depths;
pub mod stations;
pub mod user_roles;
pub mod users;
