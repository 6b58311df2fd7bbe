use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entity::niskin_bottles::NiskinStatus;
use crate::entity::sensor_inventory::SensorStatus;
use crate::reference::SearchTarget;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Include retired rows
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StationQuery {
    /// Only stations of this cruise
    pub cruise_id: Option<i32>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SensorQuery {
    /// Only operational, active sensors
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub target: SearchTarget,
    /// Substring to look for
    pub q: String,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SensorStatusUpdate {
    pub status: SensorStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NiskinStatusUpdate {
    pub status: NiskinStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActiveFlag {
    pub active: bool,
}
