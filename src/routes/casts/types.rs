use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::cast::NewCast;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RecentQuery {
    /// Maximum number of casts, newest first
    pub limit: Option<u64>,
}

/// A new cast. The observer defaults to the caller.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCastRequest {
    pub ship_id: i32,
    pub station_id: i32,
    pub cruise_id: i32,
    pub observer_user_id: Option<i32>,
    pub cast_number: i32,
    pub cast_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateCastRequest {
    pub fn into_new_cast(self, caller: i32) -> NewCast {
        NewCast {
            ship_id: self.ship_id,
            station_id: self.station_id,
            cruise_id: self.cruise_id,
            observer_user_id: self.observer_user_id.unwrap_or(caller),
            cast_number: self.cast_number,
            cast_date: self.cast_date,
            notes: self.notes,
        }
    }
}
