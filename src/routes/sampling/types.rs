use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entity::bottles::BottleStatus;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// `csv` for a spreadsheet export; JSON otherwise
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BottleStatusUpdate {
    pub status: BottleStatus,
}
