//! Booking Record Model

use super::room::RoomType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Booking record entity (入住紀錄)
///
/// Append-only history entry. Snapshot of the stay at the moment it was
/// recorded; later room edits never rewrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    pub room_code: String,
    pub room_type: RoomType,
    pub guest_name: String,
    pub check_in_date: NaiveDate,
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default)]
    pub extra_guests: u8,
    #[serde(default)]
    pub actual_adults: Option<u32>,
    #[serde(default)]
    pub actual_children: Option<u32>,
    /// Guest / booking notes only, never the room's housekeeping notes
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: i64,
}

/// One row extracted from an occupancy sheet by the AI collaborator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub room_code: String,
    pub guest_name: String,
    /// Date printed on the sheet (YYYY-MM-DD), informational only
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub notes: Option<String>,
    /// Free-form stay hint such as "2泊", "3天2夜" or "續住"
    #[serde(default)]
    pub stay_duration_info: Option<String>,
}
