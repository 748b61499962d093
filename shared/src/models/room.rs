//! Room Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accommodation category (房型)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    DoubleTent,
    PalaceTent,
    VipTent,
    WaterHouse,
    CypressRoom,
}

impl RoomType {
    pub const ALL: [RoomType; 5] = [
        RoomType::DoubleTent,
        RoomType::PalaceTent,
        RoomType::VipTent,
        RoomType::WaterHouse,
        RoomType::CypressRoom,
    ];

    /// Display label shown to staff
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::DoubleTent => "雙人帳篷",
            RoomType::PalaceTent => "皇宮四人帳",
            RoomType::VipTent => "尊爵四人帳",
            RoomType::WaterHouse => "水屋",
            RoomType::CypressRoom => "檜木房",
        }
    }

    /// Guests included in the base price
    pub fn base_capacity(&self) -> u32 {
        match self {
            RoomType::PalaceTent | RoomType::VipTent => 4,
            _ => 2,
        }
    }

    /// Electric blankets a room of this type is entitled to
    pub fn blanket_entitlement(&self) -> u32 {
        match self {
            RoomType::PalaceTent | RoomType::VipTent => 2,
            _ => 1,
        }
    }
}

/// Room lifecycle status (房態)
///
/// VACANT → OCCUPIED → AWAITING_STRIP → DIRTY → VACANT, with MAINTENANCE
/// reachable from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Vacant,
    Occupied,
    AwaitingStrip,
    Dirty,
    Maintenance,
}

impl RoomStatus {
    pub const ALL: [RoomStatus; 5] = [
        RoomStatus::Vacant,
        RoomStatus::Occupied,
        RoomStatus::AwaitingStrip,
        RoomStatus::Dirty,
        RoomStatus::Maintenance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Vacant => "空房",
            RoomStatus::Occupied => "入住中",
            RoomStatus::AwaitingStrip => "待撤床",
            RoomStatus::Dirty => "待清潔",
            RoomStatus::Maintenance => "維護中",
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, RoomStatus::Occupied)
    }
}

/// Per-room electric blanket counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlanketCount {
    /// Entitlement for this room
    pub total: u32,
    /// Units physically in the room
    pub current: u32,
    /// Units marked broken (out of circulation)
    pub broken: u32,
}

impl BlanketCount {
    pub fn full(total: u32) -> Self {
        Self {
            total,
            current: total,
            broken: 0,
        }
    }

    /// Units the room is short of its entitlement
    pub fn missing(&self) -> u32 {
        self.total.saturating_sub(self.current)
    }
}

/// Room entity (房間)
///
/// `id` is the immutable key; `code` is the label staff type and speak.
/// Occupancy fields are only meaningful while `status` is OCCUPIED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub code: String,
    pub room_type: RoomType,
    pub status: RoomStatus,
    #[serde(default)]
    pub current_guest_name: Option<String>,
    #[serde(default)]
    pub current_guest_id: Option<i64>,
    #[serde(default)]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default)]
    pub extra_guests: u8,
    #[serde(default)]
    pub actual_adults: Option<u32>,
    #[serde(default)]
    pub actual_children: Option<u32>,
    pub electric_blankets: BlanketCount,
    /// Housekeeping annotation, survives check-out
    #[serde(default)]
    pub notes: String,
}

impl Room {
    /// A vacant room with its full blanket entitlement
    pub fn new(id: impl Into<String>, code: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            room_type,
            status: RoomStatus::Vacant,
            current_guest_name: None,
            current_guest_id: None,
            check_in_date: None,
            check_out_date: None,
            extra_guests: 0,
            actual_adults: None,
            actual_children: None,
            electric_blankets: BlanketCount::full(room_type.blanket_entitlement()),
            notes: String::new(),
        }
    }

    /// Guests actually staying: exact adults + children when recorded,
    /// otherwise base capacity plus extra guests.
    pub fn headcount(&self) -> u32 {
        let exact = self.actual_adults.unwrap_or(0) + self.actual_children.unwrap_or(0);
        if exact > 0 {
            exact
        } else {
            self.room_type.base_capacity() + u32::from(self.extra_guests)
        }
    }

    /// Drop every occupancy field. Housekeeping notes are kept.
    pub fn clear_occupancy(&mut self) {
        self.current_guest_name = None;
        self.current_guest_id = None;
        self.check_in_date = None;
        self.check_out_date = None;
        self.extra_guests = 0;
        self.actual_adults = None;
        self.actual_children = None;
    }

    /// Append a line to the housekeeping notes
    pub fn append_note(&mut self, line: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(line);
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.status.is_occupied()
    }
}
