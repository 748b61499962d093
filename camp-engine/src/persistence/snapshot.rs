//! 持久化快照
//!
//! 整份营运状态序列化为单一 JSON 文档，附带 `last_updated`。
//! 缺少的集合在载入时补默认值，旧文档也能直接读取。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{BookingRecord, InventoryItem, Member, Room};

use crate::core::ResortState;
use crate::kitchen::defaults::default_inventory;
use crate::rooms::registry::default_roster;

/// 存储中的快照文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortSnapshot {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub inventory: Option<Vec<InventoryItem>>,
    #[serde(default)]
    pub booking_records: Vec<BookingRecord>,
    #[serde(default)]
    pub total_blanket_stock: Option<u32>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ResortSnapshot {
    pub fn capture(state: &ResortState, last_updated: DateTime<Utc>) -> Self {
        Self {
            rooms: state.rooms.clone(),
            members: state.members.clone(),
            inventory: Some(state.inventory.clone()),
            booking_records: state.booking_records.clone(),
            total_blanket_stock: Some(state.total_blanket_stock),
            last_updated: Some(last_updated),
        }
    }

    /// 还原为营运状态；空房间表或缺少库存时使用默认值
    pub fn into_state(self, default_blanket_stock: u32) -> ResortState {
        ResortState {
            rooms: if self.rooms.is_empty() {
                default_roster()
            } else {
                self.rooms
            },
            booking_records: self.booking_records,
            inventory: self.inventory.unwrap_or_else(default_inventory),
            members: self.members,
            total_blanket_stock: self.total_blanket_stock.unwrap_or(default_blanket_stock),
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::RoomStatus;

    #[test]
    fn test_capture_and_restore() {
        let mut state = ResortState::default();
        state.rooms[0].status = RoomStatus::Dirty;
        state.total_blanket_stock = 40;

        let stamp = DateTime::from_timestamp_millis(1_740_000_000_000).unwrap();
        let value = ResortSnapshot::capture(&state, stamp).to_value().unwrap();
        assert!(value.get("last_updated").is_some());

        let restored = ResortSnapshot::from_value(value).unwrap().into_state(35);
        assert_eq!(restored, state);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let snapshot = ResortSnapshot::from_value(json!({ "members": [] })).unwrap();
        let state = snapshot.into_state(35);
        assert_eq!(state.rooms.len(), 27);
        assert_eq!(state.inventory.len(), 5);
        assert_eq!(state.total_blanket_stock, 35);
    }

    #[test]
    fn test_empty_inventory_is_kept() {
        let state = ResortSnapshot::from_value(json!({ "inventory": [] }))
            .unwrap()
            .into_state(35);
        assert!(state.inventory.is_empty());
    }
}
