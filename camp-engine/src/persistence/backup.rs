//! 备份汇出 / 还原
//!
//! 备份文件是完整状态加上 `version` 与 `timestamp`。还原要求至少有
//! `rooms` 与 `inventory`；其余集合缺少时补空，电热毯库存缺少（或为 0）时补 35。

use serde::Deserialize;
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{BookingRecord, InventoryItem, Member, Room};
use thiserror::Error;

use crate::core::{Resort, ResortState};
use crate::equipment::DEFAULT_BLANKET_STOCK;

/// 备份格式版本
pub const BACKUP_VERSION: &str = "Persistent";

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Backup is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Backup is missing rooms or inventory")]
    MissingCollections,
}

impl From<BackupError> for AppError {
    fn from(err: BackupError) -> Self {
        AppError::with_message(ErrorCode::BackupInvalid, err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct BackupDocument {
    rooms: Option<Vec<Room>>,
    inventory: Option<Vec<InventoryItem>>,
    #[serde(default)]
    booking_records: Vec<BookingRecord>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    total_blanket_stock: Option<u32>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// 还原结果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSummary {
    pub timestamp: Option<String>,
    pub rooms: usize,
    pub records: usize,
    pub members: usize,
}

impl Resort {
    /// 汇出完整备份
    pub fn export_backup(&self) -> Value {
        let timestamp = chrono::DateTime::from_timestamp_millis(self.context().timestamp)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        self.read(|s| {
            json!({
                "version": BACKUP_VERSION,
                "timestamp": timestamp,
                "rooms": s.rooms,
                "inventory": s.inventory,
                "booking_records": s.booking_records,
                "members": s.members,
                "total_blanket_stock": s.total_blanket_stock,
            })
        })
    }

    /// 从备份文本还原；格式错误时状态不变
    pub fn restore_backup(&self, content: &str) -> Result<RestoreSummary, BackupError> {
        let doc: BackupDocument = serde_json::from_str(content)?;
        let (Some(rooms), Some(inventory)) = (doc.rooms, doc.inventory) else {
            tracing::warn!("Backup rejected: rooms or inventory missing");
            return Err(BackupError::MissingCollections);
        };

        let state = ResortState {
            rooms,
            inventory,
            booking_records: doc.booking_records,
            members: doc.members,
            total_blanket_stock: doc
                .total_blanket_stock
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_BLANKET_STOCK),
        };
        let summary = RestoreSummary {
            timestamp: doc.timestamp,
            rooms: state.rooms.len(),
            records: state.booking_records.len(),
            members: state.members.len(),
        };
        self.replace(state);

        tracing::info!(
            timestamp = ?summary.timestamp,
            rooms = summary.rooms,
            records = summary.records,
            members = summary.members,
            "Backup restored"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChangeEvent, Clock};
    use chrono::NaiveDate;
    use shared::models::RoomStatus;

    fn resort() -> Resort {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Resort::new(ResortState::default(), Clock::manual(now))
    }

    #[test]
    fn test_export_then_restore() {
        let source = resort();
        source.mutate(ChangeEvent::Rooms, |s, _| {
            s.rooms[3].status = RoomStatus::Maintenance;
            s.total_blanket_stock = 42;
        });
        let backup = source.export_backup();
        assert_eq!(backup["version"], BACKUP_VERSION);
        assert!(backup["timestamp"].as_str().unwrap().starts_with("2025-03-01T09:00:00"));

        let target = resort();
        let mut rx = target.subscribe();
        let summary = target.restore_backup(&backup.to_string()).unwrap();
        assert_eq!(summary.rooms, 27);
        assert_eq!(target.snapshot(), source.snapshot());
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent::Restored);
    }

    #[test]
    fn test_restore_fills_optional_collections() {
        let resort = resort();
        let rooms = resort.read(|s| serde_json::to_value(&s.rooms).unwrap());
        let content = json!({ "rooms": rooms, "inventory": [], "total_blanket_stock": 0 }).to_string();

        resort.restore_backup(&content).unwrap();
        let state = resort.snapshot();
        assert!(state.inventory.is_empty());
        assert!(state.members.is_empty());
        assert_eq!(state.total_blanket_stock, 35);
    }

    #[test]
    fn test_invalid_backup_leaves_state_untouched() {
        let resort = resort();
        let before = resort.snapshot();

        assert!(matches!(resort.restore_backup("not json"), Err(BackupError::Malformed(_))));
        assert!(matches!(
            resort.restore_backup(r#"{ "members": [] }"#),
            Err(BackupError::MissingCollections)
        ));
        assert!(matches!(
            resort.restore_backup(r#"{ "rooms": "x", "inventory": [] }"#),
            Err(BackupError::Malformed(_))
        ));
        assert_eq!(resort.snapshot(), before);
    }
}
