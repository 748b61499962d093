//! 设备指令
//!
//! - `庫存=35`  设置总库存
//! - `尊1=2`    设置房间内数量
//! - `5>12`     从 5 号移一条到 12 号

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::ledger::LedgerError;
use crate::rooms::normalize_room_code;

const STOCK_PREFIX: &str = "庫存=";

/// 单间房可设置的上限
pub const MAX_ROOM_BLANKETS: u32 = 99;

/// 解析后的设备指令（房号已归一化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentCommand {
    SetStock(u32),
    SetRoom { code: String, count: u32 },
    Transfer { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipmentCommandError {
    #[error("Equipment command is empty")]
    Empty,

    #[error("Invalid stock value: {0}")]
    InvalidStock(String),

    #[error("Invalid equipment command: {0}")]
    InvalidFormat(String),

    #[error("Room not found: {0}")]
    UnknownRoom(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<EquipmentCommandError> for AppError {
    fn from(err: EquipmentCommandError) -> Self {
        match err {
            EquipmentCommandError::Ledger(e) => e.into(),
            EquipmentCommandError::Empty => AppError::new(ErrorCode::CommandEmpty),
            EquipmentCommandError::InvalidStock(_) => {
                AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
            }
            EquipmentCommandError::InvalidFormat(_) => {
                AppError::with_message(ErrorCode::InvalidFormat, err.to_string())
            }
            EquipmentCommandError::UnknownRoom(_) => {
                AppError::with_message(ErrorCode::RoomNotFound, err.to_string())
            }
        }
    }
}

/// 解析设备指令
pub fn parse_equipment_command(input: &str) -> Result<EquipmentCommand, EquipmentCommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(EquipmentCommandError::Empty);
    }

    if let Some(value) = input.strip_prefix(STOCK_PREFIX) {
        return value
            .trim()
            .parse()
            .map(EquipmentCommand::SetStock)
            .map_err(|_| EquipmentCommandError::InvalidStock(value.to_string()));
    }

    if let Some((raw_code, count)) = input.split_once('=') {
        let count = count
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|c| *c <= MAX_ROOM_BLANKETS)
            .ok_or_else(|| EquipmentCommandError::InvalidFormat(input.to_string()))?;
        return Ok(EquipmentCommand::SetRoom {
            code: normalize_room_code(raw_code.trim()),
            count,
        });
    }

    if let Some((from, to)) = input.split_once('>') {
        return Ok(EquipmentCommand::Transfer {
            from: normalize_room_code(from.trim()),
            to: normalize_room_code(to.trim()),
        });
    }

    Err(EquipmentCommandError::InvalidFormat(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(parse_equipment_command("庫存=40"), Ok(EquipmentCommand::SetStock(40)));
        assert_eq!(
            parse_equipment_command("尊一=2"),
            Ok(EquipmentCommand::SetRoom {
                code: "尊1".into(),
                count: 2
            })
        );
        assert_eq!(
            parse_equipment_command(" 5 > 十二 "),
            Ok(EquipmentCommand::Transfer {
                from: "5".into(),
                to: "102".into()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_equipment_command("  "), Err(EquipmentCommandError::Empty));
        assert_eq!(
            parse_equipment_command("庫存=-1"),
            Err(EquipmentCommandError::InvalidStock("-1".into()))
        );
        assert!(matches!(
            parse_equipment_command("5=abc"),
            Err(EquipmentCommandError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_equipment_command("1=4294967295"),
            Err(EquipmentCommandError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_equipment_command("2=100"),
            Err(EquipmentCommandError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_equipment_command("2=99"),
            Ok(EquipmentCommand::SetRoom { count: 99, .. })
        ));
        assert!(matches!(
            parse_equipment_command("5 to 6"),
            Err(EquipmentCommandError::InvalidFormat(_))
        ));
    }
}
