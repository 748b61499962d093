//! 电热毯账本
//!
//! 库存只记录总数；仓库数量在每次读取时推导：
//! `in_warehouse = total_stock - in_rooms - broken`，可以为负（账实不符）。

use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::Room;
use thiserror::Error;

use crate::rooms::registry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("No blanket left in the warehouse")]
    WarehouseEmpty,

    #[error("Room {0} has no blanket")]
    NoBlanketInRoom(String),

    #[error("Room {0} has no broken blanket")]
    NoBrokenBlanket(String),

    #[error("Room {0} blanket count overflow")]
    CountOverflow(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::RoomNotFound(_) => ErrorCode::RoomNotFound,
            LedgerError::WarehouseEmpty => ErrorCode::WarehouseEmpty,
            LedgerError::NoBlanketInRoom(_) => ErrorCode::NoBlanketInRoom,
            LedgerError::NoBrokenBlanket(_) => ErrorCode::NoBrokenBlanket,
            LedgerError::CountOverflow(_) => ErrorCode::ValueOutOfRange,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// 账本汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_stock: u32,
    pub in_rooms: u64,
    pub broken: u64,
    /// 可能为负
    pub in_warehouse: i64,
    /// 各房间缺少的数量合计
    pub missing_from_rooms: u64,
}

fn sum_wide(rooms: &[Room], count: impl Fn(&Room) -> u32) -> u64 {
    rooms.iter().map(|r| u64::from(count(r))).sum()
}

/// 推导汇总（按 u64 累加，单房 u32 上限不会溢出）
pub fn summarize(rooms: &[Room], total_stock: u32) -> LedgerSummary {
    let in_rooms = sum_wide(rooms, |r| r.electric_blankets.current);
    let broken = sum_wide(rooms, |r| r.electric_blankets.broken);
    let missing_from_rooms = sum_wide(rooms, |r| r.electric_blankets.missing());
    let placed = i64::try_from(in_rooms.saturating_add(broken)).unwrap_or(i64::MAX);
    LedgerSummary {
        total_stock,
        in_rooms,
        broken,
        in_warehouse: i64::from(total_stock).saturating_sub(placed),
        missing_from_rooms,
    }
}

fn bump(count: u32, code: &str) -> Result<u32, LedgerError> {
    count.checked_add(1).ok_or_else(|| LedgerError::CountOverflow(code.to_string()))
}

fn room_mut<'a>(rooms: &'a mut [Room], room_id: &str) -> Result<&'a mut Room, LedgerError> {
    registry::find_by_id_mut(rooms, room_id).ok_or_else(|| LedgerError::RoomNotFound(room_id.to_string()))
}

/// 房间数量 +1（不检查仓库）
pub fn increment(rooms: &mut [Room], room_id: &str) -> Result<u32, LedgerError> {
    let room = room_mut(rooms, room_id)?;
    room.electric_blankets.current = bump(room.electric_blankets.current, &room.code)?;
    Ok(room.electric_blankets.current)
}

/// 房间数量 -1，最低为 0
pub fn decrement(rooms: &mut [Room], room_id: &str) -> Result<u32, LedgerError> {
    let room = room_mut(rooms, room_id)?;
    room.electric_blankets.current = room.electric_blankets.current.saturating_sub(1);
    Ok(room.electric_blankets.current)
}

/// 直接设置房间数量
pub fn set_current(rooms: &mut [Room], room_id: &str, count: u32) -> Result<(), LedgerError> {
    room_mut(rooms, room_id)?.electric_blankets.current = count;
    Ok(())
}

/// 从一个房间移一条到另一个房间
pub fn transfer(rooms: &mut [Room], from_id: &str, to_id: &str) -> Result<(), LedgerError> {
    // both must exist and accept the move before anything changes
    let to = room_mut(rooms, to_id)?;
    let to_count = bump(to.electric_blankets.current, &to.code)?;
    let from = room_mut(rooms, from_id)?;
    if from.electric_blankets.current == 0 {
        return Err(LedgerError::NoBlanketInRoom(from.code.clone()));
    }
    from.electric_blankets.current -= 1;
    room_mut(rooms, to_id)?.electric_blankets.current = to_count;
    Ok(())
}

/// 标记一条损坏：current → broken
pub fn mark_broken(rooms: &mut [Room], room_id: &str) -> Result<(), LedgerError> {
    let room = room_mut(rooms, room_id)?;
    if room.electric_blankets.current == 0 {
        return Err(LedgerError::NoBlanketInRoom(room.code.clone()));
    }
    let broken = bump(room.electric_blankets.broken, &room.code)?;
    room.electric_blankets.current -= 1;
    room.electric_blankets.broken = broken;
    Ok(())
}

/// 修复一条：broken → current
pub fn mark_fixed(rooms: &mut [Room], room_id: &str) -> Result<(), LedgerError> {
    let room = room_mut(rooms, room_id)?;
    if room.electric_blankets.broken == 0 {
        return Err(LedgerError::NoBrokenBlanket(room.code.clone()));
    }
    let current = bump(room.electric_blankets.current, &room.code)?;
    room.electric_blankets.broken -= 1;
    room.electric_blankets.current = current;
    Ok(())
}
