//! 设备管理 - 电热毯
//!
//! 账本逻辑在 [`ledger`]，指令语法在 [`command`]。
//! 这里的 `impl Resort` 负责加锁、仓库检查和变更广播。

pub mod command;
pub mod ledger;

pub use command::{EquipmentCommand, EquipmentCommandError, parse_equipment_command};
pub use ledger::{LedgerError, LedgerSummary, summarize};

use crate::core::{ChangeEvent, Resort};
use crate::rooms::registry;

/// 首次启动的电热毯总库存
pub const DEFAULT_BLANKET_STOCK: u32 = 35;

impl Resort {
    pub fn equipment_summary(&self) -> LedgerSummary {
        self.read(|s| summarize(&s.rooms, s.total_blanket_stock))
    }

    /// 放一条进房间；仓库没有余量时拒绝
    pub fn add_blanket(&self, room_id: &str) -> Result<u32, LedgerError> {
        self.try_mutate(ChangeEvent::Equipment, |state, _| {
            if summarize(&state.rooms, state.total_blanket_stock).in_warehouse <= 0 {
                return Err(LedgerError::WarehouseEmpty);
            }
            ledger::increment(&mut state.rooms, room_id)
        })
    }

    /// 从房间取回一条，最低为 0
    pub fn remove_blanket(&self, room_id: &str) -> Result<u32, LedgerError> {
        self.try_mutate(ChangeEvent::Equipment, |state, _| ledger::decrement(&mut state.rooms, room_id))
    }

    pub fn set_room_blankets(&self, room_id: &str, count: u32) -> Result<(), LedgerError> {
        self.try_mutate(ChangeEvent::Equipment, |state, _| {
            ledger::set_current(&mut state.rooms, room_id, count)
        })
    }

    pub fn transfer_blanket(&self, from_id: &str, to_id: &str) -> Result<(), LedgerError> {
        self.try_mutate(ChangeEvent::Equipment, |state, _| {
            ledger::transfer(&mut state.rooms, from_id, to_id)
        })
    }

    pub fn break_blanket(&self, room_id: &str) -> Result<(), LedgerError> {
        self.try_mutate(ChangeEvent::Equipment, |state, _| ledger::mark_broken(&mut state.rooms, room_id))
    }

    pub fn fix_blanket(&self, room_id: &str) -> Result<(), LedgerError> {
        self.try_mutate(ChangeEvent::Equipment, |state, _| ledger::mark_fixed(&mut state.rooms, room_id))
    }

    /// 设置总库存（不重新分配）
    pub fn set_blanket_stock(&self, total: u32) {
        self.mutate(ChangeEvent::Equipment, |state, _| state.total_blanket_stock = total);
        tracing::info!(total, "Blanket stock updated");
    }

    /// 执行一条设备指令，返回操作结果描述
    pub fn run_equipment_command(&self, input: &str) -> Result<String, EquipmentCommandError> {
        let command = parse_equipment_command(input)?;
        let message = match command {
            EquipmentCommand::SetStock(total) => {
                self.set_blanket_stock(total);
                format!("總庫存已更新為: {total}")
            }
            EquipmentCommand::SetRoom { code, count } => {
                let id = self.room_id_for(&code)?;
                self.set_room_blankets(&id, count)?;
                format!("{code} 電熱毯數量已設為 {count}")
            }
            EquipmentCommand::Transfer { from, to } => {
                let from_id = self.room_id_for(&from)?;
                let to_id = self.room_id_for(&to)?;
                self.transfer_blanket(&from_id, &to_id)?;
                format!("已從 {from} 移動一件電熱毯至 {to}")
            }
        };
        tracing::info!(command = %input.trim(), "Equipment command applied");
        Ok(message)
    }

    fn room_id_for(&self, code: &str) -> Result<String, EquipmentCommandError> {
        self.read(|s| registry::find_by_code(&s.rooms, code).map(|r| r.id.clone()))
            .ok_or_else(|| EquipmentCommandError::UnknownRoom(code.to_string()))
    }
}
