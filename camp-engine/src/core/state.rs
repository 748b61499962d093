//! 营运状态与单写者控制器
//!
//! [`ResortState`] 是纯数据；[`Resort`] 持有唯一的锁，
//! 所有写操作都是 lock → 在副本上计算 → 替换 → 解锁 → 广播变更。

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use shared::models::{BookingRecord, InventoryItem, Member, Room};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::kitchen::defaults::default_inventory;
use crate::rooms::registry::{self, default_roster};
use crate::utils::time::OpContext;

/// 变更广播通道容量
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// 完整营运状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortState {
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub booking_records: Vec<BookingRecord>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub members: Vec<Member>,
    pub total_blanket_stock: u32,
}

impl ResortState {
    /// 首次启动的默认状态
    pub fn with_defaults(total_blanket_stock: u32) -> Self {
        Self {
            rooms: default_roster(),
            booking_records: Vec::new(),
            inventory: default_inventory(),
            members: Vec::new(),
            total_blanket_stock,
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        registry::find_by_id(&self.rooms, id)
    }

    pub fn room_by_code(&self, code: &str) -> Option<&Room> {
        registry::find_by_code(&self.rooms, code)
    }
}

impl Default for ResortState {
    fn default() -> Self {
        Self::with_defaults(crate::equipment::DEFAULT_BLANKET_STOCK)
    }
}

/// 变更事件（存档 worker 订阅）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Rooms,
    History,
    Equipment,
    Inventory,
    Members,
    /// 整份状态被还原或替换
    Restored,
}

/// 时钟：业务时区的系统时间，或测试用的手动时间
#[derive(Debug, Clone)]
pub enum Clock {
    Business(Tz),
    Manual(Arc<Mutex<NaiveDateTime>>),
}

impl Clock {
    pub fn manual(now: NaiveDateTime) -> Self {
        Clock::Manual(Arc::new(Mutex::new(now)))
    }

    /// 调整手动时钟；业务时钟忽略
    pub fn set(&self, now: NaiveDateTime) {
        if let Clock::Manual(cell) = self {
            *cell.lock() = now;
        }
    }

    pub fn context(&self) -> OpContext {
        match self {
            Clock::Business(tz) => OpContext::now(*tz),
            Clock::Manual(cell) => OpContext::at(*cell.lock()),
        }
    }
}

/// 单写者控制器
///
/// Clone 成本很低（共享同一份状态与广播通道）。
#[derive(Debug, Clone)]
pub struct Resort {
    state: Arc<RwLock<ResortState>>,
    events: broadcast::Sender<ChangeEvent>,
    clock: Clock,
}

impl Resort {
    pub fn new(state: ResortState, clock: Clock) -> Self {
        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(state)),
            events,
            clock,
        }
    }

    /// 本次操作的时间上下文
    pub fn context(&self) -> OpContext {
        self.clock.context()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// 当前状态的完整副本
    pub fn snapshot(&self) -> ResortState {
        self.state.read().clone()
    }

    /// 只读访问
    pub fn read<R>(&self, f: impl FnOnce(&ResortState) -> R) -> R {
        f(&self.state.read())
    }

    /// 在副本上执行写操作；成功才替换并广播，失败时状态不变
    pub fn try_mutate<R, E>(
        &self,
        event: ChangeEvent,
        f: impl FnOnce(&mut ResortState, &OpContext) -> Result<R, E>,
    ) -> Result<R, E> {
        let ctx = self.context();
        let result = {
            let mut guard = self.state.write();
            let mut next = guard.clone();
            let result = f(&mut next, &ctx)?;
            *guard = next;
            result
        };
        self.publish(event);
        Ok(result)
    }

    /// 不会失败的写操作
    pub fn mutate<R>(&self, event: ChangeEvent, f: impl FnOnce(&mut ResortState, &OpContext) -> R) -> R {
        let result: Result<R, std::convert::Infallible> =
            self.try_mutate(event, |state, ctx| Ok(f(state, ctx)));
        match result {
            Ok(r) => r,
            Err(never) => match never {},
        }
    }

    /// 直接在锁内修改；`f` 返回 true 才广播（自动退房扫描用）
    pub(crate) fn mutate_in_place(
        &self,
        event: ChangeEvent,
        f: impl FnOnce(&mut ResortState, &OpContext) -> bool,
    ) -> bool {
        let ctx = self.context();
        let changed = f(&mut self.state.write(), &ctx);
        if changed {
            self.publish(event);
        }
        changed
    }

    /// 整份替换（还原备份、载入快照）
    pub fn replace(&self, state: ResortState) {
        *self.state.write() = state;
        self.publish(ChangeEvent::Restored);
    }

    fn publish(&self, event: ChangeEvent) {
        // no subscriber is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn resort() -> Resort {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Resort::new(ResortState::default(), Clock::manual(now))
    }

    #[test]
    fn test_defaults() {
        let state = ResortState::default();
        assert_eq!(state.rooms.len(), 27);
        assert_eq!(state.total_blanket_stock, 35);
        assert_eq!(state.inventory.len(), 5);
        assert!(state.booking_records.is_empty());
    }

    #[test]
    fn test_failed_mutation_leaves_state_untouched() {
        let resort = resort();
        let mut rx = resort.subscribe();
        let before = resort.snapshot();

        let result: Result<(), &str> = resort.try_mutate(ChangeEvent::Rooms, |state, _| {
            state.rooms.clear();
            Err("boom")
        });

        assert!(result.is_err());
        assert_eq!(resort.snapshot(), before);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_successful_mutation_publishes() {
        let resort = resort();
        let mut rx = resort.subscribe();
        resort.mutate(ChangeEvent::Equipment, |state, _| state.total_blanket_stock = 40);
        assert_eq!(resort.read(|s| s.total_blanket_stock), 40);
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent::Equipment);
    }

    #[test]
    fn test_manual_clock() {
        let resort = resort();
        assert_eq!(resort.context().hour(), 9);
        let later = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(11, 30, 0)
            .unwrap();
        resort.clock().set(later);
        assert_eq!(resort.context().hour(), 11);
    }
}
