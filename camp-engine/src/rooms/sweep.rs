//! 自动退房扫描
//!
//! 过了退房时间（默认 11:00），所有 `check_out_date <= today` 的入住中房间
//! 转为待撤床并追加系统备注。启动时立即扫描一次，之后按固定间隔扫描。
//!
//! 扫描直接锁住当前状态，不使用旧快照；只有真的有房间被退房时才广播变更。

use std::time::Duration;

use shared::models::Room;
use tokio_util::sync::CancellationToken;

use super::transition::{RoomIntent, apply_intent};
use crate::core::{ChangeEvent, Config, Resort};
use crate::utils::time::OpContext;

/// 自动退房追加的备注
pub const AUTO_CHECKOUT_NOTE: &str = "系統自動退房";

/// 对一组房间执行一次扫描，返回被退房的房号
///
/// 幂等：第二次扫描不会再找到入住中的逾期房间。
pub fn sweep_overdue(rooms: &mut [Room], ctx: &OpContext, checkout_hour: u32) -> Vec<String> {
    if ctx.hour() < checkout_hour {
        return Vec::new();
    }

    let today = ctx.today();
    let mut swept = Vec::new();
    for room in rooms.iter_mut() {
        let overdue = room.is_occupied() && room.check_out_date.is_some_and(|d| d <= today);
        if !overdue {
            continue;
        }
        apply_intent(room, &RoomIntent::AwaitStrip, ctx);
        room.append_note(AUTO_CHECKOUT_NOTE);
        swept.push(room.code.clone());
    }
    swept
}

/// 自动退房调度器
///
/// 注册为 `TaskKind::Periodic`。
pub struct AutoCheckoutSweeper {
    resort: Resort,
    interval: Duration,
    checkout_hour: u32,
    shutdown: CancellationToken,
}

impl AutoCheckoutSweeper {
    pub fn new(resort: Resort, config: &Config, shutdown: CancellationToken) -> Self {
        Self {
            resort,
            interval: Duration::from_secs(config.sweep_interval_secs),
            checkout_hour: config.checkout_hour,
            shutdown,
        }
    }

    /// 主循环：首个 tick 立即触发
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            checkout_hour = self.checkout_hour,
            "Auto checkout sweeper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.resort.sweep_now(self.checkout_hour);
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Auto checkout sweeper received shutdown signal");
                    return;
                }
            }
        }
    }
}

impl Resort {
    /// 立即执行一次自动退房扫描
    pub fn sweep_now(&self, checkout_hour: u32) -> Vec<String> {
        let mut swept = Vec::new();
        self.mutate_in_place(ChangeEvent::Rooms, |state, ctx| {
            swept = sweep_overdue(&mut state.rooms, ctx, checkout_hour);
            !swept.is_empty()
        });

        if swept.is_empty() {
            tracing::debug!("No overdue rooms");
        } else {
            tracing::info!(count = swept.len(), rooms = ?swept, "Auto checkout applied");
        }
        swept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, ResortState};
    use crate::rooms::registry::{self, default_roster};
    use crate::rooms::transition::GuestFields;
    use chrono::{NaiveDate, NaiveDateTime};
    use shared::models::RoomStatus;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn check_in(rooms: &mut [Room], id: &str, check_out: Option<NaiveDate>) {
        let ctx = OpContext::on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let room = registry::find_by_id_mut(rooms, id).unwrap();
        apply_intent(room, &RoomIntent::CheckIn(GuestFields::named("旅客")), &ctx);
        room.check_out_date = check_out;
    }

    fn rooms() -> Vec<Room> {
        let mut rooms = default_roster();
        // due today
        check_in(&mut rooms, "d-1", NaiveDate::from_ymd_opt(2025, 3, 2));
        // overdue
        check_in(&mut rooms, "d-2", NaiveDate::from_ymd_opt(2025, 2, 28));
        // staying on
        check_in(&mut rooms, "d-3", NaiveDate::from_ymd_opt(2025, 3, 4));
        // no check-out date
        check_in(&mut rooms, "d-4", None);
        rooms
    }

    #[test]
    fn test_before_checkout_hour_nothing_happens() {
        let mut rooms = rooms();
        let before = rooms.clone();
        assert!(sweep_overdue(&mut rooms, &OpContext::at(at(10)), 11).is_empty());
        assert_eq!(rooms, before);
    }

    #[test]
    fn test_sweep_moves_overdue_rooms_to_awaiting_strip() {
        let mut rooms = rooms();
        let swept = sweep_overdue(&mut rooms, &OpContext::at(at(11)), 11);
        assert_eq!(swept, vec!["1", "2"]);

        let room = registry::find_by_id(&rooms, "d-1").unwrap();
        assert_eq!(room.status, RoomStatus::AwaitingStrip);
        assert!(room.current_guest_name.is_none());
        assert_eq!(room.notes, AUTO_CHECKOUT_NOTE);

        assert!(registry::find_by_id(&rooms, "d-3").unwrap().is_occupied());
        assert!(registry::find_by_id(&rooms, "d-4").unwrap().is_occupied());
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let mut rooms = rooms();
        let ctx = OpContext::at(at(15));
        sweep_overdue(&mut rooms, &ctx, 11);
        let once = rooms.clone();
        assert!(sweep_overdue(&mut rooms, &ctx, 11).is_empty());
        assert_eq!(rooms, once);
    }

    #[test]
    fn test_note_appended_on_new_line() {
        let mut rooms = rooms();
        registry::find_by_id_mut(&mut rooms, "d-2").unwrap().notes = "熱水器檢修".into();
        sweep_overdue(&mut rooms, &OpContext::at(at(12)), 11);
        assert_eq!(
            registry::find_by_id(&rooms, "d-2").unwrap().notes,
            "熱水器檢修\n系統自動退房"
        );
    }

    #[test]
    fn test_resort_sweep_publishes_only_on_change() {
        let mut state = ResortState::default();
        state.rooms = rooms();
        let resort = Resort::new(state, Clock::manual(at(12)));
        let mut rx = resort.subscribe();

        assert_eq!(resort.sweep_now(11).len(), 2);
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent::Rooms);

        assert!(resort.sweep_now(11).is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_sweeper_runs_immediately_and_stops() {
        let mut state = ResortState::default();
        state.rooms = rooms();
        let resort = Resort::new(state, Clock::manual(at(12)));
        let shutdown = CancellationToken::new();
        let sweeper = AutoCheckoutSweeper {
            resort: resort.clone(),
            interval: Duration::from_secs(3600),
            checkout_hour: 11,
            shutdown: shutdown.clone(),
        };

        let handle = tokio::spawn(sweeper.run());
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();
        handle.await.unwrap();

        let status = resort.read(|s| s.room("d-1").map(|r| r.status));
        assert_eq!(status, Some(RoomStatus::AwaitingStrip));
    }
}
