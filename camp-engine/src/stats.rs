//! 仪表板统计
//!
//! 全部从当前状态即时推导，不落盘。

use camp_client::Intelligence;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use shared::models::{Member, Room, RoomStatus, RoomType};

use crate::core::Resort;

/// 各状态房间数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub vacant: usize,
    pub occupied: usize,
    pub awaiting_strip: usize,
    pub dirty: usize,
    pub maintenance: usize,
}

impl StatusCounts {
    pub fn tally<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Self {
        let mut counts = Self::default();
        for room in rooms {
            match room.status {
                RoomStatus::Vacant => counts.vacant += 1,
                RoomStatus::Occupied => counts.occupied += 1,
                RoomStatus::AwaitingStrip => counts.awaiting_strip += 1,
                RoomStatus::Dirty => counts.dirty += 1,
                RoomStatus::Maintenance => counts.maintenance += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeStats {
    pub room_type: RoomType,
    pub total: usize,
    pub counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_rooms: usize,
    pub counts: StatusCounts,
    /// 入住中房间的人数合计
    pub visitors: u32,
    /// 入住率（整数百分比）
    pub occupancy_rate: u32,
    pub room_types: Vec<RoomTypeStats>,
    /// 明日退房的房号
    pub checking_out_tomorrow: Vec<String>,
    pub total_members: usize,
    pub total_revenue: f64,
    /// 地区 → 会员数，按人数倒序
    pub regions: Vec<(String, usize)>,
}

/// 当前入住人数
pub fn visitors(rooms: &[Room]) -> u32 {
    rooms.iter().filter(|r| r.is_occupied()).map(Room::headcount).sum()
}

pub fn occupancy_rate(rooms: &[Room]) -> u32 {
    if rooms.is_empty() {
        return 0;
    }
    let occupied = rooms.iter().filter(|r| r.is_occupied()).count();
    ((occupied as f64 / rooms.len() as f64) * 100.0).round() as u32
}

fn regions(members: &[Member]) -> Vec<(String, usize)> {
    let mut regions: Vec<(String, usize)> = Vec::new();
    for member in members {
        let location = if member.location.is_empty() { "未標示" } else { member.location.as_str() };
        match regions.iter_mut().find(|(name, _)| name == location) {
            Some((_, count)) => *count += 1,
            None => regions.push((location.to_string(), 1)),
        }
    }
    // stable: ties keep first-seen order
    regions.sort_by(|a, b| b.1.cmp(&a.1));
    regions
}

pub fn dashboard(rooms: &[Room], members: &[Member], tomorrow: NaiveDate) -> DashboardStats {
    let room_types = RoomType::ALL
        .into_iter()
        .map(|room_type| {
            let typed: Vec<&Room> = rooms.iter().filter(|r| r.room_type == room_type).collect();
            RoomTypeStats {
                room_type,
                total: typed.len(),
                counts: StatusCounts::tally(typed),
            }
        })
        .collect();

    DashboardStats {
        total_rooms: rooms.len(),
        counts: StatusCounts::tally(rooms),
        visitors: visitors(rooms),
        occupancy_rate: occupancy_rate(rooms),
        room_types,
        checking_out_tomorrow: rooms
            .iter()
            .filter(|r| r.is_occupied() && r.check_out_date == Some(tomorrow))
            .map(|r| r.code.clone())
            .collect(),
        total_members: members.len(),
        total_revenue: members.iter().map(|m| m.total_spend).sum(),
        regions: regions(members),
    }
}

/// 语音助理查询用的统计 JSON
///
/// `{ total, occupied, dirty, vacant, inventory: { blankets }, roomTypes: { 類型: {...} } }`
pub fn hotel_stats_json(rooms: &[Room], total_blanket_stock: u32) -> Value {
    let counts = StatusCounts::tally(rooms);
    let mut room_types = Map::new();
    for room_type in RoomType::ALL {
        let typed: Vec<&Room> = rooms.iter().filter(|r| r.room_type == room_type).collect();
        let c = StatusCounts::tally(typed.iter().copied());
        room_types.insert(
            room_type.label().to_string(),
            json!({
                "total": typed.len(),
                "vacant": c.vacant,
                "occupied": c.occupied,
                "dirty": c.dirty,
            }),
        );
    }

    json!({
        "total": rooms.len(),
        "occupied": counts.occupied,
        "dirty": counts.dirty,
        "vacant": counts.vacant,
        "inventory": { "blankets": total_blanket_stock },
        "roomTypes": room_types,
    })
}

impl Resort {
    pub fn dashboard(&self) -> DashboardStats {
        let tomorrow = self.context().tomorrow();
        self.read(|s| dashboard(&s.rooms, &s.members, tomorrow))
    }

    pub fn hotel_stats(&self) -> Value {
        self.read(|s| hotel_stats_json(&s.rooms, s.total_blanket_stock))
    }

    /// AI 每日营运简报
    pub async fn daily_briefing(&self, ai: &dyn Intelligence) -> String {
        let stats = self.dashboard();
        let payload = json!({
            "date": self.context().today().format("%Y-%m-%d").to_string(),
            "visitors": stats.visitors,
            "occupancyRate": stats.occupancy_rate,
            "checkIns": stats.counts.occupied,
            "checkingOutTomorrow": stats.checking_out_tomorrow,
        });
        ai.generate_daily_briefing(Some(&payload)).await
    }
}
