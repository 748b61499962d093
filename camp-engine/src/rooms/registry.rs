//! Room registry
//!
//! The default 27-room roster and lookups over a room slice.

use shared::models::{Room, RoomType};

/// Default roster: 11 double tents, 5 palace tents, 3 VIP tents,
/// 4 water houses, 4 cypress rooms. All vacant with full blanket entitlement.
pub fn default_roster() -> Vec<Room> {
    let mut rooms = Vec::with_capacity(27);

    for n in 1..=11 {
        rooms.push(Room::new(format!("d-{n}"), n.to_string(), RoomType::DoubleTent));
    }
    for n in 12..=16 {
        rooms.push(Room::new(format!("p-{n}"), n.to_string(), RoomType::PalaceTent));
    }
    for n in 1..=3 {
        rooms.push(Room::new(format!("v-{n}"), format!("尊{n}"), RoomType::VipTent));
    }
    for n in 1..=4 {
        rooms.push(Room::new(format!("w-{n}"), format!("水{n}"), RoomType::WaterHouse));
    }
    for n in 201..=204 {
        rooms.push(Room::new(format!("c-{n}"), n.to_string(), RoomType::CypressRoom));
    }

    rooms
}

/// Exact match on the (already normalized) code
pub fn find_by_code<'a>(rooms: &'a [Room], code: &str) -> Option<&'a Room> {
    rooms.iter().find(|r| r.code == code)
}

pub fn find_by_id<'a>(rooms: &'a [Room], id: &str) -> Option<&'a Room> {
    rooms.iter().find(|r| r.id == id)
}

pub fn find_by_id_mut<'a>(rooms: &'a mut [Room], id: &str) -> Option<&'a mut Room> {
    rooms.iter_mut().find(|r| r.id == id)
}
