//! Occupied → any non-occupied status: the guest leaves.

use shared::models::{BookingRecord, Room};

use super::TransitionApplier;
use crate::rooms::transition::RoomIntent;
use crate::utils::time::OpContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutApplier;

impl TransitionApplier for CheckOutApplier {
    fn apply(&self, room: &mut Room, _intent: &RoomIntent, _ctx: &OpContext) -> Option<BookingRecord> {
        if let Some(guest) = room.current_guest_name.as_deref() {
            tracing::debug!(room_code = %room.code, guest = %guest, "Guest checked out");
        }
        room.clear_occupancy();
        None
    }
}
