//! Non-occupied → non-occupied: housekeeping moves (strip, clean,
//! maintenance). Occupancy is cleared again in case stale data lingers.

use shared::models::{BookingRecord, Room};

use super::TransitionApplier;
use crate::rooms::transition::RoomIntent;
use crate::utils::time::OpContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HousekeepingApplier;

impl TransitionApplier for HousekeepingApplier {
    fn apply(&self, room: &mut Room, _intent: &RoomIntent, _ctx: &OpContext) -> Option<BookingRecord> {
        room.clear_occupancy();
        None
    }
}
