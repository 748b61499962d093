//! Transition effects
//!
//! Each applier implements [`TransitionApplier`] and rewrites the
//! occupancy fields for one kind of transition. Appliers never touch
//! `status` or housekeeping notes.

use enum_dispatch::enum_dispatch;
use shared::models::{BookingRecord, Room, RoomStatus};

use super::transition::RoomIntent;
use crate::utils::time::OpContext;

mod check_in;
mod check_out;
mod housekeeping;
mod update_stay;

pub use check_in::CheckInApplier;
pub use check_out::CheckOutApplier;
pub use housekeeping::HousekeepingApplier;
pub use update_stay::UpdateStayApplier;

#[enum_dispatch]
pub trait TransitionApplier {
    /// Rewrite occupancy; return a history record when a stay begins
    fn apply(&self, room: &mut Room, intent: &RoomIntent, ctx: &OpContext) -> Option<BookingRecord>;
}

/// TransitionEffect enum - dispatches to concrete applier implementations
#[enum_dispatch(TransitionApplier)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    CheckIn(CheckInApplier),
    UpdateStay(UpdateStayApplier),
    CheckOut(CheckOutApplier),
    Housekeeping(HousekeepingApplier),
}

impl TransitionEffect {
    /// The transition table. This is the ONLY place with a match on
    /// `(from, to)`; every one of the 25 pairs is allowed.
    pub fn resolve(from: RoomStatus, to: RoomStatus) -> Self {
        match (from.is_occupied(), to.is_occupied()) {
            (false, true) => TransitionEffect::CheckIn(CheckInApplier),
            (true, true) => TransitionEffect::UpdateStay(UpdateStayApplier),
            (true, false) => TransitionEffect::CheckOut(CheckOutApplier),
            (false, false) => TransitionEffect::Housekeeping(HousekeepingApplier),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransitionEffect::CheckIn(_) => "check_in",
            TransitionEffect::UpdateStay(_) => "update_stay",
            TransitionEffect::CheckOut(_) => "check_out",
            TransitionEffect::Housekeeping(_) => "housekeeping",
        }
    }
}
