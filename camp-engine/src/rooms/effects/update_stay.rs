//! Occupied → Occupied: edit the current stay in place. No history record.

use shared::models::{BookingRecord, Room};

use super::TransitionApplier;
use crate::rooms::transition::{RoomIntent, clamp_extra_guests};
use crate::utils::time::OpContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStayApplier;

impl TransitionApplier for UpdateStayApplier {
    fn apply(&self, room: &mut Room, intent: &RoomIntent, _ctx: &OpContext) -> Option<BookingRecord> {
        let fields = intent.guest()?;

        if let Some(name) = fields.guest_name.as_ref().filter(|n| !n.trim().is_empty()) {
            room.current_guest_name = Some(name.clone());
        }
        if let Some(id) = fields.guest_id {
            room.current_guest_id = Some(id);
        }
        if let Some(date) = fields.check_out_date {
            room.check_out_date = Some(date);
        }
        if let Some(extra) = fields.extra_guests {
            room.extra_guests = clamp_extra_guests(extra);
        }
        if let Some(adults) = fields.actual_adults {
            room.actual_adults = Some(adults);
        }
        if let Some(children) = fields.actual_children {
            room.actual_children = Some(children);
        }
        None
    }
}
