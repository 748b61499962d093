//! A stay begins: fill every occupancy field and snapshot a history record.

use shared::models::{BookingRecord, Room};

use super::TransitionApplier;
use crate::rooms::transition::{DEFAULT_GUEST_NAME, RoomIntent, clamp_extra_guests};
use crate::utils::time::OpContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInApplier;

impl TransitionApplier for CheckInApplier {
    fn apply(&self, room: &mut Room, intent: &RoomIntent, ctx: &OpContext) -> Option<BookingRecord> {
        let fields = intent.guest().cloned().unwrap_or_default();

        let guest_name = fields
            .guest_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GUEST_NAME.to_string());

        room.current_guest_name = Some(guest_name.clone());
        room.current_guest_id = fields.guest_id;
        room.check_in_date = Some(ctx.today());
        room.check_out_date = Some(fields.check_out_date.unwrap_or_else(|| ctx.tomorrow()));
        room.extra_guests = clamp_extra_guests(fields.extra_guests.unwrap_or(0));
        room.actual_adults = Some(fields.actual_adults.unwrap_or(0));
        room.actual_children = Some(fields.actual_children.unwrap_or(0));

        Some(BookingRecord {
            id: shared::util::snowflake_id(),
            room_code: room.code.clone(),
            room_type: room.room_type,
            guest_name,
            check_in_date: ctx.today(),
            check_out_date: room.check_out_date,
            extra_guests: room.extra_guests,
            actual_adults: room.actual_adults,
            actual_children: room.actual_children,
            notes: fields.notes.filter(|n| !n.trim().is_empty()),
            created_at: ctx.timestamp,
        })
    }
}
