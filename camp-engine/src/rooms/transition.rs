//! Status transition engine
//!
//! Every room mutation goes through [`apply_intent`]: the `(from, to)`
//! pair picks a [`TransitionEffect`], the effect rewrites occupancy, and
//! the status is set last. The engine is permissive; callers decide
//! whether a transition makes sense.

use serde::{Deserialize, Serialize};
use shared::models::{BookingRecord, Room, RoomStatus};

use super::effects::{TransitionApplier, TransitionEffect};
use super::registry;
use crate::utils::time::OpContext;

/// Default guest name when none is given
pub const DEFAULT_GUEST_NAME: &str = "貴賓";

/// Maximum extra guests on top of base capacity
pub const MAX_EXTRA_GUESTS: i32 = 2;

/// Guest fields carried by a check-in intent. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestFields {
    pub guest_name: Option<String>,
    pub guest_id: Option<i64>,
    pub check_out_date: Option<chrono::NaiveDate>,
    /// Unclamped; the engine clamps to 0..=2
    pub extra_guests: Option<i32>,
    pub actual_adults: Option<u32>,
    pub actual_children: Option<u32>,
    /// Booking notes, copied into the history record only
    pub notes: Option<String>,
}

impl GuestFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            guest_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_extra(mut self, extra: i32) -> Self {
        self.extra_guests = Some(extra);
        self
    }
}

/// What the caller wants a room to become
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "guest", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomIntent {
    CheckIn(GuestFields),
    AwaitStrip,
    Dirty,
    Vacant,
    Maintenance,
}

impl RoomIntent {
    pub fn target_status(&self) -> RoomStatus {
        match self {
            RoomIntent::CheckIn(_) => RoomStatus::Occupied,
            RoomIntent::AwaitStrip => RoomStatus::AwaitingStrip,
            RoomIntent::Dirty => RoomStatus::Dirty,
            RoomIntent::Vacant => RoomStatus::Vacant,
            RoomIntent::Maintenance => RoomStatus::Maintenance,
        }
    }

    pub fn guest(&self) -> Option<&GuestFields> {
        match self {
            RoomIntent::CheckIn(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Clamp a requested extra-guest count into 0..=2
pub fn clamp_extra_guests(extra: i32) -> u8 {
    extra.clamp(0, MAX_EXTRA_GUESTS) as u8
}

/// Apply one intent to one room. Returns the history record, if any.
pub fn apply_intent(room: &mut Room, intent: &RoomIntent, ctx: &OpContext) -> Option<BookingRecord> {
    let from = room.status;
    let to = intent.target_status();
    let effect = TransitionEffect::resolve(from, to);
    let record = effect.apply(room, intent, ctx);
    room.status = to;

    tracing::info!(
        room_code = %room.code,
        from = ?from,
        to = ?to,
        effect = effect.name(),
        "Room transition"
    );
    record
}

/// Result of a batch update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Room ids that were updated, in request order
    pub applied: Vec<String>,
    /// History records produced by the batch
    pub records: Vec<BookingRecord>,
    /// Unknown room ids (skipped)
    pub missing: Vec<String>,
}

/// Apply several intents in one pass over the room list
pub fn apply_batch(rooms: &mut [Room], updates: &[(String, RoomIntent)], ctx: &OpContext) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (room_id, intent) in updates {
        let Some(room) = registry::find_by_id_mut(rooms, room_id) else {
            tracing::warn!(room_id = %room_id, "Batch update skipped unknown room");
            outcome.missing.push(room_id.clone());
            continue;
        };
        if let Some(record) = apply_intent(room, intent, ctx) {
            outcome.records.push(record);
        }
        outcome.applied.push(room_id.clone());
    }

    outcome
}
