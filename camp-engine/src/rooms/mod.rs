//! Room lifecycle
//!
//! Pure functions over `&mut [Room]` live in the submodules; the
//! `impl Resort` block below is the locked, event-publishing surface.

pub mod command;
pub mod effects;
pub mod error;
pub mod normalizer;
pub mod registry;
pub mod swap;
pub mod sweep;
pub mod transition;

pub use command::{CommandError, CommandMode, CommandOutcome, parse_quick_command};
pub use error::RoomError;
pub use normalizer::normalize_room_code;
pub use swap::{check_swap, swap_rooms};
pub use sweep::{AUTO_CHECKOUT_NOTE, AutoCheckoutSweeper, sweep_overdue};
pub use transition::{BatchOutcome, GuestFields, RoomIntent, apply_batch, apply_intent};

use shared::models::{BookingRecord, RoomStatus};

use crate::core::{ChangeEvent, Resort};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::AppResult;

impl Resort {
    /// Apply one intent to one room; the booking record, if any, is
    /// appended to history in the same update.
    pub fn apply_transition(&self, room_id: &str, intent: RoomIntent) -> Result<Option<BookingRecord>, RoomError> {
        self.try_mutate(ChangeEvent::Rooms, |state, ctx| {
            let room = registry::find_by_id_mut(&mut state.rooms, room_id)
                .ok_or_else(|| RoomError::NotFound(room_id.to_string()))?;
            let record = apply_intent(room, &intent, ctx);
            if let Some(record) = &record {
                state.booking_records.push(record.clone());
            }
            Ok(record)
        })
    }

    /// Apply several intents as one state update with one history append
    pub fn apply_batch(&self, updates: &[(String, RoomIntent)]) -> BatchOutcome {
        let outcome = self.mutate(ChangeEvent::Rooms, |state, ctx| {
            let outcome = apply_batch(&mut state.rooms, updates, ctx);
            state.booking_records.extend(outcome.records.iter().cloned());
            outcome
        });
        tracing::info!(
            applied = outcome.applied.len(),
            records = outcome.records.len(),
            missing = outcome.missing.len(),
            "Batch update applied"
        );
        outcome
    }

    /// Parse and apply a quick command against the live rooms
    pub fn run_quick_command(&self, input: &str, mode: CommandMode) -> Result<CommandOutcome, CommandError> {
        self.try_mutate(ChangeEvent::Rooms, |state, ctx| {
            let outcome = parse_quick_command(&state.rooms, input, mode)?;
            let batch = apply_batch(&mut state.rooms, &outcome.updates, ctx);
            state.booking_records.extend(batch.records);
            Ok(outcome)
        })
    }

    /// Move a stay to another room. `force` confirms a target that is
    /// not vacant yet.
    pub fn swap_rooms(&self, from_id: &str, to_id: &str, force: bool) -> Result<(), RoomError> {
        self.try_mutate(ChangeEvent::Rooms, |state, _| {
            let from = registry::find_by_id(&state.rooms, from_id)
                .ok_or_else(|| RoomError::NotFound(from_id.to_string()))?;
            let to = registry::find_by_id(&state.rooms, to_id)
                .ok_or_else(|| RoomError::NotFound(to_id.to_string()))?;
            check_swap(from, to, force)?;
            swap_rooms(&mut state.rooms, from_id, to_id)
        })
    }

    /// Dirty → Vacant for every dirty room. Returns the cleaned codes.
    pub fn clean_all_dirty(&self) -> Vec<String> {
        self.bulk_transition(|status| status == RoomStatus::Dirty, RoomIntent::Vacant, None)
    }

    /// Mark the selected rooms vacant, whatever their status
    pub fn clean_rooms(&self, room_ids: &[String]) -> Vec<String> {
        self.bulk_transition(|_| true, RoomIntent::Vacant, Some(room_ids))
    }

    /// Awaiting strip → Dirty for the selected rooms. Other statuses are skipped.
    pub fn strip_rooms(&self, room_ids: &[String]) -> Vec<String> {
        self.bulk_transition(|status| status == RoomStatus::AwaitingStrip, RoomIntent::Dirty, Some(room_ids))
    }

    /// Awaiting strip → Dirty for every stripped-bed room
    pub fn strip_all_awaiting(&self) -> Vec<String> {
        self.bulk_transition(|status| status == RoomStatus::AwaitingStrip, RoomIntent::Dirty, None)
    }

    /// Check out every occupied room (→ awaiting strip)
    pub fn checkout_all(&self) -> Vec<String> {
        self.bulk_transition(|status| status.is_occupied(), RoomIntent::AwaitStrip, None)
    }

    /// Replace a room's housekeeping notes
    pub fn update_room_notes(&self, room_id: &str, notes: &str) -> AppResult<()> {
        validate_optional_text(&Some(notes.to_string()), "notes", MAX_NOTE_LEN)?;
        self.try_mutate(ChangeEvent::Rooms, |state, _| {
            let room = registry::find_by_id_mut(&mut state.rooms, room_id)
                .ok_or_else(|| RoomError::NotFound(room_id.to_string()))?;
            room.notes = notes.trim().to_string();
            Ok(())
        })
    }

    fn bulk_transition(
        &self,
        filter: impl Fn(RoomStatus) -> bool,
        intent: RoomIntent,
        only: Option<&[String]>,
    ) -> Vec<String> {
        let codes = self.mutate(ChangeEvent::Rooms, |state, ctx| {
            let mut codes = Vec::new();
            for room in state.rooms.iter_mut() {
                let selected = only.is_none_or(|ids| ids.contains(&room.id));
                if selected && filter(room.status) {
                    apply_intent(room, &intent, ctx);
                    codes.push(room.code.clone());
                }
            }
            codes
        });
        tracing::info!(count = codes.len(), target = ?intent.target_status(), "Bulk room update");
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, ResortState};
    use chrono::NaiveDate;

    fn resort() -> Resort {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Resort::new(ResortState::default(), Clock::manual(now))
    }

    fn status(resort: &Resort, id: &str) -> RoomStatus {
        resort.read(|s| s.room(id).map(|r| r.status)).unwrap()
    }

    #[test]
    fn test_apply_transition_appends_history() {
        let resort = resort();
        let record = resort
            .apply_transition("d-5", RoomIntent::CheckIn(GuestFields::default()))
            .unwrap()
            .unwrap();
        assert_eq!(record.room_code, "5");
        assert_eq!(resort.read(|s| s.booking_records.len()), 1);
        assert_eq!(status(&resort, "d-5"), RoomStatus::Occupied);
    }

    #[test]
    fn test_unknown_room_leaves_state_unchanged() {
        let resort = resort();
        let before = resort.snapshot();
        let err = resort.apply_transition("x-1", RoomIntent::Dirty).unwrap_err();
        assert_eq!(err, RoomError::NotFound("x-1".into()));
        assert_eq!(resort.snapshot(), before);
    }

    #[test]
    fn test_quick_command_round() {
        let resort = resort();
        let outcome = resort.run_quick_command("5 12+1", CommandMode::CheckIn).unwrap();
        assert_eq!(outcome.successes.len(), 2);
        assert_eq!(resort.read(|s| s.booking_records.len()), 2);

        resort.run_quick_command("5", CommandMode::CheckOut).unwrap();
        assert_eq!(status(&resort, "d-5"), RoomStatus::AwaitingStrip);

        // nothing applicable: state unchanged
        let before = resort.snapshot();
        assert!(resort.run_quick_command("5", CommandMode::CheckOut).is_err());
        assert_eq!(resort.snapshot(), before);
    }

    #[test]
    fn test_swap_requires_confirmation_for_dirty_target() {
        let resort = resort();
        resort.apply_transition("d-1", RoomIntent::CheckIn(GuestFields::named("甲"))).unwrap();
        resort.apply_transition("d-2", RoomIntent::Dirty).unwrap();

        let err = resort.swap_rooms("d-1", "d-2", false).unwrap_err();
        assert!(matches!(err, RoomError::NeedsConfirmation { .. }));
        assert_eq!(status(&resort, "d-1"), RoomStatus::Occupied);

        resort.swap_rooms("d-1", "d-2", true).unwrap();
        assert_eq!(status(&resort, "d-2"), RoomStatus::Occupied);
        assert_eq!(status(&resort, "d-1"), RoomStatus::AwaitingStrip);
        // a swap writes no history
        assert_eq!(resort.read(|s| s.booking_records.len()), 1);
    }

    #[test]
    fn test_swap_rejects_vacant_source_and_occupied_target() {
        let resort = resort();
        assert_eq!(
            resort.swap_rooms("d-1", "d-2", true),
            Err(RoomError::NotOccupied("1".into()))
        );
        resort.apply_transition("d-1", RoomIntent::CheckIn(GuestFields::default())).unwrap();
        resort.apply_transition("d-2", RoomIntent::CheckIn(GuestFields::default())).unwrap();
        assert_eq!(
            resort.swap_rooms("d-1", "d-2", true),
            Err(RoomError::Occupied("2".into()))
        );
    }

    #[test]
    fn test_bulk_helpers() {
        let resort = resort();
        resort.apply_transition("d-1", RoomIntent::Dirty).unwrap();
        resort.apply_transition("d-2", RoomIntent::Dirty).unwrap();
        resort.apply_transition("d-3", RoomIntent::CheckIn(GuestFields::default())).unwrap();
        resort.apply_transition("d-4", RoomIntent::Maintenance).unwrap();

        assert_eq!(resort.clean_all_dirty(), vec!["1", "2"]);
        assert_eq!(resort.checkout_all(), vec!["3"]);
        assert_eq!(status(&resort, "d-3"), RoomStatus::AwaitingStrip);
        assert_eq!(resort.clean_rooms(&["d-4".to_string()]), vec!["4"]);
        assert_eq!(status(&resort, "d-4"), RoomStatus::Vacant);
    }

    #[test]
    fn test_strip_then_clean() {
        let resort = resort();
        for id in ["d-1", "d-2", "d-3"] {
            resort.apply_transition(id, RoomIntent::CheckIn(GuestFields::default())).unwrap();
        }
        assert_eq!(resort.checkout_all(), vec!["1", "2", "3"]);
        assert!(resort.clean_all_dirty().is_empty());

        // vacant rooms in the selection are left alone
        assert_eq!(resort.strip_rooms(&["d-1".to_string(), "d-5".to_string()]), vec!["1"]);
        assert_eq!(status(&resort, "d-1"), RoomStatus::Dirty);
        assert_eq!(status(&resort, "d-5"), RoomStatus::Vacant);

        assert_eq!(resort.strip_all_awaiting(), vec!["2", "3"]);
        assert!(resort.strip_all_awaiting().is_empty());
        assert_eq!(resort.clean_all_dirty(), vec!["1", "2", "3"]);
        assert_eq!(status(&resort, "d-3"), RoomStatus::Vacant);
    }

    #[test]
    fn test_update_room_notes() {
        let resort = resort();
        resort.update_room_notes("w-1", " 浴室漏水 ").unwrap();
        assert_eq!(resort.read(|s| s.room("w-1").unwrap().notes.clone()), "浴室漏水");
        assert!(resort.update_room_notes("w-1", &"x".repeat(MAX_NOTE_LEN + 1)).is_err());
        assert!(resort.update_room_notes("nope", "").is_err());
    }
}
