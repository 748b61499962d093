//! Room swap
//!
//! Moves the current stay from one room to another. The source room goes
//! to AWAITING_STRIP with a system note; no history record is written
//! because the stay itself continues.

use shared::models::{Room, RoomStatus};

use super::error::RoomError;
use super::registry;

/// Caller-layer preconditions. `force` confirms a target that still
/// needs housekeeping (awaiting strip, dirty, maintenance).
pub fn check_swap(from: &Room, to: &Room, force: bool) -> Result<(), RoomError> {
    if from.id == to.id {
        return Err(RoomError::SameRoom(from.code.clone()));
    }
    if !from.is_occupied() {
        return Err(RoomError::NotOccupied(from.code.clone()));
    }
    if to.is_occupied() {
        return Err(RoomError::Occupied(to.code.clone()));
    }
    if to.status != RoomStatus::Vacant && !force {
        return Err(RoomError::NeedsConfirmation {
            code: to.code.clone(),
            status: to.status.label().to_string(),
        });
    }
    Ok(())
}

/// Transfer the stay `from_id` → `to_id`. Only checks that both rooms exist.
pub fn swap_rooms(rooms: &mut [Room], from_id: &str, to_id: &str) -> Result<(), RoomError> {
    let from = registry::find_by_id(rooms, from_id)
        .ok_or_else(|| RoomError::NotFound(from_id.to_string()))?
        .clone();
    let to_code = registry::find_by_id(rooms, to_id)
        .ok_or_else(|| RoomError::NotFound(to_id.to_string()))?
        .code
        .clone();
    if from_id == to_id {
        return Err(RoomError::SameRoom(from.code));
    }

    if let Some(target) = registry::find_by_id_mut(rooms, to_id) {
        target.status = RoomStatus::Occupied;
        target.current_guest_name = from.current_guest_name.clone();
        target.current_guest_id = from.current_guest_id;
        target.check_in_date = from.check_in_date;
        target.check_out_date = from.check_out_date;
        target.extra_guests = from.extra_guests;
        target.actual_adults = from.actual_adults;
        target.actual_children = from.actual_children;
    }

    if let Some(source) = registry::find_by_id_mut(rooms, from_id) {
        let guest = source.current_guest_name.clone().unwrap_or_default();
        source.status = RoomStatus::AwaitingStrip;
        source.clear_occupancy();
        source.append_note(&format!("[系統] 房客 {guest} 換房至 {to_code}"));
    }

    tracing::info!(from = %from.code, to = %to_code, "Room swapped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::registry::default_roster;
    use crate::rooms::transition::{GuestFields, RoomIntent, apply_intent};
    use crate::utils::time::OpContext;
    use chrono::NaiveDate;

    fn setup() -> Vec<Room> {
        let ctx = OpContext::on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let mut rooms = default_roster();
        let room = registry::find_by_id_mut(&mut rooms, "d-1").unwrap();
        let fields = GuestFields {
            guest_name: Some("張美玲".into()),
            guest_id: Some(42),
            extra_guests: Some(1),
            actual_adults: Some(2),
            actual_children: Some(1),
            ..Default::default()
        };
        apply_intent(room, &RoomIntent::CheckIn(fields), &ctx);
        rooms
    }

    #[test]
    fn test_swap_is_a_true_transfer() {
        let mut rooms = setup();
        let before = registry::find_by_id(&rooms, "d-1").unwrap().clone();

        swap_rooms(&mut rooms, "d-1", "p-12").unwrap();

        let to = registry::find_by_id(&rooms, "p-12").unwrap();
        assert_eq!(to.status, RoomStatus::Occupied);
        assert_eq!(to.current_guest_name, before.current_guest_name);
        assert_eq!(to.current_guest_id, Some(42));
        assert_eq!(to.check_in_date, before.check_in_date);
        assert_eq!(to.check_out_date, before.check_out_date);
        assert_eq!(to.extra_guests, 1);
        assert_eq!(to.actual_adults, Some(2));
        assert_eq!(to.actual_children, Some(1));

        let from = registry::find_by_id(&rooms, "d-1").unwrap();
        assert_eq!(from.status, RoomStatus::AwaitingStrip);
        assert!(from.current_guest_name.is_none());
        assert!(from.check_in_date.is_none());
        assert_eq!(from.extra_guests, 0);
        assert_eq!(from.notes, "[系統] 房客 張美玲 換房至 12");
    }

    #[test]
    fn test_swap_appends_note_on_new_line() {
        let mut rooms = setup();
        registry::find_by_id_mut(&mut rooms, "d-1").unwrap().notes = "窗簾破損".into();
        swap_rooms(&mut rooms, "d-1", "d-2").unwrap();
        let from = registry::find_by_id(&rooms, "d-1").unwrap();
        assert_eq!(from.notes, "窗簾破損\n[系統] 房客 張美玲 換房至 2");
    }

    #[test]
    fn test_swap_unknown_room() {
        let mut rooms = setup();
        let before = rooms.clone();
        assert_eq!(
            swap_rooms(&mut rooms, "d-1", "x-1"),
            Err(RoomError::NotFound("x-1".into()))
        );
        assert_eq!(rooms, before);
    }

    #[test]
    fn test_preconditions() {
        let mut rooms = setup();
        let occupied = registry::find_by_id(&rooms, "d-1").unwrap().clone();
        let vacant = registry::find_by_id(&rooms, "d-2").unwrap().clone();

        assert!(check_swap(&occupied, &vacant, false).is_ok());
        assert_eq!(
            check_swap(&vacant, &occupied, false),
            Err(RoomError::NotOccupied("2".into()))
        );
        assert_eq!(
            check_swap(&occupied, &occupied, false),
            Err(RoomError::SameRoom("1".into()))
        );

        let ctx = OpContext::on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let dirty = registry::find_by_id_mut(&mut rooms, "d-3").unwrap();
        apply_intent(dirty, &RoomIntent::Dirty, &ctx);
        let dirty = dirty.clone();
        assert!(matches!(
            check_swap(&occupied, &dirty, false),
            Err(RoomError::NeedsConfirmation { .. })
        ));
        assert!(check_swap(&occupied, &dirty, true).is_ok());
    }
}
