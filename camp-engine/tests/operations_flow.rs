//! End-to-end operations against one resort: front desk, housekeeping,
//! equipment, kitchen and sheet import sharing the same state.

use camp_engine::equipment::ledger::summarize;
use camp_engine::import::ImportOutcome;
use camp_engine::kitchen::StockStatus;
use camp_engine::rooms::{CommandMode, GuestFields, RoomIntent};
use camp_engine::voice::VoiceAction;
use camp_engine::{ChangeEvent, Clock, Resort, ResortState};
use chrono::{NaiveDate, NaiveDateTime};
use shared::models::{RoomStatus, SheetRow};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn resort() -> Resort {
    Resort::new(ResortState::default(), Clock::manual(at(1, 15)))
}

fn room_status(resort: &Resort, code: &str) -> RoomStatus {
    resort.read(|s| s.room_by_code(code).map(|r| r.status)).unwrap()
}

#[test]
fn test_walk_in_check_in_defaults() {
    let resort = resort();
    let outcome = resort.run_quick_command("5", CommandMode::CheckIn).unwrap();
    assert_eq!(outcome.successes, vec!["5 (加人:0)"]);

    let room = resort.read(|s| s.room_by_code("5").cloned()).unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);
    assert_eq!(room.current_guest_name.as_deref(), Some("貴賓"));
    assert_eq!(room.extra_guests, 0);
    assert_eq!(room.check_out_date, NaiveDate::from_ymd_opt(2025, 3, 2));

    let records = resort.read(|s| s.booking_records.clone());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].room_code, "5");
}

#[test]
fn test_relative_adjustment_keeps_guest_and_history() {
    let resort = resort();
    resort
        .apply_transition("v-1", RoomIntent::CheckIn(GuestFields::named("林先生").with_extra(1)))
        .unwrap();

    resort.run_quick_command("尊一-1", CommandMode::CheckIn).unwrap();
    let room = resort.read(|s| s.room("v-1").cloned()).unwrap();
    assert_eq!(room.extra_guests, 0);
    assert_eq!(room.current_guest_name.as_deref(), Some("林先生"));
    assert_eq!(resort.read(|s| s.booking_records.len()), 1);
}

#[test]
fn test_stay_lifecycle_with_sweep_and_voice() {
    let resort = resort();
    resort.run_quick_command("12 水二+1", CommandMode::CheckIn).unwrap();

    // next day before the cutoff nothing moves
    resort.clock().set(at(2, 10));
    assert!(resort.sweep_now(11).is_empty());

    resort.clock().set(at(2, 11));
    assert_eq!(resort.sweep_now(11), vec!["12", "水2"]);
    assert_eq!(room_status(&resort, "12"), RoomStatus::AwaitingStrip);
    assert!(resort.sweep_now(11).is_empty());

    assert_eq!(resort.strip_rooms(&["p-12".to_string()]), vec!["12"]);
    assert_eq!(room_status(&resort, "12"), RoomStatus::Dirty);
    assert_eq!(resort.voice_room_action("12", VoiceAction::Clean), "12 已設為空房");
    assert_eq!(resort.voice_room_action("水二", VoiceAction::CheckIn), "水2 目前無法入住");
    assert_eq!(resort.voice_room_action("水二", VoiceAction::Clean), "水2 已設為空房");
    assert_eq!(room_status(&resort, "水2"), RoomStatus::Vacant);
    assert_eq!(resort.voice_room_action("12", VoiceAction::Clean), "12 目前不是待清潔狀態");
    assert_eq!(resort.voice_room_action("12", VoiceAction::CheckIn), "12 已入住");
    assert_eq!(room_status(&resort, "12"), RoomStatus::Occupied);
}

#[test]
fn test_swap_moves_stay_and_blankets_stay_balanced() {
    let resort = resort();
    resort
        .apply_transition("d-1", RoomIntent::CheckIn(GuestFields::named("王小明")))
        .unwrap();
    resort.swap_rooms("d-1", "d-2", false).unwrap();

    let (from, to) = resort.read(|s| (s.room("d-1").cloned().unwrap(), s.room("d-2").cloned().unwrap()));
    assert_eq!(to.current_guest_name.as_deref(), Some("王小明"));
    assert_eq!(from.status, RoomStatus::AwaitingStrip);
    assert!(from.current_guest_name.is_none());

    resort.break_blanket("p-12").unwrap();
    resort.run_equipment_command("5>6").unwrap();
    resort.set_blanket_stock(38);
    resort.add_blanket("d-5").unwrap();

    let summary = resort.read(|s| summarize(&s.rooms, s.total_blanket_stock));
    assert_eq!(
        i128::from(summary.in_warehouse)
            + i128::from(summary.in_rooms)
            + i128::from(summary.broken),
        i128::from(summary.total_stock)
    );
}

#[test]
fn test_critical_item_adjustments() {
    let resort = resort();
    let lobster = resort.read(|s| s.inventory.iter().find(|i| i.id == 2).cloned()).unwrap();
    assert_eq!(lobster.quantity, 8.0);
    assert_eq!(StockStatus::of(&lobster), StockStatus::Critical);

    let log = resort.adjust_inventory(2, -20.0, "報廢/腐壞", None).unwrap().unwrap();
    assert_eq!(log.amount, -8.0);
    assert_eq!(log.balance_after, 0.0);

    // already at zero: no log, no change
    assert!(resort.adjust_inventory(2, -1.0, "報廢/腐壞", None).unwrap().is_none());
    let lobster = resort.read(|s| s.inventory.iter().find(|i| i.id == 2).cloned()).unwrap();
    assert_eq!(lobster.quantity, 0.0);
    assert_eq!(lobster.logs.len(), 1);
}

#[test]
fn test_future_sheet_leaves_rooms_alone() {
    let resort = resort();
    resort.run_quick_command("1 2", CommandMode::CheckIn).unwrap();
    let rooms_before = resort.read(|s| s.rooms.clone());
    let records_before = resort.read(|s| s.booking_records.len());
    let mut rx = resort.subscribe();

    let rows = ["3", "尊二", "203"]
        .into_iter()
        .map(|code| SheetRow {
            room_code: code.into(),
            guest_name: format!("{code} 旅客"),
            adults: 2,
            ..Default::default()
        })
        .collect();
    let parsed = resort.match_sheet_rows(rows);
    assert!(parsed.iter().all(|b| b.is_resolved()));

    let tomorrow = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    let ImportOutcome::Scheduled(records) = resort.confirm_import(&parsed, tomorrow, 1).unwrap() else {
        panic!("future sheet must not check anyone in");
    };

    assert_eq!(records.len(), 3);
    assert_eq!(resort.read(|s| s.rooms.clone()), rooms_before);
    assert_eq!(resort.read(|s| s.booking_records.len()), records_before + 3);
    assert!(records.iter().all(|r| r.check_in_date == tomorrow));
    assert_eq!(rx.try_recv().unwrap(), ChangeEvent::History);
}
