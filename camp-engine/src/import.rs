//! 入住表汇入
//!
//! 流程：AI 辨识入住表 → [`match_rows`] 对应房间 → 人工修正 [`remap`] →
//! [`Resort::confirm_import`] 确认。
//!
//! 确认时按表单日期分流：
//! - 今天：立即批量入住（走状态转换引擎）
//! - 其他日期：只追加入住纪录，完全不碰房间状态

use camp_client::Intelligence;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{BookingRecord, Room, RoomType, SheetRow};
use shared::util::snowflake_id;
use std::sync::LazyLock;
use thiserror::Error;

use crate::core::{ChangeEvent, Resort};
use crate::rooms::transition::clamp_extra_guests;
use crate::rooms::{BatchOutcome, GuestFields, RoomIntent, apply_batch, normalize_room_code, registry};
use crate::utils::time::add_nights;

static DAYS_NIGHTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*天\s*(\d+)\s*夜").expect("valid days/nights pattern"));
static NIGHTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*泊").expect("valid nights pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("No importable rows")]
    NoRows,

    #[error("Sheet analysis failed: {0}")]
    AnalysisFailed(String),
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        let code = match &err {
            ImportError::NoRows => ErrorCode::ImportNoRows,
            ImportError::AnalysisFailed(_) => ErrorCode::ImportAnalysisFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Matched,
    NotFound,
    /// 房间目前有人入住
    Conflict,
}

/// 一列辨识结果及其对应的房间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBooking {
    pub row: SheetRow,
    pub target_room_id: Option<String>,
    pub room_type: Option<RoomType>,
    pub base_capacity: u32,
    pub extra_guests: u8,
    pub status: MatchStatus,
}

impl ParsedBooking {
    pub fn is_resolved(&self) -> bool {
        self.target_room_id.is_some() && self.status != MatchStatus::NotFound
    }
}

/// 解析住宿天数提示：`2泊` → 2，`3天2夜` → 2，`續住` → 无
pub fn parse_stay_hint(hint: &str) -> Option<u32> {
    if let Some(caps) = DAYS_NIGHTS.captures(hint) {
        return caps.get(2)?.as_str().parse().ok();
    }
    NIGHTS.captures(hint)?.get(1)?.as_str().parse().ok()
}

fn bind(booking: &mut ParsedBooking, room: &Room) {
    let base = room.room_type.base_capacity();
    let headcount = booking.row.adults.saturating_add(booking.row.children);
    let total = i32::try_from(headcount).unwrap_or(i32::MAX);
    booking.row.room_code = room.code.clone();
    booking.target_room_id = Some(room.id.clone());
    booking.room_type = Some(room.room_type);
    booking.base_capacity = base;
    booking.extra_guests =
        clamp_extra_guests(total.saturating_sub(i32::try_from(base).unwrap_or(i32::MAX)));
    booking.status = if room.is_occupied() {
        MatchStatus::Conflict
    } else {
        MatchStatus::Matched
    };
}

/// 按房号对应房间
pub fn match_rows(rooms: &[Room], rows: Vec<SheetRow>) -> Vec<ParsedBooking> {
    rows.into_iter()
        .map(|row| {
            let code = normalize_room_code(row.room_code.trim());
            let mut booking = ParsedBooking {
                row,
                target_room_id: None,
                room_type: None,
                base_capacity: 0,
                extra_guests: 0,
                status: MatchStatus::NotFound,
            };
            if let Some(room) = registry::find_by_code(rooms, &code) {
                bind(&mut booking, room);
            }
            booking
        })
        .collect()
}

/// 人工改对应到另一个房间，重新计算加人与状态
pub fn remap(booking: &mut ParsedBooking, room: &Room) {
    bind(booking, room);
}

fn check_out_for(booking: &ParsedBooking, start: NaiveDate, nights: u32) -> NaiveDate {
    let hinted = booking.row.stay_duration_info.as_deref().and_then(parse_stay_hint);
    add_nights(start, hinted.unwrap_or(nights).max(1))
}

fn booking_notes(booking: &ParsedBooking) -> Option<String> {
    booking.row.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(str::to_string)
}

/// 确认结果
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// 今日表单：已批量入住
    CheckedIn(BatchOutcome),
    /// 其他日期：只写入纪录
    Scheduled(Vec<BookingRecord>),
}

impl Resort {
    /// AI 辨识入住表并对应房间；失败时房间状态不受影响
    pub async fn analyze_sheet(&self, ai: &dyn Intelligence, image_base64: &str) -> Result<Vec<ParsedBooking>, ImportError> {
        let rows = ai.analyze_occupancy_image(image_base64).await.map_err(|e| {
            tracing::error!(error = %e, "Occupancy sheet analysis failed");
            ImportError::AnalysisFailed(e.to_string())
        })?;
        let parsed = self.read(|s| match_rows(&s.rooms, rows));
        tracing::info!(
            rows = parsed.len(),
            resolved = parsed.iter().filter(|b| b.is_resolved()).count(),
            "Occupancy sheet analyzed"
        );
        Ok(parsed)
    }

    /// 对已辨识的列重新对应房间
    pub fn match_sheet_rows(&self, rows: Vec<SheetRow>) -> Vec<ParsedBooking> {
        self.read(|s| match_rows(&s.rooms, rows))
    }

    /// 人工指定房间
    pub fn remap_booking(&self, booking: &mut ParsedBooking, room_id: &str) -> bool {
        self.read(|s| {
            registry::find_by_id(&s.rooms, room_id)
                .map(|room| remap(booking, room))
                .is_some()
        })
    }

    /// 确认汇入；`nights` 为表单统一住宿晚数，列上的提示优先
    pub fn confirm_import(
        &self,
        bookings: &[ParsedBooking],
        sheet_date: NaiveDate,
        nights: u32,
    ) -> Result<ImportOutcome, ImportError> {
        let resolved: Vec<&ParsedBooking> = bookings.iter().filter(|b| b.is_resolved()).collect();
        if resolved.is_empty() {
            return Err(ImportError::NoRows);
        }

        if sheet_date == self.context().today() {
            let batch = self.mutate(ChangeEvent::Rooms, |state, ctx| {
                let updates: Vec<(String, RoomIntent)> = resolved
                    .iter()
                    .filter_map(|b| {
                        let room_id = b.target_room_id.clone()?;
                        let fields = GuestFields {
                            guest_name: Some(b.row.guest_name.clone()),
                            guest_id: None,
                            check_out_date: Some(check_out_for(b, ctx.today(), nights)),
                            extra_guests: Some(i32::from(b.extra_guests)),
                            actual_adults: Some(b.row.adults),
                            actual_children: Some(b.row.children),
                            notes: booking_notes(b),
                        };
                        Some((room_id, RoomIntent::CheckIn(fields)))
                    })
                    .collect();
                let batch = apply_batch(&mut state.rooms, &updates, ctx);
                state.booking_records.extend(batch.records.iter().cloned());
                batch
            });
            tracing::info!(rooms = batch.applied.len(), "Sheet imported as today's check-ins");
            return Ok(ImportOutcome::CheckedIn(batch));
        }

        let records = self.mutate(ChangeEvent::History, |state, ctx| {
            let records: Vec<BookingRecord> = resolved
                .iter()
                .filter_map(|b| {
                    Some(BookingRecord {
                        id: snowflake_id(),
                        room_code: b.row.room_code.clone(),
                        room_type: b.room_type?,
                        guest_name: b.row.guest_name.clone(),
                        check_in_date: sheet_date,
                        check_out_date: Some(check_out_for(b, sheet_date, nights)),
                        extra_guests: b.extra_guests,
                        actual_adults: Some(b.row.adults),
                        actual_children: Some(b.row.children),
                        notes: booking_notes(b),
                        created_at: ctx.timestamp,
                    })
                })
                .collect();
            state.booking_records.extend(records.iter().cloned());
            records
        });
        tracing::info!(records = records.len(), date = %sheet_date, "Sheet imported as scheduled bookings");
        Ok(ImportOutcome::Scheduled(records))
    }
}
