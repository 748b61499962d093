//! 入住纪录查询
//!
//! 纪录只追加，唯一的修改是按 id 删除。

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::models::BookingRecord;

use crate::core::{ChangeEvent, Resort};
use crate::utils::AppError;

/// 纪录查询条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// 姓名、房号、备注（不区分大小写）
    pub keyword: Option<String>,
    /// 指定日期优先于年月
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

fn matches_keyword(record: &BookingRecord, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    record.guest_name.to_lowercase().contains(&keyword)
        || record.room_code.to_lowercase().contains(&keyword)
        || record
            .notes
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&keyword))
}

/// 筛选并按入住日期倒序
pub fn query(records: &[BookingRecord], q: &HistoryQuery) -> Vec<BookingRecord> {
    let keyword = q.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty());
    let mut result: Vec<BookingRecord> = records
        .iter()
        .filter(|r| keyword.is_none_or(|k| matches_keyword(r, k)))
        .filter(|r| match q.date {
            Some(date) => r.check_in_date == date,
            None => {
                q.year.is_none_or(|y| r.check_in_date.year() == y)
                    && q.month.is_none_or(|m| r.check_in_date.month() == m)
            }
        })
        .cloned()
        .collect();
    result.sort_by(|a, b| b.check_in_date.cmp(&a.check_in_date));
    result
}

/// 出现过的年份（倒序）
pub fn years(records: &[BookingRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.check_in_date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// 指定日期入住的预约
pub fn forecast(records: &[BookingRecord], date: NaiveDate) -> Vec<BookingRecord> {
    records.iter().filter(|r| r.check_in_date == date).cloned().collect()
}

impl Resort {
    pub fn query_history(&self, q: &HistoryQuery) -> Vec<BookingRecord> {
        self.read(|s| query(&s.booking_records, q))
    }

    pub fn history_years(&self) -> Vec<i32> {
        self.read(|s| years(&s.booking_records))
    }

    /// 明日（或任意日期）预计入住
    pub fn forecast(&self, date: NaiveDate) -> Vec<BookingRecord> {
        self.read(|s| forecast(&s.booking_records, date))
    }

    pub fn delete_history_record(&self, id: i64) -> Result<BookingRecord, AppError> {
        let record = self.try_mutate(ChangeEvent::History, |state, _| {
            let idx = state
                .booking_records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| AppError::not_found(format!("Booking record {id}")))?;
            Ok::<_, AppError>(state.booking_records.remove(idx))
        })?;
        tracing::info!(record_id = id, room_code = %record.room_code, "Booking record deleted");
        Ok(record)
    }
}
