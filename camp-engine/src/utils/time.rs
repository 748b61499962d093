//! 时间工具函数 (业务时区)
//!
//! 引擎内部只处理业务时区的日历日期；
//! 每个操作开始时取一次 [`OpContext`]，操作内所有日期都由它推导。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 单次操作的时间上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpContext {
    /// 业务时区的本地时间
    pub now: NaiveDateTime,
    /// Unix millis
    pub timestamp: i64,
}

impl OpContext {
    /// 当前时间 (业务时区)
    pub fn now(tz: Tz) -> Self {
        let utc = chrono::Utc::now();
        Self {
            now: utc.with_timezone(&tz).naive_local(),
            timestamp: utc.timestamp_millis(),
        }
    }

    /// 指定本地时间（测试、回放）
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now,
            timestamp: now.and_utc().timestamp_millis(),
        }
    }

    /// 指定日期的中午
    pub fn on(date: NaiveDate) -> Self {
        Self::at(date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)))
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today().succ_opt().unwrap_or(self.today())
    }

    pub fn hour(&self) -> u32 {
        self.now.hour()
    }
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 + N 晚
pub fn add_nights(date: NaiveDate, nights: u32) -> NaiveDate {
    date.checked_add_days(chrono::Days::new(u64::from(nights)))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2025-03-01 ").unwrap(), date("2025-03-01"));
        assert!(parse_date("2025/03/01").is_err());
    }

    #[test]
    fn test_op_context_on_date() {
        let ctx = OpContext::on(date("2025-12-31"));
        assert_eq!(ctx.today(), date("2025-12-31"));
        assert_eq!(ctx.tomorrow(), date("2026-01-01"));
        assert_eq!(ctx.hour(), 12);
    }

    #[test]
    fn test_add_nights() {
        assert_eq!(add_nights(date("2025-02-27"), 2), date("2025-03-01"));
        assert_eq!(add_nights(date("2025-02-27"), 0), date("2025-02-27"));
    }
}
