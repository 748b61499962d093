//! Line console
//!
//! One command per line, first word picks the action:
//!
//! ```text
//! in 5 12+1 尊一-1      quick check-in
//! out 201 202           quick check-out
//! voice 尊一 CHECKIN    voice route
//! equip 5=2             equipment command
//! strip                 all awaiting-strip rooms → dirty
//! clean                 all dirty rooms → vacant
//! sweep                 auto checkout now
//! stats                 room stats JSON
//! blankets              ledger summary
//! deduct                kitchen auto-deduct for today's guests
//! export                backup JSON
//! ```

use crate::core::Resort;
use crate::rooms::CommandMode;
use crate::voice::VoiceAction;

pub const HELP: &str = "\
in <codes>          快速入住 (例: in 5 12+1)
out <codes>         快速退房
voice <code> <act>  語音指令 (CHECKIN | CHECKOUT | CLEAN)
equip <cmd>         電熱毯指令 (庫存=35 | 5=2 | 5>6)
strip               所有待撤床 → 待清潔
clean               所有待清潔 → 空房
sweep               立即自動退房
stats               房態統計
blankets            電熱毯帳本
deduct              依今日住客扣除食材
export              匯出備份
help                顯示說明
quit                離開";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Quick(CommandMode, String),
    Voice(String, VoiceAction),
    Equipment(String),
    StripAll,
    CleanAll,
    Sweep,
    Stats,
    Blankets,
    Deduct,
    Export,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "in" => ConsoleCommand::Quick(CommandMode::CheckIn, rest.to_string()),
            "out" => ConsoleCommand::Quick(CommandMode::CheckOut, rest.to_string()),
            "voice" => {
                let (code, action) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "用法: voice <房號> <CHECKIN|CHECKOUT|CLEAN>".to_string())?;
                ConsoleCommand::Voice(code.to_string(), action.parse()?)
            }
            "equip" => ConsoleCommand::Equipment(rest.to_string()),
            "strip" => ConsoleCommand::StripAll,
            "clean" => ConsoleCommand::CleanAll,
            "sweep" => ConsoleCommand::Sweep,
            "stats" => ConsoleCommand::Stats,
            "blankets" => ConsoleCommand::Blankets,
            "deduct" => ConsoleCommand::Deduct,
            "export" => ConsoleCommand::Export,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(format!("未知指令: {other}")),
        };
        Ok(command)
    }
}

/// Run one command and render the reply
pub fn execute(resort: &Resort, command: ConsoleCommand, checkout_hour: u32) -> String {
    match command {
        ConsoleCommand::Quick(mode, input) => match resort.run_quick_command(&input, mode) {
            Ok(outcome) => {
                let mut reply = format!("成功: {}", outcome.successes.join(", "));
                if !outcome.failures.is_empty() {
                    reply.push_str(&format!("\n失敗: {}", outcome.failures.join(", ")));
                }
                reply
            }
            Err(e) => e.to_string(),
        },
        ConsoleCommand::Voice(code, action) => resort.voice_room_action(&code, action),
        ConsoleCommand::Equipment(input) => resort
            .run_equipment_command(&input)
            .unwrap_or_else(|e| e.to_string()),
        ConsoleCommand::StripAll => {
            let stripped = resort.strip_all_awaiting();
            format!("已撤床 {} 間: {}", stripped.len(), stripped.join(", "))
        }
        ConsoleCommand::CleanAll => {
            let cleaned = resort.clean_all_dirty();
            format!("已清潔 {} 間: {}", cleaned.len(), cleaned.join(", "))
        }
        ConsoleCommand::Sweep => {
            let swept = resort.sweep_now(checkout_hour);
            format!("自動退房 {} 間: {}", swept.len(), swept.join(", "))
        }
        ConsoleCommand::Stats => resort.hotel_stats().to_string(),
        ConsoleCommand::Blankets => {
            let s = resort.equipment_summary();
            format!(
                "總庫存 {} / 房內 {} / 損壞 {} / 倉庫 {} / 缺 {}",
                s.total_stock, s.in_rooms, s.broken, s.in_warehouse, s.missing_from_rooms
            )
        }
        ConsoleCommand::Deduct => match resort.auto_deduct_for_today() {
            Ok(deducted) => deducted
                .iter()
                .map(|(name, qty)| format!("{name} -{qty}"))
                .collect::<Vec<_>>()
                .join(", "),
            Err(e) => e.to_string(),
        },
        ConsoleCommand::Export => resort.export_backup().to_string(),
        ConsoleCommand::Help => HELP.to_string(),
        ConsoleCommand::Quit => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, ResortState};
    use chrono::NaiveDate;
    use shared::models::RoomStatus;

    fn resort() -> Resort {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        Resort::new(ResortState::default(), Clock::manual(now))
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            ConsoleCommand::parse("in 5 12+1").unwrap(),
            ConsoleCommand::Quick(CommandMode::CheckIn, "5 12+1".into())
        );
        assert_eq!(
            ConsoleCommand::parse("voice 尊一 checkout").unwrap(),
            ConsoleCommand::Voice("尊一".into(), VoiceAction::CheckOut)
        );
        assert_eq!(ConsoleCommand::parse(" STATS ").unwrap(), ConsoleCommand::Stats);
        assert!(ConsoleCommand::parse("voice 5").is_err());
        assert!(ConsoleCommand::parse("dance").is_err());
    }

    #[test]
    fn test_execute_round() {
        let resort = resort();
        let reply = execute(&resort, ConsoleCommand::parse("in 5 99").unwrap(), 11);
        assert_eq!(reply, "成功: 5 (加人:0)\n失敗: 99 (無此房號)");

        let reply = execute(&resort, ConsoleCommand::parse("out 5").unwrap(), 11);
        assert_eq!(reply, "成功: 5");

        let reply = execute(&resort, ConsoleCommand::parse("equip 庫存=40").unwrap(), 11);
        assert_eq!(reply, "總庫存已更新為: 40");

        let stats = execute(&resort, ConsoleCommand::Stats, 11);
        assert!(stats.contains("\"total\":27"));
    }

    #[test]
    fn test_checkout_strip_clean_cycle() {
        let resort = resort();
        let run = |line: &str| execute(&resort, ConsoleCommand::parse(line).unwrap(), 11);

        run("in 5");
        assert_eq!(run("out 5"), "成功: 5");
        assert_eq!(run("clean"), "已清潔 0 間: ");
        assert_eq!(run("strip"), "已撤床 1 間: 5");
        assert_eq!(run("strip"), "已撤床 0 間: ");
        assert_eq!(run("clean"), "已清潔 1 間: 5");
        assert_eq!(resort.read(|s| s.room("d-5").unwrap().status), RoomStatus::Vacant);

        // voice CLEAN takes an awaiting-strip room straight to vacant
        run("in 6");
        run("out 6");
        assert_eq!(run("voice 6 CLEAN"), "6 已設為空房");
        assert_eq!(resort.read(|s| s.room("d-6").unwrap().status), RoomStatus::Vacant);
    }
}
