//! 语音助理路由
//!
//! 助理把口语解析成 `(房号, 动作)`，这里只负责执行并回一句简短的结果。
//! 所有结果都是给人听的字符串，失败也不报错。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::RoomStatus;
use std::str::FromStr;

use crate::core::Resort;
use crate::rooms::{GuestFields, RoomIntent, normalize_room_code, registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoiceAction {
    CheckIn,
    CheckOut,
    Clean,
}

impl FromStr for VoiceAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHECKIN" => Ok(VoiceAction::CheckIn),
            "CHECKOUT" => Ok(VoiceAction::CheckOut),
            "CLEAN" => Ok(VoiceAction::Clean),
            other => Err(format!("未知指令: {other}")),
        }
    }
}

impl VoiceAction {
    /// 允许执行的前置状态；CLEAN 可直接从待撤床清到空房
    fn accepts(&self, status: RoomStatus) -> bool {
        match self {
            VoiceAction::CheckIn => status == RoomStatus::Vacant,
            VoiceAction::CheckOut => status == RoomStatus::Occupied,
            VoiceAction::Clean => matches!(status, RoomStatus::AwaitingStrip | RoomStatus::Dirty),
        }
    }

    fn intent(&self) -> RoomIntent {
        match self {
            VoiceAction::CheckIn => RoomIntent::CheckIn(GuestFields::default()),
            VoiceAction::CheckOut => RoomIntent::AwaitStrip,
            VoiceAction::Clean => RoomIntent::Vacant,
        }
    }

    fn done(&self, code: &str) -> String {
        match self {
            VoiceAction::CheckIn => format!("{code} 已入住"),
            VoiceAction::CheckOut => format!("{code} 已退房"),
            VoiceAction::Clean => format!("{code} 已設為空房"),
        }
    }

    fn refused(&self, code: &str) -> String {
        match self {
            VoiceAction::CheckIn => format!("{code} 目前無法入住"),
            VoiceAction::CheckOut => format!("{code} 目前無人入住"),
            VoiceAction::Clean => format!("{code} 目前不是待清潔狀態"),
        }
    }
}

impl Resort {
    /// 执行语音房务指令
    pub fn voice_room_action(&self, raw_code: &str, action: VoiceAction) -> String {
        let code = normalize_room_code(raw_code.trim());
        let Some((room_id, status)) =
            self.read(|s| registry::find_by_code(&s.rooms, &code).map(|r| (r.id.clone(), r.status)))
        else {
            return format!("找不到房號 {code}");
        };

        if !action.accepts(status) {
            tracing::debug!(room_code = %code, ?action, ?status, "Voice action refused");
            return action.refused(&code);
        }

        match self.apply_transition(&room_id, action.intent()) {
            Ok(_) => {
                tracing::info!(room_code = %code, ?action, "Voice action applied");
                action.done(&code)
            }
            Err(e) => {
                tracing::warn!(room_code = %code, error = %e, "Voice action failed");
                e.to_string()
            }
        }
    }

    /// 助理查询用的统计（`getHotelStats`）
    pub fn voice_stats(&self) -> Value {
        self.hotel_stats()
    }
}
