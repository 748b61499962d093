//! Member Model

use serde::{Deserialize, Serialize};

/// Membership tier (會員等級)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemberTier {
    #[default]
    #[serde(rename = "經典會員")]
    Classic,
    #[serde(rename = "黃金會員")]
    Gold,
    #[serde(rename = "白金會員")]
    Platinum,
    #[serde(rename = "黑鑽尊榮")]
    BlackDiamond,
}

impl MemberTier {
    pub fn label(&self) -> &'static str {
        match self {
            MemberTier::Classic => "經典會員",
            MemberTier::Gold => "黃金會員",
            MemberTier::Platinum => "白金會員",
            MemberTier::BlackDiamond => "黑鑽尊榮",
        }
    }
}

/// Past stay on a member profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayHistory {
    /// YYYY-MM-DD
    pub date: String,
    /// Nights
    pub stay_duration: u32,
    pub accommodation_type: String,
    #[serde(default)]
    pub notes: String,
}

/// Member entity (會員)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub tier: MemberTier,
    pub join_date: String,
    #[serde(default)]
    pub total_visits: u32,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub special_requests: Vec<String>,
    /// AI summarized preferences
    #[serde(default)]
    pub preferences: String,
    #[serde(default)]
    pub history: Vec<StayHistory>,
    /// Raw staff notes
    #[serde(default)]
    pub notes: String,
}

/// Create member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberCreate {
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub tier: Option<MemberTier>,
    pub notes: Option<String>,
}

/// Update member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub tier: Option<MemberTier>,
    pub tags: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Structured result of the AI note analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub special_requests: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
}
