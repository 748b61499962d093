//! Kitchen Inventory Model

use serde::{Deserialize, Serialize};

/// Inventory category (分類)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryCategory {
    #[serde(rename = "肉品")]
    Meat,
    #[serde(rename = "海鮮")]
    Seafood,
    #[serde(rename = "蔬果")]
    Produce,
    #[serde(rename = "乾貨")]
    DryGoods,
    #[serde(rename = "酒水")]
    Beverage,
    #[serde(rename = "消耗品")]
    Consumable,
    /// Unknown category from older data
    #[serde(rename = "其他", other)]
    Other,
}

impl InventoryCategory {
    /// Display order used when grouping the stock list
    pub const ALL: [InventoryCategory; 6] = [
        InventoryCategory::Meat,
        InventoryCategory::Seafood,
        InventoryCategory::Produce,
        InventoryCategory::DryGoods,
        InventoryCategory::Beverage,
        InventoryCategory::Consumable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InventoryCategory::Meat => "肉品",
            InventoryCategory::Seafood => "海鮮",
            InventoryCategory::Produce => "蔬果",
            InventoryCategory::DryGoods => "乾貨",
            InventoryCategory::Beverage => "酒水",
            InventoryCategory::Consumable => "消耗品",
            InventoryCategory::Other => "其他",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label.trim())
    }
}

/// Inventory log type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryLogType {
    Usage,
    Restock,
    Adjustment,
    Spoiled,
    StaffMeal,
}

/// Inventory log entry (異動紀錄)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLog {
    pub id: i64,
    /// Unix millis
    pub date: i64,
    pub log_type: InventoryLogType,
    pub reason: String,
    /// Signed change actually applied
    pub amount: f64,
    pub balance_after: f64,
}

/// Inventory item entity (庫存品項)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: f64,
    pub unit: String,
    pub safety_stock: f64,
    pub weekly_usage: f64,
    #[serde(default)]
    pub consumption_per_guest: f64,
    #[serde(default)]
    pub logs: Vec<InventoryLog>,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: f64,
    pub unit: String,
    pub safety_stock: f64,
    pub weekly_usage: f64,
    pub consumption_per_guest: Option<f64>,
}
