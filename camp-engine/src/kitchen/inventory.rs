//! Inventory book
//!
//! Every mutation appends exactly one [`InventoryLog`] whose
//! `balance_after` equals the new quantity. An adjustment that changes
//! nothing after the zero floor is not a mutation.

use serde::{Deserialize, Serialize};
use shared::models::{InventoryCategory, InventoryItem, InventoryItemCreate, InventoryLog, InventoryLogType};
use shared::util::snowflake_id;

use super::error::KitchenError;
use super::quantity;
use crate::utils::time::OpContext;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_quantity, validate_required_text};

/// Initial restock log reason
pub const INITIAL_STOCK_REASON: &str = "初始建檔";

pub const REASON_SPOILED: &str = "報廢/腐壞";
pub const REASON_STAFF_MEAL: &str = "員工餐";
pub const REASON_STOCKTAKE: &str = "盤點修正";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    /// quantity <= safety stock
    Critical,
    /// quantity < weekly usage
    ReorderSuggested,
    Sufficient,
}

impl StockStatus {
    pub fn of(item: &InventoryItem) -> Self {
        if item.quantity <= item.safety_stock {
            StockStatus::Critical
        } else if item.quantity < item.weekly_usage {
            StockStatus::ReorderSuggested
        } else {
            StockStatus::Sufficient
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Critical => "庫存告急",
            StockStatus::ReorderSuggested => "建議叫貨",
            StockStatus::Sufficient => "庫存充足",
        }
    }

    pub fn is_urgent(&self) -> bool {
        !matches!(self, StockStatus::Sufficient)
    }
}

/// Items below their weekly usage
pub fn restock_suggestions(items: &[InventoryItem]) -> usize {
    items.iter().filter(|i| i.quantity < i.weekly_usage).count()
}

/// Log type for a manual adjustment
pub fn log_type_for(delta: f64, reason: &str) -> InventoryLogType {
    if delta > 0.0 {
        return InventoryLogType::Restock;
    }
    match reason {
        REASON_SPOILED => InventoryLogType::Spoiled,
        REASON_STAFF_MEAL => InventoryLogType::StaffMeal,
        REASON_STOCKTAKE => InventoryLogType::Adjustment,
        _ => InventoryLogType::Usage,
    }
}

fn push_log(item: &mut InventoryItem, log_type: InventoryLogType, reason: String, amount: f64, ctx: &OpContext) -> InventoryLog {
    let log = InventoryLog {
        id: snowflake_id(),
        date: ctx.timestamp,
        log_type,
        reason,
        amount,
        balance_after: item.quantity,
    };
    // newest first
    item.logs.insert(0, log.clone());
    log
}

/// Apply a signed adjustment. Returns the log, or `None` when the
/// floored change is zero.
pub fn adjust(item: &mut InventoryItem, delta: f64, reason: &str, note: Option<&str>, ctx: &OpContext) -> Option<InventoryLog> {
    let next = quantity::apply_delta(item.quantity, delta);
    let actual = quantity::difference(next, item.quantity);
    if actual == 0.0 {
        return None;
    }

    let reason_text = match note.map(str::trim).filter(|n| !n.is_empty()) {
        Some(note) => format!("{reason}: {note}"),
        None => reason.to_string(),
    };
    item.quantity = next;
    Some(push_log(item, log_type_for(delta, reason), reason_text, actual, ctx))
}

/// Deduct per-guest consumption from every item that has one.
/// Returns `(item name, consumed)` for each item that changed.
pub fn deduct_for_guests(items: &mut [InventoryItem], guests: u32, ctx: &OpContext) -> Result<Vec<(String, f64)>, KitchenError> {
    if guests == 0 {
        return Err(KitchenError::NoDiners);
    }

    let mut deducted = Vec::new();
    for item in items.iter_mut().filter(|i| i.consumption_per_guest > 0.0) {
        let consumed = quantity::consumption(guests, item.consumption_per_guest);
        let next = quantity::apply_delta(item.quantity, -consumed);
        let actual = quantity::difference(item.quantity, next);
        if actual <= 0.0 {
            continue;
        }
        item.quantity = next;
        push_log(item, InventoryLogType::Usage, format!("系統自動扣除 ({guests}人份)"), -actual, ctx);
        deducted.push((item.name.clone(), actual));
    }
    Ok(deducted)
}

/// Build a new item from a validated payload, with its opening log
pub fn new_item(payload: InventoryItemCreate, ctx: &OpContext) -> Result<InventoryItem, KitchenError> {
    let invalid = |e: shared::error::AppError| KitchenError::InvalidItem(e.message);
    validate_required_text(&payload.name, "name", MAX_NAME_LEN).map_err(invalid)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN).map_err(invalid)?;
    validate_quantity(payload.quantity, "quantity").map_err(invalid)?;
    validate_quantity(payload.safety_stock, "safety_stock").map_err(invalid)?;
    validate_quantity(payload.weekly_usage, "weekly_usage").map_err(invalid)?;
    let per_guest = payload.consumption_per_guest.unwrap_or(0.0);
    validate_quantity(per_guest, "consumption_per_guest").map_err(invalid)?;

    let opening = quantity::to_f64(quantity::to_decimal(payload.quantity));
    let mut item = InventoryItem {
        id: snowflake_id(),
        name: payload.name.trim().to_string(),
        category: payload.category,
        quantity: opening,
        unit: payload.unit.trim().to_string(),
        safety_stock: payload.safety_stock,
        weekly_usage: payload.weekly_usage,
        consumption_per_guest: per_guest,
        logs: Vec::new(),
    };
    push_log(&mut item, InventoryLogType::Restock, INITIAL_STOCK_REASON.to_string(), opening, ctx);
    Ok(item)
}

/// Reason text length guard for manual adjustments
pub fn validate_reason(reason: &str, note: Option<&str>) -> Result<(), KitchenError> {
    validate_required_text(reason, "reason", MAX_SHORT_TEXT_LEN)
        .and_then(|_| crate::utils::validation::validate_optional_text(&note.map(str::to_string), "note", MAX_NOTE_LEN))
        .map_err(|e| KitchenError::InvalidItem(e.message))
}

// ==================== Listing ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockFilter {
    #[default]
    All,
    Low,
    Sufficient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Quantity,
    SafetyStock,
    WeeklyUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Filter then sort
pub fn list_items(items: &[InventoryItem], filter: StockFilter, field: SortField, direction: SortDirection) -> Vec<InventoryItem> {
    let mut result: Vec<InventoryItem> = items
        .iter()
        .filter(|item| match filter {
            StockFilter::All => true,
            StockFilter::Low => StockStatus::of(item).is_urgent(),
            StockFilter::Sufficient => !StockStatus::of(item).is_urgent(),
        })
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        let ord = match field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Quantity => a.quantity.total_cmp(&b.quantity),
            SortField::SafetyStock => a.safety_stock.total_cmp(&b.safety_stock),
            SortField::WeeklyUsage => a.weekly_usage.total_cmp(&b.weekly_usage),
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    result
}

/// Group in display order; unknown categories land in the 其他 bucket last.
/// Empty groups are kept so every category shows up.
pub fn group_by_category(items: Vec<InventoryItem>) -> Vec<(InventoryCategory, Vec<InventoryItem>)> {
    let mut groups: Vec<(InventoryCategory, Vec<InventoryItem>)> = InventoryCategory::ALL
        .into_iter()
        .chain(std::iter::once(InventoryCategory::Other))
        .map(|c| (c, Vec::new()))
        .collect();

    for item in items {
        let slot = groups
            .iter()
            .position(|(c, _)| *c == item.category)
            .unwrap_or(groups.len() - 1);
        groups[slot].1.push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::defaults::default_inventory;
    use chrono::NaiveDate;

    fn ctx() -> OpContext {
        OpContext::on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    fn lobster() -> InventoryItem {
        default_inventory().remove(0)
    }

    #[test]
    fn test_stock_status() {
        let mut item = lobster();
        assert_eq!(item.quantity, 8.0);
        assert_eq!(StockStatus::of(&item), StockStatus::Critical);
        item.quantity = 15.0;
        assert_eq!(StockStatus::of(&item), StockStatus::ReorderSuggested);
        item.quantity = 20.0;
        assert_eq!(StockStatus::of(&item), StockStatus::Sufficient);
        // wine is above its weekly usage
        assert_eq!(restock_suggestions(&default_inventory()), 4);
    }

    #[test]
    fn test_adjust_floors_and_logs_once() {
        let mut item = lobster();
        let log = adjust(&mut item, -10.0, "一般消耗", None, &ctx()).unwrap();
        assert_eq!(item.quantity, 0.0);
        assert_eq!(log.amount, -8.0);
        assert_eq!(log.balance_after, 0.0);
        assert_eq!(log.log_type, InventoryLogType::Usage);
        assert_eq!(item.logs.len(), 1);

        // already at zero: not a mutation
        assert!(adjust(&mut item, -1.0, "一般消耗", None, &ctx()).is_none());
        assert_eq!(item.logs.len(), 1);
    }

    #[test]
    fn test_adjust_log_types_and_reason_text() {
        let mut item = lobster();
        let log = adjust(&mut item, 5.0, "進貨/補貨", Some("週一到貨"), &ctx()).unwrap();
        assert_eq!(log.log_type, InventoryLogType::Restock);
        assert_eq!(log.reason, "進貨/補貨: 週一到貨");
        assert_eq!(log.balance_after, 13.0);

        assert_eq!(adjust(&mut item, -1.0, REASON_SPOILED, None, &ctx()).unwrap().log_type, InventoryLogType::Spoiled);
        assert_eq!(adjust(&mut item, -1.0, REASON_STAFF_MEAL, None, &ctx()).unwrap().log_type, InventoryLogType::StaffMeal);
        assert_eq!(adjust(&mut item, -1.0, REASON_STOCKTAKE, Some(" "), &ctx()).unwrap().reason, REASON_STOCKTAKE);
        assert_eq!(item.logs[0].balance_after, item.quantity);
        assert_eq!(item.logs.len(), 4);
    }

    #[test]
    fn test_deduct_for_guests() {
        let mut items = default_inventory();
        let deducted = deduct_for_guests(&mut items, 10, &ctx()).unwrap();
        assert_eq!(deducted.len(), 5);
        // lobster 8 - 5
        assert_eq!(items[0].quantity, 3.0);
        // vegetables 12 - 3
        assert_eq!(items[2].quantity, 9.0);
        assert_eq!(items[0].logs[0].reason, "系統自動扣除 (10人份)");
        assert_eq!(items[0].logs[0].amount, -5.0);

        // floors at zero, logs only the actual change
        let deducted = deduct_for_guests(&mut items, 100, &ctx()).unwrap();
        assert_eq!(items[0].quantity, 0.0);
        assert_eq!(deducted[0], ("波士頓龍蝦".to_string(), 3.0));

        assert_eq!(deduct_for_guests(&mut items, 0, &ctx()), Err(KitchenError::NoDiners));
    }

    #[test]
    fn test_new_item_validates_and_opens_log() {
        let payload = InventoryItemCreate {
            name: "和牛".into(),
            category: InventoryCategory::Meat,
            quantity: 6.0,
            unit: "kg".into(),
            safety_stock: 2.0,
            weekly_usage: 5.0,
            consumption_per_guest: None,
        };
        let item = new_item(payload.clone(), &ctx()).unwrap();
        assert_eq!(item.logs.len(), 1);
        assert_eq!(item.logs[0].reason, INITIAL_STOCK_REASON);
        assert_eq!(item.logs[0].balance_after, 6.0);

        let bad = InventoryItemCreate {
            name: " ".into(),
            ..payload.clone()
        };
        assert!(new_item(bad, &ctx()).is_err());
        let negative = InventoryItemCreate {
            quantity: -1.0,
            ..payload
        };
        assert!(new_item(negative, &ctx()).is_err());
    }

    #[test]
    fn test_listing_and_grouping() {
        let mut items = default_inventory();
        items[3].quantity = 30.0;
        let low = list_items(&items, StockFilter::Low, SortField::Quantity, SortDirection::Desc);
        assert_eq!(low.len(), 4);
        assert_eq!(low[0].name, "有機雞蛋");
        let sufficient = list_items(&items, StockFilter::Sufficient, SortField::Name, SortDirection::Asc);
        assert_eq!(sufficient.len(), 1);
        assert_eq!(sufficient[0].name, "精選紅酒");

        let groups = group_by_category(items);
        assert_eq!(groups.len(), 7);
        assert_eq!(groups[0].0, InventoryCategory::Meat);
        assert!(groups[0].1.is_empty());
        assert_eq!(groups[2].1.len(), 2);
        assert_eq!(groups[6].0, InventoryCategory::Other);
    }
}
