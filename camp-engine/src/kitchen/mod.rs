//! 厨房 - 库存簿与用餐统计

pub mod defaults;
pub mod error;
pub mod inventory;
pub mod meals;
pub mod quantity;

pub use defaults::default_inventory;
pub use error::KitchenError;
pub use inventory::{SortDirection, SortField, StockFilter, StockStatus};
pub use meals::{DiningEntry, MealStats};

use camp_client::Intelligence;
use shared::models::{InventoryCategory, InventoryItem, InventoryItemCreate, InventoryLog};

use crate::core::{ChangeEvent, Resort};

impl Resort {
    /// 手动调整库存；数量没有实际变化时返回 `Ok(None)` 且不广播
    pub fn adjust_inventory(
        &self,
        item_id: i64,
        delta: f64,
        reason: &str,
        note: Option<&str>,
    ) -> Result<Option<InventoryLog>, KitchenError> {
        inventory::validate_reason(reason, note)?;
        let current = self
            .read(|s| s.inventory.iter().find(|i| i.id == item_id).map(|i| i.quantity))
            .ok_or(KitchenError::ItemNotFound(item_id))?;
        if quantity::apply_delta(current, delta) == current {
            return Ok(None);
        }

        let log = self.try_mutate(ChangeEvent::Inventory, |state, ctx| {
            let item = state
                .inventory
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or(KitchenError::ItemNotFound(item_id))?;
            Ok(inventory::adjust(item, delta, reason, note, ctx))
        })?;
        if let Some(log) = &log {
            tracing::info!(item_id, amount = log.amount, balance = log.balance_after, "Inventory adjusted");
        }
        Ok(log)
    }

    pub fn add_inventory_item(&self, payload: InventoryItemCreate) -> Result<InventoryItem, KitchenError> {
        let item = self.try_mutate(ChangeEvent::Inventory, |state, ctx| {
            let item = inventory::new_item(payload, ctx)?;
            state.inventory.push(item.clone());
            Ok::<_, KitchenError>(item)
        })?;
        tracing::info!(item_id = item.id, name = %item.name, "Inventory item added");
        Ok(item)
    }

    pub fn remove_inventory_item(&self, item_id: i64) -> Result<InventoryItem, KitchenError> {
        self.try_mutate(ChangeEvent::Inventory, |state, _| {
            let idx = state
                .inventory
                .iter()
                .position(|i| i.id == item_id)
                .ok_or(KitchenError::ItemNotFound(item_id))?;
            Ok(state.inventory.remove(idx))
        })
    }

    /// 恢复预设库存（清除所有品项与纪录）
    pub fn reset_inventory(&self) {
        self.mutate(ChangeEvent::Inventory, |state, _| state.inventory = default_inventory());
        tracing::warn!("Inventory reset to defaults");
    }

    /// 按人数自动扣除每人消耗量
    pub fn auto_deduct_inventory(&self, guests: u32) -> Result<Vec<(String, f64)>, KitchenError> {
        let deducted = self.try_mutate(ChangeEvent::Inventory, |state, ctx| {
            inventory::deduct_for_guests(&mut state.inventory, guests, ctx)
        })?;
        tracing::info!(guests, items = deducted.len(), "Inventory auto deducted");
        Ok(deducted)
    }

    /// 以今日晚餐人数自动扣除
    pub fn auto_deduct_for_today(&self) -> Result<Vec<(String, f64)>, KitchenError> {
        let diners = self.meal_stats().dinner;
        self.auto_deduct_inventory(diners)
    }

    pub fn meal_stats(&self) -> MealStats {
        self.read(|s| meals::meal_stats(&s.rooms, &s.members))
    }

    pub fn dining_list(&self, search: &str) -> Vec<DiningEntry> {
        self.read(|s| meals::dining_list(&s.rooms, &s.members, search))
    }

    pub fn restock_suggestions(&self) -> usize {
        self.read(|s| inventory::restock_suggestions(&s.inventory))
    }

    /// 筛选、排序后按分类分组
    pub fn inventory_view(
        &self,
        filter: StockFilter,
        field: SortField,
        direction: SortDirection,
    ) -> Vec<(InventoryCategory, Vec<InventoryItem>)> {
        self.read(|s| inventory::group_by_category(inventory::list_items(&s.inventory, filter, field, direction)))
    }

    /// AI 备餐建议
    pub async fn kitchen_advice(&self, ai: &dyn Intelligence) -> String {
        let date = self.context().today().format("%Y-%m-%d").to_string();
        let stats = serde_json::to_value(self.meal_stats()).unwrap_or_default();
        ai.generate_kitchen_advice(&date, &stats).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, ResortState};
    use crate::rooms::{GuestFields, RoomIntent};
    use chrono::NaiveDate;
    use shared::models::InventoryLogType;

    fn resort() -> Resort {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        Resort::new(ResortState::default(), Clock::manual(now))
    }

    #[test]
    fn test_critical_item_scenario() {
        let resort = resort();
        let lobster = resort.read(|s| s.inventory[0].clone());
        assert_eq!(StockStatus::of(&lobster), StockStatus::Critical);

        let log = resort.adjust_inventory(lobster.id, -20.0, "一般消耗", None).unwrap().unwrap();
        assert_eq!(log.balance_after, 0.0);
        assert_eq!(log.log_type, InventoryLogType::Usage);

        let mut rx = resort.subscribe();
        assert_eq!(resort.adjust_inventory(lobster.id, -1.0, "一般消耗", None), Ok(None));
        assert!(rx.try_recv().is_err());

        let item = resort.read(|s| s.inventory[0].clone());
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.logs.len(), 1);
    }

    #[test]
    fn test_unknown_item() {
        let resort = resort();
        assert_eq!(
            resort.adjust_inventory(404, 1.0, "進貨/補貨", None),
            Err(KitchenError::ItemNotFound(404))
        );
        assert_eq!(resort.remove_inventory_item(404), Err(KitchenError::ItemNotFound(404)));
    }

    #[test]
    fn test_auto_deduct_for_today_uses_dinner_count() {
        let resort = resort();
        assert_eq!(resort.auto_deduct_for_today(), Err(KitchenError::NoDiners));

        resort.apply_transition("d-1", RoomIntent::CheckIn(GuestFields::named("甲"))).unwrap();
        assert_eq!(resort.meal_stats().dinner, 2);
        let deducted = resort.auto_deduct_for_today().unwrap();
        assert_eq!(deducted.len(), 5);
        // eggs 45 - 2
        assert_eq!(resort.read(|s| s.inventory[1].quantity), 43.0);
    }

    #[test]
    fn test_reset_and_remove() {
        let resort = resort();
        let id = resort.read(|s| s.inventory[4].id);
        resort.remove_inventory_item(id).unwrap();
        assert_eq!(resort.read(|s| s.inventory.len()), 4);
        resort.reset_inventory();
        assert_eq!(resort.read(|s| s.inventory.len()), 5);
        assert_eq!(resort.restock_suggestions(), 4);
        let view = resort.inventory_view(StockFilter::All, SortField::Name, SortDirection::Asc);
        assert_eq!(view.iter().map(|(_, items)| items.len()).sum::<usize>(), 5);
    }
}
