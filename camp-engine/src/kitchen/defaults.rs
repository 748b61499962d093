use shared::models::{InventoryCategory, InventoryItem};

#[allow(clippy::too_many_arguments)]
fn item(
    id: i64,
    name: &str,
    category: InventoryCategory,
    quantity: f64,
    unit: &str,
    safety_stock: f64,
    weekly_usage: f64,
    consumption_per_guest: f64,
) -> InventoryItem {
    InventoryItem {
        id,
        name: name.to_string(),
        category,
        quantity,
        unit: unit.to_string(),
        safety_stock,
        weekly_usage,
        consumption_per_guest,
        logs: Vec::new(),
    }
}

/// Opening stock book
pub fn default_inventory() -> Vec<InventoryItem> {
    use InventoryCategory::*;
    vec![
        item(2, "波士頓龍蝦", Seafood, 8.0, "隻", 10.0, 20.0, 0.5),
        item(3, "有機雞蛋", Produce, 45.0, "顆", 30.0, 100.0, 1.0),
        item(4, "季節時蔬", Produce, 12.0, "kg", 8.0, 25.0, 0.3),
        item(5, "精選紅酒", Beverage, 24.0, "瓶", 12.0, 15.0, 0.1),
        item(6, "早餐吐司", DryGoods, 5.0, "條", 3.0, 10.0, 0.1),
    ]
}
