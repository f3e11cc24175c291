//! # 工坊生產建議完整範例
//!
//! 這個範例展示完整流程：
//! - 原物料：車架鋼材、輪子、座椅、木板
//! - 產品：腳踏車、滑板車、推車（共用輪子與鋼材）
//! - 目錄匯出為 JSON 快照
//! - 兩組庫存情境平行比較

use production_planner::*;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    production_planner::logging::init();

    println!("🚲 ===== 工坊生產建議範例 =====");
    println!();

    // ========== 1. 建立原物料 ==========
    println!("📦 步驟 1: 建立原物料");
    let mut store = InventoryStore::new();
    let steel = store.create_material(NewRawMaterial::new("Frame Steel", Decimal::from(30)))?;
    let wheel = store.create_material(NewRawMaterial::new("Wheel", Decimal::from(40)))?;
    let seat = store.create_material(NewRawMaterial::new("Seat", Decimal::from(5)))?;
    let plank = store.create_material(NewRawMaterial::new("Plank", Decimal::from(100)))?;
    for material in store.list_materials() {
        let mark = if material.has_stock() { "✓" } else { "✗" };
        println!("   {} {} (庫存 {})", mark, material.name, material.stock_quantity);
    }
    println!();

    // ========== 2. 建立產品與組成 ==========
    println!("🔧 步驟 2: 建立產品組成");
    store.create_product(
        NewProduct::new("Bike", Decimal::from(800))
            .with_composition(steel.id, Decimal::from(4))
            .with_composition(wheel.id, Decimal::from(2))
            .with_composition(seat.id, Decimal::ONE),
    )?;
    let scooter = store.create_product(NewProduct::new("Scooter", Decimal::from(300)))?;
    store.add_composition(scooter.id, NewComposition::new(steel.id, Decimal::from(2)))?;
    store.add_composition(scooter.id, NewComposition::new(wheel.id, Decimal::from(2)))?;
    store.create_product(
        NewProduct::new("Wagon", Decimal::from(120))
            .with_composition(wheel.id, Decimal::from(4))
            .with_composition(plank.id, Decimal::from(3)),
    )?;

    for product in store.list_products() {
        let parts: Vec<String> = product
            .compositions
            .iter()
            .map(|c| format!("{} × {}", c.raw_material_name, c.required_quantity))
            .collect();
        println!("   ✓ {} ({}): {}", product.name, product.price, parts.join(", "));
    }
    println!();

    // ========== 3. 計算建議生產 ==========
    println!("⚙️  步驟 3: 計算建議生產");
    let result = ProductionService::new(&store, &store).suggest_production()?;
    print_plan(&result);

    // ========== 4. 匯出快照 ==========
    println!("💾 步驟 4: 匯出目錄快照");
    let json = store.snapshot().to_json_string()?;
    println!("   快照大小: {} bytes", json.len());
    println!();

    // ========== 5. 情境比較 ==========
    println!("📊 步驟 5: 情境比較（座椅補貨 20）");
    let products = store.products()?;
    let current = store.stock_levels()?;
    let mut restocked = current.clone();
    restocked.insert(seat.id, Decimal::from(20));

    let results = ProductionPlanner::default().compute_scenarios(&products, &[current, restocked])?;
    for (label, scenario) in ["目前庫存", "座椅補貨"].iter().zip(&results) {
        println!(
            "   {}: 預估總值 {}",
            label, scenario.report.total_estimated_value
        );
    }

    Ok(())
}

fn print_plan(result: &PlanResult) {
    for item in &result.report.suggested_items {
        println!(
            "   - {} × {} = {}",
            item.product_name, item.quantity_to_produce, item.subtotal
        );
    }
    println!(
        "   共 {} 件，預估總值: {}",
        result.report.total_units(),
        result.report.total_estimated_value
    );

    for warning in &result.warnings {
        println!("   ⚠ [{:?}] {}", warning.severity, warning.message);
    }
    println!();
}
