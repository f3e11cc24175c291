//! 簡單生產建議示例

use production_planner::{MaterialId, Product, ProductId, ProductionPlanner};
use rust_decimal::Decimal;
use std::collections::HashMap;

fn main() -> anyhow::Result<()> {
    production_planner::logging::init();

    println!("=== 簡單生產建議示例 ===\n");

    let steel = MaterialId::new(1);

    // 兩項產品共用同一份 Steel
    let products = vec![
        Product::new(ProductId::new(1), "Cheap Widget", Decimal::from(50))
            .with_composition(steel, Decimal::from(5)),
        Product::new(ProductId::new(2), "Premium Widget", Decimal::from(200))
            .with_composition(steel, Decimal::from(5)),
    ];
    let stock = HashMap::from([(steel, Decimal::from(10))]);

    println!("庫存: Steel = {}", stock[&steel]);
    for product in &products {
        println!("  - 產品: {}, 單價: {}", product.name, product.price);
    }

    let result = ProductionPlanner::default().compute_plan(&products, &stock)?;

    println!("\n建議生產:");
    for item in &result.report.suggested_items {
        println!(
            "  - {} × {} = {}",
            item.product_name, item.quantity_to_produce, item.subtotal
        );
    }
    println!("預估總值: {}", result.report.total_estimated_value);

    Ok(())
}
