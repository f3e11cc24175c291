//! 生產建議主計算器

use planner_core::{
    MaterialId, PlannerConfig, PlannerError, Product, ProductionItem, ProductionReport,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::feasibility::{FeasibilityCalculator, UnitRequirement};
use crate::ordering::ProductOrderer;
use crate::{PlanResult, PlanWarning, WorkingStock};

/// 生產建議計算器
///
/// 只持有不可變的配置，每次計算自建工作庫存，可在多執行緒間共用。
#[derive(Debug, Clone, Default)]
pub struct ProductionPlanner {
    config: PlannerConfig,
}

impl ProductionPlanner {
    /// 創建新的計算器
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// 主計算入口
    ///
    /// 依單價由高至低逐一處理產品，每個產品取可生產數量上限並扣減工作庫存。
    /// 輸入不會被修改；相同輸入必得相同報表。
    ///
    /// # Errors
    ///
    /// 單價 × 數量、用量 × 數量或預估總值超出 `Decimal` 範圍時回傳
    /// [`PlannerError::CalculationError`]，不會回傳部分報表。
    pub fn compute_plan(
        &self,
        products: &[Product],
        stock_by_material_id: &HashMap<MaterialId, Decimal>,
    ) -> planner_core::Result<PlanResult> {
        tracing::info!(
            "開始生產建議計算：產品 {} 項，原物料 {} 項",
            products.len(),
            stock_by_material_id.len()
        );

        let start_time = std::time::Instant::now();
        let mut result = PlanResult::empty();

        // Step 1: 決定處理順序
        tracing::debug!("Step 1: 產品排序 ({:?})", self.config.ordering);
        let ordered = ProductOrderer::order(products, self.config.ordering);

        // Step 2: 建立工作庫存
        tracing::debug!("Step 2: 建立工作庫存");
        let mut stock = WorkingStock::from_snapshot(stock_by_material_id);

        // Step 3: 逐產品分配
        tracing::debug!("Step 3: 逐產品分配");
        let mut items = Vec::new();
        for product in ordered {
            if let Some(item) = self.allocate_product(product, &mut stock, &mut result)? {
                items.push(item);
            }
        }

        // Step 4: 彙總報表
        tracing::debug!("Step 4: 彙總報表");
        result.report = ProductionReport::try_from_items(items)?;
        result.remaining_stock = stock.into_levels();
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("生產建議計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "建議項目: {} 筆，預估總值: {}",
            result.report.suggested_items.len(),
            result.report.total_estimated_value
        );

        Ok(result)
    }

    /// 多組庫存情境平行計算，結果依輸入順序回傳
    ///
    /// # Errors
    ///
    /// 任一情境計算失敗時回傳該錯誤，與 [`Self::compute_plan`] 相同。
    pub fn compute_scenarios(
        &self,
        products: &[Product],
        scenarios: &[HashMap<MaterialId, Decimal>],
    ) -> planner_core::Result<Vec<PlanResult>> {
        tracing::info!("開始情境計算：{} 組庫存", scenarios.len());

        scenarios
            .par_iter()
            .map(|stock| self.compute_plan(products, stock))
            .collect()
    }

    /// 單一產品分配
    fn allocate_product(
        &self,
        product: &Product,
        stock: &mut WorkingStock,
        result: &mut PlanResult,
    ) -> planner_core::Result<Option<ProductionItem>> {
        if !product.has_compositions() {
            tracing::debug!("產品 {} 沒有組成，跳過", product.name);
            self.record(
                result,
                PlanWarning::info(
                    product.id,
                    format!("產品 {} 沒有組成，不可生產", product.name),
                ),
            );
            return Ok(None);
        }

        self.check_compositions(product, stock, result);

        let requirements = FeasibilityCalculator::unit_requirements(&product.compositions);
        let max_quantity = match FeasibilityCalculator::max_producible(&requirements, stock) {
            Some(quantity) => quantity,
            None => {
                tracing::debug!("產品 {} 沒有限制性組成，跳過", product.name);
                self.record(
                    result,
                    PlanWarning::warning(
                        product.id,
                        format!(
                            "產品 {} 沒有正數用量的組成，無法決定產量上限",
                            product.name
                        ),
                    ),
                );
                return Ok(None);
            }
        };

        if max_quantity == 0 {
            tracing::debug!("產品 {} 庫存不足，跳過", product.name);
            return Ok(None);
        }

        self.consume(product, &requirements, max_quantity, stock)?;

        let subtotal = product
            .price
            .checked_mul(Decimal::from(max_quantity))
            .ok_or_else(|| {
                PlannerError::CalculationError(format!(
                    "產品 {} 小計溢位：單價 {} × 數量 {}",
                    product.name, product.price, max_quantity
                ))
            })?;

        tracing::debug!(
            "產品 {} 建議生產 {} 件，小計 {}",
            product.name,
            max_quantity,
            subtotal
        );

        Ok(Some(
            ProductionItem::new(product.name.clone(), max_quantity, subtotal)
                .with_product_id(product.id),
        ))
    }

    /// 扣減各原物料用量
    fn consume(
        &self,
        product: &Product,
        requirements: &[UnitRequirement],
        quantity: u64,
        stock: &mut WorkingStock,
    ) -> planner_core::Result<()> {
        for requirement in requirements {
            let used = requirement
                .quantity
                .checked_mul(Decimal::from(quantity))
                .ok_or_else(|| {
                    PlannerError::CalculationError(format!(
                        "產品 {} 原物料 {} 用量溢位",
                        product.name, requirement.material_id
                    ))
                })?;
            stock.consume(requirement.material_id, used)?;
        }
        Ok(())
    }

    /// 檢查退化的組成資料
    fn check_compositions(&self, product: &Product, stock: &WorkingStock, result: &mut PlanResult) {
        for composition in &product.compositions {
            if !composition.is_constraining() {
                self.record(
                    result,
                    PlanWarning::warning(
                        product.id,
                        format!(
                            "產品 {} 的原物料 {} 用量為 {}，不列入計算",
                            product.name, composition.material_id, composition.required_quantity
                        ),
                    ),
                );
            } else if !stock.contains(composition.material_id) {
                self.record(
                    result,
                    PlanWarning::warning(
                        product.id,
                        format!(
                            "產品 {} 的原物料 {} 沒有庫存記錄，視為零",
                            product.name, composition.material_id
                        ),
                    ),
                );
            }
        }
    }

    fn record(&self, result: &mut PlanResult, warning: PlanWarning) {
        if self.config.collect_warnings {
            result.add_warning(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WarningSeverity;
    use planner_core::{ProductId, ProductOrdering};

    const STEEL: MaterialId = MaterialId::new(1);
    const WOOD: MaterialId = MaterialId::new(2);

    fn widget(id: u64, name: &str, price: i64, material: MaterialId, per_unit: i64) -> Product {
        Product::new(ProductId::new(id), name, Decimal::from(price))
            .with_composition(material, Decimal::from(per_unit))
    }

    fn stock(levels: &[(MaterialId, i64)]) -> HashMap<MaterialId, Decimal> {
        levels
            .iter()
            .map(|(id, qty)| (*id, Decimal::from(*qty)))
            .collect()
    }

    #[test]
    fn test_enough_stock() {
        let planner = ProductionPlanner::default();
        let products = vec![widget(1, "Widget", 50, STEEL, 10)];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 100)])).unwrap();

        assert_eq!(result.report.suggested_items.len(), 1);
        let item = &result.report.suggested_items[0];
        assert_eq!(item.product_name, "Widget");
        assert_eq!(item.quantity_to_produce, 10);
        assert_eq!(item.subtotal, Decimal::from(500));
        assert_eq!(result.report.total_estimated_value, Decimal::from(500));
        assert_eq!(result.remaining(STEEL), Decimal::ZERO);
    }

    #[test]
    fn test_no_stock() {
        let planner = ProductionPlanner::default();
        let products = vec![widget(1, "Widget", 50, STEEL, 10)];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 0)])).unwrap();

        assert!(result.report.is_empty());
        assert_eq!(result.report.total_estimated_value, Decimal::ZERO);
        assert_eq!(result.remaining(STEEL), Decimal::ZERO);
    }

    #[test]
    fn test_product_without_compositions() {
        let planner = ProductionPlanner::default();
        let products = vec![Product::new(ProductId::new(1), "Ghost Product", Decimal::from(999))];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 1000)])).unwrap();

        assert!(result.report.is_empty());
        let warnings: Vec<_> = result.warnings_for(ProductId::new(1)).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, WarningSeverity::Info);
    }

    #[test]
    fn test_shared_material_prefers_higher_price() {
        let planner = ProductionPlanner::default();
        // 便宜的排在前面，引擎仍須先處理高價產品
        let products = vec![
            widget(2, "Cheap Widget", 50, STEEL, 5),
            widget(1, "Premium Widget", 200, STEEL, 5),
        ];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 10)])).unwrap();

        assert_eq!(result.report.suggested_items.len(), 1);
        assert_eq!(result.report.suggested_items[0].product_name, "Premium Widget");
        assert_eq!(result.report.suggested_items[0].quantity_to_produce, 2);
        assert_eq!(result.report.total_estimated_value, Decimal::from(400));
    }

    #[test]
    fn test_as_provided_ordering() {
        let planner =
            ProductionPlanner::new(PlannerConfig::new().with_ordering(ProductOrdering::AsProvided));
        let products = vec![
            widget(2, "Cheap Widget", 50, STEEL, 5),
            widget(1, "Premium Widget", 200, STEEL, 5),
        ];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 10)])).unwrap();

        assert_eq!(result.report.suggested_items[0].product_name, "Cheap Widget");
        assert_eq!(result.report.total_estimated_value, Decimal::from(100));
    }

    #[test]
    fn test_zero_requirement_does_not_constrain() {
        let planner = ProductionPlanner::default();
        let products = vec![Product::new(ProductId::new(1), "Chair", Decimal::from(30))
            .with_composition(WOOD, Decimal::from(4))
            .with_composition(STEEL, Decimal::ZERO)];

        let result = planner
            .compute_plan(&products, &stock(&[(WOOD, 20), (STEEL, 0)]))
            .unwrap();

        assert_eq!(result.report.suggested_items[0].quantity_to_produce, 5);
        assert_eq!(result.remaining(STEEL), Decimal::ZERO);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_negative_requirement_never_adds_stock() {
        let planner = ProductionPlanner::default();
        let products = vec![Product::new(ProductId::new(1), "Odd", Decimal::from(10))
            .with_composition(WOOD, Decimal::from(1))
            .with_composition(STEEL, Decimal::from(-3))];

        let result = planner
            .compute_plan(&products, &stock(&[(WOOD, 4), (STEEL, 10)]))
            .unwrap();

        assert_eq!(result.report.suggested_items[0].quantity_to_produce, 4);
        assert_eq!(result.remaining(STEEL), Decimal::from(10));
    }

    #[test]
    fn test_only_non_positive_requirements() {
        let planner = ProductionPlanner::default();
        let products = vec![Product::new(ProductId::new(1), "Free Lunch", Decimal::from(10))
            .with_composition(STEEL, Decimal::ZERO)];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 10)])).unwrap();

        assert!(result.report.is_empty());
        // 一筆非正數用量 + 一筆無上限
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_missing_stock_entry_is_zero() {
        let planner = ProductionPlanner::default();
        let products = vec![widget(1, "Widget", 50, WOOD, 1)];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 100)])).unwrap();

        assert!(result.report.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(!result.remaining_stock.contains_key(&WOOD));
    }

    #[test]
    fn test_warnings_can_be_disabled() {
        let planner = ProductionPlanner::new(PlannerConfig::new().with_collect_warnings(false));
        let products = vec![Product::new(ProductId::new(1), "Ghost Product", Decimal::from(999))];

        let result = planner.compute_plan(&products, &HashMap::new()).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let planner = ProductionPlanner::default();
        let result = planner.compute_plan(&[], &stock(&[(STEEL, 100)])).unwrap();

        assert!(result.report.is_empty());
        assert_eq!(result.report.total_estimated_value, Decimal::ZERO);
        assert_eq!(result.remaining(STEEL), Decimal::from(100));
    }

    #[test]
    fn test_contention_across_materials() {
        // Table 用鋼與木，Shelf 只用木；Table 先處理後剩下的木才給 Shelf
        let planner = ProductionPlanner::default();
        let products = vec![
            widget(2, "Shelf", 40, WOOD, 2),
            Product::new(ProductId::new(1), "Table", Decimal::from(150))
                .with_composition(STEEL, Decimal::from(3))
                .with_composition(WOOD, Decimal::from(5)),
        ];

        let result = planner
            .compute_plan(&products, &stock(&[(STEEL, 9), (WOOD, 20)]))
            .unwrap();

        let report = &result.report;
        assert_eq!(report.find_item("Table").unwrap().quantity_to_produce, 3);
        assert_eq!(report.find_item("Shelf").unwrap().quantity_to_produce, 2);
        assert_eq!(report.total_estimated_value, Decimal::from(530));
        assert_eq!(result.remaining(STEEL), Decimal::ZERO);
        assert_eq!(result.remaining(WOOD), Decimal::ONE);
    }

    #[test]
    fn test_fractional_quantities_are_exact() {
        let planner = ProductionPlanner::default();
        let products = vec![Product::new(ProductId::new(1), "Rope", Decimal::new(1999, 2))
            .with_composition(STEEL, Decimal::new(25, 1))];

        let result = planner
            .compute_plan(&products, &HashMap::from([(STEEL, Decimal::new(101, 1))]))
            .unwrap();

        let item = &result.report.suggested_items[0];
        assert_eq!(item.quantity_to_produce, 4);
        assert_eq!(item.subtotal, Decimal::new(7996, 2));
        assert_eq!(result.remaining(STEEL), Decimal::new(1, 1));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let planner = ProductionPlanner::default();
        let products = vec![widget(1, "Widget", 50, STEEL, 10)];
        let snapshot = stock(&[(STEEL, 100)]);

        let first = planner.compute_plan(&products, &snapshot).unwrap();
        let second = planner.compute_plan(&products, &snapshot).unwrap();

        assert_eq!(snapshot[&STEEL], Decimal::from(100));
        assert_eq!(first.report, second.report);
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn test_compute_scenarios_keeps_order() {
        let planner = ProductionPlanner::default();
        let products = vec![widget(1, "Widget", 50, STEEL, 10)];
        let scenarios = vec![
            stock(&[(STEEL, 100)]),
            stock(&[(STEEL, 0)]),
            stock(&[(STEEL, 35)]),
        ];

        let results = planner.compute_scenarios(&products, &scenarios).unwrap();

        let totals: Vec<_> = results
            .iter()
            .map(|r| r.report.total_estimated_value)
            .collect();
        assert_eq!(
            totals,
            vec![Decimal::from(500), Decimal::ZERO, Decimal::from(150)]
        );
    }

    #[test]
    fn test_subtotal_overflow_is_error() {
        let planner = ProductionPlanner::default();
        let products = vec![Product::new(ProductId::new(1), "Gold", Decimal::MAX)
            .with_composition(STEEL, Decimal::ONE)];

        let result = planner.compute_plan(&products, &stock(&[(STEEL, 2)]));
        assert!(matches!(result, Err(PlannerError::CalculationError(_))));
    }

    #[test]
    fn test_scenario_error_fails_whole_batch() {
        let planner = ProductionPlanner::default();
        let products = vec![Product::new(ProductId::new(1), "Gold", Decimal::MAX)
            .with_composition(STEEL, Decimal::ONE)];
        let scenarios = vec![stock(&[(STEEL, 0)]), stock(&[(STEEL, 2)])];

        let result = planner.compute_scenarios(&products, &scenarios);
        assert!(matches!(result, Err(PlannerError::CalculationError(_))));
    }
}
