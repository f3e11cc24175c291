//! 生產建議服務：串接目錄、庫存與計算器

use planner_core::{CatalogReader, PlannerConfig, StockReader};

use crate::{PlanResult, ProductionPlanner};

/// 生產建議服務
pub struct ProductionService<C, S> {
    catalog: C,
    stock: S,
    planner: ProductionPlanner,
}

impl<C: CatalogReader, S: StockReader> ProductionService<C, S> {
    /// 使用預設配置創建服務
    pub fn new(catalog: C, stock: S) -> Self {
        Self::with_config(catalog, stock, PlannerConfig::default())
    }

    /// 使用指定配置創建服務
    pub fn with_config(catalog: C, stock: S, config: PlannerConfig) -> Self {
        Self {
            catalog,
            stock,
            planner: ProductionPlanner::new(config),
        }
    }

    /// 依目前目錄與庫存計算建議生產計劃
    pub fn suggest_production(&self) -> planner_core::Result<PlanResult> {
        let products = self.catalog.products()?;
        let stock = self.stock.stock_levels()?;

        tracing::debug!(
            "讀取目錄 {} 項產品，庫存 {} 項原物料",
            products.len(),
            stock.len()
        );

        self.planner.compute_plan(&products, &stock)
    }
}
