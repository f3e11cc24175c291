//! # Production Planning Engine
//!
//! 生產建議計算引擎：依單價優先順序，在共用原物料庫存下分配各產品的建議產量

pub mod feasibility;
pub mod ordering;
pub mod planner;
pub mod service;
pub mod working_stock;

// Re-export 主要類型
pub use feasibility::FeasibilityCalculator;
pub use planner::ProductionPlanner;
pub use service::ProductionService;
pub use working_stock::WorkingStock;

use chrono::{DateTime, Utc};
use planner_core::{MaterialId, ProductId, ProductionReport};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

/// 生產建議計算結果
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// 計算批次ID
    pub run_id: Uuid,

    /// 計算時間
    pub generated_at: DateTime<Utc>,

    /// 生產建議報表
    pub report: ProductionReport,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 分配後剩餘庫存
    pub remaining_stock: HashMap<MaterialId, Decimal>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            report: ProductionReport::empty(),
            warnings: Vec::new(),
            remaining_stock: HashMap::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    /// 指定產品的警告
    pub fn warnings_for(&self, product_id: ProductId) -> impl Iterator<Item = &PlanWarning> {
        self.warnings
            .iter()
            .filter(move |w| w.product_id == Some(product_id))
    }

    /// 取得原物料剩餘庫存（未列出視為零）
    pub fn remaining(&self, material_id: MaterialId) -> Decimal {
        self.remaining_stock
            .get(&material_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// 計算警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWarning {
    pub product_id: Option<ProductId>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(product_id: Option<ProductId>, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id,
            message,
            severity,
        }
    }

    pub fn info(product_id: ProductId, message: String) -> Self {
        Self::new(Some(product_id), message, WarningSeverity::Info)
    }

    pub fn warning(product_id: ProductId, message: String) -> Self {
        Self::new(Some(product_id), message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
