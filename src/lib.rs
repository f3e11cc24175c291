//! # Production Planner
//!
//! 原物料庫存與產品組成管理，並依現有庫存計算建議生產計劃
//!
//! - [`planner_core`]：資料模型、錯誤、配置、讀取介面
//! - [`planner_calc`]：生產建議計算引擎
//! - [`planner_store`]：目錄與庫存的記憶體儲存

pub mod logging;

pub use planner_calc::{
    FeasibilityCalculator, PlanResult, PlanWarning, ProductionPlanner, ProductionService,
    WarningSeverity, WorkingStock,
};
pub use planner_core::*;
pub use planner_store::{
    CatalogSnapshot, CompositionView, InventoryStore, NewComposition, NewProduct, NewRawMaterial,
    ProductUpdate, ProductView,
};
