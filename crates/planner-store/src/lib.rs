//! # Planner Store
//!
//! 原物料與產品目錄的記憶體儲存層（含資料驗證）

pub mod snapshot;
pub mod store;
pub mod validation;

// Re-export 主要類型
pub use snapshot::CatalogSnapshot;
pub use store::{
    CompositionView, InventoryStore, NewComposition, NewProduct, NewRawMaterial, ProductUpdate,
    ProductView,
};
