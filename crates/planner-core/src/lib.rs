//! # Planner Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod ids;
pub mod material;
pub mod product;
pub mod reader;
pub mod report;

// Re-export 主要類型
pub use config::{PlannerConfig, ProductOrdering};
pub use ids::{CompositionId, MaterialId, ProductId};
pub use material::RawMaterial;
pub use product::{Composition, Product};
pub use reader::{CatalogReader, StockReader};
pub use report::{ProductionItem, ProductionReport};

/// 生產計劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("找不到原物料: {0}")]
    MaterialNotFound(MaterialId),

    #[error("找不到產品: {0}")]
    ProductNotFound(ProductId),

    #[error("找不到產品組成: {0}")]
    CompositionNotFound(CompositionId),

    #[error("資料驗證失敗: {0}")]
    Validation(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 錯誤分類（供傳輸層對應狀態碼）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 資源不存在
    NotFound,
    /// 業務規則違反
    Validation,
    /// 內部錯誤
    Internal,
}

impl PlannerError {
    /// 取得錯誤分類
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MaterialNotFound(_) | Self::ProductNotFound(_) | Self::CompositionNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Validation(_) => ErrorKind::Validation,
            Self::CalculationError(_) | Self::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// 建立驗證錯誤
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
