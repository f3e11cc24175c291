//! 生產建議配置

use serde::{Deserialize, Serialize};

/// 產品處理順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductOrdering {
    /// 依單價由高至低（同價保留目錄順序）
    #[default]
    PriceDescending,

    /// 沿用目錄提供者給的順序
    AsProvided,
}

/// 生產建議計算配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    /// 產品處理順序
    pub ordering: ProductOrdering,

    /// 是否收集計算警告
    pub collect_warnings: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            ordering: ProductOrdering::PriceDescending,
            collect_warnings: true,
        }
    }
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置處理順序
    ///
    /// # 範例
    /// ```
    /// # use planner_core::{PlannerConfig, ProductOrdering};
    /// let config = PlannerConfig::new().with_ordering(ProductOrdering::AsProvided);
    /// assert_eq!(config.ordering, ProductOrdering::AsProvided);
    /// ```
    pub fn with_ordering(mut self, ordering: ProductOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// 建構器模式：設置是否收集警告
    pub fn with_collect_warnings(mut self, collect: bool) -> Self {
        self.collect_warnings = collect;
        self
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
