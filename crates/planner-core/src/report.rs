//! 生產建議報表模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlannerError, ProductId};

/// 建議生產項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionItem {
    /// 產品ID
    #[serde(skip)]
    pub product_id: Option<ProductId>,

    /// 產品名稱
    pub product_name: String,

    /// 建議生產數量
    pub quantity_to_produce: u64,

    /// 小計（數量 × 單價）
    pub subtotal: Decimal,
}

impl ProductionItem {
    /// 創建新的生產項目
    pub fn new(
        product_name: impl Into<String>,
        quantity_to_produce: u64,
        subtotal: Decimal,
    ) -> Self {
        Self {
            product_id: None,
            product_name: product_name.into(),
            quantity_to_produce,
            subtotal,
        }
    }

    /// 建構器模式：設置產品ID
    pub fn with_product_id(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }
}

/// 生產建議報表
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionReport {
    /// 建議生產項目（依處理順序）
    pub suggested_items: Vec<ProductionItem>,

    /// 預估總值
    pub total_estimated_value: Decimal,
}

impl ProductionReport {
    /// 創建空報表
    pub fn empty() -> Self {
        Self::default()
    }

    /// 由生產項目建立報表，總值為各小計之和
    pub fn try_from_items(items: Vec<ProductionItem>) -> crate::Result<Self> {
        let total = items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.subtotal).ok_or_else(|| {
                PlannerError::CalculationError(format!(
                    "預估總值溢位：累計 {}，加上 {} 的小計 {}",
                    acc, item.product_name, item.subtotal
                ))
            })
        })?;

        Ok(Self {
            suggested_items: items,
            total_estimated_value: total,
        })
    }

    /// 是否沒有任何建議項目
    pub fn is_empty(&self) -> bool {
        self.suggested_items.is_empty()
    }

    /// 依產品名稱查找項目
    pub fn find_item(&self, product_name: &str) -> Option<&ProductionItem> {
        self.suggested_items
            .iter()
            .find(|item| item.product_name == product_name)
    }

    /// 建議生產總件數
    pub fn total_units(&self) -> u64 {
        self.suggested_items
            .iter()
            .map(|item| item.quantity_to_produce)
            .fold(0u64, u64::saturating_add)
    }
}
