//! 原物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MaterialId;

/// 原物料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    /// 原物料ID
    pub id: MaterialId,

    /// 名稱
    pub name: String,

    /// 現有庫存
    pub stock_quantity: Decimal,
}

impl RawMaterial {
    /// 創建新的原物料
    pub fn new(id: MaterialId, name: impl Into<String>, stock_quantity: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            stock_quantity,
        }
    }

    /// 是否有可用庫存
    pub fn has_stock(&self) -> bool {
        self.stock_quantity > Decimal::ZERO
    }
}
