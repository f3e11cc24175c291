//! 目錄與庫存讀取介面
//!
//! 生產建議引擎只透過這兩個介面取得輸入，持久化方式由實作決定。

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::{MaterialId, Product};

/// 產品目錄讀取
pub trait CatalogReader {
    /// 取得所有產品（含已解析的組成）
    fn products(&self) -> crate::Result<Vec<Product>>;
}

/// 原物料庫存讀取
pub trait StockReader {
    /// 取得各原物料現有庫存；未列出的原物料視為零
    fn stock_levels(&self) -> crate::Result<HashMap<MaterialId, Decimal>>;
}

impl<T: CatalogReader + ?Sized> CatalogReader for &T {
    fn products(&self) -> crate::Result<Vec<Product>> {
        (**self).products()
    }
}

impl<T: StockReader + ?Sized> StockReader for &T {
    fn stock_levels(&self) -> crate::Result<HashMap<MaterialId, Decimal>> {
        (**self).stock_levels()
    }
}

impl CatalogReader for Vec<Product> {
    fn products(&self) -> crate::Result<Vec<Product>> {
        Ok(self.clone())
    }
}

impl StockReader for HashMap<MaterialId, Decimal> {
    fn stock_levels(&self) -> crate::Result<HashMap<MaterialId, Decimal>> {
        Ok(self.clone())
    }
}
