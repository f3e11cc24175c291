//! 產品處理順序

use planner_core::{Product, ProductOrdering};

/// 產品排序器
pub struct ProductOrderer;

impl ProductOrderer {
    /// 依策略排出處理順序
    ///
    /// 排序只在計算開始前做一次；`sort_by` 為穩定排序，同價產品保留目錄順序。
    pub fn order(products: &[Product], ordering: ProductOrdering) -> Vec<&Product> {
        let mut ordered: Vec<&Product> = products.iter().collect();

        match ordering {
            ProductOrdering::PriceDescending => {
                ordered.sort_by(|a, b| b.price.cmp(&a.price));
            }
            ProductOrdering::AsProvided => {}
        }

        ordered
    }
}
