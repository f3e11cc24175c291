//! 工作庫存（單次計算專用的可變庫存副本）

use planner_core::{MaterialId, PlannerError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 工作庫存
///
/// 每次計算從庫存快照複製一份，分配過程只扣減這份副本，呼叫端的輸入不受影響。
#[derive(Debug, Clone, Default)]
pub struct WorkingStock {
    levels: HashMap<MaterialId, Decimal>,
}

impl WorkingStock {
    /// 由庫存快照建立
    pub fn from_snapshot(snapshot: &HashMap<MaterialId, Decimal>) -> Self {
        Self {
            levels: snapshot.clone(),
        }
    }

    /// 是否有此原物料的庫存記錄
    pub fn contains(&self, material_id: MaterialId) -> bool {
        self.levels.contains_key(&material_id)
    }

    /// 可用數量（沒有記錄視為零）
    pub fn available(&self, material_id: MaterialId) -> Decimal {
        self.levels
            .get(&material_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 扣減庫存
    pub fn consume(
        &mut self,
        material_id: MaterialId,
        quantity: Decimal,
    ) -> planner_core::Result<()> {
        let available = self.available(material_id);
        if quantity > available {
            return Err(PlannerError::CalculationError(format!(
                "原物料 {} 庫存不足：需要 {}, 可用 {}",
                material_id, quantity, available
            )));
        }
        self.levels.insert(material_id, available - quantity);
        Ok(())
    }

    /// 取出剩餘庫存
    pub fn into_levels(self) -> HashMap<MaterialId, Decimal> {
        self.levels
    }
}
