//! 可生產數量計算

use planner_core::{Composition, MaterialId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::WorkingStock;

/// 單一原物料的每單位需求（同一產品內已合併）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRequirement {
    pub material_id: MaterialId,
    pub quantity: Decimal,
}

/// 可生產數量計算器
pub struct FeasibilityCalculator;

impl FeasibilityCalculator {
    /// 合併產品的限制性組成
    ///
    /// 非正數用量被略過；同一原物料出現多次時用量相加，
    /// 以免各自計算上限後重複扣減同一份庫存。順序依原物料第一次出現的位置。
    pub fn unit_requirements(compositions: &[Composition]) -> Vec<UnitRequirement> {
        let mut requirements: Vec<UnitRequirement> = Vec::new();

        for composition in compositions.iter().filter(|c| c.is_constraining()) {
            match requirements
                .iter_mut()
                .find(|r| r.material_id == composition.material_id)
            {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(composition.required_quantity)
                        .unwrap_or(Decimal::MAX);
                }
                None => requirements.push(UnitRequirement {
                    material_id: composition.material_id,
                    quantity: composition.required_quantity,
                }),
            }
        }

        requirements
    }

    /// 計算最大可生產數量
    ///
    /// max = min(floor(可用庫存 / 每單位用量))；沒有任何限制性需求時回傳 `None`。
    pub fn max_producible(requirements: &[UnitRequirement], stock: &WorkingStock) -> Option<u64> {
        requirements
            .iter()
            .map(|r| Self::units_from_stock(stock.available(r.material_id), r.quantity))
            .min()
    }

    /// 單一原物料可支撐的整數單位數
    pub fn units_from_stock(available: Decimal, required: Decimal) -> u64 {
        if required <= Decimal::ZERO || available <= Decimal::ZERO {
            return 0;
        }

        // 商超出 Decimal 範圍時表示可支撐的單位數遠大於 u64
        let units = match available.checked_div(required) {
            Some(ratio) => ratio.floor().to_u64().unwrap_or(u64::MAX),
            None => u64::MAX,
        };

        // 除法在第 28 位有效數字捨入，回乘確認不超出庫存
        match required.checked_mul(Decimal::from(units)) {
            Some(needed) if needed <= available => units,
            _ => units.saturating_sub(1),
        }
    }
}
