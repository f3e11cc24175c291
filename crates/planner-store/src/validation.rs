//! 資料驗證規則

use planner_core::{PlannerError, Result};
use rust_decimal::Decimal;

pub const MATERIAL_NAME_REQUIRED: &str = "Raw material name is required";
pub const MATERIAL_STOCK_NON_NEGATIVE: &str = "Stock quantity must be a non-negative value";
pub const PRODUCT_NAME_REQUIRED: &str = "Product name is required";
pub const PRODUCT_PRICE_NON_NEGATIVE: &str = "Product price must be a non-negative value";
pub const COMPOSITION_QUANTITY_POSITIVE: &str = "quantity must be greater than zero";

/// 名稱不可為空白
pub fn require_name(name: &str, message: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PlannerError::validation(message));
    }
    Ok(())
}

/// 數值不可為負
pub fn require_non_negative(value: Decimal, message: &str) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(PlannerError::validation(message));
    }
    Ok(())
}

/// 組成用量必須為正數
pub fn require_positive_quantity(quantity: Decimal) -> Result<()> {
    if quantity <= Decimal::ZERO {
        return Err(PlannerError::validation(COMPOSITION_QUANTITY_POSITIVE));
    }
    Ok(())
}

/// 驗證原物料欄位
pub fn validate_material(name: &str, stock_quantity: Decimal) -> Result<()> {
    require_name(name, MATERIAL_NAME_REQUIRED)?;
    require_non_negative(stock_quantity, MATERIAL_STOCK_NON_NEGATIVE)
}

/// 驗證產品欄位
pub fn validate_product(name: &str, price: Decimal) -> Result<()> {
    require_name(name, PRODUCT_NAME_REQUIRED)?;
    require_non_negative(price, PRODUCT_PRICE_NON_NEGATIVE)
}
