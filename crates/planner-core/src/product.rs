//! 產品與組成模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CompositionId, MaterialId, ProductId};

/// 產品組成（每單位產品所需原物料）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// 組成ID（尚未持久化時為空）
    pub id: Option<CompositionId>,

    /// 原物料ID
    pub material_id: MaterialId,

    /// 每單位用量
    pub required_quantity: Decimal,
}

impl Composition {
    /// 創建新的組成
    pub fn new(material_id: MaterialId, required_quantity: Decimal) -> Self {
        Self {
            id: None,
            material_id,
            required_quantity,
        }
    }

    /// 建構器模式：設置組成ID
    pub fn with_id(mut self, id: CompositionId) -> Self {
        self.id = Some(id);
        self
    }

    /// 用量是否會限制產量（非正數用量不構成限制）
    pub fn is_constraining(&self) -> bool {
        self.required_quantity > Decimal::ZERO
    }
}

/// 產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// 產品ID
    pub id: ProductId,

    /// 名稱
    pub name: String,

    /// 單價
    pub price: Decimal,

    /// 組成清單
    #[serde(default)]
    pub compositions: Vec<Composition>,
}

impl Product {
    /// 創建新的產品（尚無組成）
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            compositions: Vec::new(),
        }
    }

    /// 建構器模式：加入組成
    pub fn with_composition(mut self, material_id: MaterialId, required_quantity: Decimal) -> Self {
        self.add_composition(Composition::new(material_id, required_quantity));
        self
    }

    /// 添加組成
    pub fn add_composition(&mut self, composition: Composition) {
        self.compositions.push(composition);
    }

    /// 是否有任何組成
    pub fn has_compositions(&self) -> bool {
        !self.compositions.is_empty()
    }

    /// 產品是否使用指定原物料
    pub fn uses_material(&self, material_id: MaterialId) -> bool {
        self.compositions.iter().any(|c| c.material_id == material_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::from(5), true)]
    #[case(Decimal::new(1, 3), true)]
    #[case(Decimal::ZERO, false)]
    #[case(Decimal::from(-2), false)]
    fn test_is_constraining(#[case] required: Decimal, #[case] expected: bool) {
        let composition = Composition::new(MaterialId::new(1), required);
        assert_eq!(composition.is_constraining(), expected);
    }

    #[test]
    fn test_create_product() {
        let widget = Product::new(ProductId::new(1), "Widget", Decimal::from(50))
            .with_composition(MaterialId::new(1), Decimal::from(10));

        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.price, Decimal::from(50));
        assert!(widget.has_compositions());
        assert!(widget.uses_material(MaterialId::new(1)));
        assert!(!widget.uses_material(MaterialId::new(2)));
    }

    #[test]
    fn test_product_without_compositions() {
        let ghost = Product::new(ProductId::new(1), "Ghost Product", Decimal::from(999));
        assert!(!ghost.has_compositions());
        assert!(!ghost.uses_material(MaterialId::new(1)));
    }

    #[test]
    fn test_deserialize_without_compositions() {
        let product: Product =
            serde_json::from_str(r#"{"id":3,"name":"Bolt","price":"1.25"}"#).unwrap();

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Decimal::new(125, 2));
        assert!(product.compositions.is_empty());
    }
}
