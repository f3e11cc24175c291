//! 記憶體儲存

use planner_core::{
    CatalogReader, Composition, CompositionId, MaterialId, PlannerError, Product, ProductId,
    RawMaterial, Result, StockReader,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::validation;

/// 新增/修改原物料的輸入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRawMaterial {
    pub name: String,
    pub stock_quantity: Decimal,
}

impl NewRawMaterial {
    pub fn new(name: impl Into<String>, stock_quantity: Decimal) -> Self {
        Self {
            name: name.into(),
            stock_quantity,
        }
    }
}

/// 新增組成的輸入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComposition {
    pub raw_material_id: MaterialId,
    pub quantity: Decimal,
}

impl NewComposition {
    pub fn new(raw_material_id: MaterialId, quantity: Decimal) -> Self {
        Self {
            raw_material_id,
            quantity,
        }
    }
}

/// 新增產品的輸入（可附帶初始組成）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub compositions: Vec<NewComposition>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            compositions: Vec::new(),
        }
    }

    /// 建構器模式：加入組成
    pub fn with_composition(mut self, raw_material_id: MaterialId, quantity: Decimal) -> Self {
        self.compositions
            .push(NewComposition::new(raw_material_id, quantity));
        self
    }
}

/// 修改產品的輸入（只含名稱與單價）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub price: Decimal,
}

impl ProductUpdate {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// 組成檢視（含原物料名稱）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionView {
    pub id: CompositionId,
    pub raw_material_id: MaterialId,
    pub raw_material_name: String,
    pub required_quantity: Decimal,
}

/// 產品檢視
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub compositions: Vec<CompositionView>,
}

/// 原物料與產品目錄儲存
///
/// ID 由 1 開始依序配發，刪除後不重複使用。
#[derive(Debug, Clone)]
pub struct InventoryStore {
    pub(crate) materials: BTreeMap<MaterialId, RawMaterial>,
    pub(crate) products: BTreeMap<ProductId, Product>,
    pub(crate) next_material_id: u64,
    pub(crate) next_product_id: u64,
    pub(crate) next_composition_id: u64,
}

/// 計數器的下一個值；已達 u64 上限時回傳驗證錯誤
pub(crate) fn next_id(id: u64, entity: &str) -> Result<u64> {
    id.checked_add(1)
        .ok_or_else(|| PlannerError::validation(format!("{} id out of range: {}", entity, id)))
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    /// 創建空的儲存
    pub fn new() -> Self {
        Self {
            materials: BTreeMap::new(),
            products: BTreeMap::new(),
            next_material_id: 1,
            next_product_id: 1,
            next_composition_id: 1,
        }
    }

    // ========== 原物料 ==========

    /// 所有原物料（依ID排序）
    pub fn list_materials(&self) -> Vec<RawMaterial> {
        self.materials.values().cloned().collect()
    }

    /// 查詢原物料
    pub fn get_material(&self, id: MaterialId) -> Result<&RawMaterial> {
        self.materials
            .get(&id)
            .ok_or(PlannerError::MaterialNotFound(id))
    }

    /// 新增原物料
    pub fn create_material(&mut self, input: NewRawMaterial) -> Result<RawMaterial> {
        validation::validate_material(&input.name, input.stock_quantity)?;

        let id = MaterialId::new(self.next_material_id);
        self.next_material_id = next_id(self.next_material_id, "Raw material")?;

        let material = RawMaterial::new(id, input.name, input.stock_quantity);
        self.materials.insert(id, material.clone());

        tracing::debug!(
            "新增原物料 {} ({})，庫存 {}",
            material.name,
            id,
            material.stock_quantity
        );
        Ok(material)
    }

    /// 修改原物料名稱與庫存
    pub fn update_material(
        &mut self,
        id: MaterialId,
        input: NewRawMaterial,
    ) -> Result<RawMaterial> {
        validation::validate_material(&input.name, input.stock_quantity)?;

        let material = self
            .materials
            .get_mut(&id)
            .ok_or(PlannerError::MaterialNotFound(id))?;
        material.name = input.name;
        material.stock_quantity = input.stock_quantity;

        tracing::debug!("修改原物料 {}，庫存 {}", id, material.stock_quantity);
        Ok(material.clone())
    }

    /// 刪除原物料（仍被產品使用時拒絕）
    pub fn delete_material(&mut self, id: MaterialId) -> Result<()> {
        let material = self.get_material(id)?;

        if let Some(product) = self.products.values().find(|p| p.uses_material(id)) {
            return Err(PlannerError::validation(format!(
                "Raw material '{}' is used by product '{}'",
                material.name, product.name
            )));
        }

        self.materials.remove(&id);
        tracing::debug!("刪除原物料 {}", id);
        Ok(())
    }

    // ========== 產品 ==========

    /// 所有產品（依單價由高至低，同價依建立順序）
    pub fn list_products(&self) -> Vec<ProductView> {
        self.products_by_price()
            .into_iter()
            .map(|p| self.to_view(p))
            .collect()
    }

    /// 查詢產品
    pub fn get_product(&self, id: ProductId) -> Result<ProductView> {
        self.products
            .get(&id)
            .map(|p| self.to_view(p))
            .ok_or(PlannerError::ProductNotFound(id))
    }

    /// 新增產品
    pub fn create_product(&mut self, input: NewProduct) -> Result<ProductView> {
        validation::validate_product(&input.name, input.price)?;

        let mut seen: Vec<MaterialId> = Vec::with_capacity(input.compositions.len());
        for composition in &input.compositions {
            let material = self.check_composition(composition)?;
            if seen.contains(&material.id) {
                return Err(Self::duplicate_material(material));
            }
            seen.push(material.id);
        }

        // 先確認所有ID都配得出來，再更新計數器
        let id = ProductId::new(self.next_product_id);
        let next_product_id = next_id(self.next_product_id, "Product")?;
        let mut next_composition_id = self.next_composition_id;
        let mut product = Product::new(id, input.name, input.price);
        for composition in input.compositions {
            let composition_id = CompositionId::new(next_composition_id);
            next_composition_id = next_id(next_composition_id, "Composition")?;
            product.add_composition(
                Composition::new(composition.raw_material_id, composition.quantity)
                    .with_id(composition_id),
            );
        }
        self.next_product_id = next_product_id;
        self.next_composition_id = next_composition_id;

        tracing::debug!(
            "新增產品 {} ({})，組成 {} 項",
            product.name,
            id,
            product.compositions.len()
        );

        let view = self.to_view(&product);
        self.products.insert(id, product);
        Ok(view)
    }

    /// 修改產品名稱與單價（組成不變）
    pub fn update_product(&mut self, id: ProductId, input: ProductUpdate) -> Result<ProductView> {
        if !self.products.contains_key(&id) {
            return Err(PlannerError::ProductNotFound(id));
        }
        validation::validate_product(&input.name, input.price)?;

        let product = self
            .products
            .get_mut(&id)
            .ok_or(PlannerError::ProductNotFound(id))?;
        product.name = input.name;
        product.price = input.price;

        tracing::debug!("修改產品 {}，單價 {}", id, product.price);
        self.get_product(id)
    }

    /// 刪除產品（連同其組成）
    pub fn delete_product(&mut self, id: ProductId) -> Result<()> {
        self.products
            .remove(&id)
            .ok_or(PlannerError::ProductNotFound(id))?;

        tracing::debug!("刪除產品 {}", id);
        Ok(())
    }

    /// 為產品加入組成（同一原物料只能出現一次）
    pub fn add_composition(
        &mut self,
        product_id: ProductId,
        input: NewComposition,
    ) -> Result<CompositionView> {
        let product = self
            .products
            .get(&product_id)
            .ok_or(PlannerError::ProductNotFound(product_id))?;
        let material = self.check_composition(&input)?;

        if product.uses_material(material.id) {
            return Err(Self::duplicate_material(material));
        }

        let material_name = material.name.clone();
        let composition_id = self.allocate_composition_id()?;
        let composition =
            Composition::new(input.raw_material_id, input.quantity).with_id(composition_id);

        let product = self
            .products
            .get_mut(&product_id)
            .ok_or(PlannerError::ProductNotFound(product_id))?;
        product.add_composition(composition);

        tracing::debug!(
            "產品 {} 加入組成 {}：原物料 {} × {}",
            product_id,
            composition_id,
            input.raw_material_id,
            input.quantity
        );

        Ok(CompositionView {
            id: composition_id,
            raw_material_id: input.raw_material_id,
            raw_material_name: material_name,
            required_quantity: input.quantity,
        })
    }

    /// 移除產品的組成
    pub fn remove_composition(
        &mut self,
        product_id: ProductId,
        composition_id: CompositionId,
    ) -> Result<()> {
        if !self.products.contains_key(&product_id) {
            return Err(PlannerError::ProductNotFound(product_id));
        }

        let owner = self
            .products
            .values()
            .find(|p| p.compositions.iter().any(|c| c.id == Some(composition_id)))
            .map(|p| p.id)
            .ok_or(PlannerError::CompositionNotFound(composition_id))?;

        if owner != product_id {
            return Err(PlannerError::validation(format!(
                "Composition does not belong to product with id: {}",
                product_id
            )));
        }

        if let Some(product) = self.products.get_mut(&product_id) {
            product.compositions.retain(|c| c.id != Some(composition_id));
        }

        tracing::debug!("產品 {} 移除組成 {}", product_id, composition_id);
        Ok(())
    }

    // ========== 內部 ==========

    fn products_by_price(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        products.sort_by(|a, b| b.price.cmp(&a.price));
        products
    }

    fn check_composition(&self, input: &NewComposition) -> Result<&RawMaterial> {
        let material = self.get_material(input.raw_material_id)?;
        validation::require_positive_quantity(input.quantity)?;
        Ok(material)
    }

    fn duplicate_material(material: &RawMaterial) -> PlannerError {
        PlannerError::validation(format!(
            "Raw material '{}' is already associated with this product",
            material.name
        ))
    }

    fn allocate_composition_id(&mut self) -> Result<CompositionId> {
        let id = CompositionId::new(self.next_composition_id);
        self.next_composition_id = next_id(self.next_composition_id, "Composition")?;
        Ok(id)
    }

    fn to_view(&self, product: &Product) -> ProductView {
        ProductView {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            compositions: product
                .compositions
                .iter()
                .filter_map(|c| {
                    Some(CompositionView {
                        id: c.id?,
                        raw_material_id: c.material_id,
                        raw_material_name: self
                            .materials
                            .get(&c.material_id)
                            .map(|m| m.name.clone())
                            .unwrap_or_default(),
                        required_quantity: c.required_quantity,
                    })
                })
                .collect(),
        }
    }
}

impl CatalogReader for InventoryStore {
    fn products(&self) -> Result<Vec<Product>> {
        Ok(self.products_by_price().into_iter().cloned().collect())
    }
}

impl StockReader for InventoryStore {
    fn stock_levels(&self) -> Result<HashMap<MaterialId, Decimal>> {
        Ok(self
            .materials
            .values()
            .map(|m| (m.id, m.stock_quantity))
            .collect())
    }
}
