//! 目錄快照（匯入/匯出）

use planner_core::{Composition, PlannerError, Product, RawMaterial, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::store::{next_id, InventoryStore, ProductView};
use crate::validation;

/// 目錄快照
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub materials: Vec<RawMaterial>,
    pub products: Vec<ProductView>,
}

impl CatalogSnapshot {
    /// 從 JSON 載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl InventoryStore {
    /// 取得目前內容的快照
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            materials: self.list_materials(),
            products: self.list_products(),
        }
    }

    /// 由快照重建儲存（保留原ID，逐筆驗證）
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        let mut store = Self::new();

        for material in snapshot.materials {
            validation::validate_material(&material.name, material.stock_quantity)?;
            if store.materials.contains_key(&material.id) {
                return Err(PlannerError::validation(format!(
                    "Duplicate raw material id: {}",
                    material.id
                )));
            }
            let after = next_id(material.id.value(), "Raw material")?;
            store.next_material_id = store.next_material_id.max(after);
            store.materials.insert(material.id, material);
        }

        let mut composition_ids = HashSet::new();
        for view in snapshot.products {
            validation::validate_product(&view.name, view.price)?;
            if store.products.contains_key(&view.id) {
                return Err(PlannerError::validation(format!(
                    "Duplicate product id: {}",
                    view.id
                )));
            }

            let mut product = Product::new(view.id, view.name, view.price);
            for composition in view.compositions {
                store.get_material(composition.raw_material_id)?;
                validation::require_positive_quantity(composition.required_quantity)?;
                if product.uses_material(composition.raw_material_id) {
                    return Err(PlannerError::validation(format!(
                        "Raw material '{}' is already associated with this product",
                        composition.raw_material_name
                    )));
                }
                if !composition_ids.insert(composition.id) {
                    return Err(PlannerError::validation(format!(
                        "Duplicate composition id: {}",
                        composition.id
                    )));
                }

                let after = next_id(composition.id.value(), "Composition")?;
                store.next_composition_id = store.next_composition_id.max(after);
                product.add_composition(
                    Composition::new(composition.raw_material_id, composition.required_quantity)
                        .with_id(composition.id),
                );
            }

            let after = next_id(view.id.value(), "Product")?;
            store.next_product_id = store.next_product_id.max(after);
            store.products.insert(product.id, product);
        }

        tracing::info!(
            "由快照載入：原物料 {} 項，產品 {} 項",
            store.materials.len(),
            store.products.len()
        );

        Ok(store)
    }
}
