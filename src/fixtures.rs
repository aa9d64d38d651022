//! Fixtures
//!
//! YAML files describing a box inventory and a product catalog.
//!
//! ```yaml
//! boxes:
//!   - id: 1
//!     label: Small carton
//!     dimensions: { length_mm: 100, width_mm: 100, height_mm: 100 }
//!     max_weight_kg: 5
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    items::{CartLineItem, DEFAULT_UNIT_WEIGHT_KG, LineId},
    packaging::ShippingBox,
    products::{Dimensions, ProductUuid, product_uuid_from_code},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Box inventory file.
#[derive(Debug, Deserialize)]
pub struct BoxesFixture {
    /// Boxes, in inventory order.
    pub boxes: Vec<ShippingBox>,
}

/// Load boxes from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_boxes(path: impl AsRef<Path>) -> Result<Vec<ShippingBox>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_boxes(&contents)
}

/// Parse boxes from YAML.
///
/// # Errors
///
/// Returns an error if the YAML is not a valid box inventory.
pub fn parse_boxes(yaml: &str) -> Result<Vec<ShippingBox>, FixtureError> {
    let fixture: BoxesFixture = serde_norway::from_str(yaml)?;

    Ok(fixture.boxes)
}

/// Catalog product from YAML.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogProduct {
    /// Explicit product id; derived from the code when omitted.
    #[serde(default)]
    pub uuid: Option<ProductUuid>,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Unit weight in kilograms.
    #[serde(default)]
    pub weight_kg: Option<Decimal>,

    /// Unit dimensions
    pub dimensions: Dimensions,
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: FxHashMap<String, CatalogProduct>,
}

/// Product catalog keyed by code.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: FxHashMap<String, CatalogProduct>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is not a valid catalog.
    pub fn parse(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        Ok(Self {
            products: fixture.products,
        })
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Build a new local cart line for the product with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] for unknown codes.
    pub fn line_item(&self, code: &str, quantity: u32) -> Result<CartLineItem, FixtureError> {
        let product = self
            .products
            .get(code)
            .ok_or_else(|| FixtureError::ProductNotFound(code.to_string()))?;

        Ok(CartLineItem {
            id: LineId::placeholder(),
            product: product
                .uuid
                .unwrap_or_else(|| product_uuid_from_code(code)),
            name: product.name.clone(),
            code: code.to_string(),
            unit_price: product.price,
            quantity,
            unit_weight_kg: product.weight_kg.unwrap_or(DEFAULT_UNIT_WEIGHT_KG),
            dimensions: product.dimensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::packaging::BoxId;

    use super::*;

    #[test]
    fn parses_boxes_with_defaults() -> TestResult {
        let yaml = r"
boxes:
  - id: 1
    label: Small carton
    dimensions: { length_mm: 100, width_mm: 100, height_mm: 100 }
    max_weight_kg: 5
  - id: 2
    label: Retired crate
    dimensions: { length_mm: 400, width_mm: 300, height_mm: 300 }
    max_weight_kg: 30
    tare_weight_kg: 1.2
    active: false
";

        let boxes = parse_boxes(yaml)?;

        assert_eq!(boxes.len(), 2);

        let small = boxes.first().ok_or("missing first box")?;
        assert_eq!(small.id, BoxId(1));
        assert!(small.active);
        assert_eq!(small.tare_weight_kg, Decimal::ZERO);

        let retired = boxes.get(1).ok_or("missing second box")?;
        assert!(!retired.active);
        assert_eq!(retired.tare_weight_kg, dec!(1.2));

        Ok(())
    }

    #[test]
    fn catalog_builds_line_items() -> TestResult {
        let yaml = r"
products:
  BRG-6204:
    name: Deep groove bearing 6204
    price: 4.75
    weight_kg: 0.11
    dimensions: { length_mm: 47, width_mm: 47, height_mm: 14 }
  CLM-M8:
    name: Toggle clamp M8
    price: 12.40
    dimensions: { length_mm: 120, width_mm: 40, height_mm: 60 }
";

        let catalog = Catalog::parse(yaml)?;

        assert_eq!(catalog.len(), 2);

        let bearing = catalog.line_item("BRG-6204", 3)?;
        assert_eq!(bearing.quantity, 3);
        assert_eq!(bearing.unit_price, dec!(4.75));
        assert_eq!(bearing.product, product_uuid_from_code("BRG-6204"));
        assert!(bearing.id.is_placeholder());

        let clamp = catalog.line_item("CLM-M8", 1)?;
        assert_eq!(clamp.unit_weight_kg, dec!(0.5));

        Ok(())
    }

    #[test]
    fn catalog_rejects_unknown_code() -> TestResult {
        let catalog = Catalog::parse("products: {}")?;

        let result = catalog.line_item("NOPE", 1);

        assert!(
            matches!(result, Err(FixtureError::ProductNotFound(ref code)) if code == "NOPE"),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }
}
