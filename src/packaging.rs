//! Packaging

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::Dimensions;

/// Shipping box id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxId(pub u64);

impl Display for BoxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// A packaging SKU that orders can ship in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingBox {
    /// Box id
    pub id: BoxId,

    /// Human readable label, e.g. "Medium carton".
    pub label: String,

    /// Inner dimensions
    pub dimensions: Dimensions,

    /// Maximum content weight in kilograms.
    pub max_weight_kg: Decimal,

    /// Empty box weight in kilograms. Not used when choosing a box.
    #[serde(default)]
    pub tare_weight_kg: Decimal,

    /// Inactive boxes are never selected.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ShippingBox {
    /// Inner volume in cubic millimetres.
    pub fn volume_mm3(&self) -> u64 {
        self.dimensions.volume_mm3()
    }
}
