//! Products

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Marker for product ids.
#[derive(Debug)]
pub enum Product {}

/// Product UUID, stable across local and server carts.
pub type ProductUuid = TypedUuid<Product>;

const PRODUCT_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_0a52_9d3e_4b8f_a5c4_2e71_b0d9_3f16);

/// Derive a stable product id from a catalog code.
///
/// The same code always yields the same id, so carts built on different
/// devices agree on product identity without a lookup.
pub fn product_uuid_from_code(code: &str) -> ProductUuid {
    ProductUuid::from_uuid(Uuid::new_v5(&PRODUCT_NAMESPACE, code.as_bytes()))
}

/// Outer dimensions in millimetres.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length (mm)
    pub length_mm: u32,

    /// Width (mm)
    pub width_mm: u32,

    /// Height (mm)
    pub height_mm: u32,
}

impl Dimensions {
    /// Create dimensions from length, width and height in millimetres.
    pub const fn new(length_mm: u32, width_mm: u32, height_mm: u32) -> Self {
        Self {
            length_mm,
            width_mm,
            height_mm,
        }
    }

    /// Same length on every side.
    pub const fn cube(side_mm: u32) -> Self {
        Self::new(side_mm, side_mm, side_mm)
    }

    /// Volume in cubic millimetres, saturating at `u64::MAX`.
    pub fn volume_mm3(&self) -> u64 {
        u64::from(self.length_mm)
            .saturating_mul(u64::from(self.width_mm))
            .saturating_mul(u64::from(self.height_mm))
    }
}
