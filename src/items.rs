//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    products::{Dimensions, ProductUuid},
    uuids::TypedUuid,
};

/// Marker for line ids generated on the device.
#[derive(Debug)]
pub enum LocalLine {}

/// Marker for line ids assigned by the cart server.
#[derive(Debug)]
pub enum ServerLine {}

/// Placeholder id for a line the server has never acknowledged.
pub type LocalLineUuid = TypedUuid<LocalLine>;

/// Line id assigned by the cart server.
pub type ServerLineUuid = TypedUuid<ServerLine>;

/// Identifier of a cart line.
///
/// Serialised externally tagged so the kind survives local storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineId {
    /// Local-only placeholder.
    Local(LocalLineUuid),

    /// Server-known line.
    Server(ServerLineUuid),
}

impl LineId {
    /// Generate a fresh local placeholder id.
    #[must_use]
    pub fn placeholder() -> Self {
        LineId::Local(LocalLineUuid::now_v7())
    }

    /// The server id, if the server knows this line.
    pub fn server_id(&self) -> Option<ServerLineUuid> {
        match self {
            LineId::Server(uuid) => Some(*uuid),
            LineId::Local(_) => None,
        }
    }

    /// Whether this is a local-only placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, LineId::Local(_))
    }
}

/// Where a line in a merged view came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineOrigin {
    /// The device's local cart.
    Local,

    /// The authenticated user's server cart.
    Server,
}

/// Unit weight used when the source data has none.
pub const DEFAULT_UNIT_WEIGHT_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

fn default_unit_weight() -> Decimal {
    DEFAULT_UNIT_WEIGHT_KG
}

/// One product line in a cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Line id; a placeholder until the server assigns one.
    pub id: LineId,

    /// Product on this line.
    pub product: ProductUuid,

    /// Display name
    pub name: String,

    /// Catalog code
    pub code: String,

    /// Unit price in currency units.
    pub unit_price: Decimal,

    /// Quantity, at least 1 in a well-formed cart.
    pub quantity: u32,

    /// Weight of one unit in kilograms.
    #[serde(default = "default_unit_weight")]
    pub unit_weight_kg: Decimal,

    /// Outer dimensions of one unit.
    pub dimensions: Dimensions,
}

impl CartLineItem {
    /// Volume of one unit in cubic millimetres.
    pub fn unit_volume_mm3(&self) -> u64 {
        self.dimensions.volume_mm3()
    }

    /// Volume of the whole line.
    pub fn line_volume_mm3(&self) -> u64 {
        self.unit_volume_mm3()
            .saturating_mul(u64::from(self.quantity))
    }

    /// Weight of the whole line in kilograms.
    pub fn line_weight_kg(&self) -> Decimal {
        self.unit_weight_kg
            .saturating_mul(Decimal::from(self.quantity))
    }

    /// Price of the whole line.
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Same line with a different quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Same line with a different id.
    #[must_use]
    pub fn with_id(mut self, id: LineId) -> Self {
        self.id = id;
        self
    }
}
