//! Shipping quotes for the cart on screen.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use boxcart::{
    cart::MergedCart,
    packaging::ShippingBox,
    shipping::{ShippingPlan, ShippingRequest},
};

use super::{BoxInventory, ShippingError};

/// A box chosen for a cart, detached from the inventory it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ShippingQuote {
    /// What the cart needs.
    pub request: ShippingRequest,

    /// The chosen box.
    pub shipping_box: ShippingBox,

    /// False when no active box covers the cart and the largest was used.
    pub fits: bool,
}

impl ShippingQuote {
    /// Borrow as a plan, e.g. for [`boxcart::summary::write_shipping_plan`].
    pub fn as_plan(&self) -> ShippingPlan<'_> {
        ShippingPlan {
            request: self.request,
            shipping_box: &self.shipping_box,
            fits: self.fits,
        }
    }

    pub fn gross_weight_kg(&self) -> Decimal {
        self.as_plan().gross_weight_kg()
    }
}

/// Picks boxes for carts from a box inventory.
#[derive(Clone)]
pub struct ShippingService {
    inventory: Arc<dyn BoxInventory>,
}

impl ShippingService {
    pub fn new(inventory: Arc<dyn BoxInventory>) -> Self {
        Self { inventory }
    }

    /// Choose a box for `cart`. `None` when the cart is empty or there is no
    /// active box.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::Inventory`] when the inventory cannot be read.
    pub async fn quote(&self, cart: &MergedCart) -> Result<Option<ShippingQuote>, ShippingError> {
        if cart.is_empty() {
            return Ok(None);
        }

        let boxes = self.inventory.list_boxes().await?;
        let request = cart.shipping_request();

        let Some(shipping_box) = request.select(&boxes) else {
            warn!(boxes = boxes.len(), "no active shipping box");

            return Ok(None);
        };

        let fits = request.fits(shipping_box);

        debug!(
            box_id = %shipping_box.id,
            volume_mm3 = request.total_volume_mm3,
            weight_kg = %request.total_weight_kg,
            fits,
            "selected shipping box"
        );

        Ok(Some(ShippingQuote {
            request,
            shipping_box: shipping_box.clone(),
            fits,
        }))
    }
}
