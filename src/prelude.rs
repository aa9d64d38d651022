//! boxcart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{MergedCart, MergedLine, ViewSource, add_to_local, merge, set_local_quantity},
    fixtures::{Catalog, CatalogProduct, FixtureError, load_boxes},
    items::{CartLineItem, LineId, LineOrigin, LocalLineUuid, ServerLineUuid},
    packaging::{BoxId, ShippingBox},
    products::{Dimensions, ProductUuid, product_uuid_from_code},
    shipping::{ShippingPlan, ShippingRequest, plan_shipment, select_box},
    summary::{SummaryError, write_cart, write_shipping_plan},
    uuids::TypedUuid,
};
