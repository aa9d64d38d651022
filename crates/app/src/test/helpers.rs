//! Test Helpers

use rust_decimal_macros::dec;
use tokio::sync::broadcast::Receiver;
use uuid::Uuid;

use boxcart::{
    items::{CartLineItem, LineId, ServerLineUuid},
    products::{Dimensions, product_uuid_from_code},
};

use crate::{domain::carts::events::CartEvent, session::UserUuid};

pub(crate) fn user() -> UserUuid {
    UserUuid::from_uuid(Uuid::from_u128(0x0199_2f6e_3c00_7000_8000_0000_0000_0001))
}

/// A product as it comes off the catalog, before it is in any cart.
pub(crate) fn catalog_line(code: &str) -> CartLineItem {
    CartLineItem {
        id: LineId::placeholder(),
        product: product_uuid_from_code(code),
        name: format!("Part {code}"),
        code: code.to_string(),
        unit_price: dec!(4.75),
        quantity: 1,
        unit_weight_kg: dec!(0.4),
        dimensions: Dimensions::new(80, 60, 40),
    }
}

pub(crate) fn local_line(code: &str, quantity: u32) -> CartLineItem {
    catalog_line(code).with_quantity(quantity)
}

pub(crate) fn server_line(code: &str, quantity: u32) -> CartLineItem {
    local_line(code, quantity).with_id(LineId::Server(ServerLineUuid::now_v7()))
}

/// Events published so far, oldest first.
pub(crate) fn drain_events(receiver: &mut Receiver<CartEvent>) -> Vec<CartEvent> {
    let mut events = Vec::new();

    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }

    events
}
