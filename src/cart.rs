//! Cart views
//!
//! A device keeps a local cart; an authenticated user also has a server cart.
//! [`merge`] combines both into the single view shown to the user. The server
//! copy of a product wins over the local one, and no product ever appears on
//! two lines.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

use crate::{
    items::{CartLineItem, LineId, LineOrigin},
    products::ProductUuid,
    shipping::ShippingRequest,
};

/// How a merged view was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewSource {
    /// Anonymous session, local cart only.
    LocalOnly,

    /// Local and server carts merged.
    Merged,

    /// Authenticated, but the server cart could not be read.
    Degraded,
}

/// A line in a merged view.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedLine {
    /// Which cart the line came from.
    pub origin: LineOrigin,

    /// The line itself.
    pub item: CartLineItem,
}

/// The cart as shown to the user. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedCart {
    lines: Vec<MergedLine>,
    source: ViewSource,
}

impl Default for MergedCart {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            source: ViewSource::LocalOnly,
        }
    }
}

/// Merge a local and a server cart.
///
/// Server lines come first, in server order. Local lines follow for products
/// the server does not have. Repeated products inside one cart are folded
/// into their first line with quantities summed.
pub fn merge(local: &[CartLineItem], server: &[CartLineItem]) -> MergedCart {
    let mut builder = ViewBuilder::default();

    for item in server {
        builder.fold(item, LineOrigin::Server);
    }

    let server_products = builder.index.clone();

    for item in local {
        if !server_products.contains_key(&item.product) {
            builder.fold(item, LineOrigin::Local);
        }
    }

    builder.finish(ViewSource::Merged)
}

#[derive(Default)]
struct ViewBuilder {
    lines: Vec<MergedLine>,
    index: FxHashMap<ProductUuid, usize>,
}

impl ViewBuilder {
    fn fold(&mut self, item: &CartLineItem, origin: LineOrigin) {
        if let Some(existing) = self
            .index
            .get(&item.product)
            .and_then(|&position| self.lines.get_mut(position))
        {
            existing.item.quantity = existing.item.quantity.saturating_add(item.quantity);

            return;
        }

        self.index.insert(item.product, self.lines.len());
        self.lines.push(MergedLine {
            origin,
            item: item.clone(),
        });
    }

    fn finish(self, source: ViewSource) -> MergedCart {
        MergedCart {
            lines: self.lines,
            source,
        }
    }
}

impl MergedCart {
    /// View of a local cart on its own.
    pub fn local_only(local: &[CartLineItem]) -> Self {
        Self::from_local(local, ViewSource::LocalOnly)
    }

    /// View of a local cart when the server cart could not be read.
    pub fn degraded(local: &[CartLineItem]) -> Self {
        Self::from_local(local, ViewSource::Degraded)
    }

    fn from_local(local: &[CartLineItem], source: ViewSource) -> Self {
        let mut builder = ViewBuilder::default();

        for item in local {
            builder.fold(item, LineOrigin::Local);
        }

        builder.finish(source)
    }

    /// How this view was produced.
    pub fn source(&self) -> ViewSource {
        self.source
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &MergedLine> {
        self.lines.iter()
    }

    /// Iterate over the line items without origins.
    pub fn items(&self) -> impl Iterator<Item = &CartLineItem> {
        self.lines.iter().map(|line| &line.item)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for the given product.
    pub fn find_product(&self, product: ProductUuid) -> Option<&MergedLine> {
        self.lines.iter().find(|line| line.item.product == product)
    }

    /// Line for the given catalog code.
    pub fn find_code(&self, code: &str) -> Option<&MergedLine> {
        self.lines.iter().find(|line| line.item.code == code)
    }

    /// Total number of units, as shown on a cart badge.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.item.quantity))
            .sum()
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, line| {
                total.saturating_add(line.item.line_total())
            })
    }

    /// Subtotal in the given currency.
    pub fn subtotal_money(&self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_decimal(self.subtotal(), currency)
    }

    /// What shipping this cart needs.
    pub fn shipping_request(&self) -> ShippingRequest {
        ShippingRequest::from_lines(self.items())
    }

    /// Apply an added quantity ahead of any server confirmation.
    pub fn apply_add(&mut self, item: &CartLineItem, quantity: u32) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.item.product == item.product)
        {
            line.item.quantity = line.item.quantity.saturating_add(quantity);

            return;
        }

        self.lines.push(MergedLine {
            origin: LineOrigin::Local,
            item: item.clone().with_quantity(quantity),
        });
    }

    /// Apply a quantity change ahead of any server confirmation. Zero
    /// removes the line.
    ///
    /// Returns whether the view had a line for the product.
    pub fn apply_quantity(&mut self, product: ProductUuid, quantity: u32) -> bool {
        if quantity == 0 {
            let before = self.lines.len();
            self.lines.retain(|line| line.item.product != product);

            return self.lines.len() != before;
        }

        match self
            .lines
            .iter_mut()
            .find(|line| line.item.product == product)
        {
            Some(line) => {
                line.item.quantity = quantity;
                true
            }
            None => false,
        }
    }
}

/// Add `quantity` of `item` to a local cart.
///
/// An existing line for the product is incremented; otherwise a new line
/// with a fresh placeholder id is appended. Returns the resulting line.
pub fn add_to_local(
    lines: &mut Vec<CartLineItem>,
    item: &CartLineItem,
    quantity: u32,
) -> CartLineItem {
    if let Some(line) = lines.iter_mut().find(|line| line.product == item.product) {
        line.quantity = line.quantity.saturating_add(quantity);

        return line.clone();
    }

    let line = item
        .clone()
        .with_id(LineId::placeholder())
        .with_quantity(quantity);

    lines.push(line.clone());

    line
}

/// Set the quantity of a product in a local cart. Zero removes it.
///
/// Returns whether a line for the product was present.
pub fn set_local_quantity(
    lines: &mut Vec<CartLineItem>,
    product: ProductUuid,
    quantity: u32,
) -> bool {
    if quantity == 0 {
        let before = lines.len();
        lines.retain(|line| line.product != product);

        return lines.len() != before;
    }

    match lines.iter_mut().find(|line| line.product == product) {
        Some(line) => {
            line.quantity = quantity;
            true
        }
        None => false,
    }
}
