//! Shipping box selection
//!
//! First-fit by ascending volume: the smallest active box whose volume and
//! weight capacity both cover the cart wins. When nothing covers it, the
//! largest active box is returned and splitting the order into several
//! parcels is left to fulfilment.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{items::CartLineItem, packaging::ShippingBox};

/// Aggregate volume and weight a cart needs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShippingRequest {
    /// Sum of unit volume times quantity, in cubic millimetres.
    pub total_volume_mm3: u64,

    /// Sum of unit weight times quantity, in kilograms.
    pub total_weight_kg: Decimal,
}

impl ShippingRequest {
    /// Aggregate the given lines.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a CartLineItem>) -> Self {
        lines
            .into_iter()
            .fold(Self::default(), |request, line| Self {
                total_volume_mm3: request
                    .total_volume_mm3
                    .saturating_add(line.line_volume_mm3()),
                total_weight_kg: request
                    .total_weight_kg
                    .saturating_add(line.line_weight_kg()),
            })
    }

    /// Whether the box covers both the volume and the weight.
    pub fn fits(&self, shipping_box: &ShippingBox) -> bool {
        shipping_box.volume_mm3() >= self.total_volume_mm3
            && shipping_box.max_weight_kg >= self.total_weight_kg
    }

    /// Pick a box for this request from the given inventory.
    ///
    /// Returns `None` only when there is no active box.
    pub fn select<'b>(&self, boxes: &'b [ShippingBox]) -> Option<&'b ShippingBox> {
        let candidates = active_by_volume(boxes);

        candidates
            .iter()
            .copied()
            .find(|candidate| self.fits(candidate))
            .or_else(|| candidates.last().copied())
    }
}

/// Active boxes, smallest volume first, input order kept between equals.
fn active_by_volume(boxes: &[ShippingBox]) -> SmallVec<[&ShippingBox; 8]> {
    let mut candidates: SmallVec<[&ShippingBox; 8]> =
        boxes.iter().filter(|candidate| candidate.active).collect();

    // `sort_by_key` is stable
    candidates.sort_by_key(|candidate| candidate.volume_mm3());

    candidates
}

/// Select the box to ship the given lines in.
///
/// Returns `None` when there are no lines or no active boxes. When no active
/// box fits, the largest one is returned; use [`plan_shipment`] to find out
/// whether the choice actually fits.
pub fn select_box<'b>(
    lines: &[CartLineItem],
    boxes: &'b [ShippingBox],
) -> Option<&'b ShippingBox> {
    if lines.is_empty() {
        return None;
    }

    ShippingRequest::from_lines(lines).select(boxes)
}

/// A box choice together with what it was chosen for.
#[derive(Clone, Debug, PartialEq)]
pub struct ShippingPlan<'b> {
    /// What the cart needs.
    pub request: ShippingRequest,

    /// The chosen box.
    pub shipping_box: &'b ShippingBox,

    /// False when the box is only the largest fallback.
    pub fits: bool,
}

impl ShippingPlan<'_> {
    /// Content weight plus the box's own weight.
    pub fn gross_weight_kg(&self) -> Decimal {
        self.request
            .total_weight_kg
            .saturating_add(self.shipping_box.tare_weight_kg)
    }

    /// Whether the order may need more than one parcel.
    pub fn needs_split(&self) -> bool {
        !self.fits
    }
}

/// Select a box and report whether the cart fits in it.
pub fn plan_shipment<'b>(
    lines: &[CartLineItem],
    boxes: &'b [ShippingBox],
) -> Option<ShippingPlan<'b>> {
    if lines.is_empty() {
        return None;
    }

    let request = ShippingRequest::from_lines(lines);
    let shipping_box = request.select(boxes)?;

    Some(ShippingPlan {
        request,
        shipping_box,
        fits: request.fits(shipping_box),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        items::LineId,
        packaging::BoxId,
        products::{Dimensions, product_uuid_from_code},
    };

    use super::*;

    fn carton(id: u64, side_mm: u32, max_weight_kg: Decimal) -> ShippingBox {
        ShippingBox {
            id: BoxId(id),
            label: format!("Carton {id}"),
            dimensions: Dimensions::cube(side_mm),
            max_weight_kg,
            tare_weight_kg: dec!(0.2),
            active: true,
        }
    }

    fn line(side_mm: u32, weight_kg: Decimal, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: LineId::placeholder(),
            product: product_uuid_from_code(&format!("PART-{side_mm}")),
            name: "Part".to_string(),
            code: format!("PART-{side_mm}"),
            unit_price: dec!(1),
            quantity,
            unit_weight_kg: weight_kg,
            dimensions: Dimensions::cube(side_mm),
        }
    }

    #[test]
    fn request_multiplies_by_quantity() {
        let lines = [line(10, dec!(0.25), 3), line(20, dec!(1), 2)];

        let request = ShippingRequest::from_lines(&lines);

        assert_eq!(request.total_volume_mm3, 3 * 1_000 + 2 * 8_000);
        assert_eq!(request.total_weight_kg, dec!(2.75));
    }

    #[test]
    fn selects_second_box_for_the_reference_scenario() {
        let boxes = [carton(1, 100, dec!(5)), carton(2, 200, dec!(20))];
        let lines = [line(150, dec!(3), 1)];

        let selected = select_box(&lines, &boxes).map(|b| b.id);

        assert_eq!(selected, Some(BoxId(2)));
    }

    #[test]
    fn empty_cart_selects_nothing() {
        let boxes = [carton(1, 100, dec!(5))];

        assert_eq!(select_box(&[], &boxes), None);
    }

    #[test]
    fn no_boxes_selects_nothing() {
        assert_eq!(select_box(&[line(10, dec!(1), 1)], &[]), None);
    }

    #[test]
    fn only_inactive_boxes_selects_nothing() {
        let mut inactive = carton(1, 500, dec!(50));
        inactive.active = false;

        assert_eq!(select_box(&[line(10, dec!(1), 1)], &[inactive]), None);
    }

    #[test]
    fn input_order_does_not_matter_for_fit() {
        let boxes = [
            carton(3, 300, dec!(30)),
            carton(1, 100, dec!(5)),
            carton(2, 200, dec!(20)),
        ];

        let selected = select_box(&[line(50, dec!(1), 1)], &boxes).map(|b| b.id);

        assert_eq!(selected, Some(BoxId(1)));
    }

    #[test]
    fn equal_volumes_prefer_input_order() {
        let boxes = [carton(7, 100, dec!(5)), carton(8, 100, dec!(5))];

        let selected = select_box(&[line(50, dec!(1), 1)], &boxes).map(|b| b.id);

        assert_eq!(selected, Some(BoxId(7)));
    }

    #[test]
    fn degenerate_lines_fit_the_smallest_box() {
        let boxes = [carton(2, 200, dec!(20)), carton(1, 100, dec!(5))];

        let selected = select_box(&[line(0, dec!(0), 5)], &boxes).map(|b| b.id);

        assert_eq!(selected, Some(BoxId(1)));
    }

    #[test]
    fn plan_reports_overflow_on_fallback() -> TestResult {
        let boxes = [carton(1, 100, dec!(5)), carton(2, 200, dec!(20))];
        let lines = [line(150, dec!(3), 4)];

        let plan = plan_shipment(&lines, &boxes).ok_or("expected a plan")?;

        assert_eq!(plan.shipping_box.id, BoxId(2));
        assert!(!plan.fits, "four 150mm cubes cannot fit a 200mm carton");
        assert!(plan.needs_split());
        assert_eq!(plan.gross_weight_kg(), dec!(12.2));

        Ok(())
    }

    #[test]
    fn plan_reports_fit() -> TestResult {
        let boxes = [carton(1, 100, dec!(5))];
        let lines = [line(50, dec!(1), 2)];

        let plan = plan_shipment(&lines, &boxes).ok_or("expected a plan")?;

        assert!(plan.fits, "two 50mm cubes fit a 100mm carton");

        Ok(())
    }
}
