//! Merging device and account carts.

use rust_decimal_macros::dec;
use testresult::TestResult;

use boxcart::prelude::*;

fn local(code: &str, quantity: u32) -> CartLineItem {
    CartLineItem {
        id: LineId::placeholder(),
        product: product_uuid_from_code(code),
        name: format!("Part {code}"),
        code: code.to_string(),
        unit_price: dec!(1.99),
        quantity,
        unit_weight_kg: dec!(0.2),
        dimensions: Dimensions::new(60, 40, 20),
    }
}

fn server(code: &str, quantity: u32) -> CartLineItem {
    local(code, quantity).with_id(LineId::Server(ServerLineUuid::now_v7()))
}

fn assert_unique_products(cart: &MergedCart) {
    let mut products: Vec<_> = cart.items().map(|item| item.product).collect();
    let total = products.len();

    products.sort();
    products.dedup();

    assert_eq!(products.len(), total, "duplicate product lines in {cart:?}");
}

#[test]
fn no_duplicate_products_for_any_overlap() {
    let codes = ["A", "B", "C", "D"];

    // every subset of codes on each side
    for local_mask in 0_u8..16 {
        for server_mask in 0_u8..16 {
            let pick = |mask: u8, make: fn(&str, u32) -> CartLineItem| {
                codes
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, code)| make(code, 1))
                    .collect::<Vec<_>>()
            };

            let merged = merge(&pick(local_mask, local), &pick(server_mask, server));

            assert_unique_products(&merged);
            assert_eq!(
                merged.len(),
                (local_mask | server_mask).count_ones() as usize,
                "local {local_mask:04b} server {server_mask:04b}"
            );
        }
    }
}

#[test]
fn merging_with_empty_local_is_identity_on_server() {
    let server_lines = vec![server("A", 3), server("B", 1)];

    let merged = merge(&[], &server_lines);

    assert_eq!(merged.items().cloned().collect::<Vec<_>>(), server_lines);
}

#[test]
fn merging_with_empty_server_is_identity_on_local() {
    let local_lines = vec![local("A", 3), local("B", 1)];

    let merged = merge(&local_lines, &[]);

    assert_eq!(merged.items().cloned().collect::<Vec<_>>(), local_lines);
    assert!(
        merged.iter().all(|line| line.origin == LineOrigin::Local),
        "all lines came from the device"
    );
}

#[test]
fn server_quantity_wins_and_keeps_server_id() -> TestResult {
    let account = server("A", 2);
    let merged = merge(&[local("A", 7)], std::slice::from_ref(&account));

    let line = merged
        .find_product(product_uuid_from_code("A"))
        .ok_or("expected line A")?;

    assert_eq!(line.item.quantity, 2);
    assert_eq!(line.item.id, account.id);
    assert_eq!(line.origin, LineOrigin::Server);

    Ok(())
}

#[test]
fn local_lines_keep_their_placeholders() -> TestResult {
    let merged = merge(&[local("B", 1)], &[server("A", 1)]);

    let line = merged.find_code("B").ok_or("expected line B")?;

    assert!(line.item.id.is_placeholder());

    Ok(())
}
