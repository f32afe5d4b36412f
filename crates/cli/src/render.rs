//! Text rendering for products, carts and receipts.

use tinymart_core::CurrencyCode;
use tinymart_storefront::Cart;
use tinymart_storefront::models::{CartLine, Product, Receipt};

/// `[1001] Laptop - Electronics - ₹55000.00 (Stock: 7)`
pub fn product(product: &Product, currency: CurrencyCode) -> String {
    format!(
        "[{}] {} - {} - {} (Stock: {})",
        product.id,
        product.name,
        product.category,
        currency.format(product.price),
        product.stock
    )
}

/// `Laptop x 2 = ₹110000.00 [Product ID: 1001]`
pub fn cart_line(line: &CartLine, currency: CurrencyCode) -> String {
    format!(
        "{} x {} = {} [Product ID: {}]",
        line.name,
        line.quantity,
        currency.format(line.line_total()),
        line.product_id
    )
}

/// Numbered cart lines followed by the total row.
pub fn cart(cart: &Cart, currency: CurrencyCode) -> Vec<String> {
    let mut rows: Vec<String> = if cart.is_empty() {
        vec!["<Cart is empty>".to_string()]
    } else {
        cart.lines()
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}. {}", i + 1, cart_line(line, currency)))
            .collect()
    };
    rows.push(format!("----- TOTAL: {} -----", currency.format(cart.total())));
    rows
}

/// `Order placed successfully! Paid ₹110000.00`
pub fn receipt(receipt: &Receipt, currency: CurrencyCode) -> String {
    format!(
        "Order placed successfully! Paid {} (order {})",
        currency.format(receipt.total),
        receipt.order_number
    )
}
