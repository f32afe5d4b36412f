//! Print the catalog.

use std::io::Write;

use tinymart_storefront::StoreState;
use tinymart_storefront::models::Product;

use crate::render;

/// Write every product grouped by category, or the product list as JSON.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn print(
    state: &StoreState,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let products: Vec<&Product> = state.catalog.products().collect();
        serde_json::to_writer_pretty(&mut *out, &products)?;
        writeln!(out)?;
        return Ok(());
    }

    let currency = state.config().currency;
    for category in state.catalog.list_categories() {
        writeln!(out, "{category}")?;
        for product in state.catalog.list_by_category(category) {
            writeln!(out, "  {}", render::product(product, currency))?;
        }
    }
    Ok(())
}
