//! Product catalog storage.
//!
//! Products are keyed by [`ProductId`]. Alongside them the catalog keeps a
//! category index: category name to product ids in insertion order. The
//! index is a strict cache of `group_by(category, products)` and is updated
//! in the same call that stores a product.

use std::collections::BTreeMap;

use tinymart_core::ProductId;
use tracing::{debug, info};

use super::RepositoryError;
use crate::models::product::{NewProduct, Product};

/// First ID handed out by an empty catalog.
pub const FIRST_PRODUCT_ID: ProductId = ProductId::new(1001);

/// All products plus their category index.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<String, Vec<ProductId>>,
    next_id: Option<ProductId>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: BTreeMap::new(),
            categories: BTreeMap::new(),
            next_id: Some(FIRST_PRODUCT_ID),
        }
    }

    /// Store a product under the next unused ID and index it by category.
    ///
    /// Values are taken as given; use [`ProductForm`](crate::models::ProductForm)
    /// to validate user input first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Exhausted` once every `ProductId` has been
    /// assigned. IDs are never reused.
    pub fn add_product(&mut self, new: NewProduct) -> Result<Product, RepositoryError> {
        let id = self.next_id.ok_or(RepositoryError::Exhausted("product"))?;
        self.next_id = id.next();

        let product = Product {
            id,
            name: new.name,
            category: new.category,
            price: new.price,
            stock: new.stock,
        };

        self.categories
            .entry(product.category.clone())
            .or_default()
            .push(id);
        self.products.insert(id, product.clone());

        debug_assert!(self.index_is_consistent());
        info!(product_id = %id, name = %product.name, category = %product.category, "Product added");

        Ok(product)
    }

    /// Look up a product.
    #[must_use]
    pub fn get_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Products in `category`, in the order they were added.
    ///
    /// Unknown categories yield an empty list.
    #[must_use]
    pub fn list_by_category(&self, category: &str) -> Vec<&Product> {
        self.categories
            .get(category)
            .map(|ids| ids.iter().filter_map(|id| self.products.get(id)).collect())
            .unwrap_or_default()
    }

    /// Category names in lexicographic order.
    #[must_use]
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// All products in ID order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Take `quantity` units out of stock, flooring at zero.
    ///
    /// Asking for more than is on hand is not an error. Returns the new stock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub fn reduce_stock(&mut self, id: ProductId, quantity: u32) -> Result<u32, RepositoryError> {
        let product = self.get_mut(id)?;
        product.stock = product.stock.saturating_sub(quantity);
        debug!(product_id = %id, quantity, stock = product.stock, "Stock reduced");
        Ok(product.stock)
    }

    /// Put `quantity` units back into stock. Returns the new stock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub fn increase_stock(&mut self, id: ProductId, quantity: u32) -> Result<u32, RepositoryError> {
        let product = self.get_mut(id)?;
        product.stock = product.stock.saturating_add(quantity);
        debug!(product_id = %id, quantity, stock = product.stock, "Stock increased");
        Ok(product.stock)
    }

    /// Whether the category index equals the products grouped by category.
    #[must_use]
    pub fn index_is_consistent(&self) -> bool {
        let mut grouped: BTreeMap<String, Vec<ProductId>> = BTreeMap::new();
        for product in self.products.values() {
            grouped
                .entry(product.category.clone())
                .or_default()
                .push(product.id);
        }
        grouped == self.categories
    }

    fn get_mut(&mut self, id: ProductId) -> Result<&mut Product, RepositoryError> {
        self.products
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("product {id}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tinymart_core::Price;

    use super::*;

    fn add(catalog: &mut Catalog, name: &str, category: &str, price: u32, stock: u32) -> Product {
        catalog
            .add_product(NewProduct::new(name, category, Price::from_units(price), stock))
            .unwrap()
    }

    #[test]
    fn test_ids_start_at_base_and_increment() {
        let mut catalog = Catalog::new();
        let a = add(&mut catalog, "Laptop", "Electronics", 55000, 7);
        let b = add(&mut catalog, "Shirt", "Clothing", 799, 60);

        assert_eq!(a.id, FIRST_PRODUCT_ID);
        assert_eq!(b.id, ProductId::new(1002));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_ids_are_never_reused_when_exhausted() {
        let mut catalog = Catalog::new();
        catalog.next_id = Some(ProductId::new(u32::MAX));

        let last = add(&mut catalog, "Laptop", "Electronics", 55000, 7);
        assert_eq!(last.id, ProductId::new(u32::MAX));

        let err = catalog
            .add_product(NewProduct::new("Shirt", "Clothing", Price::from_units(799), 60))
            .unwrap_err();
        assert_eq!(err, RepositoryError::Exhausted("product"));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.list_by_category("Clothing").is_empty());
        assert!(catalog.index_is_consistent());
    }

    #[test]
    fn test_get_by_id() {
        let mut catalog = Catalog::new();
        let laptop = add(&mut catalog, "Laptop", "Electronics", 55000, 7);

        assert_eq!(catalog.get_by_id(laptop.id), Some(&laptop));
        assert!(catalog.get_by_id(ProductId::new(9999)).is_none());
    }

    #[test]
    fn test_categories_are_sorted() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "Running Shoes", "Footwear", 2499, 20);
        add(&mut catalog, "Laptop", "Electronics", 55000, 7);
        add(&mut catalog, "Shirt", "Clothing", 799, 60);

        assert_eq!(
            catalog.list_categories(),
            vec!["Clothing", "Electronics", "Footwear"]
        );
    }

    #[test]
    fn test_list_by_category_keeps_insertion_order() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "Smartphone", "Electronics", 15000, 25);
        add(&mut catalog, "Shirt", "Clothing", 799, 60);
        add(&mut catalog, "Headphones", "Electronics", 1200, 50);

        let names: Vec<&str> = catalog
            .list_by_category("Electronics")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Smartphone", "Headphones"]);
        assert!(catalog.list_by_category("Toys").is_empty());
    }

    #[test]
    fn test_each_product_indexed_exactly_once() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "Jeans", "Clothing", 1299, 40);
        add(&mut catalog, "Shirt", "Clothing", 799, 60);

        assert_eq!(catalog.list_by_category("Clothing").len(), 2);
        assert!(catalog.index_is_consistent());
    }

    #[test]
    fn test_reduce_stock_floors_at_zero() {
        let mut catalog = Catalog::new();
        let laptop = add(&mut catalog, "Laptop", "Electronics", 55000, 7);

        assert_eq!(catalog.reduce_stock(laptop.id, 999).unwrap(), 0);
        assert_eq!(catalog.get_by_id(laptop.id).unwrap().stock, 0);
    }

    #[test]
    fn test_reduce_and_increase_stock() {
        let mut catalog = Catalog::new();
        let shirt = add(&mut catalog, "Shirt", "Clothing", 799, 60);

        assert_eq!(catalog.reduce_stock(shirt.id, 10).unwrap(), 50);
        assert_eq!(catalog.increase_stock(shirt.id, 5).unwrap(), 55);
    }

    #[test]
    fn test_stock_changes_on_unknown_product() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.reduce_stock(ProductId::new(1), 1),
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            catalog.increase_stock(ProductId::new(1), 1),
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_products_in_id_order() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "B", "Zeta", 1, 1);
        add(&mut catalog, "A", "Alpha", 1, 1);

        let ids: Vec<u32> = catalog.products().map(|p| p.id.as_u32()).collect();
        assert_eq!(ids, vec![1001, 1002]);
    }
}
