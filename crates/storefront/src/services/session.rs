//! Session controller: who is logged in and which screen they are on.
//!
//! ```text
//! Login --login--> Shop <--back_to_shop-- Cart
//!                   |  \--view_cart-------^
//!                   \--open_admin (admin only)--> Admin
//! any --logout--> Login (cart cleared)
//! ```

use secrecy::SecretString;
use tracing::{info, instrument};

use tinymart_core::{ProductId, Screen, Username};

use crate::db::products::Catalog;
use crate::error::{Result, StoreError, ValidationError};
use crate::models::cart::{CartLine, CartUpdate};
use crate::models::product::{Product, ProductForm};
use crate::models::receipt::Receipt;
use crate::services::auth::AccountStore;
use crate::services::cart::Cart;
use crate::services::checkout;

/// The single interactive session.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<Username>,
    screen: Screen,
    cart: Cart,
}

impl Session {
    /// A logged-out session on the login screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&Username> {
        self.user.as_ref()
    }

    /// The current screen.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// The session's cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Whether the logged-in user is the admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(Username::is_admin)
    }

    /// Log in and move to the shop.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyLoggedIn` if a user is logged in (log out
    /// first) and `StoreError::Auth` if the credentials are rejected. The
    /// session is left unchanged on error.
    #[instrument(skip(self, accounts, password))]
    pub fn login(
        &mut self,
        accounts: &AccountStore,
        username: &str,
        password: &SecretString,
    ) -> Result<&Username> {
        if let Some(current) = &self.user {
            return Err(StoreError::AlreadyLoggedIn(current.to_string()));
        }
        let user = accounts.authenticate(username, password)?;
        info!(username = %user, "Logged in");

        self.screen = Screen::Shop;
        Ok(&*self.user.insert(user))
    }

    /// Log out, empty the cart and return to the login screen.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(username = %user, "Logged out");
        }
        self.cart.clear();
        self.screen = Screen::Login;
    }

    /// Go to the cart screen.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized` when logged out.
    pub fn view_cart(&mut self) -> Result<&Cart> {
        self.require_user()?;
        self.screen = Screen::Cart;
        Ok(&self.cart)
    }

    /// Go back to the shop screen.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized` when logged out.
    pub fn back_to_shop(&mut self) -> Result<()> {
        self.require_user()?;
        self.screen = Screen::Shop;
        Ok(())
    }

    /// Go to the admin screen.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized` when logged out and
    /// `StoreError::Forbidden` for anyone but the admin. The screen does not
    /// change on error.
    pub fn open_admin(&mut self) -> Result<()> {
        self.require_admin()?;
        self.screen = Screen::Admin;
        Ok(())
    }

    /// Add `quantity` (raw user input) of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized` when logged out,
    /// `StoreError::NotFound` for an unknown product, and
    /// `StoreError::Validation` if the product is out of stock or the
    /// quantity is not an integer in `1..=stock`.
    pub fn add_to_cart(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: &str,
    ) -> Result<CartUpdate> {
        self.require_user()?;

        let product = catalog
            .get_by_id(product_id)
            .ok_or_else(|| StoreError::NotFound(format!("product {product_id}")))?;
        if !product.is_in_stock() {
            return Err(ValidationError::OutOfStock(product.name.clone()).into());
        }

        let quantity = parse_quantity(quantity, product.stock)?;
        Ok(self.cart.add_item(product, quantity)?)
    }

    /// Remove the cart line at `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized` when logged out and
    /// `StoreError::NotFound` for an index past the last line.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<CartLine> {
        self.require_user()?;
        self.cart.remove_item(index)
    }

    /// Check out the cart and return to the shop.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized` when logged out and
    /// `StoreError::Checkout` if the cart is empty or short on stock; the
    /// screen, cart and catalog are unchanged in that case.
    pub fn checkout(&mut self, catalog: &mut Catalog) -> Result<Receipt> {
        self.require_user()?;
        let receipt = checkout::checkout(&mut self.cart, catalog)?;
        self.screen = Screen::Shop;
        Ok(receipt)
    }

    /// Add a product from the admin form.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized`/`StoreError::Forbidden` unless the
    /// admin is logged in, `StoreError::Validation` for bad form input, and
    /// `StoreError::Repository` if no product IDs are left.
    pub fn add_product(&self, catalog: &mut Catalog, form: &ProductForm<'_>) -> Result<Product> {
        self.require_admin()?;
        let new = form.validate()?;
        Ok(catalog.add_product(new)?)
    }

    fn require_user(&self) -> Result<&Username> {
        self.user
            .as_ref()
            .ok_or_else(|| StoreError::Unauthorized("not logged in".to_string()))
    }

    fn require_admin(&self) -> Result<()> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(StoreError::Forbidden(format!("{user} is not admin")));
        }
        Ok(())
    }
}

/// Parse a cart quantity and check it against the stock on hand.
fn parse_quantity(raw: &str, available: u32) -> std::result::Result<u32, ValidationError> {
    let trimmed = raw.trim();
    let requested: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "quantity",
            value: trimmed.to_owned(),
        })?;

    u32::try_from(requested)
        .ok()
        .filter(|q| (1..=available).contains(q))
        .ok_or(ValidationError::QuantityOutOfRange {
            requested,
            available,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tinymart_core::Price;

    use super::*;
    use crate::config::PasswordHashing;
    use crate::models::product::NewProduct;

    struct Fixture {
        accounts: AccountStore,
        catalog: Catalog,
        laptop: ProductId,
    }

    fn fixture() -> Fixture {
        let mut accounts = AccountStore::new(PasswordHashing::minimal()).unwrap();
        accounts.register("user1", &"pass1".into()).unwrap();
        accounts.register("admin", &"admin".into()).unwrap();

        let mut catalog = Catalog::new();
        let laptop = catalog
            .add_product(NewProduct::new(
                "Laptop",
                "Electronics",
                Price::from_units(55000),
                7,
            ))
            .unwrap()
            .id;

        Fixture {
            accounts,
            catalog,
            laptop,
        }
    }

    #[test]
    fn test_login_moves_to_shop() {
        let fx = fixture();
        let mut session = Session::new();
        assert_eq!(session.screen(), Screen::Login);

        let user = session.login(&fx.accounts, "user1", &"pass1".into()).unwrap();
        assert_eq!(user.as_str(), "user1");
        assert_eq!(session.screen(), Screen::Shop);
    }

    #[test]
    fn test_failed_login_leaves_session_logged_out() {
        let fx = fixture();
        let mut session = Session::new();

        let err = session
            .login(&fx.accounts, "user1", &"wrong".into())
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials.");
        assert!(session.user().is_none());
        assert_eq!(session.screen(), Screen::Login);
    }

    #[test]
    fn test_logout_clears_cart() {
        let fx = fixture();
        let mut session = Session::new();
        session.login(&fx.accounts, "user1", &"pass1".into()).unwrap();
        session.add_to_cart(&fx.catalog, fx.laptop, "1").unwrap();

        session.logout();

        assert!(session.user().is_none());
        assert!(session.cart().is_empty());
        assert_eq!(session.screen(), Screen::Login);
    }

    #[test]
    fn test_login_while_logged_in_is_rejected() {
        let fx = fixture();
        let mut session = Session::new();
        session.login(&fx.accounts, "user1", &"pass1".into()).unwrap();
        session.add_to_cart(&fx.catalog, fx.laptop, "2").unwrap();

        let err = session
            .login(&fx.accounts, "admin", &"admin".into())
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyLoggedIn(_)));
        assert_eq!(err.user_message(), "Already logged in. Logout first.");
        assert_eq!(session.user().unwrap().as_str(), "user1");
        assert_eq!(session.cart().len(), 1);

        session.logout();
        session.login(&fx.accounts, "admin", &"admin".into()).unwrap();
        assert!(session.is_admin());
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_shop_actions_need_login() {
        let mut fx = fixture();
        let mut session = Session::new();

        assert!(matches!(
            session.add_to_cart(&fx.catalog, fx.laptop, "1"),
            Err(StoreError::Unauthorized(_))
        ));
        assert!(matches!(
            session.checkout(&mut fx.catalog),
            Err(StoreError::Unauthorized(_))
        ));
        assert!(matches!(session.view_cart(), Err(StoreError::Unauthorized(_))));
    }

    #[test]
    fn test_admin_screen_is_admin_only() {
        let fx = fixture();
        let mut session = Session::new();
        session.login(&fx.accounts, "user1", &"pass1".into()).unwrap();

        assert!(matches!(session.open_admin(), Err(StoreError::Forbidden(_))));
        assert_eq!(session.screen(), Screen::Shop);

        session.logout();
        session.login(&fx.accounts, "admin", &"admin".into()).unwrap();
        assert!(session.is_admin());
        session.open_admin().unwrap();
        assert_eq!(session.screen(), Screen::Admin);
    }

    #[test]
    fn test_add_to_cart_validates_quantity() {
        let fx = fixture();
        let mut session = Session::new();
        session.login(&fx.accounts, "user1", &"pass1".into()).unwrap();

        assert!(matches!(
            session.add_to_cart(&fx.catalog, fx.laptop, "two"),
            Err(StoreError::Validation(ValidationError::InvalidNumber { .. }))
        ));
        assert!(matches!(
            session.add_to_cart(&fx.catalog, fx.laptop, "-1"),
            Err(StoreError::Validation(ValidationError::QuantityOutOfRange { requested: -1, .. }))
        ));
        assert!(matches!(
            session.add_to_cart(&fx.catalog, fx.laptop, "8"),
            Err(StoreError::Validation(ValidationError::QuantityOutOfRange { requested: 8, available: 7 }))
        ));
        assert!(matches!(
            session.add_to_cart(&fx.catalog, ProductId::new(42), "1"),
            Err(StoreError::NotFound(_))
        ));

        let update = session.add_to_cart(&fx.catalog, fx.laptop, " 2 ").unwrap();
        assert_eq!(update.to_string(), "Added to cart: Laptop x 2");
    }

    #[test]
    fn test_checkout_returns_to_shop() {
        let mut fx = fixture();
        let mut session = Session::new();
        session.login(&fx.accounts, "user1", &"pass1".into()).unwrap();
        session.add_to_cart(&fx.catalog, fx.laptop, "2").unwrap();
        session.view_cart().unwrap();

        let receipt = session.checkout(&mut fx.catalog).unwrap();

        assert_eq!(receipt.total, Price::from_units(110_000));
        assert_eq!(session.screen(), Screen::Shop);
        assert!(session.cart().is_empty());
        assert_eq!(fx.catalog.get_by_id(fx.laptop).unwrap().stock, 5);
    }

    #[test]
    fn test_admin_adds_product() {
        let mut fx = fixture();
        let mut session = Session::new();
        let form = ProductForm {
            name: "Sandals",
            category: "Footwear",
            price: "499",
            stock: "10",
        };

        session.login(&fx.accounts, "user1", &"pass1".into()).unwrap();
        assert!(matches!(
            session.add_product(&mut fx.catalog, &form),
            Err(StoreError::Forbidden(_))
        ));

        session.logout();
        session.login(&fx.accounts, "admin", &"admin".into()).unwrap();
        let product = session.add_product(&mut fx.catalog, &form).unwrap();

        assert_eq!(product.id, ProductId::new(1002));
        assert_eq!(fx.catalog.list_by_category("Footwear"), vec![&product]);
        assert!(fx.catalog.index_is_consistent());
    }
}
