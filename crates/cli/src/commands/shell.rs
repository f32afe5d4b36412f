//! Interactive storefront shell.
//!
//! One command per line. Errors from the storefront are printed as the
//! message the user should see and the shell keeps going.

use std::io::{self, BufRead, Write};

use secrecy::SecretString;

use tinymart_core::{ProductId, Screen};
use tinymart_storefront::models::ProductForm;
use tinymart_storefront::{AuthError, Session, StoreError, StoreState};

use crate::render;

const HELP: &str = "\
Commands:
  register <username> <password>   Create an account
  login <username> <password>      Log in
  logout                           Log out and empty the cart
  categories                       List categories
  products [category]              List products (first category if omitted)
  add <product-id> [quantity]      Add to cart (quantity defaults to 1)
  cart                             Show the cart
  remove <line>                    Remove a cart line by its number
  checkout                         Pay for the cart
  shop                             Back to the shop screen
  admin                            Open the admin screen (admin only)
  inventory                        List every product (admin only)
  new-product <name> | <category> | <price> | <stock>
                                   Add a product (admin only)
  whoami                           Show the logged-in user
  help                             Show this help
  quit                             Exit";

/// Whether to keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A storefront session bound to an output stream.
pub struct Shell<'a, W: Write> {
    state: &'a mut StoreState,
    session: Session,
    out: W,
}

impl<'a, W: Write> Shell<'a, W> {
    /// Create a shell over `state` writing to `out`.
    pub fn new(state: &'a mut StoreState, out: W) -> Self {
        Self {
            state,
            session: Session::new(),
            out,
        }
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        writeln!(self.out, "Welcome - Please Login or Register (type 'help')")?;
        self.prompt()?;

        for line in input.lines() {
            if self.execute(&line?)? == Flow::Quit {
                break;
            }
            self.prompt()?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}> ", self.session.screen())?;
        self.out.flush()
    }

    fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let line = line.trim_start();
        // Credentials take the raw remainder so passwords keep their spacing.
        let (command, raw_rest) = line
            .split_once(char::is_whitespace)
            .map_or((line.trim_end(), ""), |(c, r)| (c, r.trim_start()));
        let rest = raw_rest.trim_end();

        let result: CommandResult = match command {
            "" => Ok(()),
            "help" => writeln!(self.out, "{HELP}").map_err(Into::into),
            "quit" | "exit" => return Ok(Flow::Quit),
            "register" => self.register(raw_rest),
            "login" => self.login(raw_rest),
            "logout" => {
                self.session.logout();
                writeln!(self.out, "Logged out.").map_err(Into::into)
            }
            "whoami" => self.whoami(),
            "categories" => self.categories(),
            "products" => self.products(rest),
            "add" => self.add(rest),
            "cart" => self.show_cart(),
            "remove" => self.remove(rest),
            "checkout" => self.checkout(),
            "shop" => self.session.back_to_shop().map_err(CommandError::Store),
            "admin" => self.admin(),
            "inventory" => self.inventory(),
            "new-product" => self.new_product(rest),
            other => writeln!(self.out, "Unknown command '{other}'. Type 'help'.")
                .map_err(Into::into),
        };

        match result {
            Ok(()) => {}
            Err(CommandError::Io(e)) => return Err(e),
            Err(CommandError::Usage(usage)) => writeln!(self.out, "Usage: {usage}")?,
            Err(CommandError::Store(e)) => {
                tracing::debug!(error = %e, "Command rejected");
                writeln!(self.out, "Error: {}", e.user_message())?;
            }
        }
        Ok(Flow::Continue)
    }

    fn register(&mut self, args: &str) -> CommandResult {
        let (username, password) = credentials(args, "register <username> <password>")?;
        self.state.accounts.register(username, &password)?;
        writeln!(self.out, "Registration successful. You can now login.")?;
        Ok(())
    }

    fn login(&mut self, args: &str) -> CommandResult {
        let (username, password) = credentials(args, "login <username> <password>")?;
        let user = self
            .session
            .login(&self.state.accounts, username, &password)?;
        writeln!(self.out, "Login successful. Welcome {user}!")?;
        Ok(())
    }

    fn whoami(&mut self) -> CommandResult {
        match self.session.user() {
            Some(user) => writeln!(self.out, "{user}")?,
            None => writeln!(self.out, "Not logged in.")?,
        }
        Ok(())
    }

    fn categories(&mut self) -> CommandResult {
        self.require_shop()?;
        for category in self.state.catalog.list_categories() {
            writeln!(self.out, "{category}")?;
        }
        Ok(())
    }

    fn products(&mut self, category: &str) -> CommandResult {
        self.require_shop()?;
        let catalog = &self.state.catalog;
        let category = if category.is_empty() {
            match catalog.list_categories().first() {
                Some(first) => *first,
                None => return Ok(writeln!(self.out, "No products.")?),
            }
        } else {
            category
        };

        let currency = self.state.config().currency;
        for product in catalog.list_by_category(category) {
            writeln!(self.out, "{}", render::product(product, currency))?;
        }
        Ok(())
    }

    fn add(&mut self, args: &str) -> CommandResult {
        const USAGE: &str = "add <product-id> [quantity]";
        let mut parts = args.split_whitespace();
        let product_id: ProductId = parts
            .next()
            .and_then(|id| id.parse().ok())
            .ok_or(CommandError::Usage(USAGE))?;
        let quantity = parts.next().unwrap_or("1");
        if parts.next().is_some() {
            return Err(CommandError::Usage(USAGE));
        }

        let update = self
            .session
            .add_to_cart(&self.state.catalog, product_id, quantity)?;
        writeln!(self.out, "{update}")?;
        Ok(())
    }

    fn show_cart(&mut self) -> CommandResult {
        let currency = self.state.config().currency;
        let cart = self.session.view_cart()?;
        for row in render::cart(cart, currency) {
            writeln!(self.out, "{row}")?;
        }
        Ok(())
    }

    fn remove(&mut self, args: &str) -> CommandResult {
        let number: usize = args
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(CommandError::Usage("remove <line>"))?;
        let line = self.session.remove_from_cart(number - 1)?;
        writeln!(self.out, "Removed: {}", line.name)?;
        Ok(())
    }

    fn checkout(&mut self) -> CommandResult {
        let receipt = self.session.checkout(&mut self.state.catalog)?;
        let currency = self.state.config().currency;
        writeln!(self.out, "{}", render::receipt(&receipt, currency))?;
        Ok(())
    }

    fn admin(&mut self) -> CommandResult {
        self.session.open_admin()?;
        writeln!(self.out, "Admin panel.")?;
        self.inventory()
    }

    fn inventory(&mut self) -> CommandResult {
        self.require_admin_screen()?;
        let currency = self.state.config().currency;
        for product in self.state.catalog.products() {
            writeln!(self.out, "{}", render::product(product, currency))?;
        }
        Ok(())
    }

    fn new_product(&mut self, args: &str) -> CommandResult {
        const USAGE: &str = "new-product <name> | <category> | <price> | <stock>";
        let fields: Vec<&str> = args.split('|').collect();
        let [name, category, price, stock] = fields.as_slice() else {
            return Err(CommandError::Usage(USAGE));
        };

        self.require_admin_screen()?;
        let form = ProductForm {
            name,
            category,
            price,
            stock,
        };
        let product = self.session.add_product(&mut self.state.catalog, &form)?;
        let currency = self.state.config().currency;
        writeln!(
            self.out,
            "Product added: {}",
            render::product(&product, currency)
        )?;
        Ok(())
    }

    /// Browsing needs a logged-in user; it also brings the shop screen up.
    fn require_shop(&mut self) -> CommandResult {
        if self.session.screen() != Screen::Admin {
            self.session.back_to_shop()?;
        }
        Ok(())
    }

    fn require_admin_screen(&mut self) -> CommandResult {
        if self.session.screen() != Screen::Admin {
            self.session.open_admin()?;
        }
        Ok(())
    }
}

/// Why a command did not complete.
#[derive(Debug)]
enum CommandError {
    Io(io::Error),
    Usage(&'static str),
    Store(StoreError),
}

type CommandResult = Result<(), CommandError>;

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<AuthError> for CommandError {
    fn from(err: AuthError) -> Self {
        Self::Store(err.into())
    }
}

/// Split `<username> <password>`; the password is everything after the
/// first space, exactly as typed.
fn credentials<'s>(
    args: &'s str,
    usage: &'static str,
) -> Result<(&'s str, SecretString), CommandError> {
    let (username, password) = args
        .split_once(char::is_whitespace)
        .ok_or(CommandError::Usage(usage))?;
    Ok((username, SecretString::from(password)))
}
