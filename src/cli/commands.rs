use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shopfile",
    version,
    about = "Flat-file storefront - catalog, carts, orders and reviews over plain text tables",
    after_help = "Every command prints one JSON document on stdout. Diagnostics go to \
                  stderr; set RUST_LOG=debug to see skipped lines and state changes. \
                  Tables live under --data-dir and are created on first use."
)]
pub struct Cli {
    /// Data directory holding the tables.
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new user account
    Register {
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Log in with username and password
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Product catalog commands
    #[command(subcommand)]
    Product(ProductCommand),

    /// Shopping cart commands (per user)
    #[command(subcommand)]
    Cart(CartCommand),

    /// Wishlist commands (per user)
    #[command(subcommand)]
    Wishlist(WishlistCommand),

    /// Order commands
    #[command(subcommand)]
    Order(OrderCommand),

    /// Record a simulated payment against an order
    Pay {
        #[arg(long)]
        order: u32,
        #[arg(long)]
        user: u32,
        #[arg(long)]
        amount: f64,
        /// visa, mastercard, jazzcash, easypaisa or paypak
        #[arg(long)]
        method: String,
    },

    /// Review commands
    #[command(subcommand)]
    Review(ReviewCommand),

    /// User management commands (admin)
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product to the catalog (rating starts at 0.0)
    Add {
        name: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "0")]
        stock: u32,
    },

    /// Show one product by id
    Show { id: u32 },

    /// List the whole catalog in file order
    List,

    /// Search the catalog; unset filters do not constrain
    Search {
        /// Case-insensitive name substring
        #[arg(long)]
        name: Option<String>,
        /// Case-insensitive category match
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        price_min: Option<f64>,
        #[arg(long)]
        price_max: Option<f64>,
        /// Minimum rating (0.0 - 5.0)
        #[arg(long)]
        min_rating: Option<f64>,
    },

    /// Replace a product's fields; the stored rating is preserved
    Edit {
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "0")]
        stock: u32,
    },

    /// Remove a product from the catalog
    Remove { id: u32 },

    /// Full catalog with low/out-of-stock flags
    Inventory,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a quantity of a product to a user's cart
    Add {
        #[arg(long)]
        user: u32,
        #[arg(long)]
        product: u32,
        #[arg(long, default_value = "1")]
        qty: u32,
    },

    /// Remove a product's line from the cart
    Remove {
        #[arg(long)]
        user: u32,
        #[arg(long)]
        product: u32,
    },

    /// Show the cart with product details and totals
    View {
        #[arg(long)]
        user: u32,
    },

    /// Empty the cart
    Clear {
        #[arg(long)]
        user: u32,
    },
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Add a product to a user's wishlist (idempotent)
    Add {
        #[arg(long)]
        user: u32,
        #[arg(long)]
        product: u32,
    },

    /// Remove a product from the wishlist
    Remove {
        #[arg(long)]
        user: u32,
        #[arg(long)]
        product: u32,
    },

    /// Show the wishlist with product details
    View {
        #[arg(long)]
        user: u32,
    },
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Place an order from the user's cart: checks and decrements stock,
    /// appends the order, clears the cart
    Place {
        #[arg(long)]
        user: u32,
    },

    /// Show one order with items resolved to product names
    Track { id: u32 },

    /// List orders, optionally for one user
    List {
        #[arg(long)]
        user: Option<u32>,
    },

    /// Set an order's status
    Status { id: u32, status: String },
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// Add a review (one per user and product)
    Add {
        #[arg(long)]
        product: u32,
        #[arg(long)]
        user: u32,
        /// 1 to 5
        #[arg(long)]
        rating: u32,
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// List a product's reviews and their average
    List { product: u32 },

    /// Products the user ordered but has not reviewed yet
    Eligible {
        #[arg(long)]
        user: u32,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// List all users (passwords never leave the table)
    List,

    /// Update a user's username and/or email
    Edit {
        id: u32,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove a user; the primary admin and the acting admin themselves
    /// are protected
    Remove {
        id: u32,
        /// Acting admin's user id
        #[arg(long)]
        admin: u32,
    },
}
