use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("product not found: {id}")]
    ProductNotFound { id: u32 },

    #[error("user not found: {id}")]
    UserNotFound { id: u32 },

    #[error("order not found: {id}")]
    OrderNotFound { id: u32 },

    #[error("product {id} is not in the cart")]
    NotInCart { id: u32 },

    #[error("product {id} is not in the wishlist")]
    NotInWishlist { id: u32 },

    #[error("username already taken: {username}")]
    UsernameTaken { username: String },

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("cart is empty")]
    EmptyCart,

    #[error("not enough stock for product {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: u32,
        available: u32,
        requested: u32,
    },

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("rating must be between 1 and 5 (got {rating})")]
    InvalidRating { rating: i64 },

    #[error("invalid price range: {min} - {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("user {user_id} already reviewed product {product_id}")]
    DuplicateReview { product_id: u32, user_id: u32 },

    #[error("parse error in {table}: {detail}")]
    Parse { table: &'static str, detail: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ShopError>;
