pub mod cart;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use cart::CartLine;
pub use order::{LineItem, Order};
pub use payment::{PayMethod, Payment};
pub use product::{Product, ProductDraft};
pub use review::Review;
pub use user::User;
pub use wishlist::WishlistLine;
