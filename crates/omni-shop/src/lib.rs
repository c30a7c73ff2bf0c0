pub mod cart;
pub mod error;
pub mod order;
pub mod persist;
pub mod pipeline;
pub mod store;

pub use cart::{subtotal, Cart};
pub use error::StorageError;
pub use order::{buy_now_message, format_order, order_link, CustomerInfo, ShippingForm};
pub use persist::{decode_cart, encode_cart, CartStorage, FileStorage, MemoryStorage};
pub use pipeline::{related_products, search_suggestions, view, FilterState, Pager, SortKey};
pub use store::{Storefront, StorefrontConfig};
