//! Core module containing the storefront's domain types and store traits

pub mod account;
pub mod cake;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod feedback;
pub mod notification;
pub mod schedule;
pub mod store;

pub use account::{Profile, UserAccount, normalize_email};
pub use cake::{CakeBase, CakeOrderForm, CakeSize, CakeSpec, DesignSource, Fulfilment};
pub use cart::{Cart, CartLine};
pub use catalog::{CatalogItem, CatalogItemPatch, StockStatus, is_low_stock};
pub use error::{ApiError, ApiResult, ErrorResponse, FieldIssue};
pub use feedback::FeedbackRecord;
pub use notification::{NotificationKind, NotificationRecord};
pub use store::{AccountStore, CartStore, CatalogStore, FeedbackStore, NotificationStore};
