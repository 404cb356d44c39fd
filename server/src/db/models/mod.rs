//! Database models and API payload types
//!
//! One file per table. Each file holds the row struct (`sqlx::FromRow`),
//! the `*Create`/`*Update` request payloads, and any derived API views.

mod address;
mod campaign;
mod category;
mod favorite;
mod login_history;
mod notification;
mod order;
mod payment_method;
mod product;
mod review;
mod user;

pub use address::{Address, AddressCreate, AddressUpdate};
pub use campaign::Campaign;
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use favorite::{Favorite, FavoriteCreate, FavoriteView};
pub use login_history::LoginEntry;
pub use notification::{
    Notification, NotificationCreate, NotificationSummary, NotificationUpdate,
};
pub use order::{
    Order, OrderCreate, OrderDetail, OrderItem, OrderItemDetail, OrderLine, OrderStatus,
    OrderStatusUpdate,
};
pub use payment_method::{
    PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate, PaymentMethodView,
};
pub use product::{Product, ProductCreate, ProductFilter, ProductUpdate};
pub use review::{Review, ReviewCreate, ReviewSummary, ReviewUpdate, ReviewView};
pub use user::{User, UserUpdate, UserView};

use serde::Deserialize;

/// Common pagination query parameters (1-based page number)
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl Pagination {
    /// SQL LIMIT for this page (capped at 100 rows)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, 100) as i64
    }

    /// SQL OFFSET for this page
    pub fn offset(&self) -> i64 {
        let page = self.page.max(1) as i64;
        (page - 1) * self.limit()
    }
}
