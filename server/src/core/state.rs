//! Shared application state

use std::sync::Arc;

use shared::AppResult;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::repository::{
    AddressRepository, CampaignRepository, CategoryRepository, FavoriteRepository,
    LoginHistoryRepository, NotificationRepository, OrderRepository, PaymentMethodRepository,
    ProductRepository, ReviewRepository, UserRepository,
};
use crate::db::DbService;

/// Everything handlers need, cloned per request. Repositories share the two
/// SQLite pools inside [`DbService`], so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: Arc<JwtService>,
    pub users: UserRepository,
    pub products: ProductRepository,
    pub categories: CategoryRepository,
    pub orders: OrderRepository,
    pub addresses: AddressRepository,
    pub payment_methods: PaymentMethodRepository,
    pub reviews: ReviewRepository,
    pub notifications: NotificationRepository,
    pub favorites: FavoriteRepository,
    pub campaigns: CampaignRepository,
    pub login_history: LoginHistoryRepository,
}

impl AppState {
    /// Open the database at the configured path and build the state
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config, db))
    }

    /// Build the state over an existing database handle (tests use this
    /// with a temporary file)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt = Arc::new(JwtService::new(&config.jwt));
        Self {
            config: Arc::new(config),
            jwt,
            users: UserRepository::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            categories: CategoryRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            addresses: AddressRepository::new(db.clone()),
            payment_methods: PaymentMethodRepository::new(db.clone()),
            reviews: ReviewRepository::new(db.clone()),
            notifications: NotificationRepository::new(db.clone()),
            favorites: FavoriteRepository::new(db.clone()),
            campaigns: CampaignRepository::new(db.clone()),
            login_history: LoginHistoryRepository::new(db),
        }
    }
}
