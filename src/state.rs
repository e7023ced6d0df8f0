use std::sync::Arc;

use crate::clients::KitsuClient;
use crate::config::Config;
use crate::services::{
    CatalogService, KitsuImportService, RequestService, StoreCatalogService, StoreRequestService,
    StoreUserService, UserService,
};
use crate::store::{StorageMode, Stores};

/// Shared handles for the data-access services, wired once per process.
///
/// Backend selection happens here, in [`Stores::connect`]; everything
/// downstream holds trait objects and is oblivious to which mode is
/// active.
pub struct AppContext {
    pub mode: StorageMode,

    pub catalog: Arc<dyn CatalogService>,

    pub users: Arc<dyn UserService>,

    pub requests: Arc<dyn RequestService>,

    pub importer: Arc<KitsuImportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let stores = Stores::connect(config);

        let catalog =
            Arc::new(StoreCatalogService::from_stores(&stores)) as Arc<dyn CatalogService>;
        let users =
            Arc::new(StoreUserService::from_stores(&stores, config)) as Arc<dyn UserService>;
        let requests =
            Arc::new(StoreRequestService::from_stores(&stores)) as Arc<dyn RequestService>;
        let importer = Arc::new(KitsuImportService::new(KitsuClient::new(
            config.kitsu.page_limit,
        )));

        Self {
            mode: stores.mode,
            catalog,
            users,
            requests,
            importer,
        }
    }
}
