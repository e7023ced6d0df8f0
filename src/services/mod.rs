pub mod catalog_service;
pub use catalog_service::{CatalogError, CatalogService, EpisodeDraft};

pub mod catalog_service_impl;
pub use catalog_service_impl::StoreCatalogService;

pub mod user_service;
pub use user_service::{NewUser, Session, UserError, UserService};

pub mod user_service_impl;
pub use user_service_impl::StoreUserService;

pub mod request_service;
pub use request_service::{NewRequest, RequestError, RequestService};

pub mod request_service_impl;
pub use request_service_impl::StoreRequestService;

pub mod import_service;
pub use import_service::KitsuImportService;
