pub mod auth;
pub use auth::{ApiKey, ApiKeyGate, AuthError};

pub mod filter;
pub use filter::TitleFilter;

pub mod pagination;
pub use pagination::{PageInfo, PageRequest};

pub mod title_service;
pub use title_service::{TitleError, TitlePage, TitleService};

pub mod title_service_impl;
pub use title_service_impl::SeaOrmTitleService;
