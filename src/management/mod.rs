mod auth;
mod request;
mod walker;

pub use auth::CredentialIssuer;
pub use auth::REFRESH_LEEWAY_SECS;
pub use auth::TokenManager;
pub use request::RequestClient;
pub use request::RetryPolicy;
pub use request::build_http_client;
pub use walker::CatalogWalker;
pub use walker::ChartSource;
