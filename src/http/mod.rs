use async_trait::async_trait;

pub use self::client::ApiClient;
pub use self::errors::NetworkError;
pub use self::request::{ApiRequest, Endpoint, RequestBody};
pub use self::response::ApiResponse;

mod client;
mod errors;
mod request;
mod response;

#[cfg(test)]
use mockall::mock;

/// Sends one request to the service and captures whatever comes back.
///
/// Implementations must return `Ok` for every HTTP status. Only transport
/// failures (connect, timeout, broken body) are errors.
#[async_trait]
pub trait Transport
where
    Self: Sync + Send,
{
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, NetworkError>;
}

#[cfg(test)]
mock! {
    pub Transport {}
    #[async_trait]
    impl Transport for Transport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, NetworkError>;
    }
}
