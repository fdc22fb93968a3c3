use super::{ApiRequest, ApiResponse, NetworkError, RequestBody, Transport};
use crate::config::HarnessConfig;
use crate::rest::middlewares::request_logging_middleware::RequestLoggingMiddleware;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{
    default_on_request_failure, default_on_request_success, Retryable, RetryableStrategy,
    RetryTransientMiddleware,
};
use std::time::Duration;

const MIN_RETRY_INTERVAL: u64 = 100;
const MAX_RETRY_INTERVAL: u64 = 2000;

/// Default transient classification, except that a timed-out call is never
/// sent again.
struct NoRetryOnTimeout;

impl RetryableStrategy for NoRetryOnTimeout {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(success) => default_on_request_success(success),
            Err(reqwest_middleware::Error::Reqwest(e)) if e.is_timeout() => Some(Retryable::Fatal),
            Err(error) => default_on_request_failure(error),
        }
    }
}

/// reqwest-backed [`Transport`] bound to one service base URL.
pub struct ApiClient {
    config: HarnessConfig,
    http_client: ClientWithMiddleware,
}

impl ApiClient {
    pub fn new(config: &HarnessConfig) -> Result<Self, NetworkError> {
        let timeout = config.request_timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::from_reqwest(&config.base_url, timeout, e))?;

        let mut builder = ClientBuilder::new(client);
        if config.max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder()
                .retry_bounds(
                    Duration::from_millis(MIN_RETRY_INTERVAL),
                    Duration::from_millis(MAX_RETRY_INTERVAL),
                )
                .build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy_and_strategy(
                retry_policy,
                NoRetryOnTimeout,
            ));
        }
        let http_client = builder.with(RequestLoggingMiddleware).build();

        Ok(Self {
            config: config.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, NetworkError> {
        let url = self.config.url_for(request.endpoint.path());
        let timeout = self.config.request_timeout();

        let mut builder = self
            .http_client
            .request(request.endpoint.method(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, token);
        }
        if let RequestBody::Json(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| NetworkError::from_middleware(&url, timeout, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response
            .text()
            .await
            .map_err(|e| NetworkError::from_reqwest(&url, timeout, e))?;

        Ok(ApiResponse::new(status, headers, raw_body))
    }
}
