use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use std::time::Instant;
use task_local_extensions::Extensions;

/// Logs every outbound call: method, path, status and elapsed time.
///
/// Only whether an `Authorization` header was present is recorded, never
/// its value.
pub struct RequestLoggingMiddleware;

#[async_trait]
impl Middleware for RequestLoggingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let path = req.url().path().to_owned();
        let authorized = req.headers().contains_key(AUTHORIZATION);
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::info!(
                method = %method,
                path = %path,
                authorized,
                status = response.status().as_u16(),
                elapsed_ms,
                "Outbound request completed"
            ),
            Err(e) => tracing::warn!(
                method = %method,
                path = %path,
                authorized,
                elapsed_ms,
                error = %e,
                "Outbound request failed"
            ),
        }

        result
    }
}
