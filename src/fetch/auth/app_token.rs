use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::HeaderName;

/// An [`HttpClient`] wrapper that injects an app token as an HTTP header.
///
/// `header_name` is the header field to set and `token` the raw value
/// written into it. Socrata expects `X-App-Token`.
pub struct AppToken<C> {
    pub inner: C,
    pub header_name: String,
    pub token: String,
}

impl<C> AppToken<C> {
    /// Convenience constructor using the standard Socrata `X-App-Token` header.
    pub fn socrata(inner: C, token: String) -> Self {
        Self {
            inner,
            header_name: "X-App-Token".to_string(),
            token,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for AppToken<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let header_name = HeaderName::from_bytes(self.header_name.as_bytes())
            .expect("AppToken: invalid header name");
        req.headers_mut()
            .insert(header_name, self.token.parse().unwrap());
        self.inner.execute(req).await
    }
}
