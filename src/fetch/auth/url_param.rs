use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends an app token as a URL query
/// parameter.
///
/// `param_name` is the query parameter name and `token` its value. Socrata
/// accepts `$$app_token` as the query-string equivalent of the
/// `X-App-Token` header, which survives proxies that strip custom headers.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub token: String,
}

impl<C> UrlParam<C> {
    /// Convenience constructor using the standard Socrata `$$app_token`
    /// parameter.
    pub fn socrata(inner: C, token: String) -> Self {
        Self {
            inner,
            param_name: "$$app_token".to_string(),
            token,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.token);
        self.inner.execute(req).await
    }
}
