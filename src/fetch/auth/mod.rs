//! Socrata app-token client decorators.
//!
//! Anonymous requests to Socrata endpoints share a pooled rate limit;
//! registering an application token moves requests onto the token's own
//! allowance. The token can travel either as the `X-App-Token` header
//! ([`AppToken`]) or as the `$$app_token` query parameter ([`UrlParam`]),
//! which survives proxies that strip custom headers.

mod app_token;
mod url_param;

pub use app_token::AppToken;
pub use url_param::UrlParam;
