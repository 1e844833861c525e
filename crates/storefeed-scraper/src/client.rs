//! HTTP client for the storefront's public `products.json` endpoint.
//!
//! Pagination is page-number based: `?per_page=N&page=M`. The caller drives
//! the page loop; this client performs exactly one request per call with no
//! retry, so a transport failure surfaces immediately and ends the caller's
//! current batch.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::types::ProductsPage;

/// HTTP client for the storefront's public `products.json` endpoint.
///
/// Maps not-found (404) and other non-2xx responses to typed errors. An
/// empty `products` array in a 2xx response is not an error; callers treat
/// it as the end-of-data signal.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one page of products from the store's `products.json`
    /// endpoint.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] — HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::Deserialize`] — response body is not valid JSON.
    /// - [`ScraperError::InvalidShopUrl`] — the shop URL cannot be parsed.
    pub async fn fetch_page(
        &self,
        shop_url: &str,
        per_page: u32,
        page: u32,
    ) -> Result<ProductsPage, ScraperError> {
        let url = Self::products_url(shop_url, per_page, page)?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<ProductsPage>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("products page {page} from {shop_url}"),
                source: e,
            }
        })?;

        tracing::debug!(page, products = parsed.products.len(), "fetched catalog page");
        Ok(parsed)
    }

    /// Builds the `products.json` URL for the given shop, page size, and
    /// page number.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidShopUrl`] if the extracted origin cannot
    /// be parsed as a valid URL base.
    fn products_url(shop_url: &str, per_page: u32, page: u32) -> Result<String, ScraperError> {
        let origin = extract_store_origin(shop_url);
        let base = format!("{origin}/products.json");
        let mut url = reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidShopUrl {
            shop_url: shop_url.to_owned(),
            reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
        })?;

        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());

        Ok(url.to_string())
    }
}

/// Extracts the scheme+host origin from a shop URL.
///
/// Given `"https://shop.example.com/collections/all"`, returns
/// `"https://shop.example.com"`. This ensures `products.json` is always
/// fetched from the store root, regardless of whether the configured shop
/// URL includes a collection path.
#[must_use]
pub fn extract_store_origin(shop_url: &str) -> String {
    reqwest::Url::parse(shop_url).map_or_else(
        |e| {
            tracing::warn!(
                shop_url,
                error = %e,
                "could not parse shop URL — falling back to string split for origin extraction"
            );
            // fallback: take "https://host" by splitting on '/' and taking first 3 parts
            shop_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
