use anyhow::{Context, Result};
use scraper::{Html, Selector};

use crate::config::Config;
use crate::fetcher::parse::normalize_price;

/// Fetches the product page and extracts the current price.
///
/// The HTTP client and the parsed selector are built once at startup; a
/// malformed selector is a configuration error and fails construction.
pub struct PriceFetcher {
    client: reqwest::Client,
    url: String,
    selector: Selector,
}

impl PriceFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(&config.request.user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        let selector = parse_selector(&config.selector.price_css_selector)?;

        Ok(Self {
            client,
            url: config.product.url.clone(),
            selector,
        })
    }

    /// Poll the page once. Every failure path (network error, HTTP error
    /// status, selector miss, unparsable price text) collapses to `None` so
    /// the monitor loop can keep running; the next cycle is the retry.
    pub async fn fetch(&self) -> Option<f64> {
        let response = self.client.get(&self.url).send().await.ok()?;
        let body = response.error_for_status().ok()?.text().await.ok()?;
        extract_price(&body, &self.selector)
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| anyhow::anyhow!("Invalid CSS selector {:?}: {}", css, e))
}

/// Find the first element matched by the selector and normalize its text.
fn extract_price(html: &str, selector: &Selector) -> Option<f64> {
    let document = Html::parse_document(html);
    let element = document.select(selector).next()?;
    let text: String = element.text().collect();
    normalize_price(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(css: &str) -> Selector {
        parse_selector(css).unwrap()
    }

    #[test]
    fn test_extract_price_from_matching_element() {
        let html = r#"<html><body>
            <div id="product"><span class="price">$1,299.00</span></div>
        </body></html>"#;
        assert_eq!(extract_price(html, &selector("span.price")), Some(1299.0));
    }

    #[test]
    fn test_extract_price_selector_miss() {
        let html = r#"<html><body><span class="cost">$10.00</span></body></html>"#;
        assert_eq!(extract_price(html, &selector("span.price")), None);
    }

    #[test]
    fn test_extract_price_unparsable_text() {
        let html = r#"<html><body><span class="price">Out of stock</span></body></html>"#;
        assert_eq!(extract_price(html, &selector("span.price")), None);
    }

    #[test]
    fn test_extract_price_nested_text_nodes() {
        // Price split across child elements, as many shops render it
        let html = r#"<html><body>
            <span class="price"><sup>$</sup>49<small>.99</small></span>
        </body></html>"#;
        assert_eq!(extract_price(html, &selector("span.price")), Some(49.99));
    }

    #[test]
    fn test_extract_price_first_match_wins() {
        let html = r#"<html><body>
            <span class="price">$20.00</span>
            <span class="price">$30.00</span>
        </body></html>"#;
        assert_eq!(extract_price(html, &selector("span.price")), Some(20.0));
    }

    #[test]
    fn test_invalid_selector_is_fatal() {
        assert!(parse_selector("span..price[").is_err());
    }
}
