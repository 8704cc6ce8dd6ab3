use std::env;
use std::time::Duration;

use crate::scrape::selectors;

/// Default WebDriver endpoint when `NEPSEWATCH_WEBDRIVER_URL` is unset.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Scraper settings with site-appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// WebDriver endpoint the browser session is negotiated against.
    pub webdriver_url: String,
    /// Site root the company pages hang off.
    pub base_url: String,
    /// Run the browser headless.
    pub headless: bool,
    /// Hard ceiling on a single page navigation.
    pub page_timeout: Duration,
    /// How long to wait for the price element to render.
    pub element_timeout: Duration,
    /// Minimum spacing between consecutive page loads.
    pub min_nav_interval: Duration,
    /// Upper bound of the random jitter added to each pause.
    pub nav_jitter: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            webdriver_url: env::var("NEPSEWATCH_WEBDRIVER_URL")
                .unwrap_or_else(|_| String::from(DEFAULT_WEBDRIVER_URL)),
            base_url: String::from(selectors::DEFAULT_BASE_URL),
            headless: true,
            page_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(10),
            min_nav_interval: Duration::from_millis(1_500),
            nav_jitter: Duration::from_millis(500),
        }
    }
}

impl ScrapeConfig {
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    pub fn with_nav_pacing(mut self, min_interval: Duration, jitter: Duration) -> Self {
        self.min_nav_interval = min_interval;
        self.nav_jitter = jitter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_override_defaults() {
        let config = ScrapeConfig::default()
            .with_webdriver_url("http://127.0.0.1:9515")
            .with_base_url("http://localhost:8080")
            .with_headless(false)
            .with_page_timeout(Duration::from_secs(5))
            .with_element_timeout(Duration::from_secs(2))
            .with_nav_pacing(Duration::from_millis(100), Duration::from_millis(10));

        assert_eq!(config.webdriver_url, "http://127.0.0.1:9515");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(!config.headless);
        assert_eq!(config.page_timeout, Duration::from_secs(5));
        assert_eq!(config.element_timeout, Duration::from_secs(2));
        assert_eq!(config.min_nav_interval, Duration::from_millis(100));
        assert_eq!(config.nav_jitter, Duration::from_millis(10));
    }

    #[test]
    fn default_pacing_spaces_navigations_out() {
        let config = ScrapeConfig {
            webdriver_url: String::from(DEFAULT_WEBDRIVER_URL),
            ..ScrapeConfig::default()
        };

        assert!(config.headless);
        assert!(config.min_nav_interval >= Duration::from_secs(1));
        assert!(config.element_timeout <= config.page_timeout);
    }
}
