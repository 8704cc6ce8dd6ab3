use std::time::Duration;

use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map};

use crate::config::ScrapeConfig;
use crate::source::FetchError;

/// One live browser session against a WebDriver server.
///
/// A session is scoped: callers open one, run one fetch or one batch through
/// it, and close it. Nothing here is a singleton, so independent batches and
/// tests never share browser state.
pub struct ScrapeSession {
    client: Client,
    page_timeout: Duration,
    element_timeout: Duration,
}

impl ScrapeSession {
    /// Negotiates a fresh browser session.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NetworkError`] when the WebDriver endpoint is
    /// unreachable or refuses the session.
    pub async fn open(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let mut capabilities = Map::new();
        if config.headless {
            capabilities.insert(
                String::from("moz:firefoxOptions"),
                json!({ "args": ["-headless"] }),
            );
        }

        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(&config.webdriver_url)
            .await
            .map_err(|error| {
                FetchError::network(format!(
                    "webdriver session against {}: {error}",
                    config.webdriver_url
                ))
            })?;

        Ok(Self {
            client,
            page_timeout: config.page_timeout,
            element_timeout: config.element_timeout,
        })
    }

    /// Navigates to a page, bounded by the page timeout.
    pub async fn goto(&self, url: &str) -> Result<(), FetchError> {
        match tokio::time::timeout(self.page_timeout, self.client.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(classify_cmd_error(&error, "navigation")),
            Err(_) => Err(FetchError::timeout(
                self.page_timeout,
                format!("navigation to {url}"),
            )),
        }
    }

    /// Waits for an element to render, then returns its text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] when the element never renders within
    /// the element timeout.
    pub async fn element_text(&self, selector: &str) -> Result<String, FetchError> {
        let element = self
            .client
            .wait()
            .at_most(self.element_timeout)
            .for_element(Locator::Css(selector))
            .await
            .map_err(|error| match error {
                CmdError::WaitTimeout => {
                    FetchError::timeout(self.element_timeout, format!("element {selector}"))
                }
                other => classify_cmd_error(&other, selector),
            })?;

        element
            .text()
            .await
            .map_err(|error| classify_cmd_error(&error, selector))
    }

    /// Checks whether an element exists right now, without waiting.
    pub async fn element_exists(&self, selector: &str) -> Result<bool, FetchError> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(_) => Ok(true),
            Err(error) if error.is_miss() => Ok(false),
            Err(error) => Err(classify_cmd_error(&error, selector)),
        }
    }

    /// Ends the browser session. Close failures are ignored; the WebDriver
    /// server reaps orphaned sessions on its own.
    pub async fn close(self) {
        let _ = self.client.close().await;
    }
}

fn classify_cmd_error(error: &CmdError, context: &str) -> FetchError {
    if error.is_miss() {
        return FetchError::parse(format!("{context}: expected element is missing"));
    }
    FetchError::network(format!("{context}: {error}"))
}
