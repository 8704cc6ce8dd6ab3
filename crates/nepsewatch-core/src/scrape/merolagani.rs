use std::future::Future;
use std::pin::Pin;

use crate::config::ScrapeConfig;
use crate::pacing::NavigationPacer;
use crate::scrape::selectors;
use crate::scrape::session::ScrapeSession;
use crate::source::{FetchError, FetchOutcome, QuoteSource};
use crate::{Quote, Symbol, UtcDateTime};

/// Scraper for merolagani.com company detail pages.
///
/// The site renders quotes with client-side script, so every fetch drives a
/// real browser through a WebDriver server: navigate to the company page,
/// wait for the price label to render, read price and percent change off
/// the page. Single fetches open a session of their own; batches share one
/// session across all symbols and still close it before returning.
pub struct MerolaganiSource {
    config: ScrapeConfig,
    pacer: NavigationPacer,
}

impl MerolaganiSource {
    pub fn new(config: ScrapeConfig) -> Self {
        let pacer = NavigationPacer::new(config.min_nav_interval, config.nav_jitter);
        Self { config, pacer }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    async fn fetch_with_session(
        &self,
        session: &ScrapeSession,
        symbol: &Symbol,
    ) -> Result<Quote, FetchError> {
        self.pacer.pause().await;

        let url = selectors::company_page_url(&self.config.base_url, symbol.as_str());
        session.goto(&url).await?;

        let price_text = match session.element_text(selectors::MARKET_PRICE).await {
            Ok(text) => text,
            Err(FetchError::Timeout { waited_ms, detail }) => {
                return Err(self
                    .classify_missing_price(session, symbol, waited_ms, detail)
                    .await);
            }
            Err(other) => return Err(other),
        };
        let change_text = session.element_text(selectors::PERCENT_CHANGE).await?;

        build_quote(&price_text, &change_text, UtcDateTime::now())
    }

    /// A price label that never rendered is either an unknown symbol or a
    /// stalled page. The site serves its normal chrome around an empty
    /// detail pane for unknown symbols, so the chrome doubles as the probe:
    /// chrome present means the page loaded and the symbol does not exist.
    async fn classify_missing_price(
        &self,
        session: &ScrapeSession,
        symbol: &Symbol,
        waited_ms: u64,
        detail: String,
    ) -> FetchError {
        match session.element_exists(selectors::SITE_CHROME).await {
            Ok(true) => FetchError::not_found(symbol.as_str()),
            _ => FetchError::Timeout { waited_ms, detail },
        }
    }
}

impl QuoteSource for MerolaganiSource {
    fn name(&self) -> &str {
        "merolagani"
    }

    fn fetch_quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let session = ScrapeSession::open(&self.config).await?;
            let result = self.fetch_with_session(&session, symbol).await;
            session.close().await;
            result
        })
    }

    fn fetch_batch<'a>(
        &'a self,
        symbols: &'a [Symbol],
    ) -> Pin<Box<dyn Future<Output = Vec<FetchOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let session = match ScrapeSession::open(&self.config).await {
                Ok(session) => session,
                Err(error) => {
                    // No session means no fetch happened anywhere; every
                    // symbol gets the same failure.
                    return symbols
                        .iter()
                        .map(|symbol| FetchOutcome {
                            symbol: symbol.clone(),
                            result: Err(error.clone()),
                        })
                        .collect();
                }
            };

            let mut outcomes = Vec::with_capacity(symbols.len());
            for symbol in symbols {
                let result = self.fetch_with_session(&session, symbol).await;
                outcomes.push(FetchOutcome {
                    symbol: symbol.clone(),
                    result,
                });
            }
            session.close().await;
            outcomes
        })
    }
}

fn build_quote(
    price_text: &str,
    change_text: &str,
    fetched_at: UtcDateTime,
) -> Result<Quote, FetchError> {
    let price = parse_price_text(price_text)?;
    let percent_change = parse_change_text(change_text)?;
    let change = derive_absolute_change(price, percent_change)?;
    Quote::new(price, change, percent_change, fetched_at)
        .map_err(|error| FetchError::parse(error.to_string()))
}

fn parse_price_text(text: &str) -> Result<f64, FetchError> {
    let cleaned: String = text.trim().chars().filter(|ch| *ch != ',').collect();
    if cleaned.is_empty() {
        return Err(FetchError::parse("price label is empty"));
    }
    cleaned.parse::<f64>().map_err(|_| {
        FetchError::parse(format!("price label '{}' is not a number", text.trim()))
    })
}

fn parse_change_text(text: &str) -> Result<f64, FetchError> {
    let trimmed = text.trim();
    let without_suffix = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let cleaned: String = without_suffix.chars().filter(|ch| *ch != ',').collect();
    if cleaned.is_empty() {
        return Err(FetchError::parse("change label is empty"));
    }
    cleaned.parse::<f64>().map_err(|_| {
        FetchError::parse(format!("change label '{trimmed}' is not a number"))
    })
}

/// The site publishes the daily move as a percentage only. The absolute
/// move is derived through the implied previous close:
///
///   previous_close = price / (1 + percent / 100)
///   change         = price - previous_close
fn derive_absolute_change(price: f64, percent_change: f64) -> Result<f64, FetchError> {
    let denominator = 1.0 + percent_change / 100.0;
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(FetchError::parse(format!(
            "percent change {percent_change} implies no valid previous close"
        )));
    }
    let change = price - price / denominator;
    if !change.is_finite() {
        return Err(FetchError::parse("derived change is not finite"));
    }
    Ok(change)
}
