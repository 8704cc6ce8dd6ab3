//! Headless-browser scraping of merolagani.com.

mod merolagani;
mod session;

pub mod selectors;

pub use merolagani::MerolaganiSource;
pub use session::ScrapeSession;
