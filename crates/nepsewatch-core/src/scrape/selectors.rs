//! URL shapes and CSS anchors for merolagani.com.
//!
//! The company detail page is an ASP.NET WebForms page, so the interesting
//! labels carry long generated control ids. They have been stable for years
//! but live here in one place in case the site ever regenerates them.

/// Site root the company pages hang off.
pub const DEFAULT_BASE_URL: &str = "https://merolagani.com";

/// Last-traded price label on the company detail page. Filled in by script
/// after the document loads, so it must be waited for, not just found.
pub const MARKET_PRICE: &str = "#ctl00_ContentPlaceHolder1_CompanyDetail1_lblMarketPrice";

/// Daily move label next to the price. The site publishes the move as a
/// percentage.
pub const PERCENT_CHANGE: &str = "#ctl00_ContentPlaceHolder1_CompanyDetail1_lblChange";

/// Search box in the site-wide chrome. Present on every page the site
/// serves, including the empty detail pane an unknown symbol lands on,
/// which makes it a usable liveness probe.
pub const SITE_CHROME: &str = "#ctl00_AutoSuggest1_txtAutoSuggest";

/// Company detail page URL for one symbol.
pub fn company_page_url(base_url: &str, symbol: &str) -> String {
    format!(
        "{}/CompanyDetail.aspx?symbol={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_page_url_joins_base_and_symbol() {
        assert_eq!(
            company_page_url(DEFAULT_BASE_URL, "NABIL"),
            "https://merolagani.com/CompanyDetail.aspx?symbol=NABIL"
        );
    }

    #[test]
    fn trailing_slash_on_base_does_not_double_up() {
        assert_eq!(
            company_page_url("http://localhost:8080/", "NABIL"),
            "http://localhost:8080/CompanyDetail.aspx?symbol=NABIL"
        );
    }

    #[test]
    fn symbol_is_percent_encoded() {
        let url = company_page_url(DEFAULT_BASE_URL, "NABIL D.CAP");
        assert!(url.ends_with("symbol=NABIL%20D.CAP"));
    }
}
