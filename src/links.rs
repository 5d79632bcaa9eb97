//! CoinMarketCap link helpers

use crate::constants::{CMC_CURRENCY_PAGE_URL, CMC_ICON_BASE_URL};

/// 64x64 icon of a currency
pub fn icon_url(currency_id: i64) -> String {
    format!("{}/{}.png", CMC_ICON_BASE_URL, currency_id)
}

/// CoinMarketCap page of a currency
pub fn page_url(slug: &str) -> String {
    format!("{}/{}/", CMC_CURRENCY_PAGE_URL, slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(
            icon_url(1027),
            "https://s2.coinmarketcap.com/static/img/coins/64x64/1027.png"
        );
        assert_eq!(page_url("bitcoin"), "https://coinmarketcap.com/currencies/bitcoin/");
    }
}
