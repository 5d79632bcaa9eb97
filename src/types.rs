//! Types for the currency catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minified currency record (id, name, symbol, slug)
///
/// Also deserializes from the full catalog shape, since unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// CoinMarketCap id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Ticker symbol, not unique across the catalog
    pub symbol: String,
    /// URL slug
    pub slug: String,
}

impl CurrencyRecord {
    /// Create a new record
    pub fn new(
        id: i64,
        name: impl Into<String>,
        symbol: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            slug: slug.into(),
        }
    }

    /// Case-insensitive symbol match against an already uppercased needle
    pub(crate) fn matches_symbol(&self, upper_symbol: &str) -> bool {
        self.symbol.to_uppercase() == upper_symbol
    }
}

impl From<&Currency> for CurrencyRecord {
    fn from(c: &Currency) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            symbol: c.symbol.clone(),
            slug: c.slug.clone(),
        }
    }
}

/// Full currency record as returned by the upstream listing API
///
/// Fields the listing adds beyond the declared ones are kept in `extra`, and
/// history bounds stay as the raw strings the API sent, so a record written
/// back out matches what was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    /// 1 = active, 0 = inactive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<u8>,
    /// "active", "untracked", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Set for tokens living on another chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<i64>,
    #[serde(
        default,
        rename = "first_historical_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_historical_data: Option<String>,
    #[serde(
        default,
        rename = "last_historical_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_historical_data: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Currency {
    /// Whether the listing flags this currency as active
    pub fn is_active(&self) -> bool {
        self.is_active == Some(1)
    }

    /// First historical data point, if present and a valid RFC 3339 timestamp
    pub fn first_historical_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.first_historical_data.as_deref())
    }

    /// Last historical data point, if present and a valid RFC 3339 timestamp
    pub fn last_historical_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.last_historical_data.as_deref())
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw?)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Exchange entry of the upstream listing API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub is_active: u8,
    #[serde(default)]
    pub status: String,
}

/// Envelope of one listing page
#[derive(Debug, Clone, Deserialize)]
pub struct MapAllResponse {
    pub data: MapAllData,
    #[serde(default)]
    pub status: Option<ResponseStatus>,
}

/// Payload of one listing page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapAllData {
    #[serde(default)]
    pub crypto_currency_map: Option<Vec<Currency>>,
    #[serde(default)]
    pub exchange_map: Option<Vec<Exchange>>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Upstream status block
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseStatus {
    pub timestamp: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub elapsed: Option<u64>,
    pub credit_count: Option<u64>,
}

/// Cache directive forwarded to the transport
///
/// Names follow the fetch API. "Unset" is `None` at the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheDirective {
    Default,
    NoCache,
    ForceCache,
    NoStore,
    OnlyIfCached,
    Reload,
}

impl CacheDirective {
    /// Fetch-API name of the directive
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheDirective::Default => "default",
            CacheDirective::NoCache => "no-cache",
            CacheDirective::ForceCache => "force-cache",
            CacheDirective::NoStore => "no-store",
            CacheDirective::OnlyIfCached => "only-if-cached",
            CacheDirective::Reload => "reload",
        }
    }

    /// `Cache-Control` value an HTTP client should send for this directive
    pub fn cache_control(&self) -> Option<&'static str> {
        match self {
            CacheDirective::Default => None,
            CacheDirective::NoCache | CacheDirective::Reload => Some("no-cache"),
            CacheDirective::NoStore => Some("no-store"),
            CacheDirective::ForceCache => Some("max-stale"),
            CacheDirective::OnlyIfCached => Some("only-if-cached"),
        }
    }

    /// Whether a legacy `Pragma: no-cache` header should accompany the request
    pub fn sends_pragma(&self) -> bool {
        matches!(self, CacheDirective::Reload)
    }
}

impl fmt::Display for CacheDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheDirective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(CacheDirective::Default),
            "no-cache" => Ok(CacheDirective::NoCache),
            "force-cache" => Ok(CacheDirective::ForceCache),
            "no-store" => Ok(CacheDirective::NoStore),
            "only-if-cached" => Ok(CacheDirective::OnlyIfCached),
            "reload" => Ok(CacheDirective::Reload),
            other => Err(format!("unknown cache directive: {other}")),
        }
    }
}

/// Lifecycle state of the catalog snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// No data and no outstanding load
    Unloaded,
    /// A load is outstanding; snapshot is stale or absent
    Loading,
    /// Snapshot reflects the most recently completed load
    Ready,
}
