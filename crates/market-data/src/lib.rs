use analysis_core::{AnalysisError, Bar, MarketDataProvider, NewsItem, OverviewRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://finance-query.com/v2";

/// HTTP client for the finance-query API
#[derive(Clone)]
pub struct FinanceQueryClient {
    base_url: String,
    client: Client,
}

impl FinanceQueryClient {
    pub fn new() -> Self {
        let base_url =
            std::env::var("FINANCE_QUERY_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { base_url, client }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        symbol: &str,
    ) -> Result<T, AnalysisError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AnalysisError::ProviderError(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(AnalysisError::NoData(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(AnalysisError::ProviderError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AnalysisError::ProviderError(e.to_string()))
    }
}

impl Default for FinanceQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for FinanceQueryClient {
    async fn get_chart(&self, symbol: &str, range: &str) -> Result<Vec<Bar>, AnalysisError> {
        let endpoint = format!("chart/{}", symbol);
        let chart: ChartResponse = self
            .get_json(&endpoint, &[("range", range), ("interval", "1d")], symbol)
            .await?;

        let bars = bars_from_chart(chart);
        if bars.is_empty() {
            return Err(AnalysisError::NoData(symbol.to_string()));
        }

        tracing::debug!("Fetched {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }

    async fn get_overview(&self, symbol: &str) -> Result<OverviewRecord, AnalysisError> {
        let endpoint = format!("quote/{}", symbol);
        let quotes: QuoteEnvelope = self.get_json(&endpoint, &[], symbol).await?;

        quotes
            .into_vec()
            .into_iter()
            .next()
            .map(|quote| overview_from_quote(quote, symbol))
            .ok_or_else(|| AnalysisError::NoData(symbol.to_string()))
    }

    /// One batch request; the endpoint answers a lone symbol with a bare
    /// object and several with an array.
    async fn get_overviews(&self, symbols: &[String]) -> Result<Vec<OverviewRecord>, AnalysisError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let joined = symbols.join(",");
        let endpoint = format!("quote/{}", joined);
        let quotes: QuoteEnvelope = self.get_json(&endpoint, &[], &joined).await?;

        Ok(quotes
            .into_vec()
            .into_iter()
            .map(|quote| {
                let symbol = quote.symbol.clone().unwrap_or_default();
                overview_from_quote(quote, &symbol)
            })
            .collect())
    }

    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>, AnalysisError> {
        let endpoint = format!("news/{}", symbol);
        let items: Vec<NewsEnvelope> = self.get_json(&endpoint, &[], symbol).await?;

        Ok(items.into_iter().filter_map(news_item).collect())
    }
}

fn bars_from_chart(chart: ChartResponse) -> Vec<Bar> {
    chart
        .candles
        .into_iter()
        .map(|c| Bar {
            timestamp: DateTime::from_timestamp(c.timestamp, 0).unwrap_or_else(Utc::now),
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            volume: c.volume,
        })
        .collect()
}

fn overview_from_quote(quote: QuoteResponse, symbol: &str) -> OverviewRecord {
    OverviewRecord {
        symbol: symbol.to_uppercase(),
        name: quote.long_name.or(quote.short_name),
        sector: quote.sector,
        market_cap: quote.market_cap,
        pe_ratio: quote.trailing_pe,
        beta: quote.beta,
        dividend_yield: quote.dividend_yield,
    }
}

fn news_item(envelope: NewsEnvelope) -> Option<NewsItem> {
    let story = match envelope {
        NewsEnvelope::Wrapped { content } => content,
        NewsEnvelope::Direct(story) => story,
    };

    let title = story.title?;
    let published = story
        .pub_date
        .as_deref()
        .and_then(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        })
        .or_else(|| {
            story
                .provider_publish_time
                .and_then(|t| DateTime::from_timestamp(t, 0))
        })
        .unwrap_or_else(Utc::now);

    Some(NewsItem {
        title,
        publisher: story
            .provider
            .and_then(|p| p.display_name)
            .unwrap_or_else(|| "Market News".to_string()),
        link: story
            .click_through_url
            .and_then(|c| c.url)
            .or(story.link)
            .unwrap_or_else(|| "#".to_string()),
        published,
    })
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    #[serde(default)]
    candles: Vec<Candle>,
}

#[derive(Debug, Deserialize)]
struct Candle {
    timestamp: i64, // unix seconds
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteEnvelope {
    Many(Vec<QuoteResponse>),
    One(QuoteResponse),
}

impl QuoteEnvelope {
    fn into_vec(self) -> Vec<QuoteResponse> {
        match self {
            QuoteEnvelope::Many(quotes) => quotes,
            QuoteEnvelope::One(quote) => vec![quote],
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default, rename = "longName")]
    long_name: Option<String>,
    #[serde(default, rename = "shortName")]
    short_name: Option<String>,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default, rename = "marketCap")]
    market_cap: Option<f64>,
    #[serde(default, rename = "trailingPE")]
    trailing_pe: Option<f64>,
    #[serde(default)]
    beta: Option<f64>,
    #[serde(default, rename = "dividendYield")]
    dividend_yield: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NewsEnvelope {
    Wrapped { content: NewsStory },
    Direct(NewsStory),
}

#[derive(Debug, Deserialize)]
struct NewsStory {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    provider: Option<NewsProvider>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default, rename = "clickThroughUrl")]
    click_through_url: Option<NewsLink>,
    #[serde(default, rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(default, rename = "providerPublishTime")]
    provider_publish_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct NewsProvider {
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsLink {
    #[serde(default)]
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_chart_decoding() {
        let payload = r#"{
            "candles": [
                {"timestamp": 1700000000, "open": 10.0, "high": 11.0, "low": 9.5, "close": 10.5, "volume": 1200000.0},
                {"timestamp": 1700086400, "open": 10.5, "high": 10.9, "low": 10.2, "close": 10.8}
            ]
        }"#;
        let chart: ChartResponse = serde_json::from_str(payload).unwrap();
        let bars = bars_from_chart(chart);

        assert_eq!(bars.len(), 2);
        assert!((bars[0].close - 10.5).abs() < 1e-9);
        assert_eq!(bars[0].timestamp.timestamp(), 1_700_000_000);
        // Missing volume defaults to zero
        assert_eq!(bars[1].volume, 0.0);
    }

    #[test]
    fn test_empty_chart_decodes_to_no_bars() {
        let chart: ChartResponse = serde_json::from_str("{}").unwrap();
        assert!(bars_from_chart(chart).is_empty());
    }

    #[test]
    fn test_single_quote_decoding() {
        let payload = r#"{
            "symbol": "AAPL",
            "longName": "Apple Inc.",
            "sector": "Technology",
            "marketCap": 2800000000000.0,
            "trailingPE": 29.5,
            "beta": 1.25,
            "dividendYield": 0.0055
        }"#;
        let envelope: QuoteEnvelope = serde_json::from_str(payload).unwrap();
        let quotes = envelope.into_vec();

        assert_eq!(quotes.len(), 1);
        let overview = overview_from_quote(quotes.into_iter().next().unwrap(), "aapl");
        assert_eq!(overview.symbol, "AAPL");
        assert_eq!(overview.name.as_deref(), Some("Apple Inc."));
        assert!((overview.pe_ratio.unwrap() - 29.5).abs() < 1e-9);
        assert!((overview.dividend_yield.unwrap() - 0.0055).abs() < 1e-9);
    }

    #[test]
    fn test_batch_quote_decoding() {
        let payload = r#"[
            {"symbol": "MSFT", "shortName": "Microsoft", "marketCap": 3000000000000.0},
            {"symbol": "KO", "shortName": "Coca-Cola"}
        ]"#;
        let envelope: QuoteEnvelope = serde_json::from_str(payload).unwrap();
        let quotes = envelope.into_vec();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol.as_deref(), Some("MSFT"));
        assert!(quotes[1].market_cap.is_none());
    }

    #[test]
    fn test_sparse_quote_keeps_field_absence() {
        let envelope: QuoteEnvelope = serde_json::from_str(r#"{"symbol": "X"}"#).unwrap();
        let overview =
            overview_from_quote(envelope.into_vec().into_iter().next().unwrap(), "X");

        assert!(overview.name.is_none());
        assert!(overview.market_cap.is_none());
        assert!(overview.pe_ratio.is_none());
        assert!(overview.beta.is_none());
        assert!(overview.dividend_yield.is_none());
    }

    #[test]
    fn test_wrapped_news_decoding() {
        let payload = r#"[
            {"content": {
                "title": "Shares climb",
                "provider": {"displayName": "Newswire"},
                "clickThroughUrl": {"url": "https://example.com/a"},
                "pubDate": "2025-06-01T12:30:00Z"
            }},
            {"title": "Direct item", "link": "https://example.com/b", "providerPublishTime": 1748000000}
        ]"#;
        let envelopes: Vec<NewsEnvelope> = serde_json::from_str(payload).unwrap();
        let items: Vec<NewsItem> = envelopes.into_iter().filter_map(news_item).collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Shares climb");
        assert_eq!(items[0].publisher, "Newswire");
        assert_eq!(items[0].link, "https://example.com/a");
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(items[0].published, expected);
        assert_eq!(items[1].publisher, "Market News");
        assert_eq!(items[1].link, "https://example.com/b");
        assert_eq!(items[1].published.timestamp(), 1_748_000_000);
    }

    #[test]
    fn test_untitled_news_items_are_dropped() {
        let payload = r#"[{"link": "https://example.com/c"}]"#;
        let envelopes: Vec<NewsEnvelope> = serde_json::from_str(payload).unwrap();
        let items: Vec<NewsItem> = envelopes.into_iter().filter_map(news_item).collect();

        assert!(items.is_empty());
    }
}
