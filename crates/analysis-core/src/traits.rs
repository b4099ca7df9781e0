use async_trait::async_trait;
use crate::{AnalysisError, Bar, NewsItem, OverviewRecord};

/// Trait for market data providers. The analysis layer only sees this
/// interface; which upstream supplied the bars is invisible to it.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for a range expression such as "1y" or "2y"
    async fn get_chart(&self, symbol: &str, range: &str) -> Result<Vec<Bar>, AnalysisError>;

    /// Company overview; individually missing fields stay absent
    async fn get_overview(&self, symbol: &str) -> Result<OverviewRecord, AnalysisError>;

    /// Overviews for several symbols. Providers with a batch endpoint
    /// override this; the default issues one request per symbol.
    async fn get_overviews(&self, symbols: &[String]) -> Result<Vec<OverviewRecord>, AnalysisError> {
        let mut records = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            records.push(self.get_overview(symbol).await?);
        }
        Ok(records)
    }

    /// Recent news items for a symbol
    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>, AnalysisError>;
}
