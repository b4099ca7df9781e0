use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{component}: need at least {required} bars, got {actual}")]
    InsufficientData {
        component: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("No data available for {0}")]
    NoData(String),
}
