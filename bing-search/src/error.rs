use bing_http::HttpError;
use thiserror::Error;

/// Failures raised while configuring a source or performing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A value outside a closed vocabulary (format, adult level).
    #[error("invalid {param}: {value:?} (expected one of {expected})")]
    InvalidArgument {
        param: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Input that could not be converted to the numeric type a filter needs.
    #[error("cannot convert {param} value {value:?} to a number")]
    Coercion { param: &'static str, value: String },

    #[error(transparent)]
    Transport(#[from] HttpError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
