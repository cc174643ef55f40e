//! Fluent query builder and thin client for the Azure Marketplace Bing
//! Search API.
//!
//! - [`BingSearchApi`] hands out one fresh source per call (`web`, `image`,
//!   `video`, `news`, `spell`, `related`, `composite`) and performs the
//!   authenticated GET in [`BingSearchApi::search`]
//! - [`SearchBuilder`] carries the setters every source shares; facet
//!   setters live on [`ImageFacetBuilder`] and [`VideoFacetBuilder`]
//! - Filters are serialized in the order they were first set and escaped
//!   once with [`escape_query`]
//!
//! ```
//! use bing_search::{BingSearchApi, SearchBuilder, VideoFacetBuilder};
//!
//! let api = BingSearchApi::new("key").unwrap();
//! let mut video = api.video();
//! video
//!     .query("rust conf")
//!     .duration(1800)
//!     .order_by_date()
//!     .format("json")
//!     .unwrap();
//!
//! assert_eq!(
//!     video.build(),
//!     "https://api.datamarket.azure.com/Data.ashx/Bing/Search/v1/Video\
//!      ?Query=%27rust%20conf%27&VideoFilters=%27Duration%3aMedium%27\
//!      &VideoSortBy=%27Date%27&$format=json"
//! );
//! ```
//!
//! Responses are returned untouched; parsing the payload is up to the caller.

pub mod api;
pub mod error;
pub mod escape;
pub mod facets;
pub mod filters;
pub mod source;
pub mod variants;

pub use api::BingSearchApi;
pub use bing_http::RawResponse;
pub use error::{Result, SearchError};
pub use escape::escape_query;
pub use facets::{
    Facet, FacetStore, ImageAspect, ImageColor, ImageFace, ImageFacet, ImageSize, ImageStyle,
    MEDIUM_VID, SHORT_VID, VideoAspect, VideoDuration, VideoFacet, VideoResolution, VideoSort,
};
pub use filters::{FilterKey, FilterStore, FilterValue};
pub use source::{AdultFilter, BASE_URL, ResponseFormat, SearchBuilder, SearchSource};
pub use variants::{
    CompositeSearch, CompositeSource, ImageFacetBuilder, ImageSearch, NewsSearch, RelatedSearch,
    SpellingSearch, VideoFacetBuilder, VideoSearch, WebSearch,
};
