//! Shared builder state and the fluent methods every source exposes.

use crate::error::{Result, SearchError};
use crate::escape::escape_query;
use crate::filters::{FilterKey, FilterStore};
use std::fmt;
use std::str::FromStr;

/// Base endpoint every source suffix is appended to.
pub const BASE_URL: &str = "https://api.datamarket.azure.com/Data.ashx/Bing/Search/v1/";

/// Response encoding requested through `$format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    Atom,
    #[default]
    Json,
}

impl ResponseFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Atom => "atom",
            ResponseFormat::Json => "json",
        }
    }
}

impl AsRef<str> for ResponseFormat {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "atom" => Ok(ResponseFormat::Atom),
            "json" => Ok(ResponseFormat::Json),
            other => Err(SearchError::InvalidArgument {
                param: "format",
                value: other.to_string(),
                expected: "atom, json",
            }),
        }
    }
}

/// Adult content filtering level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdultFilter {
    Off,
    Moderate,
    Strict,
}

impl AdultFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            AdultFilter::Off => "Off",
            AdultFilter::Moderate => "Moderate",
            AdultFilter::Strict => "Strict",
        }
    }
}

impl AsRef<str> for AdultFilter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AdultFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdultFilter {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Off" => Ok(AdultFilter::Off),
            "Moderate" => Ok(AdultFilter::Moderate),
            "Strict" => Ok(AdultFilter::Strict),
            other => Err(SearchError::InvalidArgument {
                param: "adult",
                value: other.to_string(),
                expected: "Off, Moderate, Strict",
            }),
        }
    }
}

/// Endpoint identity plus the filters accumulated for one request.
///
/// Every constructor allocates a fresh [`FilterStore`]; nothing is shared
/// between sources.
#[derive(Debug, Clone)]
pub struct SearchSource {
    endpoint: String,
    first_query_char: char,
    filters: FilterStore,
    format: ResponseFormat,
}

impl SearchSource {
    /// `base` with `suffix` appended; parameters will start with `?`.
    pub fn new(base: &str, suffix: &str) -> Self {
        Self {
            endpoint: format!("{}/{}", base.trim_end_matches('/'), suffix),
            first_query_char: '?',
            filters: FilterStore::new(),
            format: ResponseFormat::default(),
        }
    }

    /// For endpoints whose suffix already carries a query component.
    pub fn with_first_query_char(mut self, c: char) -> Self {
        self.first_query_char = c;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn first_query_char(&self) -> char {
        self.first_query_char
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterStore {
        &mut self.filters
    }

    /// Format last passed to `format`; `json` when never set.
    pub fn active_format(&self) -> ResponseFormat {
        self.format
    }

    /// Serialize the filters and append them to the endpoint.
    ///
    /// Escaping runs once, over the whole parameter string, never over the
    /// endpoint itself.
    pub fn build(&self) -> String {
        let params = self.filters.serialize(self.first_query_char);
        let url = format!("{}{}", self.endpoint, escape_query(&params));
        tracing::debug!(
            endpoint = %self.endpoint,
            params = self.filters.len(),
            "bing.search.build"
        );
        url
    }
}

/// Fluent configuration shared by every source variant.
///
/// Implementors only expose their [`SearchSource`]; every setter returns the
/// implementor itself so calls chain across capability traits:
///
/// ```
/// use bing_search::{BingSearchApi, ImageFacetBuilder, SearchBuilder};
///
/// let api = BingSearchApi::new("key").unwrap();
/// let mut image = api.image();
/// image.query("sunset").take(5).large().square();
/// assert!(image.build().ends_with("?Query=%27sunset%27&$top=5&ImageFilters=%27Size%3aLarge%2bAspect%3aSquare%27"));
/// ```
pub trait SearchBuilder {
    fn source(&self) -> &SearchSource;
    fn source_mut(&mut self) -> &mut SearchSource;

    /// Search text, wrapped in single quotes. Escaping happens in `build`.
    fn query(&mut self, text: &str) -> &mut Self {
        self.source_mut()
            .filters
            .set(FilterKey::Query, format!("'{text}'"));
        self
    }

    /// Number of results (`$top`). Not range-checked.
    fn take(&mut self, n: i64) -> &mut Self {
        self.source_mut().filters.set(FilterKey::Top, n);
        self
    }

    /// Result offset (`$skip`). Not range-checked.
    fn skip(&mut self, n: i64) -> &mut Self {
        self.source_mut().filters.set(FilterKey::Skip, n);
        self
    }

    /// Parse and set the response format; only `atom` and `json` pass.
    fn format(&mut self, fmt: impl AsRef<str>) -> Result<&mut Self> {
        let parsed = fmt.as_ref().parse::<ResponseFormat>().inspect_err(|e| {
            tracing::warn!(error = %e, "bing.search.invalid_argument");
        })?;
        Ok(self.response_format(parsed))
    }

    fn response_format(&mut self, fmt: ResponseFormat) -> &mut Self {
        let source = self.source_mut();
        source.format = fmt;
        source.filters.set(FilterKey::Format, fmt.as_str());
        self
    }

    /// Parse and set the adult filter; only `Off`, `Moderate` and `Strict` pass.
    fn adult(&mut self, level: impl AsRef<str>) -> Result<&mut Self> {
        let parsed = level.as_ref().parse::<AdultFilter>().inspect_err(|e| {
            tracing::warn!(error = %e, "bing.search.invalid_argument");
        })?;
        Ok(self.adult_filter(parsed))
    }

    fn adult_filter(&mut self, level: AdultFilter) -> &mut Self {
        self.source_mut()
            .filters
            .set(FilterKey::Adult, level.as_str());
        self
    }

    fn geolocate(&mut self, latitude: f64, longitude: f64) -> &mut Self {
        let filters = &mut self.source_mut().filters;
        filters.set(FilterKey::Latitude, latitude);
        filters.set(FilterKey::Longitude, longitude);
        self
    }

    /// Like [`geolocate`](Self::geolocate) for textual input. Both values are
    /// parsed before anything is stored.
    fn geolocate_parsed(&mut self, latitude: &str, longitude: &str) -> Result<&mut Self> {
        let lat = parse_coordinate("latitude", latitude)?;
        let lon = parse_coordinate("longitude", longitude)?;
        Ok(self.geolocate(lat, lon))
    }

    /// Market code (e.g. `en-US`), stored verbatim.
    fn for_market(&mut self, market: &str) -> &mut Self {
        self.source_mut().filters.set(FilterKey::Market, market);
        self
    }

    fn enable_highlighting(&mut self) -> &mut Self {
        self.source_mut()
            .filters
            .append(FilterKey::Option, "EnableHighlighting");
        self
    }

    fn disable_location_detection(&mut self) -> &mut Self {
        self.source_mut()
            .filters
            .append(FilterKey::Option, "DisableLocationDetection");
        self
    }

    fn build(&self) -> String {
        self.source().build()
    }
}

impl SearchBuilder for SearchSource {
    fn source(&self) -> &SearchSource {
        self
    }

    fn source_mut(&mut self) -> &mut SearchSource {
        self
    }
}

fn parse_coordinate(param: &'static str, raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        tracing::warn!(param, value = raw, "bing.search.coercion_failed");
        SearchError::Coercion {
            param,
            value: raw.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterValue;

    fn web() -> SearchSource {
        SearchSource::new(BASE_URL, "Web")
    }

    #[test]
    fn endpoint_joins_base_and_suffix() {
        assert_eq!(
            web().endpoint(),
            "https://api.datamarket.azure.com/Data.ashx/Bing/Search/v1/Web"
        );
        let local = SearchSource::new("http://127.0.0.1:9000", "News");
        assert_eq!(local.endpoint(), "http://127.0.0.1:9000/News");
    }

    #[test]
    fn query_is_quoted_and_escaped_on_build() {
        let mut s = web();
        s.query("hello world");
        assert_eq!(
            s.build(),
            format!("{BASE_URL}Web?Query=%27hello%20world%27")
        );
    }

    #[test]
    fn fields_are_ampersand_joined_in_call_order() {
        let mut s = web();
        s.take(10).skip(20).for_market("en-US");
        assert_eq!(
            s.build(),
            format!("{BASE_URL}Web?$top=10&$skip=20&Market=en-US")
        );
    }

    #[test]
    fn call_order_changes_the_url() {
        let mut a = web();
        a.query("x").take(3);
        let mut b = web();
        b.take(3).query("x");
        assert_ne!(a.build(), b.build());
    }

    #[test]
    fn format_accepts_atom_and_json_only() {
        let mut s = web();
        assert!(s.format("json").is_ok());
        assert_eq!(s.active_format(), ResponseFormat::Json);
        s.format(ResponseFormat::Atom).unwrap();
        assert_eq!(s.active_format(), ResponseFormat::Atom);

        let err = s.format("xml").unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidArgument { param: "format", .. }
        ));
        // rejected value never reaches the store
        assert_eq!(
            s.filters().get(FilterKey::Format),
            Some(&FilterValue::Text("atom".into()))
        );
    }

    #[test]
    fn adult_rejects_unknown_levels_before_writing() {
        let mut s = web();
        let err = s.adult("Lenient").unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument { param: "adult", .. }));
        assert!(s.filters().get(FilterKey::Adult).is_none());

        s.adult("Strict").unwrap().adult_filter(AdultFilter::Off);
        assert_eq!(s.build(), format!("{BASE_URL}Web?Adult=Off"));
    }

    #[test]
    fn adult_is_case_sensitive() {
        assert!(web().adult("strict").is_err());
    }

    #[test]
    fn geolocate_stores_floats() {
        let mut s = web();
        s.geolocate(47.0, -122.3321);
        assert_eq!(
            s.build(),
            format!("{BASE_URL}Web?Latitude=47.0&Longitude=-122.3321")
        );
    }

    #[test]
    fn geolocate_parsed_fails_before_writing() {
        let mut s = web();
        let err = s.geolocate_parsed("47.6", "west").unwrap_err();
        assert!(matches!(
            err,
            SearchError::Coercion { param: "longitude", .. }
        ));
        assert!(s.filters().is_empty());

        s.geolocate_parsed(" 47.6 ", "-122").unwrap();
        assert_eq!(
            s.filters().get(FilterKey::Longitude),
            Some(&FilterValue::Float(-122.0))
        );
    }

    #[test]
    fn options_accumulate_in_call_order() {
        let mut s = web();
        s.enable_highlighting().disable_location_detection();
        assert_eq!(
            s.build(),
            format!("{BASE_URL}Web?Option=EnableHighlighting%2bDisableLocationDetection")
        );

        let mut t = web();
        t.disable_location_detection().enable_highlighting();
        assert!(t
            .build()
            .ends_with("Option=DisableLocationDetection%2bEnableHighlighting"));
    }

    #[test]
    fn empty_source_builds_bare_endpoint() {
        assert_eq!(web().build(), format!("{BASE_URL}Web"));
    }
}
