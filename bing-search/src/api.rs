//! Entry point: hands out fresh sources and performs the authenticated GET.

use crate::error::Result;
use crate::source::{AdultFilter, BASE_URL, ResponseFormat, SearchBuilder};
use crate::variants::{
    CompositeSearch, CompositeSource, ImageSearch, NewsSearch, RelatedSearch, SpellingSearch,
    VideoSearch, WebSearch,
};
use bing_config::BingConfig;
use bing_http::{Auth, HttpClient, RawResponse, RequestOpts};
use std::time::Duration;

/// Filters applied to every source the facade creates.
#[derive(Debug, Clone, Default)]
struct Defaults {
    format: Option<ResponseFormat>,
    adult: Option<AdultFilter>,
    market: Option<String>,
}

/// Client for the Azure Marketplace Bing Search API.
///
/// The API key is sent as both the username and the password of HTTP Basic
/// auth.
///
/// ```no_run
/// use bing_search::{BingSearchApi, SearchBuilder};
///
/// # async fn demo() -> Result<(), bing_search::SearchError> {
/// let api = BingSearchApi::new("my-key")?;
/// let mut web = api.web();
/// web.query("rust borrow checker").take(10).format("json")?;
/// let resp = api.search(&web).await?;
/// println!("{}", resp.status);
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct BingSearchApi {
    http: HttpClient,
    key: String,
    endpoint: String,
    defaults: Defaults,
}

impl BingSearchApi {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            key: key.into(),
            endpoint: BASE_URL.to_string(),
            defaults: Defaults::default(),
        })
    }

    /// Build from loaded configuration. Default `format`/`adult` values are
    /// validated here, so a bad config fails before any source exists.
    pub fn from_config(cfg: &BingConfig) -> Result<Self> {
        let mut api = Self::new(cfg.api_key.trim())?;
        if let Some(endpoint) = &cfg.endpoint {
            api = api.with_endpoint(endpoint);
        }
        if let Some(secs) = cfg.timeout_secs {
            api = api.with_timeout(Duration::from_secs(secs));
        }
        api.defaults = Defaults {
            format: cfg.format.as_deref().map(str::parse::<ResponseFormat>).transpose()?,
            adult: cfg.adult.as_deref().map(str::parse::<AdultFilter>).transpose()?,
            market: cfg.market.clone(),
        };
        tracing::debug!(
            endpoint = %api.endpoint,
            timeout_secs = ?cfg.timeout_secs,
            default_format = ?api.defaults.format,
            default_adult = ?api.defaults.adult,
            default_market = ?api.defaults.market,
            "bing.api.configured"
        );
        Ok(api)
    }

    /// Point every new source at another base URL (mock servers, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn prepare<S: SearchBuilder>(&self, mut source: S) -> S {
        if let Some(fmt) = self.defaults.format {
            source.response_format(fmt);
        }
        if let Some(level) = self.defaults.adult {
            source.adult_filter(level);
        }
        if let Some(market) = &self.defaults.market {
            source.for_market(market);
        }
        source
    }

    pub fn web(&self) -> WebSearch {
        self.prepare(WebSearch::new(&self.endpoint))
    }

    pub fn image(&self) -> ImageSearch {
        self.prepare(ImageSearch::new(&self.endpoint))
    }

    pub fn video(&self) -> VideoSearch {
        self.prepare(VideoSearch::new(&self.endpoint))
    }

    pub fn news(&self) -> NewsSearch {
        self.prepare(NewsSearch::new(&self.endpoint))
    }

    pub fn spell(&self) -> SpellingSearch {
        self.prepare(SpellingSearch::new(&self.endpoint))
    }

    pub fn related(&self) -> RelatedSearch {
        self.prepare(RelatedSearch::new(&self.endpoint))
    }

    /// Composite over the named sources (`web`, `image`, `video`, `news`,
    /// `spell`). Unknown names are skipped.
    pub fn composite<I, N>(&self, names: I) -> CompositeSearch
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut requested = Vec::new();
        for name in names {
            match CompositeSource::from_name(name.as_ref()) {
                Some(s) => requested.push(s),
                None => tracing::debug!(name = name.as_ref(), "bing.api.composite.unknown_source"),
            }
        }
        self.prepare(CompositeSearch::new(&self.endpoint, &requested))
    }

    /// Build the source's URL and perform exactly one GET.
    ///
    /// Whatever the server answers is returned as-is; only transport
    /// failures become errors.
    pub async fn search<S: SearchBuilder>(&self, source: &S) -> Result<RawResponse> {
        let url = source.build();
        tracing::debug!(endpoint = %source.source().endpoint(), "bing.api.search");
        let resp = self
            .http
            .get_raw(
                &url,
                RequestOpts {
                    auth: Some(Auth::Basic {
                        username: &self.key,
                        password: &self.key,
                    }),
                    ..Default::default()
                },
            )
            .await?;
        tracing::debug!(status = %resp.status, body_len = resp.body.len(), "bing.api.search.done");
        Ok(resp)
    }
}
