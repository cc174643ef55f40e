//! Concrete sources: one per endpoint, plus the composite.
//!
//! Facet setters live on capability traits rather than on the sources, so a
//! [`CompositeSearch`] can expose image and video facets at once by holding
//! both facet stores.

use crate::escape::escape_query;
use crate::facets::{
    FacetStore, ImageAspect, ImageColor, ImageFace, ImageFacet, ImageSize, ImageStyle,
    VideoAspect, VideoDuration, VideoFacet, VideoResolution, VideoSort,
};
use crate::filters::FilterKey;
use crate::source::{BASE_URL, SearchBuilder, SearchSource};

macro_rules! plain_source {
    ($(#[$meta:meta])* $name:ident => $suffix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            source: SearchSource,
        }

        impl $name {
            pub const SUFFIX: &'static str = $suffix;

            pub fn new(base: &str) -> Self {
                Self {
                    source: SearchSource::new(base, Self::SUFFIX),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(BASE_URL)
            }
        }

        impl SearchBuilder for $name {
            fn source(&self) -> &SearchSource {
                &self.source
            }

            fn source_mut(&mut self) -> &mut SearchSource {
                &mut self.source
            }
        }
    };
}

plain_source!(
    /// Web results.
    WebSearch => "Web"
);
plain_source!(
    /// News articles.
    NewsSearch => "News"
);
plain_source!(
    /// Spelling suggestions for the query.
    SpellingSearch => "SpellingSuggestion"
);
plain_source!(
    /// Related queries.
    RelatedSearch => "RelatedSearch"
);

// ==============================
// Facet capabilities
// ==============================

/// Image facet setters. Every call rewrites `ImageFilters` immediately.
pub trait ImageFacetBuilder: SearchBuilder {
    fn image_facets(&self) -> &FacetStore<ImageFacet>;
    fn image_facets_mut(&mut self) -> &mut FacetStore<ImageFacet>;

    fn image_facet(&mut self, facet: ImageFacet) -> &mut Self {
        let store = self.image_facets_mut();
        store.set(facet);
        let value = store.filter_value();
        self.source_mut()
            .filters_mut()
            .set(FilterKey::ImageFilters, value);
        self
    }

    fn small(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Size(ImageSize::Small))
    }

    fn medium(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Size(ImageSize::Medium))
    }

    fn large(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Size(ImageSize::Large))
    }

    fn square(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Aspect(ImageAspect::Square))
    }

    fn wide(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Aspect(ImageAspect::Wide))
    }

    fn tall(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Aspect(ImageAspect::Tall))
    }

    fn color(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Color(ImageColor::Color))
    }

    fn monochrome(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Color(ImageColor::Monochrome))
    }

    fn photo(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Style(ImageStyle::Photo))
    }

    fn graphics(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Style(ImageStyle::Graphics))
    }

    /// Faces only (`Face:Face`).
    fn head_only(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Face(ImageFace::Face))
    }

    /// Head and shoulders (`Face:Portrait`).
    fn head_and_shoulders(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Face(ImageFace::Portrait))
    }

    fn other_faces(&mut self) -> &mut Self {
        self.image_facet(ImageFacet::Face(ImageFace::Other))
    }
}

/// Video facet setters. Facets rewrite `VideoFilters` immediately; sort
/// order goes straight to `VideoSortBy`.
pub trait VideoFacetBuilder: SearchBuilder {
    fn video_facets(&self) -> &FacetStore<VideoFacet>;
    fn video_facets_mut(&mut self) -> &mut FacetStore<VideoFacet>;

    fn video_facet(&mut self, facet: VideoFacet) -> &mut Self {
        let store = self.video_facets_mut();
        store.set(facet);
        let value = store.filter_value();
        self.source_mut()
            .filters_mut()
            .set(FilterKey::VideoFilters, value);
        self
    }

    fn low_resolution(&mut self) -> &mut Self {
        self.video_facet(VideoFacet::Resolution(VideoResolution::Low))
    }

    fn medium_resolution(&mut self) -> &mut Self {
        self.video_facet(VideoFacet::Resolution(VideoResolution::Medium))
    }

    fn high_resolution(&mut self) -> &mut Self {
        self.video_facet(VideoFacet::Resolution(VideoResolution::High))
    }

    /// Bucket `seconds` with [`VideoDuration::from_seconds`].
    fn duration(&mut self, seconds: u64) -> &mut Self {
        self.video_facet(VideoFacet::Duration(VideoDuration::from_seconds(seconds)))
    }

    fn standard_aspect(&mut self) -> &mut Self {
        self.video_facet(VideoFacet::Aspect(VideoAspect::Standard))
    }

    fn widescreen_aspect(&mut self) -> &mut Self {
        self.video_facet(VideoFacet::Aspect(VideoAspect::Widescreen))
    }

    fn sort_by(&mut self, order: VideoSort) -> &mut Self {
        self.source_mut()
            .filters_mut()
            .set(FilterKey::VideoSortBy, format!("'{}'", order.as_str()));
        self
    }

    fn order_by_relevance(&mut self) -> &mut Self {
        self.sort_by(VideoSort::Relevance)
    }

    fn order_by_date(&mut self) -> &mut Self {
        self.sort_by(VideoSort::Date)
    }
}

// ==============================
// Media sources
// ==============================

#[derive(Debug, Clone)]
pub struct ImageSearch {
    source: SearchSource,
    facets: FacetStore<ImageFacet>,
}

impl ImageSearch {
    pub const SUFFIX: &'static str = "Image";

    pub fn new(base: &str) -> Self {
        Self {
            source: SearchSource::new(base, Self::SUFFIX),
            facets: FacetStore::new(),
        }
    }
}

impl Default for ImageSearch {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}

impl SearchBuilder for ImageSearch {
    fn source(&self) -> &SearchSource {
        &self.source
    }

    fn source_mut(&mut self) -> &mut SearchSource {
        &mut self.source
    }
}

impl ImageFacetBuilder for ImageSearch {
    fn image_facets(&self) -> &FacetStore<ImageFacet> {
        &self.facets
    }

    fn image_facets_mut(&mut self) -> &mut FacetStore<ImageFacet> {
        &mut self.facets
    }
}

#[derive(Debug, Clone)]
pub struct VideoSearch {
    source: SearchSource,
    facets: FacetStore<VideoFacet>,
}

impl VideoSearch {
    pub const SUFFIX: &'static str = "Video";

    pub fn new(base: &str) -> Self {
        Self {
            source: SearchSource::new(base, Self::SUFFIX),
            facets: FacetStore::new(),
        }
    }
}

impl Default for VideoSearch {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}

impl SearchBuilder for VideoSearch {
    fn source(&self) -> &SearchSource {
        &self.source
    }

    fn source_mut(&mut self) -> &mut SearchSource {
        &mut self.source
    }
}

impl VideoFacetBuilder for VideoSearch {
    fn video_facets(&self) -> &FacetStore<VideoFacet> {
        &self.facets
    }

    fn video_facets_mut(&mut self) -> &mut FacetStore<VideoFacet> {
        &mut self.facets
    }
}

// ==============================
// Composite
// ==============================

/// Endpoints a composite request can union, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeSource {
    Web,
    Image,
    Video,
    News,
    Spell,
}

impl CompositeSource {
    pub const ALL: [CompositeSource; 5] = [
        CompositeSource::Web,
        CompositeSource::Image,
        CompositeSource::Video,
        CompositeSource::News,
        CompositeSource::Spell,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CompositeSource::Web => "web",
            CompositeSource::Image => "image",
            CompositeSource::Video => "video",
            CompositeSource::News => "news",
            CompositeSource::Spell => "spell",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

/// One request fanned out over several endpoints.
///
/// The suffix already holds `?Sources=...`, so parameters start with `&`.
#[derive(Debug, Clone)]
pub struct CompositeSearch {
    source: SearchSource,
    sources: Vec<CompositeSource>,
    image: FacetStore<ImageFacet>,
    video: FacetStore<VideoFacet>,
}

impl CompositeSearch {
    /// Requested sources are deduplicated and put in [`CompositeSource::ALL`]
    /// order.
    ///
    /// ```
    /// use bing_search::{BASE_URL, CompositeSearch, CompositeSource, SearchBuilder};
    ///
    /// let c = CompositeSearch::new(BASE_URL, &[CompositeSource::News, CompositeSource::Web]);
    /// assert!(c.source().endpoint().ends_with("Composite?Sources=%27web%2bnews%27"));
    /// assert_eq!(c.source().first_query_char(), '&');
    /// ```
    pub fn new(base: &str, requested: &[CompositeSource]) -> Self {
        let sources: Vec<CompositeSource> = CompositeSource::ALL
            .into_iter()
            .filter(|s| requested.contains(s))
            .collect();
        let list = sources
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("+");
        let suffix = format!("Composite?Sources={}", escape_query(&format!("'{list}'")));
        Self {
            source: SearchSource::new(base, &suffix).with_first_query_char('&'),
            sources,
            image: FacetStore::new(),
            video: FacetStore::new(),
        }
    }

    pub fn sources(&self) -> &[CompositeSource] {
        &self.sources
    }
}

impl SearchBuilder for CompositeSearch {
    fn source(&self) -> &SearchSource {
        &self.source
    }

    fn source_mut(&mut self) -> &mut SearchSource {
        &mut self.source
    }
}

impl ImageFacetBuilder for CompositeSearch {
    fn image_facets(&self) -> &FacetStore<ImageFacet> {
        &self.image
    }

    fn image_facets_mut(&mut self) -> &mut FacetStore<ImageFacet> {
        &mut self.image
    }
}

impl VideoFacetBuilder for CompositeSearch {
    fn video_facets(&self) -> &FacetStore<VideoFacet> {
        &self.video
    }

    fn video_facets_mut(&mut self) -> &mut FacetStore<VideoFacet> {
        &mut self.video
    }
}
