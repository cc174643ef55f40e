//! Image and video facets, folded into one composite filter value.

/// Longest video, in seconds, still classed as `Short`.
pub const SHORT_VID: u64 = 300;
/// Longest video, in seconds, still classed as `Medium`.
pub const MEDIUM_VID: u64 = 12000;

/// A facet is one `Category:Value` pair; each category holds one value.
pub trait Facet: Copy {
    fn category(&self) -> &'static str;
    fn value(&self) -> &'static str;
}

/// Facets in first-set order, at most one per category.
#[derive(Debug, Clone)]
pub struct FacetStore<F> {
    entries: Vec<F>,
}

impl<F> Default for FacetStore<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: Facet> FacetStore<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; a replaced category keeps its slot.
    pub fn set(&mut self, facet: F) {
        match self
            .entries
            .iter_mut()
            .find(|f| f.category() == facet.category())
        {
            Some(slot) => *slot = facet,
            None => self.entries.push(facet),
        }
    }

    pub fn get(&self, category: &str) -> Option<F> {
        self.entries
            .iter()
            .copied()
            .find(|f| f.category() == category)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Size:Large+Aspect:Square`, unescaped.
    pub fn compose(&self) -> String {
        self.entries
            .iter()
            .map(|f| format!("{}:{}", f.category(), f.value()))
            .collect::<Vec<_>>()
            .join("+")
    }

    /// The composite wrapped in single quotes, ready for the filter store.
    pub fn filter_value(&self) -> String {
        format!("'{}'", self.compose())
    }
}

// ==============================
// Image
// ==============================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAspect {
    Square,
    Wide,
    Tall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageColor {
    Color,
    Monochrome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStyle {
    Photo,
    Graphics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFace {
    /// Face only.
    Face,
    /// Head and shoulders.
    Portrait,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFacet {
    Size(ImageSize),
    Aspect(ImageAspect),
    Color(ImageColor),
    Style(ImageStyle),
    Face(ImageFace),
}

impl Facet for ImageFacet {
    fn category(&self) -> &'static str {
        match self {
            ImageFacet::Size(_) => "Size",
            ImageFacet::Aspect(_) => "Aspect",
            ImageFacet::Color(_) => "Color",
            ImageFacet::Style(_) => "Style",
            ImageFacet::Face(_) => "Face",
        }
    }

    fn value(&self) -> &'static str {
        match self {
            ImageFacet::Size(ImageSize::Small) => "Small",
            ImageFacet::Size(ImageSize::Medium) => "Medium",
            ImageFacet::Size(ImageSize::Large) => "Large",
            ImageFacet::Aspect(ImageAspect::Square) => "Square",
            ImageFacet::Aspect(ImageAspect::Wide) => "Wide",
            ImageFacet::Aspect(ImageAspect::Tall) => "Tall",
            ImageFacet::Color(ImageColor::Color) => "Color",
            ImageFacet::Color(ImageColor::Monochrome) => "Monochrome",
            ImageFacet::Style(ImageStyle::Photo) => "Photo",
            ImageFacet::Style(ImageStyle::Graphics) => "Graphics",
            ImageFacet::Face(ImageFace::Face) => "Face",
            ImageFacet::Face(ImageFace::Portrait) => "Portrait",
            ImageFacet::Face(ImageFace::Other) => "Other",
        }
    }
}

// ==============================
// Video
// ==============================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoResolution {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoDuration {
    Short,
    Medium,
    Long,
}

impl VideoDuration {
    /// Bucket a length in seconds; both thresholds are inclusive.
    ///
    /// ```
    /// use bing_search::VideoDuration;
    ///
    /// assert_eq!(VideoDuration::from_seconds(300), VideoDuration::Short);
    /// assert_eq!(VideoDuration::from_seconds(301), VideoDuration::Medium);
    /// assert_eq!(VideoDuration::from_seconds(12001), VideoDuration::Long);
    /// ```
    pub fn from_seconds(seconds: u64) -> Self {
        if seconds <= SHORT_VID {
            VideoDuration::Short
        } else if seconds <= MEDIUM_VID {
            VideoDuration::Medium
        } else {
            VideoDuration::Long
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoAspect {
    Standard,
    Widescreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFacet {
    Resolution(VideoResolution),
    Duration(VideoDuration),
    Aspect(VideoAspect),
}

impl Facet for VideoFacet {
    fn category(&self) -> &'static str {
        match self {
            VideoFacet::Resolution(_) => "Resolution",
            VideoFacet::Duration(_) => "Duration",
            VideoFacet::Aspect(_) => "Aspect",
        }
    }

    fn value(&self) -> &'static str {
        match self {
            VideoFacet::Resolution(VideoResolution::Low) => "Low",
            VideoFacet::Resolution(VideoResolution::Medium) => "Medium",
            VideoFacet::Resolution(VideoResolution::High) => "High",
            VideoFacet::Duration(VideoDuration::Short) => "Short",
            VideoFacet::Duration(VideoDuration::Medium) => "Medium",
            VideoFacet::Duration(VideoDuration::Long) => "Long",
            VideoFacet::Aspect(VideoAspect::Standard) => "Standard",
            VideoFacet::Aspect(VideoAspect::Widescreen) => "Widescreen",
        }
    }
}

/// Result ordering for video searches; stored under `VideoSortBy`, not in
/// the composite facet string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSort {
    Date,
    Relevance,
}

impl VideoSort {
    pub const fn as_str(self) -> &'static str {
        match self {
            VideoSort::Date => "Date",
            VideoSort::Relevance => "Relevance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_thresholds() {
        assert_eq!(VideoDuration::from_seconds(0), VideoDuration::Short);
        assert_eq!(VideoDuration::from_seconds(299), VideoDuration::Short);
        assert_eq!(VideoDuration::from_seconds(SHORT_VID), VideoDuration::Short);
        assert_eq!(VideoDuration::from_seconds(301), VideoDuration::Medium);
        assert_eq!(VideoDuration::from_seconds(MEDIUM_VID), VideoDuration::Medium);
        assert_eq!(VideoDuration::from_seconds(12001), VideoDuration::Long);
    }

    #[test]
    fn compose_follows_call_order() {
        let mut store = FacetStore::new();
        store.set(ImageFacet::Aspect(ImageAspect::Square));
        store.set(ImageFacet::Size(ImageSize::Large));
        assert_eq!(store.compose(), "Aspect:Square+Size:Large");
    }

    #[test]
    fn same_category_overwrites_in_place() {
        let mut store = FacetStore::new();
        store.set(ImageFacet::Size(ImageSize::Large));
        store.set(ImageFacet::Style(ImageStyle::Photo));
        store.set(ImageFacet::Size(ImageSize::Small));
        assert_eq!(store.filter_value(), "'Size:Small+Style:Photo'");
        assert_eq!(store.get("Size"), Some(ImageFacet::Size(ImageSize::Small)));
    }

    #[test]
    fn image_and_video_aspect_are_distinct_types() {
        let mut video = FacetStore::new();
        video.set(VideoFacet::Aspect(VideoAspect::Widescreen));
        video.set(VideoFacet::Duration(VideoDuration::from_seconds(90)));
        assert_eq!(video.compose(), "Aspect:Widescreen+Duration:Short");
    }

    #[test]
    fn empty_store_composes_to_empty_string() {
        let store: FacetStore<VideoFacet> = FacetStore::new();
        assert!(store.is_empty());
        assert_eq!(store.compose(), "");
    }
}
