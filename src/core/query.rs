//! Query specs, price brackets and sort keys
//!
//! Every value here can be built from the raw strings a search form hands
//! over. Parsing is lenient: an unrecognised category or bracket turns into
//! "no constraint" and an unrecognised sort key into "keep input order".
//! None of it is an error.
//!
//! # Example
//! ```rust,ignore
//! let spec = QuerySpec::from_params("pulsar", "bike", "1l-2l");
//! let sort = SortKey::from_param("price-high-low");
//!
//! let results = catalog.query(&spec, sort);
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::entity::Vehicle;
use crate::core::vehicle::Category;

/// Category criterion of a query
///
/// Serializes to the same raw values the search form uses: `all`, `ev`,
/// `bike`, `scooter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No constraint (`all`, empty, or an unrecognised value)
    #[default]
    Any,

    /// The `ev` pseudo-category: fuel type is Electric, whatever the stored category
    Electric,

    /// Exact match on the stored category
    Stored(Category),
}

impl CategoryFilter {
    /// Parse a raw form value
    pub fn from_param(value: &str) -> Self {
        match value {
            "" | "all" => CategoryFilter::Any,
            "ev" => CategoryFilter::Electric,
            other => match Category::from_param(other) {
                Some(category) => CategoryFilter::Stored(category),
                None => {
                    tracing::debug!(category = other, "ignoring unrecognised category filter");
                    CategoryFilter::Any
                }
            },
        }
    }

    /// Raw form value for this filter
    pub fn as_param(&self) -> &'static str {
        match self {
            CategoryFilter::Any => "all",
            CategoryFilter::Electric => "ev",
            CategoryFilter::Stored(category) => category.as_str(),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, CategoryFilter::Any)
    }

    /// Check whether a vehicle satisfies this criterion
    pub fn matches<V: Vehicle>(&self, vehicle: &V) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Electric => vehicle.is_electric(),
            CategoryFilter::Stored(category) => vehicle.category() == *category,
        }
    }

    /// Summary label, `None` when unconstrained
    pub fn label(&self) -> Option<String> {
        match self {
            CategoryFilter::Any => None,
            CategoryFilter::Electric => Some("Electric vehicles".to_string()),
            CategoryFilter::Stored(category) => Some(format!("{}s", category.as_str())),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        CategoryFilter::from_param(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.as_param().to_string()
    }
}

/// One of the four fixed budget brackets of the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBracket {
    /// `price < 50_000`
    #[serde(rename = "under-50k")]
    Under50k,

    /// `50_000 <= price <= 100_000`
    #[serde(rename = "50k-1l")]
    From50kTo1L,

    /// `100_000 < price <= 200_000`
    #[serde(rename = "1l-2l")]
    From1LTo2L,

    /// `price > 200_000`
    #[serde(rename = "above-2l")]
    Above2L,
}

impl PriceBracket {
    pub const ALL: [PriceBracket; 4] = [
        PriceBracket::Under50k,
        PriceBracket::From50kTo1L,
        PriceBracket::From1LTo2L,
        PriceBracket::Above2L,
    ];

    /// Parse a raw form value; unknown or empty values give `None`
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "under-50k" => Some(PriceBracket::Under50k),
            "50k-1l" => Some(PriceBracket::From50kTo1L),
            "1l-2l" => Some(PriceBracket::From1LTo2L),
            "above-2l" => Some(PriceBracket::Above2L),
            "" => None,
            other => {
                tracing::debug!(bracket = other, "ignoring unrecognised price bracket");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            PriceBracket::Under50k => "under-50k",
            PriceBracket::From50kTo1L => "50k-1l",
            PriceBracket::From1LTo2L => "1l-2l",
            PriceBracket::Above2L => "above-2l",
        }
    }

    /// Check whether a price falls inside this bracket
    pub fn contains(&self, price: u64) -> bool {
        match self {
            PriceBracket::Under50k => price < 50_000,
            PriceBracket::From50kTo1L => (50_000..=100_000).contains(&price),
            PriceBracket::From1LTo2L => price > 100_000 && price <= 200_000,
            PriceBracket::Above2L => price > 200_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBracket::Under50k => "Under ₹50K",
            PriceBracket::From50kTo1L => "₹50K - ₹1L",
            PriceBracket::From1LTo2L => "₹1L - ₹2L",
            PriceBracket::Above2L => "Above ₹2L",
        }
    }
}

/// Inclusive price range, as set by a price slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPriceRange")]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    /// Create a range, swapping the bounds if they arrive reversed
    pub fn new(min: u64, max: u64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Wire form of [`PriceRange`]; bounds are normalised on the way in
#[derive(Deserialize)]
struct RawPriceRange {
    min: u64,
    max: u64,
}

impl From<RawPriceRange> for PriceRange {
    fn from(raw: RawPriceRange) -> Self {
        PriceRange::new(raw.min, raw.max)
    }
}

/// Combination of search criteria
///
/// All criteria are optional; an empty spec matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuerySpec {
    /// Free text matched against name and brand
    pub text: Option<String>,

    pub category: CategoryFilter,

    #[serde(deserialize_with = "lenient_bracket")]
    pub price_bracket: Option<PriceBracket>,

    /// Slider range, applied on top of the bracket
    pub price_range: Option<PriceRange>,
}

impl QuerySpec {
    /// An empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spec from the three raw search form values
    pub fn from_params(text: &str, category: &str, price_bracket: &str) -> Self {
        Self {
            text: (!text.is_empty()).then(|| text.to_string()),
            category: CategoryFilter::from_param(category),
            price_bracket: PriceBracket::from_param(price_bracket),
            price_range: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_price_bracket(mut self, bracket: PriceBracket) -> Self {
        self.price_bracket = Some(bracket);
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Lowercased search text, `None` when empty or whitespace-only
    pub fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Whether no criterion would narrow a result
    pub fn is_empty(&self) -> bool {
        self.needle().is_none()
            && self.category.is_any()
            && self.price_bracket.is_none()
            && self.price_range.is_none()
    }

    /// Human readable summary of the active criteria
    ///
    /// Returns `for "pulsar", Electric vehicles, Under ₹50K` style text, or an
    /// empty string when nothing is set. Slider ranges are not summarised.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            parts.push(format!("\"{}\"", text));
        }
        if let Some(label) = self.category.label() {
            parts.push(label);
        }
        if let Some(bracket) = self.price_bracket {
            parts.push(bracket.label().to_string());
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(" for {}", parts.join(", "))
        }
    }
}

fn lenient_bracket<'de, D>(deserializer: D) -> Result<Option<PriceBracket>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PriceBracket::from_param))
}

/// Sort orders offered by the browse views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceLowHigh,
    PriceHighLow,
}

impl SortKey {
    /// Parse a raw form value; unknown values give `None` (keep input order)
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(SortKey::Newest),
            "oldest" => Some(SortKey::Oldest),
            "price-low-high" => Some(SortKey::PriceLowHigh),
            "price-high-low" => Some(SortKey::PriceHighLow),
            _ => None,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::PriceLowHigh => "price-low-high",
            SortKey::PriceHighLow => "price-high-low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest First",
            SortKey::Oldest => "Oldest First",
            SortKey::PriceLowHigh => "Price: Low to High",
            SortKey::PriceHighLow => "Price: High to Low",
        }
    }
}
