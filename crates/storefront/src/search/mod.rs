//! Catalog query engine.
//!
//! [`view`] derives a filtered, sorted listing from a slice of items. It is
//! a pure function: the same items and [`QuerySpec`] always produce the same
//! output, which is what makes [`ViewCache`] safe.
//!
//! An item passes the filter when all of these hold:
//! - the search term is empty, or appears case-insensitively in its name,
//!   brand or processor
//! - no brand is selected, or the brand matches exactly
//! - no condition is selected, or the condition matches
//! - the price lies within the inclusive `[price_min, price_max]` range,
//!   where an unset bound is open

mod cache;

use icu_collator::Collator;
use rust_decimal::Decimal;

use laptop_market_core::{Condition, Item, Price};

pub use cache::ViewCache;

/// Sort order for catalog views.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Name, ascending.
    #[default]
    Name,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best rated first.
    RatingDesc,
}

impl SortKey {
    /// Parse from a URL or CLI parameter value. Unknown values sort by name.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-ascending" | "price-low" => Self::PriceAsc,
            "price-descending" | "price-high" => Self::PriceDesc,
            "rating-descending" | "rating" => Self::RatingDesc,
            _ => Self::Name,
        }
    }

    /// Convert to parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceAsc => "price-ascending",
            Self::PriceDesc => "price-descending",
            Self::RatingDesc => "rating-descending",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and sort parameters for a catalog view.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct QuerySpec {
    /// Free-text term matched against name, brand and processor.
    pub term: String,
    /// Exact brand match.
    pub brand: Option<String>,
    /// Exact condition match.
    pub condition: Option<Condition>,
    /// Inclusive lower price bound.
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound.
    pub price_max: Option<Decimal>,
    /// Result ordering.
    pub sort: SortKey,
}

impl QuerySpec {
    /// An empty query: everything, sorted by name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub const fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub const fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    #[must_use]
    pub const fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `item` passes every filter in this query.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_term(item)
            && self.brand.as_ref().is_none_or(|brand| &item.brand == brand)
            && self.condition.is_none_or(|condition| item.condition == condition)
            && self.matches_price(item.price)
    }

    fn matches_term(&self, item: &Item) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let needle = self.term.to_lowercase();
        [&item.name, &item.brand, &item.processor]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_price(&self, price: Price) -> bool {
        let amount = price.amount();
        self.price_min.is_none_or(|min| amount >= min)
            && self.price_max.is_none_or(|max| amount <= max)
    }
}

/// Filter `items` by `spec` and sort the survivors.
///
/// The sort is stable, so items that compare equal keep their catalog
/// order. An empty vector means nothing matched.
#[must_use]
pub fn view<'a>(items: &'a [Item], spec: &QuerySpec) -> Vec<&'a Item> {
    let mut matched: Vec<&Item> = items.iter().filter(|item| spec.matches(item)).collect();
    match spec.sort {
        SortKey::Name => sort_by_name(&mut matched),
        SortKey::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::RatingDesc => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    matched
}

/// Values available for the brand and condition filters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Facets {
    /// Distinct brands in first-seen order.
    pub brands: Vec<String>,
    /// Distinct conditions in first-seen order.
    pub conditions: Vec<Condition>,
    /// Cheapest and most expensive price, if there are any items.
    pub price_bounds: Option<(Price, Price)>,
}

/// Collect filter values from `items`.
#[must_use]
pub fn facets(items: &[Item]) -> Facets {
    let mut facets = Facets::default();
    for item in items {
        if !facets.brands.contains(&item.brand) {
            facets.brands.push(item.brand.clone());
        }
        if !facets.conditions.contains(&item.condition) {
            facets.conditions.push(item.condition);
        }
        facets.price_bounds = Some(match facets.price_bounds {
            Some((low, high)) => (low.min(item.price), high.max(item.price)),
            None => (item.price, item.price),
        });
    }
    facets
}

/// Sort by name under the root Unicode collation.
///
/// Accents and case only break ties between otherwise equal names, with
/// lowercase first, so "Éclair" sorts among the e's and "macbook" just
/// before "MacBook".
#[allow(clippy::default_trait_access)]
fn sort_by_name(items: &mut [&Item]) {
    match Collator::try_new(Default::default(), Default::default()) {
        Ok(collator) => items.sort_by(|a, b| collator.compare(&a.name, &b.name)),
        Err(e) => {
            tracing::warn!(error = %e, "Name collator unavailable, sorting by code point");
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }
}
