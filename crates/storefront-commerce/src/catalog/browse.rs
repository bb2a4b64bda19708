//! Local filtering and sorting of a fetched product list.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Keep the server's order.
    #[default]
    Featured,
    /// Sort by newest first.
    Newest,
    /// Sort by price, low to high.
    PriceLowToHigh,
    /// Sort by price, high to low.
    PriceHighToLow,
    /// Sort by highest rated.
    TopRated,
}

impl SortOption {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::Newest => "Newest",
            SortOption::PriceLowToHigh => "Price: Low to High",
            SortOption::PriceHighToLow => "Price: High to Low",
            SortOption::TopRated => "Highest Rated",
        }
    }
}

/// Filters applied on top of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive text matched against name and description.
    pub text: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    /// Hide sold-out products.
    pub in_stock_only: bool,
    /// Ordering of the result.
    pub sort: SortOption,
}

impl ProductFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank text clears it.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() {
            None
        } else {
            Some(text.trim().to_lowercase())
        };
        self
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to a price range.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Hide sold-out products.
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check a single product against the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref text) = self.text {
            let in_name = product.name.to_lowercase().contains(text.as_str());
            let in_description = product.description.to_lowercase().contains(text.as_str());
            if !in_name && !in_description {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price.amount_minor < min.amount_minor {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price.amount_minor > max.amount_minor {
                return false;
            }
        }
        !(self.in_stock_only && !product.is_in_stock())
    }

    /// Filter and sort a listing.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut result: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOption::Featured => {}
            SortOption::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOption::PriceLowToHigh => {
                result.sort_by_key(|p| p.price.amount_minor);
            }
            SortOption::PriceHighToLow => {
                result.sort_by_key(|p| std::cmp::Reverse(p.price.amount_minor));
            }
            SortOption::TopRated => result.sort_by(|a, b| {
                b.average_rating
                    .partial_cmp(&a.average_rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }

        result
    }
}
