//! Product and review types.

use crate::error::CommerceError;
use crate::ids::{ProductId, UserId};
use crate::money::{self, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as served by the products resource.
///
/// Read-only on the client; submitting a review triggers a refetch rather
/// than a local edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Image URLs, first is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Available sizes.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Available colors.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Mean review rating.
    #[serde(default)]
    pub average_rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub total_reviews: u32,
    /// Reviews, newest last.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Seller or admin who listed the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Listing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

keyed_record!(Product);

impl Product {
    /// Check if any unit is available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The image shown in lists and carts.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the buyer has to pick a size or color.
    pub fn has_variants(&self) -> bool {
        !self.sizes.is_empty() || !self.colors.is_empty()
    }
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Reviewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Reviewer display name.
    #[serde(default)]
    pub user_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text.
    #[serde(default)]
    pub comment: String,
    /// Submission time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /products/:id/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// Reviewer.
    pub user_id: UserId,
    /// Reviewer display name.
    pub user_name: String,
}

impl ReviewSubmission {
    /// Lowest accepted rating.
    pub const MIN_RATING: u8 = 1;
    /// Highest accepted rating.
    pub const MAX_RATING: u8 = 5;

    /// Create a submission.
    pub fn new(
        rating: u8,
        comment: impl Into<String>,
        user_id: UserId,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            rating,
            comment: comment.into(),
            user_id,
            user_name: user_name.into(),
        }
    }

    /// Check the form before it is sent.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&self.rating) {
            return Err(CommerceError::validation("Please select a rating"));
        }
        if self.comment.trim().is_empty() {
            return Err(CommerceError::validation("Please write a review"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_deserializes_mongo_id() {
        let json = r#"{
            "_id": "p1",
            "name": "Canvas Sneaker",
            "price": 1499,
            "stock": 3,
            "images": ["a.jpg", "b.jpg"],
            "sizes": ["8", "9"],
            "averageRating": 4.5,
            "totalReviews": 2
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Money::from_major(1499, Currency::INR));
        assert_eq!(product.primary_image(), Some("a.jpg"));
        assert!(product.has_variants());
        assert!(product.is_in_stock());
        assert!(product.reviews.is_empty());
    }

    #[test]
    fn test_product_with_both_id_keys() {
        let json = r#"{"_id": "p1", "id": "p1", "name": "Tee", "price": 499}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], "p1");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_review_submission_validation() {
        let ok = ReviewSubmission::new(4, "Great fit", UserId::new("u1"), "Asha");
        assert!(ok.validate().is_ok());

        let no_rating = ReviewSubmission::new(0, "Great fit", UserId::new("u1"), "Asha");
        assert!(no_rating.validate().is_err());

        let no_comment = ReviewSubmission::new(5, "   ", UserId::new("u1"), "Asha");
        assert!(no_comment.validate().is_err());
    }
}
