use storefront_commerce::catalog::{Product, ReviewSubmission};
use storefront_commerce::ids::ProductId;
use storefront_data::{path_segment, ApiError, HttpClient};

/// `/products`
#[derive(Debug, Clone)]
pub struct ProductsApi {
    http: HttpClient,
}

impl ProductsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.http.get("/products").send().await
    }

    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.http.get(format!("/products/{}", path_segment(id.as_str()))).send().await
    }

    pub async fn by_category(&self, slug: &str) -> Result<Vec<Product>, ApiError> {
        self.http
            .get("/products")
            .query("category", slug)
            .send()
            .await
    }

    /// Post a review. Validate the submission first; this sends as-is.
    pub async fn submit_review(
        &self,
        id: &ProductId,
        review: &ReviewSubmission,
    ) -> Result<(), ApiError> {
        self.http
            .post(format!("/products/{}/reviews", path_segment(id.as_str())))
            .json(review)?
            .send_empty()
            .await
    }
}
