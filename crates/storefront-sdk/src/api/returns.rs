use storefront_commerce::ids::ReturnId;
use storefront_commerce::returns::{CancelReturn, ReturnRequest};
use storefront_data::{path_segment, ApiError, HttpClient};

/// `/returns`. Scoped to the bearer of the token.
#[derive(Debug, Clone)]
pub struct ReturnsApi {
    http: HttpClient,
}

impl ReturnsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<Vec<ReturnRequest>, ApiError> {
        self.http.get("/returns").send().await
    }

    pub async fn get(&self, id: &ReturnId) -> Result<ReturnRequest, ApiError> {
        self.http.get(format!("/returns/{}", path_segment(id.as_str()))).send().await
    }

    pub async fn cancel(&self, id: &ReturnId, reason: &str) -> Result<ReturnRequest, ApiError> {
        let body = CancelReturn {
            reason: reason.to_string(),
        };
        self.http
            .patch(format!("/returns/{}/cancel", path_segment(id.as_str())))
            .json(&body)?
            .send()
            .await
    }
}
