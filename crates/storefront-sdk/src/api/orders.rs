use storefront_commerce::checkout::{
    NewOrder, Order, OrderStatusUpdate, PaymentReceipt, PaymentRequest,
};
use storefront_commerce::ids::{OrderId, UserId};
use storefront_data::{path_segment, ApiError, HttpClient};

/// `/orders`
#[derive(Debug, Clone)]
pub struct OrdersApi {
    http: HttpClient,
}

impl OrdersApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Order>, ApiError> {
        self.http
            .get("/orders")
            .query("userId", user_id.as_str())
            .send()
            .await
    }

    pub async fn get(&self, user_id: &UserId, id: &OrderId) -> Result<Order, ApiError> {
        self.http
            .get(format!("/orders/{}", path_segment(id.as_str())))
            .query("userId", user_id.as_str())
            .send()
            .await
    }

    /// Not idempotent: every call creates an order.
    pub async fn create(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.http.post("/orders").json(order)?.send().await
    }

    pub async fn update_status(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<Order, ApiError> {
        self.http
            .patch(format!("/orders/{}/status", path_segment(id.as_str())))
            .json(update)?
            .send()
            .await
    }

    /// Record payment for a created order.
    pub async fn process_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, ApiError> {
        self.http
            .post("/orders/payments/process")
            .json(request)?
            .send()
            .await
    }
}
