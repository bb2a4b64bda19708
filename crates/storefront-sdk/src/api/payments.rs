use storefront_commerce::checkout::{PaymentReceipt, RefundRequest};
use storefront_commerce::ids::TransactionId;
use storefront_data::{path_segment, ApiError, HttpClient};

/// `/payments`
#[derive(Debug, Clone)]
pub struct PaymentsApi {
    http: HttpClient,
}

impl PaymentsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn refund(
        &self,
        transaction_id: &TransactionId,
        request: &RefundRequest,
    ) -> Result<PaymentReceipt, ApiError> {
        self.http
            .post(format!("/payments/refund/{}", path_segment(transaction_id.as_str())))
            .json(request)?
            .send()
            .await
    }
}
