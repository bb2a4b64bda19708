//! Returns slice.

use storefront_commerce::checkout::{PaymentReceipt, RefundRequest};
use storefront_commerce::ids::{ReturnId, TransactionId};
use storefront_commerce::money::Money;
use storefront_commerce::returns::ReturnRequest;
use storefront_commerce::status::can_cancel_return;
use storefront_commerce::CommerceError;

use super::SliceStatus;
use crate::api::{PaymentsApi, ReturnsApi};
use crate::StoreError;

/// Return requests of the signed-in user.
#[derive(Debug)]
pub struct ReturnsStore {
    api: ReturnsApi,
    payments: PaymentsApi,
    returns: Vec<ReturnRequest>,
    current: Option<ReturnRequest>,
    status: SliceStatus,
}

impl ReturnsStore {
    pub fn new(api: ReturnsApi, payments: PaymentsApi) -> Self {
        Self {
            api,
            payments,
            returns: Vec::new(),
            current: None,
            status: SliceStatus::default(),
        }
    }

    pub fn returns(&self) -> &[ReturnRequest] {
        &self.returns
    }

    pub fn current(&self) -> Option<&ReturnRequest> {
        self.current.as_ref()
    }

    pub fn find(&self, id: &ReturnId) -> Option<&ReturnRequest> {
        self.returns.iter().find(|r| &r.return_id == id)
    }

    pub fn status(&self) -> &SliceStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub async fn fetch(&mut self) -> Result<(), StoreError> {
        self.status.begin();
        match self.api.list().await {
            Ok(returns) => {
                tracing::debug!(count = returns.len(), "returns loaded");
                self.returns = returns;
                self.status.succeed();
                Ok(())
            }
            Err(e) => Err(self.status.fail("returns", "fetch", e)),
        }
    }

    pub async fn fetch_one(&mut self, id: &ReturnId) -> Result<&ReturnRequest, StoreError> {
        self.status.begin();
        match self.api.get(id).await {
            Ok(request) => {
                self.status.succeed();
                self.replace(request.clone());
                Ok(self.current.insert(request))
            }
            Err(e) => Err(self.status.fail("returns", "fetch_one", e)),
        }
    }

    /// Withdraw a return. Only requested or approved returns can be
    /// withdrawn; others are rejected before a request is sent. A return
    /// not in the local list is fetched first.
    pub async fn cancel(&mut self, id: &ReturnId, reason: &str) -> Result<&ReturnRequest, StoreError> {
        let known = self
            .find(id)
            .or(self.current.as_ref().filter(|r| &r.return_id == id))
            .cloned();
        let request = match known {
            Some(request) => request,
            None => self.fetch_one(id).await?.clone(),
        };

        self.status.begin();
        if !can_cancel_return(&request) {
            let err = CommerceError::CancelNotAllowed {
                status: request.status.as_str().to_string(),
            };
            return Err(self.status.fail("returns", "cancel", err));
        }
        match self.api.cancel(id, reason.trim()).await {
            Ok(updated) => {
                tracing::info!(return_id = %id, "return cancelled");
                self.status.succeed();
                self.replace(updated.clone());
                Ok(self.current.insert(updated))
            }
            Err(e) => Err(self.status.fail("returns", "cancel", e)),
        }
    }

    /// `POST /payments/refund/:transactionId`
    pub async fn request_refund(
        &mut self,
        transaction_id: &TransactionId,
        amount: Money,
        reason: &str,
    ) -> Result<PaymentReceipt, StoreError> {
        self.status.begin();
        if amount.is_zero() || amount.is_negative() {
            let err = CommerceError::validation("Refund amount must be greater than zero");
            return Err(self.status.fail("returns", "refund", err));
        }
        if reason.trim().is_empty() {
            let err = CommerceError::validation("Please give a reason for the refund");
            return Err(self.status.fail("returns", "refund", err));
        }
        let request = RefundRequest {
            refund_amount: amount,
            reason: reason.trim().to_string(),
        };
        match self.payments.refund(transaction_id, &request).await {
            Ok(receipt) => {
                tracing::info!(
                    transaction_id = %transaction_id,
                    amount = %amount.display(),
                    "refund requested"
                );
                self.status.succeed();
                Ok(receipt)
            }
            Err(e) => Err(self.status.fail("returns", "refund", e)),
        }
    }

    /// Drop local state (sign-out).
    pub fn reset(&mut self) {
        self.returns.clear();
        self.current = None;
        self.status = SliceStatus::default();
    }

    fn replace(&mut self, request: ReturnRequest) {
        if let Some(slot) = self
            .returns
            .iter_mut()
            .find(|r| r.return_id == request.return_id)
        {
            *slot = request;
        }
    }
}
