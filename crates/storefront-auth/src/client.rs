//! Client for the `/auth` resource.

use serde::Deserialize;
use storefront_data::{ApiError, HttpClient};

use crate::user::{Credentials, SignupRequest, User};

/// Body returned by login and register.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Calls the auth endpoints. Holds no state of its own.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: HttpClient,
}

impl AuthClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// `POST /auth/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.http.post("/auth/login").json(credentials)?.send().await
    }

    /// `POST /auth/register`
    pub async fn register(&self, signup: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.http.post("/auth/register").json(signup)?.send().await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.http.post("/auth/logout").send_empty().await
    }
}
