//! The assembled client.

use std::sync::Arc;

use storefront_auth::{AuthClient, AuthSession, Credentials, SignupRequest, User};
use storefront_cache::{Cache, KeyValueStore, StorageKey};
use storefront_commerce::catalog::{Product, ReviewSubmission};
use storefront_commerce::checkout::{CheckoutScope, Order};
use storefront_commerce::ids::{OrderId, ProductId, UserId};
use storefront_commerce::returns::ReturnReason;
use storefront_data::{ApiConfig, HttpClient, SessionContext};

use crate::api::{
    CartApi, OrdersApi, PaymentsApi, ProductsApi, ProfileUpdate, ReturnsApi, UsersApi,
    WishlistApi,
};
use crate::checkout::{CheckoutController, OrderConfirmation, Route};
use crate::confirm::PendingAction;
use crate::store::{CartStore, OrdersStore, ProfileStore, ReturnsStore, WishlistStore};
use crate::theme::{Theme, ThemeMode};
use crate::StoreError;

/// Every resource client, store and the auth session, wired to one
/// [`SessionContext`] and one cache.
///
/// Stores are public fields so a UI can read them and call their actions
/// directly. The methods here cover the actions that need the signed-in
/// user's id or touch more than one slice.
#[derive(Debug)]
pub struct Storefront {
    pub auth: AuthSession,
    pub products: ProductsApi,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub orders: OrdersStore,
    pub returns: ReturnsStore,
    pub profile: ProfileStore,
    cache: Cache,
    http: HttpClient,
    theme_mode: ThemeMode,
    revoked: bool,
}

impl Storefront {
    /// Build the client. Nothing is read or sent until [`start`](Self::start).
    pub fn new(
        config: &ApiConfig,
        store: impl KeyValueStore + 'static,
    ) -> Result<Self, StoreError> {
        let context = Arc::new(SessionContext::new());
        let http = HttpClient::new(config, context)?;
        let cache = Cache::new(store);

        tracing::debug!(base_url = http.base_url(), "storefront created");
        Ok(Self {
            auth: AuthSession::new(AuthClient::new(http.clone()), cache.clone()),
            products: ProductsApi::new(http.clone()),
            cart: CartStore::new(CartApi::new(http.clone()), cache.clone()),
            wishlist: WishlistStore::new(WishlistApi::new(http.clone())),
            orders: OrdersStore::new(OrdersApi::new(http.clone())),
            returns: ReturnsStore::new(
                ReturnsApi::new(http.clone()),
                PaymentsApi::new(http.clone()),
            ),
            profile: ProfileStore::new(UsersApi::new(http.clone())),
            cache,
            http,
            theme_mode: ThemeMode::default(),
            revoked: false,
        })
    }

    /// Restore the persisted session, the cart snapshot and the theme
    /// preference. Returns whether a user is signed in.
    pub async fn start(&mut self) -> bool {
        self.theme_mode = self.load_theme_mode().await;
        let restored = self.auth.restore().await;
        if restored {
            self.cart.hydrate_from_snapshot().await;
        }
        tracing::info!(restored, theme = self.theme_mode.as_str(), "storefront started");
        restored
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        self.http.session()
    }

    /// Id of the signed-in user. A session whose token the transport has
    /// dropped counts as signed out.
    pub fn user_id(&self) -> Result<UserId, StoreError> {
        if !self.context().has_token() {
            return Err(StoreError::NotSignedIn);
        }
        self.auth.user_id().cloned().ok_or(StoreError::NotSignedIn)
    }

    // Session

    pub async fn login(&mut self, credentials: Credentials) -> Result<&User, StoreError> {
        self.auth.login(credentials).await?;
        self.load_user_state().await;
        self.auth.user().ok_or(StoreError::NotSignedIn)
    }

    pub async fn signup(&mut self, signup: SignupRequest) -> Result<&User, StoreError> {
        self.auth.signup(signup).await?;
        self.load_user_state().await;
        self.auth.user().ok_or(StoreError::NotSignedIn)
    }

    /// Sign out and drop every user-scoped slice. Never fails.
    pub async fn logout(&mut self) {
        self.auth.logout().await;
        self.reset_stores();
    }

    /// Check whether the server revoked the session since the last call.
    /// Returns [`Route::Login`] once per revocation.
    ///
    /// Actions on this type already tear the session down when a request
    /// comes back 401; this also catches 401s seen through the public
    /// store fields.
    pub async fn sync_session(&mut self) -> Option<Route> {
        self.end_revoked_session().await;
        std::mem::take(&mut self.revoked).then_some(Route::Login)
    }

    // Catalog

    /// Post a review, then return the refreshed product.
    pub async fn submit_review(
        &mut self,
        product_id: &ProductId,
        review: &ReviewSubmission,
    ) -> Result<Product, StoreError> {
        review.validate()?;
        let result = self.products.submit_review(product_id, review).await;
        self.settle(result.map_err(StoreError::from)).await?;
        tracing::info!(product_id = %product_id, rating = review.rating, "review submitted");
        let result = self.products.get(product_id).await;
        self.settle(result.map_err(StoreError::from)).await
    }

    // Cart

    pub async fn fetch_cart(&mut self) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.cart.fetch(&user_id).await;
        self.settle(result).await
    }

    pub async fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        size: Option<String>,
        color: Option<String>,
    ) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.cart.add(&user_id, product_id, quantity, size, color).await;
        self.settle(result).await
    }

    /// A quantity below one removes the line.
    pub async fn update_cart_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.cart.update(&user_id, product_id, quantity).await;
        self.settle(result).await
    }

    pub async fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.cart.remove(&user_id, product_id).await;
        self.settle(result).await
    }

    pub async fn clear_cart(&mut self) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.cart.clear(&user_id).await;
        self.settle(result).await
    }

    // Wishlist

    pub async fn fetch_wishlist(&mut self) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.wishlist.fetch(&user_id).await;
        self.settle(result).await
    }

    pub async fn add_to_wishlist(&mut self, product: &Product) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.wishlist.add(&user_id, product).await;
        self.settle(result).await
    }

    /// Returns whether the product is in the wishlist afterwards.
    pub async fn toggle_wishlist(&mut self, product: &Product) -> Result<bool, StoreError> {
        let user_id = self.user_id()?;
        let result = self.wishlist.toggle(&user_id, product).await;
        self.settle(result).await
    }

    pub async fn remove_from_wishlist(&mut self, product_id: &ProductId) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.wishlist.remove(&user_id, product_id).await;
        self.settle(result).await
    }

    /// Move a wishlist entry into the cart with quantity one.
    pub async fn move_to_cart(&mut self, product_id: &ProductId) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.cart.add(&user_id, product_id, 1, None, None).await;
        self.settle(result).await?;
        let result = self.wishlist.remove(&user_id, product_id).await;
        self.settle(result).await
    }

    // Orders

    pub async fn fetch_orders(&mut self) -> Result<(), StoreError> {
        let user_id = self.user_id()?;
        let result = self.orders.fetch(&user_id).await;
        self.settle(result).await
    }

    pub async fn fetch_order(&mut self, id: &OrderId) -> Result<&Order, StoreError> {
        let user_id = self.user_id()?;
        let result = self.orders.fetch_one(&user_id, id).await.map(|_| ());
        self.settle(result).await?;
        self.orders
            .current()
            .ok_or_else(|| StoreError::NotFound(format!("Order {}", id)))
    }

    /// File a return for `order`, then refresh the returns list so the new
    /// request shows up.
    pub async fn request_return(
        &mut self,
        order: &Order,
        reason: ReturnReason,
        comment: Option<&str>,
    ) -> Result<(), StoreError> {
        let result = self.orders.request_return(order, reason, comment).await.map(|_| ());
        self.settle(result).await?;
        if let Err(e) = self.returns.fetch().await {
            tracing::warn!(error = %e, "returns refresh after return request failed");
        }
        Ok(())
    }

    // Checkout

    /// Start a checkout over the whole cart or selected lines.
    pub fn checkout(&self, scope: CheckoutScope) -> CheckoutController {
        CheckoutController::new(self.orders.api().clone(), scope)
    }

    /// Place the order a controller has reached the payment step for, using
    /// the current cart and address book.
    pub async fn place_order(
        &mut self,
        controller: &mut CheckoutController,
    ) -> Result<OrderConfirmation, StoreError> {
        let user_id = self.user_id()?;
        let result = controller
            .place_order(&user_id, &mut self.cart, self.profile.addresses())
            .await;
        self.settle(result).await
    }

    // Profile

    /// Update name and phone, keeping the auth session's user in step.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<&User, StoreError> {
        let result = self.profile.update_profile(update).await.cloned();
        let user = self.settle(result).await?;
        self.auth.update_user(user).await;
        self.auth.user().ok_or(StoreError::NotSignedIn)
    }

    // Confirmation

    /// Run an action the user approved.
    pub async fn confirm(&mut self, action: PendingAction) -> Result<(), StoreError> {
        tracing::debug!(action = action.title(), "confirmed");
        let result = match action {
            PendingAction::RemoveCartItem { product_id, .. } => {
                self.remove_from_cart(&product_id).await
            }
            PendingAction::ClearWishlist => match self.user_id() {
                Ok(user_id) => self.wishlist.clear(&user_id).await,
                Err(e) => Err(e),
            },
            PendingAction::CancelReturn { return_id, reason } => {
                self.returns.cancel(&return_id, &reason).await.map(|_| ())
            }
            PendingAction::DeleteAddress { address_id, .. } => {
                self.profile.delete_address(&address_id).await
            }
        };
        self.settle(result).await
    }

    // Preferences

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    /// Persist a new preference. The in-memory mode changes even if the
    /// write fails.
    pub async fn set_theme_mode(&mut self, mode: ThemeMode) -> Result<(), StoreError> {
        self.theme_mode = mode;
        self.cache
            .set_string(StorageKey::ThemeMode, mode.as_str())
            .await?;
        Ok(())
    }

    pub fn theme(&self, system_prefers_dark: bool) -> Theme {
        Theme::resolve(self.theme_mode, system_prefers_dark)
    }

    pub async fn is_onboarding_complete(&self) -> bool {
        match self.cache.get::<bool>(StorageKey::OnboardingComplete).await {
            Ok(done) => done.unwrap_or(false),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable onboarding flag");
                false
            }
        }
    }

    pub async fn complete_onboarding(&self) -> Result<(), StoreError> {
        self.cache.set(StorageKey::OnboardingComplete, &true).await?;
        Ok(())
    }

    async fn load_theme_mode(&self) -> ThemeMode {
        match self.cache.get_string(StorageKey::ThemeMode).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unknown theme mode, using default");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable theme mode");
                ThemeMode::default()
            }
        }
    }

    async fn load_user_state(&mut self) {
        let Ok(user_id) = self.user_id() else {
            return;
        };
        if let Err(e) = self.cart.fetch(&user_id).await {
            tracing::warn!(error = %e, "cart load after sign-in failed");
        }
        if let Err(e) = self.wishlist.fetch(&user_id).await {
            tracing::warn!(error = %e, "wishlist load after sign-in failed");
        }
    }

    /// Pass an action's result through, ending the session first if the
    /// request that failed was rejected with 401.
    async fn settle<T>(&mut self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if result.is_err() {
            self.end_revoked_session().await;
        }
        result
    }

    async fn end_revoked_session(&mut self) {
        if self.auth.sync_with_context().await {
            self.reset_stores();
            self.revoked = true;
        }
    }

    fn reset_stores(&mut self) {
        self.cart.reset();
        self.wishlist.reset();
        self.orders.reset();
        self.returns.reset();
        self.profile.reset();
    }
}
