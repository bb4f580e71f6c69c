//! Checkout / submission pipeline
//!
//! Validates the cart against the current catalog snapshot, performs
//! exactly one create request, and clears the cart only on a 2xx. Each
//! attempt walks Idle -> Validating -> (Invalid | Submitting) ->
//! (Succeeded | Failed); Invalid and Failed leave the cart untouched.
//! A new submission supersedes the in-flight one (last submission wins).

use crate::api::GestioApi;
use crate::cart::Cart;
use crate::catalog::{CatalogCache, CatalogSnapshot};
use crate::error::ClientResult;
use crate::http::Backend;
use chrono::NaiveDate;
use shared::models::{PurchaseOrderCreate, SaleCreate};
use std::future::Future;
use std::sync::{Mutex as StdMutex, PoisonError};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Checkout errors; all recoverable by the user
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// A line exceeds the stock in the *current* snapshot; stock may have
    /// moved since the line was added
    #[error("insufficient stock for product {product_id}: {available} available")]
    StockInsufficient {
        product_id: i64,
        requested: i32,
        available: i32,
    },

    /// Backend refused the write; carries the server's message verbatim
    /// when one was provided
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// A newer submission replaced this one; its response was discarded
    #[error("submission superseded by a newer attempt")]
    Superseded,
}

/// Observable pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Context for a sale submission
#[derive(Debug, Clone)]
pub struct SaleDraft {
    /// Absent means an anonymous walk-in customer
    pub client_id: Option<i64>,
    pub currency: String,
    pub payment_method: String,
    pub notes: String,
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self {
            client_id: None,
            currency: "XOF".to_string(),
            payment_method: "espèces".to_string(),
            notes: String::new(),
        }
    }
}

/// Context for a purchase-order submission
#[derive(Debug, Clone, Default)]
pub struct PurchaseDraft {
    /// Required; validation fails without it
    pub supplier_id: Option<i64>,
    pub expected_delivery: Option<NaiveDate>,
    pub notes: String,
}

/// Pre-flight validation for a sale: every line is re-checked against the
/// current snapshot, since cached stock may have changed since the line
/// was added.
pub fn validate_sale(
    cart: &Cart,
    _draft: &SaleDraft,
    snapshot: &CatalogSnapshot,
) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if cart.enforces_stock() {
        for line in cart.lines() {
            // A product that vanished from the catalog counts as zero stock
            let available = snapshot
                .product(line.product_id)
                .map(|p| p.stock_on_hand)
                .unwrap_or(0);
            if line.quantity > available {
                return Err(CheckoutError::StockInsufficient {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available,
                });
            }
        }
    }
    Ok(())
}

/// Pre-flight validation for a purchase order; no stock check, ordering
/// beyond current stock is the point of replenishment
pub fn validate_purchase(
    cart: &Cart,
    draft: &PurchaseDraft,
    _snapshot: &CatalogSnapshot,
) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if draft.supplier_id.is_none() {
        return Err(CheckoutError::MissingRequiredField("fournisseur_id"));
    }
    Ok(())
}

struct Inner {
    state: CheckoutState,
    generation: u64,
    token: Option<CancellationToken>,
}

/// Drives submission attempts and enforces last-submission-wins
pub struct CheckoutPipeline {
    inner: StdMutex<Inner>,
}

impl CheckoutPipeline {
    pub fn new() -> Self {
        Self {
            inner: StdMutex::new(Inner {
                state: CheckoutState::Idle,
                generation: 0,
                token: None,
            }),
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.lock_inner().state
    }

    /// Validate and submit a sale. On success the cart is cleared, the
    /// catalog reloaded, and the created sale id returned. On any failure
    /// the cart is left untouched for retry.
    pub async fn submit_sale<B: Backend>(
        &self,
        cart: &Mutex<Cart>,
        draft: &SaleDraft,
        catalog: &CatalogCache,
        api: &GestioApi<B>,
    ) -> Result<i64, CheckoutError> {
        let snapshot = catalog.snapshot();
        self.set_state(CheckoutState::Validating);
        let items = {
            let cart = cart.lock().await;
            if let Err(e) = validate_sale(&cart, draft, &snapshot) {
                self.set_state(CheckoutState::Idle);
                tracing::debug!(error = %e, "sale rejected before network");
                return Err(e);
            }
            cart.payloads()
        };
        let payload = SaleCreate {
            client_id: draft.client_id,
            currency: draft.currency.clone(),
            payment_method: draft.payment_method.clone(),
            notes: draft.notes.clone(),
            items,
        };

        let sale = self.guarded_post(api.create_sale(&payload)).await?;
        tracing::info!(sale_id = sale.id, invoice = %sale.invoice_number, "sale recorded");

        cart.lock().await.clear();
        self.refresh_catalog(catalog, api).await;
        Ok(sale.id)
    }

    /// Validate and submit a purchase order; same contract as
    /// [`submit_sale`](Self::submit_sale)
    pub async fn submit_purchase<B: Backend>(
        &self,
        cart: &Mutex<Cart>,
        draft: &PurchaseDraft,
        catalog: &CatalogCache,
        api: &GestioApi<B>,
    ) -> Result<i64, CheckoutError> {
        let snapshot = catalog.snapshot();
        self.set_state(CheckoutState::Validating);
        let (supplier_id, items) = {
            let cart = cart.lock().await;
            if let Err(e) = validate_purchase(&cart, draft, &snapshot) {
                self.set_state(CheckoutState::Idle);
                tracing::debug!(error = %e, "purchase order rejected before network");
                return Err(e);
            }
            // supplier_id checked by validate_purchase
            (draft.supplier_id.unwrap_or_default(), cart.payloads())
        };
        let payload = PurchaseOrderCreate {
            supplier_id,
            expected_delivery: draft.expected_delivery,
            notes: draft.notes.clone(),
            items,
        };

        let order = self.guarded_post(api.create_purchase_order(&payload)).await?;
        tracing::info!(order_id = order.id, number = %order.order_number, "purchase order recorded");

        cart.lock().await.clear();
        self.refresh_catalog(catalog, api).await;
        Ok(order.id)
    }

    /// Run the create request under supersession control: starting a new
    /// attempt cancels the in-flight one, whose response is discarded.
    async fn guarded_post<T>(
        &self,
        request: impl Future<Output = ClientResult<T>>,
    ) -> Result<T, CheckoutError> {
        let (token, my_generation) = {
            let mut inner = self.lock_inner();
            if let Some(previous) = inner.token.take() {
                tracing::debug!("superseding in-flight submission");
                previous.cancel();
            }
            inner.generation += 1;
            inner.state = CheckoutState::Submitting;
            let token = CancellationToken::new();
            inner.token = Some(token.clone());
            (token, inner.generation)
        };

        let result = tokio::select! {
            _ = token.cancelled() => Err(CheckoutError::Superseded),
            r = request => {
                r.map_err(|e| CheckoutError::SubmissionRejected(e.surface_message()))
            }
        };

        let mut inner = self.lock_inner();
        if inner.generation == my_generation {
            inner.state = CheckoutState::Idle;
            inner.token = None;
        }
        result
    }

    /// Post-success reload; the write already landed, so a reload failure
    /// is logged rather than turned into a submission error
    async fn refresh_catalog<B: Backend>(&self, catalog: &CatalogCache, api: &GestioApi<B>) {
        if let Err(e) = catalog.reload(api).await {
            tracing::warn!(entity = %e.entity(), error = %e, "catalog reload after submission failed");
        }
    }

    fn set_state(&self, state: CheckoutState) {
        self.lock_inner().state = state;
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CheckoutPipeline {
    fn default() -> Self {
        Self::new()
    }
}
