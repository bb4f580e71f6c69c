//! Cart / line aggregator
//!
//! Ordered collection of line items for the current unsaved transaction.
//! At most one line per product: re-adding a product merges the quantity
//! and overwrites the discount (last write wins). Every mutation is
//! all-or-nothing; a rejected add leaves the cart untouched.

use crate::catalog::CatalogSnapshot;
use crate::money::{round_money, to_decimal};
use rust_decimal::Decimal;
use shared::models::{ItemPayload, Product};
use thiserror::Error;

/// Maximum allowed unit price per line
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;

/// Cart errors
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantity was not a positive whole number within bounds
    #[error("quantity must be a positive whole number, got {0}")]
    InvalidQuantity(f64),

    /// Requested quantity exceeds the cached stock for the product
    #[error("insufficient stock for product {product_id}: {available} available")]
    StockInsufficient {
        product_id: i64,
        requested: i32,
        available: i32,
    },

    /// Price was negative, non-finite or out of bounds
    #[error("unit price must be a finite non-negative amount, got {0}")]
    InvalidPrice(f64),

    /// Discount outside [0, 100]
    #[error("discount must be between 0 and 100, got {0}")]
    InvalidDiscount(f64),

    /// Product id absent from the catalog snapshot
    #[error("product {0} is not in the catalog")]
    UnknownProduct(i64),
}

/// Raw line input as read from an entry form
#[derive(Debug, Clone)]
pub struct LineInput {
    pub product_id: i64,
    pub product_name: String,
    /// Form-level quantity; must be a positive whole number
    pub quantity: f64,
    pub unit_price: f64,
    pub discount_percent: f64,
}

impl LineInput {
    /// Line for the sale form, price defaulted from the product's sale price
    pub fn sale(product: &Product, quantity: f64, discount_percent: f64) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity,
            unit_price: crate::money::to_f64(product.sale_price),
            discount_percent,
        }
    }

    /// Line for the purchase-order form, price defaulted from the purchase price
    pub fn purchase(product: &Product, quantity: f64, discount_percent: f64) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity,
            unit_price: crate::money::to_f64(product.purchase_price),
            discount_percent,
        }
    }
}

/// One aggregated product line
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
}

impl LineItem {
    /// `quantity * unit_price * (1 - discount/100)`, full precision
    pub fn line_total(&self) -> Decimal {
        let discount_factor = Decimal::ONE - self.discount_percent / Decimal::ONE_HUNDRED;
        Decimal::from(self.quantity) * self.unit_price * discount_factor
    }

    /// Wire payload for submission
    pub fn payload(&self) -> ItemPayload {
        ItemPayload {
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_percent: self.discount_percent,
        }
    }
}

/// Per-line and grand totals, pure function of cart state
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    pub lines: Vec<(i64, Decimal)>,
    pub grand_total: Decimal,
}

impl CartTotals {
    /// Grand total rounded for display
    pub fn grand_total_rounded(&self) -> Decimal {
        round_money(self.grand_total)
    }
}

/// The ordered line collection; insertion order is display order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<LineItem>,
    /// When set, adds are guarded against cached stock. Sales carts enforce
    /// it; replenishment (purchase-order) carts do not, since those order
    /// beyond what is on hand by definition.
    enforce_stock: bool,
}

impl Cart {
    /// Sales cart: adds are rejected when they exceed cached stock
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            enforce_stock: true,
        }
    }

    /// Replenishment cart for purchase orders: no stock guard
    pub fn replenishment() -> Self {
        Self {
            lines: Vec::new(),
            enforce_stock: false,
        }
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn enforces_stock(&self) -> bool {
        self.enforce_stock
    }

    /// Add a line, or merge into the existing line for the same product.
    ///
    /// Merging increments the quantity and overwrites the discount; the
    /// original unit price is kept. No mutation happens on any error.
    pub fn add_or_merge(
        &mut self,
        input: LineInput,
        snapshot: &CatalogSnapshot,
    ) -> Result<(), CartError> {
        let quantity = validate_quantity(input.quantity)?;
        let unit_price = validate_price(input.unit_price)?;
        let discount = validate_discount(input.discount_percent)?;

        let product = snapshot
            .product(input.product_id)
            .ok_or(CartError::UnknownProduct(input.product_id))?;
        if self.enforce_stock && quantity > product.stock_on_hand {
            return Err(CartError::StockInsufficient {
                product_id: input.product_id,
                requested: quantity,
                available: product.stock_on_hand,
            });
        }

        match self
            .lines
            .iter_mut()
            .find(|l| l.product_id == input.product_id)
        {
            Some(line) => {
                // The merged total must stay within the same bound as a
                // single add
                let merged = line
                    .quantity
                    .checked_add(quantity)
                    .filter(|&q| q <= MAX_QUANTITY)
                    .ok_or(CartError::InvalidQuantity(
                        line.quantity as f64 + quantity as f64,
                    ))?;
                line.quantity = merged;
                line.discount_percent = discount;
            }
            None => self.lines.push(LineItem {
                product_id: input.product_id,
                product_name: input.product_name,
                quantity,
                unit_price,
                discount_percent: discount,
            }),
        }
        Ok(())
    }

    /// Remove the line for `product_id`; silently does nothing when absent
    pub fn remove_line(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute per-line and grand totals. Deterministic and side-effect
    /// free; an empty cart yields zero totals.
    pub fn totals(&self) -> CartTotals {
        let lines: Vec<(i64, Decimal)> = self
            .lines
            .iter()
            .map(|l| (l.product_id, l.line_total()))
            .collect();
        let grand_total = lines.iter().map(|(_, t)| *t).sum();
        CartTotals { lines, grand_total }
    }

    /// Wire payloads for every line, in display order
    pub fn payloads(&self) -> Vec<ItemPayload> {
        self.lines.iter().map(LineItem::payload).collect()
    }
}

fn validate_quantity(quantity: f64) -> Result<i32, CartError> {
    if !quantity.is_finite() || quantity <= 0.0 || quantity.fract() != 0.0 {
        return Err(CartError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY as f64 {
        return Err(CartError::InvalidQuantity(quantity));
    }
    Ok(quantity as i32)
}

fn validate_price(price: f64) -> Result<Decimal, CartError> {
    if !price.is_finite() || price < 0.0 || price > MAX_PRICE {
        return Err(CartError::InvalidPrice(price));
    }
    Ok(to_decimal(price))
}

fn validate_discount(discount: f64) -> Result<Decimal, CartError> {
    if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
        return Err(CartError::InvalidDiscount(discount));
    }
    Ok(to_decimal(discount))
}
