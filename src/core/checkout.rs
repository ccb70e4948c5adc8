//! Checkout business logic - the Order Committer.
//!
//! A checkout is a straight-line pipeline: read the owner's cart lines from
//! the order store, resolve current prices from the catalog store, then commit
//! the order. The commit has to look atomic even though it spans several store
//! calls, so it runs as a two-phase sequence: the order header and its lines
//! are written in one order-store transaction tagged `pending`, the cart is
//! cleared, and only then is the order marked `settled`. An order left in
//! `pending` is a detectable partial completion, resolved later by
//! [`CheckoutService::reconcile_pending_orders`].
//!
//! Concurrent checkouts from the same owner (a double-clicked buy button) are
//! serialized by a per-owner async mutex held across the whole
//! read-commit-clear sequence; the loser re-reads an empty cart and gets
//! `CartEmpty` instead of a duplicate order.

use crate::{
    config::database::Stores,
    core::{cart, catalog},
    entities::{Order, order, order_item},
    errors::{Error, Result},
};
use dashmap::DashMap;
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// What the Order Committer does when a cart product has no current catalog
/// price (the product was deleted mid-shop, or the stores have drifted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPricePolicy {
    /// Fail the whole checkout with [`Error::PriceResolution`] and let the
    /// caller retry after fixing the cart. The default.
    #[default]
    Reject,
    /// Treat the missing price as zero: the line contributes nothing to the
    /// total and is captured with `price_at_purchase = 0`. This reproduces the
    /// legacy behavior and silently under-charges; keep it only where product
    /// deletion during checkout is an accepted business rule.
    SubstituteZero,
}

impl FromStr for MissingPricePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "zero" | "substitute_zero" => Ok(Self::SubstituteZero),
            other => Err(Error::Config {
                message: format!("Unknown missing-price policy '{other}' (expected 'reject' or 'zero')"),
            }),
        }
    }
}

/// A successfully committed order with its lines, as returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The created order header
    pub order: order::Model,
    /// The order lines, with prices captured at purchase time
    pub items: Vec<order_item::Model>,
}

/// Stateless-per-request checkout pipeline with per-owner exclusion.
///
/// The service itself only holds the missing-price policy and the guard map;
/// all persistent state lives in the stores.
#[derive(Debug, Default)]
pub struct CheckoutService {
    policy: MissingPricePolicy,
    guards: DashMap<i64, Arc<Mutex<()>>>,
}

impl CheckoutService {
    /// Creates a checkout service with the given missing-price policy.
    pub fn new(policy: MissingPricePolicy) -> Self {
        Self {
            policy,
            guards: DashMap::new(),
        }
    }

    /// The policy this service applies to unresolvable prices.
    pub fn policy(&self) -> MissingPricePolicy {
        self.policy
    }

    fn guard_for(&self, user_id: i64) -> Arc<Mutex<()>> {
        self.guards
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Places an order for everything in the owner's cart.
    ///
    /// Pipeline, under the owner's guard:
    /// 1. read cart lines (empty cart is a `CartEmpty` rejection, no order),
    /// 2. resolve prices and apply the missing-price policy,
    /// 3. write order header + lines in one order-store transaction, tagged
    ///    `pending` with a fresh checkout token,
    /// 4. clear the owner's cart,
    /// 5. settle the order and return the receipt.
    ///
    /// Any store failure aborts the remaining steps and propagates as a fault;
    /// a failure after step 3 leaves the order `pending` for the
    /// reconciliation sweep rather than reporting a false success.
    pub async fn place_order(&self, stores: &Stores, user_id: i64) -> Result<CheckoutReceipt> {
        let guard = self.guard_for(user_id);
        let _held = guard.lock().await;

        let lines = cart::list_cart_items(&stores.orders, user_id).await?;
        if lines.is_empty() {
            return Err(Error::CartEmpty { user_id });
        }

        let ids: Vec<String> = lines.iter().map(|l| l.product_id.clone()).collect();
        let prices = catalog::resolve_prices(&stores.catalog, &ids).await?;

        if self.policy == MissingPricePolicy::Reject {
            let missing: Vec<String> = lines
                .iter()
                .map(|l| &l.product_id)
                .filter(|id| !prices.contains_key(*id))
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            if !missing.is_empty() {
                return Err(Error::PriceResolution {
                    product_ids: missing,
                });
            }
        }

        let total: f64 = lines
            .iter()
            .map(|l| prices.get(&l.product_id).copied().unwrap_or(0.0) * f64::from(l.quantity))
            .sum();

        // Phase one: order header and lines in a single order-store
        // transaction, tagged pending until the cart is cleared.
        let txn = stores.orders.begin().await?;

        let order = order::ActiveModel {
            user_id: Set(user_id),
            total: Set(total),
            status: Set(order::STATUS_PENDING.to_string()),
            checkout_token: Set(Uuid::new_v4().to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = order_item::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(line.product_id.clone()),
                quantity: Set(line.quantity),
                price_at_purchase: Set(prices.get(&line.product_id).copied().unwrap_or(0.0)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            items.push(item);
        }

        txn.commit().await?;

        // Phase two: clear the cart, then settle. The guard makes in-process
        // skew impossible; the count check catches another process racing us.
        let cleared = cart::clear_cart(&stores.orders, user_id).await?;
        if cleared != lines.len() as u64 {
            warn!(
                user_id,
                order_id = order.id,
                expected = lines.len(),
                cleared,
                "Cart changed between read and clear; committed order is authoritative"
            );
        }

        let order = settle_order(&stores.orders, order).await?;
        info!(user_id, order_id = order.id, total, "Order placed");

        Ok(CheckoutReceipt { order, items })
    }

    /// Resolves orders stuck in `pending` - checkouts whose cart-clearing or
    /// settlement step never completed.
    ///
    /// For each pending order older than `grace`, any cart lines the owner
    /// still holds from the interrupted attempt are cleared and the order is
    /// settled. Returns how many orders were reconciled.
    pub async fn reconcile_pending_orders(
        &self,
        stores: &Stores,
        grace: chrono::Duration,
    ) -> Result<u64> {
        let cutoff = chrono::Utc::now() - grace;

        let stuck = Order::find()
            .filter(order::Column::Status.eq(order::STATUS_PENDING))
            .filter(order::Column::CreatedAt.lt(cutoff))
            .order_by_asc(order::Column::Id)
            .all(&stores.orders)
            .await?;

        let mut reconciled = 0;
        for pending in stuck {
            // Take the owner's guard so the sweep never races a live checkout.
            let guard = self.guard_for(pending.user_id);
            let _held = guard.lock().await;

            let leftover = cart::clear_cart(&stores.orders, pending.user_id).await?;
            let order_id = pending.id;
            let user_id = pending.user_id;
            settle_order(&stores.orders, pending).await?;
            reconciled += 1;

            info!(
                user_id,
                order_id, leftover, "Reconciled pending order from interrupted checkout"
            );
        }

        Ok(reconciled)
    }
}

/// Marks an order settled. The pending-to-settled transition is the only
/// mutation orders ever receive.
async fn settle_order(db: &DatabaseConnection, order: order::Model) -> Result<order::Model> {
    let mut active: order::ActiveModel = order.into();
    active.status = Set(order::STATUS_SETTLED.to_string());
    active.update(db).await.map_err(Into::into)
}
