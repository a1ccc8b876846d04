//! Local order list with optimistic transitions.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use rustc_hash::FxHashMap;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use voltcart::{
    orders::{Order, OrderAction, OrderId},
    users::{Role, UserId},
};

use crate::{
    domain::orders::{
        api::OrdersApi,
        errors::{BoardError, OrdersApiError},
    },
    in_flight::InFlight,
};

/// Result of a single order transition.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The service accepted the change; holds the stored order.
    Applied(Order),

    /// The service rejected the change and the local copy was restored.
    Reverted {
        /// Order as it was before the optimistic update.
        order: Order,
        /// Why the service rejected it.
        error: OrdersApiError,
    },
}

/// Per-order results of a bulk transition.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    /// Orders updated on the service and locally.
    pub succeeded: Vec<OrderId>,

    /// Orders left unchanged, with the reason.
    pub failed: Vec<(OrderId, String)>,
}

impl BulkOutcome {
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Orders visible to one buyer or seller.
pub struct OrderBoard {
    api: Arc<dyn OrdersApi>,
    role: Role,
    user: Option<UserId>,
    orders: Mutex<Vec<Order>>,
    generation: AtomicU64,
    bulk: InFlight,
}

impl std::fmt::Debug for OrderBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBoard")
            .field("role", &self.role)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl OrderBoard {
    /// Board for a buyer, showing only their orders.
    #[must_use]
    pub fn for_buyer(api: Arc<dyn OrdersApi>, buyer: UserId) -> Self {
        Self::new(api, Role::Buyer, Some(buyer))
    }

    /// Board for a seller, showing every order.
    #[must_use]
    pub fn for_seller(api: Arc<dyn OrdersApi>) -> Self {
        Self::new(api, Role::Seller, None)
    }

    fn new(api: Arc<dyn OrdersApi>, role: Role, user: Option<UserId>) -> Self {
        Self {
            api,
            role,
            user,
            orders: Mutex::new(Vec::new()),
            generation: AtomicU64::new(0),
            bulk: InFlight::new(),
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current list.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.lock().clone()
    }

    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.lock().iter().find(|order| &order.id == id).cloned()
    }

    /// Fetch the list from the service.
    ///
    /// A load that finishes after a newer load started is discarded and the current list
    /// is returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the service call fails; the local list is left as it was.
    pub async fn load(&self) -> Result<Vec<Order>, BoardError> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let fetched = self.api.list_orders(self.user.clone()).await?;

        if self.generation.load(Ordering::Acquire) != generation {
            debug!(generation, "discarding stale order list");
            return Ok(self.orders());
        }

        let mut orders = self.lock();

        *orders = fetched;

        Ok(orders.clone())
    }

    /// Apply `action` locally, then confirm it with the service.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for unknown ids or a [`BoardError::Transition`] when
    /// the action isn't allowed. Service failures are reported as
    /// [`TransitionOutcome::Reverted`].
    pub async fn apply_action(
        &self,
        id: &OrderId,
        action: &OrderAction,
    ) -> Result<TransitionOutcome, BoardError> {
        let (snapshot, patch) = {
            let mut orders = self.lock();

            let order = orders
                .iter_mut()
                .find(|order| &order.id == id)
                .ok_or_else(|| BoardError::NotFound(id.clone()))?;

            let patch = action.authorize(self.role, order)?;
            let snapshot = order.clone();

            order.apply_patch(&patch);

            (snapshot, patch)
        };

        match self.api.update_order(id.clone(), patch).await {
            Ok(stored) => {
                self.replace(stored.clone());

                info!(order_id = %id, action = action.name(), "order updated");

                Ok(TransitionOutcome::Applied(stored))
            }
            Err(error) => {
                warn!(
                    order_id = %id,
                    action = action.name(),
                    %error,
                    "order update failed, reverting"
                );

                self.replace(snapshot.clone());

                Ok(TransitionOutcome::Reverted {
                    order: snapshot,
                    error,
                })
            }
        }
    }

    /// Apply `action` to many orders concurrently.
    ///
    /// Only orders whose update the service accepted change locally.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BulkInFlight`] while another bulk update is running.
    pub async fn bulk_update(
        &self,
        ids: &[OrderId],
        action: &OrderAction,
    ) -> Result<BulkOutcome, BoardError> {
        let Some(_guard) = self.bulk.try_acquire() else {
            return Err(BoardError::BulkInFlight);
        };

        let mut outcome = BulkOutcome::default();
        let mut tasks = JoinSet::new();
        let mut pending = FxHashMap::default();

        for id in ids {
            let Some(order) = self.get(id) else {
                let error = BoardError::NotFound(id.clone());
                outcome.failed.push((id.clone(), error.to_string()));
                continue;
            };

            let patch = match action.authorize(self.role, &order) {
                Ok(patch) => patch,
                Err(error) => {
                    outcome.failed.push((id.clone(), error.to_string()));
                    continue;
                }
            };

            let api = Arc::clone(&self.api);
            let request_id = id.clone();

            let task = tasks.spawn(async move { api.update_order(request_id, patch).await });

            pending.insert(task.id(), id.clone());
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((task, Ok(stored))) => {
                    pending.remove(&task);
                    outcome.succeeded.push(stored.id.clone());
                    self.replace(stored);
                }
                Ok((task, Err(error))) => {
                    if let Some(id) = pending.remove(&task) {
                        outcome.failed.push((id, error.to_string()));
                    }
                }
                Err(error) => {
                    warn!(%error, "bulk update task failed to complete");

                    if let Some(id) = pending.remove(&error.id()) {
                        outcome.failed.push((id, error.to_string()));
                    }
                }
            }
        }

        info!(
            action = action.name(),
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "bulk update finished"
        );

        Ok(outcome)
    }

    fn replace(&self, updated: Order) {
        let mut orders = self.lock();

        if let Some(order) = orders.iter_mut().find(|order| order.id == updated.id) {
            *order = updated;
        }
    }
}
