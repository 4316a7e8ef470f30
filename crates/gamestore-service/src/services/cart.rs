//! Cart and order ledger service
//!
//! A customer's active cart is their order with a zero total. Checkout writes
//! the recomputed total onto it, which finalizes the order; the next cart
//! operation opens a fresh cart.

use gamestore_core::entities::{Cart, CheckoutReceipt, Order, OrderHistoryEntry, OrderItem};
use gamestore_core::{CustomerId, DomainError, GameId, OrderId, OrderItemId, Session};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Cart and order ledger service
pub struct CartService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CartService<'a> {
    /// Create a new CartService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The customer's active cart, created when absent
    ///
    /// A concurrent creation for the same customer surfaces as `Conflict`.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn get_or_create_active_cart(&self, session: &Session) -> ServiceResult<OrderId> {
        let customer_id = session.require_customer()?;
        Ok(self.active_cart(customer_id).await?.id)
    }

    /// Append a line for `game_id` priced at the game's current price
    ///
    /// Repeated adds of the same game create separate lines.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn add_item(
        &self,
        session: &Session,
        game_id: GameId,
        quantity: i64,
    ) -> ServiceResult<OrderItem> {
        let customer_id = session.require_customer()?;
        let quantity = checked_quantity(quantity)?;

        let game = self
            .ctx
            .game_repo()
            .find_by_id(game_id)
            .await?
            .ok_or(DomainError::GameNotFound(game_id))?;

        let cart = self.active_cart(customer_id).await?;
        let item = OrderItem::new(
            self.ctx.generate_id(),
            cart.id,
            game_id,
            quantity,
            game.price,
        );
        self.ctx.order_repo().add_item(&item).await?;

        info!(order_id = %cart.id, item_id = %item.id, quantity, "Item added to cart");
        Ok(item)
    }

    /// Lines and recomputed total of one of the customer's orders
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn list_items(&self, session: &Session, order_id: OrderId) -> ServiceResult<Cart> {
        let customer_id = session.require_customer()?;
        self.owned_order(customer_id, order_id).await?;
        let lines = self.ctx.order_repo().list_lines(order_id).await?;
        Ok(Cart::from_lines(order_id, lines))
    }

    /// The active cart with its lines, created when absent
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn view_cart(&self, session: &Session) -> ServiceResult<Cart> {
        let customer_id = session.require_customer()?;
        let cart = self.active_cart(customer_id).await?;
        let lines = self.ctx.order_repo().list_lines(cart.id).await?;
        Ok(Cart::from_lines(cart.id, lines))
    }

    /// Soft-delete one line of the active cart
    ///
    /// Removing an already removed line succeeds without effect.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn remove_item(&self, session: &Session, item_id: OrderItemId) -> ServiceResult<()> {
        let customer_id = session.require_customer()?;
        let item = self.cart_item(customer_id, item_id).await?;
        if item.is_deleted() {
            debug!(item_id = %item_id, "Item already removed");
            return Ok(());
        }

        self.ctx.order_repo().remove_item(item_id).await?;

        info!(order_id = %item.order_id, item_id = %item_id, "Item removed from cart");
        Ok(())
    }

    /// Change the quantity of a live line of the active cart
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn update_item_quantity(
        &self,
        session: &Session,
        item_id: OrderItemId,
        quantity: i64,
    ) -> ServiceResult<()> {
        let customer_id = session.require_customer()?;
        let quantity = checked_quantity(quantity)?;
        let item = self.cart_item(customer_id, item_id).await?;
        if item.is_deleted() {
            return Err(DomainError::OrderItemNotFound(item_id).into());
        }

        self.ctx
            .order_repo()
            .update_item_quantity(item_id, quantity)
            .await?;

        info!(item_id = %item_id, quantity, "Item quantity updated");
        Ok(())
    }

    /// Remove every line of the active cart, returning how many were removed
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn clear_cart(&self, session: &Session) -> ServiceResult<u64> {
        let customer_id = session.require_customer()?;
        let Some(cart) = self.ctx.order_repo().find_active_cart(customer_id).await? else {
            return Ok(0);
        };

        let removed = self.ctx.order_repo().clear_items(cart.id).await?;

        info!(order_id = %cart.id, removed, "Cart cleared");
        Ok(removed)
    }

    /// Finalize the active cart at its recomputed total
    ///
    /// Fails with `EmptyCart` without writing anything when the cart has no
    /// live lines, and with `InvalidInput` when the total does not fit a
    /// stored amount.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn checkout(&self, session: &Session) -> ServiceResult<CheckoutReceipt> {
        let customer_id = session.require_customer()?;
        let Some(order) = self.ctx.order_repo().find_active_cart(customer_id).await? else {
            return Err(DomainError::EmptyCart.into());
        };

        let lines = self.ctx.order_repo().list_lines(order.id).await?;
        let cart = Cart::from_lines(order.id, lines);
        if cart.is_empty() {
            return Err(DomainError::EmptyCart.into());
        }
        // A zero total would leave the order indistinguishable from a cart
        if cart.total.is_zero() {
            warn!(order_id = %order.id, "Checkout rejected: zero total");
            return Err(DomainError::InvalidInput(
                "cart total must be positive to check out".to_string(),
            )
            .into());
        }
        if let Err(e) = cart.total.check_range() {
            warn!(
                order_id = %order.id,
                total = %cart.total,
                "Checkout rejected: total out of range"
            );
            return Err(DomainError::InvalidInput(e.to_string()).into());
        }

        self.ctx.order_repo().finalize(order.id, cart.total).await?;

        info!(order_id = %order.id, total = %cart.total, "Checked out");
        Ok(CheckoutReceipt {
            order_id: order.id,
            total: cart.total,
        })
    }

    /// Finalized orders, oldest first, with their payment status
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn order_history(&self, session: &Session) -> ServiceResult<Vec<OrderHistoryEntry>> {
        let customer_id = session.require_customer()?;
        Ok(self.ctx.order_repo().history(customer_id).await?)
    }

    async fn active_cart(&self, customer_id: CustomerId) -> ServiceResult<Order> {
        if let Some(cart) = self.ctx.order_repo().find_active_cart(customer_id).await? {
            return Ok(cart);
        }

        let cart = Order::new_cart(self.ctx.generate_id(), customer_id);
        self.ctx.order_repo().create_cart(&cart).await?;

        info!(order_id = %cart.id, customer_id = %customer_id, "Cart created");
        Ok(cart)
    }

    /// An order of this customer; foreign orders read as missing
    async fn owned_order(&self, customer_id: CustomerId, order_id: OrderId) -> ServiceResult<Order> {
        match self.ctx.order_repo().find_by_id(order_id).await? {
            Some(order) if order.customer_id == customer_id => Ok(order),
            _ => Err(DomainError::OrderNotFound(order_id).into()),
        }
    }

    /// A line of this customer's still-active cart, removed lines included
    async fn cart_item(&self, customer_id: CustomerId, item_id: OrderItemId) -> ServiceResult<OrderItem> {
        let item = self
            .ctx
            .order_repo()
            .find_item(item_id)
            .await?
            .ok_or(DomainError::OrderItemNotFound(item_id))?;

        let order = match self.ctx.order_repo().find_by_id(item.order_id).await? {
            Some(order) if order.customer_id == customer_id => order,
            _ => return Err(DomainError::OrderItemNotFound(item_id).into()),
        };
        if !order.is_active_cart() {
            return Err(DomainError::OrderFinalized(order.id).into());
        }
        Ok(item)
    }
}

fn checked_quantity(quantity: i64) -> Result<u32, DomainError> {
    match u32::try_from(quantity) {
        Ok(q) if q >= 1 => Ok(q),
        _ => Err(DomainError::InvalidQuantity(quantity)),
    }
}
