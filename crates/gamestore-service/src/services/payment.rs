//! Payment service
//!
//! Drives the payment state machine for finalized orders. Every status change
//! goes through `PaymentRepository::transition`, which writes the status,
//! `paid_at` and the audit log row atomically.

use chrono::Utc;
use gamestore_core::entities::{Order, Payment, PaymentLog, PaymentMethod, SettledTransaction};
use gamestore_core::{
    DomainError, Money, OrderId, PaymentId, PaymentMethodId, PaymentStatus, Role, Session,
};
use tracing::{error, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Payment service
pub struct PaymentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PaymentService<'a> {
    /// Create a new PaymentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_methods(&self) -> ServiceResult<Vec<PaymentMethod>> {
        Ok(self.ctx.payment_repo().list_methods().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_method(&self, id: PaymentMethodId) -> ServiceResult<PaymentMethod> {
        self.ctx
            .payment_repo()
            .find_method(id)
            .await?
            .ok_or_else(|| DomainError::PaymentMethodNotFound(id).into())
    }

    /// Open a pending payment attempt for a finalized order
    ///
    /// The amount is taken as given; callers pass the checkout total.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn create_payment(
        &self,
        session: &Session,
        order_id: OrderId,
        method_id: PaymentMethodId,
        amount: Money,
    ) -> ServiceResult<Payment> {
        let order = self.customer_order(session, order_id).await?;
        if !order.is_finalized() {
            return Err(DomainError::InvalidInput(format!(
                "order {order_id} has not been checked out"
            ))
            .into());
        }
        self.get_method(method_id).await?;

        let payment = Payment::new(self.ctx.generate_id(), order_id, method_id, amount);
        self.ctx.payment_repo().create(&payment).await?;

        info!(payment_id = %payment.id, order_id = %order_id, amount = %amount, "Payment created");
        Ok(payment)
    }

    /// Settle a payment
    ///
    /// A second confirmation fails with `AlreadyPaid` and changes nothing.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn confirm(&self, session: &Session, id: PaymentId) -> ServiceResult<Payment> {
        let payment = self.customer_payment(session, id).await?;
        if payment.is_paid() {
            warn!(payment_id = %id, "Confirmation rejected: already paid");
            return Err(DomainError::AlreadyPaid(id).into());
        }

        let payment = self.transition(id, PaymentStatus::Paid).await?;

        info!(payment_id = %id, order_id = %payment.order_id, "Payment confirmed");
        Ok(payment)
    }

    /// Mark a payment as failed
    ///
    /// Permitted from any status, `Paid` included; the transition is logged
    /// like any other.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn fail(&self, session: &Session, id: PaymentId) -> ServiceResult<Payment> {
        let current = self.customer_payment(session, id).await?;
        if current.is_paid() {
            warn!(payment_id = %id, "Failing a settled payment");
        }

        let payment = self.transition(id, PaymentStatus::Failed).await?;

        info!(payment_id = %id, from = current.status.as_str(), "Payment failed");
        Ok(payment)
    }

    /// Create a payment for the order total and confirm it
    ///
    /// When confirmation fails the attempt is marked `Failed` and the
    /// confirmation error is returned.
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn pay(
        &self,
        session: &Session,
        order_id: OrderId,
        method_id: PaymentMethodId,
    ) -> ServiceResult<Payment> {
        let order = self.customer_order(session, order_id).await?;
        let payment = self
            .create_payment(session, order_id, method_id, order.total_price)
            .await?;

        match self.confirm(session, payment.id).await {
            Ok(paid) => Ok(paid),
            Err(e) => {
                warn!(payment_id = %payment.id, error = %e, "Confirmation failed");
                if let Err(fail_err) = self.transition(payment.id, PaymentStatus::Failed).await {
                    error!(payment_id = %payment.id, error = %fail_err, "Could not mark payment failed");
                }
                Err(e)
            }
        }
    }

    /// Every attempt for an order, newest first; owner or admin
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn payments_for_order(
        &self,
        session: &Session,
        order_id: OrderId,
    ) -> ServiceResult<Vec<Payment>> {
        self.visible_order(session, order_id).await?;
        Ok(self.ctx.payment_repo().list_for_order(order_id).await?)
    }

    /// Audit trail of a payment, oldest first; owner or admin
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn payment_logs(&self, session: &Session, id: PaymentId) -> ServiceResult<Vec<PaymentLog>> {
        if session.role == Role::Admin {
            self.find_payment(id).await?;
        } else {
            self.customer_payment(session, id).await?;
        }
        Ok(self.ctx.payment_repo().list_logs(id).await?)
    }

    /// Every settled payment with its order, by order date; admin only
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub async fn transactions_report(&self, session: &Session) -> ServiceResult<Vec<SettledTransaction>> {
        session.require_admin()?;
        Ok(self.ctx.payment_repo().settled_transactions().await?)
    }

    /// Create the named payment methods that do not exist yet
    #[instrument(skip(self))]
    pub async fn seed_payment_methods(&self, names: &[String]) -> ServiceResult<Vec<PaymentMethod>> {
        let existing = self.ctx.payment_repo().list_methods().await?;
        let mut created: Vec<PaymentMethod> = Vec::new();

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let known = existing
                .iter()
                .chain(created.iter())
                .any(|m: &PaymentMethod| m.name.eq_ignore_ascii_case(name));
            if known {
                continue;
            }

            let method = PaymentMethod {
                id: self.ctx.generate_id(),
                name: name.to_string(),
            };
            self.ctx.payment_repo().create_method(&method).await?;
            info!(method_id = %method.id, name = %method.name, "Payment method created");
            created.push(method);
        }

        Ok(created)
    }

    async fn transition(&self, id: PaymentId, next: PaymentStatus) -> ServiceResult<Payment> {
        Ok(self
            .ctx
            .payment_repo()
            .transition(id, next, self.ctx.generate_id(), Utc::now())
            .await?)
    }

    async fn find_payment(&self, id: PaymentId) -> ServiceResult<Payment> {
        self.ctx
            .payment_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::PaymentNotFound(id).into())
    }

    /// A payment on one of the session customer's orders
    async fn customer_payment(&self, session: &Session, id: PaymentId) -> ServiceResult<Payment> {
        let customer_id = session.require_customer()?;
        let payment = self.find_payment(id).await?;
        match self.ctx.order_repo().find_by_id(payment.order_id).await? {
            Some(order) if order.customer_id == customer_id => Ok(payment),
            _ => Err(DomainError::PaymentNotFound(id).into()),
        }
    }

    /// An order of the session customer; foreign orders read as missing
    async fn customer_order(&self, session: &Session, order_id: OrderId) -> ServiceResult<Order> {
        let customer_id = session.require_customer()?;
        match self.ctx.order_repo().find_by_id(order_id).await? {
            Some(order) if order.customer_id == customer_id => Ok(order),
            _ => Err(DomainError::OrderNotFound(order_id).into()),
        }
    }

    /// Admins see every order, customers their own
    async fn visible_order(&self, session: &Session, order_id: OrderId) -> ServiceResult<Order> {
        if session.role != Role::Admin {
            return self.customer_order(session, order_id).await;
        }
        self.ctx
            .order_repo()
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id).into())
    }
}
