//! Service integration tests over the in-memory repositories
//!
//! Run with: cargo test -p integration-tests --test service_tests

use gamestore_common::AppError;
use gamestore_core::entities::Order;
use gamestore_core::traits::OrderRepository;
use gamestore_core::{DomainError, ErrorKind, GenreId, Money, PaymentStatus};
use gamestore_service::dto::{RegisterRequest, UpdateGameRequest};
use gamestore_service::{
    AccountService, AuthService, CartService, CatalogService, DeveloperService, GenreService,
    PaymentService, ServiceError,
};
use integration_tests::{
    game_request, game_request_for, genre_request, login_request, register_request, TestApp,
    TEST_PASSWORD,
};
use rust_decimal_macros::dec;

fn money(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount).unwrap()
}

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain()
        .unwrap_or_else(|| panic!("expected a domain error, got {err}"))
}

// ============================================================================
// Checkout and Payment Flow
// ============================================================================

#[tokio::test]
async fn test_two_copies_checkout_and_pay() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "19.99").await.unwrap();
    let card = app.credit_card().await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, game.id, 2).await.unwrap();
    let receipt = cart.checkout(&customer).await.unwrap();
    assert_eq!(receipt.total, money(dec!(39.98)));
    assert_eq!(receipt.total.to_string(), "39.98");

    let history = cart.order_history(&customer).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status_label(), "Unpaid");

    let payments = PaymentService::new(&app.ctx);
    let payment = payments
        .pay(&customer, receipt.order_id, card.id)
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Paid);
    assert_eq!(payment.amount, receipt.total);
    assert!(payment.paid_at.is_some());

    let history = cart.order_history(&customer).await.unwrap();
    assert_eq!(history[0].status_label(), "Paid");
    assert_eq!(history[0].paid_at, payment.paid_at);

    let logs = payments.payment_logs(&customer, payment.id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].old_status, PaymentStatus::Pending);
    assert_eq!(logs[0].new_status, PaymentStatus::Paid);

    // The next cart operation opens a fresh cart
    let next = cart.get_or_create_active_cart(&customer).await.unwrap();
    assert_ne!(next, receipt.order_id);
}

#[tokio::test]
async fn test_second_confirmation_is_rejected_without_a_log() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "5.00").await.unwrap();
    let card = app.credit_card().await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, game.id, 1).await.unwrap();
    let receipt = cart.checkout(&customer).await.unwrap();

    let payments = PaymentService::new(&app.ctx);
    let payment = payments
        .create_payment(&customer, receipt.order_id, card.id, receipt.total)
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    payments.confirm(&customer, payment.id).await.unwrap();
    let err = payments.confirm(&customer, payment.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyPaid);
    assert_eq!(app.store().payment_log_count(payment.id), 1);
}

#[tokio::test]
async fn test_fail_after_paid_is_permitted_and_logged() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "5.00").await.unwrap();
    let card = app.credit_card().await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, game.id, 1).await.unwrap();
    let receipt = cart.checkout(&customer).await.unwrap();

    let payments = PaymentService::new(&app.ctx);
    let paid = payments.pay(&customer, receipt.order_id, card.id).await.unwrap();
    let failed = payments.fail(&customer, paid.id).await.unwrap();

    assert_eq!(failed.status, PaymentStatus::Failed);
    assert_eq!(failed.paid_at, paid.paid_at);

    let logs = payments.payment_logs(&admin, paid.id).await.unwrap();
    let steps: Vec<_> = logs.iter().map(|l| (l.old_status, l.new_status)).collect();
    assert_eq!(
        steps,
        vec![
            (PaymentStatus::Pending, PaymentStatus::Paid),
            (PaymentStatus::Paid, PaymentStatus::Failed),
        ]
    );

    // A failed attempt can still be settled later
    let again = payments.confirm(&customer, paid.id).await.unwrap();
    assert_eq!(again.status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_order_settles_at_most_once() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "5.00").await.unwrap();
    let card = app.credit_card().await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, game.id, 1).await.unwrap();
    let receipt = cart.checkout(&customer).await.unwrap();

    let payments = PaymentService::new(&app.ctx);
    let first = payments
        .create_payment(&customer, receipt.order_id, card.id, receipt.total)
        .await
        .unwrap();
    let second = payments
        .create_payment(&customer, receipt.order_id, card.id, receipt.total)
        .await
        .unwrap();

    payments.confirm(&customer, first.id).await.unwrap();
    let err = payments.confirm(&customer, second.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let attempts = payments
        .payments_for_order(&customer, receipt.order_id)
        .await
        .unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts.iter().filter(|p| p.is_paid()).count(), 1);
    assert_eq!(app.store().payment_log_count(second.id), 0);
}

#[tokio::test]
async fn test_pay_marks_attempt_failed_when_settlement_breaks() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "5.00").await.unwrap();
    let card = app.credit_card().await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, game.id, 1).await.unwrap();
    let receipt = cart.checkout(&customer).await.unwrap();

    app.store().fail_next_settlement();
    let payments = PaymentService::new(&app.ctx);
    let err = payments
        .pay(&customer, receipt.order_id, card.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unrecoverable);

    let attempts = payments
        .payments_for_order(&customer, receipt.order_id)
        .await
        .unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].status, PaymentStatus::Failed);
    assert!(attempts[0].paid_at.is_none());

    let history = cart.order_history(&customer).await.unwrap();
    assert_eq!(history[0].status_label(), "Failed");
}

#[tokio::test]
async fn test_payments_require_a_checked_out_order_of_the_caller() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "5.00").await.unwrap();
    let card = app.credit_card().await.unwrap();
    let owner = app.customer("kim").await.unwrap();
    let stranger = app.customer("lee").await.unwrap();

    let cart = CartService::new(&app.ctx);
    let payments = PaymentService::new(&app.ctx);
    cart.add_item(&owner, game.id, 1).await.unwrap();
    let active = cart.get_or_create_active_cart(&owner).await.unwrap();

    let err = payments
        .create_payment(&owner, active, card.id, money(dec!(5)))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::InvalidInput(_)));

    let receipt = cart.checkout(&owner).await.unwrap();
    let err = payments
        .pay(&stranger, receipt.order_id, card.id)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::OrderNotFound(_)));

    let err = payments
        .payments_for_order(&stranger, receipt.order_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let paid = payments.pay(&owner, receipt.order_id, card.id).await.unwrap();
    let err = payments.fail(&stranger, paid.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::PaymentNotFound(_)));
    assert!(payments.payments_for_order(&admin, receipt.order_id).await.is_ok());
}

// ============================================================================
// Cart Tests
// ============================================================================

#[tokio::test]
async fn test_customer_has_one_active_cart() {
    let app = TestApp::in_memory();
    let customer = app.customer("kim").await.unwrap();
    let customer_id = customer.customer_id.unwrap();

    let cart = CartService::new(&app.ctx);
    let first = cart.get_or_create_active_cart(&customer).await.unwrap();
    let second = cart.get_or_create_active_cart(&customer).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(app.store().active_cart_count(customer_id), 1);

    // A racing creation is refused by the store
    let racing = Order::new_cart(app.ctx.generate_id(), customer_id);
    let err = OrderRepository::create_cart(app.store(), &racing)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(app.store().active_cart_count(customer_id), 1);
}

#[tokio::test]
async fn test_empty_checkout_writes_nothing() {
    let app = TestApp::in_memory();
    let customer = app.customer("kim").await.unwrap();
    let cart = CartService::new(&app.ctx);

    let before = app.store().ledger_row_count();
    let err = cart.checkout(&customer).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyCart);
    assert_eq!(app.store().ledger_row_count(), before);

    let view = cart.view_cart(&customer).await.unwrap();
    let before = app.store().ledger_row_count();
    let err = cart.checkout(&customer).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::EmptyCart));
    assert_eq!(app.store().ledger_row_count(), before);
    assert!(app.store().raw_order(view.order_id).unwrap().is_active_cart());
}

#[tokio::test]
async fn test_removed_lines_do_not_count() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let tide = app.game(&dev, "Tide", "19.99").await.unwrap();
    let ember = app.game(&dev, "Ember", "7.50").await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, tide.id, 1).await.unwrap();
    let before = cart.view_cart(&customer).await.unwrap().total;

    let extra = cart.add_item(&customer, ember.id, 3).await.unwrap();
    assert_eq!(cart.view_cart(&customer).await.unwrap().total, money(dec!(42.49)));

    cart.remove_item(&customer, extra.id).await.unwrap();
    let view = cart.view_cart(&customer).await.unwrap();
    assert_eq!(view.total, before);
    assert_eq!(view.lines.len(), 1);

    // Removing twice has no further effect
    cart.remove_item(&customer, extra.id).await.unwrap();
    let err = cart
        .update_item_quantity(&customer, extra.id, 2)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::OrderItemNotFound(_)));

    let receipt = cart.checkout(&customer).await.unwrap();
    assert_eq!(receipt.total, money(dec!(19.99)));
}

#[tokio::test]
async fn test_lines_keep_their_price_snapshot() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "19.99").await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    let first = cart.add_item(&customer, game.id, 1).await.unwrap();

    CatalogService::new(&app.ctx)
        .update_game(
            &dev,
            game.id,
            UpdateGameRequest {
                price: Some("29.99".to_string()),
                ..UpdateGameRequest::default()
            },
        )
        .await
        .unwrap();

    let second = cart.add_item(&customer, game.id, 1).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.price_at_purchase, money(dec!(19.99)));
    assert_eq!(second.price_at_purchase, money(dec!(29.99)));

    let view = cart.view_cart(&customer).await.unwrap();
    assert_eq!(view.lines.len(), 2);
    assert_eq!(view.total, money(dec!(49.98)));
}

#[tokio::test]
async fn test_quantity_and_game_are_checked() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "1.00").await.unwrap();
    let customer = app.customer("kim").await.unwrap();
    let cart = CartService::new(&app.ctx);

    for bad in [0, -1] {
        let err = cart.add_item(&customer, game.id, bad).await.unwrap_err();
        assert!(matches!(domain(&err), DomainError::InvalidQuantity(q) if *q == bad));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    let err = cart.add_item(&dev, game.id, 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    CatalogService::new(&app.ctx)
        .remove_game(&dev, game.id)
        .await
        .unwrap();
    let err = cart.add_item(&customer, game.id, 1).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::GameNotFound(_)));
}

#[tokio::test]
async fn test_finalized_order_lines_are_frozen() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "3.00").await.unwrap();
    let customer = app.customer("kim").await.unwrap();
    let stranger = app.customer("lee").await.unwrap();

    let cart = CartService::new(&app.ctx);
    let item = cart.add_item(&customer, game.id, 1).await.unwrap();

    let err = cart.remove_item(&stranger, item.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::OrderItemNotFound(_)));

    let receipt = cart.checkout(&customer).await.unwrap();
    let err = cart.remove_item(&customer, item.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::OrderFinalized(_)));
    let err = cart
        .update_item_quantity(&customer, item.id, 4)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::OrderFinalized(_)));

    let order = cart.list_items(&customer, receipt.order_id).await.unwrap();
    assert_eq!(order.total, money(dec!(3.00)));
    assert_eq!(order.lines[0].title, "Tide");
}

#[tokio::test]
async fn test_clear_and_update_cart() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "2.50").await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    assert_eq!(cart.clear_cart(&customer).await.unwrap(), 0);

    let item = cart.add_item(&customer, game.id, 1).await.unwrap();
    cart.add_item(&customer, game.id, 1).await.unwrap();
    cart.update_item_quantity(&customer, item.id, 4).await.unwrap();
    assert_eq!(cart.view_cart(&customer).await.unwrap().total, money(dec!(12.50)));

    assert_eq!(cart.clear_cart(&customer).await.unwrap(), 2);
    assert!(cart.view_cart(&customer).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lines_without_a_game_row_are_skipped() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let tide = app.game(&dev, "Tide", "2.00").await.unwrap();
    let ember = app.game(&dev, "Ember", "5.00").await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, tide.id, 1).await.unwrap();
    cart.add_item(&customer, ember.id, 1).await.unwrap();
    app.store().purge_game(ember.id);

    let view = cart.view_cart(&customer).await.unwrap();
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].title, "Tide");
    assert_eq!(view.total, money(dec!(2.00)));
}

#[tokio::test]
async fn test_checkout_total_must_fit_storage() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Vault", "9999999999.99").await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, game.id, 2).await.unwrap();
    let view = cart.view_cart(&customer).await.unwrap();

    let before = app.store().ledger_row_count();
    let err = cart.checkout(&customer).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(app.store().ledger_row_count(), before);
    assert!(app.store().raw_order(view.order_id).unwrap().is_active_cart());
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_developer_cannot_remove_foreign_game() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let d1 = app.developer(&admin, "first").await.unwrap();
    let d2 = app.developer(&admin, "second").await.unwrap();
    let game = app.game(&d2, "Ember", "4.00").await.unwrap();

    let catalog = CatalogService::new(&app.ctx);
    let err = catalog.remove_game(&d1, game.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotGameOwner(_)));
    assert!(!app.store().raw_game(game.id).unwrap().is_deleted());

    catalog.remove_game(&admin, game.id).await.unwrap();
    assert!(app.store().raw_game(game.id).unwrap().is_deleted());
    let err = catalog.game_details(game.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_only_the_owner_edits_a_game() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let owner = app.developer(&admin, "first").await.unwrap();
    let other = app.developer(&admin, "second").await.unwrap();
    let game = app.game(&owner, "Ember", "4.00").await.unwrap();

    let catalog = CatalogService::new(&app.ctx);
    let rename = || UpdateGameRequest {
        title: Some("Ember Remastered".to_string()),
        ..UpdateGameRequest::default()
    };

    let err = catalog.update_game(&admin, game.id, rename()).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::PermissionDenied(_)));
    let err = catalog.update_game(&other, game.id, rename()).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotGameOwner(_)));

    let updated = catalog.update_game(&owner, game.id, rename()).await.unwrap();
    assert_eq!(updated.title, "Ember Remastered");
    assert_eq!(updated.price, game.price);

    assert!(catalog.is_game_owned_by(owner.developer_id.unwrap(), game.id).await.unwrap());
    assert!(!catalog.is_game_owned_by(other.developer_id.unwrap(), game.id).await.unwrap());
}

#[tokio::test]
async fn test_add_game_rules() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let other = app.developer(&admin, "other").await.unwrap();
    let customer = app.customer("kim").await.unwrap();
    let catalog = CatalogService::new(&app.ctx);

    let err = catalog
        .add_game(&customer, game_request("Tide", "1.00"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    let err = catalog
        .add_game(&admin, game_request("Tide", "1.00"))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::InvalidInput(_)));

    let err = catalog
        .add_game(&dev, game_request_for(other.developer_id.unwrap(), "Tide", "1.00"))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::PermissionDenied(_)));

    let err = catalog
        .add_game(&dev, game_request("Tide", "-3"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let game = catalog
        .add_game(&admin, game_request_for(dev.developer_id.unwrap(), "Tide", "1.00"))
        .await
        .unwrap();
    assert_eq!(Some(game.developer_id), dev.developer_id);
}

#[tokio::test]
async fn test_prices_are_whole_cents_within_range() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let catalog = CatalogService::new(&app.ctx);

    for price in ["0.005", "19.999", "10000000000", "123456789012.00"] {
        let err = catalog
            .add_game(&dev, game_request("Tide", price))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "price {price}");
    }

    let game = app.game(&dev, "Tide", "0.01").await.unwrap();
    let err = catalog
        .update_game(
            &dev,
            game.id,
            UpdateGameRequest {
                price: Some("0.005".to_string()),
                ..UpdateGameRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    // Three copies at the displayed price total exactly what is shown
    let customer = app.customer("kim").await.unwrap();
    let cart = CartService::new(&app.ctx);
    cart.add_item(&customer, game.id, 3).await.unwrap();
    let receipt = cart.checkout(&customer).await.unwrap();
    assert_eq!(receipt.total, money(dec!(0.03)));
    assert_eq!(receipt.total.to_string(), "0.03");
}

#[tokio::test]
async fn test_catalog_pages_are_clamped() {
    let app = TestApp::in_memory_with_page_size(2);
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let idle = app.developer(&admin, "idle").await.unwrap();
    for n in 1..=5 {
        app.game(&dev, &format!("Game {n}"), "1.00").await.unwrap();
    }

    let catalog = CatalogService::new(&app.ctx);
    let last = catalog.list_games(3).await.unwrap();
    assert_eq!((last.page, last.total_pages, last.items.len()), (3, 3, 1));

    let beyond = catalog.list_games(99).await.unwrap();
    assert_eq!(beyond.page, 3);
    assert_eq!(beyond.items, last.items);

    let first = catalog.list_games(0).await.unwrap();
    assert_eq!(first.page, 1);
    assert_eq!(first.items[0].title, "Game 1");

    let none = catalog
        .list_developer_games(idle.developer_id.unwrap(), 1)
        .await
        .unwrap();
    assert!(none.items.is_empty());
    assert_eq!(none.total_pages, 0);
}

#[tokio::test]
async fn test_genre_replacement_is_all_or_nothing() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "1.00").await.unwrap();

    let genres = GenreService::new(&app.ctx);
    let puzzle = genres.add_genre(&admin, genre_request("Puzzle")).await.unwrap();
    let action = genres.add_genre(&admin, genre_request("Action")).await.unwrap();
    let err = genres
        .add_genre(&dev, genre_request("Horror"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    let catalog = CatalogService::new(&app.ctx);
    catalog
        .replace_genres(&dev, game.id, &[puzzle.id, action.id])
        .await
        .unwrap();
    let details = catalog.game_details(game.id).await.unwrap();
    assert_eq!(details.genres, vec![action.name.clone(), puzzle.name.clone()]);

    let err = catalog
        .replace_genres(&dev, game.id, &[action.id, GenreId::new(404)])
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::GenreNotFound(_)));
    assert_eq!(catalog.game_details(game.id).await.unwrap().genres.len(), 2);

    let err = catalog
        .replace_genres(&admin, game.id, &[action.id])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    genres.remove_genre(&admin, puzzle.id).await.unwrap();
    let details = catalog.game_details(game.id).await.unwrap();
    assert_eq!(details.genres, vec![action.name]);
    assert_eq!(genres.list_genres(1).await.unwrap().items.len(), 1);
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_ban_blocks_login_until_unban() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let request = register_request("kim");
    let email = request.email.clone();
    let customer = AuthService::new(&app.ctx)
        .register_customer(request)
        .await
        .unwrap();

    let accounts = AccountService::new(&app.ctx);
    let auth = AuthService::new(&app.ctx);
    accounts.ban(&admin, customer.account_id).await.unwrap();
    // Banning twice is harmless
    accounts.ban(&admin, customer.account_id).await.unwrap();

    let err = auth.login(login_request(&email)).await.unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::InvalidCredentials)));
    assert!(accounts
        .get_account(&admin, customer.account_id)
        .await
        .unwrap()
        .is_banned());

    accounts.unban(&admin, customer.account_id).await.unwrap();
    let session = auth.login(login_request(&email)).await.unwrap();
    assert_eq!(session.customer_id, customer.customer_id);
}

#[tokio::test]
async fn test_only_users_can_be_banned_by_admins() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let customer = app.customer("kim").await.unwrap();
    let accounts = AccountService::new(&app.ctx);

    let err = accounts.ban(&admin, dev.account_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    let err = accounts.ban(&admin, admin.account_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    let err = accounts.ban(&dev, customer.account_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    let users = accounts.list_users(&admin).await.unwrap();
    assert_eq!(users.len(), 1);
    let all = accounts.list_accounts(&admin).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().any(|d| d.developer.is_some()));
}

#[tokio::test]
async fn test_registration_rules() {
    let app = TestApp::in_memory();
    let auth = AuthService::new(&app.ctx);

    let request = RegisterRequest {
        email: "Mixed.Case@Example.COM".to_string(),
        password: TEST_PASSWORD.to_string(),
        display_name: "mixed".to_string(),
    };
    auth.register_customer(request.clone()).await.unwrap();
    let session = auth
        .login(login_request(" mixed.case@example.com "))
        .await
        .unwrap();
    assert_eq!(session.display_name, "mixed");

    let err = auth.register_customer(request).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::EmailAlreadyExists));

    let weak = RegisterRequest {
        password: "onlyletters".to_string(),
        ..register_request("weak")
    };
    let err = auth.register_customer(weak).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let customer = app.customer("kim").await.unwrap();
    let err = auth
        .register_developer(&customer, register_request("studio"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    let err = auth
        .login(gamestore_service::dto::LoginRequest {
            email: "mixed.case@example.com".to_string(),
            password: "Wrong12345".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::InvalidCredentials)));
}

// ============================================================================
// Report Tests
// ============================================================================

#[tokio::test]
async fn test_sales_report_counts_finalized_orders() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let other = app.developer(&admin, "other").await.unwrap();
    let tide = app.game(&dev, "Tide", "10.00").await.unwrap();
    let ember = app.game(&dev, "Ember", "5.00").await.unwrap();
    let quiet = app.game(&dev, "Quiet", "1.00").await.unwrap();
    let cart = CartService::new(&app.ctx);

    let kim = app.customer("kim").await.unwrap();
    cart.add_item(&kim, tide.id, 1).await.unwrap();
    cart.add_item(&kim, ember.id, 3).await.unwrap();
    cart.checkout(&kim).await.unwrap();

    let lee = app.customer("lee").await.unwrap();
    cart.add_item(&lee, tide.id, 2).await.unwrap();
    cart.checkout(&lee).await.unwrap();

    // Still in a cart, so not a sale
    let park = app.customer("park").await.unwrap();
    cart.add_item(&park, ember.id, 10).await.unwrap();

    let developer_id = dev.developer_id.unwrap();
    let reports = DeveloperService::new(&app.ctx);
    let report = reports.developer_sales_report(&dev, developer_id).await.unwrap();
    let rows: Vec<_> = report
        .iter()
        .map(|r| (r.game_id, r.units_sold, r.revenue))
        .collect();
    assert_eq!(
        rows,
        vec![
            (tide.id, 3, money(dec!(30.00))),
            (ember.id, 3, money(dec!(15.00))),
            (quiet.id, 0, Money::ZERO),
        ]
    );

    assert!(reports.developer_sales_report(&admin, developer_id).await.is_ok());
    let err = reports
        .developer_sales_report(&other, developer_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    let err = reports
        .developer_sales_report(&kim, developer_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

#[tokio::test]
async fn test_transactions_report_lists_settled_payments() {
    let app = TestApp::in_memory();
    let admin = app.admin().await.unwrap();
    let dev = app.developer(&admin, "studio").await.unwrap();
    let game = app.game(&dev, "Tide", "8.00").await.unwrap();
    let card = app.credit_card().await.unwrap();
    let customer = app.customer("kim").await.unwrap();

    let cart = CartService::new(&app.ctx);
    let payments = PaymentService::new(&app.ctx);

    cart.add_item(&customer, game.id, 1).await.unwrap();
    let paid_order = cart.checkout(&customer).await.unwrap();
    payments.pay(&customer, paid_order.order_id, card.id).await.unwrap();

    cart.add_item(&customer, game.id, 2).await.unwrap();
    let unpaid_order = cart.checkout(&customer).await.unwrap();

    let rows = payments.transactions_report(&admin).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_id, paid_order.order_id);
    assert_eq!(rows[0].method_name, "Credit Card");
    assert_eq!(rows[0].amount, money(dec!(8.00)));
    assert!(rows.iter().all(|r| r.order_id != unpaid_order.order_id));

    let err = payments.transactions_report(&customer).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    let history = cart.order_history(&customer).await.unwrap();
    let labels: Vec<_> = history.iter().map(|h| h.status_label()).collect();
    assert_eq!(labels, vec!["Paid", "Unpaid"]);
}

#[tokio::test]
async fn test_seeding_payment_methods_is_idempotent() {
    let app = TestApp::in_memory();
    let payments = PaymentService::new(&app.ctx);
    let names: Vec<String> = ["Credit Card", "Bank Transfer", " ", "credit card"]
        .iter()
        .map(ToString::to_string)
        .collect();

    let created = payments.seed_payment_methods(&names).await.unwrap();
    assert_eq!(created.len(), 2);
    assert!(payments.seed_payment_methods(&names).await.unwrap().is_empty());
    assert_eq!(payments.list_methods().await.unwrap().len(), 2);
}
