//! # gamestore-service
//!
//! Application layer containing the storefront use cases and request DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AccountService, AuthService, CartService, CatalogService, DeveloperService, GenreService,
    PaymentService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
