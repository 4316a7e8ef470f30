//! Data transfer objects for service requests
//!
//! Request DTOs carry primitive caller input and validate it with `validator`.

pub mod requests;

pub use requests::{
    AddGameRequest, AddGenreRequest, LoginRequest, RegisterAdminRequest, RegisterRequest,
    UpdateGameRequest,
};
