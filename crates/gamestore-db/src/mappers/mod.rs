//! Entity to model mappers
//!
//! Conversions between domain entities (gamestore-core) and database models.
//! - `From<Model>`/`TryFrom<Model>` for entities: rows with text-encoded
//!   enums (role, payment status) are fallible
//! - `*Write` structs: prepare entity data for database writes

mod account;
mod game;
mod order;
mod payment;

pub use account::role_from_str;
pub use game::{game_details, GameWrite};
pub use order::quantity_to_db;
pub use payment::status_from_str;
