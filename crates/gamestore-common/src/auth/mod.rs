//! Credential hashing

mod password;

pub use password::{
    check_password, hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LEN,
};
