//! Authentication core: credential hashing, session tokens and the cookie carrier.

pub mod claims;
pub mod cookies;
pub mod jwt;
pub mod password;
pub mod renewal;
pub mod session;
