//! SeaORM adapters behind the repository functions.

pub mod todos_sea;
pub mod users_sea;
