//! Access gate implementations.

mod jwt;

pub use jwt::{Claims, JwtAccessGate, JwtConfig};
