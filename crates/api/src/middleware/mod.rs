//! Request extractors guarding operator-only routes.
//!
//! - [`operator::RequireOperator`] -- Requires the configured cache admin token.

pub mod operator;
