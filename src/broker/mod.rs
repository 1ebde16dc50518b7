//! The `broker` module contains the in-process broker used to exercise the
//! protocol without a network.
//!
//! - `registry`: ordered `(pattern, handler)` subscriptions.
//! - `matcher`: `+`/`#` wildcard matching.
//! - `validator`: topic length and grammar checks.
//! - `engine`: [`MockBroker`], which ties the three together.

pub mod engine;
pub mod matcher;
pub mod registry;
pub mod validator;

pub use engine::MockBroker;
