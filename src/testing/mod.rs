//! Testing utilities for the Stargate SDK.
//!
//! - [`MockClock`]: a manually advanced clock for driving token expiry
//! - [`ScriptedTokenSource`]: a token source returning scripted results and
//!   counting exchanges
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use stargate::auth::TokenManager;
//! use stargate::testing::{MockClock, ScriptedTokenSource};
//!
//! # tokio_test_block(async {
//! let clock = MockClock::new();
//! let source = Arc::new(ScriptedTokenSource::new().then_token("tok-A").then_token("tok-B"));
//! let tokens = TokenManager::with_clock(source.clone(), Duration::from_secs(300), clock.clone());
//!
//! assert_eq!(tokens.get_token().await.unwrap(), "tok-A");
//! clock.advance(Duration::from_secs(301));
//! assert_eq!(tokens.get_token().await.unwrap(), "tok-B");
//! assert_eq!(source.calls(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

mod mock_clock;
mod scripted_source;

pub use mock_clock::MockClock;
pub use scripted_source::ScriptedTokenSource;
