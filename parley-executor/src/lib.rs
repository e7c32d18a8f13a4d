//! # parley-executor: runs dialogue logic and guarantees its ending
//!
//! [`DialogueExecutor::start`] spawns a [`Dialogue`](parley_protocol::Dialogue)
//! on its own tokio task, connected to the caller through a fresh
//! [`TurnChannel`](parley_channel::TurnChannel), and returns a
//! [`SessionHandle`] for the platform side.
//!
//! However the dialogue ends, exactly one terminal step reaches the channel:
//!
//! | Dialogue exit | Step |
//! |---------------|------|
//! | `Ok(Some(last))` | `Terminal(last)` |
//! | `Ok(None)` | `End` |
//! | `Err(e)` | `Failure` classified from `e` |
//! | panic | `Failure` of kind `Panic` |
//! | swallowed channel error | `Failure` carrying that error |
//! | cancellation ignored past the grace period | `Failure` of kind `Cancelled` |
//!
//! [`drive`] is the standard platform loop over a
//! [`Platform`](parley_protocol::Platform).

#![deny(missing_docs)]

pub mod config;
pub mod context;
pub mod drive;
pub mod executor;
pub mod handle;

pub use config::ExecutorConfig;
pub use context::DialogueContext;
pub use drive::drive;
pub use executor::DialogueExecutor;
pub use handle::SessionHandle;
