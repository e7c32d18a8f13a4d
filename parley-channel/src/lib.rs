//! # parley-channel: the rendezvous between a dialogue and its platform
//!
//! A [`TurnChannel`] carries [`Step`](parley_protocol::Step)s from a dialogue
//! to a platform, one at a time, and carries the platform's input turns
//! back.
//!
//! ```text
//!  dialogue                           platform
//!  ────────                           ────────
//!  put(Output) ──────── step ───────▶ take()
//!  receive_reply() ◀─── input ─────── answer(input)
//!  put(Terminal) ────── step ───────▶ take()        (channel closed)
//! ```
//!
//! Every blocking call accepts a deadline, and the whole channel shares one
//! [`CancellationToken`](tokio_util::sync::CancellationToken). Defaults for
//! the deadlines come from [`ChannelConfig`].

#![deny(missing_docs)]

pub mod channel;
pub mod config;

pub use channel::{DialogueSide, PlatformSide, TurnChannel};
pub use config::ChannelConfig;
