//! Turn roles: the capabilities a turn value must provide.
//!
//! Turns are supplied by the integrator. The protocol only moves them
//! between the dialogue and the platform, so the bounds are kept to what
//! moving and comparing requires. Implementations must be immutable once
//! constructed: none of these traits expose a mutating method and none
//! should be added by implementors.

use std::fmt::Debug;

/// A turn produced by the dialogue and destined for the device.
pub trait OutputTurn: Debug + PartialEq + Send + Sync + 'static {
    /// Name of the turn, used in logs and step descriptions.
    fn name(&self) -> &str;
}

/// A turn produced by the platform and handed back to the dialogue.
pub trait InputTurn: Debug + PartialEq + Send + Sync + 'static {}

/// The final turn of a session, returned by the dialogue when it ends
/// normally.
pub trait LastTurn: Debug + PartialEq + Send + Sync + 'static {
    /// Name of the turn, used in logs and step descriptions.
    fn name(&self) -> &str;
}
