//!
//! Test doubles for the chainpulse sync core.
//!
//! `ScriptedTransport` stands in for the host HTTP stack, `ManualTimerDriver`
//! for the host event loop's timers. Both are fully deterministic: nothing
//! runs until the test fires it, and every request is recorded.
//!

pub mod builders;
pub mod timer;
pub mod transport;

pub use timer::ManualTimerDriver;
pub use transport::{DeferredResponse, ScriptedTransport};
