//! Workspace-only integration tests for the chainpulse sync core.
//! See the `tests/` directory; this library target is intentionally empty.
