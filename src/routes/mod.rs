/// Router Module Index
///
/// Splits the routes by whether the access guard runs in front of them.

/// Routes reachable without a session: health, session lookup, logout.
pub mod public;

/// Routes gated by the access guard middleware: the login page and the
/// dashboard tree.
pub mod guarded;
