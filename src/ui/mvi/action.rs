//! Base trait for actions (user/system requests) in MVI architecture.

use std::fmt::Debug;

/// Marker trait for action objects.
///
/// Actions represent:
/// - User actions (taps, text input)
/// - System requests (reconnect refresh, retry)
///
/// Actions are consumed by a screen's pipeline, never by the reducer.
/// `Clone` lets the reconnect hook resubmit a refresh action.
pub trait Action: Clone + Debug + Send + 'static {}
