use alloc::rc::Rc;
use core::fmt;

use crate::EventKind;

/// A hook receiving every [`Diagnostic`] an observer emits.
pub type DiagnosticCallback = Rc<dyn Fn(&Diagnostic)>;

/// A rejected, non-fatal policy violation.
///
/// Diagnostics are logged at WARN level (with `feature = "tracing"`) and passed to the
/// observer's diagnostic hook, if one is set. The rejected call has no other effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// `resume` while already active.
    AlreadyActive,
    /// `suspend` while already suspended.
    AlreadySuspended,
    /// `on` for a kind that already has a listener.
    DuplicateListener(EventKind),
    /// `subscribe` while a catch-all subscriber exists.
    DuplicateSubscriber,
}

impl Diagnostic {
    /// Name of the operation that was rejected.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::AlreadyActive => "resume",
            Self::AlreadySuspended => "suspend",
            Self::DuplicateListener(_) => "on",
            Self::DuplicateSubscriber => "subscribe",
        }
    }

    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::DuplicateListener(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActive => f.write_str("observer is already running"),
            Self::AlreadySuspended => f.write_str("observer is already suspended"),
            Self::DuplicateListener(kind) => {
                write!(f, "a subscription already exists for <{kind}> on this instance")
            }
            Self::DuplicateSubscriber => {
                f.write_str("a <subscribe> notifier has already been created for this instance")
            }
        }
    }
}
