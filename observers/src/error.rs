use crate::VariantKind;

/// Errors returned by observer operations.
///
/// Redundant lifecycle calls and duplicate registrations are not errors; they
/// are reported as [`crate::Diagnostic`]s and otherwise ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0} observer used after dump")]
    Destroyed(VariantKind),
}
