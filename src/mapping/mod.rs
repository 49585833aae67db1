//! Column-to-field reconciliation.
//!
//! - [`fields`]: the static [`StandardField`] enumeration
//! - [`reconcile`]: header normalization, keyword rules and the editable [`FieldMapping`]
//!
//! Inference is a fixed, ordered rule list over header text. It never looks at cell values, so
//! renamed or foreign-language headers come back [`MappingTarget::Unmapped`] and the user
//! remaps them by hand.

pub mod fields;
pub mod reconcile;

pub use fields::{StandardField, UnknownField};
pub use reconcile::{infer_target, normalize_header, FieldMapping, MappingTarget};
