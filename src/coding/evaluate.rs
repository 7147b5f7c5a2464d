//! Ground-truth match evaluation.

use crate::cli::{EvalBasis, MatchDirection};

/// Evaluation knobs fixed per run.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    pub basis: EvalBasis,
    pub direction: MatchDirection,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            basis: EvalBasis::Entities,
            direction: MatchDirection::DetectedInReference,
        }
    }
}

/// Case-insensitive containment check of the detected output against the
/// reference diagnosis. An empty reference or an empty basis is never a
/// match. Stateless per record; aggregation happens in the report builder.
pub fn is_match(
    entities: &[String],
    codes: &[String],
    reference: &str,
    options: EvalOptions,
) -> bool {
    let reference = reference.trim().to_lowercase();
    if reference.is_empty() {
        return false;
    }
    let basis = match options.basis {
        EvalBasis::Entities => entities,
        EvalBasis::Codes => codes,
    };
    basis.iter().any(|term| {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return false;
        }
        match options.direction {
            MatchDirection::DetectedInReference => reference.contains(&term),
            MatchDirection::ReferenceInDetected => term.contains(&reference),
        }
    })
}
