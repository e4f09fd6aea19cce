//! Overload resolution for host method calls.
//!
//! Selects one candidate signature for a call site given the statically
//! known argument types. An argument of unknown type is an object: it is
//! compatible with parameters accepting objects and never counts as exact.
//!
//! ## Algorithm
//!
//! 1. Count the arguments whose known type equals the parameter type
//! 2. A candidate matching every argument exactly wins; among several exact
//!    candidates the one with the more specific return type is kept
//! 3. Without an exact candidate, every compatible candidate is ranked by
//!    parameter subsumption; two compatible candidates where neither
//!    subsumes the other are tied
//! 4. A tie that no exact candidate superseded is ambiguous
//!
//! Resolution is a pure function of the candidate list, so it can be driven
//! directly from literal fixtures.

mod ranking;

use quill_core::{CandidateSignature, TypeHash};
use quill_registry::TypeRelation;

use ranking::{Ranking, count_exact, is_compatible};

/// Outcome of resolving one call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadResolution {
    /// Index of the selected candidate.
    Resolved(usize),
    /// Several candidates tie and none is exact.
    Ambiguous,
    /// No candidate accepts the arguments.
    NoMatch,
}

/// Resolve a call site against `candidates`.
///
/// `args` holds the statically known type of each argument, `None` where it
/// is unknown. Candidates whose parameter count differs from `args` never
/// match.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_overload(
    relation: &impl TypeRelation,
    candidates: &[&CandidateSignature],
    args: &[Option<TypeHash>],
) -> OverloadResolution {
    let mut ranking = Ranking::default();

    for (index, candidate) in candidates.iter().enumerate() {
        let params = candidate.params.as_slice();
        if params.len() != args.len() {
            continue;
        }

        if count_exact(params, args) == args.len() {
            ranking.offer_exact(relation, candidates, index);
        } else if !ranking.found_exact && is_compatible(relation, params, args) {
            ranking.offer_compatible(relation, candidates, index);
        }
    }

    let outcome = ranking.finish();
    tracing::trace!(
        candidates = candidates.len(),
        arity = args.len(),
        ?outcome,
        "overload resolution"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::primitives::{DOUBLE, INT16, INT32, INT64, OBJECT, STRING};
    use quill_registry::HostRegistry;

    fn sig(params: &[TypeHash], ret: TypeHash) -> CandidateSignature {
        CandidateSignature::new(TypeHash::from_name("Fixture"), "f", params.to_vec(), ret, true)
    }

    fn resolve(candidates: &[CandidateSignature], args: &[Option<TypeHash>]) -> OverloadResolution {
        let registry = HostRegistry::with_primitives();
        let refs: Vec<&CandidateSignature> = candidates.iter().collect();
        resolve_overload(&registry, &refs, args)
    }

    #[test]
    fn exact_match_wins_over_widening() {
        let candidates = [sig(&[OBJECT, OBJECT], OBJECT), sig(&[INT32, INT32], OBJECT)];
        assert_eq!(
            resolve(&candidates, &[Some(INT32), Some(INT32)]),
            OverloadResolution::Resolved(1)
        );
    }

    #[test]
    fn widened_arguments_tie_crossed_candidates() {
        let candidates = [sig(&[INT32, OBJECT], OBJECT), sig(&[OBJECT, INT32], OBJECT)];
        assert_eq!(
            resolve(&candidates, &[Some(INT32), Some(INT32)]),
            OverloadResolution::Ambiguous
        );
        assert_eq!(
            resolve(&candidates, &[Some(INT16), Some(INT16)]),
            OverloadResolution::Ambiguous
        );
    }

    #[test]
    fn unknown_arguments_only_match_object_parameters() {
        let crossed = [sig(&[INT32, OBJECT], OBJECT), sig(&[OBJECT, INT32], OBJECT)];
        assert_eq!(resolve(&crossed, &[None, None]), OverloadResolution::NoMatch);

        let numeric = [sig(&[INT32], INT32), sig(&[INT64], INT64), sig(&[DOUBLE], DOUBLE)];
        assert_eq!(resolve(&numeric, &[None]), OverloadResolution::NoMatch);

        let mixed = [sig(&[STRING], OBJECT), sig(&[OBJECT], OBJECT)];
        assert_eq!(resolve(&mixed, &[None]), OverloadResolution::Resolved(1));
    }

    #[test]
    fn more_specific_parameters_win() {
        let candidates = [sig(&[OBJECT], OBJECT), sig(&[INT64], OBJECT)];
        // Widened int argument: both are compatible, INT64 subsumes OBJECT.
        assert_eq!(resolve(&candidates, &[Some(INT32)]), OverloadResolution::Resolved(1));

        let reversed = [sig(&[INT64], OBJECT), sig(&[OBJECT], OBJECT)];
        assert_eq!(resolve(&reversed, &[Some(INT32)]), OverloadResolution::Resolved(0));
    }

    #[test]
    fn later_subsuming_candidate_clears_tie() {
        let candidates = [
            sig(&[INT32, OBJECT], OBJECT),
            sig(&[OBJECT, INT32], OBJECT),
            sig(&[INT32, INT32], OBJECT),
        ];
        assert_eq!(
            resolve(&candidates, &[Some(INT16), Some(INT16)]),
            OverloadResolution::Resolved(2)
        );
    }

    #[test]
    fn exact_candidate_supersedes_tie() {
        let candidates = [
            sig(&[INT32, OBJECT], OBJECT),
            sig(&[OBJECT, INT32], OBJECT),
            sig(&[INT32, INT32], OBJECT),
        ];
        assert_eq!(
            resolve(&candidates, &[Some(INT32), Some(INT32)]),
            OverloadResolution::Resolved(2)
        );
    }

    #[test]
    fn identical_params_prefer_specific_return() {
        let candidates = [sig(&[OBJECT], OBJECT), sig(&[OBJECT], STRING)];
        assert_eq!(resolve(&candidates, &[None]), OverloadResolution::Resolved(1));

        let exact = [sig(&[INT64], OBJECT), sig(&[INT64], STRING)];
        assert_eq!(resolve(&exact, &[Some(INT64)]), OverloadResolution::Resolved(1));
    }

    #[test]
    fn numeric_widening_is_compatible() {
        let candidates = [sig(&[INT32], OBJECT)];
        assert_eq!(resolve(&candidates, &[Some(INT64)]), OverloadResolution::Resolved(0));
    }

    #[test]
    fn incompatible_arguments_do_not_match() {
        let candidates = [sig(&[INT32], OBJECT), sig(&[INT64, INT64], OBJECT)];
        assert_eq!(resolve(&candidates, &[Some(STRING)]), OverloadResolution::NoMatch);
        assert_eq!(resolve(&[], &[]), OverloadResolution::NoMatch);
    }

    #[test]
    fn zero_arity_candidate_is_exact() {
        let candidates = [sig(&[], STRING)];
        assert_eq!(resolve(&candidates, &[]), OverloadResolution::Resolved(0));
    }
}
