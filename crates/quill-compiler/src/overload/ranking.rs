//! Running best-candidate state for overload resolution.

use quill_core::{CandidateSignature, TypeHash};
use quill_registry::TypeRelation;

use super::OverloadResolution;

/// Number of positions where the known argument type equals the parameter.
pub(super) fn count_exact(params: &[TypeHash], args: &[Option<TypeHash>]) -> usize {
    params
        .iter()
        .zip(args)
        .filter(|(param, arg)| arg.is_some_and(|arg| arg == **param))
        .count()
}

pub(super) fn is_compatible(
    relation: &impl TypeRelation,
    params: &[TypeHash],
    args: &[Option<TypeHash>],
) -> bool {
    params
        .iter()
        .zip(args)
        .all(|(&param, &arg)| relation.param_arg_type_match(param, arg))
}

#[derive(Debug, Default)]
pub(super) struct Ranking {
    best: Option<usize>,
    tied: bool,
    pub(super) found_exact: bool,
}

impl Ranking {
    pub(super) fn offer_exact(
        &mut self,
        relation: &impl TypeRelation,
        candidates: &[&CandidateSignature],
        index: usize,
    ) {
        let replace = match self.best {
            Some(best) if self.found_exact => relation
                .is_assignable(candidates[index].return_type, candidates[best].return_type),
            _ => true,
        };
        if replace {
            self.best = Some(index);
        }
        self.found_exact = true;
    }

    pub(super) fn offer_compatible(
        &mut self,
        relation: &impl TypeRelation,
        candidates: &[&CandidateSignature],
        index: usize,
    ) {
        let Some(best) = self.best else {
            self.best = Some(index);
            return;
        };

        let current = candidates[index];
        let previous = candidates[best];
        if relation.subsumes(&current.params, &previous.params) {
            self.best = Some(index);
            self.tied = false;
        } else if current.params == previous.params {
            if relation.is_assignable(current.return_type, previous.return_type) {
                self.best = Some(index);
            }
        } else if !relation.subsumes(&previous.params, &current.params) {
            self.tied = true;
        }
    }

    pub(super) fn finish(self) -> OverloadResolution {
        if self.tied && !self.found_exact {
            return OverloadResolution::Ambiguous;
        }
        match self.best {
            Some(index) => OverloadResolution::Resolved(index),
            None => OverloadResolution::NoMatch,
        }
    }
}
