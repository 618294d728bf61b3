//! Response reconciliation: reassemble ordered outcomes into the caller's
//! original input shape and apply the partial-failure policy.

use std::collections::HashMap;

use crate::dispatch::Outcome;
use crate::error::{Error, Result};
use crate::input::Shape;
use crate::protocol::Translation;

/// Pipeline output, shaped like the input that produced it.
///
/// Failed slots are `None`, which can only occur in the list and map shapes
/// and only when `reject_on_partial_fail` is disabled.
#[derive(Debug, Clone, PartialEq)]
pub enum Translations {
    /// Result of a single-string input
    Single(Translation),

    /// Results of a list input, in input order
    List(Vec<Option<Translation>>),

    /// Results of a map input, under the input's keys
    Map(HashMap<String, Option<Translation>>),
}

impl Translations {
    /// The single result, if this came from a single-string input.
    pub fn single(&self) -> Option<&Translation> {
        match self {
            Translations::Single(translation) => Some(translation),
            _ => None,
        }
    }

    /// The ordered results, if this came from a list input.
    pub fn list(&self) -> Option<&[Option<Translation>]> {
        match self {
            Translations::List(items) => Some(items),
            _ => None,
        }
    }

    /// The keyed results, if this came from a map input.
    pub fn map(&self) -> Option<&HashMap<String, Option<Translation>>> {
        match self {
            Translations::Map(items) => Some(items),
            _ => None,
        }
    }
}

/// Assemble `outcomes` into the shape recorded at normalization.
///
/// A failed single-shape outcome always fails the call: with one item there
/// is no partial success to salvage. For lists and maps the
/// `reject_on_partial_fail` policy decides between failing the call with
/// the first per-item error and leaving `None` in the failed slots.
pub(crate) fn reconcile(
    outcomes: Vec<Outcome>,
    shape: Shape,
    reject_on_partial_fail: bool,
) -> Result<Translations> {
    match shape {
        Shape::Single => {
            let outcome = outcomes
                .into_iter()
                .next()
                .expect("single shape always carries one outcome");
            match outcome {
                Ok(translation) => Ok(Translations::Single(translation)),
                Err(source) => Err(Error::PartialFailure { index: 0, source }),
            }
        }
        Shape::List(len) => {
            debug_assert_eq!(outcomes.len(), len);
            let slots = apply_policy(outcomes, reject_on_partial_fail)?;
            Ok(Translations::List(slots))
        }
        Shape::Map(keys) => {
            debug_assert_eq!(outcomes.len(), keys.len());
            let slots = apply_policy(outcomes, reject_on_partial_fail)?;
            Ok(Translations::Map(keys.into_iter().zip(slots).collect()))
        }
    }
}

/// Escalate the first per-item failure, or convert failures to `None`.
fn apply_policy(
    outcomes: Vec<Outcome>,
    reject_on_partial_fail: bool,
) -> Result<Vec<Option<Translation>>> {
    if reject_on_partial_fail {
        if let Some((index, source)) = outcomes
            .iter()
            .enumerate()
            .find_map(|(i, o)| o.as_ref().err().map(|e| (i, e.clone())))
        {
            return Err(Error::PartialFailure { index, source });
        }
    }
    Ok(outcomes.into_iter().map(|o| o.ok()).collect())
}
