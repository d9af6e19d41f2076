//! Predicate evaluation.
//!
//! Sub-predicates are evaluated strictly in list order and short-circuit,
//! so the first resolution failure a caller sees is deterministic.

use super::error::EvalError;
use super::lookup::Lookup;
use super::predicate::{Combination, CombineOp, CompareOp, Comparison, Predicate};
use super::resolve::{resolve_int, resolve_str, resolve_str_arr};

/// Evaluates predicates against a lookup.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate a predicate.
    ///
    /// [`Predicate::Always`] is true. Every resolution failure and every
    /// unknown operator is returned as an error, never coerced to `false`.
    pub fn eval(predicate: &Predicate, lookup: &dyn Lookup) -> Result<bool, EvalError> {
        match predicate {
            Predicate::Always => Ok(true),
            Predicate::Compare(comparison) => Self::eval_comparison(comparison, lookup),
            Predicate::Combine(combination) => Self::eval_combination(combination, lookup),
        }
    }

    fn eval_comparison(comparison: &Comparison, lookup: &dyn Lookup) -> Result<bool, EvalError> {
        let Comparison { key_one, key_two, op } = comparison;

        match op {
            CompareOp::Unspecified => Err(EvalError::UnknownComparison {
                op: op.to_string(),
                key_one: key_one.clone(),
                key_two: key_two.clone(),
            }),
            CompareOp::StrEq => {
                let one = resolve_str(key_one, lookup)?;
                let two = resolve_str(key_two, lookup)?;
                Ok(one == two)
            }
            CompareOp::StrIn => {
                let needle = resolve_str(key_one, lookup)?;
                let haystack = resolve_str_arr(key_two, lookup)?;
                Ok(haystack.contains(&needle))
            }
            CompareOp::Gt
            | CompareOp::Lt
            | CompareOp::Eq
            | CompareOp::Gte
            | CompareOp::Lte
            | CompareOp::Neq => {
                let one = resolve_int(key_one, lookup)?;
                let two = resolve_int(key_two, lookup)?;
                Ok(match op {
                    CompareOp::Gt => one > two,
                    CompareOp::Lt => one < two,
                    CompareOp::Eq => one == two,
                    CompareOp::Gte => one >= two,
                    CompareOp::Lte => one <= two,
                    _ => one != two,
                })
            }
        }
    }

    fn eval_combination(
        combination: &Combination,
        lookup: &dyn Lookup,
    ) -> Result<bool, EvalError> {
        let operands = &combination.operands;
        match combination.op {
            CombineOp::All => {
                for operand in operands {
                    if !Self::eval(operand, lookup)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            CombineOp::Any => {
                for operand in operands {
                    if Self::eval(operand, lookup)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            CombineOp::NoneOf => {
                for operand in operands {
                    if Self::eval(operand, lookup)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            CombineOp::Unspecified => Err(EvalError::UnknownCombination {
                op: combination.op.to_string(),
                operands: operands.len(),
            }),
        }
    }
}

impl Predicate {
    /// Evaluate this predicate against a lookup.
    pub fn eval(&self, lookup: &dyn Lookup) -> Result<bool, EvalError> {
        Evaluator::eval(self, lookup)
    }
}
