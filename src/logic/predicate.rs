//! Predicate trees.
//!
//! A predicate is either absent (always true), a comparison of two key
//! expressions, or a combination of sub-predicates. Predicates arrive
//! as already-parsed structured data; operands are *key expressions*
//! resolved against a [`Lookup`](super::Lookup) at evaluation time,
//! never raw values.

use serde::{Deserialize, Serialize};

/// Comparison operator.
///
/// Integer operators resolve both keys as integers. `StrEq` resolves both
/// keys as strings; `StrIn` resolves the first key as a string and the
/// second as a string array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompareOp {
    Gt,
    Lt,
    Eq,
    Gte,
    Lte,
    Neq,
    StrEq,
    StrIn,
    /// Not set, or a name this version does not know.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl CompareOp {
    /// Check if this operator compares strings.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, CompareOp::StrEq | CompareOp::StrIn)
    }

    /// Symbol used when rendering predicates.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            CompareOp::Unspecified => "??",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Eq => "==",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
            CompareOp::Neq => "!=",
            CompareOp::StrEq => "eq",
            CompareOp::StrIn => "in",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CompareOp::Unspecified => "UNSPECIFIED",
            CompareOp::Gt => "GT",
            CompareOp::Lt => "LT",
            CompareOp::Eq => "EQ",
            CompareOp::Gte => "GTE",
            CompareOp::Lte => "LTE",
            CompareOp::Neq => "NEQ",
            CompareOp::StrEq => "STREQ",
            CompareOp::StrIn => "STRIN",
        })
    }
}

/// Logical combinator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombineOp {
    /// Every operand is true.
    #[serde(rename = "ALL")]
    All,
    /// At least one operand is true.
    #[serde(rename = "ANY")]
    Any,
    /// No operand is true.
    #[serde(rename = "NONE")]
    NoneOf,
    /// Not set, or a name this version does not know.
    #[default]
    #[serde(rename = "UNSPECIFIED", other)]
    Unspecified,
}

impl std::fmt::Display for CombineOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CombineOp::Unspecified => "UNSPECIFIED",
            CombineOp::All => "ALL",
            CombineOp::Any => "ANY",
            CombineOp::NoneOf => "NONE",
        })
    }
}

/// Two key expressions and an operator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    pub key_one: String,
    pub key_two: String,
    pub op: CompareOp,
}

/// An operator over an ordered list of sub-predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub op: CombineOp,
    pub operands: Vec<Predicate>,
}

/// A boolean expression over lookup values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// No test; vacuously true.
    #[default]
    Always,
    /// Compare two key expressions.
    Compare(Comparison),
    /// Combine sub-predicates.
    Combine(Combination),
}

impl Predicate {
    /// Create a comparison.
    pub fn compare(key_one: impl Into<String>, op: CompareOp, key_two: impl Into<String>) -> Self {
        Self::Compare(Comparison {
            key_one: key_one.into(),
            key_two: key_two.into(),
            op,
        })
    }

    /// `key_one > key_two` (integers).
    pub fn gt(key_one: impl Into<String>, key_two: impl Into<String>) -> Self {
        Self::compare(key_one, CompareOp::Gt, key_two)
    }

    /// `key_one < key_two` (integers).
    pub fn lt(key_one: impl Into<String>, key_two: impl Into<String>) -> Self {
        Self::compare(key_one, CompareOp::Lt, key_two)
    }

    /// `key_one == key_two` (integers).
    pub fn equals(key_one: impl Into<String>, key_two: impl Into<String>) -> Self {
        Self::compare(key_one, CompareOp::Eq, key_two)
    }

    /// `key_one >= key_two` (integers).
    pub fn gte(key_one: impl Into<String>, key_two: impl Into<String>) -> Self {
        Self::compare(key_one, CompareOp::Gte, key_two)
    }

    /// `key_one <= key_two` (integers).
    pub fn lte(key_one: impl Into<String>, key_two: impl Into<String>) -> Self {
        Self::compare(key_one, CompareOp::Lte, key_two)
    }

    /// `key_one != key_two` (integers).
    pub fn neq(key_one: impl Into<String>, key_two: impl Into<String>) -> Self {
        Self::compare(key_one, CompareOp::Neq, key_two)
    }

    /// String equality.
    pub fn str_eq(key_one: impl Into<String>, key_two: impl Into<String>) -> Self {
        Self::compare(key_one, CompareOp::StrEq, key_two)
    }

    /// String membership in a string array.
    pub fn str_in(key: impl Into<String>, array_key: impl Into<String>) -> Self {
        Self::compare(key, CompareOp::StrIn, array_key)
    }

    /// Create a combination.
    pub fn combine(op: CombineOp, operands: impl IntoIterator<Item = Predicate>) -> Self {
        Self::Combine(Combination {
            op,
            operands: operands.into_iter().collect(),
        })
    }

    /// Create an ALL combination.
    pub fn all(operands: impl IntoIterator<Item = Predicate>) -> Self {
        Self::combine(CombineOp::All, operands)
    }

    /// Create an ANY combination.
    pub fn any(operands: impl IntoIterator<Item = Predicate>) -> Self {
        Self::combine(CombineOp::Any, operands)
    }

    /// Create a NONE combination.
    pub fn none_of(operands: impl IntoIterator<Item = Predicate>) -> Self {
        Self::combine(CombineOp::NoneOf, operands)
    }

    /// Add another predicate with ALL.
    #[must_use]
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::Combine(Combination {
                op: CombineOp::All,
                mut operands,
            }) => {
                operands.push(other);
                Self::all(operands)
            }
            _ => Self::all([self, other]),
        }
    }

    /// Add another predicate with ANY.
    #[must_use]
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Self::Combine(Combination {
                op: CombineOp::Any,
                mut operands,
            }) => {
                operands.push(other);
                Self::any(operands)
            }
            _ => Self::any([self, other]),
        }
    }

    /// Check if this predicate is the unconditional one.
    #[must_use]
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Always => f.write_str("always"),
            Predicate::Compare(c) => {
                write!(f, "({} {} {})", c.key_one, c.op.symbol(), c.key_two)
            }
            Predicate::Combine(c) => {
                write!(f, "{}[", c.op)?;
                for (idx, operand) in c.operands.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{operand}")?;
                }
                f.write_str("]")
            }
        }
    }
}
