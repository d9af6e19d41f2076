//! Resolution and evaluation errors.

use thiserror::Error;

/// Kind of value a key is resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    String,
    StringArray,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::StringArray => "string array",
        })
    }
}

/// A key expression could not be turned into a value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown {kind} key {key:?}")]
    UnknownKey { kind: ValueKind, key: String },

    #[error("lookup does not support {kind} values (key {key:?})")]
    Unsupported { kind: ValueKind, key: String },

    #[error("invalid scope lookup {scope:?} from {kind} key {key:?}")]
    UnknownScope {
        kind: ValueKind,
        scope: String,
        key: String,
    },

    #[error("string literal {key:?} used where an {expected} is required")]
    LiteralType { key: String, expected: ValueKind },

    #[error("malformed array literal {key:?}: {reason}")]
    MalformedArray { key: String, reason: &'static str },

    #[error("error constructing array entry {entry:?}: {source}")]
    ArrayEntry {
        entry: String,
        #[source]
        source: Box<ResolveError>,
    },

    #[error("lookup does not accept new scopes (scope {name:?})")]
    ScopesUnsupported { name: String },
}

impl ResolveError {
    pub(crate) fn unknown(kind: ValueKind, key: &str) -> Self {
        Self::UnknownKey {
            kind,
            key: key.to_string(),
        }
    }

    pub(crate) fn unsupported(kind: ValueKind, key: &str) -> Self {
        Self::Unsupported {
            kind,
            key: key.to_string(),
        }
    }
}

/// A predicate could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("cannot evaluate unknown comparison operator {op} between {key_one:?} and {key_two:?}")]
    UnknownComparison {
        op: String,
        key_one: String,
        key_two: String,
    },

    #[error("cannot evaluate unknown combination operator {op} over {operands} operands")]
    UnknownCombination { op: String, operands: usize },
}
