//! Predicate evaluation over scoped variable lookups.
//!
//! ## Key expressions
//!
//! Comparison operands are strings resolved at evaluation time:
//! `'text` is a string literal, `42` an integer literal, `[a, 'b]` an
//! inline string array, `npc.mood` a key in the `npc` scope, and anything
//! else a key handed to the [`Lookup`].
//!
//! ## Example
//!
//! ```
//! use cyoa_engine::logic::{MemoryLookup, Predicate};
//!
//! let lookup = MemoryLookup::new().with_int("Strength", 5);
//! let strong = Predicate::gt("Strength", "3");
//! let weak = Predicate::none_of([strong.clone()]);
//!
//! assert_eq!(strong.eval(&lookup), Ok(true));
//! assert_eq!(weak.eval(&lookup), Ok(false));
//! ```

pub mod error;
pub mod eval;
pub mod lookup;
pub mod predicate;
pub mod resolve;

pub use error::{EvalError, ResolveError, ValueKind};
pub use eval::Evaluator;
pub use lookup::{Lookup, MemoryLookup, ScopeRef, Scopes};
pub use predicate::{Combination, CombineOp, CompareOp, Comparison, Predicate};
pub use resolve::{resolve_int, resolve_str, resolve_str_arr};
