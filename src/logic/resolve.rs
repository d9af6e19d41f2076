//! Key expression resolution.
//!
//! Every comparison operand is a key expression, resolved in this order:
//!
//! 1. `'text` is the string literal `text`.
//! 2. In integer context, anything that parses as a base-10 `i64` is an
//!    integer literal.
//! 3. In string-array context, `[e1, e2, ...]` is an array literal whose
//!    entries are themselves resolved as string keys.
//! 4. `scope.rest` resolves `rest` against the lookup's scope named
//!    `scope`, splitting on the first `.` only.
//! 5. Anything else is handed to the lookup.
//!
//! Client content depends on this precedence; keep it.

use super::error::{ResolveError, ValueKind};
use super::lookup::Lookup;

const SCOPE_SEPARATOR: char = '.';
const STRING_QUOTE: char = '\'';
const ARRAY_OPEN: char = '[';
const ARRAY_CLOSE: char = ']';
const ARRAY_SEPARATOR: char = ',';

fn scope_of<'l>(
    lookup: &'l dyn Lookup,
    kind: ValueKind,
    scope: &str,
    key: &str,
) -> Result<&'l dyn Lookup, ResolveError> {
    lookup.get_scope(scope).ok_or_else(|| ResolveError::UnknownScope {
        kind,
        scope: scope.to_string(),
        key: key.to_string(),
    })
}

/// Resolve a key expression to an integer.
pub fn resolve_int(key: &str, lookup: &dyn Lookup) -> Result<i64, ResolveError> {
    if key.starts_with(STRING_QUOTE) {
        return Err(ResolveError::LiteralType {
            key: key.to_string(),
            expected: ValueKind::Integer,
        });
    }
    if let Ok(value) = key.parse::<i64>() {
        return Ok(value);
    }
    if let Some((scope, rest)) = key.split_once(SCOPE_SEPARATOR) {
        return resolve_int(rest, scope_of(lookup, ValueKind::Integer, scope, key)?);
    }
    lookup.get_int(key)
}

/// Resolve a key expression to a string.
pub fn resolve_str(key: &str, lookup: &dyn Lookup) -> Result<String, ResolveError> {
    if let Some(literal) = key.strip_prefix(STRING_QUOTE) {
        return Ok(literal.to_string());
    }
    if let Some((scope, rest)) = key.split_once(SCOPE_SEPARATOR) {
        return resolve_str(rest, scope_of(lookup, ValueKind::String, scope, key)?);
    }
    lookup.get_str(key)
}

/// Resolve a key expression to a string array.
pub fn resolve_str_arr(key: &str, lookup: &dyn Lookup) -> Result<Vec<String>, ResolveError> {
    if let Some(body) = key
        .strip_prefix(ARRAY_OPEN)
        .and_then(|rest| rest.strip_suffix(ARRAY_CLOSE))
    {
        return parse_array_literal(key, body, lookup);
    }
    if let Some((scope, rest)) = key.split_once(SCOPE_SEPARATOR) {
        return resolve_str_arr(rest, scope_of(lookup, ValueKind::StringArray, scope, key)?);
    }
    lookup.get_str_arr(key)
}

fn parse_array_literal(
    key: &str,
    body: &str,
    lookup: &dyn Lookup,
) -> Result<Vec<String>, ResolveError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    body.split(ARRAY_SEPARATOR)
        .map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(ResolveError::MalformedArray {
                    key: key.to_string(),
                    reason: "empty entry",
                });
            }
            resolve_str(entry, lookup).map_err(|err| ResolveError::ArrayEntry {
                entry: entry.to_string(),
                source: Box::new(err),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::logic::lookup::MemoryLookup;

    fn lookup() -> MemoryLookup {
        MemoryLookup::new()
            .with_int("one", 1)
            .with_str("name", "yohoho")
            .with_str_arr("tags", ["a", "b"])
            .with_scope(
                "npc",
                Arc::new(
                    MemoryLookup::new()
                        .with_int("mood", -2)
                        .with_str("name", "Grima")
                        .with_scope("horse", Arc::new(MemoryLookup::new().with_int("speed", 9))),
                ),
            )
    }

    #[test]
    fn test_int_literals() {
        let lookup = lookup();
        assert_eq!(resolve_int("42", &lookup), Ok(42));
        assert_eq!(resolve_int("-7", &lookup), Ok(-7));
        assert_eq!(resolve_int("one", &lookup), Ok(1));
    }

    #[test]
    fn test_string_literal_in_int_context() {
        let lookup = lookup();
        assert!(matches!(
            resolve_int("'5", &lookup),
            Err(ResolveError::LiteralType { expected: ValueKind::Integer, .. })
        ));
    }

    #[test]
    fn test_string_literals_win_over_scopes() {
        let lookup = lookup();
        assert_eq!(resolve_str("'npc.name", &lookup), Ok("npc.name".to_string()));
        assert_eq!(resolve_str("'", &lookup), Ok(String::new()));
        assert_eq!(resolve_str("name", &lookup), Ok("yohoho".to_string()));
    }

    #[test]
    fn test_scoped_keys() {
        let lookup = lookup();
        assert_eq!(resolve_int("npc.mood", &lookup), Ok(-2));
        assert_eq!(resolve_str("npc.name", &lookup), Ok("Grima".to_string()));
        assert_eq!(resolve_int("npc.horse.speed", &lookup), Ok(9));
    }

    #[test]
    fn test_unknown_scope_is_an_error() {
        let lookup = lookup();
        assert_eq!(
            resolve_int("ghost.mood", &lookup),
            Err(ResolveError::UnknownScope {
                kind: ValueKind::Integer,
                scope: "ghost".to_string(),
                key: "ghost.mood".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_key_is_an_error_not_zero() {
        let lookup = lookup();
        assert!(matches!(
            resolve_int("two", &lookup),
            Err(ResolveError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_array_literal() {
        let lookup = lookup();
        assert_eq!(
            resolve_str_arr("['apple,  name , npc.name]", &lookup),
            Ok(vec!["apple".to_string(), "yohoho".to_string(), "Grima".to_string()])
        );
        assert_eq!(resolve_str_arr("[]", &lookup), Ok(Vec::new()));
        assert_eq!(resolve_str_arr("[ ]", &lookup), Ok(Vec::new()));
    }

    #[test]
    fn test_array_literal_with_dotted_literal_entry() {
        let lookup = lookup();
        assert_eq!(
            resolve_str_arr("['a.b, 'c]", &lookup),
            Ok(vec!["a.b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_empty_array_entry_is_malformed() {
        let lookup = lookup();
        assert!(matches!(
            resolve_str_arr("['a, , 'b]", &lookup),
            Err(ResolveError::MalformedArray { reason: "empty entry", .. })
        ));
        assert!(matches!(
            resolve_str_arr("['a,]", &lookup),
            Err(ResolveError::MalformedArray { .. })
        ));
    }

    #[test]
    fn test_half_bracketed_keys_go_to_the_lookup() {
        let lookup = MemoryLookup::new().with_str_arr("[abc", ["x"]);
        assert_eq!(resolve_str_arr("[abc", &lookup), Ok(vec!["x".to_string()]));
        assert!(matches!(
            resolve_str_arr("abc]", &lookup),
            Err(ResolveError::UnknownKey { kind: ValueKind::StringArray, .. })
        ));
    }

    #[test]
    fn test_scope_prefixed_array_literal() {
        let lookup = lookup();
        assert_eq!(
            resolve_str_arr("npc.[name, 'Wormtongue]", &lookup),
            Ok(vec!["Grima".to_string(), "Wormtongue".to_string()])
        );
    }

    #[test]
    fn test_array_entry_error_wraps_cause() {
        let lookup = lookup();
        let err = resolve_str_arr("['a, missing]", &lookup).unwrap_err();

        assert!(matches!(err, ResolveError::ArrayEntry { ref entry, .. } if entry == "missing"));
        assert!(err.to_string().contains("unknown string key \"missing\""));
    }

    #[test]
    fn test_array_lookup() {
        let lookup = lookup();
        assert_eq!(
            resolve_str_arr("tags", &lookup),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
    }
}
