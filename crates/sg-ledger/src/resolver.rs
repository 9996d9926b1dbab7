// resolver.rs: Map free-text student tokens to roster identities.
//
// Matching is case-sensitive substring containment so instructors can type
// partial names. More than one match is always an error; there is no
// "first match wins" fallback.

use crate::error::LedgerError;
use crate::student::{Roster, Student};

/// Strip a single leading `@` (webhook-style mention) from a token.
pub fn strip_sigil(token: &str) -> &str {
    token.strip_prefix('@').unwrap_or(token)
}

/// Resolve one token against the roster.
pub fn resolve<'r>(token: &str, roster: &'r Roster) -> Result<&'r Student, LedgerError> {
    let needle = strip_sigil(token);

    // An empty needle is a substring of every name; treat it as unknown.
    if needle.is_empty() {
        return Err(LedgerError::NotFound {
            token: needle.to_string(),
        });
    }

    let matches: Vec<&Student> = roster
        .students()
        .iter()
        .filter(|s| s.name.contains(needle))
        .collect();

    match matches.as_slice() {
        [] => Err(LedgerError::NotFound {
            token: needle.to_string(),
        }),
        [only] => Ok(*only),
        many => Err(LedgerError::AmbiguousMatch {
            token: needle.to_string(),
            matches: many.iter().map(|s| s.name.clone()).collect(),
        }),
    }
}

/// Resolve every token, failing on the first token that does not resolve.
pub fn resolve_all<S: AsRef<str>>(
    tokens: &[S],
    roster: &Roster,
) -> Result<Vec<Student>, LedgerError> {
    tokens
        .iter()
        .map(|t| resolve(t.as_ref(), roster).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Roster {
        names.iter().map(|n| Student::new(*n)).collect()
    }

    #[test]
    fn unique_substring_resolves() {
        let r = roster(&["alice smith", "bob lee"]);
        assert_eq!(resolve("alice", &r).unwrap().name, "alice smith");
        assert_eq!(resolve("lee", &r).unwrap().name, "bob lee");
    }

    #[test]
    fn sigil_is_stripped() {
        let r = roster(&["alice smith", "bob lee"]);
        assert_eq!(resolve("@bob", &r).unwrap().name, "bob lee");
    }

    #[test]
    fn two_matches_is_ambiguous() {
        let r = roster(&["alice li", "bob li"]);
        match resolve("li", &r) {
            Err(LedgerError::AmbiguousMatch { token, matches }) => {
                assert_eq!(token, "li");
                assert_eq!(matches, vec!["alice li", "bob li"]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn no_match_is_not_found() {
        let r = roster(&["alice smith"]);
        assert!(matches!(
            resolve("carol", &r),
            Err(LedgerError::NotFound { token }) if token == "carol"
        ));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let r = roster(&["alice smith"]);
        assert!(matches!(
            resolve("Alice", &r),
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[test]
    fn bare_sigil_does_not_match_everyone() {
        let r = roster(&["alice smith"]);
        for token in ["@", ""] {
            match resolve(token, &r) {
                Err(LedgerError::NotFound { token }) => assert_eq!(token, ""),
                other => panic!("expected not found, got {:?}", other),
            }
        }
    }

    #[test]
    fn resolve_all_fails_closed() {
        let r = roster(&["alice smith", "bob lee"]);
        let ok = resolve_all(&["alice", "@bob"], &r).unwrap();
        assert_eq!(ok.len(), 2);

        assert!(resolve_all(&["alice", "zed"], &r).is_err());
    }
}
