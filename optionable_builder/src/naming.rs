use std::collections::HashSet;
use thiserror::Error;

use crate::constant::SHORT_ALPHABET;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Whether a name is the short (`-n`) or long (`--name`) form of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// The single letter name.
    Short,
    /// The multi-character name.
    Long,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Short => write!(f, "short"),
            NameKind::Long => write!(f, "long"),
        }
    }
}

/// Where a candidate name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrigin {
    /// Explicitly declared (ex: `#[optionable(long = "..")]`).
    Explicit,
    /// Derived from the field identifier.
    Derived,
}

/// The failure to allocate an option name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// The short name candidate is empty, or does not start with a letter `a`-`z`.
    #[error("'{name}' is not a valid short option name (must start with a letter a-z).")]
    InvalidShortName {
        /// The rejected candidate.
        name: String,
    },
    /// The name has already been claimed in this binding pass.
    #[error("{}", conflict_message(*kind, *origin, name))]
    NameConflict {
        /// The kind of name in conflict.
        kind: NameKind,
        /// Where the conflicting candidate came from.
        origin: NameOrigin,
        /// The conflicting candidate.
        name: String,
    },
}

fn conflict_message(kind: NameKind, origin: NameOrigin, name: &str) -> String {
    match origin {
        NameOrigin::Explicit => format!("Explicit {kind} option name '{name}' is not available."),
        NameOrigin::Derived => {
            format!("Field name '{name}' is not available as {kind} option name.")
        }
    }
}

/// Tracks the option names claimed during one binding pass.
///
/// Claims are monotonic: a name is claimed at most once, and never released.
#[derive(Debug, Default)]
pub struct NameAllocator {
    longs: HashSet<String>,
    // One bit per letter a-z.
    shorts: u32,
}

impl NameAllocator {
    /// Create an allocator with no claimed names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `name` is still available as a long option name.
    pub fn is_long_available(&self, name: &str) -> bool {
        !self.longs.contains(name)
    }

    /// Check whether the first letter of `name` is still available as a short option name.
    pub fn is_short_available(&self, name: &str) -> Result<bool, NameError> {
        let index = short_index(name)?;
        Ok(self.shorts & (1 << index) == 0)
    }

    /// Claim `name` as a long option name.
    pub fn claim_long(&mut self, name: &str) -> Result<(), NameError> {
        if !self.longs.insert(name.to_string()) {
            return Err(NameError::NameConflict {
                kind: NameKind::Long,
                origin: NameOrigin::Explicit,
                name: name.to_string(),
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Claimed long option name '{name}'.");
        }

        Ok(())
    }

    /// Claim the first letter of `name` as a short option name.
    pub fn claim_short(&mut self, name: &str) -> Result<(), NameError> {
        let index = short_index(name)?;
        let bit = 1 << index;

        if self.shorts & bit != 0 {
            return Err(NameError::NameConflict {
                kind: NameKind::Short,
                origin: NameOrigin::Explicit,
                name: name.to_string(),
            });
        }

        self.shorts |= bit;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Claimed short option name '{name}' (index {index}).");
        }

        Ok(())
    }

    /// Resolve and claim the long option name for `field`.
    ///
    /// A non-empty `explicit` name takes precedence over the field identifier.
    pub fn resolve_long(
        &mut self,
        explicit: Option<&str>,
        field: &str,
    ) -> Result<String, NameError> {
        let (origin, candidate) = candidate(explicit, field);

        if !self.is_long_available(candidate) {
            return Err(NameError::NameConflict {
                kind: NameKind::Long,
                origin,
                name: candidate.to_string(),
            });
        }

        self.claim_long(candidate)?;
        Ok(candidate.to_string())
    }

    /// Resolve and claim the short option name for `field`.
    ///
    /// A non-empty `explicit` name takes precedence over the field identifier.
    /// The resolved name is the lowercase first letter of the candidate.
    pub fn resolve_short(
        &mut self,
        explicit: Option<&str>,
        field: &str,
    ) -> Result<char, NameError> {
        let (origin, candidate) = candidate(explicit, field);

        if !self.is_short_available(candidate)? {
            return Err(NameError::NameConflict {
                kind: NameKind::Short,
                origin,
                name: candidate.to_string(),
            });
        }

        self.claim_short(candidate)?;
        short_letter(candidate)
    }
}

fn candidate<'a>(explicit: Option<&'a str>, field: &'a str) -> (NameOrigin, &'a str) {
    match explicit {
        Some(name) if !name.is_empty() => (NameOrigin::Explicit, name),
        _ => (NameOrigin::Derived, field),
    }
}

fn short_letter(name: &str) -> Result<char, NameError> {
    match name.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some(letter) if letter.is_ascii_lowercase() => Ok(letter),
        _ => Err(NameError::InvalidShortName {
            name: name.to_string(),
        }),
    }
}

fn short_index(name: &str) -> Result<usize, NameError> {
    let index = (short_letter(name)? as u8 - b'a') as usize;
    debug_assert!(index < SHORT_ALPHABET);
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{seq::SliceRandom, thread_rng};
    use rstest::rstest;

    #[test]
    fn long_available() {
        let mut allocator = NameAllocator::new();
        assert!(allocator.is_long_available("count"));

        allocator.claim_long("count").unwrap();
        assert!(!allocator.is_long_available("count"));
        assert!(allocator.is_long_available("counter"));
    }

    #[test]
    fn long_reclaim() {
        let mut allocator = NameAllocator::new();
        allocator.claim_long("count").unwrap();

        assert_matches!(
            allocator.claim_long("count"),
            Err(NameError::NameConflict { kind: NameKind::Long, .. })
        );
        assert!(!allocator.is_long_available("count"));
    }

    #[rstest]
    #[case("a")]
    #[case("apple")]
    #[case("Apple")]
    #[case("z")]
    #[case("Zebra")]
    fn short_available(#[case] name: &str) {
        let mut allocator = NameAllocator::new();
        assert!(allocator.is_short_available(name).unwrap());

        allocator.claim_short(name).unwrap();
        assert!(!allocator.is_short_available(name).unwrap());
        assert!(!allocator.is_short_available(&name.to_ascii_uppercase()).unwrap());
        assert!(!allocator.is_short_available(&name.to_ascii_lowercase()).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("_private")]
    #[case("1st")]
    #[case("-")]
    #[case("élan")]
    fn short_invalid(#[case] name: &str) {
        let mut allocator = NameAllocator::new();

        assert_eq!(
            allocator.is_short_available(name),
            Err(NameError::InvalidShortName {
                name: name.to_string()
            })
        );
        assert_matches!(
            allocator.claim_short(name),
            Err(NameError::InvalidShortName { .. })
        );
    }

    #[test]
    fn short_reclaim() {
        let mut allocator = NameAllocator::new();
        allocator.claim_short("verbose").unwrap();

        // Claiming a letter twice must never release it.
        assert_matches!(
            allocator.claim_short("value"),
            Err(NameError::NameConflict { kind: NameKind::Short, .. })
        );
        assert!(!allocator.is_short_available("v").unwrap());
    }

    #[test]
    fn short_alphabet() {
        let mut letters: Vec<char> = ('a'..='z').collect();
        letters.shuffle(&mut thread_rng());
        let mut allocator = NameAllocator::new();

        for (i, letter) in letters.iter().enumerate() {
            let name = letter.to_string();
            allocator.claim_short(&name).unwrap();

            for claimed in &letters[..=i] {
                assert!(!allocator.is_short_available(&claimed.to_string()).unwrap());
            }

            for unclaimed in &letters[i + 1..] {
                assert!(allocator.is_short_available(&unclaimed.to_string()).unwrap());
            }
        }
    }

    #[rstest]
    #[case(None, "count", "count")]
    #[case(Some(""), "count", "count")]
    #[case(Some("number"), "count", "number")]
    fn resolve_long(#[case] explicit: Option<&str>, #[case] field: &str, #[case] expected: &str) {
        let mut allocator = NameAllocator::new();
        assert_eq!(allocator.resolve_long(explicit, field).unwrap(), expected);
        assert!(!allocator.is_long_available(expected));
    }

    #[rstest]
    #[case(None, "count", 'c')]
    #[case(Some(""), "count", 'c')]
    #[case(Some("n"), "count", 'n')]
    #[case(Some("N"), "count", 'n')]
    #[case(None, "Count", 'c')]
    fn resolve_short(#[case] explicit: Option<&str>, #[case] field: &str, #[case] expected: char) {
        let mut allocator = NameAllocator::new();
        assert_eq!(allocator.resolve_short(explicit, field).unwrap(), expected);
        assert!(!allocator.is_short_available(&expected.to_string()).unwrap());
    }

    #[test]
    fn resolve_long_conflict() {
        let mut allocator = NameAllocator::new();
        allocator.resolve_long(None, "verbose").unwrap();

        assert_eq!(
            allocator.resolve_long(Some("verbose"), "foo"),
            Err(NameError::NameConflict {
                kind: NameKind::Long,
                origin: NameOrigin::Explicit,
                name: "verbose".to_string(),
            })
        );
        assert_eq!(
            allocator.resolve_long(None, "verbose"),
            Err(NameError::NameConflict {
                kind: NameKind::Long,
                origin: NameOrigin::Derived,
                name: "verbose".to_string(),
            })
        );
    }

    #[test]
    fn resolve_short_conflict() {
        let mut allocator = NameAllocator::new();
        allocator.resolve_short(None, "verbose").unwrap();

        assert_eq!(
            allocator.resolve_short(Some("v"), "foo"),
            Err(NameError::NameConflict {
                kind: NameKind::Short,
                origin: NameOrigin::Explicit,
                name: "v".to_string(),
            })
        );
        assert_eq!(
            allocator.resolve_short(None, "veto"),
            Err(NameError::NameConflict {
                kind: NameKind::Short,
                origin: NameOrigin::Derived,
                name: "veto".to_string(),
            })
        );
        // Failed resolutions claim nothing.
        assert!(allocator.is_short_available("f").unwrap());
    }

    #[test]
    fn conflict_message() {
        let explicit = NameError::NameConflict {
            kind: NameKind::Long,
            origin: NameOrigin::Explicit,
            name: "verbose".to_string(),
        };
        let derived = NameError::NameConflict {
            kind: NameKind::Short,
            origin: NameOrigin::Derived,
            name: "veto".to_string(),
        };

        assert_eq!(
            explicit.to_string(),
            "Explicit long option name 'verbose' is not available."
        );
        assert_eq!(
            derived.to_string(),
            "Field name 'veto' is not available as short option name."
        );
    }
}
