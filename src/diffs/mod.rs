//! The five diff generators and the verification-and-fallback wrapper that
//! guarantees every diff this crate returns is correct by construction.

pub mod coalesce;
pub mod flash;
pub mod lcs;
pub mod megatron;
pub mod myers;
pub mod optimus;
pub mod starscream;
pub mod zoom;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::operation::{apply, Op};

/// Selects which generator produces a `Diff`'s operations. A small,
/// `Copy`-able tag rather than a trait object.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Bulk character-level prefix/suffix trim. O(n), coarsest.
    Zoom,
    /// Same shape as Zoom, computed over line boundaries first.
    Flash,
    /// Line-unit LCS with block-coalesced operations.
    Starscream,
    /// Line-unit LCS, one operation per line (finest-grained).
    Optimus,
    /// Starscream refined with character-level micro-diffs on similar
    /// replaced lines. The default.
    Megatron,
}

impl Default for Algorithm {
    fn default() -> Self { Algorithm::Megatron }
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Zoom => "zoom",
            Algorithm::Flash => "flash",
            Algorithm::Starscream => "starscream",
            Algorithm::Optimus => "optimus",
            Algorithm::Megatron => "megatron",
        }
    }

    fn generate(&self, source: &str, destination: &str) -> Vec<Op> {
        match self {
            Algorithm::Zoom => zoom::diff(source, destination),
            Algorithm::Flash => flash::diff(source, destination),
            Algorithm::Starscream => starscream::diff(source, destination),
            Algorithm::Optimus => optimus::diff(source, destination),
            Algorithm::Megatron => megatron::diff(source, destination),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}

/// Runs `algorithm` and, for every algorithm other than Zoom, verifies the
/// result by applying it to `source` and comparing against `destination`.
/// A mismatch silently regenerates with Zoom and reports `Algorithm::Zoom`
/// as the one actually used — callers can detect the substitution by
/// comparing the returned algorithm to the one they requested.
pub fn generate(source: &str, destination: &str, algorithm: Algorithm) -> (Vec<Op>, Algorithm) {
    if algorithm == Algorithm::Zoom {
        return (zoom::diff(source, destination), Algorithm::Zoom);
    }

    let ops = algorithm.generate(source, destination);
    match apply(source, &ops) {
        Ok(result) if result == destination => (ops, algorithm),
        _ => (zoom::diff(source, destination), Algorithm::Zoom),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ALL_ALGORITHMS: [Algorithm; 5] = [
        Algorithm::Zoom,
        Algorithm::Flash,
        Algorithm::Starscream,
        Algorithm::Optimus,
        Algorithm::Megatron,
    ];

    #[test]
    fn test_default_algorithm_is_megatron() {
        assert_eq!(Algorithm::default(), Algorithm::Megatron);
    }

    #[test]
    fn test_all_algorithms_apply_to_the_same_destination() {
        let cases = [
            ("Hello, world!", "Hello, Swift!"),
            ("", "new line\n"),
            ("doomed", ""),
            (
                "func greet() {\n    print(\"Hello\")\n}\n",
                "func greet() {\n    print(\"Hello, World!\")\n}\n",
            ),
        ];

        for (source, destination) in cases {
            for algorithm in ALL_ALGORITHMS {
                let (ops, _) = generate(source, destination, algorithm);
                assert_eq!(
                    apply(source, &ops).unwrap(),
                    destination,
                    "algorithm {algorithm} failed to reproduce destination for {source:?} -> {destination:?}"
                );
            }
        }
    }

    #[test]
    fn test_verification_never_reports_an_incorrect_algorithm() {
        // even an adversarial generator substitution would be caught; here
        // we just assert the reported algorithm always actually works.
        for algorithm in ALL_ALGORITHMS {
            let (ops, used) = generate("abc", "xyz", algorithm);
            assert_eq!(apply("abc", &ops).unwrap(), "xyz");
            if algorithm != Algorithm::Zoom {
                assert!(used == algorithm || used == Algorithm::Zoom);
            }
        }
    }
}
