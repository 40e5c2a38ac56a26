use std::{fmt, str::FromStr};

use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// A 256-bit seed that fully determines the blocks a game spawns.
///
/// Seeds are written as 64 lowercase hexadecimal digits so that a game can be
/// shared and replayed.
///
/// # Examples
///
/// ```
/// use blastgrid_generator::SpawnSeed;
///
/// let seed = SpawnSeed::from_phrase("2026-10-18");
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<SpawnSeed>()?, seed);
/// # Ok::<(), blastgrid_generator::SeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpawnSeed([u8; 32]);

impl SpawnSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Derives a seed from arbitrary text by hashing it with SHA-256.
    ///
    /// The same phrase always yields the same seed, so a date or a word can
    /// serve as a shared daily challenge.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Builds the deterministic generator for this seed.
    #[must_use]
    pub fn rng(&self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl fmt::Display for SpawnSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`SpawnSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The text is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Length of the input in characters.
        len: usize,
    },
    /// A character is not a hexadecimal digit.
    #[display("invalid hex digit {ch:?} at position {index}")]
    InvalidDigit {
        /// Character position.
        index: usize,
        /// The offending character.
        ch: char,
    },
}

impl FromStr for SpawnSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let len = s.chars().count();
        if len != 64 {
            return Err(SeedParseError::InvalidLength { len });
        }

        let mut bytes = [0u8; 32];
        let mut nibbles = s.chars().enumerate().map(|(index, ch)| {
            ch.to_digit(16)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(SeedParseError::InvalidDigit { index, ch })
        });
        for byte in &mut bytes {
            // Length was checked above, so both nibbles are present.
            let hi = nibbles.next().transpose()?.unwrap_or(0);
            let lo = nibbles.next().transpose()?.unwrap_or(0);
            *byte = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for SpawnSeed {
    type Error = SeedParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpawnSeed> for String {
    fn from(seed: SpawnSeed) -> Self {
        seed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rand::seq::IndexedRandom as _;

    use super::*;

    const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_parse_and_display() {
        let seed: SpawnSeed = SEED.parse().unwrap();
        assert_eq!(seed.as_bytes()[0], 0xc1);
        assert_eq!(seed.as_bytes()[31], 0xf1);
        assert_eq!(seed.to_string(), SEED);
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let seed: SpawnSeed = SEED.to_uppercase().parse().unwrap();
        assert_eq!(seed.to_string(), SEED);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<SpawnSeed>(),
            Err(SeedParseError::InvalidLength { len: 3 })
        );
        let mut bad = SEED.to_owned();
        bad.replace_range(10..11, "g");
        assert_eq!(
            bad.parse::<SpawnSeed>(),
            Err(SeedParseError::InvalidDigit { index: 10, ch: 'g' })
        );
    }

    #[test]
    fn test_from_phrase_is_sha256() {
        // SHA-256 of the empty string.
        assert_eq!(
            SpawnSeed::from_phrase("").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(SpawnSeed::from_phrase("a"), SpawnSeed::from_phrase("b"));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = SpawnSeed::from_phrase("replay");
        let items: Vec<u32> = (0..100).collect();
        let draw = |seed: SpawnSeed| {
            let mut rng = seed.rng();
            (0..16)
                .map(|_| *items.choose(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(seed), draw(seed));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let seed: SpawnSeed = SEED.parse().unwrap();
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, format!("\"{SEED}\""));
        assert_eq!(serde_json::from_str::<SpawnSeed>(&json).unwrap(), seed);
        assert!(serde_json::from_str::<SpawnSeed>("\"00\"").is_err());
    }
}
