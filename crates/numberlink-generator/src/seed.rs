use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rand::RngExt as _;
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 256-bit seed that reproduces a generated puzzle.
///
/// The text form is 64 hexadecimal digits.
///
/// # Examples
///
/// ```
/// use numberlink_generator::PuzzleSeed;
///
/// let text = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
/// let seed: PuzzleSeed = text.parse()?;
/// assert_eq!(seed.to_string(), text);
/// # Ok::<(), numberlink_generator::SeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

impl PuzzleSeed {
    /// Draws a fresh seed from the thread-local random generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::rng().random())
    }

    /// Returns the raw bytes of the seed.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Builds the generator for a board of the given size.
    ///
    /// The same seed yields unrelated sequences for different sizes.
    pub(crate) fn rng(&self, width: usize, height: usize) -> Pcg64 {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update((width as u64).to_le_bytes());
        hasher.update((height as u64).to_le_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        rand::SeedableRng::from_seed(digest)
    }
}

impl From<[u8; 32]> for PuzzleSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`PuzzleSeed`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The text is not 64 characters long.
    #[display("seed must be 64 hex digits, got {actual}")]
    InvalidLength {
        /// Number of characters found.
        actual: usize,
    },
    /// The text contains a non-hexadecimal character.
    #[display("invalid hex digit {ch:?} at position {index}")]
    InvalidDigit {
        /// Character position.
        index: usize,
        /// The offending character.
        ch: char,
    },
}

impl FromStr for PuzzleSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let actual = s.chars().count();
        if actual != 64 {
            return Err(SeedParseError::InvalidLength { actual });
        }
        let mut bytes = [0; 32];
        let mut digits = s.chars().enumerate().map(|(index, ch)| {
            ch.to_digit(16)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(SeedParseError::InvalidDigit { index, ch })
        });
        for byte in &mut bytes {
            let (Some(high), Some(low)) = (digits.next(), digits.next()) else {
                unreachable!("length was checked");
            };
            *byte = (high? << 4) | low?;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use rand::RngExt as _;

    use super::*;

    const TEXT: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_parse_and_display() {
        let seed: PuzzleSeed = TEXT.parse().unwrap();
        assert_eq!(seed.as_bytes()[0], 0xc1);
        assert_eq!(seed.as_bytes()[31], 0xf1);
        assert_eq!(seed.to_string(), TEXT);

        let upper: PuzzleSeed = TEXT.to_uppercase().parse().unwrap();
        assert_eq!(upper, seed);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<PuzzleSeed>(),
            Err(SeedParseError::InvalidLength { actual: 3 })
        );
        let bad = format!("{}g", &TEXT[..63]);
        assert_eq!(
            bad.parse::<PuzzleSeed>(),
            Err(SeedParseError::InvalidDigit { index: 63, ch: 'g' })
        );
    }

    #[test]
    fn test_rng_depends_on_size() {
        let seed: PuzzleSeed = TEXT.parse().unwrap();
        let a = seed.rng(4, 4).random::<u64>();
        let b = seed.rng(4, 4).random::<u64>();
        let c = seed.rng(4, 5).random::<u64>();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(PuzzleSeed::random(), PuzzleSeed::random());
    }
}
