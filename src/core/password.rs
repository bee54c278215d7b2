//! Password policy and generator
//!
//! A password is accepted when it is 1-16 characters long and contains at least
//! one lowercase letter, one uppercase letter, one digit, and one ASCII
//! punctuation symbol.

use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_LEN: usize = 1;

/// Longest accepted password, in characters
pub const MAX_PASSWORD_LEN: usize = 16;

/// Length of every generated password
pub const GENERATED_PASSWORD_LEN: usize = 12;

/// Symbols accepted by the policy
pub const POLICY_SYMBOLS: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Symbols the generator draws from (shell- and quote-safe subset)
pub const GENERATOR_SYMBOLS: &str = "!@#$%^&*";

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// A single reason a password was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort,
    TooLong,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSymbol,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "must not be empty"),
            Self::TooLong => write!(f, "must be at most {MAX_PASSWORD_LEN} characters"),
            Self::MissingLowercase => write!(f, "needs a lowercase letter"),
            Self::MissingUppercase => write!(f, "needs an uppercase letter"),
            Self::MissingDigit => write!(f, "needs a digit"),
            Self::MissingSymbol => write!(f, "needs a symbol"),
        }
    }
}

/// List every policy rule `candidate` breaks
///
/// An empty result means the password is acceptable.
#[must_use]
pub fn check_password(candidate: &str) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();
    let len = candidate.chars().count();

    if len < MIN_PASSWORD_LEN {
        violations.push(PolicyViolation::TooShort);
    }
    if len > MAX_PASSWORD_LEN {
        violations.push(PolicyViolation::TooLong);
    }
    if !candidate.chars().any(char::is_lowercase) {
        violations.push(PolicyViolation::MissingLowercase);
    }
    if !candidate.chars().any(char::is_uppercase) {
        violations.push(PolicyViolation::MissingUppercase);
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PolicyViolation::MissingDigit);
    }
    if !candidate.chars().any(|c| POLICY_SYMBOLS.contains(c)) {
        violations.push(PolicyViolation::MissingSymbol);
    }

    violations
}

/// Whether `candidate` satisfies the whole policy
///
/// # Examples
/// ```
/// use hangman::core::password::is_valid_password;
///
/// assert!(is_valid_password("Abcdef1!"));
/// assert!(!is_valid_password("abc"));
/// ```
#[must_use]
pub fn is_valid_password(candidate: &str) -> bool {
    check_password(candidate).is_empty()
}

/// Generate a 12-character password that always satisfies the policy
///
/// One character is guaranteed from each class, the rest are drawn from the
/// union of all classes, and the result is shuffled.
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R) -> String {
    let symbols = GENERATOR_SYMBOLS.as_bytes();
    let classes: [&[u8]; 4] = [LOWERCASE, UPPERCASE, DIGITS, symbols];

    let mut chars: Vec<u8> = classes.iter().map(|class| pick(rng, class)).collect();

    let all: Vec<u8> = classes.concat();
    while chars.len() < GENERATED_PASSWORD_LEN {
        chars.push(pick(rng, &all));
    }

    chars.shuffle(rng);
    chars.into_iter().map(char::from).collect()
}

fn pick<R: Rng + ?Sized>(rng: &mut R, class: &[u8]) -> u8 {
    class[rng.random_range(0..class.len())]
}
