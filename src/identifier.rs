//! ULID-style identifiers for resources that were never created.
//!
//! An identifier is 26 characters of Crockford Base32: a 10 character
//! millisecond timestamp followed by 16 random characters. Two calls in the
//! same millisecond share their prefix; the suffix makes collisions unlikely
//! but not impossible.

use rand::Rng;

/// Crockford's Base32, without I, L, O and U.
pub const ENCODING: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
pub const TIME_LEN: usize = 10;
pub const RANDOM_LEN: usize = 16;
pub const ULID_LEN: usize = TIME_LEN + RANDOM_LEN;
/// Largest timestamp that fits into ten base-32 digits.
pub const TIME_MAX: u64 = (1 << 48) - 1;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Time value {0} is too large to be encoded.")]
    TimeTooLarge(u64),
    #[error("The system clock reports a time before the Unix epoch.")]
    ClockBeforeEpoch,
    #[error("Time value {timestamp_ms} does not fit into {len} characters.")]
    EncodingTooShort { timestamp_ms: u64, len: usize },
}

/// Generate an identifier for the current instant.
pub fn generate() -> Result<String, IdentifierError> {
    let now = chrono::Utc::now().timestamp_millis();
    let now = u64::try_from(now).map_err(|_| IdentifierError::ClockBeforeEpoch)?;
    generate_at(now, &mut rand::thread_rng())
}

pub fn generate_at<R: Rng + ?Sized>(
    timestamp_ms: u64,
    rng: &mut R,
) -> Result<String, IdentifierError> {
    let mut identifier = encode_time(timestamp_ms, TIME_LEN)?;
    identifier.push_str(&encode_random(RANDOM_LEN, rng));
    Ok(identifier)
}

/// Encode `timestamp_ms` as exactly `len` base-32 digits, most significant first.
/// Fails rather than drop high digits that don't fit.
pub fn encode_time(timestamp_ms: u64, len: usize) -> Result<String, IdentifierError> {
    if timestamp_ms > TIME_MAX {
        return Err(IdentifierError::TimeTooLarge(timestamp_ms));
    }
    let mut remaining = timestamp_ms;
    let mut digits = vec![ENCODING[0]; len];
    for digit in digits.iter_mut().rev() {
        *digit = ENCODING[(remaining % 32) as usize];
        remaining /= 32;
    }
    if remaining != 0 {
        return Err(IdentifierError::EncodingTooShort { timestamp_ms, len });
    }
    // Every byte comes from ENCODING, which is ASCII.
    Ok(digits.into_iter().map(char::from).collect())
}

pub fn encode_random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from(ENCODING[rng.gen_range(0..ENCODING.len())]))
        .collect()
}

/// `true` if `candidate` has the shape of a generated identifier.
pub fn is_well_formed(candidate: &str) -> bool {
    // Ten digits hold 50 bits; a leading digit above 7 means more than 48.
    candidate.len() == ULID_LEN
        && candidate.as_bytes()[0] <= b'7'
        && candidate.bytes().all(|b| ENCODING.contains(&b))
}
