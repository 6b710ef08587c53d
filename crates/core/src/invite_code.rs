//! Affiliate invite code generation and normalization.

use rand::Rng;

/// Number of characters in an invite code.
pub const CODE_LENGTH: usize = 8;

/// Maximum generation attempts before giving up on a unique code.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Uppercase alphanumerics without the look-alike glyphs `0`, `O`, `1`, `I`.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a random invite code.
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Normalize user input for lookup: trimmed and uppercased.
pub fn normalize_invite_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

/// Whether `code` (already normalized) could have been generated here.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
