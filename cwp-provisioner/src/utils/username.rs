//! Panel username generation

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of generated usernames.
pub const USERNAME_LEN: usize = 16;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random alphanumeric token usable as a panel (and system) username.
///
/// The first character is always a letter.
pub fn generate_username() -> String {
    let mut rng = rand::rng();
    let first = char::from(LETTERS[rng.random_range(0..LETTERS.len())]);

    std::iter::once(first)
        .chain(
            (&mut rng)
                .sample_iter(Alphanumeric)
                .take(USERNAME_LEN - 1)
                .map(char::from),
        )
        .collect()
}
