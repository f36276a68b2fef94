use anyhow::Result;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const CHARACTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Alphanumeric token seeded from the OS RNG, used for OAuth `state` values.
pub fn generate_random_string(length: usize) -> Result<String> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    let mut rng = StdRng::from_seed(seed);

    let token = (0..length)
        .map(|_| CHARACTERS[rng.random_range(0..CHARACTERS.len())] as char)
        .collect();

    Ok(token)
}
