//! Record id generation.

use rand::Rng;

pub const BLUEPRINT_ID_PREFIX: &str = "BP-";
pub const BLUEPRINT_ID_LEN: usize = 5;
pub const CONTRACT_ID_PREFIX: &str = "CTR-";
pub const CONTRACT_ID_LEN: usize = 6;
pub const FIELD_ID_PREFIX: &str = "FLD-";
pub const FIELD_ID_LEN: usize = 8;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Pluggable id strategy. Output is `prefix` followed by `length` token
/// characters. Uniqueness is not promised; the engine retries on collision.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, prefix: &str, length: usize) -> String;
}

/// Uniform random upper-case base-36 tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self, prefix: &str, length: usize) -> String {
        let mut rng = rand::thread_rng();
        let mut id = String::with_capacity(prefix.len() + length);
        id.push_str(prefix);
        for _ in 0..length {
            id.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
        }
        id
    }
}
