//! Debate id generation: `deb-YYYYMMDD-HHMMSS-rrrr`.

use chrono::Local;
use debate_protocol::DebateId;
use rand::Rng;

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 4;

/// Generate a debate id from the current local time, with a random
/// 4-character `[a-z0-9]` suffix to disambiguate ids created within
/// the same second.
pub fn generate_debate_id() -> DebateId {
    let now = Local::now();
    let suffix = random_suffix();
    DebateId::new(format!("deb-{}-{suffix}", now.format("%Y%m%d-%H%M%S")))
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_matches_expected_shape() {
        let id = generate_debate_id();
        let s = id.as_str();
        assert!(s.starts_with("deb-"));
        let parts: Vec<&str> = s.trim_start_matches("deb-").split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 8);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn successive_ids_differ() {
        let a = generate_debate_id();
        let b = generate_debate_id();
        assert_ne!(a, b);
    }
}
