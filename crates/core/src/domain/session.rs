use rand::Rng;
use serde::{Deserialize, Serialize};

/// Opaque per-device session key. Scopes cart rows and correlates a kiosk
/// hand-off with its WhatsApp continuation; never parsed for meaning.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

impl SessionId {
    /// Time-seeded id with a random suffix, e.g. `SES-LZX41K2M-8QJ3`.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let mut rng = rand::thread_rng();
        let suffix: String = (0..4)
            .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
            .collect();
        Self(format!("SES-{}-{suffix}", base36(millis)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::{base36, SessionId};

    #[test]
    fn generated_ids_carry_prefix_and_differ() {
        let first = SessionId::generate();
        let second = SessionId::generate();
        assert!(first.as_str().starts_with("SES-"));
        assert!(second.as_str().starts_with("SES-"));
        assert_ne!(first, second);
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "Z");
        assert_eq!(base36(36), "10");
    }
}
