pub mod affiliations;
pub mod names;

pub use affiliations::*;
pub use names::*;

use serde::{Deserialize, Serialize};

/// Character-prefix thresholds for the matching heuristics
///
/// Defaults were tuned by hand on the original roster; retune per corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Leading characters of the first name token that must agree
    pub first_name_chars: usize,
    /// Leading characters of the last name token that must agree
    pub last_name_chars: usize,
    /// Leading characters of the department segment that must agree
    pub affil_seg0_chars: usize,
    /// Leading characters of the institution segment that must agree
    pub affil_seg1_chars: usize,
    /// Leading characters of the country segment that must agree
    pub affil_last_seg_chars: usize,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            first_name_chars: 3,
            last_name_chars: 4,
            affil_seg0_chars: 15,
            affil_seg1_chars: 5,
            affil_last_seg_chars: 5,
        }
    }
}

/// Compare the first `n` characters of two strings.
///
/// A string shorter than `n` is compared in full, so `"jo"` and `"joe"`
/// differ at `n = 3`.
pub fn prefix_eq(a: &str, b: &str, n: usize) -> bool {
    a.chars().take(n).eq(b.chars().take(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_eq() {
        assert!(prefix_eq("jane", "janet", 3));
        assert!(!prefix_eq("jo", "joe", 3));
        assert!(prefix_eq("jo", "jo", 3));
        assert!(prefix_eq("anything", "else", 0));
    }

    #[test]
    fn test_prefix_eq_counts_characters_not_bytes() {
        assert!(prefix_eq("müller", "müllerova", 4));
        assert!(!prefix_eq("müller", "muller", 4));
    }

    #[test]
    fn test_config_partial_json() {
        let config: HeuristicsConfig = serde_json::from_str(r#"{"first_name_chars": 2}"#).unwrap();

        assert_eq!(config.first_name_chars, 2);
        assert_eq!(config.last_name_chars, 4);
        assert_eq!(config.affil_seg0_chars, 15);
    }
}
