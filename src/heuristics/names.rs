use super::{prefix_eq, HeuristicsConfig};

/// Lower-cased whitespace tokens of a name
pub fn name_tokens(name: &str) -> Vec<String> {
    name.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Decide whether a working-group name refers to a reference author
///
/// Only the first and last tokens are compared, each on a short prefix, so
/// middle initials and capitalization differences are tolerated.
pub fn names_match(reference: &str, member: &str, config: &HeuristicsConfig) -> bool {
    let reference = name_tokens(reference);
    let member = name_tokens(member);

    let (Some(ref_first), Some(ref_last)) = (reference.first(), reference.last()) else {
        return false;
    };
    let (Some(mem_first), Some(mem_last)) = (member.first(), member.last()) else {
        return false;
    };

    prefix_eq(ref_first, mem_first, config.first_name_chars)
        && prefix_eq(ref_last, mem_last, config.last_name_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_tokens() {
        assert_eq!(name_tokens("  Jane  A. DOE "), vec!["jane", "a.", "doe"]);
        assert!(name_tokens("   ").is_empty());
    }

    #[test]
    fn test_middle_initial_tolerated() {
        let config = HeuristicsConfig::default();

        assert!(names_match("Jane A. Doe", "Jane Doe", &config));
        assert!(names_match("jane doe", "JANE DOE", &config));
    }

    #[test]
    fn test_last_name_prefix() {
        let config = HeuristicsConfig::default();

        // "schm" agrees, the rest of the surname is ignored
        assert!(names_match("Anna Schmidt", "Anna Schmitt", &config));
        assert!(!names_match("Anna Schmidt", "Anna Schulz", &config));
        assert!(!names_match("Anna Schmidt", "Bert Schmidt", &config));
    }

    #[test]
    fn test_empty_names_never_match() {
        let config = HeuristicsConfig::default();

        assert!(!names_match("", "", &config));
        assert!(!names_match("Jane Doe", " ", &config));
    }

    #[test]
    fn test_custom_thresholds() {
        let config = HeuristicsConfig {
            first_name_chars: 1,
            ..Default::default()
        };

        assert!(names_match("J. Doe", "Jane Doe", &config));
        assert!(!names_match("J. Doe", "Jane Doe", &HeuristicsConfig::default()));
    }
}
