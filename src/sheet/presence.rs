/// Cell values accepted as "present". Anything else, including an empty
/// cell, counts as absent: a whitelist, so malformed data never marks a
/// student present by accident.
const PRESENT_TOKENS: [&str; 6] = ["present", "p", "x", "1", "yes", "y"];

pub fn is_present(raw: &str) -> bool {
    let token = raw.trim().to_lowercase();
    PRESENT_TOKENS.contains(&token.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_tokens_are_present() {
        for token in ["present", "p", "x", "1", "yes", "y"] {
            assert!(is_present(token), "{token} should be present");
        }
        assert!(is_present("X"));
        assert!(is_present("Yes"));
        assert!(is_present("  PRESENT  "));
    }

    #[test]
    fn everything_else_is_absent() {
        for token in ["", " ", "no", "0", "absent", "maybe", "xx", "11"] {
            assert!(!is_present(token), "{token:?} should be absent");
        }
    }
}
