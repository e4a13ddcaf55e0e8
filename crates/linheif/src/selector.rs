//! Fuzzy channel-selector matching for auxiliary layers.
//!
//! Selectors are comma-separated alternatives. Each alternative matches
//! case-insensitively as a substring of the layer name, with `*` standing for
//! any run of characters. An empty selector matches every layer.

/// Returns true when `name` matches the selector pattern.
pub fn matches_selector(name: &str, selector: &str) -> bool {
    if selector.trim().is_empty() {
        return true;
    }
    let name = name.to_lowercase();
    selector.split(',').map(str::trim).any(|part| {
        if part.is_empty() {
            return true;
        }
        // Substring semantics: anchor the pattern with implicit wildcards.
        let pattern = format!("*{}*", part.to_lowercase());
        glob_match(pattern.as_bytes(), name.as_bytes())
    })
}

/// Iterative wildcard match with single-star backtracking.
fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0usize, 0usize);
    let mut star = usize::MAX;
    let mut mark = 0usize;
    while t < text.len() {
        if p < pattern.len() && (pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == b'*' {
            star = p;
            mark = t;
            p += 1;
        } else if star != usize::MAX {
            p = star + 1;
            mark += 1;
            t = mark;
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == b'*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selector_matches_all() {
        assert!(matches_selector("urn.com.apple.hdrgainmap", ""));
        assert!(matches_selector("depth", "  "));
    }

    #[test]
    fn test_substring() {
        assert!(matches_selector("urn.com.apple.photo.2020.aux.hdrgainmap", "hdrgainmap"));
        assert!(!matches_selector("urn.mpeg.depth", "hdrgainmap"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches_selector("HDRGainMap", "hdrgainmap"));
    }

    #[test]
    fn test_wildcard() {
        assert!(matches_selector("urn.com.apple.photo.aux.hdrgainmap", "apple*gainmap"));
        assert!(!matches_selector("urn.com.apple.photo.aux.depth", "apple*gainmap"));
    }

    #[test]
    fn test_alternatives() {
        assert!(matches_selector("depth", "alpha,depth"));
        assert!(matches_selector("alphamask", "alpha,depth"));
        assert!(!matches_selector("thumbnail", "alpha,depth"));
    }
}
