//! Common utility functions shared across the codebase.

/// Match a single dot-free segment with potential wildcards.
/// `*` matches 0 or more characters (standard glob semantics).
///
/// # Examples
///
/// ```
/// use gtaa::utils::segment_matches;
///
/// assert!(segment_matches("Assert*", "Assertions"));
/// assert!(segment_matches("*Page", "LoginPage"));
/// assert!(segment_matches("driver", "driver"));
/// assert!(!segment_matches("driver", "webDriver"));
/// ```
pub fn segment_matches(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if !pattern.contains('*') {
        return pattern == text;
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let mut pos = 0;

    // First part must be a prefix
    if !parts[0].is_empty() {
        if !text.starts_with(parts[0]) {
            return false;
        }
        pos = parts[0].len();
    }

    // Last part must be a suffix
    let last = parts[parts.len() - 1];
    let end = if last.is_empty() {
        text.len()
    } else {
        if !text.ends_with(last) || pos + last.len() > text.len() {
            return false;
        }
        text.len() - last.len()
    };

    // Middle parts must appear in order
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match text[pos..end].find(part) {
            Some(found) => pos += found + part.len(),
            None => return false,
        }
    }

    true
}

/// A receiver/callee pattern such as `Assert*`, `driver` or `page.*`.
///
/// A pattern without `.` matches a single name. A pattern with `.` is matched
/// segment by segment against `receiverHint.calleeName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPattern {
    segments: Vec<String>,
}

impl CallPattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            segments: pattern.split('.').map(str::to_string).collect(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }

    /// Match a bare name (receiver hint or callee). Qualified patterns never
    /// match a bare name.
    pub fn matches_name(&self, name: &str) -> bool {
        !name.is_empty() && !self.is_qualified() && segment_matches(&self.segments[0], name)
    }

    /// Match a call by its receiver: bare patterns against the receiver hint,
    /// qualified patterns against `receiver.callee`. Unqualified calls never
    /// match.
    pub fn matches_receiver(&self, receiver_hint: &str, callee_name: &str) -> bool {
        if receiver_hint.is_empty() {
            return false;
        }
        if !self.is_qualified() {
            return segment_matches(&self.segments[0], receiver_hint);
        }
        self.segments.len() == 2
            && segment_matches(&self.segments[0], receiver_hint)
            && segment_matches(&self.segments[1], callee_name)
    }
}

/// Check whether `qualified_name` lies under the dotted `prefix`.
/// Whole segments only: `org.junit` covers `org.junit.Test` but not
/// `org.junitx.Foo`.
pub fn has_namespace_prefix(qualified_name: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches(".*").trim_end_matches('.');
    if prefix.is_empty() {
        return false;
    }
    match qualified_name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Split an identifier into alphabetic words on case boundaries, acronyms,
/// underscores and digits.
///
/// # Examples
///
/// ```
/// use gtaa::utils::split_words;
///
/// assert_eq!(split_words("UserCanLogin"), vec!["User", "Can", "Login"]);
/// assert_eq!(split_words("parseHTTPResponse"), vec!["parse", "HTTP", "Response"]);
/// assert_eq!(split_words("login_with_2fa"), vec!["login", "with", "fa"]);
/// ```
pub fn split_words(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(offset, c)) in chars.iter().enumerate() {
        if !c.is_alphabetic() {
            if let Some(s) = start.take() {
                words.push(&name[s..offset]);
            }
            continue;
        }

        if let Some(s) = start
            && i > 0
        {
            let prev = chars[i - 1].1;
            let next_is_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_is_lower);
            if boundary {
                words.push(&name[s..offset]);
                start = Some(offset);
            }
        }
        if start.is_none() {
            start = Some(offset);
        }
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }

    words
}

#[cfg(test)]
mod tests {
    use crate::utils::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_segment_matches() {
        assert!(segment_matches("*", "anything"));
        assert!(segment_matches("Assert*", "Assert"));
        assert!(segment_matches("Assert*", "Assertions"));
        assert!(segment_matches("*Assertions", "Assertions"));
        assert!(segment_matches("*Assert", "SoftAssert"));
        assert!(segment_matches("a*b*c", "aXXbYYc"));
        assert!(!segment_matches("Assert*", "SoftAssert"));
        assert!(!segment_matches("ab*ba", "aba"));
        assert!(!segment_matches("driver", "Driver"));
    }

    #[test]
    fn test_call_pattern_bare() {
        let pattern = CallPattern::new("*Page");
        assert!(pattern.matches_receiver("loginPage", "open"));
        assert!(!pattern.matches_receiver("", "open"));
        assert!(pattern.matches_name("LoginPage"));
        assert!(!pattern.matches_name(""));
    }

    #[test]
    fn test_call_pattern_qualified() {
        let pattern = CallPattern::new("page.*");
        assert!(pattern.is_qualified());
        assert!(pattern.matches_receiver("page", "goto"));
        assert!(!pattern.matches_receiver("driver", "get"));
        assert!(!pattern.matches_name("page"));

        let pattern = CallPattern::new("driver.get");
        assert!(pattern.matches_receiver("driver", "get"));
        assert!(!pattern.matches_receiver("driver", "findElement"));
    }

    #[test]
    fn test_has_namespace_prefix() {
        assert!(has_namespace_prefix("org.junit.jupiter.api.Assertions", "org.junit"));
        assert!(has_namespace_prefix("org.junit", "org.junit"));
        assert!(has_namespace_prefix("org.junit.Test", "org.junit.*"));
        assert!(has_namespace_prefix("NUnit.Framework.Assert", "NUnit.Framework"));
        assert!(!has_namespace_prefix("org.junitx.Foo", "org.junit"));
        assert!(!has_namespace_prefix("org.openqa.selenium.By", "org.junit"));
        assert!(!has_namespace_prefix("org.junit.Test", ""));
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words("UserCanLoginWithValidCredentials"),
            vec!["User", "Can", "Login", "With", "Valid", "Credentials"]
        );
        assert_eq!(split_words("login"), vec!["login"]);
        assert_eq!(split_words("A"), vec!["A"]);
        assert_eq!(split_words("HTTPRequest"), vec!["HTTP", "Request"]);
        assert_eq!(split_words("user_can_logout"), vec!["user", "can", "logout"]);
        assert_eq!(split_words("step2Done"), vec!["step", "Done"]);
        assert!(split_words("123").is_empty());
        assert!(split_words("").is_empty());
    }
}
