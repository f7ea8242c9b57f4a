//! Name grammars shared by the parser and by callers validating locators.

/// Checks a reverse-domain interface name such as `org.varlink.service`.
///
/// At least two dot-separated segments; each segment starts with a lowercase
/// letter, continues with lowercase letters, digits, or hyphens, and does
/// not end with a hyphen.
#[must_use]
pub fn is_interface_name(name: &str) -> bool {
    let mut segments = 0usize;
    for segment in name.split('.') {
        if !is_interface_segment(segment) {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

fn is_interface_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_lowercase() {
        return false;
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return false;
    }
    !segment.ends_with('-')
}

/// Checks a type, method, or error name: `CamelCase`, leading uppercase.
#[must_use]
pub fn is_member_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Checks a field or enum-variant name.
///
/// Starts with a letter; continues with letters, digits, or single
/// underscores; does not end with an underscore.
#[must_use]
pub fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !name.ends_with('_') && !name.contains("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reverse_domain_interface_names() {
        assert!(is_interface_name("org.varlink.service"));
        assert!(is_interface_name("a.b"));
        assert!(is_interface_name("org.kernel.k8s-tools"));
    }

    #[test]
    fn rejects_malformed_interface_names() {
        assert!(!is_interface_name("org"));
        assert!(!is_interface_name(""));
        assert!(!is_interface_name("org..service"));
        assert!(!is_interface_name("Org.varlink"));
        assert!(!is_interface_name("org.1varlink"));
        assert!(!is_interface_name("org.varlink-"));
        assert!(!is_interface_name("org.varlink service"));
    }

    #[test]
    fn member_names_are_camel_case() {
        assert!(is_member_name("GetInfo"));
        assert!(is_member_name("T"));
        assert!(!is_member_name("getInfo"));
        assert!(!is_member_name(""));
        assert!(!is_member_name("Get-Info"));
    }

    #[test]
    fn field_names_allow_single_underscores() {
        assert!(is_field_name("name"));
        assert!(is_field_name("module_name"));
        assert!(!is_field_name("_name"));
        assert!(!is_field_name("name_"));
        assert!(!is_field_name("module__name"));
        assert!(!is_field_name("1name"));
    }
}
