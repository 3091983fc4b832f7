//! Identifier casing helpers used to derive generated member names.

/// Upper-case the first character (e.g., "fooBar" -> "FooBar")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first character, following the JavaBeans rule: names that
/// start with two capitals are left alone (e.g., "FooBar" -> "fooBar",
/// "URL" -> "URL")
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => {
            s.to_string()
        }
        (Some(first), _) => first.to_lowercase().chain(s.chars().skip(1)).collect(),
        (None, _) => String::new(),
    }
}

/// Convert a camelCase identifier to SCREAMING_SNAKE_CASE
/// (e.g., "fooBar" -> "FOO_BAR", "httpURLPath" -> "HTTP_URL_PATH")
pub fn to_screaming_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }
        result.extend(c.to_uppercase());
    }
    result
}

/// Strip a JavaBeans accessor prefix, returning the remainder if it starts
/// with an uppercase letter (e.g., ("getFoo", "get") -> Some("Foo"))
pub fn strip_accessor_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)
        .filter(|rest| rest.chars().next().is_some_and(char::is_uppercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize("fooBar"), "FooBar");
        assert_eq!(capitalize("URL"), "URL");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("Name"), "name");
        assert_eq!(decapitalize("FooBar"), "fooBar");
        assert_eq!(decapitalize("URL"), "URL");
        assert_eq!(decapitalize("X"), "x");
        assert_eq!(decapitalize(""), "");
    }

    #[test]
    fn test_to_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("propertyA"), "PROPERTY_A");
        assert_eq!(to_screaming_snake_case("fooBarBaz"), "FOO_BAR_BAZ");
        assert_eq!(to_screaming_snake_case("URL"), "URL");
        assert_eq!(to_screaming_snake_case("httpURLPath"), "HTTP_URL_PATH");
        assert_eq!(to_screaming_snake_case("item2Name"), "ITEM2_NAME");
    }

    #[test]
    fn test_strip_accessor_prefix() {
        assert_eq!(strip_accessor_prefix("getName", "get"), Some("Name"));
        assert_eq!(strip_accessor_prefix("isActive", "is"), Some("Active"));
        assert_eq!(strip_accessor_prefix("getter", "get"), None);
        assert_eq!(strip_accessor_prefix("get", "get"), None);
        assert_eq!(strip_accessor_prefix("issue", "is"), None);
    }
}
