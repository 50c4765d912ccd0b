//! YAML scalar helpers.
//!
//! Every scalar is emitted double-quoted so values such as `"3.8"`, `"80:80"`
//! or `"yes"` keep their string type.

/// Double-quote a scalar, escaping backslashes, quotes and control characters.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a flow sequence of quoted scalars, e.g. `["CMD", "curl"]`.
pub fn flow_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<_> = items.iter().map(|item| quote(item.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Render a `key: "value"` pair.
pub fn pair(key: &str, value: &str) -> String {
    format!("{}: {}", key, quote(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("3.8"), "\"3.8\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(
            quote("mongosh --eval \"db.adminCommand('ping')\""),
            r#""mongosh --eval \"db.adminCommand('ping')\"""#
        );
        assert_eq!(quote("a\\b"), r#""a\\b""#);
        assert_eq!(quote("line\nbreak"), r#""line\nbreak""#);
    }

    #[test]
    fn test_flow_list() {
        assert_eq!(
            flow_list(&["CMD-SHELL", "redis-cli ping"]),
            r#"["CMD-SHELL", "redis-cli ping"]"#
        );
        let empty: [&str; 0] = [];
        assert_eq!(flow_list(&empty), "[]");
    }

    #[test]
    fn test_pair() {
        assert_eq!(pair("restart", "unless-stopped"), r#"restart: "unless-stopped""#);
    }
}
