//! `${name}` substitution against an override table.
//!
//! Use `$$` to escape and produce a literal `$`.

use super::OverridesError;

/// Replaces every `${name}` in `text` with `lookup(name)`.
///
/// Names that `lookup` does not know are copied through unchanged. The result
/// is not scanned again, so values containing `${...}` are inserted literally.
pub(super) fn interpolate<'a, L>(text: &str, lookup: L) -> Result<String, OverridesError>
where
    L: Fn(&str) -> Option<&'a str>,
{
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                result.push('$');
            }
            Some('{') => {
                chars.next();
                let name =
                    consume_until(&mut chars, '}').ok_or(OverridesError::UnclosedReference)?;
                match lookup(&name) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("${");
                        result.push_str(&name);
                        result.push('}');
                    }
                }
            }
            _ => result.push('$'),
        }
    }

    Ok(result)
}

fn consume_until(chars: &mut std::iter::Peekable<std::str::Chars>, delim: char) -> Option<String> {
    let mut result = String::new();
    for ch in chars.by_ref() {
        if ch == delim {
            return Some(result);
        }
        result.push(ch);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            "host" => Some("localhost"),
            "port" => Some("8080"),
            "nested" => Some("${host}"),
            _ => None,
        }
    }

    #[test]
    fn test_simple_reference() {
        let out = interpolate("http://${host}:${port}/", lookup).unwrap();
        assert_eq!(out, "http://localhost:8080/");
    }

    #[test]
    fn test_unknown_reference_kept() {
        let out = interpolate("${host}/${missing}", lookup).unwrap();
        assert_eq!(out, "localhost/${missing}");
    }

    #[test]
    fn test_escape_sequence() {
        let out = interpolate("use $${host} literally, cost $5", lookup).unwrap();
        assert_eq!(out, "use ${host} literally, cost $5");
    }

    #[test]
    fn test_values_not_rescanned() {
        let out = interpolate("${nested}", lookup).unwrap();
        assert_eq!(out, "${host}");
    }

    #[test]
    fn test_unclosed_reference() {
        let result = interpolate("broken ${host", lookup);
        assert!(matches!(result, Err(OverridesError::UnclosedReference)));
    }
}
