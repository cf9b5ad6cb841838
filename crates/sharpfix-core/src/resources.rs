//! Resource provider seam for human-readable rule text.
//!
//! The rule engine never hard-codes final titles or messages. It hands a rule
//! or fix id plus positional arguments to a [`ResourceProvider`], whose
//! templates use `{0}`, `{1}`, ... placeholders.

/// Supplies titles and messages for rules and fixes.
pub trait ResourceProvider: Send + Sync {
    /// Short title of a rule.
    fn rule_title(&self, rule_id: &str) -> Option<&str>;

    /// Message template of a rule.
    fn message_format(&self, rule_id: &str) -> Option<&str>;

    /// Title template of a fix, keyed by its fix name.
    fn fix_title_format(&self, fix_name: &str) -> Option<&str>;

    /// Render a rule's message with `args`, falling back to the rule id.
    fn message(&self, rule_id: &str, args: &[String]) -> String {
        match self.message_format(rule_id) {
            Some(template) => format_message(template, args),
            None => rule_id.to_string(),
        }
    }

    /// Render a fix title with `args`, falling back to the fix name.
    fn fix_title(&self, fix_name: &str, args: &[String]) -> String {
        match self.fix_title_format(fix_name) {
            Some(template) => format_message(template, args),
            None => fix_name.to_string(),
        }
    }
}

/// Substitute `{N}` placeholders in `template` with `args[N]`.
///
/// Placeholders without a matching argument are left as-is. `{{` and `}}`
/// escape literal braces.
pub fn format_message(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let rest = &template[i + 1..];
                let close = rest.find('}');
                let index = close.and_then(|end| rest[..end].parse::<usize>().ok());
                match (close, index.and_then(|n| args.get(n))) {
                    (Some(end), Some(arg)) => {
                        out.push_str(arg);
                        for _ in 0..=end {
                            chars.next();
                        }
                    }
                    _ => out.push('{'),
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl ResourceProvider for Fixed {
        fn rule_title(&self, rule_id: &str) -> Option<&str> {
            (rule_id == "R1").then_some("Rule one")
        }

        fn message_format(&self, rule_id: &str) -> Option<&str> {
            (rule_id == "R1").then_some("'{0}' should forward to '{1}'")
        }

        fn fix_title_format(&self, fix_name: &str) -> Option<&str> {
            (fix_name == "Forward").then_some("Forward calls to {0}")
        }
    }

    #[test]
    fn placeholders_are_substituted_by_position() {
        let args = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_message("{1} then {0}", &args), "b then a");
    }

    #[test]
    fn missing_arguments_are_left_in_place() {
        assert_eq!(format_message("{0} {3}", &["x".to_string()]), "x {3}");
        assert_eq!(format_message("{name}", &[]), "{name}");
    }

    #[test]
    fn doubled_braces_escape() {
        assert_eq!(format_message("{{0}} {0}", &["v".to_string()]), "{0} v");
    }

    #[test]
    fn provider_defaults_render_templates() {
        let args = vec!["Method1".to_string(), "_items".to_string()];
        assert_eq!(
            Fixed.message("R1", &args),
            "'Method1' should forward to '_items'"
        );
        assert_eq!(Fixed.message("R2", &args), "R2");
        assert_eq!(
            Fixed.fix_title("Forward", &["_items".to_string()]),
            "Forward calls to _items"
        );
        assert_eq!(Fixed.rule_title("R1"), Some("Rule one"));
    }
}
