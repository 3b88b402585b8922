//! Naming templates.
//!
//! Output directory names and the display names written into theme
//! descriptors are produced from user-supplied format strings using
//! `{placeholder}` substitution:
//!
//! - `{name}` expands to the matching variable
//! - `{{` and `}}` render literal braces
//! - unknown placeholders pass through unchanged
//!
//! Two templates exist, each with two variables: the directory-name
//! format sees `{variant}` and `{theme}`, the readable-name format sees
//! `{variant}` and `{original}` (the value the descriptor previously
//! carried).

/// Default output directory name: variant and theme concatenated.
pub const DEFAULT_DIR_NAME_FORMAT: &str = "{variant}{theme}";

/// Default descriptor label: variant name prefixed onto the old value.
pub const DEFAULT_READABLE_NAME_FORMAT: &str = "{variant} {original}";

/// Renders `template`, substituting each `{name}` from `vars`.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                match vars.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) if closed => out.push_str(value),
                    _ => {
                        // Unknown or unterminated placeholder: keep the
                        // input text so the mistake stays visible.
                        out.push('{');
                        out.push_str(&name);
                        if closed {
                            out.push('}');
                        }
                    }
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

    #[test]
    fn test_simple_substitution() {
        let out = render("{variant}{theme}", &[("variant", "Night"), ("theme", "Adwaita")]);
        assert_eq!(out, "NightAdwaita");
    }

    #[test]
    fn test_literal_text_around_placeholders() {
        let out = render(
            "{variant} edition of {original}",
            &[("variant", "Night"), ("original", "Adwaita")],
        );
        assert_eq!(out, "Night edition of Adwaita");
    }

    #[test]
    fn test_escaped_braces() {
        let out = render("{{{variant}}}", &[("variant", "Night")]);
        assert_eq!(out, "{Night}");
    }

    #[test]
    fn test_unknown_placeholder_passes_through() {
        let out = render("{variant}-{typo}", &[("variant", "Night")]);
        assert_eq!(out, "Night-{typo}");
    }

    #[test]
    fn test_unterminated_placeholder_passes_through() {
        let out = render("{variant", &[("variant", "Night")]);
        assert_eq!(out, "{variant");
    }

    #[test]
    fn test_defaults_render_as_documented() {
        let dir = render(
            DEFAULT_DIR_NAME_FORMAT,
            &[("variant", "Night"), ("theme", "T")],
        );
        assert_eq!(dir, "NightT");
        let label = render(
            DEFAULT_READABLE_NAME_FORMAT,
            &[("variant", "Night"), ("original", "Adwaita")],
        );
        assert_eq!(label, "Night Adwaita");
    }
}
