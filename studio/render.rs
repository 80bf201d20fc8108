/// Template renderer for the cropscan studio.
///
/// The studio uses a single HTML template (`studio/assets/studio.html`) with
/// placeholder tokens like `{{TOKEN}}`. The template is embedded at compile
/// time and filled in one pass: each token is swapped for its value or
/// blanked, and substituted text is never scanned again, so braces inside a
/// label or an error message reach the browser untouched.

use crate::handlers::html_escape;

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Renders the full studio page.
///
/// `labels` populates the "recognised diseases" list; `slots` maps
/// page-specific token names (e.g. `RESULT_SECTION`) to ready-made HTML.
pub fn render_page(labels: &[String], slots: &[(&str, &str)]) -> String {
    let label_items: String = labels
        .iter()
        .map(|l| format!("<li>{}</li>", html_escape(&display_name(l))))
        .collect();
    let label_count = labels.len().to_string();

    fill_tokens(TEMPLATE, |token| match token {
        "LABEL_ITEMS" => Some(label_items.as_str()),
        "LABEL_COUNT" => Some(label_count.as_str()),
        other => slots.iter().find(|(name, _)| *name == other).map(|(_, value)| *value),
    })
}

/// `late_blight` -> `Late Blight`.
pub fn display_name(label: &str) -> String {
    label
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None        => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces every `{{TOKEN}}` in `template` with `value(TOKEN)`, or with
/// nothing when `value` has no entry. An unterminated `{{` is kept as is.
fn fill_tokens<'a, F>(template: &str, value: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut html = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                if let Some(v) = value(&after[..end]) {
                    html.push_str(v);
                }
                rest = &after[end + 2..];
            }
            None => {
                html.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    html.push_str(rest);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(display_name("late_blight"), "Late Blight");
        assert_eq!(display_name("healthy"), "Healthy");
        assert_eq!(display_name("__odd__label"), "Odd Label");
    }

    #[test]
    fn unknown_tokens_are_blanked() {
        assert_eq!(fill_tokens("a{{X}}b{{Y}}c", |_| None), "abc");
        assert_eq!(fill_tokens("open {{ never closed", |_| None), "open {{ never closed");
        assert_eq!(fill_tokens("[{{X}}]", |t| (t == "X").then_some("x")), "[x]");
    }

    #[test]
    fn braces_in_substituted_text_survive() {
        let out = fill_tokens("<p>{{MSG}}</p>{{GONE}}", |t| match t {
            "MSG" => Some("bad label {{weird}}"),
            _ => None,
        });
        assert_eq!(out, "<p>bad label {{weird}}</p>");
    }

    #[test]
    fn rendered_page_lists_labels_and_leaks_no_tokens() {
        let html = render_page(&["early_blight".into(), "healthy".into()], &[]);
        assert!(html.contains("<li>Early Blight</li>"));
        assert!(html.contains("<li>Healthy</li>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn result_section_keeps_literal_braces() {
        let card = r#"<div class="error-box">no class {{7}}</div>"#;
        let html = render_page(&["{{odd}}".into()], &[("RESULT_SECTION", card)]);
        assert!(html.contains("no class {{7}}"));
        assert!(html.contains("<li>{{odd}}</li>"));
    }
}
