//! `{{var}}` substitution.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed template variable: {{{{{0}")]
    Unclosed(String),

    #[error("template variable not provided: {{{{{0}}}}}")]
    Unknown(String),
}

/// Resolve every `{{var}}` placeholder from `vars`. Deterministic given
/// identical inputs; an unknown or unclosed variable is an error rather than
/// leaking a placeholder into a generated file.
pub fn render(template: &str, vars: &HashMap<&str, &str>) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // consume second {

            let mut var_name = String::new();
            loop {
                match chars.next() {
                    Some('}') if chars.peek() == Some(&'}') => {
                        chars.next(); // consume second }
                        break;
                    }
                    Some(ch) => var_name.push(ch),
                    None => return Err(TemplateError::Unclosed(var_name)),
                }
            }

            let var_name = var_name.trim();
            match vars.get(var_name) {
                Some(value) => result.push_str(value),
                None => return Err(TemplateError::Unknown(var_name.to_string())),
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_variables() {
        let vars = HashMap::from([("name", "widgets"), ("org", "acme")]);
        assert_eq!(
            render("# {{name}} by {{ org }}", &vars).unwrap(),
            "# widgets by acme"
        );
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let vars = HashMap::new();
        assert_eq!(
            render("{{nope}}", &vars),
            Err(TemplateError::Unknown("nope".into()))
        );
    }

    #[test]
    fn unclosed_variable_is_an_error() {
        let vars = HashMap::new();
        assert!(matches!(
            render("{{name", &vars),
            Err(TemplateError::Unclosed(_))
        ));
    }

    #[test]
    fn render_is_deterministic() {
        let vars = HashMap::from([("name", "widgets")]);
        let a = render("{{name}}-{{name}}", &vars).unwrap();
        let b = render("{{name}}-{{name}}", &vars).unwrap();
        assert_eq!(a, b);
    }
}
