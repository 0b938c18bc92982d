//! `{{variable}}` / `{{variable | filter}}` substitution
//!
//! Only variable substitution and a single named filter per placeholder are
//! supported. Placeholders naming unknown variables are left as-is so that
//! unresolved tokens remain visible.

use regex::{Captures, Regex};
use tracing::warn;

use crate::menu::filters::FilterRegistry;
use crate::version::semver::Variables;

const FILTER_PATTERN: &str = r"\|\s*(?P<filter>\w+)\s*";

fn placeholder_regex(variable: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"\{{\{{\s*{}\s*(?:{})?\}}\}}",
        regex::escape(variable),
        FILTER_PATTERN
    ))
}

/// Resolve every placeholder of `template` naming a variable of `variables`.
///
/// Variables are substituted in map order. A filter missing from `filters`
/// is ignored and the raw value is used; variables without value resolve to
/// an empty string.
pub fn resolve_template(template: &str, variables: &Variables, filters: &FilterRegistry) -> String {
    if template.is_empty() {
        return String::new();
    }

    let mut value = template.to_string();

    for (variable, replacement) in variables {
        let re = match placeholder_regex(variable) {
            Ok(re) => re,
            Err(e) => {
                warn!("Skipping template variable '{}': {}", variable, e);
                continue;
            }
        };

        let raw = replacement.as_deref().unwrap_or_default();
        value = re
            .replace_all(&value, |caps: &Captures| {
                caps.name("filter")
                    .and_then(|name| filters.get(name.as_str()))
                    .map(|filter| filter.apply(raw, variables))
                    .unwrap_or_else(|| raw.to_string())
            })
            .into_owned();
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(entries: &[(&str, Option<&str>)]) -> Variables {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    fn upper_filters() -> FilterRegistry {
        let mut filters = FilterRegistry::new();
        filters.register_fn("upper", |value: &str, _: &Variables| value.to_uppercase());
        filters
    }

    #[test]
    fn resolve_template_substitutes_variables() {
        let variables = vars(&[("version", Some("1.2.3")), ("tag", Some("latest"))]);

        let result = resolve_template("{{version}}-{{tag}}", &variables, &FilterRegistry::new());

        assert_eq!(result, "1.2.3-latest");
    }

    #[test]
    fn resolve_template_substitutes_empty_string_for_missing_value() {
        let variables = vars(&[("version", Some("1.2.3")), ("tag", None)]);

        let result = resolve_template("{{version}}-{{tag}}", &variables, &FilterRegistry::new());

        assert_eq!(result, "1.2.3-");
    }

    #[test]
    fn resolve_template_leaves_unknown_variables_unresolved() {
        let variables = vars(&[("version", Some("1.2.3"))]);

        let result = resolve_template(
            "{{version}} ({{ channel }})",
            &variables,
            &FilterRegistry::new(),
        );

        assert_eq!(result, "1.2.3 ({{ channel }})");
    }

    #[test]
    fn resolve_template_replaces_every_occurrence_with_surrounding_whitespace() {
        let variables = vars(&[("major", Some("3"))]);

        let result = resolve_template(
            "/v{{major}}/{{  major  }}.x/{{major|upper}}",
            &variables,
            &FilterRegistry::new(),
        );

        assert_eq!(result, "/v3/3.x/3");
    }

    #[test]
    fn resolve_template_applies_registered_filter() {
        let variables = vars(&[("version", Some("1.2.3-beta"))]);

        let result = resolve_template("{{ version | upper }}", &variables, &upper_filters());

        assert_eq!(result, "1.2.3-BETA");
    }

    #[test]
    fn resolve_template_falls_back_to_raw_value_for_unknown_filter() {
        let variables = vars(&[("version", Some("1.2.3-beta"))]);

        let result = resolve_template("{{version|shout}}", &variables, &upper_filters());

        assert_eq!(result, "1.2.3-beta");
    }

    #[test]
    fn resolve_template_passes_all_variables_to_filters() {
        let mut filters = FilterRegistry::new();
        filters.register_fn("series", |value: &str, variables: &Variables| {
            let major = variables
                .get("major")
                .and_then(|v| v.as_deref())
                .unwrap_or_default();
            format!("{}.x ({})", major, value)
        });
        let variables = vars(&[("major", Some("2")), ("version", Some("2.4.0"))]);

        let result = resolve_template("{{version|series}}", &variables, &filters);

        assert_eq!(result, "2.x (2.4.0)");
    }

    #[test]
    fn resolve_template_does_not_match_longer_variable_names() {
        let variables = vars(&[("tag", Some("latest"))]);

        let result = resolve_template("{{tags}} {{tag}}", &variables, &FilterRegistry::new());

        assert_eq!(result, "{{tags}} latest");
    }

    #[test]
    fn resolve_template_returns_empty_template_unchanged() {
        let variables = vars(&[("version", Some("1.2.3"))]);

        assert_eq!(resolve_template("", &variables, &FilterRegistry::new()), "");
    }

    #[test]
    fn resolve_template_does_not_expand_dollar_signs_in_values() {
        let variables = vars(&[("version", Some("$1.0"))]);

        let result = resolve_template("{{version}}", &variables, &FilterRegistry::new());

        assert_eq!(result, "$1.0");
    }
}
