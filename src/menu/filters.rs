//! Named filters applied by `{{variable | filter}}` placeholders

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::menu::template::resolve_template;
use crate::version::semver::Variables;

/// A pure transformation of a placeholder value
pub trait Filter: Send + Sync {
    /// Transform `value`, with every variable of the placeholder's context available
    fn apply(&self, value: &str, variables: &Variables) -> String;
}

impl<F> Filter for F
where
    F: Fn(&str, &Variables) -> String + Send + Sync,
{
    fn apply(&self, value: &str, variables: &Variables) -> String {
        self(value, variables)
    }
}

/// Filter declared in the config as a template.
///
/// `{{value}}` is the filtered value; the version variables are available too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFilter {
    template: String,
}

impl TemplateFilter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Filter for TemplateFilter {
    fn apply(&self, value: &str, variables: &Variables) -> String {
        let mut scope = Variables::with_capacity(variables.len() + 1);
        scope.insert("value".to_string(), Some(value.to_string()));
        for (name, variable) in variables {
            scope
                .entry(name.clone())
                .or_insert_with(|| variable.clone());
        }
        resolve_template(&self.template, &scope, &FilterRegistry::new())
    }
}

/// Registry of filters by name
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in `upper` and `lower` filters
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_fn("upper", |value: &str, _: &Variables| value.to_uppercase());
        registry.register_fn("lower", |value: &str, _: &Variables| value.to_lowercase());
        registry
    }

    /// Built-ins plus the template filters declared in the config
    pub fn from_config(filters: &IndexMap<String, String>) -> Self {
        let mut registry = Self::with_builtins();
        for (name, template) in filters {
            registry.register(name, Arc::new(TemplateFilter::new(template.clone())));
        }
        registry
    }

    /// Register a filter, replacing any filter with the same name
    pub fn register(&mut self, name: &str, filter: Arc<dyn Filter>) {
        self.filters.insert(name.to_string(), filter);
    }

    pub fn register_fn<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&str, &Variables) -> String + Send + Sync + 'static,
    {
        self.register(name, Arc::new(filter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.filters.get(name).map(|filter| filter.as_ref())
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FilterRegistry")
            .field("filters", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(entries: &[(&str, &str)]) -> Variables {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    #[test]
    fn with_builtins_registers_case_filters() {
        let registry = FilterRegistry::with_builtins();
        let variables = Variables::new();

        assert_eq!(
            registry.get("upper").unwrap().apply("rc.1", &variables),
            "RC.1"
        );
        assert_eq!(
            registry.get("lower").unwrap().apply("RC.1", &variables),
            "rc.1"
        );
        assert!(registry.get("title").is_none());
    }

    #[test]
    fn template_filter_exposes_value_and_variables() {
        let filter = TemplateFilter::new("https://v{{major}}.docs.example.com/{{value}}/");
        let variables = vars(&[("major", "4"), ("version", "4.1.0")]);

        assert_eq!(
            filter.apply("4.1.0", &variables),
            "https://v4.docs.example.com/4.1.0/"
        );
    }

    #[test]
    fn template_filter_value_takes_precedence_over_variable_named_value() {
        let filter = TemplateFilter::new("{{value}}");
        let variables = vars(&[("value", "shadowed")]);

        assert_eq!(filter.apply("filtered", &variables), "filtered");
    }

    #[test]
    fn from_config_overrides_builtins() {
        let registry = FilterRegistry::from_config(&IndexMap::from([(
            "upper".to_string(),
            "[{{value}}]".to_string(),
        )]));

        assert_eq!(
            registry.get("upper").unwrap().apply("x", &Variables::new()),
            "[x]"
        );
        assert!(registry.get("lower").is_some());
    }
}
