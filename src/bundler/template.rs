//! `{{placeholder}}` template substitution.
//!
//! Substitution is a single pass over the template source: replacement values
//! are inserted verbatim and never re-scanned, and placeholders with no value
//! in the [`TemplateContext`] are left exactly as written.

use crate::bundler::error::{Error, Result};
use regex::{Captures, Regex};
use std::{collections::BTreeMap, path::Path, sync::LazyLock};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Placeholder name to replacement value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A parsed text template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    /// Wraps template source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Reads a template from disk.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Template(format!("cannot read template {}: {}", path.display(), e))
        })?;
        Ok(Self::new(source))
    }

    /// Names of every placeholder in the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(&self.source)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Fails unless every name in `required` appears as a placeholder.
    pub fn require(&self, required: &[&str]) -> Result<()> {
        let present = self.placeholders();
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !present.contains(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Template(format!(
                "template is missing placeholder(s): {}",
                missing.join(", ")
            )))
        }
    }

    /// Substitutes every known placeholder in one pass.
    pub fn render(&self, context: &TemplateContext) -> String {
        PLACEHOLDER
            .replace_all(&self.source, |caps: &Captures| {
                match context.get(&caps[1]) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_placeholder() {
        let template = Template::new("Version: {{version}}");
        let ctx = TemplateContext::new().with("version", "1.2.3");
        assert_eq!(template.render(&ctx), "Version: 1.2.3");
    }

    #[test]
    fn empty_context_leaves_template_unchanged() {
        let template = Template::new("Version: {{version}}");
        assert_eq!(template.render(&TemplateContext::new()), "Version: {{version}}");
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        let template = Template::new("{{ known }} and {{unknown}}");
        let ctx = TemplateContext::new().with("known", "yes");
        assert_eq!(template.render(&ctx), "yes and {{unknown}}");
    }

    #[test]
    fn replacement_values_are_not_rescanned() {
        let template = Template::new("{{a}}");
        let ctx = TemplateContext::new()
            .with("a", "{{b}}")
            .with("b", "expanded");
        assert_eq!(template.render(&ctx), "{{b}}");
    }

    #[test]
    fn nsis_defines_are_not_placeholders() {
        let template = Template::new(r#"File "${ROOT_PATH}\x" {{root_path}}"#);
        let ctx = TemplateContext::new().with("root_path", "..");
        assert_eq!(template.render(&ctx), r#"File "${ROOT_PATH}\x" .."#);
    }

    #[test]
    fn require_lists_missing_names() {
        let template = Template::new("{{install_file_list}}");
        template.require(&["install_file_list"]).unwrap();

        let err = template
            .require(&["install_file_list", "remove_file_list"])
            .unwrap_err();
        assert!(err.to_string().contains("remove_file_list"));
    }

    #[tokio::test]
    async fn unreadable_template_is_a_template_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Template::from_file(&dir.path().join("missing.template"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
