//! Minimal `{{ key }}` placeholder templates.

use indexmap::IndexMap;

use super::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Values available to placeholders while rendering one service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: IndexMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// A named template source.
///
/// The name is the output path relative to the service directory
/// (`Dockerfile`, `src/index.js`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Expand every `{{ key }}` with the context value.
    ///
    /// Whitespace inside the braces is ignored.
    pub fn render(&self, context: &TemplateContext) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();
        let mut consumed = 0;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                return Err(TemplateError::Unterminated {
                    template: self.name.clone(),
                    offset: consumed + start,
                });
            };

            let key = after_open[..end].trim();
            let value = context
                .get(key)
                .ok_or_else(|| TemplateError::UnknownPlaceholder {
                    template: self.name.clone(),
                    key: key.to_string(),
                })?;
            out.push_str(value);

            let advance = start + OPEN.len() + end + CLOSE.len();
            consumed += advance;
            rest = &rest[advance..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> TemplateContext {
        TemplateContext::new()
            .with("name", "User API")
            .with("port", 8080)
    }

    #[test]
    fn test_render_placeholders() {
        let template = Template::new("Dockerfile", "EXPOSE {{ port }}\n# {{name}}\n");
        assert_eq!(
            template.render(&context()).unwrap(),
            "EXPOSE 8080\n# User API\n"
        );
    }

    #[test]
    fn test_text_without_placeholders() {
        let template = Template::new("x", "res.json({ ok: true });");
        assert_eq!(template.render(&context()).unwrap(), "res.json({ ok: true });");
    }

    #[test]
    fn test_unknown_placeholder() {
        let template = Template::new("nginx.conf", "listen {{ prot }};");
        let err = template.render(&context()).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnknownPlaceholder { ref key, .. } if key == "prot"
        ));
    }

    #[test]
    fn test_unterminated_placeholder() {
        let template = Template::new("x", "ok {{ port }} then {{ name");
        let err = template.render(&context()).unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated { offset: 19, .. }));
    }
}
