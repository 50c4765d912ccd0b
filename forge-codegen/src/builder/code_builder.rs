//! Fluent builder for indented text.

use super::Indent;

/// Fluent API for building text with proper indentation.
///
/// # Example
///
/// ```
/// use stackforge_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::javascript()
///     .line("function main() {")
///     .indent()
///     .line("console.log('hello');")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "function main() {\n  console.log('hello');\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder for YAML documents.
    pub fn yaml() -> Self {
        Self::new(Indent::TWO)
    }

    /// Create a new CodeBuilder with 2-space indentation (JS default).
    pub fn javascript() -> Self {
        Self::new(Indent::TWO)
    }

    /// Create a new CodeBuilder for Markdown documents.
    pub fn markdown() -> Self {
        Self::new(Indent::TWO)
    }

    /// Add a line with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a header line followed by an indented body.
    ///
    /// # Example
    ///
    /// ```
    /// use stackforge_codegen::builder::CodeBuilder;
    ///
    /// let yaml = CodeBuilder::yaml()
    ///     .block("services:", |b| b.line("api:"))
    ///     .build();
    ///
    /// assert_eq!(yaml, "services:\n  api:\n");
    /// ```
    pub fn block<F>(self, header: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent()
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a comment line with the given prefix (e.g., `#` or `//`).
    pub fn comment(mut self, prefix: &str, text: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(prefix);
        self.buffer.push(' ');
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        self.buffer.push_str(&self.indent.at_level(self.indent_level));
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::yaml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::javascript().line("const x = 1;").build();
        assert_eq!(code, "const x = 1;\n");
    }

    #[test]
    fn test_block_with_close() {
        let code = CodeBuilder::javascript()
            .block_with_close("app.get('/', (req, res) => {", "});", |b| {
                b.line("res.send('ok');")
            })
            .build();

        assert_eq!(code, "app.get('/', (req, res) => {\n  res.send('ok');\n});\n");
    }

    #[test]
    fn test_nested_blocks() {
        let yaml = CodeBuilder::yaml()
            .block("services:", |b| b.block("api:", |b| b.line("build: ./api")))
            .line("networks:")
            .build();

        assert_eq!(yaml, "services:\n  api:\n    build: ./api\nnetworks:\n");
    }

    #[test]
    fn test_comment() {
        let code = CodeBuilder::yaml().comment("#", "generated").build();
        assert_eq!(code, "# generated\n");
    }

    #[test]
    fn test_conditional() {
        let with = CodeBuilder::yaml()
            .when(true, |b| b.line("a: 1"))
            .line("b: 2")
            .build();
        let without = CodeBuilder::yaml()
            .when(false, |b| b.line("a: 1"))
            .line("b: 2")
            .build();

        assert_eq!(with, "a: 1\nb: 2\n");
        assert_eq!(without, "b: 2\n");
    }

    #[test]
    fn test_each() {
        let code = CodeBuilder::yaml()
            .block("depends_on:", |b| {
                b.each(["db", "cache"], |b, name| b.line(&format!("- {}", name)))
            })
            .build();

        assert_eq!(code, "depends_on:\n  - db\n  - cache\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let code = CodeBuilder::yaml().dedent().line("x").build();
        assert_eq!(code, "x\n");
    }
}
