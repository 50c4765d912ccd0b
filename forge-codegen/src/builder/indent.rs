//! Indentation for generated text.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// YAML, JavaScript and Markdown.
    pub const TWO: Self = Self::Spaces(2);

    /// nginx and shell.
    pub const FOUR: Self = Self::Spaces(4);

    /// Whitespace for `level` nested levels.
    pub fn at_level(&self, level: usize) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width) * level),
            Self::Tab => "\t".repeat(level),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TWO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_level() {
        assert_eq!(Indent::TWO.at_level(0), "");
        assert_eq!(Indent::TWO.at_level(3), "      ");
        assert_eq!(Indent::Spaces(3).at_level(1), "   ");
        assert_eq!(Indent::Tab.at_level(2), "\t\t");
    }
}
