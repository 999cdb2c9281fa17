//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts to generate error messages
//! that indicate where in the source structure the error occurred.

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// At the top level of a module
    TopLevel,
    /// Inside a class body
    ClassBody,
    /// Inside a function body
    FunctionBody,
    /// Inside the body of a scoped resource block
    ResourceBody,
    /// Parsing a parameter list
    ParameterList,
    /// Parsing the resource items of a `with` header
    ResourceList,
    /// Parsing a decorator line
    DecoratorList,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::ClassBody => "in class body",
            Self::FunctionBody => "in function body",
            Self::ResourceBody => "in resource block",
            Self::ParameterList => "in parameter list",
            Self::ResourceList => "in resource list",
            Self::DecoratorList => "in decorator",
        }
    }

    /// Describe what the parser expects in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a declaration or statement",
            Self::ClassBody => "a method, field, or nested class",
            Self::FunctionBody => "a statement",
            Self::ResourceBody => "a statement",
            Self::ParameterList => "a parameter or ')'",
            Self::ResourceList => "a resource expression",
            Self::DecoratorList => "a decorator name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(ParseContext::ClassBody.description(), "in class body");
        assert_eq!(
            ParseContext::ParameterList.expected_description(),
            "a parameter or ')'"
        );
    }
}
