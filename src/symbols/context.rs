//! Extraction context — tracks the scope stack during extraction.

/// Extraction state passed through all extraction functions.
pub(super) struct ExtractionContext {
    prefix: String,
    /// Stack of scope segments for proper push/pop
    scope_stack: Vec<String>,
}

impl ExtractionContext {
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            scope_stack: Vec::new(),
        }
    }

    pub fn qualified_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    pub fn push_scope(&mut self, name: &str) {
        self.scope_stack.push(name.to_string());
        if self.prefix.is_empty() {
            self.prefix = name.to_string();
        } else {
            self.prefix = format!("{}.{}", self.prefix, name);
        }
    }

    pub fn pop_scope(&mut self) {
        if let Some(popped) = self.scope_stack.pop() {
            // Remove the last segment plus the joining '.'
            let suffix_len = if self.scope_stack.is_empty() {
                popped.len()
            } else {
                popped.len() + 1
            };
            self.prefix
                .truncate(self.prefix.len().saturating_sub(suffix_len));
        }
    }
}
