//! Per-parse accumulator and options
//!
//! Every parse owns a fresh [`ParseContext`] that is threaded through the
//! recursive walk, so a parser instance holds no mutable state between
//! invocations.

use std::collections::HashSet;
use swagger_ir_common::{Enum, IrError, Result, Type};

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest schema nesting accepted before failing with `DepthExceeded`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Side tables filled while walking interfaces and definitions
#[derive(Debug)]
pub struct ParseContext {
    enums: Vec<Enum>,
    anonymous_types: Vec<Type>,
    /// Names taken by definitions, anonymous types and enums
    names: HashSet<String>,
    depth: usize,
    max_depth: usize,
}

impl ParseContext {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            enums: Vec::new(),
            anonymous_types: Vec::new(),
            names: HashSet::new(),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Mark a named definition so synthesized names never shadow it
    pub fn reserve(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    /// Take `candidate`, or the first free `candidate2`, `candidate3`, ...
    pub fn claim(&mut self, candidate: String) -> String {
        if self.names.insert(candidate.clone()) {
            return candidate;
        }

        let name = (2..)
            .map(|n| format!("{}{}", candidate, n))
            .find(|name| !self.names.contains(name))
            .unwrap_or_default();

        tracing::warn!(
            synthesized = %candidate,
            renamed = %name,
            "anonymous name collides with an existing type or enum"
        );
        self.names.insert(name.clone());
        name
    }

    pub fn push_enum(&mut self, value: Enum) {
        tracing::debug!(name = %value.name, values = value.values.len(), "synthesized enum");
        self.enums.push(value);
    }

    pub fn push_type(&mut self, value: Type) {
        tracing::debug!(
            name = %value.name,
            properties = value.properties.len(),
            "synthesized anonymous type"
        );
        self.anonymous_types.push(value);
    }

    /// Step one level deeper into the schema graph
    pub fn enter(&mut self, location: &str) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(IrError::DepthExceeded {
                limit: self.max_depth,
                location: location.to_string(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Anonymous types and enums, in discovery order
    pub fn finish(self) -> (Vec<Type>, Vec<Enum>) {
        (self.anonymous_types, self.enums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_disambiguates() {
        let mut ctx = ParseContext::new(&ParseOptions::default());
        ctx.reserve("widget");

        assert_eq!(ctx.claim("widget".to_string()), "widget2");
        assert_eq!(ctx.claim("widget".to_string()), "widget3");
        assert_eq!(ctx.claim("gadget".to_string()), "gadget");
    }

    #[test]
    fn test_depth_limit() {
        let mut ctx = ParseContext::new(&ParseOptions { max_depth: 2 });

        ctx.enter("a").unwrap();
        ctx.enter("a.b").unwrap();
        let err = ctx.enter("a.b.c").unwrap_err();
        assert!(matches!(err, IrError::DepthExceeded { limit: 2, .. }));

        ctx.leave();
        assert!(ctx.enter("a.d").is_ok());
    }
}
