//! Formal argument lists of keywords and library constructors.
//!
//! Arguments are written the way library documentation shows them:
//! `name`, `name=default`, `*varargs`, `**kwargs`, an optional
//! `name: annotation`, and a bare `*` ending the positional arguments.

use std::fmt;

use smol_str::SmolStr;

use crate::core::ArgumentsDescriptorError;

/// Kind of a formal argument, in the order they must be declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgumentKind {
    Required,
    Default,
    Vararg,
    KeywordOnly,
    Kwarg,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Argument {
    pub kind: ArgumentKind,
    pub name: SmolStr,
    pub annotation: Option<SmolStr>,
    pub default_value: Option<SmolStr>,
}

impl Argument {
    pub fn new(kind: ArgumentKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            annotation: None,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<SmolStr>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<SmolStr>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.kind == ArgumentKind::Required
    }

    pub fn is_default(&self) -> bool {
        self.kind == ArgumentKind::Default
    }

    pub fn is_vararg(&self) -> bool {
        self.kind == ArgumentKind::Vararg
    }

    pub fn is_keyword_only(&self) -> bool {
        self.kind == ArgumentKind::KeywordOnly
    }

    pub fn is_keyword_only_required(&self) -> bool {
        self.is_keyword_only() && self.default_value.is_none()
    }

    pub fn is_keyword_only_default(&self) -> bool {
        self.is_keyword_only() && self.default_value.is_some()
    }

    pub fn is_kwarg(&self) -> bool {
        self.kind == ArgumentKind::Kwarg
    }

    /// Can be given as `name=value`
    pub fn accepts_name(&self) -> bool {
        matches!(
            self.kind,
            ArgumentKind::Required | ArgumentKind::Default | ArgumentKind::KeywordOnly
        )
    }

    fn prefix(&self) -> &'static str {
        match self.kind {
            ArgumentKind::Vararg => "*",
            ArgumentKind::Kwarg => "**",
            _ => "",
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.name)?;
        if let Some(annotation) = &self.annotation {
            write!(f, ": {annotation}")?;
        }
        if let Some(value) = &self.default_value {
            write!(f, "={value}")?;
        }
        Ok(())
    }
}

/// Closed range of argument counts, possibly unbounded above
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArityRange {
    pub min: usize,
    pub max: Option<usize>,
}

impl ArityRange {
    pub fn closed(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    pub fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    pub fn has_upper_bound(&self) -> bool {
        self.max.is_some()
    }
}

impl fmt::Display for ArityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{}..{max}", self.min),
            None => write!(f, "{}+", self.min),
        }
    }
}

/// Ordered formal arguments of a keyword or library constructor
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArgumentsDescriptor {
    arguments: Vec<Argument>,
    /// Position of a bare `*` marker
    last_positional: Option<usize>,
}

impl ArgumentsDescriptor {
    pub fn new(arguments: Vec<Argument>) -> Self {
        Self {
            arguments,
            last_positional: None,
        }
    }

    /// Parse argument specs such as `["a", "b=2", "*args", "**kwargs"]`
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Self {
        let mut arguments = Vec::with_capacity(specs.len());
        let mut last_positional = None;
        let mut positionals_ended = false;
        for spec in specs {
            let spec = spec.as_ref();
            let (kind, annotated, default_value) = if let Some((name, value)) = spec.split_once('=') {
                let kind = if positionals_ended {
                    ArgumentKind::KeywordOnly
                } else {
                    ArgumentKind::Default
                };
                (kind, name, Some(value))
            } else if let Some(name) = spec.strip_prefix("**") {
                (ArgumentKind::Kwarg, name, None)
            } else if let Some(name) = spec.strip_prefix('*') {
                positionals_ended = true;
                if name.is_empty() {
                    last_positional = Some(arguments.len());
                    continue;
                }
                (ArgumentKind::Vararg, name, None)
            } else if positionals_ended {
                (ArgumentKind::KeywordOnly, spec, None)
            } else {
                (ArgumentKind::Required, spec, None)
            };

            let (name, annotation) = match annotated.split_once(':') {
                Some((name, annotation)) => (name, Some(annotation.trim())),
                None => (annotated, None),
            };
            arguments.push(Argument {
                kind,
                name: SmolStr::new(name.trim()),
                annotation: annotation.map(SmolStr::new),
                default_value: default_value.map(|v| SmolStr::new(v.trim())),
            });
        }
        Self {
            arguments,
            last_positional,
        }
    }

    pub fn validate(&self) -> Result<(), ArgumentsDescriptorError> {
        for pair in self.arguments.windows(2) {
            if pair[1].kind < pair[0].kind {
                return Err(ArgumentsDescriptorError::WrongOrder(pair[1].to_string()));
            }
        }
        if self.arguments.iter().filter(|a| a.is_vararg()).count() > 1 {
            return Err(ArgumentsDescriptorError::MultipleVarargs);
        }
        if self.arguments.iter().filter(|a| a.is_kwarg()).count() > 1 {
            return Err(ArgumentsDescriptorError::MultipleKwargs);
        }
        for (index, argument) in self.arguments.iter().enumerate() {
            if self.arguments[..index].iter().any(|a| a.name == argument.name) {
                return Err(ArgumentsDescriptorError::DuplicatedName(argument.name.to_string()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.arguments.iter()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.arguments.iter().position(|a| a.name == name)
    }

    pub fn supports_varargs(&self) -> bool {
        self.vararg().is_some()
    }

    pub fn supports_kwargs(&self) -> bool {
        self.kwarg().is_some()
    }

    pub fn supports_keyword_only(&self) -> bool {
        self.arguments.iter().any(Argument::is_keyword_only)
    }

    /// Only required arguments, positional or keyword-only
    pub fn has_fixed_arity(&self) -> bool {
        self.arguments
            .iter()
            .all(|a| a.is_required() || a.is_keyword_only_required())
    }

    pub fn vararg(&self) -> Option<usize> {
        self.arguments.iter().position(Argument::is_vararg)
    }

    pub fn kwarg(&self) -> Option<usize> {
        self.arguments.iter().position(Argument::is_kwarg)
    }

    fn count(&self, predicate: impl Fn(&Argument) -> bool) -> usize {
        self.arguments.iter().filter(|a| predicate(a)).count()
    }

    pub fn required_count(&self) -> usize {
        self.count(Argument::is_required)
    }

    pub fn default_count(&self) -> usize {
        self.count(Argument::is_default)
    }

    /// Counts of arguments that can be given in total
    pub fn possible_arguments(&self) -> ArityRange {
        let min = self.required_count();
        if self.supports_varargs() || self.supports_kwargs() {
            ArityRange::at_least(min)
        } else {
            ArityRange::closed(min, self.len())
        }
    }

    /// Counts of arguments that can be given outside of `**kwargs`
    pub fn possible_non_kwargs(&self) -> ArityRange {
        let min = self.required_count();
        if self.supports_varargs() {
            ArityRange::at_least(min)
        } else {
            ArityRange::closed(min, min + self.default_count())
        }
    }

    pub fn possible_by_position(&self) -> ArityRange {
        self.possible_non_kwargs()
    }

    pub fn possible_by_name(&self) -> ArityRange {
        let min = self.count(Argument::is_keyword_only_required);
        if self.supports_kwargs() {
            ArityRange::at_least(min)
        } else {
            ArityRange::closed(min, min + self.count(Argument::is_keyword_only_default))
        }
    }

    /// `[a, b=2, *args, **kwargs]`, with `*` where positionals end
    pub fn description(&self) -> String {
        let mut parts: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
        if let Some(position) = self.last_positional {
            parts.insert(position.min(parts.len()), "*".to_string());
        }
        format!("[{}]", parts.join(", "))
    }
}

impl<'a> IntoIterator for &'a ArgumentsDescriptor {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.arguments.iter()
    }
}

impl fmt::Display for ArgumentsDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
