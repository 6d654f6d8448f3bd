//! Library and keyword specifications supplied by the host.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::core::text_utils::normalize_name;

use super::arguments::ArgumentsDescriptor;
use super::binder::{CallSiteArgument, bind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSpecification {
    pub name: SmolStr,
    pub arguments: ArgumentsDescriptor,
    pub documentation: String,
    pub deprecated: bool,
}

impl KeywordSpecification {
    pub fn new(name: impl Into<SmolStr>, arguments: ArgumentsDescriptor) -> Self {
        Self {
            name: name.into(),
            arguments,
            documentation: String::new(),
            deprecated: false,
        }
    }
}

/// Signature information of one library.
///
/// Dynamic libraries expose different keywords depending on the arguments
/// they were created with, so several specifications may share a name and
/// differ in [`constructor_values`](Self::constructor_values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySpecification {
    pub name: SmolStr,
    pub dynamic: bool,
    pub constructor: ArgumentsDescriptor,
    /// Constructor argument values (by formal name) the specification was
    /// generated for
    pub constructor_values: IndexMap<SmolStr, SmolStr>,
    keywords: IndexMap<String, KeywordSpecification>,
}

impl LibrarySpecification {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            dynamic: false,
            constructor: ArgumentsDescriptor::default(),
            constructor_values: IndexMap::new(),
            keywords: IndexMap::new(),
        }
    }

    pub fn dynamic(mut self, constructor: ArgumentsDescriptor) -> Self {
        self.dynamic = true;
        self.constructor = constructor;
        self
    }

    pub fn with_constructor_value(mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.constructor_values.insert(name.into(), value.into());
        self
    }

    pub fn with_keyword(mut self, keyword: KeywordSpecification) -> Self {
        self.add_keyword(keyword);
        self
    }

    pub fn add_keyword(&mut self, keyword: KeywordSpecification) {
        self.keywords.insert(normalize_name(&keyword.name), keyword);
    }

    /// Keyword by name, ignoring case, spaces and underscores
    pub fn keyword(&self, name: &str) -> Option<&KeywordSpecification> {
        self.keywords.get(&normalize_name(name))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &KeywordSpecification> {
        self.keywords.values()
    }

    /// Whether an import with these arguments refers to this specification.
    ///
    /// Static libraries match any arguments. Dynamic ones need arguments
    /// that bind to the constructor and give every recorded constructor
    /// value, defaults included.
    pub fn matches_arguments<T: CallSiteArgument>(&self, arguments: &[T]) -> bool {
        if !self.dynamic {
            return true;
        }
        let Some(bound) = bind(&self.constructor, arguments) else {
            return false;
        };
        self.constructor_values.iter().all(|(name, expected)| {
            let Some(formal) = self.constructor.position(name) else {
                return false;
            };
            let actual = bound.last_value_bound_to(formal).or_else(|| {
                self.constructor
                    .get(formal)
                    .and_then(|a| a.default_value.as_ref())
                    .map(ToString::to_string)
            });
            actual.as_deref() == Some(expected.as_str())
        })
    }
}

/// First specification named `name` that matches the import arguments
pub fn find_specification<'a, T: CallSiteArgument>(
    specifications: &'a [LibrarySpecification],
    name: &str,
    arguments: &[T],
) -> Option<&'a LibrarySpecification> {
    specifications
        .iter()
        .filter(|spec| spec.name == name)
        .find(|spec| spec.matches_arguments(arguments))
}
