//! Binding of call-site arguments to formal arguments.
//!
//! [`bind`] follows how robot itself assigns the cells of a keyword call:
//! positional values first, then `name=value` pairs, with `@{list}` and
//! `&{dict}` expansions of unknown length. A call that robot would reject
//! has no binding.
//!
//! Call-site arguments and formal arguments are referred to by their index
//! in the call and in the [`ArgumentsDescriptor`] respectively.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::parser::token::RobotToken;

use super::arguments::ArgumentsDescriptor;
use super::relation::SymmetricRelation;

static LIST_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@\{[\w ]+\}$").unwrap());
static DICT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^&\{[\w ]+\}$").unwrap());

/// Anything that can stand at a call site
pub trait CallSiteArgument {
    fn text(&self) -> &str;

    /// Whole text is a `@{list}` expansion
    fn is_clean_list(&self) -> bool {
        LIST_PATTERN.is_match(self.text())
    }

    /// Whole text is a `&{dict}` expansion
    fn is_clean_dictionary(&self) -> bool {
        DICT_PATTERN.is_match(self.text())
    }
}

impl CallSiteArgument for str {
    fn text(&self) -> &str {
        self
    }
}

impl CallSiteArgument for String {
    fn text(&self) -> &str {
        self
    }
}

impl CallSiteArgument for SmolStr {
    fn text(&self) -> &str {
        self.as_str()
    }
}

impl CallSiteArgument for RobotToken {
    fn text(&self) -> &str {
        RobotToken::text(self)
    }
}

impl<T: CallSiteArgument + ?Sized> CallSiteArgument for &T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn is_clean_list(&self) -> bool {
        (**self).is_clean_list()
    }

    fn is_clean_dictionary(&self) -> bool {
        (**self).is_clean_dictionary()
    }
}

/// How a call-site argument is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentTag {
    Positional,
    /// `name=value` for a named formal argument
    Named,
    /// Named argument given again later in the call
    NamedDuplicate,
    /// Goes to `**kwargs` or a keyword-only argument
    Keyword,
    /// Positional value containing `=`
    ContainsEquals,
    List,
    Dictionary,
    /// List or dictionary expansion
    Collection,
}

/// Name part of `name=value`
fn name_of(text: &str) -> &str {
    text.split_once('=').map_or(text, |(name, _)| name)
}

fn tag_arguments<T: CallSiteArgument>(
    arguments: &[T],
    by_name: &FxHashMap<&str, usize>,
    descriptor: &ArgumentsDescriptor,
) -> SymmetricRelation<usize, ArgumentTag> {
    let keyword_supported = descriptor.supports_kwargs() || descriptor.supports_keyword_only();
    let mut tags = SymmetricRelation::new();
    let mut previous_with_name: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, argument) in arguments.iter().enumerate() {
        if argument.is_clean_list() {
            tags.bind(index, ArgumentTag::List);
            tags.bind(index, ArgumentTag::Collection);
            tags.bind(index, ArgumentTag::Positional);
            continue;
        }
        if argument.is_clean_dictionary() {
            tags.bind(index, ArgumentTag::Dictionary);
            tags.bind(index, ArgumentTag::Collection);
            tags.bind(index, ArgumentTag::Named);
            if keyword_supported {
                tags.bind(index, ArgumentTag::Keyword);
            }
            continue;
        }
        let text = argument.text();
        if !text.contains('=') {
            tags.bind(index, ArgumentTag::Positional);
            continue;
        }
        let name = name_of(text);
        if name.ends_with('\\') {
            tags.bind(index, ArgumentTag::Positional);
        } else if let Some(&formal) = by_name.get(name) {
            let keyword_only = descriptor.get(formal).is_some_and(|a| a.is_keyword_only());
            tags.bind(
                index,
                if keyword_only {
                    ArgumentTag::Keyword
                } else {
                    ArgumentTag::Named
                },
            );
            if let Some(previous) = previous_with_name.insert(name, index) {
                tags.bind(previous, ArgumentTag::NamedDuplicate);
            }
        } else if keyword_supported {
            tags.bind(index, ArgumentTag::Keyword);
        } else {
            tags.bind(index, ArgumentTag::Positional);
            tags.bind(index, ArgumentTag::ContainsEquals);
        }
    }
    tags
}

/// Result of a successful [`bind`]
#[derive(Debug, Clone)]
pub struct BoundArguments {
    texts: Vec<SmolStr>,
    formal_names: Vec<SmolStr>,
    tags: SymmetricRelation<usize, ArgumentTag>,
    bindings: SymmetricRelation<usize, usize>,
}

impl BoundArguments {
    pub fn has_tag(&self, argument: usize, tag: ArgumentTag) -> bool {
        self.tags.contains(argument, tag)
    }

    pub fn tags_of(&self, argument: usize) -> &[ArgumentTag] {
        self.tags.rights_of(argument)
    }

    /// Call-site arguments bound to the formal argument, in call order
    pub fn arguments_of(&self, formal: usize) -> &[usize] {
        self.bindings.rights_of(formal)
    }

    /// Formal arguments the call-site argument is bound to
    pub fn formals_of(&self, argument: usize) -> &[usize] {
        self.bindings.lefts_of(argument)
    }

    pub fn last_bound_to(&self, formal: usize) -> Option<usize> {
        self.arguments_of(formal).last().copied()
    }

    /// Value of the last argument bound to `formal`, without its `name=`
    pub fn last_value_bound_to(&self, formal: usize) -> Option<String> {
        self.last_bound_to(formal).map(|argument| self.value_for(formal, argument))
    }

    /// Values bound to `formal`, skipping named arguments given again later
    pub fn values_bound_to(&self, formal: usize) -> Vec<String> {
        self.arguments_of(formal)
            .iter()
            .filter(|&&argument| !self.has_tag(argument, ArgumentTag::NamedDuplicate))
            .map(|&argument| {
                if self.has_tag(argument, ArgumentTag::Named) {
                    self.value_for(formal, argument)
                } else {
                    self.text(argument).to_string()
                }
            })
            .collect()
    }

    fn text(&self, argument: usize) -> &str {
        self.texts.get(argument).map(SmolStr::as_str).unwrap_or_default()
    }

    fn value_for(&self, formal: usize, argument: usize) -> String {
        let text = self.text(argument);
        let name = self.formal_names.get(formal).map(SmolStr::as_str).unwrap_or_default();
        match text.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
            Some(value) => value.to_string(),
            None => text.to_string(),
        }
    }
}

/// Whether calls can be bound against `descriptor` at all
pub fn can_bind(descriptor: &ArgumentsDescriptor) -> bool {
    descriptor.validate().is_ok()
}

/// Bind `arguments` to the formal arguments of `descriptor`.
///
/// Returns `None` when the call is invalid: a positional argument after a
/// named one, a formal argument given both by position and by name, or an
/// argument count outside what the descriptor accepts. With more than one
/// `@{list}` expansion only the last one is elastic.
pub fn bind<T: CallSiteArgument>(descriptor: &ArgumentsDescriptor, arguments: &[T]) -> Option<BoundArguments> {
    if !can_bind(descriptor) {
        return None;
    }
    let by_name: FxHashMap<&str, usize> = descriptor
        .iter()
        .enumerate()
        .filter(|(_, argument)| argument.accepts_name())
        .map(|(index, argument)| (argument.name.as_str(), index))
        .collect();
    let tags = tag_arguments(arguments, &by_name, descriptor);
    let has = |argument: usize, tag: ArgumentTag| tags.contains(argument, tag);

    // positional after named
    let mut named_seen = false;
    for index in 0..arguments.len() {
        if has(index, ArgumentTag::Named) || has(index, ArgumentTag::Keyword) {
            named_seen = true;
        } else if named_seen {
            return None;
        }
    }

    let mut bindings = SymmetricRelation::new();
    bind_positional(descriptor, &tags, &mut bindings);
    for &index in tags.lefts_of(ArgumentTag::Named) {
        if has(index, ArgumentTag::Dictionary) {
            continue;
        }
        if let Some(&formal) = by_name.get(name_of(arguments[index].text())) {
            bindings.bind(formal, index);
        }
    }
    for (index, argument) in arguments.iter().enumerate() {
        if !has(index, ArgumentTag::Keyword) || has(index, ArgumentTag::Dictionary) {
            continue;
        }
        let keyword_only = by_name
            .get(name_of(argument.text()))
            .copied()
            .filter(|&formal| descriptor.get(formal).is_some_and(|a| a.is_keyword_only()));
        if let Some(formal) = keyword_only.or(descriptor.kwarg()) {
            bindings.bind(formal, index);
        }
    }

    // one formal given both by position and by name
    for (formal, argument) in descriptor.iter().enumerate() {
        if !(argument.is_required() || argument.is_default()) {
            continue;
        }
        let bound = bindings.rights_of(formal);
        if bound.len() > 1
            && bound.iter().any(|&i| has(i, ArgumentTag::Positional))
            && bound.iter().any(|&i| has(i, ArgumentTag::Named))
        {
            return None;
        }
    }

    if !arity_matches(descriptor, &tags, arguments.len()) {
        return None;
    }

    Some(BoundArguments {
        texts: arguments.iter().map(|a| SmolStr::new(a.text())).collect(),
        formal_names: descriptor.iter().map(|a| a.name.clone()).collect(),
        tags,
        bindings,
    })
}

fn bind_positional(
    descriptor: &ArgumentsDescriptor,
    tags: &SymmetricRelation<usize, ArgumentTag>,
    bindings: &mut SymmetricRelation<usize, usize>,
) {
    let positional = tags.lefts_of(ArgumentTag::Positional);
    let is_list = |argument: usize| tags.contains(argument, ArgumentTag::List);
    let size = descriptor.len()
        - usize::from(descriptor.supports_varargs())
        - usize::from(descriptor.supports_kwargs());
    let last_list = positional.iter().rposition(|&a| is_list(a));

    let mut formal = 0;
    let mut next = 0;
    if let Some(last) = last_list {
        while formal < size && next < last {
            if !is_list(positional[next]) {
                bindings.bind(formal, positional[next]);
                formal += 1;
            }
            next += 1;
        }
        next += 1;
    }
    while formal < size && next < positional.len() {
        bindings.bind(formal, positional[next]);
        formal += 1;
        next += 1;
    }

    if let Some(vararg) = descriptor.vararg() {
        let mut overflow: Vec<usize> = positional.get(next..).unwrap_or_default().to_vec();
        if let Some(last) = last_list {
            if !overflow.contains(&positional[last]) {
                overflow.push(positional[last]);
            }
        }
        overflow.sort_unstable();
        for argument in overflow {
            bindings.bind(vararg, argument);
        }
    }
}

fn arity_matches(descriptor: &ArgumentsDescriptor, tags: &SymmetricRelation<usize, ArgumentTag>, count: usize) -> bool {
    let has = |argument: usize, tag: ArgumentTag| tags.contains(argument, tag);
    let keyword_supported = descriptor.supports_kwargs() || descriptor.supports_keyword_only();
    let actual = (0..count)
        .filter(|&i| !has(i, ArgumentTag::List) && !has(i, ArgumentTag::NamedDuplicate))
        .filter(|&i| !keyword_supported || !has(i, ArgumentTag::Keyword))
        .count();
    let range = if keyword_supported {
        descriptor.possible_non_kwargs()
    } else {
        descriptor.possible_arguments()
    };
    let has_collection = !tags.lefts_of(ArgumentTag::Collection).is_empty();
    if !has_collection {
        return range.contains(actual);
    }
    let non_collection = (0..count)
        .filter(|&i| !has(i, ArgumentTag::Collection) && !has(i, ArgumentTag::Keyword))
        .count();
    range.max.is_none_or(|max| non_collection <= max)
}
