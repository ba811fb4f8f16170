// src/services/selector.rs
//
// CSS selectors over the host document, parsed and matched with the
// `selectors` crate. The document is flat: every element is a sibling
// under an implicit root. Sibling combinators and structural
// pseudo-classes follow document order, while descendant and child
// combinators never match.

use cssparser::{Parser, ParserInput, ToCss};
use log::debug;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::bloom::BloomFilter;
use selectors::matching::{
    matches_selector, ElementSelectorFlags, MatchingContext, MatchingForInvalidation, MatchingMode,
    NeedsSelectorFlags, QuirksMode, SelectorCaches,
};
use selectors::parser::{ParseRelative, SelectorImpl, SelectorParseErrorKind};
use selectors::OpaqueElement;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::AttributeSource;
use crate::services::document::{Document, Element, ElementId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported selector syntax: {0:?}")]
    Syntax(String),
}

/************************** Selector implementation ************************/

/// String atom used for names and values inside parsed selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssString(pub String);

impl From<&str> for CssString {
    fn from(s: &str) -> Self {
        CssString(s.to_string())
    }
}

impl From<String> for CssString {
    fn from(s: String) -> Self {
        CssString(s)
    }
}

impl std::ops::Deref for CssString {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for CssString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for CssString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl ToCss for CssString {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_str(&self.0)
    }
}

impl precomputed_hash::PrecomputedHash for CssString {
    fn precomputed_hash(&self) -> u32 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSelectorImpl;

impl SelectorImpl for HostSelectorImpl {
    type ExtraMatchingData<'a> = ();
    type AttrValue = CssString;
    type Identifier = CssString;
    type LocalName = CssString;
    type NamespacePrefix = CssString;
    type NamespaceUrl = CssString;
    type BorrowedLocalName = str;
    type BorrowedNamespaceUrl = str;

    type NonTSPseudoClass = PseudoClass;
    type PseudoElement = PseudoElement;
}

/// The host adds no pseudo-classes beyond the standard structural and
/// logical ones the parser handles itself (`:not`, `:is`, `:nth-child`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {}

impl selectors::parser::NonTSPseudoClass for PseudoClass {
    type Impl = HostSelectorImpl;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl ToCss for PseudoClass {
    fn to_css<W>(&self, _dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {}
    }
}

/// Host surfaces have no pseudo-elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoElement {}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = HostSelectorImpl;
}

impl ToCss for PseudoElement {
    fn to_css<W>(&self, _dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {}
    }
}

struct HostSelectorParser;

impl<'i> selectors::parser::Parser<'i> for HostSelectorParser {
    type Impl = HostSelectorImpl;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_is_and_where(&self) -> bool {
        true
    }
}

/************************** Selector list **********************************/

#[derive(Clone)]
pub struct SelectorList {
    source: String,
    list: selectors::parser::SelectorList<HostSelectorImpl>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser_input = ParserInput::new(input);
        let mut parser = Parser::new(&mut parser_input);
        let list = selectors::parser::SelectorList::parse(&HostSelectorParser, &mut parser, ParseRelative::No)
            .map_err(|e| {
                debug!("Selector {:?} rejected: {:?}", input, e.kind);
                SelectorError::Syntax(input.to_string())
            })?;
        Ok(Self {
            source: input.to_string(),
            list,
        })
    }

    pub fn len(&self) -> usize {
        self.list.slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, document: &Document, element: &Element) -> bool {
        let mut caches = SelectorCaches::default();
        self.matches_with(&HostElement::new(document, element), &mut caches)
    }

    /// Every element of `document` the list matches, in document order.
    pub fn query_all(&self, document: &Document) -> Vec<ElementId> {
        let mut caches = SelectorCaches::default();
        document
            .elements()
            .filter(|e| self.matches_with(&HostElement::new(document, e), &mut caches))
            .map(|e| e.element_id())
            .collect()
    }

    fn matches_with(&self, element: &HostElement<'_>, caches: &mut SelectorCaches) -> bool {
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        self.list
            .slice()
            .iter()
            .any(|selector| matches_selector(selector, 0, None, element, &mut context))
    }
}

impl fmt::Debug for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectorList").field(&self.source).finish()
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/************************** Matching ***************************************/

/// A document element as seen by the selector engine.
#[derive(Debug, Clone, Copy)]
pub struct HostElement<'a> {
    document: &'a Document,
    element: &'a Element,
}

impl<'a> HostElement<'a> {
    pub fn new(document: &'a Document, element: &'a Element) -> Self {
        Self { document, element }
    }

    fn sibling(&self, index: usize) -> Option<Self> {
        self.document
            .element(ElementId(index))
            .map(|element| Self::new(self.document, element))
    }

    // `id` and `class` are reflected from the element's own fields
    fn attribute_value(&self, name: &str) -> Option<Cow<'a, str>> {
        let element = self.element;
        match name {
            "id" => element.dom_id.as_deref().map(Cow::Borrowed),
            "class" if !element.classes.is_empty() => Some(Cow::Owned(element.classes.join(" "))),
            _ => element.attribute(name).map(Cow::Borrowed),
        }
    }
}

fn eq_with_case(a: &str, b: &str, case_sensitivity: CaseSensitivity) -> bool {
    match case_sensitivity {
        CaseSensitivity::CaseSensitive => a == b,
        CaseSensitivity::AsciiCaseInsensitive => a.eq_ignore_ascii_case(b),
    }
}

impl<'a> selectors::Element for HostElement<'a> {
    type Impl = HostSelectorImpl;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.element)
    }

    fn parent_element(&self) -> Option<Self> {
        None
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let index = self.element.element_id().0.checked_sub(1)?;
        self.sibling(index)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.sibling(self.element.element_id().0 + 1)
    }

    fn first_element_child(&self) -> Option<Self> {
        None
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, local_name: &str) -> bool {
        self.element.tag.eq_ignore_ascii_case(local_name)
    }

    fn has_namespace(&self, ns: &str) -> bool {
        ns.is_empty()
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.element.tag.eq_ignore_ascii_case(&other.element.tag)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssString>,
        local_name: &CssString,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        if let NamespaceConstraint::Specific(url) = ns {
            if !url.is_empty() {
                return false;
            }
        }
        let Some(actual) = self.attribute_value(local_name.as_str()) else {
            return false;
        };
        match operation {
            AttrSelectorOperation::Exists => true,
            AttrSelectorOperation::WithValue {
                operator,
                case_sensitivity,
                value,
            } => operator.eval_str(&actual, value.as_str(), *case_sensitivity),
        }
    }

    fn match_non_ts_pseudo_class(
        &self,
        pseudo: &PseudoClass,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        match *pseudo {}
    }

    fn match_pseudo_element(
        &self,
        pseudo: &PseudoElement,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        match *pseudo {}
    }

    fn is_link(&self) -> bool {
        false
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssString, case_sensitivity: CaseSensitivity) -> bool {
        self.element
            .dom_id
            .as_deref()
            .is_some_and(|actual| eq_with_case(actual, id.as_str(), case_sensitivity))
    }

    fn has_class(&self, class: &CssString, case_sensitivity: CaseSensitivity) -> bool {
        self.element
            .classes
            .iter()
            .any(|c| eq_with_case(c, class.as_str(), case_sensitivity))
    }

    fn imported_part(&self, _name: &CssString) -> Option<CssString> {
        None
    }

    fn is_part(&self, _name: &CssString) -> bool {
        false
    }

    // the attached canvas is the only child a host element can have
    fn is_empty(&self) -> bool {
        self.element.canvas().is_none()
    }

    fn is_root(&self) -> bool {
        false
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn has_custom_state(&self, _name: &CssString) -> bool {
        false
    }

    fn add_element_unique_hashes(&self, _filter: &mut BloomFilter) -> bool {
        false
    }
}
