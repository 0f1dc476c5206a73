// SPDX-License-Identifier: PMPL-1.0-or-later
//! Element accessor contract and the scraper-backed HTML implementation.
//!
//! Rules only ever see an element through the [`Element`] trait, so any
//! DOM or parser can host them. [`HtmlElement`] is the owned implementation
//! used by the scanner and by tests; [`Document`] parses a page into a flat,
//! document-ordered list of them.

use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashMap};

/// The view of one markup node that rules are allowed to inspect and mutate.
///
/// Attribute names are case-insensitive, as in HTML.
pub trait Element {
    /// Lower-cased tag name
    fn tag_name(&self) -> &str;

    fn has_attribute(&self, name: &str) -> bool;

    fn get_attribute(&self, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, name: &str, value: &str);
}

/// An owned element with its attributes and source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    line: Option<usize>,
}

impl HtmlElement {
    /// Create an element with no attributes
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            line: None,
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Build from a parsed scraper element
    pub fn from_element_ref(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let mut html_element = HtmlElement::new(value.name());
        for (name, attr) in value.attrs() {
            html_element.set_attribute(name, attr);
        }
        html_element
    }

    /// Estimated 1-indexed source line, if known
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// All attributes, sorted by name
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the opening tag, e.g. `<img alt="x" src="a.png">`
    pub fn open_tag(&self) -> String {
        let attrs: String = self
            .attributes
            .iter()
            .map(|(k, v)| format!(" {}=\"{}\"", k, v.replace('"', "&quot;")))
            .collect();
        format!("<{}{}>", self.tag, attrs)
    }
}

impl Element for HtmlElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_ascii_lowercase())
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
    }
}

/// A parsed HTML page as a flat list of elements in document order
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<HtmlElement>,
}

impl Document {
    /// Parse an HTML document. Parsing is lenient and never fails.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let selector = Selector::parse("*").expect("valid selector");
        let mut seen: HashMap<String, usize> = HashMap::new();

        let elements = html
            .select(&selector)
            .map(|element_ref| {
                let mut element = HtmlElement::from_element_ref(element_ref);
                let nth = seen.entry(element.tag.clone()).or_insert(0);
                element.line = estimate_line(source, &element.tag, *nth);
                *nth += 1;
                element
            })
            .collect();

        Self { elements }
    }

    /// Build a document from already-constructed elements
    pub fn from_elements(elements: Vec<HtmlElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[HtmlElement] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&HtmlElement> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut HtmlElement> {
        self.elements.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Estimate the line of the `occurrence`-th `<tag` in the source.
///
/// Returns `None` when the source has fewer occurrences, which is the case
/// for elements the parser inserts implicitly (e.g. a missing `<head>`).
fn estimate_line(content: &str, tag: &str, occurrence: usize) -> Option<usize> {
    let needle = format!("<{}", tag);
    let mut count = 0;
    for (line_num, line) in content.lines().enumerate() {
        let lower = line.to_ascii_lowercase();
        let mut search_from = 0;
        while let Some(pos) = lower[search_from..].find(&needle) {
            let end = search_from + pos + needle.len();
            let boundary = lower[end..]
                .chars()
                .next()
                .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '-'));
            if boundary {
                if count == occurrence {
                    return Some(line_num + 1);
                }
                count += 1;
            }
            search_from = end;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let mut elem = HtmlElement::new("IMG").with_attribute("ALT", "Logo");
        assert_eq!(elem.tag_name(), "img");
        assert!(elem.has_attribute("alt"));
        assert_eq!(elem.get_attribute("Alt"), Some("Logo"));

        elem.set_attribute("alt", "Company logo");
        assert_eq!(elem.get_attribute("ALT"), Some("Company logo"));
        assert_eq!(elem.attributes().count(), 1);
    }

    #[test]
    fn test_open_tag_escapes_quotes() {
        let elem = HtmlElement::new("img")
            .with_attribute("src", "a.png")
            .with_attribute("alt", "say \"hi\"");
        assert_eq!(
            elem.open_tag(),
            "<img alt=\"say &quot;hi&quot;\" src=\"a.png\">"
        );
    }

    #[test]
    fn test_parse_document_order_and_lines() {
        let html = "<html lang=\"en\">\n<body>\n<p>Intro</p>\n<img src=\"a.png\" alt=\"A\">\n<img src=\"b.png\">\n</body>\n</html>";
        let doc = Document::parse(html);
        let tags: Vec<&str> = doc.elements().iter().map(|e| e.tag_name()).collect();
        assert_eq!(tags, vec!["html", "head", "body", "p", "img", "img"]);

        let imgs: Vec<&HtmlElement> = doc
            .elements()
            .iter()
            .filter(|e| e.tag_name() == "img")
            .collect();
        assert_eq!(imgs[0].line(), Some(4));
        assert_eq!(imgs[1].line(), Some(5));
        assert_eq!(imgs[1].get_attribute("src"), Some("b.png"));

        // <head> was never written in the source
        assert_eq!(doc.get(1).and_then(|e| e.line()), None);
    }

    #[test]
    fn test_estimate_line_respects_tag_boundaries() {
        let html = "<table>\n<thead>\n<tr><th>Name</th></tr>\n</thead>\n</table>";
        assert_eq!(estimate_line(html, "th", 0), Some(3));
        assert_eq!(estimate_line(html, "thead", 0), Some(2));
        assert_eq!(estimate_line(html, "th", 1), None);
    }

    #[test]
    fn test_document_mutation() {
        let mut doc = Document::parse("<img src=\"a.png\">");
        let index = doc
            .elements()
            .iter()
            .position(|e| e.tag_name() == "img")
            .expect("img element");
        doc.get_mut(index)
            .expect("img element")
            .set_attribute("alt", "A");
        assert_eq!(doc.get(index).and_then(|e| e.get_attribute("alt")), Some("A"));
    }
}
