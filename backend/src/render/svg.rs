//! Minimal SVG element tree and serializer.

use std::fmt::{self, Display, Write};

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An SVG element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set a coordinate attribute with one decimal place.
    pub fn coord(self, name: &'static str, value: f64) -> Self {
        self.attr(name, format!("{:.1}", value))
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Attach a `<title>` child, which browsers show as a native hover tooltip.
    pub fn title(self, text: impl Into<String>) -> Self {
        self.child(Element::new("title").text(text))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Number of elements in this subtree, including `self`.
    pub fn element_count(&self) -> usize {
        1 + self
            .child_elements()
            .map(Element::element_count)
            .sum::<usize>()
    }

    /// Depth-first search for elements matching `predicate`.
    pub fn find_all<P>(&self, predicate: P) -> Vec<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.collect_matching(&predicate, &mut found);
        found
    }

    fn collect_matching<'a, P>(&'a self, predicate: &P, found: &mut Vec<&'a Element>)
    where
        P: Fn(&Element) -> bool,
    {
        if predicate(self) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_matching(predicate, found);
        }
    }

    /// Concatenated text content of direct text children.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn write_into(&self, out: &mut String, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(out, "{}<{}", indent, self.tag)?;
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, escape(value))?;
        }
        if self.children.is_empty() {
            return writeln!(out, "/>");
        }
        let only_text = self.children.iter().all(|n| matches!(n, Node::Text(_)));
        if only_text {
            writeln!(
                out,
                ">{}</{}>",
                escape(&self.text_content()),
                self.tag
            )?;
            return Ok(());
        }
        writeln!(out, ">")?;
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_into(out, depth + 1)?,
                Node::Text(t) => writeln!(out, "{}  {}", indent, escape(t))?,
            }
        }
        writeln!(out, "{}</{}>", indent, self.tag)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_into(&mut out, 0)?;
        f.write_str(&out)
    }
}

/// Escape text for use in XML attribute values and text nodes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let svg = Element::new("svg")
            .attr("id", "chart")
            .child(Element::new("rect").coord("x", 1.5).attr("class", "box"))
            .child(Element::new("text").text("Q1 < Q3 & more"));

        let out = svg.to_string();
        assert!(out.starts_with("<svg id=\"chart\">"));
        assert!(out.contains("<rect x=\"1.5\" class=\"box\"/>"));
        assert!(out.contains("Q1 &lt; Q3 &amp; more"));
        assert!(out.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_attr_replaces_existing() {
        let el = Element::new("g").attr("class", "a").attr("class", "b");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.get_attr("class"), Some("b"));
    }

    #[test]
    fn test_element_count_and_find() {
        let tree = Element::new("svg")
            .child(
                Element::new("g")
                    .attr("class", "boxes")
                    .child(Element::new("rect").attr("class", "box").title("tip")),
            )
            .child(Element::new("circle").attr("class", "outlier point"));

        // svg, g, rect, title, circle
        assert_eq!(tree.element_count(), 5);
        assert_eq!(tree.find_all(|e| e.has_class("outlier")).len(), 1);
        assert_eq!(tree.find_all(|e| e.tag == "title")[0].text_content(), "tip");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape("a\"b'c"), "a&quot;b&#39;c");
    }
}
