// SPDX-License-Identifier: MPL-2.0
//! In-memory element container.

use crate::application::port::Container;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    tag: String,
    identity: String,
    content: String,
}

/// Ordered list of tagged elements, printed as text by the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    elements: Vec<Element>,
}

impl MemoryContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered content of one element.
    #[must_use]
    pub fn content(&self, tag: &str, identity: &str) -> Option<&str> {
        self.find(tag, identity)
            .map(|index| self.elements[index].content.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All element contents in document order, one block per element.
    #[must_use]
    pub fn render(&self) -> String {
        self.elements
            .iter()
            .map(|element| element.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn find(&self, tag: &str, identity: &str) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.tag == tag && e.identity == identity)
    }
}

impl Container for MemoryContainer {
    fn contains(&self, tag: &str, identity: &str) -> bool {
        self.find(tag, identity).is_some()
    }

    fn append(&mut self, tag: &str, identity: &str) {
        self.elements.push(Element {
            tag: tag.to_string(),
            identity: identity.to_string(),
            content: String::new(),
        });
    }

    fn replace_content(&mut self, tag: &str, identity: &str, content: String) {
        if let Some(index) = self.find(tag, identity) {
            self.elements[index].content = content;
        }
    }

    fn remove(&mut self, tag: &str, identity: &str) -> bool {
        match self.find(tag, identity) {
            Some(index) => {
                self.elements.remove(index);
                true
            }
            None => false,
        }
    }

    fn identities(&self, tag: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.identity.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_keep_document_order() {
        let mut container = MemoryContainer::new();
        container.append("card", "b");
        container.append("card", "a");
        container.append("other", "a");

        assert_eq!(container.identities("card"), vec!["b", "a"]);
        assert!(container.contains("other", "a"));
        assert!(!container.contains("other", "b"));
    }

    #[test]
    fn replace_on_missing_element_is_ignored() {
        let mut container = MemoryContainer::new();
        container.replace_content("card", "x", "text".into());
        assert!(container.is_empty());
    }

    #[test]
    fn render_joins_contents() {
        let mut container = MemoryContainer::new();
        container.append("card", "a");
        container.replace_content("card", "a", "first".into());
        container.append("card", "b");
        container.replace_content("card", "b", "second".into());

        assert_eq!(container.render(), "first\nsecond");
        assert!(container.remove("card", "a"));
        assert!(!container.remove("card", "a"));
        assert_eq!(container.content("card", "b"), Some("second"));
    }
}
