//! DOM helpers shared by the HTML sources.
//!
//! Flavor pages are flat runs of headings and paragraphs, so the main tool
//! here is [`partition_by_delimiter`]: walk an ordered child sequence and
//! start a new group at every delimiter element.

use scraper::{ElementRef, Html};

/// A delimiter element plus the siblings that follow it, up to (not
/// including) the next delimiter.
#[derive(Debug)]
pub struct Section<T> {
    pub heading: T,
    pub body: Vec<T>,
}

/// Splits `items` into sections that each start at a delimiter.
///
/// Items before the first delimiter belong to no section and are dropped.
pub fn partition_by_delimiter<T, I, F>(items: I, is_delimiter: F) -> Vec<Section<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> bool,
{
    let mut sections: Vec<Section<T>> = Vec::new();
    for item in items {
        if is_delimiter(&item) {
            sections.push(Section {
                heading: item,
                body: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.body.push(item);
        }
    }
    sections
}

/// Sections of `document` delimited by `<tag>` elements, in document order.
///
/// Every container that directly holds a `<tag>` has its element children
/// partitioned. Sections are then ordered by where their delimiter sits in
/// the document, so delimiters in nested containers interleave correctly.
pub fn tag_sections<'a>(document: &'a Html, tag: &str) -> Vec<Section<ElementRef<'a>>> {
    let mut delimiters = Vec::new();
    let mut containers: Vec<ElementRef<'a>> = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if !has_tag(&element, tag) {
            continue;
        }
        delimiters.push(element.id());
        let Some(parent) = element.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if !containers.iter().any(|c| c.id() == parent.id()) {
            containers.push(parent);
        }
    }

    let mut sections: Vec<Section<ElementRef<'a>>> = containers
        .into_iter()
        .flat_map(|container| {
            partition_by_delimiter(container.children().filter_map(ElementRef::wrap), |el| {
                has_tag(el, tag)
            })
        })
        .collect();
    sections.sort_by_key(|section| {
        delimiters
            .iter()
            .position(|id| *id == section.heading.id())
            .unwrap_or(usize::MAX)
    });
    sections
}

#[must_use]
pub fn has_tag(element: &ElementRef<'_>, tag: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(tag)
}

/// Text content with whitespace runs collapsed and the ends trimmed.
#[must_use]
pub fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

#[must_use]
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
