//! Depth-first walk over a page's fields.
//!
//! The walk uses an explicit work stack, so arbitrarily deep (or hostile)
//! form data cannot overflow the call stack. Containers nested at or below
//! the configured depth limit are reported as truncated and not entered.

use estimate_types::{FormDataBag, FormValue};

/// Label given to every list element.
pub const LIST_ITEM_LABEL: &str = "Item";

/// One step of the walk, in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit<'a> {
    /// The text printed before the value: a field name, or `Item`.
    pub label: &'a str,
    /// Location of the value within the page, e.g. `Gutters[1].Photo`.
    pub path: String,
    pub depth: usize,
    pub kind: VisitKind<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisitKind<'a> {
    /// A list or nested bag; its children follow.
    Container(&'a FormValue),
    /// A container past the depth limit. Its children are not visited.
    Truncated,
    Leaf(&'a FormValue),
}

struct Frame<'a> {
    label: &'a str,
    path: String,
    value: &'a FormValue,
    depth: usize,
}

/// Pre-order iterator over a page value.
pub struct Traversal<'a> {
    stack: Vec<Frame<'a>>,
    max_depth: usize,
}

impl<'a> Traversal<'a> {
    /// Walks `page`. A bag yields its fields; any other value is yielded
    /// as a single item labelled `page_key`.
    pub fn new(page_key: &'a str, page: &'a FormValue, max_depth: usize) -> Self {
        let mut traversal = Self {
            stack: Vec::new(),
            max_depth,
        };
        match page {
            FormValue::Bag(bag) => traversal.push_fields(bag, None, 0),
            other => traversal.stack.push(Frame {
                label: page_key,
                path: page_key.to_string(),
                value: other,
                depth: 0,
            }),
        }
        traversal
    }

    fn push_fields(&mut self, bag: &'a FormDataBag, parent: Option<&str>, depth: usize) {
        // Reversed so the first field is popped first.
        for (key, value) in bag.iter().rev() {
            let path = match parent {
                Some(parent) => format!("{}.{}", parent, key),
                None => key.clone(),
            };
            self.stack.push(Frame {
                label: key,
                path,
                value,
                depth,
            });
        }
    }

    fn push_items(&mut self, items: &'a [FormValue], parent: &str, depth: usize) {
        for (index, value) in items.iter().enumerate().rev() {
            self.stack.push(Frame {
                label: LIST_ITEM_LABEL,
                path: format!("{}[{}]", parent, index),
                value,
                depth,
            });
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let Frame {
            label,
            path,
            value,
            depth,
        } = self.stack.pop()?;

        let kind = match value {
            FormValue::List(_) | FormValue::Bag(_) if depth >= self.max_depth => {
                log::warn!(
                    "Field '{}' is nested {} levels deep; not descending further",
                    path,
                    depth
                );
                VisitKind::Truncated
            }
            FormValue::List(items) => {
                self.push_items(items, &path, depth + 1);
                VisitKind::Container(value)
            }
            FormValue::Bag(bag) => {
                self.push_fields(bag, Some(&path), depth + 1);
                VisitKind::Container(value)
            }
            leaf => VisitKind::Leaf(leaf),
        };

        Some(Visit {
            label,
            path,
            depth,
            kind,
        })
    }
}
