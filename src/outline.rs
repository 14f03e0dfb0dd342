//! Indented outline input: one node label per line, children indented under
//! their parent, `#` starts a comment line.
//!
//! ```text
//! # org chart
//! ceo
//!   cto
//!     platform
//!     apps
//!   cfo
//! ```

use crate::tree::ChildMap;

const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    #[error("Empty outline")]
    Empty,
    #[error("Line {line}: second top-level node {label:?}, only one root is allowed")]
    MultipleRoots { line: usize, label: String },
    #[error("Line {line}: indentation does not match any enclosing level")]
    InconsistentIndent { line: usize },
    #[error("Line {line}: duplicate node {label:?}")]
    DuplicateNode { line: usize, label: String },
}

#[derive(Debug, Clone)]
pub struct Outline {
    pub root: String,
    pub tree: ChildMap<String>,
    /// Labels in source order, which is also pre-order.
    pub labels: Vec<String>,
}

pub struct OutlineParser<'a> {
    source: &'a str,
}

impl<'a> OutlineParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn parse(&self) -> Result<Outline, OutlineError> {
        let mut tree = ChildMap::new();
        let mut labels: Vec<String> = Vec::new();
        let mut root: Option<String> = None;
        // (indent, label) of the current node and its ancestors
        let mut stack: Vec<(usize, String)> = Vec::new();

        for (i, raw) in self.source.lines().enumerate() {
            let line = i + 1;
            let label = raw.trim();
            if label.is_empty() || label.starts_with('#') {
                continue;
            }
            let indent = indentation(raw);

            if tree.contains(&label.to_string()) {
                return Err(OutlineError::DuplicateNode {
                    line,
                    label: label.to_string(),
                });
            }

            if root.is_none() {
                tree.add_node(label.to_string());
                root = Some(label.to_string());
                stack.push((indent, label.to_string()));
                labels.push(label.to_string());
                continue;
            }

            let mut sibling_indent = None;
            while let Some((top, _)) = stack.last() {
                if *top < indent {
                    break;
                }
                sibling_indent = Some(*top);
                stack.pop();
            }
            let Some((_, parent)) = stack.last() else {
                return Err(OutlineError::MultipleRoots {
                    line,
                    label: label.to_string(),
                });
            };
            if sibling_indent.is_some_and(|s| s != indent) {
                return Err(OutlineError::InconsistentIndent { line });
            }

            tree.push_child(parent.clone(), label.to_string());
            stack.push((indent, label.to_string()));
            labels.push(label.to_string());
        }

        let root = root.ok_or(OutlineError::Empty)?;
        Ok(Outline { root, tree, labels })
    }
}

/// Leading whitespace in columns, tabs counting as [`TAB_WIDTH`].
fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}
