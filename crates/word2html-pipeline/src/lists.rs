//! Nested list reconstruction.
//!
//! Word stores list items as a flat run of paragraphs, each carrying its own
//! nesting level. The extractor preserves that shape as sibling elements with
//! a `list-bullet[-N]` / `list-number[-N]` class. This module turns every such
//! run back into properly nested `<ul>`/`<ol>`/`<li>` containers.
//!
//! The reconstruction is a single left-to-right pass over the run with an
//! explicit stack of open containers:
//!
//! 1. The stack starts with `(1, root)`, where the root container takes the
//!    kind of the first item.
//! 2. Before each item, entries deeper than the item are popped. The last
//!    entry is never popped.
//! 3. If the item is deeper than the top entry, it continues in the list
//!    that ends the top container's last `<li>`, or a new one is attached
//!    there. A jump of several levels still nests a single step.
//! 4. The item's content moves into a fresh `<li>` in the top container.
//!
//! A container's kind is fixed when it is created, so a kind switch at the
//! same level stays in the current container.

use word2html_common::warning::warn_once;
use word2html_dom::{AttributesMap, ElementRole, HtmlTree, ListKind, NodeId};

/// A flat list item: nesting level, kind, and the node holding its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemMarker {
    /// Nesting level, 1-based.
    pub level: u32,
    /// Ordered or unordered.
    pub kind: ListKind,
    /// The flat node; its children become the rebuilt `<li>`'s children.
    pub content: NodeId,
}

impl ListItemMarker {
    /// Create a marker, clamping the level to at least 1.
    #[must_use]
    pub fn new(level: u32, kind: ListKind, content: NodeId) -> Self {
        Self {
            level: level.max(1),
            kind,
            content,
        }
    }

    /// Read the marker of a flat list item node.
    ///
    /// Returns `None` if `id` is not a flat list item.
    #[must_use]
    pub fn from_node(tree: &HtmlTree, id: NodeId) -> Option<Self> {
        match tree.role(id)? {
            ElementRole::FlatListItem(marker) => Some(Self::new(marker.level, marker.kind, id)),
            _ => None,
        }
    }
}

/// An open list container on the reconstruction stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StackEntry {
    level: u32,
    container: NodeId,
}

/// Stack-based list builder.
///
/// Reusable across runs; each call to [`ListReconstructor::reconstruct`]
/// starts from an empty stack.
#[derive(Debug, Default)]
pub struct ListReconstructor {
    stack: Vec<StackEntry>,
    level_jumps: usize,
}

impl ListReconstructor {
    /// Create a reconstructor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of multi-level jumps flattened to a single step so far.
    #[must_use]
    pub const fn level_jumps(&self) -> usize {
        self.level_jumps
    }

    /// Build a nested list from `markers` and return its detached root
    /// container, or `None` if `markers` is empty.
    ///
    /// The children of each marker's content node are moved into the new
    /// `<li>` elements. The marker nodes themselves are left in place, empty;
    /// detaching them is the caller's business.
    pub fn reconstruct(&mut self, tree: &mut HtmlTree, markers: &[ListItemMarker]) -> Option<NodeId> {
        let first = markers.first()?;
        let root = create_list(tree, first.kind);

        self.stack.clear();
        self.stack.push(StackEntry {
            level: 1,
            container: root,
        });

        for marker in markers {
            let top = self.pop_deeper_than(marker.level);

            let container = if marker.level > top.level {
                if marker.level > top.level + 1 {
                    self.level_jumps += 1;
                    warn_once(
                        "list",
                        &format!(
                            "list level jumps from {} to {}, nesting one level",
                            top.level, marker.level
                        ),
                    );
                }
                let nested = nested_list_for(tree, top.container, marker.kind);
                self.stack.push(StackEntry {
                    level: marker.level,
                    container: nested,
                });
                nested
            } else {
                top.container
            };

            let li = tree.create_element("li", AttributesMap::new());
            tree.move_children(marker.content, li);
            tree.append_child(container, li);
        }

        self.stack.clear();
        Some(root)
    }

    /// Pop entries deeper than `level`, keeping the root entry, and return
    /// the new top.
    fn pop_deeper_than(&mut self, level: u32) -> StackEntry {
        while self.stack.len() > 1 && self.stack.last().is_some_and(|top| top.level > level) {
            let _ = self.stack.pop();
        }
        // The root entry is pushed before the loop and never popped.
        self.stack.last().copied().unwrap_or(StackEntry {
            level: 1,
            container: NodeId::ROOT,
        })
    }
}

/// Build a nested list from `markers` with a fresh [`ListReconstructor`].
pub fn reconstruct(tree: &mut HtmlTree, markers: &[ListItemMarker]) -> Option<NodeId> {
    ListReconstructor::new().reconstruct(tree, markers)
}

fn create_list(tree: &mut HtmlTree, kind: ListKind) -> NodeId {
    tree.create_element(kind.tag_name(), AttributesMap::new())
}

/// The list a deeper item continues in: the one ending the last `<li>` of
/// `container`, or a new one of `kind` attached there.
fn nested_list_for(tree: &mut HtmlTree, container: NodeId, kind: ListKind) -> NodeId {
    let host = match tree.last_child(container) {
        Some(li) if tree.role(li) == Some(ElementRole::ListItem) => li,
        _ => {
            // Empty container: the run starts deeper than level 1.
            let placeholder = tree.create_element("li", AttributesMap::new());
            tree.append_child(container, placeholder);
            placeholder
        }
    };

    let trailing_list = tree
        .last_child(host)
        .filter(|&last| tree.role(last).is_some_and(ElementRole::is_list));
    if let Some(list) = trailing_list {
        return list;
    }

    let nested = create_list(tree, kind);
    tree.append_child(host, nested);
    nested
}

/// A maximal run of sibling flat list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRun {
    /// Parent of every node in the run.
    pub parent: NodeId,
    /// The flat items, in document order.
    pub items: Vec<NodeId>,
    /// Whitespace-only text nodes between items, dropped on rebuild.
    pub separators: Vec<NodeId>,
}

/// Find every run of consecutive flat list items, in document order.
///
/// Whitespace-only text between two flat items does not break a run. Runs
/// are found under any parent, including table cells.
#[must_use]
pub fn collect_runs(tree: &HtmlTree) -> Vec<ListRun> {
    let mut runs = Vec::new();
    for parent in tree.iter_all() {
        let children = tree.children(parent);
        let mut current: Option<ListRun> = None;
        let mut pending = Vec::new();

        for &child in children {
            if ListItemMarker::from_node(tree, child).is_some() {
                let run = current.get_or_insert_with(|| ListRun {
                    parent,
                    items: Vec::new(),
                    separators: Vec::new(),
                });
                run.separators.append(&mut pending);
                run.items.push(child);
            } else if current.is_some() && tree.is_whitespace_text(child) {
                pending.push(child);
            } else {
                pending.clear();
                if let Some(run) = current.take() {
                    runs.push(run);
                }
            }
        }
        if let Some(run) = current {
            runs.push(run);
        }
    }
    runs
}

/// Replace every run of flat list items in the tree with a nested list.
///
/// Each rebuilt list takes the position of its run's first item. Returns the
/// number of lists built.
pub fn rebuild_lists(tree: &mut HtmlTree) -> usize {
    let mut reconstructor = ListReconstructor::new();
    let mut built = 0;

    // Later runs first, so a run nested inside a flat item is rebuilt before
    // that item's children are moved.
    for run in collect_runs(tree).into_iter().rev() {
        let markers: Vec<ListItemMarker> = run
            .items
            .iter()
            .filter_map(|&id| ListItemMarker::from_node(tree, id))
            .collect();
        let (Some(&anchor), Some(list)) = (
            run.items.first(),
            reconstructor.reconstruct(tree, &markers),
        ) else {
            continue;
        };

        tree.insert_before(run.parent, list, anchor);
        for &id in run.items.iter().chain(&run.separators) {
            tree.remove_child(run.parent, id);
        }
        built += 1;
    }
    built
}
