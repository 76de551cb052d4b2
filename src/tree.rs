use crate::segment::{Kind, Segment};
use crate::{InvalidPath, Strategy};

use std::fmt;
use std::mem;
use std::ops::ControlFlow;

/// The index of a node in the tree's arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct NodeId(usize);

// The root represents the empty prefix and is never a match target itself.
const ROOT: NodeId = NodeId(0);

/// A segment position shared by every pattern passing through it.
pub(crate) struct Node<T> {
    key: String,
    kind: Kind,
    priority: i32,
    // Set for terminal nodes, and eagerly for wildcards, which end matching
    // wherever they appear in a pattern.
    pattern: String,
    terminal: bool,
    // Registrations ending at or below this node.
    live: usize,
    // Sorted by `(priority, kind)`; equal entries keep insertion order.
    children: Vec<NodeId>,
    payloads: Vec<T>,
}

impl<T> Node<T> {
    fn new(segment: Segment<'_>, priority: i32) -> Self {
        Node {
            key: segment.key.to_owned(),
            kind: segment.kind,
            priority,
            pattern: String::new(),
            terminal: false,
            live: 0,
            children: Vec::new(),
            payloads: Vec::new(),
        }
    }

    /// The registered pattern that ends at this node.
    pub(crate) fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn payloads(&self) -> &[T] {
        &self.payloads
    }

    fn rank(&self) -> (i32, Kind) {
        (self.priority, self.kind)
    }

    // A wildcard accepts the rest of the input as long as any registration
    // passes through it.
    fn absorbs(&self) -> bool {
        self.kind == Kind::Wildcard && self.live > 0
    }
}

/// Receives the events of a [`Tree::search`].
///
/// Returning `Break` from `accept` ends the search; captures bound on the way
/// to the accepting node are left bound.
pub(crate) trait Visitor<'t, 'p, T> {
    /// Binds a query segment to the parameter `name` before descending.
    fn bind(&mut self, name: &'t str, value: &'p str);

    /// Undoes the most recent `bind` when backtracking.
    fn unbind(&mut self);

    /// Called for every node that completes a match.
    fn accept(&mut self, node: &'t Node<T>) -> ControlFlow<()>;
}

/// An arena-allocated segment trie.
pub(crate) struct Tree<T> {
    nodes: Vec<Node<T>>,
    len: usize,
}

impl<T> Tree<T> {
    pub(crate) fn new() -> Self {
        let root = Node::new(
            Segment {
                key: "",
                kind: Kind::Literal,
            },
            0,
        );

        Tree {
            nodes: vec![root],
            len: 0,
        }
    }

    /// The number of live registered patterns.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    // Siblings never share a key. A segment whose key is already taken
    // reuses that child, whatever role the child was created with.
    fn child(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).key == key)
    }

    // The pattern of the first registration below `id`, in search order.
    fn live_pattern(&self, id: NodeId) -> Option<&str> {
        self.node(id).children.iter().find_map(|&child| {
            let node = self.node(child);
            if node.terminal {
                Some(node.pattern.as_str())
            } else if node.live > 0 {
                self.live_pattern(child)
            } else {
                None
            }
        })
    }

    fn add_child(
        &mut self,
        parent: NodeId,
        segment: Segment<'_>,
        priority: i32,
        pattern: &str,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());

        let mut node = Node::new(segment, priority);
        if node.kind == Kind::Wildcard {
            node.pattern = pattern.to_owned();
        }

        // Insert after every sibling ranked equal or lower, which is the
        // position a stable sort would give a newly appended child.
        let rank = node.rank();
        let at = self
            .node(parent)
            .children
            .partition_point(|&child| self.node(child).rank() <= rank);

        self.nodes.push(node);
        self.node_mut(parent).children.insert(at, id);
        id
    }

    /// Registers `pattern`, returning the number of nodes created.
    ///
    /// The pattern is split before the tree is touched, so a rejected pattern
    /// leaves no trace.
    pub(crate) fn insert<S: Strategy + ?Sized>(
        &mut self,
        strategy: &S,
        pattern: &str,
        priority: i32,
        payload: Option<T>,
    ) -> Result<usize, InvalidPath> {
        let segments = strategy.split(pattern)?;
        if segments.is_empty() {
            return Err(InvalidPath::new(pattern));
        }

        let mut path = Vec::with_capacity(segments.len());
        let mut current = ROOT;
        let mut created = 0;

        for segment in segments {
            let segment = Segment::classify(strategy, segment);

            // Existing nodes keep their priority and role.
            current = match self.child(current, segment.key) {
                Some(child) => child,
                None => {
                    created += 1;
                    self.add_child(current, segment, priority, pattern)
                }
            };

            // A wildcard left without registrations takes the next one.
            let node = self.node_mut(current);
            if node.kind == Kind::Wildcard && node.pattern.is_empty() {
                node.pattern = pattern.to_owned();
            }

            path.push(current);
        }

        let node = self.node_mut(current);
        let registered = !node.terminal;
        node.terminal = true;
        node.pattern = pattern.to_owned();
        node.payloads.extend(payload);

        if registered {
            for &id in &path {
                self.node_mut(id).live += 1;
            }
            self.len += 1;
        }

        Ok(created)
    }

    /// Unregisters `pattern`, returning its payloads.
    ///
    /// Nodes are never pruned; a node without a registration is simply no
    /// longer accepted by the search. Wildcards on the way that other
    /// registrations still pass through keep absorbing, and report the first
    /// of those registrations.
    pub(crate) fn delete<S: Strategy + ?Sized>(
        &mut self,
        strategy: &S,
        pattern: &str,
    ) -> Option<Vec<T>> {
        let segments = strategy.split(pattern).ok()?;

        let mut path = Vec::with_capacity(segments.len());
        let mut current = ROOT;
        for segment in segments {
            current = self.child(current, Segment::classify(strategy, segment).key)?;
            path.push(current);
        }

        let node = self.node_mut(current);
        if !node.terminal {
            return None;
        }

        node.terminal = false;
        node.pattern.clear();
        let payloads = mem::take(&mut node.payloads);

        for &id in &path {
            self.node_mut(id).live -= 1;
        }

        for &id in &path {
            let node = self.node(id);
            if node.kind != Kind::Wildcard || node.terminal {
                continue;
            }

            let pattern = self.live_pattern(id).unwrap_or_default().to_owned();
            self.node_mut(id).pattern = pattern;
        }

        self.len -= 1;
        Some(payloads)
    }

    /// Depth-first backtracking search for `segments`.
    ///
    /// Children are tried in their stored order. A child whose key equals the
    /// segment is entered without binding anything, whatever its role.
    /// Otherwise a parameter child binds the segment and is entered, and a
    /// wildcard child accepts immediately, absorbing the remaining input. A
    /// wildcard entered by its key still absorbs if nothing below it matched
    /// first. Once every segment is consumed, the current node accepts if it
    /// is terminal, followed by any wildcard children, which then absorb
    /// nothing. An empty query matches nothing.
    pub(crate) fn search<'t, 'p, V>(
        &'t self,
        segments: &[&'p str],
        visitor: &mut V,
    ) -> ControlFlow<()>
    where
        V: Visitor<'t, 'p, T>,
    {
        if segments.is_empty() {
            return ControlFlow::Continue(());
        }

        self.visit(ROOT, segments, visitor)
    }

    fn visit<'t, 'p, V>(
        &'t self,
        id: NodeId,
        rest: &[&'p str],
        visitor: &mut V,
    ) -> ControlFlow<()>
    where
        V: Visitor<'t, 'p, T>,
    {
        let node = self.node(id);

        let Some((&segment, tail)) = rest.split_first() else {
            if node.terminal {
                visitor.accept(node)?;
            }

            for &child in &node.children {
                let child = self.node(child);
                if child.absorbs() {
                    visitor.accept(child)?;
                }
            }

            return ControlFlow::Continue(());
        };

        for &child_id in &node.children {
            let child = self.node(child_id);

            if child.key == segment {
                if child.kind != Kind::Wildcard {
                    self.visit(child_id, tail, visitor)?;
                    continue;
                }

                if !tail.is_empty() {
                    self.visit(child_id, tail, visitor)?;
                }
            }

            match child.kind {
                Kind::Literal => {}
                Kind::Param => {
                    visitor.bind(&child.key, segment);
                    self.visit(child_id, tail, visitor)?;
                    visitor.unbind();
                }
                Kind::Wildcard => {
                    if child.absorbs() {
                        visitor.accept(child)?;
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = self.node(id);

        let mut flags = String::new();
        match node.kind {
            Kind::Literal => {}
            Kind::Param => flags.push_str("[param]"),
            Kind::Wildcard => flags.push_str("[wildcard]"),
        }
        if node.terminal {
            flags.push_str("[end]");
        }

        writeln!(
            f,
            "{:indent$}- {}: pattern={:?}, flags={}, priority={}, payloads={}",
            "",
            node.key,
            node.pattern,
            flags,
            node.priority,
            node.payloads.len(),
            indent = depth * 2,
        )?;

        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }

        Ok(())
    }
}

/// Dumps the tree, one node per line, siblings in search order.
impl<T> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &child in &self.node(ROOT).children {
            self.fmt_node(f, child, 0)?;
        }

        Ok(())
    }
}
