use super::ParamMap;

use std::collections::btree_map::{BTreeMap, Entry};

const LABEL: &str = "[^/]+";
const TAIL_WILDCARD: &str = "(?:|/.*)";
const ONLY_WILDCARD: &str = ".*";

/// Raised when a path can not be merged into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PathError;

/// Variant order is emission order: literals are tried first, wildcards last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Key {
    Literal(char),
    Label,
    TailWildcard,
    OnlyWildcard,
}

impl Key {
    fn is_wildcard(self) -> bool {
        matches!(self, Self::TailWildcard | Self::OnlyWildcard)
    }

    fn write(self, out: &mut String) {
        match self {
            Self::Literal(c) => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            Self::Label => out.push_str(LABEL),
            Self::TailWildcard => out.push_str(TAIL_WILDCARD),
            Self::OnlyWildcard => out.push_str(ONLY_WILDCARD),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'p> {
    Char(char),
    Param(&'p str),
    Star,
    TailStar,
}

impl<'p> Token<'p> {
    fn key(self, last: bool) -> (Key, Option<&'p str>) {
        match self {
            Self::Char(c) => (Key::Literal(c), None),
            Self::Param(name) => (Key::Label, Some(name)),
            Self::Star if last => (Key::OnlyWildcard, None),
            Self::Star => (Key::Label, None),
            Self::TailStar => (Key::TailWildcard, None),
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct Context {
    pub var_count: usize,
}

impl Context {
    fn next_var(&mut self) -> usize {
        let v = self.var_count;
        self.var_count += 1;
        v
    }
}

#[derive(Debug, Default)]
pub(super) struct Emitter {
    pub captures: usize,
    pub index_map: Vec<Option<usize>>,
    pub param_map: Vec<Option<usize>>,
}

impl Emitter {
    fn route(&mut self, index: usize) {
        self.captures += 1;
        if self.index_map.len() <= self.captures {
            self.index_map.resize(self.captures + 1, None);
        }
        self.index_map[self.captures] = Some(index);
    }

    fn param(&mut self, var: usize) {
        self.captures += 1;
        if self.param_map.len() <= var {
            self.param_map.resize(var + 1, None);
        }
        self.param_map[var] = Some(self.captures);
    }
}

#[derive(Debug, Default)]
pub(super) struct Node {
    index: Option<usize>,
    var_index: Option<usize>,
    children: BTreeMap<Key, Node>,
}

impl Node {
    pub fn insert(
        &mut self,
        tokens: &[Token<'_>],
        index: usize,
        params: &mut ParamMap,
        ctx: &mut Context,
        check_only: bool,
    ) -> Result<(), PathError> {
        let mut node = self;
        let mut rest = tokens;

        while let Some((&token, tail)) = rest.split_first() {
            let (key, name) = token.key(tail.is_empty());
            let is_pattern = !matches!(key, Key::Literal(_));

            if !node.children.contains_key(&key) {
                let conflict = if is_pattern {
                    node.children.keys().any(|k| !k.is_wildcard())
                } else {
                    node.children.contains_key(&Key::Label)
                };
                if conflict {
                    return Err(PathError);
                }
                if check_only {
                    return Ok(());
                }
            }

            let child = match node.children.entry(key) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(Node::default()),
            };

            if let (Some(name), false) = (name, check_only) {
                // an anonymous `*` segment may have created this node without a group
                let var = match child.var_index {
                    Some(v) => v,
                    None => {
                        let v = ctx.next_var();
                        child.var_index = Some(v);
                        v
                    }
                };
                params.push((name.into(), var));
            }

            node = child;
            rest = tail;
        }

        if node.index.is_some() {
            return Err(PathError);
        }
        if !check_only {
            node.index = Some(index);
        }
        Ok(())
    }

    /// Writes the subtree as regex alternatives, in key order.
    ///
    /// Runs on an explicit work stack: the tree holds one node per character,
    /// so its depth follows the length of the longest route.
    pub fn emit(&self, out: &mut String, emitter: &mut Emitter) {
        let mut stack = vec![Step::Node(self)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Node(node) => {
                    let alternatives = node.children.len() + usize::from(node.index.is_some());
                    if alternatives == 0 {
                        continue;
                    }
                    if alternatives > 1 {
                        out.push_str("(?:");
                        stack.push(Step::Close);
                    }

                    let mut first = true;
                    if let Some(index) = node.index {
                        emitter.route(index);
                        out.push_str("$()");
                        first = false;
                    }

                    // reversed, so edges pop in key order
                    for (i, (&key, child)) in node.children.iter().enumerate().rev() {
                        stack.push(Step::Edge {
                            key,
                            child,
                            first: first && i == 0,
                        });
                    }
                }
                Step::Edge { key, child, first } => {
                    if !first {
                        out.push('|');
                    }
                    match child.var_index {
                        Some(var) => {
                            emitter.param(var);
                            out.push('(');
                            key.write(out);
                            out.push(')');
                        }
                        None => key.write(out),
                    }
                    stack.push(Step::Node(child));
                }
                Step::Close => out.push(')'),
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

enum Step<'n> {
    Node(&'n Node),
    Edge {
        key: Key,
        child: &'n Node,
        first: bool,
    },
    Close,
}
