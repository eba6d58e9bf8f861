//! Character-level prefix tree that merges many path patterns into one regex.
//!
//! Every route terminal is emitted as an empty capture group `$()`; the
//! ordinal of the group that participates in a match identifies the route.
//! Segment parameters are emitted as `([^/]+)` once per tree node, so routes
//! sharing a prefix share the same group.

mod node;

use self::node::{Context, Emitter, Node, Token};

pub(crate) use self::node::PathError;

/// `(parameter name, capture slot)` pairs of one route.
///
/// Before [`Trie::compile`] the slot is a tree-local variable index; the
/// compiled [`Compiled::param_map`] translates it into a group ordinal.
pub(crate) type ParamMap = Vec<(Box<str>, usize)>;

#[derive(Debug)]
pub(crate) struct Compiled {
    /// Anchored composite pattern, `None` when no route was inserted.
    pub pattern: Option<String>,
    /// Group ordinal -> provisional route index. Sparse.
    pub index_map: Vec<Option<usize>>,
    /// Variable index -> group ordinal. Sparse.
    pub param_map: Vec<Option<usize>>,
}

#[derive(Debug, Default)]
pub(crate) struct Trie {
    ctx: Context,
    root: Node,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        path: &str,
        index: usize,
        check_only: bool,
    ) -> Result<ParamMap, PathError> {
        let tokens = tokenize(path);
        let mut params = ParamMap::new();
        self.root
            .insert(&tokens, index, &mut params, &mut self.ctx, check_only)?;
        Ok(params)
    }

    pub fn compile(&self) -> Compiled {
        let mut body = String::new();
        let mut emitter = Emitter::default();
        self.root.emit(&mut body, &mut emitter);

        let pattern = if body.is_empty() {
            None
        } else {
            Some(format!("^{}", body))
        };

        let mut param_map = emitter.param_map;
        param_map.resize(param_map.len().max(self.ctx.var_count), None);

        Compiled {
            pattern,
            index_map: emitter.index_map,
            param_map,
        }
    }
}

fn tokenize(path: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::with_capacity(path.len());
    let mut rest = path;

    while let Some(c) = rest.chars().next() {
        if c == ':' {
            let end = rest[1..].find('/').map_or(rest.len(), |i| i + 1);
            if end > 1 {
                tokens.push(Token::Param(&rest[1..end]));
                rest = &rest[end..];
                continue;
            }
        }
        if rest == "/*" {
            tokens.push(Token::TailStar);
            break;
        }
        tokens.push(if c == '*' { Token::Star } else { Token::Char(c) });
        rest = &rest[c.len_utf8()..];
    }

    tokens
}
