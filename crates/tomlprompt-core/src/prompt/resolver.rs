//! Tree resolver: walks selector paths through a document
//!
//! Each path is consumed one segment at a time from a starting node. Literal
//! segments descend, `?` descends into a random child, and `??`, `*` and `**`
//! fan out into fresh path lists resolved recursively against the current
//! node and prefix. A path that reaches a leaf yields its rendered text,
//! subject to the exclusion set.

use super::context::LoadedKeys;
use super::keys::Segment;
use super::sanitize::{select_dynamic_choice, strip_comments};
use super::vars::expand_variables;
use crate::document::{Node, enumerable_keys, selectable_paths};
use crate::error::{Result, TomlPromptError};
use rand::Rng;
use rand::seq::SliceRandom;
use std::borrow::Cow;
use toml::{Table, Value};

/// How a key string is split into path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeySplit {
    /// Split on `.` and honour wildcard segments
    Dotted,
    /// Use the whole key as a single literal segment
    Exact,
}

/// Resolves key paths against one exclusion set and random source
pub(crate) struct TreeResolver<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    loaded: &'r mut LoadedKeys,
    globals: Option<&'r Table>,
}

impl<'r, R: Rng + ?Sized> TreeResolver<'r, R> {
    pub(crate) fn new(rng: &'r mut R, loaded: &'r mut LoadedKeys, globals: Option<&'r Table>) -> Self {
        Self {
            rng,
            loaded,
            globals,
        }
    }

    /// Resolve every key below `node`, in order
    pub(crate) fn collect_prompt(
        &mut self,
        node: &Value,
        keys: &[String],
        prefix: &[String],
        split: KeySplit,
    ) -> Result<Vec<String>> {
        let mut output = Vec::new();
        for key in keys {
            self.resolve_key(node, key, prefix, split, &mut output)?;
        }
        Ok(output)
    }

    fn resolve_key(
        &mut self,
        root: &Value,
        key: &str,
        init_prefix: &[String],
        split: KeySplit,
        output: &mut Vec<String>,
    ) -> Result<()> {
        let parts: Vec<&str> = match split {
            KeySplit::Dotted => key.split('.').collect(),
            KeySplit::Exact => vec![key],
        };

        let mut current = root;
        let mut prefix = init_prefix.to_vec();

        for (index, &part) in parts.iter().enumerate() {
            let rest = &parts[index + 1..];
            let segment = match split {
                KeySplit::Dotted => Segment::parse(part),
                KeySplit::Exact => Segment::Key(part),
            };

            if segment.is_terminal_only() && !rest.is_empty() {
                return Err(TomlPromptError::NonTerminalWildcard {
                    segment: part.to_string(),
                    selector: key.to_string(),
                });
            }

            let child: Cow<'_, str> = match segment {
                Segment::Key(name) => Cow::Borrowed(name),
                Segment::RandomKey => Cow::Owned(self.random_key(current, &prefix)?),
                Segment::RandomLeaf => {
                    let keys = self.random_leaf_chain(current, &prefix)?;
                    output.extend(self.collect_prompt(current, &keys, &prefix, KeySplit::Dotted)?);
                    return Ok(());
                }
                Segment::AllKeys => {
                    let keys: Vec<String> = enumerable_keys(current)
                        .into_iter()
                        .map(|name| {
                            std::iter::once(name)
                                .chain(rest.iter().copied())
                                .collect::<Vec<_>>()
                                .join(".")
                        })
                        .collect();
                    output.extend(self.collect_prompt(current, &keys, &prefix, KeySplit::Dotted)?);
                    return Ok(());
                }
                Segment::AllLeaves => {
                    let keys = selectable_paths(current).all();
                    output.extend(self.collect_prompt(current, &keys, &prefix, KeySplit::Dotted)?);
                    return Ok(());
                }
            };

            match current.as_table().and_then(|table| table.get(child.as_ref())) {
                Some(next) => {
                    current = next;
                    prefix.push(child.into_owned());
                }
                None => {
                    tracing::warn!("Key not found: {}", join_path(&prefix, &child));
                    return Ok(());
                }
            }
        }

        self.emit(current, &prefix, output);
        Ok(())
    }

    /// Apply the exclusion rules to the node a path ended on
    fn emit(&mut self, node: &Value, prefix: &[String], output: &mut Vec<String>) {
        let node = Node::classify(node);
        let Some(template) = node.template() else {
            return;
        };

        let path = prefix.join(".");
        if !self.loaded.contains(&path) {
            output.push(self.render(&node, template));
            tracing::info!("Load Prompt: {}", path);
            self.loaded.insert(path);
        } else if node.is_atomic() {
            output.push(self.render(&node, template));
            tracing::info!("Load Prompt (Duplicated): {}", path);
        }
    }

    /// Strip comments, expand variables, then resolve `{a|b}` groups
    fn render(&mut self, node: &Node<'_>, template: &str) -> String {
        let text = strip_comments(template);
        let text = expand_variables(&text, node.local_vars(), self.globals, &mut *self.rng);
        select_dynamic_choice(&text, &mut *self.rng)
    }

    fn random_key(&mut self, node: &Value, prefix: &[String]) -> Result<String> {
        enumerable_keys(node)
            .choose(&mut *self.rng)
            .map(|key| key.to_string())
            .ok_or_else(|| TomlPromptError::EmptyChoice {
                path: display_path(prefix),
            })
    }

    /// Pick one leaf below `node`; return its templated ancestors and itself
    fn random_leaf_chain(&mut self, node: &Value, prefix: &[String]) -> Result<Vec<String>> {
        let paths = selectable_paths(node);
        let leaf = paths
            .leaves
            .choose(&mut *self.rng)
            .ok_or_else(|| TomlPromptError::EmptyChoice {
                path: display_path(prefix),
            })?;
        Ok(paths.chain_to(leaf))
    }
}

fn join_path(prefix: &[String], key: &str) -> String {
    prefix
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(key))
        .collect::<Vec<_>>()
        .join(".")
}

fn display_path(prefix: &[String]) -> String {
    if prefix.is_empty() {
        "(root)".to_string()
    } else {
        prefix.join(".")
    }
}
