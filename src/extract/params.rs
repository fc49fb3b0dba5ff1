//! Template Parameter Resolver
//!
//! The parser hands over a template invocation with its raw argument list, exactly as written
//! between the pipes. Resolution follows the usual template-call rules:
//!
//!     - An argument whose leading text run contains `=` is named. The key is the trimmed text
//!       before the first `=`; the value is the rest, trimmed at both ends.
//!     - Any other argument is positional and numbered from 1. Positional values keep their
//!       whitespace.
//!     - A named key made only of digits addresses that positional slot.
//!     - A later argument for the same key replaces the earlier one.
//!
//! Resolution is a pure function of the template node.

use super::node::{Node, Template};
use std::collections::BTreeMap;

/// Key used to look up a resolved argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey<'k> {
    Positional(usize),
    Named(&'k str),
}

/// Positional and named arguments of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateParams {
    positional: BTreeMap<usize, Vec<Node>>,
    named: BTreeMap<String, Vec<Node>>,
}

impl TemplateParams {
    pub fn resolve(template: &Template) -> Self {
        let mut params = TemplateParams::default();
        let mut next_position = 1;

        for arg in &template.args {
            match split_named(arg) {
                Some((key, value)) => match key.parse::<usize>() {
                    Ok(position) if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) => {
                        params.positional.insert(position, value);
                    }
                    _ => {
                        params.named.insert(key, value);
                    }
                },
                None => {
                    params.positional.insert(next_position, arg.clone());
                    next_position += 1;
                }
            }
        }

        params
    }

    /// Resolve the arguments of a node, if it is a template invocation.
    pub fn of(node: &Node) -> Option<Self> {
        node.as_template().map(Self::resolve)
    }

    pub fn get(&self, key: ParamKey<'_>) -> Option<&[Node]> {
        match key {
            ParamKey::Positional(position) => self.positional.get(&position),
            ParamKey::Named(name) => self.named.get(name.trim()),
        }
        .map(Vec::as_slice)
    }

    /// First key that is present, even when its value is empty.
    pub fn first(&self, keys: &[ParamKey<'_>]) -> Option<&[Node]> {
        keys.iter().find_map(|key| self.get(*key))
    }

    pub fn positional_count(&self) -> usize {
        self.positional.keys().next_back().copied().unwrap_or(0)
    }
}

/// Split `key=value` off an argument whose first node is a text run holding `=`.
fn split_named(arg: &[Node]) -> Option<(String, Vec<Node>)> {
    let first = arg.first()?.as_text()?;
    let (key, rest) = first.split_once('=')?;

    let mut value = Vec::with_capacity(arg.len());
    if !rest.is_empty() {
        value.push(Node::Text(rest.to_string()));
    }
    value.extend(arg.iter().skip(1).cloned());
    Some((key.trim().to_string(), trim_nodes(value)))
}

/// Trim leading whitespace of the first text run and trailing whitespace of the last one,
/// dropping runs that become empty.
fn trim_nodes(mut nodes: Vec<Node>) -> Vec<Node> {
    if let Some(Node::Text(text)) = nodes.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Node::Text(text)) = nodes.last_mut() {
        *text = text.trim_end().to_string();
    }
    nodes.retain(|node| !matches!(node, Node::Text(text) if text.is_empty()));
    nodes
}

#[cfg(test)]
mod tests {
    use super::super::node::build::*;
    use super::*;

    fn resolve(node: Node) -> TemplateParams {
        TemplateParams::of(&node).expect("template node")
    }

    #[test]
    fn test_positional_numbering_skips_named() {
        let params = resolve(
            template("exemple")
                .arg("foo")
                .named("lang", "fr")
                .arg("bar")
                .build(),
        );
        assert_eq!(params.get(ParamKey::Positional(1)), Some(&[text("foo")][..]));
        assert_eq!(params.get(ParamKey::Positional(2)), Some(&[text("bar")][..]));
        assert_eq!(params.get(ParamKey::Named("lang")), Some(&[text("fr")][..]));
        assert_eq!(params.positional_count(), 2);
    }

    #[test]
    fn test_named_values_are_trimmed_positional_are_not() {
        let params = resolve(
            template("t")
                .arg(" spaced ")
                .named(" sens ", "  meaning  ")
                .build(),
        );
        assert_eq!(params.get(ParamKey::Positional(1)), Some(&[text(" spaced ")][..]));
        assert_eq!(params.get(ParamKey::Named("sens")), Some(&[text("meaning")][..]));
    }

    #[test]
    fn test_numeric_key_overrides_slot_and_last_wins() {
        let params = resolve(
            template("t")
                .arg("first")
                .named("1", "override")
                .named("tr", "a")
                .named("tr", "b")
                .build(),
        );
        assert_eq!(params.get(ParamKey::Positional(1)), Some(&[text("override")][..]));
        assert_eq!(params.get(ParamKey::Named("tr")), Some(&[text("b")][..]));
    }

    #[test]
    fn test_first_prefers_present_keys_in_order() {
        let params = resolve(template("t").arg("x").named("sens", "meaning").build());
        let keys = [ParamKey::Positional(2), ParamKey::Named("sens")];
        assert_eq!(params.first(&keys), Some(&[text("meaning")][..]));

        let params = resolve(template("t").arg("x").arg("").named("sens", "m").build());
        // An empty positional value is still present
        assert_eq!(params.first(&keys), Some(&[text("")][..]));
    }

    #[test]
    fn test_named_value_keeps_markup() {
        let params = resolve(
            template("exemple")
                .named_nodes("source", vec![italic(vec![text("Le Monde")]), text(" ")])
                .build(),
        );
        assert_eq!(
            params.get(ParamKey::Named("source")),
            Some(&[italic(vec![text("Le Monde")])][..])
        );
    }

    #[test]
    fn test_non_template_has_no_params() {
        assert!(TemplateParams::of(&text("plain")).is_none());
    }
}
