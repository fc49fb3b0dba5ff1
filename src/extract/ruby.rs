//! Ruby annotations
//!
//! Japanese glosses render readings as `<ruby>base<rp>(</rp><rt>reading</rt><rp>)</rp></ruby>`.
//! The pairs are pulled out of the expanded nodes and the ruby element is replaced by its base
//! text, so the gloss reads as plain text.

use super::context::ExtractContext;
use super::model::Ruby;
use super::node::Node;

/// Collect (base, reading) pairs and return the nodes with ruby elements flattened to their base.
pub fn extract_ruby(ctx: &ExtractContext<'_>, nodes: &[Node]) -> (Vec<Ruby>, Vec<Node>) {
    let mut ruby = Vec::new();
    let rest = nodes
        .iter()
        .map(|node| strip_ruby(ctx, node, &mut ruby))
        .collect();
    (ruby, rest)
}

fn strip_ruby(ctx: &ExtractContext<'_>, node: &Node, ruby: &mut Vec<Ruby>) -> Node {
    let Node::Element(element) = node else {
        return node.clone();
    };

    if node.is_html("ruby") {
        let base = ctx.clean(
            element
                .children
                .iter()
                .filter(|child| !child.is_html("rt") && !child.is_html("rp")),
        );
        let reading = ctx.clean(element.children.iter().filter(|child| child.is_html("rt")));
        if !base.is_empty() && !reading.is_empty() {
            ruby.push((base.clone(), reading));
        }
        return Node::text(base);
    }

    let children = element
        .children
        .iter()
        .map(|child| strip_ruby(ctx, child, ruby))
        .collect();
    Node::Element(element.with_children(children))
}

#[cfg(test)]
mod tests {
    use super::super::config::load_defaults;
    use super::super::host::MemoryHost;
    use super::super::node::build::*;
    use super::*;

    fn ruby_node(base: &str, reading: &str) -> Node {
        html(
            "ruby",
            vec![
                text(base),
                html("rp", vec![text("(")]),
                html("rt", vec![text(reading)]),
                html("rp", vec![text(")")]),
            ],
        )
    }

    #[test]
    fn test_pairs_are_collected_in_order() {
        let config = load_defaults().unwrap();
        let host = MemoryHost::new();
        let ctx = ExtractContext::new(&host, &config, "ja").unwrap();

        let nodes = vec![
            ruby_node("犬", "いぬ"),
            text("の"),
            bold(vec![ruby_node("鳴", "な")]),
            text("き声"),
        ];
        let (ruby, rest) = extract_ruby(&ctx, &nodes);
        assert_eq!(
            ruby,
            vec![
                ("犬".to_string(), "いぬ".to_string()),
                ("鳴".to_string(), "な".to_string())
            ]
        );
        assert_eq!(ctx.clean(&rest), "犬の鳴き声");
    }

    #[test]
    fn test_ruby_without_reading_keeps_base_only() {
        let config = load_defaults().unwrap();
        let host = MemoryHost::new();
        let ctx = ExtractContext::new(&host, &config, "ja").unwrap();

        let (ruby, rest) = extract_ruby(&ctx, &[html("ruby", vec![text("猫")])]);
        assert!(ruby.is_empty());
        assert_eq!(rest, vec![text("猫")]);
    }
}
