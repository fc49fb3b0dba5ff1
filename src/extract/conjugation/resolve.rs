//! Conjugation page resolution
//!
//!     A conjugation page usually holds a single template call that renders the tables. Two
//!     indirections are followed, one level each:
//!
//!         - a page transclusion `{{:Other page|sél=2}}` moves to the other page and
//!           remembers the selection argument; forms are then sourced from the other page
//!         - a tab template (`{{Onglets conjugaison|contenu1=...|contenu2=...|sél=...}}`)
//!           picks its content argument by selection: the transclusion's if numeric, else its
//!           own, else 1
//!
//!     The first template inside the chosen content is expanded through the host.

use super::super::context::ExtractContext;
use super::super::node::{first_template_in, Node, Template};
use super::super::params::{ParamKey, TemplateParams};
use tracing::debug;

/// Expanded conjugation markup and the page it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTables {
    pub source: String,
    pub tree: Node,
}

pub fn resolve_tables(ctx: &ExtractContext<'_>, locator: &str) -> Option<ResolvedTables> {
    let host = ctx.host();
    let config = &ctx.config().conjugation;

    let Some(page) = host.page(locator) else {
        debug!(page = locator, "conjugation page not found");
        return None;
    };
    let mut source = locator.to_string();
    let mut invocation = first_invocation(&page, &source)?;
    let mut selection = None;

    let transcluded = invocation
        .as_template()
        .and_then(Template::transcluded_page)
        .map(str::to_string);
    if let Some(target) = transcluded {
        selection = TemplateParams::of(&invocation).and_then(|params| selection_of(ctx, &params));
        let Some(page) = host.page(&target) else {
            debug!(page = %target, "transcluded conjugation page not found");
            return None;
        };
        invocation = first_invocation(&page, &target)?;
        source = target;
    }

    if let Some(params) = TemplateParams::of(&invocation)
        .filter(|_| invocation.as_template().is_some_and(|t| config.is_tab_template(&t.name)))
    {
        let chosen = selection
            .or_else(|| selection_of(ctx, &params))
            .unwrap_or(1);
        let key = format!("{}{}", config.content_prefix, chosen);
        let fallback = format!("{}1", config.content_prefix);
        let content = params
            .get(ParamKey::Named(&key))
            .or_else(|| params.get(ParamKey::Named(&fallback)));
        let Some(inner) = content.and_then(first_template_in) else {
            debug!(page = %source, tab = chosen, "tab content holds no template");
            return None;
        };
        invocation = inner.clone();
    }

    match host.expand_template(&invocation) {
        Some(tree) => Some(ResolvedTables { source, tree }),
        None => {
            debug!(page = %source, "conjugation template not expandable");
            None
        }
    }
}

fn first_invocation(page: &Node, title: &str) -> Option<Node> {
    let invocation = page.first_template().cloned();
    if invocation.is_none() {
        debug!(page = title, "conjugation page holds no template");
    }
    invocation
}

/// Numeric, positive selection argument.
fn selection_of(ctx: &ExtractContext<'_>, params: &TemplateParams) -> Option<usize> {
    let key = ctx.config().conjugation.selection_key.as_str();
    params
        .get(ParamKey::Named(key))
        .map(|value| ctx.clean(value))
        .and_then(|text| text.trim().parse::<usize>().ok())
        .filter(|selection| *selection > 0)
}
