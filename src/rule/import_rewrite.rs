//! import-rewrite: retarget an import path and optionally give it an alias.
//!
//! Configured through rule options:
//!
//! ```yaml
//! import-rewrite:
//!   From: fmt
//!   To: github.com/acme/fmtx
//!   Alias: fmtx
//! ```
//!
//! Without both `From` and `To` the rule compiles to nothing.

use super::{Rule, RuleConfig};
use crate::pattern::condition::{any_node, any_nodes};
use crate::pattern::shape::file;
use crate::pattern::{Matcher, Selections};
use crate::syntax::Node;

pub struct ImportRewrite;

impl Rule for ImportRewrite {
    fn name(&self) -> &'static str {
        "import-rewrite"
    }

    fn description(&self) -> &'static str {
        "rewrite an import path and alias (configure From/To/Alias)"
    }

    fn message(&self) -> &'static str {
        "rewrote import"
    }

    fn matchers(&self, config: &RuleConfig) -> Vec<Matcher> {
        let Some(from) = config.option_str("From") else {
            return Vec::new();
        };
        let Some(to) = config.option_str("To") else {
            return Vec::new();
        };
        let alias = config.option_str("Alias");

        let from_lit = format!("\"{from}\"");
        let to_lit = format!("\"{to}\"");

        // Capture the file's whole import list; the callback walks it
        // looking for the configured path.
        let sel = Selections::new();
        let chain = vec![file(
            any_node(),
            sel.select_nodes(any_nodes(), "imports"),
            any_nodes(),
        )];

        let s = sel.clone();
        vec![Matcher::new(chain, move |tree| {
            for spec in s.import_specs(tree, "imports")? {
                let Node::ImportSpec { path, .. } = tree.node(spec) else {
                    continue;
                };
                if tree.lit_value(*path) != Some(from_lit.as_str()) {
                    continue;
                }
                let new_alias = alias.as_ref().map(|name| tree.new_ident(name.clone()));
                let Node::ImportSpec { alias, path } = tree.node_mut(spec) else {
                    continue;
                };
                if let Some(new_alias) = new_alias {
                    *alias = Some(new_alias);
                }
                let path = *path;
                if let Some(value) = tree.lit_value_mut(path) {
                    *value = to_lit.clone();
                }
            }
            Ok(())
        })]
    }
}
