//! logrus-to-zerolog: migrate logrus call sites to zerolog.
//!
//! Three rewrites run in one walk:
//! - `logrus.SetLevel(logrus.X)` becomes `zerolog.SetGlobalLevel(zerolog.X)`
//! - `logrus.Info("msg")` (any level) becomes `log.Info().Msg("msg")`
//! - `logrus.Info(a, b)` becomes `log.Info().Msgf("%v %v", a, b)`
//!
//! plus the import swap from `github.com/sirupsen/logrus` to
//! `github.com/rs/zerolog/log`.

use super::{Rule, RuleConfig};
use crate::pattern::condition::{NodeCondition, any_node, any_of, kind, sequence};
use crate::pattern::shape::{any_ident, basic_lit, call_expr, ident, import_spec, selector_expr};
use crate::pattern::{Matcher, Selections};
use crate::syntax::{LitKind, Node, NodeId, NodeKind, Tree};

const LOGRUS_IMPORT: &str = "\"github.com/sirupsen/logrus\"";
const ZEROLOG_IMPORT: &str = "\"github.com/rs/zerolog/log\"";

pub struct LogrusToZerolog;

/// One of logrus's leveled logging methods.
fn level_method() -> NodeCondition {
    any_of(vec![
        ident("Trace"),
        ident("Debug"),
        ident("Info"),
        ident("Warn"),
        ident("Error"),
    ])
}

/// Build `log.<Level>().<method>(args…)`.
fn zerolog_call(tree: &mut Tree, level: &str, method: &str, args: Vec<NodeId>) -> NodeId {
    let log = tree.new_ident("log");
    let lvl = tree.new_ident(level);
    let level_sel = tree.push(Node::SelectorExpr { x: log, sel: lvl });
    let level_call = tree.push(Node::CallExpr {
        fun: level_sel,
        args: vec![],
    });
    let msg = tree.new_ident(method);
    let msg_sel = tree.push(Node::SelectorExpr {
        x: level_call,
        sel: msg,
    });
    tree.push(Node::CallExpr { fun: msg_sel, args })
}

fn set_level_matcher() -> Matcher {
    let sel = Selections::new();
    let chain = vec![
        kind(NodeKind::ExprStmt),
        call_expr(
            selector_expr(
                sel.select(ident("logrus"), "p1"),
                sel.select(ident("SetLevel"), "method"),
            ),
            sequence(vec![selector_expr(
                sel.select(ident("logrus"), "p2"),
                sel.select(any_ident(), "level"),
            )]),
        ),
    ];
    let s = sel.clone();
    Matcher::new(chain, move |tree| {
        for key in ["p1", "p2"] {
            let id = s.ident(tree, key)?;
            if let Some(name) = tree.ident_name_mut(id) {
                *name = "zerolog".to_string();
            }
        }
        let method = s.ident(tree, "method")?;
        if let Some(name) = tree.ident_name_mut(method) {
            *name = "SetGlobalLevel".to_string();
        }
        Ok(())
    })
}

fn message_call_matcher() -> Matcher {
    let sel = Selections::new();
    let chain = vec![
        sel.select(kind(NodeKind::ExprStmt), "call"),
        call_expr(
            selector_expr(ident("logrus"), sel.select(level_method(), "method")),
            sequence(vec![sel.select(kind(NodeKind::BasicLit), "arg")]),
        ),
    ];
    let s = sel.clone();
    Matcher::new(chain, move |tree| {
        let stmt = s.expr_stmt(tree, "call")?;
        let method = s.ident(tree, "method")?;
        let arg = s.basic_lit(tree, "arg")?;
        let level = tree.ident_name(method).unwrap_or("Info").to_string();
        let call = zerolog_call(tree, &level, "Msg", vec![arg]);
        if let Node::ExprStmt { expr } = tree.node_mut(stmt) {
            *expr = call;
        }
        Ok(())
    })
}

fn format_call_matcher() -> Matcher {
    let sel = Selections::new();
    let chain = vec![
        sel.select(kind(NodeKind::ExprStmt), "call"),
        call_expr(
            selector_expr(ident("logrus"), sel.select(level_method(), "method")),
            sequence(vec![
                sel.select(kind(NodeKind::BasicLit), "arg1"),
                sel.select(kind(NodeKind::BasicLit), "arg2"),
            ]),
        ),
    ];
    let s = sel.clone();
    Matcher::new(chain, move |tree| {
        let stmt = s.expr_stmt(tree, "call")?;
        let method = s.ident(tree, "method")?;
        let arg1 = s.basic_lit(tree, "arg1")?;
        let arg2 = s.basic_lit(tree, "arg2")?;
        let level = tree.ident_name(method).unwrap_or("Info").to_string();
        let format = tree.new_basic_lit(LitKind::String, "\"%v %v\"");
        let call = zerolog_call(tree, &level, "Msgf", vec![format, arg1, arg2]);
        if let Node::ExprStmt { expr } = tree.node_mut(stmt) {
            *expr = call;
        }
        Ok(())
    })
}

fn import_matcher() -> Matcher {
    let sel = Selections::new();
    let chain = vec![sel.select(
        import_spec(any_node(), basic_lit(LOGRUS_IMPORT)),
        "spec",
    )];
    let s = sel.clone();
    Matcher::new(chain, move |tree| {
        let spec = s.of_kind(tree, "spec", NodeKind::ImportSpec)?;
        let log_alias = tree.new_ident("log");
        let Node::ImportSpec { alias, path } = tree.node_mut(spec) else {
            return Ok(());
        };
        *alias = Some(log_alias);
        let path = *path;
        if let Some(value) = tree.lit_value_mut(path) {
            *value = ZEROLOG_IMPORT.to_string();
        }
        Ok(())
    })
}

impl Rule for LogrusToZerolog {
    fn name(&self) -> &'static str {
        "logrus-to-zerolog"
    }

    fn description(&self) -> &'static str {
        "migrate logrus call sites and import to zerolog"
    }

    fn message(&self) -> &'static str {
        "migrated logrus call to zerolog"
    }

    fn matchers(&self, _config: &RuleConfig) -> Vec<Matcher> {
        vec![
            set_level_matcher(),
            message_call_matcher(),
            format_call_matcher(),
            import_matcher(),
        ]
    }
}
