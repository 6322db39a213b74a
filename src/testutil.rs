//! Shared helpers for rule tests: run one rule's matchers over a source
//! string and hand back the printed result.

use crate::pattern::walk;
use crate::rule::{Rule, RuleConfig};
use crate::syntax::{parse, print};

/// Apply one rule to source text and return the printed output.
pub fn apply_rule(rule: &dyn Rule, config: &RuleConfig, src: &str) -> String {
    let (out, _) = apply_rule_counting(rule, config, src);
    out
}

/// Like [`apply_rule`], also returning the total number of chain
/// completions across the rule's matchers.
pub fn apply_rule_counting(rule: &dyn Rule, config: &RuleConfig, src: &str) -> (String, usize) {
    let mut tree = parse(src).unwrap_or_else(|e| panic!("parse failed: {e}"));
    let mut matchers = rule.matchers(config);
    walk(&mut tree, &mut matchers).expect("capture error during walk");
    let fired = matchers.iter().map(|m| m.completions().len()).sum();
    (print(&tree), fired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::early_return::EarlyReturn;

    #[test]
    fn apply_rule_counting_reports_firings() {
        let src = "package main\n\nfunc f() int {\n\tif ok {\n\t\treturn 1\n\t} else {\n\t\treturn 2\n\t}\n}\n";
        let (_, fired) = apply_rule_counting(&EarlyReturn, &RuleConfig::default(), src);
        assert_eq!(fired, 1);
    }

    #[test]
    fn apply_rule_on_clean_source_is_identity() {
        let src = "package main\n";
        assert_eq!(apply_rule(&EarlyReturn, &RuleConfig::default(), src), src);
    }
}
