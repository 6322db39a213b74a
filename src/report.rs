use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// 1-indexed line number
    pub line: usize,
    /// 0-indexed column (character offset within the line)
    pub column: usize,
}

/// One applied (or, in check mode, required) rewrite: where a rule's pattern
/// chain completed.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub path: String,
    pub location: Location,
    pub rule_name: String,
    pub message: String,
}

impl Rewrite {
    pub fn sort_key(&self) -> (&str, usize, usize) {
        (&self.path, self.location.line, self.location.column)
    }
}

impl fmt::Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.path, self.location.line, self.location.column, self.rule_name, self.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_display() {
        let r = Rewrite {
            path: "main.go".to_string(),
            location: Location { line: 4, column: 1 },
            rule_name: "early-return".to_string(),
            message: "hoisted trailing return".to_string(),
        };
        assert_eq!(
            format!("{r}"),
            "main.go:4:1: early-return: hoisted trailing return"
        );
    }

    #[test]
    fn sort_key_orders_by_path_then_position() {
        let make = |path: &str, line, column| Rewrite {
            path: path.to_string(),
            location: Location { line, column },
            rule_name: "r".to_string(),
            message: "m".to_string(),
        };
        let a = make("a.go", 1, 0);
        let b = make("a.go", 2, 0);
        let c = make("b.go", 1, 0);
        assert!(a.sort_key() < b.sort_key());
        assert!(b.sort_key() < c.sort_key());
    }
}
