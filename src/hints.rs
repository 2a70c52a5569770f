//! 优化器 hint（`/*+ ... */`）与注释（`/* ... */`）片段。
//!
//! 一个 [`Hints`] 会挂到若干个 clause 的某个槽位上：
//!
//! - [`Position::Before`]：clause 关键字之前，例如 `/* hint */ SELECT ...`
//! - [`Position::AfterName`]：关键字之后、clause 主体之前，例如 `SELECT /*+ hint */ * ...`
//! - [`Position::After`]：clause 主体之后，例如 `WHERE id = ? /* hint */`
//!
//! 同一槽位上已有同类 hint（前后缀相同）时合并内容，否则与已有片段组成有序列表。

use crate::clause::Clause;
use crate::expr::Expr;
use crate::statement::{Statement, StatementModifier};
use crate::writer::SqlWriter;
use tracing::trace;

const OPTIMIZER_PREFIX: &str = "/*+ ";
const COMMENT_PREFIX: &str = "/* ";
const COMMENT_SUFFIX: &str = " */";

/// 片段相对 clause 关键字的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    Before,
    AfterName,
    #[default]
    After,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hints {
    pub prefix: String,
    pub content: String,
    pub suffix: String,

    clauses: Vec<String>,
    position: Position,
}

impl Hints {
    /// 以自定义前后缀构造，挂到 `clauses` 的 `position` 槽位。
    pub fn with_delimiters(
        prefix: impl Into<String>,
        content: impl Into<String>,
        suffix: impl Into<String>,
        clauses: impl IntoIterator<Item = impl AsRef<str>>,
        position: Position,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            content: content.into(),
            suffix: suffix.into(),
            clauses: clauses
                .into_iter()
                .map(|c| c.as_ref().to_ascii_uppercase())
                .collect(),
            position,
        }
    }

    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn build(&self, writer: &mut SqlWriter) {
        writer.write_str(&self.prefix);
        writer.write_str(&self.content);
        writer.write_str(&self.suffix);
    }

    /// 前后缀相同才视为同类，可以合并。
    pub fn is_mergeable_with(&self, other: &Hints) -> bool {
        self.prefix == other.prefix && self.suffix == other.suffix
    }

    /// 追加 `other` 的内容，保留自身前后缀。
    pub fn merge(&mut self, other: &Hints) {
        self.content.push(' ');
        self.content.push_str(&other.content);
    }
}

impl StatementModifier for Hints {
    fn modify_statement(&self, stmt: &mut Statement) {
        for name in &self.clauses {
            trace!(
                clause = %name,
                position = ?self.position,
                content = %self.content,
                "attach hints"
            );
            let clause = stmt.clause_entry(name);
            attach(slot_mut(clause, self.position), self);
        }
    }
}

fn slot_mut(clause: &mut Clause, position: Position) -> &mut Option<Expr> {
    match position {
        Position::Before => &mut clause.before_expression,
        Position::AfterName => &mut clause.after_name_expression,
        Position::After => &mut clause.after_expression,
    }
}

fn attach(slot: &mut Option<Expr>, hints: &Hints) {
    *slot = Some(match slot.take() {
        None => Expr::Hints(hints.clone()),
        Some(Expr::Hints(mut old)) if old.is_mergeable_with(hints) => {
            old.merge(hints);
            Expr::Hints(old)
        }
        Some(old) => old.and_then(Expr::Hints(hints.clone())),
    });
}

/// 优化器 hint：`/*+ content */`，挂在 SELECT 与 UPDATE 关键字之后。
pub fn new(content: impl Into<String>) -> Hints {
    Hints::with_delimiters(
        OPTIMIZER_PREFIX,
        content,
        COMMENT_SUFFIX,
        ["SELECT", "UPDATE"],
        Position::AfterName,
    )
}

/// 注释：`/* comment */`，挂在 `clause` 关键字之后。
pub fn comment(clause: &str, comment: impl Into<String>) -> Hints {
    Hints::with_delimiters(
        COMMENT_PREFIX,
        comment,
        COMMENT_SUFFIX,
        [clause],
        Position::AfterName,
    )
}

/// 注释，挂在 `clause` 关键字之前。
pub fn comment_before(clause: &str, comment: impl Into<String>) -> Hints {
    Hints::with_delimiters(
        COMMENT_PREFIX,
        comment,
        COMMENT_SUFFIX,
        [clause],
        Position::Before,
    )
}

/// 注释，挂在 `clause` 主体之后。
pub fn comment_after(clause: &str, comment: impl Into<String>) -> Hints {
    Hints::with_delimiters(
        COMMENT_PREFIX,
        comment,
        COMMENT_SUFFIX,
        [clause],
        Position::After,
    )
}
