//! 索引 hint：`USE INDEX` / `IGNORE INDEX` / `FORCE INDEX`。
//!
//! 索引 hint 挂在 FROM 与 UPDATE clause 的 after 槽位上。对 FROM 来说，
//! hint 必须紧跟在基表之后、JOIN 之前，因此会同时替换 FROM 的 clause 渲染函数。

use crate::clause::{Clause, ClauseExpr};
use crate::expr::{Expr, partition_index_hints};
use crate::statement::{Statement, StatementModifier};
use crate::writer::SqlWriter;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

const INDEX_HINT_CLAUSES: [&str; 2] = ["FROM", "UPDATE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexHintKind {
    Use,
    Ignore,
    Force,
}

impl IndexHintKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Use => "USE",
            Self::Ignore => "IGNORE",
            Self::Force => "FORCE",
        }
    }
}

impl fmt::Display for IndexHintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown index hint kind `{0}`, expected one of USE, IGNORE, FORCE")]
pub struct ParseIndexHintKindError(pub String);

impl FromStr for IndexHintKind {
    type Err = ParseIndexHintKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USE" => Ok(Self::Use),
            "IGNORE" => Ok(Self::Ignore),
            "FORCE" => Ok(Self::Force),
            _ => Err(ParseIndexHintKindError(s.to_string())),
        }
    }
}

/// `FOR JOIN` / `FOR ORDER BY` / `FOR GROUP BY`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexScope {
    Join,
    OrderBy,
    GroupBy,
}

impl IndexScope {
    fn as_str(self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::OrderBy => "ORDER BY",
            Self::GroupBy => "GROUP BY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHint {
    kind: IndexHintKind,
    columns: Vec<String>,
    scope: Option<IndexScope>,
}

impl IndexHint {
    pub fn new(kind: IndexHintKind, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            scope: None,
        }
    }

    pub fn kind(&self) -> IndexHintKind {
        self.kind
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn scope(&self) -> Option<IndexScope> {
        self.scope
    }

    pub fn for_join(mut self) -> Self {
        self.scope = Some(IndexScope::Join);
        self
    }

    pub fn for_order_by(mut self) -> Self {
        self.scope = Some(IndexScope::OrderBy);
        self
    }

    pub fn for_group_by(mut self) -> Self {
        self.scope = Some(IndexScope::GroupBy);
        self
    }

    /// 没有索引名时不渲染任何内容。
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn build(&self, writer: &mut SqlWriter) {
        if self.is_empty() {
            return;
        }
        writer.write_str(self.kind.as_str());
        writer.write_str(" INDEX ");
        if let Some(scope) = self.scope {
            writer.write_str("FOR ");
            writer.write_str(scope.as_str());
            writer.write_char(' ');
        }
        writer.write_char('(');
        for (idx, col) in self.columns.iter().enumerate() {
            if idx > 0 {
                writer.write_char(',');
            }
            writer.write_quoted(col);
        }
        writer.write_char(')');
    }
}

impl StatementModifier for IndexHint {
    fn modify_statement(&self, stmt: &mut Statement) {
        for name in INDEX_HINT_CLAUSES {
            trace!(clause = name, kind = %self.kind, columns = ?self.columns, "attach index hint");
            let clause = stmt.clause_entry(name);
            let hint = Expr::IndexHint(self.clone());
            clause.after_expression = Some(match clause.after_expression.take() {
                None => hint,
                Some(old) => old.and_then(hint),
            });

            if name == "FROM" {
                clause.builder = Some(index_hint_from_clause_builder);
            }
        }
    }
}

pub fn use_index(columns: impl IntoIterator<Item = impl Into<String>>) -> IndexHint {
    IndexHint::new(IndexHintKind::Use, columns)
}

pub fn ignore_index(columns: impl IntoIterator<Item = impl Into<String>>) -> IndexHint {
    IndexHint::new(IndexHintKind::Ignore, columns)
}

pub fn force_index(columns: impl IntoIterator<Item = impl Into<String>>) -> IndexHint {
    IndexHint::new(IndexHintKind::Force, columns)
}

/// FROM clause 的渲染函数：索引 hint 放在基表与 JOIN 之间，其余 after 片段放在最后。
pub fn index_hint_from_clause_builder(c: &Clause, writer: &mut SqlWriter) {
    if let Some(before) = c.before_expression.as_ref().filter(|e| !e.is_empty()) {
        before.build(writer);
        writer.write_char(' ');
    }

    if !c.name.is_empty() {
        writer.write_str(&c.name);
        writer.write_char(' ');
    }

    if let Some(after_name) = c.after_name_expression.as_ref().filter(|e| !e.is_empty()) {
        after_name.build(writer);
        writer.write_char(' ');
    }

    let (index_hints, others) = partition_index_hints(c.after_expression.as_ref());

    match &c.expression {
        Some(ClauseExpr::From(from)) => {
            from.build_tables(writer);
            for hint in index_hints.into_iter().filter(|h| !h.is_empty()) {
                writer.write_char(' ');
                hint.build(writer);
            }
            for join in &from.joins {
                writer.write_char(' ');
                join.build(writer);
            }
        }
        Some(expr) => expr.build(writer),
        None => {}
    }

    for expr in others.into_iter().filter(|e| !e.is_empty()) {
        writer.write_char(' ');
        expr.build(writer);
    }
}
