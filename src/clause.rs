//! Clause：语句中的一个具名片段（SELECT / FROM / WHERE / UPDATE ...）。
//!
//! 每个 clause 除主体表达式外还有三个槽位，供 hint 注入：
//! `before_expression`、`after_name_expression`、`after_expression`。

use crate::expr::{Expr, RawExpr};
use crate::value::SqlValue;
use crate::writer::SqlWriter;

/// 自定义 clause 渲染函数，设置后替代 [`Clause::build`] 的默认流程。
pub type ClauseBuilder = fn(&Clause, &mut SqlWriter);

#[derive(Debug, Clone, Default)]
pub struct Clause {
    /// 渲染时写出的关键字；LIMIT/FOR 等自行渲染关键字的 clause 为空。
    pub name: String,
    pub before_expression: Option<Expr>,
    pub after_name_expression: Option<Expr>,
    pub after_expression: Option<Expr>,
    pub expression: Option<ClauseExpr>,
    pub builder: Option<ClauseBuilder>,
}

impl Clause {
    pub fn build(&self, writer: &mut SqlWriter) {
        if let Some(builder) = self.builder {
            builder(self, writer);
            return;
        }

        let Some(expression) = &self.expression else {
            return;
        };

        if let Some(before) = self.before_expression.as_ref().filter(|e| !e.is_empty()) {
            before.build(writer);
            writer.write_char(' ');
        }

        if !self.name.is_empty() {
            writer.write_str(&self.name);
            writer.write_char(' ');
        }

        if let Some(after_name) = self
            .after_name_expression
            .as_ref()
            .filter(|e| !e.is_empty())
        {
            after_name.build(writer);
            writer.write_char(' ');
        }

        expression.build(writer);

        if let Some(after) = self.after_expression.as_ref().filter(|e| !e.is_empty()) {
            writer.write_char(' ');
            after.build(writer);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub alias: Option<String>,
    /// 原样输出，不做 Quote（例如 `COUNT(*)`）。
    pub raw: bool,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            raw: false,
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            name: sql.into(),
            alias: None,
            raw: true,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn build(&self, writer: &mut SqlWriter) {
        if self.raw {
            writer.write_str(&self.name);
        } else {
            writer.write_quoted(&self.name);
        }
        if let Some(alias) = &self.alias {
            writer.write_str(" AS ");
            writer.write_quoted(alias);
        }
    }
}

impl From<&str> for Column {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for Column {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

fn build_columns(columns: &[Column], writer: &mut SqlWriter) {
    for (idx, col) in columns.iter().enumerate() {
        if idx > 0 {
            writer.write_char(',');
        }
        col.build(writer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn build(&self, writer: &mut SqlWriter) {
        writer.write_quoted(&self.name);
        if let Some(alias) = &self.alias {
            writer.write_char(' ');
            writer.write_quoted(alias);
        }
    }
}

impl From<&str> for Table {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Cross,
}

impl JoinKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Cross => "CROSS",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: Table,
    pub on: Vec<RawExpr>,
}

impl Join {
    pub fn new(kind: JoinKind, table: impl Into<Table>) -> Self {
        Self {
            kind,
            table: table.into(),
            on: Vec::new(),
        }
    }

    pub fn on(mut self, expr: RawExpr) -> Self {
        self.on.push(expr);
        self
    }

    pub fn build(&self, writer: &mut SqlWriter) {
        writer.write_str(self.kind.as_str());
        writer.write_str(" JOIN ");
        self.table.build(writer);
        if !self.on.is_empty() {
            writer.write_str(" ON ");
            build_and(&self.on, writer);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub distinct: bool,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FromTables {
    pub tables: Vec<Table>,
    pub joins: Vec<Join>,
}

impl FromTables {
    /// 只渲染表列表（不含 JOIN），供索引 hint 插入到两者之间。
    pub fn build_tables(&self, writer: &mut SqlWriter) {
        for (idx, table) in self.tables.iter().enumerate() {
            if idx > 0 {
                writer.write_char(',');
            }
            table.build(writer);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: SqlValue,
}

impl Assignment {
    pub fn new(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    Update,
    Share,
}

/// clause 主体。
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseExpr {
    Select(Select),
    From(FromTables),
    Update(Table),
    Set(Vec<Assignment>),
    Where(Vec<RawExpr>),
    GroupBy {
        columns: Vec<Column>,
        having: Vec<RawExpr>,
    },
    OrderBy(Vec<(Column, bool)>),
    Limit {
        limit: Option<u64>,
        offset: Option<u64>,
    },
    Locking(LockStrength),
}

impl ClauseExpr {
    /// clause map 中的键。
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::From(_) => "FROM",
            Self::Update(_) => "UPDATE",
            Self::Set(_) => "SET",
            Self::Where(_) => "WHERE",
            Self::GroupBy { .. } => "GROUP BY",
            Self::OrderBy(_) => "ORDER BY",
            Self::Limit { .. } => "LIMIT",
            Self::Locking(_) => "FOR",
        }
    }

    /// 由 [`Clause::build`] 写出的关键字；自行渲染关键字的主体返回 None。
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Limit { .. } | Self::Locking(_) => None,
            _ => Some(self.name()),
        }
    }

    /// 合并进已有 clause：WHERE 条件与 SET 赋值追加，其余替换。
    pub fn merge_clause(self, clause: &mut Clause) {
        clause.name = self.keyword().unwrap_or_default().to_string();
        let merged = match (clause.expression.take(), self) {
            (Some(Self::Where(mut old)), Self::Where(new)) => {
                old.extend(new);
                Self::Where(old)
            }
            (Some(Self::Set(mut old)), Self::Set(new)) => {
                old.extend(new);
                Self::Set(old)
            }
            (_, new) => new,
        };
        clause.expression = Some(merged);
    }

    pub fn build(&self, writer: &mut SqlWriter) {
        match self {
            Self::Select(select) => {
                if select.distinct {
                    writer.write_str("DISTINCT ");
                }
                if select.columns.is_empty() {
                    writer.write_char('*');
                } else {
                    build_columns(&select.columns, writer);
                }
            }
            Self::From(from) => {
                from.build_tables(writer);
                for join in &from.joins {
                    writer.write_char(' ');
                    join.build(writer);
                }
            }
            Self::Update(table) => table.build(writer),
            Self::Set(assignments) => {
                for (idx, a) in assignments.iter().enumerate() {
                    if idx > 0 {
                        writer.write_char(',');
                    }
                    writer.write_quoted(&a.column);
                    writer.write_char('=');
                    writer.add_var(a.value.clone());
                }
            }
            Self::Where(conds) => build_and(conds, writer),
            Self::GroupBy { columns, having } => {
                build_columns(columns, writer);
                if !having.is_empty() {
                    writer.write_str(" HAVING ");
                    build_and(having, writer);
                }
            }
            Self::OrderBy(cols) => {
                for (idx, (col, desc)) in cols.iter().enumerate() {
                    if idx > 0 {
                        writer.write_char(',');
                    }
                    col.build(writer);
                    if *desc {
                        writer.write_str(" DESC");
                    }
                }
            }
            Self::Limit { limit, offset } => {
                if let Some(limit) = limit {
                    writer.write_str("LIMIT ");
                    writer.add_var(*limit);
                }
                if let Some(offset) = offset {
                    if limit.is_some() {
                        writer.write_char(' ');
                    }
                    writer.write_str("OFFSET ");
                    writer.add_var(*offset);
                }
            }
            Self::Locking(strength) => writer.write_str(match strength {
                LockStrength::Update => "FOR UPDATE",
                LockStrength::Share => "FOR SHARE",
            }),
        }
    }
}

/// 以 ` AND ` 连接条件；多个条件中含 OR 的条件加括号。
fn build_and(conds: &[RawExpr], writer: &mut SqlWriter) {
    let wrap = conds.len() > 1;
    for (idx, cond) in conds.iter().enumerate() {
        if idx > 0 {
            writer.write_str(" AND ");
        }
        if wrap && cond.sql.to_ascii_uppercase().contains(" OR ") {
            writer.write_char('(');
            cond.build(writer);
            writer.write_char(')');
        } else {
            cond.build(writer);
        }
    }
}
