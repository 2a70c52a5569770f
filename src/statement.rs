//! Statement：按 clause 名组织的语句描述，hint 通过 [`StatementModifier`] 注入其中。

use crate::clause::{
    Assignment, Clause, ClauseExpr, Column, FromTables, Join, JoinKind, LockStrength, Select, Table,
};
use crate::expr::RawExpr;
use crate::flavor::{Flavor, default_flavor};
use crate::value::SqlValue;
use crate::writer::{BuiltSql, SqlWriter};
use std::collections::HashMap;
use tracing::debug;

const SELECT_CLAUSES: [&str; 7] = [
    "SELECT", "FROM", "WHERE", "GROUP BY", "ORDER BY", "LIMIT", "FOR",
];
const UPDATE_CLAUSES: [&str; 5] = ["UPDATE", "SET", "WHERE", "ORDER BY", "LIMIT"];

/// 在语句构建前修改 clause map。
pub trait StatementModifier {
    fn modify_statement(&self, stmt: &mut Statement);
}

impl StatementModifier for ClauseExpr {
    fn modify_statement(&self, stmt: &mut Statement) {
        stmt.add_clause(self.clone());
    }
}

impl<T: StatementModifier + ?Sized> StatementModifier for &T {
    fn modify_statement(&self, stmt: &mut Statement) {
        (**self).modify_statement(stmt);
    }
}

impl<T: StatementModifier> StatementModifier for Vec<T> {
    fn modify_statement(&self, stmt: &mut Statement) {
        for m in self {
            m.modify_statement(stmt);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Statement {
    flavor: Flavor,
    table: String,
    clauses: HashMap<String, Clause>,
}

impl Statement {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            flavor: default_flavor(),
            table: table.into(),
            clauses: HashMap::new(),
        }
    }

    pub fn set_flavor(&mut self, flavor: Flavor) -> Flavor {
        std::mem::replace(&mut self.flavor, flavor)
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 立即应用一个 modifier（hint、索引 hint 或 clause 主体）。
    pub fn clauses(&mut self, modifier: impl StatementModifier) -> &mut Self {
        modifier.modify_statement(self);
        self
    }

    /// 按名称（不区分大小写）查找 clause。
    pub fn clause(&self, name: &str) -> Option<&Clause> {
        self.clauses.get(&name.to_ascii_uppercase())
    }

    /// 取出（必要时创建）名为 `name` 的 clause。未知名称同样会建出条目，但没有主体时不会被渲染。
    pub fn clause_entry(&mut self, name: &str) -> &mut Clause {
        self.clauses.entry(name.to_ascii_uppercase()).or_default()
    }

    pub fn add_clause(&mut self, expr: ClauseExpr) -> &mut Self {
        let clause = self.clause_entry(expr.name());
        expr.merge_clause(clause);
        self
    }

    /// 仅当同名 clause 尚无主体时添加；已挂上的 hint 槽位保持不变。
    pub fn add_clause_if_not_exists(&mut self, expr: ClauseExpr) -> &mut Self {
        let exists = self
            .clause(expr.name())
            .is_some_and(|c| c.expression.is_some());
        if !exists {
            self.add_clause(expr);
        }
        self
    }

    fn update_expression(
        &mut self,
        name: &str,
        init: impl FnOnce() -> ClauseExpr,
        f: impl FnOnce(&mut ClauseExpr),
    ) -> &mut Self {
        let clause = self.clause_entry(name);
        match clause.expression.as_mut() {
            Some(expr) => f(expr),
            None => {
                let mut expr = init();
                f(&mut expr);
                expr.merge_clause(clause);
            }
        }
        self
    }

    pub fn select(&mut self, columns: impl IntoIterator<Item = impl Into<Column>>) -> &mut Self {
        let columns: Vec<Column> = columns.into_iter().map(Into::into).collect();
        self.update_expression(
            "SELECT",
            || ClauseExpr::Select(Select::default()),
            |expr| {
                if let ClauseExpr::Select(select) = expr {
                    select.columns = columns;
                }
            },
        )
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.update_expression(
            "SELECT",
            || ClauseExpr::Select(Select::default()),
            |expr| {
                if let ClauseExpr::Select(select) = expr {
                    select.distinct = true;
                }
            },
        )
    }

    pub fn join(&mut self, join: Join) -> &mut Self {
        self.update_expression(
            "FROM",
            || ClauseExpr::From(FromTables::default()),
            |expr| {
                if let ClauseExpr::From(from) = expr {
                    from.joins.push(join);
                }
            },
        )
    }

    pub fn left_join(&mut self, table: impl Into<Table>, on: RawExpr) -> &mut Self {
        self.join(Join::new(JoinKind::Left, table).on(on))
    }

    pub fn inner_join(&mut self, table: impl Into<Table>, on: RawExpr) -> &mut Self {
        self.join(Join::new(JoinKind::Inner, table).on(on))
    }

    /// 追加一个 WHERE 条件，`?` 依次绑定 `vars`。
    pub fn where_(
        &mut self,
        sql: impl Into<String>,
        vars: impl IntoIterator<Item = impl Into<SqlValue>>,
    ) -> &mut Self {
        self.add_clause(ClauseExpr::Where(vec![RawExpr::new(sql, vars)]))
    }

    pub fn group_by(&mut self, columns: impl IntoIterator<Item = impl Into<Column>>) -> &mut Self {
        let columns: Vec<Column> = columns.into_iter().map(Into::into).collect();
        self.update_expression(
            "GROUP BY",
            || ClauseExpr::GroupBy {
                columns: Vec::new(),
                having: Vec::new(),
            },
            |expr| {
                if let ClauseExpr::GroupBy { columns: cols, .. } = expr {
                    cols.extend(columns);
                }
            },
        )
    }

    pub fn having(
        &mut self,
        sql: impl Into<String>,
        vars: impl IntoIterator<Item = impl Into<SqlValue>>,
    ) -> &mut Self {
        let cond = RawExpr::new(sql, vars);
        self.update_expression(
            "GROUP BY",
            || ClauseExpr::GroupBy {
                columns: Vec::new(),
                having: Vec::new(),
            },
            |expr| {
                if let ClauseExpr::GroupBy { having, .. } = expr {
                    having.push(cond);
                }
            },
        )
    }

    fn push_order(&mut self, column: Column, desc: bool) -> &mut Self {
        self.update_expression(
            "ORDER BY",
            || ClauseExpr::OrderBy(Vec::new()),
            |expr| {
                if let ClauseExpr::OrderBy(cols) = expr {
                    cols.push((column, desc));
                }
            },
        )
    }

    pub fn order_by_asc(&mut self, column: impl Into<Column>) -> &mut Self {
        self.push_order(column.into(), false)
    }

    pub fn order_by_desc(&mut self, column: impl Into<Column>) -> &mut Self {
        self.push_order(column.into(), true)
    }

    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.update_expression(
            "LIMIT",
            || ClauseExpr::Limit {
                limit: None,
                offset: None,
            },
            |expr| {
                if let ClauseExpr::Limit { limit, .. } = expr {
                    *limit = Some(n);
                }
            },
        )
    }

    pub fn offset(&mut self, n: u64) -> &mut Self {
        self.update_expression(
            "LIMIT",
            || ClauseExpr::Limit {
                limit: None,
                offset: None,
            },
            |expr| {
                if let ClauseExpr::Limit { offset, .. } = expr {
                    *offset = Some(n);
                }
            },
        )
    }

    pub fn for_update(&mut self) -> &mut Self {
        self.add_clause(ClauseExpr::Locking(LockStrength::Update))
    }

    pub fn for_share(&mut self) -> &mut Self {
        self.add_clause(ClauseExpr::Locking(LockStrength::Share))
    }

    /// 按给定顺序渲染 clause；没有主体的 clause（包括只挂了 hint 的未知名称）被跳过。
    pub fn build_clauses(&self, names: &[&str]) -> BuiltSql {
        let mut writer = SqlWriter::new(self.flavor);
        let mut first = true;
        for name in names {
            let Some(clause) = self.clauses.get(*name) else {
                continue;
            };
            if clause.expression.is_none() {
                continue;
            }
            if !first {
                writer.write_char(' ');
            }
            first = false;
            clause.build(&mut writer);
        }
        writer.into_built()
    }

    /// 构建 SELECT：缺省列为 `*`，缺省 FROM 为语句的表。
    pub fn build_select(&self) -> BuiltSql {
        let mut stmt = self.clone();
        stmt.add_clause_if_not_exists(ClauseExpr::Select(Select::default()));
        let table = Table::new(self.table.as_str());
        stmt.update_expression(
            "FROM",
            || ClauseExpr::From(FromTables::default()),
            |expr| {
                if let ClauseExpr::From(from) = expr
                    && from.tables.is_empty()
                {
                    from.tables.push(table);
                }
            },
        );

        let built = stmt.build_clauses(&SELECT_CLAUSES);
        debug!(
            flavor = %built.flavor,
            sql = %built.sql,
            vars = built.vars.len(),
            "built select statement"
        );
        built
    }

    /// 构建 UPDATE：`assignments` 追加到 SET。
    pub fn build_update(&self, assignments: impl IntoIterator<Item = Assignment>) -> BuiltSql {
        let mut stmt = self.clone();
        stmt.add_clause_if_not_exists(ClauseExpr::Update(Table::new(self.table.as_str())));
        stmt.add_clause(ClauseExpr::Set(assignments.into_iter().collect()));

        let built = stmt.build_clauses(&UPDATE_CLAUSES);
        debug!(
            flavor = %built.flavor,
            sql = %built.sql,
            vars = built.vars.len(),
            "built update statement"
        );
        built
    }
}
