//! Expr：可挂在 clause 槽位上的表达式片段（注释 hint、索引 hint、列表、原始 SQL 与自定义片段）。

use crate::hints::Hints;
use crate::index_hint::IndexHint;
use crate::value::SqlValue;
use crate::writer::SqlWriter;
use dyn_clone::DynClone;
use std::fmt;

/// 调用方自定义的可渲染片段。
pub trait Expression: DynClone + fmt::Debug {
    fn build(&self, writer: &mut SqlWriter);

    /// 渲染结果为空时返回 true，列表渲染会跳过它。
    fn is_empty(&self) -> bool {
        false
    }
}

dyn_clone::clone_trait_object!(Expression);

/// 原始 SQL 片段：`?` 依次绑定 `vars`。
#[derive(Debug, Clone, PartialEq)]
pub struct RawExpr {
    pub sql: String,
    pub vars: Vec<SqlValue>,
}

impl RawExpr {
    pub fn new(
        sql: impl Into<String>,
        vars: impl IntoIterator<Item = impl Into<SqlValue>>,
    ) -> Self {
        Self {
            sql: sql.into(),
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }

    pub fn build(&self, writer: &mut SqlWriter) {
        let mut vars = self.vars.iter();
        let mut last = 0;
        for (idx, _) in self.sql.match_indices('?') {
            let Some(v) = vars.next() else {
                break;
            };
            writer.write_str(&self.sql[last..idx]);
            writer.add_var(v.clone());
            last = idx + 1;
        }
        writer.write_str(&self.sql[last..]);
    }
}

/// 挂在 before / after-name / after 槽位上的表达式。
#[derive(Debug, Clone)]
pub enum Expr {
    Hints(Hints),
    IndexHint(IndexHint),
    /// 同一槽位上的多个片段，按插入顺序以单个空格分隔渲染。
    Exprs(Vec<Expr>),
    Raw(RawExpr),
    Custom(Box<dyn Expression>),
}

impl Expr {
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(RawExpr {
            sql: sql.into(),
            vars: Vec::new(),
        })
    }

    pub fn custom(expr: impl Expression + 'static) -> Self {
        Self::Custom(Box::new(expr))
    }

    pub fn build(&self, writer: &mut SqlWriter) {
        match self {
            Self::Hints(h) => h.build(writer),
            Self::IndexHint(h) => h.build(writer),
            Self::Exprs(exprs) => {
                let mut first = true;
                for expr in exprs.iter().filter(|e| !e.is_empty()) {
                    if !first {
                        writer.write_char(' ');
                    }
                    first = false;
                    expr.build(writer);
                }
            }
            Self::Raw(raw) => raw.build(writer),
            Self::Custom(c) => c.build(writer),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Hints(_) => false,
            Self::IndexHint(h) => h.is_empty(),
            Self::Exprs(exprs) => exprs.iter().all(Expr::is_empty),
            Self::Raw(raw) => raw.sql.is_empty(),
            Self::Custom(c) => c.is_empty(),
        }
    }

    /// 追加到当前表达式之后：返回 `Exprs[self, next]`。
    pub(crate) fn and_then(self, next: Expr) -> Expr {
        Expr::Exprs(vec![self, next])
    }
}

impl From<Hints> for Expr {
    fn from(v: Hints) -> Self {
        Self::Hints(v)
    }
}

impl From<IndexHint> for Expr {
    fn from(v: IndexHint) -> Self {
        Self::IndexHint(v)
    }
}

impl From<RawExpr> for Expr {
    fn from(v: RawExpr) -> Self {
        Self::Raw(v)
    }
}

/// 把（可能嵌套的）`Exprs` 展平，拆成索引 hint 与其余片段两个有序序列。
pub fn partition_index_hints(expr: Option<&Expr>) -> (Vec<&IndexHint>, Vec<&Expr>) {
    let mut index_hints = Vec::new();
    let mut others = Vec::new();
    if let Some(expr) = expr {
        collect_partitioned(expr, &mut index_hints, &mut others);
    }
    (index_hints, others)
}

fn collect_partitioned<'a>(
    expr: &'a Expr,
    index_hints: &mut Vec<&'a IndexHint>,
    others: &mut Vec<&'a Expr>,
) {
    match expr {
        Expr::Exprs(exprs) => {
            for e in exprs {
                collect_partitioned(e, index_hints, others);
            }
        }
        Expr::IndexHint(h) => index_hints.push(h),
        other => others.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::{Expr, Expression, RawExpr, partition_index_hints};
    use crate::writer::SqlWriter;
    use crate::{Flavor, SqlValue, hints, index_hint};
    use pretty_assertions::assert_eq;

    fn render(expr: &Expr) -> String {
        let mut w = SqlWriter::new(Flavor::MySQL);
        expr.build(&mut w);
        w.into_built().sql
    }

    #[derive(Debug, Clone)]
    struct Label(&'static str);

    impl Expression for Label {
        fn build(&self, writer: &mut SqlWriter) {
            writer.write_str(self.0);
        }
    }

    #[test]
    fn exprs_join_with_single_space_and_skip_empty() {
        let e = Expr::Exprs(vec![
            hints::comment("select", "a").into(),
            index_hint::use_index(Vec::<String>::new()).into(),
            Expr::custom(Label("LOCK")),
            Expr::raw(""),
            hints::comment("select", "b").into(),
        ]);
        assert_eq!(render(&e), "/* a */ LOCK /* b */");
    }

    #[test]
    fn raw_binds_vars_in_order() {
        let mut w = SqlWriter::new(Flavor::PostgreSQL);
        RawExpr::new("id = ? AND name = ?", [SqlValue::I64(1), "x".into()]).build(&mut w);
        let built = w.into_built();
        assert_eq!(built.sql, "id = $1 AND name = $2");
        assert_eq!(built.vars.len(), 2);
    }

    #[test]
    fn raw_keeps_extra_question_marks_without_vars() {
        let mut w = SqlWriter::new(Flavor::MySQL);
        RawExpr::new("a = ? OR b = ?", [1_i64]).build(&mut w);
        assert_eq!(w.into_built().sql, "a = ? OR b = ?");
    }

    #[test]
    fn partition_walks_nested_lists() {
        let nested = Expr::Exprs(vec![
            Expr::Exprs(vec![
                index_hint::force_index(["a"]).into(),
                hints::comment_after("from", "c1").into(),
            ]),
            index_hint::ignore_index(["b"]).for_group_by().into(),
            hints::comment_after("from", "c2").into(),
        ]);

        let (index_hints, others) = partition_index_hints(Some(&nested));
        assert_eq!(index_hints.len(), 2);
        assert_eq!(index_hints[0].columns(), ["a".to_string()]);
        assert_eq!(index_hints[1].columns(), ["b".to_string()]);
        let rendered: Vec<String> = others.iter().map(|e| render(e)).collect();
        assert_eq!(rendered, vec!["/* c1 */", "/* c2 */"]);
    }

    #[test]
    fn partition_of_nothing_is_empty() {
        let (index_hints, others) = partition_index_hints(None);
        assert!(index_hints.is_empty());
        assert!(others.is_empty());
    }
}
