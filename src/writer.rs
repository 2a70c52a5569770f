//! SqlWriter：clause 渲染时的输出端，负责拼接文本、Quote 标识符与收集参数。

use crate::flavor::Flavor;
use crate::value::SqlValue;

/// 渲染结果：SQL 文本 + 按占位符顺序排列的参数。
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSql {
    pub sql: String,
    pub vars: Vec<SqlValue>,
    pub flavor: Flavor,
}

#[derive(Debug, Clone)]
pub struct SqlWriter {
    flavor: Flavor,
    buf: String,
    vars: Vec<SqlValue>,
}

impl SqlWriter {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            buf: String::new(),
            vars: Vec::new(),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 写入 Quote 后的标识符；`a.b` 会被拆成两段分别 Quote，`*` 原样保留。
    pub fn write_quoted(&mut self, ident: &str) {
        for (idx, part) in ident.split('.').enumerate() {
            if idx > 0 {
                self.buf.push('.');
            }
            if part == "*" {
                self.buf.push('*');
            } else {
                self.buf.push_str(&self.flavor.quote(part));
            }
        }
    }

    /// 写入一个占位符并记录参数值。
    pub fn add_var(&mut self, value: impl Into<SqlValue>) {
        self.vars.push(value.into());
        let idx = self.vars.len();
        self.flavor.write_placeholder(idx, &mut self.buf);
    }

    pub fn into_built(self) -> BuiltSql {
        BuiltSql {
            sql: self.buf,
            vars: self.vars,
            flavor: self.flavor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SqlWriter;
    use crate::{Flavor, SqlValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn write_quoted_splits_on_dot() {
        let mut w = SqlWriter::new(Flavor::MySQL);
        w.write_quoted("user2.id");
        w.write_char(',');
        w.write_quoted("companies.*");
        assert_eq!(w.into_built().sql, "`user2`.`id`,`companies`.*");
    }

    #[test]
    fn add_var_numbers_postgres_placeholders() {
        let mut w = SqlWriter::new(Flavor::PostgreSQL);
        w.write_str("a = ");
        w.add_var(1_i64);
        w.write_str(" AND b = ");
        w.add_var("x");
        let built = w.into_built();
        assert_eq!(built.sql, "a = $1 AND b = $2");
        assert_eq!(
            built.vars,
            vec![SqlValue::I64(1), SqlValue::String("x".into())]
        );
    }
}
