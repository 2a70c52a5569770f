//! Explain：把参数以字面量形式回填进 SQL，仅用于日志与调试，不应直接执行。

use crate::flavor::Flavor;
use crate::value::SqlValue;
use crate::writer::BuiltSql;
use time::macros::format_description;

#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    #[error("placeholder #{0} has no matching var")]
    MissingVar(usize),
    #[error("{unused} var(s) left without placeholder")]
    UnusedVars { unused: usize },
    #[error("format datetime: {0}")]
    Format(#[from] time::error::Format),
}

impl BuiltSql {
    pub fn explain(&self) -> Result<String, ExplainError> {
        self.flavor.explain(&self.sql, &self.vars)
    }
}

impl Flavor {
    /// 按本方言的占位符规则回填参数。引号字符串与 `/* */` 注释内部的字符不被视为占位符。
    pub fn explain(self, sql: &str, vars: &[SqlValue]) -> Result<String, ExplainError> {
        let mut out = String::with_capacity(sql.len() + vars.len() * 8);
        let mut used = vec![false; vars.len()];
        let mut sequential = 0usize;
        let mut chars = sql.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '\'' | '"' | '`' => {
                    out.push(c);
                    while let Some((_, q)) = chars.next() {
                        out.push(q);
                        if q == '\\' && c != '`' && self.backslash_escapes() {
                            // 转义后的字符不会结束引号
                            if let Some((_, escaped)) = chars.next() {
                                out.push(escaped);
                            }
                        } else if q == c {
                            break;
                        }
                    }
                }
                '/' if sql[pos..].starts_with("/*") => {
                    let end = sql[pos..].find("*/").map_or(sql.len(), |i| pos + i + 2);
                    out.push_str(&sql[pos..end]);
                    while chars.peek().is_some_and(|(p, _)| *p < end) {
                        chars.next();
                    }
                }
                '?' if matches!(
                    self,
                    Flavor::MySQL | Flavor::SQLite | Flavor::ClickHouse | Flavor::Doris
                ) =>
                {
                    sequential += 1;
                    let idx = sequential - 1;
                    let v = vars.get(idx).ok_or(ExplainError::MissingVar(sequential))?;
                    used[idx] = true;
                    encode_value(&mut out, v, self)?;
                }
                '$' if self == Flavor::PostgreSQL => {
                    let digits = take_digits(&mut chars);
                    write_numbered(&mut out, "$", &digits, vars, &mut used, self)?;
                }
                '@' if self == Flavor::SQLServer && sql[pos..].starts_with("@p") => {
                    chars.next();
                    let digits = take_digits(&mut chars);
                    write_numbered(&mut out, "@p", &digits, vars, &mut used, self)?;
                }
                _ => out.push(c),
            }
        }

        let unused = used.iter().filter(|u| !**u).count();
        if unused > 0 {
            return Err(ExplainError::UnusedVars { unused });
        }
        Ok(out)
    }

    /// 字符串字面量内的 `\` 是否为转义符。
    fn backslash_escapes(self) -> bool {
        matches!(self, Flavor::MySQL | Flavor::ClickHouse | Flavor::Doris)
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut digits = String::new();
    while let Some((_, d)) = chars.peek().copied().filter(|(_, d)| d.is_ascii_digit()) {
        digits.push(d);
        chars.next();
    }
    digits
}

fn write_numbered(
    out: &mut String,
    marker: &str,
    digits: &str,
    vars: &[SqlValue],
    used: &mut [bool],
    flavor: Flavor,
) -> Result<(), ExplainError> {
    let Some(n) = digits.parse::<usize>().ok().filter(|n| *n > 0) else {
        // 不是占位符（例如 `$$` 或超出范围的编号），原样输出
        out.push_str(marker);
        out.push_str(digits);
        return Ok(());
    };
    let v = vars.get(n - 1).ok_or(ExplainError::MissingVar(n))?;
    used[n - 1] = true;
    encode_value(out, v, flavor)
}

fn encode_value(out: &mut String, v: &SqlValue, flavor: Flavor) -> Result<(), ExplainError> {
    match v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => match flavor {
            Flavor::SQLServer => out.push_str(if *b { "1" } else { "0" }),
            _ => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        },
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        // NaN 与 inf 没有 SQL 字面量
        SqlValue::F64(n) if !n.is_finite() => out.push_str("NULL"),
        SqlValue::F64(n) => out.push_str(&n.to_string()),
        SqlValue::String(s) => quote_string(out, s, flavor),
        SqlValue::Bytes(data) => encode_bytes(out, data, flavor),
        SqlValue::DateTime(dt) => {
            let formatted = match flavor {
                Flavor::SQLServer => dt.format(format_description!(
                    "'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6] [offset_hour sign:mandatory]:[offset_minute]'"
                ))?,
                _ => dt.format(format_description!(
                    "'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]'"
                ))?,
            };
            out.push_str(&formatted);
        }
    }
    Ok(())
}

fn encode_bytes(out: &mut String, data: &[u8], flavor: Flavor) {
    if data.is_empty() {
        out.push_str("NULL");
        return;
    }

    let (open, close) = match flavor {
        Flavor::PostgreSQL => ("'\\x", "'::bytea"),
        Flavor::SQLServer => ("0x", ""),
        Flavor::ClickHouse => ("unhex('", "')"),
        Flavor::MySQL | Flavor::SQLite | Flavor::Doris => ("X'", "'"),
    };
    out.push_str(open);
    for b in data {
        out.push_str(&format!("{b:02X}"));
    }
    out.push_str(close);
}

fn quote_string(out: &mut String, s: &str, flavor: Flavor) {
    if flavor == Flavor::SQLServer {
        out.push('N');
    }

    out.push('\'');
    for ch in s.chars() {
        match (ch, flavor) {
            ('\'', Flavor::PostgreSQL | Flavor::SQLite | Flavor::SQLServer) => out.push_str("''"),
            ('\'', _) => out.push_str("\\'"),
            ('\\', Flavor::MySQL | Flavor::ClickHouse | Flavor::Doris) => out.push_str("\\\\"),
            ('\n', Flavor::MySQL | Flavor::ClickHouse | Flavor::Doris) => out.push_str("\\n"),
            ('\0', Flavor::MySQL | Flavor::ClickHouse | Flavor::Doris) => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}
