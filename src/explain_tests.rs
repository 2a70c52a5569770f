#[cfg(test)]
mod tests {
    use crate::{Assignment, ExplainError, Flavor, SqlValue, Statement, hints, index_hint};
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn explain_update_with_hints() {
        let mut stmt = Statement::new("users");
        stmt.set_flavor(Flavor::MySQL);
        stmt.clauses(hints::new("hint"))
            .clauses(index_hint::use_index(["user_name"]))
            .where_("name = ?", ["it's"]);
        let built = stmt.build_update([Assignment::new("name", "jinzhu")]);
        assert_eq!(
            built.explain().unwrap(),
            "UPDATE /*+ hint */ `users` USE INDEX (`user_name`) SET `name`='jinzhu' WHERE name = 'it\\'s'"
        );
    }

    #[test]
    fn explain_skips_comments_and_strings() {
        let sql = "SELECT /* why? */ * FROM t WHERE a = '?' AND b = ?";
        assert_eq!(
            Flavor::SQLite
                .explain(sql, &[SqlValue::Bool(true)])
                .unwrap(),
            "SELECT /* why? */ * FROM t WHERE a = '?' AND b = TRUE"
        );
    }

    #[test]
    fn explain_skips_backslash_escaped_quotes() {
        let mut stmt = Statement::new("users");
        stmt.set_flavor(Flavor::MySQL);
        stmt.where_("name = 'a\\'b' AND id = ?", [1_i64]);
        assert_eq!(
            stmt.build_select().explain().unwrap(),
            "SELECT * FROM `users` WHERE name = 'a\\'b' AND id = 1"
        );

        // PostgreSQL 中 `\` 不是转义符，`'a\'` 已经结束字符串
        assert_eq!(
            Flavor::PostgreSQL
                .explain("a = 'a\\' AND b = $1", &[SqlValue::I64(2)])
                .unwrap(),
            "a = 'a\\' AND b = 2"
        );
    }

    #[test]
    fn explain_numbered_placeholders() {
        let vars = [SqlValue::I64(1), SqlValue::from("x"), SqlValue::Null];
        assert_eq!(
            Flavor::PostgreSQL
                .explain("a = $2 AND b = $1 AND c IS $3", &vars)
                .unwrap(),
            "a = 'x' AND b = 1 AND c IS NULL"
        );
        assert_eq!(
            Flavor::SQLServer
                .explain("a = @p1 AND b = @p2 AND c = @p3", &vars)
                .unwrap(),
            "a = 1 AND b = N'x' AND c = NULL"
        );
    }

    #[test]
    fn explain_keeps_out_of_range_placeholder_text() {
        assert_eq!(
            Flavor::PostgreSQL
                .explain("a = $99999999999999999999999", &[])
                .unwrap(),
            "a = $99999999999999999999999"
        );
        assert_eq!(
            Flavor::PostgreSQL
                .explain("a = $0 AND b = $$", &[])
                .unwrap(),
            "a = $0 AND b = $$"
        );
    }

    #[test]
    fn explain_non_finite_floats_as_null() {
        let vars = [
            SqlValue::F64(f64::NAN),
            SqlValue::F64(f64::INFINITY),
            SqlValue::F64(1.5),
        ];
        assert_eq!(Flavor::MySQL.explain("? ? ?", &vars).unwrap(), "NULL NULL 1.5");
    }

    #[test]
    fn explain_bytes_and_datetime() {
        let vars = [
            SqlValue::Bytes(vec![0x01, 0xAB]),
            SqlValue::from(datetime!(2024-01-02 03:04:05 UTC)),
        ];
        assert_eq!(
            Flavor::MySQL.explain("? ?", &vars).unwrap(),
            "X'01AB' '2024-01-02 03:04:05.000000'"
        );
        assert_eq!(
            Flavor::PostgreSQL.explain("$1", &vars[..1]).unwrap(),
            "'\\x01AB'::bytea"
        );
    }

    #[test]
    fn explain_reports_mismatched_vars() {
        assert!(matches!(
            Flavor::MySQL.explain("a = ? AND b = ?", &[SqlValue::I64(1)]),
            Err(ExplainError::MissingVar(2))
        ));
        assert!(matches!(
            Flavor::PostgreSQL.explain("a = $1", &[SqlValue::I64(1), SqlValue::I64(2)]),
            Err(ExplainError::UnusedVars { unused: 1 })
        ));
    }
}
