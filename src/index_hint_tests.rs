#[cfg(test)]
mod tests {
    use crate::index_hint::{force_index, ignore_index, use_index};
    use crate::{Assignment, Column, Expr, Flavor, RawExpr, SqlValue, Statement, Table, hints};
    use pretty_assertions::assert_eq;

    fn stmt(table: &str) -> Statement {
        let mut stmt = Statement::new(table);
        stmt.set_flavor(Flavor::MySQL);
        stmt
    }

    fn no_vars() -> Vec<SqlValue> {
        Vec::new()
    }

    #[test]
    fn use_index_after_table() {
        let mut s = stmt("users");
        s.clauses(use_index(["user_name"]));
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` USE INDEX (`user_name`)"
        );
    }

    #[test]
    fn force_index_for_join() {
        let mut s = stmt("users");
        s.clauses(force_index(["user_name", "user_id"]).for_join());
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` FORCE INDEX FOR JOIN (`user_name`,`user_id`)"
        );
    }

    #[test]
    fn several_directives_render_in_attachment_order() {
        let mut s = stmt("users");
        s.clauses(vec![
            force_index(["user_name", "user_id"]).for_join(),
            ignore_index(["user_name"]).for_group_by(),
        ]);
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` FORCE INDEX FOR JOIN (`user_name`,`user_id`) IGNORE INDEX FOR GROUP BY (`user_name`)"
        );
    }

    #[test]
    fn same_directive_twice_renders_twice() {
        let mut s = stmt("users");
        let hint = force_index(["a"]);
        s.clauses(&hint).clauses(&hint);
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` FORCE INDEX (`a`) FORCE INDEX (`a`)"
        );
    }

    #[test]
    fn empty_directive_is_skipped() {
        let mut s = stmt("users");
        s.clauses(use_index(Vec::<String>::new()));
        assert_eq!(s.build_select().sql, "SELECT * FROM `users`");

        let mut s = stmt("users");
        s.clauses(use_index(Vec::<String>::new()))
            .clauses(force_index(["a"]));
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` FORCE INDEX (`a`)"
        );
    }

    #[test]
    fn use_index_on_update() {
        let mut s = stmt("users");
        s.clauses(use_index(["user_name"]))
            .where_("name = ?", ["xxx"]);
        assert_eq!(
            s.build_update([Assignment::new("name", "jinzhu")]).sql,
            "UPDATE `users` USE INDEX (`user_name`) SET `name`=? WHERE name = ?"
        );
    }

    #[test]
    fn index_hint_goes_between_table_and_joins() {
        let mut s = stmt("user2");
        s.clauses(force_index(["user_name"]))
            .select([
                Column::new("user2.id"),
                Column::new("user2.name"),
                Column::new("user2.company_id"),
                Column::new("Company.id").alias("Company__id"),
                Column::new("Company.name").alias("Company__name"),
            ])
            .left_join(
                Table::new("companies").alias("Company"),
                RawExpr::new("`user2`.`company_id` = `Company`.`id`", no_vars()),
            );
        assert_eq!(
            s.build_select().sql,
            "SELECT `user2`.`id`,`user2`.`name`,`user2`.`company_id`,`Company`.`id` AS `Company__id`,`Company`.`name` AS `Company__name` FROM `user2` FORCE INDEX (`user_name`) LEFT JOIN `companies` `Company` ON `user2`.`company_id` = `Company`.`id`"
        );
    }

    #[test]
    fn other_after_fragments_follow_joins() {
        let mut s = stmt("users");
        s.clauses(hints::comment_after("from", "c1"))
            .inner_join(
                "orders",
                RawExpr::new("orders.user_id = users.id", no_vars()),
            )
            .clauses(force_index(["idx_a"]))
            .clauses(hints::comment_after("from", "c2"))
            .clauses(use_index(["idx_b"]).for_order_by());
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` FORCE INDEX (`idx_a`) USE INDEX FOR ORDER BY (`idx_b`) INNER JOIN `orders` ON orders.user_id = users.id /* c1 */ /* c2 */"
        );
    }

    #[test]
    fn before_and_after_name_on_from_are_kept() {
        let mut s = stmt("users");
        s.clauses(hints::comment_before("from", "b"))
            .clauses(hints::comment("from", "n"))
            .clauses(force_index(["a"]));
        assert_eq!(
            s.build_select().sql,
            "SELECT * /* b */ FROM /* n */ `users` FORCE INDEX (`a`)"
        );
    }

    #[test]
    fn empty_fragments_around_from_keyword_add_no_space() {
        let mut s = stmt("users");
        let from = s.clause_entry("from");
        from.before_expression = Some(Expr::raw(""));
        from.after_name_expression = Some(Expr::Exprs(vec![Expr::raw("")]));
        s.clauses(force_index(["a"]));
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` FORCE INDEX (`a`)"
        );
    }

    #[test]
    fn joins_without_index_hint_use_default_rendering() {
        let mut s = stmt("users");
        s.left_join(
            "companies",
            RawExpr::new("companies.id = users.company_id", no_vars()),
        );
        assert!(s.clause("from").is_some_and(|c| c.builder.is_none()));
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM `users` LEFT JOIN `companies` ON companies.id = users.company_id"
        );
    }

    #[test]
    fn attaches_to_from_and_update_only() {
        let mut s = stmt("users");
        s.clauses(force_index(["a"]));
        let from = s.clause("FROM").expect("from clause");
        assert!(from.builder.is_some());
        assert!(from.expression.is_none());
        let update = s.clause("UPDATE").expect("update clause");
        assert!(update.builder.is_none());
        assert!(update.after_expression.is_some());
        assert!(s.clause("SELECT").is_none());
    }

    #[test]
    fn quotes_follow_flavor() {
        let mut s = stmt("users");
        s.set_flavor(Flavor::SQLite);
        s.clauses(ignore_index(["idx"]));
        assert_eq!(
            s.build_select().sql,
            "SELECT * FROM \"users\" IGNORE INDEX (\"idx\")"
        );
    }
}
