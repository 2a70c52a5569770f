//! halo-sql-hints：为 clause 式 SQL builder 注入优化器 hint、注释与索引 hint。
//!
//! ```
//! use halo_hints::{Statement, hints, index_hint};
//!
//! let mut stmt = Statement::new("users");
//! stmt.clauses(hints::new("MAX_EXECUTION_TIME(100)"))
//!     .clauses(index_hint::force_index(["idx_name"]).for_join());
//! assert_eq!(
//!     stmt.build_select().sql,
//!     "SELECT /*+ MAX_EXECUTION_TIME(100) */ * FROM `users` FORCE INDEX FOR JOIN (`idx_name`)"
//! );
//! ```

pub mod clause;
pub mod explain;
#[cfg(test)]
mod explain_tests;
pub mod expr;
pub mod flavor;
pub mod hints;
pub mod index_hint;
#[cfg(test)]
mod index_hint_tests;
pub mod statement;
pub mod value;
pub mod writer;

pub use crate::clause::{
    Assignment, Clause, ClauseBuilder, ClauseExpr, Column, FromTables, Join, JoinKind,
    LockStrength, Select, Table,
};
pub use crate::explain::ExplainError;
pub use crate::expr::{Expr, Expression, RawExpr, partition_index_hints};
pub use crate::flavor::{
    DefaultFlavorGuard, Flavor, ParseFlavorError, default_flavor, set_default_flavor,
    set_default_flavor_scoped,
};
pub use crate::hints::{Hints, Position};
pub use crate::index_hint::{
    IndexHint, IndexHintKind, IndexScope, ParseIndexHintKindError, index_hint_from_clause_builder,
};
pub use crate::statement::{Statement, StatementModifier};
pub use crate::value::SqlValue;
pub use crate::writer::{BuiltSql, SqlWriter};
