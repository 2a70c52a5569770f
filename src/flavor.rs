//! SQL Flavor（方言）：控制标识符 Quote 与占位符风格。

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 支持的方言。索引 hint 语法本身只对 MySQL 系生效，其余方言仍可渲染注释类 hint。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
    SQLServer,
    ClickHouse,
    Doris,
}

static DEFAULT_FLAVOR: AtomicU8 = AtomicU8::new(Flavor::MySQL as u8);
static DEFAULT_FLAVOR_LOCK: Mutex<()> = Mutex::new(());

impl Flavor {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::PostgreSQL,
            2 => Self::SQLite,
            3 => Self::SQLServer,
            4 => Self::ClickHouse,
            5 => Self::Doris,
            _ => Self::MySQL,
        }
    }
}

/// 获取当前全局默认 Flavor，新建的 `Statement` 以它为初始值。
pub fn default_flavor() -> Flavor {
    Flavor::from_u8(DEFAULT_FLAVOR.load(Ordering::Relaxed))
}

/// 设置全局默认 Flavor，返回旧值。
pub fn set_default_flavor(flavor: Flavor) -> Flavor {
    let old = DEFAULT_FLAVOR.swap(flavor as u8, Ordering::Relaxed);
    Flavor::from_u8(old)
}

/// 修改全局默认 Flavor 的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultFlavorGuard {
    _lock: MutexGuard<'static, ()>,
    old: Flavor,
}

impl Drop for DefaultFlavorGuard {
    fn drop(&mut self) {
        set_default_flavor(self.old);
    }
}

/// 在一个作用域内临时设置 DefaultFlavor，退出作用域后自动恢复。
pub fn set_default_flavor_scoped(flavor: Flavor) -> DefaultFlavorGuard {
    let lock = DEFAULT_FLAVOR_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_flavor(flavor);
    DefaultFlavorGuard { _lock: lock, old }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
            Self::ClickHouse => "ClickHouse",
            Self::Doris => "Doris",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown sql flavor `{0}`")]
pub struct ParseFlavorError(pub String);

impl FromStr for Flavor {
    type Err = ParseFlavorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySQL),
            "postgresql" | "postgres" => Ok(Self::PostgreSQL),
            "sqlite" => Ok(Self::SQLite),
            "sqlserver" | "mssql" => Ok(Self::SQLServer),
            "clickhouse" => Ok(Self::ClickHouse),
            "doris" => Ok(Self::Doris),
            _ => Err(ParseFlavorError(s.to_string())),
        }
    }
}

impl Flavor {
    /// 为单个标识符加引号（不拆分 `.`）。
    pub fn quote(self, name: &str) -> String {
        match self {
            Self::MySQL | Self::ClickHouse | Self::Doris => format!("`{name}`"),
            Self::PostgreSQL | Self::SQLite | Self::SQLServer => format!("\"{name}\""),
        }
    }

    /// 写入第 `index_1_based` 个参数的占位符。
    pub(crate) fn write_placeholder(self, index_1_based: usize, out: &mut String) {
        match self {
            Self::PostgreSQL => {
                out.push('$');
                out.push_str(&index_1_based.to_string());
            }
            Self::SQLServer => {
                out.push_str("@p");
                out.push_str(&index_1_based.to_string());
            }
            _ => out.push('?'),
        }
    }
}
