use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, RuntimeErr, SqlErr, Statement};
use std::path::PathBuf;
use tokio::fs;

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<OrmConn> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Minimal migration runner that executes SQL files in `migrations/` in filename order.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        tracing::debug!(file = %file.display(), "applying migration");
        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements cannot contain multiple commands,
        // so split the migration file and run each statement individually.
        for stmt in sql.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            let statement = format!("{stmt};");
            conn.execute(Statement::from_string(backend, statement))
                .await?;
        }
    }

    Ok(())
}

/// Which unique column of a product a failed insert collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Id,
    Name,
    Other,
}

impl ConflictField {
    /// Classify a Postgres constraint name (or the raw error message when the
    /// driver did not report one). The primary key wins over `name`.
    pub fn from_constraint(constraint: &str) -> Self {
        let constraint = constraint.to_ascii_lowercase();
        if constraint.contains("pkey") || constraint.contains("_id_key") {
            ConflictField::Id
        } else if constraint.contains("name") {
            ConflictField::Name
        } else {
            ConflictField::Other
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConflictField::Id => "Product id already exists, please enter a different id!",
            ConflictField::Name => "Product name already exists, please choose a different name!",
            ConflictField::Other => "A product with the same information already exists!",
        }
    }
}

/// Returns the conflicting field when `err` is a unique-constraint violation.
pub fn unique_conflict(err: &DbErr) -> Option<ConflictField> {
    let message = match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(message) => message,
        _ => return None,
    };

    let constraint = match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => {
            unique_constraint_name(e)
        }
        _ => None,
    };

    Some(ConflictField::from_constraint(
        constraint.as_deref().unwrap_or(&message),
    ))
}

fn unique_constraint_name(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint().map(str::to_owned))
}
