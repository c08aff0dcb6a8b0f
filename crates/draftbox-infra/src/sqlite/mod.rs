//! SQLite storage layer.
//!
//! The draft engine backed by SQLite with WAL mode and split read/write
//! connection pools, plus mapping of driver errors onto the port's error type.

pub mod draft;
pub mod pool;

use draftbox_types::error::RepositoryError;

// Primary SQLite result codes that mean the database itself is unusable,
// as opposed to one statement failing.
const SQLITE_PERM: i32 = 3;
const SQLITE_READONLY: i32 = 8;
const SQLITE_IOERR: i32 = 10;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_FULL: i32 = 13;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_NOTADB: i32 = 26;

/// Classify a driver error as "storage unavailable" or "transaction failed".
pub(crate) fn classify(err: sqlx::Error) -> RepositoryError {
    let unavailable = match &err {
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Migrate(_) => true,
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| {
                matches!(
                    code & 0xff,
                    SQLITE_PERM
                        | SQLITE_READONLY
                        | SQLITE_IOERR
                        | SQLITE_CORRUPT
                        | SQLITE_FULL
                        | SQLITE_CANTOPEN
                        | SQLITE_NOTADB
                )
            })
            .unwrap_or(false),
        _ => false,
    };

    if unavailable {
        RepositoryError::Unavailable(err.to_string())
    } else {
        RepositoryError::Transaction(err.to_string())
    }
}
