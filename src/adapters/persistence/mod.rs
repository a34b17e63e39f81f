pub mod csv_export;
pub mod sqlite_store;

pub use sqlite_store::SqliteReminderStore;
