//! Persistence module split across logical submodules.

mod connection;
mod slots;

pub use connection::{
    data_dir, default_db_path, ensure_schema, open_database, open_in_memory, DATA_DIR_NAME,
};
pub use slots::{read_slot, write_slot, SqliteSlot};
