pub mod cli;
pub mod clock;
pub mod config;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;
pub mod tui;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use models::{JournalEntry, Task};
pub use storage::{KeyValueStore, MemoryStorage, SqliteStorage};
pub use store::{JournalStore, StoreOptions};
pub use utils::Profile;
