
pub mod database;
pub mod wrappers;

pub use database::{Database, DBEntry, DB};
pub use wrappers::{
    DatabaseWrapper,
    ModLog,
    BanLog,
    SuggestionLog,
    ConfigDB,
    AllowlistDB,
    WarningsDB,
    BansDB,
    SuggestionsDB,
    SqliteAdmissionStore,
};
