
use serenity::async_trait;
use serde::{Serialize, Deserialize};

use std::convert::From;

use crate::databases::database::{Database, DBEntry, DB};
use crate::utility::*;
use crate::admission::{AdmissionRecord, AdmissionStatus, AdmissionStore};
use crate::impl_singleton;


macro_rules! as_db_entry {
    ($name:ident, $($field_name:ident: $field_type:ty),*) => {

        #[derive(Serialize, Deserialize, Clone)]
        pub struct $name {
            pub id: i64,
            pub key: String,
            pub timestamp: i64,
            $(pub $field_name: $field_type),*
        }

        impl $name {
            pub fn new($($field_name: $field_type),*) -> Self {
                $name {
                    id: 0,
                    key: "".to_string(),
                    timestamp: 0,
                    $($field_name),*
                }
            }
            pub fn into(self) -> String {
                let mut relevant_fields = Vec::<String>::new();
                for field in vec![$(self.$field_name.to_string()),*] {
                    relevant_fields.push(field);
                }
                serde_json::to_string(&relevant_fields).unwrap()
            }
        }

        impl From<DBEntry> for $name {
            fn from(entry: DBEntry) -> $name {
                let mut relevant: Vec<String> = serde_json::from_str(&entry.value).unwrap();
                relevant.reverse();
                $name {
                    id: entry.id,
                    key: entry.key,
                    timestamp: entry.timestamp,
                    $($field_name: relevant.pop().unwrap().parse().unwrap()),*
                }
            }
        }
    }
}

as_db_entry!(ModLog, staff_id: String, reason: String);
as_db_entry!(BanLog, staff_id: String, reason: String, expiration_date: i64);
as_db_entry!(SuggestionLog, author_id: String, channel_id: String, content: String, status: String);

impl BanLog {

    pub fn is_permanent(&self) -> bool {
        self.expiration_date == 0
    }

    pub fn is_expired(&self, now: i64) -> bool {
        !self.is_permanent() && self.expiration_date < now
    }

}

pub trait DatabaseWrapper<T: From<DBEntry>>: Send + Sync {

    fn get_database(&self) -> &Database;

    fn get_keys<'a>(&'a self) -> BoxedFuture<'a, Vec<String>> {
        Box::pin(async move {
            self.get_database().get_keys().await
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Result<T>> {
        Box::pin(async move {
            match self.get_database().get(key).await {
                Ok(entry) => Ok(T::from(entry)),
                Err(_)    => Err("Key not found".to_string()),
            }
        })
    }

    fn query<'a>(&'a self, key: &'a str, query_string: &'a str) -> BoxedFuture<'a, Result<Vec<T>>> {
        Box::pin(async move {
            match self.get_database().query(key, query_string).await {
                Ok(entries) => Ok(entries.into_iter().map(|entry| T::from(entry)).collect()),
                Err(_)      => Err("Query failed".to_string()),
            }
        })
    }

    fn get_all<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Result<Vec<T>>> {
        Box::pin(async move {
            match self.get_database().get_all(key).await {
                Ok(entries) => Ok(entries.into_iter().map(|entry| T::from(entry)).collect()),
                Err(_)      => Err("Key not found".to_string()),
            }
        })
    }

    fn get_last<'a>(&'a self, key: &'a str, limit: u8) -> BoxedFuture<'a, Result<Vec<T>>> {
        Box::pin(async move {
            match self.get_database().get_last(key, limit).await {
                Ok(entries) => Ok(entries.into_iter().map(|entry| T::from(entry)).collect()),
                Err(_)      => Err("Key not found".to_string()),
            }
        })
    }

    fn get_multiple<'a>(&'a self, keys: Vec<&'a str>) -> BoxedFuture<'a, Result<Vec<T>>> {
        Box::pin(async move {
            match self.get_database().get_multiple(keys).await {
                Ok(entries) => Ok(entries.into_iter().map(|entry| T::from(entry)).collect()),
                Err(_)      => Err("Key not found".to_string()),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxedFuture<'a, ()> {
        Box::pin(async move {
            self.get_database().set(key, vec![value]).await
        })
    }

    fn append<'a>(&'a self, key: &'a str, value: &'a str) -> BoxedFuture<'a, ()> {
        Box::pin(async move {
            self.get_database().append(key, value).await
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, ()> {
        Box::pin(async move {
            self.get_database().delete(key).await
        })
    }

    fn delete_by_id<'a>(&'a self, id: i64) -> BoxedFuture<'a, ()> {
        Box::pin(async move {
            self.get_database().delete_by_id(id).await
        })
    }
}

macro_rules! impl_database_wrapper {

    ($name:ident, $db_type:expr, $log_type:ty) => {
        pub struct $name {
            database: Database
        }

        impl $name {
            pub fn new() -> Self {
                $name { database: Database::new($db_type) }
            }
        }

        impl DatabaseWrapper<$log_type> for $name {
            fn get_database(&self) -> &Database {
                &self.database
            }
        }

        impl_singleton!($name);
    };

    ($name:ident, $db_type:expr) => {
        impl_database_wrapper!($name, $db_type, DBEntry);
    };
}

impl_database_wrapper!(ConfigDB, DB::Config);
impl_database_wrapper!(AllowlistDB, DB::Allowlist);
impl_database_wrapper!(WarningsDB, DB::Warnings, ModLog);
impl_database_wrapper!(BansDB, DB::Bans, BanLog);
impl_database_wrapper!(SuggestionsDB, DB::Suggestions, SuggestionLog);


// admission records carry a nested transcript, so the row value holds the
// whole record as json instead of the flat field list the macro produces
pub struct SqliteAdmissionStore;

impl SqliteAdmissionStore {

    pub fn new() -> Self {
        SqliteAdmissionStore {}
    }

    fn decode(entry: &DBEntry) -> Result<AdmissionRecord> {
        serde_json::from_str(&entry.value)
            .map_err(|err| format!("Malformed admission record for '{}': {}", entry.key, err))
    }

}

#[async_trait]
impl AdmissionStore for SqliteAdmissionStore {

    async fn get_record(&self, applicant_id: &str) -> Result<Option<AdmissionRecord>> {
        let entry = AllowlistDB::get_instance().lock().await
            .get(applicant_id).await;
        match entry {
            Ok(entry) => SqliteAdmissionStore::decode(&entry).map(Some),
            Err(_) => Ok(None),
        }
    }

    async fn upsert_record(&self, record: &AdmissionRecord) -> Result<()> {
        let value = serde_json::to_string(record)
            .map_err(|err| format!("Failed to encode admission record: {}", err))?;
        AllowlistDB::get_instance().lock().await
            .set(&record.applicant_id, &value).await;
        Ok(())
    }

    async fn delete_record(&self, applicant_id: &str) -> Result<()> {
        AllowlistDB::get_instance().lock().await
            .delete(applicant_id).await;
        Ok(())
    }

    async fn list_records(&self, filter: Option<AdmissionStatus>) -> Result<Vec<AdmissionRecord>> {
        let db = AllowlistDB::get_instance().lock().await;
        let mut records = Vec::new();
        for key in db.get_keys().await {
            if let Ok(entry) = db.get(&key).await {
                let record = SqliteAdmissionStore::decode(&entry)?;
                if filter.map_or(true, |status| record.status == status) {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

}
