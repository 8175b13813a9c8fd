
use serenity::async_trait;

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::utility::mixed::Result;
use crate::admission::quiz::QuizSettings;
use crate::admission::workflow::{
    AccessGateway,
    AdmissionRecord,
    AdmissionSettings,
    AdmissionStatus,
    AdmissionStore,
    AdmissionWorkflow,
    Applicant,
    Destination,
    InterviewHost,
    Notice,
};


// in-memory stand-ins for the discord-backed collaborators

pub struct MemoryStore {
    records: Mutex<HashMap<String, AdmissionRecord>>,
    upserts: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemoryStore {

    pub fn new() -> Self {
        MemoryStore {
            records: Mutex::new(HashMap::new()),
            upserts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    // seeding bypasses the write counters on purpose
    pub fn seed(&self, record: AdmissionRecord) {
        self.records.lock().unwrap().insert(record.applicant_id.clone(), record);
    }

    pub fn remove(&self, applicant_id: &str) {
        self.records.lock().unwrap().remove(applicant_id);
    }

    pub fn get(&self, applicant_id: &str) -> Option<AdmissionRecord> {
        self.records.lock().unwrap().get(applicant_id).cloned()
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

}

#[async_trait]
impl AdmissionStore for MemoryStore {

    async fn get_record(&self, applicant_id: &str) -> Result<Option<AdmissionRecord>> {
        Ok(self.records.lock().unwrap().get(applicant_id).cloned())
    }

    async fn upsert_record(&self, record: &AdmissionRecord) -> Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap()
            .insert(record.applicant_id.clone(), record.clone());
        Ok(())
    }

    async fn delete_record(&self, applicant_id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().remove(applicant_id);
        Ok(())
    }

    async fn list_records(&self, filter: Option<AdmissionStatus>) -> Result<Vec<AdmissionRecord>> {
        Ok(self.records.lock().unwrap()
            .values()
            .filter(|record| filter.map_or(true, |status| record.status == status))
            .cloned()
            .collect())
    }

}

pub struct ScriptedHost {
    replies: Mutex<VecDeque<Option<String>>>,
    sent: Mutex<Vec<(Destination, Notice)>>,
    opened: Mutex<Vec<Destination>>,
    closed: Mutex<Vec<Destination>>,
    next_space: AtomicU64,
}

impl ScriptedHost {

    pub fn new(replies: Vec<Option<String>>) -> Self {
        ScriptedHost {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
            closed: Mutex::new(Vec::new()),
            next_space: AtomicU64::new(1),
        }
    }

    pub fn push_replies(&self, replies: Vec<Option<String>>) {
        self.replies.lock().unwrap().extend(replies);
    }

    pub fn sent(&self) -> Vec<(Destination, Notice)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<Destination> {
        self.opened.lock().unwrap().clone()
    }

    pub fn closed(&self) -> Vec<Destination> {
        self.closed.lock().unwrap().clone()
    }

}

#[async_trait]
impl InterviewHost for ScriptedHost {

    async fn open_space(&self, _applicant_id: &str) -> Result<Destination> {
        let destination = Destination::Channel(self.next_space.fetch_add(1, Ordering::SeqCst));
        self.opened.lock().unwrap().push(destination.clone());
        Ok(destination)
    }

    async fn close_space(&self, destination: &Destination) -> Result<()> {
        self.closed.lock().unwrap().push(destination.clone());
        Ok(())
    }

    async fn send(&self, destination: &Destination, notice: &Notice) -> Result<()> {
        self.sent.lock().unwrap().push((destination.clone(), notice.clone()));
        Ok(())
    }

    async fn await_reply(&self,
            _applicant_id: &str,
            _destination: &Destination,
            _timeout: Duration) -> Option<String> {
        self.replies.lock().unwrap().pop_front().flatten()
    }

}

pub struct RecordingGateway {
    granted: Mutex<Vec<String>>,
    revoked: Mutex<Vec<String>>,
}

impl RecordingGateway {

    pub fn new() -> Self {
        RecordingGateway {
            granted: Mutex::new(Vec::new()),
            revoked: Mutex::new(Vec::new()),
        }
    }

    pub fn granted(&self) -> Vec<String> {
        self.granted.lock().unwrap().clone()
    }

    pub fn revoked(&self) -> Vec<String> {
        self.revoked.lock().unwrap().clone()
    }

}

#[async_trait]
impl AccessGateway for RecordingGateway {

    async fn grant_access(&self, applicant_id: &str) {
        self.granted.lock().unwrap().push(applicant_id.to_string());
    }

    async fn revoke_access(&self, applicant_id: &str) {
        self.revoked.lock().unwrap().push(applicant_id.to_string());
    }

}

// bundles the fakes the way the command layer bundles the real collaborators
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub host: Arc<ScriptedHost>,
    pub access: Arc<RecordingGateway>,
}

impl Harness {

    pub fn new(replies: Vec<Option<String>>) -> Self {
        Harness {
            store: Arc::new(MemoryStore::new()),
            host: Arc::new(ScriptedHost::new(replies)),
            access: Arc::new(RecordingGateway::new()),
        }
    }

    pub fn workflow(&self) -> AdmissionWorkflow {
        AdmissionWorkflow::new(
            self.store.clone(),
            self.host.clone(),
            self.access.clone(),
        )
    }

}

pub fn applicant(id: &str, account_age_days: i64) -> Applicant {
    Applicant { id: id.to_string(), account_age_days }
}

// two questions, cooperative timings for tests
pub fn settings(passing_score: u32) -> AdmissionSettings {
    AdmissionSettings {
        quiz: QuizSettings {
            questions: vec!["q1".to_string(), "q2".to_string()],
            expected_answers: vec!["alpha beta".to_string(), "gamma delta".to_string()],
            passing_score,
            question_timeout: Duration::from_secs(60),
            cancel_keyword: "cancel".to_string(),
        },
        min_account_age_days: 0,
        auto_approve: false,
        grace_delay: Duration::from_millis(0),
        broadcast: vec![Destination::Channel(900)],
    }
}
