
use serenity::async_trait;
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumString};
use tokio::sync::Mutex;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::utility::mixed::Result;
use crate::admission::quiz::{QuizEngine, QuizOutcome, QuizReport, QuizSettings, TranscriptEntry};


// ---- Records ---- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decider {
    System,
    Staff(String),
}

impl Decider {
    pub fn mention(&self) -> String {
        match self {
            Decider::System => "the automatic review".to_string(),
            Decider::Staff(id) => format!("<@{}>", id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub applicant_id: String,
    pub status: AdmissionStatus,
    pub decided_by: Option<Decider>,
    pub decided_at: Option<i64>,
    pub transcript: Vec<TranscriptEntry>,
}

impl AdmissionRecord {

    // `decided_by`/`decided_at` are set iff the status is not pending,
    // the two constructors are the only way records come to exist
    pub fn pending(applicant_id: &str, transcript: Vec<TranscriptEntry>) -> Self {
        AdmissionRecord {
            applicant_id: applicant_id.to_string(),
            status: AdmissionStatus::Pending,
            decided_by: None,
            decided_at: None,
            transcript,
        }
    }

    pub fn decided(applicant_id: &str,
            status: AdmissionStatus,
            decided_by: Decider,
            transcript: Vec<TranscriptEntry>) -> Self {
        AdmissionRecord {
            applicant_id: applicant_id.to_string(),
            status,
            decided_by: Some(decided_by),
            decided_at: Some(chrono::Utc::now().timestamp()),
            transcript,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == AdmissionStatus::Pending
    }

}

// ---- Outcomes ---- //

// expected, user-facing conditions; these are answers, not errors
#[derive(Debug, Clone, PartialEq)]
pub enum Denial {
    AlreadyApproved,
    AlreadyPending,
    NotPending,
    AlreadyDecided,
    NotOnAllowlist,
    NoSuchApplication,
    IneligibleTooNew { age_days: i64, required_days: i64 },
    BrokenQuizConfig { questions: usize, answers: usize },
}

impl Denial {

    pub fn notice(&self) -> String {
        match self {
            Denial::AlreadyApproved =>
                "This user is already on the allowlist.".to_string(),
            Denial::AlreadyPending =>
                "There already is a pending application for this user.".to_string(),
            Denial::NotPending =>
                "This application is not pending.".to_string(),
            Denial::AlreadyDecided =>
                "This application has already been decided.".to_string(),
            Denial::NotOnAllowlist =>
                "This user is not on the allowlist.".to_string(),
            Denial::NoSuchApplication =>
                "There is no application for this user.".to_string(),
            Denial::IneligibleTooNew { age_days, required_days } => format!(
                "This account is {} day(s) old but needs to be at least {} day(s) old to apply.",
                age_days, required_days),
            Denial::BrokenQuizConfig { questions, answers } => format!(
                "The interview is misconfigured ({} question(s) but {} expected answer(s)). Please contact an administrator.",
                questions, answers),
        }
    }

}

#[derive(Debug)]
pub enum AdmissionError {
    Denied(Denial),
    Fault(String),
}

impl From<Denial> for AdmissionError {
    fn from(denial: Denial) -> AdmissionError {
        AdmissionError::Denied(denial)
    }
}

pub type AdmissionResult<T> = std::result::Result<T, AdmissionError>;

#[derive(Debug)]
pub enum ApplyOutcome {
    // a scored quiz verdict landed
    Decided { record: AdmissionRecord, score: u32, total: u32 },
    // the application was stored for staff review (or auto-approved)
    Submitted(AdmissionRecord),
    // deliberately leave no trace, the applicant may retry right away
    Cancelled,
    TimedOut,
}

// ---- Collaborators ---- //

#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Channel(u64),
    Direct(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: &str, body: &str) -> Notice {
        Notice { title: title.to_string(), body: body.to_string() }
    }
}

#[async_trait]
pub trait AdmissionStore: Send + Sync {
    async fn get_record(&self, applicant_id: &str) -> Result<Option<AdmissionRecord>>;
    async fn upsert_record(&self, record: &AdmissionRecord) -> Result<()>;
    async fn delete_record(&self, applicant_id: &str) -> Result<()>;
    async fn list_records(&self, filter: Option<AdmissionStatus>) -> Result<Vec<AdmissionRecord>>;
}

#[async_trait]
pub trait InterviewHost: Send + Sync {
    async fn open_space(&self, applicant_id: &str) -> Result<Destination>;
    async fn close_space(&self, destination: &Destination) -> Result<()>;
    async fn send(&self, destination: &Destination, notice: &Notice) -> Result<()>;
    async fn await_reply(&self,
        applicant_id: &str,
        destination: &Destination,
        timeout: Duration) -> Option<String>;
}

// role transitions are best-effort, a guild that cannot be updated never
// unwinds a recorded decision
#[async_trait]
pub trait AccessGateway: Send + Sync {
    async fn grant_access(&self, applicant_id: &str);
    async fn revoke_access(&self, applicant_id: &str);
}

// ---- Settings ---- //

#[derive(Debug, Clone)]
pub struct AdmissionSettings {
    pub quiz: QuizSettings,
    pub min_account_age_days: i64,
    pub auto_approve: bool,
    pub grace_delay: Duration,
    pub broadcast: Vec<Destination>,
}

pub struct Applicant {
    pub id: String,
    pub account_age_days: i64,
}

// ---- Workflow ---- //

enum WriteGuard {
    // quiz verdicts and direct additions land regardless of an earlier
    // rejection, but never on top of an approval
    FreshVerdict,
    // manual decisions only resolve a pending application
    RequirePending,
}

pub struct AdmissionWorkflow {
    store: Arc<dyn AdmissionStore>,
    host: Arc<dyn InterviewHost>,
    access: Arc<dyn AccessGateway>,
    // applicants with an interview in flight; quiz progress is never persisted
    active: Mutex<HashSet<String>>,
    // serializes status writes so the re-read before each write stays authoritative
    decision_gate: Mutex<()>,
}

impl AdmissionWorkflow {

    pub fn new(store: Arc<dyn AdmissionStore>,
            host: Arc<dyn InterviewHost>,
            access: Arc<dyn AccessGateway>) -> AdmissionWorkflow {
        AdmissionWorkflow {
            store,
            host,
            access,
            active: Mutex::new(HashSet::new()),
            decision_gate: Mutex::new(()),
        }
    }

    // ---- Operations ---- //

    pub async fn apply(&self,
            applicant: &Applicant,
            settings: &AdmissionSettings) -> AdmissionResult<ApplyOutcome> {

        // the store is authoritative for the status gate
        if let Some(record) = self.store.get_record(&applicant.id).await
                .map_err(AdmissionError::Fault)? {
            match record.status {
                AdmissionStatus::Approved => return Err(Denial::AlreadyApproved.into()),
                AdmissionStatus::Pending  => return Err(Denial::AlreadyPending.into()),
                AdmissionStatus::Rejected => {}
            }
        }

        if applicant.account_age_days < settings.min_account_age_days {
            return Err(Denial::IneligibleTooNew {
                age_days: applicant.account_age_days,
                required_days: settings.min_account_age_days,
            }.into());
        }

        // a broken question set aborts before any space is allocated
        if settings.quiz.has_questions() {
            settings.quiz.validate().map_err(AdmissionError::Denied)?;
        }

        // one interview per applicant
        if !self.active.lock().await.insert(applicant.id.clone()) {
            return Err(Denial::AlreadyPending.into());
        }
        let outcome = self.run_interview(applicant, settings).await;
        self.active.lock().await.remove(&applicant.id);

        outcome
    }

    pub async fn direct_add(&self,
            applicant_id: &str,
            granted_by: &str,
            reason: &str) -> AdmissionResult<AdmissionRecord> {

        let transcript = vec![TranscriptEntry::plain("Direct Addition", reason)];
        let record = self.commit_decision(
            applicant_id,
            AdmissionStatus::Approved,
            Decider::Staff(granted_by.to_string()),
            Some(transcript),
            WriteGuard::FreshVerdict).await?;

        let notice = Notice::new(
            "Allowlist Approved",
            &format!("You have been added to the allowlist by <@{}>.", granted_by));
        let _ = self.host.send(&Destination::Direct(applicant_id.to_string()), &notice).await;

        Ok(record)
    }

    pub async fn revoke(&self,
            applicant_id: &str,
            revoked_by: &str) -> AdmissionResult<AdmissionRecord> {

        let _gate = self.decision_gate.lock().await;
        let current = self.store.get_record(applicant_id).await
            .map_err(AdmissionError::Fault)?;

        match current {
            Some(record) if record.status == AdmissionStatus::Approved => {
                // an approval is revoked by deleting the record outright
                self.store.delete_record(applicant_id).await
                    .map_err(AdmissionError::Fault)?;
                self.access.revoke_access(applicant_id).await;

                let notice = Notice::new(
                    "Allowlist Revoked",
                    &format!("You have been removed from the allowlist by <@{}>.", revoked_by));
                let _ = self.host.send(&Destination::Direct(applicant_id.to_string()), &notice).await;

                Ok(record)
            },
            _ => Err(Denial::NotOnAllowlist.into()),
        }
    }

    pub async fn manual_decision(&self,
            applicant_id: &str,
            decided_by: &str,
            approve: bool,
            reason: Option<&str>,
            settings: &AdmissionSettings) -> AdmissionResult<AdmissionRecord> {

        let status = match approve {
            true  => AdmissionStatus::Approved,
            false => AdmissionStatus::Rejected,
        };
        let record = self.commit_decision(
            applicant_id,
            status,
            Decider::Staff(decided_by.to_string()),
            None,
            WriteGuard::RequirePending).await?;

        // the decision is durable, notification failures stay non-fatal
        let verdict = self.manual_verdict_notice(&record, reason);
        let _ = self.host.send(&Destination::Direct(applicant_id.to_string()), &verdict).await;
        self.broadcast(settings, &self.broadcast_notice(&record, reason)).await;

        Ok(record)
    }

    pub async fn status(&self, applicant_id: &str) -> AdmissionResult<Option<AdmissionRecord>> {
        self.store.get_record(applicant_id).await.map_err(AdmissionError::Fault)
    }

    pub async fn list(&self, filter: Option<AdmissionStatus>) -> AdmissionResult<Vec<AdmissionRecord>> {
        self.store.list_records(filter).await.map_err(AdmissionError::Fault)
    }

    pub async fn has_active_interview(&self, applicant_id: &str) -> bool {
        self.active.lock().await.contains(applicant_id)
    }

    // ---- Interview ---- //

    async fn run_interview(&self,
            applicant: &Applicant,
            settings: &AdmissionSettings) -> AdmissionResult<ApplyOutcome> {

        let destination = self.host.open_space(&applicant.id).await
            .map_err(AdmissionError::Fault)?;

        let outcome = match settings.quiz.has_questions() {
            true  => self.run_quiz(applicant, &destination, settings).await,
            false => self.submit_for_review(applicant, &destination, settings).await,
        };

        // leave the space up long enough for the applicant to read the result
        tokio::time::sleep(settings.grace_delay).await;
        let _ = self.host.close_space(&destination).await;

        outcome
    }

    async fn run_quiz(&self,
            applicant: &Applicant,
            destination: &Destination,
            settings: &AdmissionSettings) -> AdmissionResult<ApplyOutcome> {

        let welcome = Notice::new(
            "Allowlist Interview",
            &format!("Welcome <@{}>! You will be asked {} question(s) and have {} second(s) \
                to answer each. Reply with `{}` at any time to abort.",
                applicant.id,
                settings.quiz.questions.len(),
                settings.quiz.question_timeout.as_secs(),
                settings.quiz.cancel_keyword));
        let _ = self.host.send(destination, &welcome).await;

        let report = QuizEngine::new(self.host.as_ref())
            .run(&applicant.id, destination, &settings.quiz).await
            .map_err(AdmissionError::Denied)?;

        match report.outcome {
            QuizOutcome::Passed | QuizOutcome::Failed => {
                self.land_quiz_verdict(applicant, destination, settings, report).await
            },
            QuizOutcome::Cancelled => {
                // no record on purpose, reapplying right away is fine
                let notice = Notice::new(
                    "Interview Cancelled",
                    "You have cancelled your application. You may apply again at any time.");
                let _ = self.host.send(destination, &notice).await;
                Ok(ApplyOutcome::Cancelled)
            },
            QuizOutcome::TimedOut => {
                let notice = Notice::new(
                    "Interview Timed Out",
                    "You took too long to answer. You may apply again at any time.");
                let _ = self.host.send(destination, &notice).await;
                Ok(ApplyOutcome::TimedOut)
            },
        }
    }

    async fn land_quiz_verdict(&self,
            applicant: &Applicant,
            destination: &Destination,
            settings: &AdmissionSettings,
            report: QuizReport) -> AdmissionResult<ApplyOutcome> {

        let passed = report.outcome == QuizOutcome::Passed;
        let status = match passed {
            true  => AdmissionStatus::Approved,
            false => AdmissionStatus::Rejected,
        };

        // durable first, then announce
        let record = self.commit_decision(
            &applicant.id,
            status,
            Decider::System,
            Some(report.transcript.clone()),
            WriteGuard::FreshVerdict).await?;

        let verdict = match passed {
            true => Notice::new(
                "Allowlist Approved",
                &format!("Congratulations! You answered {}/{} question(s) correctly and \
                    now have full access to the server.", report.score, report.total)),
            false => Notice::new(
                "Allowlist Rejected",
                &format!("You answered {}/{} question(s) correctly but {} are required \
                    to pass. You may try again later.",
                    report.score, report.total, settings.quiz.passing_score)),
        };
        let _ = self.host.send(destination, &verdict).await;
        let _ = self.host.send(&Destination::Direct(applicant.id.clone()), &verdict).await;
        self.broadcast(settings, &self.broadcast_notice(&record, None)).await;

        Ok(ApplyOutcome::Decided { record, score: report.score, total: report.total })
    }

    async fn submit_for_review(&self,
            applicant: &Applicant,
            destination: &Destination,
            settings: &AdmissionSettings) -> AdmissionResult<ApplyOutcome> {

        let welcome = Notice::new(
            "Allowlist Application",
            &format!("Welcome <@{}>! Your application will be reviewed by the staff.",
                applicant.id));
        let _ = self.host.send(destination, &welcome).await;

        let record = AdmissionRecord::pending(&applicant.id, Vec::new());
        {
            let _gate = self.decision_gate.lock().await;
            self.store.upsert_record(&record).await.map_err(AdmissionError::Fault)?;
        }

        if settings.auto_approve {
            let record = self.commit_decision(
                &applicant.id,
                AdmissionStatus::Approved,
                Decider::System,
                None,
                WriteGuard::RequirePending).await?;
            let notice = Notice::new(
                "Allowlist Approved",
                "Your application has been automatically approved. Welcome!");
            let _ = self.host.send(destination, &notice).await;
            let _ = self.host.send(&Destination::Direct(applicant.id.clone()), &notice).await;
            self.broadcast(settings, &self.broadcast_notice(&record, None)).await;
            return Ok(ApplyOutcome::Submitted(record));
        }

        let notice = Notice::new(
            "Application Submitted",
            "Thank you! The staff will review your application as soon as possible.");
        let _ = self.host.send(destination, &notice).await;
        self.broadcast(settings, &Notice::new(
            "New Application",
            &format!("<@{}> has submitted an allowlist application and awaits review.",
                applicant.id))).await;

        Ok(ApplyOutcome::Submitted(record))
    }

    // ---- Decision plumbing ---- //

    async fn commit_decision(&self,
            applicant_id: &str,
            status: AdmissionStatus,
            decided_by: Decider,
            transcript: Option<Vec<TranscriptEntry>>,
            guard: WriteGuard) -> AdmissionResult<AdmissionRecord> {

        // re-read immediately before the write, under the gate; a stale
        // decision must lose against whatever landed first
        let _gate = self.decision_gate.lock().await;
        let current = self.store.get_record(applicant_id).await
            .map_err(AdmissionError::Fault)?;

        match guard {
            WriteGuard::FreshVerdict => {
                if let Some(record) = &current {
                    if record.status == AdmissionStatus::Approved {
                        return Err(Denial::AlreadyApproved.into());
                    }
                }
            },
            WriteGuard::RequirePending => {
                match &current {
                    None => return Err(Denial::NoSuchApplication.into()),
                    Some(record) if !record.is_pending() => return Err(Denial::NotPending.into()),
                    _ => {}
                }
            },
        }

        let transcript = transcript
            .or(current.map(|record| record.transcript))
            .unwrap_or_default();
        let record = AdmissionRecord::decided(applicant_id, status, decided_by, transcript);
        self.store.upsert_record(&record).await.map_err(AdmissionError::Fault)?;

        if status == AdmissionStatus::Approved {
            self.access.grant_access(applicant_id).await;
        }

        Ok(record)
    }

    async fn broadcast(&self, settings: &AdmissionSettings, notice: &Notice) {
        for destination in settings.broadcast.iter() {
            let _ = self.host.send(destination, notice).await;
        }
    }

    fn manual_verdict_notice(&self, record: &AdmissionRecord, reason: Option<&str>) -> Notice {
        let decider = record.decided_by.as_ref()
            .map(|decider| decider.mention())
            .unwrap_or_default();
        match record.status {
            AdmissionStatus::Approved => Notice::new(
                "Allowlist Approved",
                &format!("Your application has been approved by {}. Welcome!", decider)),
            _ => {
                let mut body = format!("Your application has been rejected by {}.", decider);
                if let Some(reason) = reason {
                    body.push_str(&format!("\nReason: {}", reason));
                }
                body.push_str("\nYou may apply again later.");
                Notice::new("Allowlist Rejected", &body)
            },
        }
    }

    fn broadcast_notice(&self, record: &AdmissionRecord, reason: Option<&str>) -> Notice {
        let decider = record.decided_by.as_ref()
            .map(|decider| decider.mention())
            .unwrap_or_default();
        let mut body = match record.status {
            AdmissionStatus::Approved => format!(
                "✅ <@{}> has been **approved** by {}.", record.applicant_id, decider),
            _ => format!(
                "❌ <@{}> has been **rejected** by {}.", record.applicant_id, decider),
        };
        if let Some(reason) = reason {
            body.push_str(&format!("\nReason: {}", reason));
        }
        Notice::new("Allowlist Result", &body)
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::admission::testkit::{applicant, settings, Harness};

    #[tokio::test]
    async fn apply_on_approved_applicant_is_denied_without_writes() {
        let harness = Harness::new(vec![]);
        harness.store.seed(AdmissionRecord::decided(
            "42", AdmissionStatus::Approved, Decider::System, Vec::new()));

        let result = harness.workflow().apply(&applicant("42", 100), &settings(1)).await;

        assert!(matches!(result, Err(AdmissionError::Denied(Denial::AlreadyApproved))));
        assert_eq!(harness.store.upserts(), 0);
        assert_eq!(harness.host.opened().len(), 0);
    }

    #[tokio::test]
    async fn apply_on_pending_applicant_is_denied() {
        let harness = Harness::new(vec![]);
        harness.store.seed(AdmissionRecord::pending("42", Vec::new()));

        let result = harness.workflow().apply(&applicant("42", 100), &settings(1)).await;

        assert!(matches!(result, Err(AdmissionError::Denied(Denial::AlreadyPending))));
    }

    #[tokio::test]
    async fn young_accounts_are_ineligible() {
        let harness = Harness::new(vec![]);
        let mut settings = settings(1);
        settings.min_account_age_days = 7;

        let result = harness.workflow().apply(&applicant("42", 3), &settings).await;

        assert!(matches!(result,
            Err(AdmissionError::Denied(Denial::IneligibleTooNew { age_days: 3, required_days: 7 }))));
        assert_eq!(harness.host.opened().len(), 0);
    }

    #[tokio::test]
    async fn passed_quiz_lands_an_approved_record() {
        let harness = Harness::new(vec![
            Some("beta alpha yes".to_string()),
            Some("no idea".to_string()),
        ]);

        let outcome = harness.workflow()
            .apply(&applicant("42", 100), &settings(1)).await.unwrap();

        match outcome {
            ApplyOutcome::Decided { record, score, total } => {
                assert_eq!(record.status, AdmissionStatus::Approved);
                assert_eq!(record.decided_by, Some(Decider::System));
                assert!(record.decided_at.is_some());
                assert_eq!((score, total), (1, 2));
            },
            other => panic!("Expected a decided outcome, got {:?}", other),
        }
        let stored = harness.store.get("42").unwrap();
        assert_eq!(stored.status, AdmissionStatus::Approved);
        assert_eq!(harness.access.granted(), vec!["42".to_string()]);
        // interview space was released after the verdict
        assert_eq!(harness.host.closed().len(), 1);
    }

    #[tokio::test]
    async fn failed_quiz_lands_a_rejected_record_without_role_grant() {
        let harness = Harness::new(vec![
            Some("wrong".to_string()),
            Some("wrong again".to_string()),
        ]);

        let outcome = harness.workflow()
            .apply(&applicant("42", 100), &settings(1)).await.unwrap();

        assert!(matches!(outcome, ApplyOutcome::Decided { .. }));
        let stored = harness.store.get("42").unwrap();
        assert_eq!(stored.status, AdmissionStatus::Rejected);
        assert!(harness.access.granted().is_empty());
    }

    #[tokio::test]
    async fn cancelled_quiz_leaves_no_record_and_allows_reapplying() {
        let harness = Harness::new(vec![
            Some("some answer".to_string()),
            Some("cancel".to_string()),
        ]);
        let workflow = harness.workflow();

        let outcome = workflow.apply(&applicant("42", 100), &settings(2)).await.unwrap();
        assert!(matches!(outcome, ApplyOutcome::Cancelled));
        assert!(harness.store.get("42").is_none());

        // an immediate second attempt goes through
        harness.host.push_replies(vec![
            Some("beta alpha".to_string()),
            Some("gamma delta".to_string()),
        ]);
        let outcome = workflow.apply(&applicant("42", 100), &settings(2)).await.unwrap();
        assert!(matches!(outcome, ApplyOutcome::Decided { .. }));
    }

    #[tokio::test]
    async fn timed_out_quiz_leaves_no_record() {
        let harness = Harness::new(vec![None]);

        let outcome = harness.workflow()
            .apply(&applicant("42", 100), &settings(1)).await.unwrap();

        assert!(matches!(outcome, ApplyOutcome::TimedOut));
        assert!(harness.store.get("42").is_none());
        assert_eq!(harness.store.upserts(), 0);
    }

    #[tokio::test]
    async fn broken_configuration_opens_no_space() {
        let harness = Harness::new(vec![]);
        let mut settings = settings(1);
        settings.quiz.expected_answers.pop();

        let result = harness.workflow().apply(&applicant("42", 100), &settings).await;

        assert!(matches!(result,
            Err(AdmissionError::Denied(Denial::BrokenQuizConfig { questions: 2, answers: 1 }))));
        assert_eq!(harness.host.opened().len(), 0);
        assert_eq!(harness.host.sent().len(), 0);
    }

    #[tokio::test]
    async fn quizless_application_is_submitted_for_review() {
        let harness = Harness::new(vec![]);
        let mut settings = settings(1);
        settings.quiz.questions.clear();
        settings.quiz.expected_answers.clear();

        let outcome = harness.workflow()
            .apply(&applicant("42", 100), &settings).await.unwrap();

        match outcome {
            ApplyOutcome::Submitted(record) => assert!(record.is_pending()),
            other => panic!("Expected a submitted outcome, got {:?}", other),
        }
        assert!(harness.store.get("42").unwrap().is_pending());
    }

    #[tokio::test]
    async fn auto_approve_resolves_a_quizless_application() {
        let harness = Harness::new(vec![]);
        let mut settings = settings(1);
        settings.quiz.questions.clear();
        settings.quiz.expected_answers.clear();
        settings.auto_approve = true;

        let outcome = harness.workflow()
            .apply(&applicant("42", 100), &settings).await.unwrap();

        match outcome {
            ApplyOutcome::Submitted(record) => {
                assert_eq!(record.status, AdmissionStatus::Approved);
                assert_eq!(record.decided_by, Some(Decider::System));
            },
            other => panic!("Expected a submitted outcome, got {:?}", other),
        }
        assert_eq!(harness.access.granted(), vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn direct_add_skips_the_quiz() {
        let harness = Harness::new(vec![]);

        let record = harness.workflow()
            .direct_add("42", "7", "vouched for").await.unwrap();

        assert_eq!(record.status, AdmissionStatus::Approved);
        assert_eq!(record.decided_by, Some(Decider::Staff("7".to_string())));
        assert_eq!(record.transcript.len(), 1);
        assert_eq!(record.transcript[0].question, "Direct Addition");
        assert_eq!(record.transcript[0].answer, "vouched for");
        assert_eq!(harness.access.granted(), vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn direct_add_on_approved_applicant_is_denied() {
        let harness = Harness::new(vec![]);
        harness.store.seed(AdmissionRecord::decided(
            "42", AdmissionStatus::Approved, Decider::System, Vec::new()));

        let result = harness.workflow().direct_add("42", "7", "again").await;

        assert!(matches!(result, Err(AdmissionError::Denied(Denial::AlreadyApproved))));
        assert_eq!(harness.store.upserts(), 0);
    }

    #[tokio::test]
    async fn revoke_deletes_the_record_and_roles() {
        let harness = Harness::new(vec![]);
        harness.store.seed(AdmissionRecord::decided(
            "42", AdmissionStatus::Approved, Decider::System, Vec::new()));

        harness.workflow().revoke("42", "7").await.unwrap();

        assert!(harness.store.get("42").is_none());
        assert_eq!(harness.access.revoked(), vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn revoke_without_approval_is_denied_without_side_effects() {
        let harness = Harness::new(vec![]);
        harness.store.seed(AdmissionRecord::pending("42", Vec::new()));

        let result = harness.workflow().revoke("42", "7").await;

        assert!(matches!(result, Err(AdmissionError::Denied(Denial::NotOnAllowlist))));
        assert!(harness.store.get("42").is_some());
        assert!(harness.access.revoked().is_empty());
        assert_eq!(harness.store.deletes(), 0);
    }

    #[tokio::test]
    async fn manual_decision_requires_a_pending_record() {
        let harness = Harness::new(vec![]);
        harness.store.seed(AdmissionRecord::decided(
            "42", AdmissionStatus::Rejected, Decider::System, Vec::new()));

        let result = harness.workflow()
            .manual_decision("42", "7", true, None, &settings(1)).await;

        assert!(matches!(result, Err(AdmissionError::Denied(Denial::NotPending))));
    }

    #[tokio::test]
    async fn manual_decision_keeps_the_stored_transcript() {
        let harness = Harness::new(vec![]);
        harness.store.seed(AdmissionRecord::pending("42",
            vec![TranscriptEntry::plain("q1", "a1")]));

        let record = harness.workflow()
            .manual_decision("42", "7", false, Some("too vague"), &settings(1)).await.unwrap();

        assert_eq!(record.status, AdmissionStatus::Rejected);
        assert_eq!(record.decided_by, Some(Decider::Staff("7".to_string())));
        assert_eq!(record.transcript.len(), 1);
    }

}
