
use strum_macros::{Display, EnumString};

use crate::admission::workflow::{
    AdmissionError,
    AdmissionRecord,
    AdmissionResult,
    AdmissionSettings,
    AdmissionWorkflow,
    Denial,
};


#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReviewOutcome {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RejectReason {
    IncorrectAnswers,
    VagueAnswers,
    NoRoleplayKnowledge,
    Behavior,
    Other,
}

impl RejectReason {

    pub fn describe(&self) -> &'static str {
        match self {
            RejectReason::IncorrectAnswers => "Too many incorrect answers",
            RejectReason::VagueAnswers => "Answers were too vague or too short",
            RejectReason::NoRoleplayKnowledge => "No roleplay knowledge demonstrated",
            RejectReason::Behavior => "Inappropriate behavior during the interview",
            RejectReason::Other => "Other",
        }
    }

    pub fn all() -> [RejectReason; 5] {
        [
            RejectReason::IncorrectAnswers,
            RejectReason::VagueAnswers,
            RejectReason::NoRoleplayKnowledge,
            RejectReason::Behavior,
            RejectReason::Other,
        ]
    }

}

// one staff-facing decision surface over one pending application; the
// session takes at most one decision, the store settles races
pub struct ReviewSession {
    applicant_id: String,
    record: AdmissionRecord,
    decided: bool,
}

impl ReviewSession {

    pub async fn open(workflow: &AdmissionWorkflow,
            applicant_id: &str) -> AdmissionResult<ReviewSession> {
        match workflow.status(applicant_id).await? {
            None => Err(Denial::NoSuchApplication.into()),
            Some(record) if !record.is_pending() => Err(Denial::NotPending.into()),
            Some(record) => Ok(ReviewSession {
                applicant_id: applicant_id.to_string(),
                record,
                decided: false,
            }),
        }
    }

    // snapshot for display purposes only, never authoritative for the write
    pub fn record(&self) -> &AdmissionRecord {
        &self.record
    }

    pub async fn decide(&mut self,
            workflow: &AdmissionWorkflow,
            settings: &AdmissionSettings,
            decided_by: &str,
            outcome: ReviewOutcome,
            reason: Option<RejectReason>) -> AdmissionResult<AdmissionRecord> {

        if self.decided {
            return Err(Denial::AlreadyDecided.into());
        }

        let reason = reason.map(|reason| reason.describe());
        let result = workflow.manual_decision(
            &self.applicant_id,
            decided_by,
            outcome == ReviewOutcome::Approve,
            reason,
            settings).await;

        match result {
            Ok(record) => {
                self.decided = true;
                Ok(record)
            },
            // somebody else's decision reached the store first
            Err(AdmissionError::Denied(Denial::NotPending)) => {
                self.decided = true;
                Err(Denial::AlreadyDecided.into())
            },
            err => err,
        }
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::admission::testkit::{settings, Harness};
    use crate::admission::workflow::{AdmissionStatus, Decider};
    use crate::admission::quiz::TranscriptEntry;

    #[tokio::test]
    async fn open_requires_an_existing_pending_application() {
        let harness = Harness::new(vec![]);
        let workflow = harness.workflow();

        let missing = ReviewSession::open(&workflow, "42").await;
        assert!(matches!(missing, Err(AdmissionError::Denied(Denial::NoSuchApplication))));

        harness.store.seed(AdmissionRecord::decided(
            "42", AdmissionStatus::Approved, Decider::System, Vec::new()));
        let settled = ReviewSession::open(&workflow, "42").await;
        assert!(matches!(settled, Err(AdmissionError::Denied(Denial::NotPending))));
    }

    #[tokio::test]
    async fn a_session_takes_exactly_one_decision() {
        let harness = Harness::new(vec![]);
        let workflow = harness.workflow();
        harness.store.seed(AdmissionRecord::pending("42",
            vec![TranscriptEntry::plain("q1", "a1")]));

        let mut session = ReviewSession::open(&workflow, "42").await.unwrap();

        let first = session.decide(&workflow, &settings(1), "7",
            ReviewOutcome::Approve, None).await;
        assert_eq!(first.unwrap().status, AdmissionStatus::Approved);

        let second = session.decide(&workflow, &settings(1), "7",
            ReviewOutcome::Reject, Some(RejectReason::Other)).await;
        assert!(matches!(second, Err(AdmissionError::Denied(Denial::AlreadyDecided))));
        assert_eq!(harness.store.get("42").unwrap().status, AdmissionStatus::Approved);
    }

    #[tokio::test]
    async fn racing_reviewers_settle_on_exactly_one_write() {
        let harness = Harness::new(vec![]);
        let workflow = harness.workflow();
        harness.store.seed(AdmissionRecord::pending("42", Vec::new()));

        // both reviewers may look at the same application
        let mut first = ReviewSession::open(&workflow, "42").await.unwrap();
        let mut second = ReviewSession::open(&workflow, "42").await.unwrap();

        let win = first.decide(&workflow, &settings(1), "7",
            ReviewOutcome::Reject, Some(RejectReason::VagueAnswers)).await;
        assert!(win.is_ok());

        // the loser re-checks against the store and observes the settled state
        let lose = second.decide(&workflow, &settings(1), "8",
            ReviewOutcome::Approve, None).await;
        assert!(matches!(lose, Err(AdmissionError::Denied(Denial::AlreadyDecided))));

        let stored = harness.store.get("42").unwrap();
        assert_eq!(stored.status, AdmissionStatus::Rejected);
        assert_eq!(stored.decided_by, Some(Decider::Staff("7".to_string())));
        assert_eq!(harness.store.upserts(), 1);
    }

    #[tokio::test]
    async fn a_revoked_application_invalidates_the_open_session() {
        let harness = Harness::new(vec![]);
        let workflow = harness.workflow();
        harness.store.seed(AdmissionRecord::pending("42", Vec::new()));

        let mut session = ReviewSession::open(&workflow, "42").await.unwrap();
        harness.store.remove("42");

        let result = session.decide(&workflow, &settings(1), "7",
            ReviewOutcome::Approve, None).await;
        assert!(matches!(result, Err(AdmissionError::Denied(Denial::NoSuchApplication))));
    }

    #[test]
    fn reject_reasons_parse_from_their_wire_names() {
        use std::str::FromStr;
        assert_eq!(RejectReason::from_str("vague_answers").unwrap(), RejectReason::VagueAnswers);
        assert_eq!(RejectReason::VagueAnswers.to_string(), "vague_answers");
    }

}
