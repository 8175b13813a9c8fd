
pub mod quiz;
pub mod workflow;
pub mod review;

#[cfg(test)]
pub mod testkit;

pub use quiz::{
    QuizEngine,
    QuizOutcome,
    QuizReport,
    QuizSettings,
    TranscriptEntry,
    is_correct_answer,
};
pub use workflow::{
    AccessGateway,
    AdmissionError,
    AdmissionRecord,
    AdmissionResult,
    AdmissionSettings,
    AdmissionStatus,
    AdmissionStore,
    AdmissionWorkflow,
    Applicant,
    ApplyOutcome,
    Decider,
    Denial,
    Destination,
    InterviewHost,
    Notice,
};
pub use review::{
    RejectReason,
    ReviewOutcome,
    ReviewSession,
};
