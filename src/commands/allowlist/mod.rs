
use std::sync::Arc;

use crate::utility::*;
use crate::admission::{AdmissionError, AdmissionSettings, AdmissionWorkflow};

pub mod apply;
pub mod add;
pub mod remove;
pub mod check;
pub mod list;
pub mod review;
pub mod configure;


// fetches the shared workflow plus a fresh settings snapshot
pub(crate) async fn allowlist_context() -> Option<(Arc<AdmissionWorkflow>, AdmissionSettings)> {
    let handler = AllowlistHandler::get_instance().lock().await;
    let workflow = handler.workflow()?;
    let settings = handler.load_settings().await;
    Some((workflow, settings))
}

// denials go back to the requester as plain status messages, faults are
// logged and reported generically
pub(crate) async fn report_admission_error(message: &MessageManager, error: AdmissionError) {
    match error {
        AdmissionError::Denied(denial) => {
            message.reply_failure(&denial.notice()).await;
        },
        AdmissionError::Fault(fault) => {
            Logger::err_long("Allowlist operation failed", &fault);
            message.reply_failure("Something went wrong. Please try again later.").await;
        },
    }
}
