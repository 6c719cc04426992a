//! Wizard state for the multi-site registration flow.
//!
//! [`RegistrationStore`] holds the cross-step context, [`SiteFormSet`] the
//! per-page draft collection, and [`WizardSession`] drives the submission
//! state machine: collect, validate every draft, consolidate, submit all or
//! nothing.

mod forms;
mod prefill;
mod session;
mod store;

pub use forms::SiteFormSet;
pub use prefill::{filter_new_sites, resolve_context};
pub use session::{Phase, SiteIssue, SubmitOutcome, WizardSession};
pub use store::RegistrationStore;

use sedereg_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    /// The wizard was opened with zero selected sites; the caller should
    /// redirect back to the service-selection step.
    #[error("no sites selected; return to the service-selection step")]
    EmptySelection,

    /// The context store holds no provider for this session.
    #[error("no provider context loaded; return to the service-selection step")]
    MissingContext,

    /// The prior step left required provider fields blank.
    #[error("missing required provider data from the prior step: {0}")]
    IncompleteContext(String),

    /// The supporting-documents precondition is unmet; the user must upload
    /// at least one document and retry.
    #[error("at least one supporting document must be uploaded before submitting")]
    DocumentsMissing,

    /// A portal call failed; all draft state is preserved for a retry.
    #[error(transparent)]
    Transport(#[from] ClientError),
}
