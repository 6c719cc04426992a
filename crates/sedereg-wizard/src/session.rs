//! The submission state machine.
//!
//! Per wizard session: `Collecting` → `Validating` → back to `Collecting`
//! (validation failed) or `Submitting` → `Done` (terminal) or back to
//! `Collecting` (submission failed, drafts preserved). No state is skippable.

use chrono::{DateTime, Utc};
use sedereg_client::{ClientError, PortalClient};
use sedereg_core::{
    validate_site, ProviderContext, RegistrationRequest, SitePayload, SiteSelection,
    ValidationOutcome,
};

use crate::forms::SiteFormSet;
use crate::store::RegistrationStore;
use crate::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    Validating,
    Submitting,
    Done,
}

/// One failing site: its code and the first violated rule's reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIssue {
    pub site_code: String,
    pub reason: String,
}

/// What a submit attempt produced. Transport and precondition failures are
/// reported through [`WizardError`] instead; in every non-`Completed` case
/// the drafts stay intact for a retry.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Every draft was valid and the portal accepted the consolidated
    /// payload; the context store is cleared and the session is terminal.
    Completed,
    /// One or more drafts failed validation; nothing was sent. The
    /// user-facing summary is "review the pending fields in each site".
    ValidationFailed(Vec<SiteIssue>),
    /// A submission was already in flight (or already done); this call did
    /// nothing.
    Ignored,
}

/// One wizard session, owning the context store and the draft collection for
/// its whole lifetime.
#[derive(Debug)]
pub struct WizardSession {
    store: RegistrationStore,
    forms: SiteFormSet,
    phase: Phase,
    started_at: DateTime<Utc>,
}

impl WizardSession {
    /// Opens the site-details step for a provider and its selected sites.
    ///
    /// # Errors
    ///
    /// - [`WizardError::IncompleteContext`] when the prior step left required
    ///   provider fields blank.
    /// - [`WizardError::EmptySelection`] when no sites were selected.
    pub fn begin(
        context: ProviderContext,
        selections: Vec<SiteSelection>,
    ) -> Result<Self, WizardError> {
        let missing = context.missing_required_fields();
        if !missing.is_empty() {
            return Err(WizardError::IncompleteContext(missing.join(", ")));
        }

        let forms = SiteFormSet::initialize(selections.clone())?;
        let mut store = RegistrationStore::new();
        store.set_context(context);
        store.set_sites(selections);

        Ok(Self {
            store,
            forms,
            phase: Phase::Collecting,
            started_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn store(&self) -> &RegistrationStore {
        &self.store
    }

    #[must_use]
    pub fn forms(&self) -> &SiteFormSet {
        &self.forms
    }

    pub fn forms_mut(&mut self) -> &mut SiteFormSet {
        &mut self.forms
    }

    /// Validates every draft in insertion order and returns all failing
    /// sites, first-inserted first. Pure; does not change the phase.
    #[must_use]
    pub fn validate_all(&self) -> Vec<SiteIssue> {
        self.forms
            .drafts()
            .iter()
            .filter_map(|draft| match validate_site(draft) {
                ValidationOutcome::Valid => None,
                ValidationOutcome::Invalid(reason) => Some(SiteIssue {
                    site_code: draft.site_code.clone(),
                    reason,
                }),
            })
            .collect()
    }

    /// Runs the full submission pipeline: validate every draft, check the
    /// supporting-documents precondition, consolidate, submit all or nothing.
    ///
    /// On success the context store is cleared and the session reaches the
    /// terminal `Done` phase. On any failure the drafts stay intact and the
    /// phase returns to `Collecting` for a retry. A call while a submission
    /// is in flight — or after `Done` — is ignored.
    ///
    /// # Errors
    ///
    /// - [`WizardError::MissingContext`] when the store has no provider.
    /// - [`WizardError::DocumentsMissing`] when the precondition is unmet.
    /// - [`WizardError::Transport`] when a portal call fails.
    pub async fn submit(&mut self, client: &PortalClient) -> Result<SubmitOutcome, WizardError> {
        if matches!(self.phase, Phase::Submitting | Phase::Done) {
            tracing::debug!(phase = ?self.phase, "submit ignored");
            return Ok(SubmitOutcome::Ignored);
        }

        let nit = match self.store.context() {
            Some(context) => context.nit.clone(),
            None => return Err(WizardError::MissingContext),
        };

        self.phase = Phase::Validating;
        let request = match self.consolidate(&nit) {
            Ok(request) => request,
            Err(issues) => {
                tracing::debug!(nit, failing = issues.len(), "validation blocked submission");
                self.phase = Phase::Collecting;
                return Ok(SubmitOutcome::ValidationFailed(issues));
            }
        };

        self.phase = Phase::Submitting;

        let docs = match client.check_supporting_docs(&nit).await {
            Ok(docs) => docs,
            Err(err) => return Err(self.fail(err)),
        };
        if !docs.satisfied() {
            self.phase = Phase::Collecting;
            return Err(WizardError::DocumentsMissing);
        }

        match client.register_sites(&request).await {
            Ok(()) => {
                let elapsed_secs = (Utc::now() - self.started_at).num_seconds();
                tracing::info!(
                    nit,
                    sites = request.sites.len(),
                    elapsed_secs,
                    "site registration submitted"
                );
                self.store.clear();
                self.phase = Phase::Done;
                Ok(SubmitOutcome::Completed)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Validates and consolidates in one pass over the drafts, so a site is
    /// either reported as failing or turned into its payload, never both.
    fn consolidate(&self, nit: &str) -> Result<RegistrationRequest, Vec<SiteIssue>> {
        let mut issues = Vec::new();
        let mut sites = Vec::with_capacity(self.forms.len());

        for draft in self.forms.drafts() {
            match validate_site(draft) {
                ValidationOutcome::Invalid(reason) => issues.push(SiteIssue {
                    site_code: draft.site_code.clone(),
                    reason,
                }),
                ValidationOutcome::Valid => {
                    let services = self.forms.services_for(&draft.site_code).to_vec();
                    // A valid draft always has an appointment channel.
                    if let Some(payload) = SitePayload::from_draft(draft, services) {
                        sites.push(payload);
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(RegistrationRequest {
                nit: nit.to_string(),
                sites,
            })
        } else {
            Err(issues)
        }
    }

    fn fail(&mut self, err: ClientError) -> WizardError {
        tracing::warn!(error = %err, "portal call failed; drafts preserved for retry");
        self.phase = Phase::Collecting;
        WizardError::Transport(err)
    }
}
