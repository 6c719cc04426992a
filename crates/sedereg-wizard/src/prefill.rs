//! Step-entry helpers that bridge the context store and the portal.

use std::collections::HashSet;

use sedereg_client::{PortalClient, ProviderRecord};
use sedereg_core::{retain_unregistered, ProviderContext, SiteSelection};

use crate::store::RegistrationStore;
use crate::WizardError;

/// Resolve the provider context for `nit`: reuse the stored context when it
/// belongs to the same provider, otherwise fetch the registry record. Returns
/// `None` when the provider is unknown to the registry.
///
/// # Errors
///
/// Returns [`WizardError::Transport`] when the lookup call fails.
pub async fn resolve_context(
    store: &RegistrationStore,
    client: &PortalClient,
    nit: &str,
) -> Result<Option<ProviderContext>, WizardError> {
    if let Some(context) = store.context() {
        if context.nit == nit {
            return Ok(Some(context.clone()));
        }
    }
    let record = client.lookup_provider(nit).await?;
    Ok(record.map(ProviderRecord::into_context))
}

/// Drop the selections the backend already holds a registration for, so the
/// wizard only collects data for new sites.
///
/// # Errors
///
/// Returns [`WizardError::Transport`] when the site-listing call fails.
pub async fn filter_new_sites(
    client: &PortalClient,
    nit: &str,
    selections: Vec<SiteSelection>,
) -> Result<Vec<SiteSelection>, WizardError> {
    let registered = client.registered_sites(nit).await?;
    let codes: HashSet<String> = registered.into_iter().map(|s| s.site_code).collect();
    Ok(retain_unregistered(selections, &codes))
}
