use sedereg_core::{ProviderContext, SiteSelection};

/// Holder for the two pieces of state that survive navigation between wizard
/// steps without a server fetch: the provider context and the selected sites.
///
/// Owned by the session and handed from step to step; there is exactly one
/// writer at a time. All operations are total — writes replace wholesale,
/// last write wins.
#[derive(Debug, Default)]
pub struct RegistrationStore {
    context: Option<ProviderContext>,
    sites: Vec<SiteSelection>,
}

impl RegistrationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_context(&mut self, context: ProviderContext) {
        self.context = Some(context);
    }

    pub fn set_sites(&mut self, sites: Vec<SiteSelection>) {
        self.sites = sites;
    }

    #[must_use]
    pub fn context(&self) -> Option<&ProviderContext> {
        self.context.as_ref()
    }

    #[must_use]
    pub fn sites(&self) -> &[SiteSelection] {
        &self.sites
    }

    /// Resets both holdings. Must run after a successful end-to-end
    /// submission so a later session cannot reuse stale state.
    pub fn clear(&mut self) {
        self.context = None;
        self.sites.clear();
    }
}
