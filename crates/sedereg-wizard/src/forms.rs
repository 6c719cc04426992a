use std::collections::{BTreeSet, HashMap};

use sedereg_core::{SectionFlags, ServiceItem, ServiceType, SiteDraft, SiteSelection};

use crate::WizardError;

/// The ordered, mutable collection of site drafts backing the wizard page.
///
/// Drafts keep the insertion order of their selections; that order decides
/// which site's validation error is reported first. Expand/collapse state is
/// keyed by site code and is pure UI state, independent of validation.
#[derive(Debug)]
pub struct SiteFormSet {
    drafts: Vec<SiteDraft>,
    selections: Vec<SiteSelection>,
    expanded: HashMap<String, bool>,
}

impl SiteFormSet {
    /// Opens the step with one draft per selection, the first one expanded.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::EmptySelection`] for an empty list; the caller
    /// should redirect back to the prior step instead of rendering an empty
    /// wizard.
    pub fn initialize(selections: Vec<SiteSelection>) -> Result<Self, WizardError> {
        if selections.is_empty() {
            return Err(WizardError::EmptySelection);
        }
        let drafts: Vec<SiteDraft> = selections.iter().map(SiteDraft::from_selection).collect();
        let expanded = selections
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.site_code.clone(), idx == 0))
            .collect();
        Ok(Self {
            drafts,
            selections,
            expanded,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Always `false` for an initialized set — `initialize` rejects an empty
    /// selection and `remove_site` floors at one draft. Present to pair with
    /// [`SiteFormSet::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    #[must_use]
    pub fn drafts(&self) -> &[SiteDraft] {
        &self.drafts
    }

    pub fn draft_mut(&mut self, index: usize) -> Option<&mut SiteDraft> {
        self.drafts.get_mut(index)
    }

    pub fn draft_mut_by_code(&mut self, site_code: &str) -> Option<&mut SiteDraft> {
        self.drafts.iter_mut().find(|d| d.site_code == site_code)
    }

    /// Appends a draft for a site chosen after the step opened. Site codes
    /// are unique within the collection, so a selection whose code is
    /// already present is rejected. Returns whether the site was added.
    pub fn add_site(&mut self, selection: SiteSelection) -> bool {
        if self.drafts.iter().any(|d| d.site_code == selection.site_code) {
            return false;
        }
        self.expanded.insert(selection.site_code.clone(), false);
        self.drafts.push(SiteDraft::from_selection(&selection));
        self.selections.push(selection);
        true
    }

    /// Removes the draft at `index` together with its one matching
    /// selection. Removal is a no-op when it would leave the collection
    /// empty — one site is the minimum valid submission state. Returns
    /// whether a draft was removed.
    pub fn remove_site(&mut self, index: usize) -> bool {
        if self.drafts.len() <= 1 || index >= self.drafts.len() {
            return false;
        }
        let draft = self.drafts.remove(index);
        if let Some(pos) = self
            .selections
            .iter()
            .position(|s| s.site_code == draft.site_code)
        {
            self.selections.remove(pos);
        }
        self.expanded.remove(&draft.site_code);
        true
    }

    pub fn toggle_expanded(&mut self, site_code: &str) {
        let entry = self.expanded.entry(site_code.to_string()).or_insert(false);
        *entry = !*entry;
    }

    #[must_use]
    pub fn is_expanded(&self, site_code: &str) -> bool {
        self.expanded.get(site_code).copied().unwrap_or(false)
    }

    /// The service types currently ticked on the draft at `index`.
    #[must_use]
    pub fn selected_service_types(&self, index: usize) -> Option<&BTreeSet<ServiceType>> {
        self.drafts.get(index).map(|d| &d.service_types)
    }

    /// Which conditional sections the draft at `index` must fill in. The
    /// rendering layer and the validation engine consume the same record.
    #[must_use]
    pub fn section_flags(&self, index: usize) -> Option<SectionFlags> {
        self.drafts.get(index).map(SiteDraft::section_flags)
    }

    /// The originally chosen services for a site, carried through into the
    /// submission payload.
    #[must_use]
    pub fn services_for(&self, site_code: &str) -> &[ServiceItem] {
        self.selections
            .iter()
            .find(|s| s.site_code == site_code)
            .map_or(&[], |s| s.services.as_slice())
    }
}
