//! Portal API response types.

use sedereg_core::ProviderContext;
use serde::Deserialize;

/// A provider record as stored by the registry, returned by the lookup
/// endpoint to pre-fill the wizard context.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub nit: String,
    pub name: String,
    #[serde(default)]
    pub provider_class: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub landline: Option<String>,
    #[serde(default)]
    pub admin_cell: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub legal_representative: Option<String>,
    #[serde(default)]
    pub representative_email: Option<String>,
    #[serde(default)]
    pub representative_cell: Option<String>,
}

impl ProviderRecord {
    /// Build the cross-step wizard context from this record.
    #[must_use]
    pub fn into_context(self) -> ProviderContext {
        ProviderContext {
            nit: self.nit,
            name: Some(self.name),
            provider_class: self.provider_class,
            landline: self.landline,
            admin_cell: self.admin_cell,
            admin_email: self.admin_email,
            legal_representative: self.legal_representative,
            representative_email: self.representative_email,
            representative_cell: self.representative_cell,
        }
    }
}

/// Result of the supporting-documents precondition check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingDocs {
    pub exists: bool,
    pub count: i64,
    #[serde(default)]
    pub path: Option<String>,
}

impl SupportingDocs {
    /// Submission is allowed only when the folder exists and holds at least
    /// one document.
    #[must_use]
    pub fn satisfied(&self) -> bool {
        self.exists && self.count > 0
    }
}

/// A department or municipality catalog entry, used only to enrich display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// A site the backend already holds a registration for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredSite {
    pub site_code: String,
    #[serde(default)]
    pub status: Option<String>,
}
