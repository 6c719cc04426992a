use serde::{Deserialize, Serialize};

/// Identity and contact data for the registering provider, carried across
/// wizard steps without a server round trip.
///
/// Overwritten wholesale whenever a step produces a fresher version; cleared
/// after a successful end-to-end submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderContext {
    /// Tax id, the stable key for the whole registration.
    pub nit: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider_class: Option<String>,
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

impl ProviderContext {
    #[must_use]
    pub fn new(nit: impl Into<String>) -> Self {
        Self {
            nit: nit.into(),
            name: None,
            provider_class: None,
            landline: None,
            admin_cell: None,
            admin_email: None,
            legal_representative: None,
            representative_email: None,
            representative_cell: None,
        }
    }

    /// Names of the operational fields that are still missing or blank.
    ///
    /// The site-details step cannot be entered until all of these were
    /// captured by the prior step; `name` is display-only and not required.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, &Option<String>); 7] = [
            ("providerClass", &self.provider_class),
            ("landline", &self.landline),
            ("adminCell", &self.admin_cell),
            ("adminEmail", &self.admin_email),
            ("legalRepresentative", &self.legal_representative),
            ("representativeEmail", &self.representative_email),
            ("representativeCell", &self.representative_cell),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_context() -> ProviderContext {
        ProviderContext {
            nit: "900123456".to_string(),
            name: Some("Clinica del Norte".to_string()),
            provider_class: Some("IPS".to_string()),
            landline: Some("6015550000".to_string()),
            admin_cell: Some("3001234567".to_string()),
            admin_email: Some("admin@clinica.co".to_string()),
            legal_representative: Some("Ana Gomez".to_string()),
            representative_email: Some("ana@clinica.co".to_string()),
            representative_cell: Some("3017654321".to_string()),
        }
    }

    #[test]
    fn complete_context_has_no_missing_fields() {
        assert!(complete_context().is_complete());
    }

    #[test]
    fn name_is_not_required() {
        let mut ctx = complete_context();
        ctx.name = None;
        assert!(ctx.is_complete());
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut ctx = complete_context();
        ctx.admin_email = Some("   ".to_string());
        assert_eq!(ctx.missing_required_fields(), vec!["adminEmail"]);
    }

    #[test]
    fn bare_context_reports_all_seven_fields() {
        let ctx = ProviderContext::new("900123456");
        assert_eq!(ctx.missing_required_fields().len(), 7);
    }
}
