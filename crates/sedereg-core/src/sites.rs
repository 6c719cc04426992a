use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One service offered at a site, as chosen on the service-selection step.
///
/// The site fields are denormalized copies of the owning site's location so a
/// flat service list can be displayed and regrouped without extra lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub code: String,
    pub name: String,
    pub group: String,
    pub site_code: String,
    pub address: String,
    pub department: String,
    pub municipality: String,
    /// Set by the backend when the service was registered in a prior session;
    /// used to pre-mark the selection.
    #[serde(default)]
    pub already_registered: bool,
}

/// One physical site chosen for registration, with the services picked there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSelection {
    /// Habilitation code, unique within a selection list.
    pub site_code: String,
    pub address: String,
    pub department: String,
    pub municipality: String,
    pub services: Vec<ServiceItem>,
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("select at least one service")]
    NoServices,

    #[error("service {service} chosen twice at site {site}")]
    DuplicateService { site: String, service: String },
}

/// Group a flat list of chosen services into one [`SiteSelection`] per site,
/// preserving the order in which sites first appear.
///
/// # Errors
///
/// Returns [`SelectionError::NoServices`] for an empty list and
/// [`SelectionError::DuplicateService`] when a (site, service) pair repeats.
pub fn group_by_site(services: Vec<ServiceItem>) -> Result<Vec<SiteSelection>, SelectionError> {
    if services.is_empty() {
        return Err(SelectionError::NoServices);
    }

    let mut sites: Vec<SiteSelection> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for service in services {
        if !seen.insert((service.site_code.clone(), service.code.clone())) {
            return Err(SelectionError::DuplicateService {
                site: service.site_code,
                service: service.code,
            });
        }
        if let Some(site) = sites.iter_mut().find(|s| s.site_code == service.site_code) {
            site.services.push(service);
        } else {
            sites.push(SiteSelection {
                site_code: service.site_code.clone(),
                address: service.address.clone(),
                department: service.department.clone(),
                municipality: service.municipality.clone(),
                services: vec![service],
            });
        }
    }

    Ok(sites)
}

/// Drop the selections whose site code is already registered with the backend,
/// keeping only the sites the wizard still has to collect data for.
#[must_use]
pub fn retain_unregistered(
    selections: Vec<SiteSelection>,
    registered_codes: &HashSet<String>,
) -> Vec<SiteSelection> {
    selections
        .into_iter()
        .filter(|s| !registered_codes.contains(&s.site_code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(site_code: &str, code: &str) -> ServiceItem {
        ServiceItem {
            code: code.to_string(),
            name: format!("Service {code}"),
            group: "Consulta Externa".to_string(),
            site_code: site_code.to_string(),
            address: format!("Calle {site_code}"),
            department: "Antioquia".to_string(),
            municipality: "Medellin".to_string(),
            already_registered: false,
        }
    }

    #[test]
    fn groups_services_under_their_site() {
        let sites = group_by_site(vec![
            service("S1", "328"),
            service("S2", "120"),
            service("S1", "334"),
        ])
        .unwrap();

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].site_code, "S1");
        assert_eq!(sites[0].services.len(), 2);
        assert_eq!(sites[1].site_code, "S2");
        assert_eq!(sites[1].services.len(), 1);
    }

    #[test]
    fn preserves_first_seen_site_order() {
        let sites = group_by_site(vec![
            service("S3", "1"),
            service("S1", "2"),
            service("S3", "3"),
            service("S2", "4"),
        ])
        .unwrap();
        let codes: Vec<&str> = sites.iter().map(|s| s.site_code.as_str()).collect();
        assert_eq!(codes, ["S3", "S1", "S2"]);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            group_by_site(Vec::new()),
            Err(SelectionError::NoServices)
        ));
    }

    #[test]
    fn duplicate_site_service_pair_is_rejected() {
        let err = group_by_site(vec![service("S1", "328"), service("S1", "328")]).unwrap_err();
        assert!(
            matches!(err, SelectionError::DuplicateService { ref site, ref service }
                if site == "S1" && service == "328")
        );
    }

    #[test]
    fn same_service_code_at_two_sites_is_allowed() {
        let sites = group_by_site(vec![service("S1", "328"), service("S2", "328")]).unwrap();
        assert_eq!(sites.len(), 2);
    }

    #[test]
    fn retain_unregistered_filters_existing_sites() {
        let selections = group_by_site(vec![service("S1", "1"), service("S2", "2")]).unwrap();
        let registered: HashSet<String> = ["S1".to_string()].into_iter().collect();
        let remaining = retain_unregistered(selections, &registered);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].site_code, "S2");
    }
}
