//! Consolidated submission payload.
//!
//! One normalized record per validated site. Channel-specific and role
//! sub-objects are present only when their gating condition holds, so the
//! wire payload never carries blank sections the user was not asked for.

use serde::Serialize;

use crate::draft::{AppointmentChannel, HourRange, ServiceType, SiteDraft};
use crate::sites::ServiceItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerPayload {
    pub name: String,
    pub authorized_email: String,
    pub landline: String,
    pub cell: String,
    pub manager_email: String,
    pub manager_cell: String,
    pub admin_email: String,
    pub admin_landline: String,
    pub admin_cell: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePayload {
    pub site_code: String,
    pub address: String,
    pub department: String,
    pub municipality: String,
    pub service_types: Vec<ServiceType>,
    pub exclusive_service: bool,
    pub scheduling_enabled: bool,
    pub slot_based_scheduling: bool,
    pub appointment_channel: AppointmentChannel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_person_hours: Option<HourRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_hours: Option<HourRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_hours: Option<HourRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<ManagerPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator: Option<CoordinatorPayload>,
    /// The originally chosen services, carried through unchanged for
    /// traceability.
    pub services: Vec<ServiceItem>,
}

impl SitePayload {
    /// Build the normalized record for one validated draft.
    ///
    /// Returns `None` when the draft has no appointment channel yet; a draft
    /// that passed validation always has one.
    #[must_use]
    pub fn from_draft(draft: &SiteDraft, services: Vec<ServiceItem>) -> Option<Self> {
        let channel = draft.appointment_channel?;
        let flags = draft.section_flags();

        let in_person_hours = channel
            .includes_in_person()
            .then(|| draft.in_person_hours.clone());
        let remote = channel.includes_remote().then_some(&draft.remote_channels);

        let manager = flags.requires_manager.then(|| ManagerPayload {
            name: draft.manager.full_name(),
            authorized_email: draft.manager.authorized_email.clone(),
            landline: draft.manager.landline.clone(),
            cell: draft.manager.cell.clone(),
            manager_email: draft.manager.manager_email.clone(),
            manager_cell: draft.manager.manager_cell.clone(),
            admin_email: draft.manager.admin_email.clone(),
            admin_landline: draft.manager.admin_landline.clone(),
            admin_cell: draft.manager.admin_cell.clone(),
        });

        let coordinator = flags.requires_coordinator.then(|| CoordinatorPayload {
            name: draft.coordinator.full_name(),
            phone: draft.coordinator.phone.clone(),
            email: draft.coordinator.email.clone(),
        });

        Some(Self {
            site_code: draft.site_code.clone(),
            address: draft.address.clone(),
            department: draft.department.clone(),
            municipality: draft.municipality.clone(),
            service_types: draft.service_types.iter().copied().collect(),
            exclusive_service: draft.exclusive_service,
            scheduling_enabled: draft.scheduling_enabled,
            slot_based_scheduling: draft.slot_based_scheduling,
            appointment_channel: channel,
            in_person_hours,
            whatsapp: remote.map(|r| r.whatsapp.clone()),
            whatsapp_hours: remote.map(|r| r.whatsapp_hours.clone()),
            phone_line: remote.map(|r| r.phone_line.clone()),
            phone_hours: remote.map(|r| r.phone_hours.clone()),
            website: remote.map(|r| r.website.clone()),
            contact_email: remote.map(|r| r.contact_email.clone()),
            manager,
            coordinator,
            services,
        })
    }
}

/// The all-or-nothing registration request: every site or none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub nit: String,
    pub sites: Vec<SitePayload>,
}
