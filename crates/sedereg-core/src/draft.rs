use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sites::SiteSelection;

/// Category of care a site can offer. The chosen set gates which sub-sections
/// of the draft become mandatory (see [`SectionFlags`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceType {
    Ambulatory,
    Hospital,
    Home,
    Transport,
    Supplies,
}

impl ServiceType {
    /// Types that involve patient referral and therefore require the
    /// referral-system coordinator block.
    pub(crate) fn needs_coordinator(self) -> bool {
        matches!(self, Self::Hospital | Self::Home | Self::Transport)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Ambulatory => "Ambulatory",
            Self::Hospital => "Hospital",
            Self::Home => "Home",
            Self::Transport => "Transport",
            Self::Supplies => "Supplies",
        };
        write!(f, "{label}")
    }
}

/// Declared mechanism by which users book appointments at a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentChannel {
    InPerson,
    Remote,
    Both,
}

impl AppointmentChannel {
    #[must_use]
    pub fn includes_in_person(self) -> bool {
        matches!(self, Self::InPerson | Self::Both)
    }

    #[must_use]
    pub fn includes_remote(self) -> bool {
        matches!(self, Self::Remote | Self::Both)
    }
}

/// An attention-hours range. Both ends blank until the user fills them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub from: String,
    pub to: String,
}

impl HourRange {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.from.trim().is_empty() && !self.to.trim().is_empty()
    }
}

/// Remote contact channels, required as a block when the appointment channel
/// includes remote booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteChannels {
    pub whatsapp: String,
    pub whatsapp_hours: HourRange,
    pub phone_line: String,
    pub phone_hours: HourRange,
    pub website: String,
    pub contact_email: String,
}

/// Manager (or scientific director) contact block. Name parts are collected
/// separately and joined for the submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerData {
    pub first_name: String,
    pub middle_name: String,
    pub first_surname: String,
    pub second_surname: String,
    pub authorized_email: String,
    pub landline: String,
    pub cell: String,
    pub manager_email: String,
    pub manager_cell: String,
    pub admin_email: String,
    pub admin_landline: String,
    pub admin_cell: String,
}

impl ManagerData {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_names(&[
            &self.first_name,
            &self.middle_name,
            &self.first_surname,
            &self.second_surname,
        ])
    }
}

/// Referral-system coordinator block, required when the site offers hospital,
/// home, or transport care.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorData {
    pub first_name: String,
    pub middle_name: String,
    pub first_surname: String,
    pub second_surname: String,
    pub phone: String,
    pub email: String,
}

impl CoordinatorData {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_names(&[
            &self.first_name,
            &self.middle_name,
            &self.first_surname,
            &self.second_surname,
        ])
    }
}

/// The wizard's working unit: one site's operational data as the user fills
/// it in. Built from a [`SiteSelection`] when the step opens, discarded once
/// consolidated into the submission payload or when the wizard is abandoned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDraft {
    pub site_code: String,
    pub address: String,
    pub department: String,
    pub municipality: String,
    pub service_types: BTreeSet<ServiceType>,
    pub exclusive_service: bool,
    pub scheduling_enabled: bool,
    pub slot_based_scheduling: bool,
    #[serde(default)]
    pub appointment_channel: Option<AppointmentChannel>,
    #[serde(default)]
    pub in_person_hours: HourRange,
    #[serde(default)]
    pub remote_channels: RemoteChannels,
    #[serde(default)]
    pub manager: ManagerData,
    #[serde(default)]
    pub coordinator: CoordinatorData,
}

impl SiteDraft {
    /// Start an empty draft carrying the selection's location over.
    #[must_use]
    pub fn from_selection(selection: &SiteSelection) -> Self {
        Self {
            site_code: selection.site_code.clone(),
            address: selection.address.clone(),
            department: selection.department.clone(),
            municipality: selection.municipality.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn section_flags(&self) -> SectionFlags {
        SectionFlags::from_types(&self.service_types)
    }
}

/// Which conditionally-required sections apply to a draft, derived purely
/// from its service types. The rendering layer and the validation engine
/// both consume this record, so the two cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFlags {
    pub requires_manager: bool,
    pub requires_coordinator: bool,
}

impl SectionFlags {
    #[must_use]
    pub fn from_types(types: &BTreeSet<ServiceType>) -> Self {
        Self {
            requires_manager: !types.is_empty(),
            requires_coordinator: types.iter().any(|t| t.needs_coordinator()),
        }
    }
}

/// Join name parts into a display name, skipping blanks.
#[must_use]
pub fn join_names(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[ServiceType]) -> BTreeSet<ServiceType> {
        list.iter().copied().collect()
    }

    #[test]
    fn no_types_requires_nothing() {
        let flags = SectionFlags::from_types(&BTreeSet::new());
        assert!(!flags.requires_manager);
        assert!(!flags.requires_coordinator);
    }

    #[test]
    fn any_type_requires_manager() {
        let flags = SectionFlags::from_types(&types(&[ServiceType::Supplies]));
        assert!(flags.requires_manager);
        assert!(!flags.requires_coordinator);
    }

    #[test]
    fn hospital_home_and_transport_require_coordinator() {
        for ty in [ServiceType::Hospital, ServiceType::Home, ServiceType::Transport] {
            let flags = SectionFlags::from_types(&types(&[ty]));
            assert!(flags.requires_coordinator, "{ty} should require coordinator");
        }
        let flags = SectionFlags::from_types(&types(&[ServiceType::Ambulatory]));
        assert!(!flags.requires_coordinator);
    }

    #[test]
    fn join_names_skips_blank_parts() {
        assert_eq!(join_names(&["Ana", "", "  ", "Gomez"]), "Ana Gomez");
        assert_eq!(join_names(&["", ""]), "");
    }

    #[test]
    fn channel_inclusion() {
        assert!(AppointmentChannel::Both.includes_in_person());
        assert!(AppointmentChannel::Both.includes_remote());
        assert!(AppointmentChannel::InPerson.includes_in_person());
        assert!(!AppointmentChannel::InPerson.includes_remote());
        assert!(AppointmentChannel::Remote.includes_remote());
        assert!(!AppointmentChannel::Remote.includes_in_person());
    }

    #[test]
    fn draft_from_selection_copies_location() {
        let selection = SiteSelection {
            site_code: "S1".to_string(),
            address: "Calle 10".to_string(),
            department: "Antioquia".to_string(),
            municipality: "Medellin".to_string(),
            services: Vec::new(),
        };
        let draft = SiteDraft::from_selection(&selection);
        assert_eq!(draft.site_code, "S1");
        assert_eq!(draft.address, "Calle 10");
        assert!(draft.service_types.is_empty());
        assert!(draft.appointment_channel.is_none());
    }
}
