//! Conditional validation of one site draft.
//!
//! Rules run in a fixed order and the first broken rule wins, mirroring the
//! single blocking message the form surfaces per site section. The submission
//! step aggregates these per-site reasons; it never accumulates more than one
//! reason for the same site.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::draft::{CoordinatorData, ManagerData, RemoteChannels, SiteDraft};

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,10}$").expect("valid regex"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Result of validating a single site draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

/// Decide whether one site draft is ready for submission.
///
/// Pure and idempotent: the same draft always yields the same outcome.
#[must_use]
pub fn validate_site(draft: &SiteDraft) -> ValidationOutcome {
    match first_violation(draft) {
        Some(reason) => ValidationOutcome::Invalid(reason),
        None => ValidationOutcome::Valid,
    }
}

fn first_violation(draft: &SiteDraft) -> Option<String> {
    if draft.service_types.is_empty() {
        return Some("Select at least one service type.".to_string());
    }

    let Some(channel) = draft.appointment_channel else {
        return Some("Select an appointment-scheduling mechanism.".to_string());
    };

    if channel.includes_in_person() && !draft.in_person_hours.is_complete() {
        return Some("Complete the in-person attention hours.".to_string());
    }

    if channel.includes_remote() {
        if let Some(reason) = remote_channel_violation(&draft.remote_channels) {
            return Some(reason);
        }
    }

    let flags = draft.section_flags();

    // requires_manager is always true once rule 1 passed; the flag is still
    // consulted so this stays in lockstep with what the form renders.
    if flags.requires_manager {
        if let Some(reason) = manager_violation(&draft.manager) {
            return Some(reason);
        }
    }

    if flags.requires_coordinator {
        if let Some(reason) = coordinator_violation(&draft.coordinator) {
            return Some(reason);
        }
    }

    None
}

fn remote_channel_violation(channels: &RemoteChannels) -> Option<String> {
    if !is_phone(&channels.whatsapp) {
        return Some("The WhatsApp number is required and must have at most 10 digits.".to_string());
    }
    if !channels.whatsapp_hours.is_complete() {
        return Some("Complete the WhatsApp attention hours.".to_string());
    }
    if !is_phone(&channels.phone_line) {
        return Some("The phone line is required and must have at most 10 digits.".to_string());
    }
    if !channels.phone_hours.is_complete() {
        return Some("Complete the phone-line attention hours.".to_string());
    }
    if channels.website.trim().is_empty() {
        return Some("The website is required for this mechanism.".to_string());
    }
    if !is_email(&channels.contact_email) {
        return Some("The remote contact email is required and must be valid.".to_string());
    }
    None
}

fn manager_violation(manager: &ManagerData) -> Option<String> {
    let required = [
        &manager.first_name,
        &manager.first_surname,
        &manager.authorized_email,
        &manager.landline,
        &manager.cell,
        &manager.manager_email,
        &manager.manager_cell,
        &manager.admin_email,
        &manager.admin_landline,
        &manager.admin_cell,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Some("Complete every field for the manager or scientific director.".to_string());
    }

    let phones = [
        &manager.landline,
        &manager.cell,
        &manager.manager_cell,
        &manager.admin_landline,
        &manager.admin_cell,
    ];
    if phones.iter().any(|phone| !is_phone(phone)) {
        return Some(
            "Manager and administrative phone numbers must have at most 10 digits.".to_string(),
        );
    }

    let emails = [
        &manager.authorized_email,
        &manager.manager_email,
        &manager.admin_email,
    ];
    if emails.iter().any(|email| !is_email(email)) {
        return Some("Check the manager and administrative email addresses.".to_string());
    }

    None
}

fn coordinator_violation(coordinator: &CoordinatorData) -> Option<String> {
    let required = [
        &coordinator.first_name,
        &coordinator.first_surname,
        &coordinator.phone,
        &coordinator.email,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Some("Complete the referral-system coordinator data.".to_string());
    }
    if !is_phone(&coordinator.phone) {
        return Some("The coordinator phone must have at most 10 digits.".to_string());
    }
    if !is_email(&coordinator.email) {
        return Some("The coordinator email is not valid.".to_string());
    }
    None
}

fn is_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{AppointmentChannel, HourRange, ServiceType};

    fn hours() -> HourRange {
        HourRange {
            from: "07:00".to_string(),
            to: "17:00".to_string(),
        }
    }

    fn complete_manager() -> ManagerData {
        ManagerData {
            first_name: "Carlos".to_string(),
            middle_name: String::new(),
            first_surname: "Ruiz".to_string(),
            second_surname: String::new(),
            authorized_email: "autorizado@ips.co".to_string(),
            landline: "6015551234".to_string(),
            cell: "3001112233".to_string(),
            manager_email: "gerente@ips.co".to_string(),
            manager_cell: "3004445566".to_string(),
            admin_email: "admin@ips.co".to_string(),
            admin_landline: "6015559876".to_string(),
            admin_cell: "3007778899".to_string(),
        }
    }

    fn complete_coordinator() -> CoordinatorData {
        CoordinatorData {
            first_name: "Luisa".to_string(),
            middle_name: String::new(),
            first_surname: "Mejia".to_string(),
            second_surname: String::new(),
            phone: "3012223344".to_string(),
            email: "coordinador@ips.co".to_string(),
        }
    }

    fn complete_remote_channels() -> RemoteChannels {
        RemoteChannels {
            whatsapp: "3005556677".to_string(),
            whatsapp_hours: hours(),
            phone_line: "6015550000".to_string(),
            phone_hours: hours(),
            website: "https://ips.co".to_string(),
            contact_email: "contacto@ips.co".to_string(),
        }
    }

    /// Scenario A from the acceptance list: ambulatory only, in-person
    /// channel, complete hours and manager, empty coordinator.
    fn ambulatory_in_person_draft() -> SiteDraft {
        SiteDraft {
            site_code: "S1".to_string(),
            address: "Calle 10".to_string(),
            department: "Antioquia".to_string(),
            municipality: "Medellin".to_string(),
            service_types: [ServiceType::Ambulatory].into_iter().collect(),
            appointment_channel: Some(AppointmentChannel::InPerson),
            in_person_hours: hours(),
            manager: complete_manager(),
            ..SiteDraft::default()
        }
    }

    #[test]
    fn empty_service_types_fail_regardless_of_other_fields() {
        let mut draft = ambulatory_in_person_draft();
        draft.service_types.clear();
        let outcome = validate_site(&draft);
        assert_eq!(
            outcome.reason(),
            Some("Select at least one service type.")
        );
    }

    #[test]
    fn missing_channel_is_the_second_rule() {
        let mut draft = ambulatory_in_person_draft();
        draft.appointment_channel = None;
        assert_eq!(
            validate_site(&draft).reason(),
            Some("Select an appointment-scheduling mechanism.")
        );
    }

    #[test]
    fn ambulatory_in_person_without_coordinator_is_valid() {
        assert!(validate_site(&ambulatory_in_person_draft()).is_valid());
    }

    #[test]
    fn hospital_with_empty_coordinator_is_invalid() {
        let mut draft = ambulatory_in_person_draft();
        draft.service_types = [ServiceType::Hospital].into_iter().collect();
        let outcome = validate_site(&draft);
        assert_eq!(
            outcome.reason(),
            Some("Complete the referral-system coordinator data.")
        );
    }

    #[test]
    fn omitting_any_coordinator_field_is_invalid() {
        let base = {
            let mut draft = ambulatory_in_person_draft();
            draft.service_types = [ServiceType::Home].into_iter().collect();
            draft.coordinator = complete_coordinator();
            draft
        };
        assert!(validate_site(&base).is_valid());

        for missing in 0..4 {
            let mut draft = base.clone();
            match missing {
                0 => draft.coordinator.first_name.clear(),
                1 => draft.coordinator.first_surname.clear(),
                2 => draft.coordinator.phone.clear(),
                _ => draft.coordinator.email.clear(),
            }
            assert!(
                !validate_site(&draft).is_valid(),
                "coordinator field {missing} missing should be invalid"
            );
        }
    }

    #[test]
    fn in_person_channel_requires_both_hour_ends() {
        let mut draft = ambulatory_in_person_draft();
        draft.in_person_hours.to.clear();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("Complete the in-person attention hours.")
        );
    }

    #[test]
    fn both_channel_requires_in_person_hours_and_remote_block() {
        let mut draft = ambulatory_in_person_draft();
        draft.appointment_channel = Some(AppointmentChannel::Both);

        // In-person hours already complete; remote block still empty.
        assert!(!validate_site(&draft).is_valid());

        draft.remote_channels = complete_remote_channels();
        assert!(validate_site(&draft).is_valid());

        draft.in_person_hours.from.clear();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("Complete the in-person attention hours.")
        );
    }

    #[test]
    fn whatsapp_with_eleven_digits_is_invalid() {
        let mut draft = ambulatory_in_person_draft();
        draft.appointment_channel = Some(AppointmentChannel::Remote);
        draft.remote_channels = complete_remote_channels();
        draft.remote_channels.whatsapp = "12345678901".to_string();
        let outcome = validate_site(&draft);
        assert_eq!(
            outcome.reason(),
            Some("The WhatsApp number is required and must have at most 10 digits.")
        );
    }

    #[test]
    fn remote_channel_checks_run_in_order() {
        let mut draft = ambulatory_in_person_draft();
        draft.appointment_channel = Some(AppointmentChannel::Remote);
        draft.remote_channels = complete_remote_channels();

        draft.remote_channels.website.clear();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("The website is required for this mechanism.")
        );

        // An earlier broken rule masks the later one.
        draft.remote_channels.phone_hours.from.clear();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("Complete the phone-line attention hours.")
        );
    }

    #[test]
    fn manager_phone_pattern_is_enforced() {
        let mut draft = ambulatory_in_person_draft();
        draft.manager.admin_cell = "300-123".to_string();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("Manager and administrative phone numbers must have at most 10 digits.")
        );
    }

    #[test]
    fn manager_email_shape_is_enforced() {
        let mut draft = ambulatory_in_person_draft();
        draft.manager.manager_email = "not-an-email".to_string();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("Check the manager and administrative email addresses.")
        );
    }

    #[test]
    fn missing_manager_field_reports_before_pattern_checks() {
        let mut draft = ambulatory_in_person_draft();
        draft.manager.authorized_email.clear();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("Complete every field for the manager or scientific director.")
        );
    }

    #[test]
    fn invalid_coordinator_email_is_reported() {
        let mut draft = ambulatory_in_person_draft();
        draft.service_types = [ServiceType::Transport].into_iter().collect();
        draft.coordinator = complete_coordinator();
        draft.coordinator.email = "coordinador@ips".to_string();
        assert_eq!(
            validate_site(&draft).reason(),
            Some("The coordinator email is not valid.")
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let mut draft = ambulatory_in_person_draft();
        draft.manager.cell.clear();
        let first = validate_site(&draft);
        let second = validate_site(&draft);
        assert_eq!(first, second);
    }
}
