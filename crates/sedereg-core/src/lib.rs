//! Domain model and conditional validation engine for the multi-site
//! provider registration wizard.
//!
//! A provider (identified by its `nit` tax id) declares a variable number of
//! sites, each with its own operational data. Which sections of a site draft
//! are mandatory depends on the service types chosen there; the validation
//! engine applies those rules fail-fast, one human-readable reason per site.

mod app_config;
mod config;
mod draft;
mod payload;
mod provider;
mod sites;
mod validate;

pub use app_config::AppConfig;
pub use config::load_app_config_from_env;
pub use draft::{
    join_names, AppointmentChannel, CoordinatorData, HourRange, ManagerData, RemoteChannels,
    SectionFlags, ServiceType, SiteDraft,
};
pub use payload::{CoordinatorPayload, ManagerPayload, RegistrationRequest, SitePayload};
pub use provider::ProviderContext;
pub use sites::{group_by_site, retain_unregistered, SelectionError, ServiceItem, SiteSelection};
pub use validate::{validate_site, ValidationOutcome};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
