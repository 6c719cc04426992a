use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use sedereg_client::PortalClient;
use sedereg_core::{group_by_site, AppConfig, ProviderContext, ServiceItem, SiteDraft};
use sedereg_wizard::{SubmitOutcome, WizardError, WizardSession};
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "sedereg-cli")]
#[command(about = "Multi-site provider registration wizard driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the site drafts in a wizard file without submitting.
    Validate {
        #[arg(long)]
        file: PathBuf,
    },
    /// Check the supporting-documents precondition for a provider.
    DocsCheck {
        #[arg(long)]
        nit: String,
    },
    /// Fetch the provider context used to pre-fill the wizard.
    Lookup {
        #[arg(long)]
        nit: String,
    },
    /// Run the full wizard: validate, consolidate, and submit all or nothing.
    Submit {
        #[arg(long)]
        file: PathBuf,
    },
}

/// On-disk wizard input: the provider context from the prior steps, the flat
/// list of chosen services, and the collected draft data keyed by site code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WizardFile {
    context: ProviderContext,
    services: Vec<ServiceItem>,
    #[serde(default)]
    drafts: Vec<SiteDraft>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sedereg_core::load_app_config_from_env();
    init_tracing(config.as_ref().map_or("info", |c| c.log_level.as_str()));

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { file } => validate(&file),
        Commands::DocsCheck { nit } => docs_check(&nit, &config?).await,
        Commands::Lookup { nit } => lookup(&nit, &config?).await,
        Commands::Submit { file } => submit(&file, &config?).await,
    }
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn validate(file: &Path) -> anyhow::Result<()> {
    let session = build_session(load_wizard_file(file)?)?;
    let issues = session.validate_all();

    for draft in session.forms().drafts() {
        match issues.iter().find(|i| i.site_code == draft.site_code) {
            Some(issue) => println!("site {}: {}", issue.site_code, issue.reason),
            None => println!("site {}: ok", draft.site_code),
        }
    }

    if issues.is_empty() {
        println!("all {} site(s) ready for submission", session.forms().len());
        Ok(())
    } else {
        bail!("review the pending fields in each site ({} failing)", issues.len())
    }
}

async fn docs_check(nit: &str, config: &AppConfig) -> anyhow::Result<()> {
    let client = PortalClient::new(config)?;
    let docs = client
        .check_supporting_docs(nit)
        .await
        .context("could not verify the supporting documents")?;
    println!("exists: {}, count: {}", docs.exists, docs.count);
    if docs.satisfied() {
        println!("supporting documents in place");
        Ok(())
    } else {
        bail!("attach at least one document to the supporting-documents folder")
    }
}

async fn lookup(nit: &str, config: &AppConfig) -> anyhow::Result<()> {
    let client = PortalClient::new(config)?;
    let store = sedereg_wizard::RegistrationStore::new();
    match sedereg_wizard::resolve_context(&store, &client, nit).await? {
        Some(context) => {
            println!("{}", serde_json::to_string_pretty(&context)?);
            Ok(())
        }
        None => bail!("no provider registered under nit {nit}"),
    }
}

async fn submit(file: &Path, config: &AppConfig) -> anyhow::Result<()> {
    let mut session = build_session(load_wizard_file(file)?)?;
    let client = PortalClient::new(config)?;

    match session.submit(&client).await {
        Ok(SubmitOutcome::Completed) => {
            println!("site information registered successfully");
            Ok(())
        }
        Ok(SubmitOutcome::ValidationFailed(issues)) => {
            for issue in &issues {
                println!("site {}: {}", issue.site_code, issue.reason);
            }
            bail!("review the pending fields in each site")
        }
        Ok(SubmitOutcome::Ignored) => bail!("a submission is already in flight"),
        Err(WizardError::DocumentsMissing) => {
            bail!("attach at least one document to the supporting-documents folder and retry")
        }
        Err(err @ WizardError::Transport(_)) => {
            Err(anyhow::Error::new(err).context("could not send the site form; drafts are unchanged"))
        }
        Err(err) => Err(err.into()),
    }
}

fn load_wizard_file(path: &Path) -> anyhow::Result<WizardFile> {
    tracing::debug!(path = %path.display(), "loading wizard file");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read wizard file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("could not parse wizard file {}", path.display()))
}

fn build_session(file: WizardFile) -> anyhow::Result<WizardSession> {
    let selections = group_by_site(file.services)?;
    let mut session = WizardSession::begin(file.context, selections)?;
    for draft in file.drafts {
        let Some(slot) = session.forms_mut().draft_mut_by_code(&draft.site_code) else {
            bail!("draft for unknown site {}", draft.site_code);
        };
        *slot = draft;
    }
    Ok(session)
}
