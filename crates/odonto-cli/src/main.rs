use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use odonto_cli::config::{self, OdontoConfig};
use odonto_cli::render;
use odonto_client::client::ClinicClient;
use odonto_core::models::catalog::DiagnosisCatalog;
use odonto_core::models::odontogram::Odontogram;
use odonto_core::models::patient::PatientId;
use odonto_display::manager::CpoManager;
use odonto_display::state::CpoPanel;
use odonto_indices::rules::IndexTally;
use odonto_indices::{DentalIndex, all_indices, require_index};

#[derive(Parser)]
#[command(name = "odonto")]
#[command(about = "Dental caries indices (CPO-D, ceo-d) for the clinic backend")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute indices from odontogram and catalog JSON files
    Compute {
        /// Odontogram JSON (tooth -> surface -> diagnoses)
        #[arg(long)]
        odontogram: PathBuf,
        /// Diagnosis catalog JSON (list of categories)
        #[arg(long)]
        catalog: PathBuf,
        /// Index id ("cpo", "ceo") or "all"
        #[arg(long, default_value = "all")]
        index: String,
        /// Also list the finding counted for each tooth
        #[arg(long)]
        teeth: bool,
    },
    /// Compare a patient's saved CPO with the one calculated now
    Status {
        /// Backend patient id
        patient_id: String,
    },
    /// Calculate a patient's CPO and persist it
    Save {
        /// Backend patient id
        patient_id: String,
    },
    /// List the available indices and the diagnosis rules they apply
    Indices,
    /// Manage the backend connection
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Create or update the config
    Set {
        /// Backend base URL, e.g. https://clinica.example
        base_url: String,
        /// Bearer token sent with every request
        #[arg(long)]
        token: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Show the config with the token redacted
    Show,
    /// Delete the config file
    Delete,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Compute {
            odontogram,
            catalog,
            index,
            teeth,
        } => compute(&odontogram, &catalog, &index, teeth, cli.json),
        Commands::Status { patient_id } => status(patient_id.parse()?, cli.json).await,
        Commands::Save { patient_id } => save(patient_id.parse()?, cli.json).await,
        Commands::Indices => {
            list_indices(cli.json);
            Ok(())
        }
        Commands::Config { action } => configure(action, cli.json),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("failed to parse {}: {e}", path.display()))
}

fn compute(odontogram: &Path, catalog: &Path, index: &str, teeth: bool, as_json: bool) -> Result<()> {
    let odontogram: Odontogram = read_json(odontogram)?;
    let catalog: DiagnosisCatalog = read_json(catalog)?;

    let selected: Vec<Box<dyn DentalIndex>> = if index == "all" {
        all_indices()
    } else {
        vec![require_index(index)?]
    };

    let mut results = Vec::new();
    for idx in &selected {
        let breakdown = idx.classify_teeth(&odontogram, &catalog);
        let tally = IndexTally::from_breakdown(&breakdown);
        if as_json {
            results.push(json!({
                "id": idx.id(),
                "name": idx.name(),
                "decayed": tally.decayed,
                "missing": tally.missing,
                "filled": tally.filled,
                "total": tally.total(),
                "teeth": breakdown,
            }));
        } else {
            println!("{}", idx.describe(&tally));
            if teeth {
                print!("{}", render::breakdown_text(&breakdown));
            }
        }
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}

fn build_client() -> Result<Arc<ClinicClient>> {
    let config = config::load_config()
        .map_err(|e| eyre::eyre!("{e}\nrun `odonto config set <base-url>` first"))?;
    Ok(Arc::new(ClinicClient::new(config.client_config())?))
}

/// Fetch the inputs the calculation needs, off the async runtime.
async fn fetch_inputs(
    client: &Arc<ClinicClient>,
    patient_id: &PatientId,
) -> Result<(Odontogram, DiagnosisCatalog)> {
    let client = client.clone();
    let patient_id = patient_id.clone();
    let inputs = tokio::task::spawn_blocking(move || {
        let odontogram = client.fetch_odontogram(&patient_id)?;
        let catalog = client.fetch_catalog()?;
        Ok::<_, odonto_client::error::ClientError>((odontogram, catalog))
    })
    .await??;
    Ok(inputs)
}

async fn load_manager(client: &Arc<ClinicClient>, patient_id: &PatientId) -> Result<CpoManager> {
    let (odontogram, catalog) = fetch_inputs(client, patient_id).await?;
    let mut manager = CpoManager::new();
    manager.update_inputs(Some(&odontogram), Some(&catalog));
    manager.refresh(client.clone(), patient_id.clone()).await;
    Ok(manager)
}

fn print_panel(panel: &CpoPanel, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(panel)?);
    } else {
        print!("{}", render::panel_text(panel));
    }
    Ok(())
}

async fn status(patient_id: PatientId, as_json: bool) -> Result<()> {
    let client = build_client()?;
    let manager = load_manager(&client, &patient_id).await?;
    print_panel(&manager.panel(), as_json)
}

async fn save(patient_id: PatientId, as_json: bool) -> Result<()> {
    let client = build_client()?;
    let mut manager = load_manager(&client, &patient_id).await?;

    let calculated = manager.calculated();
    let stored = {
        let client = client.clone();
        let patient_id = patient_id.clone();
        tokio::task::spawn_blocking(move || client.save_cpo(&patient_id, &calculated)).await??
    };
    manager.mark_saved(stored)?;

    print_panel(&manager.panel(), as_json)
}

fn list_indices(as_json: bool) {
    for idx in all_indices() {
        if as_json {
            let entry = json!({
                "id": idx.id(),
                "name": idx.name(),
                "dentition": idx.dentition(),
                "rules": idx.rules(),
            });
            println!("{entry}");
        } else {
            let range = idx.dentition().range();
            println!(
                "{} ({}) teeth {}-{}",
                idx.name(),
                idx.id(),
                range.start(),
                range.end()
            );
            print!("{}", render::rules_text(idx.rules()));
        }
    }
}

fn configure(action: ConfigAction, as_json: bool) -> Result<()> {
    match action {
        ConfigAction::Set {
            base_url,
            token,
            timeout_secs,
        } => {
            let mut cfg = if config::has_config() {
                config::load_config()?
            } else {
                OdontoConfig::new(base_url.clone())
            };
            cfg.base_url = base_url;
            if token.is_some() {
                cfg.api_token = token;
            }
            if let Some(secs) = timeout_secs {
                cfg.timeout_secs = secs;
            }
            // Reject a bad URL before it is written.
            ClinicClient::new(cfg.client_config())?;
            let path = config::save_config(&cfg)?;
            println!("config written to {}", path.display());
        }
        ConfigAction::Show => {
            let info = config::config_info(&config::load_config()?);
            if as_json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("base_url:     {}", info.base_url);
                println!("timeout_secs: {}", info.timeout_secs);
                println!("created_at:   {}", info.created_at);
                println!("token:        {}", info.token_hint.as_deref().unwrap_or("-"));
            }
        }
        ConfigAction::Delete => config::delete_config()?,
    }
    Ok(())
}
