//! Armada CLI - Service registry management
//!
//! Thin client for the Armada HTTP API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use armada::domain::validation::validate_service_spec;
use armada::{
    Annotations, ContainerSpec, ImageSpec, ResourceRequirements, Resources, RuntimeSpec, Service,
    ServiceSpec, TaskTemplate,
};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;

use api::ArmadaClient;
use config::Config;

#[derive(Parser)]
#[command(name = "armada")]
#[command(about = "Armada CLI - Service registry management", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store server URL and API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
        /// Server URL
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Service operations
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum ServiceAction {
    /// Create a service
    Create {
        /// Service name
        name: String,
        /// Container image reference (e.g. "nginx:latest")
        #[arg(short, long)]
        image: String,
        /// Desired number of instances
        #[arg(short = 'n', long, default_value = "1")]
        instances: u64,
        /// Environment variables (KEY=value, repeatable)
        #[arg(short, long)]
        env: Vec<String>,
        /// Labels (key=value, repeatable)
        #[arg(short, long)]
        label: Vec<String>,
        #[command(flatten)]
        resources: ResourceArgs,
    },
    /// List services
    #[command(alias = "ls")]
    List {
        /// Only services whose name or ID starts with this
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show a service as JSON
    Inspect {
        /// Service ID
        id: String,
    },
    /// Change a service; unspecified fields keep their current value
    Update {
        /// Service ID
        id: String,
        /// New container image reference
        #[arg(short, long)]
        image: Option<String>,
        /// New number of instances
        #[arg(short = 'n', long)]
        instances: Option<u64>,
        /// Replace environment variables (KEY=value, repeatable)
        #[arg(short, long)]
        env: Vec<String>,
        #[command(flatten)]
        resources: ResourceArgs,
    },
    /// Remove services
    #[command(alias = "rm")]
    Remove {
        /// Service IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args, Default)]
struct ResourceArgs {
    /// CPU limit in cores (e.g. 0.5)
    #[arg(long)]
    cpus: Option<f64>,
    /// Memory limit (e.g. 512MiB, 1GiB)
    #[arg(long)]
    memory: Option<String>,
    /// CPU reservation in cores
    #[arg(long)]
    reserve_cpus: Option<f64>,
    /// Memory reservation
    #[arg(long)]
    reserve_memory: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key, url } => cmd_login(key, url).await,
        Commands::Service { action } => cmd_service(action).await,
        Commands::Config => cmd_config(),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = url {
        config.set_base_url(url);
    }

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key (empty if auth is disabled)")
            .allow_empty_password(true)
            .interact()
            .context("Failed to read API key")?,
    };
    config.set_api_key(api_key);

    // Test connection
    let client = ArmadaClient::new(&config.base_url, config.api_key.as_deref());
    print!("Testing connection to {}... ", config.base_url);

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Armada API at {}", config.base_url);
        }
    }

    config.save()?;
    println!("{} Configuration saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

async fn cmd_service(action: ServiceAction) -> Result<()> {
    let config = Config::load()?;
    let client = ArmadaClient::new(&config.base_url, config.api_key.as_deref());

    match action {
        ServiceAction::Create {
            name,
            image,
            instances,
            env,
            label,
            resources,
        } => {
            let mut container = ContainerSpec::new(image);
            container.env = env;
            resources.apply(&mut container)?;

            let mut annotations = Annotations::named(name);
            for pair in &label {
                let (k, v) = split_pair(pair)?;
                annotations = annotations.with_label(k, v);
            }

            let spec = ServiceSpec {
                annotations,
                template: Some(TaskTemplate::from_container(container)),
                instances,
            };
            validate_service_spec(Some(&spec))?;

            let service = client.create_service(&spec).await?;
            println!(
                "{} Service {} created ({})",
                "✓".green(),
                service.name().cyan(),
                service.id
            );
        }

        ServiceAction::List { query } => {
            let services = client.list_services(query.as_deref()).await?;

            if services.is_empty() {
                println!("No services found.");
                return Ok(());
            }

            println!("{}", "Services:".bold());
            for service in &services {
                print_summary(service);
            }
        }

        ServiceAction::Inspect { id } => {
            let service = client.get_service(&id).await?;
            let json = serde_json::to_string_pretty(&service)
                .context("Failed to format service")?;
            println!("{}", json);
        }

        ServiceAction::Update {
            id,
            image,
            instances,
            env,
            resources,
        } => {
            let current = client.get_service(&id).await?;
            let mut spec = current.spec.clone();

            if let Some(n) = instances {
                spec.instances = n;
            }
            let container = match spec.template.as_mut().and_then(|t| t.runtime.as_mut()) {
                Some(RuntimeSpec::Container(c)) => c,
                _ => bail!("Service {} does not run a container", id),
            };
            if let Some(reference) = image {
                container.image = Some(ImageSpec { reference });
            }
            if !env.is_empty() {
                container.env = env;
            }
            resources.apply(container)?;
            validate_service_spec(Some(&spec))?;

            let updated = client
                .update_service(&id, current.meta.version, &spec)
                .await?;
            println!(
                "{} Service {} updated to version {}",
                "✓".green(),
                updated.name().cyan(),
                updated.meta.version
            );
        }

        ServiceAction::Remove { ids } => {
            for id in ids {
                client.remove_service(&id).await?;
                println!("{} Service {} removed", "✓".green(), id);
            }
        }
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );

    Ok(())
}

// ============================================
// Helpers
// ============================================

impl ResourceArgs {
    /// Overlay the given quantities onto the container's requirements
    fn apply(&self, container: &mut ContainerSpec) -> Result<()> {
        if self.cpus.is_none()
            && self.memory.is_none()
            && self.reserve_cpus.is_none()
            && self.reserve_memory.is_none()
        {
            return Ok(());
        }

        let reqs = container
            .resources
            .get_or_insert_with(ResourceRequirements::default);
        overlay(&mut reqs.limits, self.cpus, self.memory.as_deref())?;
        overlay(
            &mut reqs.reservations,
            self.reserve_cpus,
            self.reserve_memory.as_deref(),
        )?;
        Ok(())
    }
}

fn overlay(target: &mut Option<Resources>, cpus: Option<f64>, memory: Option<&str>) -> Result<()> {
    if cpus.is_none() && memory.is_none() {
        return Ok(());
    }
    let r = target.get_or_insert_with(Resources::default);
    if let Some(cpus) = cpus {
        r.nano_cpus = parse_cpus(cpus)?;
    }
    if let Some(memory) = memory {
        r.memory_bytes = parse_memory(memory)?;
    }
    Ok(())
}

/// Largest core count whose nanocpu value fits in an i64
const MAX_CPUS: f64 = i64::MAX as f64 / 1e9;

/// Cores to nanocpus
fn parse_cpus(cpus: f64) -> Result<i64> {
    if !cpus.is_finite() || cpus < 0.0 {
        bail!("Invalid CPU quantity: {}", cpus);
    }
    if cpus >= MAX_CPUS {
        bail!("CPU quantity {} is too large (must be below {})", cpus, MAX_CPUS);
    }
    Ok((cpus * 1e9).round() as i64)
}

/// Byte quantity with an optional binary suffix: 4194304, 512KiB, 64MiB, 2GiB
fn parse_memory(value: &str) -> Result<i64> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);

    let amount: i64 = digits
        .parse()
        .with_context(|| format!("Invalid memory quantity: {:?}", value))?;
    let multiplier: i64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kib" => 1 << 10,
        "m" | "mib" => 1 << 20,
        "g" | "gib" => 1 << 30,
        other => bail!("Unknown memory unit {:?} (use B, KiB, MiB or GiB)", other),
    };

    amount
        .checked_mul(multiplier)
        .with_context(|| format!("Memory quantity too large: {:?}", value))
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .with_context(|| format!("Expected key=value, got {:?}", pair))
}

fn print_summary(service: &Service) {
    let image = service
        .spec
        .template
        .as_ref()
        .and_then(|t| t.container())
        .and_then(|c| c.image.as_ref())
        .map(|i| i.reference.as_str())
        .unwrap_or("-");

    println!(
        "  {} {} {} x{} {}",
        service.id.dimmed(),
        service.name().cyan().bold(),
        image,
        service.spec.instances,
        format!("v{}", service.meta.version).dimmed()
    );
}
