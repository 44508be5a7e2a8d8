use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client::{Pager, Stores};
use configs::AppConfig;
use dotenvy::dotenv;
use export::{export_filename, filter_contacts, to_csv, to_pdf, to_xlsx};
use models::Contact;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Back-office CLI for the PipeCraft backend.
#[derive(Parser)]
#[command(name = "pipecraft-admin", version, about)]
struct Cli {
    /// Sign in before running the command.
    #[arg(long, env = "PIPECRAFT_EMAIL", global = true)]
    email: Option<String>,
    #[arg(long, env = "PIPECRAFT_PASSWORD", global = true)]
    password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify credentials against the backend.
    Login,
    /// Show the current session user, restoring the session if possible.
    Status,
    /// Contact submissions.
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Portfolio projects.
    Projects,
    /// Service offerings.
    Services,
    /// Job postings.
    Careers,
    /// Team members.
    Team,
    /// Job applications, optionally for a single posting.
    Applications {
        #[arg(long)]
        career: Option<String>,
    },
}

#[derive(Subcommand)]
enum ContactsAction {
    /// Page through contacts with the dashboard's filters.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        service: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Write the filtered collection to a report file.
    Export {
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        service: Option<String>,
        /// Output path; defaults to contacts-YYYY-MM-DD.{ext}.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Xlsx,
    Pdf,
}

impl Format {
    fn ext(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
            Format::Pdf => "pdf",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_and_validate()?;
    let stores = Stores::new(&config)?;
    stores.seed_from_mirror().await;

    if let (Some(email), Some(password)) = (&cli.email, &cli.password) {
        let user = stores.auth.login(email, password).await?;
        info!(user = %user.email, "signed in");
    }

    match cli.command {
        Command::Login => {
            if !stores.auth.is_authenticated() {
                bail!("provide --email and --password (or PIPECRAFT_EMAIL / PIPECRAFT_PASSWORD)");
            }
            println!("ok");
        }
        Command::Status => {
            if stores.auth.is_authenticated() || stores.auth.check_auth_status().await {
                if let Some(user) = stores.auth.user() {
                    println!("{} <{}> ({})", user.name, user.email, user.role.as_str());
                }
            } else {
                println!("not authenticated");
            }
        }
        Command::Contacts { action } => run_contacts(&stores, action).await?,
        Command::Projects => {
            for p in stores.projects.list().await?.iter() {
                println!("{}  {}  client: {}", p.project_id, p.name, p.client);
            }
        }
        Command::Services => {
            for s in stores.services.list().await?.iter() {
                let state = if s.is_active { "active" } else { "inactive" };
                println!("{}  {}  [{state}]  {} features", s.service_id, s.title, s.features.len());
            }
        }
        Command::Careers => {
            for c in stores.careers.list().await?.iter() {
                println!(
                    "{}  {}  {} / {}  positions: {}",
                    c.career_id, c.job_title, c.department, c.location, c.number_of_positions
                );
            }
        }
        Command::Team => {
            for m in stores.team.list().await?.iter() {
                println!("{}  {} <{}>  {}", m.user_id, m.name, m.email, m.role.as_str());
            }
        }
        Command::Applications { career } => {
            let applications = match career {
                Some(career_id) => stores.applications.list_for_career(&career_id).await?,
                None => stores.applications.list().await?.as_ref().clone(),
            };
            for a in &applications {
                println!(
                    "{}  {} <{}>  for {}  at {}",
                    a.application_id,
                    a.applicant_name,
                    a.applicant_email,
                    a.career_id,
                    a.applied_at.format("%Y-%m-%d")
                );
            }
        }
    }
    Ok(())
}

async fn run_contacts(stores: &Stores, action: ContactsAction) -> Result<()> {
    match action {
        ContactsAction::List {
            search,
            service,
            page,
        } => {
            let contacts = stores.contacts.list().await?;
            let filtered = filter_contacts(&contacts, &search, service.as_deref());
            let mut pager = Pager::default();
            pager.page = page;
            pager.clamp(filtered.len());
            let pages = pager.page_count(filtered.len()).max(1);
            for contact in pager.slice(&filtered) {
                println!(
                    "{}  {} <{}>  {}",
                    contact.contact_id, contact.name, contact.email, contact.service_interested
                );
            }
            println!("page {}/{} ({} matching)", pager.page, pages, filtered.len());
        }
        ContactsAction::Export {
            format,
            search,
            service,
            out,
        } => {
            let contacts = stores.contacts.list().await?;
            let filtered: Vec<Contact> = filter_contacts(&contacts, &search, service.as_deref())
                .into_iter()
                .cloned()
                .collect();
            let bytes = match format {
                Format::Csv => to_csv(&filtered)?,
                Format::Xlsx => to_xlsx(&filtered)?,
                Format::Pdf => {
                    let today = chrono::Local::now().format("%d/%m/%Y").to_string();
                    to_pdf(&filtered, &today)
                }
            };
            let path = out.unwrap_or_else(|| export_filename("contacts", format.ext()).into());
            std::fs::write(&path, bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {} ({} contacts)", path.display(), filtered.len());
        }
        ContactsAction::Delete { id } => {
            stores.contacts.remove(&id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
