//! `flagdeck` command line.
//!
//! Every mutating command first loads the environments page and refuses to
//! call the registry unless the page offers the matching control, the same
//! way the console only renders a button when it is allowed.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use flagdeck_domain::{EnvironmentId, EnvironmentPatch};

use crate::app::App;
use crate::infrastructure::config::AppConfig;
use crate::use_cases::{EnvironmentControl, EnvironmentsPage, NewEnvironment};

#[derive(Debug, Parser)]
#[command(name = "flagdeck")]
#[command(about = "Manage the environments of a feature flag organization")]
pub struct Cli {
    /// API base URL (overrides FLAGDECK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Organization id (overrides FLAGDECK_ORGANIZATION)
    #[arg(long, global = true)]
    organization: Option<String>,
    /// Permissions JSON file (overrides FLAGDECK_PERMISSIONS_FILE)
    #[arg(long, global = true)]
    permissions: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show environments with key counts and available actions
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add an environment at the end of the list
    Create(CreateArgs),
    /// Change an environment's fields
    Update(UpdateArgs),
    /// Remove an environment
    Delete { id: String },
    /// Move an environment one position up
    MoveUp { id: String },
    /// Move an environment one position down
    MoveDown { id: String },
}

#[derive(Debug, Args)]
struct CreateArgs {
    id: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Flags start disabled in this environment
    #[arg(long)]
    default_off: bool,
    /// Show a toggle for this environment on the feature list
    #[arg(long)]
    toggle_on_list: bool,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_enum)]
    default_state: Option<DefaultState>,
    #[arg(long)]
    toggle_on_list: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DefaultState {
    On,
    Off,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(organization) = &self.organization {
            config.organization = Some(organization.clone());
        }
        if let Some(permissions) = &self.permissions {
            config.permissions_file = Some(permissions.clone());
        }
    }
}

impl CreateArgs {
    fn into_new_environment(self) -> NewEnvironment {
        NewEnvironment {
            id: self.id,
            description: self.description,
            default_state: self.default_off.then_some(false),
            toggle_on_list: self.toggle_on_list,
        }
    }
}

impl UpdateArgs {
    fn patch(&self) -> EnvironmentPatch {
        EnvironmentPatch {
            description: self.description.clone(),
            default_state: self.default_state.map(|s| s == DefaultState::On),
            toggle_on_list: self.toggle_on_list,
        }
    }
}

/// Run one command against the configured organization.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env();
    cli.apply_overrides(&mut config);
    let app = App::from_config(&config).context("Failed to configure flagdeck")?;

    let json = matches!(cli.command, Command::List { json: true });
    let page = execute(&app, cli.command).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page);
    }
    Ok(())
}

/// Apply one command and return the page to show afterwards.
///
/// A mutation that saved something fires the refresh signal; the page is then
/// loaded again from the store rather than derived from the registry's copy.
async fn execute(app: &App, command: Command) -> Result<EnvironmentsPage> {
    let page = load_page(app).await?;
    let mut refreshed = app.refresh.subscribe();

    match command {
        Command::List { .. } => return Ok(page),
        Command::Create(args) => {
            authorize(&page, &EnvironmentControl::Create, "create environments")?;
            app.registry.create(args.into_new_environment()).await?;
        }
        Command::Update(args) => {
            let id = EnvironmentId::from_stored(args.id.clone());
            authorize(&page, &EnvironmentControl::Edit(id.clone()), "edit this environment")?;
            app.registry.update(&id, args.patch()).await?;
        }
        Command::Delete { id } => {
            let id = EnvironmentId::from_stored(id);
            authorize(&page, &EnvironmentControl::Delete(id.clone()), "delete this environment")?;
            app.registry.delete(&id).await?;
        }
        Command::MoveUp { id } => {
            let id = EnvironmentId::from_stored(id);
            authorize(&page, &EnvironmentControl::MoveUp(id.clone()), "move this environment up")?;
            app.registry.move_up_by_id(&id).await?;
        }
        Command::MoveDown { id } => {
            let id = EnvironmentId::from_stored(id);
            authorize(
                &page,
                &EnvironmentControl::MoveDown(id.clone()),
                "move this environment down",
            )?;
            app.registry.move_down_by_id(&id).await?;
        }
    }

    // Errors only once the sender is dropped; treat that as changed.
    if !refreshed.has_changed().unwrap_or(true) {
        tracing::debug!("Nothing saved, keeping the loaded page");
        return Ok(page);
    }
    refreshed.mark_unchanged();
    tracing::debug!(generation = app.refresh.generation(), "Reloading after save");
    load_page(app).await
}

async fn load_page(app: &App) -> Result<EnvironmentsPage> {
    app.page
        .execute(&app.permissions)
        .await
        .context("Failed to load environments")
}

fn authorize(page: &EnvironmentsPage, control: &EnvironmentControl, what: &str) -> Result<()> {
    if page.allows(control) {
        return Ok(());
    }
    tracing::warn!(?control, "Control not offered to this actor");
    bail!("Not allowed to {}", what)
}

fn print_page(page: &EnvironmentsPage) {
    if let Some(message) = page.empty_state {
        println!("{}", message);
        return;
    }
    println!(
        "{:<20} {:<30} {:<8} {:<8} {:<10} ACTIONS",
        "ENVIRONMENT", "DESCRIPTION", "DEFAULT", "TOGGLE", "API KEYS"
    );
    for row in &page.rows {
        let mut actions = Vec::new();
        if row.controls.can_edit {
            actions.push("edit");
        }
        if row.controls.can_move_up {
            actions.push("up");
        }
        if row.controls.can_move_down {
            actions.push("down");
        }
        if row.controls.can_delete {
            actions.push("delete");
        }
        println!(
            "{:<20} {:<30} {:<8} {:<8} {:<10} {}",
            row.id,
            row.description,
            row.default_state,
            row.toggle_on_list,
            row.api_keys_label(),
            actions.join(",")
        );
    }
}
