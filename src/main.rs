// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! `uasd` command-line client.
//!
//! Drives the same session and workflow core the mobile screens use,
//! persisting the session in a local JSON file.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uasd_client::{
    config::Config,
    error::AppError,
    models::{filter_news, Credentials, Registration, RequestKind},
    services::feeds::{self, Feed},
    store::FileStore,
    time_utils::spanish_weekday_label,
    AppState,
};

#[derive(Parser)]
#[command(name = "uasd", about = "UASD student services client")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the logged-in profile
    Whoami,
    /// Create an account
    Register {
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        apellido: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Request a password reset email
    ResetPassword {
        #[arg(long)]
        usuario: String,
        #[arg(long)]
        email: String,
    },
    /// Change the current password
    ChangePassword {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// List available courses and current pre-selection
    Courses,
    /// Pre-select a course
    Select { codigo: String },
    /// Cancel a course pre-selection
    Cancel { codigo: String },
    /// Weekly schedule of the pre-selected courses
    Schedule,
    /// Administrative requests
    Requests {
        #[command(subcommand)]
        action: Option<RequestAction>,
    },
    /// Read-only feeds
    Feed {
        #[arg(value_enum)]
        kind: FeedKind,
        /// Filter news by title or date
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
enum RequestAction {
    /// List my requests (default)
    List,
    /// Create a request
    Create {
        /// beca, carta_estudio or record_nota
        #[arg(long)]
        tipo: String,
        #[arg(long)]
        descripcion: String,
    },
    /// Cancel a request by id
    Cancel { id: u64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum FeedKind {
    News,
    Events,
    Videos,
    Tasks,
    Debts,
    Schedules,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_err) => {
                    eprintln!("Error: {}", app_err.user_message());
                    if app_err.requires_login() {
                        eprintln!("Inicie sesión con `uasd login`.");
                    }
                }
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    let store = Arc::new(FileStore::new(config.session_file.clone()));
    let state = AppState::new(config, store)?;
    state.auth.restore().await?;

    match command {
        Command::Login { username, password } => {
            let session = state
                .auth
                .login(&Credentials::new(username, password))
                .await?;
            println!("Bienvenido, {}", session.user.full_name());
        }
        Command::Logout => {
            state.auth.logout().await?;
            println!("Sesión cerrada");
        }
        Command::Whoami => {
            let user = state.auth.current_user().await?;
            println!("{} <{}>", user.full_name(), user.email);
        }
        Command::Register {
            nombre,
            apellido,
            username,
            email,
            password,
        } => {
            let registration = Registration {
                nombre,
                apellido,
                username,
                email,
                password,
            };
            state.auth.register(&registration).await?;
            println!("Usuario creado exitosamente. Inicie sesión para continuar.");
        }
        Command::ResetPassword { usuario, email } => {
            state.auth.reset_password(&usuario, &email).await?;
            println!("Se ha enviado un enlace para restablecer tu contraseña a tu correo.");
        }
        Command::ChangePassword { old, new, confirm } => {
            state.auth.change_password(&old, &new, &confirm).await?;
            println!("Contraseña cambiada exitosamente");
        }
        Command::Courses => {
            let mut workflow = state.preselection();
            workflow.load_all().await?;
            for item in workflow.catalog().unwrap_or_default() {
                let mark = if workflow.is_selected(&item.codigo) { "*" } else { " " };
                println!(
                    "{} {:<10} {:<40} {:<20} {}",
                    mark, item.codigo, item.nombre, item.horario, item.aula
                );
            }
        }
        Command::Select { codigo } => {
            let mut workflow = state.preselection();
            let selections = workflow.select(&codigo).await?;
            println!("Materia preseleccionada ({} en total)", selections.len());
        }
        Command::Cancel { codigo } => {
            let mut workflow = state.preselection();
            let selections = workflow.cancel(&codigo).await?;
            println!("Preselección cancelada ({} restantes)", selections.len());
        }
        Command::Schedule => {
            let mut workflow = state.preselection();
            workflow.load_all().await?;
            let schedule = workflow.schedule().unwrap_or_default();
            for (day, courses) in schedule.iter() {
                println!("{}", spanish_weekday_label(day));
                for course in courses {
                    println!(
                        "  {} {} {} {}",
                        course.hora, course.codigo, course.nombre, course.aula
                    );
                }
            }
        }
        Command::Requests { action } => {
            run_requests(&state, action.unwrap_or(RequestAction::List)).await?
        }
        Command::Feed { kind, search } => match kind {
            FeedKind::News => {
                let items = state.feed::<feeds::News>().load_on_focus().await?;
                let shown = filter_news(&items, search.as_deref().unwrap_or(""));
                if shown.is_empty() {
                    println!("No hay noticias disponibles");
                }
                for item in shown {
                    println!(
                        "[{}] {}\n    {}\n    {}",
                        item.date, item.title, item.summary, item.url
                    );
                }
            }
            FeedKind::Events => {
                for item in load::<feeds::Events>(&state).await? {
                    println!("{} - {} ({})", item.fecha_evento, item.titulo, item.lugar);
                }
            }
            FeedKind::Videos => {
                for item in load::<feeds::Videos>(&state).await? {
                    println!("{} {}", item.titulo, item.watch_url());
                }
            }
            FeedKind::Tasks => {
                for item in load::<feeds::Tasks>(&state).await? {
                    println!(
                        "{} [{}] vence {}",
                        item.titulo,
                        item.status_label(),
                        item.fecha_vencimiento
                    );
                }
            }
            FeedKind::Debts => {
                for item in load::<feeds::Debts>(&state).await? {
                    let status = if item.pagada { "pagada" } else { "pendiente" };
                    println!("{} {:.2} ({})", item.concepto, item.monto, status);
                }
            }
            FeedKind::Schedules => {
                for item in load::<feeds::Schedules>(&state).await? {
                    println!("{} {} {} {}", item.codigo, item.nombre, item.horario, item.aula);
                }
            }
        },
    }

    Ok(())
}

async fn run_requests(state: &AppState, action: RequestAction) -> anyhow::Result<()> {
    let mut workflow = state.requests();
    let records = match action {
        RequestAction::List => workflow.load().await?,
        RequestAction::Create { tipo, descripcion } => {
            let kind = RequestKind::from_code(&tipo)
                .with_context(|| format!("Tipo de solicitud desconocido: {}", tipo))?;
            workflow.create(kind, &descripcion).await?
        }
        RequestAction::Cancel { id } => workflow.cancel(id).await?,
    };

    if records.is_empty() {
        println!("No hay solicitudes");
    }
    for record in records {
        println!("#{} {} - {}", record.id, record.tipo, record.estado);
    }
    Ok(())
}

/// Load a feed, printing the empty-state message when it has no items.
async fn load<F: Feed>(state: &AppState) -> anyhow::Result<Vec<F::Item>> {
    let items = state.feed::<F>().load_on_focus().await?;
    if items.is_empty() {
        println!("No hay elementos disponibles");
    }
    Ok(items)
}

/// Initialize logging to stderr; JSON when requested.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,uasd_client=info"));

    let json = json || std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
