use anyhow::Context;
use bookshelf_app::App;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookshelf-cli", version, about = "Authors and books REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Print the OpenAPI document as JSON
    Openapi,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Openapi => print_openapi(),
        Command::Serve => {
            let settings = bootstrap()?;
            runtime()?.block_on(bookshelf_app::app::serve(&settings))
        }
        Command::Migrate => {
            let settings = bootstrap()?;
            runtime()?.block_on(async {
                let applied = App::from_settings(&settings).await?.migrate().await?;
                tracing::info!(applied, "migrate finished");
                Ok(())
            })
        }
    }
}

// Stdout carries the document; no settings or subscriber needed.
fn print_openapi() -> anyhow::Result<()> {
    let document = bookshelf_http::openapi_document(App::in_memory().registry());
    let json = document
        .to_pretty_json()
        .context("failed to serialize OpenAPI document")?;
    println!("{json}");
    Ok(())
}

fn bootstrap() -> anyhow::Result<Settings> {
    let settings = Settings::load().context("failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;
    Ok(settings)
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")
}
