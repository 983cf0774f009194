use clap::{Parser, Subcommand};
use mitele::{ContentMode, ItemKind, Page, Plugin, PluginConfig, PluginError, ResolverKind};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Browse mitele.es from the terminal
#[derive(Parser)]
#[command(name = "mitele", version, about)]
struct Cli {
    /// TOML file overriding the default plugin configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Stream resolver to use (unlock or descargavideos)
    #[arg(long, global = true)]
    resolver: Option<ResolverKind>,

    /// Log every request
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a navigation URI and print the resulting page
    Open {
        /// Navigation URI, e.g. mitele:start
        uri: Option<String>,
    },
    /// Search the site
    Search {
        query: String,
        /// Number of result pages to fetch at most
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a page the way a text-only host would render it
fn print_page(page: &Page) {
    println!("=== {} ===", page.title);
    if let Some(logo) = &page.logo {
        println!("Logo: {}", logo);
    }
    println!();

    for (index, item) in page.items.iter().enumerate() {
        println!("[{}] ({}) {}", index + 1, item.kind, item.title.to_plain());
        if let Some(icon) = &item.icon {
            println!("    Icon: {}", icon);
        }
        if let Some(description) = &item.description {
            let text = description.to_plain();
            if !text.is_empty() {
                println!("    {}", text.replace('\n', "\n    "));
            }
        }
        println!("    {}", item.uri);
    }

    match &page.source {
        Some(stream) => {
            println!("Playing ({}): {}", page.kind, stream.primary());
            for alternative in stream.alternatives() {
                println!("  Alternative: {}", alternative);
            }
        }
        None if page.kind != ItemKind::Directory => println!("Nothing playable."),
        None => {
            if page.items.is_empty() {
                println!("No items.");
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), PluginError> {
    let mut config = match &cli.config {
        Some(path) => PluginConfig::load(path)?,
        None => PluginConfig::default(),
    };
    if let Some(resolver) = cli.resolver {
        config.resolver = resolver;
    }

    let plugin = Plugin::with_http(config)?;

    match cli.command {
        Command::Open { uri } => {
            let uri = uri.unwrap_or_else(|| plugin.service().uri);
            let page = plugin.dispatch(&uri)?;
            print_page(&page);
        }
        Command::Search { query, pages } => {
            let mut page = Page::directory(format!("Búsqueda: {}", query), ContentMode::Contents);
            let mut paginator = plugin.search(&query);
            for _ in 0..pages.max(1) {
                if !paginator.next_page(&mut page)? {
                    break;
                }
            }
            print_page(&page);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
