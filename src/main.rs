use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use log::debug;
use modern_blog_lib::api::{self, StoreServerConfig};
use modern_blog_lib::cli::{self, FieldArgs};
use modern_blog_lib::client::{LocalArticleStore, StoreBackend};
use modern_blog_lib::config::{AppConfig, FlatConfig};
use modern_blog_lib::entities::ArticleId;
use modern_blog_lib::logging;
use modern_blog_lib::web_ui::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "modern-blog", version, about = "A blog front-end over a remote article store")]
struct Cli {
    #[command(flatten)]
    config: FlatConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the web UI
    Serve {
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST), help = "Address to bind to")]
        host: IpAddr,
        #[arg(long, help = "Port to bind to; a free port is picked when omitted")]
        port: Option<u16>,
        #[arg(long, help = "Use an in-process store instead of the article store API")]
        local: bool,
    },
    /// Run the reference article store server
    Store {
        #[arg(long, default_value = "[::]:1698", help = "Address to bind to")]
        addr: SocketAddr,
        #[arg(long, help = "JSON-lines file the articles are persisted to; in memory when omitted")]
        db: Option<PathBuf>,
    },
    /// List articles, optionally filtered by a tag
    List {
        #[arg(long)]
        tag: Option<String>,
    },
    /// List the distinct tags in first-seen order
    Tags,
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        excerpt: String,
        #[arg(long)]
        image: String,
        #[arg(long, help = "Comma-separated tags")]
        tags: String,
        #[arg(long)]
        read_time: String,
    },
    /// Edit an article; omitted fields keep their current value
    Edit {
        id: ArticleId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long, help = "Comma-separated tags")]
        tags: Option<String>,
        #[arg(long)]
        read_time: Option<String>,
    },
    /// Delete an article
    Delete {
        id: ArticleId,
    },
    /// Read or write the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print a setting [api-url, locale]
    Get {
        key: String,
    },
    /// Persist a setting [api-url, locale]
    Set {
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    let config = AppConfig::load(args.config);
    logging::init(config.log_level)?;
    debug!("{:?}", &config);

    let locale = config.display.locale;
    let exit_code = match args.command {
        Command::Serve { host, port, local } => {
            let store = if local {
                StoreBackend::Local(LocalArticleStore::default())
            } else {
                cli::http_store(&config)?
            };
            web_ui::serve(AppState::new(config, store), host, port).await?;
            ExitCode::SUCCESS
        }
        Command::Store { addr, db } => {
            api::serve(StoreServerConfig { addr, log_path: db }).await?;
            ExitCode::SUCCESS
        }
        Command::List { tag } => cli::list_articles(cli::http_store(&config)?, tag).await,
        Command::Tags => cli::list_tags(cli::http_store(&config)?).await,
        Command::Create { title, excerpt, image, tags, read_time } => {
            let fields = FieldArgs {
                title: Some(title),
                excerpt: Some(excerpt),
                image: Some(image),
                tags: Some(tags),
                read_time: Some(read_time),
            };
            cli::create_article(cli::http_store(&config)?, locale, fields).await
        }
        Command::Edit { id, title, excerpt, image, tags, read_time } => {
            let fields = FieldArgs { title, excerpt, image, tags, read_time };
            cli::edit_article(cli::http_store(&config)?, locale, id, fields).await
        }
        Command::Delete { id } => cli::delete_article(cli::http_store(&config)?, locale, id).await,
        Command::Config { command } => match command {
            ConfigCommand::Get { key } => cli::get_config_value(&config, &key),
            ConfigCommand::Set { key, value } => cli::set_config_value(&config, &key, &value)?,
        },
    };
    Ok(exit_code)
}
