use anyhow::{anyhow, Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;

use users_clubs::{
    api::{
        middleware::{with_http_layers, DEFAULT_BODY_LIMIT},
        rest::routes::register_routes,
        rpc::{users_grpc_service, UsersRpc, UsersServer},
    },
    contract::client::UsersApi,
    domain::service::{Service, ServiceConfig},
    gateways::local::UsersLocalClient,
    infra::storage::{migrations::Migrator, SeaOrmUsersRepository},
    UsersClubsConfig,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "users_clubs";
const MEMORY_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as "sqlite::memory:".
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case(MEMORY_DSN) || dsn.eq_ignore_ascii_case("sqlite://:memory:") {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if create_dirs {
        if let Some(dir) = p.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Pick the DSN to connect to: in-memory SQLite under `--mock`, otherwise the
/// configured URL with relative sqlite paths anchored at `home_dir`.
fn resolve_dsn(db: Option<&DatabaseConfig>, mock: bool, home_dir: &Path) -> Result<String> {
    if mock {
        return Ok(MEMORY_DSN.to_string());
    }
    let url = db
        .map(|c| c.url.trim())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| anyhow!("Database URL not configured"))?;

    if url.starts_with("sqlite:") {
        absolutize_sqlite_dsn(url, home_dir, true)
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(url.to_string())
    } else {
        Err(anyhow!("Unsupported database DSN: {}", url))
    }
}

async fn connect_db(dsn: &str, cfg: Option<&DatabaseConfig>) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    opts.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // Every pooled connection to an in-memory database sees its own database.
    if dsn == MEMORY_DSN {
        opts.max_connections(1).min_connections(1);
    } else if let Some(max) = cfg.and_then(|c| c.max_conns) {
        opts.max_connections(max);
    }

    if dsn.starts_with("sqlite:") {
        if let Some(ms) = cfg.and_then(|c| c.busy_timeout_ms) {
            let busy = Duration::from_millis(u64::from(ms));
            opts.map_sqlx_sqlite_opts(move |o| o.busy_timeout(busy));
        }
    }

    tracing::info!("Connecting to database: {}", dsn);
    Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database {dsn}"))
}

fn bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {host}:{port}"))
}

/// Users Server - users and clubs over REST and RPC
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - users and clubs over REST and RPC")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for the REST server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Port for the RPC server (overrides config)
    #[arg(long)]
    rpc_port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST and RPC servers
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        rpc_port: cli.rpc_port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Users Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let home_dir = PathBuf::from(&config.server.home_dir);
    let module_cfg: UsersClubsConfig = config.module_config(MODULE_NAME)?;
    let rest_addr = bind_addr(&config.server.host, config.server.port)?;
    let rpc_addr = bind_addr(&config.server.host, config.server.rpc_port)?;

    let dsn = resolve_dsn(config.database.as_ref(), args.mock, &home_dir)?;
    let db = connect_db(&dsn, config.database.as_ref()).await?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    let repo = SeaOrmUsersRepository::new(db);
    let service = Arc::new(Service::new(
        Arc::new(repo),
        ServiceConfig::from(&module_cfg),
    ));
    let api: Arc<dyn UsersApi> = Arc::new(UsersLocalClient::new(service));

    let timeout = (config.server.timeout_sec > 0)
        .then(|| Duration::from_secs(config.server.timeout_sec));
    let rest = with_http_layers(
        register_routes(Router::new(), api.clone()),
        timeout,
        DEFAULT_BODY_LIMIT,
    );
    let rpc = users_grpc_service(api);

    let rest_listener = TcpListener::bind(rest_addr)
        .await
        .with_context(|| format!("Failed to bind REST listener on {rest_addr}"))?;
    let rpc_listener = TcpListener::bind(rpc_addr)
        .await
        .with_context(|| format!("Failed to bind RPC listener on {rpc_addr}"))?;

    let cancel = CancellationToken::new();
    let signals = runtime::shutdown::cancel_on_signal(cancel.clone());

    tracing::info!(%rest_addr, "REST server listening");
    tracing::info!(%rpc_addr, "RPC server listening");

    let result = tokio::try_join!(
        serve("rest", rest_listener, rest, cancel.clone()),
        serve_grpc(rpc_listener, rpc, timeout, cancel.clone()),
    );

    // One server failing stops the other.
    cancel.cancel();
    signals.abort();
    result?;

    tracing::info!("Users Server stopped");
    Ok(())
}

async fn serve(
    name: &'static str,
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let shutdown = cancel.clone();
    let res = axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .with_context(|| format!("{name} server failed"));
    if res.is_err() {
        cancel.cancel();
    }
    tracing::info!(server = name, "server shut down");
    res
}

async fn serve_grpc(
    listener: TcpListener,
    service: UsersServer<UsersRpc>,
    timeout: Option<Duration>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut builder = tonic::transport::Server::builder()
        .trace_fn(|req| tracing::info_span!("grpc", path = %req.uri().path()));
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    let shutdown = cancel.clone();
    let res = builder
        .add_service(service)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            shutdown.cancelled().await
        })
        .await
        .context("rpc server failed");
    if res.is_err() {
        cancel.cancel();
    }
    tracing::info!(server = "rpc", "server shut down");
    res
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let home_dir = PathBuf::from(&config.server.home_dir);
    let _: UsersClubsConfig = config.module_config(MODULE_NAME)?;
    bind_addr(&config.server.host, config.server.port)?;
    bind_addr(&config.server.host, config.server.rpc_port)?;
    let dsn = resolve_dsn(config.database.as_ref(), args.mock, &home_dir)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Database: {dsn}");
    println!("{}", config.to_yaml()?);
    Ok(())
}
