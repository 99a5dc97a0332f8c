use std::net::IpAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use frls::RubyLanguageServer;

#[derive(Parser, Debug)]
#[command(name = "frls", version, about = "Fast Ruby Language Server")]
struct Args {
    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,

    /// Address to listen on in TCP mode.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Serve over TCP on this port instead of stdio.
    #[arg(long)]
    port: Option<u16>,
}

fn default_log_path() -> std::path::PathBuf {
    let dir = dirs_or_tmp();
    dir.join("frls.log")
}

fn dirs_or_tmp() -> std::path::PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = std::path::PathBuf::from(home).join(".frls");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let stderr_filter = if args.verbose {
        EnvFilter::new("frls=debug,tower_lsp=debug")
    } else {
        EnvFilter::new("frls=info,tower_lsp=warn")
    };

    let file_filter = if args.verbose {
        EnvFilter::new("frls=debug,tower_lsp=info")
    } else {
        EnvFilter::new("frls=info,tower_lsp=warn")
    };

    let log_path = args.log_file.as_ref().map(std::path::PathBuf::from).unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(std::path::Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("frls.log")),
    );

    let file_layer =
        fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(file_filter);

    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(stderr_filter);

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    info!("Starting frls v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    match args.port {
        Some(port) => serve_tcp(args.host, port).await,
        None => serve_stdio().await,
    }

    info!("frls stopped");
}

async fn serve_stdio() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(RubyLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

/// Accept clients until the listener fails. Each connection gets its own
/// server state.
async fn serve_tcp(
    host: IpAddr,
    port: u16,
) {
    let listener = match TcpListener::bind((host, port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to listen on {host}:{port}: {err}");
            return;
        },
    };
    info!("Listening on {host}:{port}");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                error!("accept failed: {err}");
                return;
            },
        };
        info!("Client connected from {peer}");
        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            let (service, socket) = LspService::new(RubyLanguageServer::new);
            Server::new(read, write, socket).serve(service).await;
            info!("Client {peer} disconnected");
        });
    }
}
