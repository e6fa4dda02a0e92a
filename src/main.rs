use actix_files as fs;
use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use filedock::server::{configure, FileStore};
use std::path::PathBuf;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Directory holding uploaded files and their index
    #[arg(long, default_value = "./uploads")]
    upload_dir: PathBuf,

    /// Directory with the built web client, served at `/`
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,

    /// Largest accepted upload, in megabytes
    #[arg(long, default_value_t = 10)]
    max_size_mb: u64,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let store = FileStore::open(&args.upload_dir, args.max_size_mb * BYTES_PER_MB)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let store = web::Data::new(store);

    log::info!("Starting file server at http://{}", args.bind);
    log::info!("Upload directory: {}", args.upload_dir.display());
    log::info!("Maximum upload size: {} MB", args.max_size_mb);

    let static_dir = args.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(Logger::default())
            .configure(configure)
            // Serve the web client
            .service(fs::Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind(&args.bind)?
    .run()
    .await
}
