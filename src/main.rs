use actix_cors::Cors;
use actix_files::Files;
use actix_governor::Governor;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use curbside::global::init_jwt_secret;
use curbside::storage::ImageStore;
use curbside::{api, security, seed, DbPool, MIGRATIONS};
use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::MigrationHarness;
use dotenvy::dotenv;
use std::env;

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Populate the database with sample users, items, favorites and feedback
    #[clap(long)]
    seed: bool,
}

fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = load_config();

    let db_pool = initialize_db_pool(config.db_path);
    log::info!("Running database migrations");
    let mut conn = db_pool.get().expect("Failed to get database connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
    init_jwt_secret(&mut conn);

    let args = Args::parse();
    if args.seed {
        seed::run(&mut conn);
        return Ok(());
    }
    drop(conn);

    run_server(db_pool, config.upload_dir, config.port)
}

struct AppConfig {
    db_path: String,
    upload_dir: String,
    port: u16,
}

fn load_config() -> AppConfig {
    let db_path = match env::var("CS_DATABASE_URL") {
        Ok(path) => {
            log::info!("Using database path from CS_DATABASE_URL: {}", path);
            path
        }
        Err(_) => {
            let mut path = env::current_dir().expect("Failed to get current directory");
            path.push("curbside.db");
            let res = path.to_str().unwrap().to_string();
            log::info!("Using default database path: {}", res);
            res
        }
    };
    let upload_dir = match env::var("CS_UPLOAD_DIR") {
        Ok(path) => {
            log::info!("Using upload directory from CS_UPLOAD_DIR: {}", path);
            path
        }
        Err(_) => {
            let mut path = env::current_dir().expect("Failed to get current directory");
            path.push("uploads");
            let res = path.to_str().unwrap().to_string();
            log::info!("Using default upload directory: {}", res);
            res
        }
    };
    let port = match env::var("CS_PORT") {
        Ok(port) => {
            log::info!("Using port from CS_PORT: {}", port);
            port.parse::<u16>().expect("Failed to parse CS_PORT")
        }
        Err(_) => {
            log::info!("Using default port: 8080");
            8080
        }
    };

    AppConfig {
        db_path,
        upload_dir,
        port,
    }
}

#[actix_web::main]
async fn run_server(db_pool: DbPool, upload_dir: String, port: u16) -> std::io::Result<()> {
    let image_store = ImageStore::new(&upload_dir).expect("Failed to create upload directory");
    log::info!("Serving uploaded images from {}", upload_dir);
    log::info!("Starting server at http://127.0.0.1:{}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        let rate_limiter = security::create_rate_limiter();

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .wrap(security::SecurityHeaders)
            .wrap(cors)
            .wrap(Governor::new(&rate_limiter))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(image_store.clone()))
            .service(api::auth::handlers::register)
            .service(api::auth::handlers::login)
            .service(api::auth::handlers::current_user)
            .service(api::users::routes())
            .service(api::items::routes())
            .service(api::favorites::routes())
            .service(api::feedback::routes())
            .service(Files::new("/uploads", image_store.root()))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}

fn initialize_db_pool(db_path: String) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    r2d2::Pool::builder()
        .build(manager)
        .expect("Database URL should be a valid path to SQLite DB file")
}
