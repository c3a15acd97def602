use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

use tvetmis_dashboard::config::AppConfig;
use tvetmis_dashboard::models::AppStartTime;
use tvetmis_dashboard::routes;
use tvetmis_dashboard::runtime::lifetime;
use tvetmis_dashboard::utils::{json_error_handler, query_error_handler};

fn build_cors(config: &AppConfig) -> Cors {
    let cors = &config.cors;
    let mut builder = if cors.allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        cors.allowed_origins
            .iter()
            .fold(Cors::default(), |c, origin| c.allowed_origin(origin))
    };
    builder = if cors.allowed_methods.is_empty() {
        builder.allow_any_method()
    } else {
        builder.allowed_methods(cors.allowed_methods.iter().map(String::as_str))
    };
    builder = if cors.allowed_headers.is_empty() {
        builder.allow_any_header()
    } else {
        builder.allowed_headers(cors.allowed_headers.iter().map(String::as_str))
    };
    builder.max_age(cors.max_age)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();

    // Logging
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting {}
        Project: {}
        Version: {}
        Environment: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    // storage, cache plugins and the database ping
    let startup = lifetime::startup::prepare_server_startup().await;

    let storage = startup.storage.clone();
    let cache = startup.cache.clone();

    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );

    warn!("Using {} workers for the server", config.server.workers);

    // HTTP server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(config))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add((
                        "Keep-Alive",
                        format!("timeout={}, max=1000", config.server.timeouts.keep_alive),
                    )),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler)) // bad query strings answer in the envelope
            .app_data(web::JsonConfig::default().error_handler(json_error_handler)) // same for JSON bodies
            .app_data(web::Data::new(storage.clone())) // read-only source tables
            .app_data(web::Data::new(cache.clone())) // loaded frames
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            )) // request body limit
            .configure(routes::configure_reports_routes) // report pages and export
            .configure(routes::configure_navigation_routes) // sidebar
            .configure(routes::configure_system_routes) // health and cache refresh
            // fallback, keep last
            .configure(routes::configure_frontend_routes)
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    ))
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    let server = {
        #[cfg(unix)]
        {
            if let Some(socket_path) = config.unix_socket_path() {
                warn!("Starting server on Unix socket: {}", socket_path);
                if std::path::Path::new(socket_path).exists() {
                    std::fs::remove_file(socket_path)?;
                }
                server.bind_uds(socket_path)?
            } else {
                let bind_address = config.server_bind_address();
                warn!("Starting server at http://{}", bind_address);
                server.bind(bind_address)?
            }
        }

        #[cfg(not(unix))]
        {
            let bind_address = config.server_bind_address();
            warn!("Starting server at http://{}", bind_address);
            server.bind(bind_address)?
        }
    }
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
