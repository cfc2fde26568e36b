use actix_cors::Cors;
use actix_web::{
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};

use quickquiz_server::{
    app_state::AppState,
    config::Config,
    handlers,
    middleware::{stamp_request_id, REQUEST_ID_HEADER},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(e) = config.validate_for_production() {
        log::warn!("{}", e);
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .expose_headers(vec![REQUEST_ID_HEADER])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(from_fn(stamp_request_id))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
