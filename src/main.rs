use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdrill::{
    app_state::AppState,
    config::Config,
    errors::AppError,
    handlers::{configure, json_config},
    middleware::JsonOnlyMiddleware,
};

fn into_io(err: AppError) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(into_io)?;
    config.validate_for_production().map_err(into_io)?;

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    log::info!("starting {:?} server on {}:{}", config.profile, host, port);

    let state = AppState::new(config).await.map_err(into_io)?;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .wrap(JsonOnlyMiddleware)
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
