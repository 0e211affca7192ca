mod cors;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;
use db::pg::PgStore;
use db::store::Store;
use uploads::Uploader;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.is_production();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection and run migrations
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // the single store handle shared by every worker
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));

    // object-storage client for profile photos, resumes and logos
    let uploader = Arc::new(Uploader::new(&config.upload_config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(uploader.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api/v1")
                    .service(api_users::mount_user())
                    .service(api_companies::mount_companies())
                    .service(api_jobs::mount_jobs())
                    .service(api_applications::mount_applications()),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run();

    server.await?;

    // drain the pool on the way out
    pool.close().await;
    Ok(())
}
