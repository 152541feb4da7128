#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Registers the `/api/v1` endpoints, the root greeting and the JSON error
/// handlers. Shared by [`run`] and the integration tests.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    use crate::routes::{admin, auth, calendar, community, dashboard, explore, itinerary};
    use crate::routes::{profile, trips};

    cfg.app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(routes::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(routes::path_error_handler))
        .service(routes::root)
        .service(
            web::scope("/api/v1")
                .service(auth::signup)
                .service(auth::login)
                .service(auth::login_json)
                .service(auth::me)
                .service(profile::show_profile)
                .service(profile::update_profile)
                .service(dashboard::show_dashboard)
                // `/trips/counts` must precede `/trips/{trip_id}`.
                .service(trips::trip_counts)
                .service(trips::list_trips)
                .service(trips::create_trip)
                .service(trips::remove_expense)
                .service(trips::show_trip)
                .service(trips::update_trip)
                .service(trips::delete_trip)
                .service(trips::share_trip)
                .service(trips::trip_budget)
                .service(trips::add_expense)
                .service(itinerary::show_itinerary)
                .service(itinerary::add_stop)
                .service(itinerary::remove_stop)
                .service(itinerary::schedule_activity)
                .service(itinerary::remove_scheduled_activity)
                .service(explore::list_cities)
                .service(explore::list_activities)
                .service(explore::search)
                .service(calendar::show_calendar)
                .service(community::feed)
                .service(community::shared_trip)
                .service(community::copy_trip)
                .service(admin::platform_stats)
                .service(admin::list_users),
        );
}

#[cfg(feature = "server")]
fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config.cors_origins))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .default_service(web::to(routes::not_found))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
