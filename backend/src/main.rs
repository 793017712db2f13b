//! Backend entry-point: wires the REST endpoints, persistence, and OpenAPI
//! docs.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::{auth, habits, journal, stats, users, HttpState};
use backend::outbound::persistence::{
    DbPool, DieselHabitRepository, DieselTrackingRepository, DieselUserRepository, PoolConfig,
};
use backend::server::{run_migrations, AppConfig};
use backend::Trace;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    run_migrations(&config.database_url).map_err(std::io::Error::other)?;

    let pool = DbPool::new(
        PoolConfig::new(&config.database_url).with_max_size(config.pool_max_size),
    )
    .await
    .map_err(std::io::Error::other)?;

    let state = HttpState::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselHabitRepository::new(pool.clone())),
        Arc::new(DieselTrackingRepository::new(pool)),
    );

    let key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
        )
    })
    .bind(config.bind_addr.as_str())?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(habits::list_habits)
        .service(habits::create_habit)
        .service(habits::update_habit)
        .service(habits::delete_habit)
        .service(habits::toggle_habit)
        .service(habits::save_reflection)
        .service(stats::stats)
        .service(journal::journal)
        .service(users::profile)
        .service(users::complete_onboarding);

    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
