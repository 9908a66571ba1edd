//! Server module.

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error,
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use prassign_config::Config;
use prassign_core::{CallScope, CoreContext, CoreModule};
use prassign_database_interface::DbService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    errors::ErrorBody,
    handlers::{pulls, teams, users},
    health::health_check_route,
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database service.
    pub db_service: Box<dyn DbService>,
}

impl AppContext {
    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService + Send + Sync>,
    ) -> Self {
        Self {
            config,
            core_module,
            db_service,
        }
    }

    /// Convert the context for the core module, with the request deadline.
    pub fn as_core_context(&self) -> CoreContext {
        let call_scope = match self.config.server.request_timeout_ms {
            0 => CallScope::new(),
            ms => CallScope::new().with_timeout(Duration::from_millis(ms)),
        };

        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            call_scope,
        }
    }
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody::new("BAD_REQUEST", message))
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .wrap(Cors::permissive())
        .service(
            web::scope("/team")
                .route("/add", web::post().to(teams::team_add))
                .route("/get", web::get().to(teams::team_get))
                .route("/deactivate", web::post().to(teams::team_deactivate))
                .route("/reassignInactive", web::post().to(teams::team_reassign_inactive))
                .route("/stats", web::get().to(teams::team_stats)),
        )
        .service(
            web::scope("/users")
                .route("/setIsActive", web::post().to(users::users_set_is_active))
                .route("/getReview", web::get().to(users::users_get_review)),
        )
        .service(
            web::scope("/pullRequest")
                .route("/create", web::post().to(pulls::pull_request_create))
                .route("/merge", web::post().to(pulls::pull_request_merge))
                .route("/reassign", web::post().to(pulls::pull_request_reassign)),
        )
        .route("/health", web::get().to(health_check_route))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // Display Bad Request response on invalid JSON data
            let message = err.to_string();
            error::InternalError::from_response(err, bad_request(message)).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(err, bad_request(message)).into()
        }))
}

/// Run server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        "Starting server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();

    let mut server = HttpServer::new(move || build_actix_app(context.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
