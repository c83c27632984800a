use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use clockwise_be::database::{
    init_database,
    repositories::{
        BusinessRepository, ConfirmedHoursRepository, PaymentRepository, RateRepository,
        ShiftRepository,
    },
};
use clockwise_be::handlers::{hours, payments, rates, reports, shifts};
use clockwise_be::middleware::RequestId;
use clockwise_be::Config;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("ClockWise API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting ClockWise API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    println!("✅ Database initialized");

    // Initialize repositories
    let business_repository = BusinessRepository::new(pool.clone());
    let shift_repository = ShiftRepository::new(pool.clone());
    let rate_repository = RateRepository::new(pool.clone());
    let hours_repository = ConfirmedHoursRepository::new(pool.clone());
    let payment_repository = PaymentRepository::new(pool.clone());

    let business_repo_data = web::Data::new(business_repository);
    let shift_repo_data = web::Data::new(shift_repository);
    let rate_repo_data = web::Data::new(rate_repository);
    let hours_repo_data = web::Data::new(hours_repository);
    let payment_repo_data = web::Data::new(payment_repository);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(business_repo_data.clone())
            .app_data(shift_repo_data.clone())
            .app_data(rate_repo_data.clone())
            .app_data(hours_repo_data.clone())
            .app_data(payment_repo_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/hours")
                            .route("/weekly", web::get().to(hours::get_weekly_hours))
                            .route("/review", web::get().to(hours::list_review))
                            .route("", web::post().to(hours::create_hours))
                            .route("/{id}", web::put().to(hours::update_hours))
                            .route("/{id}/submit", web::post().to(hours::submit_hours))
                            .route("/{id}/approve", web::post().to(hours::approve_hours))
                            .route("/{id}/reject", web::post().to(hours::reject_hours)),
                    )
                    .service(
                        web::scope("/payments")
                            .route("", web::post().to(payments::calculate_payment))
                            .route("", web::get().to(payments::list_payments))
                            .route("/{id}", web::get().to(payments::get_payment))
                            .route("/{id}", web::put().to(payments::recalculate_payment))
                            .route("/{id}/mark-paid", web::patch().to(payments::mark_paid)),
                    )
                    .service(
                        web::scope("/rates")
                            .route("", web::post().to(rates::create_rate))
                            .route("/current", web::get().to(rates::get_current_rate))
                            .route("/history", web::get().to(rates::get_rate_history)),
                    )
                    .service(
                        web::scope("/shifts")
                            .route("", web::post().to(shifts::create_shift))
                            .route("", web::get().to(shifts::list_shifts)),
                    )
                    .service(
                        web::scope("/reports")
                            .route("/payroll", web::get().to(reports::payroll_report)),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
