use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;

use clockwise_be::database::repositories::{
    BusinessRepository, ConfirmedHoursRepository, PaymentRepository, RateRepository,
    ShiftRepository,
};
use clockwise_be::handlers::{hours, payments, rates, reports};

mod common;

macro_rules! test_app {
    () => {{
        let pool = common::lazy_pool();
        let config = common::test_config("postgres://localhost:5432/clockwise_unused");

        test::init_service(
            App::new()
                .app_data(web::Data::new(BusinessRepository::new(pool.clone())))
                .app_data(web::Data::new(ShiftRepository::new(pool.clone())))
                .app_data(web::Data::new(RateRepository::new(pool.clone())))
                .app_data(web::Data::new(ConfirmedHoursRepository::new(pool.clone())))
                .app_data(web::Data::new(PaymentRepository::new(pool.clone())))
                .app_data(web::Data::new(config))
                .service(
                    web::scope("/api/v1")
                        .service(
                            web::scope("/hours")
                                .route("/weekly", web::get().to(hours::get_weekly_hours))
                                .route("/review", web::get().to(hours::list_review))
                                .route("", web::post().to(hours::create_hours))
                                .route("/{id}/submit", web::post().to(hours::submit_hours))
                                .route("/{id}/approve", web::post().to(hours::approve_hours)),
                        )
                        .service(
                            web::scope("/payments")
                                .route("", web::post().to(payments::calculate_payment))
                                .route("", web::get().to(payments::list_payments))
                                .route("/{id}/mark-paid", web::patch().to(payments::mark_paid)),
                        )
                        .service(
                            web::scope("/rates")
                                .route("", web::post().to(rates::create_rate))
                                .route("/current", web::get().to(rates::get_current_rate)),
                        )
                        .service(
                            web::scope("/reports")
                                .route("/payroll", web::get().to(reports::payroll_report)),
                        ),
                ),
        )
        .await
    }};
}

#[actix_web::test]
async fn weekly_hours_requires_a_token() {
    common::setup_test_env();
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/hours/weekly?businessId=4c9a24a1-0b69-4a7e-9f3e-000000000001&weekStartDate=2024-01-07")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_hours_requires_a_token() {
    common::setup_test_env();
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/v1/hours").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn submit_requires_a_token() {
    common::setup_test_env();
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/hours/4c9a24a1-0b69-4a7e-9f3e-000000000001/submit")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn review_listing_requires_a_token() {
    common::setup_test_env();
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/hours/review")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn payments_require_a_token() {
    common::setup_test_env();
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/v1/payments").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/v1/payments").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn mark_paid_rejects_a_garbage_token() {
    common::setup_test_env();
    let app = test_app!();

    let req = test::TestRequest::patch()
        .uri("/api/v1/payments/4c9a24a1-0b69-4a7e-9f3e-000000000001/mark-paid")
        .insert_header(common::auth_header("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn rates_and_reports_require_a_token() {
    common::setup_test_env();
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/v1/rates").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/payroll?start=2024-01-01&end=2024-01-31")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
