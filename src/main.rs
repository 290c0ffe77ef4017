use actix_web::{get, guard, middleware, post, web, App, HttpResponse, HttpServer, Responder};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod chat;
mod estimator;
mod news;
mod refresh;
mod types;

use crate::news::NewsClient;
use crate::refresh::{NewsState, Refresher, REFRESH_PERIOD};
use crate::types::{ActivityInput, ChatRequest, ChatResponse, EstimateResponse, ScenarioRequest};

const USER_AGENT: &str = "CarbonAwarenessBot/1.0 (+https://codered.plobethus.com)";

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(serde_json::json!({ "status": "ok" }))
}

/* ------------------------ /news ------------------------ */

#[get("/news")]
async fn get_news(client: web::Data<NewsClient>) -> impl Responder {
    let items = client.fetch_news().await;
    web::Json(serde_json::json!({ "news": items }))
}

#[get("/news/latest")]
async fn get_news_latest(state: web::Data<NewsState>) -> impl Responder {
    let items = state.read().await.clone();
    web::Json(serde_json::json!({ "news": items }))
}

/* ------------------------ /estimate ------------------------ */

#[post("/estimate")]
async fn estimate(payload: web::Json<ActivityInput>) -> impl Responder {
    let input = payload.into_inner();
    let total_kg = estimator::estimate(&input);
    web::Json(EstimateResponse {
        total_kg,
        annual_tonnes: estimator::annual_tonnes(total_kg),
        advice: estimator::advise(&input),
    })
}

#[post("/estimate/scenario")]
async fn estimate_scenario(payload: web::Json<ScenarioRequest>) -> impl Responder {
    let req = payload.into_inner();
    web::Json(serde_json::json!({
        "total_kg": estimator::estimate_scenario(req.category, req.value),
        "advice": estimator::advise_scenario(req.category, req.value),
    }))
}

/* ------------------------ /chat ------------------------ */

#[post("/chat")]
async fn chat_turn(payload: web::Json<ChatRequest>) -> impl Responder {
    let req = payload.into_inner();
    let reply = chat::respond(&req.message);
    let mut transcript = req.transcript;
    chat::record_turn(&mut transcript, req.message, reply);
    web::Json(ChatResponse {
        reply: reply.to_string(),
        transcript,
    })
}

/* ------------------------ CORS ------------------------ */

// Preflight short-circuit; matched on the OPTIONS guard for any path.
async fn preflight() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

fn cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Logging
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish()
        .try_init();

    // Config
    let addr = std::env::var("WORKER_BIND").unwrap_or_else(|_| "127.0.0.1:5001".into());

    // Init subsystems
    let client =
        NewsClient::new(news::DEFAULT_ENDPOINT, USER_AGENT).expect("news client init failed");
    let state: NewsState = Arc::new(RwLock::new(news::fallback_news()));
    let refresher = Refresher::spawn(client.clone(), state.clone(), REFRESH_PERIOD);

    info!("🌐 worker listening on {}", addr);
    let result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .wrap(cors_headers())
            .service(
                web::resource("/{tail:.*}")
                    .guard(guard::Options())
                    .to(preflight),
            )
            .service(health)
            .service(get_news)
            .service(get_news_latest)
            .service(estimate)
            .service(estimate_scenario)
            .service(chat_turn)
    })
    .bind(addr)?
    .workers(2)
    .run()
    .await;

    refresher.shutdown().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_http::Request;
    use actix_web::body::MessageBody;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::Method;
    use actix_web::test;

    async fn test_app(
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        let client = NewsClient::new("http://127.0.0.1:9/api/1/news", "test-agent").unwrap();
        let state: NewsState = Arc::new(RwLock::new(news::fallback_news()));
        test::init_service(
            App::new()
                .app_data(web::Data::new(client))
                .app_data(web::Data::new(state))
                .wrap(cors_headers())
                .service(
                    web::resource("/{tail:.*}")
                        .guard(guard::Options())
                        .to(preflight),
                )
                .service(health)
                .service(get_news)
                .service(get_news_latest)
                .service(estimate)
                .service(estimate_scenario)
                .service(chat_turn),
        )
        .await
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test_app().await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }

    #[actix_web::test]
    async fn estimate_returns_total_and_advice() {
        let app = test_app().await;
        let req = test::TestRequest::post()
            .uri("/estimate")
            .set_json(serde_json::json!({ "car_km": 500.0 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_kg"], serde_json::json!(105.0));
        assert_eq!(body["annual_tonnes"], serde_json::json!(0.105));
        assert_eq!(body["advice"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn scenario_estimate_carries_banner() {
        let app = test_app().await;
        let req = test::TestRequest::post()
            .uri("/estimate/scenario")
            .set_json(serde_json::json!({ "category": "flight", "value": 10.0 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_kg"], serde_json::json!(900.0));
        let advice = body["advice"].as_array().unwrap();
        assert_eq!(advice.len(), 2);
        assert!(advice[0].as_str().unwrap().contains("high"));
    }

    #[actix_web::test]
    async fn chat_extends_transcript() {
        let app = test_app().await;
        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(serde_json::json!({ "message": "How do I reduce car emissions?" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["reply"].as_str().unwrap().contains("Transport"));
        let transcript = body["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0]["role"], serde_json::json!("user"));
        assert_eq!(transcript[1]["role"], serde_json::json!("bot"));
    }

    #[actix_web::test]
    async fn news_serves_fallback_when_upstream_is_down() {
        let app = test_app().await;
        let req = test::TestRequest::get().uri("/news").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let items = body["news"].as_array().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(
            items[0]["title"],
            serde_json::json!("Global CO2 Emissions Reach Record High in 2024")
        );
    }

    #[actix_web::test]
    async fn latest_serves_the_snapshot() {
        let app = test_app().await;
        let req = test::TestRequest::get().uri("/news/latest").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["news"].as_array().unwrap().len(), 6);
    }

    #[actix_web::test]
    async fn preflight_short_circuits_with_cors() {
        let app = test_app().await;
        let req = test::TestRequest::with_uri("/news")
            .method(Method::OPTIONS)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        assert_eq!(
            res.headers()
                .get("Access-Control-Allow-Origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
