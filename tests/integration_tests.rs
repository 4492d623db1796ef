// Integration tests for CEP Weather: HTTP routes against mocked providers

use actix_web::{http::StatusCode, test, web, App};
use cep_weather::core::WeatherLookup;
use cep_weather::routes::{self, AppState, RelayState};
use cep_weather::services::{BackendClient, GeocodeClient, TransportOptions, WeatherClient};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

const EPSILON: f64 = 1e-9;

struct Providers {
    geocode: ServerGuard,
    weather: ServerGuard,
}

impl Providers {
    async fn start() -> Self {
        Self {
            geocode: Server::new_async().await,
            weather: Server::new_async().await,
        }
    }

    fn state(&self) -> AppState {
        let geocoder = GeocodeClient::new(self.geocode.url(), TransportOptions::default()).unwrap();
        let weather = WeatherClient::new(self.weather.url(), "test-key", TransportOptions::default()).unwrap();
        AppState::new(WeatherLookup::new(geocoder, weather))
    }

    async fn geocode_ok(&mut self, cep: &str, body: &str) -> Mock {
        self.geocode
            .mock("GET", format!("/{}", cep).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    async fn weather_never_called(&mut self) -> Mock {
        self.weather.mock("GET", Matcher::Any).expect(0).create_async().await
    }
}

macro_rules! backend_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(routes::json_config())
                .configure(routes::configure_backend),
        )
        .await
    };
}

fn post_weather(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/weather").set_json(body)
}

#[actix_web::test]
async fn test_lookup_returns_three_units_and_city() {
    let mut providers = Providers::start().await;
    let geo = providers.geocode_ok("01001000", r#"{"localidade":"São Paulo"}"#).await;
    let weather = providers
        .weather
        .mock("GET", "/current.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), "test-key".into()),
            Matcher::UrlEncoded("q".into(), "São Paulo".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"current":{"temp_c":25.0}}"#)
        .create_async()
        .await;

    let app = backend_app!(providers.state());
    let resp = test::call_service(&app, post_weather(json!({"cep": "01001000"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["city"], "São Paulo");
    assert!((body["temp_C"].as_f64().unwrap() - 25.0).abs() < EPSILON);
    assert!((body["temp_F"].as_f64().unwrap() - 77.0).abs() < EPSILON);
    assert!((body["temp_K"].as_f64().unwrap() - 298.15).abs() < EPSILON);

    geo.assert_async().await;
    weather.assert_async().await;
}

#[actix_web::test]
async fn test_wrong_length_is_422_without_calls() {
    let mut providers = Providers::start().await;
    let geo = providers.geocode.mock("GET", Matcher::Any).expect(0).create_async().await;
    let weather = providers.weather_never_called().await;

    let app = backend_app!(providers.state());
    let resp = test::call_service(&app, post_weather(json!({"cep": "123"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Invalid Zip Code"}));

    geo.assert_async().await;
    weather.assert_async().await;
}

#[actix_web::test]
async fn test_geocode_404_is_404() {
    let mut providers = Providers::start().await;
    let _geo = providers.geocode.mock("GET", "/00000000").with_status(404).create_async().await;
    let weather = providers.weather_never_called().await;

    let app = backend_app!(providers.state());
    let resp = test::call_service(&app, post_weather(json!({"cep": "00000000"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "can not find zipcode"}));

    weather.assert_async().await;
}

#[actix_web::test]
async fn test_geocode_erro_flag_is_404() {
    let mut providers = Providers::start().await;
    let _geo = providers.geocode_ok("99999999", r#"{"erro":"true"}"#).await;
    let weather = providers.weather_never_called().await;

    let app = backend_app!(providers.state());
    let resp = test::call_service(&app, post_weather(json!({"cep": "99999-999"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    weather.assert_async().await;
}

#[actix_web::test]
async fn test_malformed_geocode_json_is_500_and_skips_weather() {
    let mut providers = Providers::start().await;
    let _geo = providers.geocode_ok("01001000", r#"{"localidade": "#).await;
    let weather = providers.weather_never_called().await;

    let app = backend_app!(providers.state());
    let resp = test::call_service(&app, post_weather(json!({"cep": "01001000"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("geocode provider failure"), "got {}", message);

    weather.assert_async().await;
}

#[actix_web::test]
async fn test_weather_failure_is_500_without_partial_result() {
    let mut providers = Providers::start().await;
    let geo = providers.geocode_ok("01001000", r#"{"localidade":"São Paulo"}"#).await;
    let _weather = providers
        .weather
        .mock("GET", "/current.json")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let app = backend_app!(providers.state());
    let resp = test::call_service(&app, post_weather(json!({"cep": "01001000"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("city").is_none());
    assert!(body.get("temp_C").is_none());
    assert!(body["error"].as_str().unwrap().starts_with("weather provider failure"));

    geo.assert_async().await;
}

#[actix_web::test]
async fn test_unreachable_weather_is_500_without_api_key() {
    let mut providers = Providers::start().await;
    let geo = providers.geocode_ok("01001000", r#"{"localidade":"São Paulo"}"#).await;

    let geocoder = GeocodeClient::new(providers.geocode.url(), TransportOptions::default()).unwrap();
    let weather = WeatherClient::new(
        "http://127.0.0.1:9",
        "SUPER-SECRET-KEY",
        TransportOptions::new(Some(1), false),
    )
    .unwrap();
    let app = backend_app!(AppState::new(WeatherLookup::new(geocoder, weather)));

    let resp = test::call_service(&app, post_weather(json!({"cep": "01001000"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(!text.contains("SUPER-SECRET-KEY"), "leaked key: {}", text);

    let json: Value = serde_json::from_str(text).unwrap();
    assert!(json.get("city").is_none());
    assert!(json.get("temp_C").is_none());
    assert!(json["error"].as_str().unwrap().starts_with("weather provider failure"));

    geo.assert_async().await;
}

#[actix_web::test]
async fn test_invalid_body_is_400() {
    let mut providers = Providers::start().await;
    let geo = providers.geocode.mock("GET", Matcher::Any).expect(0).create_async().await;

    let app = backend_app!(providers.state());

    let missing_field = test::call_service(&app, post_weather(json!({"zip": "01001000"})).to_request()).await;
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(missing_field).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));

    let not_json = test::TestRequest::post()
        .uri("/weather")
        .insert_header(("content-type", "application/json"))
        .set_payload("cep=01001000")
        .to_request();
    let resp = test::call_service(&app, not_json).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    geo.assert_async().await;
}

#[actix_web::test]
async fn test_edge_relays_backend_response_verbatim() {
    let mut backend = Server::new_async().await;
    let relayed = backend
        .mock("POST", "/weather")
        .match_body(Matcher::Json(json!({"cep": "00000000"})))
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"can not find zipcode"}"#)
        .create_async()
        .await;

    let client = BackendClient::new(backend.url(), TransportOptions::default()).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(RelayState::new(client)))
            .app_data(routes::json_config())
            .configure(routes::configure_edge),
    )
    .await;

    let resp = test::call_service(&app, post_weather(json!({"cep": "00000000"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], br#"{"error":"can not find zipcode"}"#);
    relayed.assert_async().await;
}

#[actix_web::test]
async fn test_edge_rejects_invalid_cep_locally() {
    let mut backend = Server::new_async().await;
    let never = backend.mock("POST", Matcher::Any).expect(0).create_async().await;

    let client = BackendClient::new(backend.url(), TransportOptions::default()).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(RelayState::new(client)))
            .app_data(routes::json_config())
            .configure(routes::configure_edge),
    )
    .await;

    let resp = test::call_service(&app, post_weather(json!({"cep": "1234-567"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Invalid Zip Code"}));
    never.assert_async().await;
}

#[actix_web::test]
async fn test_backend_health() {
    let providers = Providers::start().await;
    let app = backend_app!(providers.state());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mode"], "backend");
}
