use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Router, http::StatusCode, routing::post};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use dietcoach_core::application::create_service;
use tokio::net::TcpListener;

use crate::{
    application::http::server::{app_state::AppState, http_server::api_router},
    args::{Args, LogArgs, ServerArgs, WebhookArgs},
};

pub const BIBIMBAP_BODY: &str = r#"{"output":"{\"totals\":{\"calories_kcal\":650,\"protein_g\":30,\"carbs_g\":70,\"fat_g\":20},\"items\":[{\"name\":\"Bibimbap\"}],\"summary\":\"Balanced\",\"suggestion\":\"Add greens\"}"}"#;

/// Local stand-in for the analysis webhook answering every POST with a fixed reply.
pub struct FakeWebhook {
    pub url: String,
    calls: Arc<AtomicUsize>,
}

impl FakeWebhook {
    pub async fn spawn(status: StatusCode, body: &'static str) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/webhook",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/webhook"),
            calls,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn test_state(webhook_url: Option<&str>) -> AppState {
    let args = Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        webhook: WebhookArgs {
            url: webhook_url.map(str::to_string),
            timeout_secs: Some(5),
        },
        log: LogArgs {
            filter: "info".to_string(),
            json: false,
        },
    };
    let service = create_service(args.clone().into()).unwrap();

    AppState::new(Arc::new(args), service)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(api_router(state).unwrap()).unwrap()
}

pub fn meal_form(meal_type: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("mealType", meal_type.to_string())
        .add_text("notes", "extra rice")
        .add_part(
            "foodImage",
            Part::bytes(b"\xff\xd8\xff\xe0jpeg".as_slice())
                .file_name("lunch.jpg")
                .mime_type("image/jpeg"),
        )
}
