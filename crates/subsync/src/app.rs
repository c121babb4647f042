use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        dashboard::dashboard,
        health::{livez, readyz},
        members::{create_member, delete_member, get_member, list_members, update_member},
        payments::{create_payment, get_payment, list_payments},
        reminders::{create_reminder, get_reminder, list_reminders, list_templates},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        // Health routes
        .route("/health", get(livez))
        .route("/health/ready", get(readyz))
        // Member routes
        .route("/members", get(list_members).post(create_member))
        .route(
            "/members/{id}",
            get(get_member).patch(update_member).delete(delete_member),
        )
        // Payment routes
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/{id}", get(get_payment))
        // Reminder routes
        .route("/reminders", get(list_reminders).post(create_reminder))
        .route("/reminders/templates", get(list_templates))
        .route("/reminders/{id}", get(get_reminder))
        // Dashboard
        .route("/dashboard", get(dashboard))
        .layer(cors);

    // Main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::testing::TestRepository;

    fn test_config() -> Config {
        Config {
            cache_ttl_seconds: 300,
            cache_event_capacity: 16,
            seed_sample_data: true,
            organization_name: "Test Ashram".to_string(),
        }
    }

    fn test_state() -> (AppState, Arc<TestRepository>) {
        let repo = Arc::new(TestRepository::new());
        (AppState::with_repository(repo.clone(), &test_config()), repo)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state();
        let app = create_app(state.clone());

        let (status, _) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", "/api/health/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        state.seed().await;
        let (status, body) = send(&app, "GET", "/api/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seed"]["status"], "seeded");
    }

    #[tokio::test]
    async fn test_list_members_empty() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, body) = send(&app, "GET", "/api/members", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_get_member() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, body) = send(
            &app,
            "POST",
            "/api/members",
            Some(json!({
                "name": "Rahul Sharma",
                "phone": "9876543210",
                "address": "123 Main St, Bangalore",
                "joinDate": "2023-01-15"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, member) = send(&app, "GET", &format!("/api/members/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(member["name"], "Rahul Sharma");
        assert_eq!(member["subscriptionAmount"], 500.0);
        assert_eq!(member["status"], "active");
        assert_eq!(member["joinDate"], "2023-01-15T00:00:00Z");
    }

    #[tokio::test]
    async fn test_create_member_validation_error() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, _) = send(
            &app,
            "POST",
            "/api/members",
            Some(json!({ "name": "", "phone": "9876543210", "address": "Delhi" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_member_not_found() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, _) = send(&app, "GET", "/api/members/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/members/missing",
            Some(json!({ "status": "inactive" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_filter_and_delete_member() {
        let (state, _) = test_state();
        state.seed().await;
        let app = create_app(state);

        let (_, members) = send(&app, "GET", "/api/members?search=priya", None).await;
        assert_eq!(members.as_array().unwrap().len(), 1);
        let id = members[0]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/api/members/{id}"),
            Some(json!({ "status": "inactive" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, inactive) = send(&app, "GET", "/api/members?status=inactive", None).await;
        let names: Vec<&str> = inactive
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|m| m["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Amit Kumar", "Priya Patel"]);

        let (status, _) = send(&app, "DELETE", &format!("/api/members/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, members) = send(&app, "GET", "/api/members", None).await;
        assert_eq!(members.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_list_record_payment_scenario() {
        let (state, _) = test_state();
        state.seed().await;
        let app = create_app(state);

        let (_, members) = send(&app, "GET", "/api/members", None).await;
        assert_eq!(members.as_array().unwrap().len(), 3);
        let (_, payments) = send(&app, "GET", "/api/payments", None).await;
        assert_eq!(payments.as_array().unwrap().len(), 3);

        let amit_id = members
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["name"] == "Amit Kumar")
            .and_then(|m| m["id"].as_str())
            .unwrap()
            .to_string();

        let (status, created) = send(
            &app,
            "POST",
            "/api/payments",
            Some(json!({
                "memberId": amit_id,
                "amount": 500,
                "collectedBy": "Admin",
                "paymentMethod": "online"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, payments) = send(&app, "GET", "/api/payments", None).await;
        let payments = payments.as_array().unwrap();
        assert_eq!(payments.len(), 4);
        assert_eq!(payments[0]["id"], created["id"]);
        assert_eq!(payments[0]["memberName"], "Amit Kumar");
        assert!(payments.iter().all(|p| p["memberName"] != "Unknown Member"));

        let (_, online) = send(&app, "GET", "/api/payments?method=online&month=current", None).await;
        assert_eq!(online.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_payment_for_unknown_member_uses_sentinel() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (_, created) = send(
            &app,
            "POST",
            "/api/payments",
            Some(json!({ "memberId": "ghost", "amount": 100, "collectedBy": "Admin" })),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, payment) = send(&app, "GET", &format!("/api/payments/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payment["memberName"], "Unknown Member");
        assert_eq!(payment["paymentMethod"], "cash");
    }

    #[tokio::test]
    async fn test_reminders_and_templates() {
        let (state, _) = test_state();
        state.seed().await;
        let app = create_app(state);

        let (_, reminders) = send(&app, "GET", "/api/reminders", None).await;
        let reminders = reminders.as_array().unwrap().clone();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0]["memberName"], "Amit Kumar");
        assert_eq!(reminders[0]["status"], "sent");

        let member_id = reminders[0]["memberId"].as_str().unwrap();
        let (status, created) = send(
            &app,
            "POST",
            "/api/reminders",
            Some(json!({ "memberId": member_id, "message": "Please pay", "dueDate": "2023-05-10" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = created["id"].as_str().unwrap();
        let (status, reminder) = send(&app, "GET", &format!("/api/reminders/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reminder["message"], "Please pay");

        let (_, templates) = send(
            &app,
            "GET",
            "/api/reminders/templates?dueDate=2023-05-10",
            None,
        )
        .await;
        let templates = templates.as_array().unwrap();
        assert_eq!(templates.len(), 3);
        let message = templates[1]["message"].as_str().unwrap();
        assert!(message.starts_with("Test Ashram: "));
        assert!(message.contains("May 10, 2023"));
        assert!(message.contains("₹500"));
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (state, _) = test_state();
        state.seed().await;
        let app = create_app(state);

        let (status, body) = send(&app, "GET", "/api/dashboard?months=3", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["totalMembers"], 3);
        assert_eq!(body["summary"]["activeMembers"], 2);
        assert_eq!(body["monthlyStats"].as_array().unwrap().len(), 3);
        assert_eq!(body["recentMembers"][0]["name"], "Amit Kumar");
        assert_eq!(body["recentPayments"].as_array().unwrap().len(), 3);

        let (status, body) = send(&app, "GET", "/api/dashboard?months=5000", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monthlyStats"].as_array().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_store_outage_degrades_reads_and_fails_writes() {
        let (state, repo) = test_state();
        let app = create_app(state);
        repo.set_failing(true);

        let (status, body) = send(&app, "GET", "/api/payments", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _) = send(&app, "GET", "/api/members/any", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/api/members",
            Some(json!({ "name": "Priya Patel", "phone": "8765432109", "address": "Mumbai" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
