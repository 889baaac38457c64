//! Tower layer that records an audit event for every successful invocation
//! of the route it wraps.

use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::{FromRequestParts, OriginalUri, RawPathParams, Request},
    http::request::Parts,
    response::Response,
};
use futures::future::BoxFuture;
use sprint_core::{AuditAction, EntityType, Snowflake};
use sprint_service::{AuditContext, Auditor};
use tower::{Layer, Service};
use tracing::debug;

use super::body::{CompletionBody, PendingAudit};
use super::scope::AuditScope;
use crate::extractors::AuthUser;
use crate::middleware::REQUEST_ID_HEADER;

/// Where the layer finds the id of the entity an invocation targets
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// Named path parameter
    Param(String),
    /// The authenticated caller, for `/users/@me` style routes
    CurrentUser,
}

impl Target {
    async fn resolve(&self, parts: &mut Parts, caller: Option<Snowflake>) -> Option<Snowflake> {
        match self {
            Self::CurrentUser => caller,
            Self::Param(name) => {
                let params = RawPathParams::from_request_parts(parts, &()).await.ok()?;
                let raw = params.iter().find(|(key, _)| *key == name.as_str()).map(|(_, v)| v)?;
                match raw.parse() {
                    Ok(id) => Some(id),
                    Err(_) => {
                        debug!(param = %name, value = %raw, "Path parameter is not an id");
                        None
                    }
                }
            }
        }
    }
}

/// Wraps a route so that each successful call produces one audit record.
///
/// ```ignore
/// Router::new().route(
///     "/tasks/:id",
///     put(tasks::update_task)
///         .route_layer(AuditLayer::new(auditor, EntityType::Task, AuditAction::Update)),
/// )
/// ```
#[derive(Clone)]
pub struct AuditLayer {
    auditor: Arc<Auditor>,
    entity_type: EntityType,
    action: AuditAction,
    target: Target,
}

impl AuditLayer {
    pub fn new(auditor: Arc<Auditor>, entity_type: EntityType, action: AuditAction) -> Self {
        Self {
            auditor,
            entity_type,
            action,
            target: Target::Param("id".to_string()),
        }
    }

    /// Take the target id from the path parameter `name` (default `id`)
    pub fn target_param(mut self, name: impl Into<String>) -> Self {
        self.target = Target::Param(name.into());
        self
    }

    /// Target the authenticated caller instead of a path parameter
    pub fn target_current_user(mut self) -> Self {
        self.target = Target::CurrentUser;
        self
    }
}

impl fmt::Debug for AuditLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLayer")
            .field("entity_type", &self.entity_type)
            .field("action", &self.action)
            .field("target", &self.target)
            .finish()
    }
}

impl<S> Layer<S> for AuditLayer {
    type Service = AuditService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuditService {
            inner,
            layer: self.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuditService<S> {
    inner: S,
    layer: AuditLayer,
}

impl<S> Service<Request> for AuditService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Drive the instance that was polled ready; leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let layer = self.layer.clone();

        Box::pin(async move {
            let (mut parts, body) = request.into_parts();

            let mut context = AuditContext::new(layer.entity_type, layer.action);
            context.authenticated = parts.extensions.get::<AuthUser>().map(|user| user.id);
            context.target_id = layer.target.resolve(&mut parts, context.authenticated).await;
            context.method = parts.method.to_string();
            context.route = parts
                .extensions
                .get::<OriginalUri>()
                .map_or_else(|| parts.uri.path().to_string(), |uri| uri.0.path().to_string());
            context.request_id = parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            let scope = AuditScope::new();
            scope.set_before(
                layer
                    .auditor
                    .capture_before(context.entity_type, context.action, context.target_id)
                    .await,
            );
            parts.extensions.insert(scope.clone());

            let response = inner.call(Request::from_parts(parts, body)).await?;

            if !response.status().is_success() {
                debug!(
                    status = %response.status(),
                    route = %context.route,
                    "Unsuccessful response; not audited"
                );
                return Ok(response);
            }

            let pending = PendingAudit {
                auditor: layer.auditor,
                context,
                scope,
            };
            let (parts, body) = response.into_parts();
            Ok(Response::from_parts(
                parts,
                Body::new(CompletionBody::new(body, pending)),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{request, TestApp};
    use axum::{
        http::{Method, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn bare_route(app: &TestApp, set_actor: bool) -> Router {
        let layer = AuditLayer::new(
            app.state.service_context().auditor(),
            EntityType::Task,
            AuditAction::Create,
        );
        Router::new().route(
            "/things",
            post(move |scope: AuditScope| async move {
                if set_actor {
                    scope.set_actor(Snowflake::new(1));
                }
                scope.created(&json!({"id": "500", "title": "x"}));
                Json(json!({"id": "500", "title": "x"}))
            })
            .route_layer(layer),
        )
    }

    #[tokio::test]
    async fn test_create_records_created_entity() {
        let app = TestApp::new();
        let (user, token) = app.user("dev@example.com", false).await;

        let (status, body) = app
            .send(request(
                Method::POST,
                "/api/v1/tasks",
                Some(&token),
                Some(json!({"title": "x"})),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let records = app.records(1).await;
        let record = &records[0];
        assert_eq!(record.action, AuditAction::Create);
        assert_eq!(record.entity_type, EntityType::Task);
        assert_eq!(record.actor_id, user.id);
        assert_eq!(record.entity_id.map(|id| id.to_string()), body["id"].as_str().map(str::to_string));
        assert!(record.before.is_none());
        assert_eq!(record.after.as_ref(), Some(&body));
        assert_eq!(record.metadata["route"], "/api/v1/tasks");
        assert_eq!(record.metadata["method"], "POST");
    }

    #[tokio::test]
    async fn test_update_records_before_and_after() {
        let app = TestApp::new();
        let (_, token) = app.user("dev@example.com", false).await;
        let (_, task) = app
            .send(request(Method::POST, "/api/v1/tasks", Some(&token), Some(json!({"title": "x"}))))
            .await;
        let id = task["id"].as_str().unwrap();

        let (status, _) = app
            .send(request(
                Method::PUT,
                &format!("/api/v1/tasks/{id}"),
                Some(&token),
                Some(json!({"status": "done"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);

        let records = app.records(2).await;
        let update = records.iter().find(|r| r.action == AuditAction::Update).unwrap();
        assert_eq!(update.action, AuditAction::Update);
        assert_eq!(update.entity_id.map(|id| id.to_string()).as_deref(), Some(id));
        assert_eq!(update.before.as_ref().unwrap()["status"], "todo");
        assert_eq!(update.after.as_ref().unwrap()["status"], "done");
    }

    #[tokio::test]
    async fn test_delete_records_before_only() {
        let app = TestApp::new();
        let (_, token) = app.user("dev@example.com", false).await;
        let (_, task) = app
            .send(request(Method::POST, "/api/v1/tasks", Some(&token), Some(json!({"title": "gone"}))))
            .await;
        let id = task["id"].as_str().unwrap();

        let (status, _) = app
            .send(request(Method::DELETE, &format!("/api/v1/tasks/{id}"), Some(&token), None))
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let records = app.records(2).await;
        let delete = records.iter().find(|r| r.action == AuditAction::Delete).unwrap();
        assert_eq!(delete.action, AuditAction::Delete);
        assert_eq!(delete.before.as_ref().unwrap()["title"], "gone");
        assert!(delete.after.is_none());
    }

    #[tokio::test]
    async fn test_no_actor_means_no_record() {
        let app = TestApp::new();
        let router = bare_route(&app, false);

        let response = router
            .oneshot(request(Method::POST, "/things", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&bytes[..], br#"{"id":"500","title":"x"}"#);

        app.assert_no_records().await;
    }

    #[tokio::test]
    async fn test_body_dropped_before_end_is_not_audited() {
        let app = TestApp::new();
        let router = bare_route(&app, true);

        let response = router
            .clone()
            .oneshot(request(Method::POST, "/things", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        drop(response);
        app.assert_no_records().await;

        let response = router
            .oneshot(request(Method::POST, "/things", None, None))
            .await
            .unwrap();
        http_body_util::BodyExt::collect(response.into_body()).await.unwrap();
        let records = app.records(1).await;
        assert_eq!(records[0].actor_id, Snowflake::new(1));
        assert_eq!(records[0].entity_id, Some(Snowflake::new(500)));
    }

    #[tokio::test]
    async fn test_empty_response_dropped_unread_is_not_audited() {
        let app = TestApp::new();
        let (_, token) = app.user("dev@example.com", false).await;
        let (_, task) = app
            .send(request(Method::POST, "/api/v1/tasks", Some(&token), Some(json!({"title": "x"}))))
            .await;
        app.records(1).await;
        let id = task["id"].as_str().unwrap();

        let response = app
            .router
            .clone()
            .oneshot(request(Method::DELETE, &format!("/api/v1/tasks/{id}"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!http_body::Body::is_end_stream(response.body()));
        drop(response);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let records = app.records(1).await;
        assert_eq!(records[0].action, AuditAction::Create);
    }

    #[tokio::test]
    async fn test_named_target_param() {
        let app = TestApp::new();
        let layer = AuditLayer::new(
            app.state.service_context().auditor(),
            EntityType::Comment,
            AuditAction::Update,
        )
        .target_param("comment_id");
        let router: Router = Router::new().route(
            "/threads/:thread_id/comments/:comment_id",
            axum::routing::patch(|scope: AuditScope| async move {
                scope.set_actor(Snowflake::new(3));
                scope.updated(&json!({"body": "edited"}));
                StatusCode::OK
            })
            .route_layer(layer),
        );

        let response = router
            .oneshot(request(Method::PATCH, "/threads/9/comments/77", None, None))
            .await
            .unwrap();
        http_body_util::BodyExt::collect(response.into_body()).await.unwrap();

        let records = app.records(1).await;
        assert_eq!(records[0].entity_id, Some(Snowflake::new(77)));
        assert!(records[0].before.is_none());
        assert_eq!(records[0].after.as_ref().unwrap()["body"], "edited");
    }

    #[tokio::test]
    async fn test_error_response_is_not_audited() {
        let app = TestApp::new();
        let (_, token) = app.user("dev@example.com", false).await;

        let (status, body) = app
            .send(request(
                Method::PUT,
                "/api/v1/tasks/4242",
                Some(&token),
                Some(json!({"status": "done"})),
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNKNOWN_TASK");
        app.assert_no_records().await;
    }

    #[tokio::test]
    async fn test_concurrent_invocations_keep_their_own_scope() {
        let app = TestApp::new();
        let (_, token) = app.user("dev@example.com", false).await;

        let create = |title: &str| {
            request(Method::POST, "/api/v1/tasks", Some(&token), Some(json!({"title": title})))
        };
        let ((_, a), (_, b)) = tokio::join!(app.send(create("alpha")), app.send(create("beta")));

        let records = app.records(2).await;
        for body in [a, b] {
            let record = records
                .iter()
                .find(|r| r.after.as_ref().is_some_and(|after| after["id"] == body["id"]))
                .unwrap();
            assert_eq!(record.after.as_ref().unwrap()["title"], body["title"]);
            assert_eq!(
                record.entity_id.map(|id| id.to_string()),
                body["id"].as_str().map(str::to_string)
            );
        }
    }

    #[tokio::test]
    async fn test_signup_attributes_itself() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request(
                Method::POST,
                "/api/v1/auth/signup",
                None,
                Some(json!({
                    "email": "New@Example.com",
                    "password": "Sup3r-secret",
                    "first_name": "New",
                    "last_name": "Person",
                })),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, _) = app
            .send(request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({"email": "new@example.com", "password": "Sup3r-secret"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);

        let records = app.records(2).await;
        let created = records.iter().find(|r| r.action == AuditAction::Create).unwrap();
        assert_eq!(created.actor_id.to_string(), user_id);
        assert_eq!(created.entity_id.map(|id| id.to_string()), Some(user_id.clone()));
        let login = records.iter().find(|r| r.action == AuditAction::Login).unwrap();
        assert_eq!(login.actor_id.to_string(), user_id);
        assert!(login.entity_id.is_none());
    }

    #[tokio::test]
    async fn test_current_user_target_and_request_id() {
        let app = TestApp::new();
        let (user, token) = app.user("dev@example.com", false).await;

        let mut update = request(
            Method::PATCH,
            "/api/v1/users/@me",
            Some(&token),
            Some(json!({"first_name": "Renamed"})),
        );
        update
            .headers_mut()
            .insert(REQUEST_ID_HEADER, "req-42".parse().unwrap());
        let (status, _) = app.send(update).await;
        assert_eq!(status, StatusCode::OK);

        let records = app.records(1).await;
        assert_eq!(records[0].entity_id, Some(user.id));
        assert_eq!(records[0].before.as_ref().unwrap()["first_name"], "Test");
        assert_eq!(records[0].after.as_ref().unwrap()["first_name"], "Renamed");
        assert_eq!(records[0].metadata["request_id"], "req-42");
    }
}
