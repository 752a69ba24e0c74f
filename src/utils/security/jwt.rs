use actix_web::{dev::{ServiceRequest, ServiceResponse}, HttpMessage};
use std::{rc::Rc, sync::Arc, task::{Context, Poll}};
use actix_web::Error;
use actix_service::{Service, Transform};
use futures::future::{ok, LocalBoxFuture, Ready};
use serde::{Deserialize, Serialize};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::domain::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims<T> {
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
    pub data: T
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessData {
    pub username: String,
    pub roles: Vec<UserRole>,
}

/// Rejects requests without a valid `Bearer` access token and exposes the
/// decoded [`Claims`] to handlers through request extensions.
pub struct JwtMiddleware {
    pub secret_key: Arc<String>
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtMiddlewareService {
            service: Rc::new(service),
            secret_key: Arc::clone(&self.secret_key)
        })
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    secret_key: Arc<String>
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let auth_header = match req.headers().get("Authorization") {
            Some(header) => header,
            None => {
                return Box::pin(async {
                    Err(actix_web::error::ErrorUnauthorized("Authorization header missing"))
                })
            }
        };

        let auth_str = match auth_header.to_str() {
            Ok(str) => str,
            Err(_) => {
                return Box::pin(async {
                    Err(actix_web::error::ErrorUnauthorized("Invalid Authorization header encoding"))
                })
            }
        };

        let token = match auth_str.strip_prefix("Bearer ") {
            Some(token) => token,
            None => {
                return Box::pin(async {
                    Err(actix_web::error::ErrorUnauthorized("Authorization header must start with 'Bearer '"))
                })
            }
        };

        if token.is_empty() {
            return Box::pin(async {
                Err(actix_web::error::ErrorUnauthorized("Empty token"))
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<Claims<AccessData>>(
            token,
            &DecodingKey::from_secret(self.secret_key.as_bytes()),
            &validation
        );

        match token_data {
            Ok(data) => {
                req.extensions_mut().insert(data.claims);
                Box::pin(service.call(req))
            },
            Err(err) => {
                let error_msg = match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expired",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "Invalid token signature",
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => "Invalid algorithm",
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => "Token not yet valid",
                    _ => "Invalid token",
                };
                tracing::debug!(reason = error_msg, "rejected access token");

                Box::pin(async move {
                    Err(actix_web::error::ErrorUnauthorized(error_msg))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::security::auth::AuthUtils;
    use actix_web::{http::StatusCode, test, web, App, HttpRequest, HttpResponse};

    const SECRET: &str = "test_secret_key_for_jwt_signing_operations";

    async fn whoami(req: HttpRequest) -> HttpResponse {
        let username = req
            .extensions()
            .get::<Claims<AccessData>>()
            .map(|claims| claims.data.username.clone())
            .unwrap_or_default();
        HttpResponse::Ok().body(username)
    }

    async fn call_with(authorization: Option<String>) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .wrap(JwtMiddleware { secret_key: Arc::new(SECRET.to_string()) })
                .route("/whoami", web::get().to(whoami))
        ).await;

        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }

        match test::try_call_service(&app, req.to_request()).await {
            Ok(resp) => {
                let status = resp.status();
                let body = test::read_body(resp).await;
                (status, String::from_utf8_lossy(&body).into_owned())
            }
            Err(error) => (error.error_response().status(), error.to_string()),
        }
    }

    fn token(secret: &str, minutes: i64) -> String {
        AuthUtils::generate_access_token("george", &[UserRole::Owner], secret, minutes).unwrap()
    }

    #[actix_web::test]
    async fn test_valid_token_exposes_claims() {
        let (status, body) = call_with(Some(format!("Bearer {}", token(SECRET, 60)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "george");
    }

    #[actix_web::test]
    async fn test_rejected_authorizations() {
        let cases = [
            (None, "Authorization header missing"),
            (Some(format!("Token {}", token(SECRET, 60))), "Authorization header must start with 'Bearer '"),
            (Some(format!("bearer {}", token(SECRET, 60))), "Authorization header must start with 'Bearer '"),
            (Some("Bearer ".to_string()), "Empty token"),
            (Some("Bearer not.a.jwt".to_string()), "Invalid token"),
            (Some(format!("Bearer {}", token(SECRET, -60))), "Token expired"),
            (Some(format!("Bearer {}", token("wrong_secret_key", 60))), "Invalid token signature"),
        ];

        for (authorization, reason) in cases {
            let (status, message) = call_with(authorization).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, reason);
        }
    }

    #[actix_web::test]
    async fn test_claims_carry_prefixed_roles() {
        let claims = Claims {
            sub: "vet".to_string(),
            exp: 10,
            iat: 5,
            data: AccessData { username: "vet".to_string(), roles: vec![UserRole::Vet] },
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "vet");
        assert_eq!(json["data"]["roles"][0], "ROLE_VET");
    }
}
