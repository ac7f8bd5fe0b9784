use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use crypto_core::{Country, Role, TokenService};
use error_types::ServiceError;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

/// Authenticated identity reconstructed from verified token claims.
///
/// Built entirely from the token; the user record is not re-fetched per
/// request, so role or country changes only take effect once the token is
/// reissued.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    pub country: Country,
}

/// JWT authentication middleware.
///
/// Constructed with the service's [`TokenService`] so key material stays
/// explicit state rather than a process-global. Every failure mode (missing
/// header, wrong scheme, bad signature, expired token, malformed subject)
/// maps to the same `Unauthenticated` response.
pub struct JwtAuthMiddleware {
    tokens: TokenService,
}

impl JwtAuthMiddleware {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let principal = authenticate(&self.tokens, &req);

        Box::pin(async move {
            let principal = principal?;
            req.extensions_mut().insert(principal);
            service.call(req).await
        })
    }
}

fn authenticate(tokens: &TokenService, req: &ServiceRequest) -> Result<Principal, ServiceError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(ServiceError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ServiceError::Unauthenticated)?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::warn!("token verification failed: {}", e);
        ServiceError::Unauthenticated
    })?;

    let user_id = claims.user_id().map_err(|_| ServiceError::Unauthenticated)?;

    Ok(Principal {
        user_id,
        role: claims.role,
        country: claims.country,
    })
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Principal>()
                .copied()
                .ok_or_else(|| ServiceError::Unauthenticated.into()),
        )
    }
}
