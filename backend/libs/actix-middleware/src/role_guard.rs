use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use crypto_core::Role;
use error_types::ServiceError;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::jwt_auth::Principal;

/// Pure role check for routes where middleware wrapping is impractical,
/// e.g. a resource whose GET and POST carry different role requirements.
pub fn require_role(principal: &Principal, allowed: &[Role]) -> Result<(), ServiceError> {
    if allowed.contains(&principal.role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(principal.role.to_string()))
    }
}

/// Role authorization middleware.
///
/// Must run after [`crate::JwtAuthMiddleware`]; a request reaching the guard
/// without a stored [`Principal`] is rejected as unauthenticated rather than
/// forbidden.
pub struct RoleGuard {
    allowed: Rc<[Role]>,
}

impl RoleGuard {
    pub fn allow(roles: &[Role]) -> Self {
        Self {
            allowed: Rc::from(roles),
        }
    }

    pub fn admin_only() -> Self {
        Self::allow(&[Role::Admin])
    }

    pub fn admin_or_manager() -> Self {
        Self::allow(&[Role::Admin, Role::Manager])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardService {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    allowed: Rc<[Role]>,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
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
        let decision = match req.extensions().get::<Principal>() {
            Some(principal) => require_role(principal, &self.allowed),
            None => Err(ServiceError::Unauthenticated),
        };
        let service = self.service.clone();

        Box::pin(async move {
            decision?;
            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_core::Country;
    use uuid::Uuid;

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            role,
            country: Country::India,
        }
    }

    #[test]
    fn test_allowed_role_passes() {
        assert!(require_role(&principal(Role::Admin), &[Role::Admin, Role::Manager]).is_ok());
        assert!(require_role(&principal(Role::Manager), &[Role::Admin, Role::Manager]).is_ok());
    }

    #[test]
    fn test_denied_role_names_itself() {
        let err = require_role(&principal(Role::Member), &[Role::Admin]).unwrap_err();
        assert!(err.to_string().contains("Role 'Member'"));
    }

    #[test]
    fn test_single_role_set() {
        assert!(require_role(&principal(Role::Admin), &[Role::Admin]).is_ok());
        assert!(require_role(&principal(Role::Manager), &[Role::Admin]).is_err());
    }
}
