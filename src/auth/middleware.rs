use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use chrono::Utc;
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::gate::{authenticate, Credentials},
    errors::AppError,
    models::domain::Identity,
};

/// Runs the auth gate before every wrapped route. Denied requests are
/// answered here and never reach the handler.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err = AppError::InternalError("application state not configured".to_string());
                return Ok(req.into_response(err.error_response()).map_into_right_body());
            };

            let credentials = Credentials::from_message(&req);
            let outcome = authenticate(
                credentials,
                &state.jwt_service,
                &state.user_service,
                Utc::now(),
            )
            .await;

            match outcome {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::debug!("{} {} denied: {}", req.method(), req.path(), err);
                    Ok(req.into_response(err.error_response()).map_into_right_body())
                }
            }
        })
    }
}

/// The caller resolved by [`AuthMiddleware`].
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Identity>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()));

        ready(identity.map(AuthenticatedUser))
    }
}
