use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}
pub mod routes {
    pub mod user;
}
mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
}
mod dtos {
    pub(crate) mod user;
}

pub fn mount_user() -> actix_web::Scope {
    web::scope("/user")
        .service(routes::user::post_register)
        .service(routes::user::post_login)
        .service(routes::user::post_logout)
        .service(
            web::scope("/profile")
                .wrap(auth_middleware())
                .service(routes::user::post_update_profile),
        )
}

/// Guard for routes that require a caller identity. Relies on the
/// extraction middleware having run first.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
