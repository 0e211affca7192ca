use actix_web::web;

pub mod routes {
    pub mod application;
}
mod services {
    pub(crate) mod application;
}
mod dtos {
    pub(crate) mod application;
}

pub fn mount_applications() -> actix_web::Scope {
    web::scope("/application")
        .service(routes::application::post_update_status)
        .service(
            web::scope("")
                .wrap(api_users::auth_middleware())
                .service(routes::application::get_apply)
                .service(routes::application::get_applied_jobs)
                .service(routes::application::get_applicants),
        )
}
