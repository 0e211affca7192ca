use actix_web::web;

pub mod routes {
    pub mod job;
}
mod services {
    pub(crate) mod job;
}
mod dtos {
    pub(crate) mod job;
}

pub fn mount_jobs() -> actix_web::Scope {
    // listing and detail are public; posting and the creator listing are not
    web::scope("/job")
        .service(routes::job::get_jobs)
        .service(routes::job::get_job_by_id)
        .service(
            web::scope("")
                .wrap(api_users::auth_middleware())
                .service(routes::job::post_job)
                .service(routes::job::get_admin_jobs),
        )
}
