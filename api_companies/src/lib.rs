use actix_web::web;

pub mod routes {
    pub mod company;
}
mod services {
    pub(crate) mod company;
}
mod dtos {
    pub(crate) mod company;
}

pub fn mount_companies() -> actix_web::Scope {
    web::scope("/company").service(
        web::scope("")
            .wrap(api_users::auth_middleware())
            .service(routes::company::post_register_company)
            .service(routes::company::get_companies)
            .service(routes::company::get_company)
            .service(routes::company::put_update_company),
    )
}
