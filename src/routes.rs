use crate::{
    api::{auth, clients, employees, payslips},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_api_per_min))
            // Portal login; tightest limit, it is the public face.
            .service(
                web::resource("/auth")
                    .wrap(build_limiter(config.rate_auth_per_min))
                    .route(web::post().to(auth::authenticate)),
            )
            // Assembled payslip for the employee view
            .service(
                web::resource("/payslip/{id}/{month}")
                    .route(web::get().to(payslips::fetch_payslip)),
            )
            .service(
                web::scope("/payslips")
                    // /payslips/bulk
                    .service(
                        web::resource("/bulk")
                            .wrap(build_limiter(config.rate_upload_per_min))
                            .route(web::post().to(payslips::bulk_upsert)),
                    )
                    // /payslips/upload
                    .service(
                        web::resource("/upload")
                            .wrap(build_limiter(config.rate_upload_per_min))
                            .route(web::post().to(payslips::upload_workbook)),
                    )
                    // /payslips/delete
                    .service(
                        web::resource("/delete").route(web::post().to(payslips::delete_payslips)),
                    )
                    // /payslips/template
                    .service(
                        web::resource("/template")
                            .route(web::get().to(payslips::download_template)),
                    )
                    // /payslips
                    .service(
                        web::resource("")
                            .route(web::get().to(payslips::list_payslips))
                            .route(web::post().to(payslips::upsert_payslip)),
                    ),
            )
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employees::list_employees))
                            .route(web::post().to(employees::upsert_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}").route(web::delete().to(employees::delete_employee)),
                    ),
            )
            .service(
                web::scope("/clients")
                    // /clients
                    .service(
                        web::resource("")
                            .route(web::get().to(clients::list_clients))
                            .route(web::post().to(clients::create_client)),
                    )
                    // /clients/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::patch().to(clients::update_client))
                            .route(web::delete().to(clients::delete_client)),
                    ),
            ),
    );
}
