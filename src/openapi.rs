use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::generate_ics
    ),
    tags(
        (name = "ics", description = "Reservation calendar generation")
    ),
)]
pub struct ApiDoc;
