use actix_cors::Cors;
use actix_web::http::header;

use crate::config::AllowedOrigins;

/// Build CORS middleware for the browser client.
///
/// `AllowedOrigins::Any` mirrors the request origin; a list restricts to
/// exactly those origins. Only the methods the API serves are allowed.
pub fn cors_middleware(origins: &AllowedOrigins) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    match origins {
        AllowedOrigins::Any => cors = cors.allow_any_origin(),
        AllowedOrigins::List(list) => {
            for origin in list {
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}
