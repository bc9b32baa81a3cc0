use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const USERS_TAG: &str = "users";
pub const ARTICLES_TAG: &str = "articles";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Median",
        description = "The Median API description",
        version = "0.1",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::FieldError,
        )
    ),
    tags(
        (name = USERS_TAG, description = "User management endpoints"),
        (name = ARTICLES_TAG, description = "Article publishing endpoints"),
    )
)]
pub struct ApiDoc;

/// Declares the bearer scheme; no route enforces it.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
