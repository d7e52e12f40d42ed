use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::auth::API_KEY_HEADER;
use crate::routes::rooms::{CreateRoomRequest, RoomResponse, UpdateRoomRequest};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Registers the `X-Api-Key` header scheme referenced by the room routes.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Hotel Room API", version = "v1"),
    paths(
        crate::routes::health,
        crate::routes::rooms::list,
        crate::routes::rooms::get,
        crate::routes::rooms::create,
        crate::routes::rooms::update,
        crate::routes::rooms::set_status,
    ),
    components(
        schemas(
            HealthResponse,
            RoomResponse,
            CreateRoomRequest,
            UpdateRoomRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "rooms")
    )
)]
pub struct ApiDoc;
