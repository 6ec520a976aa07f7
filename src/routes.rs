// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const VENDORS: &str = "/api/vendors";
pub const VENDOR_ITEM: &str = "/api/vendors/{id}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
