use crate::api::root::ServiceDescriptor;
use utoipa::OpenApi;

/// Service-level OpenAPI document; the users domain merges its paths in [`openapi`].
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = "1.0.0",
        description = "Create, read, update, list and delete user records"
    ),
    paths(crate::api::root::descriptor),
    components(schemas(ServiceDescriptor))
)]
pub struct ApiDoc;

/// The complete document served at `/api-docs/openapi.json`
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(domain_users::ApiDoc::openapi());
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_includes_user_paths() {
        let doc = openapi();
        assert_eq!(doc.info.title, "User Management API");
        assert_eq!(doc.info.version, "1.0.0");
        assert!(doc.paths.paths.contains_key("/"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
    }
}
