use oair_core::transform::name_normalizer::{capitalize, route_to_name};
use oair_core::transform::path_template::{call_path_expr, directory_segment};

#[test]
fn test_capitalize_identifiers() {
    assert_eq!(capitalize("findPetsByStatus"), "FindPetsByStatus");
    assert_eq!(capitalize("patch"), "Patch");
    assert_eq!(capitalize("Already"), "Already");
}

#[test]
fn test_route_names_for_crud() {
    assert_eq!(route_to_name("get", "/users"), "listUsers");
    assert_eq!(route_to_name("get", "/users/{id}"), "getUser");
    assert_eq!(route_to_name("post", "/users"), "createUsers");
    assert_eq!(route_to_name("put", "/users/{id}"), "updateUser");
    assert_eq!(route_to_name("delete", "/users/{id}"), "deleteUser");
}

#[test]
fn test_route_names_with_punctuation() {
    assert_eq!(route_to_name("get", "/pet/findByStatus"), "listPetFindByStatus");
    assert_eq!(route_to_name("get", "/api_keys/{key}"), "getApiKey");
}

#[test]
fn test_call_path_and_directory_are_independent() {
    let path = "/stores/{storeId}/orders/{orderId}";
    assert_eq!(
        call_path_expr(path, true),
        "`/stores/${params.path.storeId}/orders/${params.path.orderId}`"
    );
    assert_eq!(directory_segment(path, "_$1"), "/stores/_storeId/orders/_orderId");
}
