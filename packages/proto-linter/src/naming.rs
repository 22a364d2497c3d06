//! Expected request/response type names derived from an RPC name
//!
//! Prefix matching is case-sensitive and the RPC name is used as written:
//! `create_widget` does not match `Create`.

/// Well-known empty message returned by `Delete*` RPCs
pub const EMPTY_TYPE: &str = "google.protobuf.Empty";

/// Long-running operation marker, exempt from the response naming rule
pub const LONG_RUNNING_OPERATION_TYPE: &str = "google.longrunning.Operation";

const REQUEST_SUFFIX: &str = "Request";
const RESPONSE_SUFFIX: &str = "Response";

/// Verbs whose response is the bare resource name, in priority order
const RESOURCE_VERBS: &[&str] = &["Create", "Update", "Get"];

/// `<RpcName>Request`, with no exceptions
pub fn expected_request_name(rpc_name: &str) -> String {
    format!("{}{}", rpc_name, REQUEST_SUFFIX)
}

/// Expected response type for an RPC name.
///
/// The first matching rule wins:
/// - `Create*`, `Update*`, `Get*` return the resource name with the verb removed
/// - `Delete*` returns [`EMPTY_TYPE`]
/// - anything else returns `<RpcName>Response`
pub fn expected_response_name(rpc_name: &str) -> String {
    for verb in RESOURCE_VERBS {
        if let Some(resource) = rpc_name.strip_prefix(verb) {
            return resource.to_string();
        }
    }

    if rpc_name.starts_with("Delete") {
        return EMPTY_TYPE.to_string();
    }

    format!("{}{}", rpc_name, RESPONSE_SUFFIX)
}

/// Whether a declared response type satisfies the naming convention
pub fn response_matches(rpc_name: &str, returns_type: &str) -> bool {
    returns_type == LONG_RUNNING_OPERATION_TYPE || returns_type == expected_response_name(rpc_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_name_always_suffixed() {
        for name in ["GetWidget", "CreateWidget", "DeleteWidget", "ListWidgets", "Get", "x"] {
            assert_eq!(expected_request_name(name), format!("{}Request", name));
        }
    }

    #[test]
    fn test_resource_verbs_strip_prefix() {
        assert_eq!(expected_response_name("CreateWidget"), "Widget");
        assert_eq!(expected_response_name("UpdateWidget"), "Widget");
        assert_eq!(expected_response_name("GetWidget"), "Widget");
    }

    #[test]
    fn test_resource_verbs_with_empty_remainder() {
        assert_eq!(expected_response_name("Create"), "");
        assert_eq!(expected_response_name("Update"), "");
        assert_eq!(expected_response_name("Get"), "");
    }

    #[test]
    fn test_delete_returns_empty() {
        assert_eq!(expected_response_name("DeleteWidget"), EMPTY_TYPE);
        assert_eq!(expected_response_name("Delete"), EMPTY_TYPE);
        assert_eq!(expected_response_name("DeleteEverythingResponse"), EMPTY_TYPE);
    }

    #[test]
    fn test_other_verbs_get_response_suffix() {
        assert_eq!(expected_response_name("ListWidgets"), "ListWidgetsResponse");
        assert_eq!(expected_response_name("BatchGetWidgets"), "BatchGetWidgetsResponse");
    }

    #[test]
    fn test_prefix_matching_is_case_sensitive() {
        assert_eq!(expected_response_name("create_widget"), "create_widgetResponse");
        assert_eq!(expected_response_name("getWidget"), "getWidgetResponse");
    }

    #[test]
    fn test_prefix_matches_without_word_boundary() {
        // "Getaway" still starts with "Get"
        assert_eq!(expected_response_name("Getaway"), "away");
    }

    #[test]
    fn test_response_matches_long_running_exemption() {
        assert!(response_matches("GetWidget", "Widget"));
        assert!(response_matches("GetWidget", LONG_RUNNING_OPERATION_TYPE));
        assert!(!response_matches("GetWidget", "GetWidgetResponse"));
    }
}
