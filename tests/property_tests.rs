//! Property-based tests for reference handling and wire types.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Normalizing a content reference is idempotent
//! - `file://<p>` and `<p>` normalize to the same reference
//! - Resolved references round-trip back to the original path
//! - Unknown operation names always fail as unsupported
//! - Results survive a JSON round trip

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use capbridge::host::ContentResolver;
use capbridge::{
    CapabilityResult, ContentUri, FailureKind, FileProviderResolver, ResourceReference,
    ScriptProfile,
};
use proptest::prelude::*;
use std::path::PathBuf;

const ROOT: &str = "/data/user/0/ai.example.app/files";

fn resolver() -> FileProviderResolver {
    FileProviderResolver::new("ai.example.app.fileprovider").with_root("files", ROOT)
}

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _#%?&=+-]{1,12}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn relative_path() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment(), 1..5)
}

proptest! {
    /// Property: normalizing an already-normalized reference returns it unchanged.
    #[test]
    fn prop_normalize_idempotent(parts in relative_path()) {
        let resolver = resolver();
        let path = format!("{ROOT}/{}", parts.join("/"));
        let first = ResourceReference::parse(&path).unwrap().normalize(&resolver).unwrap();
        let second = ResourceReference::parse(first.as_str())
            .unwrap()
            .normalize(&resolver)
            .unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: a `file://` URI and its bare path normalize identically.
    #[test]
    fn prop_file_uri_matches_raw_path(parts in relative_path()) {
        let resolver = resolver();
        let path = format!("{ROOT}/{}", parts.join("/"));
        let raw = ResourceReference::parse(&path).unwrap().normalize(&resolver).unwrap();
        let uri = ResourceReference::parse(&format!("file://{path}"))
            .unwrap()
            .normalize(&resolver)
            .unwrap();
        prop_assert_eq!(raw, uri);
    }

    /// Property: resolving and opening a reference recovers the path.
    #[test]
    fn prop_resolved_reference_opens_original_path(parts in relative_path()) {
        let resolver = resolver();
        let path: PathBuf = parts.iter().fold(PathBuf::from(ROOT), |acc, p| acc.join(p));
        let uri = resolver.content_uri_for(&path).unwrap();
        prop_assert!(uri.as_str().starts_with("content://ai.example.app.fileprovider/files/"));
        prop_assert_eq!(resolver.open_path(&uri), Some(path));
    }

    /// Property: paths outside every root never resolve.
    #[test]
    fn prop_paths_outside_roots_rejected(parts in relative_path()) {
        let path = PathBuf::from("/sdcard/elsewhere").join(parts.join("/"));
        prop_assert!(resolver().content_uri_for(&path).is_err());
    }

    /// Property: content references always keep their exact text.
    #[test]
    fn prop_content_uri_preserved(tail in "[a-z0-9/]{1,40}") {
        let raw = format!("content://media/{tail}");
        let uri = ContentUri::parse(raw.clone()).unwrap();
        prop_assert_eq!(uri.as_str(), raw.as_str());
        prop_assert_eq!(uri.authority(), "media");
    }

    /// Property: script profile names round-trip case-insensitively.
    #[test]
    fn prop_script_profile_roundtrip(idx in 0usize..5, upper in any::<bool>()) {
        let profile = ScriptProfile::all()[idx];
        let name = if upper {
            profile.as_str().to_uppercase()
        } else {
            profile.as_str().to_string()
        };
        prop_assert_eq!(ScriptProfile::parse(&name), Some(profile));
    }

    /// Property: failure results survive a JSON round trip with their code.
    #[test]
    fn prop_failure_result_roundtrip(message in ".{0,80}") {
        let result = CapabilityResult::failure(FailureKind::ResolveError, message);
        let encoded = serde_json::to_string(&result).unwrap();
        prop_assert!(encoded.contains("\"code\":\"RESOLVE_ERROR\""));
        let decoded: CapabilityResult = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, result);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: names outside the catalog fail as unsupported without side effects.
    #[test]
    fn prop_unknown_operations_unsupported(name in "[a-z]{1,12}[A-Z][a-z]{0,8}") {
        prop_assume!(!matches!(
            name.as_str(),
            "scanImage" | "unpackAsset" | "viewDocument" | "shareImage" | "openAllFilesAccessSettings"
        ));
        let op = capbridge::bridge::Operation::from(name.as_str());
        prop_assert!(!op.is_known());
        prop_assert_eq!(op.metric_label(), "unknown");
    }
}
