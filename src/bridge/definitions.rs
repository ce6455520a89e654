//! Operation catalog.

use serde::Serialize;

/// Description of one operation the bridge accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    /// Wire name.
    pub name: &'static str,
    /// What the operation does.
    pub description: &'static str,
    /// Required positional parameters, in order.
    pub params: &'static [&'static str],
    /// Optional trailing positional parameters, in order.
    pub optional_params: &'static [&'static str],
    /// Whether the operation reports a completion result.
    pub reports_result: bool,
}

pub(super) const fn scan_image() -> OperationInfo {
    OperationInfo {
        name: "scanImage",
        description: "Recognize text in an image. Resolves with the text, which may be empty.",
        params: &["imageReference"],
        optional_params: &["script"],
        reports_result: true,
    }
}

pub(super) const fn unpack_asset() -> OperationInfo {
    OperationInfo {
        name: "unpackAsset",
        description: "Copy a bundled asset to a writable path. Resolves with the destination path.",
        params: &["assetName", "destinationPath"],
        optional_params: &[],
        reports_result: true,
    }
}

pub(super) const fn view_document() -> OperationInfo {
    OperationInfo {
        name: "viewDocument",
        description: "Open a PDF document in the host viewer with a read grant.",
        params: &["pathOrReference"],
        optional_params: &[],
        reports_result: true,
    }
}

pub(super) const fn share_image() -> OperationInfo {
    OperationInfo {
        name: "shareImage",
        description: "Present the host share chooser for an image with a read grant.",
        params: &["pathOrReference"],
        optional_params: &[],
        reports_result: true,
    }
}

pub(super) const fn open_all_files_access_settings() -> OperationInfo {
    OperationInfo {
        name: "openAllFilesAccessSettings",
        description: "Show the all-files-access settings screen. Fire and forget.",
        params: &[],
        optional_params: &[],
        reports_result: false,
    }
}
