//! Host action requests.
//!
//! A [`HostIntent`] describes an activity the host should start. The bridge
//! builds them; an [`ActivityLauncher`](crate::host::ActivityLauncher)
//! translates them into whatever the host platform understands.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category attached to the per-app settings intent.
pub const CATEGORY_DEFAULT: &str = "android.intent.category.DEFAULT";

/// Kind of host activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    /// Open a resource in a viewer.
    View,
    /// Send a resource to another app.
    Send,
    /// All-files-access settings for this app.
    ManageAppAllFilesAccess,
    /// Generic all-files-access settings list.
    ManageAllFilesAccess,
}

impl IntentAction {
    /// Returns the host action identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "android.intent.action.VIEW",
            Self::Send => "android.intent.action.SEND",
            Self::ManageAppAllFilesAccess => {
                "android.settings.MANAGE_APP_ALL_FILES_ACCESS_PERMISSION"
            },
            Self::ManageAllFilesAccess => "android.settings.MANAGE_ALL_FILES_ACCESS_PERMISSION",
        }
    }
}

impl fmt::Display for IntentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Launch flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentFlag {
    /// Start in a new task (required when launching from a non-activity context).
    NewTask,
    /// Do not keep the launched activity in history.
    NoHistory,
    /// Grant the receiver read access to the attached content references.
    GrantReadUriPermission,
}

/// A request for the host to start an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostIntent {
    /// Action to perform.
    pub action: IntentAction,
    /// Primary data reference (`content://...` or `package:...`).
    pub data: Option<String>,
    /// MIME type of the data or payload.
    pub mime_type: Option<String>,
    /// Intent categories.
    pub categories: Vec<String>,
    /// Launch flags.
    pub flags: BTreeSet<IntentFlag>,
    /// Payload stream for send actions.
    pub stream: Option<String>,
    /// Auxiliary permission carrier: the reference repeated as clip data so
    /// read grants survive on hosts that only honour clip-data grants.
    pub clip_data: Option<String>,
    /// If set, present a target chooser with this title.
    pub chooser_title: Option<String>,
}

impl HostIntent {
    /// Creates an empty intent for `action`.
    #[must_use]
    pub const fn new(action: IntentAction) -> Self {
        Self {
            action,
            data: None,
            mime_type: None,
            categories: Vec::new(),
            flags: BTreeSet::new(),
            stream: None,
            clip_data: None,
            chooser_title: None,
        }
    }

    /// Sets the data reference.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Adds a launch flag.
    #[must_use]
    pub fn with_flag(mut self, flag: IntentFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Sets the payload stream.
    #[must_use]
    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Grants read access on `reference` and repeats it as clip data.
    #[must_use]
    pub fn granting_read(mut self, reference: impl Into<String>) -> Self {
        self.flags.insert(IntentFlag::GrantReadUriPermission);
        self.clip_data = Some(reference.into());
        self
    }

    /// Wraps the intent in a target chooser.
    #[must_use]
    pub fn with_chooser(mut self, title: impl Into<String>) -> Self {
        self.chooser_title = Some(title.into());
        self
    }

    /// Returns true if `flag` is set.
    #[must_use]
    pub fn has_flag(&self, flag: IntentFlag) -> bool {
        self.flags.contains(&flag)
    }
}
