//! The two top-level panels and their history fragments.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Files,
    Upload,
}

impl View {
    pub const ALL: [View; 2] = [View::Files, View::Upload];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Files => "files",
            View::Upload => "upload",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Files => "My Files",
            View::Upload => "Upload",
        }
    }

    /// History fragment including the leading `#`.
    pub fn fragment(self) -> String {
        format!("#{}", self.as_str())
    }

    /// Parses a location hash; anything unrecognized (or empty) is the files view.
    pub fn from_fragment(fragment: &str) -> View {
        match fragment.trim_start_matches('#') {
            "upload" => View::Upload,
            _ => View::Files,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
