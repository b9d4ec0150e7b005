use regex::Regex;
use std::sync::OnceLock;

const MAX_BRANCH_LEN: usize = 255;

/// Checks for user-supplied identifiers before they reach a tool.
pub struct InputValidator;

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern compiles"))
}

fn ticket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^[A-Z]+-\d+$")
}

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"^v?\d+\.\d+\.\d+(-[a-zA-Z0-9\-.]+)?(\+[a-zA-Z0-9\-.]+)?$",
    )
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?i)^https?://[^\s/$.?#].[^\s]*$")
}

fn bad_branch_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // leading/trailing dot or slash, "..", ".lock" suffix, "//", whitespace,
    // control characters and ~^:?*[
    cached(
        &RE,
        r"^\.|\.$|\.\.|\.lock$|^/|/$|//|\s|[\x00-\x1f\x7f~^:?*\[]",
    )
}

fn unsafe_path_char_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"[^\w\s\-./]")
}

fn repeated_slash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"/+")
}

impl InputValidator {
    /// `PROJ-123`, `CH-456`.
    pub fn validate_ticket_id(ticket_id: &str) -> bool {
        ticket_re().is_match(ticket_id)
    }

    /// Git branch naming rules, plus a 255 character cap.
    pub fn validate_branch_name(branch_name: &str) -> bool {
        if bad_branch_re().is_match(branch_name) {
            return false;
        }
        let len = branch_name.chars().count();
        len > 0 && len <= MAX_BRANCH_LEN
    }

    /// Semantic version, optionally `v`-prefixed.
    pub fn validate_version(version: &str) -> bool {
        version_re().is_match(version)
    }

    /// Strip everything but word characters, whitespace, `-`, `.` and `/`,
    /// collapse repeated slashes and trim.
    pub fn sanitize_path(path: &str) -> String {
        let stripped = unsafe_path_char_re().replace_all(path, "");
        let collapsed = repeated_slash_re().replace_all(&stripped, "/");
        collapsed.trim().to_string()
    }

    pub fn validate_url(url: &str) -> bool {
        url_re().is_match(url)
    }
}
