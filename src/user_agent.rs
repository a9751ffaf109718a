//! User-Agent string sent with every mirror request.

/// Default User-Agent for download requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_download_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("md5mirror/{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_tool_and_version() {
        let ua = default_download_user_agent();
        assert_eq!(
            ua.strip_prefix("md5mirror/"),
            Some(env!("CARGO_PKG_VERSION")),
            "UA must carry the crate version: {ua}"
        );
    }
}
