//! Discovery request helpers.
//!
//! Discovery is `GET {server}/chatrooms?search={terms}` where `terms` is a
//! space-separated list. The server maps each term to one room, so the
//! default term is always appended to give every search a shared lobby.

/// Path of the discovery endpoint, relative to the server base URL.
pub const CHATROOMS_PATH: &str = "/chatrooms";

/// Query parameter carrying the search terms.
pub const SEARCH_PARAM: &str = "search";

/// Term appended to every search.
pub const DEFAULT_TERM: &str = "searchbuddy";

/// Build the `search` parameter value from raw user input.
///
/// Blank input searches for the default term alone.
pub fn search_terms(input: &str) -> String {
    let input = input.trim();
    if input.is_empty() { DEFAULT_TERM.to_string() } else { format!("{input} {DEFAULT_TERM}") }
}

/// Full discovery endpoint URL for a server base URL.
pub fn chatrooms_url(server: &str) -> String {
    format!("{}{CHATROOMS_PATH}", server.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_default_term() {
        assert_eq!(search_terms("rust async"), "rust async searchbuddy");
    }

    #[test]
    fn trims_input() {
        assert_eq!(search_terms("  cats \n"), "cats searchbuddy");
    }

    #[test]
    fn blank_input_uses_default_term() {
        assert_eq!(search_terms("   "), DEFAULT_TERM);
    }

    #[test]
    fn url_ignores_trailing_slash() {
        assert_eq!(chatrooms_url("http://localhost:8080/"), "http://localhost:8080/chatrooms");
        assert_eq!(chatrooms_url("http://localhost:8080"), "http://localhost:8080/chatrooms");
    }
}
