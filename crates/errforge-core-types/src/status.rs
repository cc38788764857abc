//! Standard HTTP status lookup
//!
//! Read-only table of the status codes common HTTP stacks recognise, keyed by
//! numeric code. The factory consults it to decide whether an error code can
//! double as the reported HTTP status.

const STATUS_REASONS: &[(u32, &str)] = &[
    (100, "Continue"),
    (101, "Switching Protocols"),
    (102, "Processing"),
    (103, "Early Hints"),
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (203, "Non-Authoritative Information"),
    (204, "No Content"),
    (205, "Reset Content"),
    (206, "Partial Content"),
    (207, "Multi-Status"),
    (208, "Already Reported"),
    (226, "IM Used"),
    (300, "Multiple Choices"),
    (301, "Moved Permanently"),
    (302, "Found"),
    (303, "See Other"),
    (304, "Not Modified"),
    (305, "Use Proxy"),
    (307, "Temporary Redirect"),
    (308, "Permanent Redirect"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Payload Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (418, "I'm a Teapot"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Entity"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (431, "Request Header Fields Too Large"),
    (451, "Unavailable For Legal Reasons"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
];

/// Get the reason phrase for a standard HTTP status code
pub fn reason_phrase(code: u32) -> Option<&'static str> {
    STATUS_REASONS
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|idx| STATUS_REASONS[idx].1)
}

/// Whether `code` is a recognised HTTP status
pub fn is_known_status(code: u32) -> bool {
    reason_phrase(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_for_binary_search() {
        assert!(STATUS_REASONS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_known_statuses() {
        assert_eq!(reason_phrase(404), Some("Not Found"));
        assert_eq!(reason_phrase(505), Some("HTTP Version Not Supported"));
        assert!(is_known_status(200));
        assert!(is_known_status(417));
    }

    #[test]
    fn test_unknown_statuses() {
        assert!(!is_known_status(0));
        assert!(!is_known_status(306));
        assert!(!is_known_status(600));
        assert!(!is_known_status(1000));
        assert_eq!(reason_phrase(599), None);
    }
}
