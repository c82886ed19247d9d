use chrono::NaiveDateTime;

use crate::models::LogEntry;

// Timestamp as it appears between the brackets, offset excluded:
// [10/Jan/2024:13:45:02 +0000]
const TS_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

// Boundary between the router hash and the two auth placeholders.
const ROUTER_SEPARATOR: &str = " -  -  [";

/// Attempt to extract one [`LogEntry`] from a raw line (newline already
/// stripped). Returns `None` for any line that does not match the fixed
/// eepsite access-log format; a malformed line is a per-line outcome, never
/// an error.
///
/// Extraction is anchor-substring based, not tokenized. A request field with
/// embedded double quotes mis-splits the later anchors; that is inherited
/// from the fixed-format assumption and left as-is.
pub fn parse_log_line(line: &str) -> Option<LogEntry> {
    let (router, _) = line.split_once(ROUTER_SEPARATOR)?;

    let after_bracket = line.split_once('[')?.1;
    let stamp = match after_bracket.split_once(" +") {
        Some((before_offset, _)) => before_offset,
        None => after_bracket,
    };
    let timestamp = NaiveDateTime::parse_from_str(stamp, TS_FORMAT).ok()?;

    let mut quoted = line.split('"');
    quoted.next()?;
    let request = quoted.next()?;

    let after_request = line.split_once("\" ")?.1;
    let status_code = match after_request.split_once(" -") {
        Some((status, _)) => status,
        None => after_request,
    };

    Some(LogEntry {
        router: router.to_string(),
        timestamp,
        request: request.to_string(),
        status_code: status_code.to_string(),
    })
}
