use time::macros::format_description;

use super::*;

fn fmt_ts_abs(ts: &str) -> Option<String> {
    let dt = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    dt.format(format_description!(
        "[year]-[month repr:numerical padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]Z"
    ))
    .ok()
}

/// "3h ago" style age of an RFC3339 timestamp; absolute past two weeks.
pub(in crate::tui_shell) fn fmt_since(ts: &str, now: OffsetDateTime) -> String {
    let Ok(dt) = OffsetDateTime::parse(ts, &Rfc3339) else {
        return ts.to_string();
    };
    let secs = (now - dt).whole_seconds();
    if secs < 0 {
        return fmt_ts_ui(ts);
    }

    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 48 {
        format!("{}h ago", hours)
    } else if days < 14 {
        format!("{}d ago", days)
    } else {
        fmt_ts_ui(ts)
    }
}

pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    fmt_ts_abs(ts).unwrap_or_else(|| ts.to_string())
}

pub(in crate::tui_shell) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_are_relative_then_absolute() {
        let now = OffsetDateTime::parse("2026-03-10T12:00:00Z", &Rfc3339).unwrap();
        assert_eq!(fmt_since("2026-03-10T11:59:30Z", now), "just now");
        assert_eq!(fmt_since("2026-03-10T11:15:00Z", now), "45m ago");
        assert_eq!(fmt_since("2026-03-09T02:00:00Z", now), "34h ago");
        assert_eq!(fmt_since("2026-03-05T12:00:00Z", now), "5d ago");
        assert_eq!(fmt_since("2026-01-01T08:30:00Z", now), "2026-01-01 08:30Z");
        assert_eq!(fmt_since("not a time", now), "not a time");
    }
}
