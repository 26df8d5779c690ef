use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{LogMessage, LogSection, SectionChild, Timestamp};

// One spdlog line: "[HH:MM:SS.micros] [level] body". The body carries the
// logger's own depth prefix ("| " per open section) plus padding spaces.
static LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d{2}:\d{2}:\d{2}\.\d{1,6})\] \[([a-z]+)\] (.*)$").unwrap());
static START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^=== start (.*?) === \{$").unwrap());
static END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^===\s+end (.*?) === \}$").unwrap());

/// Pure rewrite applied to each message's text before it enters the tree.
pub type MessageTransform = dyn Fn(&str) -> String;

pub fn parse_log(input: &str) -> Result<LogSection> {
    parse_log_with_transform(input, None)
}

/// Builds the section tree for a log. The result is a synthesized section
/// named `root` spanning the first to the last parsed line; sections still
/// open at end of input keep no end time.
pub fn parse_log_with_transform(
    input: &str,
    transform: Option<&MessageTransform>,
) -> Result<LogSection> {
    let mut root = LogSection::new("root", Timestamp::from_micros(0));
    let mut stack: Vec<LogSection> = Vec::new();
    let mut first_time: Option<Timestamp> = None;
    let mut last_time: Option<Timestamp> = None;

    for line in input.lines() {
        // Lines outside the logger's shape (stack traces, stray prints)
        // carry no timestamp and are skipped.
        let Some(caps) = LINE_RE.captures(line) else {
            continue;
        };
        let timestamp = Timestamp::parse(&caps[1])
            .with_context(|| format!("bad timestamp in log line `{line}`"))?;
        if first_time.is_none() {
            first_time = Some(timestamp);
        }
        last_time = Some(timestamp);

        let body = strip_depth_prefix(&caps[3]);
        if let Some(start) = START_RE.captures(body) {
            stack.push(LogSection::new(&start[1], timestamp));
        } else if END_RE.is_match(body) {
            // Closes the innermost open section; a stray end marker with
            // nothing open is dropped.
            if let Some(mut done) = stack.pop() {
                done.end_time = Some(timestamp);
                attach_section(&mut root, &mut stack, done);
            }
        } else {
            let text = match transform {
                Some(transform) => transform(body),
                None => body.to_string(),
            };
            let message = SectionChild::Message(LogMessage {
                timestamp,
                message: text,
            });
            match stack.last_mut() {
                Some(open) => open.children.push(message),
                None => root.children.push(message),
            }
        }
    }

    let (Some(first), Some(last)) = (first_time, last_time) else {
        anyhow::bail!("no parseable log lines in input");
    };

    // Unwind whatever is still open; those sections keep end_time = None.
    while let Some(open) = stack.pop() {
        attach_section(&mut root, &mut stack, open);
    }
    root.start_time = first;
    root.end_time = Some(last);
    Ok(root)
}

fn attach_section(root: &mut LogSection, stack: &mut [LogSection], section: LogSection) {
    let child = SectionChild::Section(section);
    match stack.last_mut() {
        Some(parent) => parent.children.push(child),
        None => root.children.push(child),
    }
}

fn strip_depth_prefix(body: &str) -> &str {
    let mut rest = body.trim_start_matches(' ');
    while let Some(stripped) = rest.strip_prefix("| ") {
        rest = stripped;
    }
    rest
}
