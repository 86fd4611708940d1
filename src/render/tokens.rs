use crate::render::context::RenderContext;

/// The fixed set of tokens recognized inside template text.
///
/// Markers are matched literally; there is no expression grammar behind
/// them. New tokens are added here and resolved in [`Token::resolve`]
/// without touching the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    ServiceName,
    NsName,
}

impl Token {
    pub const ALL: [Token; 2] = [Token::ServiceName, Token::NsName];

    /// The literal marker this token matches in template text.
    pub fn marker(self) -> &'static str {
        match self {
            Token::ServiceName => "{{SERVICE_NAME}}",
            Token::NsName => "{{NS_NAME}}",
        }
    }

    fn resolve(self, context: &RenderContext) -> &str {
        match self {
            Token::ServiceName => &context.service_name,
            Token::NsName => &context.namespace,
        }
    }
}

/// Immutable marker-to-value table for one generation run.
///
/// Built once from the run's [`RenderContext`] and passed explicitly into
/// [`substitute`]; substitution itself holds no state.
pub struct TokenTable<'a> {
    entries: Vec<(&'static str, &'a str)>,
}

impl<'a> TokenTable<'a> {
    pub fn new(context: &'a RenderContext) -> Self {
        let entries = Token::ALL
            .iter()
            .map(|token| (token.marker(), token.resolve(context)))
            .collect();
        Self { entries }
    }

    /// Match a recognized marker at the start of `text`.
    fn match_at(&self, text: &str) -> Option<(usize, &'a str)> {
        self.entries
            .iter()
            .find(|(marker, _)| text.starts_with(marker))
            .map(|&(marker, value)| (marker.len(), value))
    }
}

/// Replace every recognized token marker in `input`, scanning left to right.
///
/// Replacement text is never re-scanned, so a resolved value that itself
/// contains `{{...}}` cannot trigger further substitution. Unrecognized
/// `{{...}}` sequences pass through untouched; templates may contain
/// literal double-brace text unrelated to substitution. A marker may begin
/// inside a longer brace run, as in `{{{NS_NAME}}}`: the unmatched lead
/// brace passes through and the marker still resolves.
pub fn substitute(input: &str, table: &TokenTable) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start..];
        match table.match_at(after) {
            Some((marker_len, value)) => {
                output.push_str(value);
                rest = &after[marker_len..];
            }
            None => {
                // Advance a single byte: a marker may start at the
                // overlapping second brace.
                output.push('{');
                rest = &after[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

/// Length of the recognized marker at the start of `text`, if any.
fn marker_at(text: &str) -> Option<usize> {
    Token::ALL
        .iter()
        .map(|token| token.marker())
        .find(|marker| text.starts_with(marker))
        .map(str::len)
}

/// Collect `{{...}}` spans that look like marker attempts but match no
/// recognized token. Used by `stencil check` to flag likely typos.
///
/// Spans longer than 64 characters or spanning lines are treated as
/// literal brace text, not marker attempts.
pub fn find_unrecognized(input: &str) -> Vec<String> {
    const MAX_SPAN: usize = 64;

    let mut found: Vec<String> = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start..];
        if let Some(marker_len) = marker_at(after) {
            rest = &after[marker_len..];
            continue;
        }
        let Some(close) = after.find("}}") else {
            break;
        };
        let span = &after[..close + 2];
        // A later opener inside the span means this "{{" is not the marker
        // start; step one byte to stay aligned with substitute's scan.
        if span[1..].contains("{{") {
            rest = &after[1..];
            continue;
        }
        if span.len() <= MAX_SPAN && !span.contains('\n') && !found.iter().any(|s| s.as_str() == span)
        {
            found.push(span.to_string());
        }
        rest = &after[close + 2..];
    }
    found
}
