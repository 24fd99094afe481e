//! Per-request view of the document
//!
//! [`MatchState`] is built at the start of a completion request and dropped
//! when it returns. It holds the text windows every rule looks at: the whole
//! document, the text from `start_at` to the cursor, and the current line up
//! to the cursor.

/// A single line of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Byte offset of the first character of the line
    pub from: usize,
    /// Line content, without the trailing newline
    pub text: String,
}

/// Capability to find the line that contains an offset
pub trait LineLookup {
    /// Return the line containing `offset`
    fn line_at(&self, offset: usize) -> Line;
}

impl<F> LineLookup for F
where
    F: Fn(usize) -> Line,
{
    fn line_at(&self, offset: usize) -> Line {
        self(offset)
    }
}

/// Line lookup over a plain `&str`, splitting on `\n`
#[derive(Debug, Clone, Copy)]
pub struct TextLines<'a> {
    text: &'a str,
}

impl<'a> TextLines<'a> {
    /// Wrap a document
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl LineLookup for TextLines<'_> {
    fn line_at(&self, offset: usize) -> Line {
        let offset = floor_char_boundary(self.text, offset);
        let from = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[from..]
            .find('\n')
            .map_or(self.text.len(), |i| from + i);

        Line {
            from,
            text: self.text[from..end].to_string(),
        }
    }
}

/// Clamp `offset` to the text and move it down to a char boundary
pub(crate) fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Text windows around the cursor for one completion request
#[derive(Debug)]
pub struct MatchState<'a> {
    /// Document from `start_at` up to the cursor
    text_before: &'a str,
    /// Current line up to the cursor, ignoring anything before `start_at`
    line_before: String,
    /// Cursor byte offset
    cursor: usize,
}

impl<'a> MatchState<'a> {
    /// Build the state for a request
    ///
    /// # Arguments
    /// * `raw` - Whole document text
    /// * `cursor` - Cursor byte offset, clamped to the text
    /// * `lines` - Line lookup for the document
    /// * `start_at` - Offset before which the document is ignored
    pub fn new(raw: &'a str, cursor: usize, lines: &dyn LineLookup, start_at: usize) -> Self {
        let cursor = floor_char_boundary(raw, cursor);
        let start = floor_char_boundary(raw, start_at.min(cursor));
        let text_before = &raw[start..cursor];

        let line = lines.line_at(cursor);
        let in_line = cursor.saturating_sub(line.from).min(line.text.len());
        let skip = start.saturating_sub(line.from);
        let line_before = if skip >= in_line {
            String::new()
        } else {
            line.text.get(skip..in_line).unwrap_or_default().to_string()
        };

        Self {
            text_before,
            line_before,
            cursor,
        }
    }

    /// Document from `start_at` up to the cursor
    pub fn text_before(&self) -> &'a str {
        self.text_before
    }

    /// Current line up to the cursor
    pub fn line_before(&self) -> &str {
        &self.line_before
    }

    /// Cursor byte offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lines_single_line() {
        let lines = TextLines::new("get User");
        assert_eq!(
            lines.line_at(4),
            Line {
                from: 0,
                text: "get User".to_string()
            }
        );
    }

    #[test]
    fn test_text_lines_multi_line() {
        let text = "# comment\nget User\nwhere id = 1";
        let lines = TextLines::new(text);

        assert_eq!(lines.line_at(12).from, 10);
        assert_eq!(lines.line_at(12).text, "get User");
        // Offset right after a newline belongs to the next line
        assert_eq!(lines.line_at(19).text, "where id = 1");
        assert_eq!(lines.line_at(text.len()).text, "where id = 1");
    }

    #[test]
    fn test_match_state_windows() {
        let text = "get User\nwhere na";
        let state = MatchState::new(text, text.len(), &TextLines::new(text), 0);

        assert_eq!(state.text_before(), text);
        assert_eq!(state.line_before(), "where na");
        assert_eq!(state.cursor(), text.len());
    }

    #[test]
    fn test_match_state_cursor_mid_line() {
        let text = "get User where name";
        let state = MatchState::new(text, 8, &TextLines::new(text), 0);

        assert_eq!(state.text_before(), "get User");
        assert_eq!(state.line_before(), "get User");
    }

    #[test]
    fn test_match_state_start_at_skips_prefix() {
        let text = "> get Us";
        let state = MatchState::new(text, text.len(), &TextLines::new(text), 2);

        assert_eq!(state.text_before(), "get Us");
        assert_eq!(state.line_before(), "get Us");
    }

    #[test]
    fn test_match_state_start_at_on_earlier_line() {
        let text = "header\nget User";
        let state = MatchState::new(text, text.len(), &TextLines::new(text), 3);

        assert_eq!(state.text_before(), "der\nget User");
        assert_eq!(state.line_before(), "get User");
    }

    #[test]
    fn test_cursor_clamped_to_char_boundary() {
        let text = "get Ünïcode";
        // Offset 5 falls inside the two-byte 'Ü'
        let state = MatchState::new(text, 5, &TextLines::new(text), 0);
        assert_eq!(state.cursor(), 4);

        let state = MatchState::new(text, 999, &TextLines::new(text), 0);
        assert_eq!(state.cursor(), text.len());
    }

    #[test]
    fn test_closure_line_lookup() {
        let lookup = |_offset: usize| Line {
            from: 0,
            text: "get Post".to_string(),
        };
        let state = MatchState::new("get Post", 8, &lookup, 0);
        assert_eq!(state.line_before(), "get Post");
    }
}
