//! Line assembly for the simulated prompt
//!
//! Turns keystrokes and pasted text into completed command lines.

/// The line currently being typed, plus recall history
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: String,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character. Returns false if the buffer was empty.
    pub fn backspace(&mut self) -> bool {
        self.buffer.pop().is_some()
    }

    /// Enter: flush the buffer as a command unless it is blank.
    /// The buffer is reset either way.
    pub fn submit(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.buffer);
        self.history_index = None;
        self.flush(line)
    }

    /// Pasted text. Every line break (`\n`, `\r\n` or a bare `\r`) acts as
    /// Enter; the fragment after the last break stays in the buffer.
    pub fn paste(&mut self, text: &str) -> Vec<String> {
        let mut flushed = Vec::new();
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut fragments = normalized.split('\n');

        if let Some(first) = fragments.next() {
            self.buffer.push_str(first);
        }
        for fragment in fragments {
            let line = std::mem::replace(&mut self.buffer, fragment.to_string());
            flushed.extend(self.flush(line));
        }

        self.history_index = None;
        flushed
    }

    /// Up arrow: replace the buffer with the previous command
    pub fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(index);
        self.buffer = self.history[index].clone();
    }

    /// Down arrow: step forward through history, ending on an empty line
    pub fn recall_next(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.buffer = self.history[i + 1].clone();
            }
            Some(_) => {
                self.history_index = None;
                self.buffer.clear();
            }
            None => {}
        }
    }

    fn flush(&mut self, line: String) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.history.push(line.to_string());
        Some(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        text.chars().for_each(|c| buffer.push(c));
        buffer
    }

    #[test]
    fn enter_flushes_typed_line() {
        let mut buffer = typed("help");
        assert_eq!(buffer.submit(), Some("help".to_string()));
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn enter_on_blank_line_flushes_nothing() {
        let mut buffer = typed("   ");
        assert_eq!(buffer.submit(), None);
        assert_eq!(buffer.as_str(), "");

        buffer.recall_previous();
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut buffer = typed("helpp");
        assert!(buffer.backspace());
        assert_eq!(buffer.as_str(), "help");

        let mut empty = LineBuffer::new();
        assert!(!empty.backspace());
    }

    #[test]
    fn multi_line_paste_leaves_last_fragment_pending() {
        let mut buffer = LineBuffer::new();
        let flushed = buffer.paste("get pod\ns");
        assert_eq!(flushed, vec!["get pod".to_string()]);
        assert_eq!(buffer.as_str(), "s");

        assert_eq!(buffer.submit(), Some("s".to_string()));
    }

    #[test]
    fn paste_appends_first_fragment_to_typed_text() {
        let mut buffer = typed("kubectl ");
        let flushed = buffer.paste("get pods\r\nhelp\r\n");
        assert_eq!(flushed, vec!["kubectl get pods".to_string(), "help".to_string()]);
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn paste_splits_on_bare_carriage_returns() {
        let mut buffer = LineBuffer::new();
        let flushed = buffer.paste("help\rkubectl get pods\r");
        assert_eq!(flushed, vec!["help".to_string(), "kubectl get pods".to_string()]);
        assert_eq!(buffer.as_str(), "");

        let flushed = buffer.paste("clear\r\rget");
        assert_eq!(flushed, vec!["clear".to_string()]);
        assert_eq!(buffer.as_str(), "get");
    }

    #[test]
    fn paste_skips_blank_lines() {
        let mut buffer = LineBuffer::new();
        let flushed = buffer.paste("help\n\n  \nclear");
        assert_eq!(flushed, vec!["help".to_string()]);
        assert_eq!(buffer.as_str(), "clear");
    }

    #[test]
    fn single_line_paste_flushes_nothing() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.paste("kubectl get pods").is_empty());
        assert_eq!(buffer.as_str(), "kubectl get pods");
    }

    #[test]
    fn history_recall_walks_back_and_forth() {
        let mut buffer = LineBuffer::new();
        buffer.paste("help\nkubectl get pods\n");

        buffer.recall_previous();
        assert_eq!(buffer.as_str(), "kubectl get pods");
        buffer.recall_previous();
        assert_eq!(buffer.as_str(), "help");
        buffer.recall_previous();
        assert_eq!(buffer.as_str(), "help");

        buffer.recall_next();
        assert_eq!(buffer.as_str(), "kubectl get pods");
        buffer.recall_next();
        assert_eq!(buffer.as_str(), "");
    }
}
