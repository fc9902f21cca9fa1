use tracing::info;

use crate::sink::LogSink;

const LINE_BREAK: &str = "<br>";

#[derive(Debug)]
pub struct TextLog {
    lines: Vec<String>,
    viewport: usize,
    top: usize,
    echo: bool,
}

impl TextLog {
    pub fn new(viewport: usize, echo: bool) -> Self {
        TextLog {
            lines: Vec::new(),
            viewport: viewport.max(1),
            top: 0,
            echo,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line prefixed with a line break, concatenated.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .fold(String::new(), |mut out, line| {
                out.push_str(LINE_BREAK);
                out.push_str(line);
                out
            })
    }

    pub fn visible(&self) -> &[String] {
        let end = (self.top + self.viewport).min(self.lines.len());
        &self.lines[self.top.min(end)..end]
    }
}

impl Default for TextLog {
    fn default() -> Self {
        TextLog::new(40, false)
    }
}

impl LogSink for TextLog {
    fn append_line(&mut self, line: &str) {
        if self.echo {
            info!(target: "roast_log", "{line}");
        }
        self.lines.push(line.to_string());
    }

    fn scroll_to_bottom(&mut self) {
        self.top = self.lines.len().saturating_sub(self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes_line_breaks() {
        let mut log = TextLog::default();
        assert_eq!(log.render(), "");

        log.append_line("prior");
        log.append_line("hello");
        assert_eq!(log.render(), "<br>prior<br>hello");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_scroll_to_bottom() {
        let mut log = TextLog::new(2, false);
        for line in ["a", "b", "c", "d"] {
            log.append_line(line);
        }
        assert_eq!(log.visible(), ["a", "b"]);

        log.scroll_to_bottom();
        assert_eq!(log.visible(), ["c", "d"]);
    }

    #[test]
    fn test_scroll_with_fewer_lines_than_viewport() {
        let mut log = TextLog::new(10, false);
        log.append_line("only");
        log.scroll_to_bottom();
        assert_eq!(log.visible(), ["only"]);
    }
}
