use tui_input::{Input, InputRequest};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Editable message field. Owns the cursor; the widget owns the value that
/// gets sent.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    input: Input,
}

impl InputField {
    #[cfg(test)]
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Applies one edit. Returns the new value when the text changed.
    pub fn edit(&mut self, request: InputRequest) -> Option<String> {
        let before = self.input.value().to_string();
        self.input.handle(request);
        let after = self.input.value();
        (after != before).then(|| after.to_string())
    }

    /// Adopts the widget's value when it differs, e.g. after a send cleared
    /// it or an edit was refused. The cursor moves to the end.
    pub fn sync(&mut self, value: &str) {
        if self.input.value() != value {
            self.input = Input::new(value.to_string());
        }
    }

    pub fn rows(&self, width: u16) -> Vec<String> {
        wrap_rows(self.input.value(), width)
    }

    /// Cursor cell as (row, column) within [`InputField::rows`].
    pub fn cursor(&self, width: u16) -> (u16, u16) {
        let value = self.input.value();
        let cursor = self.input.cursor();
        let before: String = value.chars().take(cursor).collect();
        let rows = wrap_rows(&before, width);
        let mut row = rows.len().saturating_sub(1);
        let mut column = rows.last().map_or(0, |text| text.width());

        let next = value
            .chars()
            .nth(cursor)
            .filter(|ch| *ch != '\n')
            .and_then(UnicodeWidthChar::width)
            .unwrap_or(1);
        if column > 0 && column + next > usize::from(width.max(1)) {
            row += 1;
            column = 0;
        }
        (to_u16(row), to_u16(column))
    }

    /// Rows the field needs, counting a cursor parked after a full row.
    pub fn height(&self, width: u16) -> u16 {
        let rows = to_u16(self.rows(width).len());
        rows.max(self.cursor(width).0.saturating_add(1))
    }
}

/// Splits `text` into rows of at most `width` terminal columns. A line break
/// always starts a new row; wide characters take two columns.
pub fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut used = 0;
        for ch in line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(ch);
            used += ch_width;
        }
        rows.push(row);
    }
    rows
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
