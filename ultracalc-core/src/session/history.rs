use std::fmt;

use crate::result::Evaluation;
use crate::value::Value;

/// A successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: Value,
}

impl From<Evaluation> for HistoryEntry {
    fn from(eval: Evaluation) -> Self {
        HistoryEntry {
            expression: eval.expression,
            result: eval.value,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Calculations in the order they were made. Entries are only added,
/// until the whole history is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Text of the history view: one line per recent entry.
    pub fn view(&self, limit: usize) -> String {
        if self.is_empty() {
            return "No history".to_string();
        }
        self.recent(limit)
            .iter()
            .map(HistoryEntry::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: i64) -> HistoryEntry {
        HistoryEntry {
            expression: format!("{}+0", n),
            result: Value::int(n),
        }
    }

    #[test]
    fn it_returns_recent_entries() {
        let mut history = History::default();
        assert!(history.recent(10).is_empty());

        for n in 0..15 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), 15);
        let recent = history.recent(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0], entry(5));
        assert_eq!(recent[9], entry(14));
        assert_eq!(history.recent(100).len(), 15);
    }

    #[test]
    fn it_renders_the_view() {
        let mut history = History::default();
        assert_eq!(history.view(10), "No history");

        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.view(10), "1+0 = 1\n2+0 = 2");
        assert_eq!(history.view(1), "2+0 = 2");

        history.clear();
        assert!(history.is_empty());
    }
}
