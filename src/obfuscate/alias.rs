use std::collections::HashMap;

/// Per-run mapping from original declared identifier to its generated
/// replacement. Entries are append-only: once an original is assigned an
/// alias, the pair never changes for the life of the table. A monotonic
/// counter suffix keeps aliases unique even when the random letter
/// prefixes collide. No stability across runs.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    counter: u32,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the alias for `original`, assigning `prefix` + counter if
    /// the identifier has not been seen in this run.
    pub fn assign(&mut self, original: &str, prefix: &str) -> &str {
        if let Some(&i) = self.index.get(original) {
            return &self.entries[i].1;
        }

        let alias = format!("{}{}", prefix, self.counter);
        self.counter += 1;
        self.index.insert(original.to_string(), self.entries.len());
        self.entries.push((original.to_string(), alias));
        &self.entries.last().unwrap().1
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.index.get(original).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(o, a)| (o.as_str(), a.as_str()))
    }
}
