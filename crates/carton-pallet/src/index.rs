//! Container lookup for scan verification.

use std::collections::HashMap;

use tracing::debug;

use carton_model::{ShipmentRecord, StyleColor, normalize_code};

/// Which map a lookup was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupVia {
    Primary,
    Alternate,
}

/// Result of a container lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    pub key: &'a StyleColor,
    pub via: LookupVia,
}

/// Direct map from container code to its style/colour and batch rows.
///
/// The alternate map keys the same codes by the `DIFF_2 + DIFF_1` colour so a
/// carton labelled with its secondary colour still resolves.
#[derive(Debug, Clone, Default)]
pub struct ContainerIndex {
    primary: HashMap<String, StyleColor>,
    alternate: HashMap<String, StyleColor>,
    rows: HashMap<String, Vec<usize>>,
}

impl ContainerIndex {
    /// Index every row of the batch. The first row of a container wins.
    pub fn build(records: &[ShipmentRecord]) -> Self {
        let mut index = Self::default();
        for (position, record) in records.iter().enumerate() {
            let code = record.scan_code();
            index
                .primary
                .entry(code.clone())
                .or_insert_with(|| record.style_color());
            index
                .alternate
                .entry(code.clone())
                .or_insert_with(|| record.alternate_style_color());
            index.rows.entry(code).or_default().push(position);
        }
        debug!(
            rows = records.len(),
            containers = index.primary.len(),
            "container index built"
        );
        index
    }

    /// Look up a code, primary map first.
    pub fn lookup(&self, code: &str) -> Option<Lookup<'_>> {
        let code = normalize_code(code);
        if let Some(key) = self.primary.get(&code) {
            return Some(Lookup {
                key,
                via: LookupVia::Primary,
            });
        }
        self.alternate.get(&code).map(|key| Lookup {
            key,
            via: LookupVia::Alternate,
        })
    }

    pub fn primary(&self, code: &str) -> Option<&StyleColor> {
        self.primary.get(&normalize_code(code))
    }

    pub fn alternate(&self, code: &str) -> Option<&StyleColor> {
        self.alternate.get(&normalize_code(code))
    }

    /// Batch row positions for a container, in sheet order.
    pub fn rows(&self, code: &str) -> &[usize] {
        self.rows
            .get(&normalize_code(code))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.primary.contains_key(&normalize_code(code))
    }

    /// Number of distinct containers.
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }
}
