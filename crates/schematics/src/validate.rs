use std::collections::HashMap;

use crate::net::{Element, LabelKind};

/// A net label name that is not referenced an even number (at least two) of
/// times within its namespace. Reported as a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingNet {
    pub kind: LabelKind,
    pub name: String,
    pub occurrences: usize,
}

/// Check label pairing over a finished element list. Local and global labels
/// are counted separately; power rails are exempt.
pub fn validate_elements(elements: &[Element]) -> Vec<DanglingNet> {
    dangling_nets(elements.iter().filter_map(Element::label))
}

/// Count labels by kind and name and keep the ones whose count is odd or
/// below two, sorted in natural order of name.
pub fn dangling_nets<'a>(
    labels: impl IntoIterator<Item = (LabelKind, &'a str)>,
) -> Vec<DanglingNet> {
    let mut counts: HashMap<(LabelKind, &str), usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut dangling: Vec<DanglingNet> = counts
        .into_iter()
        .filter(|&(_, occurrences)| occurrences < 2 || occurrences % 2 != 0)
        .map(|((kind, name), occurrences)| DanglingNet {
            kind,
            name: name.to_string(),
            occurrences,
        })
        .collect();
    dangling.sort_by(|a, b| natord::compare(&a.name, &b.name).then(a.kind.cmp(&b.kind)));
    dangling
}
