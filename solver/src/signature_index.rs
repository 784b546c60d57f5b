// signature_index.rs
//
// Room identity by (label, fingerprint).
//
// A fingerprint is what the oracle reports when the fixed verification
// suffixes are walked from a room: one label sequence per suffix, in suffix
// order, each starting with the room's own label. Two rooms agreeing on label
// and fingerprint are treated as the same room.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint(Vec<Vec<u8>>);

impl Fingerprint {
    pub fn new(observations: Vec<Vec<u8>>) -> Self {
        Self(observations)
    }

    pub fn observations(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Label of the room the fingerprint was taken from.
    pub fn label(&self) -> Option<u8> {
        self.0.first().and_then(|walk| walk.first()).copied()
    }
}

/// (label, fingerprint) → room index of the first room registered with it.
#[derive(Debug, Default)]
pub struct SignatureIndex {
    by_label: HashMap<u8, HashMap<Fingerprint, usize>>,
}

impl SignatureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, label: u8, fingerprint: &Fingerprint) -> Option<usize> {
        self.by_label.get(&label)?.get(fingerprint).copied()
    }

    /// Registers `index`; an existing entry for the same signature is kept.
    pub fn insert(&mut self, label: u8, fingerprint: Fingerprint, index: usize) {
        self.by_label
            .entry(label)
            .or_default()
            .entry(fingerprint)
            .or_insert(index);
    }

    pub fn len(&self) -> usize {
        self.by_label.values().map(|rooms| rooms.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(walks: &[&[u8]]) -> Fingerprint {
        Fingerprint::new(walks.iter().map(|w| w.to_vec()).collect())
    }

    #[test]
    fn same_label_and_fingerprint_match() {
        let mut index = SignatureIndex::new();
        index.insert(1, fp(&[&[1, 0, 2, 3]]), 4);
        assert_eq!(index.lookup(1, &fp(&[&[1, 0, 2, 3]])), Some(4));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn different_labels_never_merge() {
        let mut index = SignatureIndex::new();
        let shared = fp(&[&[0, 1, 1, 2]]);
        index.insert(0, shared.clone(), 0);
        assert_eq!(index.lookup(2, &shared), None);
    }

    #[test]
    fn different_fingerprints_never_merge() {
        let mut index = SignatureIndex::new();
        index.insert(3, fp(&[&[3, 0, 1], &[3, 2, 2]]), 0);
        assert_eq!(index.lookup(3, &fp(&[&[3, 0, 1], &[3, 2, 1]])), None);
        // Order of the suffix observations matters.
        assert_eq!(index.lookup(3, &fp(&[&[3, 2, 2], &[3, 0, 1]])), None);
    }

    #[test]
    fn first_registration_wins() {
        let mut index = SignatureIndex::new();
        index.insert(1, fp(&[&[1, 1]]), 2);
        index.insert(1, fp(&[&[1, 1]]), 5);
        assert_eq!(index.lookup(1, &fp(&[&[1, 1]])), Some(2));
        assert!(!index.is_empty());
    }

    #[test]
    fn fingerprint_label_is_first_observation() {
        assert_eq!(fp(&[&[2, 0, 1]]).label(), Some(2));
        assert_eq!(Fingerprint::default().label(), None);
    }
}
