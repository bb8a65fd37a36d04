//! Combination predicates over a set of die faces. Order never matters.

/// Occurrences of each face, indexed by face value (index 0 unused).
fn face_counts(values: &[u8]) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &v in values {
        if let Some(slot) = counts.get_mut(v as usize) {
            *slot += 1;
        }
    }
    counts
}

/// Some face appears at least `n` times.
pub fn has_of_a_kind(values: &[u8], n: u8) -> bool {
    face_counts(values)[1..].iter().any(|&c| c >= n)
}

/// Exactly three of one face and two of another.
///
/// Five of a kind is not a full house.
pub fn is_full_house(values: &[u8]) -> bool {
    let mut counts: Vec<u8> = face_counts(values)[1..]
        .iter()
        .copied()
        .filter(|&c| c > 0)
        .collect();
    counts.sort_unstable();
    counts == [2, 3]
}

/// A run of `length` consecutive faces is present. Duplicates are ignored.
pub fn has_straight(values: &[u8], length: usize) -> bool {
    if length == 0 {
        return true;
    }
    let counts = face_counts(values);
    let mut run = 0;
    for &c in &counts[1..] {
        if c > 0 {
            run += 1;
            if run >= length {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// All dice show the same face.
pub fn is_yahtzee(values: &[u8]) -> bool {
    !values.is_empty() && has_of_a_kind(values, values.len() as u8)
}
