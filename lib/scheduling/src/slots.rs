//! The slot set a doctor edits before publishing.
//!
//! Slots are `HH:MM` strings compared exactly. Order is the order the doctor
//! added them in (or the server's order for a set loaded from the API), and
//! the whole set is sent back as a replace-all update.

use serde::{Deserialize, Serialize};

const FIRST_SLOT_MINUTES: u32 = 9 * 60;
const LAST_SLOT_MINUTES: u32 = 17 * 60;
const SLOT_STEP_MINUTES: usize = 30;

/// Returns the fixed candidate grid: every half hour from 09:00 to 17:00.
#[must_use]
pub fn generate_candidates() -> Vec<String> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(SLOT_STEP_MINUTES)
        .map(|minutes| format!("{:02}:{:02}", minutes / 60, minutes % 60))
        .collect()
}

/// Ordered, duplicate-free sequence of time slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SlotSet {
    slots: Vec<String>,
}

impl SlotSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `candidate` unless it is empty or already present.
    ///
    /// Matching is exact: no trimming or case folding.
    ///
    /// Returns true if the set changed.
    pub fn add(&mut self, candidate: &str) -> bool {
        if candidate.is_empty() || self.contains(candidate) {
            return false;
        }
        self.slots.push(candidate.to_string());
        true
    }

    /// Removes `value`, keeping the order of the remaining slots.
    ///
    /// Returns true if the set changed.
    pub fn remove(&mut self, value: &str) -> bool {
        match self.slots.iter().position(|slot| slot == value) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if `value` is in the set.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.slots.iter().any(|slot| slot == value)
    }

    /// Candidate slots that are not yet in the set, in grid order.
    #[must_use]
    pub fn remaining_candidates(&self) -> Vec<String> {
        generate_candidates()
            .into_iter()
            .filter(|candidate| !self.contains(candidate))
            .collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.slots
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(String::as_str)
    }
}

/// Builds a set from server data, keeping the first of any duplicates.
impl From<Vec<String>> for SlotSet {
    fn from(slots: Vec<String>) -> Self {
        slots.into_iter().collect()
    }
}

impl From<SlotSet> for Vec<String> {
    fn from(set: SlotSet) -> Self {
        set.slots
    }
}

impl<S: Into<String>> FromIterator<S> for SlotSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for slot in iter {
            let slot = slot.into();
            if !set.add(&slot) {
                tracing::debug!(slot = %slot, "Dropping duplicate or empty slot");
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn candidate_grid() {
        let candidates = generate_candidates();
        assert_eq!(candidates.len(), 17);
        assert_eq!(candidates.first().map(String::as_str), Some("09:00"));
        assert_eq!(candidates.get(1).map(String::as_str), Some("09:30"));
        assert_eq!(candidates.last().map(String::as_str), Some("17:00"));
    }

    #[test]
    fn candidate_grid_is_strictly_increasing_by_half_hours() {
        let minutes: Vec<u32> = generate_candidates()
            .iter()
            .map(|slot| {
                let (h, m) = slot.split_once(':').expect("HH:MM");
                h.parse::<u32>().expect("hour") * 60 + m.parse::<u32>().expect("minute")
            })
            .collect();
        for pair in minutes.windows(2) {
            assert_eq!(pair[1] - pair[0], 30);
        }
    }

    #[test]
    fn remove_keeps_the_rest_in_order() {
        let mut set = SlotSet::from(vec!["09:00".to_string(), "09:30".to_string()]);
        assert!(set.remove("09:00"));
        assert_eq!(set.as_slice(), ["09:30"]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut set = SlotSet::from(vec!["09:00".to_string()]);
        assert!(!set.remove("10:00"));
        assert_eq!(set.as_slice(), ["09:00"]);
    }

    #[test]
    fn add_appends_at_end() {
        let mut set = SlotSet::from(vec!["11:00".to_string()]);
        assert!(set.add("09:00"));
        assert_eq!(set.as_slice(), ["11:00", "09:00"]);
    }

    #[test]
    fn add_rejects_empty_and_duplicates() {
        let mut set = SlotSet::new();
        assert!(!set.add(""));
        assert!(set.add("09:00"));
        assert!(!set.add("09:00"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn matching_is_exact() {
        let mut set = SlotSet::new();
        set.add("9:00");
        assert!(!set.contains("09:00"));
        assert!(set.add("09:00"));
        assert!(set.add(" 09:00"));
        assert!(set.add("  "));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn server_data_is_deduplicated_keeping_first() {
        let set = SlotSet::from(vec![
            "10:00".to_string(),
            "09:00".to_string(),
            "10:00".to_string(),
        ]);
        assert_eq!(set.as_slice(), ["10:00", "09:00"]);
    }

    #[test]
    fn remaining_candidates_skip_chosen() {
        let set = SlotSet::from(vec!["09:00".to_string(), "17:00".to_string()]);
        let remaining = set.remaining_candidates();
        assert_eq!(remaining.len(), 15);
        assert_eq!(remaining.first().map(String::as_str), Some("09:30"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let set = SlotSet::from(vec!["09:00".to_string()]);
        assert_eq!(
            serde_json::to_string(&set).expect("serialize"),
            r#"["09:00"]"#
        );
        let parsed: SlotSet =
            serde_json::from_str(r#"["09:00","09:00","10:00"]"#).expect("deserialize");
        assert_eq!(parsed.as_slice(), ["09:00", "10:00"]);
    }

    fn slot() -> impl Strategy<Value = String> {
        (0u32..24, prop::sample::select(vec![0u32, 30]))
            .prop_map(|(h, m)| format!("{h:02}:{m:02}"))
    }

    proptest! {
        #[test]
        fn add_then_remove_restores_set(
            initial in prop::collection::vec(slot(), 0..12),
            value in slot(),
        ) {
            let set = SlotSet::from(initial);
            prop_assume!(!set.contains(&value));

            let mut edited = set.clone();
            prop_assert!(edited.add(&value));
            prop_assert!(edited.remove(&value));
            prop_assert_eq!(edited, set);
        }

        #[test]
        fn adding_present_value_is_noop(
            initial in prop::collection::vec(slot(), 1..12),
            index in any::<prop::sample::Index>(),
        ) {
            let set = SlotSet::from(initial);
            let value = index.get(set.as_slice()).clone();

            let mut edited = set.clone();
            prop_assert!(!edited.add(&value));
            prop_assert_eq!(edited, set);
        }

        #[test]
        fn sets_never_hold_duplicates(values in prop::collection::vec(slot(), 0..30)) {
            let set: SlotSet = values.into_iter().collect();
            let mut seen = std::collections::HashSet::new();
            for slot in set.iter() {
                prop_assert!(seen.insert(slot.to_string()));
            }
        }
    }
}
