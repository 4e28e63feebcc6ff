use crate::EdgeSet;

/// Targets to insert and delete for one source so that its stored set becomes
/// the desired one. `add` and `remove` never share a member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetDiff {
    pub add: EdgeSet,
    pub remove: EdgeSet,
}

impl TargetDiff {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

pub fn diff_targets(current: &EdgeSet, desired: &EdgeSet) -> TargetDiff {
    TargetDiff {
        add: desired.difference(current),
        remove: current.difference(desired),
    }
}

#[cfg(test)]
mod tests {
    use super::diff_targets;
    use crate::{EdgeSet, IdValue};

    fn ids(values: &[i64]) -> EdgeSet {
        values.iter().copied().map(IdValue::from).collect()
    }

    #[test]
    fn replaces_overlapping_sets() {
        let diff = diff_targets(&ids(&[20, 30]), &ids(&[10, 20]));
        assert_eq!(diff.add, ids(&[10]));
        assert_eq!(diff.remove, ids(&[30]));
    }

    #[test]
    fn empty_desired_removes_everything() {
        let diff = diff_targets(&ids(&[1, 2, 3]), &EdgeSet::new());
        assert!(diff.add.is_empty());
        assert_eq!(diff.remove, ids(&[1, 2, 3]));
    }

    #[test]
    fn identical_sets_produce_no_work() {
        assert!(diff_targets(&ids(&[4, 5]), &ids(&[5, 4])).is_empty());
    }

    #[test]
    fn add_and_remove_partition_the_symmetric_difference() {
        let universe = [1_i64, 2, 3, 4];
        for current_mask in 0u8..16 {
            for desired_mask in 0u8..16 {
                let pick = |mask: u8| -> Vec<i64> {
                    universe
                        .iter()
                        .enumerate()
                        .filter(|(index, _)| mask & (1 << index) != 0)
                        .map(|(_, value)| *value)
                        .collect()
                };
                let current = ids(&pick(current_mask));
                let desired = ids(&pick(desired_mask));
                let diff = diff_targets(&current, &desired);
                assert!(diff.add.iter().all(|id| !diff.remove.contains(id)));
                let mut applied: EdgeSet = current
                    .iter()
                    .filter(|id| !diff.remove.contains(id))
                    .cloned()
                    .collect();
                for id in diff.add.iter() {
                    applied.insert(id.clone());
                }
                assert_eq!(applied, desired);
            }
        }
    }
}
