//! Bits bound to INPUT nodes for one row.

use crate::types::NodeId;

/// Binding of INPUT node ids to bits.
///
/// Kept outside the graph so that the graph stays read-only while rows are
/// evaluated, possibly on several threads at once.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Assignment {
    /// Ascending.
    ids: Vec<NodeId>,
    bits: Vec<bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds bit `i` of `combination` to `inputs[i]`.
    ///
    /// `inputs` must be sorted ascending, as returned by
    /// [`NodeGraph::input_nodes`][crate::graph::NodeGraph::input_nodes], and
    /// hold at most 64 ids.
    pub fn from_combination(inputs: &[NodeId], combination: u64) -> Self {
        debug_assert!(inputs.len() <= 64);
        debug_assert!(inputs.windows(2).all(|w| w[0] < w[1]));
        let bits = (0..inputs.len())
            .map(|i| (combination >> i) & 1 == 1)
            .collect();
        Self {
            ids: inputs.to_vec(),
            bits,
        }
    }

    pub fn set(&mut self, id: NodeId, bit: bool) {
        match self.ids.binary_search(&id) {
            Ok(pos) => self.bits[pos] = bit,
            Err(pos) => {
                self.ids.insert(pos, id);
                self.bits.insert(pos, bit);
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<bool> {
        self.ids.binary_search(&id).ok().map(|pos| self.bits[pos])
    }

    /// Bound ids, ascending.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Bits in the order of [`ids`][Assignment::ids].
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(xs: &[u32]) -> Vec<NodeId> {
        xs.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn test_from_combination_lsb_first() {
        let inputs = ids(&[2, 5, 11]);
        let a = Assignment::from_combination(&inputs, 0b110);
        assert_eq!(a.bits(), &[false, true, true]);
        assert_eq!(a.get(NodeId::new(2)), Some(false));
        assert_eq!(a.get(NodeId::new(5)), Some(true));
        assert_eq!(a.get(NodeId::new(11)), Some(true));
        assert_eq!(a.get(NodeId::new(3)), None);
    }

    #[test]
    fn test_set_keeps_order() {
        let mut a = Assignment::new();
        a.set(NodeId::new(7), true);
        a.set(NodeId::new(1), false);
        a.set(NodeId::new(4), true);
        a.set(NodeId::new(1), true);
        assert_eq!(a.ids(), ids(&[1, 4, 7]).as_slice());
        assert_eq!(a.bits(), &[true, true, true]);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_all_combinations_distinct() {
        let inputs = ids(&[1, 2, 3]);
        let rows: Vec<Vec<bool>> = (0..8)
            .map(|c| Assignment::from_combination(&inputs, c).bits().to_vec())
            .collect();
        for (i, a) in rows.iter().enumerate() {
            for b in rows.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
