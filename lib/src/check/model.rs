/// Reference model storing one value per key over the inclusive window `[min_key, max_key]`.
///
/// Keys outside the window always hold the base value.
#[derive(Debug, Clone)]
pub struct DenseModel<V> {
    min_key: i64,
    base_value: V,
    values: Vec<V>,
}

impl<V: Clone + PartialEq> DenseModel<V> {
    pub fn new(min_key: i64, max_key: i64, base_value: V) -> Self {
        let len = if max_key < min_key { 0 } else { (max_key - min_key) as usize + 1 };
        Self { min_key, values: vec![base_value.clone(); len], base_value }
    }

    fn index(&self, key: i64) -> Option<usize> {
        let offset = key.checked_sub(self.min_key)?;
        usize::try_from(offset).ok().filter(|&index| index < self.values.len())
    }

    pub fn assign(&mut self, begin: i64, end: i64, value: V) {
        let start = begin.max(self.min_key);
        let stop = end.min(self.min_key.saturating_add(self.values.len() as i64));
        for key in start..stop {
            self.values[(key - self.min_key) as usize] = value.clone();
        }
    }

    pub fn lookup(&self, key: i64) -> &V {
        self.index(key).map_or(&self.base_value, |index| &self.values[index])
    }

    /// Number of keys whose value differs from the key before it, including the return to the base
    /// value after the window.
    pub fn transitions(&self) -> usize {
        let mut count = 0;
        let mut previous = &self.base_value;
        for value in self.values.iter().chain(std::iter::once(&self.base_value)) {
            if value != previous {
                count += 1;
            }
            previous = value;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_model() {
        let mut model = DenseModel::new(0, 9, 'A');
        assert_eq!(model.transitions(), 0);

        model.assign(2, 5, 'B');
        model.assign(4, 20, 'C');
        assert_eq!(*model.lookup(1), 'A');
        assert_eq!(*model.lookup(3), 'B');
        assert_eq!(*model.lookup(9), 'C');
        assert_eq!(*model.lookup(10), 'A');
        assert_eq!(*model.lookup(-1), 'A');
        assert_eq!(model.transitions(), 3);
    }
}
