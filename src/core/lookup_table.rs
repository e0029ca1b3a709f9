use iter_num_tools::lin_space;
use more_asserts::assert_gt;

/**
 * Precomputed table mapping a scalar query on a fixed domain to data of an
 * arbitrary type. Queries snap to the nearest table entry; out-of-domain
 * queries clamp to the end entries. Used to make color-map evaluation cheap
 * inside the per-pixel loops.
 */
pub struct LookupTable<T> {
    table_entries: Vec<T>,
    query_offset: f32,
    query_to_index_scale: f32,
}

impl<T> LookupTable<T> {
    pub fn new<F>(query_domain: [f32; 2], entry_count: usize, query_to_data: F) -> LookupTable<T>
    where
        F: Fn(f32) -> T,
    {
        assert_gt!(entry_count, 1);
        assert_gt!(query_domain[1], query_domain[0]);

        let table_entries: Vec<T> = lin_space(query_domain[0]..=query_domain[1], entry_count)
            .map(query_to_data)
            .collect();

        LookupTable {
            table_entries,
            query_offset: query_domain[0],
            query_to_index_scale: ((entry_count - 1) as f32)
                / (query_domain[1] - query_domain[0]),
        }
    }

    pub fn lookup(&self, query: f32) -> &T {
        let index = ((query - self.query_offset) * self.query_to_index_scale).round();
        // A NaN query falls through `max` to index zero.
        let index = (index.max(0.0) as usize).min(self.table_entries.len() - 1);
        &self.table_entries[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table_snaps_to_nearest_entry() {
        let table = LookupTable::new([0.0, 1.0], 5, |query| (query * 4.0).round() as i32);

        assert_eq!(*table.lookup(0.0), 0);
        assert_eq!(*table.lookup(0.26), 1);
        assert_eq!(*table.lookup(0.5), 2);
        assert_eq!(*table.lookup(1.0), 4);
    }

    #[test]
    fn test_lookup_table_clamps_out_of_domain_queries() {
        let table = LookupTable::new([0.0, 2.0], 3, |query| query);

        assert_eq!(*table.lookup(-5.0), 0.0);
        assert_eq!(*table.lookup(5.0), 2.0);
    }

    #[test]
    fn test_lookup_table_shifted_domain() {
        let table = LookupTable::new([10.0, 20.0], 11, |query| query as i32);

        assert_eq!(*table.lookup(10.0), 10);
        assert_eq!(*table.lookup(15.2), 15);
        assert_eq!(*table.lookup(20.0), 20);
    }
}
