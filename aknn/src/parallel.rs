use crate::{
    config::SearchConfig,
    sequential::{Neighbour, SearchResult},
    storage::BbdTree,
    tree::Scalar,
    Result,
};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

impl<S: Scalar, const D: usize> BbdTree<S, D> {
    /// Returns the exact `k` nearest neighbours of every query, searching them in parallel.
    ///
    /// The results are in the order of the queries. The first failing query aborts the batch.
    #[inline]
    pub fn par_k_nearest<Q>(&self, queries: &[Q], k: usize) -> Result<Vec<Vec<Neighbour<S>>>>
    where
        Q: AsRef<[S]> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.k_nearest(query, k))
            .collect()
    }

    /// Searches the neighbours of every query with the same configuration, in parallel.
    #[inline]
    pub fn par_search<Q>(
        &self,
        queries: &[Q],
        config: &SearchConfig<S>,
    ) -> Result<Vec<SearchResult<S>>>
    where
        Q: AsRef<[S]> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.search(query, config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{BuildConfig, SearchConfig},
        queue::QueueKind,
        storage::{tests::random_points, BbdTree},
        Error,
    };

    #[test]
    fn matches_sequential() {
        let tree = BbdTree::from_coordinates(random_points::<3>(2_000, 1), BuildConfig::default())
            .unwrap();
        let queries = random_points::<3>(64, 2);

        let parallel = tree.par_k_nearest(&queries, 7).unwrap();
        for (query, found) in queries.iter().zip(&parallel) {
            assert_eq!(found, &tree.k_nearest(query, 7).unwrap());
        }

        let config = SearchConfig::new(4).with_queues(QueueKind::Std, QueueKind::Fixed);
        let results = tree.par_search(&queries, &config).unwrap();
        assert_eq!(results.len(), queries.len());
        assert!(results.iter().all(|r| r.complete && r.neighbours.len() == 4));
    }

    #[test]
    fn first_error_aborts() {
        let tree = BbdTree::from_coordinates(random_points::<2>(10, 3), BuildConfig::default())
            .unwrap();
        let queries = vec![vec![0.0, 0.0], vec![1.0]];

        assert_eq!(
            tree.par_k_nearest(&queries, 1),
            Err(Error::InvalidDimension {
                expected: 2,
                found: 1
            })
        );
    }
}
