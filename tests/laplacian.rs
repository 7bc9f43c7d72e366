use gnnprep::{get_laplacian, norm, CooMatrix, EdgeIndex, LambdaMax, Normalization};
use proptest::prelude::*;

fn assert_close(got: &[f32], want: &[f32]) {
    assert_eq!(got.len(), want.len(), "got={got:?} want={want:?}");
    for (g, w) in got.iter().zip(want) {
        assert!((g - w).abs() < 1e-5, "got={got:?} want={want:?}");
    }
}

fn dense(edges: EdgeIndex, weights: Vec<f32>, n: usize) -> Vec<Vec<f32>> {
    CooMatrix::new(edges, weights, (n, n)).unwrap().to_dense()
}

fn example() -> (EdgeIndex, Vec<f32>) {
    (EdgeIndex::new(vec![1, 1, 2, 2], vec![0, 2, 0, 1]).unwrap(), vec![1.0, 2.0, 1.0, 2.0])
}

#[test]
fn symmetric_example() {
    let (e, w) = example();
    let (idx, weights) = get_laplacian(&e, Some(&w), Normalization::Symmetric, 3).unwrap();
    assert_eq!(idx.rows(), &[1, 1, 2, 2, 0, 1, 2]);
    assert_eq!(idx.cols(), &[0, 2, 0, 1, 0, 1, 2]);
    assert_close(&weights, &[-0.0, -2.0 / 3.0, -0.0, -2.0 / 3.0, 1.0, 1.0, 1.0]);
}

#[test]
fn unnormalized_example_puts_degree_on_the_diagonal() {
    let (e, w) = example();
    let (idx, weights) = get_laplacian(&e, Some(&w), Normalization::None, 3).unwrap();
    assert_eq!(idx.len(), 7);
    // Out-degrees: node 0 has none, nodes 1 and 2 have weight 3 each.
    assert_close(&weights, &[-1.0, -2.0, -1.0, -2.0, 0.0, 3.0, 3.0]);
}

#[test]
fn random_walk_example() {
    let (e, w) = example();
    let (_, weights) = get_laplacian(&e, Some(&w), Normalization::RandomWalk, 3).unwrap();
    assert_close(&weights, &[-1.0 / 3.0, -2.0 / 3.0, -1.0 / 3.0, -2.0 / 3.0, 1.0, 1.0, 1.0]);
}

#[test]
fn missing_weights_default_to_one() {
    let (e, _) = example();
    let (_, implicit) = get_laplacian(&e, None, Normalization::Symmetric, 3).unwrap();
    let (_, explicit) = get_laplacian(&e, Some(&[1.0; 4]), Normalization::Symmetric, 3).unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn bad_normalization_name_is_rejected_up_front() {
    for name in ["bad", "Sym", ""] {
        assert!(matches!(
            Normalization::parse(Some(name)),
            Err(gnnprep::Error::InvalidArgument(_))
        ));
        assert!(matches!(name.parse::<Normalization>(), Err(gnnprep::Error::InvalidArgument(_))));
    }
}

#[test]
fn isolated_nodes_only_get_the_diagonal() {
    let e = EdgeIndex::from_pairs(&[(0, 1), (1, 0)]);
    let (idx, weights) = get_laplacian(&e, None, Normalization::Symmetric, 4).unwrap();
    let d = dense(idx, weights, 4);
    assert_eq!(d[2], vec![0.0, 0.0, 1.0, 0.0]);
    assert_eq!(d[3], vec![0.0, 0.0, 0.0, 1.0]);
    assert!(d.iter().flatten().all(|x| x.is_finite()));
}

#[test]
fn scaled_laplacian_of_example_with_bound() {
    let (e, w) = example();
    let (_, scaled) = norm(&e, 3, Some(&w), Normalization::Symmetric, None, None).unwrap();
    // lambda_max = 2 * 1.0: L unchanged off the diagonal, diagonal 1 - 1.
    assert_close(&scaled, &[0.0, -2.0 / 3.0, 0.0, -2.0 / 3.0, 0.0, 0.0, 0.0]);

    let lambda = LambdaMax::Scalar(2.0 / 3.0);
    let (_, scaled) = norm(&e, 3, Some(&w), Normalization::Symmetric, Some(&lambda), None).unwrap();
    assert_close(&scaled, &[0.0, -2.0, 0.0, -2.0, 2.0, 2.0, 2.0]);
}

fn arb_weighted_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<f32>)> {
    (1usize..10).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0.1f32..5.0), 0..25).prop_map(move |es| {
            let pairs = es.iter().map(|&(r, c, _)| (r, c)).collect();
            let weights = es.iter().map(|&(_, _, w)| w).collect();
            (n, pairs, weights)
        })
    })
}

proptest! {
    // Property: D - A has zero row sums, whatever the graph.
    #[test]
    fn prop_unnormalized_rows_sum_to_zero((n, pairs, weights) in arb_weighted_graph()) {
        let e = EdgeIndex::from_pairs(&pairs);
        let (idx, w) = get_laplacian(&e, Some(&weights), Normalization::None, n).unwrap();
        prop_assert_eq!(idx.len(), w.len());
        for row in dense(idx, w, n) {
            let s: f32 = row.iter().sum();
            prop_assert!(s.abs() < 1e-3, "row sum {}", s);
        }
    }

    // Property: I - D^-1 A has zero row sums on nodes with out-edges, and identity rows
    // on nodes without.
    #[test]
    fn prop_random_walk_rows((n, pairs, weights) in arb_weighted_graph()) {
        let e = EdgeIndex::from_pairs(&pairs);
        let has_out: Vec<bool> = (0..n).map(|v| pairs.iter().any(|&(r, _)| r == v)).collect();
        let (idx, w) = get_laplacian(&e, Some(&weights), Normalization::RandomWalk, n).unwrap();
        for (v, row) in dense(idx, w, n).into_iter().enumerate() {
            let s: f32 = row.iter().sum();
            let want = if has_out[v] { 0.0 } else { 1.0 };
            prop_assert!((s - want).abs() < 1e-3, "node {} row sum {}", v, s);
        }
    }

    // Property: the symmetric Laplacian of a symmetrized graph is symmetric.
    #[test]
    fn prop_symmetric_normalization_is_symmetric((n, pairs, weights) in arb_weighted_graph()) {
        let mut both = pairs.clone();
        both.extend(pairs.iter().map(|&(r, c)| (c, r)));
        let mut both_w = weights.clone();
        both_w.extend_from_slice(&weights);

        let e = EdgeIndex::from_pairs(&both);
        let (idx, w) = get_laplacian(&e, Some(&both_w), Normalization::Symmetric, n).unwrap();
        let d = dense(idx, w, n);
        for r in 0..n {
            for c in 0..n {
                prop_assert!((d[r][c] - d[c][r]).abs() < 1e-4);
            }
        }
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_scaling_is_thread_count_invariant() {
    let n = 200;
    let pairs: Vec<(usize, usize)> =
        (0..n).flat_map(|i| [(i, (i + 1) % n), (i, (i * 7 + 3) % n)]).collect();
    let weights: Vec<f32> = (0..pairs.len()).map(|i| 1.0 + (i % 5) as f32).collect();
    let e = EdgeIndex::from_pairs(&pairs);

    let pool1 = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let pool4 = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();

    for normalization in [Normalization::Symmetric, Normalization::RandomWalk] {
        let a = pool1.install(|| get_laplacian(&e, Some(&weights), normalization, n).unwrap());
        let b = pool4.install(|| get_laplacian(&e, Some(&weights), normalization, n).unwrap());
        assert_eq!(a, b, "{normalization} output must be thread-count invariant");
    }
}
