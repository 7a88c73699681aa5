use bytemuck::cast_slice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kdtree::{KDTree, KDTreeIndex, KDTreeRef};
use crate::Point;

fn make_tree(n: usize) -> (Vec<Point<f64, 3>>, KDTree<f64, 3>) {
    let mut rng = StdRng::seed_from_u64(11);
    let points: Vec<Point<f64, 3>> = (0..n)
        .map(|_| {
            Point::new([
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
            ])
        })
        .collect();
    let tree = KDTree::from_points(points.iter().copied());
    (points, tree)
}

#[test]
fn query_through_byte_buffers() {
    let (_, tree) = make_tree(2000);
    let (points, ids) = tree.clone().into_inner();

    // kd-sorted points survive a trip through raw bytes
    let bytes: &[u8] = cast_slice(&points);
    assert_eq!(bytes.len(), 2000 * 3 * 8);
    let restored: &[Point<f64, 3>] = cast_slice(bytes);

    let tree_ref = KDTreeRef::try_new(restored, &ids).unwrap();
    let query = Point::new([1.5, -2.5, 40.0]);
    assert_eq!(
        tree_ref.nearest_id(&query).unwrap(),
        tree.nearest_id(&query).unwrap()
    );
    assert_eq!(tree_ref.coords(), tree.coords());
}

#[test]
fn large_tree_matches_linear_scan() {
    // large enough to construct subtrees in parallel when rayon is enabled
    let (points, tree) = make_tree(20_000);
    crate::kdtree::check_kd_order(tree.points()).unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let query = Point::new([
            rng.gen_range(-120.0..120.0),
            rng.gen_range(-120.0..120.0),
            rng.gen_range(-120.0..120.0),
        ]);
        let expected = points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                query
                    .squared_distance(a)
                    .partial_cmp(&query.squared_distance(b))
                    .unwrap()
            })
            .map(|(i, _)| i as u32)
            .unwrap();
        assert_eq!(tree.nearest_id(&query).unwrap(), expected);
    }
}
