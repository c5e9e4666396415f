use area_tree::{AreaError, AreaList, Partition, PartitionConfig, PartitionNode, PointSet};
use proptest::prelude::*;

const FIELD: f64 = 100.0;

fn point_rows(dimensions: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    // Coarse grid values so duplicate coordinates show up regularly, plus
    // the field faces themselves
    let coord = prop_oneof![
        4 => (-FIELD..FIELD),
        4 => (-10i32..10).prop_map(|v| f64::from(v) * 5.0),
        1 => Just(-FIELD),
        1 => Just(FIELD),
    ];
    proptest::collection::vec(proptest::collection::vec(coord, dimensions), 0..60)
}

fn case() -> impl Strategy<Value = (usize, Vec<Vec<f64>>, PartitionConfig)> {
    (1usize..=4)
        .prop_flat_map(|dimensions| (Just(dimensions), point_rows(dimensions), 0usize..10, 0usize..4))
        .prop_map(|(dimensions, rows, max_prefix_len, min_points)| {
            let config = PartitionConfig::new()
                .with_max_prefix_len(max_prefix_len)
                .with_min_points_per_leaf(min_points)
                .with_field_size(FIELD);
            (dimensions, rows, config)
        })
}

fn build(dimensions: usize, rows: &[Vec<f64>], config: &PartitionConfig) -> Partition {
    let points = PointSet::from_rows(dimensions, rows).expect("rows match dimensionality");
    Partition::build(points, config).expect("valid configuration")
}

proptest! {
    #[test]
    fn points_beyond_the_field_are_rejected(
        (dimensions, mut rows, config) in case(),
        pick in any::<prop::sample::Index>(),
        dim in any::<prop::sample::Index>(),
        sign in prop_oneof![Just(-1.0), Just(1.0)],
    ) {
        prop_assume!(!rows.is_empty());
        let index = pick.index(rows.len());
        rows[index][dim.index(dimensions)] = sign * FIELD * 1.5;

        let points = PointSet::from_rows(dimensions, &rows).expect("rows match dimensionality");
        let err = Partition::build(points, &config).unwrap_err();
        // Every other generated coordinate lies inside the field
        prop_assert!(
            matches!(err, AreaError::PointOutsideField { index: found, .. } if found == index),
            "expected PointOutsideField at index {}, got {:?}", index, err
        );
    }

    #[test]
    fn leaves_tile_the_root_box((dimensions, rows, config) in case()) {
        let partition = build(dimensions, &rows, &config);
        let leaves: Vec<&PartitionNode> = partition.leaves().collect();

        let root_volume = partition.bounds().volume();
        let leaf_volume: f64 = leaves.iter().map(|l| l.bounds().volume()).sum();
        prop_assert!(
            (root_volume - leaf_volume).abs() <= root_volume * 1e-9,
            "leaf volumes {} do not add up to root volume {}",
            leaf_volume,
            root_volume
        );

        for (i, a) in leaves.iter().enumerate() {
            for b in &leaves[i + 1..] {
                prop_assert_eq!(a.bounds().overlap_volume(b.bounds()), 0.0);
            }
        }
    }

    #[test]
    fn nodes_respect_structure((dimensions, rows, config) in case()) {
        let partition = build(dimensions, &rows, &config);

        for node in partition.nodes() {
            prop_assert_eq!(node.prefix().len(), node.depth());
            prop_assert!(node.depth() <= config.max_prefix_len);

            match node.children() {
                Some(children) => {
                    prop_assert!(node.points().is_none());
                    let lower = partition.node(children.lower);
                    let upper = partition.node(children.upper);
                    prop_assert_eq!(lower.prefix(), format!("{}0", node.prefix()));
                    prop_assert_eq!(upper.prefix(), format!("{}1", node.prefix()));
                    prop_assert_eq!(children.split.dim, node.depth() % dimensions);
                    prop_assert_eq!(
                        lower.bounds(),
                        &node.bounds().clamp_upper(children.split.dim, children.split.coord)
                    );
                    prop_assert_eq!(
                        upper.bounds(),
                        &node.bounds().clamp_lower(children.split.dim, children.split.coord)
                    );
                }
                None => {
                    if let Some(points) = node.points() {
                        prop_assert!(points.iter().all(|p| node.bounds().contains(p.as_slice())));
                        if node.depth() < config.max_prefix_len {
                            prop_assert!(points.len() < 2);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn build_is_deterministic((dimensions, rows, config) in case()) {
        let first = build(dimensions, &rows, &config);
        let second = build(dimensions, &rows, &config);

        prop_assert_eq!(first.areas(), second.areas());
        prop_assert_eq!(first.stats(), second.stats());
    }

    #[test]
    fn area_list_round_trips((dimensions, rows, config) in case()) {
        let areas = build(dimensions, &rows, &config).areas();
        let parsed = AreaList::from_xml(&areas.to_xml()).expect("exported list parses");

        prop_assert_eq!(parsed, areas);
    }

    #[test]
    fn tree_lookup_matches_area_list((dimensions, rows, config) in case()) {
        let partition = build(dimensions, &rows, &config);
        let areas = partition.areas();

        for row in &rows {
            let leaf = partition.locate(row).expect("input point lies in the field");
            prop_assert_eq!(Some(leaf.prefix()), areas.prefix_for(row));
        }
    }
}
