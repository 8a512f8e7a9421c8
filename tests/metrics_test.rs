//! Tests for subtree depth and node-count queries

mod common;

use std::collections::HashSet;

use rstest::{fixture, rstest};

use common::tree_from_edges;
use degree3::domain::{Degree3Graph, GraphError, Metric, SubtreeCache};

/// a[b, c, d], b[a, e, h], c[a, f, i], d[a, g]
#[fixture]
fn demo() -> Degree3Graph<&'static str> {
    tree_from_edges(
        "a",
        &[
            ("a", "b"),
            ("a", "c"),
            ("a", "d"),
            ("b", "e"),
            ("b", "h"),
            ("c", "f"),
            ("c", "i"),
            ("d", "g"),
        ],
    )
}

#[rstest]
#[case("a", 9, 3)]
#[case("g", 9, 5)]
#[case("e", 9, 5)]
fn given_no_exclusion_when_measuring_then_whole_component(
    demo: Degree3Graph<&'static str>,
    #[case] root: &'static str,
    #[case] count: usize,
    #[case] depth: usize,
) {
    let mut cache = SubtreeCache::new();
    assert_eq!(demo.count(&root, &mut HashSet::new(), &mut cache), Ok(count));

    let mut cache = SubtreeCache::new();
    assert_eq!(demo.depth(&root, &mut HashSet::new(), &mut cache), Ok(depth));
}

#[rstest]
#[case("b", 3, 2)]
#[case("c", 3, 2)]
#[case("d", 2, 2)]
fn given_parent_excluded_when_measuring_child_then_subtree_only(
    demo: Degree3Graph<&'static str>,
    #[case] child: &'static str,
    #[case] count: usize,
    #[case] depth: usize,
) {
    let mut visited = HashSet::from(["a"]);
    assert_eq!(
        demo.count(&child, &mut visited, &mut SubtreeCache::new()),
        Ok(count)
    );

    let mut visited = HashSet::from(["a"]);
    assert_eq!(
        demo.depth(&child, &mut visited, &mut SubtreeCache::new()),
        Ok(depth)
    );
}

#[rstest]
fn given_shared_cache_when_measuring_opposite_sides_then_both_contexts_kept(
    demo: Degree3Graph<&'static str>,
) {
    // Arrange
    let mut cache = SubtreeCache::new();

    // Act: the b side seen from a, then the a side seen from b
    let below = demo.count(&"b", &mut HashSet::from(["a"]), &mut cache);
    let above = demo.count(&"a", &mut HashSet::from(["b"]), &mut cache);
    let whole = demo.count(&"a", &mut HashSet::new(), &mut cache);

    // Assert
    assert_eq!(below, Ok(3));
    assert_eq!(above, Ok(6));
    assert_eq!(whole, Ok(9));
    assert_eq!(cache.get(Metric::Count, &"b", Some(&"a")), Some(3));
    assert_eq!(cache.get(Metric::Count, &"a", Some(&"b")), Some(6));
    assert_eq!(cache.get(Metric::Count, &"a", None), Some(9));
}

#[rstest]
fn given_cleared_cache_when_measuring_after_mutation_then_fresh_value(
    mut demo: Degree3Graph<&'static str>,
) {
    let mut cache = SubtreeCache::new();
    assert_eq!(demo.count(&"d", &mut HashSet::from(["a"]), &mut cache), Ok(2));

    demo.insert_balanced(Some(&"a"), "j").unwrap();
    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(demo.count(&"d", &mut HashSet::from(["a"]), &mut cache), Ok(3));
}

#[rstest]
fn given_root_already_visited_when_measuring_then_zero(demo: Degree3Graph<&'static str>) {
    let mut visited = HashSet::from(["b"]);
    assert_eq!(
        demo.count(&"b", &mut visited, &mut SubtreeCache::new()),
        Ok(0)
    );
}

#[rstest]
fn given_missing_root_when_measuring_then_not_found(demo: Degree3Graph<&'static str>) {
    let result = demo.depth(&"zz", &mut HashSet::new(), &mut SubtreeCache::new());
    assert!(matches!(result, Err(GraphError::NotFound(_))));
}

#[rstest]
fn given_component_size_when_tree_split_then_each_side_measured(
    mut demo: Degree3Graph<&'static str>,
) {
    // cut the a - c edge by hand
    demo.set_slot(&"a", 1, None).unwrap();
    demo.set_slot(&"c", 0, None).unwrap();

    assert_eq!(demo.component_size(&"a"), Ok(6));
    assert_eq!(demo.component_size(&"i"), Ok(3));
}

#[rstest]
fn given_distant_exclusion_when_sharing_cache_then_matches_fresh_queries(
    demo: Degree3Graph<&'static str>,
) {
    // Arrange: f sits below c, not next to a
    let mut shared = SubtreeCache::new();
    let narrowed = demo.count(&"a", &mut HashSet::from(["f"]), &mut shared);

    // Act
    let below_c = demo.count(&"c", &mut HashSet::from(["a"]), &mut shared);
    let whole = demo.count(&"a", &mut HashSet::new(), &mut shared);

    // Assert
    assert_eq!(narrowed, Ok(8));
    assert_eq!(below_c, Ok(3));
    assert_eq!(whole, Ok(9));
}
