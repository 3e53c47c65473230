use super::geometry::{orient, ring_self_intersects};
use super::types::Point;

/// Puts quadrilateral corners into drawing order.
///
/// The usual result is `[leftmost, lower middle, rightmost, upper middle]`,
/// counter-clockwise. When both middle corners fall on the same side of the
/// leftmost-rightmost line, those two extremes are neighbours rather than
/// opposite corners; the first non-self-intersecting cyclic order is used
/// instead, still counter-clockwise.
pub fn order_quadrilateral(vertices: [Point; 4]) -> [Point; 4] {
    let mut sorted = vertices;
    sorted.sort();
    let [first, m1, m2, last] = sorted;

    let s1 = orient(first, last, m1);
    let s2 = orient(first, last, m2);
    if s1 < 0.0 && s2 > 0.0 {
        return [first, m1, last, m2];
    }
    if s1 > 0.0 && s2 < 0.0 {
        return [first, m2, last, m1];
    }

    let ring = [
        [first, m1, m2, last],
        [first, m1, last, m2],
        [first, m2, m1, last],
    ]
    .into_iter()
    .find(|ring| !ring_self_intersects(ring))
    .unwrap_or([first, m1, last, m2]);
    counter_clockwise(ring)
}

fn counter_clockwise(ring: [Point; 4]) -> [Point; 4] {
    let area: f64 = (0..4)
        .map(|idx| {
            let (a, b) = (ring[idx], ring[(idx + 1) % 4]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    if area < 0.0 {
        [ring[0], ring[3], ring[2], ring[1]]
    } else {
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn diamond_goes_left_bottom_right_top() {
        let ordered = order_quadrilateral([p(1.0, 2.0), p(2.0, 1.0), p(0.0, 1.0), p(1.0, 0.0)]);
        assert_eq!(ordered, [p(0.0, 1.0), p(1.0, 0.0), p(2.0, 1.0), p(1.0, 2.0)]);
    }

    #[test]
    fn vertically_aligned_middles_are_split_by_side() {
        // Shape found between two layers of a 3-3 network.
        let ordered = order_quadrilateral([
            p(0.5, 2.0),
            p(1.0 / 3.0, 4.0 / 3.0),
            p(2.0 / 3.0, 4.0 / 3.0),
            p(0.5, 1.0),
        ]);
        assert_eq!(ordered[0], p(1.0 / 3.0, 4.0 / 3.0));
        assert_eq!(ordered[1], p(0.5, 1.0));
        assert_eq!(ordered[2], p(2.0 / 3.0, 4.0 / 3.0));
        assert_eq!(ordered[3], p(0.5, 2.0));
    }

    #[test]
    fn adjacent_extremes_fall_back_to_a_simple_ring() {
        // Leftmost and rightmost corners share the bottom side.
        let corners = [p(0.0, 0.0), p(1.0, 0.0), p(0.2, 1.0), p(0.8, 1.0)];
        let ordered = order_quadrilateral(corners);
        assert!(!ring_self_intersects(&ordered));
        assert_eq!(ordered[0], p(0.0, 0.0));
        assert_eq!(ordered, [p(0.0, 0.0), p(1.0, 0.0), p(0.8, 1.0), p(0.2, 1.0)]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn convex_quad() -> impl Strategy<Value = [Point; 4]> {
            (
                proptest::collection::btree_set(0u32..360, 4),
                -50.0f64..50.0,
                -50.0f64..50.0,
                1.0f64..20.0,
                1.0f64..20.0,
                0usize..24,
            )
                .prop_filter_map("corners too close", |(angles, cx, cy, rx, ry, shuffle)| {
                    let mut corners: Vec<Point> = angles
                        .iter()
                        .map(|&deg| {
                            let t = f64::from(deg).to_radians();
                            Point::new(cx + rx * t.cos(), cy + ry * t.sin())
                        })
                        .collect();
                    let angles: Vec<u32> = angles.into_iter().collect();
                    let gaps_ok = angles.windows(2).all(|w| w[1] - w[0] >= 5)
                        && 360 - angles[3] + angles[0] >= 5;
                    if !gaps_ok {
                        return None;
                    }
                    // Deterministic permutation of the input order.
                    let mut order: Vec<usize> = (0..4).collect();
                    let mut k = shuffle;
                    for i in (1..4).rev() {
                        order.swap(i, k % (i + 1));
                        k /= i + 1;
                    }
                    corners = order.iter().map(|&i| corners[i]).collect();
                    Some([corners[0], corners[1], corners[2], corners[3]])
                })
        }

        proptest! {
            #[test]
            fn convex_quads_never_self_intersect(corners in convex_quad()) {
                let ordered = order_quadrilateral(corners);
                prop_assert!(!ring_self_intersects(&ordered));
                let mut expected = corners.to_vec();
                expected.sort();
                let mut got = ordered.to_vec();
                got.sort();
                prop_assert_eq!(expected, got);
            }
        }
    }
}
