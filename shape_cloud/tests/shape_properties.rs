//! Structural properties every generated cloud must satisfy, checked with
//! seeded generators so failures are reproducible.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shape_cloud::generate::sphere_angles;
use shape_cloud::{generate, generate_with, shape_part, ShapePart, Template};

fn rng(seed: u64) -> StdRng { StdRng::seed_from_u64(seed) }

fn count_parts(template: Template, count: usize, part: ShapePart) -> usize {
    (0..count).filter(|&i| shape_part(template, i, count) == part).count()
}

#[test]
fn saturn_partition_is_exact() {
    for count in [1usize, 7, 10, 333, 15_000] {
        let planet = count_parts(Template::Saturn, count, ShapePart::Planet);
        let ring = count_parts(Template::Saturn, count, ShapePart::Ring);
        assert_eq!(planet + ring, count);
        let expected = (count as f64 * 0.6).floor() as i64;
        assert!((planet as i64 - expected).abs() <= 1, "count={} planet={}", count, planet);
    }
}

#[test]
fn buddha_partition_is_exact_and_ordered() {
    for count in [3usize, 10, 101, 15_000] {
        let body = count_parts(Template::Buddha, count, ShapePart::Body);
        let legs = count_parts(Template::Buddha, count, ShapePart::Legs);
        let aura = count_parts(Template::Buddha, count, ShapePart::Aura);
        assert_eq!(body + legs + aura, count);
        assert!((body as i64 - (count as f64 * 0.3).floor() as i64).abs() <= 1);
        assert!((legs as i64 - (count as f64 * 0.4).floor() as i64).abs() <= 1);

        // Parts are contiguous index ranges in body → legs → aura order.
        let parts: Vec<ShapePart> = (0..count).map(|i| shape_part(Template::Buddha, i, count)).collect();
        for w in parts.windows(2) {
            let rank = |p: ShapePart| match p {
                ShapePart::Body => 0,
                ShapePart::Legs => 1,
                _ => 2,
            };
            assert!(rank(w[0]) <= rank(w[1]));
        }
    }
}

#[test]
fn flower_radius_is_monotonic_and_angles_step_by_golden_angle() {
    let count = 500;
    let cloud = generate_with(Template::Flower, count, &mut rng(1)).unwrap();
    let mut prev_r = -1.0f32;
    for i in 0..count {
        let p = cloud.point(i);
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        assert!(r + 1e-4 >= prev_r, "radius shrank at {}", i);
        prev_r = r;
    }
    for i in 1..count - 1 {
        let a = cloud.point(i);
        let b = cloud.point(i + 1);
        let da = (b[1].atan2(b[0]) - a[1].atan2(a[0])).to_degrees();
        let da = da.rem_euclid(360.0);
        assert_relative_eq!(da, 137.5, epsilon = 1e-2);
    }
}

#[test]
fn flower_of_four() {
    let cloud = generate_with(Template::Flower, 4, &mut rng(2)).unwrap();
    assert_eq!(cloud.point(0), [0.0, 0.0, 0.0]);
    let radii: Vec<f32> = cloud.iter().map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt()).collect();
    assert!(radii[1] > radii[0] && radii[2] > radii[1] && radii[3] > radii[2]);
    assert_relative_eq!(radii[1], 15.0 * 0.25f32.sqrt(), epsilon = 1e-4);
    assert_relative_eq!(radii[3], 15.0 * 0.75f32.sqrt(), epsilon = 1e-4);
}

#[test]
fn saturn_sphere_uses_low_discrepancy_angles() {
    let count = 200;
    let cloud = generate_with(Template::Saturn, count, &mut rng(3)).unwrap();
    for i in 0..count {
        if shape_part(Template::Saturn, i, count) != ShapePart::Planet {
            continue;
        }
        let (phi, _) = sphere_angles(i, count);
        let p = cloud.point(i);
        assert_relative_eq!(p[2], (10.0 * phi.cos()) as f32, epsilon = 1e-4);
    }
}

#[test]
fn fireworks_density_is_biased_toward_center() {
    let count = 4_000;
    let cloud = generate_with(Template::Fireworks, count, &mut rng(4)).unwrap();
    let median = 20.0 * 0.5f32.sqrt();
    let inner = cloud
        .iter()
        .filter(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt() <= median)
        .count();
    let share = inner as f32 / count as f32;
    // √u radii put half the points inside 20/√2; uniform volume would put ~35%.
    assert!((0.45..0.55).contains(&share), "inner share {}", share);
}

#[test]
fn regeneration_keeps_shape_properties() {
    for t in Template::ALL {
        let a = generate(t, 1_000).unwrap();
        let b = generate(t, 1_000).unwrap();
        assert_eq!(a.as_slice().len(), b.as_slice().len());
        let (ra, rb) = (a.bounding_radius(), b.bounding_radius());
        assert!(ra <= 30.0 && rb <= 30.0, "{}: {} / {}", t, ra, rb);
    }
}

#[test]
fn same_seed_same_cloud() {
    let a = generate_with(Template::Heart, 300, &mut rng(9)).unwrap();
    let b = generate_with(Template::Heart, 300, &mut rng(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn buddha_body_and_legs_stay_in_bounds() {
    for count in [1usize, 2, 3, 10, 1_000] {
        let cloud = generate_with(Template::Buddha, count, &mut rng(10 + count as u64)).unwrap();
        let mut prev_y = f32::NEG_INFINITY;
        for i in 0..count {
            let p = cloud.point(i);
            match shape_part(Template::Buddha, i, count) {
                ShapePart::Body => {
                    assert!(p[0].abs() <= 3.0 && p[2].abs() <= 2.0, "n={} body {:?}", count, p);
                    assert!(p[1] >= -5.0 && p[1] < 15.0, "n={} body y {}", count, p[1]);
                    assert!(p[1] >= prev_y, "n={} torso descended at {}", count, i);
                    prev_y = p[1];
                }
                ShapePart::Legs => {
                    let e = (p[0] / 12.0).powi(2) + (p[2] / 8.0).powi(2);
                    assert_relative_eq!(e, 1.0, epsilon = 1e-4);
                    assert!((-11.0..=-9.0).contains(&p[1]), "n={} legs y {}", count, p[1]);
                }
                ShapePart::Aura => {}
                other => panic!("unexpected part {:?}", other),
            }
        }
    }
}

#[test]
fn tiny_buddha_torso_sits_at_base() {
    // With one torso slot the column collapses to its bottom.
    for count in 1usize..=3 {
        let cloud = generate_with(Template::Buddha, count, &mut rng(20)).unwrap();
        assert_eq!(shape_part(Template::Buddha, 0, count), ShapePart::Body);
        assert_eq!(cloud.point(0)[1], -5.0);
    }
}

#[test]
fn tall_buddha_torso_spans_column() {
    let count = 1_000;
    let cloud = generate_with(Template::Buddha, count, &mut rng(21)).unwrap();
    let ys: Vec<f32> = (0..count)
        .filter(|&i| shape_part(Template::Buddha, i, count) == ShapePart::Body)
        .map(|i| cloud.point(i)[1])
        .collect();
    assert_eq!(ys[0], -5.0);
    assert!(*ys.last().unwrap() > 14.5, "top of torso {}", ys.last().unwrap());
}

#[test]
fn flower_stays_within_radius_fifteen() {
    for count in [1usize, 4, 1_000] {
        let cloud = generate_with(Template::Flower, count, &mut rng(30)).unwrap();
        for p in cloud.iter() {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!(r <= 15.0 + 1e-4, "n={} r={}", count, r);
            assert!(p[2].abs() <= 2.0 + 1e-6);
        }
    }
}
