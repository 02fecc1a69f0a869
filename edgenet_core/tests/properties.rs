//! Property-based tests using proptest
//!
//! Invariants of the node state machine, net pruning, selection and
//! rejection sampling that must hold for any image and any seed.

use edgenet_core::{
    select, Evolution, EvolutionConfig, EvolutionError, Heading, Limits, Net, NetId, NetParams,
    Node, NodeState, OccupiedRanges, RandomSource,
};
use edgenet_env::{Coordinate, GrayImage, PixelSource};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn image_strategy() -> impl Strategy<Value = GrayImage> {
    (1u32..12, 1u32..12).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<u8>(), (width * height) as usize).prop_map(move |pixels| {
            GrayImage::from_raw(width, height, pixels).expect("length matches dimensions")
        })
    })
}

fn heading_strategy() -> impl Strategy<Value = Heading> {
    prop_oneof![Just(Heading::Up), Just(Heading::Down)]
}

fn spans_strategy() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((0i32..50, 0i32..8), 0..8)
        .prop_map(|spans| spans.into_iter().map(|(top, len)| (top, top + len)).collect())
}

fn occupied(spans: &[(i32, i32)]) -> OccupiedRanges {
    spans
        .iter()
        .enumerate()
        .map(|(i, &(top, bottom))| (NetId(100 + i as u64), Limits::new(top, bottom)))
        .collect()
}

/// Net whose fitness is `ready - blocked` (flat chain, no dispersion bonus).
fn scored_net(id: u64, ready: usize, blocked: usize) -> Net {
    let mut nodes = vec![Node::new(Coordinate::new(0, 0), 90.0)];
    for i in 0..ready {
        nodes.push(Node::with_state(Coordinate::new(1 + i as i32, 0), 90.0, NodeState::Ready));
    }
    for i in 0..blocked {
        let x = (1 + ready + i) as i32;
        nodes.push(Node::with_state(Coordinate::new(x, 0), 90.0, NodeState::Blocked));
    }
    Net::from_nodes(NetId(id), nodes, Heading::Up, 10, 0)
}

// ============================================================================
// Node and net invariants
// ============================================================================

proptest! {
    // Property: after a step a node is inside the image or marked waste
    #[test]
    fn test_step_leaves_node_in_bounds_or_waste(
        image in image_strategy(),
        x in -2i32..14,
        y in -2i32..14,
        heading in heading_strategy(),
        resistance in 0i32..256,
        spans in spans_strategy(),
    ) {
        let mut node = Node::new(Coordinate::new(x, y), heading.degrees());
        let ranges = occupied(&spans);
        for _ in 0..3 {
            let state = node.step(&image, &ranges, NetId(0), resistance);
            let p = node.position();
            prop_assert!(
                state == NodeState::Waste || image.contains(p.x, p.y),
                "node at {} in state {:?}", p, state
            );
            if state == NodeState::Waste {
                break;
            }
        }
    }

    // Property: chains only shrink, and never contain waste after a tick
    #[test]
    fn test_chain_length_non_increasing(
        image in image_strategy(),
        row in 0i32..12,
        node_count in 0usize..10,
        step in 1i32..4,
        heading in heading_strategy(),
        resistance in 0i32..256,
    ) {
        let mut net = Net::new(NetId(0), NetParams {
            row,
            node_count,
            horizontal_step: step,
            heading,
            resistance,
            dispersion_allowed: 2,
        });
        let ranges = OccupiedRanges::new();
        let mut previous = net.len();
        for _ in 0..15 {
            net.run(&image, &ranges);
            prop_assert!(net.len() <= previous);
            prop_assert!(net.nodes().iter().all(|n| n.state() != NodeState::Waste));
            previous = net.len();
        }
        if net.is_empty() {
            prop_assert_eq!(net.limits(), None);
        }
    }

    // Property: selection keeps only non-negative nets at or above the bound
    #[test]
    fn test_selection_respects_bound(
        scores in prop::collection::vec((0usize..12, 0usize..12), 0..20),
        rate in 0.0f64..=1.0,
    ) {
        let nets: Vec<Net> = scores
            .iter()
            .enumerate()
            .map(|(i, &(ready, blocked))| scored_net(i as u64, ready, blocked))
            .collect();
        let total = nets.len();
        let selection = select(nets, rate);

        prop_assert_eq!(selection.survivors.len() + selection.discarded, total);
        for net in &selection.survivors {
            prop_assert!(net.fitness() >= 0);
            prop_assert!(net.fitness() >= selection.lower_bound.unwrap());
        }
        let best = scores.iter().map(|&(r, b)| r as i32 - b as i32).max();
        if let Some(best) = best.filter(|best| *best >= 0) {
            prop_assert_eq!(selection.survivors.last().map(Net::fitness), Some(best));
        }
    }
}

// ============================================================================
// Sampling and determinism
// ============================================================================

proptest! {
    // Property: excluding draws land outside every range, or fail when
    // the whole domain is claimed
    #[test]
    fn test_sampling_terminates(seed in any::<u64>(), spans in spans_strategy(), upper in 0i32..50) {
        let ranges = occupied(&spans);
        let mut rng = RandomSource::new(seed);
        match rng.uniform_excluding(0, upper, &ranges) {
            Ok(value) => {
                prop_assert!((0..=upper).contains(&value));
                prop_assert!(!ranges.contains(value));
            }
            Err(EvolutionError::SamplingExhausted { .. }) => {
                prop_assert!(ranges.covers(0, upper));
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // Property: same seed, image and config give identical outcomes
    #[test]
    fn test_runs_are_deterministic(seed in any::<u64>(), image in image_strategy()) {
        let config = EvolutionConfig::default().with_seed(seed).with_generations(3);
        let a = Evolution::new(&image, config.clone()).and_then(|mut e| e.run());
        let b = Evolution::new(&image, config).and_then(|mut e| e.run());
        prop_assert_eq!(a, b);
    }
}
