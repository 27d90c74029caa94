//! Property tests over generated star topologies
//!
//! Uniform star topologies have closed-form costs, which lets these tests
//! check the engine against arithmetic rather than against itself.

use florch_cost::{reconfiguration_cost, round_cost, ClientExclusions, CostModel};
use integration_tests::test_fixtures::{
    CLIENT_ENERGY, CLIENT_LINK, GA_ENERGY, LA_ENERGY, LA_LINK,
};
use integration_tests::{star_registry, star_topology, StarShape};
use proptest::prelude::*;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

fn shapes() -> impl Strategy<Value = StarShape> {
    (1usize..6, 0usize..8, 0u32..6, 0u32..6).prop_map(
        |(local_aggregators, clients_per_aggregator, local_rounds, epochs)| StarShape {
            local_aggregators,
            clients_per_aggregator,
            local_rounds,
            epochs,
        },
    )
}

proptest! {
    #[test]
    fn communication_round_matches_closed_form(shape in shapes(), model_size in 0.01f64..1000.0) {
        let cost = round_cost(
            &star_topology(shape, 0),
            &star_registry(shape),
            model_size,
            CostModel::Communication,
            &ClientExclusions::new(),
        ).unwrap();

        let uploads = f64::from(shape.local_rounds.max(1));
        let expected = shape.local_aggregators as f64 * LA_LINK * model_size
            + shape.clients() as f64 * uploads * CLIENT_LINK * model_size;
        prop_assert!(close(cost, expected), "cost={} expected={}", cost, expected);
    }

    #[test]
    fn energy_round_matches_closed_form(shape in shapes()) {
        let cost = round_cost(
            &star_topology(shape, 0),
            &star_registry(shape),
            1.0,
            CostModel::Energy,
            &ClientExclusions::new(),
        ).unwrap();

        let rounds = f64::from(shape.local_rounds);
        let expected = GA_ENERGY
            + shape.local_aggregators as f64 * LA_ENERGY * rounds
            + shape.clients() as f64 * CLIENT_ENERGY * f64::from(shape.epochs) * rounds;
        prop_assert!(close(cost, expected), "cost={} expected={}", cost, expected);
    }

    #[test]
    fn excluding_all_clients_removes_client_term(shape in shapes()) {
        let excluded: ClientExclusions = (0..shape.clients()).map(|i| format!("N{i}")).collect();
        let cost = round_cost(
            &star_topology(shape, 0),
            &star_registry(shape),
            1.0,
            CostModel::Energy,
            &excluded,
        ).unwrap();

        let expected = GA_ENERGY
            + shape.local_aggregators as f64 * LA_ENERGY * f64::from(shape.local_rounds);
        prop_assert!(close(cost, expected), "cost={} expected={}", cost, expected);
    }

    #[test]
    fn rotation_reassigns_every_client(
        shape in shapes(),
        rotation in 0usize..6,
        model_size in 0.01f64..1000.0,
    ) {
        let nodes = star_registry(shape);
        let cost = reconfiguration_cost(
            &star_topology(shape, 0),
            &star_topology(shape, rotation),
            &nodes,
            model_size,
            CostModel::Communication,
        ).unwrap();

        let moved = if rotation % shape.local_aggregators == 0 { 0 } else { shape.clients() };
        let expected = moved as f64 * CLIENT_LINK / 2.0 * model_size;
        prop_assert!(close(cost, expected), "cost={} expected={}", cost, expected);
    }

    #[test]
    fn fresh_deployment_charges_every_client(shape in shapes(), model_size in 0.01f64..1000.0) {
        let empty = star_topology(StarShape { clients_per_aggregator: 0, ..shape }, 0);
        let cost = reconfiguration_cost(
            &empty,
            &star_topology(shape, 0),
            &star_registry(shape),
            model_size,
            CostModel::Communication,
        ).unwrap();

        let expected = shape.clients() as f64 * CLIENT_LINK / 2.0 * model_size;
        prop_assert!(close(cost, expected), "cost={} expected={}", cost, expected);
    }
}
