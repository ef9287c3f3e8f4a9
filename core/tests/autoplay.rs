use sapper_core::*;

fn generated_engine(config: GameConfig, seed: u64, start: Coord2) -> PlayEngine {
    PlayEngine::new(RandomLayoutGenerator::new(seed, start, StartTile::AlwaysZero).generate(config))
}

#[test]
fn generated_boards_play_to_the_end() {
    let config = GameConfig::new((9, 9), 10);
    let mut wins = 0;

    for seed in 0..25 {
        let mut engine = generated_engine(config, seed, (4, 4));
        engine.reveal((4, 4)).unwrap();
        let mut solver = Solver::default();

        let state = autoplay(&mut engine, &mut solver, |decision, outcome| {
            if decision.strategy.is_proven() {
                assert_ne!(outcome, RevealOutcome::HitMine, "seed {seed}: {decision:?}");
            }
        })
        .unwrap();

        assert!(state.is_finished());
        if state == EngineState::Won {
            wins += 1;
            assert_eq!(engine.visit_count(), 71);
        } else {
            assert!(engine.triggered_mine().is_some());
        }
    }

    // beginner boards opened on a zero are mostly solvable
    assert!(wins > 12, "only {wins} of 25 won");
}

#[test]
fn solver_is_reusable_across_games() {
    let config = GameConfig::new((8, 8), 8);
    let mut solver = Solver::default();

    for seed in 0..5 {
        let mut engine = generated_engine(config, seed, (0, 0));
        engine.reveal((0, 0)).unwrap();

        let state = autoplay(&mut engine, &mut solver, |_, _| {}).unwrap();

        assert!(state.is_finished());
        assert!(engine.step_count() >= 1);
    }
}

#[test]
fn every_step_is_counted() {
    let config = GameConfig::new((6, 6), 4);
    let mut engine = generated_engine(config, 11, (0, 0));
    let mut moves = 0;

    autoplay(&mut engine, &mut Solver::default(), |_, _| moves += 1).unwrap();

    assert_eq!(engine.step_count(), moves);
}

#[test]
fn trait_object_sessions_are_supported() {
    let layout = MineLayout::from_mine_coords((1, 3), &[(0, 2)]).unwrap();
    let mut engine = PlayEngine::new(layout);
    let session: &mut dyn Session = &mut engine;

    let state = autoplay(session, &mut Solver::default(), |_, _| {}).unwrap();

    // (0, 0) is a zero and floods into the 1, leaving only the mine
    assert_eq!(state, EngineState::Won);
}
