//! End-to-end game scenarios driven through the public API.

use std::time::Duration;

use blastgrid_core::{Coordinate, Shape, ShapeCatalog};
use blastgrid_game::{
    DropOutcome, Game, GameConfig, GameEvent, KeyValueStore as _, MemoryStore,
    store::{BOARD_KEY, HIGH_SCORE_KEY},
};
use blastgrid_generator::{BlockId, SpawnSeed};
use blastgrid_solver::{any_placeable, valid_origins};
use proptest::prelude::*;

const SETTLE: Duration = Duration::from_millis(150);

fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

fn bars() -> ShapeCatalog {
    ShapeCatalog::new(vec![Shape::new((0..4).map(|x| c(x, 0)))]).unwrap()
}

fn bar_game(config: GameConfig) -> Game {
    Game::with_catalog(
        config,
        bars(),
        SpawnSeed::from_phrase("scenarios"),
        MemoryStore::new(),
    )
    .unwrap()
}

fn immediate() -> GameConfig {
    GameConfig {
        settle_delay: Duration::ZERO,
        ..GameConfig::default()
    }
}

fn next_block(game: &Game) -> BlockId {
    game.tray().blocks()[0].id
}

fn drop_bar(game: &mut Game, origin: Coordinate) -> DropOutcome {
    let id = next_block(game);
    game.drop_block_at(id, origin).unwrap()
}

#[test]
fn test_row_clear_end_to_end() {
    let mut game = bar_game(GameConfig::default());
    game.drain_events();

    drop_bar(&mut game, c(0, 0));
    let id = next_block(&game);
    let cells: Vec<_> = (4..8).map(|x| c(x, 0)).collect();

    let preview = game.preview(id, &cells).unwrap();
    assert!(preview.placeable);
    assert_eq!(preview.will_clear.rows(), &[0]);
    assert_eq!(preview.will_clear.len(), 8);

    let DropOutcome::Placed { will_clear, .. } = game.drop_block(id, &cells).unwrap() else {
        panic!("drop was rejected");
    };
    assert_eq!(will_clear, preview.will_clear);

    // Committed but not yet cleared.
    assert_eq!(game.grid().occupied_count(), 8);
    assert_eq!(game.score(), 8);
    game.tick(SETTLE - Duration::from_millis(1));
    assert_eq!(game.grid().occupied_count(), 8);

    game.tick(Duration::from_millis(1));
    assert_eq!(game.grid().occupied_count(), 0);
    assert_eq!(game.score(), 4 + 4 + 8);
    assert_eq!(game.combo().multiplier(), 2);

    let events = game.drain_events();
    let cleared: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::LinesCleared { cells, count } => Some((cells.len(), *count)),
            _ => None,
        })
        .collect();
    assert_eq!(cleared, vec![(8, 1)]);
    assert_eq!(
        events.last(),
        Some(&GameEvent::ScoreChanged {
            score: 16,
            high_score: 16
        })
    );
}

#[test]
fn test_combo_multiplies_consecutive_clears() {
    let mut game = bar_game(immediate());
    let mut gains = Vec::new();
    for y in 0..3 {
        drop_bar(&mut game, c(0, y));
        let before = game.score();
        drop_bar(&mut game, c(4, y));
        gains.push(game.score() - before - 4);
    }
    assert_eq!(gains, vec![8, 16, 24]);
    assert_eq!(game.combo().multiplier(), 4);
}

#[test]
fn test_combo_resets_on_fourth_placement_without_clear() {
    let mut game = bar_game(immediate());
    drop_bar(&mut game, c(0, 0));
    drop_bar(&mut game, c(4, 0));
    assert_eq!(game.combo().multiplier(), 2);

    for y in 1..4 {
        drop_bar(&mut game, c(0, y));
    }
    assert_eq!(game.combo().multiplier(), 2);
    assert_eq!(game.combo().consecutive_non_clears(), 3);

    drop_bar(&mut game, c(0, 4));
    assert_eq!(game.combo().multiplier(), 1);
    assert_eq!(game.combo().consecutive_non_clears(), 0);

    let before = game.score();
    drop_bar(&mut game, c(4, 4));
    assert_eq!(game.score() - before, 4 + 8);
}

#[test]
fn test_new_game_discards_pending_clear() {
    let mut game = bar_game(GameConfig::default());
    drop_bar(&mut game, c(0, 0));
    drop_bar(&mut game, c(4, 0));
    assert!(game.has_pending_settle());

    game.new_game();
    game.tick(SETTLE);
    assert_eq!(game.score(), 0);
    assert_eq!(game.combo().multiplier(), 1);
    assert_eq!(game.grid().occupied_count(), 0);
    assert_eq!(game.high_score(), 8);
}

#[test]
fn test_board_and_high_score_survive_restart() {
    let mut game = bar_game(GameConfig::default());
    drop_bar(&mut game, c(2, 5));
    game.tick(SETTLE);
    let grid = game.grid().clone();
    let store = game.into_store();
    assert!(store.get(BOARD_KEY).unwrap().contains("placedCells"));
    assert_eq!(store.get(HIGH_SCORE_KEY).as_deref(), Some("4"));

    let restored = Game::with_catalog(
        GameConfig::default(),
        bars(),
        SpawnSeed::from_phrase("another"),
        store,
    )
    .unwrap();
    assert_eq!(restored.grid(), &grid);
    assert_eq!(restored.high_score(), 4);
    assert_eq!(restored.score(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let play = || {
        let seed = SpawnSeed::from_phrase("replay");
        let mut game = Game::new(immediate(), seed, MemoryStore::new()).unwrap();
        let mut trace = Vec::new();
        for _ in 0..20 {
            let Some(block) = game.tray().blocks().first().copied() else {
                break;
            };
            let shape = &game.catalog()[block.shape];
            let Some(origin) = valid_origins(game.grid(), shape).next() else {
                break;
            };
            trace.push((block.shape, origin));
            game.drop_block_at(block.id, origin).unwrap();
            if game.is_game_over() {
                break;
            }
        }
        (trace, game.score())
    };
    assert_eq!(play(), play());
}

proptest! {
    #[test]
    fn prop_random_play_keeps_invariants(
        seed in any::<[u8; 32]>(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..60),
    ) {
        let mut game = Game::new(immediate(), SpawnSeed::from_bytes(seed), MemoryStore::new()).unwrap();
        let mut last_score = 0;
        for (block_pick, origin_pick) in picks {
            if game.is_game_over() {
                let shapes = game.tray().shapes(game.catalog());
                prop_assert!(!any_placeable(game.grid(), shapes));
                break;
            }
            let block = *block_pick.get(game.tray().blocks());
            let shape = &game.catalog()[block.shape];
            let origins: Vec<_> = valid_origins(game.grid(), shape).collect();
            if origins.is_empty() {
                continue;
            }
            let origin = *origin_pick.get(&origins);
            let cell_count = shape.len();
            let outcome = game.drop_block_at(block.id, origin).unwrap();
            prop_assert!(outcome.is_placed());
            prop_assert!(game.score() >= last_score + cell_count as u64);
            prop_assert!(game.high_score() >= game.score());
            prop_assert!(!game.has_pending_settle());
            last_score = game.score();
        }
    }
}
