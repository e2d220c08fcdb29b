//! Integration tests for HEXSTACK
//!
//! Tests the full stack: configuration, game setup, random play, backups,
//! replay and symmetry-aware comparison of boards.

use hexstack_core::{
    render_board, Backup, BackupError, Board, BoardError, DigestFormat, Game, GameConfig, Hex, Move,
    RandomPlayer, RenderOptions, Tile,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn test_config() -> GameConfig {
    GameConfig::default()
        .with_players(["red", "blue", "green"])
        .with_tiles_per_player(7)
        .with_radius(4)
        .with_seed(2024)
}

fn finished_game(seed: u64) -> Game {
    let config = test_config();
    let mut game = Game::setup(&config, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
    let mut player = RandomPlayer::new(seed);
    assert!(player.play_game(&mut game, config.max_turns).unwrap());
    game
}

// ============================================================================
// GAME FLOW
// ============================================================================

#[test]
fn test_two_player_scenario() {
    let mut board = Board::new(["A", "B"]);
    board.place_tile(Hex::new(0, 0), "A", 1).unwrap();
    board.place_tile(Hex::new(1, 0), "B", 1).unwrap();

    let moves = board.legal_moves("A");
    assert_eq!(moves, vec![Move::new(0, 0, 1, 0)]);

    board.apply_move(&moves[0]).unwrap();
    assert_eq!(board.get(Hex::new(1, 0)), Some(&Tile::new("A", 2)));
    assert!(board.get(Hex::new(0, 0)).is_none());
    assert_eq!(board.gains()["A"], 2);
    assert_eq!(board.gains()["B"], 0);
    assert_eq!(board.winners(), vec!["A".to_string()]);
}

#[test]
fn test_out_of_range_placement_and_empty_queries() {
    let mut board = Board::new(["A"]);
    assert!(matches!(
        board.place_tile(Hex::new(100, 0), "A", 1),
        Err(BoardError::InvalidPlacement { .. })
    ));
    assert_eq!(board.min_max_heights(), Err(BoardError::EmptyBoard));
}

#[test]
fn test_random_games_end_with_conserved_height() {
    for seed in 0..5 {
        let game = finished_game(seed);
        assert!(game.is_over());
        let total: i64 = game.gains().values().sum();
        assert_eq!(total, 21);
        let best = game.gains().values().copied().max().unwrap();
        for winner in game.winners() {
            assert_eq!(game.gains()[&winner], best);
        }
        // every move removes one tile
        let steps = game.history().iter().filter(|(_, mv)| !mv.is_null()).count();
        assert_eq!(game.board().len(), 21 - steps);
    }
}

#[test]
fn test_turn_order_cycles_through_roster() {
    let game = finished_game(9);
    let roster = game.board().players().to_vec();
    for (i, (player, _)) in game.history().iter().enumerate() {
        assert_eq!(player, &roster[i % roster.len()]);
    }
}

// ============================================================================
// BACKUPS
// ============================================================================

#[test]
fn test_backup_file_round_trip() {
    let game = finished_game(3);
    let path = std::env::temp_dir().join(format!("hexstack-backup-{}.ini", std::process::id()));
    Backup::from_game(&game).save(&path).unwrap();
    let loaded = Backup::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let replayed = loaded.replay().unwrap();
    assert_eq!(replayed.board(), game.board());
    assert_eq!(replayed.winners(), game.winners());
    assert_eq!(
        replayed.board().essential_digest(),
        game.board().essential_digest()
    );
}

#[test]
fn test_tampered_backup_is_rejected() {
    let game = finished_game(4);
    let mut backup = Backup::from_game(&game);
    let first_step = backup
        .moves
        .iter()
        .position(|(_, mv)| !mv.is_null())
        .unwrap();
    backup.moves[first_step].1 = Move::new(40, 40, 41, 40);
    assert!(backup.replay().is_err());
}

#[test]
fn test_step_replay_follows_recorded_players() {
    let game = finished_game(5);
    let backup = Backup::from_game(&game);
    let mut visited = Vec::new();
    let replayed = backup
        .replay_with(|index, g| visited.push(g.history()[index].0.clone()))
        .unwrap();
    let recorded: Vec<String> = game.history().iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(visited, recorded);
    assert_eq!(replayed.board(), game.board());

    let mut swapped = backup.clone();
    let roster = swapped.players.clone();
    swapped.moves[0].0 = roster[1].clone();
    assert!(matches!(
        swapped.replay_with(|_, _| {}),
        Err(BackupError::OutOfTurn { index: 0, .. })
    ));
}

// ============================================================================
// SYMMETRY
// ============================================================================

#[test]
fn test_rotated_initial_board_compares_equal() {
    let game = finished_game(6);
    let board = game.initial_board();
    let mut turned = board.clone();
    turned.rotate60();
    assert!(board.compare_after_normalization(board));
    assert!(board.compare_after_normalization(&turned));
    assert!(turned.compare_after_normalization(board));
    assert!(board.digest_equivalent(&turned));
    for _ in 0..5 {
        turned.rotate60();
    }
    assert_eq!(&turned, board);
}

#[test]
fn test_normalized_digest_ignores_player_names() {
    let mut a = Board::new(["north", "south"]);
    let mut b = Board::new(["east", "west"]);
    for (board, first, second) in [(&mut a, "north", "south"), (&mut b, "east", "west")] {
        board.place_tile(Hex::new(0, 0), first, 2).unwrap();
        board.place_tile(Hex::new(0, 1), second, 3).unwrap();
        board.place_tile(Hex::new(1, 1), first, 4).unwrap();
    }
    assert_ne!(a.essential_digest(), b.essential_digest());
    assert_eq!(
        a.normalized().essential_digest_as(DigestFormat::Hex),
        b.normalized().essential_digest_as(DigestFormat::Hex)
    );
    assert!(a.compare_after_normalization(&b));
}

#[test]
fn test_islands_partition_the_board() {
    let game = finished_game(8);
    let board = game.initial_board();
    let islands = board.islands();
    let covered: usize = islands.iter().map(Board::len).sum();
    assert_eq!(covered, board.len());
    for (i, a) in islands.iter().enumerate() {
        for b in &islands[i + 1..] {
            assert!(!a.find_connection(b));
        }
    }
}

#[test]
fn test_render_lists_every_player() {
    let game = finished_game(1);
    let text = render_board(game.board(), &RenderOptions::plain());
    let last = text.lines().last().unwrap();
    for player in ["red", "blue", "green"] {
        assert!(last.contains(player));
    }
}
