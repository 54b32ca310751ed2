use colorgame::color;
use colorgame::game::{
    ColorGame, Difficulty, Event, GameState, Message, Outcome, ResetLabel, SURFACE_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn hard_mode_miss_then_hit() {
    let mut game = ColorGame::with_rng(Difficulty::Hard, StdRng::seed_from_u64(42));
    game.handle(Event::ResetClicked);

    let board = game.board().clone();
    assert_eq!(board.visible().count(), SURFACE_COUNT);
    let target = game.target();
    assert!(board.visible().any(|(_, c)| c == target));

    let miss = board.visible().find(|(_, c)| *c != target).map(|(i, _)| i);
    let miss = miss.expect("six random colors are not all equal");
    assert_eq!(game.handle(Event::SurfaceClicked(miss)), Some(Outcome::Miss));
    assert_eq!(game.board().surfaces[miss], Some(color::MISS));
    for i in (0..SURFACE_COUNT).filter(|&i| i != miss) {
        assert_eq!(game.board().surfaces[i], board.surfaces[i]);
    }
    assert_eq!(game.board().message.text(), "Try Again");
    assert_eq!(game.state(), GameState::Playing);

    let hit = board
        .visible()
        .find(|(i, c)| *i != miss && *c == target)
        .map(|(i, _)| i)
        .expect("target is on the board");
    assert_eq!(game.handle(Event::SurfaceClicked(hit)), Some(Outcome::Hit));
    assert_eq!(game.state(), GameState::Won);
    assert!(game
        .board()
        .surfaces
        .iter()
        .all(|c| *c == Some(target)));
    assert_eq!(game.board().message, Message::Success);
    assert_eq!(game.board().reset_label, ResetLabel::PlayAgain);
    assert_eq!(game.board().reset_label.text(), "Play Again?");
    assert_eq!(game.board().header_accent, target);
}

#[test]
fn switch_to_easy_mid_game() {
    let mut game = ColorGame::with_rng(Difficulty::Hard, StdRng::seed_from_u64(43));
    let before = game.palette().to_vec();

    game.handle(Event::ModeClicked(Difficulty::Easy));
    assert_eq!(game.difficulty(), Difficulty::Easy);
    assert_eq!(game.board().selected_mode, Difficulty::Easy);
    assert_eq!(game.palette().len(), 3);
    assert_ne!(game.palette(), &before[..3]);
    assert!(game.board().surfaces[..3].iter().all(Option::is_some));
    assert!(game.board().surfaces[3..].iter().all(Option::is_none));
    assert!(game.palette().contains(&game.target()));
    assert_eq!(game.board().header, game.target().to_string());

    // Difficulty sticks across resets.
    game.handle(Event::ResetClicked);
    assert_eq!(game.palette().len(), 3);
    assert_eq!(game.handle(Event::SurfaceClicked(4)), None);
}

#[test]
fn same_seed_same_game() {
    let a = ColorGame::with_rng(Difficulty::Hard, StdRng::seed_from_u64(9));
    let b = ColorGame::with_rng(Difficulty::Hard, StdRng::seed_from_u64(9));
    assert_eq!(a.palette(), b.palette());
    assert_eq!(a.target(), b.target());
}
