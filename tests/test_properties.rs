use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use paperboy::assets::Assets;
use paperboy::background::ScrollingBackground;
use paperboy::compute::*;
use paperboy::consts::*;
use paperboy::entities::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_stays_in_band(moves in prop::collection::vec(any::<bool>(), 0..300)) {
        let a = Assets::placeholders();
        let mut s = init_state(&a);
        for up in moves {
            s = if up { move_player_up(&s) } else { move_player_down(&s) };
            let b = s.player.bounds();
            prop_assert!(b.top() >= PAPERBOY_MIN_Y);
            prop_assert!(b.bottom() <= PAPERBOY_MAX_Y);
            prop_assert_eq!(b.left(), PAPERBOY_X);
        }
    }

    #[test]
    fn street_always_covers_screen(width in 16u32..3000, frames in 0usize..800, seed in any::<u64>()) {
        let a = Assets::placeholders();
        let mut bg = ScrollingBackground::with_tile(a.street, width as f32);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..frames {
            bg.update(&a, &mut rng);
            let mut tiles = bg.tiles.clone();
            tiles.sort_by(|x, y| x.total_cmp(y));
            for pair in tiles.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], bg.tile_width);
            }
            prop_assert!(bg.covers(0.0));
            prop_assert!(bg.covers(SCREEN_WIDTH - 1.0));
        }
    }

    #[test]
    fn play_keeps_state_consistent(
        actions in prop::collection::vec(0u8..5, 0..600),
        seed in any::<u64>(),
    ) {
        let a = Assets::placeholders();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = init_state(&a);
        let mut score = 0;

        for action in actions {
            s = match action {
                0 => move_player_up(&s),
                1 => move_player_down(&s),
                2 => throw_paper(&s, Lane::Top, &a),
                3 => throw_paper(&s, Lane::Bottom, &a),
                _ => s,
            };
            s = tick(&s, &a, &mut rng);

            prop_assert!(s.player.lives <= STARTING_LIVES);
            prop_assert!(s.player.invincible_timer <= INVINCIBLE_DURATION);
            prop_assert!(s.player.score >= score);
            score = s.player.score;
            prop_assert_eq!(s.player.lives == 0, s.status == GameStatus::GameOver);

            for p in &s.projectiles {
                prop_assert!(p.is_alive());
                prop_assert!(p.bounds().left() <= SCREEN_WIDTH);
                prop_assert!(p.bounds().top() >= 0.0);
                prop_assert!(p.bounds().bottom() <= SCREEN_HEIGHT);
            }
            for o in &s.obstacles {
                prop_assert!(o.bounds().right() >= 0.0);
            }
            for t in &s.targets {
                prop_assert!(t.bounds().right() >= 0.0);
                prop_assert_eq!(t.body.pos.y, t.lane.y());
            }
        }
    }
}
