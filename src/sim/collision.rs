//! Collision detection, scoring and reclaim
//!
//! Runs once per tick after integration. The order of the steps matters:
//! death is decided before scoring, so the pair that kills the player is
//! never counted, and reclaim runs last on the already-updated queues.

use super::bounds::Aabb;
use super::state::{GameEvent, GameState};

/// What the resolver observed this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The player died on this tick (first death of the round only)
    pub died: bool,
    /// Pairs moved from active to scored
    pub passed: u32,
    /// Scored pairs removed after leaving the screen
    pub reclaimed: u32,
}

/// True if the player overlaps any active or scored obstacle
pub fn player_hits_obstacle(state: &GameState) -> bool {
    let hitbox = state.player.hitbox();
    state.pairs().any(|pair| pair.hits(&hitbox))
}

/// Run collision, death, scoring and reclaim for one tick
pub fn resolve(state: &mut GameState) -> Resolution {
    let mut out = Resolution::default();
    let in_screen = state.player.in_screen();

    // Death check
    if (!in_screen || player_hits_obstacle(state)) && state.player.alive {
        state.player.alive = false;
        out.died = true;
        let score = state.score;
        state.push_event(GameEvent::Died { score });
        log::info!("Player died with score {}", score);
    }

    if !in_screen {
        state.player.inert = true;
    }

    // Scoring: pairs leave the active queue oldest-first
    let player_x = state.player.pos.x;
    while state
        .active
        .front()
        .is_some_and(|pair| pair.center_x() < player_x)
    {
        let Some(mut pair) = state.active.pop_front() else {
            break;
        };
        pair.scored = true;
        state.scored.push_back(pair);
        out.passed += 1;

        if state.player.alive {
            state.score += 1;
            let score = state.score;
            state.push_event(GameEvent::Scored { score });
            log::debug!("Score {}", score);
        }
    }

    out.reclaimed = reclaim(state, &Aabb::play_area());
    out
}

/// Drop scored pairs that have fully left the left edge of `area`.
///
/// Pairs move in lockstep and were spawned in order, so once one pair is
/// still visible every newer pair is too.
pub fn reclaim(state: &mut GameState, area: &Aabb) -> u32 {
    let mut removed = 0;
    while state
        .scored
        .front()
        .is_some_and(|pair| pair.right() <= area.left())
    {
        state.scored.pop_front();
        removed += 1;
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Tuning;
    use crate::sim::kinematics::integrate;
    use crate::sim::spawner::pair_at;
    use glam::Vec2;

    /// A pair whose opening is centred on the player, so passing it is safe
    fn safe_pair(id: u32, left: f32) -> crate::sim::ObstaclePair {
        let mut pair = pair_at(id, PLAYER_START_Y, PAIR_GAP, SCROLL_SPEED);
        pair.left = left;
        pair
    }

    fn count_died(state: &GameState) -> usize {
        state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Died { .. }))
            .count()
    }

    #[test]
    fn test_collision_with_lower_obstacle_kills() {
        let mut state = GameState::new();
        // Opening far above the player: the lower obstacle covers it
        let mut pair = pair_at(1, 500.0, PAIR_GAP, SCROLL_SPEED);
        pair.left = state.player.pos.x - OBSTACLE_WIDTH / 2.0;
        state.active.push_back(pair);

        let res = resolve(&mut state);
        assert!(res.died);
        assert!(!state.player.alive);
        assert_eq!(count_died(&state), 1);
    }

    #[test]
    fn test_leaving_screen_kills_and_makes_inert() {
        let mut state = GameState::new();
        state.player.pos.y = -PLAYER_HEIGHT;

        let res = resolve(&mut state);
        assert!(res.died);
        assert!(state.player.inert);
    }

    #[test]
    fn test_poking_out_of_top_is_not_death() {
        let mut state = GameState::new();
        state.player.pos.y = HEIGHT;
        let res = resolve(&mut state);
        assert!(!res.died);
        assert!(state.player.alive);
    }

    #[test]
    fn test_death_is_idempotent() {
        let mut state = GameState::new();
        state.player.pos.y = -PLAYER_HEIGHT;

        assert!(resolve(&mut state).died);
        for _ in 0..10 {
            assert!(!resolve(&mut state).died);
        }
        assert_eq!(count_died(&state), 1);
        assert!(!state.player.alive);
    }

    #[test]
    fn test_passing_pair_scores_once() {
        let mut state = GameState::new();
        let x = state.player.pos.x;
        state.active.push_back(safe_pair(1, x - OBSTACLE_WIDTH / 2.0 - 1.0));
        state.active.push_back(safe_pair(2, x + 300.0));

        let res = resolve(&mut state);
        assert!(!res.died);
        assert_eq!(res.passed, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.active.len(), 1);
        assert_eq!(state.scored.len(), 1);
        assert!(state.scored[0].scored);
        assert_eq!(state.events, vec![GameEvent::Scored { score: 1 }]);

        // Already scored: no double counting
        resolve(&mut state);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_pair_at_player_center_is_not_yet_scored() {
        let mut state = GameState::new();
        let x = state.player.pos.x;
        state.active.push_back(safe_pair(1, x - OBSTACLE_WIDTH / 2.0));

        resolve(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.active.len(), 1);
    }

    #[test]
    fn test_dead_player_passes_without_scoring() {
        let mut state = GameState::new();
        state.player.alive = false;
        state.active.push_back(safe_pair(1, -10.0));

        let res = resolve(&mut state);
        assert_eq!(res.passed, 1);
        assert_eq!(state.score, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_reclaim_only_offscreen_prefix() {
        let mut state = GameState::new();
        state.scored.push_back(safe_pair(1, -OBSTACLE_WIDTH - 5.0));
        state.scored.push_back(safe_pair(2, -OBSTACLE_WIDTH));
        state.scored.push_back(safe_pair(3, -OBSTACLE_WIDTH + 1.0));
        state.scored.push_back(safe_pair(4, 200.0));

        let removed = reclaim(&mut state, &Aabb::play_area());
        assert_eq!(removed, 2);
        let ids: Vec<u32> = state.scored.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_pairs_flow_through_queues_and_get_reclaimed() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        state.active.push_back(safe_pair(1, WIDTH));

        let dt = 1.0 / 60.0;
        let mut last_score = 0;
        for _ in 0..240 {
            // Keep the player hovering at the opening
            state.player.vel = Vec2::ZERO;
            state.player.pos.y = PLAYER_START_Y;
            integrate(&mut state, dt, &tuning);
            resolve(&mut state);

            assert!(state.score >= last_score);
            last_score = state.score;

            // Nothing off-screen survives a resolve
            assert!(state.scored.iter().all(|p| p.right() > 0.0));
        }

        assert!(state.player.alive);
        assert_eq!(state.score, 1);
        assert!(state.active.is_empty());
        assert!(state.scored.is_empty());
    }
}
