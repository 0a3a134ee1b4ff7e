use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::view::{self, Visibility};
use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// Initial state; the whole maze is shown for study
    NotStarted,
    /// Fog-of-war rules apply
    InProgress,
    /// Exit reached; terminal
    Won,
}

impl SessionState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Read-only session counters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub steps: u32,
    pub flash_count: u32,
    pub god_eye_count: u32,
    pub won: bool,
}

/// One game from creation to win: a generated maze, the player position,
/// the visibility state, and the usage counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    maze: MazeLayout,
    config: GameConfig,
    position: Coord2,
    state: SessionState,
    boost: Option<Reveal>,
    steps: u32,
    flash_count: u32,
    god_eye_count: u32,
}

impl Session {
    /// Generates a maze from `config` and wraps it in a fresh session.
    pub fn create(config: GameConfig) -> Result<Session> {
        let maze = generate(&config)?;
        Ok(Self::new(maze, config))
    }

    /// Wraps an existing layout; `config` supplies the fog mode and radii.
    pub fn new(maze: MazeLayout, config: GameConfig) -> Session {
        let position = maze.start();
        Self {
            maze,
            config,
            position,
            state: Default::default(),
            boost: None,
            steps: 0,
            flash_count: 0,
            god_eye_count: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn maze(&self) -> &MazeLayout {
        &self.maze
    }

    /// Seed of the underlying maze, shareable to reproduce it.
    pub fn seed(&self) -> u64 {
        self.maze.seed()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            steps: self.steps,
            flash_count: self.flash_count,
            god_eye_count: self.god_eye_count,
            won: self.state.is_final(),
        }
    }

    /// Leaves the pre-game study reveal and puts fog-of-war rules in effect.
    pub fn start(&mut self) -> MarkOutcome {
        if self.state.is_initial() {
            log::debug!("session started, fog mode {:?}", self.config.fog);
            self.state = SessionState::InProgress;
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        }
    }

    /// Tries to move one cell in `direction`.
    ///
    /// Rejections are silent: before `start`, after a win, out of bounds, or
    /// into a wall, the position is unchanged and `NoChange` is returned.
    /// An accepted move consumes any active reveal boost.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if !matches!(self.state, SessionState::InProgress) {
            return MoveOutcome::NoChange;
        }

        let size = self.maze.size();
        let Some(target) = direction.step(self.position, (size, size)) else {
            return MoveOutcome::NoChange;
        };
        if !self.maze.is_open(target) {
            return MoveOutcome::NoChange;
        }

        self.position = target;
        self.steps += 1;
        if self.boost.take().is_some() {
            log::trace!("reveal boost consumed by move");
        }

        if target == self.maze.exit() {
            log::debug!("exit reached in {} steps", self.steps);
            self.state = SessionState::Won;
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        }
    }

    pub fn activate_flash(&mut self) -> MarkOutcome {
        self.activate(Reveal::Flash)
    }

    pub fn activate_god_eye(&mut self) -> MarkOutcome {
        self.activate(Reveal::GodEye)
    }

    /// Arms a temporary reveal; activating one boost overrides the other,
    /// and only state changes bump the usage counters.
    fn activate(&mut self, reveal: Reveal) -> MarkOutcome {
        if !matches!(self.state, SessionState::InProgress) {
            return MarkOutcome::NoChange;
        }
        if self.boost == Some(reveal) {
            return MarkOutcome::NoChange;
        }

        self.boost = Some(reveal);
        match reveal {
            Reveal::Flash => self.flash_count += 1,
            Reveal::GodEye => self.god_eye_count += 1,
        }
        MarkOutcome::Changed
    }

    /// Derives the rendered grid for the current position and visibility state.
    pub fn view(&self) -> Array2<ViewCell> {
        view::render(&self.maze, self.position, self.visibility())
    }

    fn visibility(&self) -> Visibility {
        if !matches!(self.state, SessionState::InProgress) {
            return Visibility::Full;
        }

        match (self.boost, self.config.fog) {
            (Some(Reveal::GodEye), _) => Visibility::Full,
            (Some(Reveal::Flash), _) => Visibility::Radius(self.config.flash_radius),
            (None, FogMode::Normal) => Visibility::Radius(self.config.visible_radius),
            (None, FogMode::Blind) => Visibility::SelfOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(fog: FogMode) -> GameConfig {
        GameConfig::new(11, Algorithm::Backtracker)
            .unwrap()
            .with_fog(fog)
    }

    /// Straight passage along `y = 1` from the start to an exit at `(size-2, 1)`.
    fn corridor(size: Coord) -> MazeLayout {
        let mut cells = Array2::from_elem([size as usize; 2], Cell::Wall);
        for x in 1..=(size - 2) {
            cells[(x, 1).to_nd_index()] = Cell::Passage;
        }
        cells[(size - 2, 1).to_nd_index()] = Cell::Exit;
        MazeLayout::from_cells(cells, 0).unwrap()
    }

    /// Start cell walled in on every side; exit elsewhere.
    fn sealed_start() -> MazeLayout {
        let mut cells = Array2::from_elem([5, 5], Cell::Wall);
        cells[[1, 1]] = Cell::Passage;
        cells[[3, 3]] = Cell::Exit;
        MazeLayout::from_cells(cells, 0).unwrap()
    }

    #[test]
    fn moves_are_rejected_before_start() {
        let mut session = Session::new(corridor(11), config(FogMode::Normal));

        assert_eq!(session.attempt_move(Direction::Right), MoveOutcome::NoChange);
        assert_eq!(session.position(), (1, 1));
        assert_eq!(session.stats().steps, 0);
    }

    #[test]
    fn walls_and_bounds_reject_all_directions() {
        let mut session = Session::new(sealed_start(), config(FogMode::Normal));
        session.start();

        for direction in Direction::ALL {
            assert_eq!(session.attempt_move(direction), MoveOutcome::NoChange);
            assert_eq!(session.position(), (1, 1));
        }
        assert_eq!(session.stats().steps, 0);
    }

    #[test]
    fn corridor_walk_wins_exactly_once() {
        let mut session = Session::new(corridor(11), config(FogMode::Normal));
        session.start();

        for _ in 0..7 {
            assert_eq!(session.attempt_move(Direction::Right), MoveOutcome::Moved);
        }
        assert_eq!(session.attempt_move(Direction::Right), MoveOutcome::Won);
        assert_eq!(session.position(), (9, 1));
        assert!(session.stats().won);
        assert_eq!(session.stats().steps, 8);

        // terminal: further moves and boosts are no-ops
        assert_eq!(session.attempt_move(Direction::Right), MoveOutcome::NoChange);
        assert_eq!(session.attempt_move(Direction::Left), MoveOutcome::NoChange);
        assert_eq!(session.activate_flash(), MarkOutcome::NoChange);
        assert_eq!(session.activate_god_eye(), MarkOutcome::NoChange);
        assert_eq!(session.position(), (9, 1));
        assert_eq!(session.stats().steps, 8);
        assert_eq!(session.stats().flash_count, 0);
    }

    #[test]
    fn full_maze_is_visible_before_start() {
        let session = Session::new(corridor(11), config(FogMode::Blind));
        let view = session.view();

        assert_eq!(view[[1, 1]], ViewCell::Player);
        assert_eq!(view[[5, 1]], ViewCell::Passage);
        assert_eq!(view[[9, 1]], ViewCell::Exit);
        assert!(view.iter().all(|&c| c != ViewCell::Hidden));
    }

    #[test]
    fn blind_mode_shows_only_the_player() {
        let mut session = Session::new(corridor(11), config(FogMode::Blind));
        session.start();
        let view = session.view();

        assert_eq!(view[[1, 1]], ViewCell::Player);
        assert_eq!(view.iter().filter(|&&c| c != ViewCell::Hidden).count(), 1);
    }

    #[test]
    fn normal_mode_applies_the_configured_radius() {
        let mut session = Session::new(corridor(11), config(FogMode::Normal));
        session.start();
        let view = session.view();

        // corridor cell at distance 4 shown, distance 5 fogged
        assert_eq!(view[[5, 1]], ViewCell::Passage);
        assert_eq!(view[[6, 1]], ViewCell::Hidden);
    }

    #[test]
    fn flash_widens_blind_visibility_until_the_next_move() {
        let mut session = Session::new(corridor(11), config(FogMode::Blind));
        session.start();

        assert_eq!(session.activate_flash(), MarkOutcome::Changed);
        let view = session.view();
        assert_eq!(view[[6, 1]], ViewCell::Passage);
        assert_eq!(view[[7, 1]], ViewCell::Hidden);

        assert_eq!(session.attempt_move(Direction::Right), MoveOutcome::Moved);
        let view = session.view();
        assert_eq!(view[[2, 1]], ViewCell::Player);
        assert_eq!(view.iter().filter(|&&c| c != ViewCell::Hidden).count(), 1);
        assert_eq!(session.stats().flash_count, 1);
    }

    #[test]
    fn god_eye_reveals_everything_and_decays_on_move() {
        let mut session = Session::new(corridor(11), config(FogMode::Blind));
        session.start();

        assert_eq!(session.activate_god_eye(), MarkOutcome::Changed);
        assert!(session.view().iter().all(|&c| c != ViewCell::Hidden));

        session.attempt_move(Direction::Right);
        let view = session.view();
        assert_eq!(view.iter().filter(|&&c| c != ViewCell::Hidden).count(), 1);
        assert_eq!(session.stats().god_eye_count, 1);
    }

    #[test]
    fn boosts_override_each_other_and_ignore_repeats() {
        let mut session = Session::new(corridor(11), config(FogMode::Blind));
        session.start();

        assert_eq!(session.activate_flash(), MarkOutcome::Changed);
        assert_eq!(session.activate_flash(), MarkOutcome::NoChange);
        assert_eq!(session.activate_god_eye(), MarkOutcome::Changed);
        assert_eq!(session.activate_flash(), MarkOutcome::Changed);

        let stats = session.stats();
        assert_eq!(stats.flash_count, 2);
        assert_eq!(stats.god_eye_count, 1);
    }

    #[test]
    fn rejected_moves_keep_an_active_boost() {
        let mut session = Session::new(corridor(11), config(FogMode::Blind));
        session.start();
        session.activate_god_eye();

        // bump into the wall above; the boost must survive the rejection
        assert_eq!(session.attempt_move(Direction::Up), MoveOutcome::NoChange);
        assert!(session.view().iter().all(|&c| c != ViewCell::Hidden));
    }

    #[test]
    fn won_session_shows_the_full_maze() {
        let mut session = Session::new(corridor(11), config(FogMode::Blind));
        session.start();
        for _ in 0..8 {
            session.attempt_move(Direction::Right);
        }

        assert!(session.stats().won);
        let view = session.view();
        assert!(view.iter().all(|&c| c != ViewCell::Hidden));
        assert_eq!(view[[9, 1]], ViewCell::Player);
    }

    #[test]
    fn session_round_trips_through_serde() {
        let mut session = Session::create(
            GameConfig::new(15, Algorithm::Prim).unwrap().with_seed(7),
        )
        .unwrap();
        session.start();
        session.activate_flash();
        session.attempt_move(Direction::Right);
        session.attempt_move(Direction::Down);

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, session);
    }
}
