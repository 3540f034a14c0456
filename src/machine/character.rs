//! Character locomotion state machine.

use chrono::Utc;
use glam::Vec3;
use tracing::{debug, trace};

use super::{CharacterId, StateObserver};
use crate::animation::AnimationSink;
use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::config::MotionConfig;
use crate::core::{LocomotionState, State, StateHistory, StateTransition, TransitionCause};
use crate::input::{JumpIntents, MoveInput};
use crate::motion::{GroundQuery, MotionState, Pose};
use crate::states::{ActiveState, StateContext, TickEnv, TransitionRequest};

/// One character's locomotion state machine.
///
/// Holds at most one active state. The host owns the simulation loop and
/// calls [`tick`](Self::tick) once per fixed step; jump presses are delivered
/// in between with [`jump_intent`](Self::jump_intent).
///
/// # Example
///
/// ```rust
/// use glam::Vec3;
/// use kinesis::animation::NullAnimator;
/// use kinesis::config::MotionConfig;
/// use kinesis::core::LocomotionState;
/// use kinesis::input::MoveInput;
/// use kinesis::machine::CharacterMachine;
/// use kinesis::motion::StaticWorld;
///
/// let world = StaticWorld::new().with_floor(0.0, 50.0);
/// let mut machine = CharacterMachine::new(MotionConfig::default(), NullAnimator);
/// assert_eq!(machine.state(), None);
///
/// machine.start();
/// assert_eq!(machine.state(), Some(LocomotionState::Move));
///
/// assert!(machine.jump_intent());
/// assert_eq!(machine.state(), Some(LocomotionState::Jump));
///
/// machine.tick(1.0 / 50.0, &MoveInput::idle(), &world);
/// assert!(machine.pose().position.y > 0.0);
/// ```
pub struct CharacterMachine<A: AnimationSink> {
    id: CharacterId,
    config: MotionConfig,
    initial: LocomotionState,
    motion: MotionState,
    current: Option<ActiveState>,
    intents: JumpIntents,
    animator: A,
    observers: Vec<Box<dyn StateObserver + Send>>,
    history: StateHistory<LocomotionState>,
    ticks: u64,
}

impl<A: AnimationSink> CharacterMachine<A> {
    /// Create a machine at the origin with no active state.
    ///
    /// The configuration is used as given; [`crate::builder::CharacterBuilder`]
    /// validates it first.
    pub fn new(config: MotionConfig, animator: A) -> Self {
        Self::with_motion(
            CharacterId::new(),
            config,
            MotionState::default(),
            animator,
        )
    }

    pub(crate) fn with_motion(
        id: CharacterId,
        config: MotionConfig,
        motion: MotionState,
        animator: A,
    ) -> Self {
        let history = StateHistory::with_capacity(config.history_capacity);
        Self {
            id,
            config,
            initial: LocomotionState::Move,
            motion,
            current: None,
            intents: JumpIntents::new(),
            animator,
            observers: Vec::new(),
            history,
            ticks: 0,
        }
    }

    pub(crate) fn set_initial(&mut self, initial: LocomotionState) {
        self.initial = initial;
    }

    pub fn add_observer(&mut self, observer: Box<dyn StateObserver + Send>) {
        self.observers.push(observer);
    }

    /// Enter the initial state.
    ///
    /// Returns `false` without doing anything when a state is already active.
    pub fn start(&mut self) -> bool {
        if self.current.is_some() {
            trace!(character = %self.id, "start ignored, machine already running");
            return false;
        }
        self.transition(self.initial, TransitionCause::Start);
        true
    }

    /// Exit the active state (if any), then enter `next`.
    pub fn switch_state(&mut self, next: LocomotionState) {
        self.transition(next, TransitionCause::External);
    }

    /// Advance the active state by one simulation step of `dt` seconds.
    ///
    /// Does nothing before [`start`](Self::start).
    pub fn tick<W: GroundQuery>(&mut self, dt: f32, input: &MoveInput, world: &W) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        self.ticks += 1;

        let env = TickEnv { dt, input, world };
        let mut ctx = StateContext {
            motion: &mut self.motion,
            config: &self.config,
            intents: &mut self.intents,
            animator: &mut self.animator,
        };
        let request = active.tick(&mut ctx, &env);

        trace!(
            character = %self.id,
            tick = self.ticks,
            state = %active.kind(),
            position = ?self.motion.position,
            velocity = ?self.motion.velocity,
            grounded = self.motion.is_grounded,
            "locomotion tick"
        );

        if let Some(TransitionRequest { next, cause }) = request {
            self.transition(next, cause);
        }
    }

    /// Deliver a jump press.
    ///
    /// Switches to Jump only while Move is active and holds a live jump
    /// subscription. Returns whether the transition happened.
    pub fn jump_intent(&mut self) -> bool {
        let armed = match &self.current {
            Some(ActiveState::Move(state)) => self.intents.is_live(state.jump_subscription()),
            _ => false,
        };
        if !armed {
            trace!(character = %self.id, state = ?self.state(), "jump intent dropped");
            return false;
        }
        self.transition(LocomotionState::Jump, TransitionCause::JumpIntent);
        true
    }

    fn transition(&mut self, next: LocomotionState, cause: TransitionCause) {
        let from = match self.current.take() {
            Some(old) => {
                let kind = old.kind();
                old.exit(&mut StateContext {
                    motion: &mut self.motion,
                    config: &self.config,
                    intents: &mut self.intents,
                    animator: &mut self.animator,
                });
                for observer in &mut self.observers {
                    observer.exited(kind);
                }
                Some(kind)
            }
            None => None,
        };

        let active = ActiveState::enter(
            next,
            &mut StateContext {
                motion: &mut self.motion,
                config: &self.config,
                intents: &mut self.intents,
                animator: &mut self.animator,
            },
        );
        self.current = Some(active);
        for observer in &mut self.observers {
            observer.entered(next);
        }

        self.history.record(StateTransition {
            from,
            to: next,
            cause,
            tick: self.ticks,
            timestamp: Utc::now(),
        });

        debug!(
            character = %self.id,
            from = from.as_ref().map(State::name).unwrap_or("-"),
            to = next.name(),
            cause = ?cause,
            tick = self.ticks,
            "locomotion transition"
        );
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// The active state, `None` before [`start`](Self::start).
    pub fn state(&self) -> Option<LocomotionState> {
        self.current.as_ref().map(ActiveState::kind)
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn pose(&self) -> Pose {
        self.motion.pose()
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.motion.is_grounded
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory<LocomotionState> {
        &self.history
    }

    /// Number of ticks that ran an active state.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of live jump-intent listeners: one while Move is active,
    /// zero otherwise.
    pub fn jump_listeners(&self) -> usize {
        self.intents.listener_count()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Capture everything needed to resume this character later.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4(),
            timestamp: Utc::now(),
            character: self.id,
            state: self.state(),
            initial_state: self.initial,
            motion: self.motion.clone(),
            config: self.config.clone(),
            history: self.history.clone(),
            ticks: self.ticks,
        }
    }

    /// Rebuild a machine from a checkpoint.
    ///
    /// The captured state is reactivated without running its entry hook, so
    /// velocity and animation are left exactly as captured. A restored Move
    /// holds a fresh jump subscription. Observers are not part of a
    /// checkpoint and must be added again.
    pub fn restore(checkpoint: Checkpoint, animator: A) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        let mut machine = Self::with_motion(
            checkpoint.character,
            checkpoint.config,
            checkpoint.motion,
            animator,
        );
        machine.initial = checkpoint.initial_state;
        // The configured capacity wins over whatever bound was serialized.
        machine.history = checkpoint.history.with_window(machine.config.history_capacity);
        machine.ticks = checkpoint.ticks;
        machine.current = checkpoint
            .state
            .map(|state| ActiveState::resume(state, &mut machine.intents));

        debug!(
            character = %machine.id,
            state = ?machine.state(),
            tick = machine.ticks,
            "restored from checkpoint"
        );
        Ok(machine)
    }
}

impl<A: AnimationSink> std::fmt::Debug for CharacterMachine<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterMachine")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("motion", &self.motion)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationCue, RecordingAnimator};
    use crate::motion::StaticWorld;
    use glam::Vec2;
    use std::sync::{Arc, Mutex};

    const DT: f32 = 0.02;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Exited(LocomotionState),
        Entered(LocomotionState),
    }

    #[derive(Clone, Default)]
    struct Journal(Arc<Mutex<Vec<Event>>>);

    impl Journal {
        fn events(&self) -> Vec<Event> {
            self.0.lock().unwrap().clone()
        }
    }

    impl StateObserver for Journal {
        fn exited(&mut self, state: LocomotionState) {
            self.0.lock().unwrap().push(Event::Exited(state));
        }

        fn entered(&mut self, state: LocomotionState) {
            self.0.lock().unwrap().push(Event::Entered(state));
        }
    }

    fn machine_at(position: Vec3) -> CharacterMachine<RecordingAnimator> {
        let config = MotionConfig {
            gravity: -9.8,
            ..MotionConfig::default()
        };
        CharacterMachine::with_motion(
            CharacterId::new(),
            config,
            MotionState::at(position),
            RecordingAnimator::new(),
        )
    }

    #[test]
    fn tick_before_start_is_a_no_op() {
        let world = StaticWorld::new().with_floor(0.0, 10.0);
        let mut machine = machine_at(Vec3::new(0.0, 3.0, 0.0));

        machine.tick(DT, &MoveInput::new(Vec2::Y), &world);

        assert_eq!(machine.state(), None);
        assert_eq!(machine.ticks(), 0);
        assert_eq!(machine.pose().position, Vec3::new(0.0, 3.0, 0.0));
        assert!(machine.history().is_empty());
    }

    #[test]
    fn start_enters_initial_state_once() {
        let mut machine = machine_at(Vec3::ZERO);

        assert!(machine.start());
        assert!(!machine.start());

        assert_eq!(machine.state(), Some(LocomotionState::Move));
        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.animator().cues(), vec![AnimationCue::Move]);
        let entry = machine.history().last().unwrap();
        assert_eq!(entry.from, None);
        assert_eq!(entry.cause, TransitionCause::Start);
    }

    #[test]
    fn exit_precedes_enter() {
        let journal = Journal::default();
        let mut machine = machine_at(Vec3::ZERO);
        machine.add_observer(Box::new(journal.clone()));

        machine.start();
        machine.jump_intent();
        machine.switch_state(LocomotionState::Fall);

        assert_eq!(
            journal.events(),
            vec![
                Event::Entered(LocomotionState::Move),
                Event::Exited(LocomotionState::Move),
                Event::Entered(LocomotionState::Jump),
                Event::Exited(LocomotionState::Jump),
                Event::Entered(LocomotionState::Fall),
            ]
        );
    }

    #[test]
    fn move_to_fall_zeroes_vertical_velocity() {
        let world = StaticWorld::new().with_floor(0.0, 10.0);
        let mut machine = machine_at(Vec3::new(0.0, 4.0, 0.0));
        machine.start();
        assert_eq!(machine.velocity().y, -9.8);

        machine.tick(DT, &MoveInput::idle(), &world);

        assert_eq!(machine.state(), Some(LocomotionState::Fall));
        assert_eq!(machine.velocity().y, 0.0);
        assert_eq!(machine.jump_listeners(), 0);
        assert_eq!(
            machine.history().last().map(|t| t.cause),
            Some(TransitionCause::LostGround)
        );
    }

    #[test]
    fn jump_intent_transitions_exactly_once() {
        let mut machine = machine_at(Vec3::ZERO);
        machine.start();
        assert_eq!(machine.jump_listeners(), 1);

        assert!(machine.jump_intent());
        assert_eq!(machine.state(), Some(LocomotionState::Jump));
        assert_eq!(machine.jump_listeners(), 0);
        assert_eq!(machine.velocity().y, machine.config().jump_force);

        // Move has exited; the same press now finds no listener.
        assert!(!machine.jump_intent());
        assert_eq!(machine.state(), Some(LocomotionState::Jump));
        assert_eq!(machine.history().len(), 2);
    }

    #[test]
    fn jump_intent_ignored_before_start_and_while_falling() {
        let mut machine = machine_at(Vec3::ZERO);
        assert!(!machine.jump_intent());
        assert_eq!(machine.state(), None);

        machine.switch_state(LocomotionState::Fall);
        assert!(!machine.jump_intent());
        assert_eq!(machine.state(), Some(LocomotionState::Fall));
    }

    #[test]
    fn switching_to_move_again_keeps_single_listener() {
        let mut machine = machine_at(Vec3::ZERO);
        machine.start();
        machine.switch_state(LocomotionState::Move);
        machine.switch_state(LocomotionState::Move);

        assert_eq!(machine.jump_listeners(), 1);
        assert!(machine.jump_intent());
        assert_eq!(machine.jump_listeners(), 0);
    }

    #[test]
    fn configured_initial_state_is_used() {
        let mut machine = machine_at(Vec3::new(0.0, 5.0, 0.0));
        machine.set_initial(LocomotionState::Fall);
        machine.start();
        assert_eq!(machine.state(), Some(LocomotionState::Fall));
        assert_eq!(machine.jump_listeners(), 0);
    }

    #[test]
    fn checkpoint_restore_resumes_move() {
        let world = StaticWorld::new().with_floor(0.0, 10.0);
        let mut machine = machine_at(Vec3::ZERO);
        machine.start();
        for _ in 0..5 {
            machine.tick(DT, &MoveInput::new(Vec2::Y), &world);
        }

        let checkpoint = machine.checkpoint();
        let mut restored =
            CharacterMachine::restore(checkpoint, RecordingAnimator::new()).unwrap();

        assert_eq!(restored.id(), machine.id());
        assert_eq!(restored.state(), Some(LocomotionState::Move));
        assert_eq!(restored.motion(), machine.motion());
        assert_eq!(restored.ticks(), 5);
        assert_eq!(restored.history().len(), machine.history().len());
        // No entry hook replayed.
        assert!(restored.animator().cues().is_empty());

        assert_eq!(restored.jump_listeners(), 1);
        assert!(restored.jump_intent());
        assert_eq!(restored.state(), Some(LocomotionState::Jump));
    }

    #[test]
    fn restore_uses_configured_history_capacity() {
        let mut machine = machine_at(Vec3::ZERO);
        machine.start();

        let mut checkpoint = machine.checkpoint();
        checkpoint.history = StateHistory::with_capacity(0);
        let mut restored =
            CharacterMachine::restore(checkpoint, RecordingAnimator::new()).unwrap();

        assert_eq!(
            restored.history().capacity(),
            restored.config().history_capacity
        );
        restored.switch_state(LocomotionState::Fall);
        assert_eq!(restored.history().len(), 1);
    }

    #[test]
    fn unbounded_history_capacity_is_usable() {
        let config = MotionConfig {
            history_capacity: usize::MAX,
            ..MotionConfig::default()
        };
        let mut machine = CharacterMachine::new(config, RecordingAnimator::new());
        machine.start();

        let restored =
            CharacterMachine::restore(machine.checkpoint(), RecordingAnimator::new()).unwrap();
        assert_eq!(restored.history().capacity(), usize::MAX);
        assert_eq!(restored.history().len(), 1);
    }
}
