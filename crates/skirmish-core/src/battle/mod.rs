//! Battle controller: the round loop as an explicit state machine.
//!
//! The controller owns the actor arena, both rosters, the turn order and the
//! RNG for one encounter. It advances synchronously until it either reaches
//! an outcome or needs player input:
//!
//! 1. **NEXT**: pull the next actor; an empty order is a draw
//! 2. **UPKEEP**: `begin_turn`, bump the turn counter, check for wipes
//! 3. **ACT**: players suspend in `AwaitingInput`; enemies run the AI
//! 4. **END**: `end_turn`
//! 5. **PRUNE**: drop the dead, check for wipes
//! 6. **REORDER**: rebuild the turn order
//!
//! The loop is bounded by [`BattleConfig::max_iterations`]; hitting the
//! ceiling is a draw.
//!
//! # Input
//!
//! While suspended, only [`BattleController::try_choose_ability`],
//! [`BattleController::try_choose_target`] and
//! [`BattleController::cancel_ability`] move the state machine. Calls made
//! out of window, or naming something that is not on offer, are ignored.
//!
//! # Example
//!
//! ```
//! use skirmish_core::battle::{BattleController, BattlePhase, BattleType};
//! use skirmish_core::config::BattleConfig;
//! use skirmish_core::definition::{
//!     Ability, AbilityEffect, AbilityTargeting, BaseStats, CharacterDefinition,
//! };
//!
//! let strike = Ability::new("strike", "Strike", AbilityTargeting::SingleEnemy, AbilityEffect::BasicAttack);
//! let hero = CharacterDefinition::new("hero", "Hero", BaseStats::new(30, 3, 0, 5)).with_ability(strike);
//! let imp = CharacterDefinition::new("imp", "Imp", BaseStats::new(15, 2, 0, 2));
//!
//! let mut battle = BattleController::new(BattleConfig::default().with_seed(7));
//! battle.begin_battle(BattleType::Normal, &[hero], &[imp], |_| {}).unwrap();
//!
//! // The hero is faster, so the loop stops on its first prompt.
//! assert!(battle.phase().is_awaiting_input());
//! assert_eq!(battle.turn_counter(), 1);
//! ```

mod event;
mod phase;

pub use event::{AbilityOption, BattleEvent, BattleObserver, SkipReason};
pub use phase::{BattleOutcome, BattlePhase, BattleType, InputStage, RunningState};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{debug, info, warn};

use crate::actor::{ActorId, ActorSnapshot, CombatActor, Side};
use crate::arena::{build_squad, ActorArena};
use crate::config::BattleConfig;
use crate::definition::{Ability, AbilityId, CharacterDefinition};
use crate::error::BattleError;
use crate::resolver::ActionResolver;
use crate::turn_order::TurnOrder;

/// Runs one encounter.
pub struct BattleController {
    config: BattleConfig,
    resolver: ActionResolver,
    rng: ChaCha8Rng,
    actors: ActorArena,
    players: Vec<ActorId>,
    enemies: Vec<ActorId>,
    order: TurnOrder,
    phase: BattlePhase,
    battle_type: BattleType,
    turn_counter: u32,
    iterations: u32,
    current: Option<ActorId>,
    pending_ability: Option<Ability>,
    observers: Vec<Box<dyn BattleObserver>>,
    /// Every emitted event, drained by `take_events`.
    events: Vec<BattleEvent>,
    on_ended: Option<Box<dyn FnOnce(bool)>>,
}

impl fmt::Debug for BattleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleController")
            .field("phase", &self.phase)
            .field("battle_type", &self.battle_type)
            .field("turn_counter", &self.turn_counter)
            .field("current", &self.current)
            .field("players", &self.players)
            .field("enemies", &self.enemies)
            .field("order", &self.order)
            .field("observers", &format!("[{} observers]", self.observers.len()))
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl BattleController {
    /// Creates an idle controller.
    ///
    /// The RNG is seeded from `config.seed` when set, otherwise from entropy.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self::with_rng(config, rng)
    }

    /// Creates an idle controller with a caller-supplied RNG.
    #[must_use]
    pub fn with_rng(config: BattleConfig, rng: ChaCha8Rng) -> Self {
        let resolver = ActionResolver::new(config.enemy_ai.clone());
        Self {
            config,
            resolver,
            rng,
            actors: ActorArena::new(),
            players: Vec::new(),
            enemies: Vec::new(),
            order: TurnOrder::new(),
            phase: BattlePhase::NotStarted,
            battle_type: BattleType::Normal,
            turn_counter: 0,
            iterations: 0,
            current: None,
            pending_ability: None,
            observers: Vec::new(),
            events: Vec::new(),
            on_ended: None,
        }
    }

    /// Registers a listener for every subsequent event.
    pub fn subscribe(&mut self, observer: impl BattleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Builds both squads and runs the loop until it needs input or ends.
    ///
    /// `on_ended` is called once with `true` for a win and `false` for a loss
    /// or draw. It is not called if the battle is aborted.
    ///
    /// # Errors
    ///
    /// Fails without touching controller state if the controller was already
    /// used, if either team is empty, or if either team starts with nobody
    /// alive.
    pub fn begin_battle(
        &mut self,
        battle_type: BattleType,
        player_team: &[CharacterDefinition],
        enemy_team: &[CharacterDefinition],
        on_ended: impl FnOnce(bool) + 'static,
    ) -> Result<(), BattleError> {
        if self.phase != BattlePhase::NotStarted {
            return Err(BattleError::AlreadyStarted);
        }
        if player_team.is_empty() {
            return Err(BattleError::EmptyPlayerTeam);
        }
        if enemy_team.is_empty() {
            return Err(BattleError::EmptyEnemyTeam);
        }

        let mut actors = ActorArena::new();
        let players = build_squad(player_team, &self.config, Side::Player, &mut actors);
        let enemies = build_squad(enemy_team, &self.config, Side::Enemy, &mut actors);
        let players = actors.living(&players);
        let enemies = actors.living(&enemies);
        if players.is_empty() {
            return Err(BattleError::NoLivingActors(Side::Player));
        }
        if enemies.is_empty() {
            return Err(BattleError::NoLivingActors(Side::Enemy));
        }

        self.actors = actors;
        self.players = players;
        self.enemies = enemies;
        self.battle_type = battle_type;
        self.on_ended = Some(Box::new(on_ended));
        self.order.initialize(&self.actors, &self.players, &self.enemies);
        self.phase = BattlePhase::Running(RunningState::RunningAi);

        info!(
            ?battle_type,
            players = self.players.len(),
            enemies = self.enemies.len(),
            "battle started"
        );
        let players = self.snapshots(&self.players);
        let enemies = self.snapshots(&self.enemies);
        self.emit(BattleEvent::BattleStarted {
            battle_type,
            players,
            enemies,
        });
        self.emit_order();

        self.run();
        Ok(())
    }

    /// Tears the encounter down.
    ///
    /// Drops any pending selection. No further events are emitted and
    /// `on_ended` is never called. Returns false if already terminal.
    pub fn abort(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        info!(turn = self.turn_counter, "battle aborted");
        self.phase = BattlePhase::Aborted;
        self.pending_ability = None;
        self.on_ended = None;
        true
    }

    // =========================================================================
    // Player input
    // =========================================================================

    /// Picks an ability for the current player actor.
    ///
    /// Returns true if the choice was accepted. An ability on cooldown is
    /// accepted but costs the turn. Calls outside the ability window, or for
    /// an ability the actor does not have equipped, are ignored.
    pub fn try_choose_ability(&mut self, id: &AbilityId) -> bool {
        if self.phase != BattlePhase::Running(RunningState::AwaitingInput(InputStage::Ability)) {
            debug!(ability = %id, phase = ?self.phase, "ability choice ignored: not awaiting an ability");
            return false;
        }
        let Some(actor_id) = self.current else {
            return false;
        };
        let Some(actor) = self.actors.get(actor_id) else {
            return false;
        };
        let Some(ability) = actor.equipped_ability(id).cloned() else {
            debug!(ability = %id, actor = %actor_id, "ability choice ignored: not equipped");
            return false;
        };

        if actor.is_on_cooldown(id) {
            debug!(ability = %id, actor = %actor_id, "ability on cooldown, turn skipped");
            self.emit(BattleEvent::TurnSkipped {
                actor: actor_id,
                reason: SkipReason::AbilityOnCooldown,
            });
            self.resume_after_action(actor_id);
            return true;
        }

        if ability.targeting.requires_target_choice() {
            let candidates = self.snapshots(&self.target_candidates(&ability));
            self.pending_ability = Some(ability.clone());
            self.phase = BattlePhase::Running(RunningState::AwaitingInput(InputStage::Target));
            self.emit(BattleEvent::TargetPrompt { ability, candidates });
            return true;
        }

        self.resolve_player_action(actor_id, &ability, None);
        true
    }

    /// Picks the target for the pending ability.
    ///
    /// Returns true if the target was accepted and the ability resolved.
    /// Calls outside the target window, or naming an actor that is not a
    /// valid candidate, are ignored.
    pub fn try_choose_target(&mut self, target: ActorId) -> bool {
        if self.phase != BattlePhase::Running(RunningState::AwaitingInput(InputStage::Target)) {
            debug!(%target, phase = ?self.phase, "target choice ignored: not awaiting a target");
            return false;
        }
        let (Some(actor_id), Some(ability)) = (self.current, self.pending_ability.clone()) else {
            return false;
        };
        if !self.target_candidates(&ability).contains(&target) {
            debug!(%target, ability = %ability.id, "target choice ignored: not a candidate");
            return false;
        }

        self.resolve_player_action(actor_id, &ability, Some(target));
        true
    }

    /// Backs out of target selection to ability selection.
    ///
    /// Re-emits the action prompt. Returns false outside the target window.
    pub fn cancel_ability(&mut self) -> bool {
        if self.phase != BattlePhase::Running(RunningState::AwaitingInput(InputStage::Target)) {
            return false;
        }
        let Some(actor_id) = self.current else {
            return false;
        };
        self.pending_ability = None;
        self.phase = BattlePhase::Running(RunningState::AwaitingInput(InputStage::Ability));
        self.prompt_player(actor_id);
        true
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current state.
    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// The outcome, once finished.
    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Encounter flavor.
    #[must_use]
    pub fn battle_type(&self) -> BattleType {
        self.battle_type
    }

    /// Number of turns started so far.
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// The actor whose turn it is, or was when the battle ended.
    #[must_use]
    pub fn current_actor(&self) -> Option<ActorId> {
        self.current
    }

    /// Looks up an actor, living or dead.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&CombatActor> {
        self.actors.get(id)
    }

    /// Living player actors in roster order, as of the last prune.
    #[must_use]
    pub fn players(&self) -> &[ActorId] {
        &self.players
    }

    /// Living enemy actors in roster order, as of the last prune.
    #[must_use]
    pub fn enemies(&self) -> &[ActorId] {
        &self.enemies
    }

    /// The turn queue, head first.
    #[must_use]
    pub fn upcoming_order(&self) -> Vec<ActorId> {
        self.order.peek_upcoming()
    }

    /// The ability waiting for a target.
    #[must_use]
    pub fn pending_ability(&self) -> Option<&Ability> {
        self.pending_ability.as_ref()
    }

    /// The configuration this controller runs with.
    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn actors_mut(&mut self) -> &mut ActorArena {
        &mut self.actors
    }

    // =========================================================================
    // Round loop
    // =========================================================================

    /// Advances until the battle ends or suspends on input.
    fn run(&mut self) {
        while self.phase == BattlePhase::Running(RunningState::RunningAi) {
            if self.iterations >= self.config.max_iterations {
                warn!(
                    max_iterations = self.config.max_iterations,
                    "iteration ceiling reached, declaring a draw"
                );
                self.finish(BattleOutcome::Draw);
                return;
            }
            self.iterations += 1;

            let Some(actor_id) = self.order.next_actor() else {
                warn!("turn order is empty, declaring a draw");
                self.finish(BattleOutcome::Draw);
                return;
            };
            self.current = Some(actor_id);

            if let Some(actor) = self.actors.get_mut(actor_id) {
                actor.begin_turn();
            }
            self.turn_counter += 1;
            debug!(turn = self.turn_counter, actor = %actor_id, "turn started");
            if let Some(current) = self.actors.get(actor_id).map(CombatActor::snapshot) {
                let upcoming = self.order.peek_upcoming();
                self.emit(BattleEvent::TurnCounterUpdated {
                    turn: self.turn_counter,
                    current,
                    upcoming,
                });
            }

            if !self.actors.any_alive(&self.enemies) {
                self.finish(BattleOutcome::PlayerWon);
                return;
            }
            if !self.actors.any_alive(&self.players) {
                self.finish(BattleOutcome::PlayerLost);
                return;
            }

            let Some((skip, side)) = self
                .actors
                .get(actor_id)
                .map(|actor| (skip_reason(actor), actor.side()))
            else {
                continue;
            };

            if let Some(reason) = skip {
                debug!(actor = %actor_id, ?reason, "turn skipped");
                self.emit(BattleEvent::TurnSkipped {
                    actor: actor_id,
                    reason,
                });
            } else if side == Side::Player {
                self.phase = BattlePhase::Running(RunningState::AwaitingInput(InputStage::Ability));
                self.prompt_player(actor_id);
                return;
            } else {
                self.resolver.enemy_act(
                    &mut self.actors,
                    actor_id,
                    &self.enemies,
                    &self.players,
                    &mut self.rng,
                );
            }

            self.finish_turn(actor_id);
        }
    }

    /// Steps 4 to 6. Leaves the phase terminal if a side was wiped out.
    fn finish_turn(&mut self, actor_id: ActorId) {
        if let Some(actor) = self.actors.get_mut(actor_id) {
            actor.end_turn();
        }

        self.players = self.actors.living(&self.players);
        self.enemies = self.actors.living(&self.enemies);
        if self.players.is_empty() {
            self.finish(BattleOutcome::PlayerLost);
            return;
        }
        if self.enemies.is_empty() {
            self.finish(BattleOutcome::PlayerWon);
            return;
        }

        self.order.update_order(&self.actors, &self.players, &self.enemies);
        self.emit_order();
    }

    fn resolve_player_action(&mut self, actor_id: ActorId, ability: &Ability, chosen: Option<ActorId>) {
        debug!(actor = %actor_id, ability = %ability.id, target = ?chosen, "player action");
        self.resolver.resolve_ability(
            ability,
            &mut self.actors,
            actor_id,
            &self.players,
            &self.enemies,
            chosen,
            &mut self.rng,
        );
        self.resume_after_action(actor_id);
    }

    /// Leaves the input window, closes the turn and keeps the loop going.
    fn resume_after_action(&mut self, actor_id: ActorId) {
        self.pending_ability = None;
        self.phase = BattlePhase::Running(RunningState::RunningAi);
        self.finish_turn(actor_id);
        self.run();
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        self.phase = BattlePhase::Finished(outcome);
        self.pending_ability = None;
        info!(%outcome, turns = self.turn_counter, "battle finished");
        let player_won = outcome.player_won();
        self.emit(BattleEvent::BattleFinished {
            outcome,
            player_won,
        });
        if let Some(on_ended) = self.on_ended.take() {
            on_ended(player_won);
        }
    }

    // =========================================================================
    // Prompts and events
    // =========================================================================

    fn prompt_player(&mut self, actor_id: ActorId) {
        let Some(actor) = self.actors.get(actor_id) else {
            return;
        };
        let abilities = actor
            .equipped_abilities()
            .iter()
            .map(|ability| {
                let cooldown_remaining = actor.cooldown_remaining(&ability.id);
                AbilityOption {
                    ability: ability.clone(),
                    ready: cooldown_remaining == 0,
                    cooldown_remaining,
                }
            })
            .collect();
        let event = BattleEvent::PlayerActionPrompt {
            actor: actor.snapshot(),
            abilities,
            enemy_candidates: self.snapshots(&self.actors.living(&self.enemies)),
            ally_candidates: self.snapshots(&self.actors.living(&self.players)),
        };
        self.emit(event);
    }

    /// Living actors a single-target ability may be aimed at.
    fn target_candidates(&self, ability: &Ability) -> Vec<ActorId> {
        if ability.targeting.targets_allies() {
            self.actors.living(&self.players)
        } else {
            self.actors.living(&self.enemies)
        }
    }

    fn snapshots(&self, ids: &[ActorId]) -> Vec<ActorSnapshot> {
        ids.iter()
            .filter_map(|&id| self.actors.get(id))
            .map(CombatActor::snapshot)
            .collect()
    }

    fn emit_order(&mut self) {
        let upcoming = self.order.peek_upcoming();
        self.emit(BattleEvent::TurnOrderUpdated { upcoming });
    }

    fn emit(&mut self, event: BattleEvent) {
        if self.phase == BattlePhase::Aborted {
            return;
        }
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
        self.events.push(event);
    }
}

/// Why an actor cannot act this turn, if it cannot.
fn skip_reason(actor: &CombatActor) -> Option<SkipReason> {
    if !actor.is_alive() {
        Some(SkipReason::DiedAtTurnStart)
    } else if actor.is_incapacitated() {
        Some(SkipReason::Incapacitated)
    } else if actor.side() == Side::Player && actor.equipped_abilities().is_empty() {
        Some(SkipReason::NoAbilities)
    } else {
        None
    }
}
