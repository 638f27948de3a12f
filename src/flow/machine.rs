// Selection Flow
// Guided three-step picking and single-slot edits over the selection state

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::{Catalog, Category, PatternRecord};
use crate::state::SelectionState;

/// Number of steps in a guided flow
pub const GUIDED_STEPS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("No selection step is active")]
    NoActiveStep,
    #[error("Pick a {0} pattern first")]
    NothingStaged(Category),
    #[error("Expected a {expected} pattern, got a {found} pattern")]
    WrongCategory { expected: Category, found: Category },
    #[error("Finish the current selection before editing a single slot")]
    FlowInProgress,
    #[error("Tempo must be a positive number of BPM")]
    InvalidTempo,
}

pub type FlowResult<T> = Result<T, FlowError>;

/// Step order of a guided flow: the chosen category, then the cycle after it
pub fn guided_order(start: Category) -> [Category; GUIDED_STEPS] {
    [start, start.next(), start.next().next()]
}

/// Where the flow is
///
/// `staged` is the candidate picked for the step in progress; it only
/// reaches the selection on confirm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    Picking {
        order: [Category; GUIDED_STEPS],
        step: usize,
        staged: Option<Arc<PatternRecord>>,
    },
    Confirmed,
    EditingSingleSlot {
        category: Category,
        staged: Option<Arc<PatternRecord>>,
    },
}

impl FlowState {
    /// Category being picked right now, if any
    pub fn current_category(&self) -> Option<Category> {
        match self {
            FlowState::Picking { order, step, .. } => Some(order[*step]),
            FlowState::EditingSingleSlot { category, .. } => Some(*category),
            FlowState::Idle | FlowState::Confirmed => None,
        }
    }

    pub fn staged(&self) -> Option<&Arc<PatternRecord>> {
        match self {
            FlowState::Picking { staged, .. } | FlowState::EditingSingleSlot { staged, .. } => {
                staged.as_ref()
            }
            FlowState::Idle | FlowState::Confirmed => None,
        }
    }
}

/// Result of a flow transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FlowOutcome {
    Started { category: Category },
    Staged { category: Category },
    /// A step was committed and the next one is open
    Advanced { committed: Category, next: Category },
    /// The last guided step was committed
    Completed { committed: Category },
    /// A single-slot edit was committed
    SlotUpdated { category: Category },
    SteppedBack { to: Category },
    Cancelled,
    TempoChanged { tempo: u32 },
    Seeded,
    Reset,
}

impl FlowOutcome {
    /// Whether the selection changed and should be persisted
    pub fn mutated_selection(&self) -> bool {
        matches!(
            self,
            FlowOutcome::Advanced { .. }
                | FlowOutcome::Completed { .. }
                | FlowOutcome::SlotUpdated { .. }
                | FlowOutcome::TempoChanged { .. }
                | FlowOutcome::Seeded
                | FlowOutcome::Reset
        )
    }
}

/// Owner of the selection and the flow state
///
/// All selection mutations go through here.
#[derive(Debug, Clone)]
pub struct SelectionFlow {
    selection: SelectionState,
    state: FlowState,
}

impl SelectionFlow {
    pub fn new(tempo: u32) -> Self {
        SelectionFlow {
            selection: SelectionState::new(tempo),
            state: FlowState::Idle,
        }
    }

    /// Resume from a restored selection; a full selection counts as confirmed
    pub fn restored(selection: SelectionState) -> Self {
        let state = Self::resting_state(&selection);
        SelectionFlow { selection, state }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    fn resting_state(selection: &SelectionState) -> FlowState {
        if selection.is_complete() {
            FlowState::Confirmed
        } else {
            FlowState::Idle
        }
    }

    /// Begin a guided flow at `category`; any flow in progress is discarded
    pub fn start_flow(&mut self, category: Category) -> FlowOutcome {
        self.state = FlowState::Picking {
            order: guided_order(category),
            step: 0,
            staged: self.selection.slot(category).cloned(),
        };
        FlowOutcome::Started { category }
    }

    /// Set the candidate for the current step, replacing any earlier one
    pub fn stage_candidate(&mut self, record: Arc<PatternRecord>) -> FlowResult<FlowOutcome> {
        let expected = self.state.current_category().ok_or(FlowError::NoActiveStep)?;
        let found = record.category();
        if found != expected {
            return Err(FlowError::WrongCategory { expected, found });
        }

        match &mut self.state {
            FlowState::Picking { staged, .. } | FlowState::EditingSingleSlot { staged, .. } => {
                *staged = Some(record);
            }
            FlowState::Idle | FlowState::Confirmed => return Err(FlowError::NoActiveStep),
        }

        Ok(FlowOutcome::Staged { category: expected })
    }

    /// Commit the staged candidate into its slot and move on
    ///
    /// With nothing staged this is rejected and nothing changes.
    pub fn confirm_step(&mut self) -> FlowResult<FlowOutcome> {
        match &self.state {
            FlowState::Picking { order, step, staged } => {
                let committed = order[*step];
                let record = staged.clone().ok_or(FlowError::NothingStaged(committed))?;
                let (order, next_step) = (*order, step + 1);

                self.selection.assign(record);

                if next_step >= GUIDED_STEPS {
                    self.state = FlowState::Confirmed;
                    log::info!("Guided selection complete");
                    return Ok(FlowOutcome::Completed { committed });
                }

                let next = order[next_step];
                self.state = FlowState::Picking {
                    order,
                    step: next_step,
                    staged: self.selection.slot(next).cloned(),
                };
                Ok(FlowOutcome::Advanced { committed, next })
            }
            FlowState::EditingSingleSlot { category, staged } => {
                let category = *category;
                let record = staged.clone().ok_or(FlowError::NothingStaged(category))?;

                self.selection.assign(record);
                self.state = Self::resting_state(&self.selection);
                Ok(FlowOutcome::SlotUpdated { category })
            }
            FlowState::Idle | FlowState::Confirmed => Err(FlowError::NoActiveStep),
        }
    }

    /// Step back one guided step, or leave the flow
    ///
    /// Going back re-stages what the earlier slot already holds. Later slots
    /// keep their committed values. From the first step, or from a
    /// single-slot edit, the staged candidate is discarded and the
    /// selection is left as it was.
    pub fn go_back(&mut self) -> FlowResult<FlowOutcome> {
        match &self.state {
            FlowState::Picking { order, step, .. } if *step > 0 => {
                let (order, previous) = (*order, step - 1);
                let to = order[previous];
                self.state = FlowState::Picking {
                    order,
                    step: previous,
                    staged: self.selection.slot(to).cloned(),
                };
                Ok(FlowOutcome::SteppedBack { to })
            }
            FlowState::Picking { .. } | FlowState::EditingSingleSlot { .. } => {
                self.state = Self::resting_state(&self.selection);
                Ok(FlowOutcome::Cancelled)
            }
            FlowState::Idle | FlowState::Confirmed => Err(FlowError::NoActiveStep),
        }
    }

    /// Open a one-slot edit, pre-staging the slot's current record
    pub fn start_single_slot_edit(&mut self, category: Category) -> FlowResult<FlowOutcome> {
        if matches!(self.state, FlowState::Picking { .. }) {
            return Err(FlowError::FlowInProgress);
        }

        self.state = FlowState::EditingSingleSlot {
            category,
            staged: self.selection.slot(category).cloned(),
        };
        Ok(FlowOutcome::Started { category })
    }

    pub fn set_tempo(&mut self, tempo: u32) -> FlowResult<FlowOutcome> {
        if tempo == 0 {
            return Err(FlowError::InvalidTempo);
        }
        self.selection.set_tempo(tempo);
        Ok(FlowOutcome::TempoChanged { tempo })
    }

    /// Fill every slot with a random record from its category
    ///
    /// An empty category leaves its slot empty.
    pub fn seed_random<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) -> FlowOutcome {
        for category in Category::ALL {
            if let Some(record) = catalog.list(category).choose(rng) {
                self.selection.assign(record.clone());
            }
        }
        self.state = Self::resting_state(&self.selection);
        FlowOutcome::Seeded
    }

    /// Empty every slot, restore `tempo`, and leave any flow
    pub fn reset(&mut self, tempo: u32) -> FlowOutcome {
        self.selection.reset(tempo);
        self.state = FlowState::Idle;
        FlowOutcome::Reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn first(catalog: &Catalog, category: Category) -> Arc<PatternRecord> {
        catalog.list(category)[0].clone()
    }

    fn second(catalog: &Catalog, category: Category) -> Arc<PatternRecord> {
        catalog.list(category)[1].clone()
    }

    /// Run a guided flow to completion, returning the visited categories
    fn run_guided(flow: &mut SelectionFlow, catalog: &Catalog, start: Category) -> Vec<Category> {
        let mut visited = Vec::new();
        flow.start_flow(start);
        while let Some(category) = flow.state().current_category() {
            visited.push(category);
            flow.stage_candidate(first(catalog, category)).unwrap();
            flow.confirm_step().unwrap();
        }
        visited
    }

    #[test]
    fn test_guided_order_cycles() {
        assert_eq!(guided_order(Category::Drum), [Category::Drum, Category::Bass, Category::Lead]);
        assert_eq!(guided_order(Category::Bass), [Category::Bass, Category::Lead, Category::Drum]);
        assert_eq!(guided_order(Category::Lead), [Category::Lead, Category::Drum, Category::Bass]);
    }

    #[test]
    fn test_guided_flow_visits_in_order_for_every_start() {
        let catalog = catalog();
        for start in Category::ALL {
            let mut flow = SelectionFlow::new(170);
            let visited = run_guided(&mut flow, &catalog, start);
            assert_eq!(visited, guided_order(start).to_vec());
            assert_eq!(flow.state(), &FlowState::Confirmed);
            assert!(flow.selection().is_complete());
        }
    }

    #[test]
    fn test_stage_does_not_mutate_selection() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Drum);
        flow.stage_candidate(first(&catalog, Category::Drum)).unwrap();

        assert!(flow.selection().is_empty());
        assert_eq!(flow.state().staged().unwrap().id, first(&catalog, Category::Drum).id);
    }

    #[test]
    fn test_restaging_replaces_candidate() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Drum);
        flow.stage_candidate(first(&catalog, Category::Drum)).unwrap();
        flow.stage_candidate(second(&catalog, Category::Drum)).unwrap();
        flow.confirm_step().unwrap();

        assert_eq!(flow.selection().drum(), Some(&second(&catalog, Category::Drum)));
    }

    #[test]
    fn test_stage_wrong_category_is_rejected() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Drum);

        let result = flow.stage_candidate(first(&catalog, Category::Lead));
        assert_eq!(
            result,
            Err(FlowError::WrongCategory {
                expected: Category::Drum,
                found: Category::Lead
            })
        );
        assert!(flow.state().staged().is_none());
    }

    #[test]
    fn test_stage_without_flow_is_rejected() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        assert_eq!(
            flow.stage_candidate(first(&catalog, Category::Drum)),
            Err(FlowError::NoActiveStep)
        );
    }

    #[test]
    fn test_confirm_with_nothing_staged_is_noop() {
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Bass);
        let before = flow.state().clone();

        assert_eq!(flow.confirm_step(), Err(FlowError::NothingStaged(Category::Bass)));
        assert_eq!(flow.state(), &before);
        assert!(flow.selection().is_empty());
    }

    #[test]
    fn test_confirm_when_idle_is_rejected() {
        let mut flow = SelectionFlow::new(170);
        assert_eq!(flow.confirm_step(), Err(FlowError::NoActiveStep));
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_confirm_advances_and_reports() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Lead);
        flow.stage_candidate(first(&catalog, Category::Lead)).unwrap();

        let outcome = flow.confirm_step().unwrap();
        assert_eq!(
            outcome,
            FlowOutcome::Advanced {
                committed: Category::Lead,
                next: Category::Drum
            }
        );
        assert!(outcome.mutated_selection());
        assert_eq!(flow.state().current_category(), Some(Category::Drum));
    }

    #[test]
    fn test_go_back_restages_committed_value_and_keeps_later_slots() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        run_guided(&mut flow, &catalog, Category::Drum);

        // Re-enter and walk to the last step without changing anything
        flow.start_flow(Category::Drum);
        flow.confirm_step().unwrap();
        flow.confirm_step().unwrap();
        assert_eq!(flow.state().current_category(), Some(Category::Lead));

        let outcome = flow.go_back().unwrap();
        assert_eq!(outcome, FlowOutcome::SteppedBack { to: Category::Bass });
        assert_eq!(flow.state().staged(), Some(&first(&catalog, Category::Bass)));

        // Later slot is untouched by stepping back
        assert_eq!(flow.selection().lead(), Some(&first(&catalog, Category::Lead)));
    }

    #[test]
    fn test_go_back_then_confirm_overwrites_only_that_slot() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Drum);
        flow.stage_candidate(first(&catalog, Category::Drum)).unwrap();
        flow.confirm_step().unwrap();
        flow.stage_candidate(first(&catalog, Category::Bass)).unwrap();
        flow.confirm_step().unwrap();

        flow.go_back().unwrap();
        flow.stage_candidate(second(&catalog, Category::Bass)).unwrap();
        flow.confirm_step().unwrap();

        assert_eq!(flow.selection().drum(), Some(&first(&catalog, Category::Drum)));
        assert_eq!(flow.selection().bass(), Some(&second(&catalog, Category::Bass)));
        assert_eq!(flow.state().current_category(), Some(Category::Lead));
    }

    #[test]
    fn test_go_back_from_first_step_cancels() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Drum);
        flow.stage_candidate(first(&catalog, Category::Drum)).unwrap();

        assert_eq!(flow.go_back(), Ok(FlowOutcome::Cancelled));
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(flow.selection().is_empty());
    }

    #[test]
    fn test_single_slot_edit_commits_directly() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        run_guided(&mut flow, &catalog, Category::Drum);

        flow.start_single_slot_edit(Category::Bass).unwrap();
        // Pre-staged with the current value
        assert_eq!(flow.state().staged(), Some(&first(&catalog, Category::Bass)));

        flow.stage_candidate(second(&catalog, Category::Bass)).unwrap();
        let outcome = flow.confirm_step().unwrap();

        assert_eq!(outcome, FlowOutcome::SlotUpdated { category: Category::Bass });
        assert_eq!(flow.selection().bass(), Some(&second(&catalog, Category::Bass)));
        assert_eq!(flow.selection().drum(), Some(&first(&catalog, Category::Drum)));
        assert_eq!(flow.state(), &FlowState::Confirmed);
    }

    #[test]
    fn test_single_slot_edit_cancel_leaves_slot() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        run_guided(&mut flow, &catalog, Category::Drum);

        flow.start_single_slot_edit(Category::Lead).unwrap();
        flow.stage_candidate(second(&catalog, Category::Lead)).unwrap();
        let outcome = flow.go_back().unwrap();

        assert_eq!(outcome, FlowOutcome::Cancelled);
        assert!(!outcome.mutated_selection());
        assert_eq!(flow.selection().lead(), Some(&first(&catalog, Category::Lead)));
        assert_eq!(flow.state(), &FlowState::Confirmed);
    }

    #[test]
    fn test_single_slot_edit_of_empty_slot_needs_a_pick() {
        let mut flow = SelectionFlow::new(170);
        flow.start_single_slot_edit(Category::Drum).unwrap();
        assert_eq!(flow.confirm_step(), Err(FlowError::NothingStaged(Category::Drum)));
        assert_eq!(flow.state().current_category(), Some(Category::Drum));
    }

    #[test]
    fn test_single_slot_edit_blocked_during_guided_flow() {
        let mut flow = SelectionFlow::new(170);
        flow.start_flow(Category::Drum);
        assert_eq!(
            flow.start_single_slot_edit(Category::Lead),
            Err(FlowError::FlowInProgress)
        );
    }

    #[test]
    fn test_set_tempo() {
        let mut flow = SelectionFlow::new(170);
        assert_eq!(flow.set_tempo(176), Ok(FlowOutcome::TempoChanged { tempo: 176 }));
        assert_eq!(flow.selection().tempo(), 176);
        assert_eq!(flow.set_tempo(0), Err(FlowError::InvalidTempo));
        assert_eq!(flow.selection().tempo(), 176);
    }

    #[test]
    fn test_seed_random_fills_all_slots() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(flow.seed_random(&catalog, &mut rng), FlowOutcome::Seeded);
        assert!(flow.selection().is_complete());
        assert_eq!(flow.state(), &FlowState::Confirmed);
        for category in Category::ALL {
            let record = flow.selection().slot(category).unwrap();
            assert_eq!(record.category(), category);
        }
    }

    #[test]
    fn test_seed_random_skips_empty_categories() {
        let catalog = Catalog::from_records(
            vec![PatternRecord::drum("d1", "D", "", "", 170, "X")],
            vec![],
            vec![],
        )
        .unwrap();
        let mut flow = SelectionFlow::new(170);
        let mut rng = StdRng::seed_from_u64(1);

        flow.seed_random(&catalog, &mut rng);
        assert_eq!(flow.selection().drum().unwrap().id, "d1");
        assert!(flow.selection().bass().is_none());
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_reset() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(174);
        run_guided(&mut flow, &catalog, Category::Bass);

        flow.reset(170);
        assert!(flow.selection().is_empty());
        assert_eq!(flow.selection().tempo(), 170);
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_restored_full_selection_is_confirmed() {
        let catalog = catalog();
        let mut flow = SelectionFlow::new(170);
        run_guided(&mut flow, &catalog, Category::Drum);

        let restored = SelectionFlow::restored(flow.selection().clone());
        assert_eq!(restored.state(), &FlowState::Confirmed);

        let partial = SelectionFlow::restored(SelectionState::new(170));
        assert_eq!(partial.state(), &FlowState::Idle);
    }
}
