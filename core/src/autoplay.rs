use crate::*;

/// Anything that answers reveals and shows what has been revealed so far.
pub trait Session {
    fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome>;

    fn snapshot(&self) -> Snapshot;

    fn state(&self) -> EngineState;
}

impl Session for PlayEngine {
    fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        PlayEngine::reveal(self, coords)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    fn state(&self) -> EngineState {
        PlayEngine::state(self)
    }
}

/// Plays `session` to the end, reporting each decision and its outcome to `observer`.
///
/// Returns the final state, or [`GameError::NoMoveAvailable`] if the solver runs out of cells while the game is
/// still going.
pub fn autoplay<S, F>(session: &mut S, solver: &mut Solver, mut observer: F) -> Result<EngineState>
where
    S: Session + ?Sized,
    F: FnMut(&Decision, RevealOutcome),
{
    while !session.state().is_finished() {
        let snapshot = session.snapshot();
        let Some(decision) = solver.decide(&snapshot)? else {
            log::error!("no cell left to reveal in state {:?}", session.state());
            return Err(GameError::NoMoveAvailable);
        };

        let outcome = session.reveal(decision.coords)?;
        log::debug!("revealed {:?} via {:?}: {outcome:?}", decision.coords, decision.strategy);
        if !outcome.has_update() {
            log::warn!("reveal of {:?} changed nothing", decision.coords);
        }
        observer(&decision, outcome);
    }

    Ok(session.state())
}
