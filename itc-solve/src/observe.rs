/// Hook called by [`brent::solve`](crate::brent::solve) after every step.
///
/// The solver hands over a [`brent::Event`](crate::brent::Event) describing
/// the new estimate and how it was reached. Returning
/// `Some(Action::StopEarly)` ends the solve with the better of the last two
/// estimates; returning `None` keeps iterating.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, so a solve can be
/// logged or recorded inline. Pass `()` to ignore every event.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::brent::{self, Action, Config, Status, Step};

    #[test]
    fn history_records_every_step() {
        let mut history: Vec<brent::Event> = Vec::new();
        let recorder = |event: &brent::Event| -> Option<Action> {
            history.push(*event);
            None
        };
        let solution = brent::solve(&|x: f64| x * x - 2.0, [0.0, 2.0], &Config::default(), recorder)
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(history.len(), solution.iters);
        assert!(history.iter().enumerate().all(|(i, event)| event.iter == i + 1));
        assert!(history.iter().any(|event| event.step != Step::Bisection));
    }

    #[test]
    fn unit_never_intervenes() {
        let action: Option<Action> = Observer::observe(&mut (), &1.0_f64);
        assert!(action.is_none());
    }
}
