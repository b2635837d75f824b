//! Duration-driven actions.

use super::{Action, Binding, Interpolation};
use crate::scene::{Actor, ActorTree};

/// What a [`TemporalAction`] does to its target at each percent step.
pub trait Tween: Send {
    /// Called on the first tick, before the first update.
    fn begin(&mut self, _target: &Actor) {}

    fn update(&mut self, target: &mut Actor, percent: f32);

    /// Called once, right after the final update.
    fn end(&mut self, _target: &mut Actor) {}
}

impl<F> Tween for F
where
    F: FnMut(&mut Actor, f32) + Send,
{
    fn update(&mut self, target: &mut Actor, percent: f32) {
        self(target, percent)
    }
}

/// Interpolates percent-complete over a duration and feeds it to a tween.
///
/// The final tick always delivers exactly `1.0`, whatever the interpolation,
/// so the target lands on its end value. In relative mode the tween receives
/// the change in percent since the previous tick instead.
#[derive(Debug, Clone, Default)]
pub struct TemporalAction<T> {
    binding: Binding,
    duration: f32,
    elapsed: f32,
    interpolation: Option<Interpolation>,
    relative: bool,
    last_percent: f32,
    began: bool,
    complete: bool,
    tween: T,
}

impl<T: Tween> TemporalAction<T> {
    pub fn new(duration: f32, interpolation: Option<Interpolation>, tween: T) -> Self {
        Self {
            binding: Binding::default(),
            duration,
            elapsed: 0.0,
            interpolation,
            relative: false,
            last_percent: 0.0,
            began: false,
            complete: false,
            tween,
        }
    }

    pub fn relative(duration: f32, interpolation: Option<Interpolation>, tween: T) -> Self {
        Self {
            relative: true,
            ..Self::new(duration, interpolation, tween)
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn set_interpolation(&mut self, interpolation: Option<Interpolation>) {
        self.interpolation = interpolation;
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Jumps to the end; the next act delivers percent 1.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    pub fn tween(&self) -> &T {
        &self.tween
    }

    pub fn tween_mut(&mut self) -> &mut T {
        &mut self.tween
    }
}

impl<T: Tween> Action for TemporalAction<T> {
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool {
        if self.complete {
            return true;
        }
        let Some(target) = self.binding.target.and_then(|id| actors.get_mut(id)) else {
            log::warn!("SCENE: Temporal action has no live target, finishing");
            self.complete = true;
            return true;
        };

        if !self.began {
            self.tween.begin(target);
            self.began = true;
        }

        self.elapsed += delta;
        self.complete = self.elapsed >= self.duration;
        let percent = if self.complete {
            1.0
        } else {
            let percent = self.elapsed / self.duration;
            match &self.interpolation {
                Some(interpolation) => interpolation.apply(percent),
                None => percent,
            }
        };

        if self.relative {
            let step = percent - self.last_percent;
            self.last_percent = percent;
            self.tween.update(target, step);
        } else {
            self.tween.update(target, percent);
        }

        if self.complete {
            self.tween.end(target);
        }
        self.complete
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
        self.last_percent = 0.0;
        self.began = false;
        self.complete = false;
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionExt;
    use std::sync::{Arc, Mutex};

    fn recording(
        percents: &Arc<Mutex<Vec<f32>>>,
    ) -> impl FnMut(&mut Actor, f32) + Send + 'static {
        let percents = percents.clone();
        move |_actor: &mut Actor, percent: f32| percents.lock().unwrap().push(percent)
    }

    #[test]
    fn test_percent_reaches_exactly_one() {
        let mut tree = ActorTree::new();
        let id = tree.create("a");
        let percents = Arc::new(Mutex::new(Vec::new()));
        let mut action = TemporalAction::new(1.0, None, recording(&percents));
        action.attach(id);

        let results: Vec<bool> = (0..4).map(|_| action.act(0.25, &mut tree)).collect();
        assert_eq!(results, vec![false, false, false, true]);
        assert_eq!(*percents.lock().unwrap(), vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_interpolated_final_step_is_exact() {
        let mut tree = ActorTree::new();
        let id = tree.create("a");
        let percents = Arc::new(Mutex::new(Vec::new()));
        let mut action = TemporalAction::new(
            0.3,
            Some(Interpolation::Custom(|a| a * 0.9)),
            recording(&percents),
        );
        action.attach(id);
        for _ in 0..4 {
            action.act(0.1, &mut tree);
        }
        let percents = percents.lock().unwrap();
        assert!(percents[0] < 0.34);
        assert_eq!(percents.last().copied(), Some(1.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut tree = ActorTree::new();
        let id = tree.create("a");
        let percents = Arc::new(Mutex::new(Vec::new()));
        let mut action = TemporalAction::new(0.0, None, recording(&percents));
        action.attach(id);
        assert!(action.act(0.0, &mut tree));
        assert_eq!(*percents.lock().unwrap(), vec![1.0]);
    }

    #[test]
    fn test_completion_is_idempotent_until_restart() {
        let mut tree = ActorTree::new();
        let id = tree.create("a");
        let percents = Arc::new(Mutex::new(Vec::new()));
        let mut action = TemporalAction::new(0.1, None, recording(&percents));
        action.attach(id);
        assert!(action.act(0.2, &mut tree));
        assert!(action.act(0.2, &mut tree));
        assert_eq!(percents.lock().unwrap().len(), 1);

        action.restart();
        assert!(action.act(0.2, &mut tree));
        assert_eq!(percents.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_relative_deltas_sum_to_one() {
        let mut tree = ActorTree::new();
        let id = tree.create("a");
        let percents = Arc::new(Mutex::new(Vec::new()));
        let mut action = TemporalAction::relative(1.0, None, recording(&percents));
        action.attach(id);
        for _ in 0..4 {
            action.act(0.25, &mut tree);
        }
        let steps = percents.lock().unwrap().clone();
        assert_eq!(steps, vec![0.25, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_missing_target_finishes() {
        let mut tree = ActorTree::new();
        let id = tree.create("gone");
        let percents = Arc::new(Mutex::new(Vec::new()));
        let mut action = TemporalAction::new(1.0, None, recording(&percents)).targeting(id);
        tree.destroy(id);
        assert!(action.act(0.1, &mut tree));
        assert!(percents.lock().unwrap().is_empty());
    }
}
