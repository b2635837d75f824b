use rstage::actions::{self, Action, ActionExt, ActionPool, Binding, DelayAction};
use rstage::scene::{Actor, ActorId, ActorTree};
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<&'static str>>>;

/// Completes after `ticks` acts, logging each call.
fn ticking(label: &'static str, ticks: u32, log: &Log) -> Box<dyn Action> {
    let log = log.clone();
    let mut remaining = ticks;
    actions::custom(move |_, _| {
        log.lock().unwrap().push(label);
        remaining = remaining.saturating_sub(1);
        remaining == 0
    })
    .boxed()
}

fn tree_with_actor() -> (ActorTree, ActorId) {
    let mut tree = ActorTree::new();
    let id = tree.create("subject");
    (tree, id)
}

/// Ticks `id` until its queue empties. Returns the number of ticks.
fn run_to_completion(tree: &mut ActorTree, id: ActorId, delta: f32) -> u32 {
    let mut ticks = 0;
    while tree.has_actions(id) {
        tree.update(id, delta);
        ticks += 1;
        assert!(ticks < 1000, "action never completed");
    }
    ticks
}

#[test]
fn completed_actions_stay_complete_without_side_effects() {
    let (mut tree, id) = tree_with_actor();
    let mut stock: Vec<Box<dyn Action>> = vec![
        actions::move_to(10.0, 10.0, 0.1, None).boxed(),
        actions::move_by(5.0, 0.0, 0.1, None).boxed(),
        actions::rotate_by(90.0, 0.1, None).boxed(),
        actions::sequence(vec![actions::delay(0.05).boxed(), actions::hide().boxed()]).boxed(),
        actions::parallel(vec![actions::scale_to(2.0, 2.0, 0.1, None).boxed()]).boxed(),
        actions::repeat(2, actions::size_by(1.0, 1.0, 0.05, None)).boxed(),
        actions::run(|| {}).boxed(),
    ];
    for action in &mut stock {
        action.attach(id);
        let mut guard = 0;
        while !action.act(0.05, &mut tree) {
            guard += 1;
            assert!(guard < 100);
        }
        let before = format!("{:?}", tree.get(id).unwrap());
        for _ in 0..3 {
            assert!(action.act(0.05, &mut tree));
        }
        assert_eq!(format!("{:?}", tree.get(id).unwrap()), before);
    }
}

#[test]
fn temporal_percent_lands_exactly_on_one() {
    let (mut tree, id) = tree_with_actor();
    let percents = Arc::new(Mutex::new(Vec::new()));
    let recorded = percents.clone();
    tree.add_action(
        id,
        actions::temporal(1.0, None, move |_: &mut Actor, percent: f32| {
            recorded.lock().unwrap().push(percent)
        }),
    )
    .unwrap();

    assert_eq!(run_to_completion(&mut tree, id, 0.25), 4);
    assert_eq!(*percents.lock().unwrap(), vec![0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn sequence_takes_the_sum_of_its_children() {
    let (mut tree, id) = tree_with_actor();
    let log = Log::default();
    tree.add_action(
        id,
        actions::sequence(vec![
            ticking("a", 2, &log),
            ticking("b", 1, &log),
            ticking("c", 3, &log),
        ]),
    )
    .unwrap();

    assert_eq!(run_to_completion(&mut tree, id, 0.016), 6);
    assert_eq!(*log.lock().unwrap(), vec!["a", "a", "b", "c", "c", "c"]);
}

#[test]
fn parallel_completes_with_its_slowest_child() {
    let (mut tree, id) = tree_with_actor();
    let log = Log::default();
    tree.add_action(
        id,
        actions::parallel(vec![ticking("a", 3, &log), ticking("b", 5, &log)]),
    )
    .unwrap();

    assert_eq!(run_to_completion(&mut tree, id, 0.016), 5);
    let log = log.lock().unwrap();
    assert_eq!(log.iter().filter(|l| **l == "a").count(), 3);
    assert_eq!(log.iter().filter(|l| **l == "b").count(), 5);
}

#[test]
fn only_the_front_action_advances() {
    let (mut tree, id) = tree_with_actor();
    let log = Log::default();
    tree.add_action(id, ticking("first", 2, &log)).unwrap();
    tree.add_action(id, ticking("second", 1, &log)).unwrap();
    tree.add_action(id, ticking("third", 1, &log)).unwrap();

    tree.update(id, 0.016);
    tree.update(id, 0.016);
    assert_eq!(*log.lock().unwrap(), vec!["first", "first"]);
    assert_eq!(tree.get(id).unwrap().action_count(), 2);

    tree.update(id, 0.016);
    tree.update(id, 0.016);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["first", "first", "second", "third"]
    );
    assert!(!tree.has_actions(id));
}

#[test]
fn action_can_drive_another_actor() {
    let mut tree = ActorTree::new();
    let director = tree.create("director");
    let puppet = tree.insert(Actor::new("puppet").with_position(0.0, 0.0));
    tree.add_action(
        director,
        actions::move_to(40.0, 20.0, 0.5, None).targeting(puppet),
    )
    .unwrap();

    run_to_completion(&mut tree, director, 0.25);
    let puppet = tree.get(puppet).unwrap();
    assert_eq!((puppet.x, puppet.y), (40.0, 20.0));
    assert_eq!(tree.get(director).unwrap().x, 0.0);
}

#[test]
fn removing_the_owner_aborts_a_sequence() {
    let mut tree = ActorTree::new();
    let root = tree.create("root");
    let doomed = tree.create("doomed");
    tree.add_child(root, doomed).unwrap();
    let log = Log::default();

    let mut seq = actions::sequence(vec![
        actions::custom(|_, _| true).boxed(),
        ticking("never", 1, &log),
    ]);
    seq.attach(doomed);
    tree.destroy(doomed);

    assert!(seq.act(0.016, &mut tree));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn pooled_actions_are_recycled_blank() {
    let pool: ActionPool<DelayAction> = ActionPool::new(8);
    let (mut tree, id) = tree_with_actor();

    for _ in 0..3 {
        let delay = pool.obtain().configure(|delay| delay.set_duration(0.1));
        tree.add_action(id, delay).unwrap();
        run_to_completion(&mut tree, id, 0.05);
        assert_eq!(pool.free_count(), 1);

        let reused = pool.obtain();
        assert_eq!(reused.actor(), None);
        assert_eq!(reused.target(), None);
        assert_eq!(reused.get().map(|d| d.time()), Some(0.0));
        pool.release(DelayAction::default());
    }
}

#[test]
fn forever_only_stops_when_removed() {
    let (mut tree, id) = tree_with_actor();
    tree.add_action(id, actions::forever(actions::rotate_by(10.0, 0.1, None)))
        .unwrap();
    for _ in 0..50 {
        tree.update(id, 0.1);
    }
    assert!(tree.has_actions(id));
    assert_eq!(tree.get(id).unwrap().rotation, 500.0);

    assert!(tree.remove_action(id, 0));
    tree.update(id, 0.1);
    assert_eq!(tree.get(id).unwrap().rotation, 500.0);
}

/// Drops its owner's actions from inside `act`, optionally only the front one.
#[derive(Default)]
struct DropOwnActions {
    binding: Binding,
    front_only: bool,
    finish: bool,
}

impl Action for DropOwnActions {
    fn act(&mut self, _delta: f32, actors: &mut ActorTree) -> bool {
        if let Some(owner) = self.binding.actor {
            if self.front_only {
                actors.remove_action(owner, 0);
            } else {
                actors.clear_actions(owner);
            }
        }
        self.finish
    }

    fn restart(&mut self) {}

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

fn counting_run(calls: &Arc<Mutex<u32>>) -> Box<dyn Action> {
    let calls = calls.clone();
    actions::run(move || *calls.lock().unwrap() += 1).boxed()
}

#[test]
fn clearing_actions_mid_act_stops_the_running_sequence() {
    let (mut tree, id) = tree_with_actor();
    let calls = Arc::new(Mutex::new(0));
    let clear = DropOwnActions {
        finish: true,
        ..DropOwnActions::default()
    };
    tree.add_action(
        id,
        actions::sequence(vec![clear.boxed(), counting_run(&calls)]),
    )
    .unwrap();
    tree.add_action(id, actions::hide()).unwrap();

    for _ in 0..3 {
        tree.update(id, 0.1);
    }
    assert_eq!(*calls.lock().unwrap(), 0);
    assert!(!tree.has_actions(id));
    assert!(tree.get(id).unwrap().visible);
}

#[test]
fn clearing_actions_mid_act_stops_parallel_siblings() {
    let (mut tree, id) = tree_with_actor();
    let calls = Arc::new(Mutex::new(0));
    tree.add_action(
        id,
        actions::parallel(vec![
            DropOwnActions::default().boxed(),
            counting_run(&calls),
        ]),
    )
    .unwrap();

    tree.update(id, 0.1);
    tree.update(id, 0.1);
    assert_eq!(*calls.lock().unwrap(), 0);
    assert!(!tree.has_actions(id));
}

#[test]
fn removing_the_acting_action_detaches_it_into_its_pool() {
    let pool: ActionPool<DropOwnActions> = ActionPool::new(4);
    let (mut tree, id) = tree_with_actor();
    let front = pool.obtain().configure(|action| action.front_only = true);
    tree.add_action(id, front).unwrap();
    tree.add_action(id, actions::delay(1.0)).unwrap();
    assert_eq!(tree.get(id).unwrap().action_count(), 2);

    tree.update(id, 0.1);
    assert_eq!(pool.free_count(), 1);
    assert_eq!(tree.get(id).unwrap().action_count(), 1);

    // The delay is now at the front and runs normally.
    tree.update(id, 1.0);
    assert!(!tree.has_actions(id));
}
