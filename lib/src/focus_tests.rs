use mockall::{Sequence, predicate::eq};

use super::*;
use crate::{
    events::MockFormEvents,
    field::NodeHandle,
    host::{MeasureCallback, MockScrollContainer, MockTextWidget},
    locate::{LocateKind, LocateStrategy, MockLocateStrategy},
    props::FieldProps,
};

/// Strategy that holds on to its callbacks until the test releases them
#[derive(Default)]
struct DeferredLocate {
    pending: RefCell<Vec<MeasureCallback>>,
}

impl DeferredLocate {
    fn complete_oldest(&self, measurement: Measurement) {
        let done = self.pending.borrow_mut().remove(0);
        done(measurement);
    }
}

impl LocateStrategy for DeferredLocate {
    fn kind(&self) -> LocateKind {
        LocateKind::LayoutManager
    }

    fn is_available(&self, _request: &LocateRequest) -> bool {
        true
    }

    fn locate(&self, _request: &LocateRequest, done: MeasureCallback) {
        self.pending.borrow_mut().push(done);
    }
}

fn widget(focus_times: usize) -> MockTextWidget {
    let mut widget = MockTextWidget::new();
    widget.expect_node().return_const(Some(NodeHandle(2)));
    widget.expect_can_focus().return_const(true);
    widget.expect_focus().times(focus_times).return_const(());
    widget
}

fn input(field: FieldId, widget: MockTextWidget) -> Rc<FieldInput> {
    let input = Rc::new(FieldInput::new(
        FieldProps::new(field),
        Rc::new(MockFormEvents::new()),
    ));
    input.mount_widget(Rc::new(widget));
    input
}

fn container(scrolls: &[f64]) -> Rc<dyn ScrollContainer> {
    let mut container = MockScrollContainer::new();
    container.expect_node().return_const(Some(NodeHandle(0)));
    if scrolls.is_empty() {
        container.expect_scroll_to().never();
    }
    for x in scrolls {
        container
            .expect_scroll_to()
            .with(eq(*x), eq(true))
            .times(1)
            .return_const(());
    }
    Rc::new(container)
}

fn unavailable() -> Rc<dyn LocateStrategy> {
    let mut strategy = MockLocateStrategy::new();
    strategy.expect_kind().return_const(LocateKind::WidgetPage);
    strategy.expect_is_available().return_const(false);
    strategy.expect_locate().never();
    Rc::new(strategy)
}

fn chain_of(strategies: Vec<Rc<dyn LocateStrategy>>) -> Rc<LocateChain> {
    Rc::new(LocateChain::new(strategies))
}

fn deferred_chain() -> (Rc<DeferredLocate>, Rc<LocateChain>) {
    let deferred = Rc::new(DeferredLocate::default());
    let strategy: Rc<dyn LocateStrategy> = deferred.clone();
    (deferred, chain_of(vec![strategy]))
}

fn measuring(measurement: Measurement) -> Rc<dyn LocateStrategy> {
    let mut strategy = MockLocateStrategy::new();
    strategy.expect_kind().return_const(LocateKind::WidgetRelative);
    strategy.expect_is_available().return_const(true);
    strategy
        .expect_locate()
        .times(1)
        .returning(move |_, done| done(measurement));
    Rc::new(strategy)
}

#[test]
fn scroll_destination_keeps_look_back_margin() {
    assert_eq!(scroll_destination(100.0, 40.0), 60.0);
    assert_eq!(scroll_destination(40.0, 40.0), 0.0);
    assert_eq!(scroll_destination(12.0, 40.0), 0.0);
    assert_eq!(scroll_destination(0.0, 40.0), 0.0);
    assert_eq!(scroll_destination(10.0, 0.0), 10.0);
}

#[test]
fn focuses_without_scrolling_when_no_strategy_is_available() {
    let chain = chain_of(vec![
        unavailable(),
        unavailable(),
        unavailable(),
        unavailable(),
    ]);
    let target = input(FieldId::Expiry, widget(1));
    let container = container(&[]);
    let follower = FocusFollower::default();

    follower.request(&target, Some(container), &chain, 40.0);

    assert_eq!(follower.phase(), FocusPhase::Idle);
}

#[test]
fn scrolls_then_focuses_on_measurement() {
    let mut seq = Sequence::new();

    let mut mock_widget = MockTextWidget::new();
    mock_widget.expect_node().return_const(Some(NodeHandle(2)));
    mock_widget.expect_can_focus().return_const(true);

    let mut mock_container = MockScrollContainer::new();
    mock_container.expect_node().return_const(Some(NodeHandle(0)));
    mock_container
        .expect_scroll_to()
        .with(eq(160.0), eq(true))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mock_widget
        .expect_focus()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let chain = chain_of(vec![measuring(Measurement::Offset(200.0))]);
    let target = input(FieldId::Cvc, mock_widget);
    let container: Rc<dyn ScrollContainer> = Rc::new(mock_container);

    FocusFollower::default().request(&target, Some(container), &chain, 40.0);
}

#[test]
fn failed_measurement_falls_through_to_next_strategy() {
    let chain = chain_of(vec![
        unavailable(),
        measuring(Measurement::Failed),
        measuring(Measurement::Offset(30.0)),
    ]);
    let target = input(FieldId::Name, widget(1));
    let container = container(&[0.0]);

    FocusFollower::default().request(&target, Some(container), &chain, 40.0);
}

#[test]
fn every_strategy_failing_still_focuses() {
    let chain = chain_of(vec![
        measuring(Measurement::Failed),
        measuring(Measurement::Failed),
    ]);
    let target = input(FieldId::Number, widget(1));

    FocusFollower::default().request(&target, Some(container(&[])), &chain, 40.0);
}

#[test]
fn missing_container_focuses_without_measuring() {
    let mut strategy = MockLocateStrategy::new();
    strategy.expect_is_available().never();
    strategy.expect_locate().never();
    let strategy: Rc<dyn LocateStrategy> = Rc::new(strategy);
    let chain = chain_of(vec![strategy]);
    let target = input(FieldId::Expiry, widget(1));

    FocusFollower::default().request(&target, None, &chain, 40.0);
}

#[test]
fn deferred_measurement_completes_later() {
    let (deferred, chain) = deferred_chain();
    let target = input(FieldId::Expiry, widget(1));
    let follower = FocusFollower::default();

    let container = container(&[80.0]);

    follower.request(&target, Some(Rc::clone(&container)), &chain, 40.0);
    assert_eq!(follower.phase(), FocusPhase::FocusRequested(FieldId::Expiry));

    deferred.complete_oldest(Measurement::Offset(120.0));
    assert_eq!(follower.phase(), FocusPhase::Idle);
}

#[test]
fn newer_request_supersedes_pending_one() {
    let (deferred, chain) = deferred_chain();
    let expiry = input(FieldId::Expiry, widget(0));
    let cvc = input(FieldId::Cvc, widget(1));
    let container = container(&[200.0]);
    let follower = FocusFollower::default();

    follower.request(&expiry, Some(Rc::clone(&container)), &chain, 40.0);
    follower.request(&cvc, Some(Rc::clone(&container)), &chain, 40.0);
    assert_eq!(follower.phase(), FocusPhase::FocusRequested(FieldId::Cvc));

    // the stale expiry measurement neither scrolls nor focuses
    deferred.complete_oldest(Measurement::Offset(100.0));
    assert_eq!(follower.phase(), FocusPhase::FocusRequested(FieldId::Cvc));

    deferred.complete_oldest(Measurement::Offset(240.0));
    assert_eq!(follower.phase(), FocusPhase::Idle);
}

#[test]
fn stale_failure_does_not_retry() {
    let deferred = Rc::new(DeferredLocate::default());
    let first: Rc<dyn LocateStrategy> = deferred.clone();
    let chain = chain_of(vec![first, measuring(Measurement::Offset(500.0))]);
    let number = input(FieldId::Number, widget(0));
    let cvc = input(FieldId::Cvc, widget(1));
    let container = container(&[460.0]);
    let follower = FocusFollower::default();

    follower.request(&number, Some(Rc::clone(&container)), &chain, 40.0);
    follower.request(&cvc, Some(Rc::clone(&container)), &chain, 40.0);

    // stale: must not reach the fallback strategy
    deferred.complete_oldest(Measurement::Failed);
    // current: falls through to the fallback once
    deferred.complete_oldest(Measurement::Failed);
    assert_eq!(follower.phase(), FocusPhase::Idle);
}

#[test]
fn unmounted_container_skips_scroll_but_focuses() {
    let (deferred, chain) = deferred_chain();
    let target = input(FieldId::Expiry, widget(1));
    let follower = FocusFollower::default();

    follower.request(&target, Some(container(&[])), &chain, 40.0);

    // the container above was the only strong reference and is gone
    deferred.complete_oldest(Measurement::Offset(300.0));
    assert_eq!(follower.phase(), FocusPhase::Idle);
}

#[test]
fn unmounted_target_is_a_no_op() {
    let (deferred, chain) = deferred_chain();
    let container = container(&[0.0]);
    let follower = FocusFollower::default();

    let target = input(FieldId::Name, widget(0));
    follower.request(&target, Some(Rc::clone(&container)), &chain, 40.0);
    drop(target);

    deferred.complete_oldest(Measurement::Offset(10.0));
    assert_eq!(follower.phase(), FocusPhase::Idle);
}
