use mockall::predicate::eq;
use std::collections::HashMap;

use super::*;
use crate::{
    config::StyleLayer,
    error::CardFormError,
    events::MockFormEvents,
    field::{NodeHandle, ReturnKey, Status},
    host::{
        LayoutManager, Measurement, MockFormHost, MockLayoutManager, MockScrollContainer,
        MockTextWidget, ScrollContainer, TextWidget,
    },
    state::AMERICAN_EXPRESS,
};

fn permissive_events() -> MockFormEvents {
    let mut events = MockFormEvents::new();
    events.expect_on_focus().return_const(());
    events.expect_on_change().return_const(());
    events.expect_on_submit_editing().return_const(());
    events.expect_on_become_empty().return_const(());
    events.expect_on_become_valid().return_const(());
    events
}

fn host(
    focus_counts: &[(FieldId, usize)],
    container: Option<Rc<dyn ScrollContainer>>,
) -> MockFormHost {
    let counts: HashMap<FieldId, usize> = focus_counts.iter().copied().collect();
    let mut host = MockFormHost::new();

    host.expect_create_widget().returning_st(move |field, _| {
        let mut widget = MockTextWidget::new();
        widget
            .expect_node()
            .return_const(Some(NodeHandle(1 + field.ordinal() as u64)));
        widget.expect_can_focus().return_const(true);
        widget
            .expect_focus()
            .times(counts.get(&field).copied().unwrap_or(0))
            .return_const(());
        widget.expect_can_measure_layout().return_const(false);
        widget.expect_can_measure_in_page().return_const(false);
        let widget: Rc<dyn TextWidget> = Rc::new(widget);
        Some(widget)
    });

    host.expect_scroll_container()
        .returning_st(move || container.clone());

    host
}

fn idle_container() -> Rc<dyn ScrollContainer> {
    let mut container = MockScrollContainer::new();
    container.expect_node().return_const(Some(NodeHandle(0)));
    container.expect_scroll_to().never();
    Rc::new(container)
}

fn orchestrator(events: MockFormEvents, host: MockFormHost) -> FormOrchestrator<&'static str> {
    FormOrchestrator::builder()
        .events(Rc::new(events))
        .host(Rc::new(host))
        .build()
        .unwrap()
}

fn state() -> FormState {
    let mut state = FormState {
        brand: Some("visa".to_string()),
        ..FormState::default()
    };
    state.values.insert(FieldId::Number, "4242".to_string());
    state.values.insert(FieldId::Expiry, "12/25".to_string());
    state.values.insert(FieldId::Cvc, "123".to_string());
    state.values.insert(FieldId::Name, String::new());
    state
}

#[test]
fn number_becoming_valid_notifies_once() {
    let mut events = MockFormEvents::new();
    events
        .expect_on_become_valid()
        .with(eq(FieldId::Number))
        .times(1)
        .return_const(());
    events.expect_on_become_empty().never();

    let form = orchestrator(events, host(&[], None));
    let mut state = state();
    state.status.insert(FieldId::Number, Status::Incomplete);
    form.mount(&state);

    state.status.insert(FieldId::Number, Status::Valid);
    form.update(&state);
    form.update(&state);
}

#[test]
fn cancel_flag_suppresses_number_but_not_other_fields() {
    let mut events = MockFormEvents::new();
    events
        .expect_on_become_valid()
        .with(eq(FieldId::Expiry))
        .times(1)
        .return_const(());
    events.expect_on_become_empty().never();

    let form = orchestrator(events, host(&[], None));
    let mut state = state();
    state.cancel_scroll_on_valid_number = true;
    form.mount(&state);

    state.status.insert(FieldId::Number, Status::Valid);
    state.status.insert(FieldId::Expiry, Status::Valid);
    form.update(&state);
}

#[test]
fn focus_change_without_locate_strategies_still_focuses() {
    let form = orchestrator(
        permissive_events(),
        host(
            &[(FieldId::Number, 1), (FieldId::Expiry, 1)],
            Some(idle_container()),
        ),
    );
    let mut state = state();
    state.focused = Some(FieldId::Number);
    form.mount(&state);

    state.focused = Some(FieldId::Expiry);
    form.update(&state);

    assert_eq!(form.focus_phase(), FocusPhase::Idle);
}

#[test]
fn unchanged_or_cleared_focus_does_nothing() {
    let form = orchestrator(
        permissive_events(),
        host(&[(FieldId::Cvc, 1)], Some(idle_container())),
    );
    let mut state = state();
    form.mount(&state);

    state.focused = Some(FieldId::Cvc);
    form.update(&state);
    form.update(&state);

    state.focused = None;
    form.update(&state);
}

#[test]
fn focus_scrolls_with_layout_manager() {
    let mut manager = MockLayoutManager::new();
    manager.expect_supports_measure_layout().return_const(true);
    manager
        .expect_measure_layout()
        .withf(|node, ancestor, _| {
            *node == NodeHandle(1 + FieldId::Cvc.ordinal() as u64) && *ancestor == NodeHandle(0)
        })
        .times(1)
        .returning(|_, _, done| done(Measurement::Offset(250.0)));
    let manager: Rc<dyn LayoutManager> = Rc::new(manager);

    let mut container = MockScrollContainer::new();
    container.expect_node().return_const(Some(NodeHandle(0)));
    container
        .expect_scroll_to()
        .with(eq(210.0), eq(true))
        .times(1)
        .return_const(());
    let container: Rc<dyn ScrollContainer> = Rc::new(container);

    let form: FormOrchestrator<()> = FormOrchestrator::builder()
        .events(Rc::new(permissive_events()))
        .host(Rc::new(host(&[(FieldId::Cvc, 1)], Some(container))))
        .chain(Rc::new(LocateChain::standard(Some(manager))))
        .build()
        .unwrap();

    let mut state = state();
    state.focused = Some(FieldId::Cvc);
    form.mount(&state);
}

#[test]
fn look_back_comes_from_config() {
    let mut manager = MockLayoutManager::new();
    manager.expect_supports_measure_layout().return_const(true);
    manager
        .expect_measure_layout()
        .returning(|_, _, done| done(Measurement::Offset(25.0)));
    let manager: Rc<dyn LayoutManager> = Rc::new(manager);

    let mut container = MockScrollContainer::new();
    container.expect_node().return_const(Some(NodeHandle(0)));
    container
        .expect_scroll_to()
        .with(eq(20.0), eq(true))
        .times(1)
        .return_const(());
    let container: Rc<dyn ScrollContainer> = Rc::new(container);

    let form: FormOrchestrator<()> = FormOrchestrator::builder()
        .config(FormConfig {
            look_back_offset: 5.0,
            ..FormConfig::default()
        })
        .events(Rc::new(permissive_events()))
        .host(Rc::new(host(&[(FieldId::Expiry, 1)], Some(container))))
        .chain(Rc::new(LocateChain::standard(Some(manager))))
        .build()
        .unwrap();

    let mut state = state();
    state.focused = Some(FieldId::Expiry);
    form.mount(&state);
}

#[test]
fn postal_code_is_last_without_name() {
    let form = orchestrator(permissive_events(), host(&[], None));
    let mut state = state();
    state.requires_name = false;
    state.requires_postal_code = true;
    form.mount(&state);

    let layout = form.render(&state);
    assert_eq!(
        layout.fields(),
        vec![
            FieldId::Number,
            FieldId::Expiry,
            FieldId::Cvc,
            FieldId::PostalCode
        ]
    );
    assert!(form.field(FieldId::Name).is_none());

    let postal = form.field(FieldId::PostalCode).unwrap().render();
    assert_eq!(postal.return_key, ReturnKey::Done);
    let cvc = form.field(FieldId::Cvc).unwrap().render();
    assert_eq!(cvc.return_key, ReturnKey::Next);
}

#[test]
fn cvc_is_absent_when_not_required() {
    let form = orchestrator(permissive_events(), host(&[], None));
    let mut state = state();
    state.requires_cvc = false;
    form.mount(&state);

    assert!(!form.render(&state).fields().contains(&FieldId::Cvc));
    assert!(form.field(FieldId::Cvc).is_none());
    assert_eq!(
        form.field(FieldId::Expiry).unwrap().render().return_key,
        ReturnKey::Done
    );

    state.requires_cvc = true;
    form.update(&state);
    assert!(form.render(&state).fields().contains(&FieldId::Cvc));
    assert_eq!(
        form.mounted_fields(),
        vec![FieldId::Number, FieldId::Expiry, FieldId::Cvc]
    );
}

#[test]
fn amex_cvc_placeholder() {
    let mut config = FormConfig::default();
    config.placeholders.cvc_amex = Some("1234".to_string());
    let form: FormOrchestrator<()> = FormOrchestrator::builder()
        .config(config)
        .events(Rc::new(permissive_events()))
        .host(Rc::new(host(&[], None)))
        .build()
        .unwrap();

    let mut state = state();
    state.brand = Some(AMERICAN_EXPRESS.to_string());
    form.mount(&state);
    assert_eq!(form.field(FieldId::Cvc).unwrap().render().placeholder, "1234");

    state.brand = Some("visa".to_string());
    form.update(&state);
    assert_eq!(form.field(FieldId::Cvc).unwrap().render().placeholder, "CVC");
}

#[test]
fn hidden_field_is_unmounted_and_cannot_be_focused() {
    let form = orchestrator(permissive_events(), host(&[], Some(idle_container())));
    let mut state = state();
    state.requires_name = true;
    form.mount(&state);

    let name = form.field(FieldId::Name).unwrap();
    assert!(name.widget().is_some());

    state.requires_name = false;
    form.update(&state);
    assert!(form.field(FieldId::Name).is_none());
    assert!(name.widget().is_none());

    state.focused = Some(FieldId::Name);
    form.update(&state);
    assert_eq!(form.focus_phase(), FocusPhase::Idle);
}

#[test]
fn initial_focus_is_followed_on_mount() {
    let form = orchestrator(
        permissive_events(),
        host(&[(FieldId::Expiry, 1)], Some(idle_container())),
    );
    let mut state = state();
    state.focused = Some(FieldId::Expiry);

    // first update mounts
    form.update(&state);
    assert_eq!(form.mounted_fields().len(), 3);
}

#[test]
fn horizontal_layout_places_button_after_number() {
    let form: FormOrchestrator<&'static str> = FormOrchestrator::builder()
        .events(Rc::new(permissive_events()))
        .host(Rc::new(host(&[], None)))
        .render_button(|| Some("scan"))
        .build()
        .unwrap();

    let mut state = state();
    state.requires_name = true;
    state.allow_scroll = true;
    let layout = form.render(&state);

    assert_eq!(layout.direction, StripDirection::Horizontal);
    assert!(layout.scroll_enabled);
    assert_eq!(layout.items.len(), 5);
    assert!(matches!(
        layout.items[0],
        LayoutItem::Field {
            field: FieldId::Number,
            ..
        }
    ));
    assert_eq!(layout.items[1], LayoutItem::Element("scan"));
    assert_eq!(
        layout.items[2],
        LayoutItem::Field {
            field: FieldId::Expiry,
            width: 70.0
        }
    );
}

#[test]
fn vertical_layout_groups_rows() {
    let form: FormOrchestrator<&'static str> = FormOrchestrator::builder()
        .events(Rc::new(permissive_events()))
        .host(Rc::new(host(&[], None)))
        .render_button(|| Some("scan"))
        .build()
        .unwrap();

    let mut state = state();
    state.vertical_fields = true;
    state.requires_name = true;
    state.requires_postal_code = true;
    let layout = form.render(&state);
    let width = |field| form.config().width_of(field);

    assert_eq!(layout.direction, StripDirection::Vertical);
    assert!(!layout.scroll_enabled);
    assert_eq!(
        layout.items,
        vec![
            LayoutItem::Row {
                justify: RowJustify::SpaceBetween,
                items: vec![
                    LayoutItem::Field {
                        field: FieldId::Number,
                        width: width(FieldId::Number)
                    },
                    LayoutItem::Element("scan"),
                ],
            },
            LayoutItem::Row {
                justify: RowJustify::SpaceBetween,
                items: vec![
                    LayoutItem::Field {
                        field: FieldId::Expiry,
                        width: width(FieldId::Expiry)
                    },
                    LayoutItem::Field {
                        field: FieldId::Cvc,
                        width: width(FieldId::Cvc)
                    },
                ],
            },
            LayoutItem::Row {
                justify: RowJustify::FlexStart,
                items: vec![LayoutItem::Field {
                    field: FieldId::Name,
                    width: width(FieldId::Name)
                }],
            },
            LayoutItem::Field {
                field: FieldId::PostalCode,
                width: width(FieldId::PostalCode)
            },
        ]
    );
}

#[test]
fn render_button_runs_every_render() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let form: FormOrchestrator<u32> = FormOrchestrator::builder()
        .events(Rc::new(permissive_events()))
        .host(Rc::new(host(&[], None)))
        .render_button(move || {
            counter.set(counter.get() + 1);
            None
        })
        .build()
        .unwrap();

    let state = state();
    let layout = form.render(&state);
    form.render(&state);

    assert_eq!(calls.get(), 2);
    assert_eq!(layout.items.len(), 3);
}

#[test]
fn card_face_hides_name_when_not_required() {
    let form = orchestrator(permissive_events(), host(&[], None));
    let mut state = state();
    state.values.insert(FieldId::Name, "JANE DOE".to_string());
    state.hide_cvc = true;
    state.focused = Some(FieldId::Cvc);

    let card = form.render(&state).card;
    assert_eq!(card.name, " ");
    assert_eq!(card.number, "4242");
    assert!(card.hide_cvc);
    assert!(card.shows_back());

    state.requires_name = true;
    assert_eq!(form.render(&state).card.name, "JANE DOE");
}

#[test]
fn field_props_merge_overrides() {
    let mut config = FormConfig::default();
    let mut overrides = crate::config::AdditionalProps::new();
    overrides.insert(
        "style".to_string(),
        crate::config::PropValue::Style(StyleLayer::color("blue")),
    );
    overrides.insert(
        "ref".to_string(),
        crate::config::PropValue::Text("elsewhere".to_string()),
    );
    config.additional_props.insert(FieldId::Number, overrides);

    let form: FormOrchestrator<()> = FormOrchestrator::builder()
        .config(config)
        .events(Rc::new(permissive_events()))
        .host(Rc::new(host(&[], None)))
        .build()
        .unwrap();

    let props = form.field_props(&state(), FieldId::Number);
    assert_eq!(props.style.input.last(), Some(&StyleLayer::color("blue")));
    assert!(props.pass_through.is_empty());
}

#[test]
fn unmount_drops_fields() {
    let form = orchestrator(permissive_events(), host(&[], None));
    let state = state();
    form.mount(&state);
    let number = form.field(FieldId::Number).unwrap();

    form.unmount();

    assert!(form.mounted_fields().is_empty());
    assert!(number.widget().is_none());
}

#[test]
fn builder_requires_host_and_valid_config() {
    let missing_host = FormOrchestrator::<()>::builder()
        .events(Rc::new(MockFormEvents::new()))
        .build();
    assert!(matches!(
        missing_host,
        Err(CardFormError::OrchestratorBuild(_))
    ));

    let invalid = FormOrchestrator::<()>::builder()
        .config(FormConfig {
            window_width: -1.0,
            ..FormConfig::default()
        })
        .events(Rc::new(MockFormEvents::new()))
        .host(Rc::new(MockFormHost::new()))
        .build();
    assert!(matches!(invalid, Err(CardFormError::InvalidConfig(_))));
}
