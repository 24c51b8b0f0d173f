use super::*;
use crate::state::AMERICAN_EXPRESS;

fn visa_state() -> FormState {
    let mut state = FormState {
        brand: Some("visa".to_string()),
        requires_name: true,
        ..FormState::default()
    };
    state.values.insert(FieldId::Number, "4242".to_string());
    state.values.insert(FieldId::Expiry, "12/25".to_string());
    state.values.insert(FieldId::Cvc, "123".to_string());
    state.status.insert(FieldId::Number, Status::Valid);
    state
}

#[test]
fn looks_up_shared_maps() {
    let config = FormConfig::default();
    let state = visa_state();

    let props = compute_field_props(&config, &state, FieldId::Number);
    assert_eq!(props.field, FieldId::Number);
    assert_eq!(props.label, "CARD NUMBER");
    assert_eq!(props.placeholder, "1234 5678 1234 5678");
    assert_eq!(props.value, "4242");
    assert_eq!(props.status, Status::Valid);
    assert_eq!(props.keyboard, KeyboardType::Numeric);
    assert_eq!(props.invalid_color.as_deref(), Some("red"));
    assert_eq!(props.valid_color, None);
    assert_eq!(props.width, config.width_of(FieldId::Number));

    let name = compute_field_props(&config, &state, FieldId::Name);
    assert_eq!(name.value, "");
    assert_eq!(name.status, Status::Incomplete);
    assert_eq!(name.keyboard, KeyboardType::Default);
    assert!(name.is_last);
}

#[test]
fn amex_cvc_uses_dedicated_placeholder_when_supplied() {
    let mut config = FormConfig::default();
    let mut state = visa_state();
    state.brand = Some(AMERICAN_EXPRESS.to_string());

    let cvc = compute_field_props(&config, &state, FieldId::Cvc);
    assert_eq!(cvc.placeholder, "CVC");

    config.placeholders.cvc_amex = Some("1234".to_string());
    let cvc = compute_field_props(&config, &state, FieldId::Cvc);
    assert_eq!(cvc.placeholder, "1234");

    state.brand = Some("visa".to_string());
    let cvc = compute_field_props(&config, &state, FieldId::Cvc);
    assert_eq!(cvc.placeholder, "CVC");
}

#[test]
fn only_cvc_is_masked_and_only_when_hidden() {
    let config = FormConfig::default();
    let mut state = visa_state();

    assert!(!compute_field_props(&config, &state, FieldId::Cvc).masked);

    state.hide_cvc = true;
    assert!(compute_field_props(&config, &state, FieldId::Cvc).masked);
    assert!(!compute_field_props(&config, &state, FieldId::Number).masked);
}

#[test]
fn cancel_scroll_flag_only_reaches_number_field() {
    let config = FormConfig::default();
    let mut state = visa_state();
    state.cancel_scroll_on_valid_number = true;

    assert!(compute_field_props(&config, &state, FieldId::Number).cancel_scroll_on_valid);
    assert!(!compute_field_props(&config, &state, FieldId::Expiry).cancel_scroll_on_valid);
}

#[test]
fn filter_keeps_whitelisted_keys_and_extracts_style() {
    let mut raw = AdditionalProps::new();
    raw.insert("max_length".to_string(), PropValue::Number(4.0));
    raw.insert("editable".to_string(), PropValue::Bool(false));
    raw.insert("ref".to_string(), PropValue::Text("other".to_string()));
    raw.insert("on_change".to_string(), PropValue::Text("nope".to_string()));
    raw.insert(
        "style".to_string(),
        PropValue::Style(StyleLayer::color("blue")),
    );

    let filtered = filter_additional_props(&raw);

    assert_eq!(filtered.pass_through.len(), 2);
    assert_eq!(
        filtered.pass_through.get("max_length"),
        Some(&PropValue::Number(4.0))
    );
    assert!(filtered.pass_through.get("ref").is_none());
    assert!(filtered.pass_through.get("style").is_none());
    assert!(filtered.pass_through.get("on_change").is_none());
    assert_eq!(filtered.style, Some(StyleLayer::color("blue")));
}

#[test]
fn style_override_that_is_not_a_layer_is_dropped() {
    let mut raw = AdditionalProps::new();
    raw.insert("style".to_string(), PropValue::Text("red".to_string()));

    let filtered = filter_additional_props(&raw);
    assert_eq!(filtered, FilteredProps::default());
}

#[test]
fn override_style_is_appended_to_computed_stack() {
    let mut config = FormConfig {
        input_style: StyleLayer {
            bold: Some(true),
            ..StyleLayer::default()
        },
        ..FormConfig::default()
    };
    let mut raw = AdditionalProps::new();
    raw.insert(
        "style".to_string(),
        PropValue::Style(StyleLayer::color("blue")),
    );
    raw.insert("max_length".to_string(), PropValue::Number(19.0));
    config.additional_props.insert(FieldId::Number, raw);

    let props = compute_field_props(&config, &visa_state(), FieldId::Number);

    assert_eq!(props.style.input.len(), 3);
    assert_eq!(props.style.input[0], StyleLayer::color("black"));
    assert_eq!(props.style.input[1], config.input_style);
    assert_eq!(props.style.input[2], StyleLayer::color("blue"));
    assert_eq!(props.pass_through_usize("max_length"), Some(19));
    assert_eq!(props.pass_through_bool("editable"), None);

    let expiry = compute_field_props(&config, &visa_state(), FieldId::Expiry);
    assert_eq!(expiry.style.input.len(), 2);
    assert!(expiry.pass_through.is_empty());
}
