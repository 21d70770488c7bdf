// Generation flow against the scripted mock driver.

use reelscript_core::{CreativeBrief, FieldOptions, ReelLength};
use reelscript_error::{ContractErrorKind, GeminiErrorKind, ReelscriptErrorKind, ValidationField};
use reelscript_flows::generate_scripts;
use reelscript_interface::{MockDriver, scripts_payload};

fn breakfast_brief() -> CreativeBrief {
    CreativeBrief::builder()
        .topic("3-ingredient healthy breakfasts")
        .length(ReelLength::Thirty)
        .language("English")
        .tone("Motivational")
        .objective("Increase engagement")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_breakfast_brief_yields_five_clean_scripts() -> anyhow::Result<()> {
    let driver = MockDriver::new_success(scripts_payload(&[
        "**Hook:** Three ingredients. Five minutes. #breakfast",
        "Oats, banana, peanut butter. That's it. #healthy #easy",
        "Stop skipping breakfast. Try this.",
        "Greek yogurt, berries, honey. **Done.**",
        "Eggs, spinach, toast. Fuel your morning! #morningroutine",
    ]));

    let set = generate_scripts(&driver, &breakfast_brief(), &FieldOptions::default()).await?;

    assert_eq!(set.scripts().len(), 5);
    for script in &set {
        assert!(!script.is_empty());
        assert!(!script.contains("**"));
        assert!(!script.contains('#'));
    }
    assert_eq!(set.scripts()[0], "Hook: Three ingredients. Five minutes.");
    assert_eq!(driver.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_one_call_carries_brief_and_schema() -> anyhow::Result<()> {
    let driver = MockDriver::new_success(scripts_payload(&["a", "b", "c", "d", "e"]));

    generate_scripts(&driver, &breakfast_brief(), &FieldOptions::default()).await?;

    let requests = driver.requests();
    assert_eq!(requests.len(), 1);
    let schema = requests[0].response_schema.clone().expect("schema");
    assert_eq!(schema["properties"]["scripts"]["maxItems"], 5);
    assert!(requests[0].messages[1].content.contains("3-ingredient healthy breakfasts"));
    Ok(())
}

#[tokio::test]
async fn test_missing_scripts_field_fails() {
    let driver = MockDriver::new_success(r#"{"ideas": ["a", "b", "c", "d", "e"]}"#);

    let err = generate_scripts(&driver, &breakfast_brief(), &FieldOptions::default())
        .await
        .unwrap_err();

    match err.kind() {
        ReelscriptErrorKind::Contract(contract) => {
            assert_eq!(contract.kind, ContractErrorKind::MissingField("scripts"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_four_scripts_fail() {
    let driver = MockDriver::new_success(scripts_payload(&["a", "b", "c", "d"]));

    let err = generate_scripts(&driver, &breakfast_brief(), &FieldOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ReelscriptErrorKind::Contract(c)
            if c.kind == ContractErrorKind::WrongCount { expected: 5, actual: 4 }
    ));
}

#[tokio::test]
async fn test_invalid_brief_never_calls_driver() {
    let driver = MockDriver::new_success(scripts_payload(&["a", "b", "c", "d", "e"]));
    let brief = CreativeBrief::builder()
        .topic("oats")
        .tone("Grumpy")
        .build()
        .unwrap();

    let err = generate_scripts(&driver, &brief, &FieldOptions::default())
        .await
        .unwrap_err();

    let validation = err.as_validation().expect("validation error");
    let fields: Vec<_> = validation.issues.iter().map(|i| i.field()).collect();
    assert_eq!(fields, vec![ValidationField::Topic, ValidationField::Tone]);
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_driver_error_propagates() {
    let driver = MockDriver::new_error(GeminiErrorKind::HttpError {
        status_code: 503,
        message: "overloaded".into(),
    });

    let err = generate_scripts(&driver, &breakfast_brief(), &FieldOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ReelscriptErrorKind::Gemini(_)));
    assert_eq!(driver.call_count(), 1);
}
