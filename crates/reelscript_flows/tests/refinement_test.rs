// Refinement flow against the scripted mock driver.

use reelscript_core::{CreativeBrief, RefinementGoal, RefinementRequest};
use reelscript_error::{ContractErrorKind, ReelscriptErrorKind};
use reelscript_flows::refine_script;
use reelscript_interface::MockDriver;

fn request(goal: RefinementGoal) -> RefinementRequest {
    let brief = CreativeBrief::builder()
        .topic("3-ingredient healthy breakfasts")
        .build()
        .unwrap();
    RefinementRequest::from_brief(
        "Oats. Banana. Peanut butter. Blend it, pour it, own your morning. Follow for more!",
        &brief,
        &goal,
    )
}

#[tokio::test]
async fn test_concise_refinement() -> anyhow::Result<()> {
    let driver = MockDriver::new_success(
        r#"{"refinedScript": "**Oats. Banana. Peanut butter.** Own your morning. #breakfast"}"#,
    );

    let result = refine_script(&driver, &request(RefinementGoal::Shorten)).await?;

    assert_eq!(
        result.refined_script(),
        "Oats. Banana. Peanut butter. Own your morning."
    );
    let sent = &driver.requests()[0].messages[1].content;
    assert!(sent.contains("Make the script more concise and shorter."));
    Ok(())
}

#[tokio::test]
async fn test_tone_change_instruction_is_sent() -> anyhow::Result<()> {
    let driver = MockDriver::new_success(r#"{"refinedScript": "Breakfast, but make it fun."}"#);

    refine_script(&driver, &request(RefinementGoal::ChangeTone("Playful".into()))).await?;

    let sent = &driver.requests()[0].messages[1].content;
    assert!(sent.contains("Change the tone of the script to Playful."));
    Ok(())
}

#[tokio::test]
async fn test_empty_refinement_fails() {
    let driver = MockDriver::new_success(r#"{"refinedScript": ""}"#);

    let err = refine_script(&driver, &request(RefinementGoal::Lengthen))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ReelscriptErrorKind::Contract(c) if c.kind == ContractErrorKind::EmptyOutput
    ));
}

#[tokio::test]
async fn test_blank_goal_never_calls_driver() {
    let driver = MockDriver::new_success(r#"{"refinedScript": "x"}"#);

    let err = refine_script(&driver, &request(RefinementGoal::Custom("   ".into())))
        .await
        .unwrap_err();

    assert!(err.as_validation().is_some());
    assert_eq!(driver.call_count(), 0);
}
