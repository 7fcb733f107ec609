use animexpr::{AnimExprError, AnimationExpression, RecordingContext, StartValues};

fn intro() -> AnimationExpression {
    AnimationExpression::from_json_str(include_str!("data/intro.json")).unwrap()
}

#[test]
fn json_fixture_validates() {
    let asset = intro();
    asset.validate().unwrap();
    assert_eq!(asset.resolve_path("Title"), "Canvas/Header/Title");
    assert_eq!(asset.variable("speed"), Some(0.5));
    asset.compile().unwrap();
}

#[test]
fn duplicate_alias_is_rejected() {
    let asset =
        AnimationExpression::from_json_str(include_str!("data/duplicate_alias.json")).unwrap();
    assert!(matches!(asset.validate(), Err(AnimExprError::Config(_))));

    let ctx = RecordingContext::new();
    assert!(asset.run(&ctx).is_err());
    assert_eq!(ctx.tween_count(), 0);
}

#[test]
fn aliases_and_variables_come_from_the_asset() {
    let asset = intro();
    let ctx =
        RecordingContext::new().with_objects(["Canvas/Header/Title", "Canvas/Header/Badge"]);
    asset.run(&ctx).unwrap();

    let title = ctx.tween(0).unwrap();
    assert_eq!(title.object, "Canvas/Header/Title");
    assert_eq!(title.duration, 0.5);
    ctx.discard_pending();
}

#[test]
fn run_then_complete() {
    let asset = intro();
    let ctx = RecordingContext::new();
    asset.run(&ctx).unwrap();

    assert_eq!(ctx.tween_count(), 1);
    assert_eq!(ctx.is_active("Canvas/Header/Badge"), Some(false));
    let title = ctx.tween(0).unwrap();
    assert_eq!(title.object, "Canvas/Header/Title");
    assert_eq!(title.duration, 0.5);
    assert_eq!(title.to, Some(vec![100.0]));
    assert_eq!(
        title.from,
        Some(StartValues {
            values: vec![-300.0],
            relative: true,
        })
    );
    assert_eq!(title.ease.as_deref(), Some("EaseOutBack"));

    assert_eq!(ctx.complete_all().unwrap(), 2);
    assert_eq!(ctx.is_active("Canvas/Header/Badge"), Some(true));
    let badge = ctx.tween(1).unwrap();
    assert_eq!(badge.object, "Canvas/Header/Badge");
    assert_eq!(badge.duration, 0.25);
    assert_eq!(badge.to, Some(vec![1.0, 1.0]));
    assert_eq!(badge.ease.as_deref(), Some("EaseOutElastic"));
    assert!(badge.completed);
}

#[test]
fn trace_serializes_as_json() {
    let asset = intro();
    let ctx = RecordingContext::new();
    asset.run(&ctx).unwrap();
    let v = serde_json::to_value(ctx.trace()).unwrap();
    assert_eq!(v["tweens"][0]["channel"], "PositionX");
    assert_eq!(v["events"][0]["event"], "set_active");
    assert_eq!(v["events"][1]["event"], "tween");
    ctx.discard_pending();
}
