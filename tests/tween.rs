use animexpr::{
    AnimExprError, ChannelKind, RecordingContext, StartValues, TraceEvent, parse_expression,
    parse_program,
};

fn run(ctx: &RecordingContext, src: &str) -> Result<(), AnimExprError> {
    parse_program(src)?.evaluate(ctx)
}

#[test]
fn single_call_creates_one_tween() {
    let ctx = RecordingContext::new().with_objects(["Target"]);
    parse_expression("X(Target, 1)")
        .unwrap()
        .evaluate(&ctx)
        .unwrap();

    let trace = ctx.trace();
    assert_eq!(trace.tweens.len(), 1);
    let t = &trace.tweens[0];
    assert_eq!(t.object, "Target");
    assert_eq!(t.channel, ChannelKind::PositionX);
    assert_eq!(t.duration, 1.0);
    assert_eq!(t.to, None);
    assert_eq!(t.from, None);
    assert!(t.animate);
}

#[test]
fn width_two_arity() {
    for (args, ok) in [
        ("a", false),
        ("a, 1", true),
        ("a, 1, 5", true),
        ("a, 1, 5, 6", true),
        ("a, 1, 5, 6, 7", false),
        ("a, 1, 5, 6, 7, 8", false),
    ] {
        let ctx = RecordingContext::new();
        let result = run(&ctx, &format!("XY({args});"));
        assert_eq!(result.is_ok(), ok, "XY({args})");
        if !ok {
            assert!(matches!(result, Err(AnimExprError::Arity { .. })));
            assert_eq!(ctx.tween_count(), 0);
        }
    }
}

fn call_args(n: usize) -> String {
    let mut args = vec!["a".to_string()];
    args.extend((1..n).map(|i| i.to_string()));
    args.join(", ")
}

fn value_args(n: usize) -> String {
    (1..=n).map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

const CHANNELS_BY_WIDTH: [(&str, usize); 4] = [("X", 1), ("XY", 2), ("C", 3), ("CA", 4)];

#[test]
fn channel_arity_by_width() {
    for (name, width) in CHANNELS_BY_WIDTH {
        for n in 1..=7 {
            let src = format!("{name}({});", call_args(n));
            let ctx = RecordingContext::new();
            let result = run(&ctx, &src);
            let ok = n == 2 || n == 3 || n == 2 + width;
            assert_eq!(result.is_ok(), ok, "{src}");
            if ok {
                let t = ctx.tween(0).unwrap();
                assert_eq!(t.to.map(|v| v.len()), (n > 2).then_some(width), "{src}");
            } else {
                assert!(matches!(result, Err(AnimExprError::Arity { got, .. }) if got == n));
                assert_eq!(ctx.tween_count(), 0, "{src}");
            }
        }
    }
}

#[test]
fn from_arity_by_width() {
    for (name, width) in CHANNELS_BY_WIDTH {
        for suffix in ["From", "FromRelative"] {
            for n in 0..=5 {
                let src = format!("{name}(a, 1).{suffix}({});", value_args(n));
                let ctx = RecordingContext::new();
                let result = run(&ctx, &src);
                let ok = n == 1 || n == width;
                assert_eq!(result.is_ok(), ok, "{src}");
                if ok {
                    let from = ctx.tween(0).unwrap().from.unwrap();
                    assert_eq!(from.values.len(), width, "{src}");
                    assert_eq!(from.relative, suffix == "FromRelative", "{src}");
                } else {
                    assert!(matches!(result, Err(AnimExprError::Arity { .. })), "{src}");
                    assert_eq!(ctx.tween_count(), 0, "{src}");
                }
            }
        }
    }
}

#[test]
fn per_channel_start_values() {
    let ctx = RecordingContext::new();
    run(&ctx, "XY(a, 1).From(1, 2); C(b, 1).FromRelative(0.1, 0.2, 0.3);").unwrap();
    assert_eq!(
        ctx.tween(0).unwrap().from,
        Some(StartValues {
            values: vec![1.0, 2.0],
            relative: false,
        })
    );
    assert_eq!(
        ctx.tween(1).unwrap().from,
        Some(StartValues {
            values: vec![0.1, 0.2, 0.3],
            relative: true,
        })
    );
}

#[test]
fn target_values_expand_to_channel_width() {
    let ctx = RecordingContext::new();
    run(&ctx, "S(icon, 0.5, 2); CA(icon, 1, 0.1, 0.2, 0.3, 0.4);").unwrap();
    assert_eq!(ctx.tween(0).unwrap().to, Some(vec![2.0, 2.0]));
    assert_eq!(ctx.tween(1).unwrap().to, Some(vec![0.1, 0.2, 0.3, 0.4]));
}

#[test]
fn chain_configures_tween_in_source_order() {
    let ctx = RecordingContext::new().with_variable("d", 0.25);
    run(
        &ctx,
        "XYZ(panel, 2, 1, 2, 3).FromRelative(-10).Delay(d * 2).EaseOutBack().Animate(1 > 0);",
    )
    .unwrap();

    let t = ctx.tween(0).unwrap();
    assert_eq!(t.channel, ChannelKind::PositionXYZ);
    assert_eq!(
        t.from,
        Some(StartValues {
            values: vec![-10.0, -10.0, -10.0],
            relative: true,
        })
    );
    assert_eq!(t.delay, 0.5);
    assert_eq!(t.ease.as_deref(), Some("EaseOutBack"));
    assert!(t.animate);
}

#[test]
fn absolute_from_and_later_suffix_wins() {
    let ctx = RecordingContext::new();
    run(&ctx, "A(fade, 1, 1).FromRelative(0.5).From(0);").unwrap();
    assert_eq!(
        ctx.tween(0).unwrap().from,
        Some(StartValues {
            values: vec![0.0],
            relative: false,
        })
    );
}

#[test]
fn bad_chain_arity_leaves_no_tween() {
    for src in [
        "XY(a, 1).From(1, 2, 3);",
        "X(a, 1).Delay();",
        "X(a, 1).Animate(1, 2);",
        "X(a, 1).EaseInSine(1);",
        "Active(a);",
    ] {
        let ctx = RecordingContext::new();
        let err = run(&ctx, src).unwrap_err();
        assert!(matches!(err, AnimExprError::Arity { .. }), "{src}: {err}");
        assert_eq!(ctx.tween_count(), 0, "{src}");
    }
}

#[test]
fn then_runs_once_on_completion() {
    let ctx = RecordingContext::new();
    run(&ctx, "X(a, 1).Then({ Callback(); Active(a, false); });").unwrap();

    assert_eq!(ctx.callback_count(), 0);
    assert_eq!(ctx.is_active("a"), None);
    assert_eq!(ctx.tween(0).unwrap().continuations, 1);

    assert!(ctx.complete(0).unwrap());
    assert_eq!(ctx.callback_count(), 1);
    assert_eq!(ctx.is_active("a"), Some(false));

    assert!(!ctx.complete(0).unwrap());
    assert_eq!(ctx.callback_count(), 1);
}

#[test]
fn then_sees_variables_at_completion_time() {
    let ctx = RecordingContext::new();
    run(&ctx, "X(a, 1).Then(if (go) Callback(););").unwrap();
    ctx.complete(0).unwrap();
    assert_eq!(ctx.callback_count(), 0);
}

#[test]
fn if_and_blocks() {
    let ctx = RecordingContext::new().with_variable("show", 1.0);
    run(
        &ctx,
        "if (show) { Active(title, true); A(title, 0.3, 1); }\nif (!show) Callback();",
    )
    .unwrap();
    assert_eq!(ctx.is_active("title"), Some(true));
    assert_eq!(ctx.tween_count(), 1);
    assert_eq!(ctx.callback_count(), 0);
}

#[test]
fn events_are_recorded_in_order() {
    let ctx = RecordingContext::new();
    run(&ctx, "Active(a, 1); X(a, 1).Then(Callback();); Callback();").unwrap();
    ctx.complete_all().unwrap();
    assert_eq!(
        ctx.trace().events,
        vec![
            TraceEvent::SetActive {
                object: "a".to_string(),
                active: true,
            },
            TraceEvent::Tween { id: 0 },
            TraceEvent::Callback,
            TraceEvent::Completed { id: 0 },
            TraceEvent::Callback,
        ]
    );
}

#[test]
fn rerun_is_deterministic() {
    let src = "P(a, 1, 3, 4).Delay(0.1).EaseInOutSine();\nActive(b, 0);\nX(a, 2).Then(Callback(););";
    let program = parse_program(src).unwrap();

    let first = RecordingContext::new();
    program.evaluate(&first).unwrap();
    let second = RecordingContext::new();
    parse_program(src).unwrap().evaluate(&second).unwrap();

    assert_eq!(first.trace(), second.trace());
    first.discard_pending();
    second.discard_pending();
}

#[test]
fn unknown_objects_fail_resolution() {
    let ctx = RecordingContext::new().with_objects(["a"]);
    let err = run(&ctx, "X(a, 1); Active(b, 1);").unwrap_err();
    assert!(matches!(err, AnimExprError::Resolve(_)));
    assert_eq!(ctx.tween_count(), 1);
}
