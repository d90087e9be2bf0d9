use cucumber_dispatch::{
    error::{RegistrationError, ResolutionError},
    Pattern, Steps,
};

#[derive(Debug, Default)]
struct Fridge {
    cukes: u32,
}

fn noop(
    _: &mut cucumber_dispatch::World<Fridge>,
    _: &cucumber_dispatch::Context,
) -> anyhow::Result<()> {
    Ok(())
}

#[test]
fn resolves_step_and_passes_captured_argument() {
    let mut steps = Steps::<Fridge>::new();
    steps
        .given(r"^I have (\d+) cukes$", |w, ctx| {
            assert_eq!(ctx.args().collect::<Vec<_>>(), ["7"]);
            w.cukes = ctx.parse(0)?;
            Ok(())
        })
        .unwrap();

    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("counting").unwrap();
    dispatcher
        .dispatch("I have 7 cukes", &mut world)
        .unwrap()
        .execute([])
        .unwrap();

    assert_eq!(world.cukes, 7);
}

#[test]
fn rejects_duplicate_pattern() {
    let mut steps = Steps::<Fridge>::new();
    _ = steps.given(r"^I have (\d+) cukes$", noop).unwrap();

    let err = steps.when(r"^I have (\d+) cukes$", noop).unwrap_err();

    let RegistrationError::Duplicate(dup) = err else {
        panic!("expected duplicate, got: {err}");
    };
    assert_eq!(dup.pattern.as_str(), r"^I have (\d+) cukes$");
    assert!(dup.existing.line < dup.new.line);
    assert!(dup.new.path.ends_with("registry.rs"));
    assert_eq!(steps.registry().len(), 1);
}

#[test]
fn disjoint_patterns_are_both_resolvable() {
    let mut steps = Steps::<Fridge>::new();
    _ = steps.given(r"^I have (\d+) cukes$", noop).unwrap();
    _ = steps.when(r"^I eat (\d+) cukes$", noop).unwrap();

    let dispatcher = steps.finish();

    assert!(dispatcher.registry().resolve("I have 3 cukes").is_ok());
    assert!(dispatcher.registry().resolve("I eat 3 cukes").is_ok());
}

#[test]
fn reports_missing_definition() {
    let mut steps = Steps::<Fridge>::new();
    _ = steps.given(r"^I have (\d+) cukes$", noop).unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("missing").unwrap();

    let err = dispatcher.dispatch("I have no cukes", &mut world).unwrap_err();

    assert!(matches!(err, ResolutionError::Missing(_)));
    assert_eq!(err.step(), "I have no cukes");
    assert_eq!(err.to_string(), "undefined step `I have no cukes`");
}

#[test]
fn reports_every_ambiguous_candidate() {
    let mut steps = Steps::<Fridge>::new();
    _ = steps.given(r"^I have (\d+) cukes$", noop).unwrap();
    _ = steps.given(r"^I have (.*) cukes$", noop).unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("ambiguous").unwrap();

    let err = dispatcher.dispatch("I have 7 cukes", &mut world).unwrap_err();

    let ResolutionError::Ambiguous(amb) = &err else {
        panic!("expected ambiguity, got: {err}");
    };
    let mut patterns =
        amb.patterns().map(Pattern::as_str).collect::<Vec<_>>();
    patterns.sort_unstable();
    assert_eq!(patterns, [r"^I have (.*) cukes$", r"^I have (\d+) cukes$"]);

    let msg = err.to_string();
    assert!(msg.contains(r"^I have (\d+) cukes$"), "{msg}");
    assert!(msg.contains(r"^I have (.*) cukes$"), "{msg}");
}

#[test]
fn invalid_regex_is_rejected_at_registration() {
    let mut steps = Steps::<Fridge>::new();

    let err = steps.given(r"^I have (\d+ cukes$", noop).unwrap_err();

    assert!(matches!(err, RegistrationError::Pattern(_)));
    assert!(steps.registry().is_empty());
}

#[cfg(feature = "expressions")]
#[test]
fn registers_cucumber_expressions() {
    let mut steps = Steps::<Fridge>::new();
    _ = steps
        .given(Pattern::expression("I have {int} cukes").unwrap(), |w, ctx| {
            w.cukes = ctx.parse(0)?;
            Ok(())
        })
        .unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("expressions").unwrap();

    dispatcher
        .dispatch("I have 12 cukes", &mut world)
        .unwrap()
        .execute([])
        .unwrap();

    assert_eq!(world.cukes, 12);
}

#[test]
fn equivalent_patterns_only_collide_on_resolution() {
    let mut steps = Steps::<Fridge>::new();
    _ = steps.given("^a$", noop).unwrap();
    _ = steps.given("^(?:a)$", noop).unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("equivalent").unwrap();

    assert_eq!(dispatcher.registry().len(), 2);
    let err = dispatcher.dispatch("a", &mut world).unwrap_err();
    let ResolutionError::Ambiguous(amb) = err else {
        panic!("expected ambiguity, got: {err}");
    };
    assert_eq!(amb.candidates.len(), 2);
}
