use anyhow::anyhow;
use cucumber_dispatch::{
    cli::{self, Parser as _},
    error::StepError,
    gherkin, pending, Argument, Steps,
};

#[derive(Debug, Default)]
struct Counter {
    value: u32,
    depths: Vec<usize>,
}

fn init_tracing() {
    _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn counting_steps() -> Steps<Counter> {
    let mut steps = Steps::<Counter>::new();
    _ = steps
        .when("^I do A$", |w, _| {
            w.value += 1;
            let depth = w.depth();
            w.depths.push(depth);
            Ok(())
        })
        .unwrap();
    _ = steps
        .when("^I do B$", |w, _| {
            w.value += 10;
            let depth = w.depth();
            w.depths.push(depth);
            Ok(())
        })
        .unwrap();
    _ = steps
        .when("^I do A and B$", |w, _| {
            w.invoke("I do A", [])?;
            w.invoke("I do B", [])?;
            Ok(())
        })
        .unwrap();
    _ = steps
        .when("^I do everything$", |w, _| {
            w.invoke("I do A and B", [])?;
            Ok(())
        })
        .unwrap();
    steps
}

#[test]
fn nested_invocations_share_world() {
    init_tracing();
    let dispatcher = counting_steps().finish();
    let mut world = dispatcher.build_world("nesting").unwrap();

    dispatcher
        .dispatch("I do A and B", &mut world)
        .unwrap()
        .execute([])
        .unwrap();

    assert_eq!(world.value, 11);
    assert_eq!(world.depths, [2, 2]);
    assert_eq!(world.depth(), 0);
}

#[test]
fn nested_failure_propagates_with_its_kind() {
    let mut steps = Steps::<Counter>::new();
    _ = steps
        .when("^I do something undefined$", |w, _| {
            w.invoke("nobody defined this", [])?;
            Ok(())
        })
        .unwrap();
    _ = steps
        .when("^I do something unfinished$", |w, _| {
            w.invoke("I am unfinished", [])?;
            Ok(())
        })
        .unwrap();
    _ = steps
        .when("^I am unfinished$", |_, _| pending!("not implemented"))
        .unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("propagation").unwrap();

    let undefined = dispatcher
        .dispatch("I do something undefined", &mut world)
        .unwrap()
        .execute([])
        .unwrap_err();
    let unfinished = dispatcher
        .dispatch("I do something unfinished", &mut world)
        .unwrap()
        .execute([])
        .unwrap_err();

    assert!(
        matches!(undefined, StepError::Undefined(ref e) if e.step == "nobody defined this"),
        "{undefined}",
    );
    assert!(unfinished.is_pending(), "{unfinished}");
    assert_eq!(world.depth(), 0);
}

#[test]
fn pending_is_distinguishable_from_failure() {
    init_tracing();
    let mut steps = Steps::<Counter>::new();
    _ = steps
        .then("^the fridge is cold$", |_, _| pending!("not implemented"))
        .unwrap();
    _ = steps
        .then("^the fridge is empty$", |w, _| {
            w.pending("fridge API is missing")
        })
        .unwrap();
    _ = steps
        .then("^the fridge is full$", |_, _| Err(anyhow!("fridge is broken")))
        .unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("pending").unwrap();

    let mut run = |text: &str| {
        dispatcher.dispatch(text, &mut world).unwrap().execute([]).unwrap_err()
    };

    let cold = run("the fridge is cold");
    assert!(cold.is_pending());
    assert_eq!(cold.to_string(), "pending: not implemented");

    assert!(run("the fridge is empty").is_pending());

    let full = run("the fridge is full");
    assert!(!full.is_pending());
    assert_eq!(
        full.as_failure().map(ToString::to_string).as_deref(),
        Some("fridge is broken"),
    );
}

#[test]
fn nesting_limit_refuses_deeper_invocations() {
    let mut steps = counting_steps();
    _ = steps.max_nesting(1);
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("limited").unwrap();

    dispatcher
        .dispatch("I do A and B", &mut world)
        .unwrap()
        .execute([])
        .unwrap();
    let err = dispatcher
        .dispatch("I do everything", &mut world)
        .unwrap()
        .execute([])
        .unwrap_err();

    assert!(
        matches!(err, StepError::NestingLimit { ref step, limit: 1 } if step == "I do A"),
        "{err}",
    );
    assert_eq!(world.value, 11);
    assert_eq!(world.depth(), 0);
}

#[test]
fn zero_nesting_limit_forbids_invoking_steps() {
    let mut steps = counting_steps();
    _ = steps.max_nesting(0);
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("flat").unwrap();

    dispatcher
        .dispatch("I do A", &mut world)
        .unwrap()
        .execute([])
        .unwrap();
    let err = dispatcher
        .dispatch("I do A and B", &mut world)
        .unwrap()
        .execute([])
        .unwrap_err();

    assert!(matches!(err, StepError::NestingLimit { limit: 0, .. }), "{err}");
    assert_eq!(world.value, 1);
}

#[test]
fn formats_matched_arguments() {
    let mut steps = Steps::<Counter>::new();
    _ = steps
        .given(r"^I have (\d+) (\w+) in the (fridge|freezer)$", |_, _| Ok(()))
        .unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("formatting").unwrap();

    let invocation = dispatcher
        .dispatch("I have 7 cukes in the fridge", &mut world)
        .unwrap();
    let upper = |arg: &str| arg.to_uppercase();

    assert_eq!(
        invocation.format_args("<b>{}</b>"),
        "I have <b>7</b> <b>cukes</b> in the <b>fridge</b>",
    );
    assert_eq!(
        invocation.format_args(&upper),
        "I have 7 CUKES in the FRIDGE",
    );
    assert!(invocation.location().path.ends_with("dispatch.rs"));
    assert!(invocation.file_colon_line().contains("dispatch.rs:"));
}

#[test]
fn passes_multiline_arguments() {
    let mut steps = Steps::<Counter>::new();
    _ = steps
        .given("^the following cukes:$", |w, ctx| {
            let table = ctx.table().ok_or_else(|| anyhow!("no table"))?;
            for row in table.hashes() {
                w.value += row["amount"].parse::<u32>()?;
            }
            Ok(())
        })
        .unwrap();
    let dispatcher = steps.finish();
    let mut world = dispatcher.build_world("tables").unwrap();

    dispatcher
        .dispatch("the following cukes:", &mut world)
        .unwrap()
        .execute([Argument::Table(
            vec![vec!["kind", "amount"], vec!["green", "3"], vec!["pickled", "4"]]
                .into(),
        )])
        .unwrap();

    assert_eq!(world.value, 7);
}

#[test]
fn executes_parsed_gherkin_steps() {
    const FEATURE: &str = "\
Feature: Fridge
  Scenario: stocking
    Given I have 3 cukes
    When I write down:
      \"\"\"
      buy more
      \"\"\"
";

    #[derive(Debug, Default)]
    struct Notes {
        cukes: u32,
        notes: Vec<String>,
    }

    let mut steps = Steps::<Notes>::new();
    _ = steps
        .given(r"^I have (\d+) cukes$", |w, ctx| {
            w.cukes = ctx.parse(0)?;
            Ok(())
        })
        .unwrap();
    _ = steps
        .when("^I write down:$", |w, ctx| {
            let note = ctx.doc_string().ok_or_else(|| anyhow!("no note"))?;
            w.notes.push(note.trim().to_owned());
            Ok(())
        })
        .unwrap();
    let dispatcher = steps.finish();

    let feature =
        gherkin::Feature::parse(FEATURE, gherkin::GherkinEnv::default())
            .unwrap();
    let scenario = &feature.scenarios[0];
    let mut world = dispatcher.build_world(scenario).unwrap();
    for step in &scenario.steps {
        dispatcher.execute_step(step, &mut world).unwrap();
    }

    assert_eq!(world.scenario().name, "stocking");
    assert_eq!(world.cukes, 3);
    assert_eq!(world.notes, ["buy more"]);
}

#[test]
fn applies_cli_options() {
    #[derive(cli::Parser)]
    struct Opts {
        #[command(flatten)]
        steps: cli::Cli,
    }

    let opts = Opts::parse_from([
        "test",
        "--max-step-nesting=0",
        "--adverb=Gitt",
    ]);
    let mut steps = counting_steps();
    _ = steps.with_cli(opts.steps);
    let dispatcher = steps.finish();

    assert_eq!(dispatcher.max_nesting(), Some(0));
    assert!(dispatcher.adverbs().contains("Gitt"));
    assert!(dispatcher.adverbs().contains("Given"));
}
