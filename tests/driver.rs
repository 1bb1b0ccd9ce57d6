use m87::interpreter::driver::{RunState, Runner, RunnerConfig};

fn runner_with_limit(src: &str, max_steps: usize) -> Runner {
    Runner::with_config(src, RunnerConfig { max_steps }).unwrap_or_else(|e| panic!("{e}"))
}

#[test]
fn step_ceiling_is_inclusive() {
    // One execute, one call, one callee lookup, one argument.
    let mut runner = runner_with_limit("print(1)", 4);
    assert_eq!(runner.run().unwrap(), RunState::Finished);
    assert_eq!(runner.steps_taken(), 4);
    assert_eq!(runner.output(), ["1"]);

    let mut runner = runner_with_limit("print(1)", 5);
    assert_eq!(runner.run().unwrap(), RunState::Finished);

    let mut runner = runner_with_limit("print(1)", 3);
    let err = runner.run().unwrap_err();
    assert_eq!(err.diagnostic().kind, "StepLimitExceeded");
    assert!(runner.output().is_empty());
}

#[test]
fn infinite_loops_hit_the_ceiling() {
    let mut runner = runner_with_limit("while true {\n}", 1_000);
    let err = runner.run().unwrap_err();

    let diagnostic = err.diagnostic();
    assert_eq!(diagnostic.kind, "StepLimitExceeded");
    assert_eq!(diagnostic.line, 1);
    assert!(err.to_string().contains("Execution limit exceeded"));
}

#[test]
fn ranges_count_against_the_ceiling() {
    let src = "let xs: array(number) = 0 -> 5000000\nprint(length(xs))";
    let mut runner = runner_with_limit(src, 10);

    let err = runner.run().unwrap_err();
    assert_eq!(err.diagnostic().kind, "StepLimitExceeded");
    assert!(runner.output().is_empty());

    let mut runner = runner_with_limit("let xs: array(number) = 1 -> 3", 10);
    assert_eq!(runner.run().unwrap(), RunState::Finished);
}

#[test]
fn default_config_uses_the_default_ceiling() {
    assert_eq!(RunnerConfig::default().max_steps, 100_000);

    let mut runner = Runner::new("var i: number = 0\nwhile true {\ni = i + 1\n}").unwrap();
    let err = runner.run().unwrap_err();
    assert_eq!(err.diagnostic().kind, "StepLimitExceeded");
    assert_eq!(runner.steps_taken(), 100_001);
}

#[test]
fn suspend_and_resume() {
    let src = r#"
print("start")
let name: string = input("name? ")
print("hi ", name)
"#;
    let mut runner = Runner::new(src).unwrap();

    assert_eq!(runner.run().unwrap(),
               RunState::AwaitingInput { prompt: "name? ".into() });
    assert!(runner.is_awaiting_input());
    assert_eq!(runner.prompt(), Some("name? "));
    assert_eq!(runner.output(), ["start"]);

    assert_eq!(runner.resume("Ada".into()).unwrap(), RunState::Finished);
    assert!(!runner.is_awaiting_input());
    assert_eq!(runner.prompt(), None);
    assert_eq!(runner.output(), ["start", "hi Ada"]);
}

#[test]
fn each_input_call_suspends_again() {
    let src = r#"
let a: number = convert(number, input("a? "))
let b: number = convert(number, input("b? "))
print(a + b)
"#;
    let mut runner = Runner::new(src).unwrap();

    assert_eq!(runner.run().unwrap(), RunState::AwaitingInput { prompt: "a? ".into() });
    assert_eq!(runner.resume("3".into()).unwrap(),
               RunState::AwaitingInput { prompt: "b? ".into() });
    assert_eq!(runner.resume("4".into()).unwrap(), RunState::Finished);
    assert_eq!(runner.output(), ["7"]);
}

#[test]
fn bad_input_surfaces_as_a_type_error() {
    let mut runner = Runner::new("let a: number = convert(number, input(\"a? \"))").unwrap();

    runner.run().unwrap();
    let err = runner.resume("abc".into()).unwrap_err();
    assert_eq!(err.diagnostic().kind, "TypeMismatch");
}

#[test]
fn suspended_statement_runs_twice() {
    let src = r#"
fn ask() => string {
    print("asking")
    return input("name? ")
}
let name: string = ask()
print(name)
"#;
    let mut runner = Runner::new(src).unwrap();

    runner.run().unwrap();
    assert_eq!(runner.output(), ["asking"]);

    assert_eq!(runner.resume("Bo".into()).unwrap(), RunState::Finished);
    assert_eq!(runner.output(), ["asking", "asking", "Bo"]);
}

#[test]
fn prompt_must_be_a_string() {
    let mut runner = Runner::new("input(5)").unwrap();
    let err = runner.run().unwrap_err();
    assert_eq!(err.diagnostic().kind, "TypeMismatch");
}

#[test]
fn resume_without_pending_input_is_error() {
    let mut runner = Runner::new("print(1)").unwrap();
    let err = runner.resume("x".into()).unwrap_err();
    assert_eq!(err.diagnostic().kind, "General");
}

#[test]
fn run_while_waiting_repeats_the_prompt() {
    let mut runner = Runner::new("print(input(\"? \"))").unwrap();

    runner.run().unwrap();
    assert_eq!(runner.run().unwrap(), RunState::AwaitingInput { prompt: "? ".into() });
    assert!(runner.output().is_empty());
}

#[test]
fn stop_rewinds_the_program() {
    let mut runner = Runner::new("print(\"a\")\nlet s: string = input(\"? \")").unwrap();

    runner.run().unwrap();
    runner.stop();
    assert!(!runner.is_awaiting_input());
    assert_eq!(runner.prompt(), None);

    assert!(matches!(runner.run().unwrap(), RunState::AwaitingInput { .. }));
    assert_eq!(runner.output(), ["a", "a"]);
}

#[test]
fn steps_reset_on_resume() {
    let mut runner = runner_with_limit("print(1)\nlet s: string = input(\"? \")\nprint(s)", 10);

    runner.run().unwrap();
    assert_eq!(runner.resume("ok".into()).unwrap(), RunState::Finished);
    assert!(runner.steps_taken() <= 10);
    assert_eq!(runner.output(), ["1", "ok"]);
}

#[test]
fn parse_errors_surface_from_new() {
    let err = Runner::new("let x = 1").unwrap_err();
    assert_eq!(err.diagnostic().kind, "MissingType");
}
