//! chaincheck demo
//!
//! Runs a small suite covering every kind of report the runner produces:
//! passing tests, errors escaping a test, nested and foreign errors, failed
//! checks, and must-raise checks with matching and mismatching chains.

use std::time::Duration;

use chaincheck::{
    check, check_soft, must_raise, must_raise_soft, register_test, Expect, Flow, NestExt, Raised,
    Registry, RunnerConfig, TestContext,
};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct RuntimeFailure(&'static str);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct OutOfRange(&'static str);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct LogicFailure(&'static str);

fn run_stuff() -> Result<(), RuntimeFailure> {
    Err(RuntimeFailure("heh"))
}

fn do_stuff() -> Result<(), Raised> {
    run_stuff()
        .nest_in(|| OutOfRange("while doing more stuff:"))
        .nest_in(|| LogicFailure("while doing stuff:"))
}

fn throw_foreign() {
    std::panic::panic_any(42_i32);
}

fn pass(_: &mut TestContext<'_>) -> Flow {
    Ok(())
}

fn pass2(ctx: &mut TestContext<'_>) -> Flow {
    check!(ctx, true);
    std::thread::sleep(Duration::from_millis(100));
    eprintln!("Hello from A!");
    Ok(())
}

fn throw_simple(_: &mut TestContext<'_>) -> Flow {
    run_stuff()?;
    Ok(())
}

fn throw_nested(_: &mut TestContext<'_>) -> Flow {
    do_stuff()?;
    Ok(())
}

fn throw_unknown(_: &mut TestContext<'_>) -> Flow {
    throw_foreign();
    Ok(())
}

fn throw_nested_unknown(_: &mut TestContext<'_>) -> Flow {
    let raised = Raised::foreign(42_i32).nest(LogicFailure("while doing stuff:"));
    Err(raised.into())
}

fn assert_false(ctx: &mut TestContext<'_>) -> Flow {
    check!(ctx, false);
    Ok(())
}

fn assert_raises(ctx: &mut TestContext<'_>) -> Flow {
    check!(ctx, run_stuff().map(|()| true));
    Ok(())
}

fn assert_raises_unknown(ctx: &mut TestContext<'_>) -> Flow {
    check!(ctx, {
        throw_foreign();
        true
    });
    Ok(())
}

fn soft_then_hard(ctx: &mut TestContext<'_>) -> Flow {
    check_soft!(ctx, 1 + 1 == 3);
    eprintln!("still running after a soft failure");
    check!(ctx, 2 + 2 == 5);
    eprintln!("never printed");
    Ok(())
}

fn must_raise_matches(ctx: &mut TestContext<'_>) -> Flow {
    must_raise!(
        ctx,
        [
            Expect::of::<LogicFailure>("while doing stuff:"),
            Expect::of::<OutOfRange>("while doing more stuff:"),
            Expect::of::<RuntimeFailure>("heh"),
        ],
        do_stuff()
    );
    must_raise!(ctx, throw_foreign());
    Ok(())
}

fn must_raise_missing(ctx: &mut TestContext<'_>) -> Flow {
    must_raise!(ctx, "42".parse::<i32>());
    Ok(())
}

fn must_raise_incorrect(ctx: &mut TestContext<'_>) -> Flow {
    must_raise_soft!(
        ctx,
        [
            Expect::of::<LogicFailure>("while doing stuff:"),
            Expect::of::<RuntimeFailure>("heh"),
        ],
        do_stuff()
    );
    must_raise!(
        ctx,
        [Expect::of::<RuntimeFailure>("line 1\nline 2")],
        Err::<(), _>(RuntimeFailure("line 1\nline two"))
    );
    Ok(())
}

fn main() {
    chaincheck::init_tracing();

    let mut registry = Registry::new();
    register_test!(registry, pass);
    register_test!(registry, pass2);
    register_test!(registry, throw_simple);
    register_test!(registry, throw_nested);
    register_test!(registry, throw_unknown);
    register_test!(registry, throw_nested_unknown);
    register_test!(registry, assert_false);
    register_test!(registry, assert_raises);
    register_test!(registry, assert_raises_unknown);
    register_test!(registry, soft_then_hard);
    register_test!(registry, must_raise_matches);
    register_test!(registry, must_raise_missing);
    register_test!(registry, must_raise_incorrect);

    let code = chaincheck::run_tests(registry, RunnerConfig::from_env());
    std::process::exit(code);
}
