//! Check and registration macros.
//!
//! They only capture the source location and expression text; everything
//! else is a plain method call on [`TestContext`](crate::TestContext) or
//! [`Registry`](crate::Registry).

/// Build a [`Site`](crate::Site) for the given expression at the call site.
#[macro_export]
macro_rules! site {
    ($($expr:tt)*) => {
        $crate::Site {
            file: file!(),
            line: line!(),
            expr: stringify!($($expr)*),
        }
    };
}

/// Check that a condition holds, ending the test if it doesn't.
///
/// Evaluates to `true`; must be used in a body returning
/// [`Flow`](crate::Flow).
#[macro_export]
macro_rules! check {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.check($crate::OnFailure::Stop, $crate::site!($cond), || $cond)?
    };
}

/// Check that a condition holds, continuing the test if it doesn't.
///
/// Evaluates to whether the check passed.
#[macro_export]
macro_rules! check_soft {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.check($crate::OnFailure::Continue, $crate::site!($cond), || $cond)?
    };
}

/// Check that an expression raises an error, ending the test if it doesn't
/// or if the error chain differs from the listed expectations.
///
/// ```text
/// must_raise!(ctx, [Expect::of::<LogicFailure>("while doing stuff:"),
///                   Expect::of::<RuntimeFailure>("fail")], do_stuff());
/// must_raise!(ctx, do_stuff()); // any error will do
/// ```
#[macro_export]
macro_rules! must_raise {
    ($ctx:expr, [$($expect:expr),* $(,)?], $body:expr $(,)?) => {
        $ctx.must_raise(
            $crate::OnFailure::Stop,
            $crate::site!($body),
            &[$($expect),*],
            || $body,
        )?
    };
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.must_raise($crate::OnFailure::Stop, $crate::site!($body), &[], || $body)?
    };
}

/// Like [`must_raise!`], but the test continues after a failure.
#[macro_export]
macro_rules! must_raise_soft {
    ($ctx:expr, [$($expect:expr),* $(,)?], $body:expr $(,)?) => {
        $ctx.must_raise(
            $crate::OnFailure::Continue,
            $crate::site!($body),
            &[$($expect),*],
            || $body,
        )?
    };
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.must_raise($crate::OnFailure::Continue, $crate::site!($body), &[], || $body)?
    };
}

/// Register a test function under its own name, at the call site's location.
///
/// ```text
/// register_test!(registry, parses_numbers);
/// register_test!(registry, "custom name", parses_numbers);
/// ```
#[macro_export]
macro_rules! register_test {
    ($registry:expr, $entry:ident $(,)?) => {
        $registry.register(
            $crate::TestIdentity::new(file!(), line!(), stringify!($entry)),
            $entry,
        )
    };
    ($registry:expr, $name:literal, $entry:expr $(,)?) => {
        $registry.register($crate::TestIdentity::new(file!(), line!(), $name), $entry)
    };
}
