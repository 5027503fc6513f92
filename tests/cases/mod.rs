//! Shared harness for the integration tests.
//!
//! Every case compiles its input against the demo environment with one
//! rewrite rule, then checks any of: the rewritten tree as text, the value
//! it evaluates to, or the header line of the rendered error.

use graft::{
    BasicCastPatcher, Engine, EngineOptions, Pipeline, UnpackPatcher, Value,
    render_error_to_string_no_color,
};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

pub static ENGINE: Lazy<Engine> = Lazy::new(|| {
    Engine::new(EngineOptions::default(), graft::demo::register).expect("demo environment")
});

/// Pipeline for a rule name: `unpack`, `cast`, `both` or `none`.
pub fn pipeline(rule: &str) -> Pipeline {
    match rule {
        "unpack" => Pipeline::new().with(UnpackPatcher),
        "cast" => Pipeline::new().with(BasicCastPatcher),
        "both" => Pipeline::new().with(UnpackPatcher).with(BasicCastPatcher),
        "none" => Pipeline::new(),
        other => panic!("unknown rule {}", other),
    }
}

/// Result of compiling and running one input.
pub struct Outcome {
    input: &'static str,
    result: Result<(String, Value), String>,
}

impl Outcome {
    pub fn of(input: &'static str, rule: &str) -> Self {
        let result = ENGINE
            .compile(input, &mut pipeline(rule))
            .and_then(|expr| Ok((expr.root().to_string(), expr.run()?)))
            .map_err(|e| render_error_to_string_no_color(&e));
        Self { input, result }
    }

    fn ok(&self) -> &(String, Value) {
        match &self.result {
            Ok(ok) => ok,
            Err(error) => panic!("{} failed:\n{}", self.input, error),
        }
    }

    pub fn assert_rewritten(&self, expected: &str) {
        assert_eq!(self.ok().0, expected, "rewritten form of {}", self.input);
    }

    pub fn assert_value(&self, expected: Value) {
        assert_eq!(self.ok().1, expected, "value of {}", self.input);
    }

    pub fn assert_error(&self, expected: &str) {
        match &self.result {
            Ok((rewritten, value)) => {
                panic!("{} unexpectedly succeeded: {} => {}", self.input, rewritten, value)
            }
            Err(error) => {
                let header = error.lines().next().unwrap_or_default();
                assert_eq!(header, expected, "error for {}:\n{}", self.input, error);
            }
        }
    }
}

macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        $(rule: $rule:expr,)?
        $(rewritten: { $rewritten:expr },)?
        $(value: { $value:expr },)?
        $(error: { $error:expr },)?
    ) => {
        #[test]
        fn $name() {
            #[allow(unused_variables)]
            let rule = "unpack";
            $(let rule = $rule;)?
            #[allow(unused_variables)]
            let outcome = crate::cases::Outcome::of($input, rule);
            $(outcome.assert_rewritten($rewritten);)?
            $(outcome.assert_value($value);)?
            $(outcome.assert_error($error);)?
        }
    };
}
