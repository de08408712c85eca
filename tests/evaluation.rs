use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use boolex::{actions, Condition, EvalError, Inputs, Rule, Value};

#[test]
fn height_window_scenario() {
    let cond = Arc::new(
        Condition::new()
            .add("a", "height", actions::gt(165_i64))
            .add("b", "height", actions::lt(180_i64)),
    );
    let rule = Rule::compile("a & b", cond).unwrap();

    assert_eq!(rule.evaluate(&Inputs::new().set("height", 175_i64)), Ok(true));
    assert_eq!(rule.evaluate(&Inputs::new().set("height", 190_i64)), Ok(false));
}

#[test]
fn grouped_or_then_and_scenario() {
    let cond = Arc::new(
        Condition::new()
            .add("a", "x", actions::eq(true))
            .add("b", "y", actions::eq(true))
            .add("c", "z", actions::eq(true)),
    );
    let rule = Rule::compile("(a|b)&c", cond).unwrap();
    assert_eq!(rule.compiled_form(), "a b | c &");

    let all_true = Inputs::new().set("x", true).set("y", true).set("z", true);
    assert_eq!(rule.evaluate(&all_true), Ok(true));

    let c_false = Inputs::new().set("x", true).set("y", true).set("z", false);
    assert_eq!(rule.evaluate(&c_false), Ok(false));
}

#[test]
fn custom_closure_actions() {
    let cond = Arc::new(
        Condition::new()
            .add("http", "repo", |v: &Value| {
                matches!(v, Value::String(s) if s.starts_with("http://"))
            })
            .add("https", "repo", |v: &Value| {
                matches!(v, Value::String(s) if s.starts_with("https://"))
            })
            .add("git", "repo", |v: &Value| {
                matches!(v, Value::String(s) if s.ends_with(".git"))
            })
            .add("public", "is_public", actions::eq(true)),
    );
    let inputs = Inputs::new()
        .set("repo", "https://github.com/chromium/chromium.git")
        .set("is_public", true);

    let cases = [
        ("(http | https) & git & public", true),
        ("(http | https) & !!git & !!public", true),
        ("!!(http | https) & !!git & public", true),
        ("!(!http & !https) & !!git & public", true),
        ("http & https & git & public", false),
        ("!http & https & git & !!public", true),
    ];
    for (expr, expected) in cases {
        let rule = Rule::compile(expr, Arc::clone(&cond)).unwrap();
        assert_eq!(rule.evaluate(&inputs), Ok(expected), "for {expr:?}");
    }
}

#[test]
fn double_negation_equals_plain_operand() {
    let cond = Arc::new(Condition::new().add("x", "v", actions::eq(1_i64)));
    let plain = Rule::compile("x", Arc::clone(&cond)).unwrap();
    let doubled = Rule::compile("!!x", Arc::clone(&cond)).unwrap();
    assert_eq!(doubled.compiled_form(), "x ! !");

    for value in [0_i64, 1, 2] {
        let inputs = Inputs::new().set("v", value);
        assert_eq!(plain.evaluate(&inputs), doubled.evaluate(&inputs));
    }
}

#[test]
fn de_morgan_equivalence() {
    let cond = Arc::new(
        Condition::new()
            .add("a", "m", actions::gt(10_i64))
            .add("b", "n", actions::lt(5_i64)),
    );
    let negated_and = Rule::compile("!(a & b)", Arc::clone(&cond)).unwrap();
    let or_of_negations = Rule::compile("(!a | !b)", Arc::clone(&cond)).unwrap();

    for m in [0_i64, 10, 11, 100] {
        for n in [0_i64, 4, 5, 50] {
            let inputs = Inputs::new().set("m", m).set("n", n);
            assert_eq!(
                negated_and.evaluate(&inputs),
                or_of_negations.evaluate(&inputs),
                "diverged at m={m} n={n}"
            );
        }
    }
}

#[test]
fn missing_tag_fails_that_call_only() {
    let cond = Arc::new(
        Condition::new()
            .add("a", "height", actions::gt(165_i64))
            .add("b", "weight", actions::lt(90_i64)),
    );
    let rule = Rule::compile("a & b", cond).unwrap();

    let incomplete = Inputs::new().set("height", 175_i64);
    assert_eq!(
        rule.evaluate(&incomplete),
        Err(EvalError::MissingInput {
            operand: "b".into(),
            tag: "weight".into(),
        })
    );

    // The rule stays valid; a corrected call succeeds.
    let complete = Inputs::new().set("height", 175_i64).set("weight", 80_i64);
    assert_eq!(rule.evaluate(&complete), Ok(true));
}

#[test]
fn wrong_typed_inputs_evaluate_to_false() {
    let cond = Arc::new(
        Condition::new()
            .add("tall", "height", actions::gt(165_i64))
            .add("named", "name", actions::eq("alice")),
    );
    let rule = Rule::compile("tall | named", cond).unwrap();

    // Both tags present but both carry unexpected types.
    let inputs = Inputs::new().set("height", "175").set("name", 42_i64);
    assert_eq!(rule.evaluate(&inputs), Ok(false));
}

#[test]
fn both_sides_of_binary_operators_always_run() {
    let left_calls = Arc::new(AtomicUsize::new(0));
    let right_calls = Arc::new(AtomicUsize::new(0));

    let l = Arc::clone(&left_calls);
    let r = Arc::clone(&right_calls);
    let cond = Arc::new(
        Condition::new()
            .add("l", "v", move |_: &Value| {
                l.fetch_add(1, Ordering::SeqCst);
                true
            })
            .add("r", "v", move |_: &Value| {
                r.fetch_add(1, Ordering::SeqCst);
                true
            }),
    );
    let inputs = Inputs::new().set("v", 0_i64);

    // "l" already decides an OR, yet "r" must still be evaluated.
    let or_rule = Rule::compile("l | r", Arc::clone(&cond)).unwrap();
    assert_eq!(or_rule.evaluate(&inputs), Ok(true));
    assert_eq!(left_calls.load(Ordering::SeqCst), 1);
    assert_eq!(right_calls.load(Ordering::SeqCst), 1);

    let and_rule = Rule::compile("!l & r", cond).unwrap();
    assert_eq!(and_rule.evaluate(&inputs), Ok(false));
    assert_eq!(left_calls.load(Ordering::SeqCst), 2);
    assert_eq!(right_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn operands_sharing_a_tag_read_the_same_value() {
    let cond = Arc::new(
        Condition::new()
            .add("adult", "age", actions::gte(18_i64))
            .add("senior", "age", actions::gte(65_i64)),
    );
    let rule = Rule::compile("adult & !senior", cond).unwrap();

    assert_eq!(rule.evaluate(&Inputs::new().set("age", 30_i64)), Ok(true));
    assert_eq!(rule.evaluate(&Inputs::new().set("age", 70_i64)), Ok(false));
    assert_eq!(rule.evaluate(&Inputs::new().set("age", 10_i64)), Ok(false));
}

#[test]
fn builtin_membership_actions() {
    let cond = Arc::new(
        Condition::new()
            .add("tall", "height", actions::between(165_i64, 180_i64))
            .add("known", "gender", actions::one_of(["male", "female"])),
    );
    let rule = Rule::compile("tall & known", cond).unwrap();

    let ok = Inputs::new().set("height", 175_i64).set("gender", "male");
    assert_eq!(rule.evaluate(&ok), Ok(true));

    let out_of_range = Inputs::new().set("height", 190_i64).set("gender", "male");
    assert_eq!(rule.evaluate(&out_of_range), Ok(false));
}
