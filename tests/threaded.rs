use std::sync::Arc;
use std::thread;

use boolex::{actions, Condition, Inputs, Rule};

#[test]
fn evaluate_one_rule_across_threads() {
    let cond = Arc::new(
        Condition::new()
            .add("a", "height", actions::gt(165_i64))
            .add("b", "height", actions::lt(180_i64))
            .add("c", "gender", actions::one_of(["male", "female"])),
    );
    let rule = Arc::new(Rule::compile("a & b & c", cond).unwrap());

    let mut handles = vec![];

    // Inside the window -> true
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        let inputs = Inputs::new().set("height", 175_i64).set("gender", "male");
        (r.evaluate(&inputs), true)
    }));

    // Too tall -> false
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        let inputs = Inputs::new().set("height", 190_i64).set("gender", "female");
        (r.evaluate(&inputs), false)
    }));

    // Unknown gender -> false
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        let inputs = Inputs::new().set("height", 170_i64).set("gender", "other");
        (r.evaluate(&inputs), false)
    }));

    for handle in handles {
        let (result, expected) = handle.join().unwrap();
        assert_eq!(result, Ok(expected));
    }
}

#[test]
fn many_rules_share_one_registry_across_threads() {
    let cond = Arc::new(
        Condition::new()
            .add("lo", "x", actions::gte(0_i64))
            .add("hi", "x", actions::lte(100_i64)),
    );

    let exprs = ["lo", "hi", "lo&hi", "lo|hi", "!(lo&hi)"];
    let rules: Vec<Arc<Rule>> = exprs
        .iter()
        .map(|e| Arc::new(Rule::compile(e, Arc::clone(&cond)).unwrap()))
        .collect();

    let mut handles = vec![];
    for rule in &rules {
        for x in [-10_i64, 0, 50, 100, 110] {
            let rule = Arc::clone(rule);
            handles.push(thread::spawn(move || {
                rule.evaluate(&Inputs::new().set("x", x)).unwrap()
            }));
        }
    }
    // All calls complete without panicking or deadlocking.
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn repeated_concurrent_evaluation_is_deterministic() {
    let cond = Arc::new(
        Condition::new()
            .add("a", "x", actions::gt(10_i64))
            .add("b", "y", actions::eq("on")),
    );
    let rule = Arc::new(Rule::compile("a & !b | b", cond).unwrap());
    let expected = rule
        .evaluate(&Inputs::new().set("x", 20_i64).set("y", "off"))
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let got = rule
                        .evaluate(&Inputs::new().set("x", 20_i64).set("y", "off"))
                        .unwrap();
                    assert_eq!(got, expected);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
