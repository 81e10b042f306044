extern crate monkey_lang;

use monkey_lang::ast;
use monkey_lang::evaluator;
use monkey_lang::lexer::Lexer;
use monkey_lang::object::{self, Object};
use monkey_lang::parser::Parser;

use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn evaluate_integer_expression() {
    let tests = vec![
        ("5", 5),
        ("10", 10),
        ("-5", -5),
        ("-10", -10),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * 3 * 3 + 10", 37),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        // Division truncates toward zero.
        ("7 / 2", 3),
        ("-7 / 2", -3),
    ];

    for (input, want) in tests {
        let got = if let Object::Integer(int) = eval(input) {
            int
        } else {
            panic!("not an integer object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_boolean_expression() {
    let tests = vec![
        ("true", true),
        ("false", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 < 1", false),
        ("1 > 1", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 == 2", false),
        ("1 != 2", true),
        ("true == true", true),
        ("false == false", true),
        ("true == false", false),
        ("true != false", true),
        ("false != true", true),
        ("(1 < 2) == true", true),
        ("(1 < 2) == false", false),
        ("(1 > 2) == true", false),
        ("(1 > 2) == false", true),
    ];

    for (input, want) in tests {
        let got = if let Object::Boolean(b) = eval(input) {
            b
        } else {
            panic!("not a boolean object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_bang_operator() {
    let tests = vec![
        ("!true", false),
        ("!false", true),
        ("!5", false),
        ("!!true", true),
        ("!!false", false),
        ("!!5", true),
    ];

    for (input, want) in tests {
        let got = if let Object::Boolean(b) = eval(input) {
            b
        } else {
            panic!("not a boolean object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_if_else_expression() {
    let tests = vec![
        ("if (true) { 10 }", Object::Integer(10)),
        ("if (false) { 10 }", Object::Null),
        ("if (1) { 10 }", Object::Integer(10)),
        ("if (1 < 2) { 10 }", Object::Integer(10)),
        ("if (1 > 2) { 10 }", Object::Null),
        ("if (1 > 2) { 10 } else { 20 }", Object::Integer(20)),
        ("if (1 < 2) { 10 } else { 20 }", Object::Integer(10)),
    ];

    for (input, want) in tests {
        assert_eq!(want, eval(input), "input: {}", input);
    }
}

#[test]
fn evaluate_return_statements() {
    let tests = vec![
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
        // A nested return escapes the outer block intact; only the program
        // unwraps it.
        (
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            10,
        ),
    ];

    for (input, want) in tests {
        let got = if let Object::Integer(int) = eval(input) {
            int
        } else {
            panic!("not an integer object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_let_statements() {
    let tests = vec![
        ("let a = 5; a;", 5),
        ("let a = 5 * 5; a;", 25),
        ("let a = 5; let b = a; b;", 5),
        ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
    ];

    for (input, want) in tests {
        let got = if let Object::Integer(int) = eval(input) {
            int
        } else {
            panic!("not an integer object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_function_object() {
    let func = if let Object::Function(func) = eval("fn(x) { x + 2; };") {
        func
    } else {
        panic!("not a function object");
    };

    assert_eq!(func.parameters.len(), 1);
    assert_eq!("x", func.parameters[0].value);
    assert_eq!("(x + 2)", func.body.to_string());
}

#[test]
fn evaluate_function_application() {
    let tests = vec![
        ("let identity = fn(x) { x; }; identity(5);", 5),
        ("let identity = fn(x) { return x; }; identity(5);", 5),
        ("let double = fn(x) { x * 2; }; double(5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
        ("fn(x) { x; }(5)", 5),
    ];

    for (input, want) in tests {
        let got = if let Object::Integer(int) = eval(input) {
            int
        } else {
            panic!("not an integer object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_closures() {
    let input = "
let newAdder = fn(x) { fn(y) { x + y; }; };
let addTwo = newAdder(2);
addTwo(3);
";

    let got = if let Object::Integer(int) = eval(input) {
        int
    } else {
        panic!("not an integer object");
    };

    assert_eq!(5, got);
}

#[test]
fn evaluate_closure_observes_later_bindings() {
    // Capture is by reference to a shared environment: a binding made after
    // the function literal is still visible at call time.
    let input = "
let call = fn() { later; };
let later = 10;
call();
";

    assert_eq!(Object::Integer(10), eval(input));
}

#[test]
fn evaluate_recursive_function() {
    let input = "
let fact = fn(n) { if (n < 2) { return 1; } n * fact(n - 1); };
fact(5);
";

    assert_eq!(Object::Integer(120), eval(input));
}

#[test]
fn evaluate_string_expressions() {
    let tests = vec![
        (r#""hello world""#, "hello world"),
        (r#""hello" + " " + "world""#, "hello world"),
    ];

    for (input, want) in tests {
        let got = if let Object::String(s) = eval(input) {
            s
        } else {
            panic!("not a string object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_builtin_len() {
    let tests = vec![
        (r#"len("")"#, 0),
        (r#"len("four")"#, 4),
        (r#"len("hello world")"#, 11),
    ];

    for (input, want) in tests {
        let got = if let Object::Integer(int) = eval(input) {
            int
        } else {
            panic!("not an integer object");
        };

        assert_eq!(want, got, "input: {}", input);
    }
}

#[test]
fn evaluate_error_handling() {
    let tests = vec![
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { true + false; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        (r#""hello" - "world""#, "unknown operator: STRING - STRING"),
        ("5 / 0", "division by zero"),
        ("5(10)", "not a function: INTEGER"),
        (
            "let add = fn(x, y) { x + y; }; add(1);",
            "expected 2 arguments, but got 1",
        ),
        (r#"len(1)"#, "built-in len: argument 1 is not a string"),
        (
            r#"len("one", "two")"#,
            "built-in len: expected 1 argument, but got 2",
        ),
    ];

    for (input, want) in tests {
        let err = eval_error(input);

        assert_eq!(want, err.to_string(), "input: {}", input);
    }
}

#[test]
fn evaluate_error_stops_siblings() {
    // The first failing argument short-circuits the entire argument list.
    let input = "let id = fn(x) { x; }; id(missing, alsoMissing);";

    assert_eq!("identifier not found: missing", eval_error(input).to_string());
}

#[test]
fn evaluate_environment_persists() {
    let env = Rc::new(RefCell::new(object::Environment::new()));

    assert_eq!(Object::Integer(5), eval_with(&env, "let a = 5;"));
    assert_eq!(Object::Integer(10), eval_with(&env, "a * 2;"));
}

#[test]
fn evaluate_pure_expression_ignores_environment() {
    let env = Rc::new(RefCell::new(object::Environment::new()));
    env.borrow_mut()
        .set("noise".to_string(), &Object::Integer(99));

    assert_eq!(Object::Integer(7), eval_with(&env, "3 + 4"));
    assert_eq!(eval("3 + 4"), eval_with(&env, "3 + 4"));
}

fn eval(input: &str) -> Object {
    let env = Rc::new(RefCell::new(object::Environment::new()));

    eval_with(&env, input)
}

fn eval_with(env: &Rc<RefCell<object::Environment>>, input: &str) -> Object {
    let mut p = Parser::new(Lexer::new(input));

    let prog = p.parse().expect("failed to parse program");

    evaluator::eval(ast::Node::Program(prog), env).expect("failed to evaluate program")
}

fn eval_error(input: &str) -> evaluator::Error {
    let mut p = Parser::new(Lexer::new(input));

    let prog = p.parse().expect("failed to parse program");

    let env = Rc::new(RefCell::new(object::Environment::new()));
    evaluator::eval(ast::Node::Program(prog), &env).expect_err("expected an evaluation error")
}
