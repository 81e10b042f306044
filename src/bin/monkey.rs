extern crate getopts;
extern crate monkey_lang;

use getopts::Options;
use monkey_lang::ast;
use monkey_lang::evaluator;
use monkey_lang::lexer::Lexer;
use monkey_lang::object::Environment;
use monkey_lang::parser::Parser;
use monkey_lang::repl;
use monkey_lang::token::Token;

use std::cell::RefCell;
use std::env;
use std::error;
use std::io;
use std::process;
use std::rc::Rc;

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optflag("h", "help", "print this help menu");
    opts.optflag("l", "lex", "only perform the lexing process");
    opts.optflag("p", "parse", "only perform the lexing and parsing processes");

    let matches = opts.parse(&args[1..])?;

    // Present usage if '-h'.
    if matches.opt_present("h") {
        let brief = format!("Usage: {} ['let five = 5;']", program);
        print!("{}", opts.usage(&brief));
        return Ok(());
    }

    // With no program argument, drop into the interactive prompt.
    if matches.free.is_empty() {
        let stdin = io::stdin();
        let stdout = io::stdout();
        repl::start(stdin.lock(), stdout.lock())?;
        return Ok(());
    }

    // Pass all free arguments through the pipeline as one program.
    let source = matches.free.join(" ");

    if matches.opt_present("l") {
        lex(&source);
        return Ok(());
    }

    let prog = match parse(&source) {
        Ok(prog) => prog,
        Err(err) => {
            eprintln!("parser errors:\n{}", err);
            process::exit(1);
        }
    };

    if matches.opt_present("p") {
        println!("{}", prog);
        return Ok(());
    }

    let env = Rc::new(RefCell::new(Environment::new()));
    match evaluator::eval(ast::Node::Program(prog), &env) {
        Ok(obj) => println!("{}", obj),
        Err(err) => {
            eprintln!("evaluation error: {}", err);
            process::exit(1);
        }
    }

    Ok(())
}

fn lex(input: &str) {
    let tokens = Lexer::new(input).lex();

    for t in &tokens {
        match t {
            Token::Eof => break,
            _ => println!("  - {:?}", t),
        };
    }
}

fn parse(input: &str) -> monkey_lang::parser::Result<ast::Program> {
    Parser::new(Lexer::new(input)).parse()
}
