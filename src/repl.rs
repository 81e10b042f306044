//! An interactive read-evaluate-print loop for the Monkey programming
//! language.

use crate::ast;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::object::Environment;
use crate::parser::Parser;

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// The prompt written before each line is read.
const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Runs the REPL until `input` reaches end-of-input, reading one line at a
/// time and writing each line's value or errors to `output`.
///
/// The environment persists across lines, so bindings made on one line are
/// visible on the next. Parse and runtime errors are printed and do not
/// carry over into the next iteration.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let env = Rc::new(RefCell::new(Environment::new()));

    loop {
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let mut parser = Parser::new(Lexer::new(&line));

        let prog = match parser.parse() {
            Ok(prog) => prog,
            Err(errors) => {
                print_parser_errors(&mut output, &errors)?;
                continue;
            }
        };

        match evaluator::eval(ast::Node::Program(prog), &env) {
            Ok(obj) => writeln!(output, "{}", obj)?,
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
}

fn print_parser_errors<W: Write>(output: &mut W, errors: &crate::parser::Errors) -> io::Result<()> {
    output.write_all(MONKEY_FACE.as_bytes())?;
    writeln!(output, "Woops! We ran into some monkey business here!")?;
    writeln!(output, " parser errors:")?;

    for err in &errors.0 {
        writeln!(output, "\t{}", err)?;
    }

    Ok(())
}
