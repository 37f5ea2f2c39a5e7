//! # Listling Main Entry Point
//!
//! Line-driven demo for the reactive list core: a console renderer displays
//! the list and stdin commands play the role of the UI's click events.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::Result;
use listling::cmd_args::CommandLineArgs;
use listling::config;
use listling::reactive::{ConsoleRenderer, ItemId, ListController, UiAction};

enum DemoCommand {
    Action(UiAction),
    Redraw,
    Help,
    Quit,
    Empty,
    Unknown,
}

fn parse_command(line: &str) -> DemoCommand {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return DemoCommand::Empty;
    };
    let item_id = tokens
        .next()
        .and_then(|token| token.parse::<u64>().ok())
        .map(ItemId::from_raw);

    match head {
        "quit" | "exit" | "q" => DemoCommand::Quit,
        "list" => DemoCommand::Redraw,
        "help" | "?" => DemoCommand::Help,
        name => match UiAction::from_parts(name, item_id) {
            Some(action) => DemoCommand::Action(action),
            None => DemoCommand::Unknown,
        },
    }
}

fn print_help() {
    println!("Commands:");
    println!("  add          add a list item");
    println!("  swap <id>    exchange the words of one item");
    println!("  delete <id>  delete one item");
    println!("  list         redraw the list");
    println!("  quit         exit");
}

fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        _ => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    init_tracing(args.log_level());

    let renderer = Rc::new(RefCell::new(ConsoleRenderer::stdout()));
    let controller = ListController::new(renderer.clone(), config::default_attributes())?;

    for _ in 0..args.items() {
        controller.handle_action(UiAction::AddItem)?;
    }

    println!("Listling - reactive list demo");
    print_help();
    println!();
    renderer.borrow_mut().draw()?;

    let stdin = io::stdin();
    loop {
        print!("listling> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match parse_command(&line) {
            DemoCommand::Quit => break,
            DemoCommand::Empty => {}
            DemoCommand::Help => print_help(),
            DemoCommand::Redraw => renderer.borrow_mut().draw()?,
            DemoCommand::Action(action) => {
                controller.handle_action(action)?;
                renderer.borrow_mut().draw()?;
            }
            DemoCommand::Unknown => {
                println!("Unrecognized command. Type 'help' for the command list.");
            }
        }
    }

    Ok(())
}
