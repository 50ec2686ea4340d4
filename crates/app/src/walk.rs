use std::io::{self, Write};

use services::StepProgressStore;

use crate::render;

const HELP: &str = "[n]ext [p]revious [t]oggle [a]ll [r]eset [s]tats [q]uit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    Toggle,
    All,
    Reset,
    Stats,
    Quit,
}

impl Action {
    fn from_input(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "t" | "toggle" => Some(Self::Toggle),
            "a" | "all" => Some(Self::All),
            "r" | "reset" => Some(Self::Reset),
            "s" | "stats" => Some(Self::Stats),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Interactive step-by-step loop.
///
/// `next_line` yields one line of input per call and `None` at end of input.
pub fn run(
    store: &mut StepProgressStore,
    mut next_line: impl FnMut() -> io::Result<Option<String>>,
    out: &mut impl Write,
) -> io::Result<()> {
    write!(out, "{}", render::summary(store))?;
    show_current(store, out)?;

    loop {
        writeln!(out, "{HELP}")?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = next_line()? else {
            return Ok(());
        };
        let Some(action) = Action::from_input(&line) else {
            writeln!(out, "unknown command: {}", line.trim())?;
            continue;
        };

        match action {
            Action::Next => {
                if !store.advance() {
                    writeln!(out, "Already at the last step.")?;
                }
                show_current(store, out)?;
            }
            Action::Previous => {
                if !store.retreat() {
                    writeln!(out, "Already at the first step.")?;
                }
                show_current(store, out)?;
            }
            Action::Toggle => {
                store.toggle_current();
                show_current(store, out)?;
                writeln!(out, "{}", render::progress_line(&store.stats()))?;
            }
            Action::All => {
                if store.can_mark_all() {
                    store.mark_all_complete();
                }
                writeln!(out, "{}", render::progress_line(&store.stats()))?;
            }
            Action::Reset => {
                if store.reset_progress() {
                    writeln!(out, "Progress reset.")?;
                    show_current(store, out)?;
                } else {
                    writeln!(out, "Reset cancelled.")?;
                }
            }
            Action::Stats => {
                write!(out, "{}", render::summary(store))?;
                write!(out, "{}", render::checklist(store))?;
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn show_current(store: &StepProgressStore, out: &mut impl Write) -> io::Result<()> {
    match store.current_step() {
        Some(view) => write!(out, "{}", render::step_detail(&view, store.guide().len())),
        None => writeln!(out, "This guide has no steps."),
    }
}
