//! Interactive editing session
//!
//! A line-oriented driver over `Workspace`. Elements are addressed by their
//! 1-based position; property commands act on the selected element.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use crate::document::Document;
use crate::export::{export_to_store, export_workspace, ExportOptions};
use crate::property::Edit;
use crate::store::{ScriptStore, SettingsStore};
use crate::widget::ElementId;
use crate::workspace::{EditOutcome, StdinSelection, TextContainer, Workspace};

use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

const HELP: &str = "\
commands:
  add [TYPE]              place an element (choose from a list without TYPE)
  select N | none         select the N-th element
  list                    list placed elements
  rm [N]                  remove the N-th (or selected) element
  prop [NAME]             activate a property on the selection
  unprop NAME             deactivate a property
  set NAME TEXT           type into a text or number field
  slot NAME I TEXT        type into field I of a grouped number property
  toggle NAME             press a toggle
  slide NAME VALUE        move a slider
  choose NAME [MEMBER]    pick an enum member
  form                    show the selection's form
  export                  print the generated script
  store                   export into the script store
  save PATH               write the workspace document
  quit";

/// Execute the session command on stdin/stdout
pub fn run(ctx: &Context, doc: Option<&Path>) -> ExitCode {
    let workspace = match doc {
        Some(path) => match ctx.workspace(path) {
            Ok(ws) => ws,
            Err(code) => return code,
        },
        None => Workspace::new(Arc::clone(&ctx.registry)),
    };
    let mut settings = match ctx.settings() {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut scripts = ctx.scripts(&settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run_session(
        workspace,
        &ctx.loaded.config.export,
        &mut scripts,
        stdin.lock(),
        stdout.lock(),
    );
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    scripts.persist(&mut settings);
    match settings.save() {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Drive a workspace from commands read line by line.
///
/// Returns the workspace as it was when input ended or `quit` was read.
/// Command errors are reported on `output` and do not end the session.
pub fn run_session<R: BufRead, W: Write>(
    mut workspace: Workspace,
    options: &ExportOptions,
    scripts: &mut ScriptStore,
    mut input: R,
    mut output: W,
) -> io::Result<Workspace> {
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let mut session = Session {
            workspace: &mut workspace,
            options,
            scripts: &mut *scripts,
            input: &mut input,
            output: &mut output,
        };
        if let Err(message) = session.execute(line) {
            writeln!(output, "error: {}", message)?;
        }
    }
    Ok(workspace)
}

struct Session<'a, R, W> {
    workspace: &'a mut Workspace,
    options: &'a ExportOptions,
    scripts: &'a mut ScriptStore,
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn execute(&mut self, line: &str) -> Result<(), String> {
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        match command {
            "help" => self.say(HELP),
            "add" => {
                let id = if rest.is_empty() {
                    let mut ui = StdinSelection::new(&mut *self.input, &mut *self.output);
                    self.workspace.choose_element(&mut ui).map_err(err)?
                } else {
                    Some(self.workspace.add_element(rest).map_err(err)?)
                };
                let label = id.and_then(|id| self.workspace.element(id)).map(|e| e.label());
                match label {
                    Some(label) => self.say(&format!("added {}", label)),
                    None => Ok(()),
                }
            }
            "select" => {
                let id = if rest == "none" { None } else { Some(self.element_at(rest)?) };
                self.workspace.select_element(id).map_err(err)
            }
            "list" => {
                let selected = self.workspace.selected();
                let lines: Vec<String> = self
                    .workspace
                    .elements()
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        let marker = if Some(e.id()) == selected { "*" } else { " " };
                        format!("{} {}: {}", marker, i + 1, e.label())
                    })
                    .collect();
                self.say(&lines.join("\n"))
            }
            "rm" => {
                let id = if rest.is_empty() { self.selected()? } else { self.element_at(rest)? };
                self.workspace.remove_element(id).map_err(err)
            }
            "prop" => {
                let id = self.selected()?;
                if rest.is_empty() {
                    let mut ui = StdinSelection::new(&mut *self.input, &mut *self.output);
                    self.workspace.choose_property(id, &mut ui).map_err(err)?;
                    Ok(())
                } else {
                    self.workspace.add_property(id, rest).map_err(err)
                }
            }
            "unprop" => {
                let id = self.selected()?;
                self.workspace.remove_property(id, rest).map_err(err)
            }
            "set" => {
                let (name, text) = rest.split_once(' ').unwrap_or((rest, ""));
                self.edit(name, Edit::Text(text.to_string()))
            }
            "slot" => match args.as_slice() {
                [name, index, ..] => {
                    let index: usize = index.parse().map_err(|_| format!("bad index '{}'", index))?;
                    let text = args[2..].join(" ");
                    self.edit(name, Edit::Slot { index, text })
                }
                _ => Err("usage: slot NAME INDEX TEXT".to_string()),
            },
            "toggle" => self.edit(rest, Edit::Toggle),
            "slide" => match args.as_slice() {
                [name, value] => {
                    let value: f64 = value.parse().map_err(|_| format!("bad value '{}'", value))?;
                    self.edit(name, Edit::Slide(value))
                }
                _ => Err("usage: slide NAME VALUE".to_string()),
            },
            "choose" => match args.as_slice() {
                [name] => {
                    let id = self.selected()?;
                    let mut ui = StdinSelection::new(&mut *self.input, &mut *self.output);
                    self.workspace.choose_member(id, name, &mut ui).map_err(err)?;
                    Ok(())
                }
                [name, member] => self.edit(name, Edit::Choose(member.to_string())),
                _ => Err("usage: choose NAME [MEMBER]".to_string()),
            },
            "form" => {
                let Some(form) = self.workspace.form() else {
                    return self.say("(nothing selected)");
                };
                let mut container = TextContainer::new();
                form.render_into(&mut container);
                let text = container.finish();
                self.say(text.trim_end())
            }
            "export" => {
                let text = export_workspace(self.workspace, self.options);
                self.say(&text)
            }
            "store" => {
                let name = export_to_store(self.workspace, self.options, self.scripts);
                self.say(&format!("stored as '{}'", name))
            }
            "save" => {
                if rest.is_empty() {
                    return Err("usage: save PATH".to_string());
                }
                Document::from_workspace(self.workspace).write(Path::new(rest)).map_err(err)?;
                info!(path = rest, "saved workspace");
                self.say(&format!("saved {}", rest))
            }
            _ => Err(format!("unknown command '{}' (try 'help')", command)),
        }
    }

    fn say(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.output, "{}", text).map_err(err)
    }

    fn selected(&self) -> Result<ElementId, String> {
        self.workspace.selected().ok_or_else(|| "no element selected".to_string())
    }

    fn element_at(&self, position: &str) -> Result<ElementId, String> {
        position
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.workspace.elements().get(i))
            .map(|e| e.id())
            .ok_or_else(|| format!("no element at '{}'", position))
    }

    fn edit(&mut self, name: &str, edit: Edit) -> Result<(), String> {
        let id = self.selected()?;
        match self.workspace.edit_property(id, name, edit).map_err(err)? {
            EditOutcome::Applied => Ok(()),
            EditOutcome::Rejected => self.say("rejected"),
        }
    }
}

fn err(e: impl std::fmt::Display) -> String {
    e.to_string()
}
