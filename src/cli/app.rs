//! CLI application handler - translates subcommands into view controller
//! calls and renders the resulting note list to the terminal.

use std::io::{stdin, stdout, Write};

use log::debug;

use crate::{
    ClearOutcome, Commands, EmptyIndicator, FileStore, Note, NotebookError, Prompter, Result,
    Store, Theme, ViewController, ViewSnapshot,
};

/// Prompter backed by stdin/stdout, used for interactive confirmations.
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N]: ", prompt);
        if stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            return false;
        }

        let input = input.trim().to_lowercase();
        input == "y" || input == "yes" || input == "д" || input == "да"
    }

    fn inform(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Prompter that answers yes without asking, used for `--force`.
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }

    fn inform(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// CLI application handler - processes CLI commands and interfaces with the
/// store through a view controller.
pub struct App {
    /// The persistence backend
    store: FileStore,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given storage backend
    pub fn new(store: FileStore, verbose: bool) -> Self {
        Self { store, verbose }
    }

    /// Run the CLI application with the given command
    pub fn run(&self, command: Commands) -> Result<()> {
        let mut controller = ViewController::new(&self.store);

        match command {
            Commands::Add { title, content } => self.handle_add(&controller, &title, &content)?,

            Commands::List {
                filter,
                search,
                json,
            } => {
                controller.set_filter(filter);
                if let Some(search) = search {
                    controller.set_search(&search);
                }
                let snapshot = controller.snapshot()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&snapshot.visible)?);
                } else {
                    self.render(&snapshot, controller.state().search.as_str());
                }
            }

            Commands::Toggle { id } => self.handle_toggle(&controller, &id)?,

            Commands::Delete { id, force } => self.handle_delete(&controller, &id, force)?,

            Commands::Clear { force } => self.handle_clear(&controller, force)?,

            Commands::Theme { set, toggle } => self.handle_theme(set, toggle)?,
        }

        Ok(())
    }

    fn handle_add(&self, controller: &ViewController<'_>, title: &str, content: &str) -> Result<()> {
        let note = match controller.add_note(title, content) {
            Ok(note) => note,
            // Validation failure is a user-facing message, not a crash
            Err(NotebookError::EmptyNote { message }) => {
                println!("{}", console::style(message).red());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        println!("Заметка создана: {}", note.id);
        self.render(&controller.snapshot()?, "");
        Ok(())
    }

    fn handle_toggle(&self, controller: &ViewController<'_>, id: &str) -> Result<()> {
        // A missing id is a silent no-op by design
        if let Some(note) = controller.toggle_note(id)? {
            let label = if note.completed {
                "Завершена"
            } else {
                "Возвращена в активные"
            };
            println!("{}: {}", label, note.title);
        } else {
            debug!("Toggle target not found: {}", id);
        }

        self.render(&controller.snapshot()?, "");
        Ok(())
    }

    fn handle_delete(&self, controller: &ViewController<'_>, id: &str, force: bool) -> Result<()> {
        let deleted = if force {
            controller.delete_note(id, &mut AssumeYes)?
        } else {
            controller.delete_note(id, &mut StdioPrompter)?
        };

        if deleted {
            println!("Заметка удалена");
        } else {
            println!("Удаление отменено");
        }

        self.render(&controller.snapshot()?, "");
        Ok(())
    }

    fn handle_clear(&self, controller: &ViewController<'_>, force: bool) -> Result<()> {
        let outcome = if force {
            controller.clear_all_notes(&mut AssumeYes)?
        } else {
            controller.clear_all_notes(&mut StdioPrompter)?
        };

        match outcome {
            ClearOutcome::Cleared(count) => {
                println!("Удалено заметок: {}", count);
                self.render(&controller.snapshot()?, "");
            }
            ClearOutcome::Cancelled => println!("Удаление отменено"),
            ClearOutcome::NothingToClear => {}
        }

        Ok(())
    }

    fn handle_theme(&self, set: Option<Theme>, toggle: bool) -> Result<()> {
        if let Some(theme) = set {
            self.store.set_theme(theme)?;
        } else if toggle {
            let next = self.store.get_theme()?.toggled();
            self.store.set_theme(next)?;
        }

        let current = self.store.get_theme()?;
        let label = match current {
            Theme::Light => "Светлая",
            Theme::Dark => "Темная",
        };
        println!("Тема: {} ({})", label, current);
        Ok(())
    }

    /// Renders the visible note cards, the appropriate empty indicator, and
    /// the stats line.
    fn render(&self, snapshot: &ViewSnapshot, search: &str) {
        match snapshot.empty {
            Some(EmptyIndicator::NoSearchResults) => {
                println!(
                    "{}",
                    console::style(format!("Ничего не найдено по запросу \"{}\"", search)).dim()
                );
            }
            Some(EmptyIndicator::NoNotes) => {
                println!("{}", console::style("Заметок пока нет").dim());
            }
            None => {
                let term_width = terminal_size::terminal_size()
                    .map(|(w, _)| w.0 as usize)
                    .unwrap_or(80);

                for (i, note) in snapshot.visible.iter().enumerate() {
                    if i > 0 {
                        println!("{}", "-".repeat(term_width.min(50)));
                    }
                    self.render_card(note);
                }
            }
        }

        println!(
            "\nВсего: {} | Завершено: {} | Активно: {}",
            snapshot.stats.total, snapshot.stats.completed, snapshot.stats.active
        );
    }

    fn render_card(&self, note: &Note) {
        let created_at = note.created_at.format("%d.%m.%Y %H:%M");

        let marker = if note.completed {
            console::style("✓").green()
        } else {
            console::style("•").cyan()
        };

        println!("{} {}", marker, console::style(&note.title).bold());
        println!("ID: {} | Создана: {}", note.id, created_at);
        println!("{}", note.content);

        if self.verbose {
            println!(
                "Обновлена: {}",
                note.updated_at.format("%d.%m.%Y %H:%M:%S")
            );
        }
    }
}
