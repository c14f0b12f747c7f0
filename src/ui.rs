use std::io::{self, BufRead, Write};

use crossterm::style::{Color, Stylize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::repository::TaskRepository;
use crate::task::{Task, TaskStatus};

enum Flow {
    Continue,
    Exit,
}

/// Line-oriented prompt loop over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
    repo: TaskRepository,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, repo: TaskRepository, color: bool) -> Self {
        Self {
            input,
            output,
            repo,
            color,
        }
    }

    /// Runs until `exit` or end of input. Only console I/O failures end it
    /// early; task errors are reported and the loop keeps going.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "Enter a command (add, update, delete, list, exit):"
            )?;
            let Some(command) = self.read_line()? else {
                debug!("input closed, leaving prompt loop");
                return Ok(());
            };

            let flow = match command.as_str() {
                "add" => self.handle_add()?,
                "update" => self.handle_update()?,
                "delete" => self.handle_delete()?,
                "list" => self.handle_list()?,
                "exit" => {
                    writeln!(self.output, "Exiting Task Tracker CLI. Thank you!")?;
                    Flow::Exit
                }
                other => {
                    warn!(command = other, "unknown command");
                    self.error_line("Unknown command, please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    fn handle_add(&mut self) -> io::Result<Flow> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(Flow::Exit);
        };
        match self.repo.add(description) {
            Ok(task) => self.success_line(&format!("Task added successfully! (ID: {})", task.id))?,
            Err(err) => self.report("Error adding task", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn handle_update(&mut self) -> io::Result<Flow> {
        let Some(raw_id) = self.prompt("Enter task ID to update: ")? else {
            return Ok(Flow::Exit);
        };
        let id = match parse_id(&raw_id) {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "rejected task id");
                self.error_line("Invalid task ID.")?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output, "1. Update Description")?;
        writeln!(self.output, "2. Update Status")?;
        let Some(option) = self.prompt("Choose option: ")? else {
            return Ok(Flow::Exit);
        };

        match option.as_str() {
            "1" => {
                let Some(description) = self.prompt("Enter new task description: ")? else {
                    return Ok(Flow::Exit);
                };
                match self.repo.update_description(id, &description) {
                    Ok(_) => self.success_line("Task description updated successfully!")?,
                    Err(err) => self.report("Error updating description", &err)?,
                }
            }
            "2" => {
                let Some(status) = self.prompt("Enter new status (todo, in-progress, done): ")?
                else {
                    return Ok(Flow::Exit);
                };
                match self.repo.update_status(id, &status) {
                    Ok(_) => self.success_line("Task status updated successfully!")?,
                    Err(err) => self.report("Error updating status", &err)?,
                }
            }
            _ => self.error_line("Invalid option")?,
        }
        Ok(Flow::Continue)
    }

    fn handle_delete(&mut self) -> io::Result<Flow> {
        let Some(raw_id) = self.prompt("Enter task ID to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let id = match parse_id(&raw_id) {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "rejected task id");
                self.error_line("Invalid task ID.")?;
                return Ok(Flow::Continue);
            }
        };

        match self.repo.delete(id) {
            Ok(_) => self.success_line("Task deleted successfully!")?,
            Err(err) => self.report("Error deleting task", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn handle_list(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Choose listing option:")?;
        writeln!(self.output, "1. Done")?;
        writeln!(self.output, "2. In-progress")?;
        writeln!(self.output, "3. Todo")?;
        writeln!(self.output, "4. All (default)")?;
        let Some(option) = self.prompt("Select option (1-4): ")? else {
            return Ok(Flow::Exit);
        };

        // An unrecognised choice is reported but still lists everything.
        let filter = match option.as_str() {
            "1" => Some(TaskStatus::Done),
            "2" => Some(TaskStatus::InProgress),
            "3" => Some(TaskStatus::Todo),
            "4" | "" => None,
            _ => {
                self.error_line("Invalid option")?;
                None
            }
        };

        match self.repo.list_by_status(filter) {
            Ok(tasks) => {
                writeln!(self.output, "Tasks:")?;
                for task in &tasks {
                    let line = self.task_line(task);
                    writeln!(self.output, "{line}")?;
                }
            }
            Err(err) => self.report("Error listing tasks", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn task_line(&self, task: &Task) -> String {
        let color = match task.status {
            TaskStatus::Todo => Color::Yellow,
            TaskStatus::InProgress => Color::Cyan,
            TaskStatus::Done => Color::Green,
        };
        format!(
            "ID: {}, Description: {}, Status: {}",
            task.id,
            task.description,
            self.paint(task.status.as_str(), color)
        )
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next trimmed line, or `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, context: &str, err: &Error) -> io::Result<()> {
        warn!(%err, "{context}");
        self.error_line(&format!("{context}: {err}"))
    }

    fn success_line(&mut self, message: &str) -> io::Result<()> {
        let line = self.paint(message, Color::Green);
        writeln!(self.output, "{line}")
    }

    fn error_line(&mut self, message: &str) -> io::Result<()> {
        let line = self.paint(message, Color::Red);
        writeln!(self.output, "{line}")
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

fn parse_id(raw: &str) -> Result<u32> {
    raw.parse().map_err(|_| Error::InvalidInput(raw.to_string()))
}
