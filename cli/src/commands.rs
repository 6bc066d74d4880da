use clap::{Subcommand, ValueEnum};
use std::io::Write;

use todo_sync_core::{RemoteTodos, TodoApp, TodoId, TodoItem, TodoList, MAX_PRIORITY};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all todos
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a todo
    Add {
        /// Title of the todo
        title: String,

        /// Priority (1-3)
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=3))]
        priority: i64,

        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Due date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        due_date: Option<String>,

        /// Comma-separated tags
        #[arg(long, short, default_value = "")]
        tags: String,
    },

    /// Toggle a todo between complete and in progress
    Toggle {
        /// Todo ID
        id: String,
    },

    /// Set the priority of a todo
    Priority {
        /// Todo ID
        id: String,

        /// New priority (1-3)
        #[arg(value_parser = clap::value_parser!(i64).range(1..=3))]
        priority: i64,
    },

    /// Edit a todo; fields not given keep their current value
    Edit {
        /// Todo ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short, value_parser = clap::value_parser!(i64).range(1..=3))]
        priority: Option<i64>,

        #[arg(long, short)]
        date: Option<String>,

        #[arg(long)]
        due_date: Option<String>,

        /// Comma-separated tags, replacing the current ones
        #[arg(long, short)]
        tags: Option<String>,
    },

    /// Delete a todo
    Delete {
        /// Todo ID
        id: String,
    },

    /// Show effective configuration
    Config {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl Command {
    fn needs_collection(&self) -> bool {
        !matches!(self, Command::Config { .. })
    }

    pub fn run<R: RemoteTodos>(
        &self,
        app: &mut TodoApp<R>,
        config: &Config,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.needs_collection() {
            app.load_all()?;
        }

        match self {
            Command::List { format } => match format {
                OutputFormat::Text => write!(out, "{}", render_list(app.todos()))?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(app.todos().items())?)?
                }
            },
            Command::Add {
                title,
                priority,
                date,
                due_date,
                tags,
            } => {
                let form = app.form_mut();
                form.title = title.clone();
                form.priority = *priority;
                if let Some(date) = date {
                    form.date = date.clone();
                }
                if let Some(due_date) = due_date {
                    form.due_date = due_date.clone();
                }
                form.tags = tags.clone();
                let id = app.submit()?;
                print_item(app, &id, out)?;
            }
            Command::Toggle { id } => {
                let id = TodoId::from(id.as_str());
                app.toggle_complete(&id)?;
                print_item(app, &id, out)?;
            }
            Command::Priority { id, priority } => {
                let id = TodoId::from(id.as_str());
                app.set_priority(&id, *priority)?;
                print_item(app, &id, out)?;
            }
            Command::Edit {
                id,
                title,
                priority,
                date,
                due_date,
                tags,
            } => {
                let id = TodoId::from(id.as_str());
                app.start_editing(&id)?;
                let form = app.form_mut();
                if let Some(title) = title {
                    form.title = title.clone();
                }
                if let Some(priority) = priority {
                    form.priority = *priority;
                }
                if let Some(date) = date {
                    form.date = date.clone();
                }
                if let Some(due_date) = due_date {
                    form.due_date = due_date.clone();
                }
                if let Some(tags) = tags {
                    form.tags = tags.clone();
                }
                app.submit()?;
                print_item(app, &id, out)?;
            }
            Command::Delete { id } => {
                let id = TodoId::from(id.as_str());
                app.remove(&id)?;
                writeln!(out, "Deleted todo {id}")?;
            }
            Command::Config {
                format: OutputFormat::Json,
            } => writeln!(out, "{}", serde_json::to_string_pretty(config)?)?,
            Command::Config {
                format: OutputFormat::Text,
            } => {
                writeln!(
                    out,
                    "base_url: {} ({})",
                    config.base_url.value, config.base_url.source
                )?;
                match &config.config_file {
                    Some(path) => writeln!(out, "config_file: {}", path.display())?,
                    None => writeln!(
                        out,
                        "config_file: none ({} not found)",
                        Config::default_config_path().display()
                    )?,
                }
            }
        }
        Ok(())
    }
}

fn print_item<R: RemoteTodos>(
    app: &TodoApp<R>,
    id: &TodoId,
    out: &mut impl Write,
) -> std::io::Result<()> {
    match app.todos().get(id) {
        Some(item) => write!(out, "{}", render_item(item)),
        None => writeln!(out, "Todo {id} is no longer in the list"),
    }
}

/// Filled stars up to `priority`, hollow stars up to the maximum. Values
/// outside 1..=MAX_PRIORITY are drawn clamped.
pub fn render_priority(priority: i64) -> String {
    let filled = priority.clamp(0, MAX_PRIORITY);
    (1..=MAX_PRIORITY)
        .map(|level| if level <= filled { '★' } else { '☆' })
        .collect()
}

pub fn render_item(item: &TodoItem) -> String {
    let check = if item.completed { 'x' } else { ' ' };
    let tags = if item.tags.is_empty() {
        "-".to_string()
    } else {
        item.tags.join(", ")
    };
    format!(
        "{:>4}  [{check}] {}\n      priority {}  date {}  due {}  tags {}\n",
        item.id,
        item.title,
        render_priority(item.priority),
        item.date,
        item.due_date,
        tags
    )
}

pub fn render_list(todos: &TodoList) -> String {
    if todos.is_empty() {
        return "No todos.\n".to_string();
    }
    todos.iter().map(render_item).collect()
}
