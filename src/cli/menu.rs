//! Interactive query menu

use crate::cli::commands::OutputFormat;
use crate::cli::output::{write_message, write_record};
use crate::cli::prompt::Prompter;
use crate::core::temporal::{Timestamp, YearMonth};
use crate::error::{Error, Result};
use crate::store::Store;
use std::io::{BufRead, Write};
use tracing::info;

const OPTIONS: &str = "\nSelect an action:\n\
1 - Get a post by date\n\
2 - Display the most viewed post\n\
3 - Get posts in a specific time range\n\
4 - Display all posts\n\
5 - Exit";

/// Month-range queries need the start month strictly before the end month
pub fn ensure_month_order(start: &YearMonth, end: &YearMonth) -> Result<()> {
    if start < end {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            start: *start,
            end: *end,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'s, R, W> {
    store: &'s mut Store,
    prompter: Prompter<R, W>,
    format: OutputFormat,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(store: &'s mut Store, prompter: Prompter<R, W>, format: OutputFormat) -> Self {
        Self {
            store,
            prompter,
            format,
        }
    }

    /// Serve menu choices until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompter.say(OPTIONS)?;
            let Some(choice) = self.prompter.ask("Enter your choice (1-5): ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.lookup()?,
                "2" => self.most_viewed()?,
                "3" => self.month_range()?,
                "4" => self.list_all()?,
                "5" => {
                    self.notify("Thank you for using the post management system. Goodbye!")?;
                    Flow::Exit
                }
                _ => {
                    self.notify("Invalid action, try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        info!("menu closed");
        Ok(())
    }

    fn lookup(&mut self) -> Result<Flow> {
        let Some(timestamp) = self.prompter.ask_parsed(
            "Enter the date and time (YYYY-MM-DD HH:MM:SS): ",
            "Invalid format. Please enter the date and time in YYYY-MM-DD HH:MM:SS format.",
            Timestamp::parse,
        )?
        else {
            return Ok(Flow::Exit);
        };

        match self.store.lookup(timestamp) {
            Some(record) => {
                write_record(self.prompter.output(), self.format, Some("Post"), record)?
            }
            None => self.notify(&format!("No post found for {}.", timestamp))?,
        }
        Ok(Flow::Continue)
    }

    fn most_viewed(&mut self) -> Result<Flow> {
        match self.store.extract_max() {
            Some(record) => write_record(
                self.prompter.output(),
                self.format,
                Some("Most viewed post"),
                record,
            )?,
            None => self.notify("No posts available.")?,
        }
        Ok(Flow::Continue)
    }

    fn month_range(&mut self) -> Result<Flow> {
        const HINT: &str = "Invalid format. Please enter the month and year in YYYY-MM format.";

        let Some(start) = self.prompter.ask_parsed(
            "Enter the start month and year (YYYY-MM): ",
            HINT,
            YearMonth::parse,
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(end) = self.prompter.ask_parsed(
            "Enter the end month and year (YYYY-MM): ",
            HINT,
            YearMonth::parse,
        )?
        else {
            return Ok(Flow::Exit);
        };

        if let Err(e) = ensure_month_order(&start, &end) {
            self.notify(&format!("{}. Please try again.", e))?;
            return Ok(Flow::Continue);
        }

        let records = self.store.range_query_by_month(&start, &end);
        if records.is_empty() {
            let message = format!("No posts between {} and {}.", start, end);
            write_message(self.prompter.output(), self.format, &message)?;
        }
        for record in records {
            write_record(self.prompter.output(), self.format, None, record)?;
        }
        Ok(Flow::Continue)
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        write_message(self.prompter.output(), self.format, message)
    }

    fn list_all(&mut self) -> Result<Flow> {
        for record in self.store.iter() {
            write_record(self.prompter.output(), self.format, None, record)?;
        }
        Ok(Flow::Continue)
    }
}
