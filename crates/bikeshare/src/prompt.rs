//! Interactive prompts.
//!
//! [`Console`] wraps an input and an output stream. Each `ask_*` method
//! writes a question, reads one line, and parses it into a typed value,
//! repeating with a diagnostic until the answer parses. Retries are unbounded
//! unless a maximum is set with [`Console::with_max_attempts`].

use crate::domain::{City, DayFilter, MonthFilter, Selection, TripFilter};
use crate::error::{Error, Result};
use crate::output::write_rule;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Shown before the first filter question.
pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";

/// Question for the city filter.
pub const CITY_PROMPT: &str =
    "Would you like to see data for Chicago, New York City, or Washington?";

/// Question for the month filter.
pub const MONTH_PROMPT: &str = "Which month? January, February, March, April, May, June or all?";

/// Question for the day filter.
pub const DAY_PROMPT: &str =
    "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or all?";

/// Question for the raw-data preview size.
pub const ROWS_PROMPT: &str =
    "How many rows of data would you like to print? Please enter an integer";

/// Question asked at the end of each session.
pub const RESTART_PROMPT: &str =
    "Would you like to restart? Enter yes to restart, enter any other value to end.";

/// Diagnostic for a rejected filter answer.
pub const INVALID_INPUT: &str = "Invalid Input";

/// Diagnostic for a rejected row count.
pub const INVALID_ROWS: &str = "Error with input, please try again";

/// Line-oriented question/answer channel.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    max_attempts: Option<usize>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console with unbounded retries.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: None,
        }
    }

    /// Limit how many invalid answers a single question tolerates.
    ///
    /// `None` keeps asking forever.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// The output stream, for printing between questions.
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the output stream.
    pub fn into_writer(self) -> W {
        self.output
    }

    /// Write `question` and read one line. `None` means the input is exhausted.
    ///
    /// Bytes that are not UTF-8 become replacement characters, so they fail
    /// parsing like any other bad answer.
    fn read_answer(&mut self, question: &str) -> Result<Option<String>> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Ask until `parse` accepts the answer.
    ///
    /// `field` names the value in errors; `diagnostic` is printed after each
    /// rejected answer.
    pub fn ask<T, E, F>(
        &mut self,
        question: &str,
        field: &'static str,
        diagnostic: &str,
        parse: F,
    ) -> Result<T>
    where
        F: Fn(&str) -> std::result::Result<T, E>,
        E: std::fmt::Display,
    {
        let mut attempts = 0;
        loop {
            let answer = self
                .read_answer(question)?
                .ok_or(Error::InputClosed(field))?;

            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempts += 1;
                    tracing::debug!(field, answer = %answer.trim(), error = %e, "Rejected answer");
                    writeln!(self.output, "{diagnostic}")?;

                    if self.max_attempts.is_some_and(|max| attempts >= max) {
                        return Err(Error::TooManyAttempts { field, attempts });
                    }
                }
            }
        }
    }

    fn ask_parsed<T>(&mut self, question: &str, field: &'static str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.ask(question, field, INVALID_INPUT, str::parse::<T>)
    }

    /// Ask which city to explore.
    pub fn ask_city(&mut self) -> Result<City> {
        self.ask_parsed(CITY_PROMPT, "city")
    }

    /// Ask which month to keep.
    pub fn ask_month(&mut self) -> Result<MonthFilter> {
        self.ask_parsed(MONTH_PROMPT, "month")
    }

    /// Ask which weekday to keep.
    pub fn ask_day(&mut self) -> Result<DayFilter> {
        self.ask_parsed(DAY_PROMPT, "day")
    }

    /// Greet, then ask for city, month and day in turn.
    pub fn ask_selection(&mut self) -> Result<Selection> {
        writeln!(self.output, "{GREETING}")?;

        let city = self.ask_city()?;
        let month = self.ask_month()?;
        let day = self.ask_day()?;

        write_rule(&mut self.output)?;
        Ok(Selection {
            city,
            filter: TripFilter::new(month, day),
        })
    }

    /// Ask how many raw rows to show.
    ///
    /// Any integer is accepted; a negative count shows no rows.
    pub fn ask_row_count(&mut self) -> Result<usize> {
        let question = format!("\n{ROWS_PROMPT}");
        self.ask(&question, "row count", INVALID_ROWS, |answer| {
            answer
                .trim()
                .parse::<i64>()
                .map(|n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
        })
    }

    /// Ask whether to start over. Only `yes` restarts; end of input does not.
    pub fn ask_restart(&mut self) -> Result<bool> {
        let question = format!("\n{RESTART_PROMPT}");
        Ok(self
            .read_answer(&question)?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        console_bytes(input.as_bytes())
    }

    fn console_bytes(input: &[u8]) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.to_vec()), Vec::new())
    }

    fn printed(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_writer()).unwrap()
    }

    #[test]
    fn test_ask_selection_happy_path() {
        let mut c = console("Chicago\nMarch\nfriday\n");

        let selection = c.ask_selection().unwrap();
        assert_eq!(selection.city, City::Chicago);
        assert_eq!(selection.filter.month, MonthFilter::Month(3));
        assert_eq!(selection.filter.day, DayFilter::Day(Weekday::Fri));

        let out = printed(c);
        assert!(out.starts_with(GREETING));
        assert!(out.contains(CITY_PROMPT));
        assert!(out.contains(MONTH_PROMPT));
        assert!(out.contains(DAY_PROMPT));
        assert!(!out.contains(INVALID_INPUT));
    }

    #[test]
    fn test_invalid_answers_are_retried() {
        let mut c = console("boston\n\n new york city \nall\n");

        assert_eq!(c.ask_city().unwrap(), City::NewYorkCity);
        assert_eq!(c.ask_month().unwrap(), MonthFilter::All);

        let out = printed(c);
        assert_eq!(out.matches(INVALID_INPUT).count(), 2);
        assert_eq!(out.matches(CITY_PROMPT).count(), 3);
    }

    #[test]
    fn test_input_closed() {
        let mut c = console("chicago\n");

        assert_eq!(c.ask_city().unwrap(), City::Chicago);
        let err = c.ask_month().unwrap_err();
        assert!(matches!(err, Error::InputClosed("month")));
    }

    #[test]
    fn test_max_attempts() {
        let mut c = console("july\naugust\njune\n").with_max_attempts(Some(2));

        let err = c.ask_month().unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyAttempts {
                field: "month",
                attempts: 2
            }
        ));
    }

    #[test]
    fn test_non_utf8_answer_is_retried() {
        let mut c = console_bytes(b"chic\xe9go\nchicago\n");

        assert_eq!(c.ask_city().unwrap(), City::Chicago);

        let out = printed(c);
        assert_eq!(out.matches(INVALID_INPUT).count(), 1);
        assert_eq!(out.matches(CITY_PROMPT).count(), 2);
    }

    #[test]
    fn test_row_count_rejects_non_integers() {
        let mut c = console("five\n2.5\n\n3\n");

        assert_eq!(c.ask_row_count().unwrap(), 3);
        assert_eq!(printed(c).matches(INVALID_ROWS).count(), 3);
    }

    #[test]
    fn test_negative_row_count_shows_nothing() {
        let mut c = console("-2\n");

        assert_eq!(c.ask_row_count().unwrap(), 0);
        assert!(!printed(c).contains(INVALID_ROWS));
    }

    #[test]
    fn test_restart_only_on_yes() {
        assert!(console("yes\n").ask_restart().unwrap());
        assert!(console("  YES \n").ask_restart().unwrap());
        assert!(!console("y\n").ask_restart().unwrap());
        assert!(!console("no\n").ask_restart().unwrap());
        assert!(!console("").ask_restart().unwrap());
    }
}
