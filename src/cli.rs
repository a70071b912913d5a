use crate::core::FieldId;
use crate::core::field::FieldKind;
use crate::core::value::Value;
use crate::submit::client::Transport;
use crate::wizard::{StepOutcome, SubmitOutcome, WizardSession};
use std::io::{self, BufRead, Write};

/// Line-oriented front-end for a wizard session: one prompt per field, one
/// gate per step, `:back` and `:quit` as the only commands.
pub struct PromptDriver<R, W> {
    input: R,
    output: W,
}

enum StepAction {
    Filled,
    Back,
    Quit,
}

struct FieldPrompt {
    id: FieldId,
    label: String,
    kind: FieldKind,
    options: Vec<String>,
}

impl<R: BufRead, W: Write> PromptDriver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn run(
        &mut self,
        session: &mut WizardSession,
        transport: &dyn Transport,
    ) -> io::Result<()> {
        writeln!(self.output, "{}", session.blueprint().title())?;
        writeln!(self.output, "Commands: :back  :quit")?;

        loop {
            let step_number = session.flow().current_index() + 1;
            let step_count = session.blueprint().step_count();
            let step_title = session.current_step().title.clone();
            writeln!(self.output)?;
            writeln!(
                self.output,
                "Step {} of {} — {}",
                step_number, step_count, step_title
            )?;
            if let Some(error) = session.errors().form_error() {
                writeln!(self.output, "! {}", error)?;
            }

            match self.prompt_step(session)? {
                StepAction::Filled => {}
                StepAction::Back => {
                    session.back();
                    continue;
                }
                StepAction::Quit => return Ok(()),
            }

            match session.next() {
                StepOutcome::Advanced(_) => {}
                StepOutcome::Blocked => self.print_errors(session)?,
                StepOutcome::AtEnd => match session.submit(transport) {
                    SubmitOutcome::Submitted { lead_id } => {
                        writeln!(self.output)?;
                        match lead_id {
                            Some(id) => writeln!(
                                self.output,
                                "Thank you — we received your request (ref {}).",
                                id
                            )?,
                            None => {
                                writeln!(self.output, "Thank you — we received your request.")?
                            }
                        }
                        return Ok(());
                    }
                    SubmitOutcome::Failed => {
                        // Generic error is already on the session; the loop
                        // re-prompts the final step so the user may retry.
                    }
                    SubmitOutcome::Rejected => self.print_errors(session)?,
                    SubmitOutcome::AlreadyInFlight | SubmitOutcome::AlreadySubmitted => {
                        return Ok(());
                    }
                },
            }
        }
    }

    fn prompt_step(&mut self, session: &mut WizardSession) -> io::Result<StepAction> {
        let prompts: Vec<FieldPrompt> = session
            .current_step()
            .field_ids
            .iter()
            .filter_map(|id| session.blueprint().field_spec(id.as_str()))
            .map(|spec| FieldPrompt {
                id: spec.id.clone(),
                label: spec.label.clone(),
                kind: spec.kind,
                options: spec.options().to_vec(),
            })
            .collect();

        for prompt in prompts {
            self.print_prompt(session, &prompt)?;
            let raw = match self.read_line()? {
                Some(line) => line,
                None => return Ok(StepAction::Quit),
            };
            match raw.as_str() {
                ":back" => return Ok(StepAction::Back),
                ":quit" => return Ok(StepAction::Quit),
                "" => {}
                _ => {
                    let value = parse_value(prompt.kind, &prompt.options, &raw);
                    session.update_field(prompt.id.clone(), value);
                }
            }
        }
        Ok(StepAction::Filled)
    }

    fn print_prompt(&mut self, session: &WizardSession, prompt: &FieldPrompt) -> io::Result<()> {
        match prompt.kind {
            FieldKind::Choice | FieldKind::MultiSelect => {
                writeln!(self.output, "{}:", prompt.label)?;
                for (index, option) in prompt.options.iter().enumerate() {
                    writeln!(self.output, "  {}. {}", index + 1, option)?;
                }
            }
            _ => {}
        }

        let current = display_value(session.record().value_or_none(prompt.id.as_str()));
        let hint = match prompt.kind {
            FieldKind::Checkbox => " [y/n]",
            FieldKind::MultiSelect => " (comma-separated)",
            _ => "",
        };
        if current.is_empty() {
            write!(self.output, "{}{}: ", prompt.label, hint)?;
        } else {
            write!(self.output, "{}{} [{}]: ", prompt.label, hint, current)?;
        }
        self.output.flush()
    }

    fn print_errors(&mut self, session: &WizardSession) -> io::Result<()> {
        // Blueprint order, not just the current step: a full-record
        // rejection may name fields from earlier steps.
        for spec in session.blueprint().fields() {
            if let Some(message) = session.errors().get(spec.id.as_str()) {
                writeln!(self.output, "  ! {}: {}", spec.label, message)?;
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Turns a raw answer into a record value for the field's shape. Choice
/// answers accept either the option text or its 1-based number.
pub fn parse_value(kind: FieldKind, options: &[String], raw: &str) -> Value {
    match kind {
        FieldKind::Checkbox => Value::Bool(matches!(
            raw.to_ascii_lowercase().as_str(),
            "y" | "yes" | "true" | "1"
        )),
        FieldKind::Choice => {
            if let Some(option) = option_by_number(options, raw) {
                Value::Choice(option.to_string())
            } else {
                Value::Choice(raw.to_string())
            }
        }
        FieldKind::MultiSelect => Value::List(
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(|entry| {
                    option_by_number(options, entry)
                        .unwrap_or(entry)
                        .to_string()
                })
                .collect(),
        ),
        FieldKind::Text | FieldKind::Email | FieldKind::Phone => Value::Text(raw.to_string()),
    }
}

fn option_by_number<'a>(options: &'a [String], raw: &str) -> Option<&'a str> {
    let number: usize = raw.parse().ok()?;
    (1..=options.len())
        .contains(&number)
        .then(|| options[number - 1].as_str())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::None => String::new(),
        Value::Text(v) | Value::Choice(v) => v.clone(),
        Value::Bool(v) => String::from(if *v { "yes" } else { "no" }),
        Value::List(v) => v.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::{PromptDriver, parse_value};
    use crate::core::field::FieldKind;
    use crate::core::value::Value;
    use crate::flows::FlowKind;
    use crate::submit::client::{SubmitError, Transport};
    use crate::submit::payload::{SubmitRequest, SubmitResponse};
    use crate::wizard::WizardSession;
    use std::cell::RefCell;
    use std::io::Cursor;

    struct CountingTransport {
        calls: RefCell<usize>,
    }

    impl Transport for CountingTransport {
        fn send(&self, _request: &SubmitRequest) -> Result<SubmitResponse, SubmitError> {
            *self.calls.borrow_mut() += 1;
            Ok(SubmitResponse {
                success: true,
                ..SubmitResponse::default()
            })
        }
    }

    #[test]
    fn parse_value_understands_each_shape() {
        let sizes = vec!["1-50".to_string(), "51-200".to_string()];
        assert_eq!(
            parse_value(FieldKind::Checkbox, &[], "y"),
            Value::Bool(true)
        );
        assert_eq!(
            parse_value(FieldKind::Checkbox, &[], "n"),
            Value::Bool(false)
        );
        assert_eq!(
            parse_value(FieldKind::Choice, &sizes, "2"),
            Value::choice("51-200")
        );
        assert_eq!(
            parse_value(FieldKind::Choice, &sizes, "1-50"),
            Value::choice("1-50")
        );
        assert_eq!(
            parse_value(FieldKind::MultiSelect, &sizes, "1, 51-200"),
            Value::list(["1-50", "51-200"])
        );
        assert_eq!(
            parse_value(FieldKind::Email, &[], "a@b.co"),
            Value::text("a@b.co")
        );
    }

    #[test]
    fn scripted_commercial_run_reaches_thank_you() {
        let script = "John\nDoe\njohn@co.com\n\n\nAcme\n4\n1\nA data platform.\n\ny\n";
        let mut output = Vec::new();
        let transport = CountingTransport {
            calls: RefCell::new(0),
        };
        let mut session = WizardSession::new(FlowKind::Commercial.blueprint());

        let mut driver = PromptDriver::new(Cursor::new(script), &mut output);
        driver.run(&mut session, &transport).expect("run");

        let rendered = String::from_utf8(output).expect("utf8");
        assert!(rendered.contains("Thank you"));
        assert_eq!(*transport.calls.borrow(), 1);
        assert!(session.flow().is_submitted());
        assert_eq!(
            session.record().get("company_size"),
            Some(&Value::choice("501-1000"))
        );
        assert_eq!(
            session.record().get("marketing_consent"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn quit_makes_no_transport_call() {
        let mut output = Vec::new();
        let transport = CountingTransport {
            calls: RefCell::new(0),
        };
        let mut session = WizardSession::new(FlowKind::Commercial.blueprint());

        let mut driver = PromptDriver::new(Cursor::new(":quit\n"), &mut output);
        driver.run(&mut session, &transport).expect("run");

        assert_eq!(*transport.calls.borrow(), 0);
        assert!(!session.flow().is_submitted());
    }

    #[test]
    fn exhausted_input_ends_the_run_cleanly() {
        let mut output = Vec::new();
        let transport = CountingTransport {
            calls: RefCell::new(0),
        };
        let mut session = WizardSession::new(FlowKind::Commercial.blueprint());

        let mut driver = PromptDriver::new(Cursor::new("John\n"), &mut output);
        driver.run(&mut session, &transport).expect("run");

        assert_eq!(*transport.calls.borrow(), 0);
    }
}
