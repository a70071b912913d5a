use crate::core::FieldId;
use crate::core::flow::{Flow, FlowPhase};
use crate::core::gate;
use crate::core::record::FormRecord;
use crate::core::registry::FlowBlueprint;
use crate::core::step::StepDefinition;
use crate::core::validation::{ErrorMap, IssueTarget, ValidationIssue};
use crate::core::value::Value;
use crate::submit::client::{SubmitError, Transport};
use crate::submit::payload::{SubmitRequest, SubmitResponse};
use tracing::{debug, info};

const SUBMIT_FAILED_MESSAGE: &str =
    "Something went wrong while sending your request. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The gate passed and the cursor moved to this step index.
    Advanced(usize),
    /// The gate failed; field errors were written and the cursor stayed put.
    Blocked,
    /// Already on the last step — the forward action is submission.
    AtEnd,
}

/// What `begin_submit` decided. `Ready` hands back the prepared request and
/// leaves the session in-flight until `complete_submit` is called.
pub enum SubmitGate {
    Ready(SubmitRequest),
    Invalid,
    InFlight,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { lead_id: Option<String> },
    Rejected,
    Failed,
    AlreadyInFlight,
    AlreadySubmitted,
}

/// One wizard instance: exclusive owner of its record, error map, and step
/// cursor. Nothing here is shared across sessions.
pub struct WizardSession {
    blueprint: FlowBlueprint,
    record: FormRecord,
    errors: ErrorMap,
    flow: Flow,
}

impl WizardSession {
    pub fn new(blueprint: FlowBlueprint) -> Self {
        let mut record = FormRecord::new();
        blueprint.apply_defaults(&mut record);
        let flow = Flow::new(blueprint.step_count());
        Self {
            blueprint,
            record,
            errors: ErrorMap::default(),
            flow,
        }
    }

    pub fn blueprint(&self) -> &FlowBlueprint {
        &self.blueprint
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.blueprint.steps()[self.flow.current_index()]
    }

    /// Writes one field and clears exactly that field's error entry.
    pub fn update_field(&mut self, id: impl Into<FieldId>, value: Value) {
        let id = id.into();
        self.record.set(id.clone(), value);
        self.errors.clear(id.as_str());
    }

    /// Flips one option in a multi-select field's selection set.
    pub fn toggle_selection(&mut self, id: &str, option: &str) {
        let mut selected: Vec<String> = self
            .record
            .get(id)
            .and_then(Value::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        if let Some(position) = selected.iter().position(|entry| entry == option) {
            selected.remove(position);
        } else {
            selected.push(option.to_string());
        }
        self.update_field(id, Value::List(selected));
    }

    /// Gate-then-advance. Errors for the current step's fields are fully
    /// recomputed; entries belonging to other steps are left alone.
    pub fn next(&mut self) -> StepOutcome {
        if self.flow.phase() != FlowPhase::Collecting {
            return StepOutcome::Blocked;
        }

        let index = self.flow.current_index();
        let issues = gate::validate_step(&self.blueprint, index, &self.record);
        self.replace_step_errors(index, &issues);

        if !issues.is_empty() {
            debug!(
                flow = self.blueprint.id(),
                step = self.current_step().id.as_str(),
                issues = issues.len(),
                "step gate blocked"
            );
            return StepOutcome::Blocked;
        }

        if self.flow.advance() {
            debug!(
                flow = self.blueprint.id(),
                step = self.current_step().id.as_str(),
                "advanced"
            );
            StepOutcome::Advanced(self.flow.current_index())
        } else {
            StepOutcome::AtEnd
        }
    }

    /// Unconditional backward navigation; introduces no error state.
    pub fn back(&mut self) -> bool {
        self.flow.back()
    }

    /// Full-record gate plus the duplicate-submission guard. On success the
    /// session is in-flight until `complete_submit` resolves it.
    pub fn begin_submit(&mut self) -> SubmitGate {
        match self.flow.phase() {
            FlowPhase::Submitting => return SubmitGate::InFlight,
            FlowPhase::Submitted => return SubmitGate::Finished,
            FlowPhase::Collecting => {}
        }

        let issues = gate::validate_record(&self.blueprint, &self.record);
        self.replace_all_errors(&issues);
        if !issues.is_empty() {
            return SubmitGate::Invalid;
        }

        if !self.flow.begin_submitting() {
            return SubmitGate::Invalid;
        }
        SubmitGate::Ready(SubmitRequest {
            path: self.blueprint.endpoint_path().to_string(),
            body: self.record.to_json(),
        })
    }

    /// Applies the transport outcome. The in-flight state always resolves
    /// here — either to Submitted or back to the last step with the generic
    /// error set — so the session can never wedge mid-submission.
    pub fn complete_submit(
        &mut self,
        result: Result<SubmitResponse, SubmitError>,
    ) -> SubmitOutcome {
        if !self.flow.is_submitting() {
            return match self.flow.phase() {
                FlowPhase::Submitted => SubmitOutcome::AlreadySubmitted,
                _ => SubmitOutcome::Rejected,
            };
        }

        match result {
            Ok(response) if response.success => {
                self.flow.finish_submitted();
                let lead_id = response
                    .id_value(self.blueprint.lead_id_key())
                    .map(str::to_string);
                info!(
                    flow = self.blueprint.id(),
                    lead_id = lead_id.as_deref().unwrap_or("-"),
                    "submission accepted"
                );
                SubmitOutcome::Submitted { lead_id }
            }
            Ok(_) | Err(_) => {
                self.flow.fail_submitting();
                self.errors.set_form_error(SUBMIT_FAILED_MESSAGE);
                debug!(flow = self.blueprint.id(), "submission failed");
                SubmitOutcome::Failed
            }
        }
    }

    /// Convenience wrapper: gate, send, resolve.
    pub fn submit(&mut self, transport: &dyn Transport) -> SubmitOutcome {
        match self.begin_submit() {
            SubmitGate::Ready(request) => {
                let result = transport.send(&request);
                self.complete_submit(result)
            }
            SubmitGate::Invalid => SubmitOutcome::Rejected,
            SubmitGate::InFlight => SubmitOutcome::AlreadyInFlight,
            SubmitGate::Finished => SubmitOutcome::AlreadySubmitted,
        }
    }

    fn replace_step_errors(&mut self, step_index: usize, issues: &[ValidationIssue]) {
        if let Some(step) = self.blueprint.step_at(step_index) {
            self.errors.clear_fields(&step.field_ids);
        }
        self.apply_issues(issues);
    }

    fn replace_all_errors(&mut self, issues: &[ValidationIssue]) {
        self.errors.reset();
        self.apply_issues(issues);
    }

    fn apply_issues(&mut self, issues: &[ValidationIssue]) {
        for issue in issues {
            match &issue.target {
                IssueTarget::Field(id) => self.errors.set(id.clone(), issue.message.clone()),
                IssueTarget::Form => self.errors.set_form_error(issue.message.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StepOutcome, SubmitGate, WizardSession};
    use crate::core::value::Value;
    use crate::flows::FlowKind;

    fn commercial_session() -> WizardSession {
        WizardSession::new(FlowKind::Commercial.blueprint())
    }

    #[test]
    fn defaults_are_seeded_on_entry() {
        let session = commercial_session();
        assert_eq!(
            session.record().get("marketing_consent"),
            Some(&Value::Bool(false))
        );

        let federal = WizardSession::new(FlowKind::Federal.blueprint());
        assert_eq!(
            federal.record().get("request_followup"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut session = commercial_session();
        assert_eq!(session.next(), StepOutcome::Blocked);
        assert!(session.errors().get("first_name").is_some());
        assert!(session.errors().get("email").is_some());

        session.update_field("first_name", Value::text("John"));
        assert_eq!(session.errors().get("first_name"), None);
        assert!(session.errors().get("email").is_some());
    }

    #[test]
    fn toggle_selection_flips_membership() {
        let mut session = WizardSession::new(FlowKind::Federal.blueprint());
        session.toggle_selection("compliance_requirements", "FedRAMP");
        session.toggle_selection("compliance_requirements", "CMMC");
        session.toggle_selection("compliance_requirements", "FedRAMP");

        assert_eq!(
            session.record().get("compliance_requirements"),
            Some(&Value::list(["CMMC"]))
        );
    }

    #[test]
    fn next_on_last_step_reports_at_end() {
        let mut session = commercial_session();
        fill_commercial(&mut session);
        assert!(matches!(session.next(), StepOutcome::Advanced(1)));
        assert!(matches!(session.next(), StepOutcome::Advanced(2)));
        assert_eq!(session.next(), StepOutcome::AtEnd);
    }

    #[test]
    fn begin_submit_rejects_while_in_flight() {
        let mut session = commercial_session();
        fill_commercial(&mut session);
        session.next();
        session.next();

        assert!(matches!(session.begin_submit(), SubmitGate::Ready(_)));
        assert!(matches!(session.begin_submit(), SubmitGate::InFlight));
    }

    fn fill_commercial(session: &mut WizardSession) {
        session.update_field("first_name", Value::text("John"));
        session.update_field("last_name", Value::text("Doe"));
        session.update_field("email", Value::text("john@co.com"));
        session.update_field("company_name", Value::text("Acme"));
        session.update_field("company_size", Value::choice("501-1000"));
        session.update_field("industry", Value::choice("tech"));
        session.update_field("project_summary", Value::text("A data platform."));
    }
}
