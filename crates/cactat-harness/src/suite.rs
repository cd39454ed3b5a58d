#![forbid(unsafe_code)]

//! The end-to-end scenario suite.
//!
//! Every scenario runs against a freshly loaded [`Session`]. A scenario
//! either passes, fails with an [`HarnessError`], or reports itself skipped
//! (the availability check without a fetcher).

use std::time::Instant;

use cactat_core::{DeliveryMode, FormSnapshot, OptionSelector, Product};
use cactat_page::anchor::{Navigation, TARGET_BLANK};
use cactat_page::page::PAGE_TITLE;
use cactat_page::{HttpFetch, PRIVACY_HEADING, PRIVACY_HREF};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::report::RunLog;
use crate::session::{Invoke, MandatoryFields, SUBMIT_LABEL, Session};

// ============================================================================
// Types
// ============================================================================

/// What a scenario body reports when it does not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    Pass,
    Skipped(String),
}

/// Final verdict for one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Pass,
    Fail(String),
    Skip(String),
}

impl CaseOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseOutcome::Pass => "pass",
            CaseOutcome::Fail(_) => "fail",
            CaseOutcome::Skip(_) => "skip",
        }
    }

    /// Failure message or skip reason.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            CaseOutcome::Pass => None,
            CaseOutcome::Fail(d) | CaseOutcome::Skip(d) => Some(d),
        }
    }
}

/// Shared inputs for a scenario run.
pub struct SuiteContext<'a> {
    pub scenario: &'static str,
    pub config: &'a HarnessConfig,
    /// Present only when live HTTP is enabled.
    pub fetcher: Option<&'a dyn HttpFetch>,
}

impl SuiteContext<'_> {
    /// Fail the scenario unless `cond` holds.
    pub fn ensure(&self, cond: bool, detail: impl FnOnce() -> String) -> HarnessResult<()> {
        if cond {
            Ok(())
        } else {
            Err(HarnessError::AssertionFailed {
                scenario: self.scenario.to_string(),
                detail: detail(),
            })
        }
    }

    /// Fail the scenario unless `actual == expected`.
    pub fn ensure_eq<T>(&self, what: &str, actual: T, expected: T) -> HarnessResult<()>
    where
        T: PartialEq + std::fmt::Debug,
    {
        self.ensure(actual == expected, || {
            format!("{what}: expected {expected:?}, got {actual:?}")
        })
    }
}

/// Result of a scenario body.
pub type Step = HarnessResult<CaseStatus>;

pub type ScenarioFn = fn(&mut Session, &SuiteContext<'_>) -> Step;

/// A named scenario.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub run: ScenarioFn,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario").field("name", &self.name).finish()
    }
}

/// Result of one scenario.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: &'static str,
    pub outcome: CaseOutcome,
    pub duration_ms: u64,
    /// Form state at the end of a failed scenario.
    pub snapshot: Option<FormSnapshot>,
}

/// Results of a whole run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    fn count(&self, outcome: &'static str) -> usize {
        self.cases
            .iter()
            .filter(|c| c.outcome.as_str() == outcome)
            .count()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.count("pass")
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count("fail")
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count("skip")
    }

    /// No scenario failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Run one scenario on a fresh session.
pub fn run_scenario(
    scenario: &Scenario,
    config: &HarnessConfig,
    fetcher: Option<&dyn HttpFetch>,
) -> CaseReport {
    let ctx = SuiteContext {
        scenario: scenario.name,
        config,
        fetcher,
    };
    let mut session = Session::new(config);
    let start = Instant::now();
    let result = (scenario.run)(&mut session, &ctx);
    let duration_ms = start.elapsed().as_millis() as u64;

    let (outcome, snapshot) = match result {
        Ok(CaseStatus::Pass) => (CaseOutcome::Pass, None),
        Ok(CaseStatus::Skipped(reason)) => (CaseOutcome::Skip(reason), None),
        Err(err) => (
            CaseOutcome::Fail(err.to_string()),
            Some(session.form().snapshot()),
        ),
    };
    match &outcome {
        CaseOutcome::Fail(detail) => {
            tracing::warn!(scenario = scenario.name, detail = %detail, "scenario failed");
        }
        other => tracing::info!(
            scenario = scenario.name,
            outcome = other.as_str(),
            duration_ms,
            "scenario finished"
        ),
    }
    CaseReport {
        name: scenario.name,
        outcome,
        duration_ms,
        snapshot,
    }
}

/// Run every scenario whose name contains `filter` (case-insensitive).
pub fn run_suite(
    config: &HarnessConfig,
    filter: Option<&str>,
    fetcher: Option<&dyn HttpFetch>,
    log: &mut RunLog,
) -> SuiteReport {
    let filter = filter.map(str::to_lowercase);
    let mut report = SuiteReport::default();
    for scenario in scenarios() {
        if let Some(f) = &filter
            && !scenario.name.to_lowercase().contains(f.as_str())
        {
            continue;
        }
        let case = run_scenario(&scenario, config, fetcher);
        log.log_case(&case);
        report.cases.push(case);
    }
    log.log_complete(&report);
    report
}

const SCENARIOS: &[(&str, ScenarioFn)] = &[
    ("checks the application title", checks_title),
    ("fills the mandatory fields and submits the form", submits_mandatory_fields),
    ("shows an error for a malformed email", rejects_malformed_email),
    ("keeps the phone empty when typing non-digits", phone_rejects_letters),
    ("shows an error when the required phone is left empty", phone_required_but_empty),
    ("fills and clears first name, last name, email and phone", fills_and_clears),
    ("shows an error when submitting an empty form", rejects_empty_form),
    ("submits successfully with the custom command", submits_with_custom_command),
    ("selects a product (YouTube) by its text", selects_by_text),
    ("selects a product (Mentoria) by its value", selects_by_value),
    ("selects a product (Blog) by its index", selects_by_index),
    ("checks the Feedback service type", checks_feedback),
    ("checks each service type", checks_each_service),
    ("checks both checkboxes, then unchecks the last", checks_then_unchecks_last),
    ("selects a file from the fixtures folder", selects_file),
    ("selects a file with drag-and-drop", drags_file),
    ("selects a file through a fixture alias", selects_aliased_file),
    ("privacy policy opens in another tab without a click", privacy_opens_new_tab),
    ("visits the privacy policy after removing the target", privacy_navigates_in_place),
    ("shows and hides the outcome messages with invoke", toggles_messages),
    ("fills the text area with invoke", fills_text_area_directly),
    ("makes an HTTP request", requests_deployed_page),
    ("finds the hidden cat", finds_hidden_cat),
];

/// All scenarios, in suite order.
#[must_use]
pub fn scenarios() -> Vec<Scenario> {
    SCENARIOS
        .iter()
        .map(|&(name, run)| Scenario { name, run })
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

fn submit_ok(session: &mut Session) -> HarnessResult<()> {
    session.click_button(SUBMIT_LABEL).map(|_| ())
}

fn ensure_outcome(session: &Session, ctx: &SuiteContext<'_>, success: bool) -> HarnessResult<()> {
    ctx.ensure_eq(".success visible", session.is_visible(".success")?, success)?;
    ctx.ensure_eq(".error visible", session.is_visible(".error")?, !success)
}

fn checks_title(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    ctx.ensure_eq("title", session.title(), PAGE_TITLE)?;
    Ok(CaseStatus::Pass)
}

fn submits_mandatory_fields(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let long_text = "abcdefghijklmnopqrstuvwxyz".repeat(10);
    session.type_text("#firstName", "Alexandre")?;
    session.type_text("#lastName", "Boer")?;
    session.type_text("#email", "teste.ale@gmail.com")?;
    session.type_text("#open-text-area", &long_text)?;
    submit_ok(session)?;
    ensure_outcome(session, ctx, true)?;
    Ok(CaseStatus::Pass)
}

fn rejects_malformed_email(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.type_text("#firstName", "Alexandre")?;
    session.type_text("#lastName", "Boer")?;
    session.type_text("#email", "teste.alegmail.com")?;
    session.type_text("#open-text-area", "Hello, it's me!")?;
    submit_ok(session)?;
    ensure_outcome(session, ctx, false)?;
    Ok(CaseStatus::Pass)
}

fn phone_rejects_letters(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.type_text("#phone", "acbde")?;
    ctx.ensure_eq("#phone value", session.value("#phone")?, String::new())?;
    Ok(CaseStatus::Pass)
}

fn phone_required_but_empty(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.type_text("#firstName", "Alexandre")?;
    session.type_text("#lastName", "Boer")?;
    session.type_text("#email", "teste.ale@gmail.com")?;
    session.type_text("#open-text-area", "Hello, world!")?;
    session.check("#phone-checkbox")?;
    submit_ok(session)?;
    ensure_outcome(session, ctx, false)?;
    Ok(CaseStatus::Pass)
}

fn fills_and_clears(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    for (selector, text) in [
        ("#firstName", "Alexandre"),
        ("#lastName", "Boer"),
        ("#email", "test_ale@gmail.com"),
        ("#phone", "123456789"),
    ] {
        session.type_text(selector, text)?;
        ctx.ensure_eq(selector, session.value(selector)?.as_str(), text)?;
        session.clear(selector)?;
        ctx.ensure_eq(selector, session.value(selector)?.as_str(), "")?;
    }
    Ok(CaseStatus::Pass)
}

fn rejects_empty_form(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    submit_ok(session)?;
    ensure_outcome(session, ctx, false)?;
    Ok(CaseStatus::Pass)
}

fn submits_with_custom_command(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.fill_mandatory_fields_and_submit(&MandatoryFields::default())?;
    ensure_outcome(session, ctx, true)?;
    Ok(CaseStatus::Pass)
}

fn selects_by_text(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let value = session.select("#product", "YouTube")?;
    ctx.ensure_eq("#product value", value.as_str(), Product::YouTube.value())?;
    Ok(CaseStatus::Pass)
}

fn selects_by_value(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let value = session.select("#product", OptionSelector::Value("mentoria".into()))?;
    ctx.ensure_eq("#product value", value.as_str(), "mentoria")?;
    Ok(CaseStatus::Pass)
}

fn selects_by_index(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let value = session.select("#product", 1usize)?;
    ctx.ensure_eq("#product value", value.as_str(), "blog")?;
    Ok(CaseStatus::Pass)
}

fn checks_feedback(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let selector = r#"input[type="radio"][value="feedback"]"#;
    session.check(selector)?;
    ctx.ensure(session.is_checked(selector)?, || "feedback not checked".into())?;
    Ok(CaseStatus::Pass)
}

fn checks_each_service(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    for radio in session.each(r#"input[type="radio"]"#)? {
        session.check(&radio)?;
        ctx.ensure(session.is_checked(&radio)?, || format!("{radio} not checked"))?;
    }
    Ok(CaseStatus::Pass)
}

fn checks_then_unchecks_last(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let boxes = session.each(r#"input[type="checkbox"]"#)?;
    for checkbox in &boxes {
        session.check(checkbox)?;
        ctx.ensure(session.is_checked(checkbox)?, || format!("{checkbox} not checked"))?;
    }
    let Some(last) = boxes.last() else {
        return Err(HarnessError::UnknownSelector(r#"input[type="checkbox"]"#.into()));
    };
    session.uncheck(last)?;
    ctx.ensure(!session.is_checked(last)?, || format!("{last} still checked"))?;
    Ok(CaseStatus::Pass)
}

fn ensure_file(session: &Session, ctx: &SuiteContext<'_>) -> HarnessResult<()> {
    ctx.ensure_eq(
        "files[0].name",
        session.file_name("#file-upload")?.as_deref(),
        Some("example.json"),
    )
}

fn selects_file(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.select_file("#file-upload", "cypress/fixtures/example.json", DeliveryMode::Select)?;
    ensure_file(session, ctx)?;
    Ok(CaseStatus::Pass)
}

fn drags_file(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.select_file("#file-upload", "cypress/fixtures/example.json", DeliveryMode::DragDrop)?;
    ensure_file(session, ctx)?;
    Ok(CaseStatus::Pass)
}

fn selects_aliased_file(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.alias_fixture("example.json", "sampleFile")?;
    session.select_file("#file-upload", "@sampleFile", DeliveryMode::Select)?;
    ensure_file(session, ctx)?;
    Ok(CaseStatus::Pass)
}

fn privacy_opens_new_tab(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let link = session.link("Política de Privacidade")?;
    let href = link.require_attr("href")?.to_string();
    let target = link.require_attr("target")?.to_string();
    ctx.ensure_eq("href", href.as_str(), PRIVACY_HREF)?;
    ctx.ensure_eq("target", target.as_str(), TARGET_BLANK)?;
    Ok(CaseStatus::Pass)
}

fn privacy_navigates_in_place(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.link("Política de Privacidade")?.remove_attr("target");
    let navigation = session.click_link("Política de Privacidade")?;
    ctx.ensure(matches!(navigation, Navigation::CurrentContext { .. }), || {
        format!("expected in-place navigation, got {navigation:?}")
    })?;
    ctx.ensure(
        session.page().document().contains_visible_heading(PRIVACY_HEADING),
        || format!("h1 {PRIVACY_HEADING:?} not visible"),
    )?;
    Ok(CaseStatus::Pass)
}

fn toggles_messages(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    for panel in [".success", ".error"] {
        ctx.ensure(!session.is_visible(panel)?, || format!("{panel} visible before show"))?;
        session.invoke(panel, Invoke::Show)?;
        ctx.ensure(session.is_visible(panel)?, || format!("{panel} hidden after show"))?;
        let text = session.text(panel)?;
        let expected = if panel == ".success" {
            "Mensagem enviada com sucesso."
        } else {
            "Valide os campos obrigatórios!"
        };
        ctx.ensure(text.contains(expected), || format!("{panel} text {text:?}"))?;
        session.invoke(panel, Invoke::Hide)?;
        ctx.ensure(!session.is_visible(panel)?, || format!("{panel} visible after hide"))?;
    }
    Ok(CaseStatus::Pass)
}

fn fills_text_area_directly(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.invoke("#open-text-area", Invoke::Val("um texto qualquer".into()))?;
    ctx.ensure_eq(
        "#open-text-area value",
        session.value("#open-text-area")?.as_str(),
        "um texto qualquer",
    )?;
    Ok(CaseStatus::Pass)
}

fn requests_deployed_page(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    let Some(fetcher) = ctx.fetcher else {
        return Ok(CaseStatus::Skipped("live HTTP disabled".into()));
    };
    let availability = &ctx.config.availability;
    let response = session.request(fetcher, &availability.url)?;
    ctx.ensure_eq("status", response.status, availability.expected_status)?;
    ctx.ensure_eq("statusText", response.reason.as_str(), availability.expected_reason.as_str())?;
    ctx.ensure(response.body.contains(&availability.body_needle), || {
        format!("body does not include {:?}", availability.body_needle)
    })?;
    Ok(CaseStatus::Pass)
}

fn finds_hidden_cat(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
    session.invoke("#cat", Invoke::Show)?;
    ctx.ensure(session.is_visible("#cat")?, || "#cat still hidden".into())?;
    session.invoke("#title", Invoke::Text("CAT TAT".into()))?;
    session.invoke("#subtitle", Invoke::Text("Eu 🩷 gatos!".into()))?;
    ctx.ensure_eq("#title text", session.text("#title")?.as_str(), "CAT TAT")?;
    ctx.ensure_eq("#subtitle text", session.text("#subtitle")?.as_str(), "Eu 🩷 gatos!")?;
    Ok(CaseStatus::Pass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scenario_names_are_unique() {
        let all = scenarios();
        let names: HashSet<_> = all.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), all.len());
        assert_eq!(all.len(), 23);
    }

    #[test]
    fn ensure_eq_reports_both_sides() {
        let config = HarnessConfig::default();
        let ctx = SuiteContext {
            scenario: "demo",
            config: &config,
            fetcher: None,
        };
        let err = ctx.ensure_eq("value", "a", "b").unwrap_err();
        assert_eq!(err.to_string(), "demo: value: expected \"b\", got \"a\"");
    }

    #[test]
    fn failing_scenario_carries_snapshot() {
        fn broken(session: &mut Session, ctx: &SuiteContext<'_>) -> Step {
            session.type_text("#firstName", "Alexandre")?;
            ctx.ensure(false, || "always fails".into())?;
            Ok(CaseStatus::Pass)
        }
        let scenario = Scenario {
            name: "broken",
            run: broken,
        };
        let case = run_scenario(&scenario, &HarnessConfig::default(), None);
        assert_eq!(case.outcome, CaseOutcome::Fail("broken: always fails".into()));
        let snapshot = case.snapshot.unwrap();
        assert_eq!(snapshot.first_name, "Alexandre");
    }

    #[test]
    fn offline_http_scenario_is_skipped() {
        let scenario = scenarios()
            .into_iter()
            .find(|s| s.name == "makes an HTTP request")
            .unwrap();
        let case = run_scenario(&scenario, &HarnessConfig::default(), None);
        assert_eq!(case.outcome.as_str(), "skip");
        assert_eq!(case.outcome.detail(), Some("live HTTP disabled"));
    }
}
