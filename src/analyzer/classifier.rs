use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::json;
use tracing::{debug, info};

use crate::domain::{CommitRecord, Impact, ReleaseRule, ReleaseValue, RuleCascade};
use crate::error::{ReleaseImpactError, Result};

/// Exit status an external classifier uses to report that it is not installed
const UNAVAILABLE_EXIT_CODE: i32 = 3;

/// Source of truth for the impact of a release window.
///
/// Implementations receive every commit message of the window together with
/// the configured rule cascade and return the strongest impact.
pub trait ImpactClassifier {
    fn classify(&self, messages: &[String], cascade: &RuleCascade) -> Result<Impact>;
}

/// Rules applied when the configured cascade has no opinion on a commit
pub fn default_rules() -> RuleCascade {
    RuleCascade::new(vec![
        ReleaseRule::new(0, ReleaseValue::Major).with_breaking(true),
        ReleaseRule::new(1, ReleaseValue::Patch).with_revert(true),
        ReleaseRule::new(2, ReleaseValue::Minor).with_type("feat"),
        ReleaseRule::new(3, ReleaseValue::Patch).with_type("fix"),
        ReleaseRule::new(4, ReleaseValue::Patch).with_type("perf"),
    ])
}

/// In-process classifier evaluating the rule cascade directly
#[derive(Debug, Clone, Default)]
pub struct RuleCascadeClassifier;

impl RuleCascadeClassifier {
    pub fn new() -> Self {
        RuleCascadeClassifier
    }

    /// Impact of a single commit.
    ///
    /// The strongest release among matching configured rules wins; an explicit
    /// `false` still counts as a match and suppresses the defaults. Commits no
    /// configured rule matches are evaluated against [`default_rules`].
    pub fn commit_impact(&self, commit: &CommitRecord, cascade: &RuleCascade) -> Impact {
        strongest_release(commit, cascade)
            .or_else(|| strongest_release(commit, &default_rules()))
            .map(|release| release.impact())
            .unwrap_or(Impact::None)
    }
}

fn strongest_release(commit: &CommitRecord, cascade: &RuleCascade) -> Option<ReleaseValue> {
    cascade
        .rules()
        .iter()
        .filter(|rule| rule.matches(commit))
        .map(|rule| rule.release)
        .max()
}

impl ImpactClassifier for RuleCascadeClassifier {
    fn classify(&self, messages: &[String], cascade: &RuleCascade) -> Result<Impact> {
        let impact = messages
            .iter()
            .map(|message| self.commit_impact(&CommitRecord::parse(message), cascade))
            .max()
            .unwrap_or(Impact::None);

        debug!(commits = messages.len(), %impact, "classified release window");
        Ok(impact)
    }
}

/// Classifier delegating to an external program.
///
/// The program receives `{"commits": [...], "releaseRules": [...]}` on stdin
/// and prints the impact (`major`, `minor`, `patch`, `none`) on stdout.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandClassifier {
    pub fn new(program: impl Into<String>, args: Vec<String>, working_dir: impl Into<PathBuf>) -> Self {
        CommandClassifier {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    /// Build from a whitespace-separated command line such as `node scripts/impact.mjs`
    pub fn from_command_line(command_line: &str, working_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ReleaseImpactError::config("classifier command is empty"))?;
        Ok(CommandClassifier::new(program, parts.collect(), working_dir))
    }
}

impl ImpactClassifier for CommandClassifier {
    fn classify(&self, messages: &[String], cascade: &RuleCascade) -> Result<Impact> {
        info!(program = %self.program, "running external impact classifier");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    ReleaseImpactError::classifier_unavailable(format!("{}: {}", self.program, e))
                }
                _ => ReleaseImpactError::classifier(format!(
                    "failed to start {}: {}",
                    self.program, e
                )),
            })?;

        let payload = json!({
            "commits": messages,
            "releaseRules": cascade.declared(),
        });
        if let Some(mut stdin) = child.stdin.take() {
            // A program may exit without reading its input; its exit status decides
            match stdin.write_all(payload.to_string().as_bytes()) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!(program = %self.program, "classifier closed stdin early");
                }
                result => result?,
            }
        }

        let output = child.wait_with_output()?;

        if output.status.code() == Some(UNAVAILABLE_EXIT_CODE) {
            return Err(ReleaseImpactError::classifier_unavailable(format!(
                "{} reported it is unavailable",
                self.program
            )));
        }
        if !output.status.success() {
            return Err(ReleaseImpactError::classifier(format!(
                "{} failed with exit code {}",
                self.program,
                output.status.code().unwrap_or(-1)
            )));
        }

        String::from_utf8_lossy(&output.stdout).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(items: &[&str]) -> Vec<String> {
        items.iter().map(|m| m.to_string()).collect()
    }

    fn cascade(entries: serde_json::Value) -> RuleCascade {
        RuleCascade::from_json(entries.as_array().unwrap())
    }

    #[test]
    fn test_default_rules() {
        let classifier = RuleCascadeClassifier::new();
        let none = RuleCascade::default();

        let cases = [
            ("feat(api): add retry support", Impact::Minor),
            ("fix: bug", Impact::Patch),
            ("perf: faster", Impact::Patch),
            ("docs: readme", Impact::None),
            ("Revert \"feat: add thing\"", Impact::Patch),
            ("fix!: correct auth bypass\n\nBREAKING CHANGE: tokens now expire", Impact::Major),
            ("Updated stuff", Impact::None),
        ];
        for (message, expected) in cases {
            assert_eq!(
                classifier.classify(&messages(&[message]), &none).unwrap(),
                expected,
                "message: {}",
                message
            );
        }
    }

    #[test]
    fn test_strongest_commit_wins() {
        let classifier = RuleCascadeClassifier::new();
        let impact = classifier
            .classify(
                &messages(&["docs: x", "fix: y", "feat: z", "chore: w"]),
                &RuleCascade::default(),
            )
            .unwrap();
        assert_eq!(impact, Impact::Minor);
    }

    #[test]
    fn test_empty_window_is_none() {
        let classifier = RuleCascadeClassifier::new();
        assert_eq!(
            classifier.classify(&[], &RuleCascade::default()).unwrap(),
            Impact::None
        );
    }

    #[test]
    fn test_configured_rules_take_precedence() {
        let classifier = RuleCascadeClassifier::new();
        let rules = cascade(json!([
            {"type": "docs", "scope": "api", "release": "patch"},
            {"type": "refactor", "release": false}
        ]));

        assert_eq!(
            classifier.classify(&messages(&["docs(api): document errors"]), &rules).unwrap(),
            Impact::Patch
        );
        // Unmatched commits fall back to the defaults
        assert_eq!(
            classifier.classify(&messages(&["feat: thing"]), &rules).unwrap(),
            Impact::Minor
        );
        assert_eq!(
            classifier.classify(&messages(&["refactor: tidy"]), &rules).unwrap(),
            Impact::None
        );
    }

    #[test]
    fn test_strongest_matching_rule_wins() {
        let classifier = RuleCascadeClassifier::new();
        let rules = cascade(json!([
            {"type": "fix", "release": "patch"},
            {"breaking": true, "release": "major"}
        ]));
        assert_eq!(
            classifier.classify(&messages(&["fix!: correct auth bypass"]), &rules).unwrap(),
            Impact::Major
        );
    }

    #[test]
    fn test_explicit_no_release_suppresses_defaults() {
        let classifier = RuleCascadeClassifier::new();
        let rules = cascade(json!([{"type": "perf", "release": false}]));
        assert_eq!(
            classifier.classify(&messages(&["perf: faster"]), &rules).unwrap(),
            Impact::None
        );
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let classifier =
            CommandClassifier::new("/nonexistent/impact-classifier", Vec::new(), ".");
        let err = classifier
            .classify(&messages(&["feat: x"]), &RuleCascade::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_command_line_is_split() {
        let classifier =
            CommandClassifier::from_command_line("node scripts/git/impact.mjs --quiet", ".").unwrap();
        assert_eq!(classifier.program, "node");
        assert_eq!(classifier.args, vec!["scripts/git/impact.mjs", "--quiet"]);
        assert!(CommandClassifier::from_command_line("   ", ".").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_external_program_output_is_parsed() {
        let classifier = CommandClassifier::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; echo minor".to_string()],
            ".",
        );
        let impact = classifier
            .classify(&messages(&["feat: x"]), &RuleCascade::default())
            .unwrap();
        assert_eq!(impact, Impact::Minor);
    }

    #[cfg(unix)]
    #[test]
    fn test_external_program_exit_codes() {
        let unavailable = CommandClassifier::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; exit 3".to_string()],
            ".",
        );
        let err = unavailable.classify(&[], &RuleCascade::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let failing = CommandClassifier::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; exit 7".to_string()],
            ".",
        );
        let err = failing.classify(&[], &RuleCascade::default()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_program_ignoring_stdin_is_unavailable() {
        let unavailable = CommandClassifier::new(
            "sh",
            vec!["-c".to_string(), "exit 3".to_string()],
            ".",
        );
        // Well beyond a pipe buffer, so the write fails once the program is gone
        let large = format!("feat: large payload\n\n{}", "x".repeat(256 * 1024));

        for _ in 0..20 {
            let err = unavailable
                .classify(&messages(&[large.as_str()]), &RuleCascade::default())
                .unwrap_err();
            assert_eq!(err.exit_code(), 3);

            let err = unavailable
                .classify(&messages(&["fix: small"]), &RuleCascade::default())
                .unwrap_err();
            assert_eq!(err.exit_code(), 3);
        }
    }
}
