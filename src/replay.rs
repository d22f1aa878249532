// ShakeUp - Trace Replay
//
// Drives a session from a recorded text trace so detector and screen
// behaviour can be checked on a desktop. One step per line:
//
//   <t_ms> sample <x> <y> <z>
//   <t_ms> switch | reset | toasts | pause | resume
//
// Blank lines and lines starting with `#` are skipped.

use anyhow::{anyhow, bail, Context};

use crate::events::{AccelSample, ShakeEvent};
use crate::hub::SensorHub;
use crate::session::ShakeSession;

// ---------------------------------------------------------------------------
// Hub
// ---------------------------------------------------------------------------

/// Hub without hardware: only tracks whether a listener is registered.
#[derive(Debug, Clone, Copy)]
pub struct ReplayHub {
    available: bool,
    registered: bool,
}

impl ReplayHub {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            registered: false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

impl SensorHub for ReplayHub {
    fn is_available(&self) -> bool {
        self.available
    }

    fn register(&mut self) {
        self.registered = true;
    }

    fn unregister(&mut self) {
        self.registered = false;
    }
}

// ---------------------------------------------------------------------------
// Trace format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplayCommand {
    Sample(AccelSample),
    Switch,
    Reset,
    Toasts,
    Pause,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayStep {
    pub at_ms: u32,
    pub command: ReplayCommand,
}

pub fn parse_line(line: &str) -> anyhow::Result<Option<ReplayStep>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let at_ms = fields
        .next()
        .ok_or_else(|| anyhow!("missing timestamp"))?
        .parse::<u32>()
        .context("bad timestamp")?;
    let verb = fields.next().ok_or_else(|| anyhow!("missing command"))?;

    let command = match verb {
        "sample" => {
            let mut axis = |name: &str| -> anyhow::Result<f32> {
                fields
                    .next()
                    .ok_or_else(|| anyhow!("sample is missing {}", name))?
                    .parse::<f32>()
                    .with_context(|| format!("bad {} value", name))
            };
            let x = axis("x")?;
            let y = axis("y")?;
            let z = axis("z")?;
            ReplayCommand::Sample(AccelSample::new(x, y, z))
        }
        "switch" => ReplayCommand::Switch,
        "reset" => ReplayCommand::Reset,
        "toasts" => ReplayCommand::Toasts,
        "pause" => ReplayCommand::Pause,
        "resume" => ReplayCommand::Resume,
        other => bail!("unknown command '{}'", other),
    };

    if let Some(extra) = fields.next() {
        bail!("unexpected trailing field '{}'", extra);
    }

    Ok(Some(ReplayStep { at_ms, command }))
}

pub fn parse_trace(text: &str) -> anyhow::Result<Vec<ReplayStep>> {
    let mut steps = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(step) = parse_line(line).with_context(|| format!("line {}", i + 1))? {
            steps.push(step);
        }
    }
    Ok(steps)
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ReplayReport {
    pub shakes: Vec<ShakeEvent>,
    /// Every toast that appeared, with the time it was shown.
    pub toasts: Vec<(u32, String)>,
}

pub fn run<H: SensorHub>(session: &mut ShakeSession<H>, steps: &[ReplayStep]) -> ReplayReport {
    let mut report = ReplayReport::default();
    let mut last_toast = session.screen().toast().cloned();
    if let Some(toast) = &last_toast {
        report.toasts.push((toast.shown_at_ms, toast.text.clone()));
    }

    for step in steps {
        let now = step.at_ms;
        session.screen_mut().expire_toast(now);

        match step.command {
            ReplayCommand::Sample(sample) => {
                if let Some(shake) = session.on_sample(sample, now) {
                    report.shakes.push(shake);
                }
            }
            ReplayCommand::Switch => session.toggle_sensing(now),
            ReplayCommand::Reset => session.reset(now),
            ReplayCommand::Toasts => session.toggle_shake_toasts(now),
            ReplayCommand::Pause => session.on_pause(),
            ReplayCommand::Resume => session.on_resume(),
        }

        let toast = session.screen().toast().cloned();
        if toast != last_toast {
            if let Some(t) = &toast {
                report.toasts.push((t.shown_at_ms, t.text.clone()));
            }
            last_toast = toast;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MSG_RESET, MSG_SENSOR_ACTIVATED, MSG_SENSOR_UNAVAILABLE};

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("  # comment").unwrap(), None);
        assert_eq!(
            parse_line("120 sample 0.5 -1 9.81").unwrap(),
            Some(ReplayStep {
                at_ms: 120,
                command: ReplayCommand::Sample(AccelSample::new(0.5, -1.0, 9.81)),
            })
        );
        assert_eq!(
            parse_line("0 switch").unwrap().map(|s| s.command),
            Some(ReplayCommand::Switch)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("abc switch").is_err());
        assert!(parse_line("10").is_err());
        assert!(parse_line("10 jump").is_err());
        assert!(parse_line("10 sample 1 2").is_err());
        assert!(parse_line("10 sample 1 2 z").is_err());
        assert!(parse_line("10 reset now").is_err());

        let err = parse_trace("0 switch\n5 bogus\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_replay_session() {
        let trace = "\
# turn on, shake twice inside the window, reset, shake again
0 switch
100 sample 0 0 9.81
200 sample 30 0 0
300 sample 30 0 0
800 reset
900 sample 30 0 0
1400 sample 30 0 0
";
        let steps = parse_trace(trace).unwrap();
        assert_eq!(steps.len(), 7);

        let mut session = ShakeSession::new(ReplayHub::new(true), 0);
        let report = run(&mut session, &steps);

        let times: Vec<u32> = report.shakes.iter().map(|s| s.at_ms).collect();
        assert_eq!(times, vec![200, 1400]);
        assert_eq!(
            report.toasts,
            vec![(0, MSG_SENSOR_ACTIVATED.to_string()), (800, MSG_RESET.to_string())]
        );
        assert!(session.hub().is_registered());
        assert_eq!(session.screen().x_label, "X-Axis: 30.00");
    }

    #[test]
    fn test_bundled_demo_trace() {
        let steps = parse_trace(include_str!("../traces/demo.trace")).unwrap();
        let mut session = ShakeSession::new(ReplayHub::new(true), 0);
        let report = run(&mut session, &steps);

        let times: Vec<u32> = report.shakes.iter().map(|s| s.at_ms).collect();
        assert_eq!(times, vec![2132, 2900, 3600]);
        assert!(report.toasts.iter().any(|(t, msg)| *t == 2132 && msg.starts_with("Shake detected!")));

        // Switched off at the end: listener gone, labels blank.
        assert!(!session.hub().is_registered());
        assert_eq!(session.screen().x_label, crate::ui::screen::X_LABEL_EMPTY);
    }

    #[test]
    fn test_replay_without_sensor() {
        let steps = parse_trace("0 switch\n10 sample 30 0 0\n").unwrap();
        let mut session = ShakeSession::new(ReplayHub::new(false), 0);
        let report = run(&mut session, &steps);

        assert!(report.shakes.is_empty());
        assert_eq!(report.toasts, vec![(0, MSG_SENSOR_UNAVAILABLE.to_string())]);
        assert!(!session.hub().is_registered());
    }
}
