//! Line-oriented session scripts for the `media-picker` binary.
//!
//! ```text
//! # comment
//! grant
//! tab video
//! tap-image IMG_0001
//! tap-video MOV_0002 42
//! capture IMG_0003
//! reload IMG_0001,IMG_0003
//! preview
//! done-videos
//! ```

use crate::core::controller::PickerAction;
use crate::core::session::SessionMessage;
use crate::domain::model::{MediaItem, Tab};
use crate::utils::error::{PickerError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

fn step_pattern() -> &'static Regex {
    static STEP: OnceLock<Regex> = OnceLock::new();
    STEP.get_or_init(|| {
        Regex::new(r"^(?P<cmd>[a-z-]+)(?:\s+(?P<arg>\S+))?(?:\s+(?P<secs>\d+))?$")
            .expect("valid script step pattern")
    })
}

fn require<'a>(arg: Option<&'a str>, cmd: &str, line: usize) -> Result<&'a str> {
    arg.ok_or_else(|| PickerError::ScriptError {
        line,
        message: format!("'{}' needs an argument", cmd),
    })
}

pub fn parse_script_file<P: AsRef<Path>>(path: P) -> Result<Vec<SessionMessage>> {
    let content = std::fs::read_to_string(path)?;
    parse_script(&content)
}

pub fn parse_script(content: &str) -> Result<Vec<SessionMessage>> {
    let mut steps = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let caps = step_pattern().captures(text).ok_or_else(|| PickerError::ScriptError {
            line,
            message: format!("cannot parse '{}'", text),
        })?;
        let cmd = &caps["cmd"];
        let arg = caps.name("arg").map(|m| m.as_str());
        let secs = caps.name("secs").map(|m| m.as_str());

        let err = |message: String| PickerError::ScriptError { line, message };

        if secs.is_some() && cmd != "tap-video" {
            return Err(err(format!("'{}' takes at most one argument", cmd)));
        }

        let step = match cmd {
            "grant" => SessionMessage::PermissionsGranted,
            "tab" => {
                let tab = require(arg, cmd, line)?.parse::<Tab>().map_err(err)?;
                SessionMessage::SelectTab(tab)
            }
            "tap-image" => SessionMessage::Toggle(MediaItem::image(require(arg, cmd, line)?)),
            "tap-video" => {
                let mut item = MediaItem::video(require(arg, cmd, line)?);
                if let Some(secs) = secs {
                    let secs: u64 = secs
                        .parse()
                        .map_err(|e| err(format!("bad duration '{}': {}", secs, e)))?;
                    item = item.with_duration(Duration::from_secs(secs));
                }
                SessionMessage::Toggle(item)
            }
            "capture" => SessionMessage::Capture(MediaItem::image(require(arg, cmd, line)?)),
            "reload" => {
                let images = require(arg, cmd, line)?
                    .split(',')
                    .filter(|id| !id.is_empty())
                    .map(MediaItem::image)
                    .collect();
                SessionMessage::ReloadImages(images)
            }
            "preview" => SessionMessage::Action(PickerAction::RequestPreview),
            "done-images" => SessionMessage::Action(PickerAction::DoneWithImages),
            "done-videos" => SessionMessage::Action(PickerAction::DoneWithVideos),
            "cancel" => SessionMessage::Action(PickerAction::Cancel),
            other => return Err(err(format!("unknown command '{}'", other))),
        };

        if arg.is_some() && matches!(step, SessionMessage::PermissionsGranted | SessionMessage::Action(_)) {
            return Err(err(format!("'{}' takes no argument", cmd)));
        }

        steps.push(step);
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MediaKind;

    #[test]
    fn test_parse_full_script() {
        let script = r#"
# pick two things and finish
grant
tab video
tap-video clip 42   # long one
tap-image photo
reload a,b
capture shot
done-videos
"#;

        let steps = parse_script(script).unwrap();
        assert_eq!(steps.len(), 7);
        assert!(matches!(steps[0], SessionMessage::PermissionsGranted));
        assert!(matches!(steps[1], SessionMessage::SelectTab(Tab::Video)));
        match &steps[2] {
            SessionMessage::Toggle(item) => {
                assert_eq!(item.kind, MediaKind::Video);
                assert_eq!(item.metadata.duration, Some(Duration::from_secs(42)));
            }
            other => panic!("unexpected step {:?}", other),
        }
        match &steps[4] {
            SessionMessage::ReloadImages(images) => assert_eq!(images.len(), 2),
            other => panic!("unexpected step {:?}", other),
        }
        assert!(matches!(
            steps[6],
            SessionMessage::Action(PickerAction::DoneWithVideos)
        ));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_script("grant\nshuffle\n").unwrap_err();
        assert!(matches!(err, PickerError::ScriptError { line: 2, .. }));

        let err = parse_script("tap-image").unwrap_err();
        assert!(matches!(err, PickerError::ScriptError { line: 1, .. }));

        assert!(parse_script("tab album").is_err());
        assert!(parse_script("cancel now").is_err());
        assert!(parse_script("tap-image a 12").is_err());
    }
}
