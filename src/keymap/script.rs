//! Key scripts: a space-separated list of input steps
//!
//! ```text
//! click:0,0 F2 type:hello Enter Tab Shift+Tab outside
//! ```
//!
//! Steps are `click:ROW,COL`, `outside`, `blur`, `draft:TEXT` (replace the
//! edit draft), `type:TEXT` (one key per character), `scroll:PX`,
//! `resize:PX`, or any keystroke (`F2`, `Ctrl+Home`, `x`).

use super::grid::grid_key;
use super::types::Keystroke;
use crate::grid::GridKey;
use crate::messages::{AppMsg, GridMsg, Msg};

fn parse_px(token: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{}': expected a pixel amount", token))
}

fn parse_step(token: &str) -> Result<Vec<Msg>, String> {
    if let Some((verb, arg)) = token.split_once(':') {
        let msgs = match verb.to_ascii_lowercase().as_str() {
            "click" => {
                let (row, col) = arg
                    .split_once(',')
                    .and_then(|(r, c)| Some((r.trim().parse().ok()?, c.trim().parse().ok()?)))
                    .ok_or_else(|| format!("'{}': expected click:ROW,COL", token))?;
                vec![Msg::click(row, col)]
            }
            "draft" => vec![Msg::Grid(GridMsg::SetDraft(arg.to_string()))],
            "type" => arg.chars().map(|c| Msg::key(GridKey::Char(c))).collect(),
            "scroll" => vec![Msg::App(AppMsg::Scroll(parse_px(token, arg)?))],
            "resize" => vec![Msg::resize(parse_px(token, arg)?)],
            _ => return Err(format!("unknown script step '{}'", token)),
        };
        return Ok(msgs);
    }

    match token.to_ascii_lowercase().as_str() {
        "outside" => return Ok(vec![Msg::Grid(GridMsg::ClickOutside)]),
        "blur" => return Ok(vec![Msg::Grid(GridMsg::Blur)]),
        _ => {}
    }

    let stroke: Keystroke = token.parse()?;
    let key = grid_key(stroke).ok_or_else(|| format!("'{}' does nothing in the grid", token))?;
    Ok(vec![Msg::key(key)])
}

/// Parse a whole script into grid messages
pub fn parse_script(script: &str) -> Result<Vec<Msg>, String> {
    let mut msgs = Vec::new();
    for token in script.split_whitespace() {
        msgs.extend(parse_step(token)?);
    }
    Ok(msgs)
}
